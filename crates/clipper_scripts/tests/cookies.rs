use clipper_scripts::cookies::{parse_cookie_header, CookieError, CookieRecord};
use pretty_assertions::assert_eq;

fn record(name: &str, value: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: ".x.com".to_string(),
        path: "/".to_string(),
    }
}

#[test]
fn one_record_per_semicolon_segment() {
    let cookies = parse_cookie_header("a=1; b=2", ".x.com").unwrap();
    assert_eq!(cookies, vec![record("a", "1"), record("b", "2")]);
}

#[test]
fn values_and_names_are_trimmed() {
    let cookies = parse_cookie_header("  auth_token = abc ;ct0=def ", ".x.com").unwrap();
    assert_eq!(cookies, vec![record("auth_token", "abc"), record("ct0", "def")]);
}

#[test]
fn every_record_gets_the_platform_domain_and_root_path() {
    let cookies = parse_cookie_header("sid=1; ssid=2", ".youtube.com").unwrap();
    for cookie in &cookies {
        assert_eq!(cookie.domain, ".youtube.com");
        assert_eq!(cookie.path, "/");
    }
}

#[test]
fn trailing_semicolons_are_tolerated() {
    let cookies = parse_cookie_header("a=1; b=2;", ".x.com").unwrap();
    assert_eq!(cookies.len(), 2);
}

#[test]
fn values_may_contain_equals_signs() {
    let cookies = parse_cookie_header("token=abc==", ".x.com").unwrap();
    assert_eq!(cookies, vec![record("token", "abc==")]);
}

#[test]
fn empty_values_are_allowed() {
    let cookies = parse_cookie_header("flag=", ".x.com").unwrap();
    assert_eq!(cookies, vec![record("flag", "")]);
}

#[test]
fn a_pair_without_equals_rejects_the_whole_string() {
    let err = parse_cookie_header("a=1; justtext; b=2", ".x.com").unwrap_err();
    assert_eq!(err, CookieError::MalformedPair("justtext".to_string()));
}

#[test]
fn a_pair_with_an_empty_name_rejects_the_whole_string() {
    let err = parse_cookie_header("=value", ".x.com").unwrap_err();
    assert_eq!(err, CookieError::EmptyName("=value".to_string()));
}

#[test]
fn an_empty_string_yields_no_cookies() {
    assert_eq!(parse_cookie_header("", ".x.com").unwrap(), Vec::new());
    assert_eq!(parse_cookie_header("  ", ".x.com").unwrap(), Vec::new());
}
