use clipper_engine::{Browser, Platform, ScraperSettings};
use pretty_assertions::assert_eq;

#[test]
fn defaults_match_a_fresh_install() {
    let settings = ScraperSettings::default();
    assert_eq!(settings.browser, Browser::Chromium);
    assert!(!settings.headless);
    assert_eq!(settings.frontmatter_url_key, "url");
    assert!(settings.scripts_path.is_empty());
    assert!(settings.brave_path.is_empty());
    for platform in [
        Platform::X,
        Platform::Instagram,
        Platform::Threads,
        Platform::YouTube,
    ] {
        assert_eq!(settings.cookies.for_platform(platform), "");
    }
}

#[test]
fn partial_settings_merge_over_defaults() {
    let settings: ScraperSettings =
        serde_json::from_str(r#"{"browser": "brave", "bravePath": "/opt/brave/brave"}"#).unwrap();

    assert_eq!(settings.browser, Browser::Brave);
    assert_eq!(settings.brave_path, "/opt/brave/brave");
    // Everything omitted keeps its default.
    assert!(!settings.headless);
    assert_eq!(settings.frontmatter_url_key, "url");
    assert_eq!(settings.cookies.for_platform(Platform::X), "");
}

#[test]
fn persisted_shape_uses_platform_tags_and_camel_case() {
    let raw = r#"{
        "browser": "chromium",
        "headless": true,
        "cookies": {"X": "auth=1", "INSTAGRAM": "", "THREADS": "", "YOUTUBE": "sid=2"},
        "frontmatterUrlKey": "source",
        "scriptsPath": "~/bin/clipper-scripts",
        "bravePath": ""
    }"#;
    let settings: ScraperSettings = serde_json::from_str(raw).unwrap();

    assert!(settings.headless);
    assert_eq!(settings.cookies.for_platform(Platform::X), "auth=1");
    assert_eq!(settings.cookies.for_platform(Platform::YouTube), "sid=2");
    assert_eq!(settings.frontmatter_url_key, "source");
    assert_eq!(settings.scripts_path, "~/bin/clipper-scripts");

    // Round trip keeps the on-disk shape stable.
    let json = serde_json::to_string(&settings).unwrap();
    let reparsed: ScraperSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, settings);
    assert!(json.contains("\"frontmatterUrlKey\""));
    assert!(json.contains("\"INSTAGRAM\""));
}

#[test]
fn unknown_browser_values_are_rejected() {
    let result = serde_json::from_str::<ScraperSettings>(r#"{"browser": "netscape"}"#);
    assert!(result.is_err());
}
