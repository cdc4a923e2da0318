use thiserror::Error;

/// One cookie ready for injection into the browser context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("malformed cookie pair (missing '='): {0:?}")]
    MalformedPair(String),
    #[error("cookie pair with an empty name: {0:?}")]
    EmptyName(String),
}

/// Splits a semicolon-delimited `name=value` string into cookie records,
/// each pinned to the platform's domain at the root path.
///
/// A pair without an `=`, or with a blank name, rejects the whole string:
/// silently injecting half a cookie would only produce a confusing logged-out
/// scrape later. Empty segments (trailing semicolons) are tolerated.
pub fn parse_cookie_header(raw: &str, domain: &str) -> Result<Vec<CookieRecord>, CookieError> {
    let mut records = Vec::new();
    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (name, value) = segment
            .split_once('=')
            .ok_or_else(|| CookieError::MalformedPair(segment.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CookieError::EmptyName(segment.to_string()));
        }
        records.push(CookieRecord {
            name: name.to_string(),
            value: value.trim().to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
        });
    }
    Ok(records)
}
