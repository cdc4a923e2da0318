use serde::{Deserialize, Serialize};

use crate::Platform;

/// Browser engine the scrape scripts should launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
    Brave,
}

impl Browser {
    /// Lowercase form used for the `--browser` argument.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
            Browser::Brave => "brave",
        }
    }
}

/// One raw cookie string per platform, as copied out of a logged-in browser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformCookies {
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "INSTAGRAM")]
    pub instagram: String,
    #[serde(rename = "THREADS")]
    pub threads: String,
    #[serde(rename = "YOUTUBE")]
    pub youtube: String,
}

impl PlatformCookies {
    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::X => &self.x,
            Platform::Instagram => &self.instagram,
            Platform::Threads => &self.threads,
            Platform::YouTube => &self.youtube,
        }
    }
}

/// Persisted scraper configuration.
///
/// Every field is defaulted so a partial settings file merges over the
/// defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScraperSettings {
    pub browser: Browser,
    pub headless: bool,
    pub cookies: PlatformCookies,
    /// Frontmatter key the item URL is written under.
    pub frontmatter_url_key: String,
    /// Path to the scrape-scripts executable; supports a leading `~`.
    pub scripts_path: String,
    /// Brave executable, required only when `browser` is `brave`.
    pub brave_path: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: false,
            cookies: PlatformCookies::default(),
            frontmatter_url_key: "url".to_string(),
            scripts_path: String::new(),
            brave_path: String::new(),
        }
    }
}
