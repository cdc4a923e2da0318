use std::path::Path;

use crate::extract::{AuthorSelectors, SelectorMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Instagram,
    Threads,
    YouTube,
}

impl Platform {
    /// Resolves the positional script argument. A leading path and a file
    /// extension are tolerated, since callers historically passed the full
    /// path of a script file.
    pub fn from_script(script: &str) -> Option<Self> {
        let stem = Path::new(script).file_stem()?.to_str()?;
        match stem {
            "scrape-x" => Some(Platform::X),
            "scrape-instagram" => Some(Platform::Instagram),
            "scrape-threads" => Some(Platform::Threads),
            "scrape-youtube" => Some(Platform::YouTube),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::X => "X",
            Platform::Instagram => "Instagram",
            Platform::Threads => "Threads",
            Platform::YouTube => "YouTube",
        }
    }

    /// Page holding the user's saved content.
    pub fn start_url(&self) -> &'static str {
        match self {
            Platform::X => "https://x.com/i/bookmarks",
            Platform::Instagram => "https://www.instagram.com/your_activity/saved",
            Platform::Threads => "https://www.threads.net/saved",
            Platform::YouTube => "https://www.youtube.com/playlist?list=WL",
        }
    }

    /// Domain every injected cookie is pinned to.
    pub fn cookie_domain(&self) -> &'static str {
        match self {
            Platform::X => ".x.com",
            Platform::Instagram => ".instagram.com",
            Platform::Threads => ".threads.net",
            Platform::YouTube => ".youtube.com",
        }
    }

    /// Selector map for platforms with an implemented extractor. Platforms
    /// without one run the generic phases and finish with zero records.
    pub fn selector_map(&self) -> Option<&'static SelectorMap> {
        match self {
            Platform::X => Some(&X_SELECTORS),
            _ => None,
        }
    }
}

/// Bookmark timeline markup on x.com.
pub static X_SELECTORS: SelectorMap = SelectorMap {
    container: "[data-testid=\"cellInnerDiv\"]",
    item: Some("[data-testid=\"tweet\"]"),
    text: "[data-testid=\"tweetText\"]",
    link: "a[href*=\"/status/\"]",
    link_prefix: "https://x.com",
    author: Some(AuthorSelectors {
        root: "[data-testid=\"User-Name\"]",
        name: "span",
        handle_link: "a[role=\"link\"]",
    }),
    images: "[data-testid=\"tweetPhoto\"] img, img[src*=\"pbs.twimg.com\"]",
    image_host: "pbs.twimg.com",
    image_exclude: "profile_images",
    video_thumb: Some("[data-testid=\"videoPlayer\"] img"),
    metrics: &[
        ("replies", "[data-testid=\"reply\"]"),
        ("retweets", "[data-testid=\"retweet\"]"),
        ("likes", "[data-testid=\"like\"]"),
    ],
    untitled_label: "Untitled Tweet",
    max_records: 20,
};
