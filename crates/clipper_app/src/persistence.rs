use std::fs;
use std::path::{Path, PathBuf};

use clipper_core::{Platform, ReviewItem, ReviewSet, ScrapedItem};
use clipper_engine::{ensure_vault_dir, ScraperSettings};
use clipper_logging::{clip_error, clip_info, clip_warn};
use serde::{Deserialize, Serialize};

const REVIEW_FILENAME: &str = ".clipper_review.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedItem {
    url: String,
    title: String,
    description: String,
    image_url: String,
    selected: bool,
    tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedReview {
    platform: String,
    items: Vec<PersistedItem>,
}

fn review_path(vault: &Path) -> PathBuf {
    vault.join(REVIEW_FILENAME)
}

pub(crate) fn load_review(vault: &Path) -> Option<ReviewSet> {
    let path = review_path(vault);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            clip_warn!("Failed to read staged review from {:?}: {}", path, err);
            return None;
        }
    };

    let persisted: PersistedReview = match ron::from_str(&content) {
        Ok(review) => review,
        Err(err) => {
            clip_warn!("Failed to parse staged review from {:?}: {}", path, err);
            return None;
        }
    };

    let platform = match platform_from_tag(&persisted.platform) {
        Some(platform) => platform,
        None => {
            clip_warn!(
                "Staged review in {:?} names unknown platform {:?}",
                path,
                persisted.platform
            );
            return None;
        }
    };

    let items = persisted
        .items
        .into_iter()
        .map(|item| ReviewItem {
            item: ScrapedItem {
                url: item.url,
                title: item.title,
                description: item.description,
                image_url: item.image_url,
            },
            selected: item.selected,
            tags: item.tags,
        })
        .collect();

    clip_info!("Loaded staged review from {:?}", path);
    Some(ReviewSet { platform, items })
}

pub(crate) fn save_review(vault: &Path, set: &ReviewSet) {
    if let Err(err) = ensure_vault_dir(vault) {
        clip_error!("Failed to ensure vault dir {:?}: {}", vault, err);
        return;
    }

    let persisted = PersistedReview {
        platform: platform_tag(set.platform).to_string(),
        items: set
            .items
            .iter()
            .map(|entry| PersistedItem {
                url: entry.item.url.clone(),
                title: entry.item.title.clone(),
                description: entry.item.description.clone(),
                image_url: entry.item.image_url.clone(),
                selected: entry.selected,
                tags: entry.tags.clone(),
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&persisted, pretty) {
        Ok(text) => text,
        Err(err) => {
            clip_error!("Failed to serialize staged review: {}", err);
            return;
        }
    };

    let path = review_path(vault);
    if let Err(err) = fs::write(&path, content) {
        clip_error!("Failed to write staged review to {:?}: {}", path, err);
    }
}

pub(crate) fn discard_review(vault: &Path) {
    let path = review_path(vault);
    match fs::remove_file(&path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => clip_warn!("Failed to remove staged review {:?}: {}", path, err),
    }
}

pub(crate) fn load_settings(path: &Path) -> ScraperSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            clip_info!("No settings file at {:?}, using defaults", path);
            return ScraperSettings::default();
        }
        Err(err) => {
            clip_warn!("Failed to read settings from {:?}: {}", path, err);
            return ScraperSettings::default();
        }
    };

    // Missing fields merge over the defaults; a broken file falls back whole.
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            clip_warn!("Failed to parse settings from {:?}: {}", path, err);
            ScraperSettings::default()
        }
    }
}

pub(crate) fn save_settings(path: &Path, settings: &ScraperSettings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(settings).map_err(std::io::Error::other)?;
    fs::write(path, content)
}

fn platform_tag(platform: Platform) -> &'static str {
    match platform {
        Platform::X => "X",
        Platform::Instagram => "INSTAGRAM",
        Platform::Threads => "THREADS",
        Platform::YouTube => "YOUTUBE",
    }
}

fn platform_from_tag(tag: &str) -> Option<Platform> {
    match tag {
        "X" => Some(Platform::X),
        "INSTAGRAM" => Some(Platform::Instagram),
        "THREADS" => Some(Platform::Threads),
        "YOUTUBE" => Some(Platform::YouTube),
        _ => None,
    }
}
