use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Everything that varies between platforms lives in this map; the
/// extraction code itself is shared.
#[derive(Debug)]
pub struct SelectorMap {
    /// Outer container, one per potential record.
    pub container: &'static str,
    /// Inner element holding the actual content; containers without one are
    /// skipped. `None` means the container itself is the item.
    pub item: Option<&'static str>,
    /// Main text of the record.
    pub text: &'static str,
    /// Anchor carrying the canonical link.
    pub link: &'static str,
    /// Prefix glued onto relative hrefs.
    pub link_prefix: &'static str,
    pub author: Option<AuthorSelectors>,
    /// Image elements to harvest.
    pub images: &'static str,
    /// Only sources containing this host count as content images.
    pub image_host: &'static str,
    /// Sources containing this fragment are avatars, not content.
    pub image_exclude: &'static str,
    /// Optional video poster image.
    pub video_thumb: Option<&'static str>,
    /// Named engagement metrics, extracted as raw text.
    pub metrics: &'static [(&'static str, &'static str)],
    /// Title used when a record has no text.
    pub untitled_label: &'static str,
    pub max_records: usize,
}

#[derive(Debug)]
pub struct AuthorSelectors {
    /// Element wrapping the author identity.
    pub root: &'static str,
    /// First match inside `root` whose text is the display name.
    pub name: &'static str,
    /// Anchor inside `root` whose href is the handle.
    pub handle_link: &'static str,
}

/// The full record a script emits. The host side only keeps the canonical
/// four fields; everything else is extra context for other consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub handle: String,
    pub image_url: String,
    pub images: Vec<String>,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, String>,
}

fn sel(raw: &str) -> Selector {
    Selector::parse(raw).expect("static CSS selector is valid")
}

/// Extracts up to `max_records` records from a rendered page.
///
/// The first `max_records` containers are considered; a container without
/// the inner item or without a resolvable URL is dropped, so the result may
/// hold fewer records than the cap.
pub fn extract_records(html: &str, map: &SelectorMap) -> Vec<RawRecord> {
    let doc = Html::parse_document(html);
    let container_sel = sel(map.container);
    let item_sel = map.item.map(sel);
    let text_sel = sel(map.text);
    let link_sel = sel(map.link);
    let images_sel = sel(map.images);
    let video_sel = map.video_thumb.map(sel);
    let author_sels = map
        .author
        .as_ref()
        .map(|author| (sel(author.root), sel(author.name), sel(author.handle_link)));
    let metric_sels: Vec<(&str, Selector)> = map
        .metrics
        .iter()
        .map(|(name, selector)| (*name, sel(selector)))
        .collect();

    let mut records = Vec::new();
    for cell in doc.select(&container_sel).take(map.max_records) {
        let item = match &item_sel {
            Some(inner) => match cell.select(inner).next() {
                Some(el) => el,
                None => continue,
            },
            None => cell,
        };

        let Some(url) = record_url(&item, &link_sel, map.link_prefix) else {
            continue;
        };

        let text = element_text(item.select(&text_sel).next());

        let (author, handle) = match &author_sels {
            Some((root_sel, name_sel, handle_sel)) => author_identity(&item, root_sel, name_sel, handle_sel),
            None => (String::new(), String::new()),
        };

        let mut images = Vec::new();
        for img in item.select(&images_sel) {
            push_image(&mut images, img.value().attr("src"), map);
        }
        if let Some(video_sel) = &video_sel {
            if let Some(poster) = item.select(video_sel).next() {
                push_image(&mut images, poster.value().attr("src"), map);
            }
        }

        let mut metrics = BTreeMap::new();
        for (name, selector) in &metric_sels {
            let value = element_text(item.select(selector).next());
            let value = if value.is_empty() { "0".to_string() } else { value };
            metrics.insert((*name).to_string(), value);
        }

        let title = if text.is_empty() {
            map.untitled_label.to_string()
        } else {
            text.clone()
        };

        records.push(RawRecord {
            url,
            title,
            description: text,
            author,
            handle,
            image_url: images.first().cloned().unwrap_or_default(),
            images,
            metrics,
        });
    }
    records
}

fn record_url(item: &ElementRef<'_>, link_sel: &Selector, prefix: &str) -> Option<String> {
    let href = item.select(link_sel).next()?.value().attr("href")?;
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        Some(format!("{prefix}{href}"))
    }
}

fn element_text(element: Option<ElementRef<'_>>) -> String {
    element
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn author_identity(
    item: &ElementRef<'_>,
    root_sel: &Selector,
    name_sel: &Selector,
    handle_sel: &Selector,
) -> (String, String) {
    let Some(root) = item.select(root_sel).next() else {
        return (String::new(), String::new());
    };
    let name = element_text(root.select(name_sel).next());
    let handle = root
        .select(handle_sel)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(|href| href.strip_prefix('/').unwrap_or(href).to_string())
        .unwrap_or_default();
    (name, handle)
}

/// Content images only: host-filtered, avatars excluded, deduplicated in
/// insertion order.
fn push_image(images: &mut Vec<String>, src: Option<&str>, map: &SelectorMap) {
    let Some(src) = src else {
        return;
    };
    if !src.contains(map.image_host) || src.contains(map.image_exclude) {
        return;
    }
    if images.iter().any(|existing| existing == src) {
        return;
    }
    images.push(src.to_string());
}
