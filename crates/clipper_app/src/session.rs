use std::path::PathBuf;

use clipper_core::{update, AppState, AppViewModel, Effect, Msg, ReviewItem, ReviewSet};
use clipper_engine::{EngineHandle, NoteImporter, PendingNote, ScraperSettings};
use clipper_logging::clip_warn;

use crate::persistence;

/// Owns the core state and executes the effects it emits: engine commands,
/// review persistence and the note importer.
pub struct Session {
    state: AppState,
    settings: ScraperSettings,
    vault: PathBuf,
    engine: Option<EngineHandle>,
}

impl Session {
    pub fn new(settings: ScraperSettings, vault: PathBuf) -> Self {
        Self {
            state: AppState::new(),
            settings,
            vault,
            engine: None,
        }
    }

    pub fn settings(&self) -> &ScraperSettings {
        &self.settings
    }

    pub fn attach_engine(&mut self, engine: EngineHandle) {
        self.engine = Some(engine);
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn review(&self) -> Option<&ReviewSet> {
        self.state.review()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartScrape { job_id, platform } => match &self.engine {
                Some(engine) => engine.scrape(job_id, engine_platform(platform)),
                None => clip_warn!("scrape requested without an engine attached"),
            },
            Effect::CancelScrape { job_id } => {
                if let Some(engine) = &self.engine {
                    engine.cancel(job_id);
                }
            }
            Effect::SaveReview(set) => persistence::save_review(&self.vault, &set),
            Effect::DiscardReview => persistence::discard_review(&self.vault),
            Effect::ImportItems { items } => self.run_import(items),
        }
    }

    fn run_import(&mut self, items: Vec<ReviewItem>) {
        let importer = NoteImporter::new(
            self.vault.clone(),
            self.settings.frontmatter_url_key.clone(),
        );
        let notes: Vec<PendingNote> = items
            .into_iter()
            .map(|entry| PendingNote {
                url: entry.item.url,
                title: entry.item.title,
                tags: entry.tags,
            })
            .collect();
        match importer.import(&notes) {
            Ok(report) => {
                for title in &report.skipped_titles {
                    println!("Skipped: {title} (note already exists)");
                }
                self.dispatch(Msg::ImportFinished {
                    imported: report.imported,
                    skipped: report.skipped,
                });
            }
            Err(err) => self.dispatch(Msg::ImportFailed {
                message: err.to_string(),
            }),
        }
    }
}

pub fn engine_platform(platform: clipper_core::Platform) -> clipper_engine::Platform {
    match platform {
        clipper_core::Platform::X => clipper_engine::Platform::X,
        clipper_core::Platform::Instagram => clipper_engine::Platform::Instagram,
        clipper_core::Platform::Threads => clipper_engine::Platform::Threads,
        clipper_core::Platform::YouTube => clipper_engine::Platform::YouTube,
    }
}

pub fn core_item(item: clipper_engine::ScrapedItem) -> clipper_core::ScrapedItem {
    clipper_core::ScrapedItem {
        url: item.url,
        title: item.title,
        description: item.description,
        image_url: item.image_url,
    }
}
