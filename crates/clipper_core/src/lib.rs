//! Clipper core: pure state machine for scrape jobs and review sets.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, ImportStats, JobId, JobOutcome, Platform, ReviewItem, ReviewSet, ScrapeJob,
    ScrapeStatus, ScrapedItem,
};
pub use update::update;
pub use view_model::{AppViewModel, JobView, ReviewView};
