//! Clipper engine: scrape-script process runner and note import pipeline.
mod engine;
mod filename;
mod frontmatter;
mod import;
mod protocol;
mod runner;
mod settings;
mod types;

pub use engine::EngineHandle;
pub use filename::{note_filename, sanitize_title};
pub use frontmatter::build_note_document;
pub use import::{ensure_vault_dir, ImportError, ImportReport, NoteImporter, PendingNote};
pub use protocol::parse_progress_marker;
pub use runner::{
    resolve_scripts_executable, script_args, ChannelProgressSink, ProcessScriptRunner,
    ProgressSink, ScriptRunner,
};
pub use settings::{Browser, PlatformCookies, ScraperSettings};
pub use types::{EngineEvent, JobId, Platform, RunnerError, RunnerErrorKind, ScrapedItem};
