use std::fmt;

use serde::{Deserialize, Serialize};

pub type JobId = u64;

/// The social platform a scrape script targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Instagram,
    Threads,
    YouTube,
}

impl Platform {
    /// Positional script name passed to the scripts executable.
    pub fn script_name(&self) -> &'static str {
        match self {
            Platform::X => "scrape-x",
            Platform::Instagram => "scrape-instagram",
            Platform::Threads => "scrape-threads",
            Platform::YouTube => "scrape-youtube",
        }
    }

    /// Short tag used in log output and the cookie settings map.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::X => "X",
            Platform::Instagram => "INSTAGRAM",
            Platform::Threads => "THREADS",
            Platform::YouTube => "YOUTUBE",
        }
    }
}

/// One record emitted by a scrape script in its stdout JSON array.
///
/// Scripts emit more fields (author, metrics); only the canonical four are
/// carried forward, everything else is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrapedItem {
    pub url: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress {
        job_id: JobId,
        percent: u8,
        step: String,
    },
    JobCompleted {
        job_id: JobId,
        result: Result<Vec<ScrapedItem>, RunnerError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerError {
    pub kind: RunnerErrorKind,
    pub message: String,
}

impl RunnerError {
    pub(crate) fn new(kind: RunnerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RunnerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerErrorKind {
    /// The scripts path setting is empty or points nowhere; caught before spawn.
    Configuration,
    /// The executable disappeared between the pre-check and the spawn.
    ExecutableNotFound,
    /// The OS refused to start (or talk to) the child process.
    Launch,
    /// The script exited with a non-zero status.
    Execution { code: Option<i32> },
    /// The script exited cleanly but its stdout was not a JSON array.
    ResultParse { raw: String },
    /// The job was cancelled and the child process killed.
    Cancelled,
}

impl fmt::Display for RunnerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerErrorKind::Configuration => write!(f, "configuration error"),
            RunnerErrorKind::ExecutableNotFound => write!(f, "scripts executable not found"),
            RunnerErrorKind::Launch => write!(f, "failed to launch scrape script"),
            RunnerErrorKind::Execution { code: Some(code) } => {
                write!(f, "scrape script exited with code {code}")
            }
            RunnerErrorKind::Execution { code: None } => {
                write!(f, "scrape script terminated by signal")
            }
            RunnerErrorKind::ResultParse { .. } => {
                write!(f, "scrape script output was not valid JSON")
            }
            RunnerErrorKind::Cancelled => write!(f, "scrape cancelled"),
        }
    }
}
