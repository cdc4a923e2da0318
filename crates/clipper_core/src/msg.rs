#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a platform to be scraped.
    ScrapeRequested { platform: crate::Platform },
    /// User asked for the in-flight scrape to be cancelled.
    CancelRequested,
    /// Engine progress for a job, straight from the script's stderr markers.
    JobProgress {
        job_id: crate::JobId,
        percent: u8,
        step: Option<String>,
    },
    /// Engine completion for a job.
    JobDone {
        job_id: crate::JobId,
        outcome: crate::JobOutcome,
    },
    /// Restore a previously persisted review set.
    RestoreReview(crate::ReviewSet),
    /// User flipped the selection flag of a review item.
    SelectionToggled { index: usize },
    /// User added a tag to a review item.
    TagAdded { index: usize, tag: String },
    /// User removed a tag from a review item.
    TagRemoved { index: usize, tag: String },
    /// User asked for the selected review items to be imported.
    ImportRequested,
    /// The import pipeline finished.
    ImportFinished { imported: usize, skipped: usize },
    /// The import pipeline aborted on an unexpected error.
    ImportFailed { message: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
