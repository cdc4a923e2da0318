#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartScrape {
        job_id: crate::JobId,
        platform: crate::Platform,
    },
    CancelScrape {
        job_id: crate::JobId,
    },
    /// Persist the current review set so it survives between invocations.
    SaveReview(crate::ReviewSet),
    /// Run the note importer over the selected items.
    ImportItems { items: Vec<crate::ReviewItem> },
    /// Drop the persisted review set after a completed import.
    DiscardReview,
}
