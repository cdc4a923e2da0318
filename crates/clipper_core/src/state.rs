use url::Url;

use crate::view_model::{AppViewModel, JobView, ReviewView};

pub type JobId = u64;

/// The social platform a scrape targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Instagram,
    Threads,
    YouTube,
}

impl Platform {
    /// Human-readable name for summaries and progress output.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::X => "X (Twitter)",
            Platform::Instagram => "Instagram",
            Platform::Threads => "Threads",
            Platform::YouTube => "YouTube",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ScrapeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScrapeStatus::Completed | ScrapeStatus::Failed)
    }
}

/// One record produced by a scrape script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapedItem {
    pub url: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

/// A single user-initiated scrape, tracked from request to terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeJob {
    pub id: JobId,
    pub platform: Platform,
    pub status: ScrapeStatus,
    pub progress: u8,
    pub current_step: Option<String>,
    pub results: Vec<ScrapedItem>,
    pub error: Option<String>,
}

/// Terminal result of a scrape job as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Success(Vec<ScrapedItem>),
    Failed(String),
}

/// A scraped record plus the user-editable review state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub item: ScrapedItem,
    pub selected: bool,
    pub tags: Vec<String>,
}

/// The editable working set built from a completed job's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSet {
    pub platform: Platform,
    pub items: Vec<ReviewItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    next_job_id: JobId,
    job: Option<ScrapeJob>,
    review: Option<ReviewSet>,
    last_import: Option<ImportStats>,
    import_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            job: self.job.as_ref().map(|job| JobView {
                job_id: job.id,
                platform: job.platform,
                status: job.status,
                progress: job.progress,
                current_step: job.current_step.clone(),
                result_count: job.results.len(),
                error: job.error.clone(),
            }),
            review: self.review.as_ref().map(|set| ReviewView {
                platform: set.platform,
                total: set.items.len(),
                selected: set.items.iter().filter(|item| item.selected).count(),
            }),
            last_import: self.last_import,
            import_error: self.import_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn review(&self) -> Option<&ReviewSet> {
        self.review.as_ref()
    }

    /// Returns true if the dirty flag was set, clearing it.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Id of the job still in flight, if any.
    pub(crate) fn active_job_id(&self) -> Option<JobId> {
        self.job
            .as_ref()
            .filter(|job| !job.status.is_terminal())
            .map(|job| job.id)
    }

    /// Starts a new job unless one is already in flight.
    pub(crate) fn begin_job(&mut self, platform: Platform) -> Option<JobId> {
        if self.active_job_id().is_some() {
            return None;
        }
        self.next_job_id += 1;
        let id = self.next_job_id;
        self.job = Some(ScrapeJob {
            id,
            platform,
            status: ScrapeStatus::Pending,
            progress: 0,
            current_step: None,
            results: Vec::new(),
            error: None,
        });
        self.mark_dirty();
        Some(id)
    }

    pub(crate) fn apply_progress(&mut self, job_id: JobId, percent: u8, step: Option<String>) {
        let Some(job) = self.job.as_mut() else {
            return;
        };
        if job.id != job_id || job.status.is_terminal() {
            return;
        }
        job.status = ScrapeStatus::InProgress;
        // Progress never moves backwards, whatever the script reports.
        job.progress = job.progress.max(percent.min(100));
        if step.is_some() {
            job.current_step = step;
        }
        self.mark_dirty();
    }

    /// Applies a terminal outcome. On success the review set is rebuilt from
    /// the results and returned so the caller can persist it.
    pub(crate) fn apply_done(&mut self, job_id: JobId, outcome: JobOutcome) -> Option<ReviewSet> {
        let Some(job) = self.job.as_mut() else {
            return None;
        };
        if job.id != job_id || job.status.is_terminal() {
            return None;
        }
        let review = match outcome {
            JobOutcome::Success(items) => {
                job.status = ScrapeStatus::Completed;
                job.progress = 100;
                job.results = items;
                let review = build_review(job.platform, &job.results);
                self.review = Some(review.clone());
                Some(review)
            }
            JobOutcome::Failed(message) => {
                job.status = ScrapeStatus::Failed;
                job.error = Some(message);
                None
            }
        };
        self.mark_dirty();
        review
    }

    pub(crate) fn restore_review(&mut self, set: ReviewSet) {
        self.review = Some(set);
        self.mark_dirty();
    }

    /// Flips the selection flag at `index`. Out-of-range indices are ignored.
    pub(crate) fn toggle_selection(&mut self, index: usize) -> bool {
        let Some(item) = self
            .review
            .as_mut()
            .and_then(|set| set.items.get_mut(index))
        else {
            return false;
        };
        item.selected = !item.selected;
        self.mark_dirty();
        true
    }

    /// Adds a tag at `index`; blank and duplicate tags are ignored.
    pub(crate) fn add_tag(&mut self, index: usize, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        let Some(item) = self
            .review
            .as_mut()
            .and_then(|set| set.items.get_mut(index))
        else {
            return false;
        };
        if item.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        item.tags.push(tag.to_string());
        self.mark_dirty();
        true
    }

    pub(crate) fn remove_tag(&mut self, index: usize, tag: &str) -> bool {
        let Some(item) = self
            .review
            .as_mut()
            .and_then(|set| set.items.get_mut(index))
        else {
            return false;
        };
        let before = item.tags.len();
        item.tags.retain(|existing| existing != tag);
        if item.tags.len() == before {
            return false;
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn selected_items(&self) -> Vec<ReviewItem> {
        self.review
            .as_ref()
            .map(|set| {
                set.items
                    .iter()
                    .filter(|item| item.selected)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn finish_import(&mut self, stats: ImportStats) {
        self.last_import = Some(stats);
        self.import_error = None;
        self.review = None;
        self.mark_dirty();
    }

    pub(crate) fn fail_import(&mut self, message: String) {
        self.import_error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn clear_import_error(&mut self) {
        self.import_error = None;
    }
}

/// Copies a job's results into an all-selected, untagged working set.
/// Items without a parseable URL never make it into review.
fn build_review(platform: Platform, results: &[ScrapedItem]) -> ReviewSet {
    let items = results
        .iter()
        .filter(|item| Url::parse(&item.url).is_ok())
        .map(|item| ReviewItem {
            item: item.clone(),
            selected: true,
            tags: Vec::new(),
        })
        .collect();
    ReviewSet { platform, items }
}
