/// The progress phases every script walks through, with their fixed
/// percentages. Platform-specific sub-steps (scroll passes and the like)
/// are reported only as plain log lines, never as extra markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Initializing,
    BrowserLaunched,
    CookiesAdded,
    NavigationDone,
    ContentLoaded,
    DataExtracted,
    Complete,
}

impl Step {
    pub fn percent(self) -> u8 {
        match self {
            Step::Initializing => 10,
            Step::BrowserLaunched => 20,
            Step::CookiesAdded => 30,
            Step::NavigationDone => 50,
            Step::ContentLoaded => 70,
            Step::DataExtracted => 90,
            Step::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Initializing => "Initializing browser",
            Step::BrowserLaunched => "Browser launched",
            Step::CookiesAdded => "Adding authentication cookies",
            Step::NavigationDone => "Navigating to page",
            Step::ContentLoaded => "Loading content",
            Step::DataExtracted => "Scraping data",
            Step::Complete => "Complete",
        }
    }
}

/// Emits a `PROGRESS:<percent>:<label>` marker on stderr.
pub fn report(step: Step) {
    eprintln!("PROGRESS:{}:{}", step.percent(), step.label());
}
