use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::page::Page;
use clipper_logging::{clip_debug, clip_info, clip_warn};
use rand::Rng;
use thiserror::Error;

use crate::args::ScriptArgs;
use crate::browser::{self, BrowserSession, LaunchError};
use crate::cookies::{parse_cookie_header, CookieError, CookieRecord};
use crate::extract::{extract_records, RawRecord, SelectorMap};
use crate::platforms::Platform;
use crate::progress::{report, Step};

/// The script owns its navigation timeout; the process runner on the other
/// side of the pipe enforces none.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
const CONTENT_WAIT: Duration = Duration::from_secs(10);
const SCROLL_SETTLE: Duration = Duration::from_secs(2);
const STUB_SETTLE: Duration = Duration::from_secs(3);
const MAX_SCROLL_PASSES: usize = 5;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("unknown script {0:?}")]
    UnknownScript(String),
    #[error(transparent)]
    Cookie(#[from] CookieError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("navigation to {0} timed out")]
    NavigationTimeout(String),
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    #[error("evaluation error: {0}")]
    Evaluation(String),
    #[error("malformed cookie record: {0}")]
    CookieParam(String),
}

/// Runs the named scrape script end to end and returns its records.
pub async fn run(args: &ScriptArgs) -> Result<Vec<RawRecord>, ScriptError> {
    let platform = Platform::from_script(&args.script)
        .ok_or_else(|| ScriptError::UnknownScript(args.script.clone()))?;

    report(Step::Initializing);

    // Cookie validation happens before a browser spends seconds launching;
    // a malformed string fails the run instead of scraping logged out.
    let cookies = match args.cookies.as_deref() {
        Some(raw) => parse_cookie_header(raw, platform.cookie_domain())?,
        None => Vec::new(),
    };

    let session = browser::launch(
        &args.browser_choice(),
        args.headless,
        args.brave_path.as_deref(),
    )
    .await?;
    report(Step::BrowserLaunched);

    // Whatever happens inside the drive, the browser is closed before the
    // result is inspected.
    let result = drive(&session, platform, &cookies).await;
    session.close().await;
    let records = result?;

    report(Step::Complete);
    Ok(records)
}

async fn drive(
    session: &BrowserSession,
    platform: Platform,
    cookies: &[CookieRecord],
) -> Result<Vec<RawRecord>, ScriptError> {
    let page = session.browser.new_page("about:blank").await?;

    if !cookies.is_empty() {
        let params = cookies
            .iter()
            .map(to_cookie_param)
            .collect::<Result<Vec<_>, _>>()?;
        page.set_cookies(params).await?;
    }
    report(Step::CookiesAdded);

    clip_info!(
        "[{} scraper] navigating to {}",
        platform.label(),
        platform.start_url()
    );
    navigate(&page, platform.start_url()).await?;
    report(Step::NavigationDone);

    let records = match platform.selector_map() {
        Some(map) => {
            wait_for_content(&page, map).await;
            scroll_passes(&page, platform).await?;
            report(Step::ContentLoaded);

            let html = page.content().await?;
            let records = extract_records(&html, map);
            clip_info!(
                "[{} scraper] extracted {} records",
                platform.label(),
                records.len()
            );
            report(Step::DataExtracted);
            records
        }
        None => {
            // Platforms without an extractor still walk every phase and
            // finish successfully with zero records.
            tokio::time::sleep(STUB_SETTLE).await;
            report(Step::ContentLoaded);
            clip_info!(
                "[{} scraper] no extractor for this platform yet",
                platform.label()
            );
            report(Step::DataExtracted);
            Vec::new()
        }
    };

    Ok(records)
}

fn to_cookie_param(record: &CookieRecord) -> Result<CookieParam, ScriptError> {
    CookieParam::builder()
        .name(record.name.clone())
        .value(record.value.clone())
        .domain(record.domain.clone())
        .path(record.path.clone())
        .build()
        .map_err(ScriptError::CookieParam)
}

async fn navigate(page: &Page, url: &str) -> Result<(), ScriptError> {
    let goto = async {
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        Ok::<(), chromiumoxide::error::CdpError>(())
    };
    match tokio::time::timeout(NAVIGATION_TIMEOUT, goto).await {
        Ok(result) => result.map_err(ScriptError::from),
        Err(_) => Err(ScriptError::NavigationTimeout(url.to_string())),
    }
}

/// Polls for the container selector so lazily rendered pages get a chance to
/// settle. Absence is not fatal; the page may simply hold nothing saved.
async fn wait_for_content(page: &Page, map: &SelectorMap) {
    let deadline = tokio::time::Instant::now() + CONTENT_WAIT;
    loop {
        if page.find_element(map.container).await.is_ok() {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            clip_warn!("no saved content found or page not loaded fully");
            return;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

/// Bounded scroll passes to trigger lazy loading, stopping early once the
/// page height settles. Each target is perturbed by a small random offset so
/// the scrolling is not perfectly mechanical.
async fn scroll_passes(page: &Page, platform: Platform) -> Result<(), ScriptError> {
    let mut previous_height: i64 = 0;
    for pass in 1..=MAX_SCROLL_PASSES {
        let height: i64 = page
            .evaluate("document.body.scrollHeight")
            .await?
            .into_value()
            .map_err(|err| ScriptError::Evaluation(err.to_string()))?;
        if height == previous_height {
            clip_debug!(
                "[{} scraper] scroll {pass}: no new content, stopping",
                platform.label()
            );
            break;
        }
        let offset: i64 = rand::thread_rng().gen_range(-100..100);
        let target = height + offset;
        clip_debug!(
            "[{} scraper] scroll {pass}/{MAX_SCROLL_PASSES}: scrolling to {target}px",
            platform.label()
        );
        page.evaluate(format!("window.scrollTo(0, {target})")).await?;
        tokio::time::sleep(SCROLL_SETTLE).await;
        previous_height = height;
    }
    Ok(())
}
