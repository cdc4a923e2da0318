use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("browser {0:?} is not supported by the CDP launcher; use chromium or brave")]
    UnsupportedBrowser(String),
    #[error("brave selected but no --bravePath was provided")]
    MissingBravePath,
    #[error("failed to launch browser: {0}")]
    Launch(String),
}

/// A launched browser plus the task pumping its CDP event stream.
pub struct BrowserSession {
    pub browser: Browser,
    handler: JoinHandle<()>,
}

/// Launches the requested browser engine.
///
/// `chromium` uses the system Chromium; `brave` launches the configured
/// executable over the same protocol. `firefox` and `webkit` are rejected
/// here, before anything is spawned.
pub async fn launch(
    choice: &str,
    headless: bool,
    brave_path: Option<&str>,
) -> Result<BrowserSession, LaunchError> {
    let mut builder = BrowserConfig::builder();
    match choice {
        "chromium" => {}
        "brave" => match brave_path {
            Some(path) if !path.is_empty() => {
                builder = builder.chrome_executable(path);
            }
            _ => return Err(LaunchError::MissingBravePath),
        },
        other => return Err(LaunchError::UnsupportedBrowser(other.to_string())),
    }
    if !headless {
        builder = builder.with_head();
    }

    let config = builder.build().map_err(LaunchError::Launch)?;
    let (browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|err| LaunchError::Launch(err.to_string()))?;

    let handler = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    Ok(BrowserSession { browser, handler })
}

impl BrowserSession {
    /// Closes the browser and stops the event pump.
    ///
    /// Every exit path of a script, success or failure, goes through here so
    /// a crashed scrape never strands a browser process.
    pub async fn close(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}
