use std::path::PathBuf;
use std::process::Stdio;

use clipper_logging::clip_debug;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::protocol::parse_progress_marker;
use crate::settings::{Browser, ScraperSettings};
use crate::{EngineEvent, JobId, Platform, RunnerError, RunnerErrorKind, ScrapedItem};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs one platform's scrape script to completion.
#[async_trait::async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(
        &self,
        job_id: JobId,
        platform: Platform,
        cancel: CancellationToken,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ScrapedItem>, RunnerError>;
}

/// Resolves the configured scripts executable, expanding a leading `~`.
///
/// An empty or dangling path is a configuration error, reported before any
/// process is spawned.
pub fn resolve_scripts_executable(configured: &str) -> Result<PathBuf, RunnerError> {
    let configured = configured.trim();
    if configured.is_empty() {
        return Err(RunnerError::new(
            RunnerErrorKind::Configuration,
            "scripts path is not configured; set scriptsPath in the settings",
        ));
    }
    let path = expand_home(configured);
    if !path.exists() {
        return Err(RunnerError::new(
            RunnerErrorKind::Configuration,
            format!(
                "scripts executable not found at {}; check the settings",
                path.display()
            ),
        ));
    }
    Ok(path)
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(raw)
}

/// Builds the script's argument list: positional script name, then flag
/// pairs. `--bravePath` only rides along for the brave browser, `--cookies`
/// only when the platform has a cookie string.
pub fn script_args(platform: Platform, settings: &ScraperSettings) -> Vec<String> {
    let mut args = vec![
        platform.script_name().to_string(),
        "--headless".to_string(),
        settings.headless.to_string(),
        "--browser".to_string(),
        settings.browser.as_arg().to_string(),
    ];
    if settings.browser == Browser::Brave && !settings.brave_path.is_empty() {
        args.push("--bravePath".to_string());
        args.push(settings.brave_path.clone());
    }
    let cookies = settings.cookies.for_platform(platform);
    if !cookies.is_empty() {
        args.push("--cookies".to_string());
        args.push(cookies.to_string());
    }
    args
}

pub struct ProcessScriptRunner {
    settings: ScraperSettings,
}

impl ProcessScriptRunner {
    pub fn new(settings: ScraperSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(
        &self,
        job_id: JobId,
        platform: Platform,
        cancel: CancellationToken,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ScrapedItem>, RunnerError> {
        let executable = resolve_scripts_executable(&self.settings.scripts_path)?;
        let args = script_args(platform, &self.settings);

        let mut child = Command::new(&executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => RunnerError::new(
                    RunnerErrorKind::ExecutableNotFound,
                    format!(
                        "scripts executable vanished before launch: {}",
                        executable.display()
                    ),
                ),
                _ => RunnerError::new(RunnerErrorKind::Launch, err.to_string()),
            })?;

        let mut drive = Box::pin(drive_script(&mut child, job_id, platform, sink));
        tokio::select! {
            result = &mut drive => result,
            _ = cancel.cancelled() => {
                drop(drive);
                let _ = child.kill().await;
                Err(RunnerError::new(
                    RunnerErrorKind::Cancelled,
                    format!("{} scrape cancelled, child process killed", platform.tag()),
                ))
            }
        }
    }
}

/// Pumps both output streams until the child exits, then classifies the exit.
///
/// stdout is accumulated whole (the script emits its JSON array once, at the
/// end); stderr is scanned line by line, dispatching `PROGRESS` markers to
/// the sink in stream order and treating everything else as diagnostics.
async fn drive_script(
    child: &mut Child,
    job_id: JobId,
    platform: Platform,
    sink: &dyn ProgressSink,
) -> Result<Vec<ScrapedItem>, RunnerError> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| RunnerError::new(RunnerErrorKind::Launch, "child stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| RunnerError::new(RunnerErrorKind::Launch, "child stderr was not piped"))?;

    let stdout_fut = async move {
        let mut buf = String::new();
        BufReader::new(stdout).read_to_string(&mut buf).await.map(|_| buf)
    };

    let stderr_fut = async move {
        let mut collected = String::new();
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_progress_marker(&line) {
                Some((percent, step)) => sink.emit(EngineEvent::Progress {
                    job_id,
                    percent,
                    step: step.to_string(),
                }),
                None => {
                    if !line.trim().is_empty() {
                        clip_debug!("[{}] {}", platform.tag(), line.trim());
                    }
                }
            }
            collected.push_str(&line);
            collected.push('\n');
        }
        collected
    };

    let (stdout_result, stderr_log) = tokio::join!(stdout_fut, stderr_fut);
    let stdout_buf = stdout_result.map_err(|err| {
        RunnerError::new(
            RunnerErrorKind::Launch,
            format!("failed to read script output: {err}"),
        )
    })?;

    let status = child
        .wait()
        .await
        .map_err(|err| RunnerError::new(RunnerErrorKind::Launch, err.to_string()))?;

    if !status.success() {
        return Err(RunnerError::new(
            RunnerErrorKind::Execution {
                code: status.code(),
            },
            format!("{status}. stderr: {}", stderr_log.trim()),
        ));
    }

    parse_results(&stdout_buf)
}

fn parse_results(raw: &str) -> Result<Vec<ScrapedItem>, RunnerError> {
    serde_json::from_str(raw.trim()).map_err(|err| {
        RunnerError::new(
            RunnerErrorKind::ResultParse {
                raw: raw.to_string(),
            },
            format!("failed to parse script results: {err}"),
        )
    })
}
