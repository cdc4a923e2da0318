#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clipper_engine::{
    EngineEvent, EngineHandle, Platform, ProcessScriptRunner, ProgressSink, RunnerErrorKind,
    ScraperSettings, ScriptRunner,
};
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn progress(&self) -> Vec<(u8, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress { percent, step, .. } => Some((*percent, step.clone())),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Writes an executable `/bin/sh` script standing in for the scripts binary.
fn fake_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("clipper-scripts");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn settings_for(script: &Path) -> ScraperSettings {
    ScraperSettings {
        scripts_path: script.to_str().unwrap().to_string(),
        ..ScraperSettings::default()
    }
}

#[tokio::test]
async fn exit_zero_with_empty_array_resolves_empty() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(temp.path(), "echo '[]'");
    let runner = ProcessScriptRunner::new(settings_for(&script));
    let sink = TestSink::new();

    let items = runner
        .run(1, Platform::Threads, CancellationToken::new(), &sink)
        .await
        .expect("stub platforms succeed with zero results");

    assert!(items.is_empty());
}

#[tokio::test]
async fn progress_markers_fire_in_stream_order() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(
        temp.path(),
        concat!(
            "printf 'PROGRESS:10:Initializing browser\\n' >&2\n",
            "printf '[X] waiting for tweets to load\\n' >&2\n",
            "printf 'PROGRESS:50:Navigating to: x.com\\n' >&2\n",
            "printf '[{\"url\":\"https://x.com/a/status/1\",\"title\":\"t\",",
            "\"description\":\"d\",\"imageUrl\":\"\",\"likes\":\"12\"}]\\n'",
        ),
    );
    let runner = ProcessScriptRunner::new(settings_for(&script));
    let sink = TestSink::new();

    let items = runner
        .run(4, Platform::X, CancellationToken::new(), &sink)
        .await
        .expect("script succeeds");

    // One callback per marker, in stream order; the plain log line fires none.
    assert_eq!(
        sink.progress(),
        vec![
            (10, "Initializing browser".to_string()),
            (50, "Navigating to: x.com".to_string()),
        ]
    );
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].url, "https://x.com/a/status/1");
    assert_eq!(items[0].title, "t");
    // Extra per-platform fields like engagement counts are ignored.
}

#[tokio::test]
async fn malformed_stdout_is_a_result_parse_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(temp.path(), "echo 'not json'");
    let runner = ProcessScriptRunner::new(settings_for(&script));
    let sink = TestSink::new();

    let err = runner
        .run(2, Platform::X, CancellationToken::new(), &sink)
        .await
        .unwrap_err();

    match err.kind {
        RunnerErrorKind::ResultParse { raw } => assert!(raw.contains("not json")),
        other => panic!("expected ResultParse, got {other:?}"),
    }
}

#[tokio::test]
async fn nonzero_exit_is_an_execution_error_with_code_and_stderr() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(temp.path(), "printf 'boom\\n' >&2\nexit 137");
    let runner = ProcessScriptRunner::new(settings_for(&script));
    let sink = TestSink::new();

    let err = runner
        .run(3, Platform::Instagram, CancellationToken::new(), &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, RunnerErrorKind::Execution { code: Some(137) });
    assert!(err.message.contains("boom"));
}

#[tokio::test]
async fn non_executable_file_is_a_launch_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("clipper-scripts");
    fs::write(&path, "just text").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let runner = ProcessScriptRunner::new(settings_for(&path));
    let sink = TestSink::new();
    let err = runner
        .run(5, Platform::X, CancellationToken::new(), &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, RunnerErrorKind::Launch);
}

#[tokio::test]
async fn cancellation_kills_the_child_and_settles_promptly() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(
        temp.path(),
        "printf 'PROGRESS:10:Initializing browser\\n' >&2\nsleep 30\necho '[]'",
    );
    let runner = ProcessScriptRunner::new(settings_for(&script));
    let sink = TestSink::new();
    let token = CancellationToken::new();

    let trigger = {
        let token = token.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            token.cancel();
        }
    };

    let started = Instant::now();
    let (result, ()) = tokio::join!(runner.run(6, Platform::X, token.clone(), &sink), trigger);

    let err = result.unwrap_err();
    assert_eq!(err.kind, RunnerErrorKind::Cancelled);
    // Settled by the kill, not by the script's 30s sleep running out.
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn engine_handle_delivers_progress_then_completion() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(
        temp.path(),
        concat!(
            "printf 'PROGRESS:10:Initializing browser\\n' >&2\n",
            "printf 'PROGRESS:100:Complete\\n' >&2\n",
            "echo '[]'",
        ),
    );
    let handle = EngineHandle::new(settings_for(&script));
    handle.scrape(7, Platform::YouTube);

    let events = collect_until_completed(&handle, Duration::from_secs(15));
    let percents: Vec<u8> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress { job_id: 7, percent, .. } => Some(*percent),
            _ => None,
        })
        .collect();
    assert_eq!(percents, vec![10, 100]);

    match events.last() {
        Some(EngineEvent::JobCompleted { job_id: 7, result }) => {
            assert_eq!(result.as_ref().unwrap().len(), 0);
        }
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn engine_handle_cancel_settles_the_job_as_cancelled() {
    let temp = tempfile::TempDir::new().unwrap();
    let script = fake_script(temp.path(), "sleep 30\necho '[]'");
    let handle = EngineHandle::new(settings_for(&script));
    handle.scrape(8, Platform::X);

    std::thread::sleep(Duration::from_millis(300));
    handle.cancel(8);

    let events = collect_until_completed(&handle, Duration::from_secs(15));
    match events.last() {
        Some(EngineEvent::JobCompleted { job_id: 8, result }) => {
            assert_eq!(result.as_ref().unwrap_err().kind, RunnerErrorKind::Cancelled);
        }
        other => panic!("expected completion, got {other:?}"),
    }
}

fn collect_until_completed(handle: &EngineHandle, timeout: Duration) -> Vec<EngineEvent> {
    let deadline = Instant::now() + timeout;
    let mut events = Vec::new();
    loop {
        if let Some(event) = handle.try_recv() {
            let done = matches!(event, EngineEvent::JobCompleted { .. });
            events.push(event);
            if done {
                return events;
            }
        } else {
            assert!(Instant::now() < deadline, "timed out waiting for engine");
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}
