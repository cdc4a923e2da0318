use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tokio_util::sync::CancellationToken;

use crate::runner::{ChannelProgressSink, ProcessScriptRunner, ScriptRunner};
use crate::settings::ScraperSettings;
use crate::{EngineEvent, JobId, Platform};

enum EngineCommand {
    Scrape { job_id: JobId, platform: Platform },
    Cancel { job_id: JobId },
}

/// Handle to the engine thread: send scrape/cancel commands, poll events.
///
/// Each scrape runs on its own task with its own cancellation token, so
/// nothing here prevents a caller from running several jobs at once.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ScraperSettings) -> Self {
        Self::with_runner(Arc::new(ProcessScriptRunner::new(settings)))
    }

    pub fn with_runner(runner: Arc<dyn ScriptRunner>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let active: Arc<Mutex<HashMap<JobId, CancellationToken>>> =
            Arc::new(Mutex::new(HashMap::new()));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Scrape { job_id, platform } => {
                        let runner = runner.clone();
                        let event_tx = event_tx.clone();
                        let active = active.clone();
                        let token = CancellationToken::new();
                        if let Ok(mut guard) = active.lock() {
                            guard.insert(job_id, token.clone());
                        }
                        runtime.spawn(async move {
                            let sink = ChannelProgressSink::new(event_tx.clone());
                            let result = runner.run(job_id, platform, token, &sink).await;
                            // Cancelling a finished job must be a no-op.
                            if let Ok(mut guard) = active.lock() {
                                guard.remove(&job_id);
                            }
                            let _ = event_tx.send(EngineEvent::JobCompleted { job_id, result });
                        });
                    }
                    EngineCommand::Cancel { job_id } => {
                        let token = active
                            .lock()
                            .ok()
                            .and_then(|mut guard| guard.remove(&job_id));
                        if let Some(token) = token {
                            token.cancel();
                        }
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn scrape(&self, job_id: JobId, platform: Platform) {
        let _ = self.cmd_tx.send(EngineCommand::Scrape { job_id, platform });
    }

    pub fn cancel(&self, job_id: JobId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { job_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }
}
