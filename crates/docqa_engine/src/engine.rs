use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docqa_logging::{docqa_debug, docqa_warn};

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::{EngineEvent, FetchError, UploadRequest};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("invalid backend settings: {0}")]
    Backend(#[from] FetchError),
}

enum EngineCommand {
    FetchDocuments,
    Upload(UploadRequest),
    ScheduleRefresh { after: Duration },
    CheckHealth,
}

/// Runs backend requests on a tokio runtime owned by a background thread.
///
/// Commands never block the caller. Every command produces exactly one
/// [`EngineEvent`], collected with [`EngineHandle::try_recv`]. Dropping the
/// handle shuts the runtime down; pending timers are dropped without firing.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("docqa-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
            docqa_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_documents(&self) {
        self.send(EngineCommand::FetchDocuments);
    }

    pub fn upload(&self, request: UploadRequest) {
        self.send(EngineCommand::Upload(request));
    }

    /// Emits [`EngineEvent::RefreshDue`] once `after` has elapsed.
    pub fn schedule_refresh(&self, after: Duration) {
        self.send(EngineCommand::ScheduleRefresh { after });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            docqa_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchDocuments => {
            EngineEvent::DocumentsFetched(backend.list_documents().await)
        }
        EngineCommand::Upload(request) => {
            let result = backend.upload(&request).await;
            EngineEvent::UploadFinished {
                filename: request.filename,
                result,
            }
        }
        EngineCommand::ScheduleRefresh { after } => {
            tokio::time::sleep(after).await;
            EngineEvent::RefreshDue
        }
        EngineCommand::CheckHealth => EngineEvent::HealthChecked(backend.health().await),
    };
    // The session may have ended while the request was in flight.
    if event_tx.send(event).is_err() {
        docqa_debug!("Engine event dropped; receiver closed");
    }
}
