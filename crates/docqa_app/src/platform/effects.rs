use chrono::Local;
use docqa_core::{BackendHealth, DocumentSummary, Effect, Msg, UploadOutcome};
use docqa_engine::{
    BackendSettings, DocumentRecord, EngineError, EngineEvent, EngineHandle, UploadRequest,
};
use docqa_logging::{docqa_debug, docqa_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: BackendSettings) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchDocuments => self.engine.fetch_documents(),
                Effect::SubmitUpload { file } => {
                    docqa_info!("SubmitUpload name={} size={}", file.name, file.size);
                    self.engine.upload(UploadRequest {
                        filename: file.name,
                        path: file.path,
                    });
                }
                Effect::ScheduleRefresh { after } => {
                    docqa_info!("Refresh scheduled in {} ms", after.as_millis());
                    self.engine.schedule_refresh(after);
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }

    /// Drains every engine event that is ready, without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event, clock_time));
        }
        inbox
    }
}

fn clock_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn map_event(event: EngineEvent, now: impl Fn() -> String) -> Msg {
    match event {
        EngineEvent::DocumentsFetched(result) => Msg::RefreshCompleted {
            result: result
                .map(|records| records.into_iter().map(map_document).collect())
                .map_err(|err| err.to_string()),
            completed_at: now(),
        },
        EngineEvent::UploadFinished { filename, result } => {
            docqa_debug!("Upload of {} settled", filename);
            let outcome = match result {
                Ok(receipt) => UploadOutcome::Success {
                    message: receipt.message,
                },
                Err(err) => UploadOutcome::Failure {
                    error: err.to_string(),
                },
            };
            Msg::UploadSettled(outcome)
        }
        EngineEvent::RefreshDue => Msg::DelayedRefreshFired,
        EngineEvent::HealthChecked(result) => Msg::HealthChecked(
            result
                .map(|report| BackendHealth {
                    status: report.status,
                    models_loaded: report.models_loaded,
                })
                .map_err(|err| err.to_string()),
        ),
    }
}

fn map_document(record: DocumentRecord) -> DocumentSummary {
    DocumentSummary {
        filename: record.filename,
        chunks: record.chunks,
        total_chars: record.total_chars,
    }
}
