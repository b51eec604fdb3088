use docqa_logging::{docqa_debug, docqa_info, docqa_warn};

use crate::{
    validate, AppState, DocumentRegistry, Effect, HealthStatus, Msg, Notice, UploadOutcome,
    POST_UPLOAD_REFRESH_DELAY,
};

/// Shown when the backend rejects an upload or cannot be reached.
pub const UPLOAD_FAILED_TEXT: &str = "Error uploading file. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.begin_refresh();
            vec![Effect::FetchDocuments, Effect::CheckHealth]
        }
        Msg::ViewSelected(view) => {
            // Navigation only moves the tab; no refresh, no upload cancel.
            state.select_view(view);
            Vec::new()
        }
        Msg::PathInputChanged(text) => {
            if !state.is_uploading() {
                state.set_path_input(text);
            }
            Vec::new()
        }
        Msg::FileChosen(candidate) => {
            if state.is_uploading() {
                return (state, Vec::new());
            }
            match validate(candidate) {
                Ok(file) => {
                    docqa_debug!("Accepted {} ({} bytes)", file.name, file.size);
                    state.set_pending(file);
                }
                Err(err) => {
                    docqa_info!("Rejected file: {:?}", err);
                    state.set_notice(Notice::error(err.to_string()));
                }
            }
            Vec::new()
        }
        Msg::FileUnavailable { path, reason } => {
            docqa_warn!("Cannot read {}: {}", path, reason);
            state.set_notice(Notice::error(format!("Cannot read {path}: {reason}")));
            Vec::new()
        }
        Msg::PendingCleared => {
            if !state.is_uploading() {
                state.clear_pending();
            }
            Vec::new()
        }
        Msg::UploadClicked => match (state.is_uploading(), state.pending().cloned()) {
            (false, Some(file)) => {
                state.begin_upload();
                vec![Effect::SubmitUpload { file }]
            }
            _ => Vec::new(),
        },
        Msg::UploadSettled(outcome) => {
            state.finish_upload();
            let file = state.clear_pending();
            let name = file.map(|f| f.name).unwrap_or_default();
            match outcome {
                UploadOutcome::Success { message } => {
                    docqa_info!("Upload of {} accepted: {}", name, message);
                    let text = if message.is_empty() {
                        format!("{name} uploaded")
                    } else {
                        message
                    };
                    state.set_notice(Notice::info(text));
                    vec![Effect::ScheduleRefresh {
                        after: POST_UPLOAD_REFRESH_DELAY,
                    }]
                }
                UploadOutcome::Failure { error } => {
                    docqa_warn!("Upload of {} failed: {}", name, error);
                    state.set_notice(Notice::error(UPLOAD_FAILED_TEXT));
                    Vec::new()
                }
            }
        }
        Msg::RefreshRequested | Msg::DelayedRefreshFired => {
            state.begin_refresh();
            vec![Effect::FetchDocuments]
        }
        Msg::RefreshCompleted {
            result,
            completed_at,
        } => {
            match result {
                Ok(documents) => {
                    docqa_debug!("Registry replaced with {} documents", documents.len());
                    state.replace_registry(DocumentRegistry::new(documents), completed_at);
                }
                Err(error) => {
                    docqa_warn!("Document refresh failed, keeping last list: {}", error);
                    state.record_refresh_failure(error);
                }
            }
            Vec::new()
        }
        Msg::HealthChecked(result) => {
            let health = match result {
                Ok(health) => HealthStatus::Reported(health),
                Err(error) => HealthStatus::Unreachable(error),
            };
            state.set_health(health);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
