use crate::{BackendHealth, CandidateFile, DocumentSummary, UploadOutcome, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session start: triggers the initial document fetch.
    Started,
    /// User picked a tab.
    ViewSelected(View),
    /// User edited the file path box in the upload view.
    PathInputChanged(String),
    /// User picked a file; the shell already read its size.
    FileChosen(CandidateFile),
    /// User picked a path the shell could not read.
    FileUnavailable { path: String, reason: String },
    /// User removed the pending file.
    PendingCleared,
    /// User clicked Upload.
    UploadClicked,
    /// Engine finished the upload request, whatever the result.
    UploadSettled(UploadOutcome),
    /// User asked for a refresh from any view.
    RefreshRequested,
    /// The post-upload refresh timer elapsed.
    DelayedRefreshFired,
    /// Engine finished a `GET /documents`.
    RefreshCompleted {
        result: Result<Vec<DocumentSummary>, String>,
        completed_at: String,
    },
    /// Engine finished a health check.
    HealthChecked(Result<BackendHealth, String>),
    /// User dismissed the current notice.
    NoticeDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
