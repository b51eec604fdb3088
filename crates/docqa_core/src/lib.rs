//! DocQA core: pure session state machine and view-model helpers.
mod document;
mod effect;
mod msg;
mod state;
mod update;
mod upload;
mod view;
mod view_model;

pub use document::{
    chunk_fill_ratio, format_size, CorpusStats, DocumentRegistry, DocumentSummary,
    FULL_GAUGE_CHUNKS,
};
pub use effect::{Effect, POST_UPLOAD_REFRESH_DELAY};
pub use msg::Msg;
pub use state::{AppState, BackendHealth, HealthStatus, Notice, NoticeLevel};
pub use update::{update, UPLOAD_FAILED_TEXT};
pub use upload::{
    file_extension, validate, CandidateFile, PendingUpload, UploadOutcome, ValidationError,
    ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES,
};
pub use view::View;
pub use view_model::{
    AppViewModel, ChatView, DashboardView, DocumentRow, DocumentsView, HeaderView, StatusView,
    UploadView, ViewBody,
};
