//! DocQA engine: backend I/O and effect execution.
mod client;
mod engine;
mod types;
mod wire;

pub use client::{Backend, BackendSettings, ReqwestBackend, UPLOAD_FIELD};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    DocumentRecord, EngineEvent, FailureKind, FetchError, HealthReport, UploadReceipt,
    UploadRequest,
};
pub use wire::{parse_documents, parse_health, parse_upload_receipt};
