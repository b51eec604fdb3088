//! Response body parsing for the backend endpoints.

use docqa_logging::docqa_warn;
use serde::Deserialize;
use serde_json::Value;

use crate::{DocumentRecord, FailureKind, FetchError, HealthReport, UploadReceipt};

/// Parses a `GET /documents` body.
///
/// The body must be JSON. A missing or non-array `documents` field reads as
/// an empty list. Entries that do not have the expected shape are skipped;
/// the rest keep server order.
pub fn parse_documents(body: &[u8]) -> Result<Vec<DocumentRecord>, FetchError> {
    let value = parse_json(body)?;
    let Some(Value::Array(entries)) = value.get("documents") else {
        return Ok(Vec::new());
    };

    let documents = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match DocumentRecord::deserialize(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                docqa_warn!("Skipping malformed document entry {index}: {err}");
                None
            }
        })
        .collect();
    Ok(documents)
}

/// Parses a `POST /upload` success body. `message` defaults to empty.
pub fn parse_upload_receipt(body: &[u8]) -> Result<UploadReceipt, FetchError> {
    let value = parse_json(body)?;
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(UploadReceipt { message })
}

pub fn parse_health(body: &[u8]) -> Result<HealthReport, FetchError> {
    serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
}

fn parse_json(body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
}
