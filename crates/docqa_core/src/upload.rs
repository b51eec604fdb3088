use std::path::PathBuf;

/// Extensions the backend ingests, lowercase and without the leading dot.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "md", "json", "csv"];

/// Largest accepted upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file the user picked, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
        }
    }
}

/// A validated file waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub extension: String,
}

impl PendingUpload {
    /// Size in megabytes with two decimals, as shown next to the pending file.
    pub fn size_mb_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload a supported file type: .txt, .md, .json, .csv")]
    UnsupportedType { extension: Option<String> },
    #[error("File size must be less than 10MB")]
    TooLarge { size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { message: String },
    Failure { error: String },
}

/// Lowercased text after the last `.` of `filename`, if any.
///
/// A name without a dot has no extension; a trailing dot yields an empty one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Classifies a candidate file. Type is checked before size.
pub fn validate(candidate: CandidateFile) -> Result<PendingUpload, ValidationError> {
    let extension = file_extension(&candidate.name);
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(ValidationError::UnsupportedType { extension });
    }

    if candidate.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: candidate.size,
        });
    }

    Ok(PendingUpload {
        name: candidate.name,
        path: candidate.path,
        size: candidate.size,
        extension: extension.unwrap_or_default(),
    })
}
