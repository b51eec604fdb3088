use std::time::Duration;

use docqa_logging::{docqa_debug, docqa_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Response};
use tokio_util::io::ReaderStream;
use url::Url;

use crate::wire::{parse_documents, parse_health, parse_upload_receipt};
use crate::{DocumentRecord, FailureKind, FetchError, HealthReport, UploadReceipt, UploadRequest};

/// Multipart field name the backend reads the upload from.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cap on response bodies; uploads are bounded by the client-side policy.
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

/// The document backend as seen by the session. One request per call, no
/// retries.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, FetchError>;

    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, FetchError>;

    async fn health(&self) -> Result<HealthReport, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, FetchError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be a base url", settings.base_url),
            ));
        }
        // Keep any path prefix when joining endpoint names.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn endpoint(&self, name: &str) -> Result<Url, FetchError> {
        self.base
            .join(name)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Rejects non-2xx responses, then reads the body up to the size cap.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, FetchError> {
        let url = self.endpoint("documents")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;
        let documents = parse_documents(&body)?;
        docqa_debug!("GET /documents returned {} entries", documents.len());
        Ok(documents)
    }

    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, FetchError> {
        let url = self.endpoint("upload")?;
        let file = tokio::fs::File::open(&request.path)
            .await
            .map_err(|err| FetchError::new(FailureKind::Io, err.to_string()))?;
        let len = file
            .metadata()
            .await
            .map_err(|err| FetchError::new(FailureKind::Io, err.to_string()))?
            .len();

        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, len).file_name(request.filename.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        docqa_info!("POST /upload {} ({} bytes)", request.filename, len);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;
        parse_upload_receipt(&body)
    }

    async fn health(&self) -> Result<HealthReport, FetchError> {
        let url = self.endpoint("health")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;
        parse_health(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return FetchError::new(FailureKind::MalformedResponse, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
