use std::io::Write;
use std::time::Duration;

use docqa_engine::{
    Backend, BackendSettings, DocumentRecord, FailureKind, ReqwestBackend, UploadRequest,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("backend")
}

fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "application/json")
}

fn text_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file.flush().expect("flush");
    file
}

#[tokio::test]
async fn list_documents_returns_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(json_response(
            200,
            r#"{"documents":[
                {"filename":"z.md","chunks":3,"total_chars":1400},
                {"filename":"a.txt","chunks":1,"total_chars":12}
            ]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let docs = backend_for(&server).list_documents().await.expect("ok");
    assert_eq!(
        docs,
        vec![
            DocumentRecord {
                filename: "z.md".to_string(),
                chunks: 3,
                total_chars: 1400,
            },
            DocumentRecord {
                filename: "a.txt".to_string(),
                chunks: 1,
                total_chars: 12,
            },
        ]
    );
}

#[tokio::test]
async fn list_documents_without_field_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(json_response(200, "{}"))
        .mount(&server)
        .await;

    let docs = backend_for(&server).list_documents().await.expect("ok");
    assert!(docs.is_empty());
}

#[tokio::test]
async fn list_documents_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(json_response(500, r#"{"detail":"boom"}"#))
        .mount(&server)
        .await;

    let err = backend_for(&server).list_documents().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn list_documents_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"documents":[]}"#),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::default()
    })
    .unwrap();

    let err = backend.list_documents().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let backend = ReqwestBackend::new(BackendSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        ..BackendSettings::default()
    })
    .unwrap();

    let err = backend.list_documents().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"documents":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: format!("{}/api", server.uri()),
        ..BackendSettings::default()
    })
    .unwrap();

    assert!(backend.list_documents().await.unwrap().is_empty());
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestBackend::new(BackendSettings {
        base_url: "not a url".to_string(),
        ..BackendSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("remember the milk"))
        .respond_with(json_response(
            200,
            r#"{"message":"File notes.txt uploaded successfully and is being processed"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let file = text_file("remember the milk");
    let receipt = backend_for(&server)
        .upload(&UploadRequest {
            filename: "notes.txt".to_string(),
            path: file.path().to_path_buf(),
        })
        .await
        .expect("upload ok");

    assert_eq!(
        receipt.message,
        "File notes.txt uploaded successfully and is being processed"
    );
}

#[tokio::test]
async fn upload_rejected_by_backend_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(json_response(500, r#"{"detail":"Error processing file"}"#))
        .mount(&server)
        .await;

    let file = text_file("x");
    let err = backend_for(&server)
        .upload(&UploadRequest {
            filename: "x.txt".to_string(),
            path: file.path().to_path_buf(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn upload_with_non_json_success_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("uploaded"))
        .mount(&server)
        .await;

    let file = text_file("x");
    let err = backend_for(&server)
        .upload(&UploadRequest {
            filename: "x.txt".to_string(),
            path: file.path().to_path_buf(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn upload_of_missing_file_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .upload(&UploadRequest {
            filename: "gone.txt".to_string(),
            path: "/definitely/not/here/gone.txt".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}

#[tokio::test]
async fn health_reports_model_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(json_response(200, r#"{"status":"healthy","models_loaded":true}"#))
        .mount(&server)
        .await;

    let report = backend_for(&server).health().await.expect("ok");
    assert_eq!(report.status, "healthy");
    assert!(report.models_loaded);
}
