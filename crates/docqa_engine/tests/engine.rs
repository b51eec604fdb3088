use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use docqa_engine::{
    Backend, DocumentRecord, EngineEvent, EngineHandle, FailureKind, FetchError, HealthReport,
    UploadReceipt, UploadRequest,
};

/// Scripted backend: counts calls and answers without any network.
#[derive(Default)]
struct FakeBackend {
    list_calls: AtomicUsize,
    fail_uploads: bool,
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, FetchError> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![DocumentRecord {
            filename: format!("doc-{call}.txt"),
            chunks: 1,
            total_chars: 10,
        }])
    }

    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, FetchError> {
        if self.fail_uploads {
            Err(fetch_error(FailureKind::HttpStatus(500)))
        } else {
            Ok(UploadReceipt {
                message: format!("File {} uploaded", request.filename),
            })
        }
    }

    async fn health(&self) -> Result<HealthReport, FetchError> {
        Err(fetch_error(FailureKind::Network))
    }
}

fn fetch_error(kind: FailureKind) -> FetchError {
    FetchError {
        kind,
        message: String::new(),
    }
}

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn fetch_command_reports_documents() {
    docqa_logging::initialize_for_tests();
    let engine = EngineHandle::with_backend(Arc::new(FakeBackend::default())).unwrap();

    engine.fetch_documents();

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::DocumentsFetched(Ok(docs))) => {
            assert_eq!(docs.len(), 1);
            assert_eq!(docs[0].filename, "doc-0.txt");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn upload_result_carries_filename() {
    docqa_logging::initialize_for_tests();
    let backend = FakeBackend {
        fail_uploads: true,
        ..FakeBackend::default()
    };
    let engine = EngineHandle::with_backend(Arc::new(backend)).unwrap();

    engine.upload(UploadRequest {
        filename: "notes.txt".to_string(),
        path: "/tmp/notes.txt".into(),
    });

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::UploadFinished { filename, result }) => {
            assert_eq!(filename, "notes.txt");
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn scheduled_refresh_fires_once_after_delay() {
    docqa_logging::initialize_for_tests();
    let engine = EngineHandle::with_backend(Arc::new(FakeBackend::default())).unwrap();
    let delay = Duration::from_millis(150);

    let started = Instant::now();
    engine.schedule_refresh(delay);

    assert!(engine.try_recv().is_none());
    assert_eq!(engine.recv_timeout(WAIT), Some(EngineEvent::RefreshDue));
    assert!(started.elapsed() >= delay);
    assert_eq!(engine.recv_timeout(Duration::from_millis(300)), None);
}

#[test]
fn dropping_the_handle_discards_pending_timer() {
    docqa_logging::initialize_for_tests();
    let backend = Arc::new(FakeBackend::default());
    let engine = EngineHandle::with_backend(backend.clone()).unwrap();

    // Each spawned command task holds a clone of the backend until it ends.
    engine.schedule_refresh(Duration::from_secs(60));
    let deadline = Instant::now() + WAIT;
    while Arc::strong_count(&backend) < 3 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(Arc::strong_count(&backend), 3, "timer task not started");

    drop(engine);

    // The runtime shuts down and drops the sleeping task long before it fires.
    while Arc::strong_count(&backend) > 1 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(Arc::strong_count(&backend), 1);
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn health_failure_is_reported_not_raised() {
    docqa_logging::initialize_for_tests();
    let engine = EngineHandle::with_backend(Arc::new(FakeBackend::default())).unwrap();

    engine.check_health();

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::HealthChecked(Err(err))) => assert_eq!(err.kind, FailureKind::Network),
        other => panic!("unexpected event: {other:?}"),
    }
}
