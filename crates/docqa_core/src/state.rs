use crate::view_model::{
    AppViewModel, ChatView, DashboardView, DocumentRow, DocumentsView, HeaderView, StatusView,
    UploadView, ViewBody,
};
use crate::{chunk_fill_ratio, format_size, DocumentRegistry, PendingUpload, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing message. At most one is shown; a newer one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Body of a successful `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendHealth {
    pub status: String,
    pub models_loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Reported(BackendHealth),
    Unreachable(String),
}

/// Session UI state. One instance per process, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    active_view: View,
    is_uploading: bool,
    registry: DocumentRegistry,
    pending: Option<PendingUpload>,
    path_input: String,
    notice: Option<Notice>,
    refreshes_in_flight: usize,
    last_refreshed: Option<String>,
    last_refresh_error: Option<String>,
    health: HealthStatus,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    /// Read-only access to the current registry snapshot.
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn refreshes_in_flight(&self) -> usize {
        self.refreshes_in_flight
    }

    pub fn last_refresh_error(&self) -> Option<&str> {
        self.last_refresh_error.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let stats = self.registry.stats();
        let body = match self.active_view {
            View::Chat => ViewBody::Chat(ChatView {
                ready: !self.registry.is_empty(),
                stats,
            }),
            View::Upload => ViewBody::Upload(UploadView {
                path_input: self.path_input.clone(),
                pending_name: self.pending.as_ref().map(|p| p.name.clone()),
                pending_size: self.pending.as_ref().map(PendingUpload::size_mb_label),
                can_upload: self.pending.is_some() && !self.is_uploading,
            }),
            View::Dashboard => ViewBody::Dashboard(DashboardView {
                rows: self.document_rows(),
            }),
            View::Documents => ViewBody::Documents(DocumentsView {
                rows: self.document_rows(),
                stats,
                total_text: format_size(stats.total_chars),
            }),
        };

        AppViewModel {
            header: HeaderView {
                active: self.active_view,
                document_count: stats.documents,
                health: self.health.clone(),
            },
            is_uploading: self.is_uploading,
            notice: self.notice.clone(),
            status: StatusView {
                refreshes_in_flight: self.refreshes_in_flight,
                last_refreshed: self.last_refreshed.clone(),
                last_refresh_error: self.last_refresh_error.clone(),
            },
            body,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn document_rows(&self) -> Vec<DocumentRow> {
        self.registry
            .documents()
            .iter()
            .map(|doc| DocumentRow {
                filename: doc.filename.clone(),
                chunks: doc.chunks,
                total_chars: doc.total_chars,
                text_size: format_size(doc.total_chars),
                fill_ratio: chunk_fill_ratio(doc.chunks),
            })
            .collect()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select_view(&mut self, view: View) {
        if self.active_view != view {
            self.active_view = view;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_path_input(&mut self, text: String) {
        if self.path_input != text {
            self.path_input = text;
            self.mark_dirty();
        }
    }

    /// Puts `file` in the single pending slot, replacing any previous one.
    pub(crate) fn set_pending(&mut self, file: PendingUpload) {
        self.pending = Some(file);
        self.path_input.clear();
        self.mark_dirty();
    }

    pub(crate) fn clear_pending(&mut self) -> Option<PendingUpload> {
        let previous = self.pending.take();
        if previous.is_some() {
            self.mark_dirty();
        }
        previous
    }

    pub(crate) fn begin_upload(&mut self) {
        self.is_uploading = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_upload(&mut self) {
        self.is_uploading = false;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_refresh(&mut self) {
        self.refreshes_in_flight += 1;
        self.mark_dirty();
    }

    /// Whole-value swap. Last writer wins; there is no staleness check.
    pub(crate) fn replace_registry(&mut self, registry: DocumentRegistry, completed_at: String) {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
        self.registry = registry;
        self.last_refreshed = Some(completed_at);
        self.last_refresh_error = None;
        self.mark_dirty();
    }

    pub(crate) fn record_refresh_failure(&mut self, error: String) {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
        self.last_refresh_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn set_health(&mut self, health: HealthStatus) {
        self.health = health;
        self.mark_dirty();
    }
}
