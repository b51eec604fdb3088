use crate::{CorpusStats, HealthStatus, Notice, View};

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub header: HeaderView,
    pub is_uploading: bool,
    pub notice: Option<Notice>,
    pub status: StatusView,
    pub body: ViewBody,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub active: View,
    /// Shown in the tab label as `Documents (N)`.
    pub document_count: usize,
    pub health: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub refreshes_in_flight: usize,
    pub last_refreshed: Option<String>,
    pub last_refresh_error: Option<String>,
}

/// Per-view content, keyed by the active view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    Chat(ChatView),
    Upload(UploadView),
    Dashboard(DashboardView),
    Documents(DocumentsView),
}

impl ViewBody {
    pub fn view(&self) -> View {
        match self {
            ViewBody::Chat(_) => View::Chat,
            ViewBody::Upload(_) => View::Upload,
            ViewBody::Dashboard(_) => View::Dashboard,
            ViewBody::Documents(_) => View::Documents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    /// False until at least one document has been ingested.
    pub ready: bool,
    pub stats: CorpusStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub path_input: String,
    pub pending_name: Option<String>,
    pub pending_size: Option<String>,
    pub can_upload: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<DocumentRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentsView {
    pub rows: Vec<DocumentRow>,
    pub stats: CorpusStats,
    pub total_text: String,
}

impl DocumentsView {
    /// `1 document uploaded`, `3 documents uploaded`.
    pub fn count_label(&self) -> String {
        let n = self.stats.documents;
        let plural = if n == 1 { "" } else { "s" };
        format!("{n} document{plural} uploaded")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub filename: String,
    pub chunks: u64,
    pub total_chars: u64,
    pub text_size: String,
    pub fill_ratio: f64,
}
