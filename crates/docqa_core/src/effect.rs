use std::time::Duration;

use crate::PendingUpload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDocuments,
    SubmitUpload { file: PendingUpload },
    ScheduleRefresh { after: Duration },
    CheckHealth,
}

/// Delay between a successful upload and the follow-up refresh. The backend
/// ingests asynchronously and sends no completion signal.
pub const POST_UPLOAD_REFRESH_DELAY: Duration = Duration::from_millis(2000);
