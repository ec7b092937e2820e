use async_trait::async_trait;
use mockall::automock;

use crate::errors::IntakeError;
use crate::use_cases::submission::SubmissionPayload;

/// The remote registration endpoint. Success is any 2xx response; the
/// response body is ignored either way.
#[automock]
#[async_trait]
pub trait OrphanageApi: Send + Sync {
    async fn create_orphanage(&self, payload: SubmissionPayload) -> Result<(), IntakeError>;
}
