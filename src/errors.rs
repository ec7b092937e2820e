use derive_more::Display;

/// Everything here is recoverable from the form's point of view: the draft
/// is never consumed by a failed submission, so the user can always retry.
#[derive(Debug, Display)]
pub enum IntakeError {
    #[display("A submission is already in flight")]
    SubmissionInFlight,

    #[display("Orphanage API rejected the submission with status {_0}")]
    ApiRejected(u16),

    #[display("Network error during submission: {_0}")]
    Network(String),

    #[display("Invalid API base URL: {_0}")]
    InvalidBaseUrl(String),

    #[display("Invalid image part: {_0}")]
    InvalidImagePart(String),
}

impl IntakeError {
    /// The in-flight guard is the only rejection that does not warrant
    /// user-visible failure feedback; the first submission is still running.
    pub fn is_duplicate_submit(&self) -> bool {
        matches!(self, IntakeError::SubmissionInFlight)
    }
}

impl From<reqwest::Error> for IntakeError {
    fn from(err: reqwest::Error) -> Self {
        IntakeError::Network(err.to_string())
    }
}

impl From<url::ParseError> for IntakeError {
    fn from(err: url::ParseError) -> Self {
        IntakeError::InvalidBaseUrl(err.to_string())
    }
}
