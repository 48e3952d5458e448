use thiserror::Error;

/// Failures from the remote assistant backend.
///
/// These never escape the engine: every call site converts a backend error
/// into a locally classified reply.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("Backend request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success HTTP status.
    #[error("Backend returned status {0}")]
    Status(u16),

    /// The reply body did not match the expected envelope.
    #[error("Malformed backend reply: {0}")]
    MalformedReply(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Http(err.to_string())
    }
}
