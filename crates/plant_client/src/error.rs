use thiserror::Error;

/// Failure kinds of a single provider call. The client never retries and
/// never swallows one of these.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("provider rejected the request: invalid credential")]
    Auth,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider returned {status}: {message}")]
    Protocol { status: u16, message: String },

    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("failed to build provider request: {0}")]
    Setup(String),
}

impl ClientError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        // Strip the URL so query strings never reach the logs.
        let err = err.without_url();
        if err.is_timeout() {
            ClientError::Unreachable(format!("timed out: {err}"))
        } else if err.is_builder() {
            ClientError::Setup(err.to_string())
        } else {
            ClientError::Unreachable(err.to_string())
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
