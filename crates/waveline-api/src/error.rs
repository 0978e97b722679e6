use thiserror::Error;

/// Errors produced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed, or the response body could not be
    /// decoded (connection refused, TLS failure, malformed JSON).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is the
    /// server's own error text when the body carried one, else a fixed
    /// per-operation fallback.
    #[error("{message}")]
    Backend { status: u16, message: String },
}

impl ApiError {
    /// The server-provided message, if the backend rejected the request.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } => Some(message),
            Self::Transport(_) => None,
        }
    }
}
