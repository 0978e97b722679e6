use thiserror::Error;

use waveline_api::ApiError;

/// Errors produced by the credential persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored identity could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Identity and credential failures from the session store.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend refused the operation; the message is the server's own.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered garbage.
    #[error("Network error: {0}")]
    Network(String),

    /// Persisting or clearing credentials failed.
    #[error("Credential storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Backend { message, .. } => Self::Rejected(message),
            ApiError::Transport(e) => Self::Network(e.to_string()),
        }
    }
}

/// Pairing and messaging failures from the pairing store.
#[derive(Error, Debug)]
pub enum PairingError {
    /// The backend refused the operation; the message is the server's own.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered garbage.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<ApiError> for PairingError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Backend { message, .. } => Self::Rejected(message),
            ApiError::Transport(e) => Self::Network(e.to_string()),
        }
    }
}
