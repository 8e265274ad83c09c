//! # Remote Error Types
//!
//! Everything that can go wrong talking to the backend.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / non-2xx status                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RemoteError (this module) ← message pulled from the response body      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError { code: RemoteCall } (desktop app)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Error banner in the snapshot                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Backend call failures. None of them are retried.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the body's `message` field, then its `error` field, then
    /// the status reason, then a generic "failed with status" text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection refused, timeout, TLS failure and the like.
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// Configured base URL is unusable.
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl RemoteError {
    /// HTTP status for [`RemoteError::Status`], otherwise `None`.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::InvalidResponse(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

/// Result type for backend calls.
pub type RemoteResult<T> = Result<T, RemoteError>;
