//! Errors seen by callers holding an [`ExportHandle`](crate::ExportHandle).
//!
//! A canceled prompt or a failed write is NOT an error here: those come back
//! as an unsuccessful [`SaveImageResponse`](crate::SaveImageResponse).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The export host is no longer receiving requests.
    #[error("Export host closed")]
    HostClosed,

    /// The host dropped the request without replying.
    #[error("Export host dropped the request")]
    HostDropped,
}

pub type BridgeResult<T> = Result<T, BridgeError>;
