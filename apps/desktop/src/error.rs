//! # App Error Type
//!
//! Unified error type for controller commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  Shell                       Controller                                 │
//! │  ─────                       ──────────                                 │
//! │                                                                         │
//! │  "bill add P001 x2"                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command method → Result<T, AppError>                            │   │
//! │  │         │                                                        │   │
//! │  │  RemoteError? ──── non-2xx / network ─────────┐                  │   │
//! │  │         │                                     │                  │   │
//! │  │  ValidationError? ── empty bill, bad price ───┤                  │   │
//! │  │         │                                     ▼                  │   │
//! │  │  CoreError::ProductNotFound ──────────────► AppError ───────────►│   │
//! │  │         │                                                        │   │
//! │  │  BridgeError / LabelError ────────────────────┘                  │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Shell prints "[LOOKUP] Product with ID/Name "X" not found"             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here retries. The user repeats the command.

use serde::Serialize;
use shopfront_api::RemoteError;
use shopfront_bridge::BridgeError;
use shopfront_core::{CoreError, ValidationError};
use shopfront_label::LabelError;

/// Error returned from controller commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "REMOTE_CALL",
///   "message": "Network error: connection refused"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend returned non-2xx or could not be reached
    RemoteCall,

    /// Client-side precondition failed; nothing was sent
    Validation,

    /// Identifier matched no product
    Lookup,

    /// Export host gone or save unsuccessful
    Export,

    /// Label could not be encoded
    Render,

    /// Configuration rejected at startup
    Config,

    /// Unknown command, bad view name and the like
    Usage,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Validation, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Config, message)
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Usage, message)
    }

    /// Creates an export error.
    pub fn export(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Export, message)
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        AppError::new(ErrorCode::RemoteCall, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => AppError::new(ErrorCode::Lookup, err.to_string()),
            // Unwrap so the message reads the same as a bare ValidationError
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<BridgeError> for AppError {
    fn from(err: BridgeError) -> Self {
        AppError::export(err.to_string())
    }
}

impl From<LabelError> for AppError {
    fn from(err: LabelError) -> Self {
        AppError::new(ErrorCode::Render, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_validation_codes() {
        let err = AppError::from(CoreError::ProductNotFound("P0X1".into()));
        assert_eq!(err.code, ErrorCode::Lookup);
        assert_eq!(err.message, "Product with ID/Name \"P0X1\" not found");

        let err = AppError::from(CoreError::Validation(ValidationError::EmptyBill));
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, "Cannot finalize an empty bill.");
    }

    #[test]
    fn test_remote_status_message_passes_through() {
        let err = AppError::from(RemoteError::Status {
            status: 409,
            message: "Duplicate product".into(),
        });
        assert_eq!(err.code, ErrorCode::RemoteCall);
        assert_eq!(err.message, "Duplicate product");
    }

    #[test]
    fn test_serialized_shape() {
        let err = AppError::from(BridgeError::HostClosed);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "EXPORT");
        assert_eq!(json["message"], "Export host closed");
        assert_eq!(err.to_string(), "[EXPORT] Export host closed");
    }
}
