//! Error types for label rendering.
//!
//! An id the barcode encoder rejects is NOT an error: it renders as an
//! inline error marker. Only failures that leave no usable image end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    /// The embedded bitmap font could not be parsed.
    #[error("Font error: {0}")]
    Font(String),

    /// PNG serialization failed.
    #[error("Image encoding failed: {0}")]
    ImageEncode(String),
}

pub type LabelResult<T> = Result<T, LabelError>;
