//! # Export Protocol
//!
//! Messages exchanged between an [`ExportHandle`](crate::ExportHandle) and
//! the [`ExportHost`](crate::ExportHost).
//!
//! ## Exchange
//! ```text
//! caller                                   host
//!   │  SaveImageRequest { id, payload, respond_to }
//!   │ ───────────────────────────────────────►│
//!   │                                         │ prompt "Save Barcode As"
//!   │                                         │   ├─ canceled → no write
//!   │                                         │   └─ path → decode, write
//!   │  SaveImageResponse { success, path?, reason? }
//!   │ ◄───────────────────────────────────────│ (oneshot)
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Title of the save prompt.
pub const SAVE_DIALOG_TITLE: &str = "Save Barcode As";

/// Name of the only file type offered.
pub const PNG_FILTER_NAME: &str = "PNG Images";

/// Header removed from the payload before base64 decoding.
pub const PNG_DATA_URL_HEADER: &str = "data:image/png;base64,";

/// Reason reported when the user dismisses the prompt.
pub const CANCELED_REASON: &str = "Dialog canceled";

// =============================================================================
// Request
// =============================================================================

/// What the caller wants saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveImage {
    /// `data:image/png;base64,...`
    pub png_data_url: String,

    /// File name pre-filled in the prompt.
    pub default_path: String,
}

/// A save request in flight, with its private reply channel.
#[derive(Debug)]
pub struct SaveImageRequest {
    pub id: Uuid,
    pub payload: SaveImage,
    pub respond_to: oneshot::Sender<SaveImageResponse>,
}

// =============================================================================
// Response
// =============================================================================

/// Outcome of a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveImageResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SaveImageResponse {
    pub fn saved(path: PathBuf) -> Self {
        SaveImageResponse {
            success: true,
            path: Some(path),
            reason: None,
        }
    }

    pub fn canceled() -> Self {
        Self::failed(CANCELED_REASON)
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        SaveImageResponse {
            success: false,
            path: None,
            reason: Some(reason.into()),
        }
    }

    pub fn is_canceled(&self) -> bool {
        !self.success && self.reason.as_deref() == Some(CANCELED_REASON)
    }
}

// =============================================================================
// Prompt Options
// =============================================================================

/// One entry of the prompt's file type list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Everything a [`SavePrompt`](crate::SavePrompt) needs to ask for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDialogOptions {
    pub title: String,
    pub default_path: String,
    pub filters: Vec<FileFilter>,
}

impl SaveDialogOptions {
    /// PNG-only prompt pre-filled with `default_path`.
    pub fn png(default_path: impl Into<String>) -> Self {
        SaveDialogOptions {
            title: SAVE_DIALOG_TITLE.to_string(),
            default_path: default_path.into(),
            filters: vec![FileFilter {
                name: PNG_FILTER_NAME.to_string(),
                extensions: vec!["png".to_string()],
            }],
        }
    }
}
