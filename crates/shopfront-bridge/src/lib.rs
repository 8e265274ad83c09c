//! # shopfront-bridge: Privileged Image Export
//!
//! Saving an exported label is the only filesystem write the application
//! makes on the user's behalf. This crate isolates it behind a narrow
//! request/response channel.
//!
//! ## Privilege Separation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Bridge                                     │
//! │                                                                         │
//! │  ┌─────────────────────────┐         ┌───────────────────────────────┐  │
//! │  │ Unprivileged side       │         │ Host side                     │  │
//! │  │                         │  mpsc   │                               │  │
//! │  │ ExportHandle::save_image├────────►│ ExportHost::run               │  │
//! │  │   (clone freely)        │         │  ├── SavePrompt (trait)       │  │
//! │  │                         │ oneshot │  │    DirectoryPrompt         │  │
//! │  │ SaveImageResponse       │◄────────┤  │    TerminalPrompt          │  │
//! │  │ {success, path, reason} │         │  └── tokio::fs::write         │  │
//! │  └─────────────────────────┘         └───────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfront_bridge::{DirectoryPrompt, ExportHost};
//!
//! let (handle, _host) = ExportHost::spawn(Arc::new(DirectoryPrompt::new("labels")));
//! let response = handle.save_image(label.data_url(), label.suggested_filename()).await?;
//! ```

pub mod error;
pub mod handle;
pub mod host;
pub mod prompt;
pub mod protocol;

pub use error::{BridgeError, BridgeResult};
pub use handle::ExportHandle;
pub use host::ExportHost;
pub use prompt::{DirectoryPrompt, PromptOutcome, SavePrompt, TerminalPrompt};
pub use protocol::{SaveDialogOptions, SaveImage, SaveImageRequest, SaveImageResponse};
