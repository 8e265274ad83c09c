//! # Commands Module
//!
//! The [`Controller`] and every command the front end can issue.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Controller Commands                                  │
//! │                                                                         │
//! │  ┌───────────────────┐  ┌───────────────────┐  ┌───────────────────┐    │
//! │  │  product.rs       │  │  bill.rs          │  │  label.rs         │    │
//! │  │                   │  │                   │  │                   │    │
//! │  │  load_initial_data│  │  add_item         │  │  render_label     │    │
//! │  │  save_product     │  │  remove_item      │  │  export_label     │    │
//! │  │  edit_product     │  │  set_discount     │  │  save_label       │    │
//! │  │  cancel_edit      │  │  set_payment_...  │  │                   │    │
//! │  │  delete_product   │  │  finalize_bill    │  │                   │    │
//! │  │                   │  │  preview_invoice  │  │                   │    │
//! │  └───────────────────┘  └───────────────────┘  └───────────────────┘    │
//! │                                                                         │
//! │  ┌───────────────────┐                                                  │
//! │  │  view.rs          │  navigate, new_bill                              │
//! │  └───────────────────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Commands take `&mut self`, so exactly one runs at a time. Remote calls are
//! awaited inside the command; nothing is retried.

pub mod bill;
pub mod label;
pub mod product;
pub mod view;

use shopfront_api::{Backend, RemoteError};
use shopfront_bridge::ExportHandle;
use tracing::error;

use crate::error::AppError;
use crate::state::{AppSnapshot, AppState, ConfigState};

/// Owns application state and performs every state change.
pub struct Controller<B: Backend> {
    backend: B,
    exporter: ExportHandle,
    config: ConfigState,
    state: AppState,
}

impl<B: Backend> Controller<B> {
    /// Creates a controller with empty state. Call
    /// [`load_initial_data`](Self::load_initial_data) next.
    pub fn new(backend: B, exporter: ExportHandle, config: ConfigState) -> Self {
        Controller {
            backend,
            exporter,
            config,
            state: AppState::new(),
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read-only view of the live state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Owned copy for rendering.
    pub fn snapshot(&self) -> AppSnapshot {
        self.state.snapshot()
    }

    /// Clears the banner before a remote call.
    fn begin_remote(&mut self) {
        self.state.api_error = None;
    }

    /// Logs a failed remote call and raises the banner.
    fn remote_failed(&mut self, action: &str, err: RemoteError) -> AppError {
        error!(action, status = ?err.status(), error = %err, "Remote call failed");
        let err = AppError::from(err);
        self.state.api_error = Some(err.message.clone());
        err
    }
}

// =============================================================================
// Test Support
// =============================================================================
