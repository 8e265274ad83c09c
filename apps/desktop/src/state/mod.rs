//! # State Module
//!
//! Application state for the desktop client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 Controller<B: Backend>                          │    │
//! │  │  owns both, mutates AppState through &mut self commands         │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                  │                                  │                   │
//! │                  ▼                                  ▼                   │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐    │
//! │  │  AppState                    │   │  ConfigState                 │    │
//! │  │  view, catalog, bill,        │   │  shop name, backend URL,     │    │
//! │  │  history, banners            │   │  currency, export settings   │    │
//! │  └──────────────────────────────┘   └──────────────────────────────┘    │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │          AppSnapshot (owned copy handed to the shell)                   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • AppState: one command at a time via &mut self, no locks              │
//! │  • ConfigState: read-only after startup                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod config;

pub use app::{AppSnapshot, AppState, BillingForm, ProductEditor, View};
pub use config::{default_config_path, ConfigOverrides, ConfigState, CONFIG_FILE_NAME};
