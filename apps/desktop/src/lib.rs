//! # Shopfront Desktop Library
//!
//! Core library for the Fashion World point-of-sale client. `main.rs`
//! parses flags and hands over to [`run`].
//!
//! ## Module Organization
//! ```text
//! shopfront_desktop/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── app.rs      ◄─── AppState, View, AppSnapshot
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Controller
//! │   ├── product.rs  ◄─── Catalog load/save/edit/delete
//! │   ├── bill.rs     ◄─── Bill builder, finalize, invoices
//! │   ├── label.rs    ◄─── Barcode label render/export
//! │   └── view.rs     ◄─── Navigation
//! ├── shell.rs        ◄─── Terminal front end
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::sync::Arc;

use shopfront_api::RestBackend;
use shopfront_bridge::{DirectoryPrompt, ExportHost, SavePrompt, TerminalPrompt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::Controller;
use shell::Shell;
use state::{ConfigOverrides, ConfigState};

/// Runs the application until the user quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → shopfront.toml → SHOPFRONT_* env → flags               │
/// │                                                                         │
/// │  2. Build REST Backend ───────────────────────────────────────────────► │
/// │     • base URL + timeout from config                                    │
/// │                                                                         │
/// │  3. Spawn Export Host ────────────────────────────────────────────────► │
/// │     • TerminalPrompt (interactive) or DirectoryPrompt (--no-prompt)     │
/// │                                                                         │
/// │  4. Load Products & Bills ────────────────────────────────────────────► │
/// │     • failure leaves both lists empty and raises the banner             │
/// │                                                                         │
/// │  5. Run Shell ────────────────────────────────────────────────────────► │
/// │     • on exit the export handle drops and the host stops                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(overrides: ConfigOverrides) -> anyhow::Result<()> {
    info!("Starting Shopfront");

    let config = ConfigState::load(&overrides)?;
    let backend = RestBackend::new(&config.client_config())?;

    let prompt: Arc<dyn SavePrompt> = if config.interactive_save {
        Arc::new(TerminalPrompt::new(&config.export_dir))
    } else {
        Arc::new(DirectoryPrompt::new(&config.export_dir))
    };
    let (exporter, host) = ExportHost::spawn(prompt);

    let mut controller = Controller::new(backend, exporter, config);
    if let Err(e) = controller.load_initial_data().await {
        warn!(error = %e, "Continuing without initial data");
    }

    let mut shell = Shell::new(controller);
    shell.run().await?;

    // Dropping the controller drops the last export handle
    drop(shell);
    host.await?;

    info!("Shopfront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_api=trace` - Trace for one crate only
/// - Default: `info,shopfront=debug`
///
/// Logs go to stderr so they never mix with shell output on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
