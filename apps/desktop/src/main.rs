//! # Shopfront Entry Point
//!
//! ```text
//! shopfront [--config <path>] [--api-url <url>] [--export-dir <dir>] [--no-prompt]
//! ```
//!
//! The actual setup is in `lib.rs` for testability.

use std::path::PathBuf;

use clap::Parser;
use shopfront_desktop::state::ConfigOverrides;

/// Fashion World point-of-sale client
#[derive(Debug, Parser)]
#[command(name = "shopfront", version, about)]
struct Cli {
    /// Config file (default: platform config dir / shopfront.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// REST backend base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Directory exported labels are saved into
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Save labels straight into the export directory without asking
    #[arg(long)]
    no_prompt: bool,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        ConfigOverrides {
            config_path: cli.config,
            api_url: cli.api_url,
            export_dir: cli.export_dir,
            no_prompt: cli.no_prompt,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopfront_desktop::init_tracing();

    let cli = Cli::parse();
    shopfront_desktop::run(cli.into()).await
}
