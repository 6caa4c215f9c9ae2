// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! keymeter CLI - OpenRouter key credit and usage from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Refresh once and print the status line
//! keymeter
//!
//! # JSON output
//! keymeter --format json --pretty
//!
//! # Keep a live status line, refreshing on the configured interval
//! keymeter watch
//!
//! # Store a key and switch to the per-key endpoint
//! keymeter config set-key sk-or-v1-...
//! keymeter config schema key
//! ```

mod commands;
mod host;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use keymeter_fetch::UsageSource;
use keymeter_providers::KeyInfoClient;
use keymeter_store::{LogLevel, SettingsStore, default_settings_path};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, usage, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// keymeter CLI - OpenRouter API key usage monitoring.
#[derive(Parser)]
#[command(name = "keymeter")]
#[command(about = "OpenRouter API key credit and usage monitor")]
#[command(long_about = r#"
keymeter shows how much OpenRouter credit is left on your API key.

The key is read from the settings file, falling back to the
OPENROUTER_API_KEY environment variable.

Examples:
  keymeter                       # Refresh once, print status
  keymeter --format json         # JSON output
  keymeter watch                 # Live status line
  keymeter config show           # Effective configuration
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'usage' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Send requests to this base URL instead of https://openrouter.ai.
    #[arg(long, global = true, value_name = "URL", hide = true)]
    pub base_url: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the settings file this invocation works on.
    pub fn settings_path(&self) -> PathBuf {
        self.settings.clone().unwrap_or_else(default_settings_path)
    }

    /// Builds the OpenRouter client, honoring `--base-url`.
    pub fn usage_source(&self) -> Result<Arc<dyn UsageSource>> {
        let client = match &self.base_url {
            Some(url) => KeyInfoClient::with_base_url(url.as_str())?,
            None => KeyInfoClient::new()?,
        };
        Ok(Arc::new(client))
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Refresh once and print the result (default if no command specified).
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Keep a live status line (Enter refreshes, Ctrl+C exits).
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No API key configured.
    NoKey = 2,
    /// The usage request failed.
    FetchFailed = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("keymeter=debug,info")
    } else {
        EnvFilter::new(format!("keymeter={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let store = match SettingsStore::load(cli.settings_path()).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(ExitCode::Error as i32);
        }
    };

    setup_logging(cli.verbose, cli.quiet, store.get().await.log_level);

    let result = match &cli.command {
        Some(Commands::Usage(args)) => usage::run(args, &cli, store).await,
        Some(Commands::Watch(args)) => watch::run(args, &cli, store).await,
        Some(Commands::Config(args)) => config::run(args, &cli, store).await,
        None => {
            // Default to usage command
            usage::run(&usage::UsageArgs::default(), &cli, store).await
        }
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::Error
        }
    };

    // Exit here: a pending stdin read in watch mode would otherwise keep the
    // runtime from shutting down.
    std::process::exit(code as i32);
}
