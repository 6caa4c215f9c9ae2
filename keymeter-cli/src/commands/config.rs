//! Config command - manage configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use keymeter_core::{ApiKey, EndpointSchema};
use keymeter_store::{ConfigResolver, KeySource, SettingsStore, default_config_dir};
use tracing::info;

use crate::output::{ConfigOutput, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Store an API key in the settings file.
    SetKey {
        /// The OpenRouter API key.
        key: String,
    },

    /// Remove the stored API key.
    ClearKey,

    /// Set the refresh interval.
    Interval {
        /// Minutes between refreshes; 0 disables automatic refresh.
        minutes: u32,
    },

    /// Choose the usage endpoint.
    Schema {
        /// `credits` (account balance) or `key` (per-key limit).
        schema: String,
    },

    /// Set the low-credit alert threshold.
    Threshold {
        /// Amount, or `default` for the endpoint's default.
        value: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: Arc<SettingsStore>) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await?,
        ConfigAction::Path => show_paths(cli, &store)?,
        ConfigAction::SetKey { key } => set_key(key, &store).await?,
        ConfigAction::ClearKey => clear_key(store).await?,
        ConfigAction::Interval { minutes } => set_interval(*minutes, &store).await?,
        ConfigAction::Schema { schema } => set_schema(schema, &store).await?,
        ConfigAction::Threshold { value } => set_threshold(value, &store).await?,
        ConfigAction::Reset => reset_config(&store).await?,
    }
    Ok(ExitCode::Success)
}

/// Collects the effective configuration without exposing the key.
pub async fn effective_config(store: Arc<SettingsStore>, resolver: &ConfigResolver) -> ConfigOutput {
    let settings = store.get().await;
    let config = resolver.resolve().await;
    let key_source = resolver.key_source().await;

    ConfigOutput {
        settings_file: store.path().display().to_string(),
        api_key: config.api_key.as_ref().map(ApiKey::redacted),
        key_source: key_source.to_string(),
        refresh_interval_minutes: config.interval_minutes,
        schema: config.schema.to_string(),
        endpoint: config.schema.path().to_string(),
        low_credit_threshold: config.low_credit_threshold,
        threshold_is_default: settings.low_credit_threshold.is_none(),
        log_level: settings.log_level.to_string(),
    }
}

async fn show_config(cli: &Cli, store: Arc<SettingsStore>) -> Result<()> {
    let resolver = ConfigResolver::new(Arc::clone(&store));
    let output = effective_config(store, &resolver).await;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_config(&output));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = store.path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_key(raw: &str, store: &SettingsStore) -> Result<()> {
    let key = ApiKey::parse(raw).context("API key is empty")?;

    store.set_api_key(Some(key.expose().to_string())).await;
    store.save().await?;

    info!("API key stored");
    println!("API key stored: {}", key.redacted());

    Ok(())
}

async fn clear_key(store: Arc<SettingsStore>) -> Result<()> {
    store.set_api_key(None).await;
    store.save().await?;

    let resolver = ConfigResolver::new(store);
    if resolver.key_source().await == KeySource::Environment {
        println!("API key removed from settings (environment key still applies)");
    } else {
        println!("API key removed from settings");
    }

    Ok(())
}

async fn set_interval(minutes: u32, store: &SettingsStore) -> Result<()> {
    store.set_refresh_interval(Some(i64::from(minutes))).await;
    store.save().await?;

    info!(minutes, "Refresh interval updated");
    if minutes == 0 {
        println!("Automatic refresh disabled");
    } else {
        println!("Refresh interval set to {minutes} min");
    }

    Ok(())
}

async fn set_schema(raw: &str, store: &SettingsStore) -> Result<()> {
    let schema: EndpointSchema = raw.parse()?;

    store.set_schema(schema).await;
    store.save().await?;

    info!(schema = %schema, "Endpoint schema updated");
    println!("Endpoint set to: {schema} ({})", schema.path());

    Ok(())
}

/// Parses a threshold argument; `default` clears the override.
pub fn parse_threshold(raw: &str) -> Result<Option<f64>> {
    match raw.trim().to_lowercase().as_str() {
        "default" | "none" | "" => Ok(None),
        value => {
            let parsed: f64 = value
                .parse()
                .with_context(|| format!("Invalid threshold: {raw}"))?;
            Ok(Some(parsed))
        }
    }
}

async fn set_threshold(raw: &str, store: &SettingsStore) -> Result<()> {
    let threshold = parse_threshold(raw)?;

    store.set_low_credit_threshold(threshold).await?;
    store.save().await?;

    match threshold {
        Some(value) => println!("Low-credit threshold set to {value}"),
        None => println!("Low-credit threshold reset to the endpoint default"),
    }

    Ok(())
}

async fn reset_config(store: &SettingsStore) -> Result<()> {
    let path = store.path();

    if path.exists() {
        tokio::fs::remove_file(path).await?;
        store.reset().await;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
