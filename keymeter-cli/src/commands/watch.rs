//! Watch command - live status line.
//!
//! Activates the monitor, then waits for one of: Enter (manual refresh with
//! a notification), a settings change (restart the timer and refresh), or
//! Ctrl+C. The settings file is polled with `reload()`, which publishes on
//! the store's change channel only when the content differs.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use keymeter_core::{Notifier, StatusIndicator};
use keymeter_monitor::UsageMonitor;
use keymeter_store::{ConfigResolver, SettingsStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::host::{LineIndicator, ScreenIndicator, StderrNotifier};
use crate::output::TextFormatter;
use crate::{Cli, ExitCode};

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between checks of the settings file for changes.
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_settings: u64,

    /// Print one line per update instead of redrawing the screen.
    #[arg(long)]
    pub lines: bool,
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli, store: Arc<SettingsStore>) -> Result<ExitCode> {
    let formatter = TextFormatter::new(!cli.no_color);
    let indicator: Arc<dyn StatusIndicator> = if args.lines {
        Arc::new(LineIndicator::new(formatter))
    } else {
        Arc::new(ScreenIndicator::new(
            formatter,
            "Press Enter to refresh, Ctrl+C to exit",
        ))
    };
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier::new(formatter, !cli.quiet));

    let monitor = UsageMonitor::new(
        ConfigResolver::new(Arc::clone(&store)),
        cli.usage_source()?,
        indicator,
        notifier,
    );

    info!(settings = %store.path().display(), "Starting watch mode");
    monitor.activate().await;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let mut settings_changes = store.subscribe();
    let mut settings_poll = interval(Duration::from_secs(args.poll_settings));
    settings_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    settings_poll.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(_)) => {
                    monitor.trigger_now(true).await;
                }
                Ok(None) => {
                    info!("stdin closed, manual refresh unavailable");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    stdin_open = false;
                }
            },
            _ = settings_poll.tick() => {
                if let Err(e) = store.reload().await {
                    warn!(error = %e, "Ignoring unreadable settings file");
                }
            }
            Ok(()) = settings_changes.changed() => {
                monitor.on_config_changed().await;
            }
        }
    }

    monitor.shutdown();
    Ok(ExitCode::Success)
}
