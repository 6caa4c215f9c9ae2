//! Usage command - one manual refresh.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use keymeter_core::{DisplayState, Notifier, StatusIndicator, UsagePresenter};
use keymeter_monitor::UsageMonitor;
use keymeter_store::{ConfigResolver, SettingsStore};
use tracing::debug;

use crate::host::{CaptureIndicator, StderrNotifier};
use crate::output::{JsonFormatter, StatusOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the usage command.
#[derive(Args, Default)]
pub struct UsageArgs {
    /// Print only the status line, without the details.
    #[arg(long, short)]
    pub short: bool,

    /// Do not print a notification line.
    #[arg(long)]
    pub no_notify: bool,
}

/// Runs the usage command.
pub async fn run(args: &UsageArgs, cli: &Cli, store: Arc<SettingsStore>) -> Result<ExitCode> {
    let formatter = TextFormatter::new(!cli.no_color);
    let indicator = Arc::new(CaptureIndicator::default());
    let show_notices = !args.no_notify && !cli.quiet && cli.format == OutputFormat::Text;
    let notifier = StderrNotifier::new(formatter, show_notices);

    let resolver = ConfigResolver::new(store);
    let monitor = UsageMonitor::new(
        resolver,
        cli.usage_source()?,
        Arc::clone(&indicator) as Arc<dyn StatusIndicator>,
        Arc::new(notifier) as Arc<dyn Notifier>,
    );

    let state = monitor.trigger_now(true).await;
    debug!(state = state.name(), "Manual refresh finished");

    let presentation = match indicator.last() {
        Some(presentation) => presentation,
        None => {
            let config = monitor.resolver().resolve().await;
            UsagePresenter::new(config.low_credit_threshold).present_state(&state)
        }
    };

    match cli.format {
        OutputFormat::Text => {
            if args.short {
                println!("{}", formatter.format_status_line(&presentation));
            } else {
                println!("{}", formatter.format_presentation(&presentation));
            }
        }
        OutputFormat::Json => {
            let output = StatusOutput::new(&state, &presentation);
            let json = JsonFormatter::new(cli.pretty)
                .format(&output)
                .context("failed to serialize status")?;
            println!("{json}");
        }
    }

    Ok(exit_code_for(&state))
}

/// Maps the final state to a process exit code.
pub fn exit_code_for(state: &DisplayState) -> ExitCode {
    match state {
        DisplayState::Ready(_) | DisplayState::Loading => ExitCode::Success,
        DisplayState::NoKey => ExitCode::NoKey,
        DisplayState::Error(_) => ExitCode::FetchFailed,
    }
}
