//! Host-facing facade.

use std::sync::Arc;

use keymeter_core::{DisplayState, Notifier, StatusIndicator};
use keymeter_fetch::UsageSource;
use keymeter_store::{ConfigResolver, DisplayStore};
use tracing::info;

use crate::pipeline::RefreshPipeline;
use crate::scheduler::{RefreshScheduler, SchedulerState};

/// The monitor engine as a host sees it.
///
/// The host constructs it with its collaborators, calls [`activate`] once,
/// forwards user actions to [`trigger_now`] and settings changes to
/// [`on_config_changed`], and calls [`shutdown`] on exit.
///
/// [`activate`]: UsageMonitor::activate
/// [`trigger_now`]: UsageMonitor::trigger_now
/// [`on_config_changed`]: UsageMonitor::on_config_changed
/// [`shutdown`]: UsageMonitor::shutdown
pub struct UsageMonitor {
    pipeline: Arc<RefreshPipeline>,
    scheduler: RefreshScheduler,
}

impl UsageMonitor {
    /// Creates an inactive monitor.
    pub fn new(
        resolver: ConfigResolver,
        source: Arc<dyn UsageSource>,
        indicator: Arc<dyn StatusIndicator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let pipeline = Arc::new(RefreshPipeline::new(resolver, source, indicator, notifier));
        let scheduler = RefreshScheduler::new(Arc::clone(&pipeline));
        Self {
            pipeline,
            scheduler,
        }
    }

    /// Shows the loading state, starts the timer and runs a silent refresh.
    pub async fn activate(&self) -> DisplayState {
        info!("Activating usage monitor");
        self.pipeline.render_current().await;
        self.restart_timer().await;
        self.pipeline.refresh(false).await
    }

    /// Manual refresh. With `notify`, the outcome is also announced.
    pub async fn trigger_now(&self, notify: bool) -> DisplayState {
        self.scheduler.trigger_now(notify).await
    }

    /// Re-reads configuration, restarts the timer and refreshes silently.
    pub async fn on_config_changed(&self) -> DisplayState {
        info!("Configuration changed");
        self.restart_timer().await;
        self.pipeline.refresh(false).await
    }

    /// Stops the timer. In-flight refreshes finish on their own.
    pub fn shutdown(&self) {
        info!("Shutting down usage monitor");
        self.scheduler.stop();
    }

    /// Returns the timer state.
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Returns the display state store.
    pub fn display(&self) -> &DisplayStore {
        self.pipeline.display()
    }

    /// Returns the configuration resolver.
    pub fn resolver(&self) -> &ConfigResolver {
        self.pipeline.resolver()
    }

    async fn restart_timer(&self) -> SchedulerState {
        let config = self.pipeline.resolver().resolve().await;
        self.scheduler.start(&config)
    }
}
