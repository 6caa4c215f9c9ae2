//! One refresh cycle.
//!
//! Resolve config, fetch, normalize, present. The resulting state always
//! replaces the previous one, and every error is caught here so the timer
//! keeps running.

use std::sync::Arc;

use keymeter_core::{DisplayState, Notifier, StatusIndicator, UsagePresenter};
use keymeter_fetch::UsageSource;
use keymeter_store::{ConfigResolver, DisplayStore};
use tracing::{debug, info, instrument, warn};

use crate::notifications::notice_for;

/// Runs refresh cycles against one usage source and one host display.
pub struct RefreshPipeline {
    resolver: ConfigResolver,
    source: Arc<dyn UsageSource>,
    display: DisplayStore,
    indicator: Arc<dyn StatusIndicator>,
    notifier: Arc<dyn Notifier>,
}

impl RefreshPipeline {
    /// Creates a pipeline. The display starts in `Loading`.
    pub fn new(
        resolver: ConfigResolver,
        source: Arc<dyn UsageSource>,
        indicator: Arc<dyn StatusIndicator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            resolver,
            source,
            display: DisplayStore::new(),
            indicator,
            notifier,
        }
    }

    /// Returns the configuration resolver.
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Returns the display state store.
    pub fn display(&self) -> &DisplayStore {
        &self.display
    }

    /// Runs one cycle and returns the state it published.
    ///
    /// With no key configured the cycle ends in `NoKey` without touching the
    /// network. With `notify` set, the outcome is also sent to the notifier.
    #[instrument(skip(self), fields(source = self.source.id()))]
    pub async fn refresh(&self, notify: bool) -> DisplayState {
        let config = self.resolver.resolve().await;
        let presenter = UsagePresenter::new(config.low_credit_threshold);

        let state = match config.api_key {
            None => {
                debug!("No API key configured");
                DisplayState::NoKey
            }
            Some(key) => {
                self.indicator.update(&presenter.present_fetching());
                self.display.set(DisplayState::Loading);
                match self.source.fetch(&key, config.schema).await {
                    Ok(snapshot) => {
                        info!(
                            schema = %snapshot.schema,
                            remaining = snapshot.remaining,
                            "Usage refreshed"
                        );
                        DisplayState::Ready(snapshot)
                    }
                    Err(e) => {
                        warn!(error = %e, "Usage refresh failed");
                        DisplayState::Error(e.to_string())
                    }
                }
            }
        };

        self.publish(&presenter, state.clone());

        if notify {
            if let Some(notice) = notice_for(&state) {
                self.notifier.notify(notice.level, &notice.message);
            }
        }

        state
    }

    /// Renders the current state without refreshing, e.g. at startup.
    pub async fn render_current(&self) {
        let config = self.resolver.resolve().await;
        let presenter = UsagePresenter::new(config.low_credit_threshold);
        self.indicator
            .update(&presenter.present_state(&self.display.current()));
    }

    fn publish(&self, presenter: &UsagePresenter, state: DisplayState) {
        self.indicator.update(&presenter.present_state(&state));
        self.display.set(state);
    }
}
