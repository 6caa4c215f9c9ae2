//! Repeating refresh timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use keymeter_core::DisplayState;
use keymeter_store::RefreshConfig;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::pipeline::RefreshPipeline;

/// Timer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No timer; the interval is `0` or `start` was never called.
    Idle,
    /// A timer fires every `period`.
    Scheduled {
        /// Time between ticks.
        period: Duration,
    },
    /// `stop` was called.
    Cancelled,
}

struct Timer {
    state: SchedulerState,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

/// Owns at most one repeating timer driving silent refreshes.
///
/// Each tick spawns its refresh as a separate task. Cancelling the timer
/// stops future ticks but never aborts a refresh already in flight; that
/// refresh still publishes its result.
pub struct RefreshScheduler {
    pipeline: Arc<RefreshPipeline>,
    timer: Mutex<Timer>,
}

impl RefreshScheduler {
    /// Creates an idle scheduler.
    pub fn new(pipeline: Arc<RefreshPipeline>) -> Self {
        Self {
            pipeline,
            timer: Mutex::new(Timer {
                state: SchedulerState::Idle,
                handle: None,
            }),
        }
    }

    fn timer(&self) -> MutexGuard<'_, Timer> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// (Re)starts the timer from `config`.
    ///
    /// Any running timer is cancelled first. An interval of `0` leaves the
    /// scheduler `Idle`. The first tick fires one full period after this
    /// call.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self, config: &RefreshConfig) -> SchedulerState {
        let mut timer = self.timer();
        if timer.cancel() {
            debug!("Cancelled previous refresh timer");
        }

        let Some(period) = config.period() else {
            info!("Automatic refresh disabled");
            timer.state = SchedulerState::Idle;
            return timer.state;
        };

        let pipeline = Arc::clone(&self.pipeline);
        timer.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Refresh timer tick");
                let pipeline = Arc::clone(&pipeline);
                tokio::spawn(async move {
                    pipeline.refresh(false).await;
                });
            }
        }));

        info!(interval_minutes = config.interval_minutes, "Automatic refresh scheduled");
        timer.state = SchedulerState::Scheduled { period };
        timer.state
    }

    /// Runs a refresh now, independent of the timer.
    pub async fn trigger_now(&self, notify: bool) -> DisplayState {
        self.pipeline.refresh(notify).await
    }

    /// Cancels the timer. Calling it again does nothing more.
    pub fn stop(&self) {
        let mut timer = self.timer();
        if timer.cancel() {
            info!("Automatic refresh stopped");
        }
        timer.state = SchedulerState::Cancelled;
    }

    /// Returns the timer state.
    pub fn state(&self) -> SchedulerState {
        self.timer().state
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.timer().cancel();
    }
}
