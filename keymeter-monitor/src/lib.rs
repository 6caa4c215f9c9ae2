// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # keymeter Monitor
//!
//! The refresh engine behind a keymeter status display.
//!
//! A [`RefreshPipeline`] runs one cycle: resolve configuration, fetch from a
//! [`UsageSource`](keymeter_fetch::UsageSource), and publish the resulting
//! [`DisplayState`](keymeter_core::DisplayState) to the host's
//! [`StatusIndicator`](keymeter_core::StatusIndicator). A
//! [`RefreshScheduler`] repeats silent cycles on a timer. [`UsageMonitor`]
//! ties both together behind the callbacks a host needs.
//!
//! ## Usage
//!
//! ```ignore
//! let monitor = UsageMonitor::new(resolver, Arc::new(KeyInfoClient::new()?), indicator, notifier);
//! monitor.activate().await;
//!
//! // user clicked the status item
//! monitor.trigger_now(true).await;
//!
//! // settings file changed
//! monitor.on_config_changed().await;
//!
//! monitor.shutdown();
//! ```

pub mod monitor;
pub mod notifications;
pub mod pipeline;
pub mod scheduler;

pub use monitor::UsageMonitor;
pub use notifications::{Notice, notice_for};
pub use pipeline::RefreshPipeline;
pub use scheduler::{RefreshScheduler, SchedulerState};
