// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # keymeter Store
//!
//! Configuration and display state for the keymeter monitor.
//!
//! This crate provides:
//!
//! - **SettingsStore**: User preferences persisted as JSON, with change notification
//! - **ConfigResolver**: Layers the environment under settings and applies defaults
//! - **DisplayStore**: The current [`DisplayState`](keymeter_core::DisplayState)
//! - **Persistence**: File I/O helpers with owner-only permissions
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use keymeter_store::{ConfigResolver, SettingsStore};
//!
//! let settings = Arc::new(SettingsStore::load_default().await?);
//! let resolver = ConfigResolver::new(Arc::clone(&settings));
//!
//! let config = resolver.resolve().await;
//! if config.api_key.is_none() {
//!     println!("no key configured");
//! }
//!
//! // Subscribe to changes
//! let mut rx = settings.subscribe();
//! while rx.changed().await.is_ok() {
//!     println!("Settings updated!");
//! }
//! ```

pub mod config;
pub mod display_store;
pub mod error;
pub mod persistence;
pub mod settings_store;

pub use config::{ConfigResolver, DEFAULT_REFRESH_INTERVAL_MINUTES, KeySource, RefreshConfig};
pub use display_store::DisplayStore;
pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, load_json, save_json};
pub use settings_store::{LogLevel, Settings, SettingsStore};
