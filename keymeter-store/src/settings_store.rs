//! User preferences store.
//!
//! Manages user settings with persistence and change notification.

use keymeter_core::EndpointSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
///
/// Every field is optional in the file; missing fields take their defaults.
/// Values are stored as written and interpreted by
/// [`ConfigResolver`](crate::ConfigResolver).
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// OpenRouter API key. Blank means "fall back to the environment".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Minutes between automatic refreshes. Unset means the default,
    /// `0` disables the timer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_minutes: Option<i64>,

    /// Which usage endpoint to poll.
    pub schema: EndpointSchema,

    /// Remaining amount at or below which the indicator alerts. Unset means
    /// the schema's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_credit_threshold: Option<f64>,

    /// Log level.
    pub log_level: LogLevel,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("refresh_interval_minutes", &self.refresh_interval_minutes)
            .field("schema", &self.schema)
            .field("low_credit_threshold", &self.low_credit_threshold)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl SettingsStore {
    /// Creates a store holding defaults, backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be loaded from disk.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing file yields defaults. An unreadable file is logged and also
    /// yields defaults, so a typo never stops the monitor from starting.
    ///
    /// # Errors
    ///
    /// Does not fail today; missing and broken files fall back to defaults.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        Ok(Self::with_settings(path, settings))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify_change().await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Re-reads the backing file.
    ///
    /// Returns `true` and notifies subscribers only when the content differs
    /// from what the store holds. A deleted file reads as defaults. A file
    /// that fails to parse leaves the current settings untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub async fn reload(&self) -> Result<bool, StoreError> {
        let fresh: Settings = match load_json(&self.path).await {
            Ok(settings) => settings,
            Err(e) if e.is_not_found() => Settings::default(),
            Err(e) => return Err(e),
        };

        {
            let mut settings = self.settings.write().await;
            if *settings == fresh {
                return Ok(false);
            }
            *settings = fresh;
        }

        info!(path = %self.path.display(), "Settings changed on disk");
        self.notify_change().await;
        Ok(true)
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        self.notify.send_replace(*version);
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Stores an API key; blank input clears it.
    pub async fn set_api_key(&self, key: Option<String>) {
        let key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self.update(|s| s.api_key = key).await;
    }

    /// Sets the refresh interval in minutes. Values are stored as given.
    pub async fn set_refresh_interval(&self, minutes: Option<i64>) {
        self.update(|s| s.refresh_interval_minutes = minutes).await;
    }

    /// Sets the endpoint schema.
    pub async fn set_schema(&self, schema: EndpointSchema) {
        self.update(|s| s.schema = schema).await;
    }

    /// Sets the low-credit threshold; `None` restores the schema default.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidSetting` for NaN or infinite values.
    pub async fn set_low_credit_threshold(&self, threshold: Option<f64>) -> Result<(), StoreError> {
        if let Some(value) = threshold {
            if !value.is_finite() {
                return Err(StoreError::InvalidSetting {
                    field: "low_credit_threshold",
                    reason: "must be a finite number".to_string(),
                });
            }
        }
        self.update(|s| s.low_credit_threshold = threshold).await;
        Ok(())
    }

    /// Restores every setting to its default.
    pub async fn reset(&self) {
        self.update(|s| *s = Settings::default()).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
