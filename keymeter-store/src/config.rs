//! Refresh configuration resolution.
//!
//! Settings hold raw values. [`ConfigResolver`] layers the environment under
//! them and applies defaults, producing the [`RefreshConfig`] one refresh
//! cycle runs with.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use keymeter_core::{API_KEY_ENV, ApiKey, EndpointSchema};
use tracing::{debug, warn};

use crate::settings_store::{Settings, SettingsStore};

/// Refresh interval used when none is configured.
pub const DEFAULT_REFRESH_INTERVAL_MINUTES: u32 = 10;

// ============================================================================
// Refresh Config
// ============================================================================

/// Everything one refresh cycle needs.
///
/// Rebuilt from settings on every cycle and every change notification, so a
/// key is never held longer than one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    /// Minutes between timer ticks. `0` disables the timer.
    pub interval_minutes: u32,
    /// Resolved key, or `None` when neither settings nor environment has one.
    pub api_key: Option<ApiKey>,
    /// Endpoint to poll.
    pub schema: EndpointSchema,
    /// Alert threshold for the presenter.
    pub low_credit_threshold: f64,
}

impl RefreshConfig {
    /// Returns the timer period, or `None` if the timer is disabled.
    pub fn period(&self) -> Option<Duration> {
        (self.interval_minutes > 0)
            .then(|| Duration::from_secs(u64::from(self.interval_minutes) * 60))
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        let schema = EndpointSchema::default();
        Self {
            interval_minutes: DEFAULT_REFRESH_INTERVAL_MINUTES,
            api_key: None,
            schema,
            low_credit_threshold: schema.default_low_credit_threshold(),
        }
    }
}

/// Where the resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The settings file.
    Settings,
    /// The `OPENROUTER_API_KEY` environment variable.
    Environment,
    /// Nowhere.
    Missing,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Settings => write!(f, "settings"),
            KeySource::Environment => write!(f, "environment ({API_KEY_ENV})"),
            KeySource::Missing => write!(f, "not configured"),
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves [`RefreshConfig`] from settings and the environment.
pub struct ConfigResolver {
    settings: Arc<SettingsStore>,
    env: EnvLookup,
}

impl ConfigResolver {
    /// Creates a resolver reading the process environment.
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self::with_env(settings, |name| std::env::var(name).ok())
    }

    /// Creates a resolver with a custom environment lookup.
    pub fn with_env<F>(settings: Arc<SettingsStore>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            settings,
            env: Box::new(env),
        }
    }

    /// Returns the settings store this resolver reads.
    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Resolves the current configuration.
    pub async fn resolve(&self) -> RefreshConfig {
        let settings = self.settings.get().await;
        let (api_key, source) = self.resolve_key(&settings);
        let interval_minutes = resolve_interval(settings.refresh_interval_minutes);
        let low_credit_threshold = settings
            .low_credit_threshold
            .filter(|t| t.is_finite())
            .unwrap_or_else(|| settings.schema.default_low_credit_threshold());

        debug!(
            key_source = %source,
            interval_minutes,
            schema = %settings.schema,
            low_credit_threshold,
            "Resolved refresh config"
        );

        RefreshConfig {
            interval_minutes,
            api_key,
            schema: settings.schema,
            low_credit_threshold,
        }
    }

    /// Reports where the key would come from, without exposing it.
    pub async fn key_source(&self) -> KeySource {
        let settings = self.settings.get().await;
        self.resolve_key(&settings).1
    }

    fn resolve_key(&self, settings: &Settings) -> (Option<ApiKey>, KeySource) {
        if let Some(key) = settings.api_key.as_deref().and_then(ApiKey::parse) {
            return (Some(key), KeySource::Settings);
        }
        if let Some(key) = (self.env)(API_KEY_ENV).as_deref().and_then(ApiKey::parse) {
            return (Some(key), KeySource::Environment);
        }
        (None, KeySource::Missing)
    }
}

/// Applies the interval rules: unset is the default, `0` disables, negative
/// values clamp to `0`.
fn resolve_interval(raw: Option<i64>) -> u32 {
    match raw {
        None => DEFAULT_REFRESH_INTERVAL_MINUTES,
        Some(minutes) if minutes < 0 => {
            warn!(minutes, "Negative refresh interval, disabling the timer");
            0
        }
        Some(minutes) => u32::try_from(minutes).unwrap_or(u32::MAX),
    }
}
