//! JSON output formatting.

use anyhow::Result;
use keymeter_core::{DisplayState, Presentation};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output of one refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput<'a> {
    /// Tagged display state; `Ready` carries the full snapshot.
    #[serde(flatten)]
    pub state: &'a DisplayState,
    /// What a status indicator would show.
    pub display: DisplayOutput<'a>,
}

/// Rendered indicator text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOutput<'a> {
    pub text: &'a str,
    pub tooltip: &'a str,
    pub alert: bool,
}

impl<'a> StatusOutput<'a> {
    /// Pairs a state with its presentation.
    pub fn new(state: &'a DisplayState, presentation: &'a Presentation) -> Self {
        Self {
            state,
            display: DisplayOutput {
                text: &presentation.short_text,
                tooltip: &presentation.tooltip,
                alert: presentation.alert,
            },
        }
    }
}

/// Effective configuration, as `config show` reports it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    pub settings_file: String,
    /// Redacted key, never the secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub key_source: String,
    pub refresh_interval_minutes: u32,
    pub schema: String,
    pub endpoint: String,
    pub low_credit_threshold: f64,
    pub threshold_is_default: bool,
    pub log_level: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
