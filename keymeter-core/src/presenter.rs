//! Status text and tooltip rendering.
//!
//! The presenter is pure: it takes a [`UsageSnapshot`] (or a whole
//! [`DisplayState`]) and returns the strings a host shows. The low-credit
//! threshold is a parameter because the two endpoint schemas use different
//! defaults.

use chrono::Local;

use crate::models::{API_KEY_ENV, DisplayState, UsageSnapshot};

/// Indicator shown while credit is above the threshold.
pub const NEUTRAL_INDICATOR: &str = "💵";

/// Indicator shown at or below the threshold, and on errors.
pub const ALERT_INDICATOR: &str = "🚨";

/// Relative slack for the floor in [`truncate_tenths`], a few ulps.
///
/// Covers binary representation error (`2.3 * 10.0 == 22.999999999999996`)
/// without lifting a real balance such as `19.99999999995` to the next tenth.
const TRUNCATION_ULPS: f64 = 4.0 * f64::EPSILON;

// ============================================================================
// Presentation
// ============================================================================

/// Rendered output for a host status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// One-line status text, e.g. `💵 195.0/200$`.
    pub short_text: String,
    /// Multi-line detail text.
    pub tooltip: String,
    /// True when the host should highlight the indicator.
    pub alert: bool,
}

// ============================================================================
// Presenter
// ============================================================================

/// Formats snapshots and display states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsagePresenter {
    low_credit_threshold: f64,
}

impl UsagePresenter {
    /// Creates a presenter that alerts when remaining credit is at or below
    /// `low_credit_threshold`.
    pub fn new(low_credit_threshold: f64) -> Self {
        Self {
            low_credit_threshold,
        }
    }

    /// Returns the configured threshold.
    pub fn low_credit_threshold(&self) -> f64 {
        self.low_credit_threshold
    }

    /// Returns true if `remaining` is at or below the threshold.
    pub fn is_low(&self, remaining: f64) -> bool {
        remaining <= self.low_credit_threshold
    }

    /// Renders a successful snapshot.
    pub fn present(&self, snapshot: &UsageSnapshot) -> Presentation {
        let alert = self.is_low(snapshot.remaining);
        let indicator = if alert {
            ALERT_INDICATOR
        } else {
            NEUTRAL_INDICATOR
        };

        let remaining = format_remaining(snapshot.remaining);
        let short_text = match snapshot.limit {
            Some(limit) => format!("{indicator} {remaining}/{limit}$"),
            None => format!("{indicator} {remaining}$"),
        };

        Presentation {
            short_text,
            tooltip: self.tooltip(snapshot),
            alert,
        }
    }

    /// Renders the in-progress text shown while a keyed fetch runs.
    ///
    /// The display state is `Loading` in both cases; `present_state` gives
    /// the startup text, this gives the per-fetch one.
    pub fn present_fetching(&self) -> Presentation {
        Presentation {
            short_text: format!("{NEUTRAL_INDICATOR} ..."),
            tooltip: "Fetching OpenRouter usage...".to_string(),
            alert: false,
        }
    }

    /// Renders any display state.
    pub fn present_state(&self, state: &DisplayState) -> Presentation {
        match state {
            DisplayState::Loading => Presentation {
                short_text: format!("{NEUTRAL_INDICATOR} loading..."),
                tooltip: "OpenRouter usage".to_string(),
                alert: false,
            },
            DisplayState::NoKey => Presentation {
                short_text: format!("{NEUTRAL_INDICATOR} no key"),
                tooltip: format!("Set api_key in settings or {API_KEY_ENV} env var"),
                alert: false,
            },
            DisplayState::Ready(snapshot) => self.present(snapshot),
            DisplayState::Error(message) => Presentation {
                short_text: format!("{ALERT_INDICATOR} error"),
                tooltip: message.clone(),
                alert: true,
            },
        }
    }

    fn tooltip(&self, snapshot: &UsageSnapshot) -> String {
        let mut lines = vec!["OpenRouter key usage".to_string()];

        if let Some(label) = &snapshot.label {
            lines.push(format!("Key: {label}"));
        }
        if let Some(limit) = snapshot.limit {
            lines.push(format!(
                "{}: {}",
                snapshot.schema.limit_label(),
                format_amount(limit)
            ));
        }
        match &snapshot.limit_reset {
            Some(reset) if snapshot.limit.is_some() => {
                lines.push(format!("Used since {reset} reset: {}", format_amount(snapshot.used)));
            }
            _ => lines.push(format!("Used: {}", format_amount(snapshot.used))),
        }
        lines.push(format!("Remaining: {}", format_amount(snapshot.remaining)));

        if let Some(periods) = &snapshot.periods {
            if let Some(daily) = periods.daily {
                lines.push(format!("Used today: {}", format_amount(daily)));
            }
            if let Some(weekly) = periods.weekly {
                lines.push(format!("Used this week: {}", format_amount(weekly)));
            }
            if let Some(monthly) = periods.monthly {
                lines.push(format!("Used this month: {}", format_amount(monthly)));
            }
        }
        if let Some(reset) = &snapshot.limit_reset {
            lines.push(format!("Limit resets: {reset}"));
        }
        if let Some(free) = snapshot.is_free_tier {
            lines.push(format!("Free tier: {}", if free { "yes" } else { "no" }));
        }
        if self.is_low(snapshot.remaining) {
            lines.push(format!(
                "Low credit: at or below {}",
                format_amount(self.low_credit_threshold)
            ));
        }

        lines.push(format!(
            "Updated: {}",
            snapshot.fetched_at.with_timezone(&Local).format("%H:%M:%S")
        ));
        lines.join("\n")
    }
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Truncates toward negative infinity at one decimal place.
///
/// Never rounds up, so the displayed balance is never more than the real one.
pub fn truncate_tenths(value: f64) -> f64 {
    let scaled = value * 10.0;
    (scaled + scaled.abs() * TRUNCATION_ULPS).floor() / 10.0
}

/// Formats a remaining balance for the status text (`19.96` -> `19.9`).
pub fn format_remaining(value: f64) -> String {
    let truncated = truncate_tenths(value);
    // -0.0 would print as "-0.0"
    if truncated == 0.0 {
        return "0.0".to_string();
    }
    format!("{truncated:.1}")
}

/// Formats a tooltip amount with at most four decimals, trailing zeros
/// removed.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
