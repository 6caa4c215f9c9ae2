//! OpenRouter response parser.
//!
//! Both endpoints wrap their payload in a top-level `data` object. The
//! payload is decoded into the schema-specific type, then normalized into a
//! [`UsageSnapshot`].

use keymeter_core::{CoreError, EndpointSchema, PeriodUsage, UsageSnapshot};
use keymeter_fetch::FetchError;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Payload of `GET /api/v1/credits`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreditsData {
    /// Credits purchased.
    pub total_credits: f64,
    /// Credits spent.
    pub total_usage: f64,
}

/// Payload of `GET /api/v1/key`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyData {
    /// Key label (a masked form of the key unless renamed).
    #[serde(default)]
    pub label: Option<String>,
    /// Spending limit; `null` for unlimited keys.
    #[serde(default)]
    pub limit: Option<f64>,
    /// Remaining balance under the limit.
    #[serde(default)]
    pub limit_remaining: Option<f64>,
    /// Lifetime usage.
    pub usage: f64,
    /// Usage today (UTC).
    #[serde(default)]
    pub usage_daily: Option<f64>,
    /// Usage this week (UTC).
    #[serde(default)]
    pub usage_weekly: Option<f64>,
    /// Usage this month (UTC).
    #[serde(default)]
    pub usage_monthly: Option<f64>,
    /// Whether the account is on the free tier.
    #[serde(default)]
    pub is_free_tier: Option<bool>,
    /// Limit reset period (`daily`, `weekly`, `monthly`), if any.
    #[serde(default)]
    pub limit_reset: Option<String>,
}

/// A decoded response, tagged by the schema it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaResponse {
    /// Account credits.
    Credits(CreditsData),
    /// Per-key info.
    KeyInfo(KeyData),
}

impl SchemaResponse {
    /// Normalizes into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if the figures violate the snapshot
    /// invariants (no balance at all, non-finite numbers).
    pub fn into_snapshot(self) -> Result<UsageSnapshot, CoreError> {
        match self {
            Self::Credits(data) => UsageSnapshot::new(
                EndpointSchema::Credits,
                Some(data.total_credits),
                data.total_usage,
                None,
            ),
            Self::KeyInfo(data) => {
                let periods = PeriodUsage {
                    daily: data.usage_daily,
                    weekly: data.usage_weekly,
                    monthly: data.usage_monthly,
                };
                // `usage` is lifetime; a resetting limit only counts the
                // current period.
                let used = match (data.limit, data.limit_reset.as_deref()) {
                    (Some(_), Some(reset)) => periods.for_reset(reset).unwrap_or(data.usage),
                    _ => data.usage,
                };
                let mut snapshot = UsageSnapshot::new(
                    EndpointSchema::KeyInfo,
                    data.limit,
                    used,
                    data.limit_remaining,
                )?
                .with_label(data.label)
                .with_limit_reset(data.limit_reset)
                .with_free_tier(data.is_free_tier);
                if !periods.is_empty() {
                    snapshot = snapshot.with_periods(periods);
                }
                Ok(snapshot)
            }
        }
    }
}

/// Decodes a response body for the given schema.
///
/// # Errors
///
/// Returns `FetchError::Protocol` if the body is not JSON, has no `data`
/// object, or `data` lacks required fields.
pub fn parse_response(schema: EndpointSchema, body: &str) -> Result<SchemaResponse, FetchError> {
    debug!(len = body.len(), schema = %schema, "Parsing OpenRouter response");

    let envelope: Envelope = serde_json::from_str(body)?;
    let data = envelope
        .data
        .filter(|d| !d.is_null())
        .ok_or_else(|| FetchError::Protocol("'data' field missing".to_string()))?;

    let invalid = |e: serde_json::Error| FetchError::Protocol(format!("invalid 'data' object: {e}"));

    match schema {
        EndpointSchema::Credits => serde_json::from_value(data)
            .map(SchemaResponse::Credits)
            .map_err(invalid),
        EndpointSchema::KeyInfo => serde_json::from_value(data)
            .map(SchemaResponse::KeyInfo)
            .map_err(invalid),
    }
}

/// Decodes and normalizes in one step.
///
/// # Errors
///
/// Returns `FetchError::Protocol` for any decoding or normalization failure.
pub fn parse_snapshot(schema: EndpointSchema, body: &str) -> Result<UsageSnapshot, FetchError> {
    Ok(parse_response(schema, body)?.into_snapshot()?)
}
