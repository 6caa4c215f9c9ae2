//! Usage-related types.
//!
//! This module contains types related to usage tracking:
//! - [`UsageSnapshot`] - One normalized reading from either endpoint
//! - [`PeriodUsage`] - Usage split by day, week, and month

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::EndpointSchema;
use crate::error::CoreError;

// ============================================================================
// Usage Snapshot
// ============================================================================

/// One successful fetch, normalized across endpoint schemas.
///
/// Build with [`UsageSnapshot::new`], which enforces the balance invariant:
/// when a limit is known, `remaining` is always `limit - used`; otherwise the
/// remaining figure reported by the endpoint is taken as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Endpoint this snapshot was fetched from.
    pub schema: EndpointSchema,
    /// Credit ceiling, if the account or key has one.
    pub limit: Option<f64>,
    /// Credits used.
    pub used: f64,
    /// Credits remaining.
    pub remaining: f64,
    /// Reset period of the key limit (e.g. "monthly").
    pub limit_reset: Option<String>,
    /// Usage broken down by period.
    pub periods: Option<PeriodUsage>,
    /// Whether the key belongs to a free-tier account.
    pub is_free_tier: Option<bool>,
    /// Human-readable key label.
    pub label: Option<String>,
    /// When this snapshot was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl UsageSnapshot {
    /// Creates a snapshot from the raw balance figures.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if neither a limit nor a reported
    /// remaining balance is available, or if any figure is not finite.
    pub fn new(
        schema: EndpointSchema,
        limit: Option<f64>,
        used: f64,
        reported_remaining: Option<f64>,
    ) -> Result<Self, CoreError> {
        let remaining = match (limit, reported_remaining) {
            (Some(limit), _) => limit - used,
            (None, Some(remaining)) => remaining,
            (None, None) => {
                return Err(CoreError::InvalidData(
                    "response carries neither a limit nor a remaining balance".to_string(),
                ));
            }
        };

        let snapshot = Self {
            schema,
            limit,
            used,
            remaining,
            limit_reset: None,
            periods: None,
            is_free_tier: None,
            label: None,
            fetched_at: Utc::now(),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Sets the period breakdown.
    #[must_use]
    pub fn with_periods(mut self, periods: PeriodUsage) -> Self {
        self.periods = Some(periods);
        self
    }

    /// Sets the limit reset period.
    #[must_use]
    pub fn with_limit_reset(mut self, reset: Option<String>) -> Self {
        self.limit_reset = reset.filter(|r| !r.trim().is_empty());
        self
    }

    /// Sets the free-tier flag.
    #[must_use]
    pub fn with_free_tier(mut self, is_free_tier: Option<bool>) -> Self {
        self.is_free_tier = is_free_tier;
        self
    }

    /// Sets the key label.
    #[must_use]
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label.filter(|l| !l.trim().is_empty());
        self
    }

    /// Validates the snapshot figures.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if any balance figure is NaN or
    /// infinite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.used.is_finite() {
            return Err(CoreError::InvalidData("used is not a finite number".to_string()));
        }
        if !self.remaining.is_finite() {
            return Err(CoreError::InvalidData(
                "remaining is not a finite number".to_string(),
            ));
        }
        if self.limit.is_some_and(|l| !l.is_finite()) {
            return Err(CoreError::InvalidData("limit is not a finite number".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Period Usage
// ============================================================================

/// Usage split by calendar period (UTC).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodUsage {
    /// Usage today.
    pub daily: Option<f64>,
    /// Usage this week.
    pub weekly: Option<f64>,
    /// Usage this month.
    pub monthly: Option<f64>,
}

impl PeriodUsage {
    /// Returns true if no period figure is present.
    pub fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none() && self.monthly.is_none()
    }

    /// Returns the usage for a `limit_reset` period name (`daily`, `weekly`,
    /// `monthly`), if that figure is present.
    pub fn for_reset(&self, reset: &str) -> Option<f64> {
        match reset.trim().to_ascii_lowercase().as_str() {
            "daily" => self.daily,
            "weekly" => self.weekly,
            "monthly" => self.monthly,
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
