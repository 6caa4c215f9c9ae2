//! Usage endpoint variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which OpenRouter endpoint (and response shape) to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EndpointSchema {
    /// `GET /api/v1/credits`: account-wide `total_credits` and `total_usage`.
    #[default]
    Credits,
    /// `GET /api/v1/key`: per-key limit, remaining, and period usage.
    #[serde(rename = "key", alias = "key_info")]
    KeyInfo,
}

impl EndpointSchema {
    /// Returns the request path for this schema.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Credits => "/api/v1/credits",
            Self::KeyInfo => "/api/v1/key",
        }
    }

    /// Returns the low-credit threshold used when none is configured.
    pub fn default_low_credit_threshold(&self) -> f64 {
        match self {
            Self::Credits => 10.0,
            Self::KeyInfo => 20.0,
        }
    }

    /// Returns the tooltip label for the ceiling value.
    pub fn limit_label(&self) -> &'static str {
        match self {
            Self::Credits => "Total Credits",
            Self::KeyInfo => "Limit",
        }
    }

    /// Returns the name used in settings and on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Credits => "credits",
            Self::KeyInfo => "key",
        }
    }
}

impl fmt::Display for EndpointSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}

impl FromStr for EndpointSchema {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credits" => Ok(Self::Credits),
            "key" | "key_info" | "keyinfo" => Ok(Self::KeyInfo),
            other => Err(CoreError::UnknownSchema(other.to_string())),
        }
    }
}
