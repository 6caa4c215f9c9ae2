//! API key credentials.

use std::fmt;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// An OpenRouter API key.
///
/// The value is opaque. `Debug` never prints it and there is no `Display`
/// impl, so a key cannot end up in a log line by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Parses a raw configured value.
    ///
    /// Surrounding whitespace is trimmed. Empty or whitespace-only input
    /// yields `None`, which callers treat as "no key configured".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the secret for use in an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns a masked form showing only the last four characters.
    pub fn redacted(&self) -> String {
        let tail: String = {
            let mut chars: Vec<char> = self.0.chars().rev().take(4).collect();
            chars.reverse();
            chars.into_iter().collect()
        };
        format!("****{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}
