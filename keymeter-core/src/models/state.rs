//! Display state machine.

use serde::Serialize;

use super::usage::UsageSnapshot;

/// What the status indicator currently shows.
///
/// Exactly one state is active. Only a refresh cycle moves between states,
/// and the last cycle to finish wins.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum DisplayState {
    /// A fetch is in progress (or none has finished yet).
    #[default]
    Loading,
    /// No API key is configured. Not an error.
    NoKey,
    /// The last fetch succeeded.
    Ready(UsageSnapshot),
    /// The last fetch failed with this message.
    Error(String),
}

impl DisplayState {
    /// Returns the snapshot if the state is `Ready`.
    pub fn snapshot(&self) -> Option<&UsageSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Returns the error message if the state is `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Returns true for `Ready`.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Short state name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::NoKey => "no_key",
            Self::Ready(_) => "ready",
            Self::Error(_) => "error",
        }
    }
}
