//! Host collaborator traits.
//!
//! The monitor engine never talks to a UI directly. A host (the CLI, an
//! editor extension, a tray app) implements these traits and hands them to
//! the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::presenter::Presentation;

/// Severity of a one-shot notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Successful manual refresh.
    Info,
    /// Nothing failed, but the user has to act (e.g. no API key).
    Warning,
    /// The refresh failed.
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A persistent status display (status bar item, tray title, terminal line).
///
/// Receives every display state change, including silent refreshes.
pub trait StatusIndicator: Send + Sync {
    /// Replaces the current text and tooltip.
    fn update(&self, presentation: &Presentation);
}

/// A surface for one-shot messages.
///
/// Only user-initiated refreshes produce notifications.
pub trait Notifier: Send + Sync {
    /// Shows a single message at the given level.
    fn notify(&self, level: NoticeLevel, message: &str);
}
