//! One-shot notification messages.
//!
//! Only user-initiated refreshes notify. Silent refreshes go to the status
//! indicator alone.

use keymeter_core::presenter::format_remaining;
use keymeter_core::{API_KEY_ENV, DisplayState, NoticeLevel, UsageSnapshot};

/// A notification ready to hand to a [`Notifier`](keymeter_core::Notifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

/// Builds the notification for the outcome of a manual refresh.
///
/// `Loading` never notifies; it is not an outcome.
pub fn notice_for(state: &DisplayState) -> Option<Notice> {
    let (level, message) = match state {
        DisplayState::Loading => return None,
        DisplayState::NoKey => (NoticeLevel::Warning, no_key_message()),
        DisplayState::Ready(snapshot) => (NoticeLevel::Info, success_message(snapshot)),
        DisplayState::Error(message) => (NoticeLevel::Error, error_message(message)),
    };
    Some(Notice { level, message })
}

/// `OpenRouter remaining: 195.0 / 200 (used 5.0)`
pub fn success_message(snapshot: &UsageSnapshot) -> String {
    let remaining = format_remaining(snapshot.remaining);
    let used = snapshot.used;
    match snapshot.limit {
        Some(limit) => format!("OpenRouter remaining: {remaining} / {limit} (used {used:.1})"),
        None => format!("OpenRouter remaining: {remaining} (used {used:.1})"),
    }
}

/// Warning shown when no key is configured anywhere.
pub fn no_key_message() -> String {
    format!(
        "OpenRouter Usage: no API key configured. Set api_key in settings or {API_KEY_ENV} env var."
    )
}

/// `OpenRouter Usage error: <message>`
pub fn error_message(message: &str) -> String {
    format!("OpenRouter Usage error: {message}")
}
