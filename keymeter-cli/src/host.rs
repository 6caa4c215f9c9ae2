//! Terminal implementations of the monitor's host traits.

use std::io::{Write, stderr, stdout};
use std::sync::Mutex;

use keymeter_core::{NoticeLevel, Notifier, Presentation, StatusIndicator};

use crate::output::TextFormatter;

// ============================================================================
// Status Indicators
// ============================================================================

/// Keeps the latest presentation for the caller to print once.
#[derive(Default)]
pub struct CaptureIndicator {
    last: Mutex<Option<Presentation>>,
}

impl CaptureIndicator {
    /// Returns the most recent presentation, if any.
    pub fn last(&self) -> Option<Presentation> {
        self.last.lock().ok().and_then(|p| p.clone())
    }
}

impl StatusIndicator for CaptureIndicator {
    fn update(&self, presentation: &Presentation) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(presentation.clone());
        }
    }
}

/// Redraws the whole screen on every update.
pub struct ScreenIndicator {
    formatter: TextFormatter,
    footer: String,
}

impl ScreenIndicator {
    /// Creates an indicator with a fixed footer line.
    pub fn new(formatter: TextFormatter, footer: impl Into<String>) -> Self {
        Self {
            formatter,
            footer: footer.into(),
        }
    }
}

impl StatusIndicator for ScreenIndicator {
    fn update(&self, presentation: &Presentation) {
        let mut out = stdout().lock();
        let _ = write!(out, "\x1b[2J\x1b[H");
        let _ = writeln!(out, "{}", self.formatter.format_presentation(presentation));
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.formatter.dim(&self.footer));
        let _ = out.flush();
    }
}

/// Prints one status line per update.
pub struct LineIndicator {
    formatter: TextFormatter,
}

impl LineIndicator {
    /// Creates a line indicator.
    pub fn new(formatter: TextFormatter) -> Self {
        Self { formatter }
    }
}

impl StatusIndicator for LineIndicator {
    fn update(&self, presentation: &Presentation) {
        let time = chrono::Local::now().format("%H:%M:%S");
        let mut out = stdout().lock();
        let _ = writeln!(
            out,
            "{} {}",
            self.formatter.dim(&format!("[{time}]")),
            self.formatter.format_status_line(presentation)
        );
        let _ = out.flush();
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Writes notifications to stderr.
pub struct StderrNotifier {
    formatter: TextFormatter,
    enabled: bool,
}

impl StderrNotifier {
    /// Creates a notifier. A disabled notifier drops every message.
    pub fn new(formatter: TextFormatter, enabled: bool) -> Self {
        Self { formatter, enabled }
    }
}

impl Notifier for StderrNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        if self.enabled {
            let _ = writeln!(stderr().lock(), "{}", self.formatter.format_notice(level, message));
        }
    }
}
