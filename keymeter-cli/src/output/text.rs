//! Text output formatting with colors.

use keymeter_core::{NoticeLevel, Presentation};

use super::json::ConfigOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the status line alone, red when alerting.
    pub fn format_status_line(&self, presentation: &Presentation) -> String {
        if presentation.alert {
            self.red(&presentation.short_text)
        } else {
            self.bold(&presentation.short_text)
        }
    }

    /// Formats the status line followed by the tooltip.
    pub fn format_presentation(&self, presentation: &Presentation) -> String {
        let mut lines = vec![self.format_status_line(presentation)];
        lines.push("─".repeat(40));
        lines.extend(
            presentation
                .tooltip
                .lines()
                .filter(|line| !line.is_empty())
                .map(|line| self.format_tooltip_line(line)),
        );
        lines.join("\n")
    }

    fn format_tooltip_line(&self, line: &str) -> String {
        match line.split_once(": ") {
            Some((label, value)) => format!("{} {}", self.dim(&format!("{label}:")), value),
            None => line.to_string(),
        }
    }

    /// Formats a one-shot notification.
    pub fn format_notice(&self, level: NoticeLevel, message: &str) -> String {
        match level {
            NoticeLevel::Info => format!("{} {message}", self.green("✓")),
            NoticeLevel::Warning => format!("{} {message}", self.yellow("!")),
            NoticeLevel::Error => format!("{} {message}", self.red("✗")),
        }
    }

    /// Formats the effective configuration.
    pub fn format_config(&self, config: &ConfigOutput) -> String {
        let mut lines = vec![self.bold("keymeter Configuration"), "─".repeat(40), String::new()];

        let key = match &config.api_key {
            Some(redacted) => format!("{redacted} ({})", config.key_source),
            None => self.yellow("not configured"),
        };
        lines.push(format!("API key:        {key}"));

        let interval = if config.refresh_interval_minutes == 0 {
            self.dim("disabled")
        } else {
            format!("every {} min", config.refresh_interval_minutes)
        };
        lines.push(format!("Refresh:        {interval}"));
        lines.push(format!(
            "Endpoint:       {} {}",
            config.schema,
            self.dim(&format!("({})", config.endpoint))
        ));

        let threshold = if config.threshold_is_default {
            format!("{} {}", config.low_credit_threshold, self.dim("(default)"))
        } else {
            config.low_credit_threshold.to_string()
        };
        lines.push(format!("Low credit at:  {threshold}"));
        lines.push(format!("Log level:      {}", config.log_level));
        lines.push(String::new());
        lines.push(format!("Settings file:  {}", self.cyan(&config.settings_file)));

        lines.join("\n")
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub(crate) fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub(crate) fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

// ============================================================================
// Tests
// ============================================================================
