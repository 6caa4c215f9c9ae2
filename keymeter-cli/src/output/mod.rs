//! Output formatting for CLI.

mod json;
mod text;

pub use json::{ConfigOutput, JsonFormatter, StatusOutput};
pub use text::TextFormatter;
