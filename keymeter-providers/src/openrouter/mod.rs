//! OpenRouter usage endpoints.
//!
//! Authentication is a bearer API key; the same key works for both
//! endpoints.

mod api;
pub(crate) mod parser;

pub use api::{KeyInfoClient, OPENROUTER_BASE_URL};
pub use parser::{CreditsData, KeyData, SchemaResponse, parse_response, parse_snapshot};
