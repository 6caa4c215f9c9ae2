// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # keymeter Providers
//!
//! Endpoint implementations for keymeter.
//!
//! The [`openrouter`] module talks to the two OpenRouter usage endpoints:
//!
//! | Schema | Path | Balance fields |
//! |--------|------|----------------|
//! | `credits` | `/api/v1/credits` | `total_credits`, `total_usage` |
//! | `key` | `/api/v1/key` | `limit`, `limit_remaining`, `usage`, period usage |
//!
//! Both responses are normalized into one
//! [`UsageSnapshot`](keymeter_core::UsageSnapshot).
//!
//! ## Usage
//!
//! ```ignore
//! use keymeter_providers::KeyInfoClient;
//! use keymeter_fetch::UsageSource;
//!
//! let client = KeyInfoClient::new()?;
//! let snapshot = client.fetch(&api_key, EndpointSchema::KeyInfo).await?;
//! ```

pub mod openrouter;

pub use openrouter::{
    CreditsData, KeyData, KeyInfoClient, OPENROUTER_BASE_URL, SchemaResponse, parse_response,
    parse_snapshot,
};
#[cfg(test)]
mod parser_edge_tests;
