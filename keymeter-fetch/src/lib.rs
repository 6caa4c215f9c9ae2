// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # keymeter Fetch
//!
//! HTTP plumbing shared by usage sources.
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`error`] - The fetch error taxonomy (network, HTTP status, protocol)
//! - [`source`] - The [`UsageSource`] trait the refresh pipeline calls
//!
//! ## Example
//!
//! ```ignore
//! use keymeter_fetch::UsageSource;
//!
//! let snapshot = source.fetch(&api_key, EndpointSchema::Credits).await?;
//! ```

// Core modules
pub mod error;
pub mod host;
pub mod source;

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::http::{HttpClient, USER_AGENT};

// Sources
pub use source::UsageSource;
