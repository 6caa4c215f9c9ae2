//! Domain models for keymeter.
//!
//! ## Submodules
//!
//! - [`credentials`] - The API key and where it may come from
//! - [`schema`] - The two usage endpoint variants
//! - [`usage`] - Normalized usage snapshots
//! - [`state`] - The display state machine

mod credentials;
mod schema;
mod state;
mod usage;

// Re-export everything at the models level
pub use credentials::{API_KEY_ENV, ApiKey};
pub use schema::EndpointSchema;
pub use state::DisplayState;
pub use usage::{PeriodUsage, UsageSnapshot};
