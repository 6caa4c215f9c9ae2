// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # keymeter Core
//!
//! Core types, models, and traits for keymeter.
//!
//! This crate provides the foundational abstractions used across all other
//! keymeter crates, including:
//!
//! - Domain models (credentials, usage snapshots, display state)
//! - The [`UsagePresenter`] that turns a snapshot into status text
//! - Error types
//! - Trait definitions for the host display collaborator
//!
//! ## Key Types
//!
//! ### Usage Types
//! - [`UsageSnapshot`] - One fetched, normalized usage reading
//! - [`PeriodUsage`] - Daily/weekly/monthly usage breakdown
//! - [`EndpointSchema`] - Which usage endpoint a snapshot came from
//!
//! ### Display Types
//! - [`DisplayState`] - Loading, no key, ready, or error
//! - [`Presentation`] - Short text, tooltip, and alert flag
//!
//! ### Host Traits
//! - [`StatusIndicator`] - Persistent status display
//! - [`Notifier`] - One-shot notification surface

pub mod error;
pub mod models;
pub mod presenter;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Credentials
    API_KEY_ENV,
    ApiKey,
    // Usage types
    EndpointSchema,
    PeriodUsage,
    UsageSnapshot,
    // Display
    DisplayState,
};

pub use presenter::{ALERT_INDICATOR, NEUTRAL_INDICATOR, Presentation, UsagePresenter};

// Re-export traits
pub use traits::{NoticeLevel, Notifier, StatusIndicator};
