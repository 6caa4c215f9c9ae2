//! Usage source trait.
//!
//! A source performs exactly one fetch per call. Retry policy, if any,
//! belongs to the caller.

use async_trait::async_trait;
use keymeter_core::{ApiKey, EndpointSchema, UsageSnapshot};

use crate::error::FetchError;

/// Something that can fetch a usage snapshot for an API key.
///
/// ## Implementing a Source
///
/// ```ignore
/// struct FixedSource(UsageSnapshot);
///
/// #[async_trait]
/// impl UsageSource for FixedSource {
///     fn id(&self) -> &str {
///         "fixed"
///     }
///
///     async fn fetch(&self, _key: &ApiKey, _schema: EndpointSchema)
///         -> Result<UsageSnapshot, FetchError>
///     {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait UsageSource: Send + Sync {
    /// Stable identifier for logs.
    fn id(&self) -> &str;

    /// Fetches one snapshot from the endpoint matching `schema`.
    async fn fetch(
        &self,
        key: &ApiKey,
        schema: EndpointSchema,
    ) -> Result<UsageSnapshot, FetchError>;
}
