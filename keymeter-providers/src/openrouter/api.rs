//! OpenRouter API client.

use async_trait::async_trait;
use keymeter_core::{ApiKey, EndpointSchema, UsageSnapshot};
use keymeter_fetch::{FetchError, HttpClient, USER_AGENT, UsageSource};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use tracing::{debug, instrument, warn};

use super::parser::parse_snapshot;

// ============================================================================
// Constants
// ============================================================================

/// OpenRouter API base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai";

/// Domain the default client is restricted to.
const OPENROUTER_DOMAIN: &str = "openrouter.ai";

// ============================================================================
// API Client
// ============================================================================

/// Fetches key usage from OpenRouter.
///
/// Each call makes exactly one request and buffers the whole body before
/// parsing. There are no retries.
#[derive(Debug, Clone)]
pub struct KeyInfoClient {
    http: HttpClient,
    base_url: String,
}

impl KeyInfoClient {
    /// Creates a client for `https://openrouter.ai`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        let http = HttpClient::new()?.with_allowed_domains(vec![OPENROUTER_DOMAIN.to_string()]);
        Ok(Self {
            http,
            base_url: OPENROUTER_BASE_URL.to_string(),
        })
    }

    /// Creates a client for a custom base URL (a proxy or a test server).
    ///
    /// The domain allowlist is not applied.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: HttpClient::new()?,
            base_url,
        })
    }

    /// Returns the base URL requests go to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full endpoint URL for a schema.
    pub fn endpoint(&self, schema: EndpointSchema) -> String {
        format!("{}{}", self.base_url, schema.path())
    }

    /// Build request headers.
    fn build_headers(key: &ApiKey) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", key.expose()))
            .map_err(|_| {
                FetchError::InvalidRequest("API key contains invalid header characters".to_string())
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Fetches and normalizes one snapshot.
    ///
    /// # Errors
    ///
    /// - `FetchError::Network` on connection or transport failure
    /// - `FetchError::Http` on a non-2xx status
    /// - `FetchError::Protocol` on an unparseable or incomplete body
    #[instrument(skip(self, key), fields(schema = %schema))]
    pub async fn fetch_snapshot(
        &self,
        key: &ApiKey,
        schema: EndpointSchema,
    ) -> Result<UsageSnapshot, FetchError> {
        let url = self.endpoint(schema);
        debug!(url = %url, "Fetching OpenRouter usage");

        let headers = Self::build_headers(key)?;
        let response = self.http.get_with_headers(&url, headers).await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "OpenRouter returned an error status");
            return Err(FetchError::http(status.as_u16(), &body));
        }

        let snapshot = parse_snapshot(schema, &body).inspect_err(|e| {
            warn!(error = %e, "Failed to parse OpenRouter response");
        })?;

        debug!(
            remaining = snapshot.remaining,
            used = snapshot.used,
            "Fetched OpenRouter usage"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl UsageSource for KeyInfoClient {
    fn id(&self) -> &str {
        "openrouter.api"
    }

    async fn fetch(
        &self,
        key: &ApiKey,
        schema: EndpointSchema,
    ) -> Result<UsageSnapshot, FetchError> {
        self.fetch_snapshot(key, schema).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> ApiKey {
        ApiKey::parse("sk-or-v1-test").unwrap()
    }

    async fn client_for(server: &MockServer) -> KeyInfoClient {
        KeyInfoClient::with_base_url(server.uri()).unwrap()
    }

    #[test]
    fn test_default_endpoint() {
        let client = KeyInfoClient::new().unwrap();
        assert_eq!(
            client.endpoint(EndpointSchema::Credits),
            "https://openrouter.ai/api/v1/credits"
        );
        assert_eq!(client.endpoint(EndpointSchema::KeyInfo), "https://openrouter.ai/api/v1/key");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = KeyInfoClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.endpoint(EndpointSchema::KeyInfo), "http://localhost:8080/api/v1/key");
    }

    #[test]
    fn test_invalid_key_characters() {
        let key = ApiKey::parse("bad\nkey").unwrap();
        assert!(matches!(
            KeyInfoClient::build_headers(&key),
            Err(FetchError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_credits_sends_auth_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/credits"))
            .and(header("authorization", "Bearer sk-or-v1-test"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data": {"total_credits": 50, "total_usage": 12.34}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client_for(&server)
            .await
            .fetch(&key(), EndpointSchema::Credits)
            .await
            .unwrap();
        assert_eq!(snapshot.limit, Some(50.0));
        assert!((snapshot.remaining - 37.66).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_key_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data": {"limit": 200, "limit_remaining": 195.0116, "usage": 4.9884}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client_for(&server)
            .await
            .fetch(&key(), EndpointSchema::KeyInfo)
            .await
            .unwrap();
        assert_eq!(snapshot.schema, EndpointSchema::KeyInfo);
        assert!((snapshot.remaining - 195.0116).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_401_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"error":{"message":"No auth credentials found","code":401}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch(&key(), EndpointSchema::Credits)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch(&key(), EndpointSchema::Credits)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_fetch_missing_data_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result": {}}"#))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch(&key(), EndpointSchema::KeyInfo)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on port 1.
        let client = KeyInfoClient::with_base_url("http://127.0.0.1:1").unwrap();
        let err = client.fetch(&key(), EndpointSchema::Credits).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
