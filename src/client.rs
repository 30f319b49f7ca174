//! YesPlan API client.
//!
//! Low-level HTTP client that handles the `api_key` credential and raw GET
//! requests against `{base_url}/api/{endpoint}`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::error::{Result, YesplanError};
use crate::traits::Fetch;

/// Base URL of the YesPlan instance queried when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://neuf.yesplan.be";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "YESPLAN_API_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "YESPLAN_BASE_URL";
/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_PARAM: &str = "api_key";
const USER_AGENT: &str = concat!("yesplan/", env!("CARGO_PKG_VERSION"));

/// Low-level YesPlan API client.
///
/// The credential is passed explicitly and sent as the `api_key` query
/// parameter on every request. It always takes precedence over a caller
/// supplied parameter of the same name.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use yesplan::{Fetch, YesplanClient};
///
/// # async fn example() -> yesplan::Result<()> {
/// let client = YesplanClient::from_env()?;
/// let events = client.fetch("events", &[]).await?;
/// println!("{events}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct YesplanClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: String,
}

impl std::fmt::Debug for YesplanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YesplanClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl YesplanClient {
    /// Create a client from environment variables.
    ///
    /// Uses `YESPLAN_API_KEY` for authentication and optionally
    /// `YESPLAN_BASE_URL` for the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`YesplanError::ConfigMissing`] if `YESPLAN_API_KEY` is unset
    /// or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).ok();
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::new(&require_api_key(api_key)?, &base_url)
    }

    /// Create a client with the default 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        Self::with_timeout(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the base URL is invalid.
    pub fn with_timeout(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let api_key = require_api_key(Some(api_key.to_string()))?;

        // Ensure base URL ends with / so joins keep any path prefix
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(timeout)
            .build()
            .map_err(YesplanError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base_url}/api/{endpoint}`.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        if endpoint.is_empty() {
            return Err(YesplanError::InvalidEndpoint(endpoint.to_string()));
        }
        let path = format!("api/{}", urlencoding::encode(endpoint));
        Ok(self.base_url.join(&path)?)
    }

    /// Caller parameters followed by the credential. Any caller `api_key`
    /// is dropped.
    fn query_params<'a>(&'a self, params: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        let mut query: Vec<(&str, &str)> = params
            .iter()
            .filter(|(k, _)| *k != API_KEY_PARAM)
            .copied()
            .collect();
        if query.len() != params.len() {
            tracing::warn!("Ignoring caller supplied '{}' query parameter", API_KEY_PARAM);
        }
        query.push((API_KEY_PARAM, self.api_key.as_str()));
        query
    }

    /// Map the response status to a payload or a typed error.
    async fn check_response(endpoint: &str, response: Response) -> Result<Value> {
        let status = response.status();
        tracing::debug!(%status, "response received");

        match status.as_u16() {
            200 => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            401 => Err(YesplanError::Unauthorized {
                body: Self::read_body(response).await,
            }),
            404 => Err(YesplanError::NotFound {
                endpoint: endpoint.to_string(),
            }),
            status_code => Err(YesplanError::ApiError {
                message: Self::read_body(response).await,
                status_code,
            }),
        }
    }

    /// Raw body of a failed response.
    async fn read_body(response: Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(b) => b,
            Err(_) => format!("HTTP {status}"),
        }
    }
}

#[async_trait]
impl Fetch for YesplanClient {
    #[tracing::instrument(skip(self, params))]
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        let query = self.query_params(params);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .map_err(YesplanError::HttpError)?;

        let payload = Self::check_response(endpoint, response).await?;
        tracing::debug!("fetched {}", endpoint);
        Ok(payload)
    }
}

/// Reject a missing or empty credential.
fn require_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(YesplanError::ConfigMissing(format!(
            "{API_KEY_ENV} environment variable is required"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = YesplanClient::new("test-key", DEFAULT_BASE_URL).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("YesplanClient"));
        assert!(debug.contains("base_url"));
        // Key should not be in debug output
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = YesplanClient::new("key", "https://neuf.yesplan.be").unwrap();
        let client2 = YesplanClient::new("key", "https://neuf.yesplan.be/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_endpoint_url() {
        let client = YesplanClient::new("key", DEFAULT_BASE_URL).unwrap();
        let url = client.endpoint_url("events").unwrap();
        assert_eq!(url.as_str(), "https://neuf.yesplan.be/api/events");
    }

    #[test]
    fn test_endpoint_url_rejects_empty() {
        let client = YesplanClient::new("key", DEFAULT_BASE_URL).unwrap();
        assert!(matches!(
            client.endpoint_url(""),
            Err(YesplanError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_credential_wins_over_caller_param() {
        let client = YesplanClient::new("secret", DEFAULT_BASE_URL).unwrap();
        let query = client.query_params(&[("api_key", "other"), ("limit", "10")]);
        assert_eq!(query, vec![("limit", "10"), ("api_key", "secret")]);
    }

    #[test]
    fn test_missing_or_empty_key_is_config_error() {
        assert!(matches!(
            require_api_key(None),
            Err(YesplanError::ConfigMissing(_))
        ));
        assert!(matches!(
            YesplanClient::new("", DEFAULT_BASE_URL),
            Err(YesplanError::ConfigMissing(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            YesplanClient::new("key", "not a url"),
            Err(YesplanError::UrlError(_))
        ));
    }
}
