//! Fetch trait for retrieving a collection payload.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::outcome::{FetchFailure, FetchOutcome};

/// Retrieve the JSON payload of a named collection.
///
/// [`YesplanClient`](crate::YesplanClient) is the HTTP implementation; the
/// harvester only depends on this trait.
///
/// # Example
///
/// ```ignore
/// use yesplan::{Fetch, YesplanClient};
///
/// let client = YesplanClient::from_env()?;
/// let outcome = client.fetch_outcome("events", &[("limit", "10")]).await;
/// ```
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch one collection.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Collection name, e.g. `events`
    /// * `params` - Extra query parameters
    ///
    /// # Errors
    ///
    /// Returns an error for any non-200 status, transport failure or a body
    /// that is not valid JSON.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value>;

    /// Fetch one collection, downgrading any error to a failed outcome.
    async fn fetch_outcome(&self, endpoint: &str, params: &[(&str, &str)]) -> FetchOutcome {
        match self.fetch(endpoint, params).await {
            Ok(payload) => FetchOutcome::Fetched(payload),
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "fetch failed");
                FetchOutcome::Failed(FetchFailure::from(e))
            }
        }
    }
}
