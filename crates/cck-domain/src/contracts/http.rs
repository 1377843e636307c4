//! Pre-configured HTTP API handle
//!
//! The composition layer does not construct HTTP transport itself; the host
//! application supplies a ready-made `ApiClient` which gets bound as a
//! constant value under `Http.Client`. Services that talk to the backing
//! API resolve it from the container.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// JSON API client bound behind the `Http.Client` token
///
/// Thin wrapper over `reqwest::Client` carrying the base URL the host
/// application configured. Cloning is cheap; the underlying connection
/// pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET a JSON document
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("GET {path}"), e))?;
        Self::decode(path, response).await
    }

    /// POST a JSON body, returning the JSON response
    pub async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("POST {path}"), e))?;
        Self::decode(path, response).await
    }

    /// PATCH a JSON body, returning the JSON response
    pub async fn patch_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value> {
        let response = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("PATCH {path}"), e))?;
        Self::decode(path, response).await
    }

    /// DELETE a resource, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("DELETE {path}"), e))?;
        response
            .error_for_status()
            .map_err(|e| Error::network_with_source(format!("DELETE {path}"), e))?;
        Ok(())
    }

    async fn decode(path: &str, response: reqwest::Response) -> Result<Value> {
        let response = response
            .error_for_status()
            .map_err(|e| Error::network_with_source(format!("request to {path}"), e))?;
        response
            .json()
            .await
            .map_err(|e| Error::network_with_source(format!("decoding response from {path}"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubling_slashes() {
        let client = ApiClient::new("https://api.example.com/");
        assert_eq!(client.url("/users/me"), "https://api.example.com/users/me");
    }
}
