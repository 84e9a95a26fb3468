use serde_json::Value;

use crate::config::SearchConfig;

use super::error::FetchError;
use super::response::{normalize, ResultRecord};

/// Asynchronous client for the image-search feed.
///
/// Cloning is cheap; the underlying HTTP client shares its connection pool
/// across clones.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Query-string pairs for one search. The provider protocol pins the
    /// version, file type and safety flag; only `q` varies.
    fn query_params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("v", self.config.api_version.clone()),
            ("as_filetype", self.config.file_type.clone()),
            ("safe", self.config.safe_search.clone()),
            ("q", query.to_string()),
        ]
    }

    /// Fetches the raw response body for `query`.
    pub async fn fetch(&self, query: &str) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(FetchError::Transport)?;
        response.json::<Value>().await.map_err(FetchError::Decode)
    }

    /// Fetches and normalizes the results for `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<ResultRecord>, FetchError> {
        let body = self.fetch(query).await?;
        Ok(normalize(&body))
    }
}
