use thiserror::Error;

/// Errors from one search fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("search request failed: {0}")]
    Transport(reqwest::Error),
    #[error("search response was not valid JSON: {0}")]
    Decode(reqwest::Error),
}
