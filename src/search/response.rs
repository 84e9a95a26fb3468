//! Response envelope normalization
//!
//! The feed wraps its payload in `{"responseStatus": ..., "responseData":
//! {"results": [...]}}`. [`normalize`] turns that envelope into a flat list
//! of [`ResultRecord`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status the provider reports inside the JSON body on success.
const STATUS_OK: i64 = 200;

/// One normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Direct link to the image file.
    #[serde(default)]
    pub url: String,
    /// Title of the page the image appears on.
    #[serde(default)]
    pub title: String,
    /// Snippet of the surrounding page text.
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    response_status: Option<i64>,
    response_data: Option<EnvelopeData>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    results: Vec<ResultRecord>,
}

/// Extracts the result list from a provider response body.
///
/// Anything other than a well-formed envelope carrying status 200
/// normalizes to an empty list: bad status, missing payload and malformed
/// bodies all yield no results rather than an error.
pub fn normalize(body: &Value) -> Vec<ResultRecord> {
    let envelope: Envelope = match serde_json::from_value(body.clone()) {
        Ok(envelope) => envelope,
        Err(_) => return Vec::new(),
    };
    if envelope.response_status != Some(STATUS_OK) {
        return Vec::new();
    }
    envelope
        .response_data
        .map(|data| data.results)
        .unwrap_or_default()
}
