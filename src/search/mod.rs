//! Image-search feed
//!
//! A thin asynchronous client for the legacy image-search endpoint plus the
//! normalization of its response envelope. The provider reports success in
//! the body (`responseStatus`), not on the HTTP layer; every degraded shape
//! normalizes to an empty result list.

pub mod client;
pub mod error;
pub mod response;

pub use client::SearchClient;
pub use error::FetchError;
pub use response::{normalize, ResultRecord};
