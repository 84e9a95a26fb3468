//! Configuration constants and settings for the cube gallery
//!
//! This module contains all configurable parameters such as world geometry,
//! demo timing, row layout and the search feed endpoint, plus the immutable
//! config structs handed to constructors so nothing reads ambient globals.

use std::time::Duration;

/// Depth baseline added to every cube's z coordinate at render time (px)
pub const BASE_DEPTH: f64 = -300.0;

/// Edge length of the cube template's face region (px)
pub const CUBE_SIZE: f64 = 200.0;

/// Interval between face advances while a demo cycle runs (ms)
pub const DEMO_INTERVAL_MS: u64 = 1000;

/// Row layout for search results
pub mod layout {
    /// X coordinate of the first cube in a row (px)
    pub const ROW_START_X: f64 = 0.0;

    /// Y coordinate of every search row (px); the webview may override it
    /// with half its viewport height
    pub const ROW_START_Y: f64 = 300.0;

    /// Z coordinate of the first search row (px)
    pub const ROW_START_Z: f64 = -300.0;

    /// Spacing between cubes in a row, and between rows on the z axis (px)
    pub const ROW_SPACING: f64 = 300.0;
}

/// Image-search provider settings
pub mod search {
    /// Endpoint queried once per search
    pub const ENDPOINT: &str = "https://ajax.googleapis.com/ajax/services/search/images";

    /// Provider protocol version sent as `v`
    pub const API_VERSION: &str = "1.0";

    /// Fixed file-type filter sent as `as_filetype`
    pub const FILE_TYPE: &str = "jpg";

    /// Fixed safety flag sent as `safe`
    pub const SAFE_SEARCH: &str = "active";
}

/// Immutable scene parameters passed to [`crate::scene::CubeSet::new`].
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Depth baseline applied to every transform.
    pub base_depth: f64,
    /// Width and height cached on each cube at creation.
    pub cube_size: f64,
    /// Tick interval of the autonomous demo cycle.
    pub demo_interval: Duration,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base_depth: BASE_DEPTH,
            cube_size: CUBE_SIZE,
            demo_interval: Duration::from_millis(DEMO_INTERVAL_MS),
        }
    }
}

/// Immutable search parameters passed to [`crate::search::SearchClient::new`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_version: String,
    pub file_type: String,
    pub safe_search: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: search::ENDPOINT.to_string(),
            api_version: search::API_VERSION.to_string(),
            file_type: search::FILE_TYPE.to_string(),
            safe_search: search::SAFE_SEARCH.to_string(),
        }
    }
}
