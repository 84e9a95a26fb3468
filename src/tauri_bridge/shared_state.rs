//! Shared state structures for communication between Tauri and the scene
//!
//! This module defines the thread-safe handles the Tauri runtime manages and
//! hands to command handlers, plus the serializable views they return.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::config::{layout, SceneConfig};
use crate::scene::{CubeId, CubeSet, CubeSnapshot, Renderer};

// =============================================================================
// Scene
// =============================================================================

/// Thread-safe cube set shared between command handlers
#[derive(Clone)]
pub struct SharedScene(pub Arc<Mutex<CubeSet>>);

impl SharedScene {
    pub fn new(renderer: Arc<dyn Renderer>, config: SceneConfig) -> Self {
        Self(Arc::new(Mutex::new(CubeSet::new(renderer, config))))
    }
}

// =============================================================================
// Row Cursor
// =============================================================================

/// Depth cursor for search rows.
///
/// Every search claims the current depth when it is issued and pushes the
/// cursor one row spacing away from the viewer, whether or not the search
/// produces results.
#[derive(Debug)]
pub struct RowCursor {
    next_z: f64,
}

impl Default for RowCursor {
    fn default() -> Self {
        Self {
            next_z: layout::ROW_START_Z,
        }
    }
}

impl RowCursor {
    /// Claims the current row depth and moves the cursor one spacing out.
    pub fn advance(&mut self) -> f64 {
        let z = self.next_z;
        self.next_z += layout::ROW_SPACING;
        z
    }
}

/// Thread-safe row cursor shared between search commands
#[derive(Clone, Default)]
pub struct SharedRowCursor(pub Arc<Mutex<RowCursor>>);

// =============================================================================
// Command Responses
// =============================================================================

/// Read model of the whole scene, for webview rebuilds
#[derive(Serialize)]
pub struct SceneSnapshot {
    pub cubes: Vec<CubeSnapshot>,
}

/// Summary of one handled search
#[derive(Serialize)]
pub struct SearchSummary {
    pub query: String,
    /// Ids of the cubes the search created, in row order.
    pub created: Vec<CubeId>,
    /// Scene population after the row was added.
    pub total_cubes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_row_cursor_claims_then_advances_by_one_spacing() {
        let mut cursor = RowCursor::default();
        assert_eq!(cursor.advance(), layout::ROW_START_Z);
        assert_eq!(cursor.advance(), layout::ROW_START_Z + layout::ROW_SPACING);
        assert_eq!(
            cursor.advance(),
            layout::ROW_START_Z + 2.0 * layout::ROW_SPACING
        );
    }
}
