//! Cube set: ownership and group actions
//!
//! The set owns every cube in the scene. Cubes are created and destroyed
//! through it, and group actions fan one operation out over all members in
//! insertion order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;

use super::cube::{Cube, CubeSnapshot};
use super::error::SceneError;
use super::face::Face;
use super::renderer::Renderer;
use super::CubeId;

/// First id handed out when the caller lets the set pick one.
const AUTO_ID_BASE: CubeId = 1000;

/// One operation applied to every cube in the set.
///
/// The wire form is tagged with `op`, so the webview sends e.g.
/// `{"op": "move_by", "x": 100}` or `{"op": "set_face", "side": "top"}`.
/// Unknown operations and unknown face names are rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GroupAction {
    MoveBy {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    SetFace {
        side: Face,
    },
    ShowNextSide,
    ShowPrevSide,
    DemoStart,
    DemoStop,
}

/// Owning collection of cubes sharing one renderer and one configuration.
pub struct CubeSet {
    cubes: Vec<Cube>,
    renderer: Arc<dyn Renderer>,
    config: SceneConfig,
    next_auto_id: CubeId,
}

impl CubeSet {
    pub fn new(renderer: Arc<dyn Renderer>, config: SceneConfig) -> Self {
        Self {
            cubes: Vec::new(),
            renderer,
            config,
            next_auto_id: AUTO_ID_BASE,
        }
    }

    /// Creates a cube and adds it to the set. With `id` as `None` the set
    /// picks the next free automatic id.
    pub fn create_new(
        &mut self,
        id: Option<CubeId>,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Cube, SceneError> {
        let id = match id {
            Some(id) => {
                if self.find(id).is_some() {
                    return Err(SceneError::DuplicateId(id));
                }
                id
            }
            None => self.allocate_id(),
        };
        let cube = Cube::create(id, x, y, z, Arc::clone(&self.renderer), &self.config);
        self.cubes.push(cube.clone());
        Ok(cube)
    }

    fn allocate_id(&mut self) -> CubeId {
        let mut id = self.next_auto_id;
        while self.find(id).is_some() {
            id += 1;
        }
        self.next_auto_id = id + 1;
        id
    }

    /// Cheap handle onto the cube with `id`, if the set holds one.
    pub fn find(&self, id: CubeId) -> Option<Cube> {
        self.cubes.iter().find(|cube| cube.id() == id).cloned()
    }

    /// Applies `action` to every cube in insertion order and returns how
    /// many cubes it reached. An empty set is a no-op.
    pub fn perform_group_action(&self, action: &GroupAction) -> usize {
        for cube in &self.cubes {
            match action {
                GroupAction::MoveBy { x, y, z } => cube.move_by(*x, *y, *z),
                GroupAction::SetFace { side } => cube.set_face(*side),
                GroupAction::ShowNextSide => cube.show_next_side(),
                GroupAction::ShowPrevSide => cube.show_prev_side(),
                GroupAction::DemoStart => cube.start_demo(),
                GroupAction::DemoStop => cube.stop_demo(),
            }
        }
        self.cubes.len()
    }

    /// Destroys the cube with `id` and drops it from the set. Returns
    /// whether a cube was removed.
    pub fn destroy_cube(&mut self, id: CubeId) -> bool {
        match self.cubes.iter().position(|cube| cube.id() == id) {
            Some(index) => {
                let cube = self.cubes.remove(index);
                cube.destroy();
                true
            }
            None => false,
        }
    }

    /// Read model of every cube, in insertion order.
    pub fn snapshot(&self) -> Vec<CubeSnapshot> {
        self.cubes.iter().map(Cube::snapshot).collect()
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}
