//! Transform computation
//!
//! The single place where model state (position + facing side) becomes a
//! render instruction. The computation is pure: the same state always yields
//! the same transform and the same CSS string.

use super::face::Face;

/// Rotation axis of a face rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The render instruction for one cube: a translation on all three axes
/// (with the world's base depth already folded into `z`) plus an optional
/// per-face rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSpec {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: Option<(Axis, f64)>,
}

impl TransformSpec {
    /// Compute the transform for a cube at `(x, y, z)` presenting `face`.
    ///
    /// Face rotations: front carries none, back flips -180 degrees about X,
    /// right and left swing -90/+90 degrees about Y, top and bottom pitch
    /// -90/+90 degrees about X.
    pub fn compute(x: f64, y: f64, z: f64, face: Face, base_depth: f64) -> Self {
        let rotation = match face {
            Face::Front => None,
            Face::Back => Some((Axis::X, -180.0)),
            Face::Right => Some((Axis::Y, -90.0)),
            Face::Left => Some((Axis::Y, 90.0)),
            Face::Top => Some((Axis::X, -90.0)),
            Face::Bottom => Some((Axis::X, 90.0)),
        };
        TransformSpec {
            x,
            y,
            z: base_depth + z,
            rotation,
        }
    }

    /// Render this as a CSS `transform` value.
    ///
    /// Translation order is Z, X, Y, followed by the face rotation when one
    /// applies.
    pub fn to_css(&self) -> String {
        let mut css = format!(
            "translateZ({}px) translateX({}px) translateY({}px)",
            self.z, self.x, self.y
        );
        if let Some((axis, degrees)) = self.rotation {
            let axis = match axis {
                Axis::X => "X",
                Axis::Y => "Y",
            };
            css.push_str(&format!(" rotate{}({}deg)", axis, degrees));
        }
        css
    }
}
