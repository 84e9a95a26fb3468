//! The six-face orientation enumeration
//!
//! A cube always presents exactly one of six symbolic faces. The faces form
//! a fixed cyclic order ([`FACE_ORDER`]) that `show_next_side`,
//! `show_prev_side` and the demo cycle all walk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six orientations a cube can present.
///
/// The wire form is the lowercase face name, which is also the class name of
/// the matching content region in the surface template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

/// Cyclic rotation order of the faces.
pub const FACE_ORDER: [Face; 6] = [
    Face::Front,
    Face::Back,
    Face::Left,
    Face::Right,
    Face::Top,
    Face::Bottom,
];

impl Face {
    /// Position of this face in [`FACE_ORDER`].
    fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Left => 2,
            Face::Right => 3,
            Face::Top => 4,
            Face::Bottom => 5,
        }
    }

    /// The face one step forward in the cycle, wrapping from the last back
    /// to the first.
    pub fn next(self) -> Face {
        FACE_ORDER[(self.index() + 1) % FACE_ORDER.len()]
    }

    /// The face one step backward in the cycle, wrapping from the first to
    /// the last.
    pub fn prev(self) -> Face {
        FACE_ORDER[(self.index() + FACE_ORDER.len() - 1) % FACE_ORDER.len()]
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        };
        f.write_str(name)
    }
}
