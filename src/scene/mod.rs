//! The cube scene engine
//!
//! This module contains the scene model and everything it needs to turn
//! state changes into render instructions: the face enumeration, the
//! transform computation, the renderer seam and the demo tickers.

pub mod cube;
mod demo;
pub mod error;
pub mod face;
pub mod renderer;
pub mod set;
pub mod transform;

/// Identifier of a cube, unique within its owning set.
pub type CubeId = u32;

// Re-export commonly used items
pub use cube::{Cube, CubeEvent, CubeSnapshot, EventHandler};
pub use error::SceneError;
pub use face::{Face, FACE_ORDER};
pub use renderer::{ChannelRenderer, RenderInstruction, Renderer};
pub use set::{CubeSet, GroupAction};
pub use transform::{Axis, TransformSpec};
