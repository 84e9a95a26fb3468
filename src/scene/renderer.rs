//! The renderer seam
//!
//! The scene model never touches the visual surface directly. Every surface
//! mutation goes through the [`Renderer`] trait as one [`RenderInstruction`],
//! emitted the instant the model mutates (no batching, no deferral). The
//! production implementation forwards instructions into a channel that the
//! app shell drains toward the webview; tests drain the same channel.

use crossbeam_channel::Sender;
use serde::Serialize;

use super::face::Face;
use super::transform::TransformSpec;
use super::CubeId;

/// One operation applied to a cube's visual element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Clone the cube template into the world under `id`.
    Spawn { id: CubeId },
    /// Set the element's CSS `transform`.
    Transform { id: CubeId, css: String },
    /// Replace the content region of one face.
    FaceContent { id: CubeId, face: Face, html: String },
    /// Toggle transparency of the non-facing sides.
    Backsides { id: CubeId, visible: bool },
    /// Toggle the hover highlight.
    Highlight { id: CubeId, on: bool },
    /// Detach the element from the world.
    Remove { id: CubeId },
}

/// Rendering sink for the scene model.
pub trait Renderer: Send + Sync {
    fn spawn_element(&self, id: CubeId);
    fn apply_transform(&self, id: CubeId, spec: &TransformSpec);
    fn set_face_content(&self, id: CubeId, face: Face, html: &str);
    fn set_backsides_visible(&self, id: CubeId, visible: bool);
    fn set_highlighted(&self, id: CubeId, on: bool);
    fn remove_element(&self, id: CubeId);
}

/// Production renderer: sends each instruction into a crossbeam channel.
///
/// The receiver side is drained by the webview forwarder (or by a test).
/// A disconnected receiver means the surface is gone; instructions are then
/// dropped and the model keeps operating.
pub struct ChannelRenderer {
    tx: Sender<RenderInstruction>,
}

impl ChannelRenderer {
    pub fn new(tx: Sender<RenderInstruction>) -> Self {
        Self { tx }
    }

    fn send(&self, instruction: RenderInstruction) {
        let _ = self.tx.send(instruction);
    }
}

impl Renderer for ChannelRenderer {
    fn spawn_element(&self, id: CubeId) {
        self.send(RenderInstruction::Spawn { id });
    }

    fn apply_transform(&self, id: CubeId, spec: &TransformSpec) {
        self.send(RenderInstruction::Transform {
            id,
            css: spec.to_css(),
        });
    }

    fn set_face_content(&self, id: CubeId, face: Face, html: &str) {
        self.send(RenderInstruction::FaceContent {
            id,
            face,
            html: html.to_string(),
        });
    }

    fn set_backsides_visible(&self, id: CubeId, visible: bool) {
        self.send(RenderInstruction::Backsides { id, visible });
    }

    fn set_highlighted(&self, id: CubeId, on: bool) {
        self.send(RenderInstruction::Highlight { id, on });
    }

    fn remove_element(&self, id: CubeId) {
        self.send(RenderInstruction::Remove { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Axis;

    #[test]
    fn instructions_arrive_in_emission_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let renderer = ChannelRenderer::new(tx);

        renderer.spawn_element(7);
        let spec = TransformSpec {
            x: 1.0,
            y: 2.0,
            z: -300.0,
            rotation: Some((Axis::Y, 90.0)),
        };
        renderer.apply_transform(7, &spec);
        renderer.remove_element(7);

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            seen,
            vec![
                RenderInstruction::Spawn { id: 7 },
                RenderInstruction::Transform {
                    id: 7,
                    css: spec.to_css(),
                },
                RenderInstruction::Remove { id: 7 },
            ]
        );
    }

    #[test]
    fn wire_form_is_tagged_snake_case() {
        let json = serde_json::to_value(RenderInstruction::FaceContent {
            id: 3,
            face: Face::Top,
            html: "<h2>hi</h2>".to_string(),
        })
        .unwrap();
        assert_eq!(json["op"], "face_content");
        assert_eq!(json["face"], "top");
        assert_eq!(json["html"], "<h2>hi</h2>");
    }

    #[test]
    fn dropped_receiver_does_not_panic_the_sender() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let renderer = ChannelRenderer::new(tx);
        renderer.spawn_element(1);
        renderer.set_highlighted(1, true);
    }
}
