//! Render event forwarding
//!
//! The scene emits render instructions into a channel; a forwarder thread
//! drains the channel and re-emits each instruction as a Tauri event the
//! webview listens for.

use crossbeam_channel::Receiver;
use tauri::{AppHandle, Emitter};

use crate::scene::RenderInstruction;

/// Event name the webview subscribes to.
pub const SCENE_RENDER_EVENT: &str = "scene://render";

/// Spawns the thread that forwards render instructions to the webview.
///
/// The thread ends when the instruction channel disconnects, i.e. when the
/// renderer feeding it is dropped.
pub fn spawn_render_forwarder(app: AppHandle, rx: Receiver<RenderInstruction>) {
    std::thread::spawn(move || {
        println!("[Render] Forwarder started");
        for instruction in rx {
            if let Err(e) = app.emit(SCENE_RENDER_EVENT, &instruction) {
                println!("[Render] Failed to emit instruction: {}", e);
            }
        }
        println!("[Render] Forwarder stopped");
    });
}
