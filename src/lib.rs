//! RoseBox: a 3D cube gallery fed by image search
//!
//! Each search materializes its results as a row of CSS-3D cubes: the image
//! on the four vertical faces, captions on the top and bottom. Cubes rotate
//! on click, highlight on hover, and cycle their faces autonomously in demo
//! mode.
//!
//! Architecture:
//! - The scene model lives in Tauri-managed state and never touches the DOM;
//!   every mutation emits one render instruction into a channel
//! - A forwarder thread re-emits the instructions as Tauri events
//! - The webview applies instructions to its cube elements and sends pointer
//!   events and commands back over IPC
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `scene`: The cube scene engine
//!   - `cube`: The positioned cube model
//!   - `set`: Cube ownership and group actions
//!   - `face`/`transform`: Orientation and the CSS transform computation
//!   - `renderer`: The render instruction seam
//! - `search`: Image-search client and response normalization
//! - `tauri_bridge`: Bridge layer between Tauri and the scene
//!   - `shared_state`: Thread-safe handles and response shapes
//!   - `commands`: Tauri command handlers
//!   - `events`: Render event forwarding

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
pub mod config;
pub mod scene;
pub mod search;
pub mod tauri_bridge;

use std::sync::Arc;

use scene::ChannelRenderer;
use search::SearchClient;
use tauri_bridge::{SharedRowCursor, SharedScene};

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    println!("[Tauri] Starting RoseBox...");

    // Render instructions flow from the scene to the webview forwarder.
    let (render_tx, render_rx) = crossbeam_channel::unbounded();
    let renderer = Arc::new(ChannelRenderer::new(render_tx));

    // Create shared state
    let scene = SharedScene::new(renderer, config::SceneConfig::default());
    let cursor = SharedRowCursor::default();
    let client = SearchClient::new(config::SearchConfig::default());

    // Build and run Tauri application
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(scene)
        .manage(cursor)
        .manage(client)
        .setup(move |app| {
            tauri_bridge::events::spawn_render_forwarder(app.handle().clone(), render_rx);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::search_images,
            tauri_bridge::commands::group_action,
            tauri_bridge::commands::dispatch_cube_event,
            tauri_bridge::commands::get_scene_snapshot,
            tauri_bridge::commands::remove_cube,
            tauri_bridge::commands::open_result_link
        ])
        .run(tauri::generate_context!())
        .expect("Tauri error");
}
