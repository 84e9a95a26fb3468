//! Headless Scene Test
//!
//! Drives the cube scene without a webview and prints the render-instruction
//! stream a surface would consume. The wiring matches the application: the
//! model mutates on one side of a channel, the surface drains the other.
//!
//! Flow:
//! 1. Normalize a canned search response into result records
//! 2. Build a row of solid cubes from the records
//! 3. Apply group actions, then run a short demo cycle
//! 4. Drop the scene and print every emitted instruction as JSON
//!
//! Run with: cargo run --example headless_scene

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::json;

use rosebox_lib::config::SceneConfig;
use rosebox_lib::scene::{ChannelRenderer, CubeSet, Face, GroupAction};
use rosebox_lib::search::normalize;

fn main() {
    println!("[Demo] Building a headless scene...");

    let (tx, rx) = crossbeam_channel::unbounded();
    let config = SceneConfig {
        demo_interval: Duration::from_millis(200),
        ..SceneConfig::default()
    };
    let mut set = CubeSet::new(Arc::new(ChannelRenderer::new(tx)), config);

    // A canned feed response, shaped like the live provider envelope.
    let body = json!({
        "responseStatus": 200,
        "responseData": {
            "results": [
                {"url": "https://img.example/rose.jpg", "title": "Rose", "content": "A red rose"},
                {"url": "https://img.example/tulip.jpg", "title": "Tulip", "content": "A tulip field"},
                {"url": "https://img.example/iris.jpg", "title": "Iris", "content": "An iris"},
            ]
        }
    });
    let records = normalize(&body);
    println!("[Demo] {} canned record(s)", records.len());

    for (i, record) in records.iter().enumerate() {
        let cube = set
            .create_new(None, 300.0 * i as f64, 300.0, -300.0)
            .unwrap();
        cube.set_backsides_visible(false);
        let image = format!(
            "<img src=\"{}\" width=\"100%\" height=\"100%\">",
            record.url
        );
        for face in [Face::Front, Face::Back, Face::Left, Face::Right] {
            cube.set_content(face, &image);
        }
        cube.set_content(Face::Top, &format!("<h2>{}</h2>", record.content));
        cube.set_content(Face::Bottom, &format!("<h2>{}</h2>", record.title));
    }

    set.perform_group_action(&GroupAction::MoveBy {
        x: Some(200.0),
        y: None,
        z: None,
    });
    set.perform_group_action(&GroupAction::ShowNextSide);

    println!("[Demo] Running the face cycle for one second...");
    set.perform_group_action(&GroupAction::DemoStart);
    thread::sleep(Duration::from_secs(1));
    set.perform_group_action(&GroupAction::DemoStop);

    // Dropping the set disconnects the channel, which ends the drain below.
    drop(set);

    println!("[Demo] Instruction stream:");
    for instruction in rx {
        println!("{}", serde_json::to_string(&instruction).unwrap());
    }
}
