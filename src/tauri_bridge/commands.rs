//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript code.

use std::sync::Arc;

use tauri::State;
use tauri_plugin_opener::OpenerExt;

use crate::config::layout;
use crate::scene::{CubeEvent, CubeId, CubeSet, EventHandler, Face, GroupAction, SceneError};
use crate::search::{ResultRecord, SearchClient};

use super::shared_state::{SceneSnapshot, SearchSummary, SharedRowCursor, SharedScene};

/// Run an image search and materialize each result as a cube in a new row.
///
/// The row claims its depth when the search is issued, so concurrent
/// searches land on distinct rows. `origin_x` and `origin_y` default to
/// the configured row origin when the webview does not pass its own.
#[tauri::command]
pub async fn search_images(
    query: String,
    origin_x: Option<f64>,
    origin_y: Option<f64>,
    scene: State<'_, SharedScene>,
    cursor: State<'_, SharedRowCursor>,
    client: State<'_, SearchClient>,
) -> Result<SearchSummary, String> {
    println!("[Search] Query: {:?}", query);

    let row_z = {
        let mut cursor = cursor.0.lock().map_err(|e| e.to_string())?;
        cursor.advance()
    };

    let records = client.search(&query).await.map_err(|e| e.to_string())?;
    println!("[Search] {} result(s) for {:?}", records.len(), query);

    let mut set = scene.0.lock().map_err(|e| e.to_string())?;
    let origin_x = origin_x.unwrap_or(layout::ROW_START_X);
    let origin_y = origin_y.unwrap_or(layout::ROW_START_Y);
    let created =
        populate_row(&mut set, origin_x, origin_y, row_z, &records).map_err(|e| e.to_string())?;

    Ok(SearchSummary {
        query,
        created,
        total_cubes: set.len(),
    })
}

/// Builds one row of solid cubes from search records: the image on the four
/// vertical faces, the page snippet on top, the page title on the bottom,
/// click to rotate, hover to highlight.
pub(crate) fn populate_row(
    set: &mut CubeSet,
    origin_x: f64,
    origin_y: f64,
    row_z: f64,
    records: &[ResultRecord],
) -> Result<Vec<CubeId>, SceneError> {
    let mut created = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let x = origin_x + (i as f64) * layout::ROW_SPACING;
        let cube = set.create_new(None, x, origin_y, row_z)?;

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

        let advance: EventHandler = Arc::new(|_, cube| cube.show_next_side());
        cube.set_event_handler(CubeEvent::Click, advance);

        // One handler serves both hover edges.
        let hover: EventHandler = Arc::new(|event, cube| {
            cube.set_highlighted(event == CubeEvent::HoverEnter);
        });
        cube.set_event_handler(CubeEvent::HoverEnter, Arc::clone(&hover));
        cube.set_event_handler(CubeEvent::HoverLeave, hover);

        created.push(cube.id());
    }

    Ok(created)
}

/// Apply one action to every cube in the scene. Returns how many cubes the
/// action reached.
#[tauri::command]
pub fn group_action(action: GroupAction, scene: State<SharedScene>) -> Result<usize, String> {
    let set = scene.0.lock().map_err(|e| e.to_string())?;
    Ok(set.perform_group_action(&action))
}

/// Forward a pointer event from the webview to the cube it targets.
///
/// The handler runs after the scene lock is released, so handlers may reach
/// back into the scene. Returns whether a handler was bound.
#[tauri::command]
pub fn dispatch_cube_event(
    cube_id: CubeId,
    event: CubeEvent,
    scene: State<SharedScene>,
) -> Result<bool, String> {
    let cube = {
        let set = scene.0.lock().map_err(|e| e.to_string())?;
        set.find(cube_id)
    };
    match cube {
        Some(cube) => Ok(cube.dispatch_event(event)),
        None => Err(SceneError::UnknownCube(cube_id).to_string()),
    }
}

/// Read model of the whole scene, used by the webview to rebuild its DOM.
#[tauri::command]
pub fn get_scene_snapshot(scene: State<SharedScene>) -> Result<SceneSnapshot, String> {
    let set = scene.0.lock().map_err(|e| e.to_string())?;
    Ok(SceneSnapshot {
        cubes: set.snapshot(),
    })
}

/// Destroy one cube and drop it from the scene. Returns whether a cube was
/// removed.
#[tauri::command]
pub fn remove_cube(cube_id: CubeId, scene: State<SharedScene>) -> Result<bool, String> {
    let mut set = scene.0.lock().map_err(|e| e.to_string())?;
    Ok(set.destroy_cube(cube_id))
}

/// Open a result's page in the system browser. Only web links may leave the
/// webview.
#[tauri::command]
pub fn open_result_link(url: String, app: tauri::AppHandle) -> Result<(), String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("refusing to open non-web url: {}", url));
    }
    println!("[Search] Opening result link: {}", url);
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossbeam_channel::Receiver;

    use crate::config::SceneConfig;
    use crate::scene::{ChannelRenderer, RenderInstruction};

    fn record(url: &str, title: &str, content: &str) -> ResultRecord {
        ResultRecord {
            url: url.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn rig() -> (CubeSet, Receiver<RenderInstruction>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let config = SceneConfig {
            demo_interval: Duration::from_millis(25),
            ..SceneConfig::default()
        };
        (CubeSet::new(Arc::new(ChannelRenderer::new(tx)), config), rx)
    }

    #[test]
    fn a_row_lays_cubes_out_along_x_at_the_claimed_depth() {
        let (mut set, _rx) = rig();
        let records = vec![
            record("https://img.example/a.jpg", "a", "first"),
            record("https://img.example/b.jpg", "b", "second"),
            record("https://img.example/c.jpg", "c", "third"),
        ];

        let created = populate_row(&mut set, 0.0, 300.0, -300.0, &records).unwrap();

        assert_eq!(created.len(), 3);
        let xs: Vec<f64> = created
            .iter()
            .map(|id| set.find(*id).unwrap().x())
            .collect();
        assert_eq!(xs, vec![0.0, 300.0, 600.0]);
        for id in &created {
            let cube = set.find(*id).unwrap();
            assert_eq!(cube.y(), 300.0);
            assert_eq!(cube.z(), -300.0);
            assert!(!cube.backsides_visible());
        }
    }

    #[test]
    fn a_row_cube_carries_the_image_and_captions() {
        let (mut set, _rx) = rig();
        let records = vec![record("https://img.example/rose.jpg", "Rose page", "A rose")];

        let created = populate_row(&mut set, 0.0, 0.0, 0.0, &records).unwrap();
        let cube = set.find(created[0]).unwrap();
        let contents = cube.contents();

        let image = "<img src=\"https://img.example/rose.jpg\" width=\"100%\" height=\"100%\">";
        for face in [Face::Front, Face::Back, Face::Left, Face::Right] {
            assert_eq!(contents.get(&face).map(String::as_str), Some(image));
        }
        assert_eq!(
            contents.get(&Face::Top).map(String::as_str),
            Some("<h2>A rose</h2>")
        );
        assert_eq!(
            contents.get(&Face::Bottom).map(String::as_str),
            Some("<h2>Rose page</h2>")
        );
    }

    #[test]
    fn row_cubes_rotate_on_click_and_highlight_on_hover() {
        let (mut set, rx) = rig();
        let records = vec![record("https://img.example/a.jpg", "a", "first")];
        let created = populate_row(&mut set, 0.0, 0.0, 0.0, &records).unwrap();
        let cube = set.find(created[0]).unwrap();
        while rx.try_recv().is_ok() {}

        assert!(cube.dispatch_event(CubeEvent::Click));
        assert_eq!(cube.face(), Face::Back);

        assert!(cube.dispatch_event(CubeEvent::HoverEnter));
        assert!(cube.dispatch_event(CubeEvent::HoverLeave));
        let highlights: Vec<RenderInstruction> = rx
            .try_iter()
            .filter(|i| matches!(i, RenderInstruction::Highlight { .. }))
            .collect();
        assert_eq!(
            highlights,
            vec![
                RenderInstruction::Highlight {
                    id: created[0],
                    on: true,
                },
                RenderInstruction::Highlight {
                    id: created[0],
                    on: false,
                },
            ]
        );
    }

    #[test]
    fn an_empty_result_list_creates_no_cubes() {
        let (mut set, rx) = rig();
        let created = populate_row(&mut set, 0.0, 0.0, 0.0, &[]).unwrap();
        assert!(created.is_empty());
        assert!(set.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
