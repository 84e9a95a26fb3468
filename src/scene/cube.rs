//! The positioned cube model
//!
//! A [`Cube`] is a cheap cloneable handle onto shared state. Every mutation
//! updates the model first and then emits exactly one render instruction, so
//! a surface that replays the instruction stream arrives at the same picture
//! the model describes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;

use super::demo::{self, DemoTimer};
use super::face::Face;
use super::renderer::Renderer;
use super::transform::TransformSpec;
use super::CubeId;

/// Pointer events the surface forwards to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeEvent {
    Click,
    HoverEnter,
    HoverLeave,
}

/// Callback bound to one [`CubeEvent`]. Handlers receive the event and the
/// cube it fired on, and may freely call back into the cube.
pub type EventHandler = Arc<dyn Fn(CubeEvent, &Cube) + Send + Sync>;

struct CubeState {
    id: CubeId,
    x: f64,
    y: f64,
    z: f64,
    face: Face,
    backsides_visible: bool,
    width: f64,
    height: f64,
    base_depth: f64,
    demo_interval: Duration,
    contents: BTreeMap<Face, String>,
    handlers: HashMap<CubeEvent, EventHandler>,
    demo: Option<DemoTimer>,
    renderer: Arc<dyn Renderer>,
}

impl CubeState {
    fn transform(&self) -> TransformSpec {
        TransformSpec::compute(self.x, self.y, self.z, self.face, self.base_depth)
    }

    fn render(&self) {
        self.renderer.apply_transform(self.id, &self.transform());
    }
}

/// Handle onto one cube in the scene.
#[derive(Clone)]
pub struct Cube {
    inner: Arc<Mutex<CubeState>>,
}

/// Non-owning handle for the demo ticker thread. The cycle ends on its own
/// once every owning handle is gone.
pub(crate) struct WeakCube {
    inner: Weak<Mutex<CubeState>>,
}

impl WeakCube {
    pub(crate) fn upgrade(&self) -> Option<Cube> {
        self.inner.upgrade().map(|inner| Cube { inner })
    }
}

impl Cube {
    /// Creates the cube, spawns its element and renders the initial
    /// transform.
    pub(crate) fn create(
        id: CubeId,
        x: f64,
        y: f64,
        z: f64,
        renderer: Arc<dyn Renderer>,
        config: &SceneConfig,
    ) -> Cube {
        let state = CubeState {
            id,
            x,
            y,
            z,
            face: Face::Front,
            backsides_visible: true,
            width: config.cube_size,
            height: config.cube_size,
            base_depth: config.base_depth,
            demo_interval: config.demo_interval,
            contents: BTreeMap::new(),
            handlers: HashMap::new(),
            demo: None,
            renderer,
        };
        state.renderer.spawn_element(id);
        state.render();
        Cube {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakCube {
        WeakCube {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // A poisoned lock still holds consistent cube data: state writes land
    // before any instruction is emitted, and handlers run with no lock held.
    fn state(&self) -> MutexGuard<'_, CubeState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shifts the cube by the given per-axis deltas. Axes passed as `None`
    /// keep their coordinate.
    pub fn move_by(&self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        let mut state = self.state();
        if let Some(dx) = x {
            state.x += dx;
        }
        if let Some(dy) = y {
            state.y += dy;
        }
        if let Some(dz) = z {
            state.z += dz;
        }
        state.render();
    }

    /// Places the cube at an absolute position.
    pub fn move_to(&self, x: f64, y: f64, z: f64) {
        let mut state = self.state();
        state.x = x;
        state.y = y;
        state.z = z;
        state.render();
    }

    /// Presents `face` and re-renders.
    pub fn set_face(&self, face: Face) {
        let mut state = self.state();
        state.face = face;
        state.render();
    }

    /// Rotates one face forward in the fixed cycle.
    pub fn show_next_side(&self) {
        let mut state = self.state();
        state.face = state.face.next();
        state.render();
    }

    /// Rotates one face backward in the fixed cycle.
    pub fn show_prev_side(&self) {
        let mut state = self.state();
        state.face = state.face.prev();
        state.render();
    }

    /// Toggles visibility of the five non-facing sides. The transform is
    /// unaffected, so only the visibility instruction is emitted.
    pub fn set_backsides_visible(&self, visible: bool) {
        let mut state = self.state();
        state.backsides_visible = visible;
        state.renderer.set_backsides_visible(state.id, visible);
    }

    /// Replaces the HTML fragment shown in the content region of `face`.
    pub fn set_content(&self, face: Face, html: &str) {
        let mut state = self.state();
        state.contents.insert(face, html.to_string());
        state.renderer.set_face_content(state.id, face, html);
    }

    /// Toggles the hover highlight. Surface styling only, no model state.
    pub fn set_highlighted(&self, on: bool) {
        let state = self.state();
        state.renderer.set_highlighted(state.id, on);
    }

    /// Binds `handler` to `event`, replacing any previous binding for that
    /// event.
    pub fn set_event_handler(&self, event: CubeEvent, handler: EventHandler) {
        self.state().handlers.insert(event, handler);
    }

    /// Invokes the handler bound to `event` and reports whether one ran.
    pub fn dispatch_event(&self, event: CubeEvent) -> bool {
        let handler = self.state().handlers.get(&event).cloned();
        match handler {
            Some(handler) => {
                handler(event, self);
                true
            }
            None => false,
        }
    }

    /// Starts the autonomous face cycle, cancelling a cycle that is already
    /// running.
    pub fn start_demo(&self) {
        let previous = {
            let mut state = self.state();
            let interval = state.demo_interval;
            let previous = state.demo.take();
            state.demo = Some(demo::spawn_face_cycle(self.downgrade(), interval));
            previous
        };
        if let Some(timer) = previous {
            timer.cancel();
        }
    }

    /// Stops the face cycle. A tick already being handled may still land;
    /// the ticker itself is gone afterwards.
    pub fn stop_demo(&self) {
        let timer = self.state().demo.take();
        if let Some(timer) = timer {
            timer.cancel();
        }
    }

    /// True while a demo cycle is running.
    pub fn demo_running(&self) -> bool {
        self.state().demo.is_some()
    }

    /// Removes the cube's element and clears its state: the demo cycle is
    /// cancelled, contents and handlers are dropped, and the position resets
    /// to the origin facing front.
    pub(crate) fn destroy(&self) {
        let timer = {
            let mut state = self.state();
            let timer = state.demo.take();
            state.contents.clear();
            state.handlers.clear();
            state.x = 0.0;
            state.y = 0.0;
            state.z = 0.0;
            state.face = Face::Front;
            state.backsides_visible = true;
            state.renderer.remove_element(state.id);
            timer
        };
        if let Some(timer) = timer {
            timer.cancel();
        }
    }

    pub fn id(&self) -> CubeId {
        self.state().id
    }

    pub fn x(&self) -> f64 {
        self.state().x
    }

    pub fn y(&self) -> f64 {
        self.state().y
    }

    pub fn z(&self) -> f64 {
        self.state().z
    }

    pub fn face(&self) -> Face {
        self.state().face
    }

    pub fn width(&self) -> f64 {
        self.state().width
    }

    pub fn height(&self) -> f64 {
        self.state().height
    }

    pub fn backsides_visible(&self) -> bool {
        self.state().backsides_visible
    }

    /// The CSS transform for the current state.
    pub fn transform(&self) -> String {
        self.state().transform().to_css()
    }

    /// Copy of the per-face HTML fragments.
    pub fn contents(&self) -> BTreeMap<Face, String> {
        self.state().contents.clone()
    }

    /// Serializable point-in-time view of the cube.
    pub fn snapshot(&self) -> CubeSnapshot {
        let state = self.state();
        CubeSnapshot {
            id: state.id,
            x: state.x,
            y: state.y,
            z: state.z,
            face: state.face,
            backsides_visible: state.backsides_visible,
            width: state.width,
            height: state.height,
            transform: state.transform().to_css(),
            contents: state.contents.clone(),
        }
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Cube")
            .field("id", &state.id)
            .field("x", &state.x)
            .field("y", &state.y)
            .field("z", &state.z)
            .field("face", &state.face)
            .finish_non_exhaustive()
    }
}

/// Read model of one cube, shipped to the webview as part of a scene
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeSnapshot {
    pub id: CubeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub face: Face,
    pub backsides_visible: bool,
    pub width: f64,
    pub height: f64,
    pub transform: String,
    pub contents: BTreeMap<Face, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use crossbeam_channel::Receiver;

    use crate::scene::renderer::{ChannelRenderer, RenderInstruction};

    const INTERVAL: Duration = Duration::from_millis(25);

    fn rig() -> (Arc<dyn Renderer>, Receiver<RenderInstruction>, SceneConfig) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let config = SceneConfig {
            demo_interval: INTERVAL,
            ..SceneConfig::default()
        };
        (Arc::new(ChannelRenderer::new(tx)), rx, config)
    }

    fn drain(rx: &Receiver<RenderInstruction>) -> Vec<RenderInstruction> {
        rx.try_iter().collect()
    }

    fn wait_for_transform(rx: &Receiver<RenderInstruction>) -> String {
        loop {
            match rx.recv_timeout(Duration::from_secs(2)) {
                Ok(RenderInstruction::Transform { css, .. }) => return css,
                Ok(_) => continue,
                Err(e) => panic!("no transform arrived: {e}"),
            }
        }
    }

    #[test]
    fn create_spawns_then_renders_the_initial_transform() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(1, 10.0, 20.0, 30.0, renderer, &config);

        let expected = TransformSpec::compute(10.0, 20.0, 30.0, Face::Front, config.base_depth);
        assert_eq!(
            drain(&rx),
            vec![
                RenderInstruction::Spawn { id: 1 },
                RenderInstruction::Transform {
                    id: 1,
                    css: expected.to_css(),
                },
            ]
        );
        assert_eq!((cube.x(), cube.y(), cube.z()), (10.0, 20.0, 30.0));
        assert_eq!(cube.face(), Face::Front);
        assert!(cube.backsides_visible());
        assert_eq!(cube.width(), config.cube_size);
        assert_eq!(cube.height(), config.cube_size);
    }

    #[test]
    fn move_by_shifts_only_the_given_axes() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.move_by(Some(100.0), None, None);
        assert_eq!((cube.x(), cube.y(), cube.z()), (100.0, 0.0, 0.0));

        cube.move_by(None, Some(-50.0), Some(25.0));
        assert_eq!((cube.x(), cube.y(), cube.z()), (100.0, -50.0, 25.0));

        // A zero delta is a movement request, not an omitted axis.
        cube.move_by(Some(0.0), Some(0.0), Some(0.0));
        assert_eq!((cube.x(), cube.y(), cube.z()), (100.0, -50.0, 25.0));

        let seen = drain(&rx);
        assert_eq!(seen.len(), 3, "one transform per move");
        assert!(seen
            .iter()
            .all(|i| matches!(i, RenderInstruction::Transform { .. })));
    }

    #[test]
    fn move_to_places_the_cube_absolutely() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(1, 5.0, 5.0, 5.0, renderer, &config);
        drain(&rx);

        cube.move_to(-10.0, 300.0, 0.0);
        assert_eq!((cube.x(), cube.y(), cube.z()), (-10.0, 300.0, 0.0));
        assert_eq!(drain(&rx).len(), 1);
    }

    #[test]
    fn face_changes_rerender_with_the_face_rotation() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.set_face(Face::Right);
        assert_eq!(cube.face(), Face::Right);
        let seen = drain(&rx);
        assert_eq!(seen.len(), 1);
        match &seen[0] {
            RenderInstruction::Transform { css, .. } => {
                assert!(css.ends_with("rotateY(-90deg)"), "css: {css}")
            }
            other => panic!("expected a transform, got {other:?}"),
        }

        cube.show_next_side();
        assert_eq!(cube.face(), Face::Top);
        cube.show_prev_side();
        cube.show_prev_side();
        assert_eq!(cube.face(), Face::Left);
    }

    #[test]
    fn backside_visibility_emits_only_the_visibility_instruction() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(4, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.set_backsides_visible(false);
        assert!(!cube.backsides_visible());
        assert_eq!(
            drain(&rx),
            vec![RenderInstruction::Backsides {
                id: 4,
                visible: false,
            }]
        );
    }

    #[test]
    fn face_content_is_stored_and_forwarded() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(2, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.set_content(Face::Top, "<h2>caption</h2>");
        assert_eq!(
            cube.contents().get(&Face::Top).map(String::as_str),
            Some("<h2>caption</h2>")
        );
        assert_eq!(
            drain(&rx),
            vec![RenderInstruction::FaceContent {
                id: 2,
                face: Face::Top,
                html: "<h2>caption</h2>".to_string(),
            }]
        );
    }

    #[test]
    fn dispatch_runs_the_bound_handler_and_reports_misses() {
        let (renderer, _rx, config) = rig();
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);

        let advance: EventHandler = Arc::new(|_, cube| cube.show_next_side());
        cube.set_event_handler(CubeEvent::Click, advance);

        assert!(cube.dispatch_event(CubeEvent::Click));
        assert_eq!(cube.face(), Face::Back);
        assert!(!cube.dispatch_event(CubeEvent::HoverEnter));
    }

    #[test]
    fn rebinding_an_event_replaces_the_old_handler() {
        let (renderer, _rx, config) = rig();
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);

        let first_runs = Arc::new(AtomicUsize::new(0));
        let second_runs = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first_runs);
        let first: EventHandler = Arc::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cube.set_event_handler(CubeEvent::HoverEnter, first);

        let counter = Arc::clone(&second_runs);
        let second: EventHandler = Arc::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cube.set_event_handler(CubeEvent::HoverEnter, second);

        assert!(cube.dispatch_event(CubeEvent::HoverEnter));
        assert_eq!(first_runs.load(Ordering::SeqCst), 0);
        assert_eq!(second_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn demo_cycle_advances_faces_and_stops_cleanly() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.start_demo();
        assert!(cube.demo_running());

        let first = wait_for_transform(&rx);
        assert!(!first.contains("rotate"), "first tick shows the front: {first}");
        let second = wait_for_transform(&rx);
        assert!(
            second.contains("rotateX(-180deg)"),
            "second tick shows the back: {second}"
        );

        cube.stop_demo();
        assert!(!cube.demo_running());

        // Let a tick already being handled land, then require silence.
        thread::sleep(INTERVAL * 2);
        drain(&rx);
        let resting = cube.face();
        assert!(rx.recv_timeout(INTERVAL * 6).is_err(), "ticker kept running");
        assert_eq!(cube.face(), resting);
    }

    #[test]
    fn stopping_before_the_first_tick_leaves_the_face_alone() {
        let (renderer, rx, _) = rig();
        let config = SceneConfig {
            demo_interval: Duration::from_millis(200),
            ..SceneConfig::default()
        };
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.start_demo();
        cube.stop_demo();

        thread::sleep(Duration::from_millis(500));
        assert_eq!(cube.face(), Face::Front);
        assert!(drain(&rx).is_empty(), "no tick may land after the stop");
    }

    #[test]
    fn restarting_the_demo_replaces_the_running_cycle() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(1, 0.0, 0.0, 0.0, renderer, &config);
        drain(&rx);

        cube.start_demo();
        wait_for_transform(&rx);
        cube.start_demo();
        assert!(cube.demo_running());
        wait_for_transform(&rx);

        cube.stop_demo();
        thread::sleep(INTERVAL * 2);
        drain(&rx);
        assert!(
            rx.recv_timeout(INTERVAL * 6).is_err(),
            "an orphaned ticker survived the restart"
        );
    }

    #[test]
    fn destroy_cancels_the_demo_and_clears_the_cube() {
        let (renderer, rx, config) = rig();
        let cube = Cube::create(9, 50.0, 0.0, 0.0, renderer, &config);
        cube.set_content(Face::Front, "<img src=\"x.jpg\">");
        let advance: EventHandler = Arc::new(|_, cube| cube.show_next_side());
        cube.set_event_handler(CubeEvent::Click, advance);
        cube.start_demo();
        wait_for_transform(&rx);

        cube.destroy();

        assert!(!cube.demo_running());
        assert_eq!(cube.face(), Face::Front);
        assert_eq!((cube.x(), cube.y(), cube.z()), (0.0, 0.0, 0.0));
        assert!(cube.contents().is_empty());
        assert!(!cube.dispatch_event(CubeEvent::Click));

        thread::sleep(INTERVAL * 2);
        let seen = drain(&rx);
        assert!(seen.contains(&RenderInstruction::Remove { id: 9 }));
        assert!(
            rx.recv_timeout(INTERVAL * 6).is_err(),
            "ticker outlived the cube"
        );
    }

    #[test]
    fn snapshot_captures_the_render_state() {
        let (renderer, _rx, config) = rig();
        let cube = Cube::create(3, 1.0, 2.0, 3.0, renderer, &config);
        cube.set_face(Face::Left);
        cube.set_content(Face::Bottom, "<h2>title</h2>");
        cube.set_backsides_visible(false);

        let snapshot = cube.snapshot();
        assert_eq!(snapshot.id, 3);
        assert_eq!(snapshot.face, Face::Left);
        assert!(!snapshot.backsides_visible);
        assert_eq!(snapshot.transform, cube.transform());
        assert!(snapshot.transform.contains("rotateY(90deg)"));
        assert_eq!(
            snapshot.contents.get(&Face::Bottom).map(String::as_str),
            Some("<h2>title</h2>")
        );
    }
}
