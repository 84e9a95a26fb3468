//! Background face-cycling ticker for demo mode.

use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender, TryRecvError};

use super::cube::WeakCube;
use super::face::{Face, FACE_ORDER};

/// Handle to a running face cycle. Dropping it also stops the cycle: the
/// ticker thread watches for the stop channel disconnecting.
pub(crate) struct DemoTimer {
    stop: Sender<()>,
}

impl DemoTimer {
    pub(crate) fn cancel(self) {
        let _ = self.stop.send(());
    }
}

/// Face shown on the `step`-th tick. Starts at the front and wraps.
pub(crate) fn next_demo_face(step: usize) -> Face {
    FACE_ORDER[step % FACE_ORDER.len()]
}

/// Spawns a thread that advances the cube's face once per `interval`.
///
/// The cycle ends when the returned timer is cancelled or dropped, or when
/// the cube itself is gone. A cancel that races an in-flight tick is checked
/// again right before the advance, so at most the tick already being handled
/// can land after a cancel.
pub(crate) fn spawn_face_cycle(cube: WeakCube, interval: Duration) -> DemoTimer {
    let (stop_tx, stop_rx) = bounded::<()>(1);
    std::thread::spawn(move || {
        let ticker = tick(interval);
        let mut step = 0usize;
        loop {
            select! {
                recv(stop_rx) -> _ => break,
                recv(ticker) -> msg => {
                    if msg.is_err() {
                        break;
                    }
                    match stop_rx.try_recv() {
                        Err(TryRecvError::Empty) => {}
                        _ => break,
                    }
                    let Some(cube) = cube.upgrade() else {
                        break;
                    };
                    cube.set_face(next_demo_face(step));
                    step += 1;
                }
            }
        }
    });
    DemoTimer { stop: stop_tx }
}
