//! Buffering of the player's device events into the [`ControlSignal`] read by the simulation.
//!
//! Events may arrive at any time relative to ticks. The [`InputAdapter`] only ever overwrites the latest signal,
//! and the scheduler copies it once at the start of each tick.

use std::sync::Arc;

use tokio::sync::watch;

use crate::game::{ControlSignal, Direction};

/// Cloneable handle translating device events into the buffered [`ControlSignal`].
#[derive(Clone, Debug)]
pub struct InputAdapter {
    signal: Arc<watch::Sender<ControlSignal>>,
}

impl InputAdapter {
    /// Creates an adapter with nothing held, and the receiving end the simulation reads from.
    pub fn new() -> (InputAdapter, watch::Receiver<ControlSignal>) {
        let (sender, receiver) = watch::channel(ControlSignal::default());
        (
            InputAdapter {
                signal: Arc::new(sender),
            },
            receiver,
        )
    }

    pub fn key_down(&self, direction: Direction) {
        self.signal.send_modify(|signal| signal.set(direction, true));
    }

    pub fn key_up(&self, direction: Direction) {
        self.signal.send_modify(|signal| signal.set(direction, false));
    }

    /// Handle a raw key event by its device key name. Returns whether the key controls the paddle.
    pub fn key_event(&self, key: &str, pressed: bool) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.signal.send_modify(|signal| signal.set(direction, pressed));
                true
            }
            None => false,
        }
    }

    /// Set the pointer's height, already translated into court space.
    pub fn pointer_moved(&self, y: f64) {
        if y.is_finite() {
            self.signal.send_modify(|signal| signal.target_y = Some(y));
        } else {
            log::warn!("Ignoring a pointer move to a non-finite height : {y}.");
        }
    }

    /// The pointer left the court : stop following it.
    pub fn pointer_left(&self) {
        self.signal.send_modify(|signal| signal.target_y = None);
    }

    /// Copy of the latest buffered signal.
    pub fn current(&self) -> ControlSignal {
        *self.signal.borrow()
    }
}
