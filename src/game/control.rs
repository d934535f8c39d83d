//! The normalized control signal of the player paddle, and how it moves the paddle.

use crate::config::ValidCourtConfig;
use crate::game::entities::Paddle;

/// One of the two logical directions a key can push the paddle.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Maps the device key names of the arrow keys to a [`Direction`].
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Latest state of the player's input devices, as buffered by the input adapter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ControlSignal {
    pub up: bool,
    pub down: bool,
    /// Absolute height, in court space, the pointer wants the paddle's center at.
    pub target_y: Option<f64>,
}

impl ControlSignal {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    /// The direction the keys ask for, if any. Up wins when both are held.
    pub fn held_direction(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// How the discrete and continuous controls combine when both are active.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum ControlPrecedence {
    /// Keys first. The pointer only applies on a tick where the keys did not move the paddle.
    #[default]
    DiscreteThenContinuous,
}

/// Move the player paddle for one tick according to the control signal.
pub(super) fn drive_paddle(
    paddle: &mut Paddle,
    signal: &ControlSignal,
    precedence: ControlPrecedence,
    config: &ValidCourtConfig,
) {
    match precedence {
        ControlPrecedence::DiscreteThenContinuous => {
            if !step_with_keys(paddle, signal, config) {
                seek_pointer(paddle, signal, config);
            }
        }
    }
}

/// Move the paddle by a fixed step in the held direction, if it is not already against that wall. Returns whether
/// the paddle moved.
fn step_with_keys(paddle: &mut Paddle, signal: &ControlSignal, config: &ValidCourtConfig) -> bool {
    let before = paddle.y;
    match signal.held_direction() {
        Some(Direction::Up) if paddle.y > 0.0 => paddle.move_to(paddle.y - config.paddle_step, config),
        Some(Direction::Down) if paddle.y < config.max_paddle_y() => {
            paddle.move_to(paddle.y + config.paddle_step, config)
        }
        _ => {}
    }
    paddle.y != before
}

/// Pull the paddle's center a fixed step towards the pointer, unless it is already within the deadzone.
fn seek_pointer(paddle: &mut Paddle, signal: &ControlSignal, config: &ValidCourtConfig) {
    let Some(target_y) = signal.target_y else {
        return;
    };
    let gap = target_y - paddle.center_y(config);
    if gap.abs() > config.pointer_deadzone {
        paddle.move_to(paddle.y + config.paddle_step.copysign(gap), config);
    }
}
