//! Implementation of the logic of the Pong game.
//!
//! This mod exposes the [`Game`] state store, whose [`Game::tick`] runs one step of the simulation : ball movement,
//! collisions and scoring, then the player's and the AI's paddle moves. Renderers read it through [`Frame`]
//! snapshots.

pub use ai::{difficulty, difficulty_for_points, BASE_DIFFICULTY};
pub use control::{ControlPrecedence, ControlSignal, Direction};
pub use entities::{Ball, Paddle, Score};
pub use frame::Frame;
pub use side::Side;
pub use state::{Game, Phase, TickOutcome};

mod ai;
mod control;
mod engine;
mod entities;
mod frame;
mod side;
mod state;
