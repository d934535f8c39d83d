//! A frame-stepped Pong simulation : one paddle driven by the player's input, the other by a reactive AI.
//!
//! The [`game::Game`] holds the whole state and advances it one tick at a time. The [`scheduler`] drives it at a
//! fixed rate in a tokio task, buffering input through an [`input::InputAdapter`] and handing a
//! [`game::Frame`] to a [`render::Render`] hook after every tick.

pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod scheduler;

pub use config::{ConfigError, CourtConfig, ValidCourtConfig};
pub use game::{ControlSignal, Direction, Frame, Game, Side, TickOutcome};
pub use input::InputAdapter;
pub use render::{LogRenderer, Render};
pub use scheduler::{Scheduler, SchedulerError, SchedulerHandle};
