//! Read-only snapshot of a game, handed to renderers after each tick.

use std::fmt::{self, Display};

use crate::game::entities::{Ball, Paddle, Score};

/// Everything a renderer needs to draw one frame. Copied out of the game once a tick is complete, so it never
/// shows a half-updated court.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Number of simulated ticks since the game was created or last reset.
    pub tick: u64,
    pub court_width: f64,
    pub court_height: f64,
    pub paddle_width: f64,
    pub paddle_height: f64,
    pub ball: Ball,
    pub player: Paddle,
    pub ai: Paddle,
    pub score: Score,
    pub difficulty: f64,
    pub running: bool,
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} ball ({:.1}, {:.1}) v ({:.2}, {:.2}) | player {:.1} | ai {:.1} | {} - {} | x{:.1}{}",
            self.tick,
            self.ball.x,
            self.ball.y,
            self.ball.dx,
            self.ball.dy,
            self.player.y,
            self.ai.y,
            self.score.player(),
            self.score.ai(),
            self.difficulty,
            if self.running { "" } else { " (paused)" },
        )
    }
}
