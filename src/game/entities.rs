//! The things on the court : the [`Ball`], the two [`Paddle`]s and the [`Score`].

use crate::config::ValidCourtConfig;
use crate::game::Side;

/// The ball, as a circle of constant radius moving by its velocity once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub radius: f64,
    /// Scales the velocity during integration. Always 1 for now, reset on every serve.
    pub speed_multiplier: f64,
}

impl Ball {
    /// A motionless ball at the center of the court.
    pub fn centered(config: &ValidCourtConfig) -> Self {
        Self {
            x: config.court_width / 2.0,
            y: config.court_height / 2.0,
            dx: 0.0,
            dy: 0.0,
            radius: config.ball_radius,
            speed_multiplier: 1.0,
        }
    }

    pub fn left_edge(&self) -> f64 {
        self.x - self.radius
    }

    pub fn right_edge(&self) -> f64 {
        self.x + self.radius
    }

    pub fn top_edge(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom_edge(&self) -> f64 {
        self.y + self.radius
    }
}

/// A paddle, fixed horizontally against its side's wall and sliding vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    /// Left edge. 0 for the player, court width minus paddle width for the AI.
    pub x: f64,
    /// Top edge, always within `[0, court height - paddle height]`.
    pub y: f64,
}

impl Paddle {
    /// A paddle against the wall of the given side, centered vertically.
    pub fn new(side: Side, config: &ValidCourtConfig) -> Self {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => config.court_width - config.paddle_width,
        };
        Self {
            side,
            x,
            y: config.centered_paddle_y(),
        }
    }

    pub fn center_y(&self, config: &ValidCourtConfig) -> f64 {
        self.y + config.paddle_height / 2.0
    }

    /// Whether the given height lies strictly between the paddle's top and bottom edges.
    pub fn spans(&self, y: f64, config: &ValidCourtConfig) -> bool {
        self.y < y && y < self.y + config.paddle_height
    }

    /// Move to the given top-y, clamped into the court.
    pub(super) fn move_to(&mut self, y: f64, config: &ValidCourtConfig) {
        self.y = config.clamp_paddle_y(y);
    }
}

/// Points of both sides, indexed by [`Side`]. Only ever grows, by one point at a time, until a game reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score([u32; 2]);

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(&self, side: Side) -> u32 {
        self.0[usize::from(side)]
    }

    pub fn player(&self) -> u32 {
        self.of(Side::Left)
    }

    pub fn ai(&self) -> u32 {
        self.of(Side::Right)
    }

    /// Points played so far in the game.
    pub fn total(&self) -> u32 {
        self.0[0] + self.0[1]
    }

    pub(super) fn award(&mut self, side: Side) {
        self.0[usize::from(side)] += 1;
    }
}
