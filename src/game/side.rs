//! Definition of the [`Side`] structure.

use std::ops::Not;

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Enumeration symbolizing the two sides of the court : the left one is the player's, the right one is the AI's.
///
/// The [`Not`] trait is implemented to support inversion using `!s` syntax.
///
/// An implementation of [`Distribution`] of [`Side`]s for [`Standard`] is given to make it easy to draw a random
/// serve direction.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the horizontal velocity of a ball heading towards this side.
    pub fn direction(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Name of whoever plays on this side.
    pub fn owner(self) -> &'static str {
        match self {
            Self::Left => "Player",
            Self::Right => "AI",
        }
    }
}

impl Not for Side {
    type Output = Side;
    fn not(self) -> Self::Output {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl Distribution<Side> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Side {
        match rng.gen() {
            true => Side::Left,
            false => Side::Right,
        }
    }
}

/// Index of a side in a per-side pair such as the score.
impl From<Side> for usize {
    fn from(value: Side) -> Self {
        match value {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}
