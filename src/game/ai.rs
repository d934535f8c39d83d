//! The reactive AI controlling the right paddle, and the difficulty that sharpens it as the game goes on.
//!
//! The AI has no prediction : each tick it aims at the ball's current height, with an aiming error that shrinks as
//! the difficulty rises, and moves towards that aim at a speed that grows with the difficulty.

use rand::Rng;

use crate::config::ValidCourtConfig;
use crate::game::entities::{Paddle, Score};

/// Difficulty at the start of a game.
pub const BASE_DIFFICULTY: f64 = 1.0;

/// Difficulty steps as `(points played above which the step applies, difficulty)`, in increasing order.
const DIFFICULTY_STEPS: [(u32, f64); 2] = [(5, 1.3), (10, 1.6)];

/// Difficulty of the AI for the points played so far. A step function of the total score, never decreasing.
pub fn difficulty(score: &Score) -> f64 {
    difficulty_for_points(score.total())
}

/// Difficulty of the AI once `points` points have been played.
pub fn difficulty_for_points(points: u32) -> f64 {
    DIFFICULTY_STEPS
        .iter()
        .rev()
        .find(|&&(threshold, _)| points > threshold)
        .map_or(BASE_DIFFICULTY, |&(_, difficulty)| difficulty)
}

/// Top-y the AI paddle aims for : centered on the ball, give or take some noise.
pub(super) fn target_y<R: Rng + ?Sized>(
    ball_y: f64,
    difficulty: f64,
    config: &ValidCourtConfig,
    rng: &mut R,
) -> f64 {
    let noise = (rng.gen::<f64>() - 0.5) * config.ai_noise_amplitude * (2.0 - difficulty);
    ball_y - config.paddle_height / 2.0 + noise
}

/// Move the AI paddle one step towards the given target top-y.
///
/// The paddle's center is compared to the target's center : a paddle above its target moves down, any other paddle
/// moves up. It always moves by the full step, then is clamped into the court.
pub(super) fn step_towards(
    paddle: &mut Paddle,
    target_y: f64,
    difficulty: f64,
    config: &ValidCourtConfig,
) {
    let step = config.ai_speed * difficulty;
    let target_center = target_y + config.paddle_height / 2.0;
    if paddle.center_y(config) < target_center {
        paddle.move_to(paddle.y + step, config);
    } else {
        paddle.move_to(paddle.y - step, config);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::Side;

    const BIAS: f64 = 1.0e-9;

    /// A random source always drawing 0.5, for a noiseless AI.
    fn centered_rng() -> StepRng {
        StepRng::new(1 << 63, 0)
    }

    #[test]
    fn difficulty_steps() {
        for points in 0..=5 {
            assert_eq!(difficulty_for_points(points), 1.0);
        }
        for points in 6..=10 {
            assert_eq!(difficulty_for_points(points), 1.3);
        }
        assert_eq!(difficulty_for_points(11), 1.6);
        assert_eq!(difficulty_for_points(u32::MAX), 1.6);
    }

    #[test]
    fn difficulty_never_decreases() {
        let mut last = BASE_DIFFICULTY;
        for points in 0..100 {
            let difficulty = difficulty_for_points(points);
            assert!(difficulty >= last);
            if difficulty > last {
                assert!(points == 6 || points == 11);
            }
            last = difficulty;
        }
    }

    #[test]
    fn noiseless_target() {
        let config = ValidCourtConfig::default();
        let target = target_y(200.0, 1.0, &config, &mut centered_rng());
        assert_eq!(target, 162.5);
    }

    #[test]
    fn noise_shrinks_with_difficulty() {
        let config = ValidCourtConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for (difficulty, max_noise) in [(1.0, 5.0), (1.3, 3.5), (1.6, 2.0)] {
            for _ in 0..200 {
                let noise = target_y(200.0, difficulty, &config, &mut rng) - 162.5;
                assert!(noise.abs() <= max_noise + BIAS);
            }
        }
    }

    #[test]
    fn lowest_draw_aims_higher() {
        let config = ValidCourtConfig::default();
        let target = target_y(200.0, 1.0, &config, &mut StepRng::new(0, 0));
        assert_eq!(target, 157.5);
    }

    #[test]
    fn moves_towards_target() {
        let config = ValidCourtConfig::default();
        let mut paddle = Paddle::new(Side::Right, &config);

        step_towards(&mut paddle, 300.0, 1.0, &config);
        assert_eq!(paddle.y, 166.5);

        step_towards(&mut paddle, 0.0, 1.6, &config);
        assert!((paddle.y - 160.1).abs() < BIAS);
    }

    #[test]
    fn reached_target_moves_up() {
        let config = ValidCourtConfig::default();
        let mut paddle = Paddle::new(Side::Right, &config);
        let target_y = paddle.y;
        step_towards(&mut paddle, target_y, 1.0, &config);
        assert_eq!(paddle.y, 158.5);
    }

    #[test]
    fn stays_in_court() {
        let config = ValidCourtConfig::default();
        let mut paddle = Paddle::new(Side::Right, &config);
        for _ in 0..200 {
            step_towards(&mut paddle, 1000.0, 1.6, &config);
        }
        assert_eq!(paddle.y, 325.0);
        for _ in 0..200 {
            step_towards(&mut paddle, -1000.0, 1.6, &config);
        }
        assert_eq!(paddle.y, 0.0);
    }
}
