//! Implementation of the randomness, movement and collisions needed to run a Pong game.

use rand::distributions::{Distribution, Standard, Uniform};

use crate::config::ValidCourtConfig;
use crate::game::entities::{Ball, Paddle};
use crate::game::side::Side;

/// Preemptively built distributions needed to generate random serves.
#[derive(Clone, Debug)]
pub(super) struct ServiceGenerator {
    side_distribution: Standard,
    dy_distribution: Uniform<f64>,
    speed: f64,
}

impl ServiceGenerator {
    /// Create a new [`ServiceGenerator`] for the serve speeds of the given config.
    pub(super) fn new(config: &ValidCourtConfig) -> ServiceGenerator {
        ServiceGenerator {
            side_distribution: Standard,
            dy_distribution: Uniform::new_inclusive(-config.serve_max_dy, config.serve_max_dy),
            speed: config.serve_speed,
        }
    }

    /// Put the ball back at the center of the court, heading to a random side at serve speed.
    pub(super) fn serve<R: rand::Rng + ?Sized>(
        &self,
        ball: &mut Ball,
        config: &ValidCourtConfig,
        rng: &mut R,
    ) {
        let side: Side = self.side_distribution.sample(rng);
        *ball = Ball::centered(config);
        ball.dx = side.direction() * self.speed;
        ball.dy = self.dy_distribution.sample(rng);
    }
}

/// Advance the ball by its velocity. No collision check is done here.
pub(super) fn integrate(ball: &mut Ball) {
    ball.x += ball.dx * ball.speed_multiplier;
    ball.y += ball.dy * ball.speed_multiplier;
}

/// Find the paddle the ball, at the given position, is touching while heading towards it. The AI paddle is checked
/// first. A ball already sent back by a paddle never touches it again before reaching the other side.
pub(super) fn find_paddle_contact(
    ball: &Ball,
    player: &Paddle,
    ai: &Paddle,
    config: &ValidCourtConfig,
) -> Option<Side> {
    if ball.dx > 0.0 && ball.right_edge() > ai.x && ai.spans(ball.y, config) {
        Some(Side::Right)
    } else if ball.dx < 0.0
        && ball.left_edge() < player.x + config.paddle_width
        && player.spans(ball.y, config)
    {
        Some(Side::Left)
    } else {
        None
    }
}

/// Find if the ball went past the left or right wall, returning the side of this wall.
pub(super) fn side_of_ball_exit(ball: &Ball, config: &ValidCourtConfig) -> Option<Side> {
    if ball.right_edge() > config.court_width {
        Some(Side::Right)
    } else if ball.left_edge() < 0.0 {
        Some(Side::Left)
    } else {
        None
    }
}

/// Normalized offset of the given height from the paddle's center : -1 at its top edge, 1 at its bottom edge.
pub(super) fn collide_point(contact_y: f64, paddle: &Paddle, config: &ValidCourtConfig) -> f64 {
    (contact_y - paddle.center_y(config)) / (config.paddle_height / 2.0)
}

/// Send the ball back towards the opposite side, faster, with a vertical speed depending on where it hit the paddle.
pub(super) fn bounce_off_paddle(
    ball: &mut Ball,
    contact_y: f64,
    paddle: &Paddle,
    config: &ValidCourtConfig,
) {
    let mut speed = ball.dx.abs() * config.paddle_bounce_gain;
    if let Some(cap) = config.max_ball_dx {
        speed = speed.min(cap);
    }
    ball.dx = (!paddle.side).direction() * speed;
    ball.dy = collide_point(contact_y, paddle, config) * config.paddle_deflection;
}

/// Computes collisions of the ball with the top and bottom walls, and the bounce it makes. The ball is clamped back
/// inside the court and its vertical speed points away from the wall it hit.
pub(super) fn bounce_off_horizontal_edges(ball: &mut Ball, config: &ValidCourtConfig) {
    if ball.top_edge() < 0.0 {
        ball.y = ball.radius;
        ball.dy = ball.dy.abs();
    } else if ball.bottom_edge() > config.court_height {
        ball.y = config.court_height - ball.radius;
        ball.dy = -ball.dy.abs();
    }
}
