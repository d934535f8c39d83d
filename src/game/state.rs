//! Encapsulation of a game state, and computation of its evolution tick after tick.

use rand::Rng;

use crate::config::ValidCourtConfig;
use crate::game::ai;
use crate::game::control::{drive_paddle, ControlPrecedence, ControlSignal};
use crate::game::engine::{
    bounce_off_horizontal_edges, bounce_off_paddle, find_paddle_contact, integrate,
    side_of_ball_exit, ServiceGenerator,
};
use crate::game::entities::{Ball, Paddle, Score};
use crate::game::frame::Frame;
use crate::game::Side;

/// Whether ticks advance the simulation.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Phase {
    Running,
    Paused,
}

/// What happened during a tick. A tick has exactly one outcome, so a single tick never scores for both sides.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TickOutcome {
    /// The game is paused, nothing moved.
    Idle,
    /// The ball moved freely.
    Rally,
    /// The ball bounced off the paddle of the given side.
    Bounce(Side),
    /// The given side scored a point and the ball was served again.
    Point(Side),
}

/// The whole state of a game : ball, paddles, score, difficulty and phase. It is the only owner of these, and is
/// mutated by [`Game::tick`] and the reset operations alone.
#[derive(Clone, Debug)]
pub struct Game {
    config: ValidCourtConfig,
    ball: Ball,
    player: Paddle,
    ai: Paddle,
    score: Score,
    /// Cached from the score, see [`ai::difficulty`].
    difficulty: f64,
    phase: Phase,
    precedence: ControlPrecedence,
    service_generator: ServiceGenerator,
    ticks: u64,
}

impl Game {
    /// Creates a running [`Game`] with centered paddles, scores at 0 and a ball served in a random direction.
    pub fn new<R: Rng + ?Sized>(config: ValidCourtConfig, rng: &mut R) -> Game {
        let service_generator = ServiceGenerator::new(&config);
        let mut ball = Ball::centered(&config);
        service_generator.serve(&mut ball, &config, rng);
        Game {
            ball,
            player: Paddle::new(Side::Left, &config),
            ai: Paddle::new(Side::Right, &config),
            score: Score::new(),
            difficulty: ai::BASE_DIFFICULTY,
            phase: Phase::Running,
            precedence: ControlPrecedence::default(),
            service_generator,
            ticks: 0,
            config,
        }
    }

    pub fn config(&self) -> &ValidCourtConfig {
        &self.config
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self) -> &Paddle {
        &self.player
    }

    pub fn ai(&self) -> &Paddle {
        &self.ai
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Pause or resume the simulation. Does nothing if already in the requested phase.
    pub fn set_running(&mut self, running: bool) {
        let phase = if running { Phase::Running } else { Phase::Paused };
        if phase != self.phase {
            log::info!("Game is now {phase:?}.");
            self.phase = phase;
        }
    }

    /// Put the ball back at the center, served towards a random side.
    pub fn reset_ball<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.service_generator.serve(&mut self.ball, &self.config, rng);
    }

    /// Start over : scores at 0, base difficulty, centered paddles, a fresh serve, running.
    pub fn reset_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        log::info!(
            "Resetting the game, final score was {} - {}.",
            self.score.player(),
            self.score.ai()
        );
        self.score = Score::new();
        self.difficulty = ai::BASE_DIFFICULTY;
        self.player = Paddle::new(Side::Left, &self.config);
        self.ai = Paddle::new(Side::Right, &self.config);
        self.reset_ball(rng);
        self.ticks = 0;
        self.phase = Phase::Running;
    }

    /// Advance the game by one tick, reading the player's control signal once.
    ///
    /// Paddle contacts are tested on the ball's position at the start of the tick, and a bounce changes its velocity
    /// before it moves. Side and top and bottom walls are tested on the moved ball. Paddles move last, the player's
    /// then the AI's.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, signal: &ControlSignal) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        let bounce = find_paddle_contact(&self.ball, &self.player, &self.ai, &self.config);
        if let Some(side) = bounce {
            let paddle = match side {
                Side::Left => self.player,
                Side::Right => self.ai,
            };
            let contact_y = self.ball.y;
            bounce_off_paddle(&mut self.ball, contact_y, &paddle, &self.config);
            log::trace!("Ball bounced off the {} paddle.", side.owner());
        }
        integrate(&mut self.ball);

        let outcome = match (bounce, side_of_ball_exit(&self.ball, &self.config)) {
            (Some(side), _) => TickOutcome::Bounce(side),
            (None, Some(side)) => {
                let scorer = !side;
                self.award_point(scorer);
                self.reset_ball(rng);
                TickOutcome::Point(scorer)
            }
            (None, None) => TickOutcome::Rally,
        };
        bounce_off_horizontal_edges(&mut self.ball, &self.config);

        drive_paddle(&mut self.player, signal, self.precedence, &self.config);
        let target_y = ai::target_y(self.ball.y, self.difficulty, &self.config, rng);
        ai::step_towards(&mut self.ai, target_y, self.difficulty, &self.config);

        self.ticks += 1;
        outcome
    }

    /// Snapshot of the current state for renderers.
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.ticks,
            court_width: self.config.court_width,
            court_height: self.config.court_height,
            paddle_width: self.config.paddle_width,
            paddle_height: self.config.paddle_height,
            ball: self.ball,
            player: self.player,
            ai: self.ai,
            score: self.score,
            difficulty: self.difficulty,
            running: self.is_running(),
        }
    }

    fn award_point(&mut self, scorer: Side) {
        self.score.award(scorer);
        log::info!(
            "{} scored : {} - {}.",
            scorer.owner(),
            self.score.player(),
            self.score.ai()
        );
        let difficulty = ai::difficulty(&self.score);
        if difficulty != self.difficulty {
            log::debug!(
                "Difficulty raised from {} to {difficulty} after {} points.",
                self.difficulty,
                self.score.total()
            );
            self.difficulty = difficulty;
        }
    }
}
