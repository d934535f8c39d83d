//! The render hook called after every tick, and a renderer writing frames to the log.

use crate::game::{Frame, Score};

/// Something drawing frames. Called once per tick, after the state update, with a read-only snapshot.
pub trait Render: Send + 'static {
    fn render(&mut self, frame: &Frame);
}

impl<F> Render for F
where
    F: FnMut(&Frame) + Send + 'static,
{
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Renders a game as log lines : the score line whenever it changes, and every frame at trace level.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_score: Option<Score>,
    last_running: Option<bool>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Render for LogRenderer {
    fn render(&mut self, frame: &Frame) {
        if self.last_score != Some(frame.score) {
            log::info!(
                "Player: {} | AI: {}",
                frame.score.player(),
                frame.score.ai()
            );
            self.last_score = Some(frame.score);
        }
        if self.last_running != Some(frame.running) {
            log::debug!("Frame {} : running = {}.", frame.tick, frame.running);
            self.last_running = Some(frame.running);
        }
        log::trace!("{frame}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::ValidCourtConfig;
    use crate::game::{ControlSignal, Game, TickOutcome};

    fn new_game(rng: &mut StdRng) -> Game {
        Game::new(ValidCourtConfig::default(), rng)
    }

    /// Tick a game with an idle player until someone scores, and return the frame of that tick.
    fn scored_frame() -> Frame {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = new_game(&mut rng);
        for _ in 0..100_000 {
            if let TickOutcome::Point(_) = game.tick(&mut rng, &ControlSignal::default()) {
                return game.frame();
            }
        }
        panic!("nobody scored");
    }

    #[test]
    fn first_frame_is_logged() {
        let frame = new_game(&mut StdRng::seed_from_u64(1)).frame();
        let mut renderer = LogRenderer::new();
        assert_eq!(renderer.last_score, None);
        assert_eq!(renderer.last_running, None);

        renderer.render(&frame);

        assert_eq!(renderer.last_score, Some(Score::new()));
        assert_eq!(renderer.last_running, Some(true));
    }

    #[test]
    fn follows_score_changes() {
        let mut renderer = LogRenderer::new();
        renderer.render(&new_game(&mut StdRng::seed_from_u64(1)).frame());

        let scored = scored_frame();
        assert_eq!(scored.score.total(), 1);
        renderer.render(&scored);
        assert_eq!(renderer.last_score, Some(scored.score));

        // Same score again, nothing to update.
        renderer.render(&Frame {
            tick: scored.tick + 1,
            ..scored
        });
        assert_eq!(renderer.last_score, Some(scored.score));
    }

    #[test]
    fn follows_pauses() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = new_game(&mut rng);
        let mut renderer = LogRenderer::new();
        renderer.render(&game.frame());

        game.set_running(false);
        renderer.render(&game.frame());
        assert_eq!(renderer.last_running, Some(false));
        assert_eq!(renderer.last_score, Some(Score::new()));

        game.set_running(true);
        renderer.render(&game.frame());
        assert_eq!(renderer.last_running, Some(true));
    }

    #[test]
    fn closures_render() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = ticks.clone();
        let mut renderer = move |frame: &Frame| sink.lock().unwrap().push(frame.tick);
        let frame = new_game(&mut StdRng::seed_from_u64(1)).frame();
        Render::render(&mut renderer, &frame);
        Render::render(&mut renderer, &Frame { tick: 1, ..frame });
        assert_eq!(*ticks.lock().unwrap(), vec![0, 1]);
    }
}
