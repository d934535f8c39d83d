//! Fixed-rate driver of a [`Game`], running in its own tokio task.
//!
//! The task is the only mutator of the game. Everything else talks to it through the [`SchedulerHandle`] :
//! * the [`InputAdapter`] buffers the player's control signal, copied once at the start of each tick ;
//! * commands (reset, pause, resume) are queued and applied at the start of the next tick ;
//! * a [`Frame`] is published after every tick, and handed to the [`Render`] hook.

use rand::Rng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::game::{ControlSignal, Frame, Game};
use crate::input::InputAdapter;
use crate::render::Render;

/// Errors encountered while waiting for the game task.
#[derive(thiserror::Error, Debug)]
pub enum SchedulerError {
    /// The game task panicked or was aborted.
    #[error("the game task did not complete : {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Requests from outside the game task, applied between two ticks.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Command {
    ResetGame,
    SetRunning(bool),
}

/// Configuration of a game task before it is started.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scheduler {
    tick_limit: Option<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop on its own after the given number of ticks, paused ticks included.
    pub fn with_tick_limit(mut self, ticks: u64) -> Self {
        self.tick_limit = Some(ticks);
        self
    }

    /// Spawn the game task on the current tokio runtime. It ticks at the rate of the game's config until stopped.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn start<R, D>(self, game: Game, rng: R, renderer: D) -> SchedulerHandle
    where
        R: Rng + Send + 'static,
        D: Render,
    {
        let (input, controls) = InputAdapter::new();
        let (commands_sender, commands) = mpsc::unbounded_channel();
        let (frames_sender, frames) = watch::channel(game.frame());
        let (stop_sender, stop) = oneshot::channel();
        log::info!(
            "Starting the game at {} ticks per second.",
            game.config().ticks_per_second
        );
        let task = tokio::spawn(run_game_loop(
            GameTask {
                game,
                rng,
                renderer,
                controls,
                commands,
                frames: frames_sender,
                tick_limit: self.tick_limit,
            },
            stop,
        ));
        SchedulerHandle {
            input,
            commands: commands_sender,
            frames,
            stop: Some(stop_sender),
            task: Some(task),
        }
    }
}

/// Everything the game task owns.
struct GameTask<R, D> {
    game: Game,
    rng: R,
    renderer: D,
    controls: watch::Receiver<ControlSignal>,
    commands: mpsc::UnboundedReceiver<Command>,
    frames: watch::Sender<Frame>,
    tick_limit: Option<u64>,
}

impl<R, D> GameTask<R, D>
where
    R: Rng,
    D: Render,
{
    /// Apply the queued commands, run one tick, then publish and render the resulting frame.
    fn on_tick(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::ResetGame => self.game.reset_game(&mut self.rng),
                Command::SetRunning(running) => self.game.set_running(running),
            }
        }
        let signal = *self.controls.borrow();
        self.game.tick(&mut self.rng, &signal);
        let frame = self.game.frame();
        self.frames.send_replace(frame);
        self.renderer.render(&frame);
    }
}

/// Tick the game at a fixed rate until the stop signal is received or its sender dropped, or the tick limit is
/// reached. Returns the game in its final state.
async fn run_game_loop<R, D>(mut task: GameTask<R, D>, mut stop: oneshot::Receiver<()>) -> Game
where
    R: Rng,
    D: Render,
{
    let mut tick_interval = tokio::time::interval(task.game.config().tick_period());
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => {
                log::info!("Stopping the game after {ticks} ticks.");
                break;
            }
            _ = tick_interval.tick() => {
                task.on_tick();
                ticks += 1;
                if task.tick_limit.is_some_and(|limit| ticks >= limit) {
                    log::info!("Tick limit of {ticks} reached, stopping the game.");
                    break;
                }
            }
        }
    }
    task.game
}

/// Handle on a running game task. Dropping it stops the task.
#[derive(Debug)]
pub struct SchedulerHandle {
    input: InputAdapter,
    commands: mpsc::UnboundedSender<Command>,
    frames: watch::Receiver<Frame>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Game>>,
}

impl SchedulerHandle {
    /// The adapter to feed the player's device events to.
    pub fn input(&self) -> InputAdapter {
        self.input.clone()
    }

    /// A receiver of the frame published after every tick.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    /// The latest published frame.
    pub fn latest_frame(&self) -> Frame {
        *self.frames.borrow()
    }

    /// Start a new game on the next tick.
    pub fn reset_game(&self) {
        self.send(Command::ResetGame);
    }

    pub fn pause(&self) {
        self.send(Command::SetRunning(false));
    }

    pub fn resume(&self) {
        self.send(Command::SetRunning(true));
    }

    /// Whether the game task is over, either stopped or done with its tick limit.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the game task to complete on its own, and return the final game. Returns [`None`] if the task
    /// was already joined. Cancelling this future leaves the task untouched.
    pub async fn join(&mut self) -> Result<Option<Game>, SchedulerError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(None);
        };
        let result = task.await;
        self.task = None;
        self.stop = None;
        Ok(Some(result?))
    }

    /// Stop the game task and wait for it, returning the final game. Stopping an already stopped game does nothing
    /// and returns [`None`].
    pub async fn stop(&mut self) -> Result<Option<Game>, SchedulerError> {
        if let Some(stop) = self.stop.take() {
            // The task may already be over, in which case there is no one to tell.
            let _: Result<_, _> = stop.send(());
        }
        self.join().await
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::debug!("Dropping {command:?}, the game task is over.");
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
