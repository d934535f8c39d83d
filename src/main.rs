use std::{fs, io};

use clap::{Parser, ValueEnum};
use fern::FormatCallback;
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use time::format_description::well_known::Iso8601;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;

use pong_sim::config::{self, CourtConfig};
use pong_sim::{Frame, Game, InputAdapter, LogRenderer, Scheduler, SchedulerHandle};

#[derive(Parser)]
#[command(about, long_about = None)]
struct Cli {
    /// Stop after this many ticks instead of running until interrupted.
    #[arg(long, short)]
    ticks: Option<u64>,

    /// Seed the random source, for a reproducible game.
    #[arg(long, short)]
    seed: Option<u64>,

    /// Drive the player paddle with a pointer that follows the ball.
    #[arg(long, short)]
    follow_ball: bool,

    /// Set the folder path.
    ///
    /// The given path can be absolute or relative.
    /// The simulation will attempt to create all the folders nested in the path.
    #[arg(long, short, default_value = "./log/", value_name = "PATH")]
    log_folder: String,

    /// Set where the printed logging is outputted.
    #[arg(value_enum, long, short, default_value_t)]
    console_channel: ConsoleChannel,

    /// Set the most verbose level printed on the console. The log files always get everything.
    #[arg(value_enum, long, default_value_t)]
    log_level: LogLevel,

    #[command(flatten)]
    court: CourtArgs,
}

/// Court configuration options.
#[derive(clap::Args)]
struct CourtArgs {
    #[arg(long, default_value_t = config::COURT_WIDTH)]
    court_width: f64,

    #[arg(long, default_value_t = config::COURT_HEIGHT)]
    court_height: f64,

    #[arg(long, default_value_t = config::PADDLE_WIDTH)]
    paddle_width: f64,

    #[arg(long, default_value_t = config::PADDLE_HEIGHT)]
    paddle_height: f64,

    #[arg(long, default_value_t = config::BALL_RADIUS)]
    ball_radius: f64,

    /// AI paddle movement per tick, before the difficulty multiplier.
    #[arg(long, default_value_t = config::AI_SPEED)]
    ai_speed: f64,

    /// Player paddle movement per tick.
    #[arg(long, default_value_t = config::PADDLE_STEP)]
    paddle_step: f64,

    #[arg(long, default_value_t = config::SERVE_SPEED)]
    serve_speed: f64,

    #[arg(long, default_value_t = config::SERVE_MAX_DY)]
    serve_max_dy: f64,

    #[arg(long, default_value_t = config::PADDLE_BOUNCE_GAIN)]
    paddle_bounce_gain: f64,

    #[arg(long, default_value_t = config::PADDLE_DEFLECTION)]
    paddle_deflection: f64,

    #[arg(long, default_value_t = config::POINTER_DEADZONE)]
    pointer_deadzone: f64,

    #[arg(long, default_value_t = config::AI_NOISE_AMPLITUDE)]
    ai_noise_amplitude: f64,

    /// Cap the horizontal ball speed. Uncapped by default.
    #[arg(long)]
    max_ball_dx: Option<f64>,

    #[arg(long, default_value_t = config::TICKS_PER_SECOND)]
    ticks_per_second: u32,
}

impl From<CourtArgs> for CourtConfig {
    fn from(args: CourtArgs) -> Self {
        CourtConfig {
            court_width: args.court_width,
            court_height: args.court_height,
            paddle_width: args.paddle_width,
            paddle_height: args.paddle_height,
            ball_radius: args.ball_radius,
            ai_speed: args.ai_speed,
            paddle_step: args.paddle_step,
            serve_speed: args.serve_speed,
            serve_max_dy: args.serve_max_dy,
            paddle_bounce_gain: args.paddle_bounce_gain,
            paddle_deflection: args.paddle_deflection,
            pointer_deadzone: args.pointer_deadzone,
            ai_noise_amplitude: args.ai_noise_amplitude,
            max_ball_dx: args.max_ball_dx,
            ticks_per_second: args.ticks_per_second,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Default)]
enum ConsoleChannel {
    /// Print to stdout
    #[default]
    Out,
    /// Print to stderr
    Err,
}

#[derive(Copy, Clone, ValueEnum, Default)]
enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// The tokio-ran main function runs a game until the tick limit or a signal. All errors are logged, the [`Result`]
/// returned is only given for command-line environments.
#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    setup_logger(cli.log_folder, cli.console_channel, cli.log_level)
        .map_err(|e| eprintln!("Error while configuring logging : {e:?}"))?;
    let config = CourtConfig::from(cli.court)
        .validate()
        .map_err(|e| log::error!("Invalid court configuration : {e}."))?;

    let mut rng = match cli.seed {
        Some(seed) => {
            log::info!("Using random seed {seed}.");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let game = Game::new(config, &mut rng);
    let scheduler = match cli.ticks {
        Some(ticks) => Scheduler::new().with_tick_limit(ticks),
        None => Scheduler::new(),
    };
    let mut handle = scheduler.start(game, rng, LogRenderer::new());
    if cli.follow_ball {
        tokio::spawn(follow_ball(handle.frames(), handle.input()));
    }
    run_until_signaled(&mut handle).await
}

/// Set up the global logger to log to stdout/stderr and to a file named as the current timestamp.
fn setup_logger(
    log_folder: String,
    console_channel: ConsoleChannel,
    console_level: LogLevel,
) -> io::Result<()> {
    // Configure log output on the given console
    let console_config = fern::Dispatch::new()
        .level(console_level.into())
        .format(format_log);
    let console_config = match console_channel {
        ConsoleChannel::Out => console_config.chain(io::stdout()),
        ConsoleChannel::Err => console_config.chain(io::stderr()),
    };

    // Configure log output in rotating log files
    let rotator = make_rotator(log_folder)?;
    let file_config = fern::Dispatch::new()
        .level(log::LevelFilter::Trace)
        .format(format_log)
        .chain(rotator as Box<(dyn io::Write + Send)>);

    // Finish the config. Can unwrap because we know we only set the logger once.
    fern::Dispatch::new()
        .chain(console_config)
        .chain(file_config)
        .apply()
        .unwrap();
    Ok(())
}

/// Make the rotating file middleware to give to the logger.
fn make_rotator(log_folder: String) -> io::Result<Box<FileRotate<AppendCount>>> {
    fs::create_dir_all(&log_folder)?;
    let log_file_path = log_folder + "/" + &utc_now_wrapper() + ".log";
    let rotator = Box::new(FileRotate::new(
        log_file_path,
        AppendCount::new(10),
        ContentLimit::Lines(4000),
        Compression::None,
        #[cfg(unix)]
        None,
    ));
    Ok(rotator)
}

/// The function given to the logging crate [`fern`] to format messages.
fn format_log(out: FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "[{} {} {}] {}",
        utc_now_wrapper(),
        record.level(),
        &record
            .target()
            .chars()
            .take_while(|&c| c != ':')
            .collect::<String>(),
        message
    ))
}

/// Create a [`String`] of the current time in the UTC timezone, with a default in case of error.
fn utc_now_wrapper() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Iso8601::DATE_TIME)
        .unwrap_or(String::from("invalid date"))
}

/// Point the player's pointer at the ball after every frame, until the game task is over.
async fn follow_ball(mut frames: watch::Receiver<Frame>, input: InputAdapter) {
    while frames.changed().await.is_ok() {
        let ball_y = frames.borrow_and_update().ball.y;
        input.pointer_moved(ball_y);
    }
}

/// Let the game run until an interrupt or terminate signal is received, or until it stops on its own.
async fn run_until_signaled(handle: &mut SchedulerHandle) -> Result<(), ()> {
    let (mut sigint_handler, mut sigterm_handler) = match signal(SignalKind::interrupt())
        .and_then(|si| signal(SignalKind::terminate()).map(|st| (si, st)))
    {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to create the signal handlers with error : {e:?}.");
            return Err(());
        }
    };
    let res = tokio::select! {
        biased;
        signal = sigint_handler.recv() => match signal {
            Some(()) => {
                log::info!("Received an interrupt signal.");
                Ok(())
            }
            None => {
                log::error!("The interrupt signal handler stopped working, have to stop now.");
                Err(())
            }
        },
        signal = sigterm_handler.recv() => match signal {
            Some(()) => {
                log::info!("Received a terminate signal.");
                Ok(())
            }
            None => {
                log::error!("The terminate signal handler stopped working, have to stop now.");
                Err(())
            }
        },
        join_result = handle.join() => join_result
            .map(|_| ())
            .map_err(|e| log::error!("The game stopped unexpectedly : {e}.")),
    };
    log::info!("Shutting down the game...");
    match handle.stop().await {
        Ok(_) => {
            let frame = handle.latest_frame();
            log::info!(
                "Done after {} ticks, final score Player: {} | AI: {}.",
                frame.tick,
                frame.score.player(),
                frame.score.ai()
            );
            res
        }
        Err(e) => {
            log::error!("The game stopped unexpectedly : {e}.");
            Err(())
        }
    }
}
