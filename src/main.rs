//! Breakout headless runner
//!
//! Drives sessions frame by frame with an autoplay paddle, logging what a
//! real front end would draw.

use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use breakout::persistence::FileStorage;
use breakout::platform::Presenter;
use breakout::sim::{GameEvent, GameState, RoundPhase};
use breakout::{EndAction, Flow, Session, Settings};

/// Host frame rate the runner simulates
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames before a round is abandoned (10 minutes of play)
const MAX_FRAMES_PER_ROUND: u32 = 60 * 60 * 10;
/// Render log interval, in frames
const RENDER_LOG_EVERY: u32 = 600;

/// Play Breakout rounds with an autoplay paddle
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Score save file (overrides the settings)
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Rounds to play before quitting
    #[arg(short, long, default_value_t = 3)]
    rounds: u32,

    /// Seed for the autoplay agent's aim error
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Largest aim error in world units (0 plays perfectly)
    #[arg(long, default_value_t = 120.0)]
    aim_error: f32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

/// Presenter that writes to the log instead of a screen
#[derive(Default)]
struct LogPresenter {
    frames: u32,
}

impl Presenter for LogPresenter {
    fn render_scene(&mut self, state: &GameState) {
        self.frames += 1;
        if self.frames % RENDER_LOG_EVERY != 0 {
            return;
        }
        match (state.ball, state.paddle) {
            (Some(ball), Some(paddle)) => log::debug!(
                "frame {}: ball ({:.1}, {:.1}) paddle x {:.1}, {} bricks",
                self.frames,
                ball.pos.x,
                ball.pos.y,
                paddle.x(),
                state.bricks.alive_count()
            ),
            _ => log::debug!("frame {}: {:?}", self.frames, state.phase),
        }
    }

    fn show_end_message(&mut self, message: &str) {
        log::info!("{} [Play Again] [Quit]", message);
    }
}

/// Follows the ball with a seeded aim error that changes on each paddle hit
struct Autoplay {
    rng: Pcg32,
    max_error: f32,
    offset: f32,
}

impl Autoplay {
    fn new(seed: u64, max_error: f32) -> Self {
        let mut agent = Self {
            rng: Pcg32::seed_from_u64(seed),
            max_error: max_error.abs(),
            offset: 0.0,
        };
        agent.reroll();
        agent
    }

    fn reroll(&mut self) {
        self.offset = if self.max_error > 0.0 {
            self.rng.random_range(-self.max_error..=self.max_error)
        } else {
            0.0
        };
    }

    fn target_x(&self, state: &GameState) -> Option<f32> {
        state.ball.map(|ball| ball.pos.x + self.offset)
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = match &args.config {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(save) = args.save {
        settings.save_path = save;
    }
    let settings = settings.sanitized();

    let storage = FileStorage::new(&settings.save_path);
    log::info!("Saving scores to {}", storage.path().display());

    let mut session = Session::new(&settings, storage, LogPresenter::default());
    let scores = session.scores();
    log::info!("Record so far: {} wins, {} losses", scores.wins, scores.losses);

    let mut agent = Autoplay::new(args.seed, args.aim_error);
    let mut played = 0;
    let mut frames = 0;
    session.start();

    loop {
        if let RoundPhase::Ended(_) = session.phase() {
            played += 1;
            frames = 0;
            let action = if played < args.rounds {
                EndAction::Restart
            } else {
                EndAction::Quit
            };
            log::info!("Choosing {:?}", action);
            if let Flow::Exit(code) = session.respond(action) {
                std::process::exit(code);
            }
            continue;
        }

        if frames >= MAX_FRAMES_PER_ROUND {
            log::warn!("Round abandoned after {} frames", frames);
            std::process::exit(0);
        }
        frames += 1;

        if let Some(x) = agent.target_x(session.state()) {
            session.set_paddle_target_x(x);
        }
        for event in session.advance(FRAME_DT) {
            match event {
                GameEvent::PaddleBounce => agent.reroll(),
                GameEvent::BrickDamaged { id, stage } => {
                    log::debug!("Brick {:?} now {:?} (#{:06X})", id, stage, stage.color())
                }
                GameEvent::BrickDestroyed { id, remaining } => {
                    log::debug!("Brick {:?} destroyed, {} left", id, remaining)
                }
                _ => {}
            }
        }
    }
}
