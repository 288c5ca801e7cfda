//! Terminal runner (default binary).
//!
//! Plays either game in the terminal, or with `--serve` exposes the engine
//! through the TCP adapter instead.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use log::info;

use brick_game::adapter::{run_server, ServerConfig};
use brick_game::build_engine;
use brick_game::core::{Config, Engine};
use brick_game::input::{handle_key_event, HoldTracker};
use brick_game::term::{GameView, TerminalRenderer};
use brick_game::types::{GameKind, UserAction};

/// Poll interval while paused.
const PAUSED_POLL_MS: u64 = 50;

/// A quit key press waiting for the engine to confirm it.
#[derive(Debug, Default)]
struct QuitRequest {
    pending: bool,
}

impl QuitRequest {
    fn note(&mut self, action: UserAction) {
        self.pending |= action == UserAction::Terminate;
    }

    /// Called once per poll. Returns true when the loop should exit.
    ///
    /// A request the engine swallowed (no terminate edge, not over) is
    /// dropped so a later natural game over still shows its screen.
    fn settle(&mut self, terminated: bool, game_over: bool) -> bool {
        if !self.pending {
            return false;
        }
        if terminated || game_over {
            return true;
        }
        self.pending = false;
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Game {
    Snake,
    Tetris,
}

impl From<Game> for GameKind {
    fn from(game: Game) -> Self {
        match game {
            Game::Snake => GameKind::Snake,
            Game::Tetris => GameKind::Tetris,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "brick-game", version, about = "Snake and falling blocks in the terminal")]
struct Cli {
    /// Which game to play
    #[arg(value_enum, default_value_t = Game::Tetris)]
    game: Game,

    /// Piece shuffle seed (overrides BRICK_GAME_SEED)
    #[arg(long)]
    seed: Option<u32>,

    /// Serve the engine over TCP instead of playing in the terminal
    #[arg(long)]
    serve: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let kind = GameKind::from(cli.game);
    let engine = build_engine(kind, &config);
    info!("starting {} ({:?})", kind.as_str(), config);

    if cli.serve {
        return serve(engine);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, kind);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn serve(engine: Box<dyn Engine>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let engine = Arc::new(Mutex::new(engine));
    runtime.block_on(run_server(ServerConfig::from_env(), engine, None))
}

fn run(term: &mut TerminalRenderer, mut engine: Box<dyn Engine>, kind: GameKind) -> Result<()> {
    let view = GameView::new(kind);
    let mut holds = HoldTracker::new();
    let mut lines = Vec::new();
    let mut quit = QuitRequest::default();

    let mut info = engine.advance_and_snapshot();

    loop {
        view.render_into(&info, &mut lines);
        term.draw_swap(&mut lines)?;

        let frame_ms = if info.paused {
            PAUSED_POLL_MS
        } else {
            u64::from(info.speed_ms)
        };
        let deadline = Instant::now() + Duration::from_millis(frame_ms);

        // Input until the next poll is due.
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if let Some((action, held)) = handle_key_event(key) {
                        holds.observe(action, held, Instant::now());
                        quit.note(action);
                        engine.submit_input(action, held);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        for (action, held) in holds.expire(Instant::now()) {
            engine.submit_input(action, held);
        }

        info = engine.advance_and_snapshot();

        let terminated = engine.take_terminate_once();
        if quit.settle(terminated, engine.is_game_over()) {
            return Ok(());
        }
    }
}
