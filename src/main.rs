use std::io;
use std::time::Instant;

use clap::Parser;
use thiserror::Error;
use torus_snake::config::{Cli, GameConfig, THEME_DEFAULT};
use torus_snake::grid::GridError;
use torus_snake::input::InputHandler;
use torus_snake::logging::{LoggingError, init_file_logging};
use torus_snake::renderer;
use torus_snake::score::{HighScoreStore, JsonScoreStore};
use torus_snake::session::{Control, Session};
use torus_snake::terminal_runtime::TerminalSession;
use torus_snake::ui::hud::HudInfo;
use tracing::info;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

fn main() -> Result<(), AppError> {
    let config = GameConfig::try_from(Cli::parse())?;

    if let Some(path) = config.log_file.as_deref() {
        init_file_logging(path)?;
    }

    let store = match config.score_file.clone() {
        Some(path) => JsonScoreStore::new(path),
        None => JsonScoreStore::default_location(),
    };
    info!(
        grid_size = config.grid.size(),
        tick_interval = ?config.tick_interval,
        score_file = %store.path().display(),
        "starting"
    );

    let session = Session::new(config.grid, config.seed, store);
    run(&config, session)?;

    info!("exiting");
    Ok(())
}

fn run<S: HighScoreStore>(config: &GameConfig, mut session: Session<S>) -> io::Result<()> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            renderer::render(
                frame,
                session.state(),
                session.grid(),
                HudInfo {
                    theme: &THEME_DEFAULT,
                    game_over: session.last_game_over(),
                },
            )
        })?;

        let timeout = config.tick_interval.saturating_sub(last_tick.elapsed());
        if let Some(game_input) = input.poll_input(timeout)? {
            if session.handle_input(game_input) == Control::Quit {
                break;
            }
        }

        if last_tick.elapsed() >= config.tick_interval {
            session.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
