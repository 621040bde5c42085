use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::style::Color;

use crate::grid::{Grid, GridError};

/// Cells per side of the default board.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 120;

/// Minimum tick interval accepted from the command line.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Score granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Terminal columns used per grid cell, so cells look square.
pub const CELL_WIDTH: u16 = 2;

/// Glyph painted for one grid cell.
pub const GLYPH_CELL: &str = "██";

/// Colors applied to the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub food: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Deep-navy board with a green snake and red food.
pub const THEME_DEFAULT: Theme = Theme {
    background: Color::Rgb(0x03, 0x14, 0x24),
    food: Color::Rgb(0xef, 0x44, 0x44),
    snake_head: Color::Rgb(0x10, 0xb9, 0x81),
    snake_body: Color::Rgb(0x06, 0x5f, 0x46),
    border: Color::DarkGray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Rgb(0x10, 0xb9, 0x81),
    menu_footer: Color::DarkGray,
};

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "torus-snake", version, about)]
pub struct Cli {
    /// Cells per side of the square board.
    #[arg(long = "grid-size", default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: u16,

    /// Milliseconds between ticks.
    #[arg(
        long = "tick-ms",
        default_value_t = DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(MIN_TICK_INTERVAL_MS..)
    )]
    pub tick_ms: u64,

    /// High-score file; defaults to the platform data directory.
    #[arg(long = "score-file")]
    pub score_file: Option<PathBuf>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write tracing output to this file. Logging is off without it.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid: Grid,
    pub tick_interval: Duration,
    pub score_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Cli> for GameConfig {
    type Error = GridError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            grid: Grid::new(cli.grid_size)?,
            tick_interval: Duration::from_millis(cli.tick_ms),
            score_file: cli.score_file,
            seed: cli.seed,
            log_file: cli.log_file,
        })
    }
}
