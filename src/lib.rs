//! Snake on a wraparound square grid.
//!
//! [`engine::Engine`] holds the whole game and advances it one tick per
//! [`engine::Engine::step`] call; [`session::Session`] drives it and keeps the
//! high score. Everything else draws frames or talks to the terminal.

pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
