//! Tick driver tying an [`Engine`] to high-score storage.

use tracing::{info, warn};

use crate::engine::{Engine, GameOverCause, GameState, Phase, StepOutcome};
use crate::grid::Grid;
use crate::input::GameInput;
use crate::score::HighScoreStore;

/// What the caller should do after handling one input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// One interactive play session: an engine plus persistence.
#[derive(Debug)]
pub struct Session<S> {
    engine: Engine,
    store: S,
    last_game_over: Option<GameOverCause>,
}

impl<S: HighScoreStore> Session<S> {
    /// Builds a session, seeding the engine from the stored high score.
    ///
    /// An unreadable store counts as a high score of zero.
    pub fn new(grid: Grid, seed: Option<u64>, store: S) -> Self {
        let high_score = match store.load_high_score() {
            Ok(score) => score,
            Err(error) => {
                warn!(%error, "could not load high score, starting from 0");
                0
            }
        };

        let engine = match seed {
            Some(seed) => Engine::with_seed(grid, high_score, seed),
            None => Engine::new(grid, high_score),
        };

        Self::with_engine(engine, store)
    }

    /// Wraps an existing engine without touching the store.
    pub fn with_engine(engine: Engine, store: S) -> Self {
        Self {
            engine,
            store,
            last_game_over: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.engine.grid()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.engine.state().phase()
    }

    /// Cause of the most recent game over, cleared on restart.
    #[must_use]
    pub fn last_game_over(&self) -> Option<GameOverCause> {
        self.last_game_over
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.engine.resume()
    }

    /// Fresh game, immediately running.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.last_game_over = None;
        self.engine.start();
    }

    /// Start/pause toggle. A finished game restarts.
    pub fn toggle(&mut self) {
        match self.phase() {
            Phase::Running => {
                self.engine.pause();
            }
            Phase::Ready | Phase::Paused => {
                self.engine.start();
            }
            Phase::GameOver => self.restart(),
        }
    }

    /// Routes one input event.
    pub fn handle_input(&mut self, input: GameInput) -> Control {
        match input {
            GameInput::Direction(direction) => {
                self.engine.request_direction(direction);
            }
            GameInput::Toggle => self.toggle(),
            GameInput::Restart => self.restart(),
            GameInput::Quit => return Control::Quit,
            GameInput::Resize => {}
        }

        Control::Continue
    }

    /// Advances one tick and persists a raised high score.
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = self.engine.step();

        match outcome {
            StepOutcome::Advanced {
                high_score_raised, ..
            } => {
                if high_score_raised {
                    self.persist_high_score();
                }
            }
            StepOutcome::GameOver {
                score,
                cause,
                high_score_raised,
            } => {
                self.last_game_over = Some(cause);
                if high_score_raised {
                    self.persist_high_score();
                }
                info!(score, ?cause, "session game finished");
            }
            StepOutcome::Idle => {}
        }

        outcome
    }

    fn persist_high_score(&self) {
        let high_score = self.engine.state().high_score;
        if let Err(error) = self.store.save_high_score(high_score) {
            warn!(%error, high_score, "could not save high score");
        }
    }
}
