use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::POINTS_PER_FOOD;
use crate::food::spawn_position;
use crate::grid::{Grid, Position};
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::Snake;

/// Coarse game phase used by the UI and the session driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Fresh game waiting for its first start.
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverCause {
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Result of one engine step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Nothing moved: paused, over, or no direction chosen yet.
    Idle,
    Advanced {
        head: Position,
        ate_food: bool,
        score: u32,
        high_score_raised: bool,
    },
    GameOver {
        score: u32,
        cause: GameOverCause,
        /// The final move set a new high score (only when filling the board).
        high_score_raised: bool,
    },
}

/// Complete observable state for one game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Option<Direction>,
    pub pending_direction: Option<Direction>,
    /// `None` only once the snake has filled the board.
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub alive: bool,
    pub running: bool,
    /// Committed moves since the last reset.
    pub ticks: u64,
}

impl GameState {
    fn fresh(grid: Grid, high_score: u32, rng: &mut StdRng) -> Self {
        let snake = Snake::new(grid.center());
        let food = spawn_position(rng, grid, &snake);

        Self {
            snake,
            direction: None,
            pending_direction: None,
            food,
            score: 0,
            high_score,
            alive: true,
            running: false,
            ticks: 0,
        }
    }

    /// Returns the phase derived from the alive/running flags.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if !self.alive {
            Phase::GameOver
        } else if self.running {
            Phase::Running
        } else if self.ticks == 0 && self.direction.is_none() {
            Phase::Ready
        } else {
            Phase::Paused
        }
    }
}

/// Owns a game and advances it one tick at a time.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    state: GameState,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine with an entropy-seeded food generator.
    #[must_use]
    pub fn new(grid: Grid, high_score: u32) -> Self {
        Self::with_rng(grid, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible games.
    #[must_use]
    pub fn with_seed(grid: Grid, high_score: u32, seed: u64) -> Self {
        Self::with_rng(grid, high_score, StdRng::seed_from_u64(seed))
    }

    /// Wraps an explicit state, e.g. a prepared scenario.
    #[must_use]
    pub fn from_state(grid: Grid, state: GameState, seed: u64) -> Self {
        Self {
            grid,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(grid: Grid, high_score: u32, mut rng: StdRng) -> Self {
        let state = GameState::fresh(grid, high_score, &mut rng);
        Self { grid, state, rng }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Starts a new game, keeping the session high score.
    pub fn reset(&mut self) {
        self.state = GameState::fresh(self.grid, self.state.high_score, &mut self.rng);
        debug!(food = ?self.state.food, "game reset");
    }

    /// Records the direction for the next tick. Returns whether it was taken.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.state.alive {
            return false;
        }

        if let Some(current) = self.state.direction {
            if !direction_change_is_valid(current, direction, self.state.snake.len()) {
                return false;
            }
        }

        self.state.pending_direction = Some(direction);
        true
    }

    /// Begins ticking. Heads right when no direction was chosen yet.
    pub fn start(&mut self) -> bool {
        if !self.state.alive || self.state.running {
            return false;
        }

        if self.state.direction.is_none() {
            let initial = self
                .state
                .pending_direction
                .take()
                .unwrap_or(Direction::Right);
            self.state.direction = Some(initial);
        }

        self.state.running = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.state.alive || !self.state.running {
            return false;
        }

        self.state.running = false;
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.state.alive || self.state.running {
            return false;
        }

        self.state.running = true;
        true
    }

    /// Advances the game by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if !(self.state.running && self.state.alive) {
            return StepOutcome::Idle;
        }

        self.commit_pending_direction();

        let Some(direction) = self.state.direction else {
            return StepOutcome::Idle;
        };

        let next_head = self.grid.wrap(self.state.snake.head().offset(direction));
        let ate_food = self.state.food == Some(next_head);

        if self.state.snake.would_collide(next_head, ate_food) {
            return self.finish(GameOverCause::SelfCollision, false);
        }

        self.state.snake.advance(next_head, ate_food);
        self.state.ticks += 1;

        let mut high_score_raised = false;
        if ate_food {
            self.state.score += POINTS_PER_FOOD;
            if self.state.score > self.state.high_score {
                self.state.high_score = self.state.score;
                high_score_raised = true;
            }

            self.state.food = spawn_position(&mut self.rng, self.grid, &self.state.snake);
            debug!(
                score = self.state.score,
                length = self.state.snake.len(),
                food = ?self.state.food,
                "food eaten"
            );

            if self.state.food.is_none() {
                return self.finish(GameOverCause::BoardFilled, high_score_raised);
            }
        }

        StepOutcome::Advanced {
            head: next_head,
            ate_food,
            score: self.state.score,
            high_score_raised,
        }
    }

    fn commit_pending_direction(&mut self) {
        let Some(pending) = self.state.pending_direction.take() else {
            return;
        };

        let accepted = match self.state.direction {
            Some(current) => direction_change_is_valid(current, pending, self.state.snake.len()),
            None => true,
        };

        if accepted {
            self.state.direction = Some(pending);
        }
    }

    fn finish(&mut self, cause: GameOverCause, high_score_raised: bool) -> StepOutcome {
        self.state.alive = false;
        self.state.running = false;
        info!(
            score = self.state.score,
            length = self.state.snake.len(),
            ?cause,
            "game over"
        );

        StepOutcome::GameOver {
            score: self.state.score,
            cause,
            high_score_raised,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, GameOverCause, GameState, Phase, StepOutcome};
    use crate::grid::{Grid, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    fn grid(size: u16) -> Grid {
        Grid::new(size).expect("valid size")
    }

    fn running_state(segments: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState {
            snake: Snake::from_segments(segments).expect("non-empty body"),
            direction: Some(direction),
            pending_direction: None,
            food: Some(food),
            score: 0,
            high_score: 0,
            alive: true,
            running: true,
            ticks: 1,
        }
    }

    #[test]
    fn reset_builds_a_centered_idle_game() {
        let engine = Engine::with_seed(grid(20), 70, 1);
        let state = engine.state();

        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.direction, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 70);
        assert!(state.alive);
        assert!(!state.running);
        assert_eq!(state.phase(), Phase::Ready);
        let food = state.food.expect("food placed");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn step_without_direction_is_a_no_op() {
        let mut engine = Engine::with_seed(grid(20), 0, 2);
        engine.resume();
        let before = engine.state().clone();

        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn step_while_paused_is_a_no_op() {
        let mut engine = Engine::with_seed(grid(20), 0, 3);
        engine.request_direction(Direction::Up);
        let before = engine.state().clone();

        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn first_request_moves_the_snake() {
        let mut engine = Engine::with_seed(grid(20), 0, 4);
        engine.state.food = Some(Position::new(0, 0));
        engine.request_direction(Direction::Right);
        engine.resume();

        let outcome = engine.step();

        assert!(matches!(
            outcome,
            StepOutcome::Advanced { head, ate_food: false, .. } if head == Position::new(11, 10)
        ));
        assert_eq!(engine.state().snake.len(), 1);
        assert_eq!(engine.state().direction, Some(Direction::Right));
        assert_eq!(engine.state().pending_direction, None);
    }

    #[test]
    fn start_defaults_to_moving_right() {
        let mut engine = Engine::with_seed(grid(20), 0, 5);
        engine.state.food = Some(Position::new(0, 0));

        assert!(engine.start());
        assert!(!engine.start());
        engine.step();

        assert_eq!(engine.state().snake.head(), Position::new(11, 10));
    }

    #[test]
    fn start_keeps_a_direction_chosen_beforehand() {
        let mut engine = Engine::with_seed(grid(20), 0, 6);
        engine.state.food = Some(Position::new(0, 0));
        engine.request_direction(Direction::Up);

        engine.start();
        engine.step();

        assert_eq!(engine.state().snake.head(), Position::new(10, 9));
    }

    #[test]
    fn eating_grows_scores_and_relocates_food() {
        let state = running_state(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
            Position::new(6, 5),
        );
        let mut engine = Engine::from_state(grid(20), state, 7);

        let outcome = engine.step();

        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                head: Position::new(6, 5),
                ate_food: true,
                score: 10,
                high_score_raised: true,
            }
        );
        let segments: Vec<_> = engine.state().snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
            ]
        );
        let food = engine.state().food.expect("food relocated");
        assert!(!engine.state().snake.occupies(food));
        assert_eq!(engine.state().high_score, 10);
    }

    #[test]
    fn head_wraps_across_the_right_edge() {
        let state = running_state(
            vec![Position::new(19, 5)],
            Direction::Right,
            Position::new(3, 3),
        );
        let mut engine = Engine::from_state(grid(20), state, 8);

        engine.step();

        assert_eq!(engine.state().snake.head(), Position::new(0, 5));
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let state = running_state(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Down,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 9);

        let outcome = engine.step();

        assert_eq!(
            outcome,
            StepOutcome::GameOver {
                score: 0,
                cause: GameOverCause::SelfCollision,
                high_score_raised: false,
            }
        );
        assert!(!engine.state().alive);
        assert!(!engine.state().running);
        assert_eq!(engine.state().phase(), Phase::GameOver);
    }

    #[test]
    fn following_the_tail_is_safe() {
        // Head at (5,5) moving Right into (6,5), the cell the tail vacates.
        let state = running_state(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Right,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 10);

        let outcome = engine.step();

        assert!(matches!(outcome, StepOutcome::Advanced { .. }));
        assert_eq!(engine.state().snake.head(), Position::new(6, 5));
        assert_eq!(engine.state().snake.len(), 4);
    }

    #[test]
    fn game_over_is_terminal_until_reset() {
        let state = running_state(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Down,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 11);
        engine.step();
        let over = engine.state().clone();

        assert!(!engine.request_direction(Direction::Left));
        assert!(!engine.start());
        assert!(!engine.resume());
        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.state(), &over);

        engine.reset();
        assert!(engine.state().alive);
        assert_eq!(engine.state().phase(), Phase::Ready);
    }

    #[test]
    fn reversal_request_is_ignored_for_long_snakes() {
        let state = running_state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 12);

        assert!(!engine.request_direction(Direction::Left));
        engine.step();

        assert_eq!(engine.state().direction, Some(Direction::Right));
        assert_eq!(engine.state().snake.head(), Position::new(6, 5));
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let state = running_state(
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 13);

        assert!(engine.request_direction(Direction::Left));
        engine.step();

        assert_eq!(engine.state().snake.head(), Position::new(4, 5));
    }

    #[test]
    fn latest_request_before_a_tick_wins() {
        let state = running_state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 14);

        engine.request_direction(Direction::Up);
        engine.request_direction(Direction::Down);
        engine.step();

        assert_eq!(engine.state().snake.head(), Position::new(5, 6));
    }

    #[test]
    fn pause_and_resume_only_toggle_running() {
        let state = running_state(
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(0, 0),
        );
        let mut engine = Engine::from_state(grid(20), state, 15);

        assert!(engine.pause());
        assert!(!engine.pause());
        assert_eq!(engine.state().phase(), Phase::Paused);
        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.state().snake.head(), Position::new(5, 5));

        assert!(engine.resume());
        assert!(!engine.resume());
        engine.step();
        assert_eq!(engine.state().snake.head(), Position::new(6, 5));
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        // 2x2 board: eating the last free cell leaves nowhere for food.
        let state = running_state(
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)],
            Direction::Right,
            Position::new(1, 0),
        );
        let mut engine = Engine::from_state(grid(2), state, 16);

        let outcome = engine.step();

        assert_eq!(
            outcome,
            StepOutcome::GameOver {
                score: 10,
                cause: GameOverCause::BoardFilled,
                high_score_raised: true,
            }
        );
        assert_eq!(engine.state().snake.len(), 4);
        assert_eq!(engine.state().food, None);
        assert!(!engine.state().alive);
        assert_eq!(engine.state().high_score, 10);
    }

    #[test]
    fn high_score_survives_reset() {
        let state = running_state(
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(6, 5),
        );
        let mut engine = Engine::from_state(grid(20), state, 17);
        engine.step();

        engine.reset();

        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().high_score, 10);
    }

    #[test]
    fn lower_score_does_not_raise_high_score() {
        let mut state = running_state(
            vec![Position::new(5, 5)],
            Direction::Right,
            Position::new(6, 5),
        );
        state.high_score = 50;
        let mut engine = Engine::from_state(grid(20), state, 18);

        let outcome = engine.step();

        assert!(matches!(
            outcome,
            StepOutcome::Advanced { high_score_raised: false, score: 10, .. }
        ));
        assert_eq!(engine.state().high_score, 50);
    }
}
