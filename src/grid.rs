use thiserror::Error;

use crate::input::Direction;

/// Smallest board that leaves room for food beside a one-cell snake.
pub const MIN_GRID_SIZE: u16 = 2;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step in `direction`, unwrapped.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Errors raised while building a grid.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GridError {
    #[error("grid size {size} is too small, need at least {}", MIN_GRID_SIZE)]
    TooSmall { size: u16 },
}

/// Square toroidal board. The size is fixed once constructed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Creates a `size × size` grid.
    pub fn new(size: u16) -> Result<Self, GridError> {
        if size < MIN_GRID_SIZE {
            return Err(GridError::TooSmall { size });
        }

        Ok(Self { size })
    }

    /// Returns the number of cells along one side.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn cell_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Returns the starting cell for a fresh snake.
    #[must_use]
    pub fn center(self) -> Position {
        let half = i32::from(self.size / 2);
        Position::new(half, half)
    }

    /// Returns true when the position lies inside the grid without wrapping.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        let size = i32::from(self.size);
        (0..size).contains(&position.x) && (0..size).contains(&position.y)
    }

    /// Maps any integer coordinate onto its toroidal equivalent.
    #[must_use]
    pub fn wrap(self, position: Position) -> Position {
        let size = i32::from(self.size);
        Position {
            x: position.x.rem_euclid(size),
            y: position.y.rem_euclid(size),
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let size = i32::from(self.size);
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: crate::config::DEFAULT_GRID_SIZE,
        }
    }
}
