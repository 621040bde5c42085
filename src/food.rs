use rand::Rng;

use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Random draws per grid cell before switching to free-cell sampling.
pub const RESAMPLE_ATTEMPTS_PER_CELL: usize = 4;

/// Picks a uniformly random cell not occupied by the snake.
///
/// Draws random cells and redraws on a hit. Once the draw budget is spent
/// (long snake on a small board) it samples from the explicit free-cell list
/// instead. Returns `None` when the snake covers the whole grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Option<Position> {
    if snake.len() >= grid.cell_count() {
        return None;
    }

    let size = i32::from(grid.size());
    for _ in 0..grid.cell_count() * RESAMPLE_ATTEMPTS_PER_CELL {
        let candidate = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    spawn_from_free_cells(rng, grid, snake)
}

fn spawn_from_free_cells<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
) -> Option<Position> {
    let candidates: Vec<Position> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{spawn_from_free_cells, spawn_position};
    use crate::grid::{Grid, Position};
    use crate::snake::Snake;

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::new(8).expect("valid size");
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
        ])
        .expect("non-empty body");

        for _ in 0..100 {
            let food = spawn_position(&mut rng, grid, &snake).expect("free cells remain");
            assert!(!snake.occupies(food));
            assert!(grid.contains(food));
        }
    }

    #[test]
    fn nearly_full_board_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Grid::new(3).expect("valid size");
        let body: Vec<Position> = grid
            .cells()
            .filter(|cell| *cell != Position::new(2, 1))
            .collect();
        let snake = Snake::from_segments(body).expect("non-empty body");

        assert_eq!(
            spawn_position(&mut rng, grid, &snake),
            Some(Position::new(2, 1))
        );
        assert_eq!(
            spawn_from_free_cells(&mut rng, grid, &snake),
            Some(Position::new(2, 1))
        );
    }

    #[test]
    fn full_board_has_no_food_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::new(2).expect("valid size");
        let snake = Snake::from_segments(grid.cells().collect()).expect("non-empty body");

        assert_eq!(spawn_position(&mut rng, grid, &snake), None);
        assert_eq!(spawn_from_free_cells(&mut rng, grid, &snake), None);
    }
}
