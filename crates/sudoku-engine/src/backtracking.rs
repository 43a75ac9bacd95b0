use crate::Grid;
use std::time::{Duration, Instant};

/// Result of a backtracking solve: the first completion found (if any) and
/// the wall-clock time of the whole search, failed branches included.
#[derive(Debug, Clone)]
pub struct BacktrackingOutcome {
    pub solution: Option<Grid>,
    pub elapsed: Duration,
}

/// Depth-first backtracking solver with first-solution semantics.
///
/// Cells are visited in row-major order and digits tried in ascending order,
/// so the output is deterministic for a fixed input. Among several valid
/// completions this returns the one found first by that traversal.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the first valid completion or `None`
    /// when no completion exists. Fixed cells are never altered; the
    /// caller's grid is never mutated.
    ///
    /// The input is assumed structurally valid. A grid whose fixed cells
    /// already conflict simply comes back unsolvable.
    pub fn solve(&self, grid: &Grid) -> BacktrackingOutcome {
        let start = Instant::now();
        let mut working = grid.clone();
        let solution = if Self::search(&mut working) {
            Some(working)
        } else {
            None
        };
        BacktrackingOutcome {
            solution,
            elapsed: start.elapsed(),
        }
    }

    /// Count distinct completions, stopping once `limit` is reached.
    ///
    /// `count_solutions(grid, 2)` is the usual uniqueness probe; passing
    /// `usize::MAX` enumerates the full solution space.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = grid.clone();
        let mut count = 0;
        Self::count_recursive(&mut working, &mut count, limit);
        count
    }

    /// Check if the puzzle has exactly one solution
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }

    fn search(grid: &mut Grid) -> bool {
        let pos = match grid.find_next_empty() {
            Some(pos) => pos,
            None => return true,
        };

        for digit in 1..=9 {
            if grid.is_legal(pos, digit) {
                grid.set(pos, digit);
                if Self::search(grid) {
                    return true;
                }
                grid.set(pos, 0);
            }
        }
        false
    }

    fn count_recursive(grid: &mut Grid, count: &mut usize, limit: usize) {
        if *count >= limit {
            return;
        }

        let pos = match grid.find_next_empty() {
            Some(pos) => pos,
            None => {
                *count += 1;
                return;
            }
        };

        for digit in 1..=9 {
            if grid.is_legal(pos, digit) {
                grid.set(pos, digit);
                Self::count_recursive(grid, count, limit);
                grid.set(pos, 0);
                if *count >= limit {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    const DEMO_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const DEMO_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_solves_demo_puzzle() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let solver = BacktrackingSolver::new();

        let outcome = solver.solve(&grid);
        let solution = outcome.solution.unwrap();
        assert_eq!(solution.to_string_compact(), DEMO_SOLUTION);
        assert!(solution.is_complete());
        assert!(solution.validate().is_valid);
    }

    #[test]
    fn test_givens_preserved() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let solver = BacktrackingSolver::new();
        let solution = solver.solve(&grid).solution.unwrap();

        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                if grid.get(pos) != 0 {
                    assert_eq!(solution.get(pos), grid.get(pos));
                }
            }
        }
        // The input grid itself is untouched.
        assert_eq!(grid.to_string_compact(), DEMO_PUZZLE);
    }

    #[test]
    fn test_unsolvable_puzzle() {
        // Two fixed 5s in row 0 make every branch illegal.
        let mut grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        grid.set(Position::new(0, 8), 5);

        let solver = BacktrackingSolver::new();
        assert!(solver.solve(&grid).solution.is_none());
    }

    #[test]
    fn test_complete_puzzle_is_idempotent() {
        let full = Grid::from_string(DEMO_SOLUTION).unwrap();
        let solver = BacktrackingSolver::new();

        let outcome = solver.solve(&full);
        assert_eq!(outcome.solution.unwrap(), full);

        // Re-solving a solver's own output changes nothing.
        let first = solver.solve(&Grid::from_string(DEMO_PUZZLE).unwrap());
        let again = solver.solve(first.solution.as_ref().unwrap());
        assert_eq!(again.solution.unwrap(), first.solution.unwrap());
    }

    #[test]
    fn test_count_solutions() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let solver = BacktrackingSolver::new();
        assert!(solver.has_unique_solution(&grid));

        let empty = Grid::empty();
        assert_eq!(solver.count_solutions(&empty, 3), 3);
        assert!(!solver.has_unique_solution(&empty));
    }
}
