//! Exact-cover solver using Knuth's Algorithm X with dancing links.
//!
//! A Sudoku puzzle maps onto a binary matrix with 324 constraint columns:
//! 81 "cell (r, c) is occupied", 81 "row r holds digit d", 81 "column c
//! holds digit d" and 81 "box b holds digit d". Each candidate placement
//! "digit d at (r, c)" is a matrix row covering exactly four of those
//! columns, and a completed grid is a set of rows covering every column
//! exactly once. Fixed cells restrict the matrix: their cell gets a single
//! row, and empty cells only get rows for placements that do not conflict
//! with a fixed digit.
//!
//! Unlike the backtracking solver this one keeps searching after the first
//! cover, so it can enumerate every distinct completion (or stop at a
//! caller-supplied cap) - the tool of choice for spotting under-constrained
//! puzzles with more than one solution.

use crate::{Grid, Position};
use std::time::{Duration, Instant};

const ROW_DIGIT_OFFSET: usize = 81;
const COL_DIGIT_OFFSET: usize = 162;
const BOX_DIGIT_OFFSET: usize = 243;
const NUM_CONSTRAINTS: usize = 324;

/// The list head node; column headers occupy nodes 1..=324.
const HEAD: usize = 0;

/// Result of an exact-cover enumeration: every completion discovered (in
/// discovery order, possibly capped) and the wall-clock time of the full
/// search.
#[derive(Debug, Clone)]
pub struct ExactCoverOutcome {
    pub found_solutions: Vec<Grid>,
    pub time_elapsed: Duration,
}

/// Exact-cover (dancing links) solver capable of multi-solution enumeration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactCoverSolver;

impl ExactCoverSolver {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate completions of `grid`, up to `max_solutions` when given.
    ///
    /// The collection is empty iff the puzzle is unsolvable; fixed-cell
    /// conflicts are not reported as errors, they simply leave a constraint
    /// column uncoverable. The caller's grid is never mutated.
    pub fn solve(&self, grid: &Grid, max_solutions: Option<usize>) -> ExactCoverOutcome {
        let start = Instant::now();
        let limit = max_solutions.unwrap_or(usize::MAX);

        let mut found_solutions = Vec::new();
        if limit > 0 {
            let mut matrix = CoverMatrix::for_puzzle(grid);
            let mut chosen = Vec::with_capacity(81);
            matrix.search(&mut chosen, &mut |placements| {
                let mut solved = grid.clone();
                for &(pos, digit) in placements {
                    solved.set(pos, digit);
                }
                found_solutions.push(solved);
                found_solutions.len() >= limit
            });
        }

        ExactCoverOutcome {
            found_solutions,
            time_elapsed: start.elapsed(),
        }
    }
}

/// The sparse incidence matrix in dancing-links form.
///
/// Nodes live in parallel arrays indexed by node id: node 0 is the head of
/// the column header list, nodes 1..=324 are the column headers, and matrix
/// nodes (four per candidate placement) follow. `cover`/`uncover` splice
/// nodes out of and back into their circular lists without ever moving
/// them, which is what lets the search backtrack in constant time per link.
struct CoverMatrix {
    left: Vec<usize>,
    right: Vec<usize>,
    up: Vec<usize>,
    down: Vec<usize>,
    /// Column header owning each node (self for headers).
    header: Vec<usize>,
    /// Live row count per column, indexed by header node id.
    size: Vec<usize>,
    /// The placement each matrix node encodes; dummy for head and headers.
    placement: Vec<(Position, u8)>,
}

impl CoverMatrix {
    /// Build the bare matrix: head plus 324 linked, empty column headers.
    fn new() -> Self {
        let n = NUM_CONSTRAINTS + 1;
        let mut matrix = CoverMatrix {
            left: Vec::with_capacity(n),
            right: Vec::with_capacity(n),
            up: Vec::with_capacity(n),
            down: Vec::with_capacity(n),
            header: Vec::with_capacity(n),
            size: vec![0; n],
            placement: Vec::with_capacity(n),
        };

        for node in 0..n {
            matrix.left.push(if node == 0 { NUM_CONSTRAINTS } else { node - 1 });
            matrix.right.push(if node == NUM_CONSTRAINTS { 0 } else { node + 1 });
            matrix.up.push(node);
            matrix.down.push(node);
            matrix.header.push(node);
            matrix.placement.push((Position::new(0, 0), 0));
        }

        matrix
    }

    /// Build the matrix for a concrete puzzle, restricted by its fixed
    /// cells: a fixed cell contributes its single placement, an empty cell
    /// contributes one row per digit not conflicting with the fixed cells.
    fn for_puzzle(grid: &Grid) -> Self {
        let mut matrix = Self::new();

        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                let fixed = grid.get(pos);
                if fixed != 0 {
                    matrix.add_placement(pos, fixed);
                } else {
                    for digit in 1..=9 {
                        if grid.is_legal(pos, digit) {
                            matrix.add_placement(pos, digit);
                        }
                    }
                }
            }
        }

        matrix
    }

    /// The four constraint columns covered by placing `digit` at `pos`.
    fn constraint_columns(pos: Position, digit: u8) -> [usize; 4] {
        let d = (digit - 1) as usize;
        [
            pos.row * 9 + pos.col,
            ROW_DIGIT_OFFSET + pos.row * 9 + d,
            COL_DIGIT_OFFSET + pos.col * 9 + d,
            BOX_DIGIT_OFFSET + pos.box_index() * 9 + d,
        ]
    }

    /// Append the matrix row for one candidate placement: four nodes linked
    /// circularly to each other and spliced onto the end of their columns.
    fn add_placement(&mut self, pos: Position, digit: u8) {
        let mut first = None;

        for constraint in Self::constraint_columns(pos, digit) {
            let column = constraint + 1;
            let node = self.left.len();

            // Vertical splice: insert just above the column header, keeping
            // rows in insertion order top to bottom.
            self.up.push(self.up[column]);
            self.down.push(column);
            self.header.push(column);
            self.placement.push((pos, digit));
            self.down[self.up[column]] = node;
            self.up[column] = node;
            self.size[column] += 1;

            // Horizontal splice into the row's own circular list.
            match first {
                None => {
                    self.left.push(node);
                    self.right.push(node);
                    first = Some(node);
                }
                Some(first) => {
                    self.left.push(self.left[first]);
                    self.right.push(first);
                    let node_left = self.left[node];
                    self.right[node_left] = node;
                    self.left[first] = node;
                }
            }
        }
    }

    /// Pick the uncovered column with the fewest live rows to minimize the
    /// branching factor. Ties go to the earliest column in header-list
    /// order (lowest constraint index), which keeps the search order
    /// deterministic.
    fn shortest_column(&self) -> usize {
        let mut selected = self.right[HEAD];
        let mut column = self.right[selected];
        while column != HEAD {
            if self.size[column] < self.size[selected] {
                selected = column;
            }
            column = self.right[column];
        }
        selected
    }

    /// Cover a column: unlink its header, then unlink every row that covers
    /// it from all other columns those rows touch.
    fn cover(&mut self, column: usize) {
        self.right[self.left[column]] = self.right[column];
        self.left[self.right[column]] = self.left[column];

        let mut row = self.down[column];
        while row != column {
            let mut node = self.right[row];
            while node != row {
                self.up[self.down[node]] = self.up[node];
                self.down[self.up[node]] = self.down[node];
                self.size[self.header[node]] -= 1;
                node = self.right[node];
            }
            row = self.down[row];
        }
    }

    /// Undo `cover`, splicing in the exact reverse order of removal.
    fn uncover(&mut self, column: usize) {
        let mut row = self.up[column];
        while row != column {
            let mut node = self.left[row];
            while node != row {
                self.size[self.header[node]] += 1;
                self.up[self.down[node]] = node;
                self.down[self.up[node]] = node;
                node = self.left[node];
            }
            row = self.up[row];
        }

        self.right[self.left[column]] = column;
        self.left[self.right[column]] = column;
    }

    /// Recursive Algorithm X. `emit` receives the placements of each exact
    /// cover found and returns true to stop the enumeration; the return
    /// value propagates that stop signal up the recursion.
    fn search(
        &mut self,
        chosen: &mut Vec<usize>,
        emit: &mut impl FnMut(&[(Position, u8)]) -> bool,
    ) -> bool {
        if self.right[HEAD] == HEAD {
            // Every constraint column is covered: decode the chosen rows.
            let placements: Vec<(Position, u8)> =
                chosen.iter().map(|&node| self.placement[node]).collect();
            return emit(&placements);
        }

        let column = self.shortest_column();
        self.cover(column);

        let mut stop = false;
        let mut row = self.down[column];
        while row != column && !stop {
            chosen.push(row);
            let mut node = self.right[row];
            while node != row {
                self.cover(self.header[node]);
                node = self.right[node];
            }

            stop = self.search(chosen, emit);

            let mut node = self.left[row];
            while node != row {
                self.uncover(self.header[node]);
                node = self.left[node];
            }
            chosen.pop();
            row = self.down[row];
        }

        self.uncover(column);
        stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BacktrackingSolver;

    const DEMO_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const DEMO_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_unique_puzzle_yields_single_solution() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let solver = ExactCoverSolver::new();

        let outcome = solver.solve(&grid, None);
        assert_eq!(outcome.found_solutions.len(), 1);
        assert_eq!(
            outcome.found_solutions[0].to_string_compact(),
            DEMO_SOLUTION
        );
    }

    #[test]
    fn test_agrees_with_backtracking() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let dlx = ExactCoverSolver::new().solve(&grid, None);
        let dfs = BacktrackingSolver::new().solve(&grid);
        assert_eq!(dlx.found_solutions[0], dfs.solution.unwrap());
    }

    #[test]
    fn test_complete_puzzle_is_sole_solution() {
        let full = Grid::from_string(DEMO_SOLUTION).unwrap();
        let outcome = ExactCoverSolver::new().solve(&full, None);
        assert_eq!(outcome.found_solutions, vec![full]);
    }

    #[test]
    fn test_unsolvable_puzzle_yields_empty_collection() {
        // Duplicate fixed 5s in row 0: the conflict surfaces as an
        // uncoverable column, never as an error.
        let mut grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        grid.set(Position::new(0, 8), 5);

        let outcome = ExactCoverSolver::new().solve(&grid, None);
        assert!(outcome.found_solutions.is_empty());
    }

    #[test]
    fn test_empty_puzzle_capped_enumeration() {
        let empty = Grid::empty();
        let outcome = ExactCoverSolver::new().solve(&empty, Some(5));
        assert_eq!(outcome.found_solutions.len(), 5);

        for solution in &outcome.found_solutions {
            assert!(solution.is_complete());
            assert!(solution.validate().is_valid);
        }
        for i in 0..outcome.found_solutions.len() {
            for j in (i + 1)..outcome.found_solutions.len() {
                assert_ne!(outcome.found_solutions[i], outcome.found_solutions[j]);
            }
        }
    }

    #[test]
    fn test_zero_cap_returns_nothing() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let outcome = ExactCoverSolver::new().solve(&grid, Some(0));
        assert!(outcome.found_solutions.is_empty());
    }

    #[test]
    fn test_multi_solution_count_matches_ground_truth() {
        // Blanking the crossed 1/3 pair at rows 3-4, columns 5 and 8 of the
        // demo solution leaves an unavoidable rectangle with exactly two
        // completions.
        let mut grid = Grid::from_string(DEMO_SOLUTION).unwrap();
        for &(row, col) in &[(3, 5), (3, 8), (4, 5), (4, 8)] {
            grid.set(Position::new(row, col), 0);
        }

        let outcome = ExactCoverSolver::new().solve(&grid, None);
        let ground_truth = BacktrackingSolver::new().count_solutions(&grid, usize::MAX);
        assert_eq!(ground_truth, 2);
        assert_eq!(outcome.found_solutions.len(), ground_truth);

        for solution in &outcome.found_solutions {
            assert!(solution.is_complete());
            assert!(solution.validate().is_valid);
            // Every given survives in every solution.
            for row in 0..9 {
                for col in 0..9 {
                    let pos = Position::new(row, col);
                    if grid.get(pos) != 0 {
                        assert_eq!(solution.get(pos), grid.get(pos));
                    }
                }
            }
        }
        assert_ne!(outcome.found_solutions[0], outcome.found_solutions[1]);
    }

    #[test]
    fn test_timing_is_reported() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let outcome = ExactCoverSolver::new().solve(&grid, None);
        // Wall-clock duration of the full enumeration, not time-to-first.
        assert!(outcome.time_elapsed > Duration::ZERO);
    }
}
