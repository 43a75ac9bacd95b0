use sudoku_engine::{
    BacktrackingSolver, ExactCoverSolver, Grid, Position, SolverKind, Validation,
};

/// How a status message should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// A status message for the message area below the grid
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// An editing session: the working grid plus the masks derived from it.
///
/// Owns everything the presentation layer needs - the current puzzle, the
/// fixed-cell mask from the initial grid, the duplicate-highlight mask and
/// the status message. All mutation goes through explicit methods.
pub struct Session {
    initial: Grid,
    grid: Grid,
    fixed: [[bool; 9]; 9],
    validation: Validation,
    message: Option<Message>,
}

impl Session {
    /// Start a session from an initial puzzle; its assigned cells become fixed
    pub fn new(initial: Grid) -> Self {
        let mut fixed = [[false; 9]; 9];
        for row in 0..9 {
            for col in 0..9 {
                fixed[row][col] = initial.get(Position::new(row, col)) != 0;
            }
        }

        let validation = initial.validate();
        Self {
            grid: initial.clone(),
            initial,
            fixed,
            validation,
            message: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether the cell came from the initial puzzle and cannot be edited
    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed[pos.row][pos.col]
    }

    /// Whether the cell is currently part of a duplicate pair
    pub fn is_conflict(&self, pos: Position) -> bool {
        self.validation.is_conflict(pos)
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Enter a digit at a position; 0 clears the cell. Fixed cells are
    /// refused with a message.
    pub fn enter_digit(&mut self, pos: Position, digit: u8) {
        if self.is_fixed(pos) {
            self.message = Some(Message::error("Cannot change a fixed cell!"));
            return;
        }

        self.grid.set(pos, digit);
        self.message = None;
        self.refresh_errors();
    }

    /// Restore the initial puzzle
    pub fn reset(&mut self) {
        self.grid = self.initial.clone();
        self.message = Some(Message::info("Grid Reset"));
        self.refresh_errors();
    }

    /// Run the chosen solver on a snapshot of the working grid and, on
    /// success, replace the working grid with the solution.
    pub fn solve(&mut self, kind: SolverKind) {
        match kind {
            SolverKind::Backtracking => {
                let outcome = BacktrackingSolver::new().solve(&self.grid);
                match outcome.solution {
                    Some(solution) => {
                        self.grid = solution;
                        self.message = Some(Message::success(format!(
                            "Puzzle Solved ({})! Time: {:.5} seconds",
                            kind,
                            outcome.elapsed.as_secs_f64()
                        )));
                    }
                    None => {
                        self.message = Some(Message::error("No solution exists!"));
                    }
                }
            }
            SolverKind::ExactCover => {
                // Cap at two: enough to adopt a solution and to know
                // whether the puzzle was under-constrained.
                let outcome = ExactCoverSolver::new().solve(&self.grid, Some(2));
                match outcome.found_solutions.first() {
                    Some(solution) => {
                        let note = if outcome.found_solutions.len() > 1 {
                            " (multiple solutions exist)"
                        } else {
                            ""
                        };
                        self.grid = solution.clone();
                        self.message = Some(Message::success(format!(
                            "Puzzle Solved ({})! Time: {:.5} seconds{}",
                            kind,
                            outcome.time_elapsed.as_secs_f64(),
                            note
                        )));
                    }
                    None => {
                        self.message = Some(Message::error("No solution exists!"));
                    }
                }
            }
        }
        self.refresh_errors();
    }

    /// Recompute the duplicate-highlight mask from the working grid
    fn refresh_errors(&mut self) {
        self.validation = self.grid.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    fn demo_session() -> Session {
        Session::new(Grid::from_string(DEMO_PUZZLE).unwrap())
    }

    #[test]
    fn test_fixed_cells_are_refused() {
        let mut session = demo_session();
        let fixed_pos = Position::new(0, 0);
        assert!(session.is_fixed(fixed_pos));

        session.enter_digit(fixed_pos, 9);
        assert_eq!(session.grid().get(fixed_pos), 5);
        assert_eq!(session.message().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn test_enter_and_clear_digit() {
        let mut session = demo_session();
        let pos = Position::new(0, 2);
        assert!(!session.is_fixed(pos));

        session.enter_digit(pos, 4);
        assert_eq!(session.grid().get(pos), 4);

        session.enter_digit(pos, 0);
        assert_eq!(session.grid().get(pos), 0);
    }

    #[test]
    fn test_duplicates_are_highlighted() {
        let mut session = demo_session();
        // Row 0 already holds a fixed 5 at (0, 0).
        session.enter_digit(Position::new(0, 8), 5);
        assert!(session.is_conflict(Position::new(0, 0)));
        assert!(session.is_conflict(Position::new(0, 8)));

        session.enter_digit(Position::new(0, 8), 0);
        assert!(!session.is_conflict(Position::new(0, 0)));
    }

    #[test]
    fn test_reset_restores_initial_grid() {
        let mut session = demo_session();
        session.enter_digit(Position::new(0, 2), 4);
        session.enter_digit(Position::new(8, 0), 3);

        session.reset();
        assert_eq!(session.grid().to_string_compact(), DEMO_PUZZLE);
        assert_eq!(session.message().unwrap().kind, MessageKind::Info);
    }

    #[test]
    fn test_solve_replaces_grid() {
        for kind in [SolverKind::Backtracking, SolverKind::ExactCover] {
            let mut session = demo_session();
            session.solve(kind);
            assert!(session.grid().is_complete());
            assert!(session.grid().validate().is_valid);
            assert_eq!(session.message().unwrap().kind, MessageKind::Success);
            // Givens survive the solve.
            assert_eq!(session.grid().get(Position::new(0, 0)), 5);
        }
    }

    #[test]
    fn test_solve_unsolvable_reports_error() {
        let mut session = demo_session();
        session.enter_digit(Position::new(0, 8), 5);

        for kind in [SolverKind::Backtracking, SolverKind::ExactCover] {
            session.solve(kind);
            assert_eq!(session.message().unwrap().kind, MessageKind::Error);
            assert!(!session.grid().is_complete());
        }
    }
}
