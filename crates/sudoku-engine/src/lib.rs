//! Dual-strategy 9x9 Sudoku solving engine.
//!
//! Two independent solvers share the [`Grid`] representation:
//!
//! - [`BacktrackingSolver`]: depth-first search returning the first valid
//!   completion, for interactive callers.
//! - [`ExactCoverSolver`]: dancing-links exact cover, able to enumerate
//!   every distinct completion of an under-constrained puzzle.
//!
//! Both report the elapsed wall-clock time of the solve and work on a
//! private copy of the input; the caller's grid is never mutated. "No
//! solution" is an expected outcome (an absent/empty result), while grids
//! that violate the input contract fail loudly with a [`GridError`] at
//! construction time.

mod backtracking;
mod board;
mod dlx;

pub use backtracking::{BacktrackingOutcome, BacktrackingSolver};
pub use board::{DigitSet, Grid, GridError, Position, Validation};
pub use dlx::{ExactCoverOutcome, ExactCoverSolver};

use serde::{Deserialize, Serialize};

/// Which solving strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverKind {
    Backtracking,
    ExactCover,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::Backtracking => write!(f, "backtracking"),
            SolverKind::ExactCover => write!(f, "exact cover"),
        }
    }
}
