//! Basic example of using the Sudoku engine

use sudoku_engine::{BacktrackingSolver, ExactCoverSolver, Grid};

fn main() {
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let puzzle = Grid::from_string(puzzle_string).expect("demo puzzle is well formed");

    println!("Puzzle:");
    println!("{}", puzzle);
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}\n", puzzle.empty_count());

    // Solve with depth-first backtracking
    let dfs = BacktrackingSolver::new();
    let outcome = dfs.solve(&puzzle);
    match outcome.solution {
        Some(solution) => {
            println!("Backtracking solution ({:.5}s):", outcome.elapsed.as_secs_f64());
            println!("{}", solution);
        }
        None => println!("No solution exists!"),
    }

    // Solve with exact cover, checking for multiple solutions as we go
    let dlx = ExactCoverSolver::new();
    let outcome = dlx.solve(&puzzle, Some(2));
    println!(
        "Exact cover found {} solution(s) in {:.5}s",
        outcome.found_solutions.len(),
        outcome.time_elapsed.as_secs_f64()
    );

    // An empty grid is maximally under-constrained; cap the enumeration.
    let empty = Grid::empty();
    let outcome = dlx.solve(&empty, Some(3));
    println!(
        "Empty grid: enumerated {} completions (capped) in {:.5}s",
        outcome.found_solutions.len(),
        outcome.time_elapsed.as_secs_f64()
    );
}
