//! This module contains the logic for solving a puzzle in one blocking call.
//!
//! Most importantly, this module contains the definition of the [Solver]
//! trait and the [BacktrackingSolver] as its exhaustive implementation. For
//! running the identical search one observable mutation at a time, see the
//! [stepper](crate::stepper) module.

use crate::Grid;
use crate::error::{SudokuError, SudokuResult};

use log::debug;

/// The outcome of a completed search over a [Grid].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// Indicates that the puzzle is solvable. The completed grid is wrapped
    /// in this instance.
    Solved(Grid),

    /// Indicates that the search exhausted every assignment without finding
    /// a complete, conflict-free grid. This is an expected, reportable
    /// outcome, not a fault.
    Unsolvable
}

/// A trait for structs which have the ability to solve Sudoku puzzles.
/// Implementations receive the caller's grid by reference and must leave it
/// untouched; the solution, if one exists, is returned by value.
pub trait Solver {

    /// Attempts to solve the provided grid.
    ///
    /// # Errors
    ///
    /// If the conflict set of `grid` is not empty, in which case
    /// [SudokuError::InvalidState] is returned. An unsolvable puzzle is
    /// *not* an error, it is reported as [Solution::Unsolvable].
    fn solve(&self, grid: &Grid) -> SudokuResult<Solution>;
}

/// A [Solver] which solves puzzles by recursively testing all candidate
/// digits for each empty cell, undoing every placement that does not lead to
/// a solution.
///
/// The search is fully deterministic: empty cells are visited in the
/// column-major order of [Grid::empty_cells] and candidates are tried in the
/// ascending order of [Grid::candidates]. Its worst-case runtime is
/// exponential, but recursion depth is bounded by the number of empty cells,
/// i.e. at most 81 frames.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    fn solve_rec(grid: &mut Grid) -> bool {
        let (row, column) = match grid.next_empty() {
            None => return true,
            Some(position) => position
        };

        // The candidate list is computed once per visited cell and then
        // iterated to exhaustion, even though placements deeper in the
        // recursion change the grid in between.
        for digit in grid.candidate_digits(row, column) {
            grid.write_digit(row, column, digit);

            if BacktrackingSolver::solve_rec(grid) {
                return true;
            }

            grid.write_digit(row, column, 0);
        }

        false
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&self, grid: &Grid) -> SudokuResult<Solution> {
        if !grid.conflicts().is_empty() {
            return Err(SudokuError::InvalidState);
        }

        debug!("starting backtracking search with {} clues",
            grid.count_clues());

        let mut working = grid.clone();

        if BacktrackingSolver::solve_rec(&mut working) {
            debug!("search found a solution");
            Ok(Solution::Solved(working))
        }
        else {
            debug!("search exhausted all assignments");
            Ok(Solution::Unsolvable)
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    // The example puzzle is taken from the World Puzzle Federation Sudoku GP
    // 2020 Round 8 (Puzzle 2), which has a unique solution.
    // Puzzle: https://gp.worldpuzzle.org/sites/default/files/Puzzles/2020/2020_SudokuRound8.pdf

    const GP_PUZZLE: &str = "\
        000081000\n\
        002007800\n\
        053000170\n\
        370000000\n\
        600000003\n\
        000000024\n\
        069000230\n\
        005900400\n\
        000650000";

    const GP_SOLUTION: &str = "\
        746281359\n\
        912537846\n\
        853496172\n\
        374125698\n\
        628749513\n\
        591368724\n\
        169874235\n\
        285913467\n\
        437652981";

    #[test]
    fn solves_classic_puzzle_to_known_solution() {
        let grid = Grid::parse(GP_PUZZLE).unwrap();
        let expected = Grid::parse(GP_SOLUTION).unwrap();

        match BacktrackingSolver.solve(&grid).unwrap() {
            Solution::Solved(solution) => assert_eq!(expected, solution),
            Solution::Unsolvable => panic!("solvable puzzle not solved")
        }
    }

    #[test]
    fn solver_leaves_input_grid_untouched() {
        let grid = Grid::parse(GP_PUZZLE).unwrap();
        let before = grid.clone();

        BacktrackingSolver.solve(&grid).unwrap();

        assert_eq!(before, grid);
    }

    #[test]
    fn solve_commits_solution_to_caller_grid() {
        let mut grid = Grid::parse(GP_PUZZLE).unwrap();

        assert!(grid.solve().unwrap());
        assert_eq!(Grid::parse(GP_SOLUTION).unwrap(), grid);
    }

    #[test]
    fn empty_grid_is_solvable() {
        let mut grid = Grid::new();

        assert!(grid.solve().unwrap());
        assert!(grid.is_full());
        assert!(grid.conflicts().is_empty());
    }

    #[test]
    fn solving_is_deterministic() {
        let first = {
            let mut grid = Grid::new();
            grid.solve().unwrap();
            grid
        };
        let second = {
            let mut grid = Grid::new();
            grid.solve().unwrap();
            grid
        };

        assert_eq!(first, second);
    }

    /// A valid (conflict-free) grid in which the cell (0, 0) has no
    /// candidate left: its column already holds the digits 1 to 8 and 9
    /// occurs elsewhere in row 0.
    fn unsolvable_grid() -> Grid {
        let mut grid = Grid::new();

        for row in 1..=8 {
            grid.set_cell(row, 0, row as u8).unwrap();
        }

        grid.set_cell(0, 5, 9).unwrap();
        assert!(grid.conflicts().is_empty());
        grid
    }

    #[test]
    fn unsolvable_puzzle_reported_not_raised() {
        let grid = unsolvable_grid();

        assert_eq!(Solution::Unsolvable,
            BacktrackingSolver.solve(&grid).unwrap());
    }

    #[test]
    fn failed_solve_leaves_grid_untouched() {
        let mut grid = unsolvable_grid();
        let before = grid.clone();

        assert!(!grid.solve().unwrap());
        assert_eq!(before, grid);
    }

    #[test]
    fn conflicting_grid_is_rejected() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 5).unwrap();
        grid.set_cell(0, 1, 5).unwrap();

        assert_eq!(Err(SudokuError::InvalidState),
            BacktrackingSolver.solve(&grid));
        assert_eq!(Err(SudokuError::InvalidState), grid.solve());
    }

    #[test]
    fn full_valid_grid_solves_trivially() {
        let mut grid = Grid::parse(GP_SOLUTION).unwrap();

        assert!(grid.solve().unwrap());
        assert_eq!(Grid::parse(GP_SOLUTION).unwrap(), grid);
    }
}
