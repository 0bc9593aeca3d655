//! This module implements conflict detection on a [Grid], that is, finding
//! cells which violate the uniqueness rule of Sudoku: no duplicate nonzero
//! digit may share a row, a column, or a 3x3 box with another occupied cell.
//!
//! Conflict detection never mutates the grid and is recomputed from the grid
//! state on every call; there is no cached view that could go stale after a
//! mutation. All queries here are total for in-range input.
//!
//! ```
//! use sudoku_engine::Grid;
//!
//! let mut grid = Grid::new();
//! grid.set_cell(0, 0, 5).unwrap();
//! grid.set_cell(0, 1, 5).unwrap();
//!
//! assert_eq!(2, grid.conflicts().len());
//! assert!(!grid.candidates(0, 2).unwrap().contains(&5));
//! ```

use crate::{BOX_SIZE, Grid, Position, SIZE};
use crate::error::{SudokuError, SudokuResult};

use std::collections::HashSet;

impl Grid {

    fn row_contains(&self, row: usize, digit: u8) -> bool {
        (0..SIZE).any(|column| self.digit_at(row, column) == digit)
    }

    fn column_contains(&self, column: usize, digit: u8) -> bool {
        (0..SIZE).any(|row| self.digit_at(row, column) == digit)
    }

    fn box_contains(&self, row: usize, column: usize, digit: u8) -> bool {
        let box_row = (row / BOX_SIZE) * BOX_SIZE;
        let box_column = (column / BOX_SIZE) * BOX_SIZE;

        (box_row..(box_row + BOX_SIZE)).any(|r|
            (box_column..(box_column + BOX_SIZE)).any(|c|
                self.digit_at(r, c) == digit))
    }

    pub(crate) fn neighborhood_contains(&self, row: usize, column: usize,
            digit: u8) -> bool {
        self.box_contains(row, column, digit) ||
            self.row_contains(row, digit) ||
            self.column_contains(column, digit)
    }

    pub(crate) fn candidate_digits(&self, row: usize, column: usize)
            -> Vec<u8> {
        (1..=(SIZE as u8))
            .filter(|&digit| !self.neighborhood_contains(row, column, digit))
            .collect()
    }

    /// Indicates whether filling the cell at the specified position with the
    /// given digit would duplicate that digit somewhere in the cell's row,
    /// column, or box. A digit of `0` never conflicts.
    ///
    /// Note that the scan does *not* exclude the queried cell itself: if the
    /// cell already holds `digit`, the result is `true`. The query therefore
    /// answers "would this digit value create a duplicate somewhere in the
    /// neighborhood", not "does placing it here create a *new* duplicate".
    /// The search only ever queries empty cells, for which the distinction
    /// does not arise.
    ///
    /// # Errors
    ///
    /// * [SudokuError::OutOfRange] if either `row` or `column` is not in the
    ///   range `[0, 9[`.
    /// * [SudokuError::InvalidDigit] if `digit` is greater than 9.
    pub fn has_conflict(&self, row: usize, column: usize, digit: u8)
            -> SudokuResult<bool> {
        self.cell(row, column)?;

        if digit > SIZE as u8 {
            return Err(SudokuError::InvalidDigit);
        }

        Ok(digit != 0 && self.neighborhood_contains(row, column, digit))
    }

    /// Computes the set of addresses of all cells currently violating the
    /// uniqueness rule. For every occupied cell whose digit also occurs in
    /// another occupied cell of the same row, column, or box, both addresses
    /// are part of the result. An address that has already been flagged is
    /// not scanned again as an origin, but it can still be collected as the
    /// violating neighbor of another cell.
    ///
    /// The result is a fresh snapshot, recomputed from the current grid
    /// state on every call.
    pub fn conflicts(&self) -> HashSet<Position> {
        let mut conflicts = HashSet::new();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if conflicts.contains(&(row, column)) {
                    continue;
                }

                let digit = self.digit_at(row, column);

                if digit == 0 {
                    continue;
                }

                let offenders = self.offenders_of(row, column, digit);

                if !offenders.is_empty() {
                    conflicts.insert((row, column));
                    conflicts.extend(offenders);
                }
            }
        }

        conflicts
    }

    fn offenders_of(&self, row: usize, column: usize, digit: u8)
            -> Vec<Position> {
        let mut offenders = Vec::new();

        for c in 0..SIZE {
            if c != column && self.digit_at(row, c) == digit {
                offenders.push((row, c));
            }
        }

        for r in 0..SIZE {
            if r != row && self.digit_at(r, column) == digit {
                offenders.push((r, column));
            }
        }

        let box_row = (row / BOX_SIZE) * BOX_SIZE;
        let box_column = (column / BOX_SIZE) * BOX_SIZE;

        for r in box_row..(box_row + BOX_SIZE) {
            for c in box_column..(box_column + BOX_SIZE) {
                if (r, c) != (row, column) && self.digit_at(r, c) == digit {
                    offenders.push((r, c));
                }
            }
        }

        offenders
    }

    /// Computes the digits which would not produce a conflict if placed in
    /// the cell at the specified position, in ascending order. For an
    /// occupied cell, the digit it currently holds is never a candidate (see
    /// [Grid::has_conflict] on the self-inclusive neighborhood scan).
    ///
    /// The result is a fresh snapshot, not an incrementally maintained view.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` is not in the range `[0, 9[`. In that
    /// case, [SudokuError::OutOfRange] is returned.
    pub fn candidates(&self, row: usize, column: usize)
            -> SudokuResult<Vec<u8>> {
        self.cell(row, column)?;
        Ok(self.candidate_digits(row, column))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn empty_grid_has_no_conflicts() {
        let grid = Grid::new();

        assert!(grid.conflicts().is_empty());
    }

    #[test]
    fn zero_never_conflicts() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 5).unwrap();

        assert!(!grid.has_conflict(0, 1, 0).unwrap());
        assert!(!grid.has_conflict(0, 0, 0).unwrap());
    }

    #[test]
    fn duplicate_in_row_flags_both_cells() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 5).unwrap();
        grid.set_cell(0, 1, 5).unwrap();

        let conflicts = grid.conflicts();

        assert_eq!(2, conflicts.len());
        assert!(conflicts.contains(&(0, 0)));
        assert!(conflicts.contains(&(0, 1)));
    }

    #[test]
    fn duplicate_in_column_flags_both_cells() {
        let mut grid = Grid::new();
        grid.set_cell(1, 4, 3).unwrap();
        grid.set_cell(7, 4, 3).unwrap();

        let conflicts = grid.conflicts();

        assert_eq!(2, conflicts.len());
        assert!(conflicts.contains(&(1, 4)));
        assert!(conflicts.contains(&(7, 4)));
    }

    #[test]
    fn duplicate_in_box_flags_both_cells() {
        // (4, 3) and (5, 5) share the center box but neither a row nor a
        // column
        let mut grid = Grid::new();
        grid.set_cell(4, 3, 9).unwrap();
        grid.set_cell(5, 5, 9).unwrap();

        let conflicts = grid.conflicts();

        assert_eq!(2, conflicts.len());
        assert!(conflicts.contains(&(4, 3)));
        assert!(conflicts.contains(&(5, 5)));
    }

    #[test]
    fn equal_digits_in_unrelated_cells_do_not_conflict() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 5).unwrap();
        grid.set_cell(4, 4, 5).unwrap();
        grid.set_cell(8, 8, 5).unwrap();

        assert!(grid.conflicts().is_empty());
    }

    #[test]
    fn triple_duplicate_flags_all_cells() {
        let mut grid = Grid::new();
        grid.set_cell(2, 0, 7).unwrap();
        grid.set_cell(2, 4, 7).unwrap();
        grid.set_cell(2, 8, 7).unwrap();

        let conflicts = grid.conflicts();

        assert_eq!(3, conflicts.len());
        assert!(conflicts.contains(&(2, 0)));
        assert!(conflicts.contains(&(2, 4)));
        assert!(conflicts.contains(&(2, 8)));
    }

    #[test]
    fn has_conflict_includes_queried_cell() {
        // the cell itself holds the digit, so the self-inclusive scan
        // reports a conflict even though no other cell does
        let mut grid = Grid::new();
        grid.set_cell(3, 3, 6).unwrap();

        assert!(grid.has_conflict(3, 3, 6).unwrap());
        assert!(!grid.has_conflict(3, 3, 5).unwrap());
    }

    #[test]
    fn has_conflict_validates_input() {
        let grid = Grid::new();

        assert_eq!(Err(SudokuError::OutOfRange), grid.has_conflict(9, 0, 1));
        assert_eq!(Err(SudokuError::InvalidDigit),
            grid.has_conflict(0, 0, 10));
    }

    #[test]
    fn candidates_on_empty_grid() {
        let grid = Grid::new();

        assert_eq!(vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
            grid.candidates(4, 4).unwrap());
    }

    #[test]
    fn candidates_exclude_row_column_and_box() {
        let mut grid = Grid::new();
        grid.set_cell(0, 5, 1).unwrap();
        grid.set_cell(5, 0, 2).unwrap();
        grid.set_cell(1, 1, 3).unwrap();

        assert_eq!(vec![4, 5, 6, 7, 8, 9], grid.candidates(0, 0).unwrap());
    }

    #[test]
    fn single_remaining_candidate() {
        // row 0 holds 1 to 8, so only 9 remains for the last cell
        let mut grid = Grid::new();

        for column in 0..8 {
            grid.set_cell(0, column, column as u8 + 1).unwrap();
        }

        assert_eq!(vec![9], grid.candidates(0, 8).unwrap());
    }

    #[test]
    fn no_candidates_left() {
        // row 0 holds 1 to 8 and the column of the last cell holds 9
        let mut grid = Grid::new();

        for column in 0..8 {
            grid.set_cell(0, column, column as u8 + 1).unwrap();
        }

        grid.set_cell(5, 8, 9).unwrap();

        assert!(grid.conflicts().is_empty());
        assert!(grid.candidates(0, 8).unwrap().is_empty());
    }

    #[test]
    fn complete_valid_grid_has_no_conflicts() {
        let mut grid = Grid::new();
        assert!(grid.solve().unwrap());

        assert!(grid.is_full());
        assert!(grid.conflicts().is_empty());
        assert!(grid.empty_cells().is_empty());
    }
}
