// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements an easy-to-understand engine for standard 9x9
//! Sudoku. It supports the following key features:
//!
//! * Parsing and printing puzzles
//! * Reporting per-cell rule violations on a partially filled grid
//! * Computing the candidate digits of individual cells
//! * Solving puzzles by exhaustive, deterministic backtracking
//! * Running the identical search step by step, so that every placement and
//!   every undo can be observed, paused and cancelled from the outside
//!
//! # Parsing and printing puzzles
//!
//! See [Grid::parse] for the exact format of the puzzle text. Codes can be
//! used to exchange puzzles, while the `Display` implementation pretty-prints
//! a grid for terminal output.
//!
//! ```
//! use sudoku_engine::Grid;
//!
//! let grid = Grid::parse(
//!     "530070000\n\
//!      600195000\n\
//!      098000060\n\
//!      800060003\n\
//!      400803001\n\
//!      700020006\n\
//!      060000280\n\
//!      000419005\n\
//!      000080079").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Reporting rule violations
//!
//! A grid may hold any combination of digits, including one that breaks the
//! rules; [Grid::set_cell] writes unconditionally. Conflict detection is a
//! separate query which the caller invokes whenever it wants a fresh view:
//!
//! ```
//! use sudoku_engine::Grid;
//!
//! let mut grid = Grid::new();
//! grid.set_cell(0, 0, 5).unwrap();
//! grid.set_cell(0, 1, 5).unwrap();
//!
//! let conflicts = grid.conflicts();
//! assert!(conflicts.contains(&(0, 0)));
//! assert!(conflicts.contains(&(0, 1)));
//! ```
//!
//! # Solving puzzles
//!
//! [Grid::solve] attempts to complete the grid in place. On success the
//! solution is committed atomically, on failure the grid is left exactly as
//! it was. An unsolvable puzzle is an expected, reported outcome, not an
//! error; starting a search on a grid that already violates the rules is.
//!
//! ```
//! use sudoku_engine::Grid;
//!
//! let mut grid = Grid::new();
//! assert!(grid.solve().unwrap());
//! assert!(grid.is_full());
//! assert!(grid.conflicts().is_empty());
//! ```
//!
//! The search is fully deterministic: empty cells are visited in
//! column-major order and candidate digits are tried in ascending order, so
//! repeated solves of the same puzzle always find the same solution.
//!
//! # Observing the search
//!
//! The [StepController](stepper::StepController) runs the identical search,
//! but yields control after every single grid mutation, which makes it
//! suitable for animating the search:
//!
//! ```
//! use sudoku_engine::Grid;
//! use sudoku_engine::stepper::{StepController, StepEvent};
//!
//! let grid = Grid::new();
//! let mut controller = StepController::new(&grid);
//! controller.start().unwrap();
//!
//! loop {
//!     match controller.step() {
//!         StepEvent::Solved => break,
//!         StepEvent::Placed { row, col, digit } =>
//!             println!("placed {} at ({}, {})", digit, row, col),
//!         StepEvent::Undone { row, col } =>
//!             println!("undid ({}, {})", row, col),
//!         _ => break
//!     }
//! }
//!
//! assert!(controller.solution().is_some());
//! ```

pub mod conflict;
pub mod error;
pub mod solver;
pub mod stepper;


use error::{ParseError, ParseResult, SudokuError, SudokuResult};
use solver::{BacktrackingSolver, Solution, Solver};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The number of rows and columns of a [Grid].
pub const SIZE: usize = 9;

/// The edge length of one of the nine non-overlapping boxes that partition a
/// [Grid].
pub const BOX_SIZE: usize = 3;

const CELL_COUNT: usize = SIZE * SIZE;

/// The address of one cell as a `(row, column)` pair, each component in the
/// range `[0, 9[`. Addresses are plain tuples so they can be used directly
/// as map and set keys.
pub type Position = (usize, usize);

pub(crate) fn index(row: usize, column: usize) -> usize {
    row * SIZE + column
}

/// A 9x9 Sudoku grid. Each cell holds a digit in the range `[0, 9]`, where
/// `0` denotes an empty cell.
///
/// The grid itself enforces only the value range, never the Sudoku rules:
/// [Grid::set_cell] writes unconditionally and duplicate digits are legal
/// grid states. Rule violations are a derived view which is recomputed on
/// demand by [Grid::conflicts]; no conflict information is cached across
/// mutations.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct Grid {
    cells: [u8; CELL_COUNT]
}

fn to_char(digit: u8) -> char {
    if digit == 0 {
        ' '
    }
    else {
        (b'0' + digit) as char
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for column in 0..SIZE {
        if column == 0 {
            result.push(start);
        }
        else if column % BOX_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(column));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &Grid, row: usize) -> String {
    line('║', '║', '│', |column| to_char(grid.digit_at(row, column)), ' ',
        '║', true)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if row % BOX_SIZE == 0 {
                f.write_str(thick_separator_line().as_str())?;
            }
            else {
                f.write_str(thin_separator_line().as_str())?;
            }

            f.write_str(content_row(self, row).as_str())?;
        }

        f.write_str(bottom_row().as_str())
    }
}

fn parse_row(cells: &mut [u8; CELL_COUNT], row: usize, text: &str)
        -> ParseResult<()> {
    let mut column = 0;

    for c in text.chars() {
        if column >= SIZE {
            return Err(ParseError::WrongRowLength);
        }

        let digit = c.to_digit(10).ok_or(ParseError::InvalidCharacter)?;
        cells[index(row, column)] = digit as u8;
        column += 1;
    }

    if column != SIZE {
        return Err(ParseError::WrongRowLength);
    }

    Ok(())
}

impl Grid {

    /// Creates a new, empty grid in which every cell is `0`.
    pub fn new() -> Grid {
        Grid {
            cells: [0; CELL_COUNT]
        }
    }

    /// Parses the textual puzzle format: nine lines of nine digit characters
    /// each, or a single line of 81 digit characters, in row-major order,
    /// where `0` denotes an empty cell. Leading and trailing whitespace on
    /// each line is ignored; empty lines are skipped.
    ///
    /// As an example, the following two codes parse to the same grid:
    ///
    /// ```
    /// use sudoku_engine::Grid;
    ///
    /// let nine_lines = Grid::parse(
    ///     "000000000\n\
    ///      000000000\n\
    ///      000000000\n\
    ///      000000000\n\
    ///      000010000\n\
    ///      000000000\n\
    ///      000000000\n\
    ///      000000000\n\
    ///      000000000").unwrap();
    /// let block = format!("{}1{}", "0".repeat(40), "0".repeat(40));
    /// let one_block = Grid::parse(block.as_str()).unwrap();
    /// assert_eq!(nine_lines, one_block);
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of [ParseError] (see that documentation).
    pub fn parse(code: &str) -> ParseResult<Grid> {
        let rows: Vec<&str> = code.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let mut cells = [0u8; CELL_COUNT];

        if rows.len() == 1 && rows[0].chars().count() == CELL_COUNT {
            let chars: Vec<char> = rows[0].chars().collect();

            for row in 0..SIZE {
                let text: String =
                    chars[(row * SIZE)..((row + 1) * SIZE)].iter().collect();
                parse_row(&mut cells, row, text.as_str())?;
            }
        }
        else if rows.len() == SIZE {
            for (row, text) in rows.iter().enumerate() {
                parse_row(&mut cells, row, text)?;
            }
        }
        else {
            return Err(ParseError::WrongLineCount);
        }

        Ok(Grid {
            cells
        })
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [Grid::parse]: nine lines of nine digits, where `0` denotes an empty
    /// cell. A grid that is converted to text and parsed again is unchanged.
    ///
    /// ```
    /// use sudoku_engine::Grid;
    ///
    /// let mut grid = Grid::new();
    /// grid.set_cell(4, 4, 1).unwrap();
    ///
    /// let text = grid.to_text();
    /// assert_eq!(grid, Grid::parse(text.as_str()).unwrap());
    /// ```
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(CELL_COUNT + SIZE);

        for row in 0..SIZE {
            if row > 0 {
                text.push('\n');
            }

            for column in 0..SIZE {
                text.push((b'0' + self.digit_at(row, column)) as char);
            }
        }

        text
    }

    fn check_position(row: usize, column: usize) -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE {
            Err(SudokuError::OutOfRange)
        }
        else {
            Ok(())
        }
    }

    pub(crate) fn digit_at(&self, row: usize, column: usize) -> u8 {
        self.cells[index(row, column)]
    }

    pub(crate) fn write_digit(&mut self, row: usize, column: usize,
            digit: u8) {
        self.cells[index(row, column)] = digit;
    }

    /// Gets the digit in the cell at the specified position, where `0`
    /// denotes an empty cell.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` is not in the range `[0, 9[`. In that
    /// case, [SudokuError::OutOfRange] is returned.
    pub fn cell(&self, row: usize, column: usize) -> SudokuResult<u8> {
        Grid::check_position(row, column)?;
        Ok(self.digit_at(row, column))
    }

    /// Sets the cell at the specified position to the given digit, where `0`
    /// empties the cell. The write is unconditional: it does not check
    /// whether the digit violates the Sudoku rules. Use [Grid::conflicts] or
    /// [Grid::has_conflict](crate::Grid::has_conflict) afterwards for that.
    ///
    /// # Errors
    ///
    /// * [SudokuError::OutOfRange] if either `row` or `column` is not in the
    ///   range `[0, 9[`.
    /// * [SudokuError::InvalidDigit] if `digit` is greater than 9.
    pub fn set_cell(&mut self, row: usize, column: usize, digit: u8)
            -> SudokuResult<()> {
        Grid::check_position(row, column)?;

        if digit > SIZE as u8 {
            return Err(SudokuError::InvalidDigit);
        }

        self.write_digit(row, column, digit);
        Ok(())
    }

    /// Empties the cell at the specified position. Equivalent to calling
    /// [Grid::set_cell] with digit `0`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` is not in the range `[0, 9[`. In that
    /// case, [SudokuError::OutOfRange] is returned.
    pub fn clear_cell(&mut self, row: usize, column: usize)
            -> SudokuResult<()> {
        self.set_cell(row, column, 0)
    }

    /// Gets the nine digits of the specified row, in column order.
    ///
    /// # Errors
    ///
    /// If `row` is not in the range `[0, 9[`. In that case,
    /// [SudokuError::OutOfRange] is returned.
    pub fn row(&self, row: usize) -> SudokuResult<[u8; SIZE]> {
        Grid::check_position(row, 0)?;
        let mut digits = [0u8; SIZE];

        for (column, digit) in digits.iter_mut().enumerate() {
            *digit = self.digit_at(row, column);
        }

        Ok(digits)
    }

    /// Gets the nine digits of the specified column, in row order.
    ///
    /// # Errors
    ///
    /// If `column` is not in the range `[0, 9[`. In that case,
    /// [SudokuError::OutOfRange] is returned.
    pub fn column(&self, column: usize) -> SudokuResult<[u8; SIZE]> {
        Grid::check_position(0, column)?;
        let mut digits = [0u8; SIZE];

        for (row, digit) in digits.iter_mut().enumerate() {
            *digit = self.digit_at(row, column);
        }

        Ok(digits)
    }

    /// Gets the nine digits of the 3x3 box containing the cell at the
    /// specified position, in row-major order. The box covers rows
    /// `3 * (row / 3)` to `3 * (row / 3) + 2` and the analogous columns.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` is not in the range `[0, 9[`. In that
    /// case, [SudokuError::OutOfRange] is returned.
    pub fn box_of(&self, row: usize, column: usize) -> SudokuResult<[u8; SIZE]> {
        Grid::check_position(row, column)?;
        let box_row = (row / BOX_SIZE) * BOX_SIZE;
        let box_column = (column / BOX_SIZE) * BOX_SIZE;
        let mut digits = [0u8; SIZE];
        let mut i = 0;

        for r in box_row..(box_row + BOX_SIZE) {
            for c in box_column..(box_column + BOX_SIZE) {
                digits[i] = self.digit_at(r, c);
                i += 1;
            }
        }

        Ok(digits)
    }

    /// Gets the addresses of all empty cells, in column-major order, that
    /// is, all empty cells of column 0 from top to bottom, then those of
    /// column 1, and so on.
    ///
    /// This ordering determines the order in which the search visits cells
    /// and therefore, for puzzles with more than one solution, which
    /// solution is found. It must not be changed without accepting a
    /// different (still valid) solution path.
    pub fn empty_cells(&self) -> Vec<Position> {
        let mut empty = Vec::new();

        for column in 0..SIZE {
            for row in 0..SIZE {
                if self.digit_at(row, column) == 0 {
                    empty.push((row, column));
                }
            }
        }

        empty
    }

    /// Gets the first address of [Grid::empty_cells], or `None` if the grid
    /// is full.
    pub fn next_empty(&self) -> Option<Position> {
        for column in 0..SIZE {
            for row in 0..SIZE {
                if self.digit_at(row, column) == 0 {
                    return Some((row, column));
                }
            }
        }

        None
    }

    /// Sets every cell to `0`. Calling this on an already empty grid is a
    /// no-op.
    pub fn clear(&mut self) {
        self.cells = [0; CELL_COUNT];
    }

    /// Assigns the content of another grid to this one, i.e. changes the
    /// cells in this grid to the state in `other`.
    pub fn assign(&mut self, other: &Grid) {
        self.cells.copy_from_slice(&other.cells);
    }

    /// Counts the number of non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|&&digit| digit != 0).count()
    }

    /// Indicates whether every cell is filled with a digit. In this case,
    /// [Grid::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|&digit| digit == 0)
    }

    /// Indicates whether no cell is filled with a digit. In this case,
    /// [Grid::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&digit| digit == 0)
    }

    /// Attempts to complete this grid by exhaustive backtracking, using the
    /// [BacktrackingSolver]. The search operates on a private working copy:
    /// on success, `true` is returned and the solution is copied into this
    /// grid in one step; on failure, `false` is returned and the grid is
    /// left exactly as it was. An unsolvable puzzle is an expected outcome,
    /// not an error.
    ///
    /// # Errors
    ///
    /// If the conflict set of this grid is not empty. Searching over an
    /// already-conflicting grid is undefined and rejected with
    /// [SudokuError::InvalidState].
    pub fn solve(&mut self) -> SudokuResult<bool> {
        match BacktrackingSolver.solve(self)? {
            Solution::Solved(solution) => {
                self.assign(&solution);
                Ok(true)
            },
            Solution::Unsolvable => Ok(false)
        }
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new()
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(code: &str) -> ParseResult<Grid> {
        Grid::parse(code)
    }
}

impl From<Grid> for String {
    fn from(grid: Grid) -> String {
        grid.to_text()
    }
}

impl TryFrom<String> for Grid {
    type Error = ParseError;

    fn try_from(code: String) -> ParseResult<Grid> {
        Grid::parse(code.as_str())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new();

        assert!(grid.is_empty());
        assert!(!grid.is_full());
        assert_eq!(0, grid.count_clues());
        assert_eq!(81, grid.empty_cells().len());
    }

    #[test]
    fn parse_nine_lines_ok() {
        let grid = Grid::parse(
            "100000002\n\
             000000000\n\
             000000000\n\
             000000000\n\
             000050000\n\
             000000000\n\
             000000000\n\
             000000000\n\
             300000004").unwrap();

        assert_eq!(1, grid.cell(0, 0).unwrap());
        assert_eq!(2, grid.cell(0, 8).unwrap());
        assert_eq!(5, grid.cell(4, 4).unwrap());
        assert_eq!(3, grid.cell(8, 0).unwrap());
        assert_eq!(4, grid.cell(8, 8).unwrap());
        assert_eq!(5, grid.count_clues());
    }

    #[test]
    fn parse_single_block_ok() {
        let mut code = String::new();
        code.push('9');
        code.push_str("0".repeat(79).as_str());
        code.push('8');
        let grid = Grid::parse(code.as_str()).unwrap();

        assert_eq!(9, grid.cell(0, 0).unwrap());
        assert_eq!(8, grid.cell(8, 8).unwrap());
        assert_eq!(2, grid.count_clues());
    }

    #[test]
    fn parse_wrong_line_count() {
        assert_eq!(Err(ParseError::WrongLineCount),
            Grid::parse("000000000\n000000000"));
        assert_eq!(Err(ParseError::WrongLineCount), Grid::parse(""));
    }

    #[test]
    fn parse_wrong_row_length() {
        let code = "000000000\n\
            000000000\n\
            000000000\n\
            000000000\n\
            00000000\n\
            000000000\n\
            000000000\n\
            000000000\n\
            000000000";
        assert_eq!(Err(ParseError::WrongRowLength), Grid::parse(code));
    }

    #[test]
    fn parse_invalid_character() {
        let code = "000000000\n\
            000000000\n\
            000000000\n\
            000000000\n\
            0000x0000\n\
            000000000\n\
            000000000\n\
            000000000\n\
            000000000";
        assert_eq!(Err(ParseError::InvalidCharacter), Grid::parse(code));
    }

    #[test]
    fn text_round_trip() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 1).unwrap();
        grid.set_cell(3, 7, 8).unwrap();
        grid.set_cell(8, 8, 9).unwrap();

        let text = grid.to_text();

        assert_eq!(grid, Grid::parse(text.as_str()).unwrap());
    }

    #[test]
    fn cell_out_of_range() {
        let grid = Grid::new();

        assert_eq!(Err(SudokuError::OutOfRange), grid.cell(9, 0));
        assert_eq!(Err(SudokuError::OutOfRange), grid.cell(0, 9));
        assert_eq!(Err(SudokuError::OutOfRange), grid.row(9));
        assert_eq!(Err(SudokuError::OutOfRange), grid.column(9));
        assert_eq!(Err(SudokuError::OutOfRange), grid.box_of(9, 9));
    }

    #[test]
    fn set_cell_rejects_invalid_digit() {
        let mut grid = Grid::new();

        assert_eq!(Err(SudokuError::InvalidDigit), grid.set_cell(0, 0, 10));
        assert!(grid.is_empty());
    }

    #[test]
    fn set_cell_allows_overwrite_and_erase() {
        let mut grid = Grid::new();
        grid.set_cell(2, 3, 4).unwrap();
        grid.set_cell(2, 3, 7).unwrap();

        assert_eq!(7, grid.cell(2, 3).unwrap());

        grid.clear_cell(2, 3).unwrap();

        assert_eq!(0, grid.cell(2, 3).unwrap());
    }

    #[test]
    fn row_column_and_box() {
        let grid = Grid::parse(
            "123456789\n\
             456000000\n\
             789000000\n\
             000000000\n\
             000000000\n\
             000000000\n\
             000000000\n\
             000000000\n\
             000000001").unwrap();

        assert_eq!([1, 2, 3, 4, 5, 6, 7, 8, 9], grid.row(0).unwrap());
        assert_eq!([1, 4, 7, 0, 0, 0, 0, 0, 0], grid.column(0).unwrap());
        assert_eq!([1, 2, 3, 4, 5, 6, 7, 8, 9], grid.box_of(1, 1).unwrap());
        assert_eq!([1, 2, 3, 4, 5, 6, 7, 8, 9], grid.box_of(0, 2).unwrap());
        assert_eq!([0, 0, 0, 0, 0, 0, 0, 0, 1], grid.box_of(8, 8).unwrap());
    }

    #[test]
    fn empty_cells_are_column_major() {
        let mut grid = Grid::new();

        // fill everything except (5, 0), (1, 2) and (0, 7)
        for row in 0..SIZE {
            for column in 0..SIZE {
                grid.set_cell(row, column, 1).unwrap();
            }
        }

        grid.clear_cell(5, 0).unwrap();
        grid.clear_cell(1, 2).unwrap();
        grid.clear_cell(0, 7).unwrap();

        assert_eq!(vec![(5, 0), (1, 2), (0, 7)], grid.empty_cells());
        assert_eq!(Some((5, 0)), grid.next_empty());
    }

    #[test]
    fn next_empty_on_full_grid() {
        let mut grid = Grid::new();

        for row in 0..SIZE {
            for column in 0..SIZE {
                grid.set_cell(row, column, 1).unwrap();
            }
        }

        assert_eq!(None, grid.next_empty());
        assert!(grid.empty_cells().is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut grid = Grid::new();
        grid.set_cell(1, 1, 2).unwrap();
        grid.set_cell(6, 8, 3).unwrap();

        grid.clear();

        assert_eq!(Grid::new(), grid);

        grid.clear();

        assert_eq!(Grid::new(), grid);
    }

    #[test]
    fn serde_round_trip() {
        let mut grid = Grid::new();
        grid.set_cell(0, 1, 2).unwrap();
        grid.set_cell(7, 4, 6).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        let deserialized: Grid = serde_json::from_str(json.as_str()).unwrap();

        assert_eq!(grid, deserialized);
    }

    #[test]
    fn serde_rejects_malformed_text() {
        let result = serde_json::from_str::<Grid>("\"not a sudoku\"");

        assert!(result.is_err());
    }

    #[test]
    fn display_marks_boxes() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 4).unwrap();

        let printed = format!("{}", grid);

        assert!(printed.starts_with("╔═══╤═══╤═══╦"));
        assert!(printed.contains("║ 4 │"));
        assert!(printed.ends_with("╝"));
    }
}
