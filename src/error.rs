//! This module contains the error and result definitions used in this crate.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Errors that can occur on methods of the [Grid](crate::Grid) and when
/// starting a search. This does not include errors that occur when parsing
/// puzzle text, see [ParseError] for that.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the grid. This is the case if either of them is greater than 8.
    OutOfRange,

    /// Indicates that some digit is invalid for a cell. This is the case if
    /// it is greater than 9 (0 is valid and denotes an empty cell).
    InvalidDigit,

    /// Indicates that a search was requested on a grid whose conflict set is
    /// not empty, or that a step controller operation was invoked in a
    /// lifecycle state that does not permit it.
    InvalidState
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::OutOfRange =>
                write!(f, "row or column index outside the 9x9 grid"),
            SudokuError::InvalidDigit =>
                write!(f, "cell digit outside the range 0 to 9"),
            SudokuError::InvalidState =>
                write!(f, "operation not permitted in the current state")
        }
    }
}

impl Error for SudokuError { }

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing puzzle text with
/// [Grid::parse](crate::Grid::parse).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {

    /// Indicates that the input does not consist of either exactly nine
    /// non-empty lines or one single 81-character line.
    WrongLineCount,

    /// Indicates that one of the nine rows does not contain exactly nine
    /// characters.
    WrongRowLength,

    /// Indicates that the input contains a character which is not a digit
    /// from 0 to 9.
    InvalidCharacter
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::WrongLineCount =>
                write!(f, "expected nine rows or one 81-character block"),
            ParseError::WrongRowLength =>
                write!(f, "expected exactly nine digits per row"),
            ParseError::InvalidCharacter =>
                write!(f, "expected only digit characters from 0 to 9")
        }
    }
}

impl Error for ParseError { }

/// Syntactic sugar for `Result<V, ParseError>`.
pub type ParseResult<V> = Result<V, ParseError>;
