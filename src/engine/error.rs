#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use std::error::Error;
use std::fmt;

/// A row, column or 3x3 box, identified by its 0-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Row(usize),
    Column(usize),
    Box(usize),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(i) => write!(f, "row {i}"),
            Self::Column(i) => write!(f, "column {i}"),
            Self::Box(i) => write!(f, "box {i}"),
        }
    }
}

/// Errors raised by grid construction, propagation and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SudokuError {
    /// Malformed caller input: bad value, bad index, bad puzzle text.
    InvalidInput(String),
    /// The same value is committed twice within one unit.
    Conflict { unit: Unit, value: u8 },
    /// An unsolved cell has no remaining candidates.
    Contradiction { row: usize, col: usize },
    /// Search exhausted every branch without finding a solution.
    NotSolvable,
}

impl fmt::Display for SudokuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Conflict { unit, value } => {
                write!(f, "conflict: value {value} appears twice in {unit}")
            }
            Self::Contradiction { row, col } => {
                write!(f, "contradiction: cell ({row}, {col}) has no candidates")
            }
            Self::NotSolvable => write!(f, "puzzle is not solvable"),
        }
    }
}

impl Error for SudokuError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = SudokuError::Conflict {
            unit: Unit::Row(3),
            value: 7,
        };
        assert_eq!(e.to_string(), "conflict: value 7 appears twice in row 3");

        let e = SudokuError::Contradiction { row: 0, col: 8 };
        assert_eq!(
            e.to_string(),
            "contradiction: cell (0, 8) has no candidates"
        );
    }
}
