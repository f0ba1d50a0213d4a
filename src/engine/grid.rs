#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::cell::{CandidateSet, Cell, Value};
use crate::engine::error::SudokuError;
use itertools::Itertools;
use std::fmt;

pub const SIZE: usize = 9;
pub const BOX: usize = 3;

/// A 9x9 puzzle state: 81 cells plus cached availability masks for every
/// row, column and box. The masks hold the values not yet committed in
/// that unit and are kept current by the propagator, not by `set_value`.
///
/// `Clone` is a full deep copy and is how the solver branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
    row_masks: [CandidateSet; SIZE],
    col_masks: [CandidateSet; SIZE],
    box_masks: [[CandidateSet; BOX]; BOX],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An empty puzzle: every cell unset with all nine candidates, every
    /// unit mask full.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::unset(); SIZE]; SIZE],
            row_masks: [CandidateSet::FULL; SIZE],
            col_masks: [CandidateSet::FULL; SIZE],
            box_masks: [[CandidateSet::FULL; BOX]; BOX],
        }
    }

    /// Parses an 81-character row-major puzzle string. Digits `1..=9` are
    /// committed values; any other character marks an unknown cell.
    pub fn from_text(text: &str) -> Result<Self, SudokuError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != SIZE * SIZE {
            return Err(SudokuError::InvalidInput(format!(
                "puzzle text has {} characters, expected {}",
                chars.len(),
                SIZE * SIZE
            )));
        }

        let mut grid = Self::new();
        for (i, c) in chars.iter().enumerate() {
            if let Some(d) = c.to_digit(10)
                && d != 0
            {
                let value = Value::try_from(d as u8)?;
                grid.set_value(i / SIZE, i % SIZE, Some(value))?;
            }
        }
        Ok(grid)
    }

    fn check_bounds(row: usize, col: usize) -> Result<(), SudokuError> {
        if row >= SIZE || col >= SIZE {
            return Err(SudokuError::InvalidInput(format!(
                "cell index ({row}, {col}) out of range"
            )));
        }
        Ok(())
    }

    /// Commits a value (clearing the cell's candidates) or resets the cell
    /// to unknown with all candidates. Peer masks are left stale; run the
    /// propagator to restore them.
    pub fn set_value(
        &mut self,
        row: usize,
        col: usize,
        value: Option<Value>,
    ) -> Result<(), SudokuError> {
        Self::check_bounds(row, col)?;
        self.cells[row][col] = match value {
            Some(v) => Cell::committed(v),
            None => Cell::unset(),
        };
        Ok(())
    }

    pub fn value(&self, row: usize, col: usize) -> Result<Option<Value>, SudokuError> {
        Self::check_bounds(row, col)?;
        Ok(self.cells[row][col].value)
    }

    pub fn candidates(&self, row: usize, col: usize) -> Result<CandidateSet, SudokuError> {
        Self::check_bounds(row, col)?;
        Ok(self.cells[row][col].candidates)
    }

    pub(crate) const fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row][col]
    }

    pub(crate) const fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row][col]
    }

    #[must_use]
    pub(crate) const fn row_mask(&self, row: usize) -> CandidateSet {
        self.row_masks[row]
    }

    pub(crate) const fn row_mask_mut(&mut self, row: usize) -> &mut CandidateSet {
        &mut self.row_masks[row]
    }

    #[must_use]
    pub(crate) const fn col_mask(&self, col: usize) -> CandidateSet {
        self.col_masks[col]
    }

    pub(crate) const fn col_mask_mut(&mut self, col: usize) -> &mut CandidateSet {
        &mut self.col_masks[col]
    }

    #[must_use]
    pub(crate) const fn box_mask(&self, row: usize, col: usize) -> CandidateSet {
        self.box_masks[row / BOX][col / BOX]
    }

    pub(crate) const fn box_mask_mut(&mut self, row: usize, col: usize) -> &mut CandidateSet {
        &mut self.box_masks[row / BOX][col / BOX]
    }

    /// Iterates `(row, col)` over all 81 positions in row-major order.
    pub fn positions() -> impl Iterator<Item = (usize, usize)> {
        (0..SIZE).cartesian_product(0..SIZE)
    }

    #[must_use]
    pub fn unsolved_count(&self) -> usize {
        Self::positions()
            .filter(|&(r, c)| !self.cells[r][c].is_set())
            .count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unsolved_count() == 0
    }

    #[must_use]
    pub fn givens(&self) -> usize {
        SIZE * SIZE - self.unsolved_count()
    }

    /// True when every cell is committed and every row, column and box
    /// contains each value exactly once.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let unit_ok = |cells: &[Option<Value>]| {
            let mut seen = CandidateSet::EMPTY;
            for v in cells.iter().flatten() {
                seen.insert(*v);
            }
            seen == CandidateSet::FULL
        };
        for i in 0..SIZE {
            let row: Vec<_> = (0..SIZE).map(|c| self.cells[i][c].value).collect();
            let col: Vec<_> = (0..SIZE).map(|r| self.cells[r][i].value).collect();
            let (br, bc) = (i / BOX * BOX, i % BOX * BOX);
            let boxed: Vec<_> = (0..BOX)
                .cartesian_product(0..BOX)
                .map(|(r, c)| self.cells[br + r][bc + c].value)
                .collect();
            if !unit_ok(&row) || !unit_ok(&col) || !unit_ok(&boxed) {
                return false;
            }
        }
        true
    }

    /// The 81-character round-trip form, `.` for unknown cells.
    #[must_use]
    pub fn as_line(&self) -> String {
        Self::positions()
            .map(|(r, c)| {
                self.cells[r][c]
                    .value
                    .map_or('.', |v| char::from(b'0' + v.get()))
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row % BOX == 0 {
                writeln!(f, "-------------------")?;
            }
            for col in 0..SIZE {
                let sep = if col % BOX == 0 { '|' } else { ' ' };
                let glyph = self.cells[row][col]
                    .value
                    .map_or('.', |v| char::from(b'0' + v.get()));
                write!(f, "{sep}{glyph}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "-------------------")
    }
}
