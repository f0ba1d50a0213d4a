#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::cell::CandidateSet;
use crate::engine::error::{SudokuError, Unit};
use crate::engine::grid::{BOX, Grid, SIZE};
use log::trace;

/// Outcome of running propagation to a fixpoint on a consistent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixpoint {
    /// Every cell is committed.
    Solved,
    /// No more deductions; unsolved cells remain.
    Stalled,
}

/// Runs constraint propagation until nothing changes.
///
/// Each pass rebuilds the 27 unit masks from the committed values, shrinks
/// every unsolved cell's candidates to the intersection of its three unit
/// masks, and commits cells left with a single candidate. A value committed
/// twice in a unit is a [`SudokuError::Conflict`]; an unsolved cell with no
/// candidates is a [`SudokuError::Contradiction`]. Candidate sets only ever
/// shrink, so a second call at the fixpoint changes nothing.
pub fn propagate(grid: &mut Grid) -> Result<Fixpoint, SudokuError> {
    let mut pass = 0_u32;
    loop {
        pass += 1;
        let changes = refresh_unit_masks(grid)? + tighten_cells(grid) + commit_singles(grid)?;
        trace!("propagation pass {pass}: {changes} changes");
        if changes == 0 {
            break;
        }
    }
    if grid.is_complete() {
        Ok(Fixpoint::Solved)
    } else {
        Ok(Fixpoint::Stalled)
    }
}

/// Recomputes every unit mask as the complement of the values committed in
/// that unit. Returns the number of masks that changed.
fn refresh_unit_masks(grid: &mut Grid) -> Result<usize, SudokuError> {
    let mut changes = 0;

    for row in 0..SIZE {
        let mut used = CandidateSet::EMPTY;
        for col in 0..SIZE {
            if let Some(v) = grid.cell(row, col).value {
                if used.contains(v) {
                    return Err(SudokuError::Conflict {
                        unit: Unit::Row(row),
                        value: v.get(),
                    });
                }
                used.insert(v);
            }
        }
        let mask = CandidateSet::from_bits(!used.bits());
        if grid.row_mask(row) != mask {
            *grid.row_mask_mut(row) = mask;
            changes += 1;
        }
    }

    for col in 0..SIZE {
        let mut used = CandidateSet::EMPTY;
        for row in 0..SIZE {
            if let Some(v) = grid.cell(row, col).value {
                if used.contains(v) {
                    return Err(SudokuError::Conflict {
                        unit: Unit::Column(col),
                        value: v.get(),
                    });
                }
                used.insert(v);
            }
        }
        let mask = CandidateSet::from_bits(!used.bits());
        if grid.col_mask(col) != mask {
            *grid.col_mask_mut(col) = mask;
            changes += 1;
        }
    }

    for band in 0..BOX {
        for stack in 0..BOX {
            let mut used = CandidateSet::EMPTY;
            for r in 0..BOX {
                for c in 0..BOX {
                    if let Some(v) = grid.cell(band * BOX + r, stack * BOX + c).value {
                        if used.contains(v) {
                            return Err(SudokuError::Conflict {
                                unit: Unit::Box(band * BOX + stack),
                                value: v.get(),
                            });
                        }
                        used.insert(v);
                    }
                }
            }
            let mask = CandidateSet::from_bits(!used.bits());
            if grid.box_mask(band * BOX, stack * BOX) != mask {
                *grid.box_mask_mut(band * BOX, stack * BOX) = mask;
                changes += 1;
            }
        }
    }

    Ok(changes)
}

/// Intersects every unsolved cell's candidates with its row, column and box
/// masks. Returns the number of cells whose candidate set shrank.
fn tighten_cells(grid: &mut Grid) -> usize {
    let mut changes = 0;
    for (row, col) in Grid::positions() {
        if grid.cell(row, col).is_set() {
            continue;
        }
        let mask = grid.row_mask(row) & grid.col_mask(col) & grid.box_mask(row, col);
        let cell = grid.cell_mut(row, col);
        let tightened = cell.candidates & mask;
        if tightened != cell.candidates {
            cell.candidates = tightened;
            changes += 1;
        }
    }
    changes
}

/// Commits every naked single and rejects unsolved cells with no candidates
/// left. Returns the number of commits.
fn commit_singles(grid: &mut Grid) -> Result<usize, SudokuError> {
    let mut changes = 0;
    for (row, col) in Grid::positions() {
        let cell = grid.cell(row, col);
        if cell.is_set() {
            continue;
        }
        if cell.candidates.is_empty() {
            return Err(SudokuError::Contradiction { row, col });
        }
        if let Some(v) = cell.candidates.single() {
            grid.set_value(row, col, Some(v))?;
            changes += 1;
        }
    }
    Ok(changes)
}
