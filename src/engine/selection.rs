#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::cell::Value;
use crate::engine::grid::Grid;
use smallvec::SmallVec;

/// A branching decision: try `value` at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub row: usize,
    pub col: usize,
    pub value: Value,
}

/// Picks the next cell and value to branch on when propagation stalls.
///
/// Implementations must be pure functions of the grid state so that a
/// given puzzle always produces the same search tree.
pub trait CandidateSelection: Default {
    fn pick(&self, grid: &Grid) -> Option<Branch>;
}

/// Scored selection: prefers cells that are constrained from several
/// directions at once, then branches on the scarcest value.
///
/// A cell's score is three times its own candidate count plus the candidate
/// counts of its row, column and box masks; the lowest score wins, first in
/// row-major order on ties. Among the chosen cell's candidates, the value
/// with the fewest occurrences across all unsolved cells' candidate sets is
/// tried first, lowest value on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoredSelection;

impl CandidateSelection for ScoredSelection {
    fn pick(&self, grid: &Grid) -> Option<Branch> {
        let mut best: Option<(u32, usize, usize)> = None;
        for (row, col) in Grid::positions() {
            let cell = grid.cell(row, col);
            if cell.is_set() {
                continue;
            }
            let score = 3 * cell.candidates.len()
                + grid.row_mask(row).len()
                + grid.col_mask(col).len()
                + grid.box_mask(row, col).len();
            if best.is_none_or(|(s, _, _)| score < s) {
                best = Some((score, row, col));
            }
        }
        let (_, row, col) = best?;

        // How often each value still appears among unsolved cells.
        let mut tally = [0_u32; 9];
        for (r, c) in Grid::positions() {
            let cell = grid.cell(r, c);
            if cell.is_set() {
                continue;
            }
            for v in cell.candidates.iter() {
                tally[usize::from(v.get()) - 1] += 1;
            }
        }

        let scored: SmallVec<[(u32, Value); 9]> = grid
            .cell(row, col)
            .candidates
            .iter()
            .map(|v| (tally[usize::from(v.get()) - 1], v))
            .collect();
        let (_, value) = scored.iter().copied().min_by_key(|&(n, v)| (n, v))?;

        Some(Branch { row, col, value })
    }
}

/// Simple selection: the first cell, in row-major order, with the fewest
/// candidates, branching on its lowest candidate value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl CandidateSelection for FirstFit {
    fn pick(&self, grid: &Grid) -> Option<Branch> {
        for want in 2..=9 {
            for (row, col) in Grid::positions() {
                let cell = grid.cell(row, col);
                if cell.is_set() || cell.candidates.len() != want {
                    continue;
                }
                let value = cell.candidates.iter().next()?;
                return Some(Branch { row, col, value });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::propagation::propagate;

    const HIDDEN: &str =
        "..2.3...8.....8....31.2.....6..5.27..1.....5.2.4.6..31....8.6.5.......13..531.4..";

    fn stalled_grid() -> Grid {
        let mut grid = Grid::from_text(HIDDEN).unwrap();
        propagate(&mut grid).unwrap();
        grid
    }

    #[test]
    fn test_no_pick_on_complete_grid() {
        let mut grid = Grid::from_text(
            "974236158638591742125487936316754289742918563589362417867125394253649871491873625",
        )
        .unwrap();
        propagate(&mut grid).unwrap();
        assert_eq!(ScoredSelection.pick(&grid), None);
        assert_eq!(FirstFit.pick(&grid), None);
    }

    #[test]
    fn test_scored_is_deterministic() {
        let grid = stalled_grid();
        let a = ScoredSelection.pick(&grid).unwrap();
        let b = ScoredSelection.pick(&grid).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scored_picks_minimum_score() {
        let grid = stalled_grid();
        let picked = ScoredSelection.pick(&grid).unwrap();
        let score_at = |r: usize, c: usize| {
            3 * grid.candidates(r, c).unwrap().len()
                + grid.row_mask(r).len()
                + grid.col_mask(c).len()
                + grid.box_mask(r, c).len()
        };
        let best = Grid::positions()
            .filter(|&(r, c)| grid.value(r, c).unwrap().is_none())
            .map(|(r, c)| score_at(r, c))
            .min()
            .unwrap();
        assert_eq!(score_at(picked.row, picked.col), best);
    }

    #[test]
    fn test_picked_value_is_a_candidate() {
        let grid = stalled_grid();
        for branch in [
            ScoredSelection.pick(&grid).unwrap(),
            FirstFit.pick(&grid).unwrap(),
        ] {
            assert!(grid
                .candidates(branch.row, branch.col)
                .unwrap()
                .contains(branch.value));
        }
    }

    #[test]
    fn test_first_fit_prefers_fewest_candidates_row_major() {
        let grid = stalled_grid();
        let picked = FirstFit.pick(&grid).unwrap();
        let len_at = |r: usize, c: usize| grid.candidates(r, c).unwrap().len();
        let min_len = Grid::positions()
            .filter(|&(r, c)| grid.value(r, c).unwrap().is_none())
            .map(|(r, c)| len_at(r, c))
            .min()
            .unwrap();
        assert_eq!(len_at(picked.row, picked.col), min_len);
        let earlier_with_min = Grid::positions()
            .filter(|&(r, c)| grid.value(r, c).unwrap().is_none() && len_at(r, c) == min_len)
            .next()
            .unwrap();
        assert_eq!((picked.row, picked.col), earlier_with_min);
    }
}
