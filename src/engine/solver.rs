#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::error::SudokuError;
use crate::engine::grid::Grid;
use crate::engine::propagation::{Fixpoint, propagate};
use crate::engine::selection::{CandidateSelection, ScoredSelection};
use log::debug;

/// Search effort counters for a single `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Deepest recursion level reached (0 when propagation alone solved it).
    pub max_depth: usize,
    /// Number of propagation fixpoints computed.
    pub propagations: u64,
    /// Number of branch values tried.
    pub branches: u64,
}

/// Depth-first search over candidate assignments, generic over the
/// branching strategy.
///
/// Every level runs propagation to a fixpoint first. When it stalls a
/// branch is tried in a cloned grid; if the branch fails, the value is
/// removed from this level's candidates for good and propagation resumes.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver<S: CandidateSelection = ScoredSelection> {
    selection: S,
}

impl<S: CandidateSelection> BacktrackingSolver<S> {
    #[must_use]
    pub fn new(selection: S) -> Self {
        Self { selection }
    }

    /// Solves the puzzle in place.
    ///
    /// On success the grid holds a complete, valid assignment and the
    /// returned stats describe the search. On failure the grid is left in
    /// an unspecified intermediate state and the error is
    /// [`SudokuError::NotSolvable`]; success with a partial grid is never
    /// reported.
    pub fn solve(&self, grid: &mut Grid) -> Result<SolveStats, SudokuError> {
        let mut stats = SolveStats::default();
        match self.search(grid, 0, &mut stats) {
            Ok(()) => Ok(stats),
            Err(e) => {
                debug!("search exhausted: {e}");
                Err(SudokuError::NotSolvable)
            }
        }
    }

    fn search(
        &self,
        grid: &mut Grid,
        depth: usize,
        stats: &mut SolveStats,
    ) -> Result<(), SudokuError> {
        stats.max_depth = stats.max_depth.max(depth);
        loop {
            stats.propagations += 1;
            match propagate(grid)? {
                Fixpoint::Solved => return Ok(()),
                Fixpoint::Stalled => {
                    let branch = self
                        .selection
                        .pick(grid)
                        .ok_or(SudokuError::NotSolvable)?;
                    stats.branches += 1;
                    debug!(
                        "depth {depth}: trying {} at ({}, {})",
                        branch.value, branch.row, branch.col
                    );

                    let mut child = grid.clone();
                    child.set_value(branch.row, branch.col, Some(branch.value))?;
                    match self.search(&mut child, depth + 1, stats) {
                        Ok(()) => {
                            *grid = child;
                            return Ok(());
                        }
                        Err(_) => {
                            // The branch is refuted; exclude it here for good
                            // and deduce again.
                            debug!(
                                "depth {depth}: excluding {} at ({}, {})",
                                branch.value, branch.row, branch.col
                            );
                            grid.cell_mut(branch.row, branch.col)
                                .candidates
                                .remove(branch.value);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::selection::FirstFit;

    const SOLVED: &str =
        "974236158638591742125487936316754289742918563589362417867125394253649871491873625";
    const ONE_BLANK: &str =
        "2564891733746159829817234565932748617128.6549468591327635147298127958634849362715";
    const NAKED: &str =
        "3.542.81.4879.15.6.29.5637485.793.416132.8957.74.6528.2413.9.655.867.192.965124.8";
    const HIDDEN: &str =
        "..2.3...8.....8....31.2.....6..5.27..1.....5.2.4.6..31....8.6.5.......13..531.4..";
    // 17 givens, the minimum for a unique solution.
    const SPARSE: &str =
        "000000010400000000020000000000050407008000300001090000300400200050100000000806000";
    const ESCARGOT: &str =
        "100007090030020008009600500005300900010080002600004000300000010040000007007000300";

    fn solve_text(text: &str) -> (Grid, SolveStats) {
        let mut grid = Grid::from_text(text).unwrap();
        let stats = BacktrackingSolver::<ScoredSelection>::default()
            .solve(&mut grid)
            .unwrap();
        (grid, stats)
    }

    #[test]
    fn test_already_solved_no_branching() {
        let (grid, stats) = solve_text(SOLVED);
        assert!(grid.is_valid_solution());
        assert_eq!(stats.branches, 0);
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn test_single_blank_no_branching() {
        let (grid, stats) = solve_text(ONE_BLANK);
        assert!(grid.is_valid_solution());
        assert_eq!(stats.branches, 0);
        assert_eq!(grid.value(4, 4).unwrap().map(|v| v.get()), Some(3));
    }

    #[test]
    fn test_easy_puzzles_solve() {
        for text in [NAKED, HIDDEN] {
            let (grid, _) = solve_text(text);
            assert!(grid.is_valid_solution());
        }
    }

    #[test]
    fn test_hard_puzzles_solve() {
        for text in [SPARSE, ESCARGOT] {
            let (grid, stats) = solve_text(text);
            assert!(grid.is_valid_solution());
            assert!(stats.propagations >= 1);
        }
    }

    #[test]
    fn test_givens_preserved() {
        let (grid, _) = solve_text(ESCARGOT);
        for (i, c) in ESCARGOT.chars().enumerate() {
            if let Some(d) = c.to_digit(10)
                && d != 0
            {
                let got = grid.value(i / 9, i % 9).unwrap().map(|v| u32::from(v.get()));
                assert_eq!(got, Some(d));
            }
        }
    }

    #[test]
    fn test_first_fit_also_solves() {
        let mut grid = Grid::from_text(ESCARGOT).unwrap();
        let stats = BacktrackingSolver::new(FirstFit).solve(&mut grid).unwrap();
        assert!(grid.is_valid_solution());
        assert!(stats.branches > 0);
    }

    #[test]
    fn test_duplicate_givens_not_solvable() {
        let text = format!("11{}", ".".repeat(79));
        let mut grid = Grid::from_text(&text).unwrap();
        let err = BacktrackingSolver::<ScoredSelection>::default()
            .solve(&mut grid)
            .unwrap_err();
        assert_eq!(err, SudokuError::NotSolvable);
    }

    #[test]
    fn test_starved_cell_not_solvable() {
        // Row 0 fixes 1..=8 and column 8 already holds the 9 the last cell
        // would need.
        let mut text = vec!['.'; 81];
        for (i, c) in "12345678".chars().enumerate() {
            text[i] = c;
        }
        text[9 + 8] = '9';
        let text: String = text.into_iter().collect();
        let mut grid = Grid::from_text(&text).unwrap();
        let err = BacktrackingSolver::<ScoredSelection>::default()
            .solve(&mut grid)
            .unwrap_err();
        assert_eq!(err, SudokuError::NotSolvable);
    }

    #[test]
    fn test_deterministic_search() {
        let (grid_a, stats_a) = solve_text(ESCARGOT);
        let (grid_b, stats_b) = solve_text(ESCARGOT);
        assert_eq!(grid_a.as_line(), grid_b.as_line());
        assert_eq!(stats_a, stats_b);
    }
}
