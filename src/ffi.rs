#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! C ABI over the solver, for callers that hold the grid as an opaque
//! handle. Every function takes a pointer produced by [`sudoku_new`] and
//! reports failure through integer return codes; this is the only surface
//! where a null handle is a representable error.

use crate::engine::cell::Value;
use crate::engine::grid::Grid;
use crate::engine::selection::ScoredSelection;
use crate::engine::solver::BacktrackingSolver;
use std::ffi::{CStr, c_char, c_int};

/// Operation completed.
pub const SUDOKU_RC_OK: c_int = 0;
/// The grid handle was null.
pub const SUDOKU_RC_NULL: c_int = -1;
/// Malformed input: bad index, bad value or bad puzzle text.
pub const SUDOKU_RC_INVALID: c_int = -2;
/// The puzzle has no solution.
pub const SUDOKU_RC_NOT_SOLVABLE: c_int = -3;

/// Allocates an empty grid. Free it with [`sudoku_free`].
#[unsafe(no_mangle)]
pub extern "C" fn sudoku_new() -> *mut Grid {
    Box::into_raw(Box::new(Grid::new()))
}

/// Releases a grid returned by [`sudoku_new`]. A null handle is a no-op.
///
/// # Safety
///
/// `grid` must be null or a pointer obtained from [`sudoku_new`] that has
/// not already been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sudoku_free(grid: *mut Grid) {
    if !grid.is_null() {
        drop(unsafe { Box::from_raw(grid) });
    }
}

/// Resets every cell to unknown.
///
/// # Safety
///
/// `grid` must be null or a valid handle from [`sudoku_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sudoku_initialize(grid: *mut Grid) -> c_int {
    let Some(grid) = (unsafe { grid.as_mut() }) else {
        return SUDOKU_RC_NULL;
    };
    *grid = Grid::new();
    SUDOKU_RC_OK
}

/// Loads a NUL-terminated 81-character puzzle string, replacing the grid's
/// contents. Digits `1..=9` are givens; any other character is unknown.
///
/// # Safety
///
/// `grid` must be null or a valid handle; `text` must be null or a valid
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sudoku_load(grid: *mut Grid, text: *const c_char) -> c_int {
    let Some(grid) = (unsafe { grid.as_mut() }) else {
        return SUDOKU_RC_NULL;
    };
    if text.is_null() {
        return SUDOKU_RC_NULL;
    }
    let Ok(text) = unsafe { CStr::from_ptr(text) }.to_str() else {
        return SUDOKU_RC_INVALID;
    };
    match Grid::from_text(text) {
        Ok(parsed) => {
            *grid = parsed;
            SUDOKU_RC_OK
        }
        Err(_) => SUDOKU_RC_INVALID,
    }
}

/// Solves the grid in place with the default branching strategy.
///
/// # Safety
///
/// `grid` must be null or a valid handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sudoku_solve(grid: *mut Grid) -> c_int {
    let Some(grid) = (unsafe { grid.as_mut() }) else {
        return SUDOKU_RC_NULL;
    };
    match BacktrackingSolver::<ScoredSelection>::default().solve(grid) {
        Ok(_) => SUDOKU_RC_OK,
        Err(_) => SUDOKU_RC_NOT_SOLVABLE,
    }
}

/// Reads the value at `(row, col)`: `1..=9` when committed, `0` when
/// unknown, negative return codes on bad handle or index.
///
/// # Safety
///
/// `grid` must be null or a valid handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sudoku_get_value(grid: *const Grid, row: c_int, col: c_int) -> c_int {
    let Some(grid) = (unsafe { grid.as_ref() }) else {
        return SUDOKU_RC_NULL;
    };
    let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
        return SUDOKU_RC_INVALID;
    };
    match grid.value(row, col) {
        Ok(v) => v.map_or(0, |v| c_int::from(v.get())),
        Err(_) => SUDOKU_RC_INVALID,
    }
}

/// Writes a value at `(row, col)`: `1..=9` commits, `0` resets to unknown.
///
/// # Safety
///
/// `grid` must be null or a valid handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sudoku_set_value(
    grid: *mut Grid,
    row: c_int,
    col: c_int,
    value: c_int,
) -> c_int {
    let Some(grid) = (unsafe { grid.as_mut() }) else {
        return SUDOKU_RC_NULL;
    };
    let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
        return SUDOKU_RC_INVALID;
    };
    let value = if value == 0 {
        None
    } else {
        let Ok(v) = u8::try_from(value).map(Value::try_from) else {
            return SUDOKU_RC_INVALID;
        };
        match v {
            Ok(v) => Some(v),
            Err(_) => return SUDOKU_RC_INVALID,
        }
    };
    match grid.set_value(row, col, value) {
        Ok(()) => SUDOKU_RC_OK,
        Err(_) => SUDOKU_RC_INVALID,
    }
}
