#![warn(missing_docs)]
//! A 9x9 Sudoku solver built on candidate bitmasks.
//!
//! The engine keeps one nine-bit candidate set per cell plus cached
//! availability masks per row, column and box, runs constraint propagation
//! to a fixpoint, and falls back to depth-first search with a pluggable
//! branching heuristic when deduction stalls.

/// Core solving machinery: grid model, propagator, branching strategies,
/// backtracking search and corpus reading.
pub mod engine;

/// C ABI bindings over the engine.
pub mod ffi;
