#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod cell;
pub mod corpus;
pub mod error;
pub mod grid;
pub mod propagation;
pub mod selection;
pub mod solver;
