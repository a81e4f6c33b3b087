//! Foundational primitives for discrete histogram filters.
//!
//! ## Grids
//! A [`Grid`] is an owned, row-major, rectangular buffer with at least one
//! row and one column. Rectangularity is structural: cells live in a single
//! `Vec`, so a constructed grid can never be ragged. Nested `Vec<Vec<T>>`
//! input is validated once, at construction.
//!
//! ## Toroidal Indexing
//! Row and column indices wrap around, so the neighbour above row 0 is row
//! `rows - 1` and the neighbour left of column 0 is column `cols - 1`.

mod error;
mod grid;
mod wrap;

pub use error::Error;
pub use grid::Grid;
pub use wrap::{wrap_index, wrap_offset};
