//! Umbrella crate for the `histogram-filter` workspace.
//!
//! Re-exports the grid primitives and the blur and initialization steps.

pub use hf_core::*;
pub use hf_filter::*;
