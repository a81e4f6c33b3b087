//! Motion and initialization steps of a discrete histogram filter.
//!
//! The motion step models uncertainty by blurring the belief grid with a
//! fixed 3x3 kernel on a torus: every cell keeps `1 - b` of its mass and
//! hands `b / 6` to each edge-adjacent neighbour and `b / 12` to each
//! diagonal one. Edges wrap, so border cells have the same eight neighbours
//! as interior cells. The kernel sums to 1 and total mass is preserved.
//!
//! Coefficients outside `[0, 1]` are resolved by a [`DomainPolicy`]; the
//! free [`blur`] function clamps them.

pub mod belief;
pub mod blur;
pub mod config;
pub mod kernel;

pub use belief::{initialize_beliefs, initialize_beliefs_from_rows};
pub use blur::{BlurFilter, blur, blur_into, blur_with_kernel};
pub use config::{BlurConfig, DomainPolicy};
pub use kernel::{BlurKernel, Kernel3, OFFSETS};
