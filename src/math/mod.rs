//! Numerical building blocks: tridiagonal solves, binomial sampling weights and
//! extrapolation to an infinitely fine grid.

pub mod extrapolation;
pub mod sampling;
pub mod tridiag;

pub use extrapolation::*;
pub use sampling::*;
pub use tridiag::*;
