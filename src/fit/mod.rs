//! Model fitting and comparison.
//!
//! Responsibilities:
//!
//! - turn a model and an observed spectrum into an objective (`-ll`)
//! - run the hot anneal, cold anneal and log-space BFGS stages in sequence
//! - collect fitted models into an AIC comparison table with likelihood-ratio tests

pub mod anneal;
pub mod bounds;
pub mod comparison;
pub mod driver;
pub mod objective;
pub mod refine;

pub use anneal::*;
pub use bounds::*;
pub use comparison::*;
pub use driver::*;
pub use objective::*;
pub use refine::*;

/// Result of one optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOutcome {
    /// Best parameter vector found.
    pub params: Vec<f64>,
    /// Cost at `params` (`+inf` if nothing feasible was found).
    pub cost: f64,
    /// Number of calls made to the cost function.
    pub evaluations: usize,
}
