//! Two-population diffusion approximation.
//!
//! A demographic history is integrated forward in time on a discrete frequency
//! grid; the resulting density is sampled binomially to give the expected
//! allele-frequency spectrum. Results from several grid sizes are extrapolated to
//! the infinitely fine grid.
//!
//! The engine sits behind [`DiffusionEngine`] so model fitting never depends on a
//! particular numerical scheme.

use thiserror::Error;

use crate::spectrum::Spectrum;

pub mod extrapolate;
pub mod grid;
pub mod history;
pub mod solver;

pub use extrapolate::*;
pub use grid::*;
pub use history::*;
pub use solver::*;

/// Failures of a single diffusion evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("singular implicit step")]
    Singular,

    #[error("non-finite expected spectrum")]
    NonFinite,
}

/// Anything that can turn one population history into an expected spectrum.
pub trait DiffusionEngine: Sync {
    /// Expected spectrum of `history` for `sample_sizes` on a `pts x pts` grid.
    ///
    /// The spectrum is scaled to a population-scaled mutation rate of 1; the two
    /// monomorphic corners are masked.
    fn spectrum(&self, history: &History, sample_sizes: (usize, usize), pts: usize) -> Result<Spectrum, EngineError>;
}
