//! Parametric demographic models.
//!
//! Each named model maps an ordered parameter vector to a [`Demography`]: one or
//! more weighted histories sharing the same epoch layout. The [`Registry`] holds
//! the named models with their parameter names, start values and bounds.
//!
//! [`Demography`]: crate::diffusion::Demography

use thiserror::Error;

use crate::diffusion::EngineError;

pub mod catalog;
pub mod demography;
pub mod registry;

pub use demography::*;
pub use registry::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Unknown model '{0}'. Run `afs-fit models` to list the available models.")]
    Unknown(String),

    #[error("{model} expects {expected} parameters, got {got}")]
    Arity {
        model: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Model {model} is inconsistent: {reason}")]
    Inconsistent { model: String, reason: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
