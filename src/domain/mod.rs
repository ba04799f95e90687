//! Domain types used throughout the pipeline.
//!
//! This module defines the run configuration (`FitConfig`) and the optimizer
//! settings it carries (`AnnealSettings`, `StageFactors`, `RefineSettings`).

pub mod types;

pub use types::*;
