//! `afs-fit` library crate.
//!
//! The binary (`afs-fit`) is a thin wrapper around this library so that:
//!
//! - the fitting workflow is testable without spawning processes
//! - the model registry and diffusion engine are reusable on their own
//! - code stays easy to navigate as the model catalog grows

pub mod app;
pub mod cli;
pub mod diffusion;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod spectrum;
