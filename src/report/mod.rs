//! Formatting of the run log.
//!
//! Formatting lives here so the fitting code never touches strings and output
//! changes stay in one file.

pub mod format;

pub use format::*;
