//! Input/output helpers.
//!
//! - spectrum files in the `.fs` text format (`fs_file`)
//! - the timestamped run directory and its log (`output`)
//! - JSON export of the comparison table (`export`)

pub mod export;
pub mod fs_file;
pub mod output;

pub use export::*;
pub use fs_file::*;
pub use output::*;
