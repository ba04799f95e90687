//! Allele-frequency spectra and their likelihoods.

pub mod afs;
pub mod likelihood;

pub use afs::*;
pub use likelihood::*;
