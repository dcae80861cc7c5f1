//! Numerical collaborators of the pipeline
//!
//! The continuum builder and the cross-section formula sit behind traits so
//! the pipeline can be driven with any implementation of either.

pub mod constants;
pub mod continuum;
pub mod cross_section;

pub use continuum::{ContinuumBuilder, CoulombPartialWaves};
pub use cross_section::{CrossSectionFormula, CrossSectionModel, Polarized, SphericalAverage};
