//! Photoionization cross sections from precomputed one-electron integrals
//!
//! A run loads Hartree-Fock orbitals for the bound basis, then for each
//! outgoing-electron direction loads that direction's integral file,
//! contracts the gauge operator between the continuum wavefunction and the
//! ground orbital, and turns the transition dipole into a cross section.

pub mod app;
pub mod basis;
pub mod config;
pub mod error;
pub mod io;
pub mod physics;

pub use error::{PhotoError, Result};
