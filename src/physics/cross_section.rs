//! Cross sections from transition dipoles
//!
//! Both formulas take the photon energy in hartree and the energy-normalized
//! transition dipole in atomic units, and return megabarn.

use super::constants::{BOHR2_TO_MB, FINE_STRUCTURE};
use crate::config::FormulaKind;
use nalgebra::Vector3;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Turns a transition dipole into a scalar cross section.
pub trait CrossSectionFormula: Send + Sync {
    fn evaluate(&self, photon: f64, dipole: &Vector3<Complex64>) -> f64;
}

/// Total cross section averaged over light polarization:
/// `σ = 4π² α ω |T|² / 3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalAverage;

impl CrossSectionFormula for SphericalAverage {
    fn evaluate(&self, photon: f64, dipole: &Vector3<Complex64>) -> f64 {
        let strength: f64 = dipole.iter().map(|t| t.norm_sqr()).sum();
        4.0 * PI * PI * FINE_STRUCTURE * photon * strength / 3.0 * BOHR2_TO_MB
    }
}

/// Cross section for light linearly polarized along `direction`:
/// `σ = 4π² α ω |ε·T|²`.
#[derive(Debug, Clone, Copy)]
pub struct Polarized {
    direction: Vector3<f64>,
}

impl Polarized {
    /// Polarization along the spherical angles `(theta, phi)`.
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        Self {
            direction: Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()),
        }
    }
}

impl CrossSectionFormula for Polarized {
    fn evaluate(&self, photon: f64, dipole: &Vector3<Complex64>) -> f64 {
        let projection: Complex64 = dipole
            .iter()
            .zip(self.direction.iter())
            .map(|(t, &e)| *t * e)
            .sum();
        4.0 * PI * PI * FINE_STRUCTURE * photon * projection.norm_sqr() * BOHR2_TO_MB
    }
}

/// Formula selected in the input file.
#[derive(Debug, Clone, Copy)]
pub enum CrossSectionModel {
    Total(SphericalAverage),
    Polarized(Polarized),
}

impl CrossSectionModel {
    pub fn new(kind: FormulaKind, polarization: (f64, f64)) -> Self {
        match kind {
            FormulaKind::Total => CrossSectionModel::Total(SphericalAverage),
            FormulaKind::Polarized => {
                CrossSectionModel::Polarized(Polarized::from_angles(polarization.0, polarization.1))
            }
        }
    }
}

impl CrossSectionFormula for CrossSectionModel {
    fn evaluate(&self, photon: f64, dipole: &Vector3<Complex64>) -> f64 {
        match self {
            CrossSectionModel::Total(f) => f.evaluate(photon, dipole),
            CrossSectionModel::Polarized(f) => f.evaluate(photon, dipole),
        }
    }
}
