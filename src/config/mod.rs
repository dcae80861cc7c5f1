//! Configuration for photoionization runs
//!
//! The input file is read into an [`InputData`] key/value store. Two typed
//! views are built from it: [`InitialStateConfig`], which is all a `--dump`
//! run needs, and [`SweepConfig`], which drives the direction sweep.

mod args;
mod input;

pub use args::Args;
pub use input::InputData;

use crate::basis::BasisDescriptor;
use crate::error::{PhotoError, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Interaction operator used for the transition dipole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    /// Position operators, used as loaded.
    Dipole,
    /// Gradient operators divided by the photon energy.
    Velocity,
}

impl FromStr for Gauge {
    type Err = PhotoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dipole" => Ok(Gauge::Dipole),
            "velocity" => Ok(Gauge::Velocity),
            _ => Err(PhotoError::config(format!("invalid argument for GAUGE: '{s}'"))),
        }
    }
}

/// Whether the results block is appended to the results file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Append,
    Skip,
}

impl FromStr for WriteMode {
    type Err = PhotoError;

    /// Only the first character counts: `y`/`Y` or `n`/`N`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => Ok(WriteMode::Append),
            Some('n') => Ok(WriteMode::Skip),
            _ => Err(PhotoError::config(format!("invalid argument for WRITE: '{s}'"))),
        }
    }
}

/// Cross-section formula applied to each transition dipole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    /// Total cross section averaged over light polarization.
    Total,
    /// Cross section for light polarized along (POL_THETA, POL_PHI).
    Polarized,
}

impl FromStr for FormulaKind {
    type Err = PhotoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(FormulaKind::Total),
            "polarized" => Ok(FormulaKind::Polarized),
            _ => Err(PhotoError::config(format!("invalid argument for FORMULA: '{s}'"))),
        }
    }
}

/// Settings needed to reach the continuum wavenumber.
#[derive(Debug, Clone)]
pub struct InitialStateConfig {
    pub basis: BasisDescriptor,
    pub energies_path: PathBuf,
    pub orbitals_path: PathBuf,
    /// Photon energy in eV.
    pub photon_ev: f64,
    /// PHOTON_EN exactly as written in the input, echoed in reports.
    pub photon_label: String,
}

impl InitialStateConfig {
    pub fn from_input(input: &InputData) -> Result<Self> {
        let basis = BasisDescriptor::from_input(input)?;
        let path_in = input.verbatim_first("PATH_IN")?;
        let photon_label = input.verbatim_first("PHOTON_EN")?.trim().to_string();
        let photon_ev = input.parse_first::<f64>("PHOTON_EN")?;

        Ok(Self {
            basis,
            energies_path: PathBuf::from(format!("{path_in}{}", input.verbatim_first("FILE_HF_I_EN")?)),
            orbitals_path: PathBuf::from(format!("{path_in}{}", input.verbatim_first("FILE_HF_I_VEC")?)),
            photon_ev,
            photon_label,
        })
    }
}

/// Optional sweep settings; absent keys fall back to [`SweepOptions::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOptions {
    pub formula: FormulaKind,
    /// Residual ion charge seen by the outgoing electron.
    pub ion_charge: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            formula: FormulaKind::Total,
            ion_charge: 1.0,
        }
    }
}

impl SweepOptions {
    fn from_input(input: &InputData) -> Result<Self> {
        let defaults = SweepOptions::default();
        let formula = if input.size("FORMULA") > 0 {
            input.parse_first::<FormulaKind>("FORMULA")?
        } else {
            defaults.formula
        };
        let ion_charge = if input.size("CHARGE") > 0 {
            input.parse_first::<f64>("CHARGE")?
        } else {
            defaults.ion_charge
        };
        Ok(Self {
            formula,
            ion_charge,
        })
    }
}

/// Settings for the direction sweep and the results file.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub name: String,
    pub max_l: usize,
    /// Polarization angles (theta, phi) in radians.
    pub polarization: (f64, f64),
    /// Azimuth shared by every direction job.
    pub k_phi: f64,
    pub gauge: Gauge,
    pub write: WriteMode,
    pub formula: FormulaKind,
    pub ion_charge: f64,
    pub results_path: PathBuf,
}

impl SweepConfig {
    pub fn from_input(input: &InputData) -> Result<Self> {
        let options = SweepOptions::from_input(input)?;
        let write = input.parse_first::<WriteMode>("WRITE")?;
        let results_path = match write {
            WriteMode::Append => PathBuf::from(format!(
                "{}{}",
                input.verbatim_first("PATH_OUT")?,
                input.verbatim_first("FILE_OUT")?
            )),
            WriteMode::Skip => PathBuf::new(),
        };

        Ok(Self {
            name: input.first("NAME")?.to_string(),
            max_l: input.parse_first("MAX_L")?,
            polarization: (
                input.parse_first("POL_THETA")?,
                input.parse_first("POL_PHI")?,
            ),
            k_phi: input.parse_first("K_PHI")?,
            gauge: input.parse_first("GAUGE")?,
            write,
            formula: options.formula,
            ion_charge: options.ion_charge,
            results_path,
        })
    }
}
