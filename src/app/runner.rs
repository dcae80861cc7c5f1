//! Cross-section pipeline
//!
//! One run loads the initial-state orbitals once, then evaluates every
//! direction job: continuum coefficients, gauge operators, transition
//! dipole, cross section.

use super::jobs::{DirectionJob, DirectionJobs};
use crate::basis::BasisDescriptor;
use crate::config::{Gauge, InitialStateConfig, SweepConfig};
use crate::error::{PhotoError, Result};
use crate::io::{Axis, DiskReader};
use crate::physics::constants::AU_TO_EV;
use crate::physics::{ContinuumBuilder, CrossSectionFormula};
use nalgebra::{DMatrix, DVector, Vector3};
use num_complex::Complex64;
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// Ground-state data and the energetics derived from it.
#[derive(Debug, Clone)]
pub struct InitialState {
    pub energies: DVector<f64>,
    pub orbitals: DMatrix<f64>,
    /// Photon energy in hartree.
    pub photon: f64,
    pub final_energy: f64,
    /// Asymptotic wavenumber of the outgoing electron.
    pub k: f64,
}

impl InitialState {
    /// `k` as it appears in data file names.
    pub fn k_label(&self) -> String {
        format!("{:.3}", self.k)
    }

    /// The lowest orbital, promoted to complex.
    pub fn bound_vector(&self) -> DVector<Complex64> {
        self.orbitals.column(0).map(|c| Complex64::new(c, 0.0))
    }
}

pub fn photon_energy_au(photon_ev: f64) -> f64 {
    photon_ev / AU_TO_EV
}

/// Energy of the outgoing electron after ionizing the lowest orbital.
pub fn final_state_energy(energies: &DVector<f64>, photon: f64) -> Result<f64> {
    let lowest = energies
        .iter()
        .next()
        .copied()
        .ok_or_else(|| PhotoError::config("no orbital energies"))?;
    let final_energy = lowest + photon;
    if final_energy < 0.0 {
        return Err(PhotoError::BelowThreshold(final_energy));
    }
    Ok(final_energy)
}

/// Load the ground state and derive `k`.
///
/// The threshold check runs on the energies alone, before any matrix is read.
pub fn prepare_initial_state(reader: &DiskReader, config: &InitialStateConfig) -> Result<InitialState> {
    let energies = reader.load_hf_energies(&config.energies_path)?;
    let photon = photon_energy_au(config.photon_ev);
    let final_energy = final_state_energy(&energies, photon)?;
    let orbitals = reader.load_hf_orbitals(&config.orbitals_path)?;

    Ok(InitialState {
        energies,
        orbitals,
        photon,
        final_energy,
        k: (2.0 * final_energy).sqrt(),
    })
}

pub fn wavevector(k: f64, theta: f64, phi: f64) -> Vector3<f64> {
    Vector3::new(
        k * theta.sin() * phi.cos(),
        k * theta.sin() * phi.sin(),
        k * theta.cos(),
    )
}

/// `conj(continuum) · (B · bound)` with `B` the continuum-rows × bound-columns
/// block in the bottom-left corner of `operator`.
pub fn contract_block(
    operator: &DMatrix<Complex64>,
    basis: &BasisDescriptor,
    continuum: &DVector<Complex64>,
    bound: &DVector<Complex64>,
) -> Complex64 {
    let block = operator.view(
        (basis.bound_size(), 0),
        (basis.continuum_size(), basis.bound_size()),
    );
    let projected = block * bound;
    continuum.dotc(&projected)
}

/// Everything computed for one direction.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub theta: f64,
    /// Energy-normalized transition dipole.
    pub dipole: Vector3<Complex64>,
    pub cross_section: f64,
    /// Overlap between the continuum and the ground orbital.
    pub overlap: Complex64,
}

pub struct CrossSectionPipeline<'a, C, F> {
    reader: &'a DiskReader,
    state: &'a InitialState,
    sweep: &'a SweepConfig,
    continuum: &'a C,
    formula: F,
}

impl<'a, C, F> CrossSectionPipeline<'a, C, F>
where
    C: ContinuumBuilder,
    F: CrossSectionFormula,
{
    pub fn new(
        reader: &'a DiskReader,
        state: &'a InitialState,
        sweep: &'a SweepConfig,
        continuum: &'a C,
        formula: F,
    ) -> Self {
        Self {
            reader,
            state,
            sweep,
            continuum,
            formula,
        }
    }

    /// Evaluate every job. Results are in job order in both modes.
    pub fn run(&self, jobs: &DirectionJobs, parallel: bool) -> Result<Vec<JobResult>> {
        if parallel {
            jobs.jobs()
                .par_iter()
                .map(|job| self.run_job(job, jobs.phi))
                .collect()
        } else {
            jobs.jobs()
                .iter()
                .map(|job| self.run_job(job, jobs.phi))
                .collect()
        }
    }

    pub fn run_job(&self, job: &DirectionJob, phi: f64) -> Result<JobResult> {
        let basis = self.reader.basis();
        let k_vec = wavevector(self.state.k, job.theta, phi);

        let norms = self.reader.load_norms(&job.norms_path)?;
        let continuum = self.continuum.build(self.sweep.max_l, &k_vec, &norms)?;
        if continuum.len() != basis.continuum_size() {
            return Err(PhotoError::format(
                &job.norms_path,
                format!(
                    "continuum expansion has {} coefficients, the basis has {} continuum functions",
                    continuum.len(),
                    basis.continuum_size()
                ),
            ));
        }
        let bound = self.state.bound_vector();

        let operators = self.load_operators(&job.integrals_path)?;
        let overlap_matrix = self.reader.load_overlap(&job.integrals_path)?;
        let overlap = contract_block(&overlap_matrix, basis, &continuum, &bound);

        let scale = self.state.k.sqrt();
        let dipole = Vector3::from_iterator(
            operators
                .iter()
                .map(|op| contract_block(op, basis, &continuum, &bound) * scale),
        );
        let cross_section = self.formula.evaluate(self.state.photon, &dipole);

        debug!(
            "theta = {:.3}: |T|² = {:.6e}, <continuum|ground> = {:.3e}",
            job.theta,
            dipole.iter().map(|t| t.norm_sqr()).sum::<f64>(),
            overlap
        );

        Ok(JobResult {
            theta: job.theta,
            dipole,
            cross_section,
            overlap,
        })
    }

    /// Interaction operators for x, y and z in the configured gauge.
    fn load_operators(&self, path: &Path) -> Result<Vec<DMatrix<Complex64>>> {
        let photon = self.state.photon;
        Axis::ALL
            .iter()
            .map(|&axis| match self.sweep.gauge {
                Gauge::Dipole => self.reader.load_dipole(path, axis),
                Gauge::Velocity => Ok(self.reader.load_gradient(path, axis)?.map(|z| z / photon)),
            })
            .collect()
    }
}
