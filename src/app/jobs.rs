//! Outgoing-direction jobs
//!
//! `FILES_NORM` and `FILES_1E` start with a filename prefix; the remaining
//! entries are per-job suffixes. `K_THETA[i]` is the polar angle of job `i`.

use crate::config::InputData;
use crate::error::{PhotoError, Result};
use std::path::PathBuf;

/// One outgoing-electron direction and the files computed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionJob {
    pub theta: f64,
    pub norms_path: PathBuf,
    pub integrals_path: PathBuf,
}

/// All jobs of a run plus the azimuth they share.
#[derive(Debug, Clone)]
pub struct DirectionJobs {
    pub phi: f64,
    jobs: Vec<DirectionJob>,
}

/// Number of jobs declared by a file list: the first entry is the prefix.
pub fn job_count(input: &InputData, key: &str) -> Result<usize> {
    input
        .size(key)
        .checked_sub(1)
        .ok_or_else(|| PhotoError::config(format!("{key} needs a filename prefix entry")))
}

impl DirectionJobs {
    /// Resolve the jobs; `k_label` is the wavenumber as it appears in file names.
    pub fn from_input(input: &InputData, k_label: &str) -> Result<Self> {
        let count = job_count(input, "FILES_NORM")?;
        let path_in = input.verbatim_first("PATH_IN")?;
        let norms_prefix = input.verbatim_first("FILES_NORM")?;
        let ints_prefix = input.verbatim_first("FILES_1E")?;

        let jobs = (0..count)
            .map(|i| -> Result<DirectionJob> {
                Ok(DirectionJob {
                    theta: input.parse_at("K_THETA", i)?,
                    norms_path: PathBuf::from(format!(
                        "{path_in}{norms_prefix}{k_label}{}",
                        input.verbatim("FILES_NORM", i + 1)?
                    )),
                    integrals_path: PathBuf::from(format!(
                        "{path_in}{ints_prefix}{k_label}{}",
                        input.verbatim("FILES_1E", i + 1)?
                    )),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            phi: input.parse_first("K_PHI")?,
            jobs,
        })
    }

    pub fn jobs(&self) -> &[DirectionJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
