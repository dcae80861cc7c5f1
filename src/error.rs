//! Error kinds for a photoionization run
//!
//! Every error is fatal: the run aborts and the process exits with the code
//! returned by [`PhotoError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or evaluating cross sections.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// A data file does not have the layout implied by the basis.
    #[error("Malformed file {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    /// A data file could not be opened or read.
    #[error("Unable to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file names an invalid or missing setting.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The photon cannot ionize the ground-state orbital.
    #[error("Energy below the ionization threshold! (final-state energy {0:.6} au)")]
    BelowThreshold(f64),

    /// The results file could not be appended to.
    #[error("Unable to write results to {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PhotoError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PhotoError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PhotoError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        PhotoError::Config(message.into())
    }

    /// Process exit status for this error kind.
    ///
    /// Unreadable and malformed files share the format code.
    pub fn exit_code(&self) -> i32 {
        match self {
            PhotoError::Format { .. } | PhotoError::Io { .. } => 2,
            PhotoError::Config(_) => 3,
            PhotoError::BelowThreshold(_) => 4,
            PhotoError::Output { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, PhotoError>;
