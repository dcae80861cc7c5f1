//! Command-line argument parsing for photoionization runs

use crate::error::{PhotoError, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Photoionization cross sections from precomputed integrals
#[derive(Parser, Debug)]
#[command(name = "photo")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML input file
    pub input: PathBuf,

    /// Only compute and print the continuum wavenumber k, then exit
    #[arg(long)]
    pub dump: bool,

    /// Evaluate direction jobs in parallel (results keep job order)
    #[arg(long)]
    pub parallel: bool,

    /// Write the log to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log per-job diagnostics at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse a command line. Usage errors become configuration errors so
    /// they exit with the configuration status; help and version requests
    /// print and exit as usual.
    pub fn parse_args<I, T>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(argv).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => PhotoError::config(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_flag() {
        let args = Args::parse_from(["photo", "run.yaml", "--dump"]);
        assert_eq!(args.input, PathBuf::from("run.yaml"));
        assert!(args.dump);
        assert!(!args.parallel);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["photo"]).is_err());
    }

    #[test]
    fn test_usage_errors_are_config_errors() {
        let missing = Args::parse_args(["photo"]).unwrap_err();
        assert!(matches!(missing, PhotoError::Config(_)));
        assert_eq!(missing.exit_code(), 3);

        let unknown = Args::parse_args(["photo", "run.yaml", "--fast"]).unwrap_err();
        assert_eq!(unknown.exit_code(), 3);

        let args = Args::parse_args(["photo", "run.yaml", "--parallel"]).unwrap();
        assert!(args.parallel);
    }
}
