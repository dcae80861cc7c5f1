//! Logging setup and the results file

use crate::config::SweepConfig;
use crate::error::{PhotoError, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // HH:MM:SS
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>, verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    match output_path {
        Some(path) => {
            if let Ok(log) = File::create(path) {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false)
                    .with_filter(level);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            } else {
                eprintln!("Could not create output file: {}", path);
            }
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).init();
        }
    }
}

/// Write one run's block of the results file.
///
/// `rows` holds `(theta, cross section)` in job order.
pub fn write_results_block<W: Write>(
    writer: &mut W,
    sweep: &SweepConfig,
    photon_label: &str,
    rows: &[(f64, f64)],
) -> std::io::Result<()> {
    let (pol_theta, pol_phi) = sweep.polarization;
    writeln!(writer, "****** {} ******", sweep.name)?;
    writeln!(writer, "Photon [eV]         {}", photon_label)?;
    writeln!(writer, "k ( phi)            {:.3}", sweep.k_phi)?;
    writeln!(writer, "j (theta, phi)      {:.3}\t{:.3}", pol_theta, pol_phi)?;
    writeln!(writer, "========")?;
    writeln!(writer, "k(theta)\ttot sigma")?;
    for (theta, sigma) in rows {
        writeln!(writer, "{:.3}\t\t{:.5}", theta, sigma)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Append a finished block to the results file in a single write.
pub fn append_results(path: &Path, block: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| PhotoError::Output {
            path: path.to_path_buf(),
            source,
        })?;
    file.write_all(block).map_err(|source| PhotoError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Results appended to {}", path.display());
    Ok(())
}
