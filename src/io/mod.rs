//! Input/Output operations for photoionization runs
//!
//! This module handles the binary and text data files, logging setup, and
//! the results file.

mod disk_reader;
pub mod format;
mod output;
#[cfg(test)]
mod tests;

pub use disk_reader::DiskReader;
pub use format::{Axis, OneElectronSlot, SLOT_COUNT};
pub use output::{append_results, setup_output, write_results_block};
