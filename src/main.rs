//! Photoionization command-line interface
//!
//! Usage: `photo <input.yaml> [--dump] [--parallel]`

use color_eyre::eyre::Result;
use photoion::app::{exit_code, PhotoApplication};

fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(err) = PhotoApplication::from_cli().and_then(PhotoApplication::run) {
        eprintln!("Error: {err:?}");
        std::process::exit(exit_code(&err));
    }

    Ok(())
}
