//! Physical constants (CODATA 2018)

/// Hartree energy in eV.
pub const AU_TO_EV: f64 = 27.211386245988;

/// Fine-structure constant.
pub const FINE_STRUCTURE: f64 = 7.2973525693e-3;

/// One bohr² expressed in megabarn.
pub const BOHR2_TO_MB: f64 = 28.002852;
