//! Loaders for integral, orbital and norm files
//!
//! Every call opens its file, reads what it needs and closes it again; no
//! handle outlives a call and nothing is cached.

use super::format::{chunk_bytes, one_electron_file_bytes, Axis, OneElectronSlot, F64_BYTES, SLOT_COUNT};
use crate::basis::BasisDescriptor;
use crate::error::{PhotoError, Result};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Reads matrices and vectors whose shapes follow a fixed basis.
#[derive(Debug, Clone, Copy)]
pub struct DiskReader {
    basis: BasisDescriptor,
}

impl DiskReader {
    pub fn new(basis: BasisDescriptor) -> Self {
        Self { basis }
    }

    pub fn basis(&self) -> &BasisDescriptor {
        &self.basis
    }

    /// Load the complex `total × total` matrix stored at `slot`.
    pub fn load_one_electron(&self, path: impl AsRef<Path>, slot: usize) -> Result<DMatrix<Complex64>> {
        let path = path.as_ref();
        let n = self.basis.total_size();

        if slot >= SLOT_COUNT {
            return Err(PhotoError::format(
                path,
                format!("slot {slot} outside the {SLOT_COUNT} slots of a one-electron file"),
            ));
        }

        let mut file = File::open(path).map_err(|e| PhotoError::io(path, e))?;
        let size = file.metadata().map_err(|e| PhotoError::io(path, e))?.len();
        let (chunk, expected) = chunk_bytes(n)
            .zip(one_electron_file_bytes(n))
            .ok_or_else(|| PhotoError::config(format!("basis of {n} functions is too large")))?;
        if size != expected {
            return Err(PhotoError::format(
                path,
                format!(
                    "{size} bytes do not match the basis ({expected} bytes expected). \
                     Have you used the correct 1E file?"
                ),
            ));
        }

        file.seek(SeekFrom::Start(slot as u64 * chunk))
            .map_err(|e| PhotoError::io(path, e))?;
        let real = read_doubles(&mut file, n * n).map_err(|e| PhotoError::io(path, e))?;
        let imag = read_doubles(&mut file, n * n).map_err(|e| PhotoError::io(path, e))?;

        debug!("Loaded slot {} of {}", slot, path.display());
        Ok(reorient_planes(n, &real, &imag))
    }

    pub fn load_slot(&self, path: impl AsRef<Path>, slot: OneElectronSlot) -> Result<DMatrix<Complex64>> {
        self.load_one_electron(path, slot.index())
    }

    pub fn load_overlap(&self, path: impl AsRef<Path>) -> Result<DMatrix<Complex64>> {
        self.load_slot(path, OneElectronSlot::Overlap)
    }

    pub fn load_hamiltonian(&self, path: impl AsRef<Path>) -> Result<DMatrix<Complex64>> {
        self.load_slot(path, OneElectronSlot::Hamiltonian)
    }

    pub fn load_dipole(&self, path: impl AsRef<Path>, axis: Axis) -> Result<DMatrix<Complex64>> {
        self.load_slot(path, OneElectronSlot::Dipole(axis))
    }

    pub fn load_gradient(&self, path: impl AsRef<Path>, axis: Axis) -> Result<DMatrix<Complex64>> {
        self.load_slot(path, OneElectronSlot::Gradient(axis))
    }

    /// Hartree-Fock orbital coefficients, `bound × bound`.
    ///
    /// Values fill the matrix column by column, not row by row: every run of
    /// `bound` values is the expansion of one orbital, and column 0 is the
    /// ground orbital. The column-major fill is deliberate and matches the
    /// program that writes these files.
    pub fn load_hf_orbitals(&self, path: impl AsRef<Path>) -> Result<DMatrix<f64>> {
        let n = self.basis.bound_size();
        let values = read_text_values(path.as_ref(), n * n)?;
        Ok(DMatrix::from_vec(n, n, values))
    }

    /// Hartree-Fock orbital energies, `bound` values in orbital order.
    pub fn load_hf_energies(&self, path: impl AsRef<Path>) -> Result<DVector<f64>> {
        let n = self.basis.bound_size();
        let values = read_text_values(path.as_ref(), n)?;
        Ok(DVector::from_vec(values))
    }

    /// Basis-function norms, `total` doubles in file order.
    pub fn load_norms(&self, path: impl AsRef<Path>) -> Result<DVector<f64>> {
        let path = path.as_ref();
        let n = self.basis.total_size();
        let bytes = fs::read(path).map_err(|e| PhotoError::io(path, e))?;
        if bytes.len() != n * F64_BYTES {
            return Err(PhotoError::format(
                path,
                format!(
                    "{} bytes are not {n} doubles. Have you used the correct norms file?",
                    bytes.len()
                ),
            ));
        }
        Ok(DVector::from_vec(decode_doubles(&bytes)))
    }
}

/// Turn the two on-disk planes into the logical matrix.
///
/// The planes are row-major. They are first combined in nalgebra's
/// column-major order and the result is transposed once.
pub(crate) fn reorient_planes(n: usize, real: &[f64], imag: &[f64]) -> DMatrix<Complex64> {
    column_major_fill(n, real, imag).transpose()
}

pub(crate) fn column_major_fill(n: usize, real: &[f64], imag: &[f64]) -> DMatrix<Complex64> {
    DMatrix::from_iterator(
        n,
        n,
        real.iter()
            .zip(imag.iter())
            .map(|(&re, &im)| Complex64::new(re, im)),
    )
}

fn read_doubles<R: Read>(reader: &mut R, count: usize) -> std::io::Result<Vec<f64>> {
    let mut buf = vec![0u8; count * F64_BYTES];
    reader.read_exact(&mut buf)?;
    Ok(decode_doubles(&buf))
}

fn decode_doubles(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(F64_BYTES)
        .map(|chunk| {
            let mut raw = [0u8; F64_BYTES];
            raw.copy_from_slice(chunk);
            f64::from_ne_bytes(raw)
        })
        .collect()
}

fn read_text_values(path: &Path, expected: usize) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path).map_err(|e| PhotoError::io(path, e))?;
    let values = content
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| PhotoError::format(path, format!("'{token}' is not a number")))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.len() != expected {
        return Err(PhotoError::format(
            path,
            format!("{} values found, the basis requires {expected}", values.len()),
        ));
    }
    Ok(values)
}
