//! Tests for the data file loaders

use super::disk_reader::{column_major_fill, reorient_planes};
use super::format::{one_electron_file_bytes, Axis, OneElectronSlot, SLOT_COUNT};
use super::DiskReader;
use crate::basis::BasisDescriptor;
use crate::error::PhotoError;
use num_complex::Complex64;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn to_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

/// Write a one-electron file where element (r, c) of slot s is
/// `value(s, r, c)`, stored row-major as on disk.
fn write_one_electron<F>(dir: &Path, name: &str, n: usize, value: F) -> PathBuf
where
    F: Fn(usize, usize, usize) -> Complex64,
{
    let mut doubles = Vec::with_capacity(SLOT_COUNT * n * n * 2);
    for slot in 0..SLOT_COUNT {
        for r in 0..n {
            for c in 0..n {
                doubles.push(value(slot, r, c).re);
            }
        }
        for r in 0..n {
            for c in 0..n {
                doubles.push(value(slot, r, c).im);
            }
        }
    }
    let path = dir.join(name);
    fs::write(&path, to_bytes(&doubles)).unwrap();
    path
}

fn marker(slot: usize, r: usize, c: usize) -> Complex64 {
    Complex64::new((100 * slot + 10 * r + c) as f64, -((slot + r) as f64))
}

fn reader(bound: usize, continuum: usize) -> DiskReader {
    DiskReader::new(BasisDescriptor::new(bound, continuum).unwrap())
}

#[test]
fn test_exact_size_loads_every_slot() {
    let dir = TempDir::new().unwrap();
    let path = write_one_electron(dir.path(), "ints.bin", 3, marker);
    assert_eq!(fs::metadata(&path).unwrap().len(), one_electron_file_bytes(3).unwrap());

    let reader = reader(2, 1);
    for slot in 0..SLOT_COUNT {
        let m = reader.load_one_electron(&path, slot).unwrap();
        assert_eq!(m.shape(), (3, 3));
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(m[(r, c)], marker(slot, r, c));
            }
        }
    }
}

#[test]
fn test_named_slots_follow_table() {
    let dir = TempDir::new().unwrap();
    let path = write_one_electron(dir.path(), "ints.bin", 3, marker);
    let reader = reader(1, 2);

    assert_eq!(reader.load_overlap(&path).unwrap()[(1, 2)], marker(0, 1, 2));
    assert_eq!(reader.load_hamiltonian(&path).unwrap()[(1, 2)], marker(3, 1, 2));
    assert_eq!(reader.load_dipole(&path, Axis::Y).unwrap()[(2, 0)], marker(5, 2, 0));
    assert_eq!(reader.load_gradient(&path, Axis::Z).unwrap()[(0, 1)], marker(15, 0, 1));
    assert_eq!(
        reader.load_slot(&path, OneElectronSlot::Dipole(Axis::X)).unwrap(),
        reader.load_one_electron(&path, 4).unwrap()
    );
}

#[test]
fn test_wrong_size_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = write_one_electron(dir.path(), "ints.bin", 3, marker);
    let mut bytes = fs::read(&path).unwrap();

    // Correct file for a 3-function basis, wrong for 4.
    let err = reader(3, 1).load_one_electron(&path, 0).unwrap_err();
    assert!(matches!(err, PhotoError::Format { .. }));

    bytes.push(0);
    let longer = dir.path().join("long.bin");
    fs::write(&longer, &bytes).unwrap();
    assert!(matches!(
        reader(2, 1).load_one_electron(&longer, 0),
        Err(PhotoError::Format { .. })
    ));

    bytes.truncate(bytes.len() - 2);
    let shorter = dir.path().join("short.bin");
    fs::write(&shorter, &bytes).unwrap();
    assert!(matches!(
        reader(2, 1).load_one_electron(&shorter, 0),
        Err(PhotoError::Format { .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = reader(2, 1)
        .load_one_electron(dir.path().join("absent.bin"), 0)
        .unwrap_err();
    assert!(matches!(err, PhotoError::Io { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_slot_out_of_range() {
    let dir = TempDir::new().unwrap();
    let path = write_one_electron(dir.path(), "ints.bin", 3, marker);
    assert!(reader(2, 1).load_one_electron(&path, SLOT_COUNT).is_err());
}

#[test]
fn test_repeated_load_is_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_one_electron(dir.path(), "ints.bin", 3, |s, r, c| {
        Complex64::new(1.0 / (1 + s + r * 3 + c) as f64, (r as f64 - c as f64).sin())
    });
    let reader = reader(2, 1);
    let first = reader.load_one_electron(&path, 13).unwrap();
    let second = reader.load_one_electron(&path, 13).unwrap();
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.re.to_bits(), b.re.to_bits());
        assert_eq!(a.im.to_bits(), b.im.to_bits());
    }
}

#[test]
fn test_transpose_applied_once() {
    let n = 3;
    let real: Vec<f64> = (0..n * n).map(|i| i as f64).collect();
    let imag: Vec<f64> = (0..n * n).map(|i| -(i as f64) * 0.5).collect();

    let raw = column_major_fill(n, &real, &imag);
    let loaded = reorient_planes(n, &real, &imag);
    assert_eq!(loaded.transpose(), raw);

    // Row-major on disk: element (0, 1) is the second stored value.
    assert_eq!(loaded[(0, 1)], Complex64::new(1.0, -0.5));
    assert_eq!(raw[(1, 0)], Complex64::new(1.0, -0.5));
    assert_ne!(loaded, raw);
}

#[test]
fn test_norms_in_file_order() {
    let dir = TempDir::new().unwrap();
    let values = [0.5, 1.25, -3.0, 7.0e-3];
    let path = dir.path().join("norms.bin");
    fs::write(&path, to_bytes(&values)).unwrap();

    let norms = reader(1, 3).load_norms(&path).unwrap();
    assert_eq!(norms.as_slice(), &values);
}

#[test]
fn test_norms_off_by_one_byte() {
    let dir = TempDir::new().unwrap();
    let mut bytes = to_bytes(&[1.0, 2.0, 3.0]);
    bytes.push(0);
    let long = dir.path().join("long.bin");
    fs::write(&long, &bytes).unwrap();
    bytes.truncate(bytes.len() - 2);
    let short = dir.path().join("short.bin");
    fs::write(&short, &bytes).unwrap();

    let reader = reader(2, 1);
    assert!(matches!(reader.load_norms(&long), Err(PhotoError::Format { .. })));
    assert!(matches!(reader.load_norms(&short), Err(PhotoError::Format { .. })));
}

#[test]
fn test_hf_orbitals_fill_by_orbital() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hf.vec");
    fs::write(&path, "0.9 0.1\n-0.1   0.9\n").unwrap();

    let orbitals = reader(2, 1).load_hf_orbitals(&path).unwrap();
    assert_eq!(orbitals.column(0).as_slice(), &[0.9, 0.1]);
    assert_eq!(orbitals.column(1).as_slice(), &[-0.1, 0.9]);
}

#[test]
fn test_hf_energies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hf.en");
    fs::write(&path, "-0.5\n0.25\n").unwrap();

    let energies = reader(2, 1).load_hf_energies(&path).unwrap();
    assert_eq!(energies.as_slice(), &[-0.5, 0.25]);
}

#[test]
fn test_hf_token_count_checked() {
    let dir = TempDir::new().unwrap();
    let short = dir.path().join("short.en");
    fs::write(&short, "-0.5\n").unwrap();
    let garbage = dir.path().join("garbage.en");
    fs::write(&garbage, "-0.5 abc\n").unwrap();

    let reader = reader(2, 1);
    assert!(matches!(reader.load_hf_energies(&short), Err(PhotoError::Format { .. })));
    assert!(matches!(reader.load_hf_energies(&garbage), Err(PhotoError::Format { .. })));
    assert!(matches!(
        reader.load_hf_orbitals(dir.path().join("none.vec")),
        Err(PhotoError::Io { .. })
    ));
}
