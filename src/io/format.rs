//! Layout of the one-electron integral file
//!
//! The file holds [`SLOT_COUNT`] complex `n × n` matrices back to back. Each
//! chunk stores the real plane (`n²` doubles, row-major) followed by the
//! imaginary plane (`n²` doubles). Doubles use host byte order.

use std::mem::size_of;

/// Number of matrices packed into every one-electron file.
pub const SLOT_COUNT: usize = 16;

pub const F64_BYTES: usize = size_of::<f64>();

/// Cartesian component of a vector operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Physical quantities stored in the one-electron file that the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneElectronSlot {
    Overlap,
    Hamiltonian,
    Dipole(Axis),
    Gradient(Axis),
}

impl OneElectronSlot {
    /// Position of the quantity within the file.
    pub const fn index(self) -> usize {
        match self {
            OneElectronSlot::Overlap => 0,
            OneElectronSlot::Hamiltonian => 3,
            OneElectronSlot::Dipole(Axis::X) => 4,
            OneElectronSlot::Dipole(Axis::Y) => 5,
            OneElectronSlot::Dipole(Axis::Z) => 6,
            OneElectronSlot::Gradient(Axis::X) => 13,
            OneElectronSlot::Gradient(Axis::Y) => 14,
            OneElectronSlot::Gradient(Axis::Z) => 15,
        }
    }
}

/// Bytes taken by one slot (real plus imaginary plane) for a basis of `n`;
/// `None` when the size does not fit in a `u64`.
pub fn chunk_bytes(n: usize) -> Option<u64> {
    let n = u64::try_from(n).ok()?;
    n.checked_mul(n)?.checked_mul(2 * F64_BYTES as u64)
}

/// Exact size of a valid one-electron file for a basis of `n`.
pub fn one_electron_file_bytes(n: usize) -> Option<u64> {
    chunk_bytes(n)?.checked_mul(SLOT_COUNT as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_table() {
        assert_eq!(OneElectronSlot::Overlap.index(), 0);
        assert_eq!(OneElectronSlot::Hamiltonian.index(), 3);
        let dipoles: Vec<usize> = Axis::ALL
            .iter()
            .map(|&a| OneElectronSlot::Dipole(a).index())
            .collect();
        let gradients: Vec<usize> = Axis::ALL
            .iter()
            .map(|&a| OneElectronSlot::Gradient(a).index())
            .collect();
        assert_eq!(dipoles, vec![4, 5, 6]);
        assert_eq!(gradients, vec![13, 14, 15]);
        assert!(gradients.iter().all(|&s| s < SLOT_COUNT));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(chunk_bytes(3), Some(144));
        assert_eq!(one_electron_file_bytes(3), Some(16 * 9 * 16));
    }

    #[test]
    fn test_oversized_basis_has_no_size() {
        assert_eq!(chunk_bytes(usize::MAX), None);
        assert_eq!(one_electron_file_bytes(1 << 30), None);
    }
}
