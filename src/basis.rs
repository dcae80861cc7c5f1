//! Basis dimensions shared by every loader and the pipeline

use crate::config::InputData;
use crate::error::{PhotoError, Result};
use crate::io::format::one_electron_file_bytes;

/// Sizes of the bound (GTO) and continuum (PWGTO) parts of the basis.
///
/// Continuum functions follow the bound ones, so in a `total × total`
/// matrix the last `continuum_size` rows and columns belong to the continuum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasisDescriptor {
    bound: usize,
    total: usize,
}

impl BasisDescriptor {
    pub fn new(bound: usize, continuum: usize) -> Result<Self> {
        if bound == 0 || continuum == 0 {
            return Err(PhotoError::config(format!(
                "basis sizes must be positive (NUMBER_GTO = {bound}, NUMBER_PWGTO = {continuum})"
            )));
        }
        let total = bound
            .checked_add(continuum)
            .filter(|&total| total.checked_mul(total).is_some())
            .filter(|&total| one_electron_file_bytes(total).is_some())
            .ok_or_else(|| {
                PhotoError::config(format!(
                    "basis of {bound} + {continuum} functions is too large"
                ))
            })?;
        Ok(Self { bound, total })
    }

    pub fn from_input(input: &InputData) -> Result<Self> {
        Self::new(
            input.parse_first("NUMBER_GTO")?,
            input.parse_first("NUMBER_PWGTO")?,
        )
    }

    pub fn bound_size(&self) -> usize {
        self.bound
    }

    pub fn continuum_size(&self) -> usize {
        self.total - self.bound
    }

    pub fn total_size(&self) -> usize {
        self.total
    }
}
