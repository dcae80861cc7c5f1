//! Continuum wavefunction coefficients
//!
//! The pipeline only needs the expansion of the outgoing electron over the
//! continuum part of the basis. [`ContinuumBuilder`] is that seam; the stock
//! [`CoulombPartialWaves`] expands a Coulomb wave with asymptotic momentum
//! `k` in partial waves, one continuum function per `(l, m)`.

use crate::error::{PhotoError, Result};
use nalgebra::{DVector, Vector3};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Builds continuum expansion coefficients for a given outgoing momentum.
pub trait ContinuumBuilder: Send + Sync {
    /// Coefficients over the continuum basis functions.
    ///
    /// `norms` covers the whole basis (bound functions first); the returned
    /// vector must have one entry per continuum function.
    fn build(&self, max_l: usize, k: &Vector3<f64>, norms: &DVector<f64>) -> Result<DVector<Complex64>>;
}

/// Partial-wave expansion of a Coulomb wave around an ion of charge `Z`.
///
/// Continuum functions are ordered `l = 0..=max_l`, `m = -l..=l`. The
/// coefficient of `(l, m)` is `4π i^l e^{iσ_l} Y*_lm(k̂) / N`, with `N` the
/// norm of that basis function.
#[derive(Debug, Clone, Copy)]
pub struct CoulombPartialWaves {
    charge: f64,
}

impl CoulombPartialWaves {
    pub fn new(charge: f64) -> Self {
        Self { charge }
    }

    /// Number of continuum functions for a given `max_l`.
    pub fn wave_count(max_l: usize) -> usize {
        (max_l + 1) * (max_l + 1)
    }
}

impl ContinuumBuilder for CoulombPartialWaves {
    fn build(&self, max_l: usize, k: &Vector3<f64>, norms: &DVector<f64>) -> Result<DVector<Complex64>> {
        let k_abs = k.norm();
        if k_abs == 0.0 {
            return Err(PhotoError::BelowThreshold(0.0));
        }

        let waves = Self::wave_count(max_l);
        if norms.len() < waves {
            return Err(PhotoError::config(format!(
                "MAX_L = {max_l} needs {waves} continuum functions, only {} norms given",
                norms.len()
            )));
        }
        let offset = norms.len() - waves;

        let theta = (k.z / k_abs).clamp(-1.0, 1.0).acos();
        let phi = k.y.atan2(k.x);
        let eta = -self.charge / k_abs;

        let mut coefficients = Vec::with_capacity(waves);
        for l in 0..=max_l {
            let sigma = coulomb_phase(l, eta);
            let prefactor = 4.0 * PI * Complex64::i().powu(l as u32) * Complex64::from_polar(1.0, sigma);
            for m in -(l as i64)..=(l as i64) {
                let norm = norms[offset + coefficients.len()];
                if norm == 0.0 {
                    return Err(PhotoError::config(format!(
                        "norm of continuum function (l = {l}, m = {m}) is zero"
                    )));
                }
                let ylm = spherical_harmonic(l, m, theta, phi);
                coefficients.push(prefactor * ylm.conj() / norm);
            }
        }

        Ok(DVector::from_vec(coefficients))
    }
}

/// Coulomb phase shift `σ_l = arg Γ(l + 1 + iη)`.
pub fn coulomb_phase(l: usize, eta: f64) -> f64 {
    let mut sigma = arg_gamma(Complex64::new(1.0, eta));
    for s in 1..=l {
        sigma += (eta / s as f64).atan();
    }
    sigma
}

/// Argument of Γ(z) for `Re z > 0`, continuous in `Im z`.
///
/// Stirling's series is evaluated at `z + 10` and shifted back with the
/// recurrence `Γ(z + 1) = z Γ(z)`.
fn arg_gamma(z: Complex64) -> f64 {
    const SHIFT: usize = 10;
    let shifted_args: f64 = (0..SHIFT).map(|j| (z + j as f64).arg()).sum();

    let w = z + SHIFT as f64;
    let inv = w.inv();
    let inv2 = inv * inv;
    let series = inv * (1.0 / 12.0 - inv2 * (1.0 / 360.0 - inv2 / 1260.0));
    let ln_gamma = (w - 0.5) * w.ln() - w + 0.5 * (2.0 * PI).ln() + series;

    ln_gamma.im - shifted_args
}

/// Complex spherical harmonic with the Condon-Shortley phase.
pub fn spherical_harmonic(l: usize, m: i64, theta: f64, phi: f64) -> Complex64 {
    let am = m.unsigned_abs() as usize;
    if am > l {
        return Complex64::new(0.0, 0.0);
    }

    // (l - |m|)! / (l + |m|)!
    let ratio: f64 = ((l - am + 1)..=(l + am)).map(|v| 1.0 / v as f64).product();
    let norm = ((2 * l + 1) as f64 / (4.0 * PI) * ratio).sqrt();
    let y = Complex64::from_polar(norm * associated_legendre(l, am, theta.cos()), am as f64 * phi);

    if m < 0 {
        let sign = if am % 2 == 0 { 1.0 } else { -1.0 };
        y.conj() * sign
    } else {
        y
    }
}

/// Associated Legendre function `P_l^m(x)` for `0 <= m <= l`.
fn associated_legendre(l: usize, m: usize, x: f64) -> f64 {
    let mut pmm = 1.0;
    if m > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).sqrt();
        let mut fact = 1.0;
        for _ in 0..m {
            pmm *= -fact * somx2;
            fact += 2.0;
        }
    }
    if l == m {
        return pmm;
    }

    let mut pmmp1 = x * (2 * m + 1) as f64 * pmm;
    if l == m + 1 {
        return pmmp1;
    }

    let mut pll = 0.0;
    for ll in (m + 2)..=l {
        pll = (x * (2 * ll - 1) as f64 * pmmp1 - (ll + m - 1) as f64 * pmm) / (ll - m) as f64;
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pll
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coulomb_phase_known_value() {
        // arg Γ(1 + i)
        assert_relative_eq!(coulomb_phase(0, 1.0), -0.3016403204675331, epsilon = 1e-10);
        assert_relative_eq!(
            coulomb_phase(2, 1.0),
            -0.3016403204675331 + 1.0f64.atan() + 0.5f64.atan(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_coulomb_phase_vanishes_without_charge() {
        for l in 0..4 {
            assert_relative_eq!(coulomb_phase(l, 0.0), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_low_order_harmonics() {
        let (theta, phi) = (0.7, 1.3);
        let y00 = spherical_harmonic(0, 0, theta, phi);
        assert_relative_eq!(y00.re, 0.5 / PI.sqrt(), epsilon = 1e-14);

        let y10 = spherical_harmonic(1, 0, theta, phi);
        assert_relative_eq!(y10.re, (3.0 / (4.0 * PI)).sqrt() * theta.cos(), epsilon = 1e-14);

        let y11 = spherical_harmonic(1, 1, theta, phi);
        let expected = -(3.0 / (8.0 * PI)).sqrt() * theta.sin();
        assert_relative_eq!(y11.re, expected * phi.cos(), epsilon = 1e-14);
        assert_relative_eq!(y11.im, expected * phi.sin(), epsilon = 1e-14);

        // Y_{l,-m} = (-1)^m Y*_{lm}
        let y1m1 = spherical_harmonic(1, -1, theta, phi);
        assert_relative_eq!(y1m1.re, -y11.re, epsilon = 1e-14);
        assert_relative_eq!(y1m1.im, y11.im, epsilon = 1e-14);
    }

    #[test]
    fn test_harmonics_sum_rule() {
        // Σ_m |Y_lm|² = (2l + 1) / 4π
        let (theta, phi) = (2.1, -0.4);
        for l in 0..5usize {
            let total: f64 = (-(l as i64)..=(l as i64))
                .map(|m| spherical_harmonic(l, m, theta, phi).norm_sqr())
                .sum();
            assert_relative_eq!(total, (2 * l + 1) as f64 / (4.0 * PI), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_build_uses_trailing_norms() {
        let builder = CoulombPartialWaves::new(0.0);
        let norms = DVector::from_vec(vec![9.0, 9.0, 2.0]);
        let k = Vector3::new(0.0, 0.0, 1.5);
        let coeffs = builder.build(0, &k, &norms).unwrap();
        assert_eq!(coeffs.len(), 1);
        // 4π Y00 / 2 = √π
        assert_relative_eq!(coeffs[0].re, PI.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(coeffs[0].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_build_errors() {
        let builder = CoulombPartialWaves::new(1.0);
        let norms = DVector::from_vec(vec![1.0, 1.0]);
        assert!(builder.build(1, &Vector3::new(0.0, 0.0, 1.0), &norms).is_err());
        assert!(builder.build(0, &Vector3::zeros(), &norms).is_err());
        let zero = DVector::from_vec(vec![1.0, 0.0]);
        assert!(builder.build(0, &Vector3::new(1.0, 0.0, 0.0), &zero).is_err());
    }
}
