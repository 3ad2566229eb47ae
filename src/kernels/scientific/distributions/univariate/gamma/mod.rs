// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Gamma Distribution Module** - *Shape and Scale Parameterisation*
//!
//! Gamma(α, β) with shape α and **scale** β:
//!
//! ```text
//! f(x) = x^(α−1) e^(−x/β) / (β^α Γ(α)),   x > 0
//! F(x) = P(α, x/β)
//! ```
//!
//! The quantile reuses the chi-square Wilson–Hilferty guess on 2α degrees of
//! freedom, rescaled by β/2, as the Newton starting point.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{ln_gamma, reg_lower_gamma};
use crate::kernels::scientific::distributions::shared::solver::{
    newton_quantile, QuantileEstimate, Support,
};
use crate::kernels::scientific::distributions::univariate::chi_squared::chi_square_initial_guess;
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;

#[inline(always)]
fn valid_params(shape: f64, scale: f64) -> bool {
    shape.is_finite() && scale.is_finite() && shape > 0.0 && scale > 0.0
}

/// Gamma density. 0 for x < 0, NaN for invalid parameters.
#[inline]
pub fn gamma_pdf_scalar(x: f64, shape: f64, scale: f64) -> f64 {
    if !valid_params(shape, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x == 0.0 {
        return if shape < 1.0 {
            f64::INFINITY
        } else if shape == 1.0 {
            1.0 / scale
        } else {
            0.0
        };
    }
    ((shape - 1.0) * x.ln() - x / scale - shape * scale.ln() - ln_gamma(shape)).exp()
}

/// Gamma CDF, `P(shape, x/scale)`.
#[inline]
pub fn gamma_cdf_scalar(x: f64, shape: f64, scale: f64) -> f64 {
    if !valid_params(shape, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    reg_lower_gamma(shape, x / scale)
}

/// Gamma quantile with solver diagnostics. p ≤ 0 → 0, p ≥ 1 → +∞.
pub fn gamma_quantile_estimate(p: f64, shape: f64, scale: f64) -> QuantileEstimate {
    if !valid_params(shape, scale) || p.is_nan() {
        return QuantileEstimate::exact(f64::NAN);
    }
    if p <= 0.0 {
        return QuantileEstimate::exact(0.0);
    }
    if p >= 1.0 {
        return QuantileEstimate::exact(f64::INFINITY);
    }
    let initial = 0.5 * scale * chi_square_initial_guess(p, 2.0 * shape);
    newton_quantile(
        p,
        initial,
        Support::POSITIVE,
        |x| gamma_cdf_scalar(x, shape, scale),
        |x| gamma_pdf_scalar(x, shape, scale),
    )
}

/// Gamma quantile.
#[inline]
pub fn gamma_quantile_scalar(p: f64, shape: f64, scale: f64) -> f64 {
    gamma_quantile_estimate(p, shape, scale).value
}

fn check(fname: &str, shape: f64, scale: f64) -> Result<(), KernelError> {
    if !valid_params(shape, scale) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: shape and scale must be positive and finite, got shape={shape}, scale={scale}"
        )));
    }
    Ok(())
}

/// Gamma PDF - vectorised.
#[inline(always)]
pub fn gamma_pdf(
    x: &[f64],
    shape: f64,
    scale: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("gamma_pdf", shape, scale)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        gamma_pdf_scalar(xi, shape, scale)
    })
}

/// Gamma CDF - vectorised.
#[inline(always)]
pub fn gamma_cdf(
    x: &[f64],
    shape: f64,
    scale: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("gamma_cdf", shape, scale)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        gamma_cdf_scalar(xi, shape, scale)
    })
}

/// Gamma quantile - vectorised.
#[inline(always)]
pub fn gamma_quantile(
    p: &[f64],
    shape: f64,
    scale: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("gamma_quantile", shape, scale)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        gamma_quantile_scalar(pi, shape, scale)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::scientific::distributions::univariate::chi_squared::{
        chi_square_cdf_scalar, chi_square_pdf_scalar,
    };

    #[test]
    fn chi_square_is_gamma_with_scale_two() {
        for &x in &[0.3, 1.0, 4.0, 9.0] {
            let g = gamma_pdf_scalar(x, 2.5, 2.0);
            let c = chi_square_pdf_scalar(x, 5.0);
            assert!((g - c).abs() < 1e-15);
            assert!((gamma_cdf_scalar(x, 2.5, 2.0) - chi_square_cdf_scalar(x, 5.0)).abs() < 1e-15);
        }
    }

    #[test]
    fn shape_one_is_exponential() {
        for &x in &[0.0, 0.5, 2.0] {
            let lambda: f64 = 1.0 / 3.0;
            assert!((gamma_pdf_scalar(x, 1.0, 3.0) - lambda * (-lambda * x).exp()).abs() < 1e-15);
        }
    }

    #[test]
    fn quantile_round_trip() {
        for &(k, theta) in &[(0.5, 1.0), (2.0, 3.0), (9.0, 0.5)] {
            for &p in &[0.05, 0.5, 0.95] {
                let est = gamma_quantile_estimate(p, k, theta);
                assert!(est.is_converged(), "{k} {theta} {p}: {:?}", est);
                assert!((gamma_cdf_scalar(est.value, k, theta) - p).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn small_shape_quantiles() {
        // scipy.stats.gamma.ppf(0.01, 0.05) == 5.8446320572864997e-41
        let est = gamma_quantile_estimate(0.01, 0.05, 1.0);
        assert!(est.is_converged(), "{:?}", est);
        assert!((est.value / 5.8446320572864997e-41 - 1.0).abs() < 1e-5);
        for &p in &[0.05, 0.5, 0.95, 0.99] {
            let q = gamma_quantile_scalar(p, 0.3, 2.0);
            assert!((gamma_cdf_scalar(q, 0.3, 2.0) - p).abs() < 1e-9, "p={p}: q={q}");
        }
    }

    #[test]
    fn invalid_parameters() {
        assert!(gamma_pdf_scalar(1.0, 0.0, 1.0).is_nan());
        assert!(gamma_cdf(&[1.0], 1.0, -1.0, None, None).is_err());
    }
}
