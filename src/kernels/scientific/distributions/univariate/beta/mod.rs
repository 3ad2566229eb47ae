// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Beta Distribution Module** - *Distributions on the Unit Interval*
//!
//! Beta(α, β): density `x^(α−1)(1−x)^(β−1) / B(α, β)` on [0, 1], CDF the
//! regularised incomplete Beta `Iₓ(α, β)`, quantile by Newton-Raphson from the
//! mean with steps kept inside (0, 1).

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{incomplete_beta, ln_beta};
use crate::kernels::scientific::distributions::shared::solver::{
    newton_quantile, QuantileEstimate, Support,
};
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;

#[inline(always)]
fn valid_params(alpha: f64, beta: f64) -> bool {
    alpha.is_finite() && beta.is_finite() && alpha > 0.0 && beta > 0.0
}

/// Density at an endpoint where the `shape − 1` exponent applies.
#[inline(always)]
fn edge_density(shape: f64, other: f64) -> f64 {
    if shape < 1.0 {
        f64::INFINITY
    } else if shape == 1.0 {
        // 1 / B(1, other)
        other
    } else {
        0.0
    }
}

/// Beta density. 0 outside [0, 1], NaN for invalid parameters.
#[inline]
pub fn beta_pdf_scalar(x: f64, alpha: f64, beta: f64) -> f64 {
    if !valid_params(alpha, beta) || x.is_nan() {
        return f64::NAN;
    }
    if !(0.0..=1.0).contains(&x) {
        return 0.0;
    }
    if x == 0.0 {
        return edge_density(alpha, beta);
    }
    if x == 1.0 {
        return edge_density(beta, alpha);
    }
    ((alpha - 1.0) * x.ln() + (beta - 1.0) * (1.0 - x).ln() - ln_beta(alpha, beta)).exp()
}

/// Beta CDF, `Iₓ(α, β)`.
#[inline]
pub fn beta_cdf_scalar(x: f64, alpha: f64, beta: f64) -> f64 {
    if !valid_params(alpha, beta) || x.is_nan() {
        return f64::NAN;
    }
    incomplete_beta(x, alpha, beta)
}

/// Beta quantile with solver diagnostics. p ≤ 0 → 0, p ≥ 1 → 1.
pub fn beta_quantile_estimate(p: f64, alpha: f64, beta: f64) -> QuantileEstimate {
    if !valid_params(alpha, beta) || p.is_nan() {
        return QuantileEstimate::exact(f64::NAN);
    }
    if p <= 0.0 {
        return QuantileEstimate::exact(0.0);
    }
    if p >= 1.0 {
        return QuantileEstimate::exact(1.0);
    }
    newton_quantile(
        p,
        alpha / (alpha + beta),
        Support::UNIT,
        |x| incomplete_beta(x, alpha, beta),
        |x| beta_pdf_scalar(x, alpha, beta),
    )
}

/// Beta quantile.
#[inline]
pub fn beta_quantile_scalar(p: f64, alpha: f64, beta: f64) -> f64 {
    beta_quantile_estimate(p, alpha, beta).value
}

fn check(fname: &str, alpha: f64, beta: f64) -> Result<(), KernelError> {
    if !valid_params(alpha, beta) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: α and β must be positive and finite, got α={alpha}, β={beta}"
        )));
    }
    Ok(())
}

/// Beta PDF - vectorised.
#[inline(always)]
pub fn beta_pdf(
    x: &[f64],
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("beta_pdf", alpha, beta)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        beta_pdf_scalar(xi, alpha, beta)
    })
}

/// Beta CDF - vectorised.
#[inline(always)]
pub fn beta_cdf(
    x: &[f64],
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("beta_cdf", alpha, beta)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        beta_cdf_scalar(xi, alpha, beta)
    })
}

/// Beta quantile - vectorised.
#[inline(always)]
pub fn beta_quantile(
    p: &[f64],
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("beta_quantile", alpha, beta)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        beta_quantile_scalar(pi, alpha, beta)
    })
}
