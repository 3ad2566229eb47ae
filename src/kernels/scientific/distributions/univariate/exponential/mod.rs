// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Exponential Distribution Module** - *Memoryless Waiting Times*
//!
//! pdf = λe^(−λx) for x ≥ 0, cdf = 1 − e^(−λx), quantile = −ln(1−p)/λ.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;

#[inline(always)]
fn valid_rate(lambda: f64) -> bool {
    lambda.is_finite() && lambda > 0.0
}

/// Exponential density. 0 for x < 0, NaN for invalid λ.
#[inline]
pub fn exponential_pdf_scalar(x: f64, lambda: f64) -> f64 {
    if !valid_rate(lambda) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        0.0
    } else {
        lambda * (-lambda * x).exp()
    }
}

/// Exponential CDF.
#[inline]
pub fn exponential_cdf_scalar(x: f64, lambda: f64) -> f64 {
    if !valid_rate(lambda) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        0.0
    } else {
        -(-lambda * x).exp_m1()
    }
}

/// Exponential quantile; p ≤ 0 → 0, p ≥ 1 → +∞.
#[inline]
pub fn exponential_quantile_scalar(p: f64, lambda: f64) -> f64 {
    if !valid_rate(lambda) || p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    -(-p).ln_1p() / lambda
}

fn check(fname: &str, lambda: f64) -> Result<(), KernelError> {
    if !valid_rate(lambda) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: λ must be positive and finite, got {lambda}"
        )));
    }
    Ok(())
}

/// Exponential PDF - vectorised.
#[inline(always)]
pub fn exponential_pdf(
    x: &[f64],
    lambda: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("exponential_pdf", lambda)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        exponential_pdf_scalar(xi, lambda)
    })
}

/// Exponential CDF - vectorised.
#[inline(always)]
pub fn exponential_cdf(
    x: &[f64],
    lambda: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("exponential_cdf", lambda)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        exponential_cdf_scalar(xi, lambda)
    })
}

/// Exponential quantile - vectorised.
#[inline(always)]
pub fn exponential_quantile(
    p: &[f64],
    lambda: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("exponential_quantile", lambda)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        exponential_quantile_scalar(pi, lambda)
    })
}
