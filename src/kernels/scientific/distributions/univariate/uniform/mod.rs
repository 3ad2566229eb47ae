// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Uniform Distribution Module** - *Constant Density on [a, b]*
//!
//! pdf = 1/(b−a) on [a, b], a linear CDF ramp, and the closed-form quantile
//! `a + p(b−a)`.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;

#[inline(always)]
fn valid_params(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && a < b
}

/// Uniform density on [a, b]; 0 outside, NaN for invalid parameters.
#[inline]
pub fn uniform_pdf_scalar(x: f64, a: f64, b: f64) -> f64 {
    if !valid_params(a, b) || x.is_nan() {
        return f64::NAN;
    }
    if x < a || x > b {
        0.0
    } else {
        1.0 / (b - a)
    }
}

/// Uniform CDF, clamped to [0, 1].
#[inline]
pub fn uniform_cdf_scalar(x: f64, a: f64, b: f64) -> f64 {
    if !valid_params(a, b) || x.is_nan() {
        return f64::NAN;
    }
    ((x - a) / (b - a)).clamp(0.0, 1.0)
}

/// Uniform quantile; p ≤ 0 → a, p ≥ 1 → b.
#[inline]
pub fn uniform_quantile_scalar(p: f64, a: f64, b: f64) -> f64 {
    if !valid_params(a, b) || p.is_nan() {
        return f64::NAN;
    }
    a + p.clamp(0.0, 1.0) * (b - a)
}

fn check(fname: &str, a: f64, b: f64) -> Result<(), KernelError> {
    if !valid_params(a, b) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: require finite a < b, got a={a}, b={b}"
        )));
    }
    Ok(())
}

/// Uniform PDF - vectorised.
#[inline(always)]
pub fn uniform_pdf(
    x: &[f64],
    a: f64,
    b: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("uniform_pdf", a, b)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        uniform_pdf_scalar(xi, a, b)
    })
}

/// Uniform CDF - vectorised.
#[inline(always)]
pub fn uniform_cdf(
    x: &[f64],
    a: f64,
    b: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("uniform_cdf", a, b)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        uniform_cdf_scalar(xi, a, b)
    })
}

/// Uniform quantile - vectorised.
#[inline(always)]
pub fn uniform_quantile(
    p: &[f64],
    a: f64,
    b: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("uniform_quantile", a, b)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        uniform_quantile_scalar(pi, a, b)
    })
}
