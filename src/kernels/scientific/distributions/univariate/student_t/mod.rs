// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Student's t Distribution Module** - *Small-Sample Inference*
//!
//! ```text
//! f(x) = Γ((ν+1)/2) / (√(νπ) Γ(ν/2)) · (1 + x²/ν)^(−(ν+1)/2)
//! F(x) = 1 − ½ I_{ν/(ν+x²)}(ν/2, ½)   for x > 0, mirrored for x < 0
//! ```
//!
//! The quantile solves the upper half by Newton-Raphson from the standard
//! normal quantile and mirrors it, since t → N(0, 1) as ν → ∞.
//!
//! ## Usage Examples
//! ```rust,ignore
//! use stat_kernels::kernels::scientific::distributions::univariate::student_t::*;
//!
//! let t_crit = student_t_quantile_scalar(0.975, 10.0); // ≈ 2.228
//! ```

use std::f64::consts::PI;

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{incomplete_beta, ln_gamma};
use crate::kernels::scientific::distributions::shared::solver::{
    newton_quantile, QuantileEstimate, Support,
};
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;
use crate::kernels::scientific::distributions::univariate::normal::std_normal_quantile;

#[inline(always)]
fn valid_df(df: f64) -> bool {
    df.is_finite() && df > 0.0
}

#[inline(always)]
fn ln_norm(df: f64) -> f64 {
    ln_gamma(0.5 * (df + 1.0)) - ln_gamma(0.5 * df) - 0.5 * (df * PI).ln()
}

/// Student t density. NaN for invalid df.
#[inline]
pub fn student_t_pdf_scalar(x: f64, df: f64) -> f64 {
    if !valid_df(df) || x.is_nan() {
        return f64::NAN;
    }
    (ln_norm(df) - 0.5 * (df + 1.0) * (x * x / df).ln_1p()).exp()
}

/// Student t CDF via the incomplete Beta.
#[inline]
pub fn student_t_cdf_scalar(x: f64, df: f64) -> f64 {
    if !valid_df(df) || x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    if x == f64::NEG_INFINITY {
        return 0.0;
    }
    if x == 0.0 {
        return 0.5;
    }
    let tail = 0.5 * incomplete_beta(df / (df + x * x), 0.5 * df, 0.5);
    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Student t quantile with solver diagnostics.
///
/// p ≤ 0 → −∞, p ≥ 1 → +∞, p = ½ → 0.
pub fn student_t_quantile_estimate(p: f64, df: f64) -> QuantileEstimate {
    if !valid_df(df) || p.is_nan() {
        return QuantileEstimate::exact(f64::NAN);
    }
    if p <= 0.0 {
        return QuantileEstimate::exact(f64::NEG_INFINITY);
    }
    if p >= 1.0 {
        return QuantileEstimate::exact(f64::INFINITY);
    }
    if p == 0.5 {
        return QuantileEstimate::exact(0.0);
    }
    if p < 0.5 {
        let upper = student_t_quantile_estimate(1.0 - p, df);
        return QuantileEstimate {
            value: -upper.value,
            ..upper
        };
    }
    newton_quantile(
        p,
        std_normal_quantile(p),
        Support::REAL_LINE,
        |x| student_t_cdf_scalar(x, df),
        |x| student_t_pdf_scalar(x, df),
    )
}

/// Student t quantile.
#[inline]
pub fn student_t_quantile_scalar(p: f64, df: f64) -> f64 {
    student_t_quantile_estimate(p, df).value
}

fn check(fname: &str, df: f64) -> Result<(), KernelError> {
    if !valid_df(df) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: df must be positive and finite, got {df}"
        )));
    }
    Ok(())
}

/// Student t PDF - vectorised, with Arrow-compatible null handling.
#[inline(always)]
pub fn student_t_pdf(
    x: &[f64],
    df: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("student_t_pdf", df)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    let ln_c = ln_norm(df);
    let half_df1 = 0.5 * (df + 1.0);
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        (ln_c - half_df1 * (xi * xi / df).ln_1p()).exp()
    })
}

/// Student t CDF - vectorised.
#[inline(always)]
pub fn student_t_cdf(
    x: &[f64],
    df: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("student_t_cdf", df)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        student_t_cdf_scalar(xi, df)
    })
}

/// Student t quantile - vectorised.
#[inline(always)]
pub fn student_t_quantile(
    p: &[f64],
    df: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("student_t_quantile", df)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        student_t_quantile_scalar(pi, df)
    })
}
