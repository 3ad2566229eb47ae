// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Geometric Distribution Module** - *Trials Until First Success*
//!
//! Counts trials up to and including the first success, so the support is
//! k ∈ {1, 2, 3, ...}:
//!
//! ```text
//! P(X = k) = (1 − p)^(k−1) p
//! P(X ≤ k) = 1 − (1 − p)^k
//! ```
//!
//! The partial sum of the PMF has the closed form above, evaluated with
//! `ln_1p`/`exp_m1` so that small p keeps full precision.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::univariate::binomial::is_count;
use crate::kernels::scientific::distributions::univariate::common::{
    univariate_kernel_f64, univariate_kernel_u64,
};

#[inline(always)]
fn valid_p(p: f64) -> bool {
    p.is_finite() && p > 0.0 && p < 1.0
}

#[inline(always)]
fn pmf_at(k: u64, p: f64) -> f64 {
    if k == 0 {
        return 0.0;
    }
    p * ((k - 1) as f64 * (-p).ln_1p()).exp()
}

#[inline(always)]
fn cdf_at(k: u64, p: f64) -> f64 {
    if k == 0 {
        return 0.0;
    }
    -(k as f64 * (-p).ln_1p()).exp_m1()
}

/// Geometric PMF. 0 for non-integer `k` or `k < 1`, NaN for invalid `p`.
#[inline]
pub fn geometric_pmf_scalar(k: f64, p: f64) -> f64 {
    if !valid_p(p) || k.is_nan() {
        return f64::NAN;
    }
    if !is_count(k) {
        return 0.0;
    }
    pmf_at(k as u64, p)
}

/// Geometric CDF, `1 − (1−p)^⌊x⌋` for x ≥ 1.
#[inline]
pub fn geometric_cdf_scalar(x: f64, p: f64) -> f64 {
    if !valid_p(p) || x.is_nan() {
        return f64::NAN;
    }
    if x < 1.0 {
        return 0.0;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    cdf_at(x.floor() as u64, p)
}

/// Largest count below which every integer is an exact f64.
const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Smallest k ≥ 1 with `P(X ≤ k) ≥ prob`. prob ≤ 0 → 1, prob ≥ 1 → +∞.
///
/// Inverts the closed-form CDF, then nudges by one trial to absorb rounding.
#[inline]
pub fn geometric_quantile_scalar(prob: f64, p: f64) -> f64 {
    if !valid_p(p) || prob.is_nan() {
        return f64::NAN;
    }
    if prob <= 0.0 {
        return 1.0;
    }
    if prob >= 1.0 {
        return f64::INFINITY;
    }
    let raw = ((-prob).ln_1p() / (-p).ln_1p()).ceil().max(1.0);
    // past 2^53 neighbouring counts are not distinct floats
    if raw >= MAX_EXACT_COUNT {
        return raw;
    }
    let mut k = raw as u64;
    if k > 1 && cdf_at(k - 1, p) >= prob {
        k -= 1;
    } else if cdf_at(k, p) < prob {
        k += 1;
    }
    k as f64
}

fn check(fname: &str, p: f64) -> Result<(), KernelError> {
    if !valid_p(p) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: p must lie strictly inside (0, 1), got {p}"
        )));
    }
    Ok(())
}

/// Geometric PMF over trial counts `k`. `k = 0` gives 0.
#[inline(always)]
pub fn geometric_pmf(
    k: &[u64],
    p: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("geometric_pmf", p)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| pmf_at(ki, p))
}

/// Geometric CDF over trial counts `k`.
#[inline(always)]
pub fn geometric_cdf(
    k: &[u64],
    p: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("geometric_cdf", p)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| cdf_at(ki, p))
}

/// Geometric quantile over probabilities `q`.
#[inline(always)]
pub fn geometric_quantile(
    q: &[f64],
    p: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("geometric_quantile", p)?;
    if q.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(q, null_mask, null_count, |qi| {
        geometric_quantile_scalar(qi, p)
    })
}
