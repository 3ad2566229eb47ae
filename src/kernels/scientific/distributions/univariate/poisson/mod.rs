// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Poisson Distribution Module** - *Event Counts per Interval*
//!
//! Poisson(λ): `P(X = k) = λᵏ e^(−λ) / k!` for k ∈ {0, 1, 2, ...}, λ > 0.
//!
//! The PMF is evaluated directly with `factorial` for k ≤ 170 and in log space
//! beyond that, or whenever the direct product leaves the normal range. The CDF
//! sums the PMF and stops early once the remaining terms past the mode no
//! longer change the total.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::constants::MAX_FACTORIAL_ARG;
use crate::kernels::scientific::distributions::shared::scalar::{factorial, ln_factorial};
use crate::kernels::scientific::distributions::univariate::binomial::is_count;
use crate::kernels::scientific::distributions::univariate::common::{
    discrete_quantile_search, univariate_kernel_f64, univariate_kernel_u64,
};

#[inline(always)]
fn valid_lambda(lambda: f64) -> bool {
    lambda.is_finite() && lambda > 0.0
}

#[inline]
fn pmf_at(k: u64, lambda: f64) -> f64 {
    if k <= MAX_FACTORIAL_ARG {
        let direct = lambda.powf(k as f64) * (-lambda).exp() / factorial(k);
        if direct.is_normal() {
            return direct;
        }
    }
    (k as f64 * lambda.ln() - lambda - ln_factorial(k)).exp()
}

#[inline]
fn cdf_at(upper: u64, lambda: f64) -> f64 {
    let mut total = 0.0;
    for k in 0..=upper {
        let term = pmf_at(k, lambda);
        total += term;
        if k as f64 > lambda && term <= total * f64::EPSILON {
            break;
        }
    }
    total.min(1.0)
}

/// Poisson PMF. 0 for non-integer or negative `k`, NaN for invalid λ.
#[inline]
pub fn poisson_pmf_scalar(k: f64, lambda: f64) -> f64 {
    if !valid_lambda(lambda) || k.is_nan() {
        return f64::NAN;
    }
    if !is_count(k) {
        return 0.0;
    }
    pmf_at(k as u64, lambda)
}

/// Poisson CDF by summation of the PMF up to ⌊x⌋.
#[inline]
pub fn poisson_cdf_scalar(x: f64, lambda: f64) -> f64 {
    if !valid_lambda(lambda) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    cdf_at(x.floor() as u64, lambda)
}

/// Smallest k with `P(X ≤ k) ≥ p`. p ≤ 0 → 0, p ≥ 1 → +∞.
#[inline]
pub fn poisson_quantile_scalar(p: f64, lambda: f64) -> f64 {
    if !valid_lambda(lambda) || p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    discrete_quantile_search(p, 0, u64::MAX, |k| pmf_at(k, lambda))
}

fn check(fname: &str, lambda: f64) -> Result<(), KernelError> {
    if !valid_lambda(lambda) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: λ must be positive and finite, got {lambda}"
        )));
    }
    Ok(())
}

/// Poisson PMF over counts `k`.
#[inline(always)]
pub fn poisson_pmf(
    k: &[u64],
    lambda: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("poisson_pmf", lambda)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| pmf_at(ki, lambda))
}

/// Poisson CDF over counts `k`.
#[inline(always)]
pub fn poisson_cdf(
    k: &[u64],
    lambda: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("poisson_cdf", lambda)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| cdf_at(ki, lambda))
}

/// Poisson quantile over probabilities `p`.
#[inline(always)]
pub fn poisson_quantile(
    p: &[f64],
    lambda: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("poisson_quantile", lambda)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        poisson_quantile_scalar(pi, lambda)
    })
}
