// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Binomial Distribution Module** - *Discrete Probability Distribution*
//!
//! Binomial(n, p) counts successes in n independent Bernoulli trials, each with
//! success probability p.
//!
//! ## Mathematical Definition
//! - **PMF**: P(X = k) = C(n,k) × p^k × (1-p)^(n-k)
//! - **CDF**: P(X ≤ k) = Σᵢ₌₀ᵏ C(n,i) × pⁱ × (1-p)^(n-i)
//! - **Support**: k ∈ {0, 1, 2, ..., n}
//! - **Parameters**: n ∈ ℕ₀ (number of trials), p ∈ (0, 1) (success probability)
//!
//! The PMF uses the multiplicative binomial coefficient while it stays finite and
//! the product does not underflow, and switches to log space otherwise. The CDF
//! sums the PMF exactly; the quantile is the smallest k whose CDF reaches p.
//!
//! ## Use Cases
//! - A/B testing: conversion rate analysis
//! - Quality control: defect counts per batch
//! - Exact tests for a single proportion

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{combination, ln_choose};
use crate::kernels::scientific::distributions::univariate::common::{
    discrete_quantile_search, univariate_kernel_f64, univariate_kernel_u64,
};

#[inline(always)]
fn valid_p(p: f64) -> bool {
    p.is_finite() && p > 0.0 && p < 1.0
}

/// True for finite, non-negative whole numbers.
#[inline(always)]
pub(crate) fn is_count(x: f64) -> bool {
    x.is_finite() && x >= 0.0 && x.fract() == 0.0
}

/// PMF at an integer `k ≤ n` with valid `p`.
#[inline]
fn pmf_at(k: u64, n: u64, p: f64) -> f64 {
    let q = 1.0 - p;
    let c = combination(n as i64, k as i64);
    if c.is_finite() {
        let direct = c * p.powf(k as f64) * q.powf((n - k) as f64);
        if direct.is_normal() {
            return direct;
        }
    }
    (ln_choose(n, k) + k as f64 * p.ln() + (n - k) as f64 * (-p).ln_1p()).exp()
}

/// Binomial PMF. 0 for non-integer or out-of-support `k`, NaN for invalid `p`.
#[inline]
pub fn binomial_pmf_scalar(k: f64, n: u64, p: f64) -> f64 {
    if !valid_p(p) || k.is_nan() {
        return f64::NAN;
    }
    if !is_count(k) || k > n as f64 {
        return 0.0;
    }
    pmf_at(k as u64, n, p)
}

/// Binomial CDF by summation of the PMF up to ⌊x⌋.
#[inline]
pub fn binomial_cdf_scalar(x: f64, n: u64, p: f64) -> f64 {
    if !valid_p(p) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x >= n as f64 {
        return 1.0;
    }
    let upper = x.floor() as u64;
    let total: f64 = (0..=upper).map(|k| pmf_at(k, n, p)).sum();
    total.min(1.0)
}

/// Smallest k with `P(X ≤ k) ≥ prob`. prob ≤ 0 → 0, prob ≥ 1 → n.
#[inline]
pub fn binomial_quantile_scalar(prob: f64, n: u64, p: f64) -> f64 {
    if !valid_p(p) || prob.is_nan() {
        return f64::NAN;
    }
    if prob <= 0.0 {
        return 0.0;
    }
    if prob >= 1.0 {
        return n as f64;
    }
    discrete_quantile_search(prob, 0, n, |k| pmf_at(k, n, p))
}

fn check(fname: &str, p: f64) -> Result<(), KernelError> {
    if !valid_p(p) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: p must lie strictly inside (0, 1), got {p}"
        )));
    }
    Ok(())
}

/// Binomial PMF over counts `k`.
///
/// ## Parameters
/// - `k`: number of successes to evaluate
/// - `n`: number of trials
/// - `p`: success probability in (0, 1)
/// - `null_mask`: optional validity mask (Arrow-style: 1=valid, 0=null)
/// - `null_count`: optional count of null values
///
/// Values `k > n` give 0.
#[inline(always)]
pub fn binomial_pmf(
    k: &[u64],
    n: u64,
    p: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("binomial_pmf", p)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| {
        if ki > n {
            0.0
        } else {
            pmf_at(ki, n, p)
        }
    })
}

/// Binomial CDF over counts `k`.
#[inline(always)]
pub fn binomial_cdf(
    k: &[u64],
    n: u64,
    p: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("binomial_cdf", p)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| {
        binomial_cdf_scalar(ki as f64, n, p)
    })
}

/// Binomial quantile over probabilities `q`.
#[inline(always)]
pub fn binomial_quantile(
    q: &[f64],
    n: u64,
    p: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("binomial_quantile", p)?;
    if q.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(q, null_mask, null_count, |qi| {
        binomial_quantile_scalar(qi, n, p)
    })
}
