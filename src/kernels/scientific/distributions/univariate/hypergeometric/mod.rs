// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Hypergeometric Distribution Module** - *Sampling Without Replacement*
//!
//! Number of marked items among `draws` taken without replacement from a
//! `population` containing `successes` marked items:
//!
//! ```text
//! P(X = k) = C(K, k) C(N − K, n − k) / C(N, n)
//! support    k ∈ [max(0, n − (N − K)), min(n, K)]
//! ```
//!
//! With N = 8, K = n = 4 this is the lady-tasting-tea experiment, where
//! `P(X = 4) = 1/70`.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{combination, ln_choose};
use crate::kernels::scientific::distributions::univariate::binomial::is_count;
use crate::kernels::scientific::distributions::univariate::common::{
    discrete_quantile_search, univariate_kernel_f64, univariate_kernel_u64,
};

#[inline(always)]
fn valid_params(population: u64, successes: u64, draws: u64) -> bool {
    successes <= population && draws <= population
}

/// Inclusive support `[lo, hi]` for valid parameters.
#[inline(always)]
pub fn hypergeometric_support(population: u64, successes: u64, draws: u64) -> (u64, u64) {
    let lo = draws.saturating_sub(population.saturating_sub(successes));
    let hi = draws.min(successes);
    (lo, hi)
}

#[inline]
fn pmf_at(k: u64, population: u64, successes: u64, draws: u64) -> f64 {
    let (lo, hi) = hypergeometric_support(population, successes, draws);
    if k < lo || k > hi {
        return 0.0;
    }
    let failures = population - successes;
    let num = combination(successes as i64, k as i64)
        * combination(failures as i64, (draws - k) as i64);
    let den = combination(population as i64, draws as i64);
    if num.is_finite() && den.is_finite() {
        return num / den;
    }
    (ln_choose(successes, k) + ln_choose(failures, draws - k) - ln_choose(population, draws)).exp()
}

/// Hypergeometric PMF. 0 off the support, NaN for invalid parameters.
#[inline]
pub fn hypergeometric_pmf_scalar(k: f64, population: u64, successes: u64, draws: u64) -> f64 {
    if !valid_params(population, successes, draws) || k.is_nan() {
        return f64::NAN;
    }
    if !is_count(k) || k > draws as f64 {
        return 0.0;
    }
    pmf_at(k as u64, population, successes, draws)
}

/// Hypergeometric CDF by summation over the support up to ⌊x⌋.
#[inline]
pub fn hypergeometric_cdf_scalar(x: f64, population: u64, successes: u64, draws: u64) -> f64 {
    if !valid_params(population, successes, draws) || x.is_nan() {
        return f64::NAN;
    }
    let (lo, hi) = hypergeometric_support(population, successes, draws);
    if x < lo as f64 {
        return 0.0;
    }
    if x >= hi as f64 {
        return 1.0;
    }
    let upper = x.floor() as u64;
    let total: f64 = (lo..=upper)
        .map(|k| pmf_at(k, population, successes, draws))
        .sum();
    total.min(1.0)
}

/// Smallest k in the support with `P(X ≤ k) ≥ p`.
/// p ≤ 0 gives the lower end of the support, p ≥ 1 the upper end.
#[inline]
pub fn hypergeometric_quantile_scalar(p: f64, population: u64, successes: u64, draws: u64) -> f64 {
    if !valid_params(population, successes, draws) || p.is_nan() {
        return f64::NAN;
    }
    let (lo, hi) = hypergeometric_support(population, successes, draws);
    if p <= 0.0 {
        return lo as f64;
    }
    if p >= 1.0 {
        return hi as f64;
    }
    discrete_quantile_search(p, lo, hi, |k| pmf_at(k, population, successes, draws))
}

fn check(fname: &str, population: u64, successes: u64, draws: u64) -> Result<(), KernelError> {
    if !valid_params(population, successes, draws) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: need successes ≤ population and draws ≤ population, got N={population}, K={successes}, n={draws}"
        )));
    }
    Ok(())
}

/// Hypergeometric PMF over counts `k`.
///
/// ## Parameters
/// - `k`: number of marked items drawn
/// - `population`: total items N
/// - `successes`: marked items K ≤ N
/// - `draws`: items drawn n ≤ N
#[inline(always)]
pub fn hypergeometric_pmf(
    k: &[u64],
    population: u64,
    successes: u64,
    draws: u64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("hypergeometric_pmf", population, successes, draws)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| {
        pmf_at(ki, population, successes, draws)
    })
}

/// Hypergeometric CDF over counts `k`.
#[inline(always)]
pub fn hypergeometric_cdf(
    k: &[u64],
    population: u64,
    successes: u64,
    draws: u64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("hypergeometric_cdf", population, successes, draws)?;
    if k.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_u64(k, null_mask, null_count, |ki| {
        hypergeometric_cdf_scalar(ki as f64, population, successes, draws)
    })
}

/// Hypergeometric quantile over probabilities `p`.
#[inline(always)]
pub fn hypergeometric_quantile(
    p: &[f64],
    population: u64,
    successes: u64,
    draws: u64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("hypergeometric_quantile", population, successes, draws)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        hypergeometric_quantile_scalar(pi, population, successes, draws)
    })
}
