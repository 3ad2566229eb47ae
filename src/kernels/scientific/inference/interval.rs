// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Confidence Intervals** - *Two-Sided Intervals for a Mean*
//!
//! `estimate ± critical · standard_error`, with the critical value taken from
//! the standard normal when σ is known and from Student t with `n − 1`
//! degrees of freedom otherwise.

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::univariate::normal::std_normal_quantile;
use crate::kernels::scientific::distributions::univariate::student_t::student_t_quantile_scalar;
use crate::kernels::scientific::inference::summary::SampleSummary;
use crate::utils::confirm_min_len;

fn check_confidence(fname: &str, confidence: f64) -> Result<(), KernelError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(KernelError::OutOfBounds(format!(
            "{fname}: confidence must lie in (0, 1), got {confidence}"
        )));
    }
    Ok(())
}

/// Upper critical value `z` with `P(|Z| ≤ z) = confidence`.
pub fn z_critical(confidence: f64) -> Result<f64, KernelError> {
    check_confidence("z_critical", confidence)?;
    Ok(std_normal_quantile(0.5 + confidence / 2.0))
}

/// Upper critical value `t` with `P(|T| ≤ t) = confidence` on `df` degrees of freedom.
pub fn t_critical(confidence: f64, df: f64) -> Result<f64, KernelError> {
    check_confidence("t_critical", confidence)?;
    if !(df.is_finite() && df > 0.0) {
        return Err(KernelError::InvalidArguments(format!(
            "t_critical: df must be positive and finite, got {df}"
        )));
    }
    Ok(student_t_quantile_scalar(0.5 + confidence / 2.0, df))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
    pub standard_error: f64,
    pub critical_value: f64,
    pub confidence: f64,
}

impl ConfidenceInterval {
    fn around(estimate: f64, standard_error: f64, critical_value: f64, confidence: f64) -> Self {
        let margin = critical_value * standard_error;
        Self {
            estimate,
            lower: estimate - margin,
            upper: estimate + margin,
            standard_error,
            critical_value,
            confidence,
        }
    }

    /// Half-width of the interval.
    #[inline]
    pub fn margin(&self) -> f64 {
        self.critical_value * self.standard_error
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Interval for a mean with known population σ.
///
/// # Errors
/// - `InvalidArguments` for σ ≤ 0 or n = 0
/// - `OutOfBounds` for a confidence outside (0, 1)
pub fn z_interval(
    sample_mean: f64,
    sigma: f64,
    n: usize,
    confidence: f64,
) -> Result<ConfidenceInterval, KernelError> {
    if !(sigma.is_finite() && sigma > 0.0) || n == 0 {
        return Err(KernelError::InvalidArguments(format!(
            "z_interval: need σ > 0 and n ≥ 1, got σ={sigma}, n={n}"
        )));
    }
    let z = z_critical(confidence)?;
    let se = sigma / (n as f64).sqrt();
    Ok(ConfidenceInterval::around(sample_mean, se, z, confidence))
}

/// Interval for the mean of `x` with σ estimated by the sample standard deviation.
///
/// # Errors
/// - `InsufficientData` when `x` has fewer than two observations
/// - `OutOfBounds` for a confidence outside (0, 1)
pub fn t_interval(x: &[f64], confidence: f64) -> Result<ConfidenceInterval, KernelError> {
    confirm_min_len("t_interval", x.len(), 2)?;
    let s = SampleSummary::from_slice(x)?;
    let t = t_critical(confidence, (s.n - 1) as f64)?;
    Ok(ConfidenceInterval::around(s.mean, s.standard_error(), t, confidence))
}
