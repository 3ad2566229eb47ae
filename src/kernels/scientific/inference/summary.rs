// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sample Summaries** - *Mean and Dispersion of Observed Data*
//!
//! Two-pass moments over a slice. The sample variance divides by `n − 1`;
//! the population variance by `n`.

use crate::errors::KernelError;
use crate::utils::confirm_min_len;

/// Arithmetic mean.
///
/// # Errors
/// `InsufficientData` for an empty slice.
#[inline]
pub fn mean(x: &[f64]) -> Result<f64, KernelError> {
    confirm_min_len("mean", x.len(), 1)?;
    Ok(x.iter().sum::<f64>() / x.len() as f64)
}

#[inline(always)]
fn sum_sq_dev(x: &[f64], m: f64) -> f64 {
    x.iter().map(|&v| (v - m) * (v - m)).sum()
}

/// Unbiased sample variance `Σ(x − x̄)² / (n − 1)`.
///
/// # Errors
/// `InsufficientData` when fewer than two observations are given.
#[inline]
pub fn sample_variance(x: &[f64]) -> Result<f64, KernelError> {
    confirm_min_len("sample_variance", x.len(), 2)?;
    let m = mean(x)?;
    Ok(sum_sq_dev(x, m) / (x.len() - 1) as f64)
}

/// Sample standard deviation, the square root of [`sample_variance`].
#[inline]
pub fn sample_std(x: &[f64]) -> Result<f64, KernelError> {
    sample_variance(x).map(f64::sqrt)
}

/// Population variance `Σ(x − x̄)² / n`.
#[inline]
pub fn population_variance(x: &[f64]) -> Result<f64, KernelError> {
    let m = mean(x)?;
    Ok(sum_sq_dev(x, m) / x.len() as f64)
}

/// Count, mean and sample dispersion of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl SampleSummary {
    /// Summarises `x`, which needs at least two observations.
    pub fn from_slice(x: &[f64]) -> Result<Self, KernelError> {
        let variance = sample_variance(x)?;
        Ok(Self {
            n: x.len(),
            mean: mean(x)?,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    /// `s / √n`.
    #[inline]
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.n as f64).sqrt()
    }
}
