// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Normal Distribution Module** - *Gaussian Distribution, Central Limit Foundation*
//!
//! PDF, CDF and quantile of N(μ, σ²). The CDF is expressed through `erfc`, and
//! the quantile is Acklam's rational approximation polished by one Halley step,
//! so no iteration is needed.
//!
//! ## Usage Examples
//! ```rust,ignore
//! use minarrow::vec64;
//! use stat_kernels::kernels::scientific::distributions::univariate::normal::*;
//!
//! let x = vec64![-2.0, -1.0, 0.0, 1.0, 2.0];
//! let pdf = normal_pdf(&x, 0.0, 1.0, None, None).unwrap();
//! let cdf = normal_cdf(&x, 0.0, 1.0, None, None).unwrap();
//!
//! // two-sided 95% critical value
//! let z = normal_quantile_scalar(0.975, 0.0, 1.0);
//! ```

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::constants::{SQRT_2, SQRT_2PI};
use crate::kernels::scientific::distributions::shared::scalar::inv_std_normal;
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;
use crate::kernels::scientific::erf::erfc;

#[inline(always)]
fn valid_params(mean: f64, std: f64) -> bool {
    mean.is_finite() && std.is_finite() && std > 0.0
}

/// Standard normal CDF Φ(z).
#[inline]
pub fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Standard normal density φ(z).
#[inline]
pub fn std_normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / SQRT_2PI
}

/// Normal density `(1/(σ√(2π))) exp(−(x−μ)²/2σ²)`. NaN for invalid parameters.
#[inline]
pub fn normal_pdf_scalar(x: f64, mean: f64, std: f64) -> f64 {
    if !valid_params(mean, std) {
        return f64::NAN;
    }
    std_normal_pdf((x - mean) / std) / std
}

/// Normal CDF. NaN for invalid parameters.
#[inline]
pub fn normal_cdf_scalar(x: f64, mean: f64, std: f64) -> f64 {
    if !valid_params(mean, std) {
        return f64::NAN;
    }
    std_normal_cdf((x - mean) / std)
}

/// Standard normal quantile Φ⁻¹(p), Acklam plus one Halley refinement.
///
/// p ≤ 0 → −∞, p ≥ 1 → +∞, NaN propagates.
#[inline]
pub fn std_normal_quantile(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    let x = inv_std_normal(p);
    let e = std_normal_cdf(x) - p;
    let u = e * SQRT_2PI * (0.5 * x * x).exp();
    let refined = x - u / (1.0 + 0.5 * x * u);
    if refined.is_finite() {
        refined
    } else {
        x
    }
}

/// Normal quantile μ + σ Φ⁻¹(p). NaN for invalid parameters.
#[inline]
pub fn normal_quantile_scalar(p: f64, mean: f64, std: f64) -> f64 {
    if !valid_params(mean, std) {
        return f64::NAN;
    }
    mean + std * std_normal_quantile(p)
}

/// Normal PDF - vectorised, with Arrow-compatible null handling.
///
/// # Parameters
/// - `x`: input data
/// - `mean`: normal mean
/// - `std`: normal standard deviation
/// - `null_mask`: optional input null bitmap
/// - `null_count`: optional input null count
#[inline(always)]
pub fn normal_pdf(
    x: &[f64],
    mean: f64,
    std: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    if !valid_params(mean, std) {
        return Err(KernelError::InvalidArguments(
            "normal_pdf: invalid parameters".into(),
        ));
    }
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    let inv_sigma = 1.0 / std;
    let norm = inv_sigma / SQRT_2PI;
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        let z = (xi - mean) * inv_sigma;
        norm * (-0.5 * z * z).exp()
    })
}

/// Normal CDF - vectorised.
#[inline(always)]
pub fn normal_cdf(
    x: &[f64],
    mean: f64,
    std: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    if !valid_params(mean, std) {
        return Err(KernelError::InvalidArguments(
            "normal_cdf: invalid parameters".into(),
        ));
    }
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        std_normal_cdf((xi - mean) / std)
    })
}

/// Normal quantile - vectorised.
/// https://stackedboxes.org/2017/05/01/acklams-normal-quantile-function/
#[inline(always)]
pub fn normal_quantile(
    p: &[f64],
    mean: f64,
    std: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    if !valid_params(mean, std) {
        return Err(KernelError::InvalidArguments(
            "normal_quantile: invalid parameters".into(),
        ));
    }
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        mean + std * std_normal_quantile(pi)
    })
}

#[cfg(test)]
mod tests {
    use minarrow::vec64;

    use super::*;
    use crate::kernels::scientific::distributions::univariate::common::{
        dense_data, single_null_mask,
    };

    // see "./tests" for scipy test suite

    #[test]
    fn quantile_critical_values() {
        // scipy.stats.norm.ppf(0.975) == 1.959963984540054
        assert!((std_normal_quantile(0.975) - 1.959963984540054).abs() < 1e-12);
        // scipy.stats.norm.ppf(0.95) == 1.6448536269514722
        assert!((std_normal_quantile(0.95) - 1.6448536269514722).abs() < 1e-12);
        // scipy.stats.norm.ppf(1e-10) == -6.361340902404056
        assert!((std_normal_quantile(1e-10) + 6.361340902404056).abs() < 1e-9);
    }

    #[test]
    fn quantile_boundaries() {
        assert_eq!(std_normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(std_normal_quantile(-0.1), f64::NEG_INFINITY);
        assert_eq!(std_normal_quantile(1.0), f64::INFINITY);
        assert!(std_normal_quantile(f64::NAN).is_nan());
        assert_eq!(std_normal_quantile(0.5), 0.0);
    }

    #[test]
    fn pdf_symmetry_and_cdf_complement() {
        let mut x = 0.0;
        while x < 6.0 {
            assert_eq!(normal_pdf_scalar(x, 0.0, 1.0), normal_pdf_scalar(-x, 0.0, 1.0));
            let s = normal_cdf_scalar(x, 0.0, 1.0) + normal_cdf_scalar(-x, 0.0, 1.0);
            assert!((s - 1.0).abs() < 1e-14, "x={x}: {s}");
            x += 0.3;
        }
    }

    #[test]
    fn scalar_invalid_parameters_give_nan() {
        assert!(normal_pdf_scalar(0.0, 0.0, 0.0).is_nan());
        assert!(normal_cdf_scalar(0.0, 0.0, -1.0).is_nan());
        assert!(normal_quantile_scalar(0.5, f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn vector_rejects_invalid_std() {
        let x = vec64![0.0];
        assert!(normal_pdf(&x, 0.0, 0.0, None, None).is_err());
        assert!(normal_cdf(&x, 0.0, -2.0, None, None).is_err());
        assert!(normal_quantile(&x, 0.0, f64::INFINITY, None, None).is_err());
    }

    #[test]
    fn empty_input() {
        let arr = normal_pdf(&[], 0.0, 1.0, None, None).unwrap();
        assert!(arr.data.is_empty());
        assert!(arr.null_mask.is_none());
    }

    #[test]
    fn bulk_vs_scalar_consistency() {
        let xs = vec64![-3.0, -1.0, 0.0, 1.0, 2.0];
        let bulk = dense_data(normal_cdf(&xs, 1.0, 2.0, None, None).unwrap());
        for (i, &x) in xs.iter().enumerate() {
            assert!((bulk[i] - normal_cdf_scalar(x, 1.0, 2.0)).abs() < 1e-15);
        }
    }

    #[test]
    fn mask_propagation() {
        let xs = vec64![0.1, 0.5, 0.9];
        let mask = single_null_mask(3, 1);
        let arr = normal_quantile(&xs, 0.0, 1.0, Some(&mask), Some(1)).unwrap();
        assert!(!arr.null_mask.as_ref().unwrap().get(1));
        assert!(arr.data[1].is_nan());
        assert!(arr.data[2] > 1.28 && arr.data[2] < 1.29);
    }
}
