// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **F Distribution Module** - *Ratio of Scaled Chi-Squares*
//!
//! F(d₁, d₂), used for variance-ratio tests and ANOVA:
//!
//! ```text
//! ln f(x) = (d₁/2)ln d₁ + (d₂/2)ln d₂ + (d₁/2 − 1)ln x − ((d₁+d₂)/2) ln(d₁x + d₂) − ln B(d₁/2, d₂/2)
//! F(x)    = I_{d₁x/(d₁x+d₂)}(d₁/2, d₂/2)
//! ```
//!
//! Quantile by Newton-Raphson starting at the mean d₂/(d₂−2) when d₂ > 2, else 1.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{incomplete_beta, ln_beta};
use crate::kernels::scientific::distributions::shared::solver::{
    newton_quantile, QuantileEstimate, Support,
};
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;

#[inline(always)]
fn valid_params(df1: f64, df2: f64) -> bool {
    df1.is_finite() && df2.is_finite() && df1 > 0.0 && df2 > 0.0
}

/// F density. 0 for x < 0, NaN for invalid degrees of freedom.
#[inline]
pub fn fisher_f_pdf_scalar(x: f64, df1: f64, df2: f64) -> f64 {
    if !valid_params(df1, df2) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x == 0.0 {
        return if df1 < 2.0 {
            f64::INFINITY
        } else if df1 == 2.0 {
            1.0
        } else {
            0.0
        };
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    let h1 = 0.5 * df1;
    let h2 = 0.5 * df2;
    (h1 * df1.ln() + h2 * df2.ln() + (h1 - 1.0) * x.ln()
        - (h1 + h2) * (df1 * x + df2).ln()
        - ln_beta(h1, h2))
    .exp()
}

/// F CDF via the incomplete Beta.
#[inline]
pub fn fisher_f_cdf_scalar(x: f64, df1: f64, df2: f64) -> f64 {
    if !valid_params(df1, df2) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    let dx = df1 * x;
    let denom = dx + df2;
    // far into the upper tail the complement df2/(dx+df2) keeps its digits
    if dx > df2 {
        1.0 - incomplete_beta(df2 / denom, 0.5 * df2, 0.5 * df1)
    } else {
        incomplete_beta(dx / denom, 0.5 * df1, 0.5 * df2)
    }
}

/// F quantile with solver diagnostics. p ≤ 0 → 0, p ≥ 1 → +∞.
pub fn fisher_f_quantile_estimate(p: f64, df1: f64, df2: f64) -> QuantileEstimate {
    if !valid_params(df1, df2) || p.is_nan() {
        return QuantileEstimate::exact(f64::NAN);
    }
    if p <= 0.0 {
        return QuantileEstimate::exact(0.0);
    }
    if p >= 1.0 {
        return QuantileEstimate::exact(f64::INFINITY);
    }
    let initial = if df2 > 2.0 { df2 / (df2 - 2.0) } else { 1.0 };
    newton_quantile(
        p,
        initial,
        Support::POSITIVE,
        |x| fisher_f_cdf_scalar(x, df1, df2),
        |x| fisher_f_pdf_scalar(x, df1, df2),
    )
}

/// F quantile.
#[inline]
pub fn fisher_f_quantile_scalar(p: f64, df1: f64, df2: f64) -> f64 {
    fisher_f_quantile_estimate(p, df1, df2).value
}

fn check(fname: &str, df1: f64, df2: f64) -> Result<(), KernelError> {
    if !valid_params(df1, df2) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: degrees of freedom must be positive and finite, got df1={df1}, df2={df2}"
        )));
    }
    Ok(())
}

/// F PDF - vectorised.
#[inline(always)]
pub fn fisher_f_pdf(
    x: &[f64],
    df1: f64,
    df2: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("fisher_f_pdf", df1, df2)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        fisher_f_pdf_scalar(xi, df1, df2)
    })
}

/// F CDF - vectorised.
#[inline(always)]
pub fn fisher_f_cdf(
    x: &[f64],
    df1: f64,
    df2: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("fisher_f_cdf", df1, df2)?;
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(x, null_mask, null_count, |xi| {
        fisher_f_cdf_scalar(xi, df1, df2)
    })
}

/// F quantile - vectorised.
#[inline(always)]
pub fn fisher_f_quantile(
    p: &[f64],
    df1: f64,
    df2: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check("fisher_f_quantile", df1, df2)?;
    if p.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    univariate_kernel_f64(p, null_mask, null_count, |pi| {
        fisher_f_quantile_scalar(pi, df1, df2)
    })
}
