// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Common Distribution Utilities** - *Shared Kernel Drivers*
//!
//! Drivers that lift a scalar body `f64 -> f64` (or `u64 -> f64`) over an input
//! slice with Arrow-compatible null handling, so each family only supplies the
//! per-element mathematics.
//!
//! ### Null handling
//! - Dense path: taken when `has_nulls` is false. If a mask was supplied
//!   (with a `null_count` of `0`), an all-valid mask is returned alongside.
//! - Masked path: null lanes are emitted as `NaN` with a cleared validity bit.
//! - Any `NaN` or `inf` values generated by the body are kept verbatim, without
//!   `nulling` them in the mask, since they can carry signal. One can treat
//!   them further if needed.

use log::debug;
use minarrow::{Bitmask, FloatArray, Vec64};

use crate::config::DISCRETE_QUANTILE_MAX_STEPS;
use crate::errors::KernelError;
use crate::utils::{confirm_mask_capacity, has_nulls};

/// Dense kernel helper for `f64 -> f64` bodies.
#[inline(always)]
pub fn dense_univariate_kernel_f64<FScalar>(
    x: &[f64],
    has_mask: bool,
    scalar_body: FScalar,
) -> (Vec64<f64>, Option<Bitmask>)
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    for &xi in x {
        out.push(scalar_body(xi));
    }
    let out_mask = if has_mask {
        Some(Bitmask::new_set_all(len, true))
    } else {
        None
    };
    (out, out_mask)
}

/// Null-aware masked kernel helper for `f64 -> f64` bodies.
///
/// # Safety
/// Uses unchecked mask access; callers confirm the mask covers `x`.
#[inline(always)]
pub fn masked_univariate_kernel_f64<FScalar>(
    x: &[f64],
    mask: &Bitmask,
    scalar_body: FScalar,
) -> (Vec64<f64>, Bitmask)
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    let mut out_mask = mask.clone();
    for (idx, &xi) in x.iter().enumerate() {
        if !unsafe { mask.get_unchecked(idx) } {
            out.push(f64::NAN);
            unsafe { out_mask.set_unchecked(idx, false) };
        } else {
            out.push(scalar_body(xi));
            unsafe { out_mask.set_unchecked(idx, true) };
        }
    }
    (out, out_mask)
}

/// Dense kernel helper for `u64 -> f64` bodies (discrete counts).
#[inline(always)]
pub fn dense_univariate_kernel_u64<FScalar>(
    k: &[u64],
    has_mask: bool,
    scalar_body: FScalar,
) -> (Vec64<f64>, Option<Bitmask>)
where
    FScalar: Fn(u64) -> f64,
{
    let len = k.len();
    let mut out = Vec64::with_capacity(len);
    for &ki in k {
        out.push(scalar_body(ki));
    }
    let out_mask = if has_mask {
        Some(Bitmask::new_set_all(len, true))
    } else {
        None
    };
    (out, out_mask)
}

/// Null-aware masked kernel helper for `u64 -> f64` bodies.
///
/// # Safety
/// Uses unchecked mask access; callers confirm the mask covers `k`.
#[inline(always)]
pub fn masked_univariate_kernel_u64<FScalar>(
    k: &[u64],
    mask: &Bitmask,
    scalar_body: FScalar,
) -> (Vec64<f64>, Bitmask)
where
    FScalar: Fn(u64) -> f64,
{
    let len = k.len();
    let mut out = Vec64::with_capacity(len);
    let mut out_mask = mask.clone();
    for (idx, &ki) in k.iter().enumerate() {
        if !unsafe { mask.get_unchecked(idx) } {
            out.push(f64::NAN);
            unsafe { out_mask.set_unchecked(idx, false) };
        } else {
            out.push(scalar_body(ki));
            unsafe { out_mask.set_unchecked(idx, true) };
        }
    }
    (out, out_mask)
}

/// Runs `scalar_body` over `x`, choosing the dense or masked path.
///
/// # Errors
/// `KernelError::OutOfBounds` if a mask with nulls is shorter than `x`.
#[inline(always)]
pub fn univariate_kernel_f64<FScalar>(
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    scalar_body: FScalar,
) -> Result<FloatArray<f64>, KernelError>
where
    FScalar: Fn(f64) -> f64,
{
    match null_mask {
        Some(mask) if has_nulls(null_count, null_mask) => {
            confirm_mask_capacity(x.len(), null_mask)?;
            let (out, out_mask) = masked_univariate_kernel_f64(x, mask, scalar_body);
            Ok(FloatArray {
                data: out.into(),
                null_mask: Some(out_mask),
            })
        }
        _ => {
            let (out, out_mask) = dense_univariate_kernel_f64(x, null_mask.is_some(), scalar_body);
            Ok(FloatArray {
                data: out.into(),
                null_mask: out_mask,
            })
        }
    }
}

/// Runs `scalar_body` over discrete counts `k`, choosing the dense or masked path.
#[inline(always)]
pub fn univariate_kernel_u64<FScalar>(
    k: &[u64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    scalar_body: FScalar,
) -> Result<FloatArray<f64>, KernelError>
where
    FScalar: Fn(u64) -> f64,
{
    match null_mask {
        Some(mask) if has_nulls(null_count, null_mask) => {
            confirm_mask_capacity(k.len(), null_mask)?;
            let (out, out_mask) = masked_univariate_kernel_u64(k, mask, scalar_body);
            Ok(FloatArray {
                data: out.into(),
                null_mask: Some(out_mask),
            })
        }
        _ => {
            let (out, out_mask) = dense_univariate_kernel_u64(k, null_mask.is_some(), scalar_body);
            Ok(FloatArray {
                data: out.into(),
                null_mask: out_mask,
            })
        }
    }
}

/// Smallest `k` in `[start, end]` whose cumulative mass from `start` reaches `p`.
///
/// Scans at most `DISCRETE_QUANTILE_MAX_STEPS` values and returns the last one
/// reached if the target is never met. The target is shaded down by a few ulps
/// so that a CDF which sums to 1 in exact arithmetic still terminates.
pub fn discrete_quantile_search<F>(p: f64, start: u64, end: u64, pmf: F) -> f64
where
    F: Fn(u64) -> f64,
{
    let target = p * (1.0 - 64.0 * f64::EPSILON);
    let last = end.min(start.saturating_add(DISCRETE_QUANTILE_MAX_STEPS));
    let mut cumulative = 0.0;
    let mut k = start;
    loop {
        cumulative += pmf(k);
        if cumulative >= target {
            return k as f64;
        }
        if k >= last {
            if last < end {
                debug!("discrete_quantile_search: stopped at k={k} with mass {cumulative} < {p}");
            }
            return k as f64;
        }
        k += 1;
    }
}

// Common test helpers

/// Test Helper: unwrap `FloatArray`, assert *no* null mask, return data.
#[cfg(test)]
pub(crate) fn dense_data(arr: FloatArray<f64>) -> minarrow::Buffer<f64> {
    assert!(arr.null_mask.is_none(), "unexpected mask on dense path");
    arr.data
}

/// Create a mask of given length with exactly the lane `idx` null.
#[cfg(test)]
pub(crate) fn single_null_mask(len: usize, idx: usize) -> Bitmask {
    let mut m = Bitmask::new_set_all(len, true);
    unsafe { m.set_unchecked(idx, false) };
    m
}
