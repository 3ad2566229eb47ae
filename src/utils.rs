// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Null Handling and Argument Checks*
//!
//! Small helpers shared by the distribution kernels and the inference layer.

use minarrow::Bitmask;

use crate::errors::{log_length_mismatch, KernelError};

/// Determines whether nulls are present given an optional null count and mask reference.
/// Avoids computing mask cardinality to preserve performance guarantees.
#[inline(always)]
pub fn has_nulls(null_count: Option<usize>, mask: Option<&Bitmask>) -> bool {
    match null_count {
        Some(n) => n > 0,
        None => mask.is_some(),
    }
}

/// Checks the mask covers every input lane.
/// Used so we can avoid bounds checks in the hot loop.
#[inline(always)]
pub fn confirm_mask_capacity(cmp_len: usize, mask: Option<&Bitmask>) -> Result<(), KernelError> {
    if let Some(m) = mask {
        if m.len() < cmp_len {
            return Err(KernelError::OutOfBounds(format!(
                "mask (Bitmask): {} bits for {} values",
                m.len(),
                cmp_len
            )));
        }
    }
    Ok(())
}

/// Validates that two lengths are equal for paired operations.
///
/// # Returns
/// `Ok(())` if lengths are equal, otherwise `KernelError::LengthMismatch`.
#[inline(always)]
pub fn confirm_equal_len(label: &str, a: usize, b: usize) -> Result<(), KernelError> {
    if a != b {
        return Err(KernelError::LengthMismatch(log_length_mismatch(label, a, b)));
    }
    Ok(())
}

/// Validates that at least `min` observations are available.
#[inline(always)]
pub fn confirm_min_len(label: &str, n: usize, min: usize) -> Result<(), KernelError> {
    if n < min {
        return Err(KernelError::InsufficientData(format!(
            "{}: need at least {} observations, got {}",
            label, min, n
        )));
    }
    Ok(())
}
