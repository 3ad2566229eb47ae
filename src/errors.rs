// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel and Inference Error Handling*
//!
//! Error types for distribution kernels, hypothesis tests and simulation runs.
//!
//! ## Error Categories
//! - **Argument Errors**: Distribution parameters outside their family domain
//! - **Dimension Errors**: Paired inputs of unequal length
//! - **Data Errors**: Too few observations for the requested statistic
//! - **Boundary Errors**: Probabilities or indices outside their valid range
//!
//! Scalar evaluators never return these. They follow the NaN sentinel policy
//! and leave validation to the vectorised and request-level entry points.

use thiserror::Error;

/// Error type for all kernel and inference operations.
///
/// Each variant carries a message naming the failing function and the
/// offending values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Invalid arguments provided to a kernel function.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Array length mismatch between operands.
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    /// Not enough observations to compute the statistic.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Probability or index out of bounds.
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),
}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) arrays.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side array
/// * `rhs` - Length of the right-hand side array
pub fn log_length_mismatch(fname: &str, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_category() {
        let e = KernelError::InvalidArguments("normal_pdf: invalid parameters".into());
        assert_eq!(e.to_string(), "Invalid arguments: normal_pdf: invalid parameters");
        let e = KernelError::InsufficientData("t_test: n=1".into());
        assert_eq!(e.to_string(), "Insufficient data: t_test: n=1");
    }

    #[test]
    fn length_mismatch_message() {
        assert_eq!(
            log_length_mismatch("paired_t_test", 3, 4),
            "paired_t_test => Length mismatch: LHS 3 RHS 4"
        );
    }
}
