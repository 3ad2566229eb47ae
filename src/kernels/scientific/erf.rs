// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Function Module** - *erf and erfc from the Incomplete Gamma*
//!
//! ```text
//! erf(x)  = (2/√π) ∫₀ˣ e^(-t²) dt  = sign(x) · P(½, x²)
//! erfc(x) = 1 − erf(x)                = Q(½, x²)  for x ≥ 0
//! ```
//!
//! Both reuse the regularised incomplete Gamma pair, so the tail of `erfc`
//! comes straight from the continued fraction and keeps its relative precision
//! far beyond the point where `1 − erf(x)` cancels to zero.

use crate::kernels::scientific::distributions::shared::scalar::{reg_lower_gamma, reg_upper_gamma};

/// Error function.
///
/// * `erf(±∞) = ±1`, `erf(0) = 0`, NaN propagates.
#[inline]
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        return x;
    }
    if x.is_infinite() {
        return x.signum();
    }
    x.signum() * reg_lower_gamma(0.5, x * x)
}

/// Complementary error function, `1 − erf(x)`.
///
/// * `erfc(−∞) = 2`, `erfc(+∞) = 0`, NaN propagates.
#[inline]
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x == f64::NEG_INFINITY {
        return 2.0;
    }
    if x >= 0.0 {
        reg_upper_gamma(0.5, x * x)
    } else {
        1.0 + reg_lower_gamma(0.5, x * x)
    }
}
