// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Mathematical Constants Module** - *Hard-Coded Constants for Statistical Computing*
//!
//! Constants shared by the special functions, the distribution evaluators and
//! the random-variate generators.

/// The square root of 2: √2 ≈ 1.414213562373095.
pub(crate) const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// The square root of 2π: √(2π) ≈ 2.506628274631000.
///
/// Normalisation constant of the normal PDF and the Lanczos Gamma form.
pub(crate) const SQRT_2PI: f64 = 2.5066282746310002_f64;

/// Half of the natural logarithm of 2π: ½ln(2π) ≈ 0.918938533204673.
pub(crate) const HALF_LOG_TWO_PI: f64 = 0.918_938_533_204_672_741_780_329_736_406;

/// Lanczos auxiliary parameter `g`.
pub(crate) const LANCZOS_G: f64 = 7.0;

/// Lanczos approximation coefficients, g = 7 and n = 9.
///
/// Used with the argument shifted by −1, `x = c0 + Σ cᵢ/(z+i)`.
pub(crate) const COF: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Acklam's inverse normal CDF approximation coefficients (central numerator).
///
/// Near-machine precision across 0.02425 < p < 0.97575.
pub(crate) const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (central denominator).
pub(crate) const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Acklam's inverse normal CDF approximation coefficients (tail numerator).
pub(crate) const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (tail denominator).
pub(crate) const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Break-point between the central and tail rational approximations (≈ 2σ).
pub(crate) const P_LOW: f64 = 0.02425;

/// Largest n for which n! is finite in f64.
pub(crate) const MAX_FACTORIAL_ARG: u64 = 170;
