// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Numerical and Simulation Parameters*
//!
//! Iteration caps and tolerances for the special-function series, continued
//! fractions and quantile solvers, plus the defaults used by Monte-Carlo runs.

/// Maximum Newton-Raphson steps taken by the quantile solver.
pub const NEWTON_MAX_ITER: usize = 50;

/// Newton-Raphson stops once `|CDF(x) - p|` drops below this.
pub const NEWTON_TOLERANCE: f64 = 1e-10;

/// Maximum bisection or bracket-expansion steps taken by the quantile solver,
/// counted separately from Newton steps.
pub const BISECTION_MAX_ITER: usize = 200;

/// Maximum number of terms summed by the incomplete Gamma series.
pub const GAMMA_SERIES_MAX_ITER: usize = 1000;

/// Incomplete Gamma series stops once a term falls below this (relative to the sum).
pub const GAMMA_SERIES_EPS: f64 = 1e-15;

/// Maximum Lentz iterations for the upper incomplete Gamma continued fraction.
pub const GAMMA_CF_MAX_ITER: usize = 1000;

/// Maximum Lentz iterations for the incomplete Beta continued fraction.
pub const BETA_CF_MAX_ITER: usize = 200;

/// Incomplete Beta continued fraction convergence tolerance.
pub const BETA_CF_EPS: f64 = 1e-14;

/// Floor applied to near-zero Lentz numerators and denominators.
pub const CF_FPMIN: f64 = 1e-30;

/// Number of trials in a default simulation run.
pub const DEFAULT_SIMULATION_TRIALS: usize = 1000;

/// Number of trials executed between cooperative yield points.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Upper bound on memoised Gamma values. The cache stops inserting once full.
pub const GAMMA_CACHE_CAPACITY: usize = 1000;

/// Decimal places used when keying the Gamma cache.
pub const GAMMA_CACHE_KEY_DECIMALS: i32 = 6;

/// Default significance level for hypothesis tests.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// A simulated effect smaller than this counts as "H0 true" when reporting power.
pub const POWER_EFFECT_EPS: f64 = 0.001;

/// Upper limit on the support scanned by discrete quantile searches.
pub const DISCRETE_QUANTILE_MAX_STEPS: u64 = 10_000_000;
