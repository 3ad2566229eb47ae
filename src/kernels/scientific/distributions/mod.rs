// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Densities, CDFs, Quantiles and Variates*
//!
//! Distribution kernels for the twelve families used by the inference layer,
//! built on one shared special-function core.
//!
//! ## Distribution Categories
//! - **Continuous**: normal, uniform, exponential, gamma, beta, chi-squared, Student t, F
//! - **Discrete**: binomial, poisson, geometric, hypergeometric
//!
//! ## Core Statistical Functions
//! Each family provides:
//! - **Scalar evaluators** `*_pdf_scalar` / `*_pmf_scalar`, `*_cdf_scalar`,
//!   `*_quantile_scalar`, which follow a NaN sentinel policy for invalid
//!   parameters and return 0 density outside the support.
//! - **Vectorised kernels** over `&[f64]` (or `&[u64]` counts) returning a
//!   minarrow `FloatArray<f64>`, validating parameters up front.
//!
//! [`parameters::DistributionParameters`] is the tagged entry point that
//! dispatches to the family functions, and [`request::EvaluationRequest`] and
//! [`curve::CurveRequest`] wrap it for single queries and chart passes.
//!
//! ## Arrow Integration and Null Handling
//! - **Null-aware processing**: null lanes are emitted as NaN with a cleared validity bit
//! - **Dense fast path**: taken whenever `null_count` says there are no nulls
//!
//! ### Null Value Philosophy
//! Rather than assume, we choose to recognise inf and NaN as valid float values
//! (consistent with Apache Arrow semantics), leaving it to the user to subsequently
//! treat them as nulls if they wish, given that there are numerical scenarios where
//! they represent information gain.
//!
//! ## Numerical Precision and Stability
//! CDFs use the regularised incomplete Gamma and Beta functions throughout.
//! See `./tests` for the tolerances measured against SciPy reference values.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and teaching use. We make no guarantees as to correctness
//! or fitness for any particular purpose.

/// # **Shared Distribution Utilities** - *Common Infrastructure for Distribution Computing*
///
/// ## Modules
/// - **`constants`**: Lanczos and rational-approximation coefficients
/// - **`scalar`**: Gamma, Beta, incomplete functions and combinatorics
/// - **`solver`**: Newton-Raphson quantile inversion
/// - **`sampler`**: Random-variate generation
/// - **`cache`**: Memoised Gamma values for repeated simulation work
pub mod shared {
    pub mod cache;
    pub mod constants;
    pub mod sampler;
    pub mod scalar;
    pub mod solver;
}

/// # **Univariate Distributions** - *Single-Variable Probability Distributions*
///
/// ## Distribution Categories
/// - **Continuous**: beta, chi-squared, exponential, F, gamma, normal, student_t, uniform
/// - **Discrete**: binomial, geometric, hypergeometric, poisson
/// - **Common utilities**: kernel drivers and the discrete quantile search
pub mod univariate {
    // common kernel patterns
    pub mod common;

    // distributions
    pub mod beta;
    pub mod binomial;
    pub mod chi_squared;
    /// Exponential distribution kernels - continuous distribution for inter-arrival times.
    pub mod exponential;
    pub mod fisher_f;
    pub mod gamma;
    pub mod geometric;
    pub mod hypergeometric;
    pub mod normal;
    pub mod poisson;
    pub mod student_t;
    pub mod uniform;
}

pub mod curve;
pub mod parameters;
pub mod request;
