// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Inference Module** - *Estimation, Hypothesis Tests and Simulation*
//!
//! Classical inference built on the distribution kernels.
//!
//! ## Modules
//! - **`summary`**: sample mean and dispersion
//! - **`interval`**: z and t confidence intervals for a mean
//! - **`hypothesis`**: z, t, paired, two-sample, F, chi-square variance,
//!   proportion and tea-tasting tests
//! - **`simulation`**: batched Monte-Carlo runs estimating power, type I error
//!   and sampling distributions
//!
//! All entry points validate their inputs and return `Result<_, KernelError>`.

pub mod hypothesis;
pub mod interval;
pub mod simulation;
pub mod summary;
