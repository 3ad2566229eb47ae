// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **stat-kernels**
//!
//! Special functions, probability distributions, quantile solvers and
//! Monte-Carlo simulation of classical hypothesis tests.
//!
//! - [`kernels::scientific::distributions`]: twelve families with PDF/PMF, CDF,
//!   quantile and random variates, scalar and vectorised over minarrow arrays
//! - [`kernels::scientific::erf`]: error function on the incomplete Gamma core
//! - [`kernels::scientific::inference`]: intervals, tests and simulation runs

pub mod kernels {
    pub mod scientific {
        pub mod distributions;
        pub mod erf;
        pub mod inference;
    }
}

pub mod config;

pub mod errors;

pub mod utils;
