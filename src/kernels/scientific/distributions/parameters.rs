// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Distribution Parameters** - *Tagged Family Dispatch*
//!
//! [`DistributionParameters`] names one family together with its parameters
//! and routes `pdf`, `cdf`, `quantile` and `sample` to the family kernels.
//!
//! ## Domains
//! | Family          | Parameters                    | Valid when                          |
//! |-----------------|-------------------------------|-------------------------------------|
//! | Normal          | mean, std                     | finite, std > 0                     |
//! | Uniform         | a, b                          | finite, a < b                       |
//! | Exponential     | λ (rate)                      | finite, λ > 0                       |
//! | Gamma           | shape α, scale β              | finite, both > 0                    |
//! | Beta            | α, β                          | finite, both > 0                    |
//! | ChiSquare       | df                            | finite, df > 0                      |
//! | StudentT        | df                            | finite, df > 0                      |
//! | FisherF         | df1, df2                      | finite, both > 0                    |
//! | Binomial        | n, p                          | 0 < p < 1                           |
//! | Poisson         | λ                             | finite, λ > 0                       |
//! | Geometric       | p                             | 0 < p < 1                           |
//! | Hypergeometric  | population N, successes K, draws n | K ≤ N, n ≤ N                   |
//!
//! The evaluators themselves never fail: invalid parameters give NaN. Call
//! [`DistributionParameters::validate`] first when an error is wanted instead.

use minarrow::{Bitmask, FloatArray, Vec64};
use rand::Rng;

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::sampler::Sampler;
use crate::kernels::scientific::distributions::shared::solver::QuantileEstimate;
use crate::kernels::scientific::distributions::univariate::beta::*;
use crate::kernels::scientific::distributions::univariate::binomial::*;
use crate::kernels::scientific::distributions::univariate::chi_squared::*;
use crate::kernels::scientific::distributions::univariate::common::univariate_kernel_f64;
use crate::kernels::scientific::distributions::univariate::exponential::*;
use crate::kernels::scientific::distributions::univariate::fisher_f::*;
use crate::kernels::scientific::distributions::univariate::gamma::*;
use crate::kernels::scientific::distributions::univariate::geometric::*;
use crate::kernels::scientific::distributions::univariate::hypergeometric::*;
use crate::kernels::scientific::distributions::univariate::normal::*;
use crate::kernels::scientific::distributions::univariate::poisson::*;
use crate::kernels::scientific::distributions::univariate::student_t::*;
use crate::kernels::scientific::distributions::univariate::uniform::*;

/// One distribution family with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionParameters {
    Normal { mean: f64, std: f64 },
    Uniform { a: f64, b: f64 },
    Exponential { lambda: f64 },
    /// Shape and **scale** (mean = shape · scale).
    Gamma { shape: f64, scale: f64 },
    Beta { alpha: f64, beta: f64 },
    ChiSquare { df: f64 },
    StudentT { df: f64 },
    FisherF { df1: f64, df2: f64 },
    Binomial { n: u64, p: f64 },
    Poisson { lambda: f64 },
    /// Number of trials up to and including the first success.
    Geometric { p: f64 },
    Hypergeometric { population: u64, successes: u64, draws: u64 },
}

use DistributionParameters::*;

#[inline(always)]
fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[inline(always)]
fn open_unit(p: f64) -> bool {
    p.is_finite() && p > 0.0 && p < 1.0
}

impl DistributionParameters {
    /// Standard normal, N(0, 1).
    pub const STANDARD_NORMAL: Self = Normal { mean: 0.0, std: 1.0 };

    /// Family name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Normal { .. } => "normal",
            Uniform { .. } => "uniform",
            Exponential { .. } => "exponential",
            Gamma { .. } => "gamma",
            Beta { .. } => "beta",
            ChiSquare { .. } => "chi_square",
            StudentT { .. } => "student_t",
            FisherF { .. } => "fisher_f",
            Binomial { .. } => "binomial",
            Poisson { .. } => "poisson",
            Geometric { .. } => "geometric",
            Hypergeometric { .. } => "hypergeometric",
        }
    }

    /// True for the count-valued families.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Binomial { .. } | Poisson { .. } | Geometric { .. } | Hypergeometric { .. }
        )
    }

    /// Checks the family domain.
    ///
    /// # Errors
    /// `KernelError::InvalidArguments` naming the family and the offending values.
    pub fn validate(&self) -> Result<(), KernelError> {
        let ok = match *self {
            Normal { mean, std } => mean.is_finite() && positive(std),
            Uniform { a, b } => a.is_finite() && b.is_finite() && a < b,
            Exponential { lambda } | Poisson { lambda } => positive(lambda),
            Gamma { shape, scale } => positive(shape) && positive(scale),
            Beta { alpha, beta } => positive(alpha) && positive(beta),
            ChiSquare { df } | StudentT { df } => positive(df),
            FisherF { df1, df2 } => positive(df1) && positive(df2),
            Binomial { p, .. } | Geometric { p } => open_unit(p),
            Hypergeometric {
                population,
                successes,
                draws,
            } => successes <= population && draws <= population,
        };
        if ok {
            Ok(())
        } else {
            Err(KernelError::InvalidArguments(format!(
                "{}: parameters outside the family domain: {:?}",
                self.name(),
                self
            )))
        }
    }

    /// Closed support `(lower, upper)`; either end may be infinite.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Normal { .. } | StudentT { .. } => (f64::NEG_INFINITY, f64::INFINITY),
            Uniform { a, b } => (a, b),
            Exponential { .. } | Gamma { .. } | ChiSquare { .. } | FisherF { .. } => {
                (0.0, f64::INFINITY)
            }
            Beta { .. } => (0.0, 1.0),
            Binomial { n, .. } => (0.0, n as f64),
            Poisson { .. } => (0.0, f64::INFINITY),
            Geometric { .. } => (1.0, f64::INFINITY),
            Hypergeometric {
                population,
                successes,
                draws,
            } => {
                let (lo, hi) = hypergeometric_support(population, successes, draws);
                (lo as f64, hi as f64)
            }
        }
    }

    /// Density (continuous) or mass (discrete) at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        match *self {
            Normal { mean, std } => normal_pdf_scalar(x, mean, std),
            Uniform { a, b } => uniform_pdf_scalar(x, a, b),
            Exponential { lambda } => exponential_pdf_scalar(x, lambda),
            Gamma { shape, scale } => gamma_pdf_scalar(x, shape, scale),
            Beta { alpha, beta } => beta_pdf_scalar(x, alpha, beta),
            ChiSquare { df } => chi_square_pdf_scalar(x, df),
            StudentT { df } => student_t_pdf_scalar(x, df),
            FisherF { df1, df2 } => fisher_f_pdf_scalar(x, df1, df2),
            Binomial { n, p } => binomial_pmf_scalar(x, n, p),
            Poisson { lambda } => poisson_pmf_scalar(x, lambda),
            Geometric { p } => geometric_pmf_scalar(x, p),
            Hypergeometric {
                population,
                successes,
                draws,
            } => hypergeometric_pmf_scalar(x, population, successes, draws),
        }
    }

    /// `P(X ≤ x)`, clamped to [0, 1]. NaN passes through.
    pub fn cdf(&self, x: f64) -> f64 {
        let raw = match *self {
            Normal { mean, std } => normal_cdf_scalar(x, mean, std),
            Uniform { a, b } => uniform_cdf_scalar(x, a, b),
            Exponential { lambda } => exponential_cdf_scalar(x, lambda),
            Gamma { shape, scale } => gamma_cdf_scalar(x, shape, scale),
            Beta { alpha, beta } => beta_cdf_scalar(x, alpha, beta),
            ChiSquare { df } => chi_square_cdf_scalar(x, df),
            StudentT { df } => student_t_cdf_scalar(x, df),
            FisherF { df1, df2 } => fisher_f_cdf_scalar(x, df1, df2),
            Binomial { n, p } => binomial_cdf_scalar(x, n, p),
            Poisson { lambda } => poisson_cdf_scalar(x, lambda),
            Geometric { p } => geometric_cdf_scalar(x, p),
            Hypergeometric {
                population,
                successes,
                draws,
            } => hypergeometric_cdf_scalar(x, population, successes, draws),
        };
        raw.clamp(0.0, 1.0)
    }

    /// `P(X > x)`.
    #[inline]
    pub fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Inverse CDF. p ≤ 0 gives the lower end of the support, p ≥ 1 the upper.
    pub fn quantile(&self, p: f64) -> f64 {
        match *self {
            Normal { mean, std } => normal_quantile_scalar(p, mean, std),
            Uniform { a, b } => uniform_quantile_scalar(p, a, b),
            Exponential { lambda } => exponential_quantile_scalar(p, lambda),
            Gamma { shape, scale } => gamma_quantile_scalar(p, shape, scale),
            Beta { alpha, beta } => beta_quantile_scalar(p, alpha, beta),
            ChiSquare { df } => chi_square_quantile_scalar(p, df),
            StudentT { df } => student_t_quantile_scalar(p, df),
            FisherF { df1, df2 } => fisher_f_quantile_scalar(p, df1, df2),
            Binomial { n, p: prob } => binomial_quantile_scalar(p, n, prob),
            Poisson { lambda } => poisson_quantile_scalar(p, lambda),
            Geometric { p: prob } => geometric_quantile_scalar(p, prob),
            Hypergeometric {
                population,
                successes,
                draws,
            } => hypergeometric_quantile_scalar(p, population, successes, draws),
        }
    }

    /// Inverse CDF with solver diagnostics.
    ///
    /// Families solved by Newton-Raphson report their iteration count and
    /// terminal status; closed forms and discrete searches report an exact
    /// estimate.
    pub fn quantile_estimate(&self, p: f64) -> QuantileEstimate {
        match *self {
            Gamma { shape, scale } => gamma_quantile_estimate(p, shape, scale),
            Beta { alpha, beta } => beta_quantile_estimate(p, alpha, beta),
            ChiSquare { df } => chi_square_quantile_estimate(p, df),
            StudentT { df } => student_t_quantile_estimate(p, df),
            FisherF { df1, df2 } => fisher_f_quantile_estimate(p, df1, df2),
            _ => QuantileEstimate::exact(self.quantile(p)),
        }
    }

    /// Expected value. NaN where it does not exist.
    pub fn mean(&self) -> f64 {
        match *self {
            Normal { mean, .. } => mean,
            Uniform { a, b } => 0.5 * (a + b),
            Exponential { lambda } => 1.0 / lambda,
            Gamma { shape, scale } => shape * scale,
            Beta { alpha, beta } => alpha / (alpha + beta),
            ChiSquare { df } => df,
            StudentT { df } => {
                if df > 1.0 {
                    0.0
                } else {
                    f64::NAN
                }
            }
            FisherF { df2, .. } => {
                if df2 > 2.0 {
                    df2 / (df2 - 2.0)
                } else {
                    f64::NAN
                }
            }
            Binomial { n, p } => n as f64 * p,
            Poisson { lambda } => lambda,
            Geometric { p } => 1.0 / p,
            Hypergeometric {
                population,
                successes,
                draws,
            } => {
                if population == 0 {
                    0.0
                } else {
                    draws as f64 * successes as f64 / population as f64
                }
            }
        }
    }

    /// Variance. NaN where undefined, +∞ where it diverges.
    pub fn variance(&self) -> f64 {
        match *self {
            Normal { std, .. } => std * std,
            Uniform { a, b } => (b - a) * (b - a) / 12.0,
            Exponential { lambda } => 1.0 / (lambda * lambda),
            Gamma { shape, scale } => shape * scale * scale,
            Beta { alpha, beta } => {
                let s = alpha + beta;
                alpha * beta / (s * s * (s + 1.0))
            }
            ChiSquare { df } => 2.0 * df,
            StudentT { df } => {
                if df > 2.0 {
                    df / (df - 2.0)
                } else if df > 1.0 {
                    f64::INFINITY
                } else {
                    f64::NAN
                }
            }
            FisherF { df1, df2 } => {
                if df2 > 4.0 {
                    2.0 * df2 * df2 * (df1 + df2 - 2.0)
                        / (df1 * (df2 - 2.0) * (df2 - 2.0) * (df2 - 4.0))
                } else if df2 > 2.0 {
                    f64::INFINITY
                } else {
                    f64::NAN
                }
            }
            Binomial { n, p } => n as f64 * p * (1.0 - p),
            Poisson { lambda } => lambda,
            Geometric { p } => (1.0 - p) / (p * p),
            Hypergeometric {
                population,
                successes,
                draws,
            } => {
                if population < 2 {
                    return 0.0;
                }
                let (nn, kk, n) = (population as f64, successes as f64, draws as f64);
                n * (kk / nn) * ((nn - kk) / nn) * ((nn - n) / (nn - 1.0))
            }
        }
    }

    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Third standardised moment. NaN where undefined.
    pub fn skewness(&self) -> f64 {
        match *self {
            Normal { .. } | Uniform { .. } => 0.0,
            Exponential { .. } => 2.0,
            Gamma { shape, .. } => 2.0 / shape.sqrt(),
            Beta { alpha, beta } => {
                2.0 * (beta - alpha) * (alpha + beta + 1.0).sqrt()
                    / ((alpha + beta + 2.0) * (alpha * beta).sqrt())
            }
            ChiSquare { df } => (8.0 / df).sqrt(),
            StudentT { df } => {
                if df > 3.0 {
                    0.0
                } else {
                    f64::NAN
                }
            }
            FisherF { df1, df2 } => {
                if df2 > 6.0 {
                    (2.0 * df1 + df2 - 2.0) * (8.0 * (df2 - 4.0)).sqrt()
                        / ((df2 - 6.0) * (df1 * (df1 + df2 - 2.0)).sqrt())
                } else {
                    f64::NAN
                }
            }
            Binomial { n, p } => (1.0 - 2.0 * p) / (n as f64 * p * (1.0 - p)).sqrt(),
            Poisson { lambda } => 1.0 / lambda.sqrt(),
            Geometric { p } => (2.0 - p) / (1.0 - p).sqrt(),
            Hypergeometric {
                population,
                successes,
                draws,
            } => {
                if population < 3 {
                    return f64::NAN;
                }
                let (nn, kk, n) = (population as f64, successes as f64, draws as f64);
                (nn - 2.0 * kk) * (nn - 1.0).sqrt() * (nn - 2.0 * n)
                    / ((n * kk * (nn - kk) * (nn - n)).sqrt() * (nn - 2.0))
            }
        }
    }

    /// Density or mass over `x`, with Arrow-compatible null handling.
    ///
    /// # Errors
    /// `KernelError::InvalidArguments` if the parameters fail [`validate`](Self::validate).
    pub fn pdf_array(
        &self,
        x: &[f64],
        null_mask: Option<&Bitmask>,
        null_count: Option<usize>,
    ) -> Result<FloatArray<f64>, KernelError> {
        self.validate()?;
        univariate_kernel_f64(x, null_mask, null_count, |xi| self.pdf(xi))
    }

    /// Clamped CDF over `x`.
    pub fn cdf_array(
        &self,
        x: &[f64],
        null_mask: Option<&Bitmask>,
        null_count: Option<usize>,
    ) -> Result<FloatArray<f64>, KernelError> {
        self.validate()?;
        univariate_kernel_f64(x, null_mask, null_count, |xi| self.cdf(xi))
    }

    /// Quantiles over probabilities `p`.
    pub fn quantile_array(
        &self,
        p: &[f64],
        null_mask: Option<&Bitmask>,
        null_count: Option<usize>,
    ) -> Result<FloatArray<f64>, KernelError> {
        self.validate()?;
        univariate_kernel_f64(p, null_mask, null_count, |pi| self.quantile(pi))
    }

    /// `count` independent draws.
    ///
    /// # Errors
    /// `KernelError::InvalidArguments` if the parameters fail [`validate`](Self::validate).
    pub fn sample<R: Rng>(
        &self,
        count: usize,
        sampler: &mut Sampler<R>,
    ) -> Result<Vec64<f64>, KernelError> {
        self.validate()?;
        let params = *self;
        Ok(sampler.repeat(count, |s| s.draw(&params)))
    }
}

impl<R: Rng> Sampler<R> {
    /// One draw from `params`. Parameters must already be valid.
    #[inline]
    pub fn draw(&mut self, params: &DistributionParameters) -> f64 {
        match *params {
            Normal { mean, std } => self.normal(mean, std),
            Uniform { a, b } => self.uniform(a, b),
            Exponential { lambda } => self.exponential(lambda),
            Gamma { shape, scale } => self.gamma(shape, scale),
            Beta { alpha, beta } => self.beta(alpha, beta),
            ChiSquare { df } => self.chi2(df),
            StudentT { df } => self.student_t(df),
            FisherF { df1, df2 } => self.fisher_f(df1, df2),
            Binomial { n, p } => self.binomial(n, p),
            Poisson { lambda } => self.poisson(lambda),
            Geometric { p } => self.geometric(p),
            Hypergeometric {
                population,
                successes,
                draws,
            } => self.hypergeometric(population, successes, draws),
        }
    }
}
