// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Evaluation Requests** - *One Query Against One Distribution*
//!
//! An [`EvaluationRequest`] pairs a [`DistributionParameters`] value with a
//! [`Query`]. It is built per interaction and consumed synchronously by
//! [`EvaluationRequest::evaluate`], which validates the parameters before
//! dispatching, so callers get a `KernelError` rather than a NaN sentinel.

use minarrow::Vec64;
use rand::Rng;

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::parameters::DistributionParameters;
use crate::kernels::scientific::distributions::shared::sampler::Sampler;

/// What to compute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query {
    /// Density or mass at x.
    Pdf(f64),
    /// `P(X ≤ x)`, clamped to [0, 1].
    Cdf(f64),
    /// Inverse CDF at p.
    Quantile(f64),
    /// `count` fresh random draws.
    Sample(usize),
}

/// Result of an [`EvaluationRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Value(f64),
    Samples(Vec64<f64>),
}

impl Evaluation {
    /// The scalar result, if this is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Evaluation::Value(v) => Some(*v),
            Evaluation::Samples(_) => None,
        }
    }

    /// The draws, if this is a sample.
    pub fn samples(&self) -> Option<&[f64]> {
        match self {
            Evaluation::Value(_) => None,
            Evaluation::Samples(s) => Some(s.as_slice()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationRequest {
    pub distribution: DistributionParameters,
    pub query: Query,
}

impl EvaluationRequest {
    pub fn new(distribution: DistributionParameters, query: Query) -> Self {
        Self {
            distribution,
            query,
        }
    }

    /// Evaluates with a thread-local RNG for `Sample` queries.
    pub fn evaluate(&self) -> Result<Evaluation, KernelError> {
        self.evaluate_with(&mut Sampler::new())
    }

    /// Evaluates, drawing any samples from `sampler`.
    ///
    /// # Errors
    /// - `InvalidArguments` for parameters outside the family domain
    /// - `OutOfBounds` for a NaN probability in a `Quantile` query
    pub fn evaluate_with<R: Rng>(
        &self,
        sampler: &mut Sampler<R>,
    ) -> Result<Evaluation, KernelError> {
        self.distribution.validate()?;
        let d = &self.distribution;
        match self.query {
            Query::Pdf(x) => Ok(Evaluation::Value(d.pdf(x))),
            Query::Cdf(x) => Ok(Evaluation::Value(d.cdf(x))),
            Query::Quantile(p) => {
                if p.is_nan() {
                    return Err(KernelError::OutOfBounds(format!(
                        "{}: quantile probability is NaN",
                        d.name()
                    )));
                }
                Ok(Evaluation::Value(d.quantile(p)))
            }
            Query::Sample(count) => Ok(Evaluation::Samples(d.sample(count, sampler)?)),
        }
    }
}
