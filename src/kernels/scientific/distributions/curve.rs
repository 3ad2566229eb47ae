// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Curve Requests** - *Immutable Input for One Chart Pass*
//!
//! A [`CurveRequest`] carries everything a renderer needs for one draw: the
//! distribution, the x-range, the resolution and an optional highlighted test
//! statistic. [`CurveRequest::evaluate`] is pure and returns a [`Curve`] of
//! densities and cumulative probabilities; nothing is stored between passes.
//!
//! Discrete families are evaluated at every integer in `[x_min, x_max]` and
//! ignore `points`.

use minarrow::Vec64;

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::parameters::DistributionParameters;

/// Probability mass left outside the range chosen by [`CurveRequest::spanning`].
const SPAN_TAIL: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRequest {
    pub distribution: DistributionParameters,
    pub x_min: f64,
    pub x_max: f64,
    pub points: usize,
    pub highlight: Option<f64>,
}

/// A test statistic marked on the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightedStatistic {
    pub x: f64,
    pub density: f64,
    /// `P(X ≥ x)`.
    pub tail_probability: f64,
}

/// Evaluated curve, one entry per x.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub xs: Vec64<f64>,
    pub densities: Vec64<f64>,
    pub cumulative: Vec64<f64>,
    pub highlight: Option<HighlightedStatistic>,
}

impl CurveRequest {
    pub fn new(distribution: DistributionParameters, x_min: f64, x_max: f64, points: usize) -> Self {
        Self {
            distribution,
            x_min,
            x_max,
            points,
            highlight: None,
        }
    }

    /// Range covering all but 0.1% in each tail, clipped to the support.
    pub fn spanning(distribution: DistributionParameters, points: usize) -> Self {
        let (lo, hi) = distribution.support();
        let x_min = distribution.quantile(SPAN_TAIL).max(lo);
        let x_max = distribution.quantile(1.0 - SPAN_TAIL).min(hi);
        Self::new(distribution, x_min, x_max, points)
    }

    /// Same request with `x` highlighted.
    pub fn with_highlight(self, x: f64) -> Self {
        Self {
            highlight: Some(x),
            ..self
        }
    }

    fn abscissae(&self) -> Vec64<f64> {
        if self.distribution.is_discrete() {
            let first = self.x_min.ceil() as i64;
            let last = self.x_max.floor() as i64;
            return (first..=last).map(|k| k as f64).collect();
        }
        let step = (self.x_max - self.x_min) / (self.points - 1) as f64;
        (0..self.points)
            .map(|i| self.x_min + step * i as f64)
            .collect()
    }

    /// Evaluates densities and CDF over the range.
    ///
    /// # Errors
    /// - `InvalidArguments` for an invalid distribution, a non-finite or empty
    ///   range, or fewer than two points on a continuous family
    pub fn evaluate(&self) -> Result<Curve, KernelError> {
        self.distribution.validate()?;
        if !(self.x_min.is_finite() && self.x_max.is_finite() && self.x_min < self.x_max) {
            return Err(KernelError::InvalidArguments(format!(
                "curve: need finite x_min < x_max, got [{}, {}]",
                self.x_min, self.x_max
            )));
        }
        if !self.distribution.is_discrete() && self.points < 2 {
            return Err(KernelError::InvalidArguments(format!(
                "curve: need at least 2 points, got {}",
                self.points
            )));
        }

        let d = &self.distribution;
        let xs = self.abscissae();
        let densities: Vec64<f64> = xs.iter().map(|&x| d.pdf(x)).collect();
        let cumulative: Vec64<f64> = xs.iter().map(|&x| d.cdf(x)).collect();
        let highlight = self.highlight.map(|x| HighlightedStatistic {
            x,
            density: d.pdf(x),
            tail_probability: upper_tail(d, x),
        });
        Ok(Curve {
            xs,
            densities,
            cumulative,
            highlight,
        })
    }
}

/// `P(X ≥ x)`; for counts this includes the mass at x itself.
fn upper_tail(d: &DistributionParameters, x: f64) -> f64 {
    if d.is_discrete() {
        1.0 - d.cdf(x.ceil() - 1.0)
    } else {
        1.0 - d.cdf(x)
    }
}
