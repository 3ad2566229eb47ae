// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Quantile Solver Module** - *Safeguarded Newton-Raphson Inversion of a CDF*
//!
//! Finds `x` with `CDF(x) = p` starting from a family-specific initial guess.
//!
//! ```text
//! INIT ──► ITERATE ──► Converged       |CDF(x) − p| < NEWTON_TOLERANCE, or the
//!             │   │                    bracket has closed to adjacent floats
//!             │   └──► Diverged        CDF(x) is NaN
//!             └──────► MaxIterations   step caps reached
//! ```
//!
//! Every evaluation tightens a bracket `[lo, hi]` around the root from the sign
//! of `CDF(x) − p`. A Newton step is taken only when it lands strictly inside
//! the bracket; otherwise the solver bisects, or doubles outwards while one
//! side of the bracket is still open.
//!
//! The search runs in a coordinate where the support is the whole real line:
//! `ln(x − a)` on `(a, ∞)` and the logit on `(a, b)`. Quantiles far into a
//! tail, such as `1e-26` for χ²(0.1), are then a few steps away rather than
//! dozens of halvings.

use log::debug;

use crate::config::{BISECTION_MAX_ITER, NEWTON_MAX_ITER, NEWTON_TOLERANCE};

/// Terminal state of a quantile search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// `|CDF(x) − p|` fell below tolerance, or no float lies strictly
    /// between the two sides of the bracket.
    Converged,
    /// The step caps were reached; the value is the last iterate.
    MaxIterations,
    /// The CDF returned NaN; the value is the last iterate.
    Diverged,
}

/// A quantile together with how the solver arrived at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileEstimate {
    pub value: f64,
    pub iterations: usize,
    pub status: SolverStatus,
}

impl QuantileEstimate {
    /// An estimate that needed no iteration (closed form or boundary probability).
    #[inline]
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            iterations: 0,
            status: SolverStatus::Converged,
        }
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

/// Support of the variable being solved for. Either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    pub lower: f64,
    pub upper: f64,
}

impl Support {
    pub const REAL_LINE: Support = Support {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };
    pub const POSITIVE: Support = Support {
        lower: 0.0,
        upper: f64::INFINITY,
    };
    pub const UNIT: Support = Support {
        lower: 0.0,
        upper: 1.0,
    };
}

/// Unconstrained search coordinate `u` for a support.
#[derive(Debug, Clone, Copy)]
enum Coordinate {
    Linear,
    /// `u = ln(x − lower)`
    Log { lower: f64 },
    /// `u = −ln(upper − x)`
    NegLog { upper: f64 },
    /// `u = logit((x − lower) / (upper − lower))`
    Logit { lower: f64, upper: f64 },
}

impl Coordinate {
    fn for_support(support: Support) -> Self {
        match (support.lower.is_finite(), support.upper.is_finite()) {
            (false, false) => Coordinate::Linear,
            (true, false) => Coordinate::Log {
                lower: support.lower,
            },
            (false, true) => Coordinate::NegLog {
                upper: support.upper,
            },
            (true, true) => Coordinate::Logit {
                lower: support.lower,
                upper: support.upper,
            },
        }
    }

    fn to_u(self, x: f64) -> f64 {
        match self {
            Coordinate::Linear => x,
            Coordinate::Log { lower } => (x - lower).ln(),
            Coordinate::NegLog { upper } => -(upper - x).ln(),
            Coordinate::Logit { lower, upper } => ((x - lower) / (upper - x)).ln(),
        }
    }

    fn to_x(self, u: f64) -> f64 {
        match self {
            Coordinate::Linear => u,
            Coordinate::Log { lower } => lower + u.exp(),
            Coordinate::NegLog { upper } => upper - (-u).exp(),
            // each tail is measured from its own end so both keep full precision
            Coordinate::Logit { lower, upper } => {
                let e = (-u.abs()).exp();
                let offset = (upper - lower) * e / (1.0 + e);
                if u >= 0.0 { upper - offset } else { lower + offset }
            }
        }
    }

    fn dx_du(self, u: f64) -> f64 {
        match self {
            Coordinate::Linear => 1.0,
            Coordinate::Log { .. } => u.exp(),
            Coordinate::NegLog { .. } => (-u).exp(),
            Coordinate::Logit { lower, upper } => {
                let e = (-u.abs()).exp();
                (upper - lower) * e / ((1.0 + e) * (1.0 + e))
            }
        }
    }
}

/// One side of the bracket: a point with its signed CDF error.
#[derive(Debug, Clone, Copy)]
struct Side {
    u: f64,
    x: f64,
    err: f64,
}

impl Side {
    const OPEN_BELOW: Side = Side {
        u: f64::NEG_INFINITY,
        x: f64::NAN,
        err: f64::NAN,
    };
    const OPEN_ABOVE: Side = Side {
        u: f64::INFINITY,
        x: f64::NAN,
        err: f64::NAN,
    };

    #[inline]
    fn is_set(&self) -> bool {
        self.u.is_finite()
    }
}

#[inline]
fn next_up(a: f64) -> f64 {
    if !a.is_finite() {
        a
    } else if a == 0.0 {
        f64::from_bits(1)
    } else if a > 0.0 {
        f64::from_bits(a.to_bits() + 1)
    } else {
        f64::from_bits(a.to_bits() - 1)
    }
}

/// True when no float lies strictly between `lo` and `hi`.
#[inline]
fn no_float_between(lo: f64, hi: f64) -> bool {
    lo >= hi || next_up(lo) >= hi
}

#[inline]
fn closer(lo: Side, hi: Side) -> Side {
    if lo.err.abs() <= hi.err.abs() { lo } else { hi }
}

/// Safeguarded Newton-Raphson root of `cdf(x) − p` starting at `initial`.
///
/// `p` is expected in (0, 1); boundary probabilities are resolved by the
/// callers before reaching the solver. An `initial` outside the open support
/// is replaced by the centre of the search coordinate.
pub fn newton_quantile<C, P>(p: f64, initial: f64, support: Support, cdf: C, pdf: P) -> QuantileEstimate
where
    C: Fn(f64) -> f64,
    P: Fn(f64) -> f64,
{
    let coord = Coordinate::for_support(support);
    let mut u = coord.to_u(initial);
    if !u.is_finite() {
        u = 0.0;
    }
    let mut lo = Side::OPEN_BELOW;
    let mut hi = Side::OPEN_ABOVE;
    let mut newton_steps = 0;
    let mut bisection_steps = 0;

    loop {
        let iterations = newton_steps + bisection_steps;
        let x = coord.to_x(u);
        let err = cdf(x) - p;
        if err.is_nan() {
            debug!("newton_quantile: CDF is NaN at x={} (p={}) after {} steps", x, p, iterations);
            return QuantileEstimate {
                value: x,
                iterations,
                status: SolverStatus::Diverged,
            };
        }
        if err.abs() < NEWTON_TOLERANCE {
            return QuantileEstimate {
                value: x,
                iterations,
                status: SolverStatus::Converged,
            };
        }
        if err < 0.0 {
            lo = Side { u, x, err };
        } else {
            hi = Side { u, x, err };
        }
        if lo.is_set() && hi.is_set() && no_float_between(lo.x, hi.x) {
            let best = closer(lo, hi);
            debug!(
                "newton_quantile: bracket closed at x={} (p={}, residual {})",
                best.x, p, best.err
            );
            return QuantileEstimate {
                value: best.x,
                iterations,
                status: SolverStatus::Converged,
            };
        }

        let slope = pdf(x) * coord.dx_du(u);
        let newton = u - err / slope;
        if slope > 0.0 && newton > lo.u && newton < hi.u {
            if newton_steps == NEWTON_MAX_ITER {
                break;
            }
            newton_steps += 1;
            u = newton;
            continue;
        }

        if bisection_steps == BISECTION_MAX_ITER {
            break;
        }
        let next = match (lo.is_set(), hi.is_set()) {
            (true, true) => 0.5 * (lo.u + hi.u),
            (true, false) => lo.u + 1.0 + lo.u.abs(),
            _ => hi.u - 1.0 - hi.u.abs(),
        };
        if !(next > lo.u && next < hi.u) {
            // coordinate resolution exhausted
            let best = if lo.is_set() && hi.is_set() { closer(lo, hi) } else { Side { u, x, err } };
            return QuantileEstimate {
                value: best.x,
                iterations,
                status: SolverStatus::Converged,
            };
        }
        bisection_steps += 1;
        u = next;
    }

    let x = coord.to_x(u);
    debug!(
        "newton_quantile: no convergence after {} Newton and {} bisection steps (p={}, x={})",
        newton_steps, bisection_steps, p, x
    );
    QuantileEstimate {
        value: x,
        iterations: newton_steps + bisection_steps,
        status: SolverStatus::MaxIterations,
    }
}
