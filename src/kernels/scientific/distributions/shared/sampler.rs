// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Sampling Module** - *Pseudorandom Variates for Simulation*
//!
//! Random-variate generators for every supported family. Each method assumes
//! parameters that already passed validation; use
//! [`DistributionParameters::sample`](crate::kernels::scientific::distributions::parameters::DistributionParameters::sample)
//! for a checked entry point.
//!
//! | Family          | Method                                   |
//! |-----------------|------------------------------------------|
//! | Normal          | Box–Muller, one draw per pair of uniforms |
//! | Uniform, Exponential, Geometric | inverse CDF               |
//! | Binomial        | sum of Bernoulli trials                  |
//! | Poisson         | Knuth multiplication against e^(−λ)      |
//! | Gamma           | Marsaglia–Tsang                          |
//! | χ², t, F, Beta  | transformations of Gamma / Normal draws  |
//! | Hypergeometric  | sequential urn draws without replacement |

use minarrow::Vec64;
use rand::rngs::{StdRng, ThreadRng};
use rand::{rng, Rng, SeedableRng};
use std::f64::consts::PI;

/// Largest rate drawn with a single Knuth product; `e^(−500)` is still a normal float.
const POISSON_CHUNK: f64 = 500.0;

/// Statistical distribution sampler owning its PRNG.
///
/// Fresh randomness on every call; draws are not restartable except by
/// re-seeding through [`Sampler::seeded`].
#[derive(Debug, Clone)]
pub struct Sampler<R: Rng = ThreadRng> {
    rng: R,
}

impl Sampler<ThreadRng> {
    /// Creates a new sampler backed by the thread-local generator.
    #[inline]
    pub fn new() -> Self {
        Sampler { rng: rng() }
    }
}

impl Default for Sampler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler<StdRng> {
    /// Deterministic sampler for reproducible simulations and tests.
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        Sampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Sampler<R> {
    /// Wraps an existing generator.
    #[inline]
    pub fn from_rng(rng: R) -> Self {
        Sampler { rng }
    }

    /// U(0, 1) draw in [0, 1).
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// N(0, 1) draw.
    #[inline]
    pub fn standard_normal(&mut self) -> f64 {
        sample_standard_normal(&mut self.rng)
    }

    /// N(mean, std²). Preconditions: std > 0.
    #[inline]
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        mean + std * self.standard_normal()
    }

    /// U(a, b) by inverse CDF. Preconditions: a < b.
    #[inline]
    pub fn uniform(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.unit()
    }

    /// Exp(λ) by inverse CDF. Preconditions: λ > 0.
    #[inline]
    pub fn exponential(&mut self, lambda: f64) -> f64 {
        // 1 − U lies in (0, 1]
        -(1.0 - self.unit()).ln() / lambda
    }

    /// Gamma(shape, scale). Preconditions: shape > 0, scale > 0.
    #[inline]
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        sample_gamma(&mut self.rng, shape, scale)
    }

    /// Chi-square(df) == Gamma(df/2, 2). Preconditions: df > 0.
    #[inline]
    pub fn chi2(&mut self, df: f64) -> f64 {
        self.gamma(df * 0.5, 2.0)
    }

    /// Beta(α, β) as X/(X+Y) with X ~ Γ(α), Y ~ Γ(β).
    #[inline]
    pub fn beta(&mut self, alpha: f64, beta: f64) -> f64 {
        let x = self.gamma(alpha, 1.0);
        let y = self.gamma(beta, 1.0);
        x / (x + y)
    }

    /// Student t(df) as Z / √(V/df).
    #[inline]
    pub fn student_t(&mut self, df: f64) -> f64 {
        let z = self.standard_normal();
        let v = self.chi2(df);
        z / (v / df).sqrt()
    }

    /// F(df1, df2) as a ratio of scaled chi-squares.
    #[inline]
    pub fn fisher_f(&mut self, df1: f64, df2: f64) -> f64 {
        let num = self.chi2(df1) / df1;
        let den = self.chi2(df2) / df2;
        num / den
    }

    /// Binomial(n, p) as a count of Bernoulli successes. O(n) per draw.
    #[inline]
    pub fn binomial(&mut self, n: u64, p: f64) -> f64 {
        let mut successes = 0u64;
        for _ in 0..n {
            if self.unit() < p {
                successes += 1;
            }
        }
        successes as f64
    }

    /// Poisson(λ) by Knuth's method. Cost grows linearly in λ.
    ///
    /// `e^(−λ)` underflows past λ ≈ 745, so larger rates are split into
    /// chunks of at most `POISSON_CHUNK` whose independent counts are summed.
    #[inline]
    pub fn poisson(&mut self, lambda: f64) -> f64 {
        if !lambda.is_finite() {
            return f64::NAN;
        }
        let mut remaining = lambda;
        let mut total = 0.0;
        while remaining > POISSON_CHUNK {
            total += self.knuth_poisson(POISSON_CHUNK);
            remaining -= POISSON_CHUNK;
        }
        total + self.knuth_poisson(remaining)
    }

    #[inline]
    fn knuth_poisson(&mut self, lambda: f64) -> f64 {
        let limit = (-lambda).exp();
        let mut k = 0u64;
        let mut prod = 1.0;
        loop {
            k += 1;
            prod *= self.unit();
            if prod <= limit {
                break;
            }
        }
        (k - 1) as f64
    }

    /// Geometric(p), number of trials up to and including the first success.
    #[inline]
    pub fn geometric(&mut self, p: f64) -> f64 {
        if p >= 1.0 {
            return 1.0;
        }
        let u = 1.0 - self.unit();
        (u.ln() / (1.0 - p).ln()).floor() + 1.0
    }

    /// Hypergeometric: successes among `draws` taken without replacement from
    /// `population` items of which `successes` are marked.
    #[inline]
    pub fn hypergeometric(&mut self, population: u64, successes: u64, draws: u64) -> f64 {
        let mut remaining = population;
        let mut marked = successes;
        let mut hits = 0u64;
        for _ in 0..draws {
            if remaining == 0 {
                break;
            }
            if self.unit() * (remaining as f64) < marked as f64 {
                hits += 1;
                marked -= 1;
            }
            remaining -= 1;
        }
        hits as f64
    }

    /// `count` draws from `draw`.
    #[inline]
    pub fn repeat<F>(&mut self, count: usize, mut draw: F) -> Vec64<f64>
    where
        F: FnMut(&mut Self) -> f64,
    {
        let mut out = Vec64::with_capacity(count);
        for _ in 0..count {
            out.push(draw(self));
        }
        out
    }
}

// Box–Muller to get one N(0,1)
/// Generates a single sample from the standard normal distribution N(0,1).
#[inline]
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // U1 ∈ (0,1], U2 ∈ [0,1)
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

/// Gamma draw by Marsaglia–Tsang. Preconditions: shape > 0, scale > 0.
#[inline]
pub fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    debug_assert!(shape.is_finite() && shape > 0.0, "shape must be finite and > 0");
    debug_assert!(scale.is_finite() && scale > 0.0, "scale must be finite and > 0");

    // 0 < shape < 1: draw at shape+1 and apply the power-law correction.
    if shape < 1.0 {
        let u: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
        return sample_gamma(rng, shape + 1.0, scale) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let x = sample_standard_normal(rng);
        let one_plus_cx = 1.0 + c * x;
        if one_plus_cx <= 0.0 {
            continue;
        }
        let v = one_plus_cx * one_plus_cx * one_plus_cx;
        let u: f64 = rng.random::<f64>();

        // squeeze
        if u < 1.0 - 0.0331 * (x * x) * (x * x) {
            return d * v * scale;
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return d * v * scale;
        }
    }
}
