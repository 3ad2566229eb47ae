// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Monte-Carlo Simulation** - *Empirical Power and Sampling Distributions*
//!
//! A [`SimulationRun`] repeatedly draws synthetic data for a [`Scenario`],
//! runs the matching hypothesis test and feeds the outcome to a
//! [`SimulationAccumulator`]. Trials execute in batches through
//! [`SimulationRun::step`], so a host can redraw or yield between batches.
//!
//! The run owns its sampler and accumulator. Restarting replaces both the
//! scenario and the accumulated state.
//!
//! ## Reported figures
//! When the simulated truth differs from H0 by at least `POWER_EFFECT_EPS`
//! the rejection rate is the power, otherwise it is the type I error rate.
//! The sampling-distribution scenario reports the empirical and theoretical
//! standard error of the mean instead.

use log::{info, trace};
use minarrow::Vec64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{DEFAULT_ALPHA, DEFAULT_BATCH_SIZE, DEFAULT_SIMULATION_TRIALS, POWER_EFFECT_EPS};
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::parameters::DistributionParameters;
use crate::kernels::scientific::distributions::shared::cache::GammaCache;
use crate::kernels::scientific::distributions::shared::sampler::Sampler;
use crate::kernels::scientific::inference::hypothesis::{
    chi_square_variance_test, f_test, paired_t_test, proportion_z_test, t_test,
    two_sample_t_test, z_test_sample, Tail, TestResult, Variance,
};
use crate::kernels::scientific::inference::summary::population_variance;

/// Running tallies of a simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationAccumulator {
    pub total_trials: usize,
    pub rejections: usize,
    pub p_values: Vec64<f64>,
    pub statistics: Vec64<f64>,
}

impl SimulationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed hypothesis test.
    pub fn record(&mut self, result: &TestResult) {
        self.total_trials += 1;
        if result.reject {
            self.rejections += 1;
        }
        self.p_values.push(result.p_value);
        self.statistics.push(result.statistic);
    }

    /// Records a trial that yields a statistic but no test.
    pub fn record_statistic(&mut self, statistic: f64) {
        self.total_trials += 1;
        self.statistics.push(statistic);
    }

    pub fn reset(&mut self) {
        self.total_trials = 0;
        self.rejections = 0;
        self.p_values.clear();
        self.statistics.clear();
    }

    /// Fraction of trials that rejected H0; 0 before any trial.
    pub fn rejection_rate(&self) -> f64 {
        if self.total_trials == 0 {
            return 0.0;
        }
        self.rejections as f64 / self.total_trials as f64
    }

    /// Summary given the simulated distance from H0. `effect` is `None` when
    /// the trials ran no test.
    pub fn summary(&self, effect: Option<f64>) -> SimulationSummary {
        let rate = self.rejection_rate();
        let mean_of = |v: &[f64]| {
            if v.is_empty() {
                f64::NAN
            } else {
                v.iter().sum::<f64>() / v.len() as f64
            }
        };
        let h0_false = effect.map(|e| e.abs() >= POWER_EFFECT_EPS);
        SimulationSummary {
            trials: self.total_trials,
            rejections: self.rejections,
            rejection_rate: rate,
            effect,
            power: h0_false.filter(|&f| f).map(|_| rate),
            type_i_error_rate: h0_false.filter(|&f| !f).map(|_| rate),
            type_ii_error_rate: h0_false.filter(|&f| f).map(|_| 1.0 - rate),
            mean_statistic: mean_of(self.statistics.as_slice()),
            mean_p_value: (!self.p_values.is_empty()).then(|| mean_of(self.p_values.as_slice())),
            empirical_se: match effect {
                None => population_variance(self.statistics.as_slice()).ok().map(f64::sqrt),
                Some(_) => None,
            },
            theoretical_se: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub trials: usize,
    pub rejections: usize,
    pub rejection_rate: f64,
    /// Simulated truth minus the null value.
    pub effect: Option<f64>,
    pub power: Option<f64>,
    pub type_i_error_rate: Option<f64>,
    pub type_ii_error_rate: Option<f64>,
    pub mean_statistic: f64,
    pub mean_p_value: Option<f64>,
    /// Population standard deviation of the simulated sample means.
    pub empirical_se: Option<f64>,
    /// `σ / √n` of the population being sampled.
    pub theoretical_se: Option<f64>,
}

/// Data-generating process and the test applied to each synthetic sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scenario {
    /// Normal data with known σ, z test against `mu0`.
    OneSampleZ {
        true_mean: f64,
        sigma: f64,
        n: usize,
        mu0: f64,
    },
    /// Normal data, t test against `mu0`.
    OneSampleT {
        true_mean: f64,
        sigma: f64,
        n: usize,
        mu0: f64,
    },
    /// Binomial successes, one-proportion z test against `p0`.
    Proportion { true_p: f64, n: u64, p0: f64 },
    /// Correlated normal pairs, paired t test on the differences.
    PairedT {
        mu1: f64,
        mu2: f64,
        sigma1: f64,
        sigma2: f64,
        rho: f64,
        n: usize,
        mu0_diff: f64,
    },
    /// Independent normal samples, two-sample t test.
    TwoSampleT {
        mu1: f64,
        mu2: f64,
        sigma1: f64,
        sigma2: f64,
        n1: usize,
        n2: usize,
        mu0_diff: f64,
        variance: Variance,
    },
    /// Zero-mean normal samples, F test of equal variances.
    FVariance {
        sigma1: f64,
        sigma2: f64,
        n1: usize,
        n2: usize,
    },
    /// Zero-mean normal data, chi-square test of `σ² = sigma0²`.
    ChiSquareVariance { true_sigma: f64, n: usize, sigma0: f64 },
    /// Sample means of size `n` drawn from `population`.
    SamplingMean {
        population: DistributionParameters,
        n: usize,
    },
}

fn invalid(msg: String) -> KernelError {
    KernelError::InvalidArguments(msg)
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::OneSampleZ { .. } => "one-sample z",
            Scenario::OneSampleT { .. } => "one-sample t",
            Scenario::Proportion { .. } => "proportion z",
            Scenario::PairedT { .. } => "paired t",
            Scenario::TwoSampleT { .. } => "two-sample t",
            Scenario::FVariance { .. } => "F variance",
            Scenario::ChiSquareVariance { .. } => "chi-square variance",
            Scenario::SamplingMean { .. } => "sampling distribution of the mean",
        }
    }

    /// Checks the scenario can generate data and run its test.
    pub fn validate(&self) -> Result<(), KernelError> {
        let name = self.name();
        match *self {
            Scenario::OneSampleZ { sigma, n, .. } => {
                if !positive(sigma) || n == 0 {
                    return Err(invalid(format!("{name}: need σ > 0 and n ≥ 1")));
                }
            }
            Scenario::OneSampleT { sigma, n, .. } => {
                if !positive(sigma) || n < 2 {
                    return Err(invalid(format!("{name}: need σ > 0 and n ≥ 2")));
                }
            }
            Scenario::Proportion { true_p, n, p0 } => {
                if !(0.0..=1.0).contains(&true_p) || !(p0 > 0.0 && p0 < 1.0) || n == 0 {
                    return Err(invalid(format!(
                        "{name}: need true p in [0, 1], p0 in (0, 1) and n ≥ 1"
                    )));
                }
            }
            Scenario::PairedT {
                sigma1, sigma2, rho, n, ..
            } => {
                if !positive(sigma1) || !positive(sigma2) || !(-1.0..=1.0).contains(&rho) || n < 2 {
                    return Err(invalid(format!(
                        "{name}: need σ1, σ2 > 0, ρ in [−1, 1] and n ≥ 2"
                    )));
                }
            }
            Scenario::TwoSampleT {
                sigma1, sigma2, n1, n2, ..
            }
            | Scenario::FVariance {
                sigma1, sigma2, n1, n2,
            } => {
                if !positive(sigma1) || !positive(sigma2) || n1 < 2 || n2 < 2 {
                    return Err(invalid(format!("{name}: need σ1, σ2 > 0 and n1, n2 ≥ 2")));
                }
            }
            Scenario::ChiSquareVariance { true_sigma, n, sigma0 } => {
                if !positive(true_sigma) || !positive(sigma0) || n < 2 {
                    return Err(invalid(format!("{name}: need σ, σ0 > 0 and n ≥ 2")));
                }
            }
            Scenario::SamplingMean { population, n } => {
                population.validate()?;
                if n == 0 {
                    return Err(invalid(format!("{name}: need n ≥ 1")));
                }
            }
        }
        Ok(())
    }

    /// Simulated truth minus the null value, `None` for the sampling scenario.
    pub fn effect(&self) -> Option<f64> {
        match *self {
            Scenario::OneSampleZ { true_mean, mu0, .. }
            | Scenario::OneSampleT { true_mean, mu0, .. } => Some(true_mean - mu0),
            Scenario::Proportion { true_p, p0, .. } => Some(true_p - p0),
            Scenario::PairedT {
                mu1, mu2, mu0_diff, ..
            }
            | Scenario::TwoSampleT {
                mu1, mu2, mu0_diff, ..
            } => Some(mu1 - mu2 - mu0_diff),
            Scenario::FVariance { sigma1, sigma2, .. } => {
                Some((sigma1 * sigma1) / (sigma2 * sigma2) - 1.0)
            }
            Scenario::ChiSquareVariance { true_sigma, sigma0, .. } => {
                Some(true_sigma * true_sigma - sigma0 * sigma0)
            }
            Scenario::SamplingMean { .. } => None,
        }
    }

    /// Distribution of the statistic under H0, or of the sample mean for the
    /// sampling scenario. `None` where it is not a fixed family (Welch df
    /// varies per trial) or the population has no finite variance.
    pub fn null_distribution(&self) -> Option<DistributionParameters> {
        use DistributionParameters::*;
        match *self {
            Scenario::OneSampleZ { .. } | Scenario::Proportion { .. } => {
                Some(DistributionParameters::STANDARD_NORMAL)
            }
            Scenario::OneSampleT { n, .. } | Scenario::PairedT { n, .. } => {
                Some(StudentT { df: (n - 1) as f64 })
            }
            Scenario::TwoSampleT {
                n1,
                n2,
                variance: Variance::Pooled,
                ..
            } => Some(StudentT {
                df: (n1 + n2 - 2) as f64,
            }),
            Scenario::TwoSampleT { .. } => None,
            Scenario::FVariance { n1, n2, .. } => Some(FisherF {
                df1: (n1 - 1) as f64,
                df2: (n2 - 1) as f64,
            }),
            Scenario::ChiSquareVariance { n, .. } => Some(ChiSquare { df: (n - 1) as f64 }),
            Scenario::SamplingMean { population, .. } => {
                let se = self.theoretical_se()?;
                let mean = population.mean();
                (mean.is_finite() && se > 0.0).then_some(Normal { mean, std: se })
            }
        }
    }

    /// `σ / √n` for the sampling scenario.
    pub fn theoretical_se(&self) -> Option<f64> {
        match *self {
            Scenario::SamplingMean { population, n } => {
                let sd = population.std_dev();
                sd.is_finite().then(|| sd / (n as f64).sqrt())
            }
            _ => None,
        }
    }
}

/// Run length and test settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub trials: usize,
    pub batch_size: usize,
    pub alpha: f64,
    pub tail: Tail,
    /// Fixed seed for reproducible runs; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_SIMULATION_TRIALS,
            batch_size: DEFAULT_BATCH_SIZE,
            alpha: DEFAULT_ALPHA,
            tail: Tail::TwoSided,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.trials == 0 || self.batch_size == 0 {
            return Err(invalid(format!(
                "simulation: need trials ≥ 1 and batch size ≥ 1, got {} and {}",
                self.trials, self.batch_size
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(KernelError::OutOfBounds(format!(
                "simulation: α must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Trials finished so far out of the configured total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    #[inline]
    pub fn fraction(&self) -> f64 {
        self.completed as f64 / self.total as f64
    }
}

/// One Monte-Carlo run in progress.
#[derive(Debug)]
pub struct SimulationRun<R: Rng = StdRng> {
    scenario: Scenario,
    config: SimulationConfig,
    sampler: Sampler<R>,
    accumulator: SimulationAccumulator,
    gamma_cache: GammaCache,
    completed: usize,
}

impl SimulationRun<StdRng> {
    /// New run, seeded from `config.seed` or from the thread generator.
    pub fn new(scenario: Scenario, config: SimulationConfig) -> Result<Self, KernelError> {
        let sampler = match config.seed {
            Some(seed) => Sampler::seeded(seed),
            None => Sampler::from_rng(StdRng::from_rng(&mut rand::rng())),
        };
        Self::with_sampler(scenario, config, sampler)
    }
}

impl<R: Rng> SimulationRun<R> {
    /// New run drawing from `sampler`. `config.seed` is ignored.
    pub fn with_sampler(
        scenario: Scenario,
        config: SimulationConfig,
        sampler: Sampler<R>,
    ) -> Result<Self, KernelError> {
        config.validate()?;
        scenario.validate()?;
        info!(
            "simulation start: {} ({} trials, batch {})",
            scenario.name(),
            config.trials,
            config.batch_size
        );
        Ok(Self {
            scenario,
            config,
            sampler,
            accumulator: SimulationAccumulator::new(),
            gamma_cache: GammaCache::new(),
            completed: 0,
        })
    }

    /// Replaces the scenario and discards all accumulated trials.
    pub fn restart(&mut self, scenario: Scenario) -> Result<(), KernelError> {
        scenario.validate()?;
        info!(
            "simulation restart: {} ({} trials discarded)",
            scenario.name(),
            self.completed
        );
        self.scenario = scenario;
        self.accumulator.reset();
        self.completed = 0;
        Ok(())
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn accumulator(&self) -> &SimulationAccumulator {
        &self.accumulator
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed,
            total: self.config.trials,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress().is_finished()
    }

    /// Runs the next batch. Does nothing once the run is finished.
    pub fn step(&mut self) -> Result<Progress, KernelError> {
        let batch = self.config.batch_size.min(self.config.trials - self.completed);
        for _ in 0..batch {
            self.trial()?;
            self.completed += 1;
        }
        let progress = self.progress();
        if batch > 0 {
            trace!(
                "simulation batch: {}/{} trials, {} rejections",
                progress.completed,
                progress.total,
                self.accumulator.rejections
            );
            if progress.is_finished() {
                info!(
                    "simulation finished: {} ({} trials, rejection rate {:.4})",
                    self.scenario.name(),
                    progress.total,
                    self.accumulator.rejection_rate()
                );
            }
        }
        Ok(progress)
    }

    /// Steps until finished and returns the summary.
    pub fn run(&mut self) -> Result<SimulationSummary, KernelError> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            theoretical_se: self.scenario.theoretical_se(),
            ..self.accumulator.summary(self.scenario.effect())
        }
    }

    /// Density of the null (or sampling) distribution at `x`, for overlaying
    /// on a histogram of the simulated statistics. t and chi-square
    /// normalising constants come from the run's Gamma cache.
    pub fn null_density(&mut self, x: f64) -> Option<f64> {
        let d = self.scenario.null_distribution()?;
        let cached = match d {
            DistributionParameters::StudentT { df } => {
                let c = self.gamma_cache.gamma((df + 1.0) / 2.0)
                    / ((df * std::f64::consts::PI).sqrt() * self.gamma_cache.gamma(df / 2.0));
                c.is_finite()
                    .then(|| c * (1.0 + x * x / df).powf(-(df + 1.0) / 2.0))
            }
            DistributionParameters::ChiSquare { df } if x > 0.0 => {
                let k = df / 2.0;
                let c = 1.0 / (2f64.powf(k) * self.gamma_cache.gamma(k));
                (c.is_finite() && c > 0.0).then(|| c * x.powf(k - 1.0) * (-x / 2.0).exp())
            }
            _ => None,
        };
        Some(cached.unwrap_or_else(|| d.pdf(x)))
    }

    fn normals(&mut self, n: usize, mean: f64, sigma: f64) -> Vec<f64> {
        (0..n).map(|_| self.sampler.normal(mean, sigma)).collect()
    }

    fn trial(&mut self) -> Result<(), KernelError> {
        let SimulationConfig { alpha, tail, .. } = self.config;
        let result = match self.scenario {
            Scenario::OneSampleZ {
                true_mean,
                sigma,
                n,
                mu0,
            } => {
                let x = self.normals(n, true_mean, sigma);
                z_test_sample(&x, mu0, sigma, tail, alpha)?
            }
            Scenario::OneSampleT {
                true_mean,
                sigma,
                n,
                mu0,
            } => {
                let x = self.normals(n, true_mean, sigma);
                t_test(&x, mu0, tail, alpha)?
            }
            Scenario::Proportion { true_p, n, p0 } => {
                let successes = self.draw_successes(n, true_p);
                proportion_z_test(successes, n, p0, tail, alpha)?
            }
            Scenario::PairedT {
                mu1,
                mu2,
                sigma1,
                sigma2,
                rho,
                n,
                mu0_diff,
            } => {
                let spread = (1.0 - rho * rho).sqrt();
                let mut x = Vec::with_capacity(n);
                let mut y = Vec::with_capacity(n);
                for _ in 0..n {
                    let z1 = self.sampler.standard_normal();
                    let z2 = self.sampler.standard_normal();
                    x.push(mu1 + sigma1 * z1);
                    y.push(mu2 + sigma2 * (rho * z1 + spread * z2));
                }
                paired_t_test(&x, &y, mu0_diff, tail, alpha)?
            }
            Scenario::TwoSampleT {
                mu1,
                mu2,
                sigma1,
                sigma2,
                n1,
                n2,
                mu0_diff,
                variance,
            } => {
                let x = self.normals(n1, mu1, sigma1);
                let y = self.normals(n2, mu2, sigma2);
                two_sample_t_test(&x, &y, mu0_diff, variance, tail, alpha)?.test
            }
            Scenario::FVariance {
                sigma1,
                sigma2,
                n1,
                n2,
            } => {
                let x = self.normals(n1, 0.0, sigma1);
                let y = self.normals(n2, 0.0, sigma2);
                f_test(&x, &y, tail, alpha)?
            }
            Scenario::ChiSquareVariance {
                true_sigma,
                n,
                sigma0,
            } => {
                let x = self.normals(n, 0.0, true_sigma);
                chi_square_variance_test(&x, sigma0 * sigma0, tail, alpha)?
            }
            Scenario::SamplingMean { population, n } => {
                let total: f64 = (0..n).map(|_| self.sampler.draw(&population)).sum();
                self.accumulator.record_statistic(total / n as f64);
                return Ok(());
            }
        };
        self.accumulator.record(&result);
        Ok(())
    }

    fn draw_successes(&mut self, n: u64, p: f64) -> u64 {
        if p <= 0.0 {
            0
        } else if p >= 1.0 {
            n
        } else {
            self.sampler.binomial(n, p) as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(trials: usize, seed: u64) -> SimulationConfig {
        SimulationConfig {
            trials,
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn accumulator_tallies() {
        let mut acc = SimulationAccumulator::new();
        assert_eq!(acc.rejection_rate(), 0.0);
        let hit = TestResult {
            statistic: 2.5,
            df: None,
            p_value: 0.01,
            reject: true,
            critical_value: 1.96,
            alpha: 0.05,
            tail: Tail::TwoSided,
        };
        let miss = TestResult {
            statistic: 0.5,
            p_value: 0.6,
            reject: false,
            ..hit
        };
        acc.record(&hit);
        acc.record(&miss);
        acc.record(&miss);
        acc.record(&miss);
        assert_eq!(acc.total_trials, 4);
        assert_eq!(acc.rejections, 1);
        assert_eq!(acc.rejection_rate(), 0.25);

        let s = acc.summary(Some(0.5));
        assert_eq!(s.power, Some(0.25));
        assert_eq!(s.type_ii_error_rate, Some(0.75));
        assert!(s.type_i_error_rate.is_none());
        assert_eq!(s.mean_statistic, 1.0);

        let null = acc.summary(Some(0.0005));
        assert_eq!(null.type_i_error_rate, Some(0.25));
        assert!(null.power.is_none());

        acc.reset();
        assert_eq!(acc, SimulationAccumulator::new());
    }

    #[test]
    fn defaults() {
        let c = SimulationConfig::default();
        assert_eq!((c.trials, c.batch_size, c.alpha), (1000, 50, 0.05));
        assert!(SimulationConfig { batch_size: 0, ..c }.validate().is_err());
        assert!(SimulationConfig { alpha: 0.0, ..c }.validate().is_err());
    }

    #[test]
    fn steps_in_batches() {
        let scenario = Scenario::OneSampleZ {
            true_mean: 0.0,
            sigma: 1.0,
            n: 10,
            mu0: 0.0,
        };
        let config = SimulationConfig {
            trials: 120,
            batch_size: 50,
            ..seeded(120, 7)
        };
        let mut run = SimulationRun::new(scenario, config).unwrap();
        assert_eq!(run.step().unwrap(), Progress { completed: 50, total: 120 });
        assert_eq!(run.step().unwrap().completed, 100);
        let last = run.step().unwrap();
        assert!(last.is_finished());
        assert_eq!(last.completed, 120);
        assert_eq!(run.step().unwrap().completed, 120);
        assert_eq!(run.accumulator().total_trials, 120);
    }

    #[test]
    fn seeded_runs_repeat() {
        let scenario = Scenario::OneSampleT {
            true_mean: 0.3,
            sigma: 1.0,
            n: 15,
            mu0: 0.0,
        };
        let a = SimulationRun::new(scenario, seeded(200, 11)).unwrap().run().unwrap();
        let b = SimulationRun::new(scenario, seeded(200, 11)).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn type_one_error_near_alpha() {
        let scenario = Scenario::OneSampleZ {
            true_mean: 5.0,
            sigma: 2.0,
            n: 20,
            mu0: 5.0,
        };
        let s = SimulationRun::new(scenario, seeded(2000, 1)).unwrap().run().unwrap();
        let rate = s.type_i_error_rate.unwrap();
        assert!(rate > 0.025 && rate < 0.08, "type I rate {rate}");
        assert!(s.power.is_none());
    }

    #[test]
    fn large_effect_has_high_power() {
        let scenario = Scenario::TwoSampleT {
            mu1: 1.5,
            mu2: 0.0,
            sigma1: 1.0,
            sigma2: 1.0,
            n1: 30,
            n2: 30,
            mu0_diff: 0.0,
            variance: Variance::Auto,
        };
        let s = SimulationRun::new(scenario, seeded(300, 3)).unwrap().run().unwrap();
        assert!(s.power.unwrap() > 0.95);
        assert!(s.type_ii_error_rate.unwrap() < 0.05);
    }

    #[test]
    fn sampling_mean_standard_error() {
        let scenario = Scenario::SamplingMean {
            population: DistributionParameters::Exponential { lambda: 0.5 },
            n: 25,
        };
        let s = SimulationRun::new(scenario, seeded(2000, 5)).unwrap().run().unwrap();
        // σ = 2, n = 25
        assert_eq!(s.theoretical_se, Some(0.4));
        let emp = s.empirical_se.unwrap();
        assert!((emp - 0.4).abs() < 0.04, "empirical se {emp}");
        assert!((s.mean_statistic - 2.0).abs() < 0.05);
        assert!(s.mean_p_value.is_none());
    }

    #[test]
    fn restart_discards_state() {
        let z = Scenario::OneSampleZ {
            true_mean: 0.0,
            sigma: 1.0,
            n: 5,
            mu0: 0.0,
        };
        let mut run = SimulationRun::new(z, seeded(100, 9)).unwrap();
        run.step().unwrap();
        let chi = Scenario::ChiSquareVariance {
            true_sigma: 1.0,
            n: 8,
            sigma0: 1.0,
        };
        run.restart(chi).unwrap();
        assert_eq!(run.progress().completed, 0);
        assert_eq!(run.accumulator().total_trials, 0);
        assert_eq!(run.scenario().name(), "chi-square variance");
        assert!(run.restart(Scenario::OneSampleT {
            true_mean: 0.0,
            sigma: 1.0,
            n: 1,
            mu0: 0.0,
        })
        .is_err());
    }

    #[test]
    fn null_density_matches_family() {
        let t = Scenario::OneSampleT {
            true_mean: 0.0,
            sigma: 1.0,
            n: 11,
            mu0: 0.0,
        };
        let mut run = SimulationRun::new(t, seeded(10, 2)).unwrap();
        let d = DistributionParameters::StudentT { df: 10.0 };
        for &x in &[-2.0, 0.0, 0.7, 3.1] {
            assert!((run.null_density(x).unwrap() - d.pdf(x)).abs() < 1e-12);
        }
        run.restart(Scenario::ChiSquareVariance {
            true_sigma: 1.0,
            n: 6,
            sigma0: 1.0,
        })
        .unwrap();
        let c = DistributionParameters::ChiSquare { df: 5.0 };
        assert!((run.null_density(1.0).unwrap() - c.pdf(1.0)).abs() < 1e-12);
        assert_eq!(run.null_density(-1.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_invalid_scenarios() {
        let bad_rho = Scenario::PairedT {
            mu1: 0.0,
            mu2: 0.0,
            sigma1: 1.0,
            sigma2: 1.0,
            rho: 1.5,
            n: 10,
            mu0_diff: 0.0,
        };
        assert!(SimulationRun::new(bad_rho, seeded(10, 1)).is_err());
        let bad_p = Scenario::Proportion {
            true_p: 0.5,
            n: 10,
            p0: 0.0,
        };
        assert!(bad_p.validate().is_err());
    }
}
