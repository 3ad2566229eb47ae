// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Hypothesis Tests** - *Classical Parametric and Exact Tests*
//!
//! Each test reduces its data to a statistic with a known null distribution,
//! then reads the p-value off that distribution's CDF according to the
//! [`Tail`]. H0 is rejected when `p < α`.
//!
//! ## Tests
//! - one-sample z (σ known) and t (σ unknown)
//! - paired t on the differences `x − y`
//! - two-sample t, pooled or Welch, with [`Variance::Auto`] choosing via an F test
//! - F test for equal variances
//! - chi-square test of a single variance
//! - one-proportion z test
//! - tea-tasting exact test on `Hypergeometric(2h, h, h)`
//!
//! Two-sided p-values are `2·min(F(t), 1 − F(t))` for every null
//! distribution, which reduces to `2(1 − Φ(|z|))` for symmetric ones.

use crate::config::DEFAULT_ALPHA;
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::univariate::chi_squared::{
    chi_square_cdf_scalar, chi_square_quantile_scalar,
};
use crate::kernels::scientific::distributions::univariate::fisher_f::{
    fisher_f_cdf_scalar, fisher_f_quantile_scalar,
};
use crate::kernels::scientific::distributions::univariate::hypergeometric::hypergeometric_pmf_scalar;
use crate::kernels::scientific::distributions::univariate::normal::{
    std_normal_cdf, std_normal_quantile,
};
use crate::kernels::scientific::distributions::univariate::student_t::{
    student_t_cdf_scalar, student_t_quantile_scalar,
};
use crate::kernels::scientific::inference::summary::SampleSummary;
use crate::utils::{confirm_equal_len, confirm_min_len};

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tail {
    /// H1: parameter ≠ null value.
    #[default]
    TwoSided,
    /// H1: parameter < null value.
    Left,
    /// H1: parameter > null value.
    Right,
}

impl Tail {
    /// p-value from the null CDF evaluated at the observed statistic.
    #[inline]
    pub fn p_value(self, cdf: f64) -> f64 {
        match self {
            Tail::Left => cdf,
            Tail::Right => 1.0 - cdf,
            Tail::TwoSided => (2.0 * cdf.min(1.0 - cdf)).min(1.0),
        }
    }

    /// Boundary of the rejection region. For two-sided tests this is the
    /// upper boundary; the lower one is `quantile(α/2)`.
    #[inline]
    pub fn critical_value<Q: Fn(f64) -> f64>(self, alpha: f64, quantile: Q) -> f64 {
        match self {
            Tail::Left => quantile(alpha),
            Tail::Right => quantile(1.0 - alpha),
            Tail::TwoSided => quantile(1.0 - alpha / 2.0),
        }
    }
}

/// Outcome of one hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    pub statistic: f64,
    /// Degrees of freedom of the null distribution; `None` for z and exact tests.
    pub df: Option<f64>,
    pub p_value: f64,
    pub reject: bool,
    pub critical_value: f64,
    pub alpha: f64,
    pub tail: Tail,
}

impl TestResult {
    fn from_cdf<Q: Fn(f64) -> f64>(
        statistic: f64,
        df: Option<f64>,
        cdf: f64,
        tail: Tail,
        alpha: f64,
        quantile: Q,
    ) -> Self {
        let p_value = tail.p_value(cdf);
        Self {
            statistic,
            df,
            p_value,
            reject: p_value < alpha,
            critical_value: tail.critical_value(alpha, quantile),
            alpha,
            tail,
        }
    }
}

/// Variance assumption for the two-sample t test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variance {
    /// Equal variances, `df = n1 + n2 − 2`.
    Pooled,
    /// Unequal variances, Welch-Satterthwaite df.
    Welch,
    /// Pooled unless an F test at the default α rejects equal variances.
    #[default]
    Auto,
}

/// Two-sample t test outcome with the variance assumption actually used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSampleResult {
    pub test: TestResult,
    /// `Pooled` or `Welch`, never `Auto`.
    pub method: Variance,
    /// The equal-variance F test run when `Auto` was requested.
    pub variance_test: Option<TestResult>,
    pub mean_difference: f64,
    pub standard_error: f64,
}

fn check_alpha(fname: &str, alpha: f64) -> Result<(), KernelError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(KernelError::OutOfBounds(format!(
            "{fname}: α must lie in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}

fn check_positive(fname: &str, label: &str, v: f64) -> Result<(), KernelError> {
    if !(v.is_finite() && v > 0.0) {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: {label} must be positive and finite, got {v}"
        )));
    }
    Ok(())
}

fn z_result(z: f64, tail: Tail, alpha: f64) -> TestResult {
    TestResult::from_cdf(z, None, std_normal_cdf(z), tail, alpha, std_normal_quantile)
}

fn t_result(t: f64, df: f64, tail: Tail, alpha: f64) -> TestResult {
    TestResult::from_cdf(t, Some(df), student_t_cdf_scalar(t, df), tail, alpha, |p| {
        student_t_quantile_scalar(p, df)
    })
}

/// One-sample z test from summary statistics.
///
/// `z = (x̄ − μ0) / (σ / √n)`.
pub fn z_test(
    sample_mean: f64,
    mu0: f64,
    sigma: f64,
    n: usize,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    check_alpha("z_test", alpha)?;
    check_positive("z_test", "σ", sigma)?;
    confirm_min_len("z_test", n, 1)?;
    let z = (sample_mean - mu0) / (sigma / (n as f64).sqrt());
    Ok(z_result(z, tail, alpha))
}

/// One-sample z test on raw observations with known σ.
pub fn z_test_sample(
    x: &[f64],
    mu0: f64,
    sigma: f64,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    confirm_min_len("z_test_sample", x.len(), 1)?;
    let m = x.iter().sum::<f64>() / x.len() as f64;
    z_test(m, mu0, sigma, x.len(), tail, alpha)
}

/// One-sample t test from summary statistics, `df = n − 1`.
pub fn t_test_from_stats(
    sample_mean: f64,
    sample_std: f64,
    n: usize,
    mu0: f64,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    check_alpha("t_test", alpha)?;
    confirm_min_len("t_test", n, 2)?;
    check_positive("t_test", "sample std", sample_std)?;
    let se = sample_std / (n as f64).sqrt();
    Ok(t_result((sample_mean - mu0) / se, (n - 1) as f64, tail, alpha))
}

/// One-sample t test on raw observations.
///
/// # Errors
/// - `InsufficientData` for fewer than two observations
/// - `InvalidArguments` when every observation is identical
/// - `OutOfBounds` for α outside (0, 1)
pub fn t_test(x: &[f64], mu0: f64, tail: Tail, alpha: f64) -> Result<TestResult, KernelError> {
    confirm_min_len("t_test", x.len(), 2)?;
    let s = SampleSummary::from_slice(x)?;
    t_test_from_stats(s.mean, s.std_dev, s.n, mu0, tail, alpha)
}

/// Paired t test on `d = x − y` against a hypothesised mean difference.
pub fn paired_t_test(
    x: &[f64],
    y: &[f64],
    mu0_diff: f64,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    confirm_equal_len("paired_t_test", x.len(), y.len())?;
    let d: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    t_test(&d, mu0_diff, tail, alpha)
}

/// Two-sample t test of `μ1 − μ2 = mu0_diff`.
///
/// Welch degrees of freedom are kept fractional.
pub fn two_sample_t_test(
    x: &[f64],
    y: &[f64],
    mu0_diff: f64,
    variance: Variance,
    tail: Tail,
    alpha: f64,
) -> Result<TwoSampleResult, KernelError> {
    check_alpha("two_sample_t_test", alpha)?;
    confirm_min_len("two_sample_t_test", x.len(), 2)?;
    confirm_min_len("two_sample_t_test", y.len(), 2)?;
    let s1 = SampleSummary::from_slice(x)?;
    let s2 = SampleSummary::from_slice(y)?;

    let (method, variance_test) = match variance {
        Variance::Auto => {
            let f = f_test_from_variances(
                s1.variance,
                s1.n,
                s2.variance,
                s2.n,
                Tail::TwoSided,
                DEFAULT_ALPHA,
            )?;
            let m = if f.reject {
                Variance::Welch
            } else {
                Variance::Pooled
            };
            (m, Some(f))
        }
        other => (other, None),
    };

    let (n1, n2) = (s1.n as f64, s2.n as f64);
    let (se, df) = match method {
        Variance::Welch => {
            let a = s1.variance / n1;
            let b = s2.variance / n2;
            let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
            ((a + b).sqrt(), df)
        }
        _ => {
            let pooled =
                ((n1 - 1.0) * s1.variance + (n2 - 1.0) * s2.variance) / (n1 + n2 - 2.0);
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), n1 + n2 - 2.0)
        }
    };
    if !(se > 0.0) {
        return Err(KernelError::InvalidArguments(
            "two_sample_t_test: both samples have zero variance".into(),
        ));
    }
    let diff = s1.mean - s2.mean;
    Ok(TwoSampleResult {
        test: t_result((diff - mu0_diff) / se, df, tail, alpha),
        method,
        variance_test,
        mean_difference: diff,
        standard_error: se,
    })
}

/// F test of `σ1² = σ2²` from sample variances, `F = s1² / s2²`.
pub fn f_test_from_variances(
    var1: f64,
    n1: usize,
    var2: f64,
    n2: usize,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    check_alpha("f_test", alpha)?;
    confirm_min_len("f_test", n1, 2)?;
    confirm_min_len("f_test", n2, 2)?;
    check_positive("f_test", "s2²", var2)?;
    if !(var1.is_finite() && var1 >= 0.0) {
        return Err(KernelError::InvalidArguments(format!(
            "f_test: s1² must be non-negative and finite, got {var1}"
        )));
    }
    let (df1, df2) = ((n1 - 1) as f64, (n2 - 1) as f64);
    let f = var1 / var2;
    Ok(TestResult::from_cdf(
        f,
        Some(df1),
        fisher_f_cdf_scalar(f, df1, df2),
        tail,
        alpha,
        |p| fisher_f_quantile_scalar(p, df1, df2),
    ))
}

/// F test for equal variances on raw samples. `df` reports the numerator
/// degrees of freedom; the denominator has `y.len() − 1`.
pub fn f_test(x: &[f64], y: &[f64], tail: Tail, alpha: f64) -> Result<TestResult, KernelError> {
    confirm_min_len("f_test", x.len(), 2)?;
    confirm_min_len("f_test", y.len(), 2)?;
    let s1 = SampleSummary::from_slice(x)?;
    let s2 = SampleSummary::from_slice(y)?;
    f_test_from_variances(s1.variance, s1.n, s2.variance, s2.n, tail, alpha)
}

/// Chi-square test of `σ² = σ0²` from a sample variance,
/// `χ² = (n − 1)s² / σ0²` on `n − 1` degrees of freedom.
pub fn chi_square_variance_test_from_stats(
    sample_variance: f64,
    n: usize,
    sigma0_sq: f64,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    check_alpha("chi_square_variance_test", alpha)?;
    confirm_min_len("chi_square_variance_test", n, 2)?;
    check_positive("chi_square_variance_test", "σ0²", sigma0_sq)?;
    let df = (n - 1) as f64;
    let chi2 = df * sample_variance / sigma0_sq;
    Ok(TestResult::from_cdf(
        chi2,
        Some(df),
        chi_square_cdf_scalar(chi2, df),
        tail,
        alpha,
        |p| chi_square_quantile_scalar(p, df),
    ))
}

/// Chi-square variance test on raw observations.
pub fn chi_square_variance_test(
    x: &[f64],
    sigma0_sq: f64,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    confirm_min_len("chi_square_variance_test", x.len(), 2)?;
    let s = SampleSummary::from_slice(x)?;
    chi_square_variance_test_from_stats(s.variance, s.n, sigma0_sq, tail, alpha)
}

/// One-proportion z test, `z = (p̂ − p0) / √(p0(1 − p0)/n)`.
pub fn proportion_z_test(
    successes: u64,
    n: u64,
    p0: f64,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    check_alpha("proportion_z_test", alpha)?;
    if n == 0 || successes > n {
        return Err(KernelError::InvalidArguments(format!(
            "proportion_z_test: need 0 ≤ successes ≤ n and n ≥ 1, got {successes}/{n}"
        )));
    }
    if !(p0 > 0.0 && p0 < 1.0) {
        return Err(KernelError::InvalidArguments(format!(
            "proportion_z_test: p0 must lie in (0, 1), got {p0}"
        )));
    }
    let p_hat = successes as f64 / n as f64;
    let se = (p0 * (1.0 - p0) / n as f64).sqrt();
    Ok(z_result((p_hat - p0) / se, tail, alpha))
}

/// Fisher's tea-tasting test.
///
/// A taster is given `2h` cups, `h` of each kind, and picks the `h` they
/// believe had milk poured first. Under H0 the number correct follows
/// `Hypergeometric(2h, h, h)` and the p-value is `P(X ≥ correct)`.
/// `critical_value` is the smallest count that would reject at `alpha`, or
/// +∞ when no count can.
pub fn tea_tasting_test(
    correct: u64,
    cups_per_kind: u64,
    alpha: f64,
) -> Result<TestResult, KernelError> {
    check_alpha("tea_tasting_test", alpha)?;
    if cups_per_kind == 0 || correct > cups_per_kind {
        return Err(KernelError::InvalidArguments(format!(
            "tea_tasting_test: need 1 ≤ cups per kind and correct ≤ cups per kind, got {correct} of {cups_per_kind}"
        )));
    }
    let h = cups_per_kind;
    let upper_tail = |k: u64| -> f64 {
        // the whole support carries probability one
        if k == 0 {
            return 1.0;
        }
        (k..=h)
            .map(|j| hypergeometric_pmf_scalar(j as f64, 2 * h, h, h))
            .sum::<f64>()
            .min(1.0)
    };
    let p_value = upper_tail(correct);
    let critical_value = (0..=h)
        .find(|&k| upper_tail(k) < alpha)
        .map_or(f64::INFINITY, |k| k as f64);
    Ok(TestResult {
        statistic: correct as f64,
        df: None,
        p_value,
        reject: p_value < alpha,
        critical_value,
        alpha,
        tail: Tail::Right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn tail_p_values() {
        assert!(close(Tail::TwoSided.p_value(0.975), 0.05, 1e-15));
        assert!(close(Tail::TwoSided.p_value(0.01), 0.02, 1e-15));
        assert_eq!(Tail::Left.p_value(0.3), 0.3);
        assert!(close(Tail::Right.p_value(0.3), 0.7, 1e-15));
        assert_eq!(Tail::TwoSided.p_value(0.5), 1.0);
    }

    #[test]
    fn one_sample_z() {
        // z = (103 − 100) / (15/√36) = 1.2
        let r = z_test(103.0, 100.0, 15.0, 36, Tail::TwoSided, 0.05).unwrap();
        assert!(close(r.statistic, 1.2, 1e-12));
        // scipy: 2 * norm.sf(1.2) == 0.23013934044341543
        assert!(close(r.p_value, 0.23013934044341543, 1e-12));
        assert!(!r.reject);
        assert!(r.df.is_none());
        assert!(close(r.critical_value, 1.959963984540054, 1e-9));

        let right = z_test(106.0, 100.0, 15.0, 36, Tail::Right, 0.05).unwrap();
        assert!(right.reject);
        assert!(close(right.critical_value, 1.6448536269514722, 1e-9));
    }

    #[test]
    fn one_sample_t() {
        let x = [5.1, 4.9, 5.6, 5.8, 6.0, 5.7, 5.4, 5.2];
        let r = t_test(&x, 5.0, Tail::TwoSided, 0.05).unwrap();
        // scipy.stats.ttest_1samp(x, 5.0): t = 3.4631982585064564, p = 0.010502026572664067
        assert!(close(r.statistic, 3.4631982585064564, 1e-10));
        assert!(close(r.p_value, 0.010502026572664067, 1e-8));
        assert_eq!(r.df, Some(7.0));
        assert!(r.reject);
    }

    #[test]
    fn paired_equals_one_sample_on_differences() {
        let before = [200.0, 190.0, 210.0, 220.0, 205.0, 198.0];
        let after = [195.0, 188.0, 200.0, 214.0, 204.0, 190.0];
        let diffs: Vec<f64> = before.iter().zip(&after).map(|(a, b)| a - b).collect();
        let paired = paired_t_test(&before, &after, 0.0, Tail::Right, 0.05).unwrap();
        let direct = t_test(&diffs, 0.0, Tail::Right, 0.05).unwrap();
        assert_eq!(paired, direct);
        assert!(matches!(
            paired_t_test(&before, &after[..5], 0.0, Tail::TwoSided, 0.05),
            Err(KernelError::LengthMismatch(_))
        ));
    }

    #[test]
    fn two_sample_variants() {
        let x = [20.1, 22.3, 19.8, 21.5, 23.0, 20.7];
        let y = [18.2, 19.1, 17.5, 18.9, 20.0, 18.4, 19.3];
        let pooled = two_sample_t_test(&x, &y, 0.0, Variance::Pooled, Tail::TwoSided, 0.05).unwrap();
        assert_eq!(pooled.test.df, Some(11.0));
        assert_eq!(pooled.method, Variance::Pooled);

        let welch = two_sample_t_test(&x, &y, 0.0, Variance::Welch, Tail::TwoSided, 0.05).unwrap();
        let df = welch.test.df.unwrap();
        assert!(df > 5.0 && df < 11.0 && df.fract() != 0.0);

        let auto = two_sample_t_test(&x, &y, 0.0, Variance::Auto, Tail::TwoSided, 0.05).unwrap();
        let f = auto.variance_test.unwrap();
        let expected = if f.reject { Variance::Welch } else { Variance::Pooled };
        assert_eq!(auto.method, expected);
        assert!(close(auto.mean_difference, pooled.mean_difference, 1e-15));
    }

    #[test]
    fn f_test_two_sided_symmetry() {
        let r = f_test_from_variances(4.0, 11, 4.0, 11, Tail::TwoSided, 0.05).unwrap();
        assert_eq!(r.statistic, 1.0);
        assert!(close(r.p_value, 1.0, 1e-9));
        // scipy: 2 * f.sf(3.0, 10, 10) == 0.0978546142578125
        let big = f_test_from_variances(3.0, 11, 1.0, 11, Tail::TwoSided, 0.05).unwrap();
        let swapped = f_test_from_variances(1.0, 11, 3.0, 11, Tail::TwoSided, 0.05).unwrap();
        assert!(close(big.p_value, swapped.p_value, 1e-9));
        assert!(close(big.p_value, 0.0978546142578125, 1e-9));
    }

    #[test]
    fn chi_square_variance() {
        // (n − 1)s²/σ0² = 9 · 2 / 1 = 18 on 9 df
        let r = chi_square_variance_test_from_stats(2.0, 10, 1.0, Tail::Right, 0.05).unwrap();
        assert_eq!(r.statistic, 18.0);
        assert_eq!(r.df, Some(9.0));
        // scipy.stats.chi2.sf(18, 9) == 0.035173539466984794
        assert!(close(r.p_value, 0.035173539466984794, 1e-10));
        assert!(r.reject);
        // scipy.stats.chi2.ppf(0.95, 9) == 16.918977604620448
        assert!(close(r.critical_value, 16.918977604620448, 1e-6));
    }

    #[test]
    fn proportion_uses_null_standard_error() {
        // p̂ = 0.6, se = √(0.25/100) = 0.05, z = 2
        let r = proportion_z_test(60, 100, 0.5, Tail::TwoSided, 0.05).unwrap();
        assert!(close(r.statistic, 2.0, 1e-12));
        // scipy: 2 * norm.sf(2) == 0.04550026389635842
        assert!(close(r.p_value, 0.04550026389635842, 1e-12));
        assert!(r.reject);
        assert!(proportion_z_test(101, 100, 0.5, Tail::TwoSided, 0.05).is_err());
        assert!(proportion_z_test(10, 100, 1.0, Tail::TwoSided, 0.05).is_err());
    }

    #[test]
    fn lady_tasting_tea() {
        let perfect = tea_tasting_test(4, 4, 0.05).unwrap();
        assert!(close(perfect.p_value, 1.0 / 70.0, 1e-15));
        assert!(perfect.reject);
        assert_eq!(perfect.critical_value, 4.0);

        let three = tea_tasting_test(3, 4, 0.05).unwrap();
        assert!(close(three.p_value, 17.0 / 70.0, 1e-15));
        assert!(!three.reject);

        assert_eq!(tea_tasting_test(0, 4, 0.05).unwrap().p_value, 1.0);
        for h in 1..=12 {
            assert_eq!(tea_tasting_test(0, h, 0.05).unwrap().p_value, 1.0);
            for k in 1..=h {
                let p = tea_tasting_test(k, h, 0.05).unwrap().p_value;
                assert!(p > 0.0 && p <= 1.0, "{k} of {h}: {p}");
            }
        }
        // two cups of each kind can never reach 5%
        assert_eq!(tea_tasting_test(2, 2, 0.05).unwrap().critical_value, f64::INFINITY);
    }

    #[test]
    fn argument_errors() {
        assert!(matches!(
            t_test(&[1.0], 0.0, Tail::TwoSided, 0.05),
            Err(KernelError::InsufficientData(_))
        ));
        assert!(matches!(
            z_test(0.0, 0.0, 1.0, 10, Tail::TwoSided, 1.5),
            Err(KernelError::OutOfBounds(_))
        ));
        assert!(matches!(
            z_test(0.0, 0.0, -1.0, 10, Tail::TwoSided, 0.05),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(tea_tasting_test(5, 4, 0.05).is_err());
    }
}
