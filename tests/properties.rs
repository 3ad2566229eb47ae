// Structural properties checked over parameter grids: the Gamma recurrence,
// symmetry, CDF monotonicity and bounds, and quantile/CDF round trips.

mod util;

mod property_tests {
    use super::util::{assert_close, init_logging};

    use stat_kernels::kernels::scientific::distributions::parameters::DistributionParameters;
    use stat_kernels::kernels::scientific::distributions::parameters::DistributionParameters::*;
    use stat_kernels::kernels::scientific::distributions::shared::scalar::{gamma_func, ln_gamma};
    use stat_kernels::kernels::scientific::distributions::univariate::normal::{
        normal_cdf_scalar, normal_pdf_scalar,
    };
    use stat_kernels::kernels::scientific::distributions::univariate::student_t::{
        student_t_cdf_scalar, student_t_pdf_scalar,
    };

    fn families() -> Vec<DistributionParameters> {
        vec![
            Normal { mean: 1.0, std: 2.0 },
            Uniform { a: -1.0, b: 3.0 },
            Exponential { lambda: 0.7 },
            Gamma { shape: 2.5, scale: 1.5 },
            Gamma { shape: 0.6, scale: 1.0 },
            Beta { alpha: 2.0, beta: 5.0 },
            Beta { alpha: 0.5, beta: 0.5 },
            ChiSquare { df: 1.0 },
            ChiSquare { df: 7.0 },
            StudentT { df: 1.0 },
            StudentT { df: 4.0 },
            StudentT { df: 40.0 },
            FisherF { df1: 5.0, df2: 10.0 },
            FisherF { df1: 1.0, df2: 3.0 },
            Binomial { n: 25, p: 0.4 },
            Poisson { lambda: 6.0 },
            Geometric { p: 0.2 },
            Hypergeometric {
                population: 30,
                successes: 12,
                draws: 10,
            },
        ]
    }

    fn grid(d: &DistributionParameters) -> Vec<f64> {
        let lo = d.quantile(0.001);
        let hi = d.quantile(0.999);
        (0..=200)
            .map(|i| lo - 1.0 + (hi - lo + 2.0) * i as f64 / 200.0)
            .collect()
    }

    #[test]
    fn gamma_recurrence() {
        let mut z = 0.05;
        while z < 150.0 {
            let lhs = gamma_func(z + 1.0);
            let rhs = z * gamma_func(z);
            assert!(((lhs - rhs) / rhs).abs() < 1e-9, "z={z}: {lhs} vs {rhs}");
            assert_close(ln_gamma(z + 1.0), ln_gamma(z) + z.ln(), 1e-12);
            z *= 1.37;
        }
    }

    #[test]
    fn gamma_at_integers_is_factorial() {
        let mut fact = 1.0;
        for n in 1..20u32 {
            assert!(((gamma_func(n as f64) - fact) / fact).abs() < 1e-13);
            fact *= n as f64;
        }
        assert_close(gamma_func(0.5), std::f64::consts::PI.sqrt(), 1e-14);
    }

    #[test]
    fn normal_and_t_symmetry() {
        for i in 0..=60 {
            let x = -6.0 + 0.2 * i as f64;
            assert_eq!(normal_pdf_scalar(x, 0.0, 1.0), normal_pdf_scalar(-x, 0.0, 1.0));
            assert_close(normal_cdf_scalar(x, 0.0, 1.0) + normal_cdf_scalar(-x, 0.0, 1.0), 1.0, 1e-14);
            for &df in &[1.0, 3.0, 30.0] {
                assert_close(student_t_pdf_scalar(x, df), student_t_pdf_scalar(-x, df), 1e-15);
                assert_close(student_t_cdf_scalar(x, df) + student_t_cdf_scalar(-x, df), 1.0, 1e-13);
            }
        }
    }

    #[test]
    fn cdf_is_monotone_and_bounded() {
        for d in families() {
            let xs = grid(&d);
            let mut prev = 0.0;
            for &x in &xs {
                let c = d.cdf(x);
                assert!((0.0..=1.0).contains(&c), "{d:?} cdf({x}) = {c}");
                assert!(c >= prev - 1e-15, "{d:?} not monotone at {x}: {prev} > {c}");
                prev = c;
            }
            let (lo, hi) = d.support();
            assert_close(d.cdf(f64::NEG_INFINITY), 0.0, 1e-15);
            assert_close(d.cdf(f64::INFINITY), 1.0, 1e-12);
            if lo.is_finite() {
                assert!(d.cdf(lo - 1.0) == 0.0, "{d:?}");
            }
            if hi.is_finite() {
                assert_close(d.cdf(hi), 1.0, 1e-12);
            }
        }
    }

    #[test]
    fn continuous_quantile_round_trip() {
        for d in families().into_iter().filter(|d| !d.is_discrete()) {
            let mut p = 0.01;
            while p < 0.99 {
                let x = d.quantile(p);
                assert!((d.cdf(x) - p).abs() < 1e-6, "{d:?}: cdf(q({p})) = {}", d.cdf(x));
                p += 0.0245;
            }
        }
    }

    #[test]
    fn quantile_round_trip_on_lopsided_parameters() {
        init_logging();
        let hard = [
            ChiSquare { df: 0.1 },
            ChiSquare { df: 0.25 },
            ChiSquare { df: 0.5 },
            Gamma { shape: 0.05, scale: 1.0 },
            Gamma { shape: 0.3, scale: 2.0 },
            FisherF { df1: 100.0, df2: 2.0 },
            FisherF { df1: 2.0, df2: 100.0 },
            FisherF { df1: 0.5, df2: 30.0 },
            Beta { alpha: 0.5, beta: 50.0 },
            Beta { alpha: 50.0, beta: 0.5 },
            StudentT { df: 0.5 },
        ];
        let ps = [0.01, 0.05, 0.25, 0.5, 0.75, 0.95, 0.99];
        for d in hard {
            for &p in &ps {
                let est = d.quantile_estimate(p);
                assert!(est.is_converged(), "{d:?} p={p}: {est:?}");
                assert!((d.cdf(est.value) - p).abs() < 1e-6, "{d:?}: cdf(q({p})) = {}", d.cdf(est.value));
            }
        }
        // 1 − 9e-18 is the exact 99% point; only p up to about 0.987 is representable
        let u_shaped = Beta { alpha: 0.1, beta: 0.1 };
        for &p in &ps[..6] {
            let q = u_shaped.quantile(p);
            assert!((u_shaped.cdf(q) - p).abs() < 1e-6, "Beta(0.1, 0.1): cdf(q({p})) = {}", u_shaped.cdf(q));
        }
    }

    #[test]
    fn discrete_quantile_is_generalised_inverse() {
        for d in families().into_iter().filter(|d| d.is_discrete()) {
            for i in 1..50 {
                let p = i as f64 / 50.0;
                let k = d.quantile(p);
                assert!(d.cdf(k) >= p - 1e-12, "{d:?}: cdf({k}) < {p}");
                assert!(d.cdf(k - 1.0) < p, "{d:?}: {k} is not the smallest count");
            }
        }
    }

    #[test]
    fn densities_are_non_negative() {
        for d in families() {
            for x in grid(&d) {
                let v = d.pdf(x);
                assert!(v >= 0.0 && !v.is_nan(), "{d:?} pdf({x}) = {v}");
            }
        }
    }
}
