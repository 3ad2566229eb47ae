// End-to-end use of the inference layer: tests on fixed data and seeded
// Monte-Carlo runs for each scenario.

mod util;

mod inference_tests {
    use super::util::{assert_close, init_logging};

    use stat_kernels::kernels::scientific::distributions::parameters::DistributionParameters;
    use stat_kernels::kernels::scientific::inference::hypothesis::{
        chi_square_variance_test, f_test, proportion_z_test, tea_tasting_test, two_sample_t_test,
        Tail, Variance,
    };
    use stat_kernels::kernels::scientific::inference::interval::{t_interval, z_interval};
    use stat_kernels::kernels::scientific::inference::simulation::{
        Scenario, SimulationConfig, SimulationRun,
    };

    fn config(trials: usize, seed: u64) -> SimulationConfig {
        init_logging();
        SimulationConfig {
            trials,
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn interval_and_test_agree() {
        // a two-sided t test rejects exactly when μ0 lies outside the interval
        let x = [12.1, 11.8, 12.6, 12.9, 12.4, 11.9, 12.7, 12.2, 12.5, 12.0];
        let ci = t_interval(&x, 0.95).unwrap();
        for &mu0 in &[11.5, 12.0, 12.3, 12.8] {
            let r = stat_kernels::kernels::scientific::inference::hypothesis::t_test(
                &x,
                mu0,
                Tail::TwoSided,
                0.05,
            )
            .unwrap();
            assert_eq!(r.reject, !ci.contains(mu0), "μ0 = {mu0}");
        }
        let z = z_interval(ci.estimate, 0.4, 10, 0.99).unwrap();
        assert!(z.lower < ci.estimate && ci.estimate < z.upper);
    }

    #[test]
    fn welch_handles_unequal_spread() {
        let x = [5.0, 5.2, 4.9, 5.1, 5.0, 4.8, 5.1, 5.2];
        let y = [3.0, 9.0, 1.5, 7.5, 12.0, 0.5, 6.0, 10.5];
        let auto = two_sample_t_test(&x, &y, 0.0, Variance::Auto, Tail::TwoSided, 0.05).unwrap();
        assert!(auto.variance_test.unwrap().reject);
        assert_eq!(auto.method, Variance::Welch);
        let df = auto.test.df.unwrap();
        assert!(df < 14.0 && df > 7.0);
    }

    #[test]
    fn fixed_data_tests() {
        let r = f_test(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0], Tail::TwoSided, 0.05).unwrap();
        assert_close(r.statistic, 0.25, 1e-15);
        let chi = chi_square_variance_test(&[1.0, 2.0, 3.0, 4.0, 5.0], 2.5, Tail::TwoSided, 0.05).unwrap();
        // s² = 2.5, so χ² = n − 1
        assert_close(chi.statistic, 4.0, 1e-14);
        assert!(!chi.reject);
        let prop = proportion_z_test(30, 100, 0.5, Tail::Left, 0.05).unwrap();
        assert_close(prop.statistic, -4.0, 1e-12);
        assert!(prop.reject);
        assert!(tea_tasting_test(4, 4, 0.05).unwrap().reject);
    }

    #[test]
    fn paired_correlation_increases_power() {
        let paired = |rho: f64| Scenario::PairedT {
            mu1: 10.5,
            mu2: 10.0,
            sigma1: 1.0,
            sigma2: 1.0,
            rho,
            n: 15,
            mu0_diff: 0.0,
        };
        let low = SimulationRun::new(paired(0.0), config(600, 21)).unwrap().run().unwrap();
        let high = SimulationRun::new(paired(0.9), config(600, 21)).unwrap().run().unwrap();
        assert!(high.power.unwrap() > low.power.unwrap() + 0.2);
    }

    #[test]
    fn variance_scenarios() {
        let f_null = Scenario::FVariance {
            sigma1: 2.0,
            sigma2: 2.0,
            n1: 12,
            n2: 15,
        };
        let s = SimulationRun::new(f_null, config(1500, 4)).unwrap().run().unwrap();
        let rate = s.type_i_error_rate.unwrap();
        assert!(rate > 0.02 && rate < 0.09, "F type I rate {rate}");

        let chi_alt = Scenario::ChiSquareVariance {
            true_sigma: 2.0,
            n: 25,
            sigma0: 1.0,
        };
        let s = SimulationRun::new(chi_alt, config(300, 8)).unwrap().run().unwrap();
        assert!(s.power.unwrap() > 0.95);
    }

    #[test]
    fn proportion_scenario() {
        let scenario = Scenario::Proportion {
            true_p: 0.5,
            n: 400,
            p0: 0.5,
        };
        let s = SimulationRun::new(scenario, config(1500, 13)).unwrap().run().unwrap();
        let rate = s.type_i_error_rate.unwrap();
        assert!(rate > 0.02 && rate < 0.09, "proportion type I rate {rate}");
        let mean_p = s.mean_p_value.unwrap();
        assert!(mean_p > 0.4 && mean_p < 0.6);
    }

    #[test]
    fn sampling_distribution_of_uniform_mean() {
        let scenario = Scenario::SamplingMean {
            population: DistributionParameters::Uniform { a: 0.0, b: 12.0 },
            n: 16,
        };
        let mut run = SimulationRun::new(scenario, config(3000, 17)).unwrap();
        let s = run.run().unwrap();
        // σ = 12/√12 = √12, se = √12 / 4
        let theory = 12f64.sqrt() / 4.0;
        assert_close(s.theoretical_se.unwrap(), theory, 1e-12);
        assert!((s.empirical_se.unwrap() - theory).abs() < 0.05);
        assert!((s.mean_statistic - 6.0).abs() < 0.08);
        assert!(run.null_density(6.0).unwrap() > 0.0);
    }
}
