// Discrete PMFs summed over their full support.

mod util;

mod scipy_sum_to_one_tests {
    use super::util::assert_close;

    use stat_kernels::kernels::scientific::distributions::univariate::{
        binomial::binomial_pmf, geometric::geometric_pmf,
        hypergeometric::{hypergeometric_pmf, hypergeometric_support},
        poisson::poisson_pmf,
    };

    fn sum(xs: &[f64]) -> f64 {
        xs.iter().copied().sum()
    }

    #[test]
    fn sum_to_one_binomial() {
        for &(n, p) in &[(10u64, 0.3), (20, 0.7), (5, 0.01), (1000, 0.5), (1, 0.99)] {
            let k: Vec<u64> = (0..=n).collect();
            let out = binomial_pmf(&k, n, p, None, None).unwrap();
            assert_close(sum(&out), 1.0, 1e-9);
        }
    }

    #[test]
    fn sum_to_one_poisson() {
        for &lambda in &[0.5, 4.0, 25.0, 150.0] {
            let k: Vec<u64> = (0..1000).collect();
            let out = poisson_pmf(&k, lambda, None, None).unwrap();
            assert_close(sum(&out), 1.0, 1e-9);
        }
    }

    #[test]
    fn sum_to_one_geometric() {
        for &p in &[0.05, 0.3, 0.9] {
            let k: Vec<u64> = (1..2000).collect();
            let out = geometric_pmf(&k, p, None, None).unwrap();
            assert_close(sum(&out), 1.0, 1e-9);
        }
    }

    #[test]
    fn sum_to_one_hypergeometric() {
        for &(pop, succ, draws) in &[(8u64, 4u64, 4u64), (20, 7, 12), (100, 30, 50), (500, 250, 10)] {
            let (lo, hi) = hypergeometric_support(pop, succ, draws);
            let k: Vec<u64> = (lo..=hi).collect();
            let out = hypergeometric_pmf(&k, pop, succ, draws, None, None).unwrap();
            assert_close(sum(&out), 1.0, 1e-9);
        }
    }
}
