// Reference values for the Poisson distribution, computed at 40 significant
// digits with mpmath using the `scipy.stats.poisson` parametrisation.
//
// Each test compares our kernel outputs against the reference with a
// per-test tolerance. NaN/Inf equality is handled by util::assert_slice_close.

mod util;

mod scipy_poisson_tests {
    use super::util::assert_slice_close;
    use minarrow::vec64;
    use stat_kernels::kernels::scientific::distributions::univariate::poisson::{
        poisson_cdf, poisson_pmf, poisson_quantile,
    };

    #[test]
    fn poisson_pmf_lambda3() {
        let x = vec64![0u64, 1u64, 2u64, 5u64, 10u64];
        let expect = vec64![0.049787068367863944, 0.14936120510359183, 0.22404180765538775, 0.10081881344492448, 0.0008101511794681432];
        let got = poisson_pmf(&x, 3.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn poisson_cdf_lambda3() {
        let x = vec64![0u64, 1u64, 2u64, 5u64, 10u64];
        let expect = vec64![0.049787068367863944, 0.19914827347145578, 0.42319008112684353, 0.9160820579686966, 0.9997076630493527];
        let got = poisson_cdf(&x, 3.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn poisson_cdf_lambda12() {
        let x = vec64![0u64, 5u64, 12u64, 20u64, 30u64];
        let expect = vec64![6.14421235332821e-06, 0.02034102941692837, 0.5759652485730647, 0.9884022627851925, 0.9999966283522659];
        let got = poisson_cdf(&x, 12.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-13);
    }

    #[test]
    fn poisson_quantile_lambda4() {
        let x = vec64![0.05, 0.3, 0.5, 0.9, 0.99];
        let expect = vec64![1.0, 3.0, 4.0, 7.0, 9.0];
        let got = poisson_quantile(&x, 4.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 0.0);
    }
}
