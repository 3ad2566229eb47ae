// Reference values for the Uniform distribution, computed at 40 significant
// digits with mpmath using the `scipy.stats.uniform` parametrisation.
//
// Each test compares our kernel outputs against the reference with a
// per-test tolerance. NaN/Inf equality is handled by util::assert_slice_close.

mod util;

mod scipy_uniform_tests {
    use super::util::assert_slice_close;
    use minarrow::vec64;
    use stat_kernels::kernels::scientific::distributions::univariate::uniform::{
        uniform_cdf, uniform_pdf, uniform_quantile,
    };

    #[test]
    fn uniform_pdf_interval() {
        let x = vec64![-1.0, 0.0, 0.5, 2.0, 3.0];
        let expect = vec64![0.0, 0.5, 0.5, 0.5, 0.0];
        let got = uniform_pdf(&x, 0.0, 2.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-15);
    }

    #[test]
    fn uniform_cdf_interval() {
        let x = vec64![-1.0, 0.0, 0.5, 1.5, 2.0, 3.0];
        let expect = vec64![0.0, 0.0, 0.25, 0.75, 1.0, 1.0];
        let got = uniform_cdf(&x, 0.0, 2.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-15);
    }

    #[test]
    fn uniform_quantile_shifted() {
        let x = vec64![0.0, 0.25, 0.5, 1.0];
        let expect = vec64![-3.0, -1.5, 0.0, 3.0];
        let got = uniform_quantile(&x, -3.0, 3.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-15);
    }

    #[test]
    fn uniform_rejects_empty_interval() {
        let x = vec64![0.5];
        assert!(uniform_pdf(&x, 1.0, 1.0, None, None).is_err());
        assert!(uniform_cdf(&x, 2.0, 1.0, None, None).is_err());
    }
}
