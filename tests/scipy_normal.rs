// Reference values for the Normal distribution, computed at 40 significant
// digits with mpmath using the `scipy.stats.norm` parametrisation.
//
// Each test compares our kernel outputs against the reference with a
// per-test tolerance. NaN/Inf equality is handled by util::assert_slice_close.

mod util;

mod scipy_normal_tests {
    use super::util::assert_slice_close;
    use minarrow::vec64;
    use stat_kernels::kernels::scientific::distributions::univariate::normal::{
        normal_cdf, normal_pdf, normal_quantile,
    };

    #[test]
    fn normal_pdf_standard() {
        let x = vec64![-3.0, -1.0, 0.0, 1.0, 3.0];
        let expect = vec64![0.0044318484119380075, 0.24197072451914334, 0.3989422804014327, 0.24197072451914334, 0.0044318484119380075];
        let got = normal_pdf(&x, 0.0, 1.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-15);
    }

    #[test]
    fn normal_pdf_shifted_scaled() {
        let x = vec64![0.5, 1.5, 2.0, 2.5, 4.0];
        let expect = vec64![0.008863696823876015, 0.4839414490382867, 0.7978845608028654, 0.4839414490382867, 0.0002676604515297707];
        let got = normal_pdf(&x, 2.0, 0.5, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn normal_cdf_standard() {
        let x = vec64![-3.0, -1.5, 0.0, 1.5, 3.0];
        let expect = vec64![0.0013498980316300946, 0.06680720126885807, 0.5, 0.9331927987311419, 0.9986501019683699];
        let got = normal_cdf(&x, 0.0, 1.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn normal_cdf_shifted() {
        let x = vec64![4.0, 8.0, 10.0, 13.0, 20.0];
        let expect = vec64![0.0013498980316300946, 0.15865525393145705, 0.5, 0.9331927987311419, 0.9999997133484281];
        let got = normal_cdf(&x, 10.0, 2.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn normal_cdf_deep_tail() {
        let x = vec64![-12.0, -8.5];
        let expect = vec64![1.776482112077679e-33, 9.479534822203318e-18];
        let got = normal_cdf(&x, 0.0, 1.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn normal_quantile_standard() {
        let x = vec64![0.001, 0.025, 0.3, 0.5, 0.975, 0.999];
        let expect = vec64![-3.0902323061678136, -1.9599639845400543, -0.5244005127080408, 0.0, 1.9599639845400538, 3.090232306167813];
        let got = normal_quantile(&x, 0.0, 1.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-12);
    }

    #[test]
    fn normal_quantile_shifted() {
        let x = vec64![0.0, 0.1, 0.9, 1.0];
        let expect = vec64![f64::NEG_INFINITY, 80.77672651683099, 119.22327348316901, f64::INFINITY];
        let got = normal_quantile(&x, 100.0, 15.0, None, None).unwrap();
        assert_slice_close(&got, &expect, 1e-12);
    }

    #[test]
    fn normal_rejects_bad_std() {
        let x = vec64![0.0];
        assert!(normal_pdf(&x, 0.0, 0.0, None, None).is_err());
        assert!(normal_cdf(&x, 0.0, -1.0, None, None).is_err());
        assert!(normal_quantile(&x, f64::NAN, 1.0, None, None).is_err());
    }
}
