// Worked values from standard statistical tables.

mod util;

mod scenario_tests {
    use super::util::assert_close;

    use stat_kernels::kernels::scientific::distributions::univariate::binomial::binomial_pmf_scalar;
    use stat_kernels::kernels::scientific::distributions::univariate::chi_squared::{
        chi_square_cdf_scalar, chi_square_pdf_scalar,
    };
    use stat_kernels::kernels::scientific::distributions::univariate::fisher_f::fisher_f_quantile_scalar;
    use stat_kernels::kernels::scientific::distributions::univariate::hypergeometric::hypergeometric_pmf_scalar;
    use stat_kernels::kernels::scientific::distributions::univariate::normal::std_normal_quantile;
    use stat_kernels::kernels::scientific::distributions::univariate::student_t::student_t_quantile_scalar;

    #[test]
    fn chi_square_df5() {
        // χ²(5): density 0.0807 at x = 1, 0.1220 at x = 5
        assert_close(chi_square_pdf_scalar(1.0, 5.0), 0.08065690817304778, 1e-14);
        assert_close(chi_square_pdf_scalar(5.0, 5.0), 0.1220415213493874, 1e-14);
        assert_close(chi_square_cdf_scalar(5.0, 5.0), 0.5841198130044921, 1e-13);
    }

    #[test]
    fn t_table_critical_value() {
        assert_close(student_t_quantile_scalar(0.975, 10.0), 2.2281388519862744, 1e-8);
    }

    #[test]
    fn f_table_critical_value() {
        assert_close(fisher_f_quantile_scalar(0.95, 5.0, 10.0), 3.325834530413011, 1e-7);
    }

    #[test]
    fn binomial_fair_coin() {
        assert_close(binomial_pmf_scalar(10.0, 20, 0.5), 0.17619705200195312, 1e-15);
    }

    #[test]
    fn z_critical_value() {
        assert_close(std_normal_quantile(0.975), 1.9599639845400538, 1e-14);
    }

    #[test]
    fn lady_tasting_tea() {
        assert_close(hypergeometric_pmf_scalar(4.0, 8, 4, 4), 1.0 / 70.0, 1e-15);
    }
}
