// Shared tolerance checks for the integration suites.
//
// Tolerances are relative for |expected| > 1 and absolute below that.
// NaN matches NaN and infinities must match in sign.

#![allow(unused)]

fn check(got: f64, expect: f64, tol: f64) -> Result<(), String> {
    if expect.is_nan() {
        return if got.is_nan() {
            Ok(())
        } else {
            Err(format!("expected NaN, got {got}"))
        };
    }
    if expect.is_infinite() {
        return if got.is_infinite() && got.is_sign_positive() == expect.is_sign_positive() {
            Ok(())
        } else {
            Err(format!("expected {expect}, got {got}"))
        };
    }
    let scale = 1.0_f64.max(expect.abs());
    if (got - expect).abs() <= tol * scale {
        Ok(())
    } else {
        Err(format!("got {got}, expect {expect} (tol={tol})"))
    }
}

pub fn assert_close(got: f64, expect: f64, tol: f64) {
    if let Err(msg) = check(got, expect, tol) {
        panic!("mismatch: {msg}");
    }
}

pub fn assert_slice_close(got: &[f64], expect: &[f64], tol: f64) {
    assert_eq!(got.len(), expect.len(), "len mismatch");
    for (i, (&g, &e)) in got.iter().zip(expect.iter()).enumerate() {
        if let Err(msg) = check(g, e, tol) {
            panic!("idx {i}: {msg}");
        }
    }
}

/// Routes `log` output from the solvers to the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
