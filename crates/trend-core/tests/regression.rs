// File: crates/trend-core/tests/regression.rs
// Purpose: Least-squares fits for every regression family, fixed intercepts and failure modes.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{DMatrix, DVector};
use trend_core::{
    fit_regression, linearize, solve_least_squares, Coordinate, EngineError, RegressionModel, Series,
};

fn series(f: impl Fn(f64) -> f64, xs: &[f64]) -> Series {
    Series::try_new(xs.to_vec(), xs.iter().map(|&x| f(x)).collect()).unwrap()
}

#[test]
fn linear_exact_fit() {
    let s = series(|x| 2.0 * x + 1.0, &[0.0, 1.0, 2.0, 3.0]);
    let r = fit_regression(&s, RegressionModel::Polynomial { degree: 1 }, None).unwrap();
    assert_abs_diff_eq!(r.coefficients().b(1), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.coefficients().b(2), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.r2().unwrap(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.sigma2(), 0.0, epsilon = 1e-12);
    assert_eq!(r.degrees_of_freedom(), 2);
    assert!(!r.intercept_fixed());
}

#[test]
fn quadratic_exact_fit() {
    let s = series(|x| x * x - x + 0.5, &[0.0, 1.0, 2.0, 3.0, 4.0]);
    let r = fit_regression(&s, RegressionModel::Polynomial { degree: 2 }, None).unwrap();
    let b = r.coefficients();
    assert_eq!(b.len(), 3);
    assert_abs_diff_eq!(b.b(1), 0.5, epsilon = 1e-8);
    assert_abs_diff_eq!(b.b(2), -1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(b.b(3), 1.0, epsilon = 1e-8);
    // out of range coefficients read as zero
    assert_eq!(b.b(4), 0.0);
}

#[test]
fn exponential_fit_in_log_space() {
    let s = series(|x| 3.0 * x.exp(), &[0.0, 1.0, 2.0, 3.0]);
    let r = fit_regression(&s, RegressionModel::Exponential, None).unwrap();
    assert_abs_diff_eq!(r.coefficients().b(1), 3.0f64.ln(), epsilon = 1e-9);
    assert_abs_diff_eq!(r.coefficients().b(2), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.r2().unwrap(), 1.0, epsilon = 1e-9);
}

#[test]
fn logarithmic_and_power_fits() {
    let xs = [1.0, 2.0, 3.0, 4.0];
    let log = fit_regression(&series(|x| 3.0 * x.ln() + 1.0, &xs), RegressionModel::Logarithmic, None).unwrap();
    assert_abs_diff_eq!(log.coefficients().b(1), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(log.coefficients().b(2), 3.0, epsilon = 1e-9);

    let pow = fit_regression(&series(|x| 2.0 * x.powf(1.5), &xs), RegressionModel::Power, None).unwrap();
    assert_abs_diff_eq!(pow.coefficients().b(1), 2.0f64.ln(), epsilon = 1e-9);
    assert_abs_diff_eq!(pow.coefficients().b(2), 1.5, epsilon = 1e-9);
}

#[test]
fn fixed_intercept_is_kept_exactly() {
    let s = Series::try_new(vec![1.0, 2.0, 3.0], vec![3.0, 5.0, 7.5]).unwrap();
    let r = fit_regression(&s, RegressionModel::Polynomial { degree: 1 }, Some(1.0)).unwrap();
    assert!(r.intercept_fixed());
    assert_eq!(r.coefficients().b(1), 1.0);
    // slope = Σx(y - 1) / Σx² = (2 + 8 + 19.5) / 14
    assert_abs_diff_eq!(r.coefficients().b(2), 29.5 / 14.0, epsilon = 1e-12);
    assert_eq!(r.degrees_of_freedom(), 2);
}

#[test]
fn pinned_intercept_counts_as_one_parameter() {
    let s = Series::try_new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![2.0, 5.0, 9.0, 18.0, 26.0]).unwrap();
    let r = fit_regression(&s, RegressionModel::Polynomial { degree: 2 }, Some(1.0)).unwrap();
    assert_eq!(r.coefficients().len(), 3);
    assert_eq!(r.degrees_of_freedom(), 4);
    let ss_res = r.statistics().ss_res;
    assert!(ss_res > 0.0);
    assert_relative_eq!(r.sigma2(), ss_res / 4.0);
}

#[test]
fn pinned_intercept_on_curved_models() {
    let exp = Series::try_new(vec![0.0, 1.0, 2.0], vec![2.0, 5.0, 13.0]).unwrap();
    let r = fit_regression(&exp, RegressionModel::Exponential, Some(2.0f64.ln())).unwrap();
    assert!(r.intercept_fixed());
    assert_eq!(r.coefficients().b(1), 2.0f64.ln());
    assert_eq!(r.degrees_of_freedom(), 2);

    let pow = Series::try_new(vec![1.0, 2.0, 3.0], vec![2.0, 5.0, 9.0]).unwrap();
    let r = fit_regression(&pow, RegressionModel::Power, Some(0.5)).unwrap();
    assert_eq!(r.coefficients().b(1), 0.5);
    assert_eq!(r.coefficients().len(), 2);
}

#[test]
fn constant_target_with_pinned_intercept_has_undefined_r2() {
    let s = Series::try_new(vec![1.0, 2.0, 3.0], vec![2.0, 2.0, 2.0]).unwrap();
    let r = fit_regression(&s, RegressionModel::Polynomial { degree: 1 }, Some(0.0)).unwrap();
    assert!(r.statistics().r2.is_none());
    assert!(matches!(r.r2(), Err(EngineError::DegenerateVariance { .. })));
}

#[test]
fn refitting_is_deterministic() {
    let s = Series::try_new(vec![1.0, 2.0, 4.0, 7.0, 9.0], vec![1.2, 1.9, 4.4, 6.8, 9.3]).unwrap();
    let model = RegressionModel::Polynomial { degree: 2 };
    let a = fit_regression(&s, model, None).unwrap();
    let b = fit_regression(&s, model, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn too_few_samples() {
    let s = Series::try_new(vec![1.0, 2.0], vec![1.0, 4.0]).unwrap();
    let err = fit_regression(&s, RegressionModel::Polynomial { degree: 2 }, None).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { samples: 2, parameters: 3 }));
    assert!(err.is_skippable());
}

#[test]
fn huge_degree_is_rejected_before_allocating() {
    let s = Series::try_new(vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 9.0]).unwrap();
    let err = fit_regression(&s, RegressionModel::Polynomial { degree: usize::MAX }, None).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { samples: 3, parameters: usize::MAX }));

    let err = fit_regression(&s, RegressionModel::Polynomial { degree: 50_000_000 }, Some(0.0)).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { samples: 3, parameters: 50_000_000 }));
}

#[test]
fn repeated_x_values_are_singular() {
    let s = Series::try_new(vec![1.0, 1.0, 2.0, 2.0], vec![1.0, 1.5, 2.0, 2.5]).unwrap();
    let err = fit_regression(&s, RegressionModel::Polynomial { degree: 2 }, None).unwrap_err();
    assert!(matches!(err, EngineError::SingularSystem { .. }), "got {err}");
}

#[test]
fn identical_columns_are_singular() {
    let design = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let target = DVector::from_vec(vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        solve_least_squares(&design, &target),
        Err(EngineError::SingularSystem { .. })
    ));
}

#[test]
fn domain_violations_name_the_sample() {
    let s = Series::try_new(vec![1.0, 0.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
    let err = linearize(&s, RegressionModel::Logarithmic, None).unwrap_err();
    match err {
        EngineError::ModelDomain { index, coordinate, value, .. } => {
            assert_eq!(index, 1);
            assert_eq!(coordinate, Coordinate::X);
            assert_eq!(value, 0.0);
        }
        other => panic!("unexpected error: {other}"),
    }

    let s = Series::try_new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, -3.0]).unwrap();
    let err = fit_regression(&s, RegressionModel::Exponential, None).unwrap_err();
    assert!(matches!(err, EngineError::ModelDomain { index: 2, coordinate: Coordinate::Y, .. }));
}

#[test]
fn logarithmic_rejects_fixed_intercept() {
    let s = series(|x| x.ln(), &[1.0, 2.0, 3.0]);
    let err = fit_regression(&s, RegressionModel::Logarithmic, Some(1.0)).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(!err.is_skippable());
}

#[test]
fn series_rejects_mismatched_columns() {
    assert!(matches!(Series::try_new(vec![1.0, 2.0], vec![1.0]), Err(EngineError::Validation(_))));
    assert!(Series::try_new(vec![], vec![]).is_err());
    assert!(Series::try_new(vec![f64::NAN], vec![1.0]).is_err());
}
