//! Cross-module properties of the quadrature routines.

use approx::assert_abs_diff_eq;
use ndarray::{Array1, Array2, Axis, array};
use solvr_quad::integrate::{
    EvenPolicy, QuadOptions, RombergOptions, Vectorized, cumtrapz, fixed_quad, newton_cotes,
    quadrature, romb, romberg, simps, trapz,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cubic(x: f64) -> f64 {
    x.powi(3) - 2.0 * x * x + 3.0
}

// Antiderivative of `cubic` over [0, 2]
const CUBIC_INTEGRAL: f64 = 4.0 - 16.0 / 3.0 + 6.0;

#[test]
fn cubics_are_integrated_exactly() {
    init_logger();

    let x = Array1::<f64>::linspace(0.0, 2.0, 9);
    let y = x.mapv(cubic);

    let by_romb = romb(&y, 0.25, -1, false).unwrap().into_scalar();
    assert_abs_diff_eq!(by_romb, CUBIC_INTEGRAL, epsilon = 1e-12);

    let by_simps = simps(&y, &x, -1, EvenPolicy::Avg).unwrap().into_scalar();
    assert_abs_diff_eq!(by_simps, CUBIC_INTEGRAL, epsilon = 1e-12);

    let by_simps_dx = simps(&y, 0.25, -1, EvenPolicy::Avg).unwrap().into_scalar();
    assert_abs_diff_eq!(by_simps_dx, CUBIC_INTEGRAL, epsilon = 1e-12);

    for n in 2..6 {
        let by_gauss = fixed_quad(cubic, 0.0, 2.0, n).unwrap();
        assert_abs_diff_eq!(by_gauss, CUBIC_INTEGRAL, epsilon = 1e-12);
    }
}

#[test]
fn cumulative_trapezoid_ends_at_trapezoid() {
    let x = Array1::<f64>::linspace(0.0, 3.0, 13);
    let y = x.mapv(|v: f64| v.sin() + 0.5 * v);

    let total = trapz(&y, 0.25, -1).unwrap().into_scalar();
    let running = cumtrapz(&y, 0.25, -1).unwrap();
    assert_eq!(running.len(), 12);
    assert_abs_diff_eq!(running[11], total, epsilon = 1e-12);

    // Same along the first axis of a 2-d array
    let grid = Array2::from_shape_fn((5, 3), |(i, j)| (i * i + j) as f64);
    let total = trapz(&grid, 0.5, 0).unwrap();
    let running = cumtrapz(&grid, 0.5, 0).unwrap();
    let last = running.index_axis(Axis(0), 3);
    for j in 0..3 {
        assert_abs_diff_eq!(last[j], total[j], epsilon = 1e-12);
    }
}

#[test]
fn romb_rejects_six_samples() {
    let y = Array1::<f64>::ones(6);
    let err = romb(&y, 1.0, -1, false).unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn simps_average_is_mean_of_first_and_last() {
    let x = array![0.0, 0.3, 0.9, 1.4, 2.2, 3.0];
    let y = x.mapv(|v: f64| (v * 1.3).exp());

    let avg = simps(&y, &x, -1, EvenPolicy::Avg).unwrap().into_scalar();
    let first = simps(&y, &x, -1, EvenPolicy::First).unwrap().into_scalar();
    let last = simps(&y, &x, -1, EvenPolicy::Last).unwrap().into_scalar();
    assert_abs_diff_eq!(avg, 0.5 * (first + last), epsilon = 1e-12);
}

#[test]
fn newton_cotes_trapezoid_rule() {
    let rule = newton_cotes(1, false).unwrap();
    assert_eq!(rule.weights, array![0.5, 0.5]);
    assert_abs_diff_eq!(rule.error_coefficient, -1.0 / 12.0, epsilon = 1e-16);
}

#[test]
fn gaussian_rules_on_a_parabola() {
    let result = quadrature(|x: f64| x * x, 0.0, 1.0, &QuadOptions::default()).unwrap();
    assert!(result.converged);
    assert_abs_diff_eq!(result.integral, 1.0 / 3.0, epsilon = 1e-14);

    let fixed = fixed_quad(|x: f64| x * x, 0.0, 1.0, 2).unwrap();
    assert_abs_diff_eq!(fixed, 1.0 / 3.0, epsilon = 1e-15);
}

#[test]
fn romberg_constant_needs_one_refinement() {
    let result = romberg(|_x: f64| 1.0, 0.0, 1.0, &RombergOptions::default()).unwrap();
    assert_eq!(result.integral, 1.0);
    assert_eq!(result.error, 0.0);
    assert_eq!(result.table.levels(), 2);
}

#[test]
fn infinite_bounds_are_domain_errors() {
    init_logger();
    let f = |x: f64| (-x * x).exp();

    assert!(fixed_quad(f, 0.0, f64::INFINITY, 5).unwrap_err().is_domain_error());
    assert!(
        quadrature(f, f64::NEG_INFINITY, 0.0, &QuadOptions::default())
            .unwrap_err()
            .is_domain_error()
    );
    assert!(
        romberg(f, 0.0, f64::INFINITY, &RombergOptions::default())
            .unwrap_err()
            .is_domain_error()
    );
}

#[test]
fn batch_and_pointwise_integrands_agree() {
    let pointwise = |x: f64| x.cos() * x;
    let batch = Vectorized::new(|x: ndarray::ArrayView1<'_, f64>| x.mapv(|v| v.cos() * v));

    let a = quadrature(pointwise, 0.0, 2.0, &QuadOptions::default()).unwrap();
    let b: solvr_quad::integrate::QuadResult<f64> =
        quadrature(batch, 0.0, 2.0, &QuadOptions::default()).unwrap();
    assert_eq!(a.integral, b.integral);
    assert_eq!(a.neval, b.neval);

    let c = romberg(pointwise, 0.0, 2.0, &RombergOptions::default()).unwrap();
    // cos(2) + 2 sin(2) - 1
    let exact = 2f64.cos() + 2.0 * 2f64.sin() - 1.0;
    assert_abs_diff_eq!(c.integral, exact, epsilon = 1e-8);
    assert_abs_diff_eq!(a.integral, exact, epsilon = 1e-10);
}
