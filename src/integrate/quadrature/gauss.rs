//! Gaussian quadrature methods.
//!
//! Gauss-Legendre quadrature is optimal for integrating polynomials.
//! An n-point rule exactly integrates polynomials of degree 2n-1.

use ndarray::Array1;

use super::vectorize::{Integrand, IntegrandValue, weighted_sum};
use crate::integrate::error::{IntegrateError, IntegrateResult, check_finite_limits};

/// Nodes and weights of the `n`-point Gauss-Legendre rule on `[-1, 1]`.
///
/// Nodes are the roots of the Legendre polynomial `P_n`, found by Newton's
/// method from Chebyshev initial guesses, and are returned in ascending
/// order. The weights sum to 2.
///
/// # Errors
///
/// Returns an error if `n` is zero.
///
/// # Example
///
/// ```
/// use solvr_quad::integrate::gauss_legendre_nodes;
///
/// let (nodes, weights) = gauss_legendre_nodes(2).unwrap();
/// assert!((nodes[1] - 1.0 / 3f64.sqrt()).abs() < 1e-15);
/// assert!((weights.sum() - 2.0).abs() < 1e-14);
/// ```
pub fn gauss_legendre_nodes(n: usize) -> IntegrateResult<(Array1<f64>, Array1<f64>)> {
    if n == 0 {
        return Err(IntegrateError::invalid_parameter(
            "n",
            "need at least 1 quadrature point",
        ));
    }

    let eps = 1e-15;
    let max_iter = 100;

    let mut nodes = Array1::zeros(n);
    let mut weights = Array1::zeros(n);

    // Roots are symmetric about 0; find the non-negative half, largest first.
    for i in 0..n.div_ceil(2) {
        let mut x = ((4 * i + 3) as f64 / (4 * n + 2) as f64 * std::f64::consts::PI).cos();

        for _ in 0..max_iter {
            let (p, dp) = legendre_eval(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < eps {
                break;
            }
        }

        let (_, dp) = legendre_eval(n, x);
        let w = 2.0 / ((1.0 - x * x) * dp * dp);

        let mirror = n - 1 - i;
        if i == mirror {
            nodes[i] = 0.0;
        } else {
            nodes[i] = -x;
            nodes[mirror] = x;
        }
        weights[i] = w;
        weights[mirror] = w;
    }

    Ok((nodes, weights))
}

/// Evaluate Legendre polynomial P_n(x) and its derivative P_n'(x).
///
/// Uses the three-term recurrence relation for Legendre polynomials.
fn legendre_eval(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0; // P_0(x)
    let mut p_curr = x; // P_1(x)
    let mut dp_prev = 0.0;
    let mut dp_curr = 1.0;

    for k in 1..n {
        let k = k as f64;
        let p_next = ((2.0 * k + 1.0) * x * p_curr - k * p_prev) / (k + 1.0);
        let dp_next = ((2.0 * k + 1.0) * (p_curr + x * dp_curr) - k * dp_prev) / (k + 1.0);

        p_prev = p_curr;
        p_curr = p_next;
        dp_prev = dp_curr;
        dp_curr = dp_next;
    }

    (p_curr, dp_curr)
}

/// Fixed-order Gaussian quadrature.
///
/// Integrates `f` from `a` to `b` with the `n`-point Gauss-Legendre rule,
/// evaluating the integrand once on all `n` mapped nodes. The rule is exact
/// for polynomials of degree `2n - 1`. `b < a` is allowed and flips the sign.
///
/// No error estimate is produced at a fixed order; see
/// [`quadrature`](super::quadrature) for the adaptive variant.
///
/// # Errors
///
/// Returns an error if either bound is not finite, or if `n` is zero.
///
/// # Example
///
/// ```
/// use solvr_quad::integrate::fixed_quad;
///
/// // Integrate x^4 from 0 to 1 (exact = 0.2)
/// let result = fixed_quad(|x: f64| x.powi(4), 0.0, 1.0, 5).unwrap();
/// // 5-point rule is exact for degree <= 9
/// assert!((result - 0.2).abs() < 1e-14);
/// ```
pub fn fixed_quad<T, F>(f: F, a: f64, b: f64, n: usize) -> IntegrateResult<T>
where
    F: Integrand<T>,
    T: IntegrandValue,
{
    gauss_estimate(&f, a, b, n, "fixed_quad")
}

/// One Gauss-Legendre estimate of order `n`.
pub(crate) fn gauss_estimate<T, F>(
    f: &F,
    a: f64,
    b: f64,
    n: usize,
    context: &str,
) -> IntegrateResult<T>
where
    F: Integrand<T> + ?Sized,
    T: IntegrandValue,
{
    check_finite_limits(a, b, context)?;
    let (nodes, weights) = gauss_legendre_nodes(n)?;

    let half_width = (b - a) / 2.0;
    let points = nodes.mapv(|x| half_width * (x + 1.0) + a);
    let values = f.eval_points(points.view());
    if values.len() != n {
        return Err(IntegrateError::invalid_input(format!(
            "{context}: integrand returned {} values for {} points",
            values.len(),
            n
        )));
    }

    Ok(weighted_sum(&weights, &values) * half_width)
}
