//! Adaptive Gaussian quadrature.
//!
//! Raises the order of the Gauss-Legendre rule until two successive
//! estimates agree to the requested tolerance.

use super::gauss::gauss_estimate;
use super::vectorize::{Integrand, IntegrandValue};
use crate::integrate::error::{IntegrateError, IntegrateResult, check_finite_limits};

/// Options for adaptive Gaussian quadrature.
#[derive(Debug, Clone)]
pub struct QuadOptions {
    /// Absolute tolerance on the difference of successive estimates (default: 1.49e-8)
    pub tol: f64,
    /// Relative tolerance on the difference of successive estimates (default: 1.49e-8)
    pub rtol: f64,
    /// Highest Gauss-Legendre order to try (default: 50)
    pub maxiter: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            tol: 1.49e-8,
            rtol: 1.49e-8,
            maxiter: 50,
        }
    }
}

/// Result of adaptive quadrature.
#[derive(Debug, Clone)]
pub struct QuadResult<T> {
    /// Computed integral value
    pub integral: T,
    /// Difference between the last two estimates
    pub error: f64,
    /// Number of function evaluations
    pub neval: usize,
    /// Whether the tolerance was met before `maxiter`
    pub converged: bool,
}

/// Adaptive Gaussian quadrature.
///
/// Integrates `f` from `a` to `b` with Gauss-Legendre rules of order
/// `1, 2, ..., maxiter`. Iteration stops as soon as the difference `err`
/// between two successive estimates satisfies `err < tol` or
/// `err < rtol * |estimate|`.
///
/// Running out of iterations is not an error: a warning is logged and the
/// latest estimate is returned with `converged` set to `false`.
///
/// # Errors
///
/// Returns an error if either bound is not finite, or if `maxiter` is zero.
///
/// # Example
///
/// ```
/// use solvr_quad::integrate::{QuadOptions, quadrature};
///
/// // Integrate sin(x) from 0 to pi
/// let result = quadrature(|x: f64| x.sin(), 0.0, std::f64::consts::PI, &QuadOptions::default()).unwrap();
/// assert!((result.integral - 2.0).abs() < 1e-10);
/// assert!(result.converged);
/// ```
pub fn quadrature<T, F>(
    f: F,
    a: f64,
    b: f64,
    options: &QuadOptions,
) -> IntegrateResult<QuadResult<T>>
where
    F: Integrand<T>,
    T: IntegrandValue,
{
    check_finite_limits(a, b, "quadrature")?;

    if options.maxiter == 0 {
        return Err(IntegrateError::invalid_parameter(
            "maxiter",
            "must be at least 1",
        ));
    }

    let mut previous: Option<T> = None;
    let mut integral = T::zero();
    let mut error = f64::INFINITY;
    let mut neval = 0;

    for n in 1..=options.maxiter {
        integral = gauss_estimate(&f, a, b, n, "quadrature")?;
        neval += n;
        error = previous.map_or(f64::INFINITY, |prev| (integral - prev).magnitude());
        previous = Some(integral);

        log::debug!("quadrature: order {n}, estimate {integral}, difference {error:e}");

        if error < options.tol || error < options.rtol * integral.magnitude() {
            return Ok(QuadResult {
                integral,
                error,
                neval,
                converged: true,
            });
        }
    }

    log::warn!(
        "quadrature: maxiter ({}) exceeded. Latest difference = {:e}",
        options.maxiter,
        error
    );

    Ok(QuadResult {
        integral,
        error,
        neval,
        converged: false,
    })
}
