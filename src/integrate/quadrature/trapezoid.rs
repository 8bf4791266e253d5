//! Trapezoidal rule for numerical integration.
//!
//! The trapezoidal rule approximates the integral by summing trapezoid areas.
//! It has O(h²) accuracy for smooth functions.

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis, Slice};

use super::samples::{Spacing, abscissa_like, diff_along, require_samples, resolve_axis};
use crate::integrate::error::IntegrateResult;

/// Integrate using the composite trapezoidal rule.
///
/// Integrates the samples `y` along `axis` (negative values count from the
/// last axis). The positions of the samples are given by `spacing`: either a
/// uniform step `dx` or an array of positions, rank 1 or the same rank as `y`.
///
/// # Returns
///
/// An array with the integration axis removed; for 1-d input this is a 0-d
/// array, see [`ndarray::Array0::into_scalar`].
///
/// # Errors
///
/// Returns an error if:
/// - `axis` is out of range
/// - there are fewer than 2 samples along `axis`
/// - the sample positions do not match `y`
///
/// # Example
///
/// ```
/// use ndarray::Array1;
/// use solvr_quad::integrate::trapz;
///
/// // Integrate y = x^2 from 0 to 1 using 101 points
/// let x = Array1::<f64>::linspace(0.0, 1.0, 101);
/// let y = x.mapv(|xi: f64| xi * xi);
///
/// let result = trapz(&y, &x, -1).unwrap().into_scalar();
/// assert!((result - 1.0 / 3.0).abs() < 1e-3);
/// ```
pub fn trapz<'a, S, D>(
    y: &ArrayBase<S, D>,
    spacing: impl Into<Spacing<'a>>,
    axis: isize,
) -> IntegrateResult<Array<f64, D::Smaller>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let (terms, axis) = trapezoid_terms(y, spacing.into(), axis, "trapz")?;
    Ok(terms.sum_axis(axis))
}

/// Cumulatively integrate using the composite trapezoidal rule.
///
/// Element `i` along `axis` of the output is the integral from the first
/// sample to sample `i + 1`, so the output is one element shorter than `y`
/// along the integration axis. No leading zero is included.
///
/// # Errors
///
/// Same conditions as [`trapz`].
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use solvr_quad::integrate::cumtrapz;
///
/// // Cumulative integral of y = 2x (antiderivative is x^2)
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let y = array![0.0, 2.0, 4.0, 6.0];
///
/// let result = cumtrapz(&y, &x, -1).unwrap();
/// assert_eq!(result, array![1.0, 4.0, 9.0]);
/// ```
pub fn cumtrapz<'a, S, D>(
    y: &ArrayBase<S, D>,
    spacing: impl Into<Spacing<'a>>,
    axis: isize,
) -> IntegrateResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let (mut terms, axis) = trapezoid_terms(y, spacing.into(), axis, "cumtrapz")?;
    terms.accumulate_axis_inplace(axis, |&prev, curr| *curr += prev);
    Ok(terms)
}

/// Per-interval trapezoid areas `d_i * (y_i + y_{i+1}) / 2` along the axis.
fn trapezoid_terms<S, D>(
    y: &ArrayBase<S, D>,
    spacing: Spacing<'_>,
    axis: isize,
    context: &str,
) -> IntegrateResult<(Array<f64, D>, Axis)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let axis = resolve_axis(axis, y.ndim(), context)?;
    let n = y.len_of(axis);
    require_samples(n, 2, context)?;

    let mut terms = y.slice_axis(axis, Slice::from(1..n)).to_owned();
    terms += &y.slice_axis(axis, Slice::from(0..n - 1));
    terms *= 0.5;

    match spacing {
        Spacing::Uniform(dx) => terms *= dx,
        Spacing::Points(x) => {
            let x = abscissa_like(&x, &y.raw_dim(), axis, context)?;
            terms *= &diff_along(&x, axis);
        }
    }

    Ok((terms, axis))
}
