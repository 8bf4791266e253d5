//! Simpson's rule for numerical integration.
//!
//! Simpson's rule uses parabolic approximation between sample points,
//! achieving O(h⁴) accuracy for smooth functions.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, ArrayView, Axis, Data, Dimension, RemoveAxis, Slice, Zip};

use super::samples::{Spacing, abscissa_like, diff_along, require_samples, resolve_axis};
use crate::integrate::error::{IntegrateError, IntegrateResult};

/// How [`simps`] handles an even number of samples.
///
/// With `N` even there are `N - 1` intervals, one more than Simpson's rule
/// can cover. The leftover interval is integrated with the trapezoidal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvenPolicy {
    /// Average the `First` and `Last` results.
    #[default]
    Avg,
    /// Simpson's rule on the first `N - 2` intervals, trapezoid on the last.
    First,
    /// Trapezoid on the first interval, Simpson's rule on the last `N - 2`.
    Last,
}

impl FromStr for EvenPolicy {
    type Err = IntegrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(Self::Avg),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(IntegrateError::invalid_parameter(
                "even",
                format!("must be 'avg', 'last', or 'first' (got '{other}')"),
            )),
        }
    }
}

impl fmt::Display for EvenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Avg => "avg",
            Self::First => "first",
            Self::Last => "last",
        };
        f.write_str(name)
    }
}

/// Interval widths along the integration axis.
enum Widths<D: Dimension> {
    Uniform(f64),
    Varying(Array<f64, D>),
}

/// Integrate using the composite Simpson's rule.
///
/// Integrates the samples `y` along `axis` (negative values count from the
/// last axis). `spacing` is either a uniform step `dx` or the sample
/// positions, rank 1 or the same rank as `y`. For unequally spaced samples
/// the three-point rule is weighted by the ratio of adjacent interval widths.
///
/// With an odd number of samples every interval is covered by Simpson's
/// rule; the result is exact for cubics on equally spaced samples and for
/// quadratics otherwise. With an even number of samples, `even` decides
/// where the leftover trapezoid goes.
///
/// # Errors
///
/// Returns an error if:
/// - `axis` is out of range
/// - there are fewer than 2 samples along `axis`
/// - `x` is neither rank 1 nor the rank of `y`, or its length along `axis`
///   differs from `y`'s
///
/// # Example
///
/// ```
/// use ndarray::Array1;
/// use solvr_quad::integrate::{EvenPolicy, simps};
///
/// // Integrate y = x^3 from 0 to 2 (exact = 4)
/// let x = Array1::<f64>::linspace(0.0, 2.0, 5);
/// let y = x.mapv(|xi: f64| xi.powi(3));
///
/// let result = simps(&y, 0.5, -1, EvenPolicy::Avg).unwrap().into_scalar();
/// assert!((result - 4.0).abs() < 1e-12);
/// ```
pub fn simps<'a, S, D>(
    y: &ArrayBase<S, D>,
    spacing: impl Into<Spacing<'a>>,
    axis: isize,
    even: EvenPolicy,
) -> IntegrateResult<Array<f64, D::Smaller>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let context = "simps";
    let axis = resolve_axis(axis, y.ndim(), context)?;
    let n = y.len_of(axis);
    require_samples(n, 2, context)?;

    let widths = match spacing.into() {
        Spacing::Uniform(dx) => Widths::Uniform(dx),
        Spacing::Points(x) => {
            let x = abscissa_like(&x, &y.raw_dim(), axis, context)?;
            Widths::Varying(diff_along(&x, axis))
        }
    };

    if n % 2 == 1 {
        return Ok(basic_simps(y, &widths, axis, 0, (n - 1) / 2));
    }

    let panels = (n - 2) / 2;
    let first = || {
        let mut result = basic_simps(y, &widths, axis, 0, panels);
        result += &edge_trapezoid(y, &widths, axis, n - 2);
        result
    };
    let last = || {
        let mut result = basic_simps(y, &widths, axis, 1, panels);
        result += &edge_trapezoid(y, &widths, axis, 0);
        result
    };

    Ok(match even {
        EvenPolicy::First => first(),
        EvenPolicy::Last => last(),
        EvenPolicy::Avg => {
            let mut result = first();
            result += &last();
            result *= 0.5;
            result
        }
    })
}

/// Sum of `panels` three-point Simpson panels starting at sample `start`.
fn basic_simps<S, D>(
    y: &ArrayBase<S, D>,
    widths: &Widths<D>,
    axis: Axis,
    start: usize,
    panels: usize,
) -> Array<f64, D::Smaller>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    if panels == 0 {
        return Array::zeros(y.raw_dim().remove_axis(axis));
    }

    let y0 = every_other(y, axis, start, panels);
    let y1 = every_other(y, axis, start + 1, panels);
    let y2 = every_other(y, axis, start + 2, panels);

    let terms = match widths {
        Widths::Uniform(dx) => {
            let dx = *dx;
            Zip::from(&y0)
                .and(&y1)
                .and(&y2)
                .map_collect(|&y0, &y1, &y2| dx / 3.0 * (y0 + 4.0 * y1 + y2))
        }
        Widths::Varying(h) => {
            let h0 = every_other(h, axis, start, panels);
            let h1 = every_other(h, axis, start + 1, panels);
            Zip::from(&y0)
                .and(&y1)
                .and(&y2)
                .and(&h0)
                .and(&h1)
                .map_collect(|&y0, &y1, &y2, &h0, &h1| {
                    let hsum = h0 + h1;
                    let ratio = h0 / h1;
                    hsum / 6.0
                        * (y0 * (2.0 - 1.0 / ratio)
                            + y1 * hsum * hsum / (h0 * h1)
                            + y2 * (2.0 - ratio))
                })
        }
    };

    terms.sum_axis(axis)
}

/// Trapezoid over the single interval `[lo, lo + 1]`.
fn edge_trapezoid<S, D>(
    y: &ArrayBase<S, D>,
    widths: &Widths<D>,
    axis: Axis,
    lo: usize,
) -> Array<f64, D::Smaller>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let mut area = y.index_axis(axis, lo).to_owned();
    area += &y.index_axis(axis, lo + 1);
    match widths {
        Widths::Uniform(dx) => area *= 0.5 * dx,
        Widths::Varying(h) => {
            area *= &h.index_axis(axis, lo);
            area *= 0.5;
        }
    }
    area
}

/// `count` lanes at `start, start + 2, ...` along `axis`.
fn every_other<S, D>(
    a: &ArrayBase<S, D>,
    axis: Axis,
    start: usize,
    count: usize,
) -> ArrayView<'_, f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let end = start + 2 * count - 1;
    a.slice_axis(axis, Slice::new(start as isize, Some(end as isize), 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, array};
    use std::f64::consts::PI;

    #[test]
    fn test_simps_cubic_exact() {
        // Integrate x^3 - 2x + 1 from -1 to 2 with 7 samples
        let x = Array1::<f64>::linspace(-1.0, 2.0, 7);
        let y = x.mapv(|xi: f64| xi.powi(3) - 2.0 * xi + 1.0);
        let exact = (16.0 / 4.0 - 4.0 + 2.0) - (1.0 / 4.0 - 1.0 - 1.0);

        let result = simps(&y, 0.5, -1, EvenPolicy::Avg)
            .unwrap()
            .into_scalar();
        assert_abs_diff_eq!(result, exact, epsilon = 1e-12);

        let result = simps(&y, &x, -1, EvenPolicy::Avg).unwrap().into_scalar();
        assert_abs_diff_eq!(result, exact, epsilon = 1e-12);
    }

    #[test]
    fn test_simps_unequal_quadratic_exact() {
        let x = array![0.0, 0.3, 1.0, 1.2, 2.0];
        let y = x.mapv(|xi: f64| 3.0 * xi * xi - xi + 2.0);
        // 3x^3/3 - x^2/2 + 2x on [0, 2]
        let exact = 8.0 - 2.0 + 4.0;
        let result = simps(&y, &x, -1, EvenPolicy::Avg).unwrap().into_scalar();
        assert_abs_diff_eq!(result, exact, epsilon = 1e-12);
    }

    #[test]
    fn test_simps_sin() {
        let x = Array1::<f64>::linspace(0.0, PI, 101);
        let y = x.mapv(f64::sin);
        let result = simps(&y, &x, -1, EvenPolicy::Avg).unwrap().into_scalar();
        assert!((result - 2.0).abs() < 2e-8);
    }

    #[test]
    fn test_simps_even_first_last() {
        // y = x on 4 samples, every rule involved is exact for linear data
        let y = array![0.0, 1.0, 2.0, 3.0];
        for even in [EvenPolicy::First, EvenPolicy::Last, EvenPolicy::Avg] {
            let result = simps(&y, 1.0, -1, even).unwrap().into_scalar();
            assert_abs_diff_eq!(result, 4.5, epsilon = 1e-12);
        }

        // y = x^2: Simpson parts are exact, the trapezoid overshoots by 1/6
        let y = array![0.0, 1.0, 4.0, 9.0];
        let first = simps(&y, 1.0, -1, EvenPolicy::First).unwrap().into_scalar();
        let last = simps(&y, 1.0, -1, EvenPolicy::Last).unwrap().into_scalar();
        assert_abs_diff_eq!(first, 9.0 + 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(last, 9.0 + 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_simps_avg_is_mean() {
        let y = array![1.0, -2.0, 0.5, 3.0, 4.5, -1.0];
        let x = array![0.0, 0.4, 1.1, 1.5, 2.7, 3.0];
        let first = simps(&y, &x, -1, EvenPolicy::First).unwrap().into_scalar();
        let last = simps(&y, &x, -1, EvenPolicy::Last).unwrap().into_scalar();
        let avg = simps(&y, &x, -1, EvenPolicy::Avg).unwrap().into_scalar();
        assert_abs_diff_eq!(avg, 0.5 * (first + last), epsilon = 1e-12);
    }

    #[test]
    fn test_simps_two_samples_is_trapezoid() {
        let y = array![1.0, 3.0];
        let result = simps(&y, 2.0, -1, EvenPolicy::Avg).unwrap().into_scalar();
        assert_abs_diff_eq!(result, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_simps_2d() {
        let x = Array1::<f64>::linspace(0.0, 1.0, 5);
        let y = Array2::from_shape_fn((3, 5), |(i, j)| x[j].powi(i as i32));
        let result = simps(&y, &x, 1, EvenPolicy::Avg).unwrap();
        assert_eq!(result.len(), 3);
        assert_abs_diff_eq!(result[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(result[2], 1.0 / 3.0, epsilon = 1e-12);

        let transposed = y.t().to_owned();
        let result_t = simps(&transposed, &x, 0, EvenPolicy::Avg).unwrap();
        for (a, b) in result.iter().zip(result_t.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_simps_full_rank_x() {
        let x = array![[0.0, 0.5, 1.0], [0.0, 1.0, 2.0], [0.0, 0.2, 1.0]];
        let y = x.mapv(|xi: f64| xi * xi);
        let result = simps(&y, &x, -1, EvenPolicy::Avg).unwrap();
        assert_abs_diff_eq!(result[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[1], 8.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result[2], 1.0 / 3.0, epsilon = 1e-12);

        let result_t = simps(&y.t(), &x.t(), 0, EvenPolicy::Avg).unwrap();
        for (a, b) in result.iter().zip(result_t.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-14);
        }

        // A mismatched full-rank x is rejected
        let short = Array2::<f64>::zeros((3, 2));
        assert!(simps(&y, &short, -1, EvenPolicy::Avg).is_err());
    }

    #[test]
    fn test_even_policy_parse() {
        assert_eq!("avg".parse::<EvenPolicy>().unwrap(), EvenPolicy::Avg);
        assert_eq!("first".parse::<EvenPolicy>().unwrap(), EvenPolicy::First);
        assert_eq!("last".parse::<EvenPolicy>().unwrap(), EvenPolicy::Last);
        let err = "middle".parse::<EvenPolicy>().unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(EvenPolicy::default().to_string(), "avg");
    }

    #[test]
    fn test_simps_errors() {
        let y = array![1.0, 2.0, 3.0];

        // Wrong length of x
        let x = array![0.0, 1.0];
        assert!(simps(&y, &x, -1, EvenPolicy::Avg).is_err());

        // x rank neither 1 nor rank of y
        let y2 = Array2::<f64>::zeros((2, 3));
        let x3 = ndarray::Array3::<f64>::zeros((1, 2, 3));
        assert!(simps(&y2, &x3, -1, EvenPolicy::Avg).is_err());

        // Too few samples
        let y = array![1.0];
        assert!(simps(&y, 1.0, -1, EvenPolicy::Avg).is_err());
    }
}
