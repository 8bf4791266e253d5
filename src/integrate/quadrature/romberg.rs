//! Romberg integration of a callable.
//!
//! Successive trapezoidal estimates with `1, 2, 4, ...` intervals are
//! refined by Richardson extrapolation until the diagonal settles.

use std::fmt::Write;

use ndarray::Array1;

use super::richardson::RichardsonTable;
use super::vectorize::{Integrand, IntegrandValue};
use crate::integrate::error::{IntegrateError, IntegrateResult, check_finite_limits};

/// Options for Romberg integration.
#[derive(Debug, Clone)]
pub struct RombergOptions {
    /// Absolute tolerance on successive diagonal entries (default: 1.48e-8)
    pub tol: f64,
    /// Maximum number of interval halvings (default: 10)
    pub divmax: usize,
    /// Log the extrapolation table at info level (default: false)
    pub show: bool,
}

impl Default for RombergOptions {
    fn default() -> Self {
        Self {
            tol: 1.48e-8,
            divmax: 10,
            show: false,
        }
    }
}

/// Result of Romberg integration.
#[derive(Debug, Clone)]
pub struct RombergResult<T> {
    /// Computed integral value
    pub integral: T,
    /// Difference between the last two diagonal entries
    pub error: f64,
    /// Number of function evaluations
    pub neval: usize,
    /// Whether the tolerance was met within `divmax` halvings
    pub converged: bool,
    /// Full extrapolation table
    pub table: RichardsonTable<T>,
}

/// Romberg integration of `f` over `[a, b]`.
///
/// Row `i` of the table starts with the trapezoidal estimate on `2^i`
/// intervals, reusing every ordinate of the previous rows, followed by
/// `i` Richardson extrapolations. Iteration stops when two successive
/// diagonal entries differ by at most `tol`, or after `divmax` halvings.
/// Exhausting `divmax` is not an error and is not warned about; the best
/// estimate is returned with `converged` set to `false`.
///
/// # Errors
///
/// Returns an error if either bound is not finite.
///
/// # Example
///
/// ```
/// use solvr_quad::integrate::{RombergOptions, romberg};
///
/// let gaussian = |x: f64| (-x * x).exp() / std::f64::consts::PI.sqrt();
/// let result = romberg(gaussian, 0.0, 1.0, &RombergOptions::default()).unwrap();
/// // erf(1) / 2
/// assert!((result.integral - 0.421_350_396_475_856).abs() < 1e-9);
/// assert_eq!(result.neval, 33);
/// ```
pub fn romberg<T, F>(
    f: F,
    a: f64,
    b: f64,
    options: &RombergOptions,
) -> IntegrateResult<RombergResult<T>>
where
    F: Integrand<T>,
    T: IntegrandValue,
{
    check_finite_limits(a, b, "romberg")?;

    let range = b - a;
    let mut numtraps = 1;
    let mut ordsum = difftrap(&f, a, b, numtraps)?;
    let mut neval = 2;
    let mut result = ordsum * range;
    let mut table = RichardsonTable::new(result);

    let mut delta = 2.0 * options.tol;
    let mut i = 1;
    while delta > options.tol && i <= options.divmax {
        numtraps *= 2;
        ordsum = ordsum + difftrap(&f, a, b, numtraps)?;
        neval += numtraps / 2;

        let previous = &table.rows()[i - 1];
        let mut row = Vec::with_capacity(i + 1);
        row.push(ordsum * range / numtraps as f64);
        for k in 0..i {
            row.push(romberg_diff(previous[k], row[k], k + 1));
        }

        let last = previous[i - 1];
        result = row[i];
        delta = (result - last).magnitude();
        table.push_row(row);

        log::debug!("romberg: {numtraps} intervals, estimate {result}, difference {delta:e}");
        i += 1;
    }

    let converged = delta <= options.tol;
    if !converged {
        log::debug!(
            "romberg: divmax ({}) exceeded. Latest difference = {:e}",
            options.divmax,
            delta
        );
    }

    if options.show {
        log::info!("{}", report(&table, a, b, neval));
    }

    Ok(RombergResult {
        integral: result,
        error: delta,
        neval,
        converged,
        table,
    })
}

/// Sum of the ordinates a trapezoidal rule with `numtraps` intervals adds
/// over the rule with `numtraps / 2`.
///
/// With one interval this is the average of the endpoint values. The caller
/// multiplies by the interval width.
fn difftrap<T, F>(f: &F, a: f64, b: f64, numtraps: usize) -> IntegrateResult<T>
where
    F: Integrand<T> + ?Sized,
    T: IntegrandValue,
{
    match numtraps {
        0 => Err(IntegrateError::invalid_parameter(
            "numtraps",
            "must be greater than 0",
        )),
        1 => Ok((f.eval_at(a) + f.eval_at(b)) * 0.5),
        _ => {
            let numtosum = numtraps / 2;
            let h = (b - a) / numtosum as f64;
            let lox = a + 0.5 * h;
            let points = Array1::from_shape_fn(numtosum, |k| lox + h * k as f64);
            let values = f.eval_points(points.view());
            if values.len() != numtosum {
                return Err(IntegrateError::invalid_input(format!(
                    "romberg: integrand returned {} values for {} points",
                    values.len(),
                    numtosum
                )));
            }
            Ok(values.iter().fold(T::zero(), |acc, &v| acc + v))
        }
    }
}

/// Richardson step `(4^k c - b) / (4^k - 1)`.
fn romberg_diff<T: IntegrandValue>(b: T, c: T, k: usize) -> T {
    let tmp = 4f64.powi(k as i32);
    (c * tmp - b) / (tmp - 1.0)
}

fn report<T: IntegrandValue>(table: &RichardsonTable<T>, a: f64, b: f64, neval: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Romberg integration from [{a}, {b}]");
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>6} {:>9} {:>9}", "Steps", "StepSize", "Results");
    for (i, row) in table.rows().iter().enumerate() {
        let steps = 1usize << i;
        let _ = write!(out, "{:>6} {:>9.6}", steps, (b - a) / steps as f64);
        for entry in row {
            let _ = write!(out, " {entry:>9.6}");
        }
        out.push('\n');
    }
    let _ = writeln!(out);
    let _ = write!(
        out,
        "The final result is {} after {} function evaluations.",
        table.best(),
        neval
    );
    out
}
