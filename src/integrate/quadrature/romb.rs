//! Romberg integration of equally spaced samples.

use ndarray::{Array, ArrayBase, Data, RemoveAxis, Slice, Zip};

use super::richardson::RichardsonTable;
use super::samples::resolve_axis;
use crate::integrate::error::{IntegrateError, IntegrateResult};

/// Integrate `2^k + 1` equally spaced samples with Romberg's method.
///
/// Builds the Richardson table from trapezoidal estimates on successively
/// finer subsets of the samples (see [`romb_table`]) and returns its most
/// refined entry. The result is exact for cubics.
///
/// With `show` set, the table is written to the `log` facade at info level
/// when `y` is a single data set (1-d).
///
/// # Errors
///
/// Returns an error if `axis` is out of range or the number of samples along
/// it is not one plus a power of two.
///
/// # Example
///
/// ```
/// use ndarray::Array1;
/// use solvr_quad::integrate::romb;
///
/// // Integrate exp(x) from 0 to 1 with 17 samples
/// let x = Array1::<f64>::linspace(0.0, 1.0, 17);
/// let y = x.mapv(f64::exp);
///
/// let result = romb(&y, 1.0 / 16.0, -1, false).unwrap().into_scalar();
/// assert!((result - (std::f64::consts::E - 1.0)).abs() < 1e-10);
/// ```
pub fn romb<S, D>(
    y: &ArrayBase<S, D>,
    dx: f64,
    axis: isize,
    show: bool,
) -> IntegrateResult<Array<f64, D::Smaller>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let table = romb_table(y, dx, axis)?;
    if show {
        show_table(&table);
    }
    Ok(table.into_best())
}

/// Build the full Richardson table for [`romb`].
///
/// Row 0 is the trapezoid through the two end samples. Row `i` halves the
/// step, adding the samples at odd multiples of the new step, and is then
/// extrapolated against row `i - 1`:
///
/// `R[i][j] = R[i][j-1] + (R[i][j-1] - R[i-1][j-1]) / (4^j - 1)`
///
/// The last row uses every sample. Entries have the shape of `y` with the
/// integration axis removed.
pub fn romb_table<S, D>(
    y: &ArrayBase<S, D>,
    dx: f64,
    axis: isize,
) -> IntegrateResult<RichardsonTable<Array<f64, D::Smaller>>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let axis = resolve_axis(axis, y.ndim(), "romb")?;
    let samples = y.len_of(axis);
    let intervals = samples.saturating_sub(1);
    if !intervals.is_power_of_two() {
        return Err(IntegrateError::invalid_input(format!(
            "romb: number of samples must be one plus a non-negative power of 2 (got {samples})"
        )));
    }
    let levels = intervals.trailing_zeros() as usize;

    let mut h = intervals as f64 * dx;
    let mut first = y.index_axis(axis, 0).to_owned();
    first += &y.index_axis(axis, intervals);
    first *= h / 2.0;
    let mut table = RichardsonTable::new(first);

    for i in 1..=levels {
        let stride = intervals >> i;
        let midpoints = y.slice_axis(
            axis,
            Slice::new(stride as isize, Some(intervals as isize), (2 * stride) as isize),
        );

        let previous = &table.rows()[i - 1];
        let mut trapezoid = midpoints.sum_axis(axis);
        trapezoid *= h;
        trapezoid += &previous[0];
        trapezoid *= 0.5;

        let mut row = Vec::with_capacity(i + 1);
        row.push(trapezoid);
        for j in 1..=i {
            let denom = 4f64.powi(j as i32) - 1.0;
            let next = Zip::from(&row[j - 1])
                .and(&previous[j - 1])
                .map_collect(|&fine, &coarse| fine + (fine - coarse) / denom);
            row.push(next);
        }

        table.push_row(row);
        h /= 2.0;
    }

    Ok(table)
}

fn show_table<D: ndarray::Dimension>(table: &RichardsonTable<Array<f64, D>>) {
    if table.best().ndim() != 0 {
        log::info!("romb: printing the table is only supported for integrals of a single data set");
        return;
    }
    let scalars = table.map(|entry| entry.iter().next().copied().unwrap_or(f64::NAN));
    log::info!("\n{}", scalars.render(8, 5));
}
