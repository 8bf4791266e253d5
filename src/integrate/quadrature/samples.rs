//! Shared plumbing for the sampled-data integrators.
//!
//! The sampled-data rules ([`trapz`](super::trapz), [`cumtrapz`](super::cumtrapz),
//! [`simps`](super::simps)) accept the sample positions either as a uniform
//! spacing or as an explicit abscissa array, and integrate along one axis of
//! an n-dimensional array of function values.

use ndarray::{Array, ArrayBase, ArrayViewD, Axis, Data, Dimension, Slice};

use crate::integrate::error::{IntegrateError, IntegrateResult};

/// Positions of the samples along the integration axis.
///
/// Plain numbers convert into [`Spacing::Uniform`] and array references into
/// [`Spacing::Points`], so both `0.1` and `&x` can be passed wherever an
/// `impl Into<Spacing>` is expected.
#[derive(Debug, Clone)]
pub enum Spacing<'a> {
    /// Samples are `dx` apart.
    Uniform(f64),
    /// Explicit sample positions.
    ///
    /// Either rank 1, in which case the positions are shared by every lane
    /// along the integration axis, or the same rank as the sample array.
    Points(ArrayViewD<'a, f64>),
}

impl Default for Spacing<'_> {
    fn default() -> Self {
        Spacing::Uniform(1.0)
    }
}

impl From<f64> for Spacing<'_> {
    fn from(dx: f64) -> Self {
        Spacing::Uniform(dx)
    }
}

impl<'a, S, D> From<&'a ArrayBase<S, D>> for Spacing<'a>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn from(x: &'a ArrayBase<S, D>) -> Self {
        Spacing::Points(x.view().into_dyn())
    }
}

/// Resolve a numpy-style axis index (negative counts from the end).
pub(crate) fn resolve_axis(axis: isize, ndim: usize, context: &str) -> IntegrateResult<Axis> {
    let rank = ndim as isize;
    let index = if axis < 0 { axis + rank } else { axis };
    if index < 0 || index >= rank {
        return Err(IntegrateError::invalid_input(format!(
            "{context}: axis {axis} is out of bounds for an array of dimension {ndim}"
        )));
    }
    Ok(Axis(index as usize))
}

/// Require at least `min` samples along the integration axis.
pub(crate) fn require_samples(count: usize, min: usize, context: &str) -> IntegrateResult<()> {
    if count < min {
        return Err(IntegrateError::invalid_input(format!(
            "{context}: need at least {min} samples along the integration axis (got {count})"
        )));
    }
    Ok(())
}

/// Broadcast the abscissa `x` to the shape of the sample array.
///
/// A rank-1 `x` is laid along `axis`; otherwise `x` must have the same rank
/// as the samples. In both cases its length along `axis` must match.
pub(crate) fn abscissa_like<D>(
    x: &ArrayViewD<'_, f64>,
    shape: &D,
    axis: Axis,
    context: &str,
) -> IntegrateResult<Array<f64, D>>
where
    D: Dimension,
{
    let expected = shape[axis.index()];

    let x = if x.ndim() == shape.ndim() {
        x.to_owned().into_dimensionality::<D>()?
    } else if x.ndim() == 1 {
        let mut lane = shape.clone();
        for (i, len) in lane.slice_mut().iter_mut().enumerate() {
            *len = if i == axis.index() { x.len() } else { 1 };
        }
        x.to_owned().into_shape_with_order(lane)?
    } else {
        return Err(IntegrateError::invalid_input(format!(
            "{context}: x must be 1-d or have the same rank as y (got rank {} for rank {})",
            x.ndim(),
            shape.ndim()
        )));
    };

    if x.len_of(axis) != expected {
        return Err(IntegrateError::invalid_input(format!(
            "{context}: length of x along the integration axis must match y (got {} and {})",
            x.len_of(axis),
            expected
        )));
    }

    x.broadcast(shape.clone())
        .map(|view| view.to_owned())
        .ok_or_else(|| {
            IntegrateError::invalid_input(format!(
                "{context}: x of shape {:?} cannot be broadcast to {:?}",
                x.shape(),
                shape.slice()
            ))
        })
}

/// Forward differences `a[i+1] - a[i]` along `axis`.
pub(crate) fn diff_along<S, D>(a: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let n = a.len_of(axis);
    let mut d = a.slice_axis(axis, Slice::from(1..n)).to_owned();
    d -= &a.slice_axis(axis, Slice::from(0..n - 1));
    d
}
