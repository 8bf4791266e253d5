//! Uniform vector-calling convention for integrands.
//!
//! The adaptive integrators evaluate the integrand on whole batches of
//! points. Plain scalar closures `Fn(f64) -> T` are evaluated point by point;
//! closures that already handle a batch are wrapped in [`Vectorized`] and
//! called once per batch. Extra parameters are captured by the closure.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use ndarray::{Array1, ArrayView1, aview1};
use num_complex::Complex64;
use num_traits::Zero;

/// Value type an integrand may return.
///
/// Implemented for `f64` and [`Complex64`], so complex-valued integrands
/// integrate with the same routines as real ones.
pub trait IntegrandValue:
    Copy
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + fmt::Debug
    + fmt::Display
{
    /// Absolute value, used for convergence tests.
    fn magnitude(self) -> f64;
}

impl IntegrandValue for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl IntegrandValue for Complex64 {
    fn magnitude(self) -> f64 {
        self.norm()
    }
}

/// A function that can be evaluated on a batch of points.
pub trait Integrand<T> {
    /// Evaluate at every point of `points`, in order.
    fn eval_points(&self, points: ArrayView1<'_, f64>) -> Array1<T>;

    /// Evaluate at a single point.
    fn eval_at(&self, x: f64) -> T;
}

impl<T, F> Integrand<T> for F
where
    F: Fn(f64) -> T,
{
    fn eval_points(&self, points: ArrayView1<'_, f64>) -> Array1<T> {
        points.iter().map(|&x| self(x)).collect()
    }

    fn eval_at(&self, x: f64) -> T {
        self(x)
    }
}

/// Marks a closure as accepting a whole batch of points at once.
///
/// # Example
///
/// ```
/// use ndarray::ArrayView1;
/// use solvr_quad::integrate::{Vectorized, fixed_quad};
///
/// let f = Vectorized::new(|x: ArrayView1<'_, f64>| x.mapv(f64::exp));
/// let result: f64 = fixed_quad(f, 0.0, 1.0, 8).unwrap();
/// assert!((result - (std::f64::consts::E - 1.0)).abs() < 1e-12);
/// ```
#[derive(Clone, Copy)]
pub struct Vectorized<F>(F);

impl<F> Vectorized<F> {
    /// Wrap a batch-evaluating closure.
    pub fn new<T>(f: F) -> Self
    where
        F: Fn(ArrayView1<'_, f64>) -> Array1<T>,
    {
        Self(f)
    }
}

impl<F> fmt::Debug for Vectorized<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Vectorized(..)")
    }
}

impl<T, F> Integrand<T> for Vectorized<F>
where
    F: Fn(ArrayView1<'_, f64>) -> Array1<T>,
    T: Clone,
{
    fn eval_points(&self, points: ArrayView1<'_, f64>) -> Array1<T> {
        (self.0)(points)
    }

    fn eval_at(&self, x: f64) -> T {
        let values = (self.0)(aview1(&[x]));
        values[0].clone()
    }
}

/// `Σ w_i v_i` over paired weights and values.
pub(crate) fn weighted_sum<T: IntegrandValue>(weights: &Array1<f64>, values: &Array1<T>) -> T {
    weights
        .iter()
        .zip(values.iter())
        .fold(T::zero(), |acc, (&w, &v)| acc + v * w)
}
