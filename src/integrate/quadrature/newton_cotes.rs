//! Newton-Cotes weights and error coefficients.
//!
//! For `N + 1` samples at positions `x_0, ..., x_N`, the `N`-point rule is
//!
//! `∫_{x_0}^{x_N} f(x) dx = Δx Σ a_i f(x_i) + B_N Δx^{N+2} f^{(N+1)}(ξ)`
//!
//! with `Δx = (x_N - x_0) / N`. For equally spaced samples and even `N` the
//! error term is `B_N Δx^{N+3} f^{(N+2)}(ξ)` instead.

use nalgebra::DMatrix;
use ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::integrate::error::{IntegrateError, IntegrateResult};

/// Sample layout for [`newton_cotes`].
#[derive(Debug, Clone, PartialEq)]
pub enum SamplePositions {
    /// Equally spaced samples `0, 1, ..., N` of order `N`.
    Order(usize),
    /// Relative sample positions, first at 0 and last at `N = len - 1`.
    Positions(Array1<f64>),
}

impl From<usize> for SamplePositions {
    fn from(order: usize) -> Self {
        Self::Order(order)
    }
}

impl From<Array1<f64>> for SamplePositions {
    fn from(positions: Array1<f64>) -> Self {
        Self::Positions(positions)
    }
}

impl<S: Data<Elem = f64>> From<&ArrayBase<S, Ix1>> for SamplePositions {
    fn from(positions: &ArrayBase<S, Ix1>) -> Self {
        Self::Positions(positions.to_owned())
    }
}

impl From<Vec<f64>> for SamplePositions {
    fn from(positions: Vec<f64>) -> Self {
        Self::Positions(Array1::from(positions))
    }
}

impl From<&[f64]> for SamplePositions {
    fn from(positions: &[f64]) -> Self {
        Self::Positions(Array1::from(positions.to_vec()))
    }
}

/// Weights and error coefficient of a Newton-Cotes rule.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonCotesRule {
    /// Weight `a_i` for the sample at position `i`
    pub weights: Array1<f64>,
    /// Error coefficient `B_N`
    pub error_coefficient: f64,
}

/// Rational coefficients for equally spaced rules of order 1 through 14.
///
/// Entry `N - 1` is `(num_a, den_a, int_a, num_b, den_b)` with weights
/// `num_a * int_a / den_a` and error coefficient `num_b / den_b`.
#[rustfmt::skip]
static BUILTIN_COEFFICIENTS: [(i64, i64, &[i64], i64, i64); 14] = [
    (1, 2, &[1, 1], -1, 12),
    (1, 3, &[1, 4, 1], -1, 90),
    (3, 8, &[1, 3, 3, 1], -3, 80),
    (2, 45, &[7, 32, 12, 32, 7], -8, 945),
    (5, 288, &[19, 75, 50, 50, 75, 19], -275, 12096),
    (1, 140, &[41, 216, 27, 272, 27, 216, 41], -9, 1400),
    (7, 17280, &[751, 3577, 1323, 2989, 2989, 1323, 3577, 751], -8183, 518400),
    (4, 14175, &[989, 5888, -928, 10496, -4540, 10496, -928, 5888, 989], -2368, 467775),
    (9, 89600, &[2857, 15741, 1080, 19344, 5778, 5778, 19344, 1080, 15741, 2857], -4671, 394240),
    (5, 299376,
     &[16067, 106300, -48525, 272400, -260550, 427368, -260550, 272400, -48525, 106300, 16067],
     -673175, 163459296),
    (11, 87091200,
     &[2171465, 13486539, -3237113, 25226685, -9595542, 15493566, 15493566, -9595542,
       25226685, -3237113, 13486539, 2171465],
     -2224234463, 237758976000),
    (1, 5255250,
     &[1364651, 9903168, -7587864, 35725120, -51491295, 87516288, -87797136, 87516288,
       -51491295, 35725120, -7587864, 9903168, 1364651],
     -3012, 875875),
    (13, 402361344000,
     &[8181904909, 56280729661, -31268252574, 156074417954, -151659573325, 206683437987,
       -43111992612, -43111992612, 206683437987, -151659573325, 156074417954, -31268252574,
       56280729661, 8181904909],
     -2639651053, 344881152000),
    (7, 2501928000,
     &[90241897, 710986864, -770720657, 3501442784, -6625093363, 12630121616, -16802270373,
       19534438464, -16802270373, 12630121616, -6625093363, 3501442784, -770720657,
       710986864, 90241897],
     -3740727473, 1275983280000),
];

/// Newton-Cotes weights and error coefficient.
///
/// `rn` is either the order `N` of an equally spaced rule or the relative
/// sample positions, which must start at 0 and end at `N` where `N + 1` is
/// the number of positions. Setting `equal` discards the given positions in
/// favour of `0, 1, ..., N`; positions whose steps are all exactly 1 are
/// treated as equally spaced too.
///
/// Equally spaced rules up to order 14 come from exact rational tables.
/// Other rules are derived by inverting the Vandermonde system on the
/// positions mapped to `[-1, 1]`, so their accuracy degrades as `N` grows or
/// samples cluster.
///
/// # Errors
///
/// Returns an error if `N` is zero, the positions are empty or do not span
/// `[0, N]`, or the Vandermonde system is singular (repeated positions).
///
/// # Example
///
/// ```
/// use solvr_quad::integrate::newton_cotes;
///
/// // Simpson's rule
/// let rule = newton_cotes(2, false).unwrap();
/// assert!((rule.weights[1] - 4.0 / 3.0).abs() < 1e-15);
/// assert!((rule.error_coefficient + 1.0 / 90.0).abs() < 1e-15);
/// ```
pub fn newton_cotes(
    rn: impl Into<SamplePositions>,
    equal: bool,
) -> IntegrateResult<NewtonCotesRule> {
    // `positions` is `None` when the layout is forced to `0, 1, ..., N`
    let (n, positions, equal) = match rn.into() {
        SamplePositions::Order(n) => (n, None, true),
        SamplePositions::Positions(positions) => {
            if positions.is_empty() {
                return Err(IntegrateError::invalid_input(
                    "newton_cotes: sample positions must not be empty",
                ));
            }
            let n = positions.len() - 1;
            if equal {
                (n, None, true)
            } else {
                let unit_steps = positions.windows(2).into_iter().all(|w| w[1] - w[0] == 1.0);
                (n, Some(positions), unit_steps)
            }
        }
    };

    if n == 0 {
        return Err(IntegrateError::invalid_parameter(
            "rn",
            "order must be at least 1",
        ));
    }

    if equal {
        if let Some(rule) = builtin_rule(n) {
            return Ok(rule);
        }
    }

    let positions = positions.unwrap_or_else(|| Array1::from_shape_fn(n + 1, |i| i as f64));
    if positions[0] != 0.0 || positions[n] != n as f64 {
        return Err(IntegrateError::invalid_input(
            "newton_cotes: the sample positions must start at 0 and end at N",
        ));
    }

    solve_rule(&positions, equal)
}

fn builtin_rule(n: usize) -> Option<NewtonCotesRule> {
    let &(na, da, vi, nb, db) = BUILTIN_COEFFICIENTS.get(n.checked_sub(1)?)?;
    let scale = na as f64 / da as f64;
    Some(NewtonCotesRule {
        weights: vi.iter().map(|&v| v as f64 * scale).collect(),
        error_coefficient: nb as f64 / db as f64,
    })
}

/// Derive the rule from the moment equations on `t = 2 r / N - 1`.
fn solve_rule(positions: &Array1<f64>, equal: bool) -> IntegrateResult<NewtonCotesRule> {
    let singular = || IntegrateError::NumericalError {
        message: "newton_cotes: Vandermonde matrix is singular; sample positions must be distinct"
            .to_string(),
    };

    let n = positions.len() - 1;
    let repeated = positions
        .iter()
        .enumerate()
        .any(|(i, r)| positions.iter().skip(i + 1).any(|s| s == r));
    if repeated {
        return Err(singular());
    }

    let nf = n as f64;
    let yi = positions.mapv(|r| r / nf);
    let ti = yi.mapv(|y| 2.0 * y - 1.0);

    let c = DMatrix::from_fn(n + 1, n + 1, |j, i| ti[i].powi(j as i32));
    let mut cinv = c.clone().try_inverse().ok_or_else(singular)?;
    // Two Newton-Schulz steps to refine the inverse
    for _ in 0..2 {
        cinv = cinv.scale(2.0) - &cinv * &c * &cinv;
    }

    let weights = Array1::from_shape_fn(n + 1, |i| {
        (0..=n)
            .step_by(2)
            .map(|j| cinv[(i, j)] * 2.0 / (j + 1) as f64)
            .sum::<f64>()
            * nf
            / 2.0
    });

    let (base, power) = if n % 2 == 0 && equal {
        (nf / (nf + 3.0), n + 2)
    } else {
        (nf / (nf + 2.0), n + 1)
    };
    let moment: f64 = yi
        .iter()
        .zip(weights.iter())
        .map(|(&y, &a)| y.powi(power as i32) * a)
        .sum();
    // N^p / p!, in log space
    let log_factorial: f64 = (2..=power).map(|k| (k as f64).ln()).sum();
    let fac = (power as f64 * nf.ln() - log_factorial).exp();

    Ok(NewtonCotesRule {
        weights,
        error_coefficient: (base - moment) * fac,
    })
}
