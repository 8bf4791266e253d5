//! Numerical quadrature (integration) methods.
//!
//! This module provides methods for numerically computing definite integrals,
//! either of a callable over a finite interval or of samples along one axis
//! of an n-d array.
//!
//! # Available Methods
//!
//! | Method | Use Case | Accuracy |
//! |--------|----------|----------|
//! | [`trapz`] / [`cumtrapz`] | Sampled data, any spacing | O(h²) |
//! | [`simps`] | Sampled data, any spacing | O(h⁴) |
//! | [`romb`] | `2^k + 1` equally spaced samples | Richardson-extrapolated |
//! | [`fixed_quad`] | Smooth functions | Exact for polynomials up to degree 2n-1 |
//! | [`quadrature`] | Smooth functions | Adaptive order to specified tolerance |
//! | [`romberg`] | Smooth functions | High precision via extrapolation |
//! | [`newton_cotes`] | Building custom rules | Exact for degree N (N+1 if even and equal) |
//!
//! # Choosing a Method
//!
//! - **Sampled data**: Use [`simps`] or [`trapz`]; [`romb`] when the samples
//!   are equally spaced and their count is one plus a power of two
//! - **Smooth functions**: Use [`fixed_quad`] for efficiency or [`quadrature`] for reliability
//! - **High precision needed**: Use [`romberg`] or [`quadrature`] with tight tolerances
//!
//! Callables are plain closures `Fn(f64) -> T` evaluated point by point, or
//! batch closures wrapped in [`Vectorized`]. `T` is `f64` or `Complex64`.

mod adaptive;
mod gauss;
mod newton_cotes;
mod richardson;
mod romb;
mod romberg;
mod samples;
mod simpson;
mod trapezoid;
mod vectorize;

// Re-export all public items
pub use adaptive::{QuadOptions, QuadResult, quadrature};
pub use gauss::{fixed_quad, gauss_legendre_nodes};
pub use newton_cotes::{NewtonCotesRule, SamplePositions, newton_cotes};
pub use richardson::RichardsonTable;
pub use romb::{romb, romb_table};
pub use romberg::{RombergOptions, RombergResult, romberg};
pub use samples::Spacing;
pub use simpson::{EvenPolicy, simps};
pub use trapezoid::{cumtrapz, trapz};
pub use vectorize::{Integrand, IntegrandValue, Vectorized};
