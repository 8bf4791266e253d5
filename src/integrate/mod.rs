//! Numerical integration for solvr-quad.
//!
//! This module provides:
//! - **Sampled data**: trapezoidal, Simpson and Romberg rules along one axis
//!   of an n-d array
//! - **Callables**: fixed-order and adaptive Gauss-Legendre quadrature and
//!   Romberg integration over finite intervals
//! - **Rule construction**: Gauss-Legendre nodes and Newton-Cotes weights
//!
//! # Errors
//!
//! Every entry point returns [`IntegrateResult`]. Infinite integration
//! limits are rejected with [`IntegrateError::NonFiniteLimits`]; malformed
//! arguments with [`IntegrateError::InvalidInput`] or
//! [`IntegrateError::InvalidParameter`].
//!
//! Failing to reach a tolerance is not an error. The adaptive routines log a
//! warning through the `log` facade and report `converged: false`.
//!
//! # Example
//!
//! ```
//! use ndarray::Array1;
//! use solvr_quad::integrate::{EvenPolicy, QuadOptions, quadrature, simps};
//!
//! // Sampled data
//! let x = Array1::<f64>::linspace(0.0, 2.0, 9);
//! let y = x.mapv(|v| v * v);
//! let area = simps(&y, &x, -1, EvenPolicy::Avg)?.into_scalar();
//! assert!((area - 8.0 / 3.0).abs() < 1e-12);
//!
//! // A callable
//! let result = quadrature(|t: f64| t.cos(), 0.0, 1.0, &QuadOptions::default())?;
//! assert!((result.integral - 1f64.sin()).abs() < 1e-10);
//! # Ok::<(), solvr_quad::integrate::IntegrateError>(())
//! ```

pub mod error;
pub mod quadrature;

// Re-export error types
pub use error::{IntegrateError, IntegrateResult};

// Re-export quadrature
pub use quadrature::{
    EvenPolicy, Integrand, IntegrandValue, NewtonCotesRule, QuadOptions, QuadResult,
    RichardsonTable, RombergOptions, RombergResult, SamplePositions, Spacing, Vectorized,
    cumtrapz, fixed_quad, gauss_legendre_nodes, newton_cotes, quadrature, romb, romb_table,
    romberg, simps, trapz,
};
