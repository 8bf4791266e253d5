//! # solvr-quad
//!
//! Classical numerical quadrature on top of `ndarray`.
//!
//! - Sampled data: [`integrate::trapz`], [`integrate::cumtrapz`],
//!   [`integrate::simps`], [`integrate::romb`]
//! - Callables: [`integrate::fixed_quad`], [`integrate::quadrature`],
//!   [`integrate::romberg`]
//! - Rules: [`integrate::gauss_legendre_nodes`], [`integrate::newton_cotes`]
//!
//! Diagnostics go through the [`log`] facade; install any logger to see them.

pub mod integrate;
