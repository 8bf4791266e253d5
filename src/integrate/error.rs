//! Error types for numerical integration operations.

use thiserror::Error;

/// Result type for integration operations.
pub type IntegrateResult<T> = Result<T, IntegrateError>;

/// Errors that can occur during numerical integration.
///
/// Failures fall into two families: domain errors, raised when the bounds of
/// an integral are not finite, and validation errors, raised for malformed
/// inputs. Both abort the call. Convergence problems are never errors; they
/// are logged and reported through the `converged` flag of the result.
#[derive(Debug, Clone, Error)]
pub enum IntegrateError {
    /// An integration bound is infinite or NaN.
    #[error("{context}: integration limits must be finite (got [{a}, {b}])")]
    NonFiniteLimits { a: f64, b: f64, context: String },

    /// Invalid parameter value.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Invalid input array size or dimensions.
    #[error("Invalid input: {context}")]
    InvalidInput { context: String },

    /// Numerical computation failed (e.g. a singular system).
    #[error("Numerical error: {message}")]
    NumericalError { message: String },

    /// Error from the underlying array layer.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl IntegrateError {
    /// Returns `true` for errors caused by unsupported integration limits.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::NonFiniteLimits { .. })
    }

    /// Returns `true` for errors caused by malformed inputs.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::InvalidInput { .. } | Self::Shape(_)
        )
    }

    pub(crate) fn invalid_input(context: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }
}

/// Reject infinite or NaN bounds.
pub(crate) fn check_finite_limits(a: f64, b: f64, context: &str) -> IntegrateResult<()> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(IntegrateError::NonFiniteLimits {
            a,
            b,
            context: context.to_string(),
        })
    }
}
