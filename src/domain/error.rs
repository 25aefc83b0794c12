// Domain error type shared by the registry and the render pipeline
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("variable '{variable}': expected {expected} values to match step indices, got {actual}")]
    LengthMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("variable '{0}' is registered more than once")]
    DuplicateVariable(String),

    #[error("variable '{name}' has invalid operating range [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("live window size must be greater than zero")]
    InvalidWindow,
}
