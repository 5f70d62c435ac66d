//! Error types for dubins_routing

use std::fmt;

/// Main error type for Dubins path planning
#[derive(Debug)]
pub enum DubinsError {
    /// Turning radius is zero, negative, or non-finite
    InvalidRadius(f64),
    /// Start or end configuration contains non-finite values
    InvalidConfiguration(String),
    /// All six path families are infeasible for the given configurations
    Planning(String),
}

impl fmt::Display for DubinsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DubinsError::InvalidRadius(radius) => {
                write!(f, "Invalid turning radius: {} (must be finite and > 0)", radius)
            }
            DubinsError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            DubinsError::Planning(msg) => write!(f, "Planning error: {}", msg),
        }
    }
}

impl std::error::Error for DubinsError {}

/// Result type alias for planning operations
pub type DubinsResult<T> = Result<T, DubinsError>;
