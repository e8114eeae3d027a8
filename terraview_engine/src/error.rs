//! Error types for the Terraview engine
//!
//! Out-of-range tile coordinates are not errors: they are reported through
//! `bool`/`Option` returns on the tile API. This module only covers the
//! conditions that callers must handle explicitly (degenerate geometry and
//! rejected configuration).

use std::fmt;

/// Result type for Terraview engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Terraview engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Plane equation with an all-zero normal (a = b = c = 0)
    InvalidPlane(String),

    /// Camera or tile configuration rejected at construction
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPlane(msg) => write!(f, "Invalid plane: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
