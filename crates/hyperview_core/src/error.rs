//! Error types
//!
//! Only conditions a caller can act on are represented here. Malformed
//! built-in geometry is a programming error and panics at construction.

use std::fmt;

/// Error type for shape lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The requested shape key does not name a supported shape
    NotFound(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::NotFound(key) => write!(f, "Shape not found: {}", key),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Error type for projector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// Viewer distance must be finite and strictly positive
    InvalidViewerDistance(f32),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidViewerDistance(d) => {
                write!(f, "Invalid viewer distance: {} (must be finite and > 0)", d)
            }
        }
    }
}

impl std::error::Error for ProjectionError {}
