//! Transform error types.

use std::error::Error;
use std::fmt;

use locality_core::ArrayError;

/// Errors from selecting or applying a [`Transform`](crate::Transform).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransformError {
    /// Rotation angle other than 0, 90, 180 or 270 degrees.
    InvalidRotation {
        /// The rejected angle.
        degrees: u32,
    },
    /// Flip direction other than `horizontal` or `vertical`.
    UnknownFlip {
        /// The rejected direction.
        name: String,
    },
    /// No transform has this name.
    UnknownTransform {
        /// The rejected name.
        name: String,
    },
    /// The destination array has the wrong shape for the transform.
    DimensionMismatch {
        /// `(width, height)` the transform produces.
        expected: (usize, usize),
        /// `(width, height)` of the destination supplied.
        found: (usize, usize),
    },
    /// Creating or traversing an array failed.
    Array(ArrayError),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRotation { degrees } => {
                write!(f, "rotation must be 0, 90, 180 or 270, got {degrees}")
            }
            Self::UnknownFlip { name } => {
                write!(f, "flip must be horizontal or vertical, got '{name}'")
            }
            Self::UnknownTransform { name } => write!(f, "unknown transform '{name}'"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "destination is {}x{}, transform produces {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::Array(e) => write!(f, "array error: {e}"),
        }
    }
}

impl Error for TransformError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Array(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArrayError> for TransformError {
    fn from(e: ArrayError) -> Self {
        Self::Array(e)
    }
}
