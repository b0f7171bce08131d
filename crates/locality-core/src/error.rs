//! Error types for array construction and traversal dispatch.
//!
//! Direct element access never returns these: an out-of-range `at` is a
//! caller bug and panics. Only the checks a caller cannot trivially do
//! up front (allocation size, order support) surface as values.

use std::error::Error;
use std::fmt;

use crate::order::MapOrder;

/// Errors from creating an array or dispatching a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A dimension was zero. Arrays always hold at least one cell.
    EmptyDimension {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
    },
    /// A blocked array was asked for a block size of zero.
    ZeroBlockSize,
    /// The element type occupies no bytes, so it has no stride.
    ZeroSizedElement,
    /// `width * height * element_stride` does not fit in `isize::MAX` bytes.
    CapacityOverflow {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Bytes per element.
        element_stride: usize,
    },
    /// The container cannot traverse in the requested order.
    UnsupportedOrder {
        /// The requested order.
        order: MapOrder,
        /// Short name of the container that rejected it.
        container: &'static str,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimension { name } => {
                write!(f, "array {name} must be at least 1")
            }
            Self::ZeroBlockSize => write!(f, "block size must be at least 1"),
            Self::ZeroSizedElement => {
                write!(f, "element type must occupy at least one byte")
            }
            Self::CapacityOverflow {
                width,
                height,
                element_stride,
            } => {
                write!(
                    f,
                    "array of {width}x{height} elements of {element_stride} bytes \
                     exceeds the addressable size"
                )
            }
            Self::UnsupportedOrder { order, container } => {
                write!(f, "{container} does not support {order} mapping")
            }
        }
    }
}

impl Error for ArrayError {}
