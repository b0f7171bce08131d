//! Error types for the PPM codec.

use std::fmt;
use std::io;

use locality_core::ArrayError;

/// Errors that can occur while reading or writing a PPM image.
#[derive(Debug)]
pub enum PnmError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not start with `P3` or `P6`.
    BadMagic {
        /// The first two bytes found.
        found: [u8; 2],
    },
    /// The header could not be parsed.
    MalformedHeader {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A plain (`P3`) sample is not a decimal number.
    MalformedRaster {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A sample exceeds the image's maximum value.
    SampleOutOfRange {
        /// The offending sample.
        value: u32,
        /// The image's maximum sample value.
        maxval: u16,
    },
    /// The raster ended before every pixel was read.
    Truncated {
        /// Pixels the header promised.
        expected: usize,
        /// Complete pixels actually present.
        found: usize,
    },
    /// The pixel array could not be created.
    Array(ArrayError),
}

impl fmt::Display for PnmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::BadMagic { found } => write!(
                f,
                "bad magic {:?} (expected \"P3\" or \"P6\")",
                String::from_utf8_lossy(found)
            ),
            Self::MalformedHeader { detail } => write!(f, "malformed header: {detail}"),
            Self::MalformedRaster { detail } => write!(f, "malformed raster: {detail}"),
            Self::SampleOutOfRange { value, maxval } => {
                write!(f, "sample {value} exceeds maximum value {maxval}")
            }
            Self::Truncated { expected, found } => {
                write!(f, "truncated raster: {found} of {expected} pixels present")
            }
            Self::Array(e) => write!(f, "pixel array: {e}"),
        }
    }
}

impl std::error::Error for PnmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Array(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PnmError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ArrayError> for PnmError {
    fn from(e: ArrayError) -> Self {
        Self::Array(e)
    }
}
