//! Per-cell geometric transforms.

use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;

/// A geometric transform that moves every cell to a new coordinate.
///
/// Each variant is a pure coordinate mapping: [`destination`](Self::destination)
/// says where the cell at `(col, row)` of a `width x height` source ends up
/// in an array of [`output_dims`](Self::output_dims).
///
/// # Examples
///
/// ```
/// use locality_transform::Transform;
///
/// let t = Transform::from_rotation(90).unwrap();
/// assert_eq!(t.output_dims(4, 3), (3, 4));
/// // The top-left corner moves to the top-right.
/// assert_eq!(t.destination(0, 0, 4, 3), (2, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Identity copy.
    Rotate0,
    /// Quarter turn clockwise.
    Rotate90,
    /// Half turn.
    Rotate180,
    /// Quarter turn counter-clockwise.
    Rotate270,
    /// Mirror left to right.
    FlipHorizontal,
    /// Mirror top to bottom.
    FlipVertical,
    /// Swap rows and columns.
    Transpose,
}

impl Transform {
    /// Every transform.
    pub const ALL: [Transform; 7] = [
        Self::Rotate0,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::Transpose,
    ];

    /// The clockwise rotation by `degrees`.
    ///
    /// Only 0, 90, 180 and 270 are accepted.
    pub fn from_rotation(degrees: u32) -> Result<Self, TransformError> {
        match degrees {
            0 => Ok(Self::Rotate0),
            90 => Ok(Self::Rotate90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Rotate270),
            _ => Err(TransformError::InvalidRotation { degrees }),
        }
    }

    /// The flip named `horizontal` or `vertical`.
    pub fn from_flip(name: &str) -> Result<Self, TransformError> {
        match name {
            "horizontal" => Ok(Self::FlipHorizontal),
            "vertical" => Ok(Self::FlipVertical),
            _ => Err(TransformError::UnknownFlip {
                name: name.to_string(),
            }),
        }
    }

    /// Stable name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Rotate0 => "rotate-0",
            Self::Rotate90 => "rotate-90",
            Self::Rotate180 => "rotate-180",
            Self::Rotate270 => "rotate-270",
            Self::FlipHorizontal => "flip-horizontal",
            Self::FlipVertical => "flip-vertical",
            Self::Transpose => "transpose",
        }
    }

    /// `true` if the output has width and height exchanged.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270 | Self::Transpose)
    }

    /// `(width, height)` of the output for a `width x height` input.
    pub fn output_dims(self, width: usize, height: usize) -> (usize, usize) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Where the source cell `(col, row)` of a `width x height` array lands.
    ///
    /// `col < width` and `row < height` are the caller's responsibility.
    #[inline]
    pub fn destination(
        self,
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    ) -> (usize, usize) {
        match self {
            Self::Rotate0 => (col, row),
            Self::Rotate90 => (height - row - 1, col),
            Self::Rotate180 => (width - col - 1, height - row - 1),
            Self::Rotate270 => (row, width - col - 1),
            Self::FlipHorizontal => (width - 1 - col, row),
            Self::FlipVertical => (col, height - 1 - row),
            Self::Transpose => (row, col),
        }
    }

    /// The transform that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate270 => Self::Rotate90,
            other => other,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| TransformError::UnknownTransform {
                name: s.to_string(),
            })
    }
}
