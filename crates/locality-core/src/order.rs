//! Traversal orders.

use std::fmt;
use std::str::FromStr;

/// The order in which a full traversal visits the cells of an array.
///
/// The order is part of the traversal contract, not an implementation
/// detail: callers rely on it to line their accesses up with the
/// physical layout of the container.
///
/// # Examples
///
/// ```
/// use locality_core::MapOrder;
///
/// let order: MapOrder = "block-major".parse().unwrap();
/// assert_eq!(order, MapOrder::BlockMajor);
/// assert_eq!(order.to_string(), "block-major");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapOrder {
    /// Column index varies fastest; whole rows are visited in turn.
    RowMajor,
    /// Row index varies fastest; whole columns are visited in turn.
    ColMajor,
    /// Tiles are visited in row-major order over the block grid, and the
    /// cells of each tile in row-major order before moving on.
    BlockMajor,
}

impl MapOrder {
    /// All orders, in declaration order.
    pub const ALL: [MapOrder; 3] = [Self::RowMajor, Self::ColMajor, Self::BlockMajor];

    /// Stable lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::RowMajor => "row-major",
            Self::ColMajor => "column-major",
            Self::BlockMajor => "block-major",
        }
    }
}

impl fmt::Display for MapOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`MapOrder`] name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMapOrderError {
    input: String,
}

impl fmt::Display for ParseMapOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown traversal order '{}' (expected row-major, col-major or block-major)",
            self.input
        )
    }
}

impl std::error::Error for ParseMapOrderError {}

impl FromStr for MapOrder {
    type Err = ParseMapOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" | "row-major" => Ok(Self::RowMajor),
            "col" | "col-major" | "column" | "column-major" => Ok(Self::ColMajor),
            "block" | "block-major" => Ok(Self::BlockMajor),
            _ => Err(ParseMapOrderError {
                input: s.to_string(),
            }),
        }
    }
}
