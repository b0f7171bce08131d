//! Run-time choice of storage layout.

use locality_core::{Array2, ArrayError, MapOrder};

use crate::blocked::BlockedArray2D;
use crate::config::BlockSizing;
use crate::flat::FlatArray2D;

/// Which container backs a `Box<dyn Array2<T>>`.
///
/// Callers that select the traversal order at run time use this to build
/// arrays whose layout matches the order they will be walked in.
///
/// # Examples
///
/// ```
/// use locality_array::Storage;
/// use locality_core::MapOrder;
///
/// let storage = Storage::for_order(MapOrder::BlockMajor);
/// let grid = storage.create::<u32>(640, 480).unwrap();
/// assert_eq!(grid.default_order(), MapOrder::BlockMajor);
/// assert!(!grid.supports(MapOrder::RowMajor));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Storage {
    /// One contiguous row-major buffer ([`FlatArray2D`]).
    #[default]
    Plain,
    /// Square contiguous tiles ([`BlockedArray2D`]).
    Blocked(BlockSizing),
}

impl Storage {
    /// The storage whose layout suits traversal in `order`.
    ///
    /// Row- and column-major use plain storage; block-major uses blocked
    /// storage with the default tile budget.
    pub fn for_order(order: MapOrder) -> Self {
        match order {
            MapOrder::RowMajor | MapOrder::ColMajor => Self::Plain,
            MapOrder::BlockMajor => Self::Blocked(BlockSizing::default()),
        }
    }

    /// `true` if arrays created by this storage accept `order`.
    pub fn supports(self, order: MapOrder) -> bool {
        match self {
            Self::Plain => order != MapOrder::BlockMajor,
            Self::Blocked(_) => order == MapOrder::BlockMajor,
        }
    }

    /// The order arrays created by this storage traverse natively.
    pub fn default_order(self) -> MapOrder {
        match self {
            Self::Plain => MapOrder::RowMajor,
            Self::Blocked(_) => MapOrder::BlockMajor,
        }
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Blocked(_) => "blocked",
        }
    }

    /// Create a `width x height` array of `T::default()` with this layout.
    pub fn create<T>(self, width: usize, height: usize) -> Result<Box<dyn Array2<T>>, ArrayError>
    where
        T: Default + Clone + 'static,
    {
        log::debug!("creating {} array {width}x{height}", self.name());
        match self {
            Self::Plain => Ok(Box::new(FlatArray2D::<T>::new(width, height)?)),
            Self::Blocked(sizing) => Ok(Box::new(BlockedArray2D::<T>::with_sizing(
                width, height, sizing,
            )?)),
        }
    }
}
