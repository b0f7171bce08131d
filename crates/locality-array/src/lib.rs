//! Flat and block-decomposed 2D arrays with explicit traversal orders.
//!
//! Both containers address cells by `(col, row)` and hand every logical
//! cell to a caller-supplied visitor exactly once, in an order that is
//! part of their contract.
//!
//! # Containers
//!
//! - [`FlatArray2D`]: one contiguous row-major buffer; row-major and
//!   column-major traversal.
//! - [`BlockedArray2D`]: a grid of square contiguous tiles; block-major
//!   traversal that finishes each tile before moving to the next.
//!
//! # Choosing a layout at run time
//!
//! [`Storage`] builds either container behind a `Box<dyn Array2<T>>`, and
//! [`BlockSizing`] picks the tile size, either explicitly or from a
//! per-tile memory budget.
//!
//! ```
//! use locality_array::{BlockSizing, Storage};
//! use locality_core::MapOrder;
//!
//! let mut grid = Storage::Blocked(BlockSizing::Fixed(16)).create::<u32>(100, 60).unwrap();
//! grid.map(MapOrder::BlockMajor, &mut |col, row, v| *v = (col + row) as u32).unwrap();
//! assert_eq!(*grid.at(99, 59), 158);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blocked;
pub mod config;
pub mod flat;
pub mod index;
pub mod storage;

#[cfg(test)]
pub(crate) mod compliance;

pub use blocked::BlockedArray2D;
pub use config::BlockSizing;
pub use flat::FlatArray2D;
pub use storage::Storage;
