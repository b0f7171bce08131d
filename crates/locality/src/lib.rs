//! Locality: 2D arrays whose traversal order matches their memory layout.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the locality sub-crates. For most users, adding `locality` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use locality::prelude::*;
//!
//! // A 640x480 grid stored as 64 KiB tiles, walked tile by tile.
//! let storage = Storage::Blocked(BlockSizing::default());
//! let mut grid = storage.create::<u32>(640, 480).unwrap();
//! grid.map(MapOrder::BlockMajor, &mut |col, row, cell| *cell = (col + row) as u32)
//!     .unwrap();
//!
//! // Rotate it a quarter turn into plain storage, reading in block order.
//! let rotated =
//!     apply_transform(grid.as_ref(), Storage::Plain, Transform::Rotate90, MapOrder::BlockMajor)
//!         .unwrap();
//! assert_eq!((rotated.width(), rotated.height()), (480, 640));
//! assert_eq!(*rotated.at(479, 0), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `locality-core` | `Array2` trait, `MapOrder`, `ArrayError` |
//! | [`array`] | `locality-array` | `FlatArray2D`, `BlockedArray2D`, `Storage`, block sizing |
//! | [`transform`] | `locality-transform` | Rotations, flips, transpose |
//! | [`pnm`] | `locality-pnm` | PPM reader and writer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core trait, traversal orders and errors (`locality-core`).
///
/// [`types::Array2`] is the interface every container implements.
pub use locality_core as types;

/// Concrete containers (`locality-array`).
///
/// [`array::FlatArray2D`] keeps one row-major buffer;
/// [`array::BlockedArray2D`] keeps square tiles, each contiguous.
pub use locality_array as array;

/// Geometric transforms (`locality-transform`).
pub use locality_transform as transform;

/// PPM image codec (`locality-pnm`).
///
/// Decode with [`pnm::read_ppm`], encode with [`pnm::write_ppm`].
pub use locality_pnm as pnm;

/// Common imports for typical locality usage.
///
/// ```rust
/// use locality::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use locality_core::{Array2, ArrayError, MapOrder};

    // Containers
    pub use locality_array::{BlockSizing, BlockedArray2D, FlatArray2D, Storage};

    // Transforms
    pub use locality_transform::{apply_transform, Transform, TransformError};

    // Images
    pub use locality_pnm::{read_ppm, write_ppm, Pixmap, PnmError, Rgb};
}
