//! Rotations, flips and transposes over locality arrays.
//!
//! A [`Transform`] is a pure coordinate mapping. [`apply_transform`]
//! drives it with a full traversal of the source array, copying each
//! element into a destination array of the matching shape. Choosing the
//! traversal order and storage layout changes only how memory is touched,
//! never the result, which makes the transforms a convenient workload
//! for comparing the orders.
//!
//! ```
//! use locality_array::{FlatArray2D, Storage};
//! use locality_core::MapOrder;
//! use locality_transform::{apply_transform, Transform};
//!
//! let src = FlatArray2D::from_fn(3, 2, |col, row| row * 3 + col).unwrap();
//! let out = apply_transform(&src, Storage::Plain, Transform::Transpose, MapOrder::ColMajor).unwrap();
//! assert_eq!((out.width(), out.height()), (2, 3));
//! assert_eq!(*out.at(1, 2), 5);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod apply;
pub mod error;
pub mod transform;

pub use apply::{apply_transform, transform_into};
pub use error::TransformError;
pub use transform::Transform;
