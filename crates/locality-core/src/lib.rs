//! Core types and traits for locality-aware 2D arrays.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by every container in the workspace: the
//! traversal order ([`MapOrder`]), the error type ([`ArrayError`]) and
//! the polymorphic array interface ([`Array2`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod order;
pub mod traits;

pub use error::ArrayError;
pub use order::{MapOrder, ParseMapOrderError};
pub use traits::{out_of_bounds, Array2, OrderSet};
