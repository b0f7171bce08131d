//! PPM image codec backed by locality arrays.
//!
//! Reads plain (`P3`) and raw (`P6`) portable pixmaps into a [`Pixmap`]
//! whose pixels live in any [`Storage`](locality_array::Storage) layout,
//! and writes them back out.
//!
//! # Architecture
//!
//! - [`read_ppm`] decodes from any `BufRead` source
//! - [`write_ppm`] encodes raw `P6` to any `Write` sink
//! - [`codec`] holds the header grammar and sample encoding
//!
//! # Format
//!
//! ```text
//! P6 <ws> width <ws> height <ws> maxval <single ws> raster
//! ```
//!
//! Samples are 1 byte when `maxval < 256`, else 2 bytes big-endian.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod reader;
pub mod types;
pub mod writer;

pub use codec::{PpmFormat, PpmHeader};
pub use error::PnmError;
pub use reader::read_ppm;
pub use types::{Pixmap, Rgb};
pub use writer::{write_ppm, write_ppm_as};
