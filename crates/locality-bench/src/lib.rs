//! Benchmark profiles for comparing traversal orders.
//!
//! - [`REFERENCE_DIMS`]: a 1024x768 image, small enough for quick runs
//! - [`STRESS_DIMS`]: a 4096x4096 grid whose rows span many pages, so
//!   column-major traversal falls out of cache
//! - [`order_storages`]: each traversal order paired with the storage
//!   that supports it
//! - [`reference_image`] / [`random_grid`]: deterministic contents via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use locality_array::Storage;
use locality_core::{Array2, ArrayError, MapOrder};
use locality_pnm::{Pixmap, Rgb};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `(width, height)` of the reference image.
pub const REFERENCE_DIMS: (usize, usize) = (1024, 768);

/// `(width, height)` of the stress grid.
pub const STRESS_DIMS: (usize, usize) = (4096, 4096);

/// Every traversal order with the default storage that supports it.
pub fn order_storages() -> [(MapOrder, Storage); 3] {
    MapOrder::ALL.map(|order| (order, Storage::for_order(order)))
}

/// A `width x height` grid of random `u32` from `seed`.
pub fn random_grid(
    storage: Storage,
    width: usize,
    height: usize,
    seed: u64,
) -> Result<Box<dyn Array2<u32>>, ArrayError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = storage.create::<u32>(width, height)?;
    grid.map_default(&mut |_, _, cell| *cell = rng.random());
    Ok(grid)
}

/// A [`REFERENCE_DIMS`] image with 8-bit random pixels from `seed`.
pub fn reference_image(storage: Storage, seed: u64) -> Result<Pixmap, ArrayError> {
    let (width, height) = REFERENCE_DIMS;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pixmap = Pixmap::new(width, height, 255, storage)?;
    pixmap.pixels_mut().map_default(&mut |_, _, px| {
        let [red, green, blue] = rng.random::<[u8; 3]>();
        *px = Rgb::new(red.into(), green.into(), blue.into());
    });
    Ok(pixmap)
}
