//! Reusable grid fixtures.
//!
//! - [`tagged`]: every cell holds its own row-major index, so any
//!   misplaced copy is visible in the values.
//! - [`seeded`]: deterministic pseudo-random contents from a `u64` seed.
//! - [`all_storages`]: the layouts worth exercising in a test sweep.

use locality_array::{BlockSizing, Storage};
use locality_core::{Array2, ArrayError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Storage layouts covering plain and blocked arrays, including a block
/// size that does not divide typical test dimensions.
pub fn all_storages() -> [Storage; 4] {
    [
        Storage::Plain,
        Storage::Blocked(BlockSizing::Fixed(1)),
        Storage::Blocked(BlockSizing::Fixed(3)),
        Storage::Blocked(BlockSizing::default()),
    ]
}

/// A `width x height` array from `storage` with cell `(col, row)` set to
/// `row * width + col`.
pub fn tagged(
    storage: Storage,
    width: usize,
    height: usize,
) -> Result<Box<dyn Array2<u64>>, ArrayError> {
    let mut array = storage.create::<u64>(width, height)?;
    array.map_default(&mut |col, row, elem| *elem = (row * width + col) as u64);
    Ok(array)
}

/// A `width x height` array from `storage` filled from a seeded generator.
///
/// Cells are generated in row-major order whatever the storage, so two
/// calls with the same seed and dimensions hold equal contents.
pub fn seeded<T>(
    storage: Storage,
    width: usize,
    height: usize,
    seed: u64,
    mut generate: impl FnMut(&mut ChaCha8Rng) -> T,
) -> Result<Box<dyn Array2<T>>, ArrayError>
where
    T: Clone + Default + 'static,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut array = storage.create::<T>(width, height)?;
    for row in 0..height {
        for col in 0..width {
            *array.at_mut(col, row) = generate(&mut rng);
        }
    }
    Ok(array)
}

/// [`seeded`] with uniformly random `u64` cells.
pub fn seeded_u64(
    storage: Storage,
    width: usize,
    height: usize,
    seed: u64,
) -> Result<Box<dyn Array2<u64>>, ArrayError> {
    seeded(storage, width, height, seed, |rng| rng.random())
}
