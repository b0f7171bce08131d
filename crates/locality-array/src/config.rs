//! Block-size policy for blocked arrays.

use locality_core::ArrayError;

/// How a [`BlockedArray2D`](crate::BlockedArray2D) chooses its block size.
///
/// Either an explicit side length, or a memory budget per tile from
/// which the largest square tile that fits is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockSizing {
    /// Tiles of exactly this many cells per side.
    Fixed(usize),
    /// Tiles whose `block_size² * element_stride` stays within this many bytes.
    TargetBytes(usize),
}

impl BlockSizing {
    /// Default per-tile memory budget: 64 KiB.
    ///
    /// Small enough that one tile of 3-channel pixels stays resident in a
    /// typical L2 cache while it is being processed.
    pub const DEFAULT_TARGET_BYTES_PER_BLOCK: usize = 64 * 1024;

    /// Resolve the policy to a concrete block size for elements of
    /// `element_stride` bytes.
    ///
    /// Returns `Err(ArrayError::ZeroBlockSize)` for `Fixed(0)` and
    /// `Err(ArrayError::ZeroSizedElement)` when `element_stride` is 0.
    pub fn block_size(self, element_stride: usize) -> Result<usize, ArrayError> {
        match self {
            Self::Fixed(0) => Err(ArrayError::ZeroBlockSize),
            Self::Fixed(size) => Ok(size),
            Self::TargetBytes(target) => block_size_for_target(element_stride, target),
        }
    }
}

impl Default for BlockSizing {
    fn default() -> Self {
        Self::TargetBytes(Self::DEFAULT_TARGET_BYTES_PER_BLOCK)
    }
}

/// Largest square tile side whose tile fits in `target_bytes_per_block`.
///
/// Computes `floor(sqrt(target_bytes_per_block / element_stride))`, clamped
/// to at least 1. With the clamp, a budget smaller than one element still
/// yields single-cell tiles rather than an error.
///
/// # Examples
///
/// ```
/// use locality_array::config::block_size_for_target;
///
/// assert_eq!(block_size_for_target(4, 65536).unwrap(), 128);
/// assert_eq!(block_size_for_target(6, 65536).unwrap(), 104);
/// assert_eq!(block_size_for_target(8, 4).unwrap(), 1);
/// ```
pub fn block_size_for_target(
    element_stride: usize,
    target_bytes_per_block: usize,
) -> Result<usize, ArrayError> {
    if element_stride == 0 {
        return Err(ArrayError::ZeroSizedElement);
    }
    Ok((target_bytes_per_block / element_stride).isqrt().max(1))
}
