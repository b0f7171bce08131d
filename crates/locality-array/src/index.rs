//! Shared index arithmetic for the flat and blocked layouts.

use locality_core::ArrayError;

/// Validate the dimensions of a `width x height` array of `T` and return
/// the number of cells.
///
/// Rejects zero dimensions, zero-sized element types, and sizes whose
/// byte count would not fit in `isize::MAX` (the `Vec` allocation limit).
pub(crate) fn checked_cell_count<T>(width: usize, height: usize) -> Result<usize, ArrayError> {
    if width == 0 {
        return Err(ArrayError::EmptyDimension { name: "width" });
    }
    if height == 0 {
        return Err(ArrayError::EmptyDimension { name: "height" });
    }
    let element_stride = std::mem::size_of::<T>();
    if element_stride == 0 {
        return Err(ArrayError::ZeroSizedElement);
    }
    let overflow = ArrayError::CapacityOverflow {
        width,
        height,
        element_stride,
    };
    let cells = width.checked_mul(height).ok_or(overflow.clone())?;
    let bytes = cells.checked_mul(element_stride).ok_or(overflow.clone())?;
    if bytes > isize::MAX as usize {
        return Err(overflow);
    }
    Ok(cells)
}

/// Linear index of `(col, row)` in a row-major buffer of the given width.
#[inline]
pub(crate) fn linear_index(col: usize, row: usize, width: usize) -> usize {
    row * width + col
}

/// `(col, row)` of the `i`-th cell in row-major order: column varies fastest.
#[inline]
pub fn row_major_coord(i: usize, width: usize) -> (usize, usize) {
    (i % width, i / width)
}

/// `(col, row)` of the `i`-th cell in column-major order: row varies fastest.
#[inline]
pub fn col_major_coord(i: usize, height: usize) -> (usize, usize) {
    (i / height, i % height)
}

/// Number of tiles of side `block` needed to cover `len` cells.
#[inline]
pub(crate) fn blocks_covering(len: usize, block: usize) -> usize {
    len.div_ceil(block)
}

/// How many cells of the tile starting at `origin` along an axis of
/// length `len` lie inside the logical extent.
///
/// Interior tiles see the full `block`; edge tiles see the remainder.
#[inline]
pub(crate) fn visible_span(origin: usize, block: usize, len: usize) -> usize {
    block.min(len - origin)
}
