//! Block-decomposed 2D array.
//!
//! The logical `width x height` grid is cut into square tiles of side
//! `block_size`. Each tile is its own contiguous [`FlatArray2D`], and the
//! tiles themselves sit in a coarser `FlatArray2D` indexed by block
//! coordinate:
//!
//! ```text
//! BlockedArray2D (5x5, block_size 2)
//! └── tiles: FlatArray2D<FlatArray2D<T>>  (3x3 block grid)
//!     ├── (0,0) 2x2  cols 0..2 rows 0..2
//!     ├── (1,0) 2x2  cols 2..4 rows 0..2
//!     ├── (2,0) 2x2  cols 4..5 rows 0..2   <- right half never visited
//!     └── ...
//! ```
//!
//! Edge tiles are allocated at full size. Their cells past the logical
//! extent exist in memory but are unreachable through `at` and are
//! skipped by block-major traversal.

use std::ops::{ControlFlow, Index, IndexMut};

use locality_core::{out_of_bounds, Array2, ArrayError, MapOrder, OrderSet};
use smallvec::smallvec;

use crate::config::{block_size_for_target, BlockSizing};
use crate::flat::FlatArray2D;
use crate::index::{blocks_covering, checked_cell_count, visible_span};

/// A `width x height` array stored as a grid of square contiguous tiles.
///
/// Cell `(col, row)` lives in tile `(col / block_size, row / block_size)`
/// at in-tile offset `(col % block_size, row % block_size)`.
///
/// # Examples
///
/// ```
/// use locality_array::BlockedArray2D;
///
/// let mut grid = BlockedArray2D::<u8>::new(5, 5, 2).unwrap();
/// assert_eq!(grid.block_grid_width(), 3);
/// *grid.at_mut(4, 4) = 9;
///
/// let mut visits = 0;
/// grid.for_each_block_major(|col, row, _| {
///     assert!(col < 5 && row < 5);
///     visits += 1;
/// });
/// assert_eq!(visits, 25);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockedArray2D<T> {
    width: usize,
    height: usize,
    block_size: usize,
    tiles: FlatArray2D<FlatArray2D<T>>,
}

impl<T> BlockedArray2D<T> {
    /// Create a blocked array of `T::default()` with tiles of side `block_size`.
    ///
    /// Returns `Err(ArrayError::EmptyDimension)` if either dimension is 0,
    /// `Err(ArrayError::ZeroBlockSize)` if `block_size` is 0, and
    /// `Err(ArrayError::CapacityOverflow)` if the tiles together would
    /// exceed the addressable size.
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self, ArrayError>
    where
        T: Default + Clone,
    {
        Self::filled(width, height, block_size, T::default())
    }

    /// Create a blocked array with every allocated cell set to `value`.
    ///
    /// All tiles are allocated up front, each as an independent buffer.
    pub fn filled(
        width: usize,
        height: usize,
        block_size: usize,
        value: T,
    ) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        checked_cell_count::<T>(width, height)?;
        if block_size == 0 {
            return Err(ArrayError::ZeroBlockSize);
        }
        let grid_width = blocks_covering(width, block_size);
        let grid_height = blocks_covering(height, block_size);
        check_allocation::<T>(width, height, grid_width, grid_height, block_size)?;

        let prototype = FlatArray2D::filled(block_size, block_size, value)?;
        let tiles = FlatArray2D::filled(grid_width, grid_height, prototype)?;

        log::debug!(
            "blocked array {width}x{height}: {grid_width}x{grid_height} tiles of \
             {block_size}x{block_size}, {} bytes per element",
            std::mem::size_of::<T>()
        );
        Ok(Self {
            width,
            height,
            block_size,
            tiles,
        })
    }

    /// Create a blocked array whose tiles fit in `target_bytes_per_block`.
    ///
    /// The block size is `floor(sqrt(target_bytes_per_block / element_stride))`,
    /// at least 1. See [`block_size_for_target`].
    pub fn with_target_footprint(
        width: usize,
        height: usize,
        target_bytes_per_block: usize,
    ) -> Result<Self, ArrayError>
    where
        T: Default + Clone,
    {
        let block_size = block_size_for_target(std::mem::size_of::<T>(), target_bytes_per_block)?;
        Self::new(width, height, block_size)
    }

    /// Create a blocked array using the given [`BlockSizing`] policy.
    pub fn with_sizing(width: usize, height: usize, sizing: BlockSizing) -> Result<Self, ArrayError>
    where
        T: Default + Clone,
    {
        let block_size = sizing.block_size(std::mem::size_of::<T>())?;
        Self::new(width, height, block_size)
    }

    /// Create a blocked array with the default 64 KiB per-tile budget.
    pub fn with_default_footprint(width: usize, height: usize) -> Result<Self, ArrayError>
    where
        T: Default + Clone,
    {
        Self::with_sizing(width, height, BlockSizing::default())
    }

    /// Number of logical columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of logical rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per element.
    pub fn element_stride(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Side length of every tile.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Tiles per block-grid row, `ceil(width / block_size)`.
    pub fn block_grid_width(&self) -> usize {
        self.tiles.width()
    }

    /// Tiles per block-grid column, `ceil(height / block_size)`.
    pub fn block_grid_height(&self) -> usize {
        self.tiles.height()
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Cells allocated across all tiles, including the unreachable
    /// overhang of edge tiles.
    pub fn allocated_cells(&self) -> usize {
        self.tile_count() * self.block_size * self.block_size
    }

    /// Number of logical cells, `width * height`.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always `false`: construction rejects empty arrays.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The tile at block coordinate `(block_col, block_row)`, if it exists.
    pub fn tile(&self, block_col: usize, block_row: usize) -> Option<&FlatArray2D<T>> {
        self.tiles.get(block_col, block_row)
    }

    /// Shared reference to `(col, row)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let bs = self.block_size;
        self.tiles.at(col / bs, row / bs).get(col % bs, row % bs)
    }

    /// Mutable reference to `(col, row)`, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut T> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let bs = self.block_size;
        self.tiles
            .at_mut(col / bs, row / bs)
            .get_mut(col % bs, row % bs)
    }

    /// Shared reference to `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= width` or `row >= height`, even when the cell
    /// would fall inside the overhang of an edge tile.
    #[inline]
    #[track_caller]
    pub fn at(&self, col: usize, row: usize) -> &T {
        match self.get(col, row) {
            Some(elem) => elem,
            None => out_of_bounds(col, row, self.width, self.height),
        }
    }

    /// Mutable reference to `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= width` or `row >= height`.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, col: usize, row: usize) -> &mut T {
        let (width, height) = (self.width, self.height);
        match self.get_mut(col, row) {
            Some(elem) => elem,
            None => out_of_bounds(col, row, width, height),
        }
    }

    /// Visit every logical cell in block-major order with mutable access.
    ///
    /// Tiles are taken in row-major order over the block grid; within a
    /// tile, cells are taken in row-major order. The visitor receives the
    /// logical coordinate `(block_col * block_size + cell_col,
    /// block_row * block_size + cell_row)` and is only called when that
    /// coordinate is inside `width x height`, so exactly `width * height`
    /// cells are visited.
    pub fn map_block_major(&mut self, mut visit: impl FnMut(usize, usize, &mut T)) {
        let (width, height, bs) = (self.width, self.height, self.block_size);
        self.tiles.map_row_major(|block_col, block_row, tile| {
            let (col0, row0) = (block_col * bs, block_row * bs);
            let cols = visible_span(col0, bs, width);
            for cell_row in 0..visible_span(row0, bs, height) {
                for (cell_col, cell) in tile.row_mut(cell_row)[..cols].iter_mut().enumerate() {
                    visit(col0 + cell_col, row0 + cell_row, cell);
                }
            }
        });
    }

    /// Visit every logical cell in block-major order, read-only.
    pub fn for_each_block_major(&self, mut visit: impl FnMut(usize, usize, &T)) {
        let (width, height, bs) = (self.width, self.height, self.block_size);
        self.tiles.for_each_row_major(|block_col, block_row, tile| {
            let (col0, row0) = (block_col * bs, block_row * bs);
            let cols = visible_span(col0, bs, width);
            for cell_row in 0..visible_span(row0, bs, height) {
                for (cell_col, cell) in tile.row(cell_row)[..cols].iter().enumerate() {
                    visit(col0 + cell_col, row0 + cell_row, cell);
                }
            }
        });
    }

    /// Block-major traversal that stops at the first `Break`.
    ///
    /// An extension of the traversal contract: it may visit fewer than
    /// `width * height` cells.
    pub fn try_map_block_major<B>(
        &mut self,
        mut visit: impl FnMut(usize, usize, &mut T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let (width, height, bs) = (self.width, self.height, self.block_size);
        self.tiles.try_map_row_major(|block_col, block_row, tile| {
            let (col0, row0) = (block_col * bs, block_row * bs);
            let cols = visible_span(col0, bs, width);
            for cell_row in 0..visible_span(row0, bs, height) {
                for (cell_col, cell) in tile.row_mut(cell_row)[..cols].iter_mut().enumerate() {
                    if let ControlFlow::Break(b) = visit(col0 + cell_col, row0 + cell_row, cell) {
                        return ControlFlow::Break(b);
                    }
                }
            }
            ControlFlow::Continue(())
        })
    }

    /// Read-only block-major traversal that stops at the first `Break`.
    pub fn try_for_each_block_major<B>(
        &self,
        mut visit: impl FnMut(usize, usize, &T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let (width, height, bs) = (self.width, self.height, self.block_size);
        let tiles = &self.tiles;
        tiles.try_for_each_row_major(|block_col, block_row, tile| {
            let (col0, row0) = (block_col * bs, block_row * bs);
            let cols = visible_span(col0, bs, width);
            for cell_row in 0..visible_span(row0, bs, height) {
                for (cell_col, cell) in tile.row(cell_row)[..cols].iter().enumerate() {
                    let (col, row) = (col0 + cell_col, row0 + cell_row);
                    if let ControlFlow::Break(b) = visit(col, row, cell) {
                        return ControlFlow::Break(b);
                    }
                }
            }
            ControlFlow::Continue(())
        })
    }
}

/// Reject block grids whose total allocation overflows, before any tile
/// is allocated.
fn check_allocation<T>(
    width: usize,
    height: usize,
    grid_width: usize,
    grid_height: usize,
    block_size: usize,
) -> Result<(), ArrayError> {
    let overflow = || ArrayError::CapacityOverflow {
        width,
        height,
        element_stride: std::mem::size_of::<T>(),
    };
    let padded_width = grid_width.checked_mul(block_size).ok_or_else(overflow)?;
    let padded_height = grid_height.checked_mul(block_size).ok_or_else(overflow)?;
    checked_cell_count::<T>(padded_width, padded_height).map_err(|_| overflow())?;
    Ok(())
}

impl<T> Index<(usize, usize)> for BlockedArray2D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (col, row): (usize, usize)) -> &T {
        self.at(col, row)
    }
}

impl<T> IndexMut<(usize, usize)> for BlockedArray2D<T> {
    #[track_caller]
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut T {
        self.at_mut(col, row)
    }
}

impl<T> Array2<T> for BlockedArray2D<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, col: usize, row: usize) -> Option<&T> {
        BlockedArray2D::get(self, col, row)
    }

    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut T> {
        BlockedArray2D::get_mut(self, col, row)
    }

    fn supported_orders(&self) -> OrderSet {
        smallvec![MapOrder::BlockMajor]
    }

    fn default_order(&self) -> MapOrder {
        MapOrder::BlockMajor
    }

    fn map(
        &mut self,
        order: MapOrder,
        visit: &mut dyn FnMut(usize, usize, &mut T),
    ) -> Result<(), ArrayError> {
        match order {
            MapOrder::BlockMajor => {
                self.map_block_major(visit);
                Ok(())
            }
            MapOrder::RowMajor | MapOrder::ColMajor => Err(ArrayError::UnsupportedOrder {
                order,
                container: "blocked array",
            }),
        }
    }

    fn for_each(
        &self,
        order: MapOrder,
        visit: &mut dyn FnMut(usize, usize, &T),
    ) -> Result<(), ArrayError> {
        match order {
            MapOrder::BlockMajor => {
                self.for_each_block_major(visit);
                Ok(())
            }
            MapOrder::RowMajor | MapOrder::ColMajor => Err(ArrayError::UnsupportedOrder {
                order,
                container: "blocked array",
            }),
        }
    }

    fn map_default(&mut self, visit: &mut dyn FnMut(usize, usize, &mut T)) {
        self.map_block_major(visit);
    }

    fn for_each_default(&self, visit: &mut dyn FnMut(usize, usize, &T)) {
        self.for_each_block_major(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use indexmap::IndexSet;
    use proptest::prelude::*;

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn zero_block_size_is_rejected() {
        assert_eq!(
            BlockedArray2D::<u8>::new(4, 4, 0),
            Err(ArrayError::ZeroBlockSize)
        );
    }

    #[test]
    fn empty_dimensions_are_rejected_before_block_size() {
        assert_eq!(
            BlockedArray2D::<u8>::new(0, 4, 0),
            Err(ArrayError::EmptyDimension { name: "width" })
        );
    }

    #[test]
    fn block_grid_rounds_up() {
        let a = BlockedArray2D::<u32>::new(5, 5, 2).unwrap();
        assert_eq!(a.block_grid_width(), 3);
        assert_eq!(a.block_grid_height(), 3);
        assert_eq!(a.tile_count(), 9);
        assert_eq!(a.allocated_cells(), 36);
        assert_eq!(a.len(), 25);

        let exact = BlockedArray2D::<u32>::new(8, 4, 4).unwrap();
        assert_eq!(exact.block_grid_width(), 2);
        assert_eq!(exact.block_grid_height(), 1);
    }

    #[test]
    fn edge_tiles_are_full_size() {
        let a = BlockedArray2D::<u32>::new(5, 3, 4).unwrap();
        let corner = a.tile(1, 0).unwrap();
        assert_eq!((corner.width(), corner.height()), (4, 4));
        assert!(a.tile(2, 0).is_none());
    }

    #[test]
    fn target_footprint_derives_block_size() {
        let a = BlockedArray2D::<u32>::with_target_footprint(300, 200, 65536).unwrap();
        assert_eq!(a.block_size(), 128);
        assert!(a.block_size() * a.block_size() * a.element_stride() <= 65536);
        assert_eq!((a.block_grid_width(), a.block_grid_height()), (3, 2));
    }

    #[test]
    fn tiny_footprint_clamps_to_one() {
        let a = BlockedArray2D::<u64>::with_target_footprint(3, 3, 1).unwrap();
        assert_eq!(a.block_size(), 1);
        assert_eq!(a.tile_count(), 9);
    }

    #[test]
    fn default_footprint_uses_64k() {
        let a = BlockedArray2D::<[u16; 3]>::with_default_footprint(10, 10).unwrap();
        assert_eq!(a.block_size(), 104);
        assert_eq!(a.tile_count(), 1);
    }

    // ── Addressing ──────────────────────────────────────────────

    #[test]
    fn cell_lands_in_owning_tile_at_offset() {
        let mut a = BlockedArray2D::<u32>::new(5, 5, 2).unwrap();
        *a.at_mut(3, 4) = 77;
        let tile = a.tile(1, 2).unwrap();
        assert_eq!(*tile.at(1, 0), 77);
    }

    #[test]
    fn addresses_are_distinct_and_inside_their_tile() {
        let a = BlockedArray2D::<u64>::new(7, 5, 3).unwrap();
        let mut addrs = IndexSet::new();
        for row in 0..5 {
            for col in 0..7 {
                let p = a.at(col, row) as *const u64;
                let tile = a.tile(col / 3, row / 3).unwrap();
                assert!(tile.as_slice().as_ptr_range().contains(&p));
                assert!(addrs.insert(p as usize));
            }
        }
        assert_eq!(addrs.len(), 35);
    }

    #[test]
    #[should_panic(expected = "(col 5, row 0) out of bounds for 5x5 array")]
    fn overhang_cell_is_not_addressable() {
        // Tile (2, 0) has an allocated cell at offset (1, 0), but it lies
        // outside the logical extent.
        let a = BlockedArray2D::<u32>::new(5, 5, 2).unwrap();
        let _ = a.at(5, 0);
    }

    #[test]
    fn get_is_none_in_overhang() {
        let mut a = BlockedArray2D::<u32>::new(5, 5, 2).unwrap();
        assert!(a.get(4, 5).is_none());
        assert!(a.get_mut(5, 5).is_none());
        assert!(a.get(4, 4).is_some());
    }

    // ── Block-major traversal ───────────────────────────────────

    #[test]
    fn block_major_order_five_by_five_block_two() {
        let a = BlockedArray2D::<u32>::new(5, 5, 2).unwrap();
        let mut seen = Vec::new();
        a.for_each_block_major(|col, row, _| seen.push((col, row)));

        assert_eq!(seen[..4], [(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(seen[4..8], [(2, 0), (3, 0), (2, 1), (3, 1)]);
        // Clipped edge tile.
        assert_eq!(seen[8..10], [(4, 0), (4, 1)]);
        assert_eq!(seen[seen.len() - 1], (4, 4));

        let unique: IndexSet<_> = seen.iter().copied().collect();
        assert_eq!(seen.len(), 25);
        assert_eq!(unique.len(), 25);
        assert!(seen.iter().all(|&(c, r)| c < 5 && r < 5));
    }

    #[test]
    fn block_major_delivers_stored_values() {
        let mut a = BlockedArray2D::<usize>::new(5, 3, 2).unwrap();
        a.map_block_major(|col, row, v| *v = row * 5 + col);
        for row in 0..3 {
            for col in 0..5 {
                assert_eq!(a[(col, row)], row * 5 + col);
            }
        }
    }

    #[test]
    fn overhang_cells_are_never_touched() {
        let mut a = BlockedArray2D::<u32>::filled(3, 3, 2, 0).unwrap();
        a.map_block_major(|_, _, v| *v = 1);
        let corner = a.tile(1, 1).unwrap();
        assert_eq!(corner.as_slice(), &[1, 0, 0, 0]);
    }

    #[test]
    fn block_size_one_matches_row_major_set() {
        let blocked = {
            let mut b = BlockedArray2D::<usize>::new(4, 3, 1).unwrap();
            b.map_block_major(|col, row, v| *v = row * 4 + col);
            b
        };
        let flat = FlatArray2D::from_fn(4, 3, |col, row| row * 4 + col).unwrap();

        let mut from_blocks = IndexSet::new();
        blocked.for_each_block_major(|c, r, v| {
            from_blocks.insert((c, r, *v));
        });
        let mut from_rows = IndexSet::new();
        flat.for_each_row_major(|c, r, v| {
            from_rows.insert((c, r, *v));
        });
        assert_eq!(from_blocks.len(), 12);
        assert!(from_blocks.iter().all(|t| from_rows.contains(t)));
    }

    #[test]
    fn try_map_block_major_breaks_inside_a_tile() {
        let mut a = BlockedArray2D::<u32>::new(4, 4, 2).unwrap();
        let mut visited = Vec::new();
        let flow = a.try_map_block_major(|col, row, v| {
            visited.push((col, row));
            *v = 1;
            if (col, row) == (2, 1) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(visited.len(), 7);
        assert_eq!(a[(3, 1)], 0);
    }

    #[test]
    fn try_for_each_block_major_breaks_in_clipped_edge_tile() {
        let mut a = BlockedArray2D::<usize>::new(5, 5, 2).unwrap();
        a.map_block_major(|col, row, v| *v = col * 10 + row);
        let mut visited = Vec::new();
        let flow = a.try_for_each_block_major(|col, row, v| {
            assert_eq!(*v, col * 10 + row);
            visited.push((col, row));
            if col == 4 {
                ControlFlow::Break(row)
            } else {
                ControlFlow::Continue(())
            }
        });
        // Tiles (0,0) and (1,0) run in full, then the first edge cell stops it.
        assert_eq!(flow, ControlFlow::Break(0));
        assert_eq!(visited.len(), 9);
        assert_eq!(visited.last(), Some(&(4, 0)));
    }

    #[test]
    fn try_for_each_block_major_without_break_covers_the_extent() {
        let a = BlockedArray2D::<u64>::new(5, 5, 2).unwrap();
        let mut seen = IndexSet::new();
        let flow: ControlFlow<()> = a.try_for_each_block_major(|col, row, _| {
            assert!(col < 5 && row < 5, "overhang ({col}, {row})");
            assert!(seen.insert((col, row)));
            ControlFlow::Continue(())
        });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn row_and_col_major_are_unsupported() {
        let a = BlockedArray2D::<u64>::new(3, 3, 2).unwrap();
        for order in [MapOrder::RowMajor, MapOrder::ColMajor] {
            let err = Array2::for_each(&a, order, &mut |_, _, _| {}).unwrap_err();
            let expected = ArrayError::UnsupportedOrder {
                order,
                container: "blocked array",
            };
            assert_eq!(err, expected);
        }
    }

    // ── Array2 contract ─────────────────────────────────────────

    #[test]
    fn compliance_uneven_blocks() {
        compliance::run_full_compliance(&mut BlockedArray2D::<u64>::new(5, 5, 2).unwrap());
        compliance::run_full_compliance(&mut BlockedArray2D::<u64>::new(7, 3, 4).unwrap());
        compliance::run_full_compliance(&mut BlockedArray2D::<u64>::new(2, 9, 16).unwrap());
    }

    proptest! {
        #[test]
        fn round_trip_any_block_size(
            width in 1usize..20,
            height in 1usize..20,
            block_size in 1usize..8,
        ) {
            let mut a = BlockedArray2D::<u64>::new(width, height, block_size).unwrap();
            compliance::assert_round_trip(&mut a);
        }

        #[test]
        fn block_major_visits_each_cell_once(
            width in 1usize..20,
            height in 1usize..20,
            block_size in 1usize..8,
        ) {
            let a = BlockedArray2D::<u8>::new(width, height, block_size).unwrap();
            let mut seen = IndexSet::new();
            let mut visits = 0;
            a.for_each_block_major(|c, r, _| {
                visits += 1;
                seen.insert((c, r));
            });
            prop_assert_eq!(visits, width * height);
            prop_assert_eq!(seen.len(), width * height);
            prop_assert!(seen.iter().all(|&(c, r)| c < width && r < height));
        }
    }
}
