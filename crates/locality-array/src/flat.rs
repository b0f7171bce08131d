//! Flat row-major 2D array.

use std::ops::{ControlFlow, Index, IndexMut};

use locality_core::{out_of_bounds, Array2, ArrayError, MapOrder, OrderSet};
use smallvec::smallvec;

use crate::index::{checked_cell_count, col_major_coord, linear_index, row_major_coord};

/// A `width x height` array stored in one contiguous row-major buffer.
///
/// Cell `(col, row)` lives at linear index `row * width + col`. Row-major
/// traversal walks the buffer front to back; column-major traversal
/// strides through it `width` elements at a time.
///
/// # Examples
///
/// ```
/// use locality_array::FlatArray2D;
///
/// let mut grid = FlatArray2D::<u32>::new(3, 2).unwrap();
/// *grid.at_mut(2, 1) = 7;
/// assert_eq!(grid[(2, 1)], 7);
///
/// let mut seen = Vec::new();
/// grid.for_each_col_major(|col, row, _| seen.push((col, row)));
/// assert_eq!(seen[..3], [(0, 0), (0, 1), (1, 0)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatArray2D<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> FlatArray2D<T> {
    /// Create a `width x height` array of `T::default()`.
    ///
    /// Returns `Err(ArrayError::EmptyDimension)` if either dimension is 0,
    /// `Err(ArrayError::ZeroSizedElement)` for zero-sized `T`, or
    /// `Err(ArrayError::CapacityOverflow)` if the buffer would exceed
    /// `isize::MAX` bytes.
    pub fn new(width: usize, height: usize) -> Result<Self, ArrayError>
    where
        T: Default + Clone,
    {
        Self::filled(width, height, T::default())
    }

    /// Create a `width x height` array with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let len = checked_cell_count::<T>(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; len],
        })
    }

    /// Create a `width x height` array whose cell `(col, row)` is `init(col, row)`.
    ///
    /// `init` is called in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut init: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, ArrayError> {
        let len = checked_cell_count::<T>(width, height)?;
        let cells = (0..len)
            .map(|i| {
                let (col, row) = row_major_coord(i, width);
                init(col, row)
            })
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per element.
    pub fn element_stride(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Number of cells, `width * height`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty arrays.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Shared reference to `(col, row)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        if col < self.width && row < self.height {
            Some(&self.cells[linear_index(col, row, self.width)])
        } else {
            None
        }
    }

    /// Mutable reference to `(col, row)`, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut T> {
        if col < self.width && row < self.height {
            Some(&mut self.cells[linear_index(col, row, self.width)])
        } else {
            None
        }
    }

    /// Shared reference to `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= width` or `row >= height`.
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

    /// The cells of one row, contiguous in memory.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[track_caller]
    pub fn row(&self, row: usize) -> &[T] {
        if row >= self.height {
            out_of_bounds(0, row, self.width, self.height);
        }
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Mutable cells of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[track_caller]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        if row >= self.height {
            out_of_bounds(0, row, self.width, self.height);
        }
        let start = row * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// The whole buffer in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// The whole buffer in row-major order, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    // ── Row-major ───────────────────────────────────────────────

    /// Visit every cell in row-major order with mutable access.
    ///
    /// For `i` in `0..width*height` the visitor sees
    /// `(i % width, i / width)`. Traversal order and memory order coincide.
    pub fn map_row_major(&mut self, mut visit: impl FnMut(usize, usize, &mut T)) {
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let (col, row) = row_major_coord(i, width);
            visit(col, row, cell);
        }
    }

    /// Visit every cell in row-major order, read-only.
    pub fn for_each_row_major(&self, mut visit: impl FnMut(usize, usize, &T)) {
        let width = self.width;
        for (i, cell) in self.cells.iter().enumerate() {
            let (col, row) = row_major_coord(i, width);
            visit(col, row, cell);
        }
    }

    /// Row-major traversal that stops at the first `Break`.
    ///
    /// This is an extension of the traversal contract: unlike
    /// [`map_row_major`](Self::map_row_major) it may visit fewer than
    /// `width * height` cells.
    pub fn try_map_row_major<B>(
        &mut self,
        mut visit: impl FnMut(usize, usize, &mut T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let (col, row) = row_major_coord(i, width);
            if let ControlFlow::Break(b) = visit(col, row, cell) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }

    /// Read-only row-major traversal that stops at the first `Break`.
    pub fn try_for_each_row_major<B>(
        &self,
        mut visit: impl FnMut(usize, usize, &T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let width = self.width;
        for (i, cell) in self.cells.iter().enumerate() {
            let (col, row) = row_major_coord(i, width);
            if let ControlFlow::Break(b) = visit(col, row, cell) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }

    // ── Column-major ────────────────────────────────────────────

    /// Visit every cell in column-major order with mutable access.
    ///
    /// For `i` in `0..width*height` the visitor sees
    /// `(i / height, i % height)`: columns in ascending order, rows
    /// ascending within each column. Consecutive visits are `width`
    /// elements apart in memory.
    pub fn map_col_major(&mut self, mut visit: impl FnMut(usize, usize, &mut T)) {
        let (width, height) = (self.width, self.height);
        for i in 0..self.cells.len() {
            let (col, row) = col_major_coord(i, height);
            visit(col, row, &mut self.cells[linear_index(col, row, width)]);
        }
    }

    /// Visit every cell in column-major order, read-only.
    pub fn for_each_col_major(&self, mut visit: impl FnMut(usize, usize, &T)) {
        let (width, height) = (self.width, self.height);
        for i in 0..self.cells.len() {
            let (col, row) = col_major_coord(i, height);
            visit(col, row, &self.cells[linear_index(col, row, width)]);
        }
    }

    /// Column-major traversal that stops at the first `Break`.
    pub fn try_map_col_major<B>(
        &mut self,
        mut visit: impl FnMut(usize, usize, &mut T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let (width, height) = (self.width, self.height);
        for i in 0..self.cells.len() {
            let (col, row) = col_major_coord(i, height);
            let cell = &mut self.cells[linear_index(col, row, width)];
            if let ControlFlow::Break(b) = visit(col, row, cell) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }

    /// Read-only column-major traversal that stops at the first `Break`.
    pub fn try_for_each_col_major<B>(
        &self,
        mut visit: impl FnMut(usize, usize, &T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let (width, height) = (self.width, self.height);
        for i in 0..self.cells.len() {
            let (col, row) = col_major_coord(i, height);
            let cell = &self.cells[linear_index(col, row, width)];
            if let ControlFlow::Break(b) = visit(col, row, cell) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }
}

impl<T> Index<(usize, usize)> for FlatArray2D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (col, row): (usize, usize)) -> &T {
        self.at(col, row)
    }
}

impl<T> IndexMut<(usize, usize)> for FlatArray2D<T> {
    #[track_caller]
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut T {
        self.at_mut(col, row)
    }
}

impl<T> Array2<T> for FlatArray2D<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, col: usize, row: usize) -> Option<&T> {
        FlatArray2D::get(self, col, row)
    }

    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut T> {
        FlatArray2D::get_mut(self, col, row)
    }

    fn supported_orders(&self) -> OrderSet {
        smallvec![MapOrder::RowMajor, MapOrder::ColMajor]
    }

    fn default_order(&self) -> MapOrder {
        MapOrder::RowMajor
    }

    fn map(
        &mut self,
        order: MapOrder,
        visit: &mut dyn FnMut(usize, usize, &mut T),
    ) -> Result<(), ArrayError> {
        match order {
            MapOrder::RowMajor => self.map_row_major(visit),
            MapOrder::ColMajor => self.map_col_major(visit),
            MapOrder::BlockMajor => {
                return Err(ArrayError::UnsupportedOrder {
                    order,
                    container: "plain array",
                })
            }
        }
        Ok(())
    }

    fn for_each(
        &self,
        order: MapOrder,
        visit: &mut dyn FnMut(usize, usize, &T),
    ) -> Result<(), ArrayError> {
        match order {
            MapOrder::RowMajor => self.for_each_row_major(visit),
            MapOrder::ColMajor => self.for_each_col_major(visit),
            MapOrder::BlockMajor => {
                return Err(ArrayError::UnsupportedOrder {
                    order,
                    container: "plain array",
                })
            }
        }
        Ok(())
    }

    fn map_default(&mut self, visit: &mut dyn FnMut(usize, usize, &mut T)) {
        self.map_row_major(visit);
    }

    fn for_each_default(&self, visit: &mut dyn FnMut(usize, usize, &T)) {
        self.for_each_row_major(visit);
    }
}
