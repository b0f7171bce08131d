//! The polymorphic array interface.

use smallvec::SmallVec;

use crate::error::ArrayError;
use crate::order::MapOrder;

/// The traversal orders a container supports. Never more than three.
pub type OrderSet = SmallVec<[MapOrder; 3]>;

/// A fixed-shape two-dimensional array addressed by `(col, row)`.
///
/// This is the interface callers program against when the storage
/// layout is picked at run time (plain or blocked). It is object safe:
/// visitors are passed as `&mut dyn FnMut`, so a `Box<dyn Array2<T>>`
/// works anywhere a concrete container does.
///
/// The visitor receives the logical coordinate and a reference to the
/// element. Any context the visitor needs is whatever the closure
/// captures.
///
/// # Panics
///
/// [`at`](Self::at) and [`at_mut`](Self::at_mut) panic when the
/// coordinate lies outside `width x height`. There is no clipping or
/// wraparound on direct access.
pub trait Array2<T> {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Bytes occupied by one stored element.
    fn element_stride(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Number of logical cells, `width * height`.
    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// `true` if `(col, row)` lies inside the logical extent.
    fn contains(&self, col: usize, row: usize) -> bool {
        col < self.width() && row < self.height()
    }

    /// Shared reference to the element at `(col, row)`, or `None` if out of range.
    fn get(&self, col: usize, row: usize) -> Option<&T>;

    /// Mutable reference to the element at `(col, row)`, or `None` if out of range.
    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut T>;

    /// Shared reference to the element at `(col, row)`.
    #[track_caller]
    fn at(&self, col: usize, row: usize) -> &T {
        match self.get(col, row) {
            Some(elem) => elem,
            None => out_of_bounds(col, row, self.width(), self.height()),
        }
    }

    /// Mutable reference to the element at `(col, row)`.
    #[track_caller]
    fn at_mut(&mut self, col: usize, row: usize) -> &mut T {
        let (width, height) = (self.width(), self.height());
        match self.get_mut(col, row) {
            Some(elem) => elem,
            None => out_of_bounds(col, row, width, height),
        }
    }

    /// Orders accepted by [`map`](Self::map) and [`for_each`](Self::for_each).
    fn supported_orders(&self) -> OrderSet;

    /// The order that best matches the physical layout.
    fn default_order(&self) -> MapOrder;

    /// `true` if `order` is in [`supported_orders`](Self::supported_orders).
    fn supports(&self, order: MapOrder) -> bool {
        self.supported_orders().contains(&order)
    }

    /// Visit every logical cell exactly once in `order`, with mutable access.
    ///
    /// Returns [`ArrayError::UnsupportedOrder`] without visiting anything
    /// if the container cannot traverse in `order`.
    fn map(
        &mut self,
        order: MapOrder,
        visit: &mut dyn FnMut(usize, usize, &mut T),
    ) -> Result<(), ArrayError>;

    /// Visit every logical cell exactly once in `order`, read-only.
    fn for_each(
        &self,
        order: MapOrder,
        visit: &mut dyn FnMut(usize, usize, &T),
    ) -> Result<(), ArrayError>;

    /// [`map`](Self::map) in the [`default_order`](Self::default_order).
    fn map_default(&mut self, visit: &mut dyn FnMut(usize, usize, &mut T));

    /// [`for_each`](Self::for_each) in the [`default_order`](Self::default_order).
    fn for_each_default(&self, visit: &mut dyn FnMut(usize, usize, &T));
}

/// Panic for an out-of-range coordinate.
///
/// Shared by every container so the message is identical no matter
/// which layout rejected the access.
#[cold]
#[track_caller]
pub fn out_of_bounds(col: usize, row: usize, width: usize, height: usize) -> ! {
    panic!("coordinate (col {col}, row {row}) out of bounds for {width}x{height} array")
}
