//! Test fixtures and visit recorders for locality development.
//!
//! Provides [`VisitLog`] for observing what a traversal did, plus the
//! grid builders in [`fixtures`] that the array, transform and codec
//! tests share.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use locality_core::{Array2, ArrayError, MapOrder};

/// Record of the coordinates one traversal reported, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitLog {
    visits: Vec<(usize, usize)>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only traversal of `array` in `order`, logging every visit.
    pub fn record<T>(array: &dyn Array2<T>, order: MapOrder) -> Result<Self, ArrayError> {
        let mut log = Self::new();
        array.for_each(order, &mut |col, row, _| log.visits.push((col, row)))?;
        Ok(log)
    }

    /// Like [`record`](Self::record) but with the mutable traversal.
    pub fn record_mut<T>(array: &mut dyn Array2<T>, order: MapOrder) -> Result<Self, ArrayError> {
        let mut log = Self::new();
        array.map(order, &mut |col, row, _| log.visits.push((col, row)))?;
        Ok(log)
    }

    pub fn visits(&self) -> &[(usize, usize)] {
        &self.visits
    }

    /// `true` if each of the `width * height` cells appears exactly once.
    pub fn covers_exactly_once(&self, width: usize, height: usize) -> bool {
        if self.visits.len() != width * height {
            return false;
        }
        let mut seen = vec![false; width * height];
        for &(col, row) in &self.visits {
            if col >= width || row >= height || seen[row * width + col] {
                return false;
            }
            seen[row * width + col] = true;
        }
        true
    }
}

/// Coordinates of [`VisitLog::record`], for direct comparison.
pub fn collect_visits<T>(
    array: &dyn Array2<T>,
    order: MapOrder,
) -> Result<Vec<(usize, usize)>, ArrayError> {
    Ok(VisitLog::record(array, order)?.visits)
}

/// Array contents as rows of cloned elements, read through `at`.
pub fn rows_of<T: Clone>(array: &dyn Array2<T>) -> Vec<Vec<T>> {
    (0..array.height())
        .map(|row| (0..array.width()).map(|col| array.at(col, row).clone()).collect())
        .collect()
}
