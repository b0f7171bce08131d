//! Array2 trait compliance test helpers.
//!
//! These functions verify that an `Array2` implementation satisfies the
//! addressing and traversal contract. Reused across the flat, blocked and
//! boxed-storage test modules.

use indexmap::IndexSet;
use locality_core::{Array2, ArrayError, MapOrder};

/// Distinct non-zero tag for a cell, so defaults never pass for written values.
fn tag(col: usize, row: usize, width: usize) -> u64 {
    (row * width + col) as u64 + 1
}

/// Assert that writing a distinct tag through `at_mut` for every cell and
/// reading every cell back through `at` reproduces the tags.
pub fn assert_round_trip(array: &mut dyn Array2<u64>) {
    let (width, height) = (array.width(), array.height());
    for row in 0..height {
        for col in 0..width {
            *array.at_mut(col, row) = tag(col, row, width);
        }
    }
    for row in 0..height {
        for col in 0..width {
            assert_eq!(
                *array.at(col, row),
                tag(col, row, width),
                "round trip failed at ({col}, {row})"
            );
        }
    }
}

/// Assert that `for_each(order)` visits every in-bounds cell exactly once.
pub fn assert_each_cell_visited_once(array: &dyn Array2<u64>, order: MapOrder) {
    let (width, height) = (array.width(), array.height());
    let mut seen = IndexSet::new();
    array
        .for_each(order, &mut |col, row, _| {
            assert!(
                col < width && row < height,
                "{order} visited ({col}, {row}) outside {width}x{height}"
            );
            assert!(
                seen.insert((col, row)),
                "{order} visited ({col}, {row}) twice"
            );
        })
        .expect("order reported as supported");
    assert_eq!(seen.len(), array.cell_count(), "{order} missed cells");
}

/// Assert that the visitor receives the element stored at the coordinate
/// it is given, and that writes through the visitor land there.
pub fn assert_visitor_sees_stored_element(array: &mut dyn Array2<u64>, order: MapOrder) {
    assert_round_trip(array);
    let width = array.width();
    array
        .for_each(order, &mut |col, row, v| {
            assert_eq!(
                *v,
                tag(col, row, width),
                "{order} element mismatch at ({col}, {row})"
            );
        })
        .expect("order reported as supported");

    array
        .map(order, &mut |col, row, v| *v = tag(col, row, width) * 2)
        .expect("order reported as supported");
    for row in 0..array.height() {
        for col in 0..width {
            assert_eq!(*array.at(col, row), tag(col, row, width) * 2);
        }
    }
}

/// Assert that `map` and `for_each` walk the same coordinate sequence.
pub fn assert_map_and_for_each_agree(array: &mut dyn Array2<u64>, order: MapOrder) {
    let mut by_ref = Vec::new();
    array
        .for_each(order, &mut |col, row, _| by_ref.push((col, row)))
        .expect("order reported as supported");
    let mut by_mut = Vec::new();
    array
        .map(order, &mut |col, row, _| by_mut.push((col, row)))
        .expect("order reported as supported");
    assert_eq!(by_ref, by_mut, "{order}: map and for_each disagree");
}

/// Assert that unsupported orders are rejected without calling the visitor.
pub fn assert_unsupported_orders_rejected(array: &mut dyn Array2<u64>) {
    for order in MapOrder::ALL {
        if array.supports(order) {
            continue;
        }
        let mut calls = 0;
        let result = array.map(order, &mut |_, _, _| calls += 1);
        assert!(
            matches!(result, Err(ArrayError::UnsupportedOrder { order: o, .. }) if o == order),
            "{order} should be rejected, got {result:?}"
        );
        assert_eq!(calls, 0, "visitor ran for rejected {order}");
    }
}

/// Assert that the default order is supported and `map_default` uses it.
pub fn assert_default_order_consistent(array: &mut dyn Array2<u64>) {
    let order = array.default_order();
    assert!(array.supports(order), "default order {order} not supported");
    let mut explicit = Vec::new();
    array
        .for_each(order, &mut |col, row, _| explicit.push((col, row)))
        .expect("default order is supported");
    let mut implicit = Vec::new();
    array.for_each_default(&mut |col, row, _| implicit.push((col, row)));
    let mut mapped = Vec::new();
    array.map_default(&mut |col, row, _| mapped.push((col, row)));
    assert_eq!(explicit, implicit);
    assert_eq!(explicit, mapped);
}

/// Run every compliance check on an array.
pub fn run_full_compliance(array: &mut dyn Array2<u64>) {
    assert_eq!(array.element_stride(), 8);
    assert_round_trip(array);
    assert_unsupported_orders_rejected(array);
    assert_default_order_consistent(array);
    for order in array.supported_orders() {
        assert_each_cell_visited_once(array, order);
        assert_visitor_sees_stored_element(array, order);
        assert_map_and_for_each_agree(array, order);
    }
}
