//! Applying a transform by traversing the source array.

use locality_array::Storage;
use locality_core::{Array2, MapOrder};

use crate::error::TransformError;
use crate::transform::Transform;

/// Transform `src` into a freshly created array.
///
/// The destination is built by `storage` with the transform's output
/// dimensions. `src` is walked in `order`, and each element is copied to
/// its destination coordinate. The result does not depend on `order`;
/// only the memory access pattern does.
///
/// Returns `Err(TransformError::Array)` if `src` does not support `order`
/// or the destination cannot be created.
pub fn apply_transform<T>(
    src: &dyn Array2<T>,
    storage: Storage,
    transform: Transform,
    order: MapOrder,
) -> Result<Box<dyn Array2<T>>, TransformError>
where
    T: Clone + Default + 'static,
{
    let (width, height) = transform.output_dims(src.width(), src.height());
    let mut dst = storage.create::<T>(width, height)?;
    log::debug!(
        "{transform}: {}x{} -> {width}x{height}, {order} over {} storage",
        src.width(),
        src.height(),
        storage.name()
    );
    transform_into(src, dst.as_mut(), transform, order)?;
    Ok(dst)
}

/// Transform `src` into an existing destination array.
///
/// `dst` must already have the transform's output dimensions.
pub fn transform_into<T: Clone>(
    src: &dyn Array2<T>,
    dst: &mut dyn Array2<T>,
    transform: Transform,
    order: MapOrder,
) -> Result<(), TransformError> {
    let (width, height) = (src.width(), src.height());
    let expected = transform.output_dims(width, height);
    let found = (dst.width(), dst.height());
    if expected != found {
        return Err(TransformError::DimensionMismatch { expected, found });
    }
    src.for_each(order, &mut |col, row, elem| {
        let (dst_col, dst_row) = transform.destination(col, row, width, height);
        *dst.at_mut(dst_col, dst_row) = elem.clone();
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use locality_array::{BlockSizing, FlatArray2D};
    use locality_core::ArrayError;

    fn three_by_two() -> FlatArray2D<u32> {
        FlatArray2D::from_fn(3, 2, |col, row| (row * 3 + col) as u32).unwrap()
    }

    fn rows(a: &dyn Array2<u32>) -> Vec<Vec<u32>> {
        (0..a.height())
            .map(|row| (0..a.width()).map(|col| *a.at(col, row)).collect())
            .collect()
    }

    #[test]
    fn rotate_90_three_by_two() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let out = apply_transform(
            &three_by_two(),
            Storage::Plain,
            Transform::Rotate90,
            MapOrder::RowMajor,
        )
        .unwrap();
        assert_eq!(rows(out.as_ref()), [vec![3, 0], vec![4, 1], vec![5, 2]]);
    }

    #[test]
    fn rotate_270_three_by_two() {
        let out = apply_transform(
            &three_by_two(),
            Storage::Plain,
            Transform::Rotate270,
            MapOrder::ColMajor,
        )
        .unwrap();
        assert_eq!(rows(out.as_ref()), [vec![2, 5], vec![1, 4], vec![0, 3]]);
    }

    #[test]
    fn flips_and_transpose_three_by_two() {
        let src = three_by_two();
        let plain = |t| apply_transform(&src, Storage::Plain, t, MapOrder::RowMajor).unwrap();
        let flip_h = plain(Transform::FlipHorizontal);
        assert_eq!(rows(flip_h.as_ref()), [vec![2, 1, 0], vec![5, 4, 3]]);
        let flip_v = plain(Transform::FlipVertical);
        assert_eq!(rows(flip_v.as_ref()), [vec![3, 4, 5], vec![0, 1, 2]]);
        let t = plain(Transform::Transpose);
        assert_eq!(rows(t.as_ref()), [vec![0, 3], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn blocked_destination_from_plain_source() {
        let out = apply_transform(
            &three_by_two(),
            Storage::Blocked(BlockSizing::Fixed(2)),
            Transform::Rotate180,
            MapOrder::RowMajor,
        )
        .unwrap();
        assert_eq!(out.default_order(), MapOrder::BlockMajor);
        assert_eq!(rows(out.as_ref()), [vec![5, 4, 3], vec![2, 1, 0]]);
    }

    #[test]
    fn unsupported_order_is_reported() {
        let err = apply_transform(
            &three_by_two(),
            Storage::Plain,
            Transform::Rotate0,
            MapOrder::BlockMajor,
        )
        .err();
        assert!(matches!(
            err,
            Some(TransformError::Array(ArrayError::UnsupportedOrder { .. }))
        ));
    }

    #[test]
    fn wrong_destination_shape_is_rejected() {
        let src = three_by_two();
        let mut dst = FlatArray2D::<u32>::new(3, 2).unwrap();
        let err = transform_into(&src, &mut dst, Transform::Rotate90, MapOrder::RowMajor);
        assert_eq!(
            err,
            Err(TransformError::DimensionMismatch {
                expected: (2, 3),
                found: (3, 2),
            })
        );
    }
}
