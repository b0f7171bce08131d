//! Criterion micro-benchmarks for full traversals in each order.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use locality_array::{BlockSizing, FlatArray2D, Storage};
use locality_bench::{order_storages, random_grid, STRESS_DIMS};

/// Benchmark: read every cell of a 4096x4096 grid through `dyn Array2`.
fn bench_for_each_by_order(c: &mut Criterion) {
    let (width, height) = STRESS_DIMS;
    let mut group = c.benchmark_group("for_each_4096");
    group.throughput(Throughput::Elements((width * height) as u64));
    for (order, storage) in order_storages() {
        let grid = random_grid(storage, width, height, 42).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(order), &grid, |b, grid| {
            b.iter(|| {
                let mut sum = 0u64;
                grid.for_each(order, &mut |_, _, v| sum = sum.wrapping_add(u64::from(*v)))
                    .unwrap();
                black_box(sum)
            });
        });
    }
    group.finish();
}

/// Benchmark: increment every cell of a 4096x4096 grid.
fn bench_map_by_order(c: &mut Criterion) {
    let (width, height) = STRESS_DIMS;
    let mut group = c.benchmark_group("map_4096");
    group.throughput(Throughput::Elements((width * height) as u64));
    for (order, storage) in order_storages() {
        let mut grid = random_grid(storage, width, height, 42).unwrap();
        group.bench_function(BenchmarkId::from_parameter(order), |b| {
            b.iter(|| {
                grid.map(order, &mut |_, _, v| *v = v.wrapping_add(1)).unwrap();
            });
        });
    }
    group.finish();
}

/// Benchmark: block-major traversal across tile budgets.
fn bench_block_sizes(c: &mut Criterion) {
    let (width, height) = STRESS_DIMS;
    let mut group = c.benchmark_group("block_budget_4096");
    for budget in [1024usize, 16 * 1024, 64 * 1024, 1024 * 1024] {
        let grid = random_grid(
            Storage::Blocked(BlockSizing::TargetBytes(budget)),
            width,
            height,
            7,
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(budget), &grid, |b, grid| {
            b.iter(|| {
                let mut sum = 0u64;
                grid.for_each_default(&mut |_, _, v| sum = sum.wrapping_add(u64::from(*v)));
                black_box(sum)
            });
        });
    }
    group.finish();
}

/// Benchmark: inherent (monomorphised) row-major walk, for comparison with
/// the `dyn` dispatch above.
fn bench_flat_inherent_row_major(c: &mut Criterion) {
    let (width, height) = STRESS_DIMS;
    let grid = FlatArray2D::from_fn(width, height, |col, row| (col ^ row) as u32).unwrap();
    c.bench_function("flat_inherent_row_major_4096", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            grid.for_each_row_major(|_, _, v| sum = sum.wrapping_add(u64::from(*v)));
            black_box(sum)
        });
    });
}

criterion_group!(
    benches,
    bench_for_each_by_order,
    bench_map_by_order,
    bench_block_sizes,
    bench_flat_inherent_row_major
);
criterion_main!(benches);
