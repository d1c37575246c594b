//! Grid store microbenchmarks: allocation/boundary-fill cost and the raw
//! get/set hot path across both storage layouts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jacobi_heat::grid::{Boundary, Grid, Layout};

fn new_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_new");
    let boundary = Boundary::hot_cold();

    for size in [16usize, 64, 256] {
        for layout in [Layout::TwoDimContiguous, Layout::TwoDimDivided] {
            group.bench_with_input(BenchmarkId::new(format!("{layout:?}"), size), &size, |b, &size| {
                b.iter(|| black_box(Grid::new(size, 0.5, boundary, layout)));
            });
        }
    }
    group.finish();
}

fn get_set_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_get_set");
    let boundary = Boundary::hot_cold();

    for layout in [Layout::TwoDimContiguous, Layout::TwoDimDivided] {
        let mut grid = Grid::new(256, 0.5, boundary, layout);
        group.bench_with_input(BenchmarkId::new("roundtrip", format!("{layout:?}")), &layout, |b, _| {
            b.iter(|| {
                for i in 1..255 {
                    grid.set(i, i, black_box(grid.get(i, i) + 1.0));
                }
                black_box(grid.get(128, 128))
            });
        });
    }
    group.finish();
}

criterion_group!(grid, new_benchmarks, get_set_benchmarks);
criterion_main!(grid);
