//! Sequential solver throughput across grid sizes, at a fixed iteration
//! budget so the benchmark measures per-sweep cost rather than
//! convergence-dependent wall time.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jacobi_heat::grid::{Boundary, Layout};
use jacobi_heat::solve_seq;

fn fixed_iteration_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_seq_fixed_iters");
    let boundary = Boundary::hot_cold();

    for size in [16usize, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(solve_seq(0.5, size, 50, 0.0, boundary, Layout::TwoDimContiguous)));
        });
    }
    group.finish();
}

criterion_group!(sequential, fixed_iteration_sweep);
criterion_main!(sequential);
