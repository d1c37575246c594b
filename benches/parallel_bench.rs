//! Parallel solver scaling across thread counts for a fixed problem size and
//! iteration budget, so the benchmark isolates tiling/halo/reduce overhead
//! from convergence speed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jacobi_heat::grid::{Boundary, Layout};
use jacobi_heat::solve;

fn thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_par_fixed_iters");
    let boundary = Boundary::hot_cold();
    let size = 128usize;

    for threads in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| black_box(solve(0.5, size, 50, 1e-12, threads, boundary, Layout::TwoDimContiguous).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(parallel, thread_scaling);
criterion_main!(parallel);
