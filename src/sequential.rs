//! Sequential solver (C2): a single thread driving the Jacobi loop over one
//! grid pair. Used directly when `threads == 1` and as the ground truth that
//! the parallel path must agree with.

use tracing::{debug, info, instrument};

use crate::consts::STENCIL_WEIGHT;
use crate::grid::{Boundary, Grid, Layout};

/// Run the Jacobi relaxation on an `n x n` interior (so `n+2` including the
/// Dirichlet ring) until `residual <= tol` or `max_iters` iterations elapse.
#[instrument(skip_all, fields(n, max_iters))]
pub fn solve_seq(initial: f64, n: usize, max_iters: u32, tol: f64, boundary: Boundary, layout: Layout) -> (Grid, u32, f64) {
    let side = n + 2;
    let mut a = Grid::new(side, initial, boundary, layout);
    let mut b = a.clone_rect(0, 0, side - 1, side - 1);

    let mut iters = 0u32;
    let mut residual = 1.0f64;

    while residual > tol && iters < max_iters {
        residual = 0.0;
        for i in 1..=n {
            for j in 1..=n {
                let new = STENCIL_WEIGHT * (a.get(i, j) + a.get(i - 1, j) + a.get(i + 1, j) + a.get(i, j - 1) + a.get(i, j + 1));
                residual = residual.max((a.get(i, j) - new).abs());
                b.set(i, j, new);
            }
        }
        std::mem::swap(&mut a, &mut b);
        iters += 1;
        debug!(iters, residual, "sequential sweep completed");
    }

    info!(iters, residual, "sequential solve finished");
    (a, iters, residual)
}
