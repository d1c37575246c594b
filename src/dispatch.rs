//! Public entry point (C7): validates the problem against the preconditions
//! `original_source/main.go`'s `invalidProblemParams` enforces before ever
//! touching a goroutine, then dispatches to the sequential or parallel path.

use tracing::instrument;

use crate::error::SolverError;
use crate::grid::{Boundary, Grid, Layout};
use crate::{parallel, sequential};

/// Solve the steady-state heat equation on an `n x n` interior.
///
/// `threads == 1` runs the single-threaded sweep directly; any other value
/// must be a perfect square that evenly divides `n`, and spins up one worker
/// per tile. Returns the full `(n+2) x (n+2)` grid (interior plus the
/// Dirichlet ring) together with the iteration count and final residual.
#[instrument(name = "solve", skip_all, fields(n, threads, layout = ?layout))]
pub fn solve(
    initial: f64,
    n: usize,
    max_iters: u32,
    tol: f64,
    threads: usize,
    boundary: Boundary,
    layout: Layout,
) -> Result<(Grid, u32, f64), SolverError> {
    validate(n, max_iters, tol, threads)?;

    if threads == 1 {
        let (grid, iters, residual) = sequential::solve_seq(initial, n, max_iters, tol, boundary, layout);
        Ok((grid, iters, residual))
    } else {
        parallel::solve_par(initial, n, max_iters, tol, threads, boundary, layout)
    }
}

fn validate(n: usize, max_iters: u32, tol: f64, threads: usize) -> Result<(), SolverError> {
    if n < 3 {
        return Err(SolverError::GridTooSmall { n });
    }
    if tol <= 0.0 {
        return Err(SolverError::NonPositiveTolerance { tol });
    }
    if max_iters == 0 {
        return Err(SolverError::NonPositiveMaxIters { max_iters });
    }
    if threads == 0 {
        return Err(SolverError::InvalidThreadCount { threads });
    }

    if threads > 1 {
        let tiles_per_side = (threads as f64).sqrt().round() as usize;
        if tiles_per_side * tiles_per_side != threads {
            return Err(SolverError::InvalidThreadCount { threads });
        }
        if threads > n * n {
            return Err(SolverError::TooManyThreads { threads, n });
        }
        if n % threads != 0 {
            return Err(SolverError::GridNotDivisible { n, threads });
        }
    }

    Ok(())
}
