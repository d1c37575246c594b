//! Error taxonomy for the solver core.
//!
//! Every variant here corresponds to a precondition in the dispatcher (§4.6/§4.7
//! of the design doc); numerical non-convergence is deliberately not an error
//! and never produces a `SolverError` — callers inspect the returned residual.

use thiserror::Error;

/// Failures the solver core can report. All are fatal at setup time; once a
/// sweep starts it runs to `max_iters` or convergence.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("thread count {threads} is not a perfect square")]
    InvalidThreadCount { threads: usize },

    #[error("grid size {n} is not evenly divisible by thread count {threads}")]
    GridNotDivisible { n: usize, threads: usize },

    #[error("grid size {n} must be at least 3 (one interior cell plus boundary)")]
    GridTooSmall { n: usize },

    #[error("thread count {threads} exceeds the number of interior cells ({n}x{n})")]
    TooManyThreads { threads: usize, n: usize },

    #[error("tolerance must be positive, got {tol}")]
    NonPositiveTolerance { tol: f64 },

    #[error("max_iters must be positive, got {max_iters}")]
    NonPositiveMaxIters { max_iters: u32 },

    #[error("worker for tile {tile_id} panicked")]
    WorkerPanicked { tile_id: usize },
}
