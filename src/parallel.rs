//! Parallel solver (C6): partitions the interior into a square grid of tiles,
//! wires up halo transport (C4) and the max-reduce barrier (C5), and runs one
//! worker thread per tile inside [`std::thread::scope`] so the final merge
//! can write straight into a shared result grid without `Arc`/`Mutex`.
//!
//! Mirrors the goroutine-per-tile structure of `original_source/multithread.go`,
//! but recovers the root worker's real final `(iters, residual)` instead of
//! discarding them — the original parallel path returns `(mat, 0, 0.0)`
//! unconditionally, a bug this port does not reproduce.

use tracing::{error, info, instrument};

use crate::error::SolverError;
use crate::grid::{Boundary, Grid, Layout};
use crate::halo::build_links;
use crate::reduce::build_reduce;
use crate::tile::{Halos, Tile};

/// Run the Jacobi relaxation with `threads` workers, each owning one
/// `tile_n x tile_n` tile of the `n x n` interior (`tiles_per_side = sqrt(threads)`,
/// `tile_n = n / tiles_per_side`; both are guaranteed by the dispatcher's
/// preconditions before this is ever called).
#[instrument(skip_all, fields(n, threads, max_iters))]
pub fn solve_par(
    initial: f64,
    n: usize,
    max_iters: u32,
    tol: f64,
    threads: usize,
    boundary: Boundary,
    layout: Layout,
) -> Result<(Grid, u32, f64), SolverError> {
    let tiles_per_side = (threads as f64).sqrt().round() as usize;
    let tile_n = n / tiles_per_side;

    let mut links = build_links(tiles_per_side, tile_n);
    let mut reduce_handles = build_reduce(threads);

    let mut result = Grid::new(n + 2, initial, boundary, layout);
    let mut final_iters = 0u32;
    let mut final_residual = 0.0f64;
    let mut worker_panic: Option<usize> = None;

    std::thread::scope(|scope| {
        let mut links = links.drain(..);
        let mut reduce_handles = reduce_handles.drain(..);
        let mut handles = Vec::with_capacity(threads);

        for id in 0..threads {
            let link = links.next().expect("one link per tile");
            let reduce = reduce_handles.next().expect("one reduce handle per tile");
            let row = id / tiles_per_side;
            let col = id % tiles_per_side;
            let x0 = row * tile_n;
            let y0 = col * tile_n;

            // The tile's own cells start uniformly at `initial`, same as the
            // sequential solver's interior; its true Dirichlet values live
            // one cell outside the tile, in `boundary_halos` below, never in
            // the tile's own buffer. Seeded directly as a uniform `TileBuf`
            // rather than via `Grid::new`, which would reject `tile_n < 3` —
            // a thread count large relative to `n` legitimately produces
            // tiles that small.
            let boundary_halos = Halos {
                top: vec![boundary.top; tile_n],
                bottom: vec![boundary.bottom; tile_n],
                left: vec![boundary.left; tile_n],
                right: vec![boundary.right; tile_n],
            };

            let tile = Tile::new(id, row, col, x0, y0, tile_n, link, initial, boundary_halos);

            handles.push(scope.spawn(move || tile.run(max_iters, tol, move |local| reduce.reduce(local))));
        }

        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(tile_result) => {
                    let (x0, y0) = (tile_result.x0, tile_result.y0);
                    for i in 0..tile_n {
                        for j in 0..tile_n {
                            result.set(1 + x0 + i, 1 + y0 + j, tile_result.a.get(i, j));
                        }
                    }
                    if id == 0 {
                        final_iters = tile_result.iters;
                        final_residual = tile_result.residual;
                    }
                }
                Err(_) => {
                    error!(tile_id = id, "worker thread panicked");
                    worker_panic.get_or_insert(id);
                }
            }
        }
    });

    if let Some(tile_id) = worker_panic {
        return Err(SolverError::WorkerPanicked { tile_id });
    }

    info!(iters = final_iters, residual = final_residual, "parallel solve finished");
    Ok((result, final_iters, final_residual))
}
