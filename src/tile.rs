//! Tile (C3): a worker's sub-rectangle of the global grid, its double buffer,
//! its halos, and the per-iteration stencil sweep (§4.3 of the design doc).

use rayon::prelude::*;
use tracing::{instrument, trace, trace_span};

use crate::consts::STENCIL_WEIGHT;
use crate::grid::Grid;
use crate::halo::Links;

/// Tiles smaller than this (in interior rows) run the stencil sweep on a
/// single thread; larger tiles split the row range across Rayon's pool.
const RAYON_ROW_THRESHOLD: usize = 64;

/// A tile's own double-buffered local matrix, stored flat and row-major.
/// Distinct from [`Grid`] because the stencil needs clamped neighbor lookups
/// at the tile's own edges (see [`TileBuf::get_clamped`]).
#[derive(Clone)]
pub(crate) struct TileBuf {
    size: usize,
    data: Vec<f64>,
}

impl TileBuf {
    fn from_grid(g: &Grid) -> Self {
        let size = g.len();
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(g.get(i, j));
            }
        }
        Self { size, data }
    }

    /// A `size x size` buffer filled uniformly with `value`. Used to seed a
    /// tile's own cells directly, without routing through [`Grid::new`]'s
    /// `n >= 3` precondition — tiles can legitimately be smaller than 3 cells
    /// on a side when `threads` is large relative to `n`.
    fn uniform(size: usize, value: f64) -> Self {
        Self { size, data: vec![value; size * size] }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, v: f64) {
        let idx = i * self.size + j;
        self.data[idx] = v;
    }

    /// Reads `(i, j)` clamped into `[0, size)`. For tiles of normal size
    /// (>= 3) this never clamps anything and is identical to [`Self::get`];
    /// it exists so the corner/edge formulas below don't panic on the
    /// degenerate 2-cell-per-side tiles that a thread count large relative
    /// to `n` can produce (the dispatcher's preconditions already rule out
    /// a 1-cell-per-side tile for any `n >= 3`).
    #[inline]
    fn get_clamped(&self, i: isize, j: isize) -> f64 {
        let ci = i.clamp(0, self.size as isize - 1) as usize;
        let cj = j.clamp(0, self.size as isize - 1) as usize;
        self.get(ci, cj)
    }

    fn row(&self, i: usize) -> Vec<f64> {
        (0..self.size).map(|j| self.get(i, j)).collect()
    }

    fn col(&self, j: usize) -> Vec<f64> {
        (0..self.size).map(|i| self.get(i, j)).collect()
    }
}

/// Current values received from the four neighbors (or pre-filled from the
/// global Dirichlet boundary, or left at `initial_value` for a side with no
/// neighbor's worth of data yet).
pub(crate) struct Halos {
    pub top: Vec<f64>,
    pub bottom: Vec<f64>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl Halos {
    fn filled(size: usize, value: f64) -> Self {
        Self {
            top: vec![value; size],
            bottom: vec![value; size],
            left: vec![value; size],
            right: vec![value; size],
        }
    }
}

/// One worker's view of the problem: its position in the tile grid, its
/// sub-rectangle of the global grid, its links to neighbors, and the local
/// state (double buffer + halos) it owns for the duration of a solve.
pub(crate) struct Tile {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub x0: usize,
    pub y0: usize,
    links: Links,
    a: TileBuf,
    b: TileBuf,
    halos: Halos,
}

/// Outcome of a completed sweep: the tile's final buffer plus the iteration
/// count and residual it terminated on (identical across every tile, since
/// the max-reduce barriers every iteration), plus the tile's own global
/// top-left coordinate so the merge step doesn't need to recompute it.
pub(crate) struct TileResult {
    pub a: TileBufHandle,
    pub iters: u32,
    pub residual: f64,
    pub x0: usize,
    pub y0: usize,
}

/// Opaque handle so `dispatch`/`parallel` can merge a tile's result back into
/// the global grid without reaching into `TileBuf`'s private fields.
pub(crate) struct TileBufHandle(TileBuf);

impl TileBufHandle {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }
}

impl Tile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        row: usize,
        col: usize,
        x0: usize,
        y0: usize,
        size: usize,
        links: Links,
        initial_value: f64,
        boundary_halos: Halos,
    ) -> Self {
        let a = TileBuf::uniform(size, initial_value);
        let b = a.clone();

        // boundary_halos carries the Dirichlet-derived pre-fill for sides on
        // the global edge; non-boundary sides start at initial_value and get
        // overwritten by the first receive.
        let mut halos = Halos::filled(size, initial_value);
        if links.top.is_none() {
            halos.top = boundary_halos.top;
        }
        if links.bottom.is_none() {
            halos.bottom = boundary_halos.bottom;
        }
        if links.left.is_none() {
            halos.left = boundary_halos.left;
        }
        if links.right.is_none() {
            halos.right = boundary_halos.right;
        }

        Self { id, row, col, x0, y0, links, a, b, halos }
    }

    /// Run the tile's sweep until convergence or `max_iters`, cooperating
    /// with the max-reduce/barrier closure `reduce` once per iteration.
    /// `reduce` takes this tile's local residual and returns the global max.
    #[instrument(name = "tile", skip_all, fields(id = self.id, row = self.row, col = self.col))]
    pub fn run(
        mut self,
        max_iters: u32,
        tol: f64,
        mut reduce: impl FnMut(f64) -> f64,
    ) -> TileResult {
        let mut residual = f64::MAX;
        let mut iters = 0u32;

        while residual > tol && iters < max_iters {
            let _iteration = trace_span!("iteration", iters).entered();

            self.send_edges();

            let interior_residual = compute_interior(&mut self.b, &self.a);

            self.recv_halos();

            let edge_residual = compute_edges(&mut self.b, &self.a, &self.halos);

            let local_residual = interior_residual.max(edge_residual);
            residual = reduce(local_residual);
            trace!(residual, "tile sweep completed");

            std::mem::swap(&mut self.a, &mut self.b);
            iters += 1;
        }

        TileResult { a: TileBufHandle(self.a), iters, residual, x0: self.x0, y0: self.y0 }
    }

    fn send_edges(&self) {
        if let Some(to) = self.links.top.as_ref().map(|n| &n.to) {
            let _ = to.send(self.a.row(0));
        }
        if let Some(to) = self.links.bottom.as_ref().map(|n| &n.to) {
            let _ = to.send(self.a.row(self.a.size - 1));
        }
        if let Some(to) = self.links.left.as_ref().map(|n| &n.to) {
            let _ = to.send(self.a.col(0));
        }
        if let Some(to) = self.links.right.as_ref().map(|n| &n.to) {
            let _ = to.send(self.a.col(self.a.size - 1));
        }
    }

    fn recv_halos(&mut self) {
        if let Some(from) = self.links.top.as_ref().map(|n| &n.from) {
            if let Ok(edge) = from.recv() {
                self.halos.top = edge;
            }
        }
        if let Some(from) = self.links.bottom.as_ref().map(|n| &n.from) {
            if let Ok(edge) = from.recv() {
                self.halos.bottom = edge;
            }
        }
        if let Some(from) = self.links.left.as_ref().map(|n| &n.from) {
            if let Ok(edge) = from.recv() {
                self.halos.left = edge;
            }
        }
        if let Some(from) = self.links.right.as_ref().map(|n| &n.from) {
            if let Ok(edge) = from.recv() {
                self.halos.right = edge;
            }
        }
    }
}

/// Strictly-interior cells of the tile (rows/cols `1..=size-2`): the stencil
/// never reaches a halo here, so this is pure intra-tile work and the part
/// worth parallelizing with Rayon.
fn compute_interior(dest: &mut TileBuf, src: &TileBuf) -> f64 {
    let size = src.size;
    if size < 3 {
        return 0.0;
    }
    let inner_rows = size - 2;

    let compute_row = |offset: usize, row: &mut [f64]| -> f64 {
        let i = offset + 1;
        let mut local_max = 0.0f64;
        for j in 1..=size - 2 {
            let new = STENCIL_WEIGHT
                * (src.get(i, j) + src.get(i - 1, j) + src.get(i + 1, j) + src.get(i, j - 1) + src.get(i, j + 1));
            local_max = local_max.max((src.get(i, j) - new).abs());
            row[j] = new;
        }
        local_max
    };

    let interior = &mut dest.data[size..size * (size - 1)];
    if inner_rows >= RAYON_ROW_THRESHOLD {
        interior
            .par_chunks_mut(size)
            .enumerate()
            .map(|(k, row)| compute_row(k, row))
            .reduce(|| 0.0f64, f64::max)
    } else {
        interior.chunks_mut(size).enumerate().map(|(k, row)| compute_row(k, row)).fold(0.0f64, f64::max)
    }
}

/// Border cells of the tile: the four corners (each combining two halos)
/// plus the remaining edge cells (each combining one halo). Matches
/// `computeOuterCells` in `original_source/multithread.go`.
fn compute_edges(dest: &mut TileBuf, src: &TileBuf, halos: &Halos) -> f64 {
    let size = src.size;
    let last = size as isize - 1;
    let mut max_res = 0.0f64;

    let mut apply = |dest: &mut TileBuf, i: usize, j: usize, new: f64| {
        max_res = max_res.max((src.get(i, j) - new).abs());
        dest.set(i, j, new);
    };

    // Top-left corner
    let new = STENCIL_WEIGHT * (src.get(0, 0) + halos.left[0] + src.get_clamped(0, 1) + halos.top[0] + src.get_clamped(1, 0));
    apply(dest, 0, 0, new);

    // Top-right corner
    let new = STENCIL_WEIGHT
        * (src.get(0, size - 1)
            + src.get_clamped(0, last - 1)
            + halos.right[0]
            + halos.top[size - 1]
            + src.get_clamped(1, last));
    apply(dest, 0, size - 1, new);

    // Bottom-left corner
    let new = STENCIL_WEIGHT
        * (src.get(size - 1, 0)
            + halos.left[size - 1]
            + src.get_clamped(last, 1)
            + src.get_clamped(last - 1, 0)
            + halos.bottom[0]);
    apply(dest, size - 1, 0, new);

    // Bottom-right corner
    let new = STENCIL_WEIGHT
        * (src.get(size - 1, size - 1)
            + src.get_clamped(last, last - 1)
            + halos.right[size - 1]
            + src.get_clamped(last - 1, last)
            + halos.bottom[size - 1]);
    apply(dest, size - 1, size - 1, new);

    for k in 1..size - 1 {
        // Top outer cells
        let new = STENCIL_WEIGHT * (src.get(0, k) + src.get(0, k - 1) + src.get(0, k + 1) + halos.top[k] + src.get(1, k));
        apply(dest, 0, k, new);
        // Bottom outer cells
        let new = STENCIL_WEIGHT
            * (src.get(size - 1, k) + src.get(size - 1, k - 1) + src.get(size - 1, k + 1) + src.get(size - 2, k) + halos.bottom[k]);
        apply(dest, size - 1, k, new);
        // Left outer cells
        let new = STENCIL_WEIGHT * (src.get(k, 0) + halos.left[k] + src.get(k, 1) + src.get(k - 1, 0) + src.get(k + 1, 0));
        apply(dest, k, 0, new);
        // Right outer cells
        let new = STENCIL_WEIGHT
            * (src.get(k, size - 1) + src.get(k, size - 2) + halos.right[k] + src.get(k - 1, size - 1) + src.get(k + 1, size - 1));
        apply(dest, k, size - 1, new);
    }

    max_res
}
