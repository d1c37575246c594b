//! Dense square grid store (C1): bounds-checked access, sub-rectangle copy,
//! tolerant equality, and formatting, over one of two physical layouts.

use crate::consts::EPSILON;

/// Fixed Dirichlet values for the four edges of a grid, set once at
/// construction and never mutated by a solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Boundary {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }

    /// The default problem boundary: top/left/right hot, bottom cold.
    pub const fn hot_cold() -> Self {
        Self::new(crate::consts::HOT, crate::consts::COLD, crate::consts::HOT, crate::consts::HOT)
    }
}

/// Which physical representation backs a [`Grid`].
///
/// `TwoDimDivided` stores one `Vec<f64>` per row, matching `TwoDimMatrix` in
/// `original_source/sequential.go`. `TwoDimContiguous` and `OneDim` both store
/// a single flat `Vec<f64>` indexed `i*n+j` — the original only ever had two
/// underlying representations (row-of-rows and flat), so the two contiguous
/// tags alias the same storage engine here; see DESIGN.md for this Open
/// Question's resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    TwoDimContiguous,
    TwoDimDivided,
    OneDim,
}

#[derive(Clone, Debug)]
enum Storage {
    Contiguous(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

/// A dense `n x n` grid of 64-bit floats.
///
/// Hot path accessors (`get`/`set`) specialize per storage variant rather than
/// going through a trait object, favoring monomorphization over the original
/// Go implementation's interface-based polymorphism.
#[derive(Clone, Debug)]
pub struct Grid {
    n: usize,
    storage: Storage,
}

impl Grid {
    /// Allocate an `n x n` grid, fill the interior with `initial`, and set the
    /// boundary ring from `boundary`. `n` must be at least 3.
    pub fn new(n: usize, initial: f64, boundary: Boundary, layout: Layout) -> Self {
        assert!(n >= 3, "grid side must be at least 3, got {n}");

        let storage = match layout {
            Layout::TwoDimDivided => Storage::Rows((0..n).map(|_| vec![initial; n]).collect()),
            Layout::TwoDimContiguous | Layout::OneDim => Storage::Contiguous(vec![initial; n * n]),
        };

        let mut grid = Self { n, storage };
        grid.apply_boundary(boundary);
        grid
    }

    /// Top/left/right overwrite last at the corners, then bottom; matches the
    /// original constructors, which set top/left/right in one pass and bottom
    /// in a second, later pass.
    fn apply_boundary(&mut self, boundary: Boundary) {
        let n = self.n;
        for i in 0..n {
            self.set(0, i, boundary.top);
            self.set(i, 0, boundary.left);
            self.set(i, n - 1, boundary.right);
        }
        for j in 0..n {
            self.set(n - 1, j, boundary.bottom);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds for {0}x{0} grid", self.n);
        match &self.storage {
            Storage::Contiguous(buf) => buf[i * self.n + j],
            Storage::Rows(rows) => rows[i][j],
        }
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds for {0}x{0} grid", self.n);
        match &mut self.storage {
            Storage::Contiguous(buf) => buf[i * self.n + j] = value,
            Storage::Rows(rows) => rows[i][j] = value,
        }
    }

    /// Copy the inclusive sub-rectangle `(x0, y0)..=(x1, y1)` into a new grid
    /// of side `x1 - x0 + 1`, preserving this grid's storage layout.
    pub fn clone_rect(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        assert!(x1 >= x0 && y1 >= y0, "invalid rectangle ({x0},{y0})..=({x1},{y1})");
        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        assert_eq!(width, height, "clone_rect requires a square sub-rectangle");

        let storage = match &self.storage {
            Storage::Rows(_) => {
                let mut rows = Vec::with_capacity(width);
                for i in x0..=x1 {
                    rows.push((y0..=y1).map(|j| self.get(i, j)).collect());
                }
                Storage::Rows(rows)
            }
            Storage::Contiguous(_) => {
                let mut buf = Vec::with_capacity(width * width);
                for i in x0..=x1 {
                    for j in y0..=y1 {
                        buf.push(self.get(i, j));
                    }
                }
                Storage::Contiguous(buf)
            }
        };

        Self { n: width, storage }
    }

    /// `true` iff both grids are the same size and every cell pair differs by
    /// less than `epsilon`.
    pub fn equal_approx(&self, other: &Grid, epsilon: f64) -> bool {
        if self.n != other.n {
            return false;
        }
        (0..self.n).all(|i| (0..self.n).all(|j| (self.get(i, j) - other.get(i, j)).abs() < epsilon))
    }

    /// Same as [`Self::equal_approx`] with the default [`EPSILON`] tolerance.
    pub fn equal_approx_default(&self, other: &Grid) -> bool {
        self.equal_approx(other, EPSILON)
    }

    /// Rows separated by `\n`, cells by a single space, each cell `%.4f`.
    pub fn format(&self) -> String {
        let mut out = String::with_capacity(self.n * self.n * 7);
        for i in 0..self.n {
            if i > 0 {
                out.push('\n');
            }
            for j in 0..self.n {
                if j > 0 {
                    out.push(' ');
                }
                out.push_str(&format!("{:.4}", self.get(i, j)));
            }
        }
        out
    }
}
