//! Property 4: every `Layout` produces the same result as `TwoDimContiguous`
//! for identical inputs.

use jacobi_heat::grid::Layout;
use jacobi_heat::{solve, Boundary};

#[test]
fn rows_and_one_dim_layouts_match_contiguous() {
    let boundary = Boundary::hot_cold();
    let (reference, _iters, _residual) = solve(0.4, 12, 800, 1e-7, 1, boundary, Layout::TwoDimContiguous).unwrap();

    for layout in [Layout::TwoDimDivided, Layout::OneDim] {
        let (grid, _iters, _residual) = solve(0.4, 12, 800, 1e-7, 1, boundary, layout).unwrap();
        assert!(reference.equal_approx(&grid, 1e-9), "{layout:?} disagreed with TwoDimContiguous");
    }
}

#[test]
fn layout_equivalence_holds_under_parallel_dispatch_too() {
    let boundary = Boundary::hot_cold();
    let (reference, _iters, _residual) = solve(0.4, 12, 800, 1e-7, 4, boundary, Layout::TwoDimContiguous).unwrap();
    let (rows, _iters, _residual) = solve(0.4, 12, 800, 1e-7, 4, boundary, Layout::TwoDimDivided).unwrap();
    assert!(reference.equal_approx(&rows, 1e-9));
}
