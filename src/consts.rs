//! Problem-wide constants shared by every layer of the solver.

/// Dirichlet value for a "hot" boundary edge.
pub const HOT: f64 = 1.0;
/// Dirichlet value for a "cold" boundary edge.
pub const COLD: f64 = 0.0;
/// Default tolerance used by [`crate::grid::Grid::equal_approx`] when callers
/// don't supply their own epsilon.
pub const EPSILON: f64 = 1.0e-9;
/// Stencil weight applied to each of the five points (self + 4 neighbors).
pub const STENCIL_WEIGHT: f64 = 0.2;
/// Process exit code for a precondition failure, matching the original
/// `invalidProblemParams` contract.
pub const INVALID_PROBLEM_PARAMS_EXIT_CODE: i32 = 1;
