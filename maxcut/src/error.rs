use thiserror::Error;

/// Everything that can stop a call to [`crate::max_cut`].
#[derive(Debug, Error)]
pub enum MaxCutError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("semidefinite solver failed: {0}")]
    Solver(#[from] SolverError),
    #[error("could not factor the relaxed solution: {0}")]
    Factorization(#[from] FactorizationError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("the weight matrix has no vertices")]
    Empty,
    #[error("the weight matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("the weight matrix is not symmetric: w[{i}][{j}] = {w_ij} but w[{j}][{i}] = {w_ji}")]
    Asymmetric {
        i: usize,
        j: usize,
        w_ij: f64,
        w_ji: f64,
    },
    #[error("w[{i}][{j}] = {value} is negative")]
    NegativeWeight { i: usize, j: usize, value: f64 },
    #[error("w[{i}][{j}] = {value} is not finite")]
    NonFiniteWeight { i: usize, j: usize, value: f64 },
    #[error("w[{i}][{i}] = {value} is a self-loop")]
    NonZeroDiagonal { i: usize, value: f64 },
    #[error("tolerance {0} must be nonnegative")]
    NegativeTolerance(f64),
    #[error("the iteration budget must be at least 1")]
    NoIterations,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("expected a {expected}x{expected} problem, got {found}x{found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("the iterate became non-finite after {sweeps} sweeps")]
    NonFinite { sweeps: usize },
    #[error("no convergence after {sweeps} sweeps (last decrease {last_decrease:e})")]
    NotConverged { sweeps: usize, last_decrease: f64 },
    #[error("{0}")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactorizationError {
    #[error("entry ({i}, {j}) is not finite")]
    NonFinite { i: usize, j: usize },
    #[error("eigenvalue {eigenvalue:e} is below the admissible {threshold:e}")]
    Indefinite { eigenvalue: f64, threshold: f64 },
}
