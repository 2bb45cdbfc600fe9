//! Approximate maximum cuts of weighted undirected graphs with the
//! Goemans-Williamson algorithm: solve the semidefinite relaxation, factor its
//! solution into unit vectors, and round with random hyperplanes until the cut
//! is within a tolerance of the relaxation's upper bound.

use faer::MatRef;
use rand::Rng;

pub mod bound;
pub mod embedding;
pub mod error;
pub mod partition;
pub mod relaxation;
pub mod rounding;
pub mod solver;
pub mod stabilize;
pub mod validate;

pub use bound::{upper_bound, GOEMANS_WILLIAMSON_RATIO};
pub use embedding::Embedding;
pub use error::{FactorizationError, MaxCutError, SolverError, ValidationError};
pub use partition::Partition;
pub use relaxation::Relaxation;
pub use rounding::{RoundingEngine, RoundingOutcome, RoundingParameters};
pub use solver::{MixingParameters, MixingSolver, SdpSolution, SdpSolver};
pub use stabilize::StabilizedMatrix;
pub use validate::WeightMatrix;

/// The best cut found by [`max_cut`].
#[derive(Debug, Clone)]
pub struct MaxCut {
    /// Weight of the edges crossing `partition`.
    pub value: f64,
    /// `None` when no sampled hyperplane cut any edge, e.g. for a graph without edges.
    pub partition: Option<Partition>,
    /// No cut of the graph is heavier than this.
    pub upper_bound: f64,
    /// Hyperplanes evaluated before stopping.
    pub iterations: usize,
    /// Whether `upper_bound - value < tolerance` was reached within the budget.
    pub reached_tolerance: bool,
}

impl MaxCut {
    /// `value / upper_bound`, a lower bound on how close the cut is to optimal.
    pub fn certified_ratio(&self) -> f64 {
        if self.upper_bound > 0.0 {
            self.value / self.upper_bound
        } else {
            1.0
        }
    }
}

/// Runs the whole pipeline on a weight matrix.
///
/// Inputs are validated before the solver is called. `solver` is invoked
/// exactly once; its failure is returned as is.
pub fn max_cut<S: SdpSolver + ?Sized>(
    weights: MatRef<'_, f64>,
    parameters: &RoundingParameters,
    solver: &mut S,
    rng: &mut impl Rng,
) -> Result<MaxCut, MaxCutError> {
    validate::validate_parameters(parameters.tolerance, parameters.max_iters)?;
    let weights = WeightMatrix::new(weights)?;
    solve_validated(&weights, parameters, solver, rng)
}

/// [`max_cut`] with a default [`MixingSolver`].
pub fn max_cut_with_default_solver(
    weights: MatRef<'_, f64>,
    parameters: &RoundingParameters,
    rng: &mut impl Rng,
) -> Result<MaxCut, MaxCutError> {
    max_cut(weights, parameters, &mut MixingSolver::default(), rng)
}

/// [`max_cut`] for a matrix that already went through [`WeightMatrix`] validation.
pub fn solve_validated<S: SdpSolver + ?Sized>(
    weights: &WeightMatrix,
    parameters: &RoundingParameters,
    solver: &mut S,
    rng: &mut impl Rng,
) -> Result<MaxCut, MaxCutError> {
    validate::validate_parameters(parameters.tolerance, parameters.max_iters)?;
    let n = weights.nvertices();
    let relaxation = Relaxation::new(weights);
    log::debug!("solving the relaxation of a {n}-vertex graph");
    let SdpSolution { matrix, objective } = solver.solve(&relaxation)?;
    if matrix.nrows() != n || matrix.ncols() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            found: matrix.nrows().max(matrix.ncols()),
        }
        .into());
    }

    let stabilized = StabilizedMatrix::new(matrix.as_ref());
    log::debug!(
        "smallest eigenvalue {:e}, diagonal shift {:e}",
        stabilized.min_eigenvalue(),
        stabilized.shift()
    );
    let embedding = Embedding::factor(&stabilized)?;
    let upper_bound = upper_bound(weights, objective);
    log::debug!(
        "embedded in dimension {} ({:?}), objective {objective}, upper bound {upper_bound}",
        embedding.dimension(),
        embedding.method(),
    );

    let engine = RoundingEngine::new(weights, &embedding, upper_bound);
    let RoundingOutcome {
        best_cut,
        best_partition,
        iterations,
        reached_tolerance,
        trace: _,
    } = engine.round(parameters, rng);
    log::debug!("best cut {best_cut} after {iterations} iterations ({parameters})");
    Ok(MaxCut {
        value: best_cut,
        partition: best_partition,
        upper_bound,
        iterations,
        reached_tolerance,
    })
}
