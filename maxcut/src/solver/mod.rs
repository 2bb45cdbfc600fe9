use faer::Mat;

use crate::{error::SolverError, relaxation::Relaxation};

pub mod mixing;

pub use mixing::{MixingParameters, MixingSolver};

/// What a backend hands back for a [`Relaxation`].
#[derive(Debug, Clone)]
pub struct SdpSolution {
    /// Symmetric, unit diagonal and positive semidefinite up to the backend's tolerance.
    pub matrix: Mat<f64>,
    /// `<C, matrix>` as achieved by the backend.
    pub objective: f64,
}

/// A semidefinite programming backend.
///
/// Given `minimize <C, S>` under diagonal equality constraints and `S ⪰ 0`,
/// return an optimal `S`. Failures are final for the invocation.
pub trait SdpSolver {
    fn solve(&mut self, problem: &Relaxation<'_>) -> Result<SdpSolution, SolverError>;
}

impl<S: SdpSolver + ?Sized> SdpSolver for &mut S {
    fn solve(&mut self, problem: &Relaxation<'_>) -> Result<SdpSolution, SolverError> {
        (**self).solve(problem)
    }
}
