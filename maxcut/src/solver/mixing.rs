use faer::{linalg::matmul::matmul, Mat, MatRef};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{error::SolverError, relaxation::Relaxation};

use super::{SdpSolution, SdpSolver};

#[derive(Debug, Clone)]
pub struct MixingParameters {
    pub max_sweeps: usize,
    /// Stop once a sweep decreases the objective by at most `tolerance * max(1, |objective|)`.
    pub tolerance: f64,
    /// Seeds the random starting point.
    pub seed: u64,
    /// Rows of the factor `V`; `None` picks `min(n, ceil(sqrt(2n)) + 1)`.
    pub rank: Option<usize>,
}

impl Default for MixingParameters {
    fn default() -> Self {
        Self {
            max_sweeps: 20_000,
            tolerance: 1e-12,
            seed: 0,
            rank: None,
        }
    }
}

impl std::fmt::Display for MixingParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sweeps.{}.tol.{:e}.seed.{}",
            self.max_sweeps, self.tolerance, self.seed
        )
    }
}

/// Low-rank coordinate descent for unit-diagonal SDPs.
///
/// The variable is kept as `S = V^T V` with `V` of shape `p x n` and unit
/// columns, so the diagonal constraints hold by construction. A sweep visits
/// every column and replaces it with the unit vector minimizing the objective
/// while the others stay fixed: `v_i <- -g_i / |g_i|` where
/// `g_i = sum_{j != i} C_ij v_j`. Each step is non-increasing in `<C, S>`.
#[derive(Debug, Clone, Default)]
pub struct MixingSolver {
    parameters: MixingParameters,
    last_sweeps: usize,
}

impl MixingSolver {
    pub fn new(parameters: MixingParameters) -> Self {
        Self {
            parameters,
            last_sweeps: 0,
        }
    }

    pub fn parameters(&self) -> &MixingParameters {
        &self.parameters
    }

    /// Number of sweeps the most recent `solve` ran.
    pub fn last_sweeps(&self) -> usize {
        self.last_sweeps
    }

    fn rank(&self, n: usize) -> usize {
        let default = ((2 * n) as f64).sqrt().ceil() as usize + 1;
        self.parameters.rank.unwrap_or(default).clamp(1, n)
    }

    fn initial_factor(&self, p: usize, n: usize) -> Mat<f64> {
        let rng = &mut StdRng::seed_from_u64(self.parameters.seed);
        let mut v = Mat::<f64>::zeros(p, n);
        for i in 0..n {
            (0..p).for_each(|k| v[(k, i)] = rng.sample(StandardNormal));
            let norm = (0..p).map(|k| v[(k, i)] * v[(k, i)]).sum::<f64>().sqrt();
            if norm > 0.0 {
                (0..p).for_each(|k| v[(k, i)] /= norm);
            } else {
                v[(0, i)] = 1.0;
            }
        }
        v
    }
}

impl SdpSolver for MixingSolver {
    fn solve(&mut self, problem: &Relaxation<'_>) -> Result<SdpSolution, SolverError> {
        let n = problem.dimension();
        let unit_diagonal = problem.constraints().len() == n
            && problem
                .constraints()
                .iter()
                .enumerate()
                .all(|(i, c)| c.index == i && c.value == 1.0);
        if !unit_diagonal {
            return Err(SolverError::Unsupported(
                "the mixing method only handles S[i][i] = 1 for every i",
            ));
        }
        let c = problem.objective();
        let p = self.rank(n);
        let mut v = self.initial_factor(p, n);
        let mut g = vec![0.0; p];
        let mut objective = factored_objective(c, v.as_ref());
        let mut last_decrease = f64::INFINITY;
        let mut converged = false;
        self.last_sweeps = 0;

        for sweep in 1..=self.parameters.max_sweeps {
            self.last_sweeps = sweep;
            for i in 0..n {
                g.iter_mut().for_each(|g_k| *g_k = 0.0);
                for j in 0..n {
                    let c_ij = c.read(i, j);
                    if j == i || c_ij == 0.0 {
                        continue;
                    }
                    for (k, g_k) in g.iter_mut().enumerate() {
                        *g_k += c_ij * v[(k, j)];
                    }
                }
                let norm = g.iter().map(|g_k| g_k * g_k).sum::<f64>().sqrt();
                // isolated vertex, any unit vector is optimal
                if norm == 0.0 {
                    continue;
                }
                for (k, g_k) in g.iter().enumerate() {
                    v[(k, i)] = -g_k / norm;
                }
            }
            let next = factored_objective(c, v.as_ref());
            if !next.is_finite() {
                return Err(SolverError::NonFinite { sweeps: sweep });
            }
            last_decrease = objective - next;
            objective = next;
            if last_decrease <= self.parameters.tolerance * objective.abs().max(1.0) {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(SolverError::NotConverged {
                sweeps: self.last_sweeps,
                last_decrease,
            });
        }
        log::debug!(
            "mixing method converged after {} sweeps (rank {p}, objective {objective})",
            self.last_sweeps
        );

        let mut matrix = Mat::<f64>::zeros(n, n);
        matmul(
            matrix.as_mut(),
            v.transpose(),
            v.as_ref(),
            None,
            1.0,
            faer::Parallelism::None,
        );
        let objective = problem.objective_value(matrix.as_ref());
        Ok(SdpSolution { matrix, objective })
    }
}

// <C, V^T V> = sum_ij C_ij <v_i, v_j>
fn factored_objective(c: MatRef<'_, f64>, v: MatRef<'_, f64>) -> f64 {
    let n = c.nrows();
    let p = v.nrows();
    let mut value = 0.0;
    for j in 0..n {
        for i in 0..n {
            let c_ij = c.read(i, j);
            if c_ij == 0.0 {
                continue;
            }
            let dot: f64 = (0..p).map(|k| v.read(k, i) * v.read(k, j)).sum();
            value += c_ij * dot;
        }
    }
    value
}
