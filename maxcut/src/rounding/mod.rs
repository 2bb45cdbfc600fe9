use equator::assert;
use faer::{
    reborrow::{Reborrow, ReborrowMut},
    Mat, MatMut,
};
use rand::Rng;
use rand_distr::StandardNormal;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{embedding::Embedding, partition::Partition, validate::WeightMatrix};


/// Hyperplanes drawn and evaluated together in parallel mode.
const PARALLEL_BATCH: usize = 64;

#[derive(Debug, Clone)]
pub struct RoundingParameters {
    pub max_iters: usize,
    /// Stop once `upper_bound - best_cut < tolerance`.
    pub tolerance: f64,
    /// `Rayon(_)` evaluates batches of hyperplanes on the rayon pool.
    pub parallelism: faer::Parallelism,
}

impl Default for RoundingParameters {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 0.0,
            parallelism: faer::Parallelism::None,
        }
    }
}

impl std::fmt::Display for RoundingParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "iters.{}.tol.{}", self.max_iters, self.tolerance)
    }
}

#[derive(Debug, Clone)]
pub struct RoundingOutcome {
    pub best_cut: f64,
    /// `None` if no hyperplane ever separated an edge.
    pub best_partition: Option<Partition>,
    /// Hyperplanes actually evaluated.
    pub iterations: usize,
    pub reached_tolerance: bool,
    /// `best_cut` after each iteration.
    pub trace: Vec<f64>,
}

impl RoundingOutcome {
    fn new(max_iters: usize) -> Self {
        Self {
            best_cut: 0.0,
            best_partition: None,
            iterations: 0,
            reached_tolerance: false,
            trace: Vec::with_capacity(max_iters),
        }
    }

    /// Records one iteration and reports whether rounding is done.
    fn observe(
        &mut self,
        cut: f64,
        partition: Partition,
        upper_bound: f64,
        parameters: &RoundingParameters,
    ) -> bool {
        self.iterations += 1;
        if cut > self.best_cut {
            log::trace!("iteration {}: cut improved to {cut}", self.iterations);
            self.best_cut = cut;
            self.best_partition = Some(partition);
        }
        self.trace.push(self.best_cut);
        if upper_bound - self.best_cut < parameters.tolerance {
            self.reached_tolerance = true;
            return true;
        }
        if self.iterations == parameters.max_iters {
            log::warn!(
                "iteration budget of {} exhausted with gap {} to the upper bound (tolerance {})",
                parameters.max_iters,
                upper_bound - self.best_cut,
                parameters.tolerance,
            );
            return true;
        }
        false
    }
}

/// Random-hyperplane rounding of a vertex embedding.
pub struct RoundingEngine<'a> {
    weights: &'a WeightMatrix,
    embedding: &'a Embedding,
    upper_bound: f64,
}

impl<'a> RoundingEngine<'a> {
    pub fn new(weights: &'a WeightMatrix, embedding: &'a Embedding, upper_bound: f64) -> Self {
        assert!(weights.nvertices() == embedding.nvertices());
        Self {
            weights,
            embedding,
            upper_bound,
        }
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Hyperplanes are drawn from `rng` in the same order in both modes, so a
    /// seeded run gives the same outcome sequentially and in parallel.
    pub fn round(&self, parameters: &RoundingParameters, rng: &mut impl Rng) -> RoundingOutcome {
        match parameters.parallelism {
            faer::Parallelism::None => self.round_sequential(parameters, rng),
            _ => self.round_parallel(parameters, rng),
        }
    }

    fn round_sequential(
        &self,
        parameters: &RoundingParameters,
        rng: &mut impl Rng,
    ) -> RoundingOutcome {
        let mut outcome = RoundingOutcome::new(parameters.max_iters);
        let mut proj = Mat::<f64>::zeros(self.weights.nvertices(), 1);
        for _ in 0..parameters.max_iters {
            let r = self.hyperplane(rng);
            let (cut, partition) = self.evaluate(&r, proj.as_mut());
            if outcome.observe(cut, partition, self.upper_bound, parameters) {
                break;
            }
        }
        outcome
    }

    fn round_parallel(&self, parameters: &RoundingParameters, rng: &mut impl Rng) -> RoundingOutcome {
        let n = self.weights.nvertices();
        let mut outcome = RoundingOutcome::new(parameters.max_iters);
        let mut remaining = parameters.max_iters;
        while remaining > 0 {
            let batch = remaining.min(PARALLEL_BATCH);
            remaining -= batch;
            let hyperplanes: Vec<Vec<f64>> = (0..batch).map(|_| self.hyperplane(rng)).collect();
            let evaluated: Vec<(f64, Partition)> = hyperplanes
                .par_iter()
                .map(|r| {
                    let mut proj = Mat::<f64>::zeros(n, 1);
                    self.evaluate(r, proj.as_mut())
                })
                .collect();
            for (cut, partition) in evaluated {
                if outcome.observe(cut, partition, self.upper_bound, parameters) {
                    return outcome;
                }
            }
        }
        outcome
    }

    fn hyperplane(&self, rng: &mut impl Rng) -> Vec<f64> {
        (0..self.embedding.dimension())
            .map(|_| rng.sample(StandardNormal))
            .collect()
    }

    fn evaluate(&self, r: &[f64], mut proj: MatMut<'_, f64>) -> (f64, Partition) {
        self.embedding.project(r, proj.rb_mut(), faer::Parallelism::None);
        let partition = Partition::from_projections(proj.rb().col(0));
        let cut = self.weights.cut_value(partition.in_a());
        (cut, partition)
    }
}
