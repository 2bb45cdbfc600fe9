use equator::assert;
use faer::MatRef;

use crate::validate::WeightMatrix;

/// `S[index][index] = value`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalConstraint {
    pub index: usize,
    pub value: f64,
}

/// The semidefinite relaxation of a maximum cut problem:
///
/// ```text
/// minimize   <W, S>
/// subject to S[i][i] = 1   for every vertex i
///            S symmetric positive semidefinite
/// ```
///
/// Assembly only; nothing is solved here.
#[derive(Debug, Clone)]
pub struct Relaxation<'a> {
    objective: MatRef<'a, f64>,
    constraints: Vec<DiagonalConstraint>,
}

impl<'a> Relaxation<'a> {
    pub fn new(weights: &'a WeightMatrix) -> Self {
        let n = weights.nvertices();
        let constraints = (0..n)
            .map(|index| DiagonalConstraint { index, value: 1.0 })
            .collect();
        Self {
            objective: weights.as_ref(),
            constraints,
        }
    }

    /// Side length of the matrix variable.
    pub fn dimension(&self) -> usize {
        self.objective.nrows()
    }

    /// The cost matrix `C` of `minimize <C, S>`.
    pub fn objective(&self) -> MatRef<'a, f64> {
        self.objective
    }

    pub fn constraints(&self) -> &[DiagonalConstraint] {
        &self.constraints
    }

    /// `<C, S>` for a candidate `S`.
    pub fn objective_value(&self, s: MatRef<'_, f64>) -> f64 {
        let n = self.dimension();
        assert!(all(s.nrows() == n, s.ncols() == n));
        let mut value = 0.0;
        for j in 0..n {
            for i in 0..n {
                value += self.objective.read(i, j) * s.read(i, j);
            }
        }
        value
    }

    /// Largest absolute violation of the equality constraints.
    pub fn max_residual(&self, s: MatRef<'_, f64>) -> f64 {
        self.constraints
            .iter()
            .map(|&DiagonalConstraint { index, value }| (s.read(index, index) - value).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::Mat;

    #[test]
    fn one_unit_diagonal_constraint_per_vertex() {
        let w = WeightMatrix::from_rows(&[[0.0, 2.0, 0.0], [2.0, 0.0, 1.0], [0.0, 1.0, 0.0]]).unwrap();
        let relaxation = Relaxation::new(&w);
        assert!(relaxation.dimension() == 3);
        let constraints = relaxation.constraints();
        assert!(constraints.len() == 3);
        for (i, c) in constraints.iter().enumerate() {
            assert!(all(c.index == i, c.value == 1.0));
        }
    }

    #[test]
    fn objective_of_a_rank_one_cut_matrix() {
        // x = (1, -1, 1) cuts both edges; <W, x x^T> = sum(W) - 4 * cut
        let w = WeightMatrix::from_rows(&[[0.0, 2.0, 0.0], [2.0, 0.0, 1.0], [0.0, 1.0, 0.0]]).unwrap();
        let relaxation = Relaxation::new(&w);
        let x = [1.0, -1.0, 1.0];
        let s = Mat::from_fn(3, 3, |i, j| x[i] * x[j]);
        assert!(relaxation.objective_value(s.as_ref()) == 6.0 - 4.0 * 3.0);
        assert!(relaxation.max_residual(s.as_ref()) == 0.0);
        let identity = Mat::from_fn(3, 3, |i, j| if i == j { 1.0 } else { 0.0 });
        assert!(relaxation.objective_value(identity.as_ref()) == 0.0);
    }
}
