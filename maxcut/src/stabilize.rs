use equator::assert;
use faer::{Mat, MatRef, Side};

/// Added on top of `-lambda_min` so that a shifted matrix is strictly positive
/// definite rather than singular.
pub const STABILIZATION_EPSILON: f64 = 1e-10;

/// A solver output made exactly symmetric with a non-negative spectrum.
#[derive(Debug, Clone)]
pub struct StabilizedMatrix {
    mat: Mat<f64>,
    min_eigenvalue: f64,
    shift: f64,
}

impl StabilizedMatrix {
    /// Symmetrizes `(A + A^T) / 2`, then adds `-lambda_min + eps` to the
    /// diagonal if the smallest eigenvalue is negative.
    pub fn new(a: MatRef<'_, f64>) -> Self {
        let n = a.nrows();
        assert!(a.ncols() == n);
        let mut mat = Mat::<f64>::zeros(n, n);
        for j in 0..n {
            for i in j..n {
                let value = 0.5 * (a.read(i, j) + a.read(j, i));
                mat[(i, j)] = value;
                mat[(j, i)] = value;
            }
        }
        let min_eigenvalue = smallest_eigenvalue(mat.as_ref());
        let shift = if min_eigenvalue < 0.0 {
            -min_eigenvalue + STABILIZATION_EPSILON
        } else {
            0.0
        };
        if shift > 0.0 {
            (0..n).for_each(|i| mat[(i, i)] += shift);
        }
        Self {
            mat,
            min_eigenvalue,
            shift,
        }
    }

    pub fn as_ref(&self) -> MatRef<'_, f64> {
        self.mat.as_ref()
    }

    /// Smallest eigenvalue of the symmetrized input, before any shift.
    pub fn min_eigenvalue(&self) -> f64 {
        self.min_eigenvalue
    }

    /// What was added to every diagonal entry; zero when none was needed.
    pub fn shift(&self) -> f64 {
        self.shift
    }
}

pub(crate) fn smallest_eigenvalue(symmetric: MatRef<'_, f64>) -> f64 {
    if symmetric.nrows() == 0 {
        return 0.0;
    }
    symmetric
        .selfadjoint_eigenvalues(Side::Lower)
        .into_iter()
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    #[test]
    fn symmetrizes_by_averaging() {
        let a = Mat::from_fn(2, 2, |i, j| match (i, j) {
            (0, 1) => 0.2,
            (1, 0) => 0.4,
            _ => 1.0,
        });
        let stable = StabilizedMatrix::new(a.as_ref());
        let s = stable.as_ref();
        assert!(all(s.read(0, 1) == s.read(1, 0), (s.read(0, 1) - 0.3).abs() < 1e-15));
        assert!(stable.shift() == 0.0);
    }

    #[test]
    fn shifts_an_indefinite_matrix() {
        // eigenvalues 1 + 1.5 and 1 - 1.5
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 1.0 } else { 1.5 });
        let stable = StabilizedMatrix::new(a.as_ref());
        assert!((stable.min_eigenvalue() + 0.5).abs() < 1e-12);
        assert!((stable.shift() - (0.5 + STABILIZATION_EPSILON)).abs() < 1e-12);
        assert!(smallest_eigenvalue(stable.as_ref()) > 0.0);
    }

    #[test]
    fn leaves_a_positive_definite_matrix_alone() {
        let a = Mat::from_fn(3, 3, |i, j| if i == j { 2.0 } else { 0.5 });
        let stable = StabilizedMatrix::new(a.as_ref());
        assert!(stable.shift() == 0.0);
        assert!(stable.as_ref() == a.as_ref());
    }

    #[test]
    fn rank_one_matrix_ends_up_non_negative() {
        let x = [1.0, -1.0, 1.0, 1.0];
        let a = Mat::from_fn(4, 4, |i, j| x[i] * x[j]);
        let stable = StabilizedMatrix::new(a.as_ref());
        assert!(smallest_eigenvalue(stable.as_ref()) >= 0.0);
    }
}
