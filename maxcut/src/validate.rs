use equator::assert;
use faer::{Mat, MatRef};

use crate::error::ValidationError;

/// A symmetric, nonnegative, loop-free edge-weight matrix.
///
/// The only way to obtain one is through [`WeightMatrix::new`] or
/// [`WeightMatrix::from_rows`], so every downstream stage may assume the
/// preconditions hold.
#[derive(Debug, Clone)]
pub struct WeightMatrix {
    mat: Mat<f64>,
    total: f64,
}

impl WeightMatrix {
    /// Symmetry is checked by exact equality, `w[i][j] == w[j][i]`.
    pub fn new(mat: MatRef<'_, f64>) -> Result<Self, ValidationError> {
        let n = mat.nrows();
        if n == 0 && mat.ncols() == 0 {
            return Err(ValidationError::Empty);
        }
        if mat.ncols() != n {
            return Err(ValidationError::NotSquare {
                row: 0,
                len: mat.ncols(),
                expected: n,
            });
        }
        let mut total = 0.0;
        for i in 0..n {
            for j in 0..n {
                let value = mat.read(i, j);
                if !value.is_finite() {
                    return Err(ValidationError::NonFiniteWeight { i, j, value });
                }
                if value < 0.0 {
                    return Err(ValidationError::NegativeWeight { i, j, value });
                }
                if i == j && value != 0.0 {
                    return Err(ValidationError::NonZeroDiagonal { i, value });
                }
                let mirrored = mat.read(j, i);
                if value != mirrored {
                    return Err(ValidationError::Asymmetric {
                        i,
                        j,
                        w_ij: value,
                        w_ji: mirrored,
                    });
                }
                total += value;
            }
        }
        Ok(Self {
            mat: mat.to_owned(),
            total,
        })
    }

    /// Validates a row-major list of rows; a ragged list is reported as
    /// [`ValidationError::NotSquare`].
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ValidationError> {
        let n = rows.len();
        if n == 0 {
            return Err(ValidationError::Empty);
        }
        if let Some((row, len)) = rows
            .iter()
            .map(|r| r.as_ref().len())
            .enumerate()
            .find(|&(_, len)| len != n)
        {
            return Err(ValidationError::NotSquare {
                row,
                len,
                expected: n,
            });
        }
        let mat = Mat::from_fn(n, n, |i, j| rows[i].as_ref()[j]);
        Self::new(mat.as_ref())
    }

    pub fn nvertices(&self) -> usize {
        self.mat.nrows()
    }

    pub fn as_ref(&self) -> MatRef<'_, f64> {
        self.mat.as_ref()
    }

    /// Sum over all ordered pairs, so every edge is counted twice.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Weight of the edges between `{i : in_a[i]}` and its complement.
    pub fn cut_value(&self, in_a: &[bool]) -> f64 {
        let n = self.nvertices();
        assert!(in_a.len() == n);
        let mut cut = 0.0;
        for j in 0..n {
            if in_a[j] {
                continue;
            }
            for i in 0..n {
                if in_a[i] {
                    cut += self.mat.read(i, j);
                }
            }
        }
        cut
    }
}

/// Checks the rounding parameters that accompany a weight matrix.
pub fn validate_parameters(tolerance: f64, max_iters: usize) -> Result<(), ValidationError> {
    // `!(x >= 0)` also rejects NaN
    if !(tolerance >= 0.0) {
        return Err(ValidationError::NegativeTolerance(tolerance));
    }
    if max_iters == 0 {
        return Err(ValidationError::NoIterations);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    fn triangle() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ]
    }

    #[test]
    fn accepts_a_weighted_triangle() {
        let w = WeightMatrix::from_rows(&triangle()).unwrap();
        assert!(w.nvertices() == 3);
        assert!(w.total_weight() == 12.0);
    }

    #[test]
    fn rejects_empty_input() {
        let rows: Vec<Vec<f64>> = vec![];
        assert!(WeightMatrix::from_rows(&rows).unwrap_err() == ValidationError::Empty);
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut rows = triangle();
        rows[1].pop();
        let err = WeightMatrix::from_rows(&rows).unwrap_err();
        assert!(err == ValidationError::NotSquare { row: 1, len: 2, expected: 3 });
    }

    #[test]
    fn rejects_rectangular_matrix() {
        let mat = Mat::<f64>::zeros(2, 3);
        let err = WeightMatrix::new(mat.as_ref()).unwrap_err();
        assert!(matches!(err, ValidationError::NotSquare { .. }));
    }

    #[test]
    fn rejects_asymmetric_matrix() {
        let mut rows = triangle();
        rows[0][2] = 2.5;
        let err = WeightMatrix::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ValidationError::Asymmetric { i: 0, j: 2, .. }));
    }

    #[test]
    fn rejects_tiny_asymmetry() {
        let mut rows = triangle();
        rows[1][2] = 3.0 + f64::EPSILON * 4.0;
        assert!(WeightMatrix::from_rows(&rows).is_err());
    }

    #[test]
    fn rejects_negative_weight() {
        let mut rows = triangle();
        rows[0][1] = -1.0;
        rows[1][0] = -1.0;
        let err = WeightMatrix::from_rows(&rows).unwrap_err();
        assert!(err == ValidationError::NegativeWeight { i: 0, j: 1, value: -1.0 });
    }

    #[test]
    fn rejects_self_loop() {
        let mut rows = triangle();
        rows[2][2] = 0.5;
        let err = WeightMatrix::from_rows(&rows).unwrap_err();
        assert!(err == ValidationError::NonZeroDiagonal { i: 2, value: 0.5 });
    }

    #[test]
    fn rejects_non_finite_weight() {
        let mut rows = triangle();
        rows[0][1] = f64::INFINITY;
        rows[1][0] = f64::INFINITY;
        let err = WeightMatrix::from_rows(&rows).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteWeight { i: 0, j: 1, .. }));
    }

    #[test]
    fn parameters() {
        assert!(validate_parameters(0.0, 1).is_ok());
        assert!(validate_parameters(-1e-3, 1) == Err(ValidationError::NegativeTolerance(-1e-3)));
        assert!(validate_parameters(f64::NAN, 1).is_err());
        assert!(validate_parameters(0.0, 0) == Err(ValidationError::NoIterations));
    }

    #[test]
    fn validation_is_deterministic() {
        let mut rows = triangle();
        rows[0][2] = 7.0;
        let first = WeightMatrix::from_rows(&rows).unwrap_err();
        for _ in 0..8 {
            assert!(WeightMatrix::from_rows(&rows).unwrap_err() == first);
        }
        let rows = triangle();
        for _ in 0..8 {
            assert!(WeightMatrix::from_rows(&rows).is_ok());
        }
    }

    #[test]
    fn cut_value_counts_crossing_edges_once() {
        let w = WeightMatrix::from_rows(&triangle()).unwrap();
        assert!(w.cut_value(&[true, false, false]) == 3.0);
        assert!(w.cut_value(&[true, true, false]) == 5.0);
        assert!(w.cut_value(&[true, true, true]) == 0.0);
    }
}
