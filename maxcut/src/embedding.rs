use equator::assert;
use faer::{linalg::matmul::matmul, Mat, MatMut, MatRef, Side};

use crate::{error::FactorizationError, stabilize::StabilizedMatrix};

/// Eigenvalues below `-NEGATIVE_EIGENVALUE_TOLERANCE * max(1, max |a_ij|)` are
/// not rounding error.
pub const NEGATIVE_EIGENVALUE_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorizationMethod {
    Cholesky,
    Spectral,
}

/// One vector per vertex: column `i` of a `k x n` factor `X` with `X^T X = A`.
#[derive(Debug, Clone)]
pub struct Embedding {
    factor: Mat<f64>,
    method: FactorizationMethod,
}

impl Embedding {
    /// Cholesky first (`A = L L^T`, `X = L^T`). A matrix that is positive
    /// semidefinite only up to rounding may still break Cholesky, in which case
    /// the spectral square root `X = diag(sqrt(lambda)) Q^T` is used instead.
    pub fn factor(stabilized: &StabilizedMatrix) -> Result<Self, FactorizationError> {
        let a = stabilized.as_ref();
        let n = a.nrows();
        for j in 0..n {
            for i in 0..n {
                if !a.read(i, j).is_finite() {
                    return Err(FactorizationError::NonFinite { i, j });
                }
            }
        }
        match a.cholesky(Side::Lower) {
            Ok(cholesky) => {
                let l = cholesky.compute_l();
                Ok(Self {
                    factor: l.transpose().to_owned(),
                    method: FactorizationMethod::Cholesky,
                })
            }
            Err(_) => {
                log::debug!("cholesky rejected the stabilized matrix, using its spectral square root");
                Self::spectral(a)
            }
        }
    }

    fn spectral(a: MatRef<'_, f64>) -> Result<Self, FactorizationError> {
        let n = a.nrows();
        let scale = (0..n)
            .flat_map(|j| (0..n).map(move |i| (i, j)))
            .map(|(i, j)| a.read(i, j).abs())
            .fold(1.0, f64::max);
        let threshold = -NEGATIVE_EIGENVALUE_TOLERANCE * scale;
        let evd = a.selfadjoint_eigendecomposition(Side::Lower);
        let q = evd.u();
        let eigenvalues = evd.s().column_vector();
        let mut rows = Vec::with_capacity(n);
        for k in 0..n {
            let eigenvalue = eigenvalues.read(k);
            if eigenvalue < threshold {
                return Err(FactorizationError::Indefinite {
                    eigenvalue,
                    threshold,
                });
            }
            if eigenvalue > 0.0 {
                rows.push((k, eigenvalue.sqrt()));
            }
        }
        let factor = Mat::from_fn(rows.len(), n, |row, i| {
            let (k, root) = rows[row];
            root * q.read(i, k)
        });
        Ok(Self {
            factor,
            method: FactorizationMethod::Spectral,
        })
    }

    /// `k`, the dimension the vertices are embedded in.
    pub fn dimension(&self) -> usize {
        self.factor.nrows()
    }

    pub fn nvertices(&self) -> usize {
        self.factor.ncols()
    }

    pub fn method(&self) -> FactorizationMethod {
        self.method
    }

    /// The `k x n` factor.
    pub fn as_ref(&self) -> MatRef<'_, f64> {
        self.factor.as_ref()
    }

    /// `out = X^T r`, the signed distance of every vertex vector to the
    /// hyperplane with normal `r` (up to `|r|`).
    pub fn project(&self, r: &[f64], out: MatMut<'_, f64>, parallelism: faer::Parallelism) {
        assert!(r.len() == self.dimension());
        let r = faer::mat::from_column_major_slice::<f64>(r, r.len(), 1);
        matmul(out, self.factor.transpose(), r, None, 1.0, parallelism);
    }
}
