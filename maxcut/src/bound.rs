use crate::validate::WeightMatrix;

/// The Goemans-Williamson guarantee: the expected hyperplane cut is at least
/// this fraction of the relaxation value.
pub const GOEMANS_WILLIAMSON_RATIO: f64 = 0.878_567_205_784_851_2;

/// `(sum(W) - obj) / 4`, where `obj` is the optimal `<W, S>` of the relaxation.
///
/// For a cut with signs `x`, `<W, x x^T> = sum(W) - 4 * cut`, and `x x^T` is
/// feasible for the relaxation, so no cut exceeds this value.
pub fn upper_bound(weights: &WeightMatrix, objective: f64) -> f64 {
    (weights.total_weight() - objective) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    #[test]
    fn identity_relaxation_bounds_by_half_the_total() {
        let w = WeightMatrix::from_rows(&[[0.0, 3.0], [3.0, 0.0]]).unwrap();
        // S = I gives <W, S> = 0
        assert!(upper_bound(&w, 0.0) == 1.5);
        // S = [[1, -1], [-1, 1]] is the cut itself
        assert!(upper_bound(&w, -6.0) == 3.0);
    }
}
