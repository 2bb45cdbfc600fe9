use faer::ColRef;

/// A split of the vertices `0..n` into side `A` and side `B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    in_a: Box<[bool]>,
}

impl Partition {
    pub fn new(in_a: Vec<bool>) -> Self {
        Self {
            in_a: in_a.into_boxed_slice(),
        }
    }

    /// `A = {i : proj[i] >= 0}`, `B = {i : proj[i] < 0}`.
    pub fn from_projections(proj: ColRef<'_, f64>) -> Self {
        let in_a = (0..proj.nrows()).map(|i| proj.read(i) >= 0.0).collect();
        Self { in_a }
    }

    pub fn nvertices(&self) -> usize {
        self.in_a.len()
    }

    pub fn is_in_a(&self, vertex: usize) -> bool {
        self.in_a[vertex]
    }

    pub fn in_a(&self) -> &[bool] {
        &self.in_a
    }

    /// Ascending vertex indices on side `A`.
    pub fn side_a(&self) -> Vec<usize> {
        self.side(true)
    }

    /// Ascending vertex indices on side `B`.
    pub fn side_b(&self) -> Vec<usize> {
        self.side(false)
    }

    fn side(&self, a: bool) -> Vec<usize> {
        self.in_a
            .iter()
            .enumerate()
            .filter_map(|(i, &in_a)| (in_a == a).then_some(i))
            .collect()
    }

    /// Both partitions cut the same edges, possibly with the sides swapped.
    pub fn same_cut_as(&self, other: &Self) -> bool {
        self.nvertices() == other.nvertices()
            && (self.in_a == other.in_a
                || self.in_a.iter().zip(other.in_a.iter()).all(|(a, b)| a != b))
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} | {:?}", self.side_a(), self.side_b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::Mat;

    #[test]
    fn zero_projection_goes_to_side_a() {
        let proj = Mat::from_fn(4, 1, |i, _| [0.5, -0.0, -2.0, 0.0][i]);
        let partition = Partition::from_projections(proj.as_ref().col(0));
        assert!(partition.side_a() == vec![0, 1, 3]);
        assert!(partition.side_b() == vec![2]);
        assert!(all(
            partition.is_in_a(1),
            partition.is_in_a(3),
            !partition.is_in_a(2),
        ));
    }

    #[test]
    fn sides_are_disjoint_and_cover_every_vertex() {
        let partition = Partition::new(vec![true, false, false, true, false]);
        let mut all: Vec<usize> = partition.side_a();
        all.extend(partition.side_b());
        all.sort_unstable();
        assert!(all == (0..5).collect::<Vec<_>>());
        assert!(partition.side_a().iter().all(|i| !partition.side_b().contains(i)));
    }

    #[test]
    fn swapped_sides_are_the_same_cut() {
        let p = Partition::new(vec![true, false, true]);
        let q = Partition::new(vec![false, true, false]);
        let r = Partition::new(vec![true, true, false]);
        assert!(all(p.same_cut_as(&q), q.same_cut_as(&p), !p.same_cut_as(&r)));
        assert!(p.to_string() == "[0, 2] | [1]");
    }
}
