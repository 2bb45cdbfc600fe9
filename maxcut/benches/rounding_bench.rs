use diol::prelude::*;
use faer::Mat;
use maxcut::{
    upper_bound, Embedding, MixingSolver, Relaxation, RoundingEngine, RoundingParameters,
    SdpSolver, StabilizedMatrix, WeightMatrix,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_graph(n: usize) -> WeightMatrix {
    let rng = &mut StdRng::seed_from_u64(n as u64);
    let mut w = Mat::<f64>::zeros(n, n);
    for j in 0..n {
        for i in 0..j {
            if rng.gen_bool(0.3) {
                let weight = rng.gen_range(0.0..1.0);
                w[(i, j)] = weight;
                w[(j, i)] = weight;
            }
        }
    }
    // generated symmetric, nonnegative and loop-free
    WeightMatrix::new(w.as_ref()).unwrap()
}

mod relaxation {
    use super::*;

    pub fn params() -> Vec<usize> {
        vec![32, 64, 128]
    }

    pub fn mixing(bencher: Bencher, n: usize) {
        let weights = random_graph(n);
        bencher.bench(|| {
            MixingSolver::default()
                .solve(&Relaxation::new(&weights))
                .unwrap()
        })
    }
}

mod rounding {
    use super::*;

    pub fn params() -> Vec<usize> {
        vec![32, 64, 128, 256]
    }

    fn round(bencher: Bencher, n: usize, parallelism: faer::Parallelism) {
        let weights = random_graph(n);
        let solution = MixingSolver::default()
            .solve(&Relaxation::new(&weights))
            .unwrap();
        let embedding = Embedding::factor(&StabilizedMatrix::new(solution.matrix.as_ref())).unwrap();
        let bound = upper_bound(&weights, solution.objective);
        let engine = RoundingEngine::new(&weights, &embedding, bound);
        let parameters = RoundingParameters {
            max_iters: 256,
            tolerance: 0.0,
            parallelism,
        };
        bencher.bench(|| {
            let rng = &mut StdRng::seed_from_u64(0);
            engine.round(&parameters, rng)
        })
    }

    pub fn sequential(bencher: Bencher, n: usize) {
        round(bencher, n, faer::Parallelism::None)
    }

    pub fn rayon(bencher: Bencher, n: usize) {
        round(bencher, n, faer::Parallelism::Rayon(0))
    }
}

fn main() {
    let config = BenchConfig::from_args();
    let mut bench = Bench::new(config.clone());
    bench.register_many(list![relaxation::mixing], relaxation::params());
    bench.run();

    let mut bench = Bench::new(config.clone());
    bench.register_many(
        list![rounding::sequential, rounding::rayon],
        rounding::params(),
    );
    bench.run();
}
