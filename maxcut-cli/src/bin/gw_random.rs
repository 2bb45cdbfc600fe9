use clap::Parser;
use maxcut::{max_cut, MixingSolver, GOEMANS_WILLIAMSON_RATIO};
use maxcut_cli::cli_helpers::{init_logging, random_graph, rounding_parameters};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "GW random graphs")]
#[command(about = "Compares rounded cuts with the relaxation bound on random graphs", long_about = None)]
struct Args {
    /// The number of vertices
    #[arg(short = 'n')]
    nvertices: usize,
    /// Edge probability (default: 0.5)
    #[arg(short = 'p')]
    probability: Option<f64>,
    /// The number of graphs to sample (default: 10)
    #[arg(short = 'x')]
    graphs: Option<usize>,
    /// The number of random hyperplanes per graph (default: 100)
    #[arg(short = 'i')]
    iters: Option<usize>,
    /// Seeds both the graphs and the hyperplanes (default: 0)
    #[arg(short = 's')]
    seed: Option<u64>,
    /// The number of threads used for rounding (default: sequential)
    #[arg(short = 'P')]
    par: Option<usize>,
    /// Repeat for more logging
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> eyre::Result<()> {
    let Args {
        nvertices,
        probability,
        graphs,
        iters,
        seed,
        par,
        verbose,
    } = Args::try_parse()?;
    init_logging(verbose)?;
    if let Some(threads) = par {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?
    }
    let probability = probability.unwrap_or(0.5);
    eyre::ensure!(
        (0.0..=1.0).contains(&probability),
        "edge probability {probability} is not in [0, 1]"
    );
    let parameters = rounding_parameters(iters, None, par);
    let rng = &mut StdRng::seed_from_u64(seed.unwrap_or_default());
    let mut solver = MixingSolver::default();

    let mut min_ratio = f64::INFINITY;
    for graph in 0..graphs.unwrap_or(10) {
        let w = random_graph(nvertices, probability, rng);
        let cut = max_cut(w.as_ref(), &parameters, &mut solver, rng)?;
        let ratio = cut.certified_ratio();
        min_ratio = min_ratio.min(ratio);
        println!(
            "[{graph}] cut {:.6}, bound {:.6}, ratio {ratio:.6} ({} sweeps, {} hyperplanes)",
            cut.value,
            cut.upper_bound,
            solver.last_sweeps(),
            cut.iterations,
        );
    }
    println!("minimum ratio {min_ratio:.6} (guarantee {GOEMANS_WILLIAMSON_RATIO:.6} in expectation)");
    Ok(())
}
