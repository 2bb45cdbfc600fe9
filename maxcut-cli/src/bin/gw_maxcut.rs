use clap::Parser;
use maxcut::{solve_validated, MixingParameters, MixingSolver, WeightMatrix};
use maxcut_cli::{
    cli_helpers::{init_logging, report, rounding_parameters},
    matrix_file::read_rows,
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "GW MAXCUT")]
#[command(about = "Approximates a maximum cut with the Goemans-Williamson relaxation", long_about = None)]
struct Args {
    /// Text file with one row of the weight matrix per line
    #[arg(short = 'w')]
    weights: std::path::PathBuf,
    /// The number of random hyperplanes (default: 100)
    #[arg(short = 'i')]
    iters: Option<usize>,
    /// Stop once the cut is within this distance of the upper bound (default: 0)
    #[arg(short = 't')]
    tolerance: Option<f64>,
    /// Seeds the hyperplanes (default: from entropy)
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
        weights,
        iters,
        tolerance,
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
    let parameters = rounding_parameters(iters, tolerance, par);
    let rows = read_rows(&weights)?;
    let weights = WeightMatrix::from_rows(&rows)?;
    log::info!("{} vertices, rounding with {parameters}", weights.nvertices());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut solver = MixingSolver::new(MixingParameters {
        seed: seed.unwrap_or_default(),
        ..MixingParameters::default()
    });
    let cut = solve_validated(&weights, &parameters, &mut solver, &mut rng)?;
    log::info!("relaxation solved in {} sweeps", solver.last_sweeps());
    println!("{}", report(&cut));
    Ok(())
}
