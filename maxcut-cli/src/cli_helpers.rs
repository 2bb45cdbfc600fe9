use faer::Mat;
use maxcut::{MaxCut, RoundingParameters};
use rand::Rng;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Installs a stderr logger; `-v` shows debug output, `-vv` every improving cut.
pub fn init_logging(verbosity: u8) -> eyre::Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

pub fn rounding_parameters(
    iters: Option<usize>,
    tolerance: Option<f64>,
    threads: Option<usize>,
) -> RoundingParameters {
    let defaults = RoundingParameters::default();
    RoundingParameters {
        max_iters: iters.unwrap_or(defaults.max_iters),
        tolerance: tolerance.unwrap_or(defaults.tolerance),
        parallelism: threads.map_or(faer::Parallelism::None, faer::Parallelism::Rayon),
    }
}

/// An Erdős–Rényi graph with uniform `(0, 1)` weights on the edges.
pub fn random_graph(n: usize, edge_probability: f64, rng: &mut impl Rng) -> Mat<f64> {
    let mut w = Mat::<f64>::zeros(n, n);
    for j in 0..n {
        for i in 0..j {
            if rng.gen_bool(edge_probability) {
                let weight: f64 = rng.gen();
                w[(i, j)] = weight;
                w[(j, i)] = weight;
            }
        }
    }
    w
}

/// Multi-line human-readable summary; vertices are numbered from 1.
pub fn report(cut: &MaxCut) -> String {
    let mut lines = vec![
        format!("cut value:   {}", cut.value),
        format!("upper bound: {}", cut.upper_bound),
        format!("ratio:       {:.6}", cut.certified_ratio()),
        format!(
            "iterations:  {}{}",
            cut.iterations,
            if cut.reached_tolerance {
                " (tolerance reached)"
            } else {
                ""
            }
        ),
    ];
    match &cut.partition {
        Some(partition) => {
            let one_based = |side: Vec<usize>| side.into_iter().map(|i| i + 1).collect::<Vec<_>>();
            lines.push(format!("side a:      {:?}", one_based(partition.side_a())));
            lines.push(format!("side b:      {:?}", one_based(partition.side_b())));
        }
        None => lines.push("no hyperplane cut any edge".to_string()),
    }
    lines.join("\n")
}
