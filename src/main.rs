use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use network_opt::error::SearchError;
use network_opt::ir::{Problem, Ratio, Series};
use network_opt::search::{LocalSolver, SolveResult, SolverConfig, DEFAULT_SEED};
use network_opt::tabulator::{ExhaustiveTabulator, Tabulator};

// --- Command Line Arguments ---

/// CLI component series selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliSeries {
    /// Integer values 1, 2, 3, ...
    Int,
    /// E12 preferred values, extended by decade
    E12,
}

impl From<CliSeries> for Series {
    fn from(cli: CliSeries) -> Self {
        match cli {
            CliSeries::Int => Series::Int,
            CliSeries::E12 => Series::E12,
        }
    }
}

#[derive(Parser)]
#[command(name = "netopt")]
#[command(about = "netopt - resistor network optimizer")]
#[command(version)]
struct Args {
    /// Number of resistors (slots) the network must use
    n: usize,
    /// Largest slot group precomputed exhaustively and swapped in during search
    t: usize,
    /// Bounding flag (accepted for compatibility, currently ignored)
    b: u32,
    /// Component series (case-insensitive)
    #[arg(value_enum, ignore_case = true)]
    series: CliSeries,

    /// Target resistance: integer, fraction like 7/3, or decimal like 2.5
    #[arg(long, default_value = "1")]
    target: Ratio,
    /// Random seed for reproducibility
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Stop after this many seconds
    #[arg(long)]
    time_limit: Option<f64>,
    /// Stop after this many restarts
    #[arg(long)]
    max_restarts: Option<u64>,
    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_time_limit(secs: Option<f64>) -> Result<Option<Duration>, SearchError> {
    match secs {
        None => Ok(None),
        Some(s) => Duration::try_from_secs_f64(s).map(Some).map_err(|e| {
            SearchError::ArgParse(format!("time limit of {} seconds: {}", s, e))
        }),
    }
}

fn run(args: &Args, start: Instant, out: &mut impl Write) -> Result<SolveResult, SearchError> {
    let series = Series::from(args.series);
    let time_limit = parse_time_limit(args.time_limit)?;

    if args.b != 0 {
        warn!(b = args.b, "bounding flag is accepted but has no effect");
    }

    let problem = Problem::from_series(args.n, args.target.clone(), series)?;
    let tabulator = ExhaustiveTabulator::tabulate(&problem, args.t)?;
    info!(
        slots = problem.size(),
        series = %series,
        arity = tabulator.arity(),
        keys = tabulator.len(),
        entries = tabulator.entry_count(),
        "tabulator ready"
    );

    let config = SolverConfig::default()
        .with_seed(args.seed)
        .with_time_limit_option(time_limit)
        .with_max_restarts_option(args.max_restarts)
        .with_verbose(args.verbose)
        .with_start(start);
    if config.is_unbounded() {
        info!("no stop limit given; searching until interrupted");
    }

    let mut solver = LocalSolver::seeded(&tabulator, config)?;
    solver.solve(&problem, out)
}

fn main() {
    let start = Instant::now();
    let args = Args::parse();
    init_logging(args.verbose);

    let command: Vec<String> = std::env::args().collect();
    println!(" Command: {}", command.join(" "));

    match run(&args, start, &mut io::stdout()) {
        Ok(result) => {
            println!();
            println!("Search stopped: {}", result.stop_reason);
            print!("{}", result.statistics.format_summary());
        }
        Err(e) => {
            error!(error = %e, "search failed");
            println!("error: {}", e);
            std::process::exit(1);
        }
    }
}
