use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod figure;
mod model;
mod render;
mod table;

pub type Result<T> = anyhow::Result<T>;

use config::{DEFAULT_EMAX, DEFAULT_EMIN, EfficiencyConfig, StudyConfig, XAxisMode};

#[derive(Parser)]
#[command(name = "scaling-plot")]
#[command(about = "Scaling study plotter", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot relative performance against cost for several scaling tables.
    Compare {
        /// JSON study description; the built-in CPU/GPU study when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output image, overriding the study's.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// Plot raw node counts instead of cost.
        #[arg(long)]
        by_nodes: bool,
    },

    /// Plot scaling efficiency of one table into <INFILE>.png.
    Efficiency {
        infile: PathBuf,

        /// Label every point with its aux column value (`-annotate` also works).
        #[arg(short, long)]
        annotate: bool,

        /// Lower bound of the efficiency axis (%).
        #[arg(long, default_value_t = DEFAULT_EMIN, allow_negative_numbers = true)]
        emin: f64,

        /// Upper bound of the efficiency axis (%).
        #[arg(long, default_value_t = DEFAULT_EMAX, allow_negative_numbers = true)]
        emax: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(legacy_flags(std::env::args_os()));
    init_tracing(cli.verbose);

    let written = match cli.cmd {
        Commands::Compare {
            config,
            out,
            by_nodes,
        } => {
            let mut study = match config {
                Some(path) => StudyConfig::from_file(&path)?,
                None => StudyConfig::default(),
            };
            if let Some(out) = out {
                study.output = out;
            }
            if by_nodes {
                study.x_axis = XAxisMode::Nodes;
            }
            run_compare(&study)?
        }
        Commands::Efficiency {
            infile,
            annotate,
            emin,
            emax,
        } => run_efficiency(&EfficiencyConfig {
            annotate,
            emin,
            emax,
            ..EfficiencyConfig::new(infile)
        })?,
    };

    println!("Wrote {}", written.display());
    Ok(())
}

/// Accept the single-dash `-annotate` of the old plotting scripts.
fn legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-annotate" {
                OsString::from("--annotate")
            } else {
                arg
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Load every table of the study, then draw the comparison plot.
fn run_compare(study: &StudyConfig) -> Result<PathBuf> {
    study.validate()?;

    // 1) Load all tables before drawing anything.
    let tables = study
        .series
        .iter()
        .map(|s| table::parse_table_file(&s.path))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // 2) Normalize + convert to cost.
    let figure = model::build_comparison_figure(study, &tables)?;

    // 3) Render.
    render::render_png(&figure, &study.output)?;
    info!(path = %study.output.display(), series = tables.len(), "wrote comparison plot");
    Ok(study.output.clone())
}

/// Load one table and draw its efficiency plot next to it.
fn run_efficiency(config: &EfficiencyConfig) -> Result<PathBuf> {
    config.validate()?;

    // 1) Load.
    let table = table::parse_table_file(&config.infile)?;

    // 2) Efficiency is relative to the first row; reject unusable baselines.
    model::check_baseline(table.x(), table.y())?;
    let figure = model::build_efficiency_figure(&table, config);

    // 3) Render.
    let out = config.output_path();
    render::render_png(&figure, &out)?;
    info!(path = %out.display(), rows = table.len(), "wrote efficiency plot");
    Ok(out)
}
