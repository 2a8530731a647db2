use std::{
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use duc_features::{
    config::{FeatureConfig, TermWeightPolicy},
    output,
    pipeline::{self, SummarySource},
    utils::math::LogBase,
};
use tracing_subscriber::EnvFilter;

/// DUC topic feature extractor
///
/// Reads a directory of sentence-annotated documents (one topic) and prints one
/// feature row per non-title sentence.
#[derive(Parser)]
#[command(name = "duc-features")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Keep words flagged as stop words
    #[arg(long, global = true)]
    keep_stop_words: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text of every retained body sentence
    Inspect {
        /// Topic directory
        docs: PathBuf,
    },

    /// Print the feature matrix, labeled when summaries are given
    Features(FeaturesArgs),

    /// Show where each reference summary line occurs in the topic
    Describe {
        /// Topic directory
        docs: PathBuf,
        /// Reference summary directory
        summaries: PathBuf,
        /// Summary file name prefix (case-insensitive)
        prefix: String,
    },
}

#[derive(clap::Args)]
struct FeaturesArgs {
    /// Topic directory
    docs: PathBuf,

    /// Reference summary directory; adds a label column
    #[arg(long, requires = "prefix")]
    summaries: Option<PathBuf>,

    /// Summary file name prefix (case-insensitive)
    #[arg(long, requires = "summaries")]
    prefix: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Aggregation of word tf*idf into f3 (max, sum, mean)
    #[arg(long)]
    term_weight: Option<TermWeightPolicy>,

    /// idf logarithm base (natural, base2, base10)
    #[arg(long)]
    idf_log: Option<LogBase>,

    /// Cohesion logarithm base (natural, base2, base10)
    #[arg(long)]
    cohesion_log: Option<LogBase>,

    /// Compute on the current thread only
    #[arg(long)]
    sequential: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Cbor,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = FeatureConfig::from_env()?;
    if cli.keep_stop_words {
        config.remove_stop_words = false;
    }

    let start = Instant::now();
    match cli.command {
        Commands::Inspect { docs } => {
            let corpus = pipeline::load_topic(&docs, &config)
                .with_context(|| format!("failed to load topic {}", docs.display()))?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for text in pipeline::inspect(&corpus) {
                writeln!(out, "{text}")?;
            }
        }
        Commands::Features(args) => {
            if let Some(p) = args.term_weight {
                config.term_weight = p;
            }
            if let Some(b) = args.idf_log {
                config.idf_log = b;
            }
            if let Some(b) = args.cohesion_log {
                config.cohesion_log = b;
            }
            if args.sequential {
                config.parallel = false;
            }
            tracing::debug!(?config, "configuration");

            let summaries = match (&args.summaries, &args.prefix) {
                (Some(dir), Some(prefix)) => Some(SummarySource { dir, prefix }),
                _ => None,
            };
            let matrix = pipeline::run_topic(&args.docs, summaries, config)
                .with_context(|| format!("failed to extract features from {}", args.docs.display()))?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            match args.format {
                Format::Csv => output::write_csv(&matrix, &mut out)?,
                Format::Cbor => out.write_all(&output::to_cbor(&matrix)?)?,
            }
            out.flush()?;
        }
        Commands::Describe {
            docs,
            summaries,
            prefix,
        } => {
            let report = pipeline::describe(
                &docs,
                SummarySource {
                    dir: &summaries,
                    prefix: &prefix,
                },
                &config,
            )?;
            print!("{report}");
            tracing::info!(matched = report.matched_num(), "summary lines located");
        }
    }
    tracing::info!("[time] total={:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
