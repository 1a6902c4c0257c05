//! # rustful-tune
//!
//! Command-line interface for tuning forecasters on long-format CSV data.

use clap::{Args, Parser, Subcommand};
use dataset_facade::{
    load_long_csv, load_wide_csv, DatasetEntry, Frequency, LongFormatConfig, WideFormatConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tuning_facade::{
    ForecastObjective, MovingAverageFactory, Optimizer, ParallelRandomSearch, RandomSearch,
    StudyResult, TuningConfig,
};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "rustful-tune")]
#[command(about = "Hyperparameter tuning for time series forecasters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search moving-average hyperparameters on a held-out window
    Tune {
        /// Long-format CSV input
        #[arg(short, long)]
        input: PathBuf,

        /// TOML run configuration; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Forecast horizon
        #[arg(short, long)]
        prediction_length: Option<usize>,

        /// Sampling frequency, e.g. 1H, 1D, 3M
        #[arg(short, long)]
        freq: Option<String>,

        /// Number of trials
        #[arg(short, long)]
        trials: Option<usize>,

        /// Sampling seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Aggregate metric to minimize
        #[arg(short, long)]
        metric: Option<String>,

        /// Evaluate trials in parallel
        #[arg(long)]
        parallel: bool,

        /// Worker threads for --parallel
        #[arg(long)]
        threads: Option<usize>,

        /// Print the full study as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Summarize the series in a long-format CSV
    Inspect {
        /// Long-format CSV input
        #[arg(short, long)]
        input: PathBuf,

        /// Sampling frequency, e.g. 1H, 1D, 3M
        #[arg(short, long)]
        freq: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        columns: ColumnArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct ColumnArgs {
    /// Target column
    #[arg(long, default_value = "target")]
    target_column: String,

    /// Timestamp column
    #[arg(long, default_value = "timestamp")]
    timestamp_column: String,

    /// Series identifier column
    #[arg(long, default_value = "item_id")]
    item_column: String,

    /// Treat the file as one series and ignore the identifier column
    #[arg(long)]
    single_series: bool,

    /// Read one series per column, named by its header, instead of long format
    #[arg(long)]
    wide: bool,
}

impl ColumnArgs {
    fn long_format(&self, freq: Frequency) -> LongFormatConfig {
        let config = LongFormatConfig::new(freq)
            .target(&self.target_column)
            .timestamp(&self.timestamp_column);
        if self.single_series {
            config.single_series()
        } else {
            config.item_id(&self.item_column)
        }
    }

    fn wide_format(&self, freq: Frequency) -> WideFormatConfig {
        WideFormatConfig::new(freq).timestamp(&self.timestamp_column)
    }
}

/// Command-line values layered over a loaded or default configuration.
#[derive(Debug, Default)]
struct Overrides {
    prediction_length: Option<usize>,
    freq: Option<String>,
    trials: Option<usize>,
    seed: Option<u64>,
    metric: Option<String>,
    parallel: bool,
    threads: Option<usize>,
}

fn parse_freq(freq: &str) -> CliResult<Frequency> {
    Frequency::parse(freq).map_err(|e| format!("Invalid frequency: {}", e))
}

/// Build the run configuration from an optional TOML file and flags
fn resolve_config(path: Option<&Path>, overrides: Overrides) -> CliResult<TuningConfig> {
    let mut config = match path {
        Some(path) => TuningConfig::load(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => TuningConfig::default(),
    };

    if let Some(prediction_length) = overrides.prediction_length {
        config.prediction_length = prediction_length;
    }
    if let Some(freq) = overrides.freq {
        config.freq = parse_freq(&freq)?;
    }
    if let Some(trials) = overrides.trials {
        config.trials = trials;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(metric) = overrides.metric {
        config.metric = metric;
    }
    if overrides.parallel {
        config.parallel = true;
    }
    if let Some(threads) = overrides.threads {
        config.threads = Some(threads);
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn load_dataset(input: &Path, freq: Frequency, columns: &ColumnArgs) -> CliResult<Vec<DatasetEntry>> {
    let loaded = if columns.wide {
        load_wide_csv(input, &columns.wide_format(freq))
    } else {
        load_long_csv(input, &columns.long_format(freq))
    };
    let dataset = loaded.map_err(|e| format!("Failed to load dataset: {}", e))?;
    if dataset.is_empty() {
        return Err("No series found in the input".to_string());
    }
    Ok(dataset)
}

/// Run the search the configuration asks for
fn tune(dataset: &[DatasetEntry], config: &TuningConfig) -> CliResult<StudyResult> {
    let objective = ForecastObjective::new(dataset, MovingAverageFactory, config)
        .map_err(|e| format!("Failed to prepare objective: {}", e))?;

    let result = if config.parallel {
        ParallelRandomSearch::from_config(config).optimize(&objective)
    } else {
        RandomSearch::from_config(config).optimize(&objective)
    };
    result.map_err(|e| format!("Search failed: {}", e))
}

fn run_tune(
    input: PathBuf,
    config_path: Option<PathBuf>,
    overrides: Overrides,
    columns: ColumnArgs,
    json: bool,
) -> CliResult<()> {
    let config = resolve_config(config_path.as_deref(), overrides)?;
    let dataset = load_dataset(&input, config.freq, &columns)?;

    info!(
        input = %input.display(),
        series = dataset.len(),
        trials = config.trials,
        prediction_length = config.prediction_length,
        "tuning"
    );

    let result = tune(&dataset, &config)?;

    if json {
        let out = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Metric: {}", result.metric);
    println!(
        "Trials: {} ({} completed, {} failed)",
        result.trials.len(),
        result.n_completed(),
        result.n_failed()
    );

    let best = result.best_trial().map_err(|e| e.to_string())?;
    println!("Best trial: {}", best.number);
    if let Some(value) = best.value {
        println!("Best value: {:.6}", value);
    }
    println!("Best parameters:");
    for (name, value) in &best.params {
        println!("  {}: {}", name, value);
    }

    Ok(())
}

/// One row of the `inspect` summary
#[derive(Debug, Serialize)]
struct SeriesSummary {
    item_id: Option<String>,
    length: usize,
    start: String,
    end: String,
    missing: usize,
}

fn summarize(dataset: &[DatasetEntry]) -> CliResult<Vec<SeriesSummary>> {
    dataset
        .iter()
        .map(|entry| {
            let last = entry
                .timestamp_at(entry.len().saturating_sub(1))
                .map_err(|e| e.to_string())?;
            Ok(SeriesSummary {
                item_id: entry.item_id.clone(),
                length: entry.len(),
                start: entry.start.to_string(),
                end: last.to_string(),
                missing: entry.target.iter().filter(|v| v.is_nan()).count(),
            })
        })
        .collect()
}

fn run_inspect(input: PathBuf, freq: String, columns: ColumnArgs, json: bool) -> CliResult<()> {
    let freq = parse_freq(&freq)?;
    let dataset = load_dataset(&input, freq, &columns)?;
    let summary = summarize(&dataset)?;

    if json {
        let out = serde_json::json!({
            "freq": freq.to_string(),
            "series": summary,
        });
        let out = serde_json::to_string_pretty(&out)
            .map_err(|e| format!("Failed to serialize summary: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Frequency: {}", freq);
    println!("Series: {}", summary.len());
    for row in &summary {
        println!(
            "  {}: {} observations, {} .. {}, {} missing",
            row.item_id.as_deref().unwrap_or("<unnamed>"),
            row.length,
            row.start,
            row.end,
            row.missing
        );
    }

    Ok(())
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rustful_tune=info,tuning_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tune {
            input,
            config,
            prediction_length,
            freq,
            trials,
            seed,
            metric,
            parallel,
            threads,
            json,
            columns,
        } => run_tune(
            input,
            config,
            Overrides {
                prediction_length,
                freq,
                trials,
                seed,
                metric,
                parallel,
                threads,
            },
            columns,
            json,
        ),

        Commands::Inspect {
            input,
            freq,
            json,
            columns,
        } => run_inspect(input, freq, columns, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
