use anyhow::Context;
use clap::Parser;
use divsel::input::{self, InputSource};
use divsel::output::{self, RunReport};
use divsel::{select_indices, SelectionOptions, SequenceMode, DEFAULT_COMPLETENESS_WEIGHT};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Select a diverse subset of records from a JSON array
#[derive(Parser, Debug)]
#[command(name = "divsel", version)]
#[command(about = "Select a diverse, representative subset of JSON records", long_about = None)]
struct Args {
    /// Input JSON file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Number of records to select
    #[arg(short, long)]
    num_examples: usize,

    /// Cap on the number of records considered (default: min(1000, input size))
    #[arg(long)]
    sample_size: Option<usize>,

    /// Favor records with more populated fields
    #[arg(long)]
    prioritize_complete: bool,

    /// Completeness share of the score when prioritizing complete records (0 to 1)
    #[arg(long, default_value_t = DEFAULT_COMPLETENESS_WEIGHT, allow_negative_numbers = true)]
    completeness_weight: f64,

    /// Dot-separated path to the array inside the input document
    #[arg(short, long)]
    key_path: Option<String>,

    /// Write the selection here instead of stdout
    #[arg(short, long)]
    out_file: Option<PathBuf>,

    /// Write run details (sampling strategy, working set, distance evaluations) as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Read the input document from the system clipboard
    #[arg(long, conflicts_with = "file")]
    clipboard: bool,

    /// Seed for reproducible selections
    #[arg(long)]
    seed: Option<u64>,

    /// How nested arrays are compared: positional, length or members
    #[arg(long, default_value = "positional")]
    sequence_mode: SequenceMode,

    /// Compute candidate distances in parallel
    #[arg(long)]
    parallel: bool,

    /// Log level (logs go to stderr)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn source(&self) -> InputSource {
        match (&self.file, self.clipboard) {
            (Some(path), _) => InputSource::File(path.clone()),
            (None, true) => InputSource::Clipboard,
            (None, false) => InputSource::Stdin,
        }
    }

    fn selection_options(&self) -> SelectionOptions {
        let mut options = SelectionOptions::new(self.num_examples)
            .with_prioritize_complete(self.prioritize_complete)
            .with_completeness_weight(self.completeness_weight)
            .with_sequence_mode(self.sequence_mode)
            .with_parallel(self.parallel);
        if let Some(sample_size) = self.sample_size {
            options = options.with_sample_size(sample_size);
        }
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = args.source();
    info!("Reading input from {}", source);
    let text = input::read_source(&source)
        .with_context(|| format!("failed to read input from {}", source))?;
    let records = input::parse_records(&text, args.key_path.as_deref())?;
    info!("Loaded {} records", records.len());

    let options = args.selection_options();
    debug!("Selection options: {:?}", options);
    let selection = select_indices(&records, &options)?;
    info!("Selected {} records", selection.len());

    let selected: Vec<_> = selection.records(&records).into_iter().cloned().collect();

    output::write_records(&selected, args.out_file.as_deref())
        .context("failed to write output")?;
    if let Some(path) = &args.out_file {
        info!("Wrote selection to {:?}", path);
    }
    if let Some(path) = &args.report {
        let report = RunReport {
            input_size: records.len(),
            sequence_mode: options.sequence_mode,
            selection: &selection,
        };
        output::write_report(&report, path).context("failed to write report")?;
        info!("Wrote run report to {:?}", path);
    }
    Ok(())
}
