//! CLI entry point for the data-quality verification checks.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use lex_verify::{
    CheckConfig, CheckConfigBuilder, CheckKind, CheckReport, Dataset, ReportGenerator,
    VerificationReport, render_text, run_all,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// CLI-compatible check selector
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCheck {
    /// Constant columns
    #[value(name = "A")]
    A,
    /// Correlated columns
    #[value(name = "B")]
    B,
    /// Columns with outliers
    #[value(name = "C")]
    C,
    /// Columns with derived-value inconsistencies
    #[value(name = "D")]
    D,
    /// Columns with implausible values
    #[value(name = "E")]
    E,
    /// Rows with outliers
    #[value(name = "G")]
    G,
    /// Duplicate rows with conflicting labels
    #[value(name = "H")]
    H,
    /// Rows with outliers within their label class
    #[value(name = "I")]
    I,
    /// Rows with derived-value inconsistencies
    #[value(name = "J")]
    J,
    /// Rows with implausible or missing values
    #[value(name = "K")]
    K,
}

impl From<CliCheck> for CheckKind {
    fn from(cli: CliCheck) -> Self {
        match cli {
            CliCheck::A => CheckKind::A,
            CliCheck::B => CheckKind::B,
            CliCheck::C => CheckKind::C,
            CliCheck::D => CheckKind::D,
            CliCheck::E => CheckKind::E,
            CliCheck::G => CheckKind::G,
            CliCheck::H => CheckKind::H,
            CliCheck::I => CheckKind::I,
            CliCheck::J => CheckKind::J,
            CliCheck::K => CheckKind::K,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Statistical data-quality verification for labelled tabular data",
    long_about = "Runs one verification check (or all of them) over a CSV file and prints \
                  the number of implicated columns or rows followed by the sorted items.\n\n\
                  EXAMPLES:\n  \
                  # Rows violating the derived-value identities\n  \
                  lex-verify J page-blocks.csv\n\n  \
                  # Every check, as JSON\n  \
                  lex-verify --all page-blocks.csv --json\n\n  \
                  # Custom thresholds\n  \
                  lex-verify G page-blocks.csv --config thresholds.json",
    allow_missing_positional = true
)]
struct Args {
    /// Check to run (omit with --all)
    #[arg(value_enum, ignore_case = true, conflicts_with = "all")]
    check: Option<CliCheck>,

    /// Path to the CSV file to verify
    path: PathBuf,

    /// Run every check in registry order
    #[arg(short, long)]
    all: bool,

    /// JSON file with a serialized check configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the label column (overrides the configuration)
    #[arg(long)]
    label_column: Option<String>,

    /// Missing-value token (overrides the configuration)
    #[arg(long)]
    missing: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors besides the result
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of plain text
    ///
    /// Disables all logs; only outputs the report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report into this directory
    ///
    /// The report is saved as <input_name>_<check>_report.json, or
    /// <input_name>_report.json with --all
    #[arg(short = 'r', long, value_name = "DIR")]
    emit_report: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables (RUST_LOG) before the subscriber reads them
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    if !args.all && args.check.is_none() {
        return Err(anyhow!("A check code is required unless --all is given"));
    }

    if !args.path.exists() {
        return Err(anyhow!("Input file not found: {}", args.path.display()));
    }

    let config = load_config(&args)?;
    debug!("Using configuration: {:?}", config);

    let dataset = Dataset::from_csv(&args.path, &config)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;

    match args.check {
        Some(check) if !args.all => run_single(&args, &dataset, &config, check.into()),
        _ => run_every(&args, &dataset, &config),
    }
}

/// Build the effective configuration: defaults, then the `--config` file,
/// then individual flags.
fn load_config(args: &Args) -> Result<CheckConfig> {
    let base = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str::<CheckConfig>(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => CheckConfig::default(),
    };

    let mut builder = CheckConfigBuilder::from_config(base);
    if let Some(ref label) = args.label_column {
        builder = builder.label_column(label);
    }
    if let Some(ref missing) = args.missing {
        builder = builder.missing_marker(missing);
    }

    Ok(builder.build()?)
}

fn run_single(
    args: &Args,
    dataset: &Dataset,
    config: &CheckConfig,
    kind: CheckKind,
) -> Result<()> {
    let start = Instant::now();
    let outcome = kind.run(dataset, config)?;
    info!(
        "Check {} ({}) finished in {:?}",
        kind,
        kind.description(),
        start.elapsed()
    );

    let report = CheckReport::new(&args.path, kind, outcome);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report.entry.result));
    }

    if let Some(ref dir) = args.emit_report {
        let base_name = format!("{}_{}", extract_file_stem(&args.path), kind);
        ReportGenerator::new(dir.clone()).write_report_to_file(&report, &base_name)?;
    }

    Ok(())
}

fn run_every(args: &Args, dataset: &Dataset, config: &CheckConfig) -> Result<()> {
    let report = VerificationReport::new(&args.path, dataset, run_all(dataset, config)?);
    info!(
        "{} of {} checks reported findings",
        report.checks_flagged,
        report.checks.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.checks {
            println!("# {}: {}", entry.check, entry.description);
            print!("{}", render_text(&entry.result));
        }
    }

    if let Some(ref dir) = args.emit_report {
        ReportGenerator::new(dir.clone())
            .write_report_to_file(&report, &extract_file_stem(&args.path))?;
    }

    Ok(())
}

fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}
