use std::io::{stderr, stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use tokio::time::sleep;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use fraud_lens::analysis::{Selection, DISPLAY_LIMIT};
use fraud_lens::engine::AnalysisEngine;
use fraud_lens::models::{columns, Record};
use fraud_lens::session::AnalyzerSession;
use fraud_lens::simulation::{AlertBoard, DashboardSnapshot, ModelRegistry, Monitor, ScanEvent, SecurityScanner, SimulationError, SmsCheck, SCAN_SETTLE_DELAY, SCAN_STEPS};

const SAMPLE_PATH: &str = "samples/synthetic_financial_data.csv";
const ALL: &str = "all";

#[derive(Parser)]
#[command(name = "fraud-lens")]
#[command(about = "Fraud analysis of transaction CSV exports with a simulated monitoring dashboard")]
#[command(version)]
struct Cli {
    /// Available log levels: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "error")]
    log_level: String,
    #[command(subcommand)]
    command: Command
}

#[derive(Args)]
struct FilterArgs {
    /// Show legitimate transactions as well as fraudulent ones
    #[arg(long)]
    all: bool,
    /// Only show this purchase category ("all" for every category)
    #[arg(long)]
    category: Option<String>,
    /// Only show this card type ("all" for every card type)
    #[arg(long)]
    card_type: Option<String>,
    /// Run the simulated AI analysis before showing results
    #[arg(long)]
    simulate: bool
}

#[derive(Subcommand)]
enum Command {
    /// Print the matching transactions of a CSV file (first 200)
    Analyze {
        path: PathBuf,
        #[command(flatten)]
        filters: FilterArgs
    },
    /// Same as analyze, using the bundled sample dataset
    Sample {
        #[arg(long, default_value = SAMPLE_PATH)]
        sample_path: PathBuf,
        #[command(flatten)]
        filters: FilterArgs
    },
    /// Print fraud statistics of a CSV file as JSON
    Stats {
        path: PathBuf
    },
    /// Print the category and card type filter options of a CSV file as JSON
    Options {
        path: PathBuf
    },
    /// Run a security scan and print the refreshed dashboard as JSON
    Dashboard {
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the scan and print a freshly generated dashboard
        #[arg(long)]
        no_scan: bool
    },
    /// Print live fraud probabilities of the detection models, one CSV line per tick
    Monitor {
        #[arg(long, default_value_t = 5)]
        ticks: u32,
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
        /// Retrain this model while monitoring
        #[arg(long)]
        retrain: Option<String>,
        #[arg(long)]
        seed: Option<u64>
    },
    /// Check an SMS message for phishing and print the verdict as JSON
    Detect {
        message: String
    },
    /// Apply actions to the alert board and print it as JSON
    Alerts {
        #[arg(long)]
        investigate: Vec<u32>,
        #[arg(long)]
        resolve: Vec<u32>,
        #[arg(long)]
        block: Vec<u32>
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    match cli.command {
        Command::Analyze { path, filters } => analyze(&path, filters).await,
        Command::Sample { sample_path, filters } => analyze(&sample_path, filters).await,
        Command::Stats { path } => {
            let session = load_session(&path, false).await?;
            write_json_to_stdout(&session.statistics())
        }
        Command::Options { path } => {
            let session = load_session(&path, false).await?;
            write_json_to_stdout(session.options())
        }
        Command::Dashboard { seed, no_scan } => dashboard(seed, no_scan).await,
        Command::Monitor { ticks, interval_ms, retrain, seed } => monitor(ticks, interval_ms, retrain.as_deref(), seed).await,
        Command::Detect { message } => detect(&message).await,
        Command::Alerts { investigate, resolve, block } => alerts(&investigate, &resolve, &block)
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Results are written to stdout so they can be redirected, logging stays on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn selection(value: Option<String>) -> Selection {
    Selection::from(value.filter(|value| !value.eq_ignore_ascii_case(ALL)))
}

async fn load_session(path: &Path, simulate: bool) -> Result<AnalyzerSession> {
    let mut session = AnalyzerSession::new();
    let engine = AnalysisEngine::new().with_simulation(simulate);

    let timer = Instant::now();
    engine.run(&mut session, path, StdRng::from_entropy()).await?;
    info!("Analyzed {} in: {:?}", path.display(), timer.elapsed());

    Ok(session)
}

async fn analyze(path: &Path, filters: FilterArgs) -> Result<()> {
    let mut session = load_session(path, filters.simulate).await?;

    session.set_fraud_only(!filters.all);
    session.set_category(selection(filters.category));
    session.set_card_type(selection(filters.card_type));

    let view = session.view();

    write_records_to_stdout(session.headers(), view.displayed())?;

    if view.is_truncated() {
        eprintln!("Showing first {} of {} results", DISPLAY_LIMIT, view.total_matches());
    } else {
        eprintln!("{} results", view.total_matches());
    }

    Ok(())
}

async fn dashboard(seed: Option<u64>, no_scan: bool) -> Result<()> {
    let mut rng = seeded_rng(seed);

    if !no_scan {
        let mut scanner = SecurityScanner::new();

        if let Some(mut events) = scanner.start() {
            let mut reported_step = None;

            while let Some(event) = events.recv().await {
                match event {
                    ScanEvent::Progress(run) => {
                        if reported_step != Some(run.current_step()) {
                            reported_step = Some(run.current_step());
                            info!("Running {}", SCAN_STEPS[run.current_step()]);
                        }
                    }
                    ScanEvent::Completed => info!("Security scan complete")
                }
            }

            sleep(SCAN_SETTLE_DELAY).await;
        }
    }

    write_json_to_stdout(&DashboardSnapshot::generate(&mut rng))
}

async fn monitor(ticks: u32, interval_ms: u64, retrain: Option<&str>, seed: Option<u64>) -> Result<()> {
    let registry = ModelRegistry::seeded();
    let mut writer = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    let mut header = vec!["tick"];
    header.extend(registry.models().iter().map(|model| model.name));
    writer.write_record(&header)?;
    writer.flush()?;

    let final_registry = Monitor::new(registry)
        .with_interval(Duration::from_millis(interval_ms))
        .run(ticks, retrain, seeded_rng(seed), |tick, registry: &ModelRegistry| -> Result<()> {
            let mut row = vec![tick.to_string()];
            row.extend(registry.probabilities().iter().map(|probability| format!("{probability:.1}")));
            writer.write_record(&row)?;
            writer.flush()?;
            Ok(())
        })
        .await?;

    for model in final_registry.models() {
        info!("{} accuracy {:.1}% last trained {}", model.name, model.accuracy, model.last_trained);
    }

    Ok(())
}

async fn detect(message: &str) -> Result<()> {
    let mut check = SmsCheck::new();
    let verdict = check.detect(message)?.await?;

    info!("SMS check finished: {}", verdict.prediction);

    write_json_to_stdout(&verdict)
}

fn alerts(investigate: &[u32], resolve: &[u32], block: &[u32]) -> Result<()> {
    let mut board = AlertBoard::seeded();

    let report = |result: Result<(), SimulationError>| {
        if let Err(error) = result {
            warn!("{error}");
        }
    };

    for alert_id in investigate {
        report(board.investigate(*alert_id));
    }

    for alert_id in resolve {
        report(board.resolve(*alert_id));
    }

    for alert_id in block {
        report(board.block(*alert_id).map(|_| ()));
    }

    write_json_to_stdout(&json!({
        "alerts": board.alerts(),
        "stats": board.stats()
    }))
}

fn write_records_to_stdout(headers: &[String], records: &[&Record]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    //NOTE: A file without data rows has no header to echo back
    if headers.is_empty() {
        writer.write_record(columns::EXPECTED)?;
    } else {
        writer.write_record(headers)?;
    }

    for record in records {
        writer.write_record(record.values())?;
    }

    writer.flush()?;

    Ok(())
}

fn write_json_to_stdout<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, value)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
