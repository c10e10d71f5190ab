//! CLI entry point for the attendance report tool.
//!
//! Loads raw per-lecture attendance records from the attendance server or a
//! file, aggregates them per student, and either prints a filtered summary or
//! exports it as CSV.

use anyhow::Result;
use attendance_report::config::Settings;
use attendance_report::fetch::{ApiKey, BasicClient, HttpClient};
use attendance_report::output::{print_json, print_pretty, write_csv};
use attendance_report::report::table::render_table;
use attendance_report::report::{Bucket, SummaryReport, aggregate_events, filter_by_bucket};
use attendance_report::source;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "attendance_report")]
#[command(about = "Aggregate lecture attendance into per-student reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the per-student attendance summary
    Summary {
        /// Path to a JSON/CSV file or URL to fetch [default: $ATTENDANCE_SOURCE]
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Attendance bucket to show: all, full, atLeastThreeQuarters, belowThreeQuarters
        #[arg(short, long, default_value = "all")]
        filter: Bucket,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Export the per-student attendance summary as CSV
    Export {
        /// Path to a JSON/CSV file or URL to fetch [default: $ATTENDANCE_SOURCE]
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Only export students in this attendance bucket
        #[arg(short, long, default_value = "all")]
        filter: Bucket,

        /// CSV file to write [default: $ATTENDANCE_EXPORT_PATH or student_attendance.csv]
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env();
    let _file_guard = init_tracing(&settings.log_file_path)?;

    let cli = Cli::parse();
    let client = http_client(&settings)?;

    match cli.command {
        Commands::Summary {
            source,
            filter,
            format,
        } => {
            let source = source.unwrap_or_else(|| settings.source.clone());
            let events = source::load(&source, client.as_ref()).await?;
            let aggregation = aggregate_events(&events);

            if aggregation.skipped > 0 {
                warn!(skipped = aggregation.skipped, "Some attendance records were skipped");
            }

            let report = SummaryReport::new(&aggregation, filter);
            print_pretty(&report);

            match format {
                OutputFormat::Table => print!("{}", render_table(&report)),
                OutputFormat::Json => print_json(&report)?,
            }

            info!(
                students = aggregation.summaries.len(),
                shown = report.students.len(),
                bucket = %filter,
                "Summary rendered"
            );
        }
        Commands::Export {
            source,
            filter,
            output,
        } => {
            let source = source.unwrap_or_else(|| settings.source.clone());
            let output = output.unwrap_or_else(|| settings.export_path.clone());

            let events = source::load(&source, client.as_ref()).await?;
            let aggregation = aggregate_events(&events);
            let rows = filter_by_bucket(&aggregation.summaries, filter);

            write_csv(&output, &rows)?;

            info!(
                output = %output,
                rows = rows.len(),
                skipped = aggregation.skipped,
                bucket = %filter,
                "Attendance exported"
            );
        }
    }

    Ok(())
}

/// Colored stderr logs plus a JSON rolling log file.
///
/// The returned guard flushes the file writer and must outlive `main`'s work.
fn init_tracing(log_file_path: &str) -> Result<WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("attendance_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Plain client, or one that sends `ATTENDANCE_API_TOKEN` as a bearer token.
fn http_client(settings: &Settings) -> Result<Box<dyn HttpClient>> {
    let basic = BasicClient::new()?;

    Ok(match settings.api_token.as_deref() {
        Some(token) => Box::new(ApiKey::bearer(basic, token)?),
        None => Box::new(basic),
    })
}
