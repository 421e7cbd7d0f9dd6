//! # Buildref CLI Entry Point
//!
//! Prints how often each assembly is referenced by the compiler invocations
//! in a build log.
//!
//! ## Usage
//!
//! ```bash
//! # Distribution report only
//! buildref --log build.log
//!
//! # Also list the 20 most referenced assemblies
//! buildref --log build.log --top 20
//!
//! # List every assembly, as JSON
//! buildref --log build.log --top '*' --format json
//! ```
//!
//! ## Producing a log
//!
//! ```bash
//! dotnet build -v:n > build.log
//! msbuild App.sln -flp:Verbosity=normal;LogFile=build.log
//! ```

use buildref::config::Config;
use buildref::log::{InvocationSource, TextLogReader};
use buildref::report::{
    format_elapsed, JsonSink, OutputFormat, Report, ReportSink, TextSink, TopLimit,
};
use buildref::stats;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Buildref - assembly reference statistics for build logs
#[derive(Parser, Debug)]
#[command(name = "buildref")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prints out reference info from a build log", long_about = None)]
struct Args {
    /// Path to the build log
    #[arg(short, long = "log", visible_alias = "binlog", value_name = "FILE")]
    log: PathBuf,

    /// Number of references to list (use '*' to show all)
    #[arg(short, long, value_name = "N|*")]
    top: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    // Parse `--top` before any output so a bad value is reported up front
    let top = TopLimit::parse(args.top.as_deref());

    let compilers = config.compilers();
    let reader = TextLogReader::with_compilers(&args.log, compilers.as_slice())
        .context("Failed to set up build log reader")?;

    let log_name = args
        .log
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.log.display().to_string());
    let text_output = args.format == OutputFormat::Text;

    if text_output {
        println!("Reading in '{log_name}'");
    }
    let timer = Instant::now();
    let invocations = reader.read_invocations()?;
    if text_output {
        println!("Read '{log_name}' in {}", format_elapsed(timer.elapsed()));
    }
    tracing::info!(
        "read {} compiler invocations from {}",
        invocations.len(),
        args.log.display()
    );

    let analysis = stats::analyze(&invocations);
    let report = Report::build(&analysis, &top, &config);

    match args.format {
        OutputFormat::Text => TextSink::stdout(config.bar_marker).render(&report),
        OutputFormat::Json => JsonSink::stdout().render(&report),
    }
}

/// Log to stderr so report output on stdout stays clean. `RUST_LOG`
/// overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
