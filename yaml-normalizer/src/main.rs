// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

use std::io::{IsTerminal, Write};

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use yaml_normalizer::{
    BatchRunner, CheckConfig, DEFAULT_MAX_FILE_SIZE, StdioSink, YamlCanonicalizer, YamlDetector,
    output,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Human,
    Json,
}

/// Check that YAML files are already normalized.
///
/// Prints one `[PASSED]` or `[FAILED]` line per YAML file and exits with
/// status 1 if any file is not normalized, is not YAML, or cannot be read.
#[derive(Debug, Parser)]
#[command(name = "yaml-check", version, about)]
struct Cli {
    /// Glob patterns selecting the files to check (e.g. 'config/**/*.yml').
    #[arg(value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Maximum number of files checked at the same time (default: number of CPUs).
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Files larger than this many bytes are reported as failures.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Print a summary after all files were checked.
    #[arg(long)]
    summary: bool,

    /// Summary format.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Human)]
    format: SummaryFormat,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(cli: &Cli) -> Result<bool> {
    let mut config = CheckConfig::default();
    config.jobs = cli.jobs;
    config.max_file_size = cli.max_file_size;

    let detector = YamlDetector::new(config.max_file_size);
    let runner = BatchRunner::new(&detector, &YamlCanonicalizer, &StdioSink, config);
    let report = runner.run_report(cli.patterns.as_slice());

    if cli.summary {
        let mut stdout = std::io::stdout().lock();
        match cli.format {
            SummaryFormat::Human => output::write_human(&report, &mut stdout)?,
            SummaryFormat::Json => output::write_json(&report, &mut stdout)?,
        }
        stdout.flush()?;
    }

    Ok(report.ok())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
