//! ftable - Letter frequency table
//!
//! Counts ASCII letters (case folded) in a text stream and prints the total
//! followed by a count, percentage, and bar for each of A-Z.
//!
//! Usage:
//!   ftable [-v] [-s num] [-p num] [infile [outfile]]
//!
//! Exit status: 0 on success, 2 on a usage or configuration error, 3 when
//! the input or output file cannot be opened, 1 on any other I/O failure.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ftable_core::{default_config_path, load_config, scan, Config, FtableError, Report};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod streams;

use streams::{open_streams, Streams};

#[derive(Parser)]
#[command(name = "ftable")]
#[command(about = "Generate a letter frequency table for a text or a subset of it")]
#[command(version)]
struct Cli {
    /// Log diagnostics to stderr (the table itself is unchanged)
    #[arg(short, long)]
    verbose: bool,

    /// Ignore this many leading letters
    #[arg(short, long, value_name = "num")]
    skip: Option<u64>,

    /// Tally one letter out of every <num>, starting with the first one
    #[arg(
        short,
        long,
        value_name = "num",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    period: Option<u64>,

    /// Config file (default: config.toml in the platform config directory)
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,

    /// Input file (default: stdin)
    infile: Option<PathBuf>,

    /// Output file (default: stdout)
    outfile: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Usage errors exit with status 2 from inside clap
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // stderr may already be closed
            let _ = writeln!(std::io::stderr(), "ftable: {err}");
            let code = err
                .downcast_ref::<FtableError>()
                .map_or(1, FtableError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr so stdout only ever carries the table.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    let options = config.scan_options(cli.skip, cli.period)?;
    debug!(
        skip = options.skip(),
        period = options.period(),
        "Resolved scan options"
    );

    let Streams { input, mut output } =
        open_streams(cli.infile.as_deref(), cli.outfile.as_deref())?;

    let tally = scan(input, &options)?;

    Report::new(&tally)
        .write_to(&mut output)
        .map_err(FtableError::Write)?;
    output.flush().map_err(FtableError::Write)?;

    debug!(total_chars = tally.total_chars, "Wrote frequency table");
    Ok(())
}

/// An explicit `--config` must exist and parse. The default location is
/// optional, and a broken default file only earns a warning.
fn resolve_config(explicit: Option<&Path>) -> Result<Config, FtableError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(FtableError::Config {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }
        if !path.is_file() {
            return Err(FtableError::Config {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        return load_config(path);
    }

    let Some(path) = default_config_path() else {
        debug!("No config directory for this platform, using defaults");
        return Ok(Config::default());
    };

    match load_config(&path) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!("{err}. Using defaults.");
            Ok(Config::default())
        }
    }
}
