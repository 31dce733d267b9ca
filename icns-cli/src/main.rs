//! ICNS Inspector CLI Application
//!
//! This is the command-line interface for the ICNS decoder.
//! It uses the icns-decoder library and adds:
//! - File loading
//! - TOML configuration
//! - Parallel decoding of multiple files
//! - Report generation (TXT/JSON)

use anyhow::{Context, Result};
use clap::Parser;
use icns_decoder::{Container, Decoder, DecoderConfig};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod load;
mod report;

use config::{AppConfig, OutputFormat};
use load::LoadedFile;

/// ICNS Inspector - Decode and inspect Apple icon container files
#[derive(Parser, Debug)]
#[command(name = "icns-cli")]
#[command(about = "Decode and inspect Apple icon container (ICNS) files", long_about = None)]
#[command(version)]
struct Args {
    /// ICNS file(s) to decode
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Report format (default: txt)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of payload bytes to show per entry (default: 16)
    #[arg(long, value_name = "COUNT")]
    preview_bytes: Option<usize>,

    /// Reject files whose header length disagrees with their entries
    #[arg(long)]
    strict_length: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors (no reports, error-level logging only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("ICNS Inspector v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", icns_decoder::VERSION);

    let stdout = io::stdout();
    let failures = run(&args, &mut stdout.lock())?;

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed", failures, args.files.len());
    }

    Ok(())
}

/// Effective settings after merging the config file with command-line flags
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    decoder: DecoderConfig,
    format: OutputFormat,
    preview_bytes: usize,
}

/// Command-line flags win over the config file
fn resolve_settings(args: &Args, app_config: AppConfig) -> Settings {
    let mut decoder = app_config.decoder;
    if args.strict_length {
        decoder = decoder.with_strict_length(true);
    }

    Settings {
        decoder,
        format: args.format.unwrap_or(app_config.output.format),
        preview_bytes: args.preview_bytes.unwrap_or(app_config.output.preview_bytes),
    }
}

/// Decode every file and write the reports to `out`
///
/// Returns the number of files that failed to load or decode. Failures are
/// reported on stderr and do not stop the remaining files from being reported.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<usize> {
    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    let settings = resolve_settings(args, app_config);
    let decoder = Decoder::with_config(settings.decoder);

    // Files are independent; decode in parallel, report in argument order
    let results: Vec<(&PathBuf, Result<(LoadedFile, Container)>)> = args
        .files
        .par_iter()
        .map(|path| (path, inspect(&decoder, path)))
        .collect();

    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok((file, container)) => {
                if !args.quiet {
                    report::render(out, settings.format, &file, &container, settings.preview_bytes)?;
                }
            }
            Err(e) => {
                failures += 1;
                out.flush()?;
                eprintln!("Error decoding {:?}: {:#}", path, e);
            }
        }
    }

    Ok(failures)
}

/// Load and decode a single file
fn inspect(decoder: &Decoder, path: &Path) -> Result<(LoadedFile, Container)> {
    let file = load::load_file(path)?;

    let container = decoder
        .decode_bytes(&file.bytes)
        .with_context(|| format!("Failed to decode ICNS file: {:?}", path))?;

    log::info!("{:?}: {} entries", path, container.len());
    Ok((file, container))
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
