//! ansi-segments - strip or inspect ANSI-colored log output
//!
//! Reads files (or stdin) line by line and writes the de-escaped text, the
//! per-line styled segments as JSON, or ingestion statistics.

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};

use ansi_segments::config::{Config, ConfigLoader, LoadOptions, OutputFormat};
use ansi_segments::error::{Error, Result};
use ansi_segments::{parse_ansi, IngestStats};

/// Command line configuration
#[derive(Debug, Default, PartialEq)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Output format override
    format: Option<OutputFormat>,
    /// Enable debug logging
    debug: bool,
    /// Input files; empty means stdin
    inputs: Vec<PathBuf>,
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Invocation {
    Run(AppArgs),
    Help,
    Version,
}

impl AppArgs {
    /// Parse command line arguments (without the program name)
    fn parse<I>(args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut app_args = AppArgs::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or_else(|| Error::InvalidArgument {
                        argument: arg.clone(),
                        reason: "missing config file path".to_string(),
                    })?;
                    app_args.config_path = Some(PathBuf::from(path));
                }
                "--format" | "-f" => {
                    let format = args.next().ok_or_else(|| Error::InvalidArgument {
                        argument: arg.clone(),
                        reason: "missing output format".to_string(),
                    })?;
                    app_args.format = Some(format.parse()?);
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-?" => return Ok(Invocation::Help),
                "--version" | "-v" => return Ok(Invocation::Version),
                "-" => app_args.inputs.push(PathBuf::from("-")),
                other if other.starts_with('-') => {
                    return Err(Error::InvalidArgument {
                        argument: other.to_string(),
                        reason: "unknown option".to_string(),
                    });
                }
                _ => app_args.inputs.push(PathBuf::from(arg)),
            }
        }

        Ok(Invocation::Run(app_args))
    }
}

/// Print help information
fn print_help() {
    println!("{} - {}", ansi_segments::NAME, ansi_segments::DESCRIPTION);
    println!();
    println!("USAGE:");
    println!("    ansi-segments [OPTIONS] [FILE]...");
    println!();
    println!("    Reads stdin when no FILE is given or FILE is '-'.");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -f, --format <FORMAT>  Output format: plain, json, stats");
    println!("    -d, --debug            Enable debug logging");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    Configuration files are looked up in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $ANSI_SEGMENTS_CONFIG");
    println!("    3. <config dir>/ansi-segments/config.{{toml,json}}");
    println!("    4. ~/.ansi-segments/config.{{toml,json}}");
    println!("    5. ./ansi-segments.{{toml,json}}");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn main() -> anyhow::Result<()> {
    let args = match AppArgs::parse(env::args().skip(1)) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Invocation::Version) => {
            println!("{} v{}", ansi_segments::NAME, ansi_segments::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            print_help();
            process::exit(2);
        }
    };

    let config = load_configuration(&args).context("Failed to load configuration")?;
    init_logging(&args, &config);

    info!("Starting {} v{}", ansi_segments::NAME, ansi_segments::VERSION);

    let format = args.format.unwrap_or(config.output.format);
    debug!("Output format: {}", format);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut stats = IngestStats::new();

    let inputs = if args.inputs.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.inputs.clone()
    };

    for input in &inputs {
        let mut input_stats = IngestStats::new();
        let result = open_input(input)
            .with_context(|| format!("Failed to open {}", input.display()))
            .and_then(|reader| {
                process_stream(reader, &mut out, &config, format, &mut input_stats)
                    .with_context(|| format!("Failed to process {}", input.display()))
            });

        if let Err(e) = result {
            if is_broken_pipe(&e) {
                return Ok(());
            }
            return Err(e);
        }

        debug!(
            input = %input.display(),
            lines = input_stats.lines,
            noise = input_stats.noise_lines,
            "Processed input"
        );
        stats.merge(&input_stats);
    }

    if format == OutputFormat::Stats {
        write_stats(&mut out, &stats, config.output.pretty)?;
    }

    match out.flush() {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        other => other?,
    }

    debug!(
        lines = stats.lines,
        noise_ratio = stats.noise_ratio(),
        "Finished processing input"
    );
    Ok(())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins, then `--debug`, then `logging.level` from the config.
fn init_logging(args: &AppArgs, config: &Config) {
    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config.logging.level.to_ascii_lowercase()
    };

    let env_filter = env::var("RUST_LOG").unwrap_or(log_level);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Load configuration from `--config` or the default locations
fn load_configuration(args: &AppArgs) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    match &args.config_path {
        Some(path) => loader.load_from_path(path, true),
        None => loader.load_with_options(LoadOptions::default()),
    }
}

fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Parse every line of `reader`, writing per-line output for `format`
fn process_stream<R, W>(
    mut reader: R,
    out: &mut W,
    config: &Config,
    format: OutputFormat,
    stats: &mut IngestStats,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        // Log streams are not guaranteed to be valid UTF-8.
        let raw = String::from_utf8_lossy(&buf);
        let line = config.input.prepare_line(&raw);
        let parsed = parse_ansi(line);
        stats.record(&parsed, line.len());

        match format {
            OutputFormat::Plain => writeln!(out, "{}", parsed.plain)?,
            OutputFormat::Json => {
                if config.output.pretty {
                    serde_json::to_writer_pretty(&mut *out, &parsed)?;
                } else {
                    serde_json::to_writer(&mut *out, &parsed)?;
                }
                writeln!(out)?;
            }
            OutputFormat::Stats => {}
        }
    }

    Ok(())
}

/// Summary written in `stats` mode
#[derive(Debug, Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: IngestStats,
    noise_ratio: f64,
    stripped_bytes: usize,
}

fn write_stats<W: Write>(out: &mut W, stats: &IngestStats, pretty: bool) -> Result<()> {
    let report = StatsReport {
        stats: *stats,
        noise_ratio: stats.noise_ratio(),
        stripped_bytes: stats.stripped_bytes(),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    } else {
        serde_json::to_writer(&mut *out, &report)?;
    }
    writeln!(out)?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
            || matches!(
                cause.downcast_ref::<Error>(),
                Some(Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe
            )
    })
}
