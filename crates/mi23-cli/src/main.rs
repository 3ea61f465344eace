use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use glob::glob;
use mi23_core::{ByteSource, DEFAULT_BAUD_RATE, ReaderSource, ReadingStream};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod format;
mod serial;

use format::{OutputFormat, ReadingPrinter, redraw_from_flags};
use serial::{InputMode, open_input};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MI23_BUILD_COMMIT"),
    " ",
    env!("MI23_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "mi23")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Read measurement data from MI-23 style multimeters via their serial interface.",
    long_about = None,
    after_help = "Examples:\n  mi23 -f /dev/ttyUSB0\n  mi23 -f '/dev/ttyUSB*' --csv > log.csv\n  mi23 --raw -f capture.bin --json"
)]
struct Cli {
    /// Serial device to use for input (a glob matching one path is accepted)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "DEVICE",
        default_value = "/dev/ttyS0",
        env = "MI23_DEVICE"
    )]
    file: PathBuf,

    /// Output measurements in CSV format
    #[arg(short, long)]
    csv: bool,

    /// Output value only
    #[arg(short, long)]
    value: bool,

    /// Output one JSON object per measurement
    #[arg(long)]
    json: bool,

    /// Write each measurement on a new line instead of replacing the previous one
    #[arg(short, long)]
    new_lines: bool,

    /// Serial line speed
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Read DEVICE as a plain byte stream without configuring a serial line
    #[arg(long)]
    raw: bool,

    /// Stop after this many measurements
    #[arg(long, value_name = "N")]
    count: Option<u64>,

    /// Log filter used when RUST_LOG is not set (logs go to stderr)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cmd_read(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_read(cli: Cli) -> Result<(), CliError> {
    let input = resolve_input_path(&cli.file)?;
    validate_input(&input)?;

    let mode = if cli.raw {
        InputMode::Raw
    } else {
        InputMode::Serial { baud: cli.baud }
    };
    let reader = open_input(&input, mode).map_err(|err| {
        CliError::new(
            format!("failed to open {}: {err:#}", input.display()),
            Some(match mode {
                InputMode::Serial { .. } => {
                    "check the device path and permissions; use --raw for captured byte files"
                        .to_string()
                }
                InputMode::Raw => "check the file path and permissions".to_string(),
            }),
        )
    })?;

    let format = OutputFormat::from_flags(cli.csv, cli.value, cli.json);
    let redraw = redraw_from_flags(cli.csv, cli.json, cli.new_lines);
    let mut printer = ReadingPrinter::new(io::stdout().lock(), format, redraw);
    let mut stream = ReadingStream::new(ReaderSource::new(reader));

    let printed = print_readings(&mut stream, &mut printer, cli.count)?;

    let stats = stream.stats();
    info!(
        readings = printed,
        bytes = stats.bytes_seen,
        discarded = stats.bytes_discarded,
        "input finished"
    );
    Ok(())
}

/// Print readings until the stream ends or `count` is reached. The printer
/// is finished on every path so a redrawn line is terminated even when the
/// device fails mid-run.
fn print_readings<S: ByteSource, W: Write>(
    stream: &mut ReadingStream<S>,
    printer: &mut ReadingPrinter<W>,
    count: Option<u64>,
) -> anyhow::Result<u64> {
    let mut printed = 0u64;
    let copied = (|| -> anyhow::Result<()> {
        while count.is_none_or(|limit| printed < limit) {
            let Some(reading) = stream
                .next_reading()
                .context("reading from the meter failed")?
            else {
                break;
            };
            printer.print(&reading).context("failed to write output")?;
            printed += 1;
        }
        Ok(())
    })();
    let finished = printer.finish().context("failed to write output");
    copied?;
    finished?;
    Ok(printed)
}

fn validate_input(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input not found: {}", input.display()),
            Some("pass the serial device with -f/--file, e.g. /dev/ttyUSB0".to_string()),
        ));
    }
    if input.is_dir() {
        return Err(CliError::new(
            format!("input is a directory: {}", input.display()),
            Some("pass a serial device or a captured byte file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid device pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid device pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if !path.is_dir() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no devices match pattern '{}'", pattern),
            Some("check that the meter is plugged in, or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple devices match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single device".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
