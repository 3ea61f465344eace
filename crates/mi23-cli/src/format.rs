//! Text rendering of readings for the terminal.

use std::io::{self, Write};

use mi23_core::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `ts digits unit (options)`
    Human,
    /// `ts,digits,unit,"options"`
    Csv,
    /// Display digits only.
    Value,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Value wins over the other flags, then JSON, then CSV.
    pub fn from_flags(csv: bool, value: bool, json: bool) -> Self {
        if value {
            OutputFormat::Value
        } else if json {
            OutputFormat::Json
        } else if csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Human
        }
    }
}

pub fn render(reading: &Reading, format: OutputFormat) -> io::Result<String> {
    Ok(match format {
        OutputFormat::Value => reading.digits.clone(),
        OutputFormat::Csv => format!(
            "{:.2},{},{},\"{}\"",
            reading.unix_seconds(),
            reading.digits,
            reading.unit_label(),
            join_options(reading, ",")
        ),
        OutputFormat::Human => {
            let options = if reading.options.is_empty() {
                String::new()
            } else {
                format!("({})", join_options(reading, ", "))
            };
            format!(
                "{:.2} {} {} {}",
                reading.unix_seconds(),
                reading.digits,
                reading.unit_label(),
                options
            )
        }
        OutputFormat::Json => serde_json::to_string(reading).map_err(io::Error::other)?,
    })
}

fn join_options(reading: &Reading, sep: &str) -> String {
    reading
        .options
        .iter()
        .map(|mode| mode.name())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Redraw in place unless CSV or JSON was requested or new lines were asked
/// for. Uses the raw flags: `--value --csv` prints values one per line.
pub fn redraw_from_flags(csv: bool, json: bool, new_lines: bool) -> bool {
    !csv && !json && !new_lines
}

/// Writes readings either one per line or redrawn in place on one line.
pub struct ReadingPrinter<W> {
    out: W,
    format: OutputFormat,
    redraw: bool,
    last_len: usize,
}

impl<W: Write> ReadingPrinter<W> {
    pub fn new(out: W, format: OutputFormat, redraw: bool) -> Self {
        Self {
            out,
            format,
            redraw,
            last_len: 0,
        }
    }

    pub fn print(&mut self, reading: &Reading) -> io::Result<()> {
        let line = render(reading, self.format)?;
        if self.redraw {
            write!(self.out, "\r{}\r{}", " ".repeat(self.last_len), line)?;
        } else {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        self.last_len = line.chars().count();
        Ok(())
    }

    /// Terminate a redrawn line so later output starts on a fresh one.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.redraw && self.last_len > 0 {
            writeln!(self.out)?;
            self.out.flush()?;
        }
        Ok(())
    }
}
