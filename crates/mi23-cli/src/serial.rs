//! Opening the meter's serial line.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};
use tracing::info;

/// Idle time after which a blocked read wakes up and is retried.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// How the input path should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Configure a serial line: raw 8N1, no flow control, given baud rate.
    Serial { baud: u32 },
    /// Read the path as a plain byte stream (captured log, FIFO).
    Raw,
}

pub fn open_input(path: &Path, mode: InputMode) -> anyhow::Result<Box<dyn Read + Send>> {
    match mode {
        InputMode::Serial { baud } => {
            let port = serialport::new(path.to_string_lossy(), baud)
                .data_bits(DataBits::Eight)
                .parity(Parity::None)
                .stop_bits(StopBits::One)
                .flow_control(FlowControl::None)
                .timeout(READ_TIMEOUT)
                .open()?;
            info!(device = %path.display(), baud, "serial line configured");
            Ok(Box::new(port))
        }
        InputMode::Raw => {
            let file = File::open(path)?;
            info!(input = %path.display(), "reading raw byte stream");
            Ok(Box::new(file))
        }
    }
}
