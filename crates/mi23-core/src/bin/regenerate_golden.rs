use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mi23_core::{ReaderSource, Reading, ReadingStream};
use time::OffsetDateTime;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.bin");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_readings.json");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let file =
        File::open(input).map_err(|err| format!("failed to open {}: {}", input.display(), err))?;
    let mut readings: Vec<Reading> = ReadingStream::new(ReaderSource::new(file))
        .collect::<Result<_, _>>()
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    // Wall-clock arrival times are not reproducible.
    for reading in &mut readings {
        reading.timestamp = OffsetDateTime::UNIX_EPOCH;
    }
    let json = serde_json::to_string(&readings)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
