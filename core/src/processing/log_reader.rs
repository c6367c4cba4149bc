use crate::prelude::{LineError, TrackResult};
use crate::records::Detection;
use crate::telemetry::log::LogManager;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Detections recovered from a log, plus how many lines were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogReadout {
    pub detections: Vec<Detection>,
    pub skipped_lines: usize,
}

/// Reads every line of `reader`; lines that are not detection records are
/// skipped with a warning.
pub fn read_detections<R: BufRead>(mut reader: R) -> TrackResult<LogReadout> {
    let logger = LogManager::new("log-reader");
    let mut readout = LogReadout::default();

    let mut raw = Vec::new();
    let mut line_number = 0;

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line_number += 1;

        let line = match std::str::from_utf8(&raw) {
            Ok(line) => line,
            Err(err) => {
                readout.skipped_lines += 1;
                logger.warn(&format!("Skipping undecodable line {}: {}", line_number, err));
                continue;
            }
        };
        match Detection::parse_line(line) {
            Ok(detection) => readout.detections.push(detection),
            Err(LineError::Malformed) => {
                readout.skipped_lines += 1;
                logger.warn(&format!(
                    "Skipping malformed line {}: {}",
                    line_number,
                    line.trim()
                ));
            }
            Err(err) => {
                readout.skipped_lines += 1;
                logger.warn(&format!(
                    "Skipping invalid line {}: {} - {}",
                    line_number,
                    line.trim(),
                    err
                ));
            }
        }
    }

    logger.debug(&format!(
        "parsed {} detections, skipped {} lines",
        readout.detections.len(),
        readout.skipped_lines
    ));
    Ok(readout)
}

pub fn read_detections_from_path<P: AsRef<Path>>(path: P) -> TrackResult<LogReadout> {
    let file = File::open(path)?;
    read_detections(BufReader::new(file))
}
