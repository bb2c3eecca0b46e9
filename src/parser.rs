use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::ParseError;
use crate::reader::{ChunkedLineReader, DEFAULT_CHUNK_SIZE};
use crate::stats::AggregationState;
use crate::summary::Summary;

/// Parses one access log end to end.
///
/// Each line must be `<page> <ip-address>`, fields separated by any run of
/// whitespace. The first malformed line aborts the run and no summary is
/// produced.
#[derive(Debug)]
pub struct LogFileParser {
    file_path: PathBuf,
    chunk_size: usize,
}

impl LogFileParser {
    /// Resolves `log_file` to an existing regular file. Nothing is read yet.
    pub fn new(log_file: Option<&Path>) -> Result<Self, ParseError> {
        let log_file = match log_file {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                return Err(ParseError::Argument(
                    "provide a log file path as an argument".to_string(),
                ))
            }
        };

        let file_path = fs::canonicalize(log_file).map_err(|e| {
            ParseError::Argument(format!("path {:?} is invalid: {}", log_file, e))
        })?;

        if !file_path.is_file() {
            return Err(ParseError::Argument(format!(
                "path {:?} is not a regular file",
                file_path
            )));
        }

        Ok(Self {
            file_path,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Absolute, canonical path of the log file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn run(self) -> Result<Summary, ParseError> {
        let start_time = Instant::now();
        info!(action = "start", component = "log_parser", file_path = ?self.file_path, "Parsing log file");

        let reader = ChunkedLineReader::open_with_chunk_size(&self.file_path, self.chunk_size)?;
        let mut state = AggregationState::new();
        let mut line_number = 0;

        reader.for_each_line(|line: String| -> Result<(), ParseError> {
            line_number += 1;
            let (page, ip_address) = parse_line(&line, line_number)?;
            state.record(page, ip_address);
            Ok(())
        })?;

        info!(
            action = "complete",
            component = "log_parser",
            processed_rows = state.processed_rows(),
            unique_pages = state.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Log file parsed"
        );

        Ok(Summary::new(state))
    }
}

/// Splits one line into `(page, ip_address)`.
pub fn parse_line(line: &str, line_number: usize) -> Result<(&str, &str), ParseError> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(page), Some(ip_address), None) => Ok((page, ip_address)),
        _ => Err(ParseError::Format { line: line_number }),
    }
}
