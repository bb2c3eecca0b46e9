use std::io;
use thiserror::Error;

/// Everything that can stop a parse run.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Missing path, or a path that does not resolve to a regular file.
    #[error("{0}")]
    Argument(String),

    /// A line that does not split into exactly `<page> <ip>`.
    #[error("log file format is not parseable: unexpected structure on line {line}")]
    Format { line: usize },

    #[error("failed to read log file: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Argument(_) => "ArgumentError",
            Self::Format { .. } => "LogFileFormatError",
            Self::Io(_) => "IOError",
        }
    }

    /// 1-based line number of the offending line, for format errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line } => Some(*line),
            _ => None,
        }
    }
}
