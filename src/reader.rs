use memchr::memmem;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Bytes pulled from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Streams separator-terminated lines out of a byte source, one fixed-size
/// chunk at a time.
///
/// Only as much data is buffered as is needed to find the next separator. A
/// trailing fragment with no separator after it is dropped, never yielded.
/// The source is closed once: at end of stream, on the first read failure, or
/// when the reader is dropped.
pub struct ChunkedLineReader<R> {
    source: Option<R>,
    separator: Vec<u8>,
    chunk_size: usize,
    buffer: Vec<u8>,
    // Prefix of `buffer` already known not to contain a separator.
    scanned: usize,
}

impl ChunkedLineReader<File> {
    /// Opens `path` with the platform line separator and default chunk size.
    pub fn open(path: &Path) -> io::Result<Self> {
        Self::open_with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    pub fn open_with_chunk_size(path: &Path, chunk_size: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        debug!(action = "open", component = "line_reader", path = ?path, chunk_size, "Opened log file");
        Ok(Self::new(file, LINE_SEPARATOR, chunk_size))
    }
}

impl<R: Read> ChunkedLineReader<R> {
    /// Wraps `source`. A `chunk_size` of zero is treated as one byte.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn new(source: R, separator: impl Into<Vec<u8>>, chunk_size: usize) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "line separator must not be empty");

        Self {
            source: Some(source),
            separator,
            chunk_size: chunk_size.max(1),
            buffer: Vec::new(),
            scanned: 0,
        }
    }

    /// Feeds every line to `visit`, in file order.
    ///
    /// Stops at the first error, whether it comes from reading the source or
    /// from `visit` itself. The source is released on every exit path.
    pub fn for_each_line<F, E>(self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(String) -> Result<(), E>,
        E: From<io::Error>,
    {
        for line in self {
            visit(line?)?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    fn take_line(&mut self) -> Option<io::Result<String>> {
        let from = self.scanned;
        let Some(offset) = memmem::find(&self.buffer[from..], &self.separator) else {
            // A separator may still straddle the end of what we have so far.
            self.scanned = self
                .buffer
                .len()
                .saturating_sub(self.separator.len() - 1);
            return None;
        };

        let end = from + offset;
        let mut line: Vec<u8> = self.buffer.drain(..end + self.separator.len()).collect();
        line.truncate(end);
        self.scanned = 0;

        Some(String::from_utf8(line).map_err(|e| io::Error::new(ErrorKind::InvalidData, e)))
    }

    fn read_chunk(&mut self) -> io::Result<usize> {
        let Some(source) = self.source.as_mut() else {
            return Ok(0);
        };

        let start = self.buffer.len();
        self.buffer.resize(start + self.chunk_size, 0);

        loop {
            match source.read(&mut self.buffer[start..]) {
                Ok(n) => {
                    self.buffer.truncate(start + n);
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.truncate(start);
                    return Err(e);
                }
            }
        }
    }

    fn close(&mut self) {
        if self.source.take().is_some() {
            debug!(
                action = "close",
                component = "line_reader",
                dropped_bytes = self.buffer.len(),
                "Closed log source"
            );
            self.buffer.clear();
            self.scanned = 0;
        }
    }
}

impl<R: Read> Iterator for ChunkedLineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.take_line() {
                return Some(line);
            }

            if self.source.is_none() {
                return None;
            }

            match self.read_chunk() {
                Ok(0) => {
                    self.close();
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.close();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R> Drop for ChunkedLineReader<R> {
    fn drop(&mut self) {
        if self.source.take().is_some() {
            debug!(action = "close", component = "line_reader", "Released log source early");
        }
    }
}
