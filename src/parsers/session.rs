use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{Exchange, LogRecord};
use crate::parsers::exchanges::{count_exchanges, reduce_exchanges};
use crate::utils::safe_open_file;

/// Streaming iterator over the decodable records of a session log
///
/// Blank lines, non-UTF-8 lines and lines that do not decode as a record are skipped.
/// A hard read error ends the stream and is kept; call [`finish`] after draining to
/// surface it.
///
/// [`finish`]: SessionRecords::finish
pub struct SessionRecords<R = BufReader<File>> {
    path: PathBuf,
    lines: Lines<R>,
    line_num: usize,
    skipped: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> SessionRecords<R> {
    pub fn new(path: &Path, reader: R) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: reader.lines(),
            line_num: 0,
            skipped: 0,
            error: None,
        }
    }

    /// Lines skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Fails if the stream was cut short by a read error
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e).with_context(|| {
                format!("Failed to read {} at line {}", self.path.display(), self.line_num)
            }),
            None => Ok(()),
        }
    }
}

impl<R: BufRead> Iterator for SessionRecords<R> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        if self.error.is_some() {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    debug!(path = %self.path.display(), line = self.line_num, "skipping non-UTF-8 line");
                    self.skipped += 1;
                    continue;
                }
                Err(e) => {
                    debug!(path = %self.path.display(), line = self.line_num, error = %e, "read failed, stopping");
                    self.error = Some(e);
                    return None;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<LogRecord>(line) {
                Ok(record) => return Some(record),
                Err(e) => {
                    debug!(path = %self.path.display(), line = self.line_num, error = %e, "skipping malformed record");
                    self.skipped += 1;
                }
            }
        }
    }
}

/// Open a session log for streaming
pub fn read_records(path: &Path) -> Result<SessionRecords> {
    let file = safe_open_file(path)?;
    Ok(SessionRecords::new(path, BufReader::new(file)))
}

/// Reduce a record stream to exchanges, failing rather than returning a truncated list
fn exchanges_from<R: BufRead>(mut records: SessionRecords<R>) -> Result<Vec<Exchange>> {
    let exchanges = reduce_exchanges(records.by_ref());
    records.finish()?;
    Ok(exchanges)
}

fn count_from<R: BufRead>(mut records: SessionRecords<R>) -> Result<usize> {
    let count = count_exchanges(records.by_ref());
    records.finish()?;
    Ok(count)
}

/// Exchanges of the log at `path`; a missing log has none
///
/// # Errors
///
/// Returns an error if the log cannot be opened or a read fails partway through.
pub fn parse_exchanges(path: &Path) -> Result<Vec<Exchange>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    exchanges_from(read_records(path)?)
}

/// Exchange boundary count of the log at `path`; a missing log counts 0
pub fn count_exchanges_in(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }
    count_from(read_records(path)?)
}

/// First decodable record of the log, if any
pub fn first_record(path: &Path) -> Option<LogRecord> {
    read_records(path).ok()?.next()
}
