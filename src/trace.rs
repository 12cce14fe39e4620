//! Loading branch traces from text files.
//!
//! A trace is a sequence of lines of the form `<hex-address> <t|n>`,
//! processed strictly in file order. Any malformed line aborts the whole
//! run; there is no per-line recovery.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::branch::{Outcome, TraceRecord};

/// Errors produced while opening or parsing a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected '<hex-address> <t|n>', got {text:?}")]
    Malformed { line: usize, text: String },

    #[error("line {line}: invalid 32-bit hex address {token:?}")]
    BadAddress { line: usize, token: String },

    #[error("line {line}: invalid outcome {token:?} (expected 't' or 'n')")]
    BadOutcome { line: usize, token: String },
}

/// A branch trace parsed from text.
pub struct TextTrace {
    records: Vec<TraceRecord>,
    name: String,
}

impl TextTrace {
    /// Create a [TextTrace] from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path).map_err(|source| TraceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &name, &path.display().to_string())
    }

    /// Create a [TextTrace] from any buffered reader.
    pub fn from_reader(
        reader: impl BufRead,
        name: &str,
        path: &str,
    ) -> Result<Self, TraceError> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let lineno = idx + 1;
            let line = line.map_err(|source| TraceError::Io {
                path: path.to_string(),
                source,
            })?;
            records.push(Self::parse_line(&line, lineno)?);
        }
        tracing::debug!(records = records.len(), name, "loaded trace");
        Ok(Self {
            records,
            name: name.to_string(),
        })
    }

    /// Parse a single `<hex-address> <t|n>` line.
    fn parse_line(line: &str, lineno: usize) -> Result<TraceRecord, TraceError> {
        let mut tokens = line.split_whitespace();
        let (addr, outcome) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(a), Some(o), None) => (a, o),
            _ => {
                return Err(TraceError::Malformed {
                    line: lineno,
                    text: line.to_string(),
                })
            }
        };

        let hex = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .unwrap_or(addr);
        let pc = u32::from_str_radix(hex, 16).map_err(|_| TraceError::BadAddress {
            line: lineno,
            token: addr.to_string(),
        })?;

        let outcome = match outcome.chars().next() {
            Some(c) if outcome.len() == 1 => Outcome::from_trace_char(c),
            _ => None,
        }
        .ok_or_else(|| TraceError::BadOutcome {
            line: lineno,
            token: outcome.to_string(),
        })?;

        Ok(TraceRecord { pc, outcome })
    }

    /// Return the records, in file order.
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Return the number of records.
    pub fn num_entries(&self) -> usize {
        self.records.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<TextTrace, TraceError> {
        TextTrace::from_reader(Cursor::new(text), "test", "test")
    }

    #[test]
    fn parses_records_in_order() {
        let trace = parse("3fb4c t\n0x3fb4c n\n1c t\n").unwrap();
        assert_eq!(trace.num_entries(), 3);
        assert_eq!(
            trace.records()[0],
            TraceRecord { pc: 0x3fb4c, outcome: Outcome::T }
        );
        assert_eq!(
            trace.records()[1],
            TraceRecord { pc: 0x3fb4c, outcome: Outcome::N }
        );
        assert_eq!(trace.records()[2].pc, 0x1c);
    }

    #[test]
    fn empty_trace_is_valid() {
        let trace = parse("").unwrap();
        assert_eq!(trace.num_entries(), 0);
    }

    #[test]
    fn rejects_wrong_token_count() {
        assert!(matches!(
            parse("3fb4c\n"),
            Err(TraceError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            parse("3fb4c t t\n"),
            Err(TraceError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_bad_address() {
        assert!(matches!(
            parse("xyz t\n"),
            Err(TraceError::BadAddress { line: 1, .. })
        ));
        // Overflows 32 bits
        assert!(matches!(
            parse("1ffffffff t\n"),
            Err(TraceError::BadAddress { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_bad_outcome() {
        assert!(matches!(
            parse("4 t\n4 x\n"),
            Err(TraceError::BadOutcome { line: 2, .. })
        ));
        assert!(matches!(
            parse("4 taken\n"),
            Err(TraceError::BadOutcome { line: 1, .. })
        ));
    }
}
