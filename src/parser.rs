//! Extraction of `[key]=value` tokens from benchmark output lines.

use crate::{Field, Record, RecordStore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    io::{self, BufRead},
    str::FromStr,
};
use thiserror::Error;

/// Pattern for a single token: bracketed non-whitespace name, `=`, non-whitespace value.
pub const TOKEN_PATTERN: &str = r"\[(\S+)\]=(\S+)";

// Compiled once; `TOKEN_PATTERN` is a constant, valid pattern.
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(TOKEN_PATTERN).expect("TOKEN_PATTERN is a valid regex"));

static DEFAULT_PARSER: Lazy<LineParser> = Lazy::new(LineParser::new);

//==============
// Errors

/// A token for a numeric key that could not be coerced to the key's [`ValueKind`](crate::ValueKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind:?} value `{token}` for key `{key}`", kind = .key.kind())]
pub struct FormatError {
    pub key: Field,
    pub token: String,
}

/// Error returned when reading a benchmark log into a [`RecordStore`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line_no}: {source}")]
    Format {
        line_no: usize,
        #[source]
        source: FormatError,
    },
    #[error("failed to read input at line {line_no}")]
    Io {
        line_no: usize,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// 1-based number of the input line that caused the error.
    pub fn line_no(&self) -> usize {
        match self {
            ParseError::Format { line_no, .. } | ParseError::Io { line_no, .. } => *line_no,
        }
    }
}

//==============
// LineParser

/// Converts text lines into [`Record`]s.
#[derive(Debug, Clone)]
pub struct LineParser {
    pattern: Regex,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Shares the compiled [`TOKEN_PATTERN`] regex.
    pub fn new() -> Self {
        Self {
            pattern: TOKEN_REGEX.clone(),
        }
    }

    /// Returns the `(name, value)` pairs of all tokens in `line`, in order of appearance.
    pub fn tokens<'a>(&'a self, line: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.pattern.captures_iter(line).filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str();
            Some((name, value))
        })
    }

    /// Parses one line. Unrecognized names are ignored and a repeated key keeps its last value.
    /// A line without tokens yields an empty [`Record`].
    ///
    /// # Errors
    /// [`FormatError`] if the value of an integer or float key does not parse as such.
    pub fn parse_line(&self, line: &str) -> Result<Record, FormatError> {
        let mut record = Record::default();
        for (name, token) in self.tokens(line) {
            let Some(field) = Field::classify(name) else {
                log::trace!("ignoring unrecognized key `{name}`");
                continue;
            };
            match field {
                Field::Rows => record.rows = Some(coerce(field, token)?),
                Field::Cols => record.cols = Some(coerce(field, token)?),
                Field::Time => record.time = Some(coerce(field, token)?),
                Field::Mode => record.mode = Some(token.to_owned()),
                Field::Op => record.op = Some(token.to_owned()),
            }
        }
        Ok(record)
    }

    /// Reads `reader` to the end, producing one [`Record`] per line in input order.
    ///
    /// # Errors
    /// - [`ParseError::Format`] for the first line with a value that fails numeric coercion.
    /// - [`ParseError::Io`] if reading fails, including on invalid UTF-8.
    pub fn read_records(&self, reader: impl BufRead) -> Result<RecordStore, ParseError> {
        log::trace!("entering `read_records`");
        let mut store = RecordStore::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| ParseError::Io { line_no, source })?;
            let record = self
                .parse_line(&line)
                .map_err(|source| ParseError::Format { line_no, source })?;
            log::trace!("line {line_no}: {record:?}");
            store.push(record);
        }
        log::debug!(
            "read {} records ({} empty)",
            store.len(),
            store.iter().filter(|r| r.is_empty()).count()
        );
        Ok(store)
    }
}

/// Coerces `token` to the numeric type of `field`.
fn coerce<T: FromStr>(field: Field, token: &str) -> Result<T, FormatError> {
    token.parse().map_err(|_| FormatError {
        key: field,
        token: token.to_owned(),
    })
}

/// Parses one line with the default [`LineParser`].
pub fn parse_line(line: &str) -> Result<Record, FormatError> {
    DEFAULT_PARSER.parse_line(line)
}

/// Reads all lines of `reader` into a [`RecordStore`] with the default [`LineParser`].
pub fn read_records(reader: impl BufRead) -> Result<RecordStore, ParseError> {
    DEFAULT_PARSER.read_records(reader)
}
