//! Typed benchmark records and the fixed key classification table.

use std::{fmt, str::FromStr};

//=================
// Field classification

/// Kind of value a recognized key carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Str,
}

/// Recognized record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Rows,
    Cols,
    Time,
    Mode,
    Op,
}

/// Key classification table: token name, field, and value kind.
pub const FIELD_TABLE: [(&str, Field, ValueKind); 5] = [
    ("rows", Field::Rows, ValueKind::Int),
    ("cols", Field::Cols, ValueKind::Int),
    ("time", Field::Time, ValueKind::Float),
    ("mode", Field::Mode, ValueKind::Str),
    ("op", Field::Op, ValueKind::Str),
];

impl Field {
    /// Looks up a token name in [`FIELD_TABLE`]. Returns `None` for unrecognized names.
    pub fn classify(name: &str) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .find(|(key, _, _)| *key == name)
            .map(|(_, field, _)| *field)
    }

    pub fn key(self) -> &'static str {
        FIELD_TABLE
            .iter()
            .find(|(_, field, _)| *field == self)
            .map(|(key, _, _)| *key)
            .unwrap_or_default()
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Field::Rows | Field::Cols => ValueKind::Int,
            Field::Time => ValueKind::Float,
            Field::Mode | Field::Op => ValueKind::Str,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//=================
// Mode

/// Computation backend used for a benchmark entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    Cpu,
    Gpu,
    Hybrid,
}

impl Mode {
    /// All modes, in legend order.
    pub const ALL: [Mode; 3] = [Mode::Cpu, Mode::Gpu, Mode::Hybrid];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Cpu => "cpu",
            Mode::Gpu => "gpu",
            Mode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of `cpu`, `gpu`, `hybrid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeName(pub String);

impl FromStr for Mode {
    type Err = UnknownModeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModeName(s.to_owned()))
    }
}

//=================
// Record

/// One parsed log line. Fields whose token was absent from the line are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub rows: Option<i64>,
    pub cols: Option<i64>,
    pub time: Option<f64>,
    pub mode: Option<String>,
    pub op: Option<String>,
}

impl Record {
    /// `true` if the line carried no recognized token at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_none()
            && self.cols.is_none()
            && self.time.is_none()
            && self.mode.is_none()
            && self.op.is_none()
    }

    /// `true` if both dimensions are present and equal.
    pub fn is_square(&self) -> bool {
        matches!((self.rows, self.cols), (Some(r), Some(c)) if r == c)
    }

    /// `true` if both dimensions are present, `rows == 1`, and the record is not square.
    /// A `1x1` record is square.
    pub fn is_vector(&self) -> bool {
        !self.is_square() && self.cols.is_some() && self.rows == Some(1)
    }
}
