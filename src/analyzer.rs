//! Grouping of records for one operation by shape class and computation mode.

use crate::{Field, Mode, Record, RecordStore};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::Deref,
    str::FromStr,
};
use thiserror::Error;

//=================
// ShapeClass

/// Shape of the matrices used by a benchmark entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeClass {
    /// `rows == cols`
    Square,
    /// `rows == 1` and not square
    Vector,
}

impl ShapeClass {
    /// Both classes, in presentation order.
    pub const ALL: [ShapeClass; 2] = [ShapeClass::Square, ShapeClass::Vector];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeClass::Square => "square",
            ShapeClass::Vector => "vector",
        }
    }

    /// Classifies `record`. The square check precedes the vector check, so `1x1` is square.
    /// Records missing `rows` or `cols` have no shape class.
    pub fn of(record: &Record) -> Option<Self> {
        if record.is_square() {
            Some(ShapeClass::Square)
        } else if record.is_vector() {
            Some(ShapeClass::Vector)
        } else {
            None
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=================
// Series

/// Ordered `(size, time)` coordinates for one mode, in the order they were appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub sizes: Vec<i64>,
    pub times: Vec<f64>,
}

impl Series {
    fn push(&mut self, size: i64, time: f64) {
        self.sizes.push(size);
        self.times.push(time);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.sizes.iter().copied().zip(self.times.iter().copied())
    }
}

/// Mapping of every [`Mode`] to its [`Series`]. All three modes are always present, possibly with
/// empty series; derefs to the underlying [`BTreeMap`] for read-only access.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSeries(BTreeMap<Mode, Series>);

impl Default for GroupedSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupedSeries {
    pub fn new() -> Self {
        Self(Mode::ALL.into_iter().map(|m| (m, Series::default())).collect())
    }

    pub fn series(&self, mode: Mode) -> &Series {
        &self.0[&mode]
    }

    fn push(&mut self, mode: Mode, size: i64, time: f64) {
        self.0.entry(mode).or_default().push(size, time);
    }

    /// Total number of points across all modes.
    pub fn point_count(&self) -> usize {
        self.0.values().map(Series::len).sum()
    }
}

impl Deref for GroupedSeries {
    type Target = BTreeMap<Mode, Series>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//=================
// Malformed records

/// How [`analyze_op`] treats records that lack a field required to place them in a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the analysis with an [`AnalyzeError`].
    #[default]
    FailFast,
    /// Log a warning, skip the record, and keep going.
    SkipAndWarn,
}

/// Error returned by [`analyze_op`] under [`MalformedPolicy::FailFast`].
/// `record_no` is the 1-based position of the record in the store, i.e., its input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("record {record_no}: missing field `{field}`")]
    MissingField { record_no: usize, field: Field },
    #[error("record {record_no}: unknown mode `{mode}`")]
    UnknownMode { record_no: usize, mode: String },
}

//=================
// OpAnalysis

/// Square and vector series for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OpAnalysis {
    pub op: String,
    pub label: String,
    pub square: GroupedSeries,
    pub vector: GroupedSeries,
    /// 1-based numbers of the records skipped under [`MalformedPolicy::SkipAndWarn`].
    pub skipped: BTreeSet<usize>,
}

impl OpAnalysis {
    pub fn grouped(&self, shape: ShapeClass) -> &GroupedSeries {
        match shape {
            ShapeClass::Square => &self.square,
            ShapeClass::Vector => &self.vector,
        }
    }
}

/// Placement of a single record relative to the analyzed operation.
enum Placement {
    Point(ShapeClass, Mode, i64, f64),
    Excluded,
}

fn place(record_no: usize, record: &Record, op: &str) -> Result<Placement, AnalyzeError> {
    if record.is_empty() {
        return Ok(Placement::Excluded);
    }
    let missing = |field| AnalyzeError::MissingField { record_no, field };

    let record_op = record.op.as_deref().ok_or_else(|| missing(Field::Op))?;
    if record_op != op {
        return Ok(Placement::Excluded);
    }
    let (Some(shape), Some(size)) = (ShapeClass::of(record), record.cols) else {
        return Ok(Placement::Excluded);
    };

    let mode_name = record.mode.as_deref().ok_or_else(|| missing(Field::Mode))?;
    let mode = Mode::from_str(mode_name).map_err(|e| AnalyzeError::UnknownMode {
        record_no,
        mode: e.0,
    })?;
    let time = record.time.ok_or_else(|| missing(Field::Time))?;

    Ok(Placement::Point(shape, mode, size, time))
}

/// Partitions the records of `store` with `op` into square and vector [`GroupedSeries`], using `cols` as
/// the size and `time` as the time of each point. Points keep store order.
///
/// Records without `rows` or `cols`, or whose dimensions are neither square nor vector, are excluded
/// silently, as are records with no fields at all.
///
/// # Errors
/// Under [`MalformedPolicy::FailFast`]:
/// - [`AnalyzeError::MissingField`] if a non-empty record lacks `op`, or a record placed in a shape
///   class lacks `mode` or `time`;
/// - [`AnalyzeError::UnknownMode`] if such a record's `mode` is not `cpu`, `gpu`, or `hybrid`.
pub fn analyze_op(
    store: &RecordStore,
    op: &str,
    label: &str,
    policy: MalformedPolicy,
) -> Result<OpAnalysis, AnalyzeError> {
    log::trace!("entering `analyze_op` for `{op}`");
    let mut analysis = OpAnalysis {
        op: op.to_owned(),
        label: label.to_owned(),
        square: GroupedSeries::new(),
        vector: GroupedSeries::new(),
        skipped: BTreeSet::new(),
    };

    for (idx, record) in store.iter().enumerate() {
        let record_no = idx + 1;
        match place(record_no, record, op) {
            Ok(Placement::Point(ShapeClass::Square, mode, size, time)) => {
                analysis.square.push(mode, size, time)
            }
            Ok(Placement::Point(ShapeClass::Vector, mode, size, time)) => {
                analysis.vector.push(mode, size, time)
            }
            Ok(Placement::Excluded) => {}
            Err(err) => match policy {
                MalformedPolicy::FailFast => return Err(err),
                MalformedPolicy::SkipAndWarn => {
                    log::warn!("analyzing `{op}`: skipping {err}");
                    analysis.skipped.insert(record_no);
                }
            },
        }
    }

    log::debug!(
        "`{op}`: {} square points, {} vector points, {} skipped",
        analysis.square.point_count(),
        analysis.vector.point_count(),
        analysis.skipped.len()
    );
    Ok(analysis)
}
