//! The complete parse, analyze, and present pipeline.

use crate::{
    analyze_op, read_records, summarize, Chart, ChartSink, Error, PlotCfg, SeriesSummary,
    ShapeClass,
};
use std::{collections::BTreeSet, io::BufRead};

/// Operations examined by [`run`], in presentation order, with their display labels.
pub const OPERATIONS: [(&str, &str); 9] = [
    ("add", "addition"),
    ("sub", "subtraction"),
    ("e_mult", "element multiplication"),
    ("mult", "multiplication"),
    ("scale", "scaling"),
    ("sigmoid", "Sigmoid"),
    ("deriv_sigmoid", "Sigmoid Prime"),
    ("relu", "ReLu"),
    ("deriv_relu", "ReLu Prime"),
];

/// Outcome of a successful [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Records read, one per input line.
    pub records: usize,
    /// Charts handed to the sink.
    pub charts: usize,
    /// Distinct records skipped under
    /// [`MalformedPolicy::SkipAndWarn`](crate::MalformedPolicy::SkipAndWarn) by any operation.
    /// A record rejected by several operations, such as one without `op`, counts once.
    pub skipped: usize,
    pub summaries: Vec<SeriesSummary>,
}

/// Reads all of `input`, then, for each operation in `operations`, analyzes the records and presents its
/// square chart followed by its vector chart to `sink`.
///
/// # Errors
/// The first [`ParseError`](crate::ParseError), [`AnalyzeError`](crate::AnalyzeError), or
/// [`RenderError`](crate::RenderError) encountered; charts presented before the error remain presented.
pub fn run_ops(
    input: impl BufRead,
    cfg: &PlotCfg,
    operations: &[(&str, &str)],
    sink: &mut impl ChartSink,
) -> Result<RunReport, Error> {
    log::trace!("entering `run_ops`");
    let store = read_records(input)?;
    log::info!(
        "read {} records, {} with benchmark fields",
        store.len(),
        store.non_empty_count()
    );

    let mut report = RunReport {
        records: store.len(),
        charts: 0,
        skipped: 0,
        summaries: Vec::new(),
    };

    let mut skipped = BTreeSet::new();
    for (op, label) in operations {
        let analysis = analyze_op(&store, op, label, cfg.malformed())?;
        skipped.extend(analysis.skipped.iter().copied());
        for shape in ShapeClass::ALL {
            let chart = Chart::new(shape, op, label, analysis.grouped(shape));
            sink.present(&chart)?;
            report.charts += 1;
        }
        report
            .summaries
            .extend(summarize(&analysis, cfg.hist_high(), cfg.hist_sigfig())?);
    }

    report.skipped = skipped.len();
    log::info!("presented {} charts", report.charts);
    Ok(report)
}

/// Runs the pipeline for the fixed [`OPERATIONS`] list, presenting 18 charts.
pub fn run(
    input: impl BufRead,
    cfg: &PlotCfg,
    sink: &mut impl ChartSink,
) -> Result<RunReport, Error> {
    run_ops(input, cfg, &OPERATIONS, sink)
}
