//! Summary statistics of the time values in each series.

use crate::{Mode, OpAnalysis, Series, ShapeClass};
use hdrhistogram::{CreationError, Histogram};
use std::io::{self, Write};

/// Time statistics of one series, in microseconds. Field names match the summary table columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    pub count: u64,
    pub mean_us: f64,
    pub stdev_us: f64,
    pub min_us: u64,
    pub median_us: u64,
    pub p90_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

impl From<&Histogram<u64>> for SummaryStats {
    fn from(hist: &Histogram<u64>) -> Self {
        if hist.is_empty() {
            return Self::default();
        }
        let q = |quantile| hist.value_at_quantile(quantile);
        Self {
            count: hist.len(),
            mean_us: hist.mean(),
            stdev_us: hist.stdev(),
            min_us: hist.min(),
            median_us: q(0.5),
            p90_us: q(0.9),
            p99_us: q(0.99),
            max_us: hist.max(),
        }
    }
}

/// Converts a time in seconds to whole microseconds. Negative and NaN times map to `0`.
pub fn secs_to_micros(secs: f64) -> u64 {
    (secs * 1_000_000.0).round() as u64
}

/// Records the times of `series` into an auto-resizing histogram created with the given bounds.
pub fn series_histogram(
    series: &Series,
    hist_high: u64,
    hist_sigfig: u8,
) -> Result<Histogram<u64>, CreationError> {
    let mut hist = Histogram::<u64>::new_with_bounds(1, hist_high, hist_sigfig)?;
    hist.auto(true);
    for time in &series.times {
        hist.saturating_record(secs_to_micros(*time));
    }
    Ok(hist)
}

/// [`SummaryStats`] for one `(op, shape, mode)` series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub op: String,
    pub shape: ShapeClass,
    pub mode: Mode,
    pub stats: SummaryStats,
}

/// Summarizes every series of `analysis`, square before vector and modes in legend order.
pub fn summarize(
    analysis: &OpAnalysis,
    hist_high: u64,
    hist_sigfig: u8,
) -> Result<Vec<SeriesSummary>, CreationError> {
    let mut summaries = Vec::with_capacity(ShapeClass::ALL.len() * Mode::ALL.len());
    for shape in ShapeClass::ALL {
        for (mode, series) in analysis.grouped(shape).iter() {
            let hist = series_histogram(series, hist_high, hist_sigfig)?;
            summaries.push(SeriesSummary {
                op: analysis.op.clone(),
                shape,
                mode: *mode,
                stats: SummaryStats::from(&hist),
            });
        }
    }
    Ok(summaries)
}

/// Writes `summaries` as a comma-separated table with a header line.
pub fn write_summary_table(out: &mut impl Write, summaries: &[SeriesSummary]) -> io::Result<()> {
    writeln!(out, "op,shape,mode,count,mean_us,stdev_us,min_us,median_us,p90_us,p99_us,max_us")?;
    for s in summaries {
        let st = &s.stats;
        writeln!(
            out,
            "{},{},{},{},{:.1},{:.1},{},{},{},{},{}",
            s.op,
            s.shape,
            s.mode,
            st.count,
            st.mean_us,
            st.stdev_us,
            st.min_us,
            st.median_us,
            st.p90_us,
            st.p99_us,
            st.max_us
        )?;
    }
    Ok(())
}
