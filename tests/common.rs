#![allow(dead_code)]

use matops_plot::{Chart, ChartSink, Record, RenderError};

/// Benchmark output in the format produced by the matrix-operation test program, with some noise lines.
pub const SAMPLE_LOG: &str = "\
Starting the operations test program
[op]=add [mode]=cpu [rows]=64 [cols]=64 [time]=0.010
[op]=add [mode]=gpu [rows]=64 [cols]=64 [time]=0.002
[op]=add [mode]=hybrid [rows]=64 [cols]=64 [time]=0.004

[op]=add [mode]=cpu [rows]=1 [cols]=50 [time]=0.0005
[op]=add [mode]=cpu [rows]=128 [cols]=128 [time]=0.040
[op]=scale [mode]=gpu [rows]=1 [cols]=50 [time]=0.002
[op]=scale [mode]=gpu [rows]=16 [cols]=32 [time]=0.003
[op]=mult [mode]=hybrid [rows]=1 [cols]=1 [time]=0.0001
[op]=sub [mode]=cpu [rows]=64 [cols]=64 [time]=0.011
";

/// Number of lines in [`SAMPLE_LOG`].
pub const SAMPLE_LOG_LINES: usize = 11;

pub fn record(op: &str, mode: &str, rows: i64, cols: i64, time: f64) -> Record {
    Record {
        rows: Some(rows),
        cols: Some(cols),
        time: Some(time),
        mode: Some(mode.to_owned()),
        op: Some(op.to_owned()),
    }
}

pub fn are_close(left: f64, right: f64, pct: f64) -> bool {
    let avg_abs = (left.abs() + right.abs()) / 2.0;
    (left - right).abs() <= avg_abs * pct
}

/// Sink that keeps every presented chart in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub charts: Vec<Chart>,
    /// Fail on the presentation with this 0-based index.
    pub fail_at: Option<usize>,
}

impl ChartSink for RecordingSink {
    fn present(&mut self, chart: &Chart) -> Result<(), RenderError> {
        if self.fail_at == Some(self.charts.len()) {
            return Err(RenderError::Draw {
                path: format!("{}_{}", chart.op, chart.shape).into(),
                message: "injected failure".to_owned(),
            });
        }
        self.charts.push(chart.clone());
        Ok(())
    }
}
