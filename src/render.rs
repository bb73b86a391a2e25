//! Chart descriptions and their presentation targets.
//!
//! A [`Chart`] is a backend-independent description of one line chart. Charts are handed one at a time
//! to a [`ChartSink`]; the [`FileSink`] renders them with [plotters](https://crates.io/crates/plotters).

use crate::{GroupedSeries, ImageFormat, Mode, PlotCfg, ShapeClass};
use plotters::{coord::Shift, prelude::*};
use std::{
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const TIME_AXIS_DESC: &str = "Time (Seconds)";

//==============
// Errors

/// Error returned when presenting a [`Chart`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create output directory `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to draw chart `{}`: {message}", .path.display())]
    Draw { path: PathBuf, message: String },
}

//==============
// Chart

/// One polyline of a [`Chart`]. Points are in append order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub mode: Mode,
    pub points: Vec<(i64, f64)>,
}

/// Description of the chart for one operation and shape class.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub op: String,
    pub shape: ShapeClass,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// One line per mode, in legend order. Lines with no points are kept so they appear in the legend.
    pub lines: Vec<ChartLine>,
}

impl Chart {
    pub fn new(shape: ShapeClass, op: &str, op_label: &str, grouped: &GroupedSeries) -> Self {
        let (title, x_desc) = match shape {
            ShapeClass::Square => (
                format!("Matrix {op_label} operations on different modes."),
                "N (Size of the matrix is NxN)",
            ),
            ShapeClass::Vector => (
                format!("Vector {op_label} operations on different modes."),
                "N (Size of the matrix is 1xN)",
            ),
        };
        let lines = grouped
            .iter()
            .map(|(mode, series)| ChartLine {
                mode: *mode,
                points: series.points().collect(),
            })
            .collect();
        Self {
            op: op.to_owned(),
            shape,
            title,
            x_desc: x_desc.to_owned(),
            y_desc: TIME_AXIS_DESC.to_owned(),
            lines,
        }
    }

    /// Axis ranges covering all points. Degenerate ranges are widened so they are never empty.
    pub fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let points = || self.lines.iter().flat_map(|l| l.points.iter());
        let (x_min, x_max) = points()
            .map(|(x, _)| *x as f64)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });
        let y_max = points()
            .map(|(_, y)| *y)
            .filter(|y| y.is_finite())
            .fold(0.0_f64, f64::max);

        let x_range = if x_min > x_max {
            0.0..1.0
        } else if x_min == x_max {
            (x_min - 1.0)..(x_max + 1.0)
        } else {
            x_min..x_max
        };
        let y_range = if y_max > 0.0 { 0.0..(y_max * 1.1) } else { 0.0..1.0 };
        (x_range, y_range)
    }
}

//==============
// Sinks

/// Presentation target for [`Chart`]s. Charts are presented one at a time, in the order of the calls.
pub trait ChartSink {
    fn present(&mut self, chart: &Chart) -> Result<(), RenderError>;
}

/// Renders each chart to `<out_dir>/<op>_<shape>.<ext>`.
#[derive(Debug, Clone)]
pub struct FileSink {
    out_dir: PathBuf,
    format: ImageFormat,
    size: (u32, u32),
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(out_dir: impl Into<PathBuf>, format: ImageFormat, size: (u32, u32)) -> Self {
        Self {
            out_dir: out_dir.into(),
            format,
            size,
            written: Vec::new(),
        }
    }

    pub fn from_cfg(cfg: &PlotCfg) -> Self {
        Self::new(cfg.out_dir(), cfg.format(), cfg.size())
    }

    /// Paths of the files written so far, in presentation order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

/// Output path of the chart for `op` and `shape`.
pub fn chart_path(out_dir: &Path, op: &str, shape: ShapeClass, format: ImageFormat) -> PathBuf {
    out_dir.join(format!("{op}_{shape}.{}", format.extension()))
}

impl ChartSink for FileSink {
    fn present(&mut self, chart: &Chart) -> Result<(), RenderError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| RenderError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        let path = chart_path(&self.out_dir, &chart.op, chart.shape, self.format);
        let drawn = match self.format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, self.size).into_drawing_area();
                draw_chart(&root, chart).map_err(|e| e.to_string())
            }
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, self.size).into_drawing_area();
                draw_chart(&root, chart).map_err(|e| e.to_string())
            }
        };
        drawn.map_err(|message| RenderError::Draw {
            path: path.clone(),
            message,
        })?;
        log::info!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

fn mode_color(mode: Mode) -> RGBColor {
    match mode {
        Mode::Cpu => BLUE,
        Mode::Gpu => RED,
        Mode::Hybrid => GREEN,
    }
}

/// Draws `chart` on `root`: one labeled polyline per mode, a legend, the title, and the axis labels.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (x_range, y_range) = chart.ranges();
    let mut ctx = ChartBuilder::on(root)
        .margin(20)
        .caption(&chart.title, ("sans-serif", 24).into_font())
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .draw()?;

    for line in &chart.lines {
        let color = mode_color(line.mode);
        ctx.draw_series(LineSeries::new(
            line.points.iter().map(|(x, y)| (*x as f64, *y)),
            color.stroke_width(2),
        ))?
        .label(line.mode.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
