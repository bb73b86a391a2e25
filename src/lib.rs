//! Parses the output of matrix-operation benchmark runs and plots execution time versus matrix size
//! for the `cpu`, `gpu`, and `hybrid` computation modes of each operation.
//!
//! The benchmark output is a sequence of text lines containing bracketed key-value tokens such as
//! `[op]=add [mode]=gpu [rows]=64 [cols]=64 [time]=0.003421`. The processing pipeline is:
//! - [`parse_line`] / [`read_records`] extract typed [`Record`]s into a [`RecordStore`];
//! - [`analyze_op`] partitions the store for one operation into square (`rows == cols`) and vector
//!   (`rows == 1`) [`GroupedSeries`];
//! - [`Chart`]s built from the grouped series are presented, in order, to a [`ChartSink`], by default
//!   a [`FileSink`] that renders them with [plotters](https://crates.io/crates/plotters).
//!
//! [`run`] drives the whole pipeline for the fixed list of [`OPERATIONS`].
#![deny(clippy::unwrap_used)]

mod record;
pub use record::*;

mod parser;
pub use parser::*;

mod store;
pub use store::*;

mod analyzer;
pub use analyzer::*;

mod render;
pub use render::*;

mod summary;
pub use summary::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod pipeline;
pub use pipeline::*;
