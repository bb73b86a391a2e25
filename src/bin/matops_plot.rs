//! Reads matrix-operation benchmark output from `stdin` and writes one square and one vector chart per
//! operation, then prints per-series summary statistics to `stdout`.
//!
//! Usage: `matops-plot < bench.log`. Configured through the `MATOPS_PLOT_*` environment variables
//! (see [`PlotCfg::from_env`]) and `RUST_LOG`.

use anyhow::Context;
use matops_plot::{run, write_summary_table, FileSink, PlotCfg};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = PlotCfg::from_env()?;
    let mut sink = FileSink::from_cfg(&cfg);

    let report = run(io::stdin().lock(), &cfg, &mut sink)?;
    if report.skipped > 0 {
        log::warn!("{} malformed records were skipped", report.skipped);
    }

    let mut out = io::stdout().lock();
    write_summary_table(&mut out, &report.summaries).context("failed to write summary table")?;
    out.flush()?;
    Ok(())
}
