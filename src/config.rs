//! Run configuration: rendering target, chart size, malformed-record policy, and summary histogram bounds.

use crate::MalformedPolicy;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

pub const ENV_OUT_DIR: &str = "MATOPS_PLOT_OUT_DIR";
pub const ENV_FORMAT: &str = "MATOPS_PLOT_FORMAT";
pub const ENV_SIZE: &str = "MATOPS_PLOT_SIZE";
pub const ENV_MALFORMED: &str = "MATOPS_PLOT_MALFORMED";

/// Error returned by [`PlotCfg::from_env`] for an environment variable with an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("MATOPS_PLOT_FORMAT: expected `svg` or `png`, got `{0}`")]
    InvalidFormat(String),
    #[error("MATOPS_PLOT_SIZE: expected `<width>x<height>` with non-zero dimensions, got `{0}`")]
    InvalidSize(String),
    #[error("MATOPS_PLOT_MALFORMED: expected `fail` or `skip`, got `{0}`")]
    InvalidPolicy(String),
}

/// Image format of rendered charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            _ => Err(ConfigError::InvalidFormat(s.to_owned())),
        }
    }
}

impl FromStr for MalformedPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(MalformedPolicy::FailFast),
            "skip" => Ok(MalformedPolicy::SkipAndWarn),
            _ => Err(ConfigError::InvalidPolicy(s.to_owned())),
        }
    }
}

/// Parses `<width>x<height>`, e.g. `1024x768`.
pub fn parse_size(s: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidSize(s.to_owned());
    let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

/// Configuration of a [`run`](crate::run).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCfg {
    pub(crate) out_dir: PathBuf,
    pub(crate) format: ImageFormat,
    pub(crate) size: (u32, u32),
    pub(crate) malformed: MalformedPolicy,
    pub(crate) hist_high: u64,
    pub(crate) hist_sigfig: u8,
}

impl Default for PlotCfg {
    /// Instantiates a default [PlotCfg]. The defaults are:
    /// - charts written to the `plots` directory as SVG files of `1024x768` pixels;
    /// - [`MalformedPolicy::FailFast`];
    /// - summary histograms with a `hist_high` of `20,000,000` (20 seconds) and a `hist_sigfig` of 2.
    ///   The histograms are auto-resizable, so larger times are still recorded.
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("plots"),
            format: ImageFormat::Svg,
            size: (1024, 768),
            malformed: MalformedPolicy::FailFast,
            hist_high: 20 * 1000 * 1000,
            hist_sigfig: 2,
        }
    }
}

impl PlotCfg {
    /// Creates a configuration from the default overridden by the `MATOPS_PLOT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Creates a configuration from the default overridden by the variables that `var` resolves.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(dir) = var(ENV_OUT_DIR).filter(|d| !d.is_empty()) {
            cfg = cfg.with_out_dir(dir);
        }
        if let Some(format) = var(ENV_FORMAT) {
            cfg = cfg.with_format(format.parse()?);
        }
        if let Some(size) = var(ENV_SIZE) {
            let (w, h) = parse_size(&size)?;
            cfg = cfg.with_size(w, h);
        }
        if let Some(policy) = var(ENV_MALFORMED) {
            cfg = cfg.with_malformed(policy.parse()?);
        }
        log::debug!("configuration: {cfg:?}");
        Ok(cfg)
    }

    /// Creates a new [`PlotCfg`] configured the same as `self` but with the given output directory.
    pub fn with_out_dir(&self, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..self.clone()
        }
    }

    /// Creates a new [`PlotCfg`] configured the same as `self` but with the given image format.
    pub fn with_format(&self, format: ImageFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// Creates a new [`PlotCfg`] configured the same as `self` but with the given chart size in pixels.
    pub fn with_size(&self, width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..self.clone()
        }
    }

    /// Creates a new [`PlotCfg`] configured the same as `self` but with the given malformed-record policy.
    pub fn with_malformed(&self, malformed: MalformedPolicy) -> Self {
        Self {
            malformed,
            ..self.clone()
        }
    }

    /// Creates a new [`PlotCfg`] configured the same as `self` but with the given `hist_high`
    /// (see [hdrhistogram::Histogram::high]).
    pub fn with_hist_high(&self, hist_high: u64) -> Self {
        Self {
            hist_high,
            ..self.clone()
        }
    }

    /// Creates a new [`PlotCfg`] configured the same as `self` but with the given `hist_sigfig`
    /// (see [hdrhistogram::Histogram::sigfig]).
    pub fn with_hist_sigfig(&self, hist_sigfig: u8) -> Self {
        Self {
            hist_sigfig,
            ..self.clone()
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn malformed(&self) -> MalformedPolicy {
        self.malformed
    }

    pub fn hist_high(&self) -> u64 {
        self.hist_high
    }

    pub fn hist_sigfig(&self) -> u8 {
        self.hist_sigfig
    }
}
