//! Crate-level error type.

use crate::{AnalyzeError, ParseError, RenderError};
use hdrhistogram::CreationError;
use thiserror::Error;

/// Error returned by [`run`](crate::run). Wraps the error of the failing pipeline stage.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse benchmark log")]
    Parse(#[from] ParseError),
    #[error("failed to analyze benchmark records")]
    Analyze(#[from] AnalyzeError),
    #[error("failed to render chart")]
    Render(#[from] RenderError),
    #[error("invalid summary histogram configuration: {0:?}")]
    HistogramConfig(CreationError),
}

impl From<CreationError> for Error {
    fn from(value: CreationError) -> Self {
        Self::HistogramConfig(value)
    }
}
