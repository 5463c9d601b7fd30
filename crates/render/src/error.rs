//! Render-side error types (thiserror-based).

use cutover_common::UnknownFormatError;
use cutover_timeline::TimelineError;
use thiserror::Error;

use crate::probe::ProbeError;

/// Top-level render error.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("compositor failed: {0}")]
    Composite(String),
}
