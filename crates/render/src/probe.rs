//! Media duration probing.
//!
//! Probing is an external collaborator: the render planner only needs a
//! `path -> duration` function that fails loudly on a missing or unreadable
//! file. The real implementation (ffprobe in the CLI) lives with the
//! binary; [`StaticProbe`] serves tests and programmatic callers that
//! already know their durations.

use cutover_common::TimeNs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from probing an input file.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to probe {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },
}

/// Supplies the duration of a media file.
pub trait DurationProbe {
    fn probe(&self, path: &Path) -> Result<TimeNs, ProbeError>;
}

/// A fixed path-to-duration map.
#[derive(Clone, Debug, Default)]
pub struct StaticProbe {
    durations: HashMap<PathBuf, TimeNs>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, duration: TimeNs) -> Self {
        self.durations.insert(path.into(), duration);
        self
    }
}

impl DurationProbe for StaticProbe {
    fn probe(&self, path: &Path) -> Result<TimeNs, ProbeError> {
        self.durations
            .get(path)
            .copied()
            .ok_or_else(|| ProbeError::FileNotFound(path.to_path_buf()))
    }
}
