//! ffprobe-backed duration probe.

use std::path::Path;

use cutover_common::TimeNs;
use cutover_render::{DurationProbe, ProbeError};
use duct::cmd;
use tracing::debug;

/// Probes media durations by shelling out to `ffprobe`.
pub struct FfprobeDurationProbe;

impl DurationProbe for FfprobeDurationProbe {
    fn probe(&self, path: &Path) -> Result<TimeNs, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::FileNotFound(path.to_path_buf()));
        }

        let output = cmd!(
            "ffprobe",
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            path
        )
        .read()
        .map_err(|e| ProbeError::ProbeFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let secs: f64 = output
            .trim()
            .parse()
            .map_err(|_| ProbeError::ProbeFailed {
                path: path.to_path_buf(),
                reason: format!("unparseable ffprobe duration: {output:?}"),
            })?;

        let duration = TimeNs::from_secs(secs);
        debug!(path = %path.display(), duration = %duration, "probed");
        Ok(duration)
    }
}
