//! Error types for timeline construction (thiserror-based).

use cutover_common::{SourceId, TimeNs};
use thiserror::Error;

/// Errors that can occur while building a timeline or its curves.
///
/// All of these are detected during the pure computation phase and are
/// fatal for the run; there is no retry or partial-success mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("timeline needs at least one clip")]
    NoClips,

    #[error(
        "clip #{index} ({source_id}) is too short to host its transitions: \
         duration {duration} must exceed {required} (2x transition length)"
    )]
    InsufficientDuration {
        index: usize,
        source_id: SourceId,
        duration: TimeNs,
        required: TimeNs,
    },

    #[error("transition length must not be negative, got {length}")]
    InvalidTransition { length: TimeNs },

    #[error("music track too short: needs {needed} from offset, source has {available}")]
    InsufficientAudio { needed: TimeNs, available: TimeNs },
}
