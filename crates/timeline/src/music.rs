//! Background music placement.
//!
//! A single continuous track spans the whole output, optionally starting
//! from an offset within the source audio. Multiple tracks and audio
//! crossfades are out of scope.

use cutover_common::{SourceId, TimeNs};
use tracing::debug;

use crate::error::TimelineError;
use crate::types::{Clip, MusicTrack};

/// Total output duration of a clip sequence with pairwise transitions:
/// the sum of clip durations minus one transition length per adjacent pair.
pub fn output_duration(clips: &[Clip], transition_length: TimeNs) -> TimeNs {
    let total: TimeNs = clips.iter().map(|c| c.duration).sum();
    if clips.len() < 2 {
        return total;
    }
    total - transition_length * (clips.len() as i64 - 1)
}

/// Place the music track over `[0, output_duration)`.
///
/// `source_duration` is the probed length of the music file, if available.
/// When known, `offset + output_duration` must fit inside it, otherwise
/// [`TimelineError::InsufficientAudio`] is returned. When unknown, the
/// placement is best-effort and any shortfall surfaces downstream in the
/// compositor.
pub fn place_music(
    source_id: SourceId,
    offset: TimeNs,
    clips: &[Clip],
    transition_length: TimeNs,
    source_duration: Option<TimeNs>,
) -> Result<MusicTrack, TimelineError> {
    let duration = output_duration(clips, transition_length);
    let needed = offset + duration;

    if let Some(available) = source_duration
        && needed > available
    {
        return Err(TimelineError::InsufficientAudio { needed, available });
    }

    debug!(source = %source_id, offset = %offset, duration = %duration, "placed music track");
    Ok(MusicTrack {
        source_id,
        media_start: offset,
        duration,
    })
}
