//! Timeline construction: clip and transition placement.
//!
//! Clips are laid end to end with each one starting exactly one transition
//! length before its predecessor ends; a transition entry is placed over
//! each overlap window. The resulting intervals touch but never extend into
//! clip N+2 or beyond, which is why every clip must be longer than twice the
//! transition length.

use cutover_common::TimeNs;
use tracing::debug;

use crate::error::TimelineError;
use crate::types::{Clip, EntryKind, Priority, Timeline, TimelineEntry, TransitionSpec};

/// Build the timeline and the per-pair transition specs.
///
/// Returns the combined timeline (all clip entries followed by all
/// transition entries) and the ordered transition specs, index-aligned with
/// the transition entries — one per adjacent clip pair, `n - 1` total.
///
/// # Errors
///
/// - [`TimelineError::NoClips`] if `clips` is empty.
/// - [`TimelineError::InvalidTransition`] if `transition_length` is negative.
/// - [`TimelineError::InsufficientDuration`] if any clip's duration is not
///   strictly greater than `2 * transition_length`.
pub fn build(
    clips: &[Clip],
    transition_length: TimeNs,
    transition_style: i32,
) -> Result<(Timeline, Vec<TransitionSpec>), TimelineError> {
    if clips.is_empty() {
        return Err(TimelineError::NoClips);
    }
    if transition_length.is_negative() {
        return Err(TimelineError::InvalidTransition {
            length: transition_length,
        });
    }

    let required = transition_length * 2;
    for (index, clip) in clips.iter().enumerate() {
        if clip.duration <= required {
            return Err(TimelineError::InsufficientDuration {
                index,
                source_id: clip.source_id.clone(),
                duration: clip.duration,
                required,
            });
        }
    }

    let n = clips.len();
    let mut entries = Vec::with_capacity(2 * n - 1);

    // Clip entries: each clip starts one transition length before its
    // predecessor ends.
    let mut cursor = TimeNs::ZERO;
    for (index, clip) in clips.iter().enumerate() {
        let entry = TimelineEntry {
            start: cursor,
            duration: clip.duration,
            media_start: TimeNs::ZERO,
            media_duration: clip.duration,
            priority: Priority::for_clip(index, n),
            kind: EntryKind::Clip(clip.source_id.clone()),
        };
        debug!(
            source = %clip.source_id,
            start = %entry.start,
            duration = %entry.duration,
            priority = entry.priority.0,
            "placed clip"
        );
        entries.push(entry);
        cursor += clip.duration - transition_length;
    }

    // Transition entries: one over each overlap window, always on top.
    let mut specs = Vec::with_capacity(n - 1);
    let mut transition_start = clips[0].duration - transition_length;
    for pair in clips.windows(2) {
        let incoming = &pair[1];
        let entry = TimelineEntry {
            start: transition_start,
            duration: transition_length,
            media_start: TimeNs::ZERO,
            media_duration: transition_length,
            priority: Priority::TRANSITION,
            kind: EntryKind::Transition,
        };
        debug!(
            start = %entry.start,
            duration = %entry.duration,
            style = transition_style,
            "placed transition"
        );
        entries.push(entry);
        specs.push(TransitionSpec::new(transition_style, transition_length));
        transition_start += incoming.duration - transition_length;
    }

    Ok((Timeline { entries }, specs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutover_common::SourceId;

    fn clips(durations_secs: &[f64]) -> Vec<Clip> {
        durations_secs
            .iter()
            .enumerate()
            .map(|(i, &d)| Clip::new(SourceId::new(format!("clip_{i}")), TimeNs::from_secs(d)))
            .collect()
    }

    #[test]
    fn three_clips_reference_layout() {
        // Durations [10, 10, 10], transition 2s: starts [0, 8, 16],
        // priorities [4, 3, 2]; transitions at [8, 16], priority 1.
        let (tl, specs) = build(&clips(&[10.0, 10.0, 10.0]), TimeNs::SECOND * 2, -21).unwrap();

        let clip_entries: Vec<_> = tl.clip_entries().collect();
        assert_eq!(clip_entries.len(), 3);
        for (entry, (start, prio)) in clip_entries.iter().zip([(0, 4), (8, 3), (16, 2)]) {
            assert_eq!(entry.start, TimeNs::SECOND * start);
            assert_eq!(entry.duration, TimeNs::SECOND * 10);
            assert_eq!(entry.media_start, TimeNs::ZERO);
            assert_eq!(entry.media_duration, TimeNs::SECOND * 10);
            assert_eq!(entry.priority, Priority(prio));
        }

        let trans_entries: Vec<_> = tl.transition_entries().collect();
        assert_eq!(trans_entries.len(), 2);
        for (entry, start) in trans_entries.iter().zip([8, 16]) {
            assert_eq!(entry.start, TimeNs::SECOND * start);
            assert_eq!(entry.duration, TimeNs::SECOND * 2);
            assert_eq!(entry.priority, Priority::TRANSITION);
        }

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].style, -21);
        assert_eq!(specs[0].length, TimeNs::SECOND * 2);
        assert_eq!(tl.total_duration(), TimeNs::SECOND * 26);
    }

    #[test]
    fn entry_counts_for_valid_sequences() {
        for durations in [&[7.0][..], &[7.0, 9.0], &[7.0, 9.0, 11.0, 13.0, 8.0]] {
            let (tl, specs) = build(&clips(durations), TimeNs::SECOND * 2, 1).unwrap();
            assert_eq!(tl.clip_entries().count(), durations.len());
            assert_eq!(tl.transition_entries().count(), durations.len() - 1);
            assert_eq!(specs.len(), durations.len() - 1);
        }
    }

    #[test]
    fn adjacent_clips_overlap_by_transition_length() {
        let length = TimeNs::from_secs(1.5);
        let (tl, _) = build(&clips(&[8.0, 6.5, 12.0, 5.0]), length, 1).unwrap();
        let entries: Vec<_> = tl.clip_entries().collect();
        for pair in entries.windows(2) {
            assert_eq!(pair[0].end() - length, pair[1].start);
        }
    }

    #[test]
    fn transitions_contained_in_neighbor_union() {
        let (tl, _) = build(&clips(&[8.0, 6.5, 12.0]), TimeNs::from_secs(1.5), 1).unwrap();
        let clips_e: Vec<_> = tl.clip_entries().cloned().collect();
        for (i, trans) in tl.transition_entries().enumerate() {
            let union_start = clips_e[i].start.min(clips_e[i + 1].start);
            let union_end = clips_e[i].end().max(clips_e[i + 1].end());
            assert!(trans.start >= union_start);
            assert!(trans.end() <= union_end);
            // The overlap window is exactly the transition interval.
            assert_eq!(trans.start, clips_e[i + 1].start);
            assert_eq!(trans.end(), clips_e[i].end());
        }
    }

    #[test]
    fn priorities_strictly_decreasing_and_transitions_on_top() {
        let (tl, _) = build(&clips(&[10.0, 10.0, 10.0, 10.0]), TimeNs::SECOND, 1).unwrap();
        let clip_prios: Vec<_> = tl.clip_entries().map(|e| e.priority).collect();
        for pair in clip_prios.windows(2) {
            assert!(pair[1].wins_over(pair[0]));
        }
        for trans in tl.transition_entries() {
            for &p in &clip_prios {
                assert!(trans.priority.wins_over(p));
            }
        }
    }

    #[test]
    fn single_clip_no_transitions() {
        let (tl, specs) = build(&clips(&[10.0]), TimeNs::SECOND * 2, -21).unwrap();
        assert_eq!(tl.entries.len(), 1);
        assert_eq!(tl.transition_entries().count(), 0);
        assert!(specs.is_empty());
        assert_eq!(tl.total_duration(), TimeNs::SECOND * 10);
    }

    #[test]
    fn clip_too_short_is_rejected() {
        // 3s <= 2 * 2s fails, naming the offending clip.
        let err = build(&clips(&[3.0, 10.0]), TimeNs::SECOND * 2, 1).unwrap_err();
        match err {
            TimelineError::InsufficientDuration {
                index,
                source_id,
                duration,
                required,
            } => {
                assert_eq!(index, 0);
                assert_eq!(source_id, SourceId::new("clip_0"));
                assert_eq!(duration, TimeNs::SECOND * 3);
                assert_eq!(required, TimeNs::SECOND * 4);
            }
            other => panic!("expected InsufficientDuration, got {other:?}"),
        }
    }

    #[test]
    fn duration_exactly_twice_length_is_rejected() {
        let err = build(&clips(&[4.0]), TimeNs::SECOND * 2, 1).unwrap_err();
        assert!(matches!(err, TimelineError::InsufficientDuration { .. }));
    }

    #[test]
    fn empty_clip_list_is_rejected() {
        assert_eq!(
            build(&[], TimeNs::SECOND, 1).unwrap_err(),
            TimelineError::NoClips
        );
    }

    #[test]
    fn negative_transition_length_is_rejected() {
        let err = build(&clips(&[10.0]), TimeNs::from_secs(-1.0), 1).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidTransition { .. }));
    }

    #[test]
    fn zero_transition_length_degenerates_to_cuts() {
        let (tl, specs) = build(&clips(&[5.0, 5.0]), TimeNs::ZERO, 1).unwrap();
        let trans: Vec<_> = tl.transition_entries().collect();
        assert_eq!(trans.len(), 1);
        assert_eq!(trans[0].duration, TimeNs::ZERO);
        assert_eq!(trans[0].start, TimeNs::SECOND * 5);
        assert_eq!(specs[0].length, TimeNs::ZERO);
        // Clips touch without overlapping.
        let clips_e: Vec<_> = tl.clip_entries().collect();
        assert_eq!(clips_e[0].end(), clips_e[1].start);
    }
}
