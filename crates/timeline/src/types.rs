//! Timeline data model types: Clip, TimelineEntry, TransitionSpec, MusicTrack.
//!
//! These describe the computed placement of every clip and transition on the
//! shared timeline. A timeline is built once per run and never mutated after
//! construction.

use cutover_common::{SourceId, TimeNs};
use serde::{Deserialize, Serialize};

/// One input video file treated as a single timeline unit.
///
/// Immutable once probed. The duration must exceed twice the transition
/// length, otherwise the clip cannot host both an incoming and an outgoing
/// transition; [`crate::build`] enforces this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    /// Opaque reference to the source media.
    pub source_id: SourceId,
    /// Full duration of the source, as probed.
    pub duration: TimeNs,
}

impl Clip {
    pub fn new(source_id: SourceId, duration: TimeNs) -> Self {
        Self {
            source_id,
            duration,
        }
    }
}

/// Visual precedence of a timeline entry when intervals overlap.
///
/// Lower number = rendered on top. The total order over entries is:
///
/// 1. Every transition entry carries [`Priority::TRANSITION`] and always
///    outranks every clip entry, so the blend operation wins over both of
///    the clips it covers.
/// 2. Clip priorities strictly decrease with clip index (clip *i* of *n*
///    gets `n - i + 1`), so during an overlap window the later clip wins.
///
/// Only the ordering outcome matters; the integers themselves are an
/// interchange detail for the compositor.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Priority(pub u32);

impl Priority {
    /// Highest precedence; reserved for transition entries.
    pub const TRANSITION: Self = Self(1);

    /// Priority for clip `index` out of `count` clips.
    pub fn for_clip(index: usize, count: usize) -> Self {
        debug_assert!(index < count);
        Self((count - index + 1) as u32)
    }

    /// `true` if `self` is rendered on top of `other` where they overlap.
    pub fn wins_over(self, other: Self) -> bool {
        self.0 < other.0
    }
}

/// What a timeline entry renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A source clip.
    Clip(SourceId),
    /// A blend operation over the two clips it overlaps.
    Transition,
}

/// One placed interval on the shared timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Placement on the timeline.
    pub start: TimeNs,
    pub duration: TimeNs,
    /// Offset into the source media.
    pub media_start: TimeNs,
    pub media_duration: TimeNs,
    pub priority: Priority,
    pub kind: EntryKind,
}

impl TimelineEntry {
    /// Exclusive end of this entry's interval.
    pub fn end(&self) -> TimeNs {
        self.start + self.duration
    }

    /// `true` if `time` falls inside `[start, end)`.
    pub fn contains(&self, time: TimeNs) -> bool {
        time >= self.start && time < self.end()
    }

    pub fn is_transition(&self) -> bool {
        matches!(self.kind, EntryKind::Transition)
    }
}

/// The flat, shared coordinate space onto which all clip and transition
/// intervals are placed. Built once by [`crate::build`], then read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Clip entries in clip order, followed by transition entries in pair order.
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn clip_entries(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter().filter(|e| !e.is_transition())
    }

    pub fn transition_entries(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter().filter(|e| e.is_transition())
    }

    /// Total output duration: the latest entry end.
    pub fn total_duration(&self) -> TimeNs {
        self.entries
            .iter()
            .map(TimelineEntry::end)
            .max()
            .unwrap_or(TimeNs::ZERO)
    }
}

/// Parameters for one transition between an adjacent clip pair.
///
/// Stateless beyond its fields; one instance per pair, index-aligned with
/// the transition entries on the timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Signed wipe/blend pattern selector. The absolute value names the
    /// pattern in the compositor's catalog; a negative sign inverts it.
    pub style: i32,
    pub length: TimeNs,
    /// Edge feather width hint, passed through to the compositor.
    pub softness: u32,
}

impl TransitionSpec {
    pub fn new(style: i32, length: TimeNs) -> Self {
        Self {
            style,
            length,
            softness: 0,
        }
    }

    /// Pattern catalog index (sign stripped).
    pub fn pattern_id(&self) -> u32 {
        self.style.unsigned_abs()
    }

    /// Whether the pattern is applied inverted.
    pub fn is_inverted(&self) -> bool {
        self.style < 0
    }
}

/// A single continuous background music track spanning the whole output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicTrack {
    pub source_id: SourceId,
    /// Start point within the source audio.
    pub media_start: TimeNs,
    /// Equal to the timeline's total output duration.
    pub duration: TimeNs,
}
