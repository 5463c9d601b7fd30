//! `cutover-timeline` — timeline composition and transition scheduling.
//!
//! This crate turns an ordered list of probed clips into the exact placement
//! of every clip and transition on a single shared timeline, plus the blend
//! curve driving each transition. It handles:
//!
//! - **Clip placement**: overlapping-by-exactly-one-transition-length layout
//! - **Priority ordering**: a documented total order resolving overlap
//! - **Blend curves**: the linear full-to-none ramp consumed by a compositor
//! - **Music placement**: one continuous, optionally offset, background track
//!
//! The computation is pure: no I/O, no shared state, safe to run fully
//! ahead of any decode/encode work.
//!
//! # Usage
//!
//! ```rust
//! use cutover_common::{SourceId, TimeNs};
//! use cutover_timeline::{build, generate_curve, Clip};
//!
//! let clips = vec![
//!     Clip::new(SourceId::new("a.mp4"), TimeNs::SECOND * 10),
//!     Clip::new(SourceId::new("b.mp4"), TimeNs::SECOND * 10),
//! ];
//! let (timeline, transitions) = build(&clips, TimeNs::SECOND * 2, -21).unwrap();
//! let curve = generate_curve(&transitions[0]).unwrap();
//! assert_eq!(timeline.clip_entries().count(), 2);
//! assert!((curve.sample(TimeNs::SECOND) - 0.5).abs() < 1e-9);
//! ```

pub mod builder;
pub mod curve;
pub mod error;
pub mod music;
pub mod types;

pub use builder::build;
pub use curve::{generate_curve, BlendCurve, CurveKeyframe};
pub use error::TimelineError;
pub use music::place_music;
pub use types::{Clip, EntryKind, MusicTrack, Priority, Timeline, TimelineEntry, TransitionSpec};
