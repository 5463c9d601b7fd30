//! `cutover-common` — shared primitive types for the cutover engine.
//!
//! Everything here is dependency-light and consumed by both the timeline
//! crate and the render pipeline:
//!
//! - [`TimeNs`]: signed nanosecond time newtype (all timeline math is integer)
//! - [`SourceId`]: opaque reference to an input media file
//! - [`OutputFormat`] / [`FormatProfile`]: the static container/codec table

pub mod format;
pub mod types;

pub use format::{AudioCodec, FormatProfile, OutputFormat, UnknownFormatError, VideoCodec};
pub use types::{SourceId, TimeNs};
