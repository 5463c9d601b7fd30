//! Output container/codec format profiles.
//!
//! The recognized output formats map to fixed codec pairs; the table is
//! static configuration, not negotiated from the inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requested output format was not one of the recognized names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown output format: {0:?} (expected ogv, webm, or mp4)")]
pub struct UnknownFormatError(pub String);

/// Output container format selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Theora/Vorbis in Ogg.
    #[default]
    Ogv,
    /// VP8/Vorbis in WebM.
    WebM,
    /// H.264/MP3 in MP4.
    Mp4,
}

impl OutputFormat {
    /// Resolve the codec profile for this container.
    pub fn profile(self) -> FormatProfile {
        match self {
            Self::Ogv => FormatProfile {
                format: self,
                video: VideoCodec::Theora,
                audio: AudioCodec::Vorbis,
                extension: "ogv",
            },
            Self::WebM => FormatProfile {
                format: self,
                video: VideoCodec::Vp8,
                audio: AudioCodec::Vorbis,
                extension: "webm",
            },
            Self::Mp4 => FormatProfile {
                format: self,
                video: VideoCodec::H264,
                audio: AudioCodec::Mp3,
                extension: "mp4",
            },
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ogv" => Ok(Self::Ogv),
            "webm" => Ok(Self::WebM),
            "mp4" => Ok(Self::Mp4),
            other => Err(UnknownFormatError(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().extension)
    }
}

/// Video codec identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodec {
    Theora,
    Vp8,
    H264,
}

impl VideoCodec {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Theora => "Theora",
            Self::Vp8 => "VP8",
            Self::H264 => "H.264/AVC",
        }
    }
}

/// Audio codec identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCodec {
    Vorbis,
    Mp3,
}

impl AudioCodec {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Vorbis => "Vorbis",
            Self::Mp3 => "MP3",
        }
    }
}

/// Resolved container + codec pair for one output format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FormatProfile {
    pub format: OutputFormat,
    pub video: VideoCodec,
    pub audio: AudioCodec,
    /// Output file extension, without the leading dot.
    pub extension: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!("ogv".parse::<OutputFormat>().unwrap(), OutputFormat::Ogv);
        assert_eq!("WebM".parse::<OutputFormat>().unwrap(), OutputFormat::WebM);
        assert_eq!("MP4".parse::<OutputFormat>().unwrap(), OutputFormat::Mp4);
    }

    #[test]
    fn parse_unknown_format() {
        let err = "avi".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err, UnknownFormatError("avi".to_string()));
    }

    #[test]
    fn profile_table() {
        let ogv = OutputFormat::Ogv.profile();
        assert_eq!(ogv.video, VideoCodec::Theora);
        assert_eq!(ogv.audio, AudioCodec::Vorbis);
        assert_eq!(ogv.extension, "ogv");

        let webm = OutputFormat::WebM.profile();
        assert_eq!(webm.video, VideoCodec::Vp8);
        assert_eq!(webm.audio, AudioCodec::Vorbis);

        let mp4 = OutputFormat::Mp4.profile();
        assert_eq!(mp4.video, VideoCodec::H264);
        assert_eq!(mp4.audio, AudioCodec::Mp3);
        assert_eq!(mp4.extension, "mp4");
    }

    #[test]
    fn codec_display() {
        assert_eq!(VideoCodec::H264.display_name(), "H.264/AVC");
        assert_eq!(AudioCodec::Vorbis.display_name(), "Vorbis");
    }
}
