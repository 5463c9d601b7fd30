//! Render planning — runs the whole computation phase before any pipeline
//! work starts.
//!
//! [`plan`] probes every input, builds the timeline, generates every blend
//! curve, places the music track, and resolves the output format profile.
//! The resulting [`RenderPlan`] is internally consistent by construction
//! (entry counts, priorities, and intervals all validated in the timeline
//! crate) and owns everything a compositor needs for the full run.

use std::path::{Path, PathBuf};

use cutover_common::{FormatProfile, OutputFormat, SourceId, TimeNs};
use cutover_timeline::{
    build, generate_curve, music, BlendCurve, Clip, MusicTrack, Timeline, TransitionSpec,
};
use tracing::info;

use crate::error::RenderError;
use crate::probe::DurationProbe;

/// Background music request: a file plus a start offset within it.
#[derive(Clone, Debug, PartialEq)]
pub struct MusicCue {
    pub path: PathBuf,
    pub offset: TimeNs,
}

/// Everything the caller chooses about a render.
///
/// Defaults mirror the CLI defaults: half-second transitions, inverted
/// style 21, Ogg Theora output.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Output basename; the format's extension is appended.
    pub output_base: PathBuf,
    pub format: OutputFormat,
    pub transition_length: TimeNs,
    /// Signed wipe pattern selector (negative = inverted).
    pub transition_style: i32,
    /// Edge feather width hint for the compositor.
    pub softness: u32,
    pub music: Option<MusicCue>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_base: PathBuf::from("transitions"),
            format: OutputFormat::Ogv,
            transition_length: TimeNs::from_secs(0.5),
            transition_style: -21,
            softness: 0,
            music: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.output_base.as_os_str().is_empty() {
            return Err(RenderError::InvalidConfig(
                "output basename must not be empty".to_string(),
            ));
        }
        if self.transition_length.is_negative() {
            return Err(RenderError::Timeline(
                cutover_timeline::TimelineError::InvalidTransition {
                    length: self.transition_length,
                },
            ));
        }
        if let Some(cue) = &self.music
            && cue.offset.is_negative()
        {
            return Err(RenderError::InvalidConfig(format!(
                "music offset must not be negative, got {}",
                cue.offset
            )));
        }
        Ok(())
    }

    /// Output path with the format's extension appended to the basename.
    pub fn output_path(&self) -> PathBuf {
        let mut path = self.output_base.clone().into_os_string();
        path.push(".");
        path.push(self.format.profile().extension);
        PathBuf::from(path)
    }
}

/// The fully computed description of one render run.
///
/// Owns the timeline, every transition spec, and every blend curve. The
/// pipeline keeps the plan alive until the compositor reports completion or
/// failure; consumers hold only borrows, so per-transition state cannot be
/// dropped while a transition interval is still being processed.
#[derive(Clone, Debug)]
pub struct RenderPlan {
    pub timeline: Timeline,
    /// Index-aligned with the timeline's transition entries.
    pub transitions: Vec<TransitionSpec>,
    /// Index-aligned with `transitions`.
    pub curves: Vec<BlendCurve>,
    pub music: Option<MusicTrack>,
    pub profile: FormatProfile,
    pub output_path: PathBuf,
}

impl RenderPlan {
    /// Total output duration.
    pub fn total_duration(&self) -> TimeNs {
        self.timeline.total_duration()
    }
}

/// Probe the inputs and compute the complete render plan.
///
/// Fails before any pipeline work starts if an input is missing or
/// unprobeable, a clip is too short for its transitions, or the music track
/// cannot cover the output from its offset.
pub fn plan(
    config: &RenderConfig,
    clip_paths: &[PathBuf],
    probe: &dyn DurationProbe,
) -> Result<RenderPlan, RenderError> {
    config.validate()?;

    let mut clips = Vec::with_capacity(clip_paths.len());
    for path in clip_paths {
        let duration = probe.probe(path)?;
        clips.push(Clip::new(source_id_for(path), duration));
    }

    let (timeline, transitions) = build(
        &clips,
        config.transition_length,
        config.transition_style,
    )?;

    let curves = transitions
        .iter()
        .map(generate_curve)
        .collect::<Result<Vec<_>, _>>()?;

    let music = match &config.music {
        Some(cue) => {
            let source_duration = probe.probe(&cue.path)?;
            Some(music::place_music(
                source_id_for(&cue.path),
                cue.offset,
                &clips,
                config.transition_length,
                Some(source_duration),
            )?)
        }
        None => None,
    };

    let plan = RenderPlan {
        timeline,
        transitions,
        curves,
        music,
        profile: config.format.profile(),
        output_path: config.output_path(),
    };

    info!(
        clips = clips.len(),
        transitions = plan.transitions.len(),
        duration = %plan.total_duration(),
        output = %plan.output_path.display(),
        video = plan.profile.video.display_name(),
        audio = plan.profile.audio.display_name(),
        "render plan ready"
    );

    Ok(plan)
}

fn source_id_for(path: &Path) -> SourceId {
    SourceId::new(path.to_string_lossy())
}
