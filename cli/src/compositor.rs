//! ffmpeg-backed compositor.
//!
//! Translates a [`RenderPlan`] into a single ffmpeg invocation: one chained
//! `xfade` per transition entry (or `concat` for a zero-length cut), the
//! music track trimmed from its offset, and the format profile's codecs.
//! The blend timing comes straight from the plan — each xfade's offset is
//! the transition entry's timeline start and its duration is the span of
//! the entry's blend curve.

use std::ffi::OsString;

use cutover_common::{AudioCodec, SourceId, VideoCodec};
use cutover_render::{CompositeError, Compositor, RenderContext, RenderPlan};
use cutover_timeline::EntryKind;
use duct::cmd;
use tracing::{debug, info};

/// Renders a plan with one generated ffmpeg command.
pub struct FfmpegCompositor;

impl Compositor for FfmpegCompositor {
    fn run(&mut self, plan: &RenderPlan, ctx: &RenderContext) -> Result<(), CompositeError> {
        if ctx.is_cancelled() {
            return Ok(());
        }

        let args = build_args(plan);
        debug!(?args, "ffmpeg invocation");
        info!(output = %plan.output_path.display(), "compositing");

        cmd("ffmpeg", &args)
            .run()
            .map_err(|e| CompositeError(format!("ffmpeg failed: {e}")))?;

        ctx.report_position(plan.total_duration());
        Ok(())
    }
}

/// Map a wipe pattern selector onto an ffmpeg xfade transition name.
///
/// The catalog indices follow the SMPTE wipe numbering the plan's styles
/// use; anything unmapped falls back to a plain crossfade.
fn xfade_name(pattern_id: u32, inverted: bool) -> &'static str {
    match (pattern_id, inverted) {
        (1, false) => "wipeleft",
        (1, true) => "wiperight",
        (2, false) => "wipeup",
        (2, true) => "wipedown",
        (21, false) => "horzopen",
        (21, true) => "horzclose",
        (22, false) => "vertopen",
        (22, true) => "vertclose",
        _ => "fade",
    }
}

fn video_codec_arg(codec: VideoCodec) -> &'static str {
    match codec {
        VideoCodec::Theora => "libtheora",
        VideoCodec::Vp8 => "libvpx",
        VideoCodec::H264 => "libx264",
    }
}

fn audio_codec_arg(codec: AudioCodec) -> &'static str {
    match codec {
        AudioCodec::Vorbis => "libvorbis",
        AudioCodec::Mp3 => "libmp3lame",
    }
}

fn build_args(plan: &RenderPlan) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-hide_banner".into()];

    let clip_sources: Vec<&SourceId> = plan
        .timeline
        .clip_entries()
        .filter_map(|e| match &e.kind {
            EntryKind::Clip(id) => Some(id),
            EntryKind::Transition => None,
        })
        .collect();

    for source in &clip_sources {
        args.push("-i".into());
        args.push(source.0.clone().into());
    }

    let music_input = plan.music.as_ref().map(|track| {
        args.push("-ss".into());
        args.push(format!("{}", track.media_start.as_secs()).into());
        args.push("-i".into());
        args.push(track.source_id.0.clone().into());
        (clip_sources.len(), track)
    });

    let mut filter = String::new();
    let mut prev = "[0:v]".to_string();
    for (i, (entry, spec)) in plan
        .timeline
        .transition_entries()
        .zip(&plan.transitions)
        .enumerate()
    {
        let out = format!("[v{i}]");
        let next = format!("[{}:v]", i + 1);
        if spec.length.is_zero() {
            filter.push_str(&format!("{prev}{next}concat=n=2:v=1:a=0{out};"));
        } else {
            filter.push_str(&format!(
                "{prev}{next}xfade=transition={}:duration={}:offset={}{out};",
                xfade_name(spec.pattern_id(), spec.is_inverted()),
                spec.length.as_secs(),
                entry.start.as_secs(),
            ));
        }
        prev = out;
    }
    // Strip the trailing separator; a single clip needs no filter at all.
    let filter = filter.trim_end_matches(';').to_string();

    if !filter.is_empty() {
        args.push("-filter_complex".into());
        args.push(filter.into());
        args.push("-map".into());
        args.push(prev.clone().into());
    } else {
        args.push("-map".into());
        args.push("0:v".into());
    }

    if let Some((idx, track)) = music_input {
        args.push("-map".into());
        args.push(format!("{idx}:a").into());
        args.push("-t".into());
        args.push(format!("{}", track.duration.as_secs()).into());
        args.push("-c:a".into());
        args.push(audio_codec_arg(plan.profile.audio).into());
    } else {
        args.push("-an".into());
    }

    args.push("-c:v".into());
    args.push(video_codec_arg(plan.profile.video).into());
    args.push(plan.output_path.clone().into());

    args
}
