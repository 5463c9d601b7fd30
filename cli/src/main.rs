//! `cutover` — assemble video clips into one output file with timed
//! transitions and optional background music.

mod compositor;
mod probe;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use cutover_common::{OutputFormat, TimeNs};
use cutover_render::{plan, MusicCue, RenderConfig, RenderPipeline, RenderProgress};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::compositor::FfmpegCompositor;
use crate::probe::FfprobeDurationProbe;

#[derive(Parser, Debug)]
#[command(name = "cutover", version, about)]
struct Args {
    /// Input clips, in output order.
    #[arg(required = true)]
    clips: Vec<PathBuf>,

    /// Output basename; the format's extension is appended.
    #[arg(short, long, default_value = "transitions")]
    output: PathBuf,

    /// Transition length in seconds (0 for hard cuts).
    #[arg(short = 't', long, default_value_t = 0.5, allow_negative_numbers = true)]
    transition_length: f64,

    /// Wipe pattern selector; negative inverts the pattern.
    #[arg(short = 's', long, default_value_t = -21, allow_negative_numbers = true)]
    style: i32,

    /// Background music file, with an optional comma-separated start
    /// offset in seconds (e.g. `track.ogg,12.5`).
    #[arg(short, long, value_name = "FILE[,OFFSET]")]
    music: Option<String>,

    /// Output format.
    #[arg(short, long, default_value_t = OutputFormat::Ogv)]
    format: OutputFormat,
}

/// Split a `FILE[,OFFSET]` music argument.
fn parse_music_arg(arg: &str) -> anyhow::Result<MusicCue> {
    match arg.rsplit_once(',') {
        Some((path, offset)) => {
            let secs: f64 = offset
                .trim()
                .parse()
                .with_context(|| format!("invalid music offset: {offset:?}"))?;
            Ok(MusicCue {
                path: PathBuf::from(path),
                offset: TimeNs::from_secs(secs),
            })
        }
        None => Ok(MusicCue {
            path: PathBuf::from(arg),
            offset: TimeNs::ZERO,
        }),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = RenderConfig {
        output_base: args.output,
        format: args.format,
        transition_length: TimeNs::from_secs(args.transition_length),
        transition_style: args.style,
        softness: 0,
        music: args.music.as_deref().map(parse_music_arg).transpose()?,
    };

    let plan = plan(&config, &args.clips, &FfprobeDurationProbe)
        .context("failed to plan the render")?;

    let handle = RenderPipeline::start(plan, Box::new(FfmpegCompositor))
        .context("failed to start the render pipeline")?;

    while let Some(update) = handle.recv_progress() {
        match update {
            RenderProgress::Started { total } => info!(%total, "render started"),
            RenderProgress::Position { position, total } => {
                info!(%position, %total, "render progress")
            }
            RenderProgress::Completed { elapsed_secs } => {
                info!(elapsed_secs, "done");
                return Ok(());
            }
            RenderProgress::Failed { error } => bail!("render failed: {error}"),
            RenderProgress::Cancelled => bail!("render cancelled"),
        }
    }

    bail!("render pipeline exited without reporting an outcome")
}
