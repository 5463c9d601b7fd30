//! `cutover-render` — render planning and pipeline orchestration.
//!
//! This crate sits between the pure timeline math in `cutover-timeline` and
//! whatever actually decodes, blends, and encodes pixels:
//!
//! 1. A [`DurationProbe`] supplies each input's duration.
//! 2. [`plan`] runs the whole computation phase up front — timeline, every
//!    blend curve, the music placement, the format profile — and returns a
//!    [`RenderPlan`] that owns all of it for the run's lifetime.
//! 3. [`RenderPipeline`] hands the plan to a [`Compositor`] on a worker
//!    thread and reports progress over a channel.
//!
//! The plan owning every curve is deliberate: downstream consumers only
//! borrow from it, so no per-transition state can be torn down while the
//! pipeline is still consuming it.

pub mod error;
pub mod pipeline;
pub mod plan;
pub mod probe;

pub use error::RenderError;
pub use pipeline::{
    CompositeError, Compositor, RenderContext, RenderHandle, RenderPipeline, RenderProgress,
};
pub use plan::{plan, MusicCue, RenderConfig, RenderPlan};
pub use probe::{DurationProbe, ProbeError, StaticProbe};
