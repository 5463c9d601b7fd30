//! Render pipeline -- hands a finished plan to a compositor on a worker
//! thread and reports progress over a channel.
//!
//! The pipeline does not decode, blend, or encode anything itself; the
//! [`Compositor`] implementation does. What the pipeline guarantees is
//! lifetime and reporting:
//!
//! - the [`RenderPlan`] (and with it every blend curve) is moved onto the
//!   worker thread and dropped only after the compositor returns, so no
//!   transition state disappears mid-run;
//! - progress and the final outcome arrive on a crossbeam channel;
//! - cancellation is a shared flag the compositor polls between steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::{self, Receiver, Sender};
use cutover_common::TimeNs;
use thiserror::Error;
use tracing::info;

use crate::plan::RenderPlan;

/// Failure reported by a compositor implementation.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct CompositeError(pub String);

/// Consumes a render plan and produces the output file.
///
/// Implementations poll [`RenderContext::is_cancelled`] between units of
/// work and may report positions via [`RenderContext::report_position`].
pub trait Compositor: Send {
    fn run(&mut self, plan: &RenderPlan, ctx: &RenderContext) -> Result<(), CompositeError>;
}

/// Progress update from the render pipeline.
#[derive(Clone, Debug)]
pub enum RenderProgress {
    Started { total: TimeNs },
    Position { position: TimeNs, total: TimeNs },
    Completed { elapsed_secs: f64 },
    Failed { error: String },
    Cancelled,
}

impl RenderProgress {
    /// Progress as a fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        match self {
            Self::Started { .. } => 0.0,
            Self::Position { position, total } => {
                if total.as_nanos() > 0 {
                    position.as_nanos() as f64 / total.as_nanos() as f64
                } else {
                    0.0
                }
            }
            Self::Completed { .. } => 1.0,
            Self::Failed { .. } | Self::Cancelled => 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed { .. } | Self::Cancelled
        )
    }
}

/// Handed to the compositor for progress reporting and cancellation checks.
pub struct RenderContext {
    progress_tx: Sender<RenderProgress>,
    cancel_flag: Arc<AtomicBool>,
    total: TimeNs,
}

impl RenderContext {
    pub fn report_position(&self, position: TimeNs) {
        let _ = self.progress_tx.send(RenderProgress::Position {
            position,
            total: self.total,
        });
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }
}

/// Handle for monitoring and controlling an active render.
#[derive(Debug)]
pub struct RenderHandle {
    progress_rx: Receiver<RenderProgress>,
    cancel_flag: Arc<AtomicBool>,
}

impl RenderHandle {
    /// Latest progress update, non-blocking.
    pub fn try_recv_progress(&self) -> Option<RenderProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Next progress update, blocking.
    pub fn recv_progress(&self) -> Option<RenderProgress> {
        self.progress_rx.recv().ok()
    }

    /// Block until the run finishes and return the terminal update.
    pub fn wait(&self) -> Option<RenderProgress> {
        let mut last = None;
        while let Some(update) = self.recv_progress() {
            let finished = update.is_finished();
            last = Some(update);
            if finished {
                break;
            }
        }
        last
    }

    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
        info!("render cancellation requested");
    }
}

/// The render pipeline orchestrator.
pub struct RenderPipeline;

impl RenderPipeline {
    /// Start a render on a worker thread.
    ///
    /// Takes ownership of the plan; it lives on the worker thread for the
    /// whole run and is dropped only after the compositor returns.
    pub fn start(
        plan: RenderPlan,
        mut compositor: Box<dyn Compositor>,
    ) -> std::io::Result<RenderHandle> {
        let (progress_tx, progress_rx) = channel::unbounded::<RenderProgress>();
        let cancel_flag = Arc::new(AtomicBool::new(false));

        let ctx = RenderContext {
            progress_tx: progress_tx.clone(),
            cancel_flag: cancel_flag.clone(),
            total: plan.total_duration(),
        };

        info!(
            output = %plan.output_path.display(),
            total = %plan.total_duration(),
            transitions = plan.transitions.len(),
            "starting render"
        );

        std::thread::Builder::new()
            .name("render-pipeline".to_string())
            .spawn(move || {
                let start_time = std::time::Instant::now();
                let _ = progress_tx.send(RenderProgress::Started {
                    total: plan.total_duration(),
                });

                let outcome = compositor.run(&plan, &ctx);
                let update = match outcome {
                    Ok(()) if ctx.is_cancelled() => RenderProgress::Cancelled,
                    Ok(()) => RenderProgress::Completed {
                        elapsed_secs: start_time.elapsed().as_secs_f64(),
                    },
                    Err(e) => RenderProgress::Failed {
                        error: e.to_string(),
                    },
                };
                let _ = progress_tx.send(update);
                // `plan` (and every curve it owns) is dropped here, after
                // the compositor has finished with it.
                drop(plan);
            })?;

        Ok(RenderHandle {
            progress_rx,
            cancel_flag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{plan, RenderConfig};
    use crate::probe::StaticProbe;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn test_plan() -> RenderPlan {
        let probe = StaticProbe::new()
            .with("a.mp4", TimeNs::SECOND * 10)
            .with("b.mp4", TimeNs::SECOND * 10);
        let config = RenderConfig {
            transition_length: TimeNs::SECOND * 2,
            ..Default::default()
        };
        plan(
            &config,
            &[PathBuf::from("a.mp4"), PathBuf::from("b.mp4")],
            &probe,
        )
        .unwrap()
    }

    /// Compositor that walks the timeline in one-second steps and records
    /// every curve value it samples.
    struct RecordingCompositor {
        samples: Arc<Mutex<Vec<f64>>>,
    }

    impl Compositor for RecordingCompositor {
        fn run(&mut self, plan: &RenderPlan, ctx: &RenderContext) -> Result<(), CompositeError> {
            let total = plan.total_duration();
            let mut t = TimeNs::ZERO;
            while t < total {
                if ctx.is_cancelled() {
                    return Ok(());
                }
                for (entry, curve) in plan.timeline.transition_entries().zip(&plan.curves) {
                    if entry.contains(t) {
                        self.samples.lock().unwrap().push(curve.sample(t - entry.start));
                    }
                }
                ctx.report_position(t);
                t += TimeNs::SECOND;
            }
            Ok(())
        }
    }

    struct FailingCompositor;

    impl Compositor for FailingCompositor {
        fn run(&mut self, _plan: &RenderPlan, _ctx: &RenderContext) -> Result<(), CompositeError> {
            Err(CompositeError("encoder exploded".to_string()))
        }
    }

    #[test]
    fn pipeline_runs_to_completion() {
        let samples = Arc::new(Mutex::new(Vec::new()));
        let compositor = RecordingCompositor {
            samples: samples.clone(),
        };
        let handle = RenderPipeline::start(test_plan(), Box::new(compositor)).unwrap();

        let last = handle.wait().unwrap();
        assert!(matches!(last, RenderProgress::Completed { .. }));
        assert!((last.fraction() - 1.0).abs() < 1e-9);

        // The 2s transition at t=8..10 was sampled at 8s and 9s with curve
        // values 1.0 and 0.5 — the curves were alive for the whole run.
        let samples = samples.lock().unwrap();
        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 1.0).abs() < 1e-9);
        assert!((samples[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn pipeline_reports_failure() {
        let handle = RenderPipeline::start(test_plan(), Box::new(FailingCompositor)).unwrap();
        let last = handle.wait().unwrap();
        match last {
            RenderProgress::Failed { error } => assert!(error.contains("encoder exploded")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_cancellation() {
        let samples = Arc::new(Mutex::new(Vec::new()));
        let compositor = RecordingCompositor {
            samples: samples.clone(),
        };
        let handle = RenderPipeline::start(test_plan(), Box::new(compositor)).unwrap();
        handle.cancel();
        let last = handle.wait().unwrap();
        // Cancelled if the flag was seen in time, Completed if the tiny
        // test plan finished first; either way the run terminates cleanly.
        assert!(last.is_finished());
    }

    #[test]
    fn progress_fraction_midpoint() {
        let update = RenderProgress::Position {
            position: TimeNs::SECOND * 13,
            total: TimeNs::SECOND * 26,
        };
        assert!((update.fraction() - 0.5).abs() < 1e-9);
    }
}
