//! Blend curve generation: the progress-over-time function driving each
//! transition.
//!
//! The curve value is the outgoing clip's visibility: 1.0 means the outgoing
//! clip is fully visible, 0.0 means the incoming clip has fully taken over.
//! Between keyframes the value is linearly interpolated. The wipe pattern
//! itself (selected by [`TransitionSpec::pattern_id`]) is the compositor's
//! concern; this module only guarantees the timing curve.

use cutover_common::TimeNs;

use crate::error::TimelineError;
use crate::types::TransitionSpec;

/// One (time, value) pair on a blend curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CurveKeyframe {
    /// Offset from the start of the transition interval.
    pub time: TimeNs,
    /// Outgoing clip visibility in `[0.0, 1.0]`.
    pub value: f64,
}

/// The blend-progress keyframe curve for a single transition.
///
/// Computed once per transition and consumed by the compositor for the
/// whole transition interval. The plan that produced it must keep it alive
/// until the downstream pipeline has finished with that interval.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendCurve {
    /// Keyframes in ascending time order.
    pub keyframes: Vec<CurveKeyframe>,
}

impl BlendCurve {
    /// Sample the curve at `time`, clamping outside the keyframe range and
    /// linearly interpolating inside it.
    pub fn sample(&self, time: TimeNs) -> f64 {
        let first = self.keyframes.first().expect("curve has keyframes");
        if time <= first.time {
            return first.value;
        }
        let last = self.keyframes.last().expect("curve has keyframes");
        if time >= last.time {
            return last.value;
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if time >= a.time && time < b.time {
                let span = (b.time - a.time).as_nanos() as f64;
                let frac = (time - a.time).as_nanos() as f64 / span;
                return a.value + (b.value - a.value) * frac;
            }
        }
        last.value
    }

    /// `true` for the degenerate single-keyframe curve (instantaneous cut).
    pub fn is_cut(&self) -> bool {
        self.keyframes.len() == 1
    }
}

/// Generate the blend curve for one transition.
///
/// A positive length yields the two-keyframe linear ramp `(0, 1.0)` →
/// `(length, 0.0)`. A zero length yields a single keyframe at full incoming
/// visibility — an instantaneous cut, since the timeline accepts zero-length
/// transitions. A negative length fails with
/// [`TimelineError::InvalidTransition`].
pub fn generate_curve(spec: &TransitionSpec) -> Result<BlendCurve, TimelineError> {
    if spec.length.is_negative() {
        return Err(TimelineError::InvalidTransition {
            length: spec.length,
        });
    }

    if spec.length.is_zero() {
        return Ok(BlendCurve {
            keyframes: vec![CurveKeyframe {
                time: TimeNs::ZERO,
                value: 0.0,
            }],
        });
    }

    Ok(BlendCurve {
        keyframes: vec![
            CurveKeyframe {
                time: TimeNs::ZERO,
                value: 1.0,
            },
            CurveKeyframe {
                time: spec.length,
                value: 0.0,
            },
        ],
    })
}
