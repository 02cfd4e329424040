//! # Animation Math
//!
//! Time-based progress helpers shared by every animated piece of the UI.
//! Nothing here owns a timer: callers pass `now` and get a value back, so the
//! presentation layer can sample as often (or as rarely) as it likes.

use std::time::{Duration, Instant};

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
pub fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// A reversible on/off transition.
///
/// The value follows one eased curve. Turning on walks along it forward and
/// turning off walks it backward, so closing is the opening played in reverse.
/// Reversing mid-flight continues from the current point on the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    target: bool,
    /// Linear progress along the curve when the current leg started.
    position: f32,
    started_at: Option<Instant>,
    duration: Duration,
}

impl Transition {
    pub fn new(initial: bool, duration: Duration) -> Self {
        Self {
            target: initial,
            position: if initial { 1.0 } else { 0.0 },
            started_at: None,
            duration,
        }
    }

    pub fn target(&self) -> bool {
        self.target
    }

    /// Retarget the transition. With `animate == false` the value jumps.
    pub fn set(&mut self, target: bool, now: Instant, animate: bool) {
        if target == self.target {
            return;
        }
        self.position = self.progress(now);
        self.target = target;
        self.started_at = animate.then_some(now);
    }

    fn end(&self) -> f32 {
        if self.target { 1.0 } else { 0.0 }
    }

    fn progress(&self, now: Instant) -> f32 {
        let Some(start) = self.started_at else {
            return self.end();
        };
        let step = normalized_progress(now.saturating_duration_since(start), self.duration);
        if self.target {
            (self.position + step).min(1.0)
        } else {
            (self.position - step).max(0.0)
        }
    }

    /// Current value in `[0, 1]`; 1.0 means fully "on".
    pub fn value(&self, now: Instant) -> f32 {
        ease_out_cubic(self.progress(now))
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.started_at.is_none() || self.progress(now) == self.end()
    }
}
