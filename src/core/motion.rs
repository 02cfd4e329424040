//! # Motion
//!
//! Two things live here:
//!
//! - [`MotionPreference`]: the accessibility query "has the user asked for
//!   reduced motion?". Consumers call it at every decision point; the answer
//!   is never cached, so a change mid-session applies to the next activation.
//! - The motion-profile table: every spring, duration and stagger constant
//!   the UI animates with, keyed by interaction state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use log::info;

/// Environment variable consulted when no explicit preference is forced.
pub const REDUCED_MOTION_ENV: &str = "NAVKIT_REDUCED_MOTION";

/// Accessibility collaborator: is reduced motion requested?
pub trait MotionPreference: Send + Sync {
    fn prefers_reduced_motion(&self) -> bool;
}

pub type SharedMotion = Arc<dyn MotionPreference>;

const FOLLOW_SYSTEM: u8 = 0;
const FORCE_REDUCED: u8 = 1;
const FORCE_FULL: u8 = 2;

/// Process-wide motion setting.
///
/// Follows the environment (`NAVKIT_REDUCED_MOTION`) unless a value has been
/// forced by config, CLI, or the runtime toggle.
#[derive(Debug)]
pub struct MotionSettings {
    forced: AtomicU8,
}

impl MotionSettings {
    /// Follow the environment, re-read on every query.
    pub fn system() -> Self {
        Self {
            forced: AtomicU8::new(FOLLOW_SYSTEM),
        }
    }

    pub fn forced(reduced: bool) -> Self {
        let settings = Self::system();
        settings.set_reduced(reduced);
        settings
    }

    pub fn set_reduced(&self, reduced: bool) {
        let value = if reduced { FORCE_REDUCED } else { FORCE_FULL };
        self.forced.store(value, Ordering::SeqCst);
    }

    /// Flip the current preference and return the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.prefers_reduced_motion();
        self.set_reduced(next);
        info!("Reduced motion {}", if next { "enabled" } else { "disabled" });
        next
    }
}

impl MotionPreference for MotionSettings {
    fn prefers_reduced_motion(&self) -> bool {
        match self.forced.load(Ordering::SeqCst) {
            FORCE_REDUCED => true,
            FORCE_FULL => false,
            _ => env_requests_reduced_motion(),
        }
    }
}

fn env_requests_reduced_motion() -> bool {
    std::env::var(REDUCED_MOTION_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "reduce"
    )
}

// ============================================================================
// Motion profiles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Spring { stiffness: f32, damping: f32 },
    EaseOut,
}

/// One animated pose: where the control goes and how it gets there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Scale factor relative to rest (1.0).
    pub scale: f32,
    /// Vertical offset in distance units; negative lifts the control.
    pub lift: f32,
    /// Approximate settle time, used to decide how long to keep redrawing.
    pub settle: Duration,
    pub easing: Easing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Hover,
    Press,
    Idle,
}

/// The full set of poses an interactive control may animate through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractiveMotion {
    pub hover: MotionProfile,
    pub press: MotionProfile,
    /// Peak of the one-shot bob played on mount.
    pub idle: MotionProfile,
}

impl InteractiveMotion {
    pub fn select(&self, state: MotionState) -> &MotionProfile {
        match state {
            MotionState::Hover => &self.hover,
            MotionState::Press => &self.press,
            MotionState::Idle => &self.idle,
        }
    }
}

pub const CONTROL_MOTION: InteractiveMotion = InteractiveMotion {
    hover: MotionProfile {
        scale: 1.05,
        lift: -3.0,
        settle: Duration::from_millis(150),
        easing: Easing::Spring {
            stiffness: 400.0,
            damping: 10.0,
        },
    },
    press: MotionProfile {
        scale: 0.95,
        lift: 2.0,
        settle: Duration::from_millis(120),
        easing: Easing::Spring {
            stiffness: 500.0,
            damping: 15.0,
        },
    },
    idle: MotionProfile {
        scale: 1.0,
        lift: -3.0,
        settle: timing::IDLE_BOB,
        easing: Easing::EaseOut,
    },
};

/// Named durations for every timed effect in the UI.
pub mod timing {
    use std::time::Duration;

    /// Ripple lifetime; the instance is removed when it elapses.
    pub const RIPPLE: Duration = Duration::from_millis(800);
    /// How many times its own diameter a ripple grows to.
    pub const RIPPLE_MAX_SCALE: f32 = 5.0;
    /// Idle bob played once when a control mounts.
    pub const IDLE_BOB: Duration = Duration::from_millis(300);
    /// Navbar background/shadow swap on crossing the scroll threshold.
    pub const BAR_ELEVATION: Duration = Duration::from_millis(300);
    /// Backdrop and side panel, identical in both directions.
    pub const OVERLAY: Duration = Duration::from_millis(300);
    /// Per-index delay of the staggered link reveal.
    pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);
    /// Length of each link's own reveal once its delay has passed.
    pub const REVEAL: Duration = Duration::from_millis(500);
    pub const LOGO_FADE: Duration = Duration::from_millis(500);
}
