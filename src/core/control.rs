//! # Interactive Control
//!
//! The button abstraction: activation gating, ripple feedback and motion
//! profile selection. Rendering lives in the TUI adapter; this module only
//! decides *what* should be shown.
//!
//! ## Activation
//!
//! ```text
//! activate(event)
//!   ├── inert (disabled || loading)?  → prevent default, stop
//!   ├── reduced motion?               → no ripple
//!   │   otherwise                     → evict old ripple, install new one,
//!   │                                   ask caller to schedule its removal
//!   └── on_activate(event), if set
//! ```
//!
//! The inert check runs first and to completion, so nothing observable
//! happens for an activation that arrives while the control is inert.
//!
//! ## Ripple as state
//!
//! A ripple is a plain [`RippleInstance`] value. At most one exists per
//! control; presentation draws it if present. Removal is driven by a one-shot
//! timer the caller schedules from the returned [`RippleTimer`]; a timer for an
//! already-evicted ripple finds a different id and does nothing.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::animation::{ease_out_cubic, normalized_progress};
use crate::core::motion::{CONTROL_MOTION, InteractiveMotion, SharedMotion, timing};
use crate::core::style::{Size, Variant};

/// Identifies a control instance for timer routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u32);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control#{}", self.0)
    }
}

/// Submit discriminator, carried through for form-like hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl From<String> for ButtonType {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "submit" => ButtonType::Submit,
            "reset" => ButtonType::Reset,
            _ => ButtonType::Button,
        }
    }
}

impl From<ButtonType> for String {
    fn from(kind: ButtonType) -> Self {
        match kind {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AriaAttributes {
    pub label: Option<String>,
    pub described_by: Option<String>,
    pub expanded: Option<bool>,
    pub pressed: Option<bool>,
    pub role: Option<String>,
}

/// Everything a host can configure on a control.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlConfig {
    pub variant: Variant,
    pub size: Size,
    pub full_width: bool,
    pub disabled: bool,
    pub loading: bool,
    #[serde(rename = "type")]
    pub kind: ButtonType,
    pub aria: AriaAttributes,
}

impl ControlConfig {
    pub fn interaction(&self) -> InteractionState {
        InteractionState {
            disabled: self.disabled,
            loading: self.loading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub disabled: bool,
    pub loading: bool,
}

impl InteractionState {
    pub fn effective_disabled(&self) -> bool {
        self.disabled || self.loading
    }
}

/// Control rectangle in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKey {
    Enter,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationSource {
    Pointer { x: f32, y: f32 },
    Keyboard(ActivationKey),
}

/// An input event that may activate a control.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationEvent {
    pub source: ActivationSource,
    default_prevented: bool,
}

impl ActivationEvent {
    pub fn pointer(x: f32, y: f32) -> Self {
        Self {
            source: ActivationSource::Pointer { x, y },
            default_prevented: false,
        }
    }

    pub fn key(key: ActivationKey) -> Self {
        Self {
            source: ActivationSource::Keyboard(key),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        match self.source {
            ActivationSource::Pointer { x, y } => Some((x, y)),
            ActivationSource::Keyboard(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RippleId(pub u64);

/// One live ripple. Origin is control-local and already offset by the
/// radius, so the circle is centred on the activation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleInstance {
    pub id: RippleId,
    pub origin_x: f32,
    pub origin_y: f32,
    pub diameter: f32,
    pub created_at: Instant,
}

impl RippleInstance {
    fn at(id: RippleId, bounds: Bounds, x: f32, y: f32, now: Instant) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        let diameter = bounds.width.max(bounds.height);
        let radius = diameter / 2.0;
        Some(Self {
            id,
            origin_x: x - bounds.x - radius,
            origin_y: y - bounds.y - radius,
            diameter,
            created_at: now,
        })
    }

    /// Control-local centre of the ripple.
    pub fn center(&self) -> (f32, f32) {
        let radius = self.diameter / 2.0;
        (self.origin_x + radius, self.origin_y + radius)
    }

    pub fn progress(&self, now: Instant) -> f32 {
        normalized_progress(now.saturating_duration_since(self.created_at), timing::RIPPLE)
    }

    /// Radius currently drawn: grows from 0 to `RIPPLE_MAX_SCALE` times the
    /// resting radius.
    pub fn radius_at(&self, now: Instant) -> f32 {
        self.diameter / 2.0 * timing::RIPPLE_MAX_SCALE * ease_out_cubic(self.progress(now))
    }

    pub fn opacity_at(&self, now: Instant) -> f32 {
        1.0 - self.progress(now)
    }
}

/// Request to remove a ripple once `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleTimer {
    pub control: ControlId,
    pub ripple: RippleId,
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    /// The control was inert; default behaviour was prevented.
    Suppressed,
    /// The control has been torn down and ignores input.
    Defunct,
    Activated { ripple_timer: Option<RippleTimer> },
}

impl ActivationOutcome {
    pub fn ripple_timer(&self) -> Option<RippleTimer> {
        match self {
            ActivationOutcome::Activated { ripple_timer } => *ripple_timer,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRegion {
    Polite,
}

/// Busy indicator shown in place of the label while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyIndicator {
    pub text: &'static str,
    pub aria_label: &'static str,
    pub live: LiveRegion,
}

pub const BUSY_INDICATOR: BusyIndicator = BusyIndicator {
    text: "Loading...",
    aria_label: "Loading",
    live: LiveRegion::Polite,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlContent<'a> {
    Label(&'a str),
    Busy(BusyIndicator),
}

pub type ActivateCallback = Box<dyn FnMut(&ActivationEvent) + Send>;

pub struct InteractiveControl {
    id: ControlId,
    label: String,
    config: ControlConfig,
    motion: SharedMotion,
    on_activate: Option<ActivateCallback>,
    bounds: Option<Bounds>,
    ripple: Option<RippleInstance>,
    ripple_seq: u64,
    mounted_at: Instant,
    alive: bool,
}

impl fmt::Debug for InteractiveControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveControl")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("config", &self.config)
            .field("has_callback", &self.on_activate.is_some())
            .field("bounds", &self.bounds)
            .field("ripple", &self.ripple)
            .field("alive", &self.alive)
            .finish()
    }
}

impl InteractiveControl {
    pub fn new(
        id: ControlId,
        label: impl Into<String>,
        config: ControlConfig,
        motion: SharedMotion,
        now: Instant,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            config,
            motion,
            on_activate: None,
            bounds: None,
            ripple: None,
            ripple_seq: 0,
            mounted_at: now,
            alive: true,
        }
    }

    pub fn with_on_activate(mut self, callback: ActivateCallback) -> Self {
        self.on_activate = Some(callback);
        self
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Replace the configuration (the only way interaction state changes).
    pub fn set_config(&mut self, config: ControlConfig) {
        self.config = config;
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_inert(&self) -> bool {
        self.config.interaction().effective_disabled()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// -1 removes the control from keyboard focus order.
    pub fn tab_index(&self) -> i8 {
        if self.is_inert() { -1 } else { 0 }
    }

    pub fn ripple(&self) -> Option<&RippleInstance> {
        self.ripple.as_ref()
    }

    pub fn content(&self) -> ControlContent<'_> {
        if self.config.loading {
            ControlContent::Busy(BUSY_INDICATOR)
        } else {
            ControlContent::Label(&self.label)
        }
    }

    /// Where a screen reader would announce this control, if anywhere.
    pub fn live_region(&self) -> Option<LiveRegion> {
        match self.content() {
            ControlContent::Busy(busy) => Some(busy.live),
            ControlContent::Label(_) => None,
        }
    }

    /// Spoken form of the control: name, role, then state.
    ///
    /// `"Open contact form, button, collapsed"`, or `"Loading, button, busy"`
    /// while loading.
    pub fn accessible_description(&self) -> String {
        let aria = &self.config.aria;
        let name = match self.content() {
            ControlContent::Busy(busy) => busy.aria_label,
            ControlContent::Label(label) => aria.label.as_deref().unwrap_or(label),
        };
        let mut parts = vec![name, aria.role.as_deref().unwrap_or("button")];
        if self.config.loading {
            parts.push("busy");
        }
        if self.config.disabled {
            parts.push("disabled");
        }
        match aria.expanded {
            Some(true) => parts.push("expanded"),
            Some(false) => parts.push("collapsed"),
            None => {}
        }
        match aria.pressed {
            Some(true) => parts.push("pressed"),
            Some(false) => parts.push("not pressed"),
            None => {}
        }
        if let Some(description) = aria.described_by.as_deref() {
            parts.push(description);
        }
        parts.join(", ")
    }

    /// Interactive motion profile, or `None` to render statically.
    /// Evaluated on every call.
    pub fn motion_profile(&self) -> Option<&'static InteractiveMotion> {
        if self.is_inert() || self.motion.prefers_reduced_motion() {
            None
        } else {
            Some(&CONTROL_MOTION)
        }
    }

    /// Vertical offset of the one-shot mount bob (`0 → lift → 0`).
    pub fn idle_lift(&self, now: Instant) -> f32 {
        let Some(profile) = self.motion_profile() else {
            return 0.0;
        };
        let t = normalized_progress(
            now.saturating_duration_since(self.mounted_at),
            profile.idle.settle,
        );
        // Triangle keyframes 0 → peak → 0
        let shape = 1.0 - (2.0 * t - 1.0).abs();
        profile.idle.lift * shape
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        let bobbing = self.motion_profile().is_some()
            && now.saturating_duration_since(self.mounted_at) < timing::IDLE_BOB;
        self.ripple.is_some() || bobbing
    }

    pub fn activate(&mut self, event: &mut ActivationEvent, now: Instant) -> ActivationOutcome {
        if !self.alive {
            debug!("{} is torn down, ignoring activation", self.id);
            return ActivationOutcome::Defunct;
        }

        if self.is_inert() {
            event.prevent_default();
            debug!("{} is inert, activation suppressed", self.id);
            return ActivationOutcome::Suppressed;
        }

        let ripple_timer = if self.motion.prefers_reduced_motion() {
            None
        } else {
            self.install_ripple(event, now)
        };

        if let Some(callback) = self.on_activate.as_mut() {
            callback(event);
        }

        ActivationOutcome::Activated { ripple_timer }
    }

    /// Enter/Space: same path as a pointer activation, default suppressed.
    pub fn handle_key(&mut self, key: ActivationKey, now: Instant) -> ActivationOutcome {
        let mut event = ActivationEvent::key(key);
        event.prevent_default();
        self.activate(&mut event, now)
    }

    fn install_ripple(&mut self, event: &ActivationEvent, now: Instant) -> Option<RippleTimer> {
        let (x, y) = event.pointer_position()?;
        let bounds = self.bounds?;
        let id = RippleId(self.ripple_seq + 1);
        let ripple = RippleInstance::at(id, bounds, x, y, now)?;
        self.ripple_seq += 1;

        if let Some(evicted) = self.ripple.replace(ripple) {
            debug!("{} evicted ripple {:?}", self.id, evicted.id);
        }
        debug!("{} installed ripple {:?}", self.id, id);

        Some(RippleTimer {
            control: self.id,
            ripple: id,
            after: timing::RIPPLE,
        })
    }

    /// Timer callback. Only removes the ripple the timer was armed for.
    pub fn expire_ripple(&mut self, id: RippleId) -> bool {
        match self.ripple {
            Some(ripple) if ripple.id == id => {
                self.ripple = None;
                debug!("{} ripple {:?} expired", self.id, id);
                true
            }
            _ => false,
        }
    }

    /// End of lifecycle: drops the ripple and callback. Returns the ripple
    /// whose removal timer must be cancelled, if one was pending.
    pub fn teardown(&mut self) -> Option<RippleId> {
        self.alive = false;
        self.on_activate = None;
        let pending = self.ripple.take().map(|r| r.id);
        debug!("{} torn down (pending ripple: {:?})", self.id, pending);
        pending
    }
}
