//! # Application State
//!
//! Core state for navkit. This module contains interaction logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── navigation: Navigation        // menu state machine, CTAs, elevation
//! ├── viewport: Viewport            // page scroll offset (watch channel)
//! ├── router: HistoryRouter         // current path + history
//! ├── motion: Arc<MotionSettings>   // live reduced-motion preference
//! ├── scroll_lock: ScrollLock       // held while the menu is open
//! ├── showcase: Vec<InteractiveControl>
//! ├── status_message: String        // status bar text
//! └── width / height                // last known terminal size
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::{Arc, mpsc};
use std::time::Instant;

use log::warn;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::control::{ActivationEvent, ControlConfig, ControlId, InteractiveControl, RippleId};
use crate::core::motion::{MotionSettings, SharedMotion};
use crate::core::navigation::{CtaHandler, MENU_CTA, NAV_CTA, Navigation};
use crate::core::router::{HistoryRouter, Router};
use crate::core::scroll::Viewport;
use crate::core::scroll_lock::ScrollLock;
use crate::core::style::Variant;

/// First id handed to showcase controls; lower ids belong to the navbar.
pub const SHOWCASE_BASE_ID: u32 = 10;

pub struct App {
    pub navigation: Navigation,
    pub viewport: Viewport,
    pub router: HistoryRouter,
    pub motion: Arc<MotionSettings>,
    pub scroll_lock: ScrollLock,
    pub showcase: Vec<InteractiveControl>,
    pub status_message: String,
    pub width: u16,
    pub height: u16,
}

impl App {
    /// Build the app. Control callbacks report back through `tx`.
    pub fn from_config(config: &ResolvedConfig, tx: mpsc::Sender<Action>, now: Instant) -> Self {
        let motion = Arc::new(match config.reduced_motion {
            Some(reduced) => MotionSettings::forced(reduced),
            None => MotionSettings::system(),
        });
        let shared: SharedMotion = motion.clone();

        let scroll_lock = ScrollLock::new();
        let viewport = Viewport::new(scroll_lock.clone());

        let cta_path = config.navigation.cta.path.clone();
        let cta_tx = tx.clone();
        let on_cta: CtaHandler = Arc::new(move |_event: &ActivationEvent| {
            if cta_tx.send(Action::Navigate(cta_path.clone())).is_err() {
                warn!("Failed to send CTA navigation: receiver dropped");
            }
        });

        let navigation = Navigation::new(
            config.navigation.clone(),
            shared.clone(),
            &viewport,
            scroll_lock.clone(),
            Some(on_cta),
            now,
        );

        Self {
            navigation,
            viewport,
            router: HistoryRouter::new(config.initial_path.clone()),
            motion,
            scroll_lock,
            showcase: build_showcase(&shared, &tx, now),
            status_message: String::from("Welcome to navkit! Tab to focus, m for menu, q to quit"),
            width: 0,
            height: 0,
        }
    }

    pub fn current_path(&self) -> &str {
        self.router.current()
    }

    pub fn control(&self, id: ControlId) -> Option<&InteractiveControl> {
        if matches!(id, NAV_CTA | MENU_CTA) {
            return self.navigation.control(id);
        }
        self.showcase.iter().find(|c| c.id() == id)
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut InteractiveControl> {
        if matches!(id, NAV_CTA | MENU_CTA) {
            return self.navigation.control_mut(id);
        }
        self.showcase.iter_mut().find(|c| c.id() == id)
    }

    pub fn expire_ripple(&mut self, control: ControlId, ripple: RippleId) -> bool {
        self.control_mut(control)
            .is_some_and(|c| c.expire_ripple(ripple))
    }

    /// Record the measured page extent. A clamped offset can drop back under
    /// the threshold, so the scroll signal is resynced afterwards.
    pub fn measure_page(&mut self, content_height: u16, visible_height: u16, now: Instant) {
        self.viewport.set_extent(content_height, visible_height);
        self.navigation.on_scroll(now);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.navigation.is_animating(now) || self.showcase.iter().any(|c| c.is_animating(now))
    }

    /// Tear down every control and release the scroll subscription and lock.
    pub fn teardown(&mut self) -> Vec<ControlId> {
        let mut torn_down = self.navigation.teardown();
        for control in &mut self.showcase {
            control.teardown();
            torn_down.push(control.id());
        }
        torn_down
    }
}

fn build_showcase(
    motion: &SharedMotion,
    tx: &mpsc::Sender<Action>,
    now: Instant,
) -> Vec<InteractiveControl> {
    let specs = [
        ("Primary", variant(Variant::Primary)),
        ("Secondary", variant(Variant::Secondary)),
        ("Outline", variant(Variant::Outline)),
        ("Ghost", variant(Variant::Ghost)),
        (
            "Saving",
            ControlConfig {
                loading: true,
                ..Default::default()
            },
        ),
        (
            "Unavailable",
            ControlConfig {
                variant: Variant::Secondary,
                disabled: true,
                ..Default::default()
            },
        ),
    ];

    specs
        .into_iter()
        .zip(SHOWCASE_BASE_ID..)
        .map(|((label, config), id)| {
            let tx = tx.clone();
            let message = format!("{label} activated");
            InteractiveControl::new(ControlId(id), label, config, motion.clone(), now)
                .with_on_activate(Box::new(move |_event: &ActivationEvent| {
                    if tx.send(Action::Announce(message.clone())).is_err() {
                        warn!("Failed to send announcement: receiver dropped");
                    }
                }))
        })
        .collect()
}

fn variant(variant: Variant) -> ControlConfig {
    ControlConfig {
        variant,
        ..Default::default()
    }
}
