//! # Responsive Navigation
//!
//! The navbar's behaviour: a Closed/Open menu state machine, scroll-aware
//! elevation, the staggered link reveal and the call-to-action controls.
//!
//! ```text
//!            toggle / open
//!   Closed ─────────────────▶ Open      (acquire scroll lock,
//!     ▲                        │          mount overlay CTA)
//!     └────────────────────────┘
//!      toggle / close / select item / backdrop / navigate
//!                                       (release scroll lock,
//!                                        unmount overlay CTA)
//! ```
//!
//! The scroll lock is held exactly while the menu is Open: the guard lives in
//! `lock_guard` and is dropped on every path back to Closed (including drop of
//! the whole `Navigation`).
//!
//! Closing is immediate for state purposes. The overlay keeps playing its
//! exit transition afterwards and is removed from presentation once it
//! settles; see [`Navigation::overlay_present`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::animation::{Transition, ease_out_cubic, normalized_progress};
use crate::core::control::{
    ActivateCallback, ActivationEvent, ControlConfig, ControlId, InteractiveControl, RippleId,
};
use crate::core::motion::{SharedMotion, timing};
use crate::core::router::Router;
use crate::core::scroll::{ScrollSignal, ScrollTracker, Viewport};
use crate::core::scroll_lock::{ScrollLock, ScrollLockGuard};
use crate::core::style::{Size, Variant};

/// Call-to-action in the horizontal link row.
pub const NAV_CTA: ControlId = ControlId(1);
/// Call-to-action at the bottom of the overlay panel.
pub const MENU_CTA: ControlId = ControlId(2);

/// Default layout breakpoint, in terminal columns.
pub const DEFAULT_BREAKPOINT: u16 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigationItem {
    pub label: String,
    pub path: String,
}

impl NavigationItem {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

pub fn default_items() -> Vec<NavigationItem> {
    vec![
        NavigationItem::new("Home", "/"),
        NavigationItem::new("Services", "/services"),
        NavigationItem::new("Our Projects", "/our-projects"),
        NavigationItem::new("About", "/about"),
        NavigationItem::new("Blog", "/blog"),
        NavigationItem::new("Contact", "/contact"),
    ]
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub control: ControlConfig,
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            label: "Contact Us".to_string(),
            path: "/contact".to_string(),
            control: ControlConfig {
                variant: Variant::Primary,
                size: Size::Md,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Stateless responsive rule: which affordance the bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full horizontal link row, no menu toggle.
    Full,
    /// Menu toggle only.
    Compact,
}

pub fn layout_mode(width: u16, breakpoint: u16) -> LayoutMode {
    if width <= breakpoint {
        LayoutMode::Compact
    } else {
        LayoutMode::Full
    }
}

#[derive(Debug, Clone)]
pub struct NavigationConfig {
    pub items: Vec<NavigationItem>,
    pub cta: CallToAction,
    pub breakpoint: u16,
    pub scroll_threshold: u16,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            items: default_items(),
            cta: CallToAction::default(),
            breakpoint: DEFAULT_BREAKPOINT,
            scroll_threshold: crate::core::scroll::SCROLL_THRESHOLD,
        }
    }
}

/// Invoked when either call-to-action control activates.
pub type CtaHandler = Arc<dyn Fn(&ActivationEvent) + Send + Sync>;

pub struct Navigation {
    items: Vec<NavigationItem>,
    cta: CallToAction,
    breakpoint: u16,
    menu: MenuState,
    scroll_lock: ScrollLock,
    lock_guard: Option<ScrollLockGuard>,
    tracker: ScrollTracker,
    motion: SharedMotion,
    on_cta: Option<CtaHandler>,
    bar_cta: InteractiveControl,
    menu_cta: Option<InteractiveControl>,
    overlay: Transition,
    elevation: Transition,
    mounted_at: Instant,
    opened_at: Option<Instant>,
}

impl Navigation {
    pub fn new(
        config: NavigationConfig,
        motion: SharedMotion,
        viewport: &Viewport,
        scroll_lock: ScrollLock,
        on_cta: Option<CtaHandler>,
        now: Instant,
    ) -> Self {
        let tracker = ScrollTracker::new(viewport.subscribe(), config.scroll_threshold);
        let elevation = Transition::new(tracker.signal().scrolled, timing::BAR_ELEVATION);

        let mut bar_cta = InteractiveControl::new(
            NAV_CTA,
            config.cta.label.clone(),
            config.cta.control.clone(),
            motion.clone(),
            now,
        );
        if let Some(callback) = cta_callback(&on_cta) {
            bar_cta = bar_cta.with_on_activate(callback);
        }

        Self {
            items: config.items,
            cta: config.cta,
            breakpoint: config.breakpoint,
            menu: MenuState::Closed,
            scroll_lock,
            lock_guard: None,
            tracker,
            motion,
            on_cta,
            bar_cta,
            menu_cta: None,
            overlay: Transition::new(false, timing::OVERLAY),
            elevation,
            mounted_at: now,
            opened_at: None,
        }
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    pub fn cta(&self) -> &CallToAction {
        &self.cta
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    pub fn is_open(&self) -> bool {
        self.menu == MenuState::Open
    }

    pub fn layout_mode(&self, width: u16) -> LayoutMode {
        layout_mode(width, self.breakpoint)
    }

    pub fn toggle_glyph(&self) -> &'static str {
        match self.menu {
            MenuState::Closed => "☰",
            MenuState::Open => "✕",
        }
    }

    fn reduced_motion(&self) -> bool {
        self.motion.prefers_reduced_motion()
    }

    // ------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------

    /// Flip the menu. Returns the control unmounted by a close, if any.
    pub fn toggle(&mut self, now: Instant) -> Option<ControlId> {
        match self.menu {
            MenuState::Closed => {
                self.open(now);
                None
            }
            MenuState::Open => self.close(now),
        }
    }

    pub fn open(&mut self, now: Instant) {
        if self.menu == MenuState::Open {
            return;
        }
        self.menu = MenuState::Open;
        if self.lock_guard.is_none() {
            self.lock_guard = Some(self.scroll_lock.acquire());
        }
        self.overlay.set(true, now, !self.reduced_motion());
        self.opened_at = Some(now);
        self.menu_cta = Some(self.mount_menu_cta(now));
        info!("Menu opened");
    }

    /// Close the menu and release the scroll lock.
    ///
    /// Returns the overlay control that was unmounted; any timer armed for
    /// it must be cancelled by the caller.
    pub fn close(&mut self, now: Instant) -> Option<ControlId> {
        self.lock_guard = None;
        if self.menu == MenuState::Closed {
            return None;
        }
        self.menu = MenuState::Closed;
        self.overlay.set(false, now, !self.reduced_motion());
        let unmounted = self.menu_cta.take().map(|mut control| {
            control.teardown();
            control.id()
        });
        info!("Menu closed");
        unmounted
    }

    /// Navigate to an item's path; closes the menu afterwards if it was open.
    pub fn select_item(
        &mut self,
        index: usize,
        router: &mut dyn Router,
        now: Instant,
    ) -> Option<ControlId> {
        let Some(path) = self.items.get(index).map(|item| item.path.clone()) else {
            debug!("Ignoring selection of missing item {index}");
            return None;
        };
        self.navigate_to(&path, router, now)
    }

    pub fn navigate_to(
        &mut self,
        path: &str,
        router: &mut dyn Router,
        now: Instant,
    ) -> Option<ControlId> {
        router.navigate(path);
        if self.is_open() { self.close(now) } else { None }
    }

    fn mount_menu_cta(&self, now: Instant) -> InteractiveControl {
        let config = ControlConfig {
            size: Size::Lg,
            full_width: true,
            ..self.cta.control.clone()
        };
        let control = InteractiveControl::new(
            MENU_CTA,
            self.cta.label.clone(),
            config,
            self.motion.clone(),
            now,
        );
        match cta_callback(&self.on_cta) {
            Some(callback) => control.with_on_activate(callback),
            None => control,
        }
    }

    // ------------------------------------------------------------------
    // Scroll-aware styling
    // ------------------------------------------------------------------

    /// Pull the latest scroll notification. Returns the new signal when the
    /// threshold was crossed.
    pub fn on_scroll(&mut self, now: Instant) -> Option<bool> {
        let scrolled = self.tracker.sync()?;
        self.elevation.set(scrolled, now, true);
        Some(scrolled)
    }

    pub fn scroll_signal(&self) -> ScrollSignal {
        self.tracker.signal()
    }

    /// Blend factor between the resting (0.0) and elevated (1.0) bar style.
    pub fn elevation(&self, now: Instant) -> f32 {
        self.elevation.value(now)
    }

    // ------------------------------------------------------------------
    // Reveal and overlay presentation
    // ------------------------------------------------------------------

    pub fn reveal_delay(index: usize) -> Duration {
        timing::REVEAL_STAGGER * u32::try_from(index).unwrap_or(u32::MAX)
    }

    pub fn reveal_delays(&self) -> Vec<Duration> {
        (0..self.items.len()).map(Self::reveal_delay).collect()
    }

    /// Reveal progress of a link in the horizontal row (staggered from mount).
    pub fn row_reveal(&self, index: usize, now: Instant) -> f32 {
        self.reveal(index, self.mounted_at, now)
    }

    /// Reveal progress of a link in the overlay (staggered from the last open).
    pub fn overlay_reveal(&self, index: usize, now: Instant) -> f32 {
        self.reveal(index, self.opened_at.unwrap_or(self.mounted_at), now)
    }

    fn reveal(&self, index: usize, since: Instant, now: Instant) -> f32 {
        if self.reduced_motion() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(since);
        match elapsed.checked_sub(Self::reveal_delay(index)) {
            None => 0.0,
            Some(running) => ease_out_cubic(normalized_progress(running, timing::REVEAL)),
        }
    }

    /// Shared visibility of backdrop and panel, 0.0 (gone) to 1.0 (shown).
    pub fn overlay_visibility(&self, now: Instant) -> f32 {
        self.overlay.value(now)
    }

    /// Whether the overlay belongs in the presentation tree at all.
    pub fn overlay_present(&self, now: Instant) -> bool {
        self.is_open() || !self.overlay.is_settled(now)
    }

    pub fn logo_opacity(&self, now: Instant) -> f32 {
        if self.reduced_motion() {
            return 1.0;
        }
        normalized_progress(now.saturating_duration_since(self.mounted_at), timing::LOGO_FADE)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        let reveal_window = Self::reveal_delay(self.items.len()) + timing::REVEAL;
        let revealing = |since: Instant| now.saturating_duration_since(since) < reveal_window;

        !self.overlay.is_settled(now)
            || !self.elevation.is_settled(now)
            || revealing(self.mounted_at)
            || (self.is_open() && self.opened_at.is_some_and(revealing))
            || self.bar_cta.is_animating(now)
            || self.menu_cta.as_ref().is_some_and(|c| c.is_animating(now))
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    pub fn bar_cta(&self) -> &InteractiveControl {
        &self.bar_cta
    }

    pub fn menu_cta(&self) -> Option<&InteractiveControl> {
        self.menu_cta.as_ref()
    }

    pub fn control(&self, id: ControlId) -> Option<&InteractiveControl> {
        match id {
            NAV_CTA => Some(&self.bar_cta),
            MENU_CTA => self.menu_cta.as_ref(),
            _ => None,
        }
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut InteractiveControl> {
        match id {
            NAV_CTA => Some(&mut self.bar_cta),
            MENU_CTA => self.menu_cta.as_mut(),
            _ => None,
        }
    }

    pub fn index_of_path(&self, path: &str) -> Option<usize> {
        self.items.iter().position(|item| item.path == path)
    }

    /// End of lifecycle: releases the scroll subscription and the lock and
    /// tears down both controls. Returns the ids of the torn-down controls.
    pub fn teardown(&mut self) -> Vec<ControlId> {
        self.tracker.release();
        self.lock_guard = None;
        self.menu = MenuState::Closed;

        let mut torn_down = Vec::with_capacity(2);
        self.bar_cta.teardown();
        torn_down.push(self.bar_cta.id());
        if let Some(mut control) = self.menu_cta.take() {
            control.teardown();
            torn_down.push(control.id());
        }
        info!("Navigation torn down");
        torn_down
    }

    pub fn expire_ripple(&mut self, control: ControlId, ripple: RippleId) -> bool {
        self.control_mut(control)
            .is_some_and(|c| c.expire_ripple(ripple))
    }
}

fn cta_callback(handler: &Option<CtaHandler>) -> Option<ActivateCallback> {
    handler.clone().map(|handler| {
        Box::new(move |event: &ActivationEvent| handler(event)) as ActivateCallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::router::HistoryRouter;
    use crate::core::scroll::Viewport;
    use crate::test_support::fixed_motion;

    struct Fixture {
        nav: Navigation,
        viewport: Viewport,
        lock: ScrollLock,
        start: Instant,
    }

    fn fixture(reduced: bool) -> Fixture {
        let lock = ScrollLock::new();
        let mut viewport = Viewport::new(lock.clone());
        viewport.set_extent(300, 20);
        let start = Instant::now();
        let nav = Navigation::new(
            NavigationConfig::default(),
            fixed_motion(reduced),
            &viewport,
            lock.clone(),
            None,
            start,
        );
        Fixture {
            nav,
            viewport,
            lock,
            start,
        }
    }

    #[test]
    fn test_starts_closed_and_unlocked() {
        let f = fixture(false);
        assert_eq!(f.nav.menu_state(), MenuState::Closed);
        assert!(!f.lock.is_locked());
        assert!(f.nav.menu_cta().is_none());
        assert_eq!(f.nav.toggle_glyph(), "☰");
    }

    #[test]
    fn test_toggle_alternates_and_tracks_lock() {
        let mut f = fixture(false);
        for round in 0..4 {
            f.nav.toggle(f.start);
            let open = round % 2 == 0;
            assert_eq!(f.nav.is_open(), open);
            assert_eq!(f.lock.is_locked(), open);
        }
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let mut f = fixture(false);
        f.nav.open(f.start);
        f.nav.open(f.start);
        assert!(f.lock.is_locked());
        assert!(f.nav.menu_cta().is_some());

        assert_eq!(f.nav.close(f.start), Some(MENU_CTA));
        assert_eq!(f.nav.close(f.start), None);
        assert!(!f.lock.is_locked());
        assert_eq!(f.nav.menu_state(), MenuState::Closed);
    }

    #[test]
    fn test_select_while_open_navigates_then_closes() {
        let mut f = fixture(false);
        let mut router = HistoryRouter::new("/");
        f.nav.open(f.start);

        let unmounted = f.nav.select_item(1, &mut router, f.start);

        assert_eq!(router.current(), "/services");
        assert_eq!(unmounted, Some(MENU_CTA));
        assert_eq!(f.nav.menu_state(), MenuState::Closed);
        assert!(!f.lock.is_locked());
    }

    #[test]
    fn test_select_while_closed_only_navigates() {
        let mut f = fixture(false);
        let mut router = HistoryRouter::new("/");
        assert_eq!(f.nav.select_item(4, &mut router, f.start), None);
        assert_eq!(router.current(), "/blog");
        assert!(!f.nav.is_open());
    }

    #[test]
    fn test_select_missing_item_is_ignored() {
        let mut f = fixture(false);
        let mut router = HistoryRouter::new("/");
        f.nav.open(f.start);
        assert_eq!(f.nav.select_item(42, &mut router, f.start), None);
        assert!(f.nav.is_open());
        assert_eq!(router.current(), "/");
    }

    #[test]
    fn test_layout_mode_switches_at_breakpoint() {
        let f = fixture(false);
        assert_eq!(f.nav.layout_mode(80), LayoutMode::Compact);
        assert_eq!(f.nav.layout_mode(DEFAULT_BREAKPOINT), LayoutMode::Compact);
        assert_eq!(f.nav.layout_mode(DEFAULT_BREAKPOINT + 1), LayoutMode::Full);
    }

    #[test]
    fn test_reveal_delays_are_staggered_by_index() {
        let f = fixture(false);
        let delays: Vec<u64> = f.nav.reveal_delays().iter().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![0, 100, 200, 300, 400, 500]);
    }

    #[test]
    fn test_overlay_reveal_restarts_on_each_open() {
        let mut f = fixture(false);
        let second_open = f.start + Duration::from_secs(5);
        f.nav.open(f.start);
        f.nav.close(f.start + Duration::from_secs(1));
        f.nav.open(second_open);

        assert_eq!(f.nav.overlay_reveal(2, second_open + Duration::from_millis(150)), 0.0);
        let running = f.nav.overlay_reveal(2, second_open + Duration::from_millis(450));
        assert!(running > 0.0 && running < 1.0);
        assert_eq!(f.nav.overlay_reveal(2, second_open + Duration::from_millis(700)), 1.0);
    }

    #[test]
    fn test_reduced_motion_reveals_immediately() {
        let f = fixture(true);
        assert_eq!(f.nav.row_reveal(5, f.start), 1.0);
        assert_eq!(f.nav.logo_opacity(f.start), 1.0);
    }

    #[test]
    fn test_overlay_stays_present_until_exit_settles() {
        let mut f = fixture(false);
        f.nav.open(f.start);
        let closed_at = f.start + Duration::from_secs(1);
        f.nav.close(closed_at);

        assert!(f.nav.overlay_present(closed_at + Duration::from_millis(100)));
        assert!(!f.nav.overlay_present(closed_at + timing::OVERLAY));
        assert_eq!(f.nav.overlay_visibility(closed_at + timing::OVERLAY), 0.0);
    }

    #[test]
    fn test_reduced_motion_overlay_removed_immediately() {
        let mut f = fixture(true);
        f.nav.open(f.start);
        assert_eq!(f.nav.overlay_visibility(f.start), 1.0);
        f.nav.close(f.start);
        assert!(!f.nav.overlay_present(f.start));
    }

    #[test]
    fn test_scroll_elevates_bar_smoothly() {
        let mut f = fixture(false);
        f.viewport.scroll_to(120);
        let at = f.start + Duration::from_secs(1);

        assert_eq!(f.nav.on_scroll(at), Some(true));
        assert!(f.nav.scroll_signal().scrolled);
        let mid = f.nav.elevation(at + Duration::from_millis(100));
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(f.nav.elevation(at + timing::BAR_ELEVATION), 1.0);

        f.viewport.scroll_to(80);
        assert_eq!(f.nav.on_scroll(at), None);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut f = fixture(false);
        f.nav.open(f.start);
        assert_eq!(f.viewport.listener_count(), 1);

        let torn_down = f.nav.teardown();

        assert_eq!(torn_down, vec![NAV_CTA, MENU_CTA]);
        assert_eq!(f.viewport.listener_count(), 0);
        assert!(!f.lock.is_locked());
        assert!(!f.nav.bar_cta().is_alive());
    }

    #[test]
    fn test_dropping_open_navigation_releases_lock() {
        let mut f = fixture(false);
        f.nav.open(f.start);
        assert!(f.lock.is_locked());
        drop(f.nav);
        assert!(!f.lock.is_locked());
    }

    #[test]
    fn test_menu_cta_is_large_and_full_width() {
        let mut f = fixture(false);
        f.nav.open(f.start);
        let cta = f.nav.menu_cta().unwrap();
        assert_eq!(cta.config().size, Size::Lg);
        assert!(cta.config().full_width);
        assert_eq!(cta.label(), "Contact Us");
    }
}
