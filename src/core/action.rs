//! # Actions
//!
//! Everything that can happen in navkit becomes an `Action`.
//! User clicks a nav link? That's `Action::SelectItem(index)`.
//! A ripple timer fires? That's `Action::RippleExpired { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` the
//! adapter must carry out (timers live outside the core).
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Instant;

use log::debug;

use crate::core::control::{ActivationEvent, ControlId, RippleId, RippleTimer};
use crate::core::navigation::LayoutMode;
use crate::core::router::Router;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Resize { width: u16, height: u16 },
    ScrollBy(i32),
    ScrollTo(u16),
    ToggleMenu,
    OpenMenu,
    CloseMenu,
    SelectItem(usize),
    Navigate(String),
    Back,
    Activate { control: ControlId, event: ActivationEvent },
    RippleExpired { control: ControlId, ripple: RippleId },
    ToggleReducedMotion,
    Announce(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    ScheduleRippleRemoval(RippleTimer),
    /// The control was unmounted; drop any timer armed for it.
    CancelRippleRemoval(ControlId),
}

impl From<Option<ControlId>> for Effect {
    fn from(unmounted: Option<ControlId>) -> Self {
        unmounted.map_or(Effect::None, Effect::CancelRippleRemoval)
    }
}

pub fn update(app: &mut App, action: Action, now: Instant) -> Effect {
    match action {
        Action::Resize { width, height } => {
            app.width = width;
            app.height = height;
            // The overlay only exists in the compact layout
            if app.navigation.is_open()
                && app.navigation.layout_mode(width) == LayoutMode::Full
            {
                return app.navigation.close(now).into();
            }
            Effect::None
        }
        Action::ScrollBy(delta) => {
            app.viewport.scroll_by(delta);
            app.navigation.on_scroll(now);
            Effect::None
        }
        Action::ScrollTo(offset) => {
            app.viewport.scroll_to(offset);
            app.navigation.on_scroll(now);
            Effect::None
        }
        Action::ToggleMenu => app.navigation.toggle(now).into(),
        Action::OpenMenu => {
            app.navigation.open(now);
            Effect::None
        }
        Action::CloseMenu => app.navigation.close(now).into(),
        Action::SelectItem(index) => {
            let before = app.router.current().to_string();
            let unmounted = app.navigation.select_item(index, &mut app.router, now);
            reset_scroll_if_moved(app, &before, now);
            unmounted.into()
        }
        Action::Navigate(path) => {
            let before = app.router.current().to_string();
            let unmounted = app.navigation.navigate_to(&path, &mut app.router, now);
            reset_scroll_if_moved(app, &before, now);
            unmounted.into()
        }
        Action::Back => {
            if !app.router.back() {
                return Effect::None;
            }
            let unmounted = app.navigation.close(now);
            reset_scroll(app, now);
            unmounted.into()
        }
        Action::Activate { control, mut event } => {
            let Some(target) = app.control_mut(control) else {
                debug!("Activation for unknown {control}");
                return Effect::None;
            };
            target
                .activate(&mut event, now)
                .ripple_timer()
                .map_or(Effect::None, Effect::ScheduleRippleRemoval)
        }
        Action::RippleExpired { control, ripple } => {
            app.expire_ripple(control, ripple);
            Effect::None
        }
        Action::ToggleReducedMotion => {
            let reduced = app.motion.toggle();
            app.status_message = format!(
                "Reduced motion {}",
                if reduced { "on" } else { "off" }
            );
            Effect::None
        }
        Action::Announce(message) => {
            app.status_message = message;
            Effect::None
        }
        Action::Quit => {
            app.teardown();
            Effect::Quit
        }
    }
}

fn reset_scroll_if_moved(app: &mut App, before: &str, now: Instant) {
    if app.router.current() != before {
        reset_scroll(app, now);
    }
}

/// Back to the top of the page. Runs after the menu has closed so the
/// scroll lock no longer refuses it.
fn reset_scroll(app: &mut App, now: Instant) {
    app.viewport.scroll_to(0);
    app.navigation.on_scroll(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::{ActivationKey, Bounds};
    use crate::core::motion::{MotionPreference, timing};
    use crate::core::navigation::{MENU_CTA, MenuState, NAV_CTA};
    use crate::core::state::SHOWCASE_BASE_ID;
    use crate::test_support::test_app;

    fn sized(app: &mut App, now: Instant) {
        update(
            app,
            Action::Resize {
                width: 80,
                height: 40,
            },
            now,
        );
        app.viewport.set_extent(400, 30);
    }

    #[test]
    fn test_menu_open_blocks_page_scroll() {
        let (mut app, _rx) = test_app();
        let now = Instant::now();
        sized(&mut app, now);

        update(&mut app, Action::ToggleMenu, now);
        assert!(app.scroll_lock.is_locked());
        update(&mut app, Action::ScrollBy(20), now);
        assert_eq!(app.viewport.offset(), 0);

        assert_eq!(update(&mut app, Action::CloseMenu, now), Effect::CancelRippleRemoval(MENU_CTA));
        update(&mut app, Action::ScrollBy(20), now);
        assert_eq!(app.viewport.offset(), 20);
    }

    #[test]
    fn test_select_item_closes_menu_and_resets_scroll() {
        let (mut app, _rx) = test_app();
        let now = Instant::now();
        sized(&mut app, now);
        update(&mut app, Action::ScrollTo(120), now);
        assert!(app.navigation.scroll_signal().scrolled);

        update(&mut app, Action::OpenMenu, now);
        let effect = update(&mut app, Action::SelectItem(3), now);

        assert_eq!(effect, Effect::CancelRippleRemoval(MENU_CTA));
        assert_eq!(app.current_path(), "/about");
        assert_eq!(app.navigation.menu_state(), MenuState::Closed);
        assert!(!app.scroll_lock.is_locked());
        assert_eq!(app.viewport.offset(), 0);
        assert!(!app.navigation.scroll_signal().scrolled);
    }

    #[test]
    fn test_selecting_current_path_keeps_scroll() {
        let (mut app, _rx) = test_app();
        let now = Instant::now();
        sized(&mut app, now);
        update(&mut app, Action::ScrollTo(30), now);
        update(&mut app, Action::SelectItem(0), now);
        assert_eq!(app.viewport.offset(), 30);
    }

    #[test]
    fn test_pointer_activation_schedules_ripple_removal() {
        let (mut app, rx) = test_app();
        let now = Instant::now();
        if let Some(cta) = app.control_mut(NAV_CTA) {
            cta.set_bounds(Bounds::new(60.0, 1.0, 14.0, 3.0));
        }

        let effect = update(
            &mut app,
            Action::Activate {
                control: NAV_CTA,
                event: ActivationEvent::pointer(64.0, 2.0),
            },
            now,
        );

        let Effect::ScheduleRippleRemoval(timer) = effect else {
            panic!("expected a ripple timer, got {effect:?}");
        };
        assert_eq!(timer.after, timing::RIPPLE);
        assert_eq!(rx.try_recv().unwrap(), Action::Navigate("/contact".to_string()));

        update(
            &mut app,
            Action::RippleExpired {
                control: timer.control,
                ripple: timer.ripple,
            },
            now + timing::RIPPLE,
        );
        assert!(app.control(NAV_CTA).unwrap().ripple().is_none());
    }

    #[test]
    fn test_inert_showcase_control_announces_nothing() {
        let (mut app, rx) = test_app();
        let disabled = ControlId(SHOWCASE_BASE_ID + 5);
        let effect = update(
            &mut app,
            Action::Activate {
                control: disabled,
                event: ActivationEvent::key(ActivationKey::Enter),
            },
            Instant::now(),
        );
        assert_eq!(effect, Effect::None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_showcase_activation_announces() {
        let (mut app, rx) = test_app();
        update(
            &mut app,
            Action::Activate {
                control: ControlId(SHOWCASE_BASE_ID),
                event: ActivationEvent::key(ActivationKey::Space),
            },
            Instant::now(),
        );
        let announced = rx.try_recv().unwrap();
        update(&mut app, announced, Instant::now());
        assert_eq!(app.status_message, "Primary activated");
    }

    #[test]
    fn test_widening_past_breakpoint_closes_menu() {
        let (mut app, _rx) = test_app();
        let now = Instant::now();
        sized(&mut app, now);
        update(&mut app, Action::OpenMenu, now);

        update(
            &mut app,
            Action::Resize {
                width: 140,
                height: 40,
            },
            now,
        );
        assert!(!app.navigation.is_open());
        assert!(!app.scroll_lock.is_locked());
    }

    #[test]
    fn test_back_returns_to_previous_path() {
        let (mut app, _rx) = test_app();
        let now = Instant::now();
        update(&mut app, Action::Navigate("/blog".to_string()), now);
        update(&mut app, Action::Back, now);
        assert_eq!(app.current_path(), "/");
        assert_eq!(update(&mut app, Action::Back, now), Effect::None);
    }

    #[test]
    fn test_toggle_reduced_motion() {
        let (mut app, _rx) = test_app();
        assert!(!app.motion.prefers_reduced_motion());
        update(&mut app, Action::ToggleReducedMotion, Instant::now());
        assert!(app.motion.prefers_reduced_motion());
        assert_eq!(app.status_message, "Reduced motion on");
    }

    #[test]
    fn test_quit_tears_down() {
        let (mut app, _rx) = test_app();
        let now = Instant::now();
        update(&mut app, Action::OpenMenu, now);
        assert_eq!(update(&mut app, Action::Quit, now), Effect::Quit);
        assert!(!app.scroll_lock.is_locked());
        assert_eq!(app.viewport.listener_count(), 0);
    }
}
