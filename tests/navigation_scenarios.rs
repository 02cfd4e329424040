use std::sync::mpsc;
use std::time::{Duration, Instant};

use navkit::core::action::{Action, Effect, update};
use navkit::core::config::ResolvedConfig;
use navkit::core::control::{ActivationEvent, Bounds, ControlId};
use navkit::core::motion::timing;
use navkit::core::navigation::{MENU_CTA, MenuState, NAV_CTA};
use navkit::core::state::{App, SHOWCASE_BASE_ID};
use navkit::tui::TuiState;
use navkit::tui::component::EventHandler;
use navkit::tui::event::TuiEvent;
use navkit::tui::theme::Theme;
use navkit::tui::ui::{HitTarget, draw_ui};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates an app with full motion, sized like a narrow terminal, with a
/// measured page so scrolling has room.
fn create_app(reduced_motion: bool, width: u16) -> (App, mpsc::Receiver<Action>) {
    let (tx, rx) = mpsc::channel();
    let config = ResolvedConfig {
        reduced_motion: Some(reduced_motion),
        ..Default::default()
    };
    let now = Instant::now();
    let mut app = App::from_config(&config, tx, now);
    update(&mut app, Action::Resize { width, height: 40 }, now);
    app.viewport.set_extent(400, 30);
    (app, rx)
}

/// Renders one frame well after mount so reveals have finished.
fn draw(app: &mut App, tui: &mut TuiState, at: Instant) {
    let backend = TestBackend::new(app.width, app.height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| draw_ui(f, app, tui, at)).unwrap();
    tui.retain_focus();
}

// ============================================================================
// Scroll-aware elevation
// ============================================================================

#[test]
fn test_bar_elevates_only_past_threshold() {
    let (mut app, _rx) = create_app(false, 140);
    let now = Instant::now();

    update(&mut app, Action::ScrollTo(50), now);
    assert!(!app.navigation.scroll_signal().scrolled);

    update(&mut app, Action::ScrollTo(51), now);
    assert!(app.navigation.scroll_signal().scrolled);
    assert_eq!(app.navigation.elevation(now + timing::BAR_ELEVATION), 1.0);

    update(&mut app, Action::ScrollTo(0), now);
    assert!(!app.navigation.scroll_signal().scrolled);
}

// ============================================================================
// Menu and scroll lock
// ============================================================================

#[test]
fn test_scroll_lock_follows_menu_state() {
    let (mut app, _rx) = create_app(false, 80);
    let lock = app.scroll_lock.clone();
    let now = Instant::now();

    update(&mut app, Action::ToggleMenu, now);
    assert_eq!(app.navigation.menu_state(), MenuState::Open);
    assert!(lock.is_locked());

    update(&mut app, Action::ScrollBy(10), now);
    assert_eq!(app.viewport.offset(), 0);

    update(&mut app, Action::ToggleMenu, now);
    assert!(!lock.is_locked());

    update(&mut app, Action::OpenMenu, now);
    drop(app);
    assert!(!lock.is_locked());
}

#[test]
fn test_navigating_from_menu_closes_it() {
    let (mut app, _rx) = create_app(false, 80);
    let now = Instant::now();

    update(&mut app, Action::OpenMenu, now);
    let effect = update(&mut app, Action::SelectItem(1), now);

    assert_eq!(effect, Effect::CancelRippleRemoval(MENU_CTA));
    assert_eq!(app.current_path(), "/services");
    assert!(!app.navigation.is_open());
    assert!(app.navigation.menu_cta().is_none());
}

#[test]
fn test_widening_terminal_closes_menu() {
    let (mut app, _rx) = create_app(false, 80);
    let now = Instant::now();

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

// ============================================================================
// Call to action and controls
// ============================================================================

#[test]
fn test_cta_activation_navigates_to_contact() {
    let (mut app, rx) = create_app(false, 140);
    let now = Instant::now();

    update(
        &mut app,
        Action::Activate {
            control: NAV_CTA,
            event: ActivationEvent::pointer(0.0, 0.0),
        },
        now,
    );
    let queued: Vec<Action> = rx.try_iter().collect();
    assert_eq!(queued, vec![Action::Navigate("/contact".to_string())]);

    for action in queued {
        update(&mut app, action, now);
    }
    assert_eq!(app.current_path(), "/contact");
}

#[test]
fn test_pointer_activation_schedules_ripple_removal() {
    let (mut app, _rx) = create_app(false, 140);
    let now = Instant::now();
    let id = ControlId(SHOWCASE_BASE_ID);
    app.control_mut(id)
        .unwrap()
        .set_bounds(Bounds::new(2.0, 4.0, 13.0, 3.0));

    let effect = update(
        &mut app,
        Action::Activate {
            control: id,
            event: ActivationEvent::pointer(5.5, 5.5),
        },
        now,
    );
    let Effect::ScheduleRippleRemoval(timer) = effect else {
        panic!("expected a ripple timer, got {effect:?}");
    };
    assert_eq!(timer.control, id);
    assert_eq!(timer.after, timing::RIPPLE);
    assert!(app.control(id).unwrap().ripple().is_some());

    update(
        &mut app,
        Action::RippleExpired {
            control: id,
            ripple: timer.ripple,
        },
        now + timer.after,
    );
    assert!(app.control(id).unwrap().ripple().is_none());
}

#[test]
fn test_reduced_motion_skips_ripple() {
    let (mut app, _rx) = create_app(true, 140);
    let id = ControlId(SHOWCASE_BASE_ID);
    app.control_mut(id)
        .unwrap()
        .set_bounds(Bounds::new(2.0, 4.0, 13.0, 3.0));

    let effect = update(
        &mut app,
        Action::Activate {
            control: id,
            event: ActivationEvent::pointer(5.5, 5.5),
        },
        Instant::now(),
    );
    assert_eq!(effect, Effect::None);
    assert!(app.control(id).unwrap().ripple().is_none());
}

#[test]
fn test_inert_controls_never_call_back() {
    let (mut app, rx) = create_app(false, 140);
    let now = Instant::now();

    for offset in [4, 5] {
        update(
            &mut app,
            Action::Activate {
                control: ControlId(SHOWCASE_BASE_ID + offset),
                event: ActivationEvent::pointer(0.0, 0.0),
            },
            now,
        );
    }
    assert!(rx.try_recv().is_err());

    update(
        &mut app,
        Action::Activate {
            control: ControlId(SHOWCASE_BASE_ID),
            event: ActivationEvent::pointer(0.0, 0.0),
        },
        now,
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        Action::Announce("Primary activated".to_string())
    );
}

// ============================================================================
// Keyboard focus through a rendered frame
// ============================================================================

#[test]
fn test_open_menu_traps_tab_focus() {
    let (mut app, _rx) = create_app(false, 80);
    let mut tui = TuiState::new(Theme::default());
    let opened = Instant::now();
    update(&mut app, Action::OpenMenu, opened);
    draw(&mut app, &mut tui, opened + Duration::from_secs(2));

    let mut visited = Vec::new();
    for _ in 0..8 {
        tui.handle_event(&TuiEvent::Tab);
        visited.extend(tui.focus);
    }

    assert_eq!(visited.first(), Some(&HitTarget::MenuToggle));
    assert_eq!(visited.last(), Some(&HitTarget::Control(MENU_CTA)));
    assert!(visited.iter().all(|target| !matches!(
        target,
        HitTarget::Control(id) if id.0 >= SHOWCASE_BASE_ID
    )));

    // Wraps back to the toggle
    tui.handle_event(&TuiEvent::Tab);
    assert_eq!(tui.focus, Some(HitTarget::MenuToggle));

    // Enter on the toggle closes the menu; the overlay's targets go away
    let action = tui.handle_event(&TuiEvent::Enter).unwrap();
    assert_eq!(action, Action::ToggleMenu);
    let closed = opened + Duration::from_secs(3);
    update(&mut app, action, closed);
    tui.focus = Some(HitTarget::Item(0));
    draw(&mut app, &mut tui, closed + Duration::from_secs(1));
    assert_eq!(tui.focus, None);
}
