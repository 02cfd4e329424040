//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! never sees a terminal cell; it only receives actions and hands back
//! effects, which are carried out here (ripple timers live in [`timers`]).
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (reveal, overlay slide, elevation, ripple, idle bob):
//!   draws every ~33ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, on actions from
//!   background tasks, or on terminal resize.
//!
//! ## Focus
//!
//! Focus order comes from the hit map recorded during the last draw, so it
//! always matches what is on screen. While the overlay is up its backdrop
//! traps focus inside the panel (plus the menu toggle).

pub mod component;
pub mod components;
pub mod event;
pub mod theme;
pub mod timers;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tui_scrollview::ScrollViewState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::control::{ActivationEvent, ActivationKey};
use crate::core::navigation::LayoutMode;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Theme;
use crate::tui::timers::RippleTimers;
use crate::tui::ui::{HitMap, HitTarget};

/// Rows moved per arrow key or wheel notch.
const SCROLL_STEP: i32 = 2;
const ANIMATION_FRAME: Duration = Duration::from_millis(33);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core interaction logic)
pub struct TuiState {
    pub theme: Theme,
    // Recorded by the last draw
    pub hits: HitMap,
    pub layout: LayoutMode,
    pub menu_open: bool,
    pub page_height: u16,
    // Pointer and keyboard focus
    pub focus: Option<HitTarget>,
    pub hovered: Option<HitTarget>,
    pub pressed: Option<HitTarget>,
    pub scroll_state: ScrollViewState,
    pub timers: RippleTimers,
}

impl TuiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            hits: HitMap::default(),
            layout: LayoutMode::Full,
            menu_open: false,
            page_height: 0,
            focus: None,
            hovered: None,
            pressed: None,
            scroll_state: ScrollViewState::default(),
            timers: RippleTimers::new(),
        }
    }

    /// Tab / Shift+Tab through the focusable targets, wrapping around.
    pub fn move_focus(&mut self, forward: bool) {
        let order = self.hits.focus_order();
        if order.is_empty() {
            self.focus = None;
            return;
        }
        let len = order.len();
        let current = self
            .focus
            .and_then(|focus| order.iter().position(|target| *target == focus));
        let next = match (current, forward) {
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.focus = Some(order[next]);
    }

    /// Drop focus and pointer state that points at something no longer on
    /// screen (menu closed, layout switched, control unmounted).
    pub fn retain_focus(&mut self) {
        if let Some(focus) = self.focus
            && !self.hits.focus_order().contains(&focus)
        {
            debug!("Focus on {focus:?} dropped: no longer focusable");
            self.focus = None;
        }
        for slot in [&mut self.hovered, &mut self.pressed] {
            if slot.is_some_and(|target| self.hits.area_of(target).is_none()) {
                *slot = None;
            }
        }
    }

    fn page_step(&self) -> i32 {
        i32::from(self.page_height.max(1))
    }

    fn activate_focused(&self, key: ActivationKey) -> Option<Action> {
        let target = self.focus?;
        let mut event = ActivationEvent::key(key);
        event.prevent_default();
        target_action(target, event)
    }
}

/// The action a click or keyboard activation on `target` stands for.
fn target_action(target: HitTarget, event: ActivationEvent) -> Option<Action> {
    match target {
        HitTarget::Item(index) => Some(Action::SelectItem(index)),
        HitTarget::Control(control) => Some(Action::Activate { control, event }),
        HitTarget::MenuToggle => Some(Action::ToggleMenu),
        HitTarget::Backdrop => Some(Action::CloseMenu),
        HitTarget::Panel => None,
    }
}

impl EventHandler for TuiState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::ForceQuit | TuiEvent::Char('q') => Some(Action::Quit),
            TuiEvent::Resize(width, height) => Some(Action::Resize {
                width: *width,
                height: *height,
            }),
            TuiEvent::Tab => {
                self.move_focus(true);
                None
            }
            TuiEvent::BackTab => {
                self.move_focus(false);
                None
            }
            TuiEvent::Enter => self.activate_focused(ActivationKey::Enter),
            TuiEvent::Char(' ') => match self.focus {
                Some(HitTarget::Control(_)) => self.activate_focused(ActivationKey::Space),
                _ => Some(Action::ScrollBy(self.page_step())),
            },
            TuiEvent::Escape => {
                if self.menu_open {
                    Some(Action::CloseMenu)
                } else {
                    self.focus = None;
                    None
                }
            }
            TuiEvent::Char('m') if self.layout == LayoutMode::Compact => Some(Action::ToggleMenu),
            TuiEvent::Char('r') => Some(Action::ToggleReducedMotion),
            TuiEvent::Backspace => Some(Action::Back),
            TuiEvent::ScrollUp => Some(Action::ScrollBy(-SCROLL_STEP)),
            TuiEvent::ScrollDown => Some(Action::ScrollBy(SCROLL_STEP)),
            TuiEvent::ScrollPageUp => Some(Action::ScrollBy(-self.page_step())),
            TuiEvent::ScrollPageDown => Some(Action::ScrollBy(self.page_step())),
            TuiEvent::ScrollHome => Some(Action::ScrollTo(0)),
            TuiEvent::ScrollEnd => Some(Action::ScrollTo(u16::MAX)),
            TuiEvent::MouseMove(column, row) => {
                self.hovered = self.hits.hit_test(*column, *row);
                None
            }
            TuiEvent::MouseDown(column, row) => {
                self.pressed = self.hits.hit_test(*column, *row);
                None
            }
            TuiEvent::MouseUp(column, row) => {
                let pressed = self.pressed.take();
                let released = self.hits.hit_test(*column, *row)?;
                if pressed != Some(released) {
                    return None;
                }
                let event = ActivationEvent::pointer(
                    f32::from(*column) + 0.5,
                    f32::from(*row) + 0.5,
                );
                target_action(released, event)
            }
            TuiEvent::Char(_) => None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Terminals without the keyboard protocol ignore the flags
        execute!(
            stdout(),
            EnableMouseCapture,
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture, Show);
    }
}

/// Carry out an effect returned by `update`. Returns true on quit.
fn apply_effect(effect: Effect, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => {
            tui.timers.cancel_all();
            return true;
        }
        Effect::ScheduleRippleRemoval(timer) => tui.timers.schedule(timer, tx.clone()),
        Effect::CancelRippleRemoval(control) => tui.timers.cancel(control),
    }
    false
}

/// Feed one action through the core and carry out its effect.
fn dispatch(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>, action: Action) -> bool {
    debug!("Dispatching {action:?}");
    let effect = update(app, action, Instant::now());
    apply_effect(effect, tui, tx)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Channel for actions from control callbacks and ripple timers
    let (tx, rx) = mpsc::channel();

    let mut app = App::from_config(&config, tx.clone(), Instant::now());
    let mut tui = TuiState::new(Theme::from_tokens(&config.theme));

    let mut terminal = ratatui::init();
    let terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {e}");
            None
        }
    };

    let result = event_loop(&mut terminal, &mut app, &mut tui, &tx, &rx);

    tui.timers.cancel_all();
    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let size = terminal.size()?;
    dispatch(
        app,
        tui,
        tx,
        Action::Resize {
            width: size.width,
            height: size.height,
        },
    );

    let mut needs_redraw = true; // Force first frame
    loop {
        let now = Instant::now();
        let animating = app.is_animating(now);

        // Only draw when something changed or is in motion
        if animating || needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui, now))?;
            tui.retain_focus();
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while animating, long when idle
        let timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };

        // Process the first event plus everything already queued
        let mut events: Vec<TuiEvent> = poll_event_timeout(timeout)?.into_iter().collect();
        while let Some(event) = poll_event_immediate()? {
            events.push(event);
        }

        let mut should_quit = false;
        for event in &events {
            needs_redraw = true;
            if let Some(action) = tui.handle_event(event) {
                should_quit |= dispatch(app, tui, tx, action);
            }
        }

        // Callbacks and timers may have queued more; drain until quiet
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit |= dispatch(app, tui, tx, action);
        }

        if should_quit {
            info!("Quit requested, leaving event loop");
            return Ok(());
        }
    }
}
