use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::core::control::ControlId;
use crate::core::motion::MotionPreference;
use crate::core::router::Router;
use crate::core::state::App;
use crate::core::style::tokens;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    Highlight, MenuOverlay, Navbar, Page, Showcase, StatusBar, content_height,
};

/// Bar rows plus one shadow row.
pub const NAVBAR_HEIGHT: u16 = 4;
pub const SHOWCASE_HEIGHT: u16 = 3;

/// Something the pointer or keyboard focus can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Item(usize),
    Control(ControlId),
    MenuToggle,
    Backdrop,
    Panel,
}

#[derive(Debug, Clone, Copy)]
struct Region {
    area: Rect,
    target: HitTarget,
    focusable: bool,
}

/// Clickable regions recorded during the last draw, bottom layer first.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<Region>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: HitTarget, focusable: bool) {
        if area.is_empty() {
            return;
        }
        self.regions.push(Region {
            area,
            target,
            focusable,
        });
    }

    /// Topmost target under the point.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let point = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|region| region.area.contains(point))
            .map(|region| region.target)
    }

    pub fn area_of(&self, target: HitTarget) -> Option<Rect> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.target == target)
            .map(|region| region.area)
    }

    /// Keyboard focus order in draw order. While a backdrop is up only the
    /// targets above it (and the menu toggle) take focus.
    pub fn focus_order(&self) -> Vec<HitTarget> {
        let modal_start = self
            .regions
            .iter()
            .rposition(|region| region.target == HitTarget::Backdrop);

        let mut order = Vec::new();
        for (index, region) in self.regions.iter().enumerate() {
            let in_scope = match modal_start {
                Some(start) => index > start || region.target == HitTarget::MenuToggle,
                None => true,
            };
            if in_scope && region.focusable && !order.contains(&region.target) {
                order.push(region.target);
            }
        }
        order
    }
}

pub fn draw_ui(frame: &mut Frame, app: &mut App, tui: &mut TuiState, now: Instant) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let [nav_area, showcase_area, page_area, status_area] = Layout::vertical([
        Length(NAVBAR_HEIGHT),
        Length(SHOWCASE_HEIGHT),
        Min(0),
        Length(1),
    ])
    .areas(area);

    tui.hits.clear();
    tui.layout = app.navigation.layout_mode(area.width);
    tui.menu_open = app.navigation.is_open();
    tui.page_height = page_area.height;

    let highlight = Highlight {
        hovered: tui.hovered,
        pressed: tui.pressed,
        focused: tui.focus,
    };

    frame.render_widget(
        Block::default().style(Style::default().bg(tui.theme.color(tokens::PAGE_BACKGROUND))),
        area,
    );

    let current_path = app.router.current().to_string();
    // Measure first so the bar is styled from the clamped offset
    app.measure_page(content_height(&current_path, page_area.width), page_area.height, now);

    Navbar {
        navigation: &mut app.navigation,
        current_path: &current_path,
        layout: tui.layout,
        theme: &tui.theme,
        hits: &mut tui.hits,
        highlight,
        now,
    }
    .render(frame, nav_area);

    Showcase {
        controls: &mut app.showcase,
        theme: &tui.theme,
        hits: &mut tui.hits,
        highlight,
        now,
    }
    .render(frame, showcase_area);

    Page {
        path: &current_path,
        viewport: &mut app.viewport,
        scroll_state: &mut tui.scroll_state,
        theme: &tui.theme,
    }
    .render(frame, page_area);

    StatusBar::new(
        current_path.clone(),
        app.status_message.clone(),
        app.motion.prefers_reduced_motion(),
        app.scroll_lock.is_locked(),
    )
    .describing(described_control(app, tui))
    .render(frame, status_area);

    if app.navigation.overlay_present(now) {
        let overlay_area = Rect {
            y: nav_area.bottom(),
            height: area.height.saturating_sub(nav_area.height),
            ..area
        };
        MenuOverlay {
            navigation: &mut app.navigation,
            current_path: &current_path,
            theme: &tui.theme,
            hits: &mut tui.hits,
            highlight,
            now,
        }
        .render(frame, overlay_area);
    }
}

/// Spoken description of the focused control, else the hovered one.
fn described_control(app: &App, tui: &TuiState) -> Option<String> {
    match tui.focus.or(tui.hovered)? {
        HitTarget::Control(id) => app.control(id).map(|c| c.accessible_description()),
        _ => None,
    }
}
