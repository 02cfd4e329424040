//! # Menu Overlay
//!
//! Drawn over everything below the navbar while the menu is open or still
//! playing its exit transition.
//!
//! ```text
//! ┌────────────────────────────┬────────────────────────────────┐
//! │░░░░░░░░ backdrop ░░░░░░░░░░│ Home                           │
//! │░░░░░░░░░░░░░░░░░░░░░░░░░░░░│                                │
//! │░░░░░░░░░░░░░░░░░░░░░░░░░░░░│ Services            panel      │
//! │░░░░░░░░░░░░░░░░░░░░░░░░░░░░│ ...                            │
//! │░░░░░░░░░░░░░░░░░░░░░░░░░░░░│ ╭────────────────────────────╮ │
//! │░░░░░░░░░░░░░░░░░░░░░░░░░░░░│ │         Contact Us         │ │
//! └────────────────────────────┴────────────────────────────────┘
//! ```
//!
//! The backdrop dims whatever was drawn beneath it; the panel slides in from
//! the right edge by the overlay visibility. Links enter one by one using
//! the overlay reveal, offset a few columns to the right until they land.

use std::time::Instant;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::navigation::{MENU_CTA, Navigation};
use crate::core::style::tokens;
use crate::tui::component::Component;
use crate::tui::components::{Button, Highlight, link_style};
use crate::tui::theme::{Theme, blend};
use crate::tui::ui::{HitMap, HitTarget};

pub const PANEL_WIDTH: u16 = 32;
/// How far dimmed cells move toward the backdrop colour when fully shown.
const BACKDROP_DIM: f32 = 0.6;
/// Columns a link travels while it is revealed.
const SLIDE: f32 = 4.0;
const ROW_SPACING: u16 = 2;

pub struct MenuOverlay<'a> {
    pub navigation: &'a mut Navigation,
    pub current_path: &'a str,
    pub theme: &'a Theme,
    pub hits: &'a mut HitMap,
    pub highlight: Highlight,
    pub now: Instant,
}

impl MenuOverlay<'_> {
    fn render_items(&mut self, frame: &mut Frame, inner: Rect, background: Color) -> u16 {
        if inner.is_empty() {
            return inner.bottom();
        }
        let active = self.navigation.index_of_path(self.current_path);
        let open = self.navigation.is_open();
        let mut y = inner.y + 1;

        for (index, item) in self.navigation.items().iter().enumerate() {
            if y >= inner.bottom() {
                break;
            }
            let reveal = self.navigation.overlay_reveal(index, self.now);
            let target = HitTarget::Item(index);
            let width = u16::try_from(item.label.width()).unwrap_or(u16::MAX);
            let resting = Rect::new(inner.x + 1, y, width, 1).intersection(inner);
            // Rounded slide distance; 0 once the link has landed
            let offset = ((1.0 - reveal) * SLIDE).round() as u16;
            let shown = Rect {
                x: resting.x.saturating_add(offset),
                ..resting
            }
            .intersection(inner);

            if reveal > 0.0 {
                let style = link_style(
                    self.theme,
                    background,
                    active == Some(index),
                    self.highlight.interaction(target),
                    reveal,
                );
                frame.render_widget(Span::styled(item.label.as_str(), style), shown);
            }
            // Exit transition: links are drawn but no longer targets
            if open {
                let hit = Rect {
                    width: inner.width.saturating_sub(2),
                    ..resting
                };
                self.hits.push(hit, target, true);
            }
            y += ROW_SPACING;
        }
        y
    }

    fn render_cta(&mut self, frame: &mut Frame, inner: Rect, top: u16, background: Color) {
        let cta_area = Rect {
            x: inner.x + 1,
            y: top,
            width: inner.width.saturating_sub(2),
            height: inner.bottom().saturating_sub(top),
        };

        if cta_area.is_empty() {
            return;
        }
        let Some(control) = self.navigation.control_mut(MENU_CTA) else {
            // Exit transition: the control is already unmounted
            let label = self.navigation.cta().label.clone();
            let row = Rect {
                height: cta_area.height.min(1),
                ..cta_area
            };
            frame.render_widget(
                Paragraph::new(label)
                    .style(Style::default().fg(self.theme.color(tokens::TEXT_MUTED)).bg(background))
                    .alignment(Alignment::Center),
                row,
            );
            return;
        };

        let width = Button::width_within(control, cta_area.width);
        let height = Button::preferred_height(control).min(cta_area.height);
        let area = Rect {
            width,
            height,
            ..cta_area
        };
        let target = HitTarget::Control(MENU_CTA);
        let focusable = control.tab_index() >= 0;

        Button {
            control,
            theme: self.theme,
            interaction: self.highlight.interaction(target),
            now: self.now,
        }
        .render(frame, area);
        self.hits.push(area, target, focusable);
    }
}

impl Component for MenuOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visibility = self.navigation.overlay_visibility(self.now);
        let theme = self.theme;

        dim(frame.buffer_mut(), area, theme.color(tokens::BACKDROP), visibility * BACKDROP_DIM);
        // Only an open menu traps focus and catches outside clicks
        if self.navigation.is_open() {
            self.hits.push(area, HitTarget::Backdrop, false);
        }

        let full = PANEL_WIDTH.min(area.width);
        let shown = (f32::from(full) * visibility).round() as u16;
        if shown == 0 {
            return;
        }
        // The panel keeps its full width and slides; the screen edge clips it
        let sliding = Rect {
            x: area.right() - shown,
            width: full,
            ..area
        };
        let panel = sliding.intersection(area);
        let inner = Rect {
            x: sliding.x + 1,
            width: full.saturating_sub(1),
            ..sliding
        }
        .intersection(area);

        let background = theme.color(tokens::DARK_GREY);
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(theme.color(tokens::MEDIUM_GREY)).bg(background))
            .style(Style::default().bg(background));
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);
        self.hits.push(panel, HitTarget::Panel, false);

        let after_items = self.render_items(frame, inner, background);
        let cta_top = after_items.saturating_add(1).min(inner.bottom());
        self.render_cta(frame, inner, cta_top, background);
    }
}

/// Pull every cell's colours toward `tint` by `amount`.
fn dim(buf: &mut Buffer, area: Rect, tint: Color, amount: f32) {
    if amount <= 0.0 {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let bg = blend(cell.bg, tint, amount);
                let fg = blend(cell.fg, tint, amount);
                cell.set_bg(bg).set_fg(fg);
            }
        }
    }
}
