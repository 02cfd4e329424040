//! # Navbar Component
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ CodingBull   Home  Services  Our Projects ...  ╭────────────╮│  full
//! │                                                │ Contact Us ││
//! │                                                ╰────────────╯│
//! ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀  shadow
//! ```
//!
//! The background blends from the translucent resting colour to the solid
//! elevated one by the navigation's elevation value, and the shadow row
//! fades in with it. In the compact layout the link row and CTA give way to
//! the menu toggle glyph.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::navigation::{LayoutMode, NAV_CTA, Navigation};
use crate::core::style::tokens;
use crate::tui::component::Component;
use crate::tui::components::{Button, Highlight, link_style};
use crate::tui::theme::{Theme, blend};
use crate::tui::ui::{HitMap, HitTarget};

pub const LOGO: &str = "CodingBull";
const ITEM_GAP: u16 = 3;
const EDGE: u16 = 2;

pub struct Navbar<'a> {
    pub navigation: &'a mut Navigation,
    pub current_path: &'a str,
    pub layout: LayoutMode,
    pub theme: &'a Theme,
    pub hits: &'a mut HitMap,
    pub highlight: Highlight,
    pub now: Instant,
}

impl Navbar<'_> {
    fn render_links(
        &mut self,
        frame: &mut Frame,
        bar: Rect,
        span: (u16, u16),
        background: Color,
    ) {
        let (start_x, end_x) = span;
        let row = bar.y + bar.height / 2;
        let active = self.navigation.index_of_path(self.current_path);
        let mut x = start_x;

        for (index, item) in self.navigation.items().iter().enumerate() {
            let width = u16::try_from(item.label.width()).unwrap_or(u16::MAX);
            if x.saturating_add(width) > end_x {
                break;
            }
            let target = HitTarget::Item(index);
            let area = Rect::new(x, row, width, 1);
            let reveal = self.navigation.row_reveal(index, self.now);
            let style = link_style(
                self.theme,
                background,
                active == Some(index),
                self.highlight.interaction(target),
                reveal,
            );
            if reveal > 0.0 {
                frame.render_widget(Span::styled(item.label.as_str(), style), area);
            }
            self.hits.push(area, target, true);
            x += width + ITEM_GAP;
        }
    }

    fn render_cta(&mut self, frame: &mut Frame, bar: Rect) -> u16 {
        let Some(control) = self.navigation.control_mut(NAV_CTA) else {
            return bar.right();
        };
        let width = Button::width_within(control, bar.width.saturating_sub(EDGE * 2));
        let height = Button::preferred_height(control).min(bar.height);
        let area = Rect::new(bar.right().saturating_sub(width + EDGE), bar.y, width, height)
            .intersection(bar);
        let focusable = control.tab_index() >= 0;
        let target = HitTarget::Control(NAV_CTA);

        Button {
            control,
            theme: self.theme,
            interaction: self.highlight.interaction(target),
            now: self.now,
        }
        .render(frame, area);
        self.hits.push(area, target, focusable);
        area.x
    }

    fn render_toggle(&mut self, frame: &mut Frame, bar: Rect, background: Color) {
        let target = HitTarget::MenuToggle;
        let area = Rect::new(bar.right().saturating_sub(3 + EDGE), bar.y, 3, bar.height)
            .intersection(bar);
        let interaction = self.highlight.interaction(target);

        let mut style = Style::default()
            .fg(self.theme.color(tokens::TEXT_PRIMARY))
            .bg(background);
        if interaction.hovered || interaction.focused {
            style = style
                .fg(self.theme.color(tokens::NEON_CYAN))
                .add_modifier(Modifier::BOLD);
        }
        let glyph_row = Rect {
            y: area.y + area.height / 2,
            height: area.height.min(1),
            ..area
        };
        frame.render_widget(
            Paragraph::new(self.navigation.toggle_glyph())
                .style(style)
                .alignment(Alignment::Center),
            glyph_row,
        );
        self.hits.push(area, target, true);
    }
}

impl Component for Navbar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let elevation = self.navigation.elevation(self.now);
        let page = self.theme.color(tokens::PAGE_BACKGROUND);
        let background = blend(
            self.theme.color(tokens::NAVBAR_TRANSLUCENT),
            self.theme.color(tokens::DARK_GREY),
            elevation,
        );

        let bar = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let shadow_row = Rect {
            y: bar.bottom(),
            height: area.height - bar.height,
            ..area
        };

        frame.render_widget(Block::default().style(Style::default().bg(background)), bar);
        if elevation > 0.0 {
            let shadow = blend(page, self.theme.color(tokens::MEDIUM_GREY), elevation);
            frame.render_widget(
                Paragraph::new("▀".repeat(usize::from(shadow_row.width)))
                    .style(Style::default().fg(shadow).bg(page)),
                shadow_row,
            );
        }

        let logo_row = bar.y + bar.height / 2;
        let logo_width = u16::try_from(LOGO.width()).unwrap_or(u16::MAX);
        let logo_area = Rect::new(bar.x + EDGE, logo_row, logo_width, 1).intersection(bar);
        let logo_fg = blend(
            background,
            self.theme.color(tokens::ELECTRIC_BLUE),
            self.navigation.logo_opacity(self.now),
        );
        frame.render_widget(
            Span::styled(
                LOGO,
                Style::default()
                    .fg(logo_fg)
                    .bg(background)
                    .add_modifier(Modifier::BOLD),
            ),
            logo_area,
        );

        match self.layout {
            LayoutMode::Full => {
                let cta_x = self.render_cta(frame, bar);
                let links_start = logo_area.right() + ITEM_GAP + 1;
                let links_end = cta_x.saturating_sub(ITEM_GAP);
                self.render_links(frame, bar, (links_start, links_end), background);
            }
            LayoutMode::Compact => self.render_toggle(frame, bar, background),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::NavigationConfig;
    use crate::core::scroll::Viewport;
    use crate::core::scroll_lock::ScrollLock;
    use crate::test_support::fixed_motion;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use std::time::Duration;

    struct Fixture {
        navigation: Navigation,
        viewport: Viewport,
        mounted: Instant,
    }

    fn fixture() -> Fixture {
        let lock = ScrollLock::new();
        let mut viewport = Viewport::new(lock.clone());
        viewport.set_extent(400, 30);
        let mounted = Instant::now();
        let navigation = Navigation::new(
            NavigationConfig::default(),
            fixed_motion(false),
            &viewport,
            lock,
            None,
            mounted,
        );
        Fixture {
            navigation,
            viewport,
            mounted,
        }
    }

    fn render(
        navigation: &mut Navigation,
        layout: LayoutMode,
        path: &str,
        highlight: Highlight,
        now: Instant,
        width: u16,
    ) -> (Buffer, HitMap) {
        let backend = TestBackend::new(width, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        let mut hits = HitMap::default();
        terminal
            .draw(|f| {
                Navbar {
                    navigation: &mut *navigation,
                    current_path: path,
                    layout,
                    theme: &theme,
                    hits: &mut hits,
                    highlight,
                    now,
                }
                .render(f, f.area());
            })
            .unwrap();
        (terminal.backend().buffer().clone(), hits)
    }

    fn row_text(buffer: &Buffer, row: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, row)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_full_layout_lists_every_item() {
        let mut f = fixture();
        let later = f.mounted + Duration::from_secs(2);
        let (buffer, hits) = render(
            &mut f.navigation,
            LayoutMode::Full,
            "/",
            Highlight::default(),
            later,
            140,
        );
        let row = row_text(&buffer, 1);

        for label in [
            "CodingBull",
            "Home",
            "Services",
            "Our Projects",
            "About",
            "Blog",
            "Contact Us",
        ] {
            assert!(row.contains(label), "missing {label} in {row:?}");
        }
        assert_eq!(hits.focus_order().len(), 7);
    }

    #[test]
    fn test_active_link_is_underlined() {
        let mut f = fixture();
        let later = f.mounted + Duration::from_secs(2);
        let (buffer, hits) = render(
            &mut f.navigation,
            LayoutMode::Full,
            "/about",
            Highlight::default(),
            later,
            140,
        );

        let about = hits.area_of(HitTarget::Item(3)).unwrap();
        let home = hits.area_of(HitTarget::Item(0)).unwrap();
        assert!(buffer[(about.x, about.y)].modifier.contains(Modifier::UNDERLINED));
        assert!(!buffer[(home.x, home.y)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_links_reveal_in_stagger() {
        let mut f = fixture();
        let early = f.mounted + Duration::from_millis(150);
        let (buffer, hits) = render(
            &mut f.navigation,
            LayoutMode::Full,
            "/",
            Highlight::default(),
            early,
            140,
        );

        let first = hits.area_of(HitTarget::Item(0)).unwrap();
        let last = hits.area_of(HitTarget::Item(5)).unwrap();
        assert_eq!(buffer[(first.x, first.y)].symbol(), "H");
        // Item 5 waits 500ms before it starts
        assert_eq!(buffer[(last.x, last.y)].symbol(), " ");
    }

    #[test]
    fn test_compact_layout_shows_toggle_glyph() {
        let mut f = fixture();
        let later = f.mounted + Duration::from_secs(2);
        let (buffer, hits) = render(
            &mut f.navigation,
            LayoutMode::Compact,
            "/",
            Highlight::default(),
            later,
            60,
        );
        assert!(row_text(&buffer, 1).contains("☰"));
        assert_eq!(hits.focus_order(), vec![HitTarget::MenuToggle]);

        f.navigation.open(later);
        let (buffer, _) = render(
            &mut f.navigation,
            LayoutMode::Compact,
            "/",
            Highlight::default(),
            later,
            60,
        );
        assert!(row_text(&buffer, 1).contains("✕"));
    }

    #[test]
    fn test_shadow_appears_once_scrolled() {
        let mut f = fixture();
        let later = f.mounted + Duration::from_secs(2);
        let (buffer, _) = render(
            &mut f.navigation,
            LayoutMode::Full,
            "/",
            Highlight::default(),
            later,
            100,
        );
        assert!(!row_text(&buffer, 3).contains('▀'));

        f.viewport.scroll_to(120);
        f.navigation.on_scroll(later);
        let settled = later + Duration::from_secs(1);
        let (buffer, _) = render(
            &mut f.navigation,
            LayoutMode::Full,
            "/",
            Highlight::default(),
            settled,
            100,
        );
        assert!(row_text(&buffer, 3).contains('▀'));
    }
}
