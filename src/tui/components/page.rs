//! # Page Component
//!
//! Scrollable body for the current route. The body is long enough to scroll
//! well past the navbar's threshold so elevation can be seen.
//!
//! The [`Viewport`] owns the offset. Each render measures the wrapped body,
//! reports the extent back to the viewport (which clamps the offset) and
//! mirrors the offset into the `ScrollViewState` before drawing.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::scroll::Viewport;
use crate::core::style::tokens;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const SECTIONS: usize = 30;
const MIN_TEXT_WIDTH: usize = 10;
const MARGIN: u16 = 2;
const SECTION_PREFIX: &str = "Section ";

/// Display title of a route: `/` is Home, other paths are title-cased.
pub fn page_title(path: &str) -> String {
    let slug = path.trim_matches('/');
    if slug.is_empty() {
        return "Home".to_string();
    }
    slug.split(['-', '/'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrapped body text for `path` at `width` columns, title first.
pub fn page_lines(path: &str, width: u16) -> Vec<String> {
    let title = page_title(path);
    let width = usize::from(width).max(MIN_TEXT_WIDTH);
    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    let wrap = |text: &str| -> Vec<String> {
        textwrap::wrap(text, &options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    };

    let mut lines = wrap(&title);
    lines.push(String::new());
    for section in 1..=SECTIONS {
        lines.push(format!("{SECTION_PREFIX}{section}"));
        let body = format!(
            "This is part {section} of the {title} page. Scroll past the first screen \
             and the navigation bar settles onto a solid background with a shadow \
             underneath; scroll back to the top and it turns translucent again."
        );
        lines.extend(wrap(&body));
        lines.push(String::new());
    }
    lines
}

/// Canvas and text widths for a page area of the given width.
fn widths(area_width: u16) -> (u16, u16) {
    // One column for the scrollbar
    let content_width = area_width.saturating_sub(1);
    (content_width, content_width.saturating_sub(MARGIN * 2))
}

/// Rows the page at `path` takes up when drawn `area_width` columns wide.
pub fn content_height(path: &str, area_width: u16) -> u16 {
    let (_, text_width) = widths(area_width);
    u16::try_from(page_lines(path, text_width).len()).unwrap_or(u16::MAX)
}

pub struct Page<'a> {
    pub path: &'a str,
    pub viewport: &'a mut Viewport,
    pub scroll_state: &'a mut ScrollViewState,
    pub theme: &'a Theme,
}

impl Component for Page<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let (content_width, text_width) = widths(area.width);
        let lines = page_lines(self.path, text_width);
        let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        self.viewport.set_extent(content_height, area.height);
        self.scroll_state.set_offset(Position {
            x: 0,
            y: self.viewport.offset(),
        });

        let text = self.theme.color(tokens::TEXT_PRIMARY);
        let heading = self.theme.color(tokens::ELECTRIC_BLUE);
        let background = self.theme.color(tokens::PAGE_BACKGROUND);
        let styled: Vec<Line> = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let style = if index == 0 || line.starts_with(SECTION_PREFIX) {
                    Style::default().fg(heading).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(text)
                };
                Line::styled(line, style)
            })
            .collect();

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let canvas = Rect::new(MARGIN, 0, text_width, content_height);
        scroll_view.render_widget(
            Paragraph::new(styled).style(Style::default().bg(background)),
            canvas,
        );
        frame.render_stateful_widget(scroll_view, area, self.scroll_state);
    }
}
