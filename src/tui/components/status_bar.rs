//! # StatusBar Component
//!
//! Bottom line showing where the user is and what just happened.
//!
//! Stateless: every field is a prop read from the core `App` when the frame
//! is drawn.
//!
//! ## Formatting
//!
//! 1. **Base**: `"navkit /about"`
//! 2. **With announcement**: `"navkit /about | Primary activated"`
//! 3. **Flags** are appended in order: `" | reduced motion"`, `" | scroll locked"`
//! 4. **Focused control** last, in its spoken form: `" | Loading, button, busy"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct StatusBar {
    /// Current route.
    pub path: String,
    /// Latest announcement (activation, preference change, ...).
    pub status_message: String,
    pub reduced_motion: bool,
    pub scroll_locked: bool,
    /// Accessible description of the focused (or hovered) control.
    pub describing: Option<String>,
}

impl StatusBar {
    pub fn new(
        path: String,
        status_message: String,
        reduced_motion: bool,
        scroll_locked: bool,
    ) -> Self {
        Self {
            path,
            status_message,
            reduced_motion,
            scroll_locked,
            describing: None,
        }
    }

    pub fn describing(mut self, description: Option<String>) -> Self {
        self.describing = description;
        self
    }

    pub fn text(&self) -> String {
        let mut text = format!("navkit {}", self.path);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.reduced_motion {
            text.push_str(" | reduced motion");
        }
        if self.scroll_locked {
            text.push_str(" | scroll locked");
        }
        if let Some(description) = &self.describing {
            text.push_str(" | ");
            text.push_str(description);
        }
        text
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(status_bar: &mut StatusBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                status_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_status_bar_base() {
        let status_bar = StatusBar::new("/".to_string(), String::new(), false, false);
        assert_eq!(status_bar.text(), "navkit /");
    }

    #[test]
    fn test_status_bar_with_message() {
        let mut status_bar = StatusBar::new(
            "/about".to_string(),
            "Primary activated".to_string(),
            false,
            false,
        );
        let text = rendered(&mut status_bar);

        assert!(text.contains("navkit /about | Primary activated"));
        assert!(!text.contains("reduced motion"));
    }

    #[test]
    fn test_status_bar_flags() {
        let mut status_bar = StatusBar::new("/blog".to_string(), String::new(), true, true);
        let text = rendered(&mut status_bar);

        assert!(text.contains("navkit /blog | reduced motion | scroll locked"));
    }

    #[test]
    fn test_status_bar_describes_focused_control() {
        let status_bar = StatusBar::new("/".to_string(), String::new(), false, true)
            .describing(Some("Loading, button, busy".to_string()));
        assert_eq!(status_bar.text(), "navkit / | scroll locked | Loading, button, busy");
    }
}
