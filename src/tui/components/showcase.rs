use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::control::InteractiveControl;
use crate::tui::component::Component;
use crate::tui::components::{Button, Highlight};
use crate::tui::theme::Theme;
use crate::tui::ui::{HitMap, HitTarget};

const GAP: u16 = 1;
const INDENT: u16 = 2;

/// A row of demo controls, one per variant and state, laid out left to
/// right until the row runs out of room.
pub struct Showcase<'a> {
    pub controls: &'a mut [InteractiveControl],
    pub theme: &'a Theme,
    pub hits: &'a mut HitMap,
    pub highlight: Highlight,
    pub now: Instant,
}

impl Component for Showcase<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut x = area.x + INDENT;

        for control in self.controls.iter_mut() {
            let available = area.right().saturating_sub(x);
            let width = Button::width_within(control, available);
            if width == 0 || width < Button::preferred_width(control) {
                break;
            }
            let height = Button::preferred_height(control).min(area.height);
            let slot = Rect::new(x, area.y, width, height);
            let target = HitTarget::Control(control.id());
            let focusable = !control.is_inert();

            Button {
                control: &mut *control,
                theme: self.theme,
                interaction: self.highlight.interaction(target),
                now: self.now,
            }
            .render(frame, slot);
            self.hits.push(slot, target, focusable);
            x = slot.right() + GAP;
        }
    }
}
