//! # Button Component
//!
//! Draws one [`InteractiveControl`]. Everything the control decided (inert,
//! busy, motion profile, ripple) is turned into cells here:
//!
//! - hover swaps to the variant's hover colours and emboldens the label
//! - press insets the button by a column on each side
//! - the mount bob emboldens the label around its peak
//! - the ripple tints cells inside its current radius, fading as it grows
//!
//! None of the motion applies when the control has no motion profile.

use std::time::Instant;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::control::{Bounds, ControlContent, InteractiveControl, RippleInstance};
use crate::core::motion::MotionState;
use crate::core::style::{FontScale, size_style, tokens, variant_style};
use crate::tui::component::Component;
use crate::tui::theme::{Theme, blend};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
/// Peak tint of a fresh ripple.
const RIPPLE_STRENGTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
}

/// How the active motion profile shows up in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pose {
    /// Columns trimmed from each side (scale below rest).
    pub inset: u16,
    /// Bold label (scale above rest or lifted).
    pub emphasized: bool,
}

pub fn pose(control: &InteractiveControl, interaction: Interaction, now: Instant) -> Pose {
    let Some(motion) = control.motion_profile() else {
        return Pose::default();
    };

    let state = if interaction.pressed {
        Some(MotionState::Press)
    } else if interaction.hovered {
        Some(MotionState::Hover)
    } else {
        None
    };

    match state {
        Some(state) => {
            let profile = motion.select(state);
            Pose {
                inset: u16::from(profile.scale < 1.0),
                emphasized: profile.scale > 1.0,
            }
        }
        None => Pose {
            inset: 0,
            emphasized: control.idle_lift(now) <= motion.idle.lift / 2.0,
        },
    }
}

pub struct Button<'a> {
    pub control: &'a mut InteractiveControl,
    pub theme: &'a Theme,
    pub interaction: Interaction,
    pub now: Instant,
}

impl Button<'_> {
    fn text(control: &InteractiveControl) -> &str {
        match control.content() {
            ControlContent::Label(label) => label,
            ControlContent::Busy(busy) => busy.text,
        }
    }

    pub fn preferred_width(control: &InteractiveControl) -> u16 {
        let padding = size_style(control.config().size).padding_x;
        let text = u16::try_from(Self::text(control).width()).unwrap_or(u16::MAX);
        text.saturating_add(padding * 2 + 2)
    }

    pub fn preferred_height(control: &InteractiveControl) -> u16 {
        3 + size_style(control.config().size).padding_y * 2
    }

    /// Width to allocate out of `available`: full-width controls take it all.
    pub fn width_within(control: &InteractiveControl, available: u16) -> u16 {
        if control.config().full_width {
            available
        } else {
            Self::preferred_width(control).min(available)
        }
    }
}

impl Component for Button<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        self.control.set_bounds(Bounds::new(
            f32::from(area.x),
            f32::from(area.y),
            f32::from(area.width),
            f32::from(area.height),
        ));

        let control = &*self.control;
        let theme = self.theme;
        let config = control.config();
        let variant = variant_style(config.variant);
        let size = size_style(config.size);
        let inert = control.is_inert();
        let pose = pose(control, self.interaction, self.now);

        let engaged = control.motion_profile().is_some()
            && (self.interaction.hovered || self.interaction.pressed);
        let background = if engaged {
            Some(variant.hover_background)
        } else {
            variant.background
        }
        .map(|key| theme.color(key));
        let foreground = theme.color(if engaged {
            variant.hover_foreground
        } else {
            variant.foreground
        });

        let focused = self.interaction.focused && !inert;
        let border = if focused {
            theme.color(tokens::FOCUS_RING)
        } else {
            variant
                .border
                .map(|key| theme.color(key))
                .or(background)
                .unwrap_or_else(|| theme.color(tokens::PAGE_BACKGROUND))
        };

        let mut style = Style::default().fg(foreground);
        if let Some(background) = background {
            style = style.bg(background);
        }
        if inert {
            style = style.add_modifier(Modifier::DIM);
        }
        let mut label_style = style;
        if pose.emphasized || size.font == FontScale::Large {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }

        let body = Rect {
            x: area.x + pose.inset,
            width: area.width.saturating_sub(pose.inset * 2),
            ..area
        };
        let block = Block::bordered()
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .border_style(style.fg(border))
            .style(style);
        let inner = block.inner(body);
        frame.render_widget(block, body);

        let label_row = Rect {
            y: inner.y + inner.height.saturating_sub(1) / 2,
            height: inner.height.min(1),
            ..inner
        };
        let label = Paragraph::new(Line::from(Span::styled(Self::text(control), label_style)))
            .alignment(Alignment::Center);
        frame.render_widget(label, label_row);

        if let Some(ripple) = control.ripple() {
            paint_ripple(
                frame.buffer_mut(),
                area,
                ripple,
                theme.color(variant.ripple),
                self.now,
            );
        }
    }
}

/// Tint the cells a ripple currently covers. Ripple coordinates are local
/// to `area`, in cells.
fn paint_ripple(buf: &mut Buffer, area: Rect, ripple: &RippleInstance, color: Color, now: Instant) {
    let strength = ripple.opacity_at(now) * RIPPLE_STRENGTH;
    let radius = ripple.radius_at(now);
    if strength <= 0.0 || radius <= 0.0 {
        return;
    }

    let (center_x, center_y) = ripple.center();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let dx = f32::from(x - area.x) + 0.5 - center_x;
            let dy = (f32::from(y - area.y) + 0.5 - center_y) * CELL_ASPECT;
            if dx.hypot(dy) > radius {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                let tinted = blend(cell.bg, color, strength);
                cell.set_bg(tinted);
            }
        }
    }
}
