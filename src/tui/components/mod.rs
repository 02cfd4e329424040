//! # TUI Components
//!
//! ## Component Architecture
//!
//! Every component is a props struct implementing
//! [`Component`](crate::tui::component::Component). Props borrow the core
//! state they present; components never decide behaviour, they only draw it
//! and report back what they measured (control bounds, page extent, hit
//! regions).
//!
//! - `Button`: one `InteractiveControl` (variant colours, motion pose, ripple)
//! - `Navbar`: logo, link row or menu toggle, call-to-action, elevation
//! - `MenuOverlay`: backdrop plus sliding side panel
//! - `Page`: scrollable body for the current route
//! - `Showcase`: strip of demo controls
//! - `StatusBar`: bottom line with path and announcements
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── button.rs
//! ├── navbar.rs
//! ├── menu_overlay.rs
//! ├── page.rs
//! ├── showcase.rs
//! └── status_bar.rs
//! ```

mod button;
mod menu_overlay;
mod navbar;
mod page;
mod showcase;
mod status_bar;

pub use button::{Button, Interaction, Pose, pose};
pub use menu_overlay::{MenuOverlay, PANEL_WIDTH};
pub use navbar::{LOGO, Navbar};
pub use page::{Page, content_height, page_lines, page_title};
pub use showcase::Showcase;
pub use status_bar::StatusBar;

use ratatui::style::{Modifier, Style};

use crate::core::style::tokens;
use crate::tui::theme::{Theme, blend};
use crate::tui::ui::HitTarget;

/// Pointer and focus state from the TUI, handed to every component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub hovered: Option<HitTarget>,
    pub pressed: Option<HitTarget>,
    pub focused: Option<HitTarget>,
}

impl Highlight {
    pub fn interaction(&self, target: HitTarget) -> Interaction {
        Interaction {
            hovered: self.hovered == Some(target),
            pressed: self.pressed == Some(target),
            focused: self.focused == Some(target),
        }
    }
}

/// Style of a navigation link, shared by the bar and the overlay.
///
/// `reveal` fades the link in from `background`.
pub(crate) fn link_style(
    theme: &Theme,
    background: ratatui::style::Color,
    active: bool,
    interaction: Interaction,
    reveal: f32,
) -> Style {
    let engaged = interaction.hovered || interaction.focused;
    let key = if engaged {
        tokens::NEON_CYAN
    } else if active {
        tokens::ELECTRIC_BLUE
    } else {
        tokens::TEXT_PRIMARY
    };
    let mut style = Style::default()
        .fg(blend(background, theme.color(key), reveal))
        .bg(background);
    if active || engaged {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if active {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}
