//! # Theme
//!
//! Resolves the core's theme token keys to terminal colours. Every key has a
//! built-in default; `[theme]` entries in the config override individual
//! keys. Values that don't parse as a colour are logged and ignored.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use log::warn;
use ratatui::style::Color;

use crate::core::animation::lerp;
use crate::core::style::tokens;

const DEFAULT_TOKENS: &[(&str, Color)] = &[
    (tokens::BUTTON_PRIMARY, Color::Rgb(0x6a, 0x0d, 0xad)),
    (tokens::BUTTON_HOVER_PRIMARY, Color::Rgb(0x9b, 0x30, 0xff)),
    (tokens::TEXT_PRIMARY, Color::Rgb(0xff, 0xff, 0xff)),
    (tokens::TEXT_MUTED, Color::Rgb(0xa0, 0xa0, 0xa0)),
    (tokens::ELECTRIC_BLUE, Color::Rgb(0x00, 0x70, 0xff)),
    (tokens::NEON_CYAN, Color::Rgb(0x00, 0xbf, 0xff)),
    (tokens::SECONDARY_TINT, Color::Rgb(0x0c, 0x1e, 0x3a)),
    (tokens::SECONDARY_HOVER, Color::Rgb(0x00, 0x4c, 0xb0)),
    (tokens::OVERLAY_LIGHT, Color::Rgb(0x3a, 0x3a, 0x3a)),
    (tokens::GHOST_HOVER, Color::Rgb(0x1a, 0x22, 0x33)),
    (tokens::DARK_GREY, Color::Rgb(0x1e, 0x1e, 0x1e)),
    (tokens::MEDIUM_GREY, Color::Rgb(0x2d, 0x2d, 0x2d)),
    (tokens::NAVBAR_TRANSLUCENT, Color::Rgb(0x12, 0x12, 0x12)),
    (tokens::PAGE_BACKGROUND, Color::Rgb(0x0a, 0x0a, 0x0a)),
    (tokens::BACKDROP, Color::Rgb(0x00, 0x00, 0x00)),
    (tokens::SHADOW, Color::Rgb(0x05, 0x05, 0x05)),
    (tokens::FOCUS_RING, Color::Rgb(0x00, 0xbf, 0xff)),
    (tokens::RIPPLE_PRIMARY, Color::Rgb(0xc8, 0x9c, 0xff)),
    (tokens::RIPPLE_SECONDARY, Color::Rgb(0x5c, 0xa8, 0xff)),
    (tokens::RIPPLE_NEUTRAL, Color::Rgb(0x80, 0x80, 0x80)),
];

#[derive(Debug, Clone, Default)]
pub struct Theme {
    overrides: HashMap<String, Color>,
}

impl Theme {
    pub fn from_tokens(tokens: &BTreeMap<String, String>) -> Self {
        let overrides = tokens
            .iter()
            .filter_map(|(key, value)| match Color::from_str(value.trim()) {
                Ok(color) => Some((key.clone(), color)),
                Err(_) => {
                    warn!("Ignoring theme token {key} = {value:?}: not a colour");
                    None
                }
            })
            .collect();
        Self { overrides }
    }

    pub fn color(&self, key: &str) -> Color {
        self.overrides
            .get(key)
            .copied()
            .or_else(|| default_color(key))
            .unwrap_or(Color::Reset)
    }
}

fn default_color(key: &str) -> Option<Color> {
    DEFAULT_TOKENS
        .iter()
        .find(|(token, _)| *token == key)
        .map(|(_, color)| *color)
}

/// Mix two colours. Only RGB colours blend smoothly; anything else snaps
/// at the midpoint.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| lerp(f32::from(a), f32::from(b), t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
