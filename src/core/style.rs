//! # Control Styling
//!
//! Pure mapping functions from a control's `variant` and `size` to a style
//! record. Records name theme tokens by key; turning a key into an actual
//! colour is the theming collaborator's job.
//!
//! Unknown variant or size names never fail: they resolve to
//! [`Variant::Primary`] and [`Size::Md`].

use serde::{Deserialize, Serialize};

/// Theme token keys the core selects by.
pub mod tokens {
    pub const BUTTON_PRIMARY: &str = "button_primary";
    pub const BUTTON_HOVER_PRIMARY: &str = "button_hover_primary";
    pub const TEXT_PRIMARY: &str = "text_primary";
    pub const TEXT_MUTED: &str = "text_muted";
    pub const ELECTRIC_BLUE: &str = "electric_blue";
    pub const NEON_CYAN: &str = "neon_cyan";
    pub const SECONDARY_TINT: &str = "secondary_tint";
    pub const SECONDARY_HOVER: &str = "secondary_hover";
    pub const OVERLAY_LIGHT: &str = "overlay_light";
    pub const GHOST_HOVER: &str = "ghost_hover";
    pub const DARK_GREY: &str = "dark_grey";
    pub const MEDIUM_GREY: &str = "medium_grey";
    pub const NAVBAR_TRANSLUCENT: &str = "navbar_translucent";
    pub const PAGE_BACKGROUND: &str = "page_background";
    pub const BACKDROP: &str = "backdrop";
    pub const SHADOW: &str = "shadow";
    pub const FOCUS_RING: &str = "focus_ring";
    pub const RIPPLE_PRIMARY: &str = "ripple_primary";
    pub const RIPPLE_SECONDARY: &str = "ripple_secondary";
    pub const RIPPLE_NEUTRAL: &str = "ripple_neutral";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
}

impl Variant {
    /// Parse a variant name, falling back to `Primary` for anything unknown.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "secondary" => Variant::Secondary,
            "outline" => Variant::Outline,
            "ghost" => Variant::Ghost,
            _ => Variant::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Primary => "primary",
            Variant::Secondary => "secondary",
            Variant::Outline => "outline",
            Variant::Ghost => "ghost",
        }
    }
}

impl From<String> for Variant {
    fn from(name: String) -> Self {
        Variant::parse(&name)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    /// Parse a size name, falling back to `Md` for anything unknown.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sm" => Size::Sm,
            "lg" => Size::Lg,
            _ => Size::Md,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Sm => "sm",
            Size::Md => "md",
            Size::Lg => "lg",
        }
    }
}

impl From<String> for Size {
    fn from(name: String) -> Self {
        Size::parse(&name)
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.as_str().to_string()
    }
}

/// Colour roles for one variant, as theme token keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStyle {
    /// `None` means transparent.
    pub background: Option<&'static str>,
    pub foreground: &'static str,
    /// `None` means no visible border.
    pub border: Option<&'static str>,
    pub shadow: Option<&'static str>,
    pub hover_background: &'static str,
    pub hover_foreground: &'static str,
    pub ripple: &'static str,
}

pub fn variant_style(variant: Variant) -> VariantStyle {
    match variant {
        Variant::Primary => VariantStyle {
            background: Some(tokens::BUTTON_PRIMARY),
            foreground: tokens::TEXT_PRIMARY,
            border: None,
            shadow: Some(tokens::SHADOW),
            hover_background: tokens::BUTTON_HOVER_PRIMARY,
            hover_foreground: tokens::TEXT_PRIMARY,
            ripple: tokens::RIPPLE_PRIMARY,
        },
        Variant::Secondary => VariantStyle {
            background: Some(tokens::SECONDARY_TINT),
            foreground: tokens::ELECTRIC_BLUE,
            border: Some(tokens::ELECTRIC_BLUE),
            shadow: Some(tokens::SHADOW),
            hover_background: tokens::SECONDARY_HOVER,
            hover_foreground: tokens::NEON_CYAN,
            ripple: tokens::RIPPLE_SECONDARY,
        },
        Variant::Outline => VariantStyle {
            background: None,
            foreground: tokens::TEXT_PRIMARY,
            border: Some(tokens::TEXT_PRIMARY),
            shadow: Some(tokens::SHADOW),
            hover_background: tokens::OVERLAY_LIGHT,
            hover_foreground: tokens::TEXT_PRIMARY,
            ripple: tokens::RIPPLE_NEUTRAL,
        },
        Variant::Ghost => VariantStyle {
            background: None,
            foreground: tokens::ELECTRIC_BLUE,
            border: None,
            shadow: None,
            hover_background: tokens::GHOST_HOVER,
            hover_foreground: tokens::NEON_CYAN,
            ripple: tokens::RIPPLE_NEUTRAL,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontScale {
    Small,
    Medium,
    Large,
}

/// Spacing for one size, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeStyle {
    pub padding_x: u16,
    pub padding_y: u16,
    pub font: FontScale,
}

pub fn size_style(size: Size) -> SizeStyle {
    match size {
        Size::Sm => SizeStyle {
            padding_x: 1,
            padding_y: 0,
            font: FontScale::Small,
        },
        Size::Md => SizeStyle {
            padding_x: 2,
            padding_y: 0,
            font: FontScale::Medium,
        },
        Size::Lg => SizeStyle {
            padding_x: 3,
            padding_y: 1,
            font: FontScale::Large,
        },
    }
}

/// Resolve raw variant and size names straight to their style records.
pub fn resolve_style(variant: &str, size: &str) -> (VariantStyle, SizeStyle) {
    (
        variant_style(Variant::parse(variant)),
        size_style(Size::parse(size)),
    )
}
