// SPDX-License-Identifier: MIT
//
// Colors and text attributes.
//
// The terminal's classic 8-color palette, addressed through two distinct
// wrappers: `Fg` for SGR 30–37 and `Bg` for SGR 40–47. Keeping them as
// separate types means a foreground can never be passed where a background
// is expected, and there is no arithmetic relating the two.

// ─── Color ───────────────────────────────────────────────────────────────────

/// One of the 8 standard ANSI hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// All hues in palette order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Palette index (0–7).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
        }
    }

    /// Look a hue up by its lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Lowercase name of the hue.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

/// A hue used as the text (foreground) color. SGR 30–37.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fg(pub Color);

impl Fg {
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        30 + self.0.index()
    }
}

/// A hue used as the cell (background) color. SGR 40–47.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bg(pub Color);

impl Bg {
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        40 + self.0.index()
    }
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// A single text attribute.
///
/// Discriminants are the SGR parameter values. The API sets one attribute
/// per call; there is no flag combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Attr {
    /// SGR 0 — everything off.
    #[default]
    Normal = 0,
    /// SGR 1 — increased intensity.
    Bright = 1,
    /// SGR 2 — decreased intensity.
    Dim = 2,
    /// SGR 4 — underline.
    Underscore = 4,
    /// SGR 5 — blink.
    Blink = 5,
    /// SGR 7 — swap foreground and background.
    Reverse = 7,
    /// SGR 8 — invisible text.
    Hidden = 8,
}

impl Attr {
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map an SGR parameter back to an attribute, if it is one of ours.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::Bright),
            2 => Some(Self::Dim),
            4 => Some(Self::Underscore),
            5 => Some(Self::Blink),
            7 => Some(Self::Reverse),
            8 => Some(Self::Hidden),
            _ => None,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
