//! RGBA color type and the fixed drawing palette.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use sketchboard::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new fully opaque color from RGB components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new color from RGBA components.
    ///
    /// All values should be in the range 0.0 to 1.0.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined yellow color (R=1.0, G=1.0, B=0.0)
pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined orange color (R=1.0, G=0.5, B=0.0)
pub const ORANGE: Color = Color {
    r: 1.0,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

/// Predefined pink color (R=1.0, G=0.4, B=0.7) - the startup brush color
pub const PINK: Color = Color {
    r: 1.0,
    g: 0.4,
    b: 0.7,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0) - the default background
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined purple color
pub const PURPLE: Color = Color {
    r: 0.5,
    g: 0.0,
    b: 0.5,
    a: 1.0,
};

/// Predefined cyan color
pub const CYAN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined magenta color
pub const MAGENTA: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined teal color
pub const TEAL: Color = Color {
    r: 0.0,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Predefined brown color
pub const BROWN: Color = Color {
    r: 0.55,
    g: 0.27,
    b: 0.07,
    a: 1.0,
};

/// Predefined gray color
pub const GRAY: Color = Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Predefined navy color
pub const NAVY: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.5,
    a: 1.0,
};

/// Predefined lime color
pub const LIME: Color = Color {
    r: 0.5,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

// ============================================================================
// Fixed Palette
// ============================================================================

/// The fixed 16-entry drawing palette, indexed 0..=15.
///
/// Entry order is part of the public contract: randomized recoloring draws an
/// index into this table, and the name of each entry is the deterministic
/// lookup scheme used by configuration files and the script host.
pub const PALETTE: [(&str, Color); 16] = [
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("orange", ORANGE),
    ("pink", PINK),
    ("white", WHITE),
    ("black", BLACK),
    ("purple", PURPLE),
    ("cyan", CYAN),
    ("magenta", MAGENTA),
    ("teal", TEAL),
    ("brown", BROWN),
    ("gray", GRAY),
    ("navy", NAVY),
    ("lime", LIME),
];

/// Returns the palette color at `index`, or `None` when out of range.
///
/// Indices 0..=15 are valid; the index-to-color mapping is fixed for the
/// lifetime of the program.
pub fn palette_color(index: usize) -> Option<Color> {
    PALETTE.get(index).map(|(_, color)| *color)
}

/// Maps color name strings to palette colors.
///
/// Used by the configuration system and the script host to parse color names.
/// Matching is case-insensitive.
pub fn name_to_color(name: &str) -> Option<Color> {
    let lower = name.to_ascii_lowercase();
    PALETTE
        .iter()
        .find(|(entry, _)| *entry == lower)
        .map(|(_, color)| *color)
}

/// Maps a color back to its palette name, or "custom" for off-palette colors.
pub fn color_to_name(color: &Color) -> &'static str {
    PALETTE
        .iter()
        .find(|(_, entry)| entry == color)
        .map(|(name, _)| *name)
        .unwrap_or("custom")
}
