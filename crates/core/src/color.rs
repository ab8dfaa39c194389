//! Agent color assignment and label contrast.
//!
//! Both chart surfaces resolve colors through this module only, so a bar
//! and its label text look the same in the panel and in the exported image.

use serde::Serialize;

/// Palette used for agents without a stored color.
pub const AGENT_PALETTE: [&str; 10] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#84cc16", "#f97316",
    "#ec4899", "#22c55e",
];

/// Fill for bars whose task is unassigned or names an unknown agent.
pub const DEFAULT_BAR_COLOR: &str = "#3b82f6";

/// Brightness reported for colors that cannot be parsed (`#888888`).
const FALLBACK_BRIGHTNESS: u8 = 136;

/// Brightness above which a fill counts as light.
const LIGHT_THRESHOLD: u8 = 150;

/// Text shade to draw on top of a colored fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Contrast {
    /// Light fill, dark text.
    Light,
    /// Dark fill, light text.
    Dark,
}

impl Contrast {
    pub fn as_str(&self) -> &'static str {
        match self {
            Contrast::Light => "light",
            Contrast::Dark => "dark",
        }
    }

    /// Hex color for text drawn over a fill of this class.
    pub fn text_color(&self) -> &'static str {
        match self {
            Contrast::Light => "#111111",
            Contrast::Dark => "#ffffff",
        }
    }
}

impl std::fmt::Display for Contrast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An sRGB color parsed from `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Perceptual luminance, rounded to the nearest integer.
    pub fn luminance(&self) -> u8 {
        let value =
            0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b);
        value.round().clamp(0.0, 255.0) as u8
    }
}

/// Stable palette color for an agent name.
///
/// Hashes the UTF-16 code units with a 31 multiplier (wrapping at 32 bits)
/// so a name keeps its color across sessions without storing it.
pub fn color_for(name: &str) -> &'static str {
    if name.is_empty() {
        return AGENT_PALETTE[0];
    }
    let hash = name
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
    AGENT_PALETTE[hash as usize % AGENT_PALETTE.len()]
}

/// Luminance of a hex color; malformed input reads as mid gray.
pub fn brightness(hex: &str) -> u8 {
    Rgb::parse(hex)
        .map(|rgb| rgb.luminance())
        .unwrap_or(FALLBACK_BRIGHTNESS)
}

/// Classify a fill color so label text stays readable on it.
pub fn contrast_class(hex: &str) -> Contrast {
    if brightness(hex) > LIGHT_THRESHOLD {
        Contrast::Light
    } else {
        Contrast::Dark
    }
}
