//! Hex color text for editing vector colors.
//!
//! Colors are written as `#AARRGGBB`, alpha first, the way Qt prints
//! `HexArgb` colors. Components map to a [`Vec4`] in RGBA order.

use glam::Vec4;

/// Parse `#AARRGGBB` (leading `#` optional) into an RGBA vector in `[0, 1]`.
pub fn parse_hex_argb(text: &str) -> Option<Vec4> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 8 || !hex.is_ascii() {
        return None;
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (a, r, g, b) = (byte(0)?, byte(2)?, byte(4)?, byte(6)?);

    Some(Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0)
}

/// Format an RGBA vector as `#aarrggbb`.
///
/// Components are scaled to 0..=255 and truncated, not rounded.
pub fn to_hex_argb(color: Vec4) -> String {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).to_array();
    let [r, g, b, a] = c.map(|v| v as u8);
    format!("#{:02x}{:02x}{:02x}{:02x}", a, r, g, b)
}
