//! Theme — the read-only view of `StyleSettings` every template renders with.
//!
//! Accent colour and scales are resolved once per render so that equivalent
//! roles (section titles, dividers, pills) get identical values in every
//! template.

use crate::models::resume::{StyleSettings, DEFAULT_ACCENT};

pub const MIN_SCALE: f32 = 0.9;
pub const MAX_SCALE: f32 = 1.2;

/// Base body text size before scaling.
const BASE_TEXT_PT: f32 = 10.5;
/// Base unitless line height before scaling.
const BASE_LINE_HEIGHT: f32 = 1.4;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Normalized `#rrggbb` accent.
    pub accent: String,
    pub text_scale: f32,
    pub line_height_scale: f32,
}

impl Theme {
    pub fn from_style(style: &StyleSettings) -> Self {
        Theme {
            accent: normalize_hex(&style.accent_color)
                .unwrap_or_else(|| DEFAULT_ACCENT.to_string()),
            text_scale: clamp_scale(style.text_scale),
            line_height_scale: clamp_scale(style.line_height_scale),
        }
    }

    /// Font size for a role whose unscaled size is `base_pt`.
    pub fn pt(&self, base_pt: f32) -> String {
        format!("{:.2}pt", base_pt * self.text_scale)
    }

    pub fn body_size(&self) -> String {
        self.pt(BASE_TEXT_PT)
    }

    pub fn line_height(&self) -> String {
        format!("{:.2}", BASE_LINE_HEIGHT * self.line_height_scale)
    }

    /// Accent at low opacity, for pill and band backgrounds.
    pub fn accent_soft(&self) -> String {
        format!("{}1f", self.accent)
    }
}

fn clamp_scale(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}

/// Accepts `#rgb` or `#rrggbb` (case-insensitive) and returns lowercase `#rrggbb`.
fn normalize_hex(raw: &str) -> Option<String> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let full = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };
    Some(format!("#{}", full.to_ascii_lowercase()))
}
