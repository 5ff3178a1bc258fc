//! Theme colors, optionally read from a kitty-style color file
//! (`key #rrggbb` per line) named in the config.

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,      // Focused borders, highlights
    pub danger: Color,      // Errors
    pub success: Color,     // Response box, picked files
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints, placeholders
    pub bg_selected: Color, // Selection background
    pub inactive: Color,    // Unfocused borders
    pub header: Color,      // Title and section headers
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(245, 194, 231),
        }
    }
}

impl Theme {
    /// Theme from `path` if given and readable, built-in colors otherwise
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_kitty_conf(&content),
            Err(e) => {
                tracing::warn!("Cannot read theme {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Map kitty color keys onto the theme, keeping defaults for missing keys
    pub fn from_kitty_conf(content: &str) -> Self {
        let colors = Self::parse_kitty_conf(content);
        let base = Self::default();

        Self {
            accent: pick_color(&colors, &["color2", "color10"], base.accent),
            danger: pick_color(&colors, &["color1", "color9"], base.danger),
            success: pick_color(&colors, &["color10", "color2"], base.success),
            text: pick_color(&colors, &["foreground"], base.text),
            text_dim: pick_color(&colors, &["color8"], base.text_dim),
            bg_selected: pick_color(&colors, &["selection_background", "color0"], base.bg_selected),
            inactive: pick_color(&colors, &["inactive_border_color", "color8"], base.inactive),
            header: pick_color(&colors, &["color5", "color13"], base.header),
        }
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

/// First key present in `colors`, else `fallback`
fn pick_color(colors: &HashMap<String, Color>, keys: &[&str], fallback: Color) -> Color {
    keys.iter()
        .find_map(|k| colors.get(*k))
        .copied()
        .unwrap_or(fallback)
}
