//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) are provided; a `custom` scheme
//! starts from the dark palette and applies hex overrides from the config.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used when drawing the tree screen.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub header_fg: Color,
    pub dir_fg: Color,
    pub file_fg: Color,
    pub connector_fg: Color,
    pub cursor_fg: Color,
    pub legend_fg: Color,
    pub error_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        header_fg: Color::Rgb(205, 214, 244),    // #cdd6f4 (text)
        dir_fg: Color::Rgb(137, 180, 250),       // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),      // #cdd6f4
        connector_fg: Color::Rgb(108, 112, 134), // #6c7086 (overlay0)
        cursor_fg: Color::Rgb(166, 227, 161),    // #a6e3a1 (green)
        legend_fg: Color::Rgb(127, 132, 156),    // #7f849c (overlay1)
        error_fg: Color::Rgb(243, 139, 168),     // #f38ba8 (red)
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        header_fg: Color::Rgb(76, 79, 105),      // #4c4f69 (text)
        dir_fg: Color::Rgb(30, 102, 245),        // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),        // #4c4f69
        connector_fg: Color::Rgb(156, 160, 176), // #9ca0b0 (overlay0)
        cursor_fg: Color::Rgb(64, 160, 43),      // #40a02b (green)
        legend_fg: Color::Rgb(140, 143, 161),    // #8c8fa1 (overlay1)
        error_fg: Color::Rgb(210, 15, 57),       // #d20f39 (red)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn override_color(slot: &mut Color, hex: Option<&str>) {
    if let Some(color) = hex.and_then(parse_hex_color) {
        *slot = color;
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: dark palette with custom hex overrides
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    override_color(&mut theme.header_fg, custom.header_fg.as_deref());
    override_color(&mut theme.dir_fg, custom.dir_fg.as_deref());
    override_color(&mut theme.file_fg, custom.file_fg.as_deref());
    override_color(&mut theme.connector_fg, custom.connector_fg.as_deref());
    override_color(&mut theme.cursor_fg, custom.cursor_fg.as_deref());
    override_color(&mut theme.legend_fg, custom.legend_fg.as_deref());
    override_color(&mut theme.error_fg, custom.error_fg.as_deref());
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#1a1b26"), Some(Color::Rgb(26, 27, 38)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_resolve_default_is_dark() {
        let theme = resolve_theme(&ThemeConfig::default());
        assert_eq!(theme.dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_resolve_light_theme() {
        let config = ThemeConfig {
            scheme: Some("light".to_string()),
            custom: None,
        };
        assert_eq!(resolve_theme(&config).dir_fg, Color::Rgb(30, 102, 245));
    }

    #[test]
    fn test_resolve_custom_overrides() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                dir_fg: Some("#1a1b26".to_string()),
                error_fg: Some("#not-a-color".to_string()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.dir_fg, Color::Rgb(26, 27, 38));
        // Invalid hex keeps the dark default
        assert_eq!(theme.error_fg, dark_theme().error_fg);
        assert_eq!(theme.file_fg, dark_theme().file_fg);
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_dark() {
        let config = ThemeConfig {
            scheme: Some("neon".to_string()),
            custom: None,
        };
        assert_eq!(resolve_theme(&config).cursor_fg, dark_theme().cursor_fg);
    }
}
