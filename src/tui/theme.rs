use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::task::{Priority, Status};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Badge color per priority wire name
    pub priority_colors: HashMap<String, Color>,
    /// Per-label colors
    pub label_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut priority_colors = HashMap::new();
        priority_colors.insert("LOW".into(), Color::Rgb(0x44, 0xFF, 0x88));
        priority_colors.insert("MEDIUM".into(), Color::Rgb(0xFF, 0xD7, 0x00));
        priority_colors.insert("HIGH".into(), Color::Rgb(0xFF, 0x99, 0x33));
        priority_colors.insert("URGENT".into(), Color::Rgb(0xFF, 0x44, 0x44));
        priority_colors.insert("CRITICAL".into(), Color::Rgb(0xFF, 0x88, 0x88));
        priority_colors.insert("BLOCKER".into(), Color::Rgb(0xFF, 0x22, 0x22));
        priority_colors.insert("TRIVIAL".into(), Color::Rgb(0x9A, 0x96, 0xA8));

        let mut label_colors = HashMap::new();
        label_colors.insert("frontend".into(), Color::Rgb(0x44, 0xDD, 0xFF));
        label_colors.insert("backend".into(), Color::Rgb(0x44, 0x88, 0xFF));
        label_colors.insert("urgent".into(), Color::Rgb(0xFB, 0x41, 0x96));
        label_colors.insert("bug".into(), Color::Rgb(0xFF, 0x44, 0x44));
        label_colors.insert("feature".into(), Color::Rgb(0x44, 0xFF, 0x88));

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            priority_colors,
            label_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "cyan" => theme.cyan = color,
                    "purple" => theme.purple = color,
                    "blue" => theme.blue = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => {}
                }
            }
        }

        for (name, value) in &ui.priority_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.priority_colors.insert(name.to_ascii_uppercase(), color);
            }
        }

        for (label, value) in &ui.label_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.label_colors.insert(label.clone(), color);
            }
        }

        theme
    }

    /// Badge color for a priority. Unknown priorities have none and render unstyled.
    pub fn priority_color(&self, priority: &Priority) -> Option<Color> {
        match priority {
            Priority::Other(_) => None,
            p => self.priority_colors.get(p.as_str()).copied(),
        }
    }

    /// Color for a label; labels without one of their own use blue
    pub fn label_color(&self, label: &str) -> Color {
        self.label_colors.get(label).copied().unwrap_or(self.blue)
    }

    pub fn status_color(&self, status: &Status) -> Color {
        match status {
            Status::Open => self.cyan,
            Status::InProgress => self.highlight,
            Status::Closed => self.green,
            Status::Other(_) => self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_every_known_priority_has_a_color() {
        let theme = Theme::default();
        for p in Priority::ALL {
            assert!(theme.priority_color(&p).is_some(), "{} has no color", p);
        }
        assert_eq!(theme.priority_color(&Priority::Other("SOMEDAY".into())), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.priority_colors.insert("blocker".into(), "#112233".into());
        ui.label_colors.insert("infra".into(), "#445566".into());
        ui.colors.insert("text".into(), "not a color".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(
            theme.priority_color(&Priority::Blocker),
            Some(Color::Rgb(0x11, 0x22, 0x33))
        );
        assert_eq!(theme.label_color("infra"), Color::Rgb(0x44, 0x55, 0x66));
        // Unparseable values leave the default
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn test_label_color_fallback() {
        let theme = Theme::default();
        assert_eq!(theme.label_color("bug"), Color::Rgb(0xFF, 0x44, 0x44));
        assert_eq!(theme.label_color("unknown"), theme.blue);

        let mut ui = UiConfig::default();
        ui.colors.insert("blue".into(), "#0000FF".into());
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.label_color("unknown"), Color::Rgb(0, 0, 0xFF));
    }

    #[test]
    fn test_status_color() {
        let theme = Theme::default();
        assert_eq!(theme.status_color(&Status::InProgress), theme.highlight);
        assert_eq!(theme.status_color(&Status::Other("X".into())), theme.text);
    }
}
