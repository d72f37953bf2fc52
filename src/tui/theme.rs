use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{TaskStatus, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub header: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub cell_cursor_bg: Color,
    pub edit_bg: Color,
    pub drop_target_bg: Color,
    /// Badge text drawn on top of tag/status colors
    pub badge_fg: Color,
    pub tag_colors: HashMap<String, Color>,
    pub status_colors: HashMap<TaskStatus, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut tag_colors = HashMap::new();
        tag_colors.insert("Content".into(), Color::Rgb(0x44, 0xDD, 0xFF));
        tag_colors.insert("Design".into(), Color::Rgb(0xCC, 0x66, 0xFF));
        tag_colors.insert("Development".into(), Color::Rgb(0x44, 0x88, 0xFF));
        tag_colors.insert("Asset".into(), Color::Rgb(0xFF, 0xD7, 0x00));

        let mut status_colors = HashMap::new();
        status_colors.insert(TaskStatus::NotStarted, Color::Rgb(0x9A, 0x96, 0xB8));
        status_colors.insert(TaskStatus::Started, Color::Rgb(0x44, 0xFF, 0x88));
        status_colors.insert(TaskStatus::Completed, Color::Rgb(0x44, 0x88, 0xFF));

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            header: Color::Rgb(0x7D, 0x78, 0xBF),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            cell_cursor_bg: Color::Rgb(0x5A, 0x1E, 0x52),
            edit_bg: Color::Rgb(0x1F, 0x1F, 0x3A),
            drop_target_bg: Color::Rgb(0x14, 0x2E, 0x3D),
            badge_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            tag_colors,
            status_colors,
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
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "header" => theme.header = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_border" => theme.selection_border = color,
                "cell_cursor_bg" => theme.cell_cursor_bg = color,
                "edit_bg" => theme.edit_bg = color,
                "drop_target_bg" => theme.drop_target_bg = color,
                "badge_fg" => theme.badge_fg = color,
                _ => tracing::warn!(key = %key, "unknown theme color"),
            }
        }

        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.clone(), color);
            }
        }

        for (status, value) in &ui.status_colors {
            if let (Some(status), Some(color)) =
                (TaskStatus::parse_loose(status), parse_hex_color(value))
            {
                theme.status_colors.insert(status, color);
            }
        }

        theme
    }

    /// Get the color for a tag, falling back to dim
    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(self.dim)
    }

    /// Get the badge color for a status
    pub fn status_color(&self, status: TaskStatus) -> Color {
        self.status_colors.get(&status).copied().unwrap_or(self.text)
    }
}
