use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::HOLDING_TANK;

/// Chart colors handed out to buckets in settings order
const BUCKET_PALETTE: [Color; 6] = [
    Color::Rgb(0x44, 0xFF, 0x88),
    Color::Rgb(0x44, 0xDD, 0xFF),
    Color::Rgb(0xFF, 0xD7, 0x00),
    Color::Rgb(0xCC, 0x66, 0xFF),
    Color::Rgb(0x44, 0x88, 0xFF),
    Color::Rgb(0xFF, 0x44, 0x44),
];

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub purple: Color,
    pub selection_bg: Color,
    /// Per-bucket colors for column headers and chart series
    pub bucket_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            bucket_colors: HashMap::new(),
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
    /// Build a theme from `[ui]` preferences. Buckets without an explicit
    /// `[ui.bucket_colors]` entry get palette colors in order.
    pub fn from_config(ui: &UiConfig, buckets: &[String]) -> Self {
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
                    "green" => theme.green = color,
                    "purple" => theme.purple = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }

        for (i, bucket) in buckets.iter().enumerate() {
            let color = ui
                .bucket_colors
                .get(bucket)
                .and_then(|v| parse_hex_color(v))
                .unwrap_or(BUCKET_PALETTE[i % BUCKET_PALETTE.len()]);
            theme.bucket_colors.insert(bucket.clone(), color);
        }
        let tank = ui
            .bucket_colors
            .get(HOLDING_TANK)
            .and_then(|v| parse_hex_color(v))
            .unwrap_or(theme.dim);
        theme.bucket_colors.insert(HOLDING_TANK.to_string(), tank);

        theme
    }

    /// Color for a bucket, falling back to the text color
    pub fn bucket_color(&self, bucket: &str) -> Color {
        self.bucket_colors.get(bucket).copied().unwrap_or(self.text)
    }
}
