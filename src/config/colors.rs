//! Overlay palette.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub background: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub source: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub body: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub arrow: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x23, 0x23, 0x23),
            border: Color::Rgb(0x44, 0x44, 0x44),
            title: Color::Rgb(0xff, 0xff, 0xff),
            source: Color::Rgb(0xbb, 0xbb, 0xbb),
            body: Color::Rgb(0xec, 0xec, 0xec),
            link: Color::Rgb(0x40, 0xa9, 0xff),
            arrow: Color::Rgb(0x66, 0x66, 0x66),
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a named color ("DarkGray", case-insensitive) or "#RRGGBB" / "#RGB".
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit: F -> FF
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}

/// Approximate RGB for a color, used when blending for opacity.
///
/// `Reset` and indexed colors have no fixed value and return `None`.
pub fn to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0x80, 0x00, 0x00),
        Color::Green => (0x00, 0x80, 0x00),
        Color::Yellow => (0x80, 0x80, 0x00),
        Color::Blue => (0x00, 0x00, 0x80),
        Color::Magenta => (0x80, 0x00, 0x80),
        Color::Cyan => (0x00, 0x80, 0x80),
        Color::Gray => (0xc0, 0xc0, 0xc0),
        Color::DarkGray => (0x80, 0x80, 0x80),
        Color::LightRed => (0xff, 0x00, 0x00),
        Color::LightGreen => (0x00, 0xff, 0x00),
        Color::LightYellow => (0xff, 0xff, 0x00),
        Color::LightBlue => (0x00, 0x00, 0xff),
        Color::LightMagenta => (0xff, 0x00, 0xff),
        Color::LightCyan => (0x00, 0xff, 0xff),
        Color::White => (0xff, 0xff, 0xff),
        _ => return None,
    };
    Some(rgb)
}

/// Mix `fg` into `bg`; `opacity` 1.0 is pure `fg`.
pub fn blend(fg: Color, bg: Color, opacity: f32) -> Color {
    let (Some(f), Some(b)) = (to_rgb(fg), to_rgb(bg)) else {
        return fg;
    };
    let t = opacity.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f32 + (f as f32 - b as f32) * t).round() as u8;
    Color::Rgb(mix(f.0, b.0), mix(f.1, b.1), mix(f.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("darkgrey").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#40a9ff").unwrap(), Color::Rgb(0x40, 0xa9, 0xff));
        assert_eq!(parse_color_string("#FFF").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
        assert!(parse_color_string("#ééé").is_err());
    }

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn test_blend_unknown_color_passes_through() {
        assert_eq!(blend(Color::Reset, Color::Black, 0.5), Color::Reset);
        assert_eq!(blend(Color::White, Color::Indexed(17), 0.5), Color::White);
    }
}
