//! CSS color parsing into normalized linear color values.

use crate::style::lexer::{tokenize_value, ValueToken};

/// An RGBA color with channels normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

/// Parse a CSS color value.
///
/// Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, and the common named colors. Unparseable values yield
/// `None`; callers fall back to their defaults, never fail.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let tokens = tokenize_value(value);
    if let Some((ValueToken::FunctionOpen, name)) = tokens.first() {
        let args: Vec<f32> = tokens[1..]
            .iter()
            .filter_map(|(kind, text)| match kind {
                ValueToken::Number => text.parse::<f32>().ok(),
                ValueToken::Dimension if text.ends_with('%') => {
                    text.trim_end_matches('%').parse::<f32>().ok()
                }
                _ => None,
            })
            .collect();
        return match name.trim_end_matches('(') {
            "rgb" | "rgba" => parse_rgb_args(&args),
            "hsl" | "hsla" => parse_hsl_args(&args),
            _ => None,
        };
    }

    named_color(value)
}

fn parse_hex(hex: &str) -> Option<Color> {
    // Slicing below assumes one byte per digit.
    if !hex.is_ascii() {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        // Short forms repeat each digit: #f80 == #ff8800.
        3 => (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255),
        4 => (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, digit(3)? * 17),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };

    Some(Color::rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ))
}

fn parse_rgb_args(args: &[f32]) -> Option<Color> {
    let (&r, &g, &b) = match args {
        [r, g, b] | [r, g, b, _] => (r, g, b),
        _ => return None,
    };
    let a = args.get(3).copied().unwrap_or(1.0);
    Some(Color::rgba(
        (r / 255.0).clamp(0.0, 1.0),
        (g / 255.0).clamp(0.0, 1.0),
        (b / 255.0).clamp(0.0, 1.0),
        a.clamp(0.0, 1.0),
    ))
}

fn parse_hsl_args(args: &[f32]) -> Option<Color> {
    let (&h, &s, &l) = match args {
        [h, s, l] | [h, s, l, _] => (h, s, l),
        _ => return None,
    };
    let a = args.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);

    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Some(Color::rgba(r + m, g + m, b + m, a))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::from_u8(255, 0, 0),
        "green" => Color::from_u8(0, 128, 0),
        "lime" => Color::from_u8(0, 255, 0),
        "blue" => Color::from_u8(0, 0, 255),
        "yellow" => Color::from_u8(255, 255, 0),
        "cyan" | "aqua" => Color::from_u8(0, 255, 255),
        "magenta" | "fuchsia" => Color::from_u8(255, 0, 255),
        "orange" => Color::from_u8(255, 165, 0),
        "purple" => Color::from_u8(128, 0, 128),
        "pink" => Color::from_u8(255, 192, 203),
        "brown" => Color::from_u8(165, 42, 42),
        "gray" | "grey" => Color::from_u8(128, 128, 128),
        "silver" => Color::from_u8(192, 192, 192),
        "maroon" => Color::from_u8(128, 0, 0),
        "olive" => Color::from_u8(128, 128, 0),
        "navy" => Color::from_u8(0, 0, 128),
        "teal" => Color::from_u8(0, 128, 128),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_long_form() {
        assert_eq!(parse_color("#ff0000"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(
            parse_color("#00000080"),
            Some(Color::rgba(0.0, 0.0, 0.0, 128.0 / 255.0))
        );
    }

    #[test]
    fn hex_short_form_repeats_digits() {
        assert_eq!(parse_color("#f80"), parse_color("#ff8800"));
        assert_eq!(parse_color("#f808"), parse_color("#ff880088"));
    }

    #[test]
    fn rgb_function() {
        assert_eq!(
            parse_color("rgb(255, 128, 0)"),
            Some(Color::rgb(1.0, 128.0 / 255.0, 0.0))
        );
        assert_eq!(
            parse_color("rgba(0, 0, 255, 0.5)"),
            Some(Color::rgba(0.0, 0.0, 1.0, 0.5))
        );
    }

    #[test]
    fn hsl_function() {
        // hsl(0, 100%, 50%) is pure red.
        let red = parse_color("hsl(0, 100%, 50%)").unwrap();
        assert!((red.r - 1.0).abs() < 1e-5);
        assert!(red.g.abs() < 1e-5);
        assert!(red.b.abs() < 1e-5);
    }

    #[test]
    fn named_colors() {
        assert_eq!(parse_color("red"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(parse_color("Transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#zz0000"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn non_ascii_hex_is_none() {
        assert_eq!(parse_color("#\u{e9}a"), None);
        assert_eq!(parse_color("#ff\u{fc}0"), None);
    }
}
