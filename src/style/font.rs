//! Font and text style resolution.

use std::f32::consts::PI;

use crate::element::PropValue;
use crate::style::cascade::ResolvedStyle;
use crate::style::color::{parse_color, Color};
use crate::style::length::resolve_length;

/// Horizontal text justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextJustify {
    #[default]
    Left,
    Center,
    Right,
}

/// Outline decoration around glyphs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    pub width: Option<f32>,
    pub stroke: Option<String>,
    pub color: Option<Color>,
}

/// The fully resolved font of a text widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size: f32,
    pub color: Option<Color>,
    pub justify: TextJustify,
    pub letter_spacing: f32,
    pub families: Vec<String>,
    /// Typeface name within the family ("Default", "Bold", "Italic", ...).
    pub typeface: String,
    /// Oblique skew in radians.
    pub skew: f32,
    pub outline: Outline,
    pub monospaced: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: None,
            justify: TextJustify::Left,
            letter_spacing: 0.0,
            families: Vec::new(),
            typeface: "Default".to_owned(),
            skew: 0.0,
            outline: Outline::default(),
            monospaced: false,
        }
    }
}

/// Resolve `fontSize`. Strings go through length resolution; non-positive
/// numbers clamp to 12; anything else is the 16-unit default.
pub fn parse_font_size(style: &ResolvedStyle) -> f32 {
    match style.get_value("fontSize") {
        Some(PropValue::Str(s)) => resolve_length(s, style),
        Some(PropValue::Num(n)) => {
            if *n <= 0.0 {
                12.0
            } else {
                *n as f32
            }
        }
        _ => 16.0,
    }
}

pub fn parse_text_align(text_align: &str) -> TextJustify {
    match text_align {
        "center" => TextJustify::Center,
        "right" => TextJustify::Right,
        _ => TextJustify::Left,
    }
}

/// Map `fontWeight` + `fontStyle` to a typeface name.
pub fn parse_typeface(font_style: Option<&str>, font_weight: Option<&str>) -> String {
    let bold = matches!(font_weight, Some("bold") | Some("bolder"));
    let light = matches!(font_weight, Some("light") | Some("lighter"));
    let italic = matches!(font_style, Some("italic"));

    match (bold, light, italic) {
        (true, _, true) => "Bold Italic",
        (true, _, false) => "Bold",
        (false, true, true) => "Light Italic",
        (false, true, false) => "Light",
        (false, false, true) => "Italic",
        (false, false, false) => "Default",
    }
    .to_owned()
}

/// Oblique skew amount in radians, zero for anything but `oblique Ndeg`.
pub fn parse_font_skew(font_style: &str) -> f32 {
    let Some(rest) = font_style.trim().strip_prefix("oblique") else {
        return 0.0;
    };
    let degrees: f32 = rest
        .trim()
        .trim_end_matches("deg")
        .trim()
        .parse()
        .unwrap_or(0.0);
    degrees * PI / 180.0
}

/// Split a `fontFamily` list, honoring quoted names with commas inside.
pub fn parse_font_family(value: &str) -> Vec<String> {
    let mut families = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in value.chars() {
        match ch {
            '"' | '\'' => match quote {
                None => quote = Some(ch),
                Some(q) if q == ch => quote = None,
                Some(_) => current.push(ch),
            },
            ',' if quote.is_none() => {
                let name = current.trim();
                if !name.is_empty() {
                    families.push(name.to_owned());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    let name = current.trim();
    if !name.is_empty() {
        families.push(name.to_owned());
    }

    families
}

const STROKE_KEYWORDS: &[&str] = &[
    "solid", "dashed", "dotted", "double", "groove", "ridge", "inset", "outset", "none",
];

/// Parse the `outline` shorthand: `<width> || <style> || <color>` in any
/// order, each part optional.
pub fn parse_outline(value: &str, style: &ResolvedStyle) -> Outline {
    let mut outline = Outline::default();
    for part in value.split_whitespace() {
        if STROKE_KEYWORDS.contains(&part) {
            outline.stroke = Some(part.to_owned());
        } else if let Some(color) = parse_color(part) {
            outline.color = Some(color);
        } else {
            outline.width = Some(resolve_length(part, style));
        }
    }
    outline
}

/// Resolve every font-affecting property of a style into one [`Font`].
pub fn parse_font(style: &ResolvedStyle) -> Font {
    let mut font = Font {
        size: parse_font_size(style),
        ..Font::default()
    };

    if let Some(color) = style.str("color") {
        font.color = parse_color(color);
    }
    if let Some(align) = style.str("textAlign") {
        font.justify = parse_text_align(align);
    }
    if let Some(spacing) = style.str("letterSpacing") {
        font.letter_spacing = resolve_length(spacing, style);
    }
    if let Some(family) = style.str("fontFamily") {
        font.families = parse_font_family(family);
        font.monospaced = font.families.iter().any(|f| f == "monospace");
    }
    font.typeface = parse_typeface(style.str("fontStyle"), style.str("fontWeight"));
    if let Some(font_style) = style.str("fontStyle") {
        font.skew = parse_font_skew(font_style);
    }

    if let Some(outline) = style.str("outline") {
        font.outline = parse_outline(outline, style);
    }
    // Longhand outline properties override the shorthand.
    if let Some(color) = style.str("outlineColor") {
        font.outline.color = parse_color(color);
    }
    if let Some(width) = style.str("outlineWidth") {
        font.outline.width = Some(resolve_length(width, style));
    }

    font
}
