//! Background shorthand and longhand parsing.
//!
//! Produces a [`Background`] description the border stage consumes: an
//! optional fill color and an optional image brush. Image paths are only
//! validated here; actual pixel loading happens later through the asset
//! broker so a slow disk never stalls a build.

use crate::geometry::Vec2;
use crate::style::cascade::ResolvedStyle;
use crate::style::color::{parse_color, Color};
use crate::style::length::safe_parse_f32;
use crate::style::lexer::{tokenize_value, ValueToken};

const VALID_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".tga"];
const INVALID_PATH_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// How an image brush tiles when the widget is larger than the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tiling {
    #[default]
    NoTile,
    Horizontal,
    Vertical,
    Both,
}

/// A validated image reference plus its draw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBrush {
    /// Path to the image asset; resolved to pixels by the asset broker.
    pub path: String,
    /// Explicit draw size, when `backgroundSize` gave one.
    pub size: Option<Vec2>,
    pub tiling: Tiling,
}

/// The resolved background of one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Background {
    pub color: Option<Color>,
    pub image: Option<ImageBrush>,
    /// Normalized anchor from `background-position`, when given.
    pub position: Option<Vec2>,
}

impl Background {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.image.is_none()
    }
}

/// Parse `backgroundImage` plus `backgroundSize` into an image brush.
///
/// Accepts `url(path)` or a bare path, with optional quotes. Paths with
/// filesystem-hostile characters or unknown extensions are rejected with a
/// warning, never an error.
pub fn parse_background_image(value: &str, size: Option<&str>) -> Option<ImageBrush> {
    let mut path = value.trim();
    if let Some(inner) = path
        .strip_prefix("url(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        path = inner.trim();
    }
    let path = path.trim_matches(|c| c == '\'' || c == '"');

    if path.is_empty() {
        return None;
    }
    if path.contains(INVALID_PATH_CHARS) {
        log::warn!("invalid characters in image path: {path}");
        return None;
    }
    let lower = path.to_ascii_lowercase();
    if !VALID_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        log::warn!("unsupported image file extension: {path}");
        return None;
    }

    let mut brush = ImageBrush {
        path: path.to_owned(),
        size: None,
        tiling: Tiling::NoTile,
    };

    if let Some(size) = size {
        let values: Vec<&str> = size.split_whitespace().collect();
        match values.as_slice() {
            ["cover"] | ["auto"] => brush.tiling = Tiling::NoTile,
            ["contain"] => brush.tiling = Tiling::Both,
            [single] => {
                let n = safe_parse_f32(single.trim_end_matches("px"));
                brush.size = Some(Vec2::splat(n));
            }
            [x, y] => {
                brush.tiling = Tiling::Both;
                brush.size = Some(Vec2::new(
                    safe_parse_f32(x.trim_end_matches("px")),
                    safe_parse_f32(y.trim_end_matches("px")),
                ));
            }
            _ => {}
        }
    }

    Some(brush)
}

/// Apply `backgroundRepeat` to an already-parsed brush.
pub fn apply_background_repeat(repeat: &str, brush: &mut ImageBrush) {
    brush.tiling = match repeat {
        "no-repeat" => Tiling::NoTile,
        "repeat" => Tiling::Both,
        "repeat-x" => Tiling::Horizontal,
        "repeat-y" => Tiling::Vertical,
        _ => return,
    };
}

/// Normalize `background-position` keywords and percentages to `0..=1`.
pub fn parse_background_position(position: &str) -> Vec2 {
    let component = |value: &str, start: &str, end: &str| -> f32 {
        match value {
            v if v == start => 0.0,
            "center" => 0.5,
            v if v == end => 1.0,
            v if v.ends_with('%') => {
                (safe_parse_f32(v.trim_end_matches('%')) / 100.0).clamp(0.0, 1.0)
            }
            _ => 0.5,
        }
    };

    let values: Vec<&str> = position.split_whitespace().collect();
    match values.as_slice() {
        [only] => {
            let x = component(only, "left", "right");
            Vec2::new(x, component(only, "top", "bottom"))
        }
        [x, y, ..] => Vec2::new(component(x, "left", "right"), component(y, "top", "bottom")),
        [] => Vec2::splat(0.5),
    }
}

const REPEAT_KEYWORDS: &[&str] = &["repeat-x", "repeat-y", "repeat", "space", "round", "no-repeat"];
const ATTACHMENT_KEYWORDS: &[&str] = &["scroll", "fixed", "local"];
const POSITION_KEYWORDS: &[&str] = &["left", "right", "top", "bottom", "center"];

/// Split the `background` shorthand into its longhand pieces.
///
/// This is heuristic, like all shorthand parsing: image by `url()`, repeat
/// and attachment by keyword, size after a `/`, a trailing color token, and
/// everything else position. Attachment is parsed and dropped; there is no
/// scrolling-viewport distinction in the native tree.
pub fn parse_background_shorthand(value: &str) -> Background {
    let mut image_token = None;
    let mut repeat = None;
    let mut size = None;
    let mut color = None;
    let mut after_slash = false;
    let mut position_buffer: Vec<String> = Vec::new();

    let tokens = tokenize_value(value);
    let mut index = 0;
    while index < tokens.len() {
        let (kind, text) = &tokens[index];
        match kind {
            ValueToken::Url => image_token = Some(text.clone()),
            ValueToken::Slash => after_slash = true,
            ValueToken::HexColor => color = parse_color(text),
            ValueToken::FunctionOpen => {
                // A color function: re-lex its full call text through the
                // color parser, then skip to its closing paren.
                let close = tokens[index..]
                    .iter()
                    .position(|(k, _)| *k == ValueToken::ParenClose)
                    .map(|offset| index + offset);
                if let Some(close) = close {
                    let call: String = tokens[index..=close]
                        .iter()
                        .map(|(_, t)| t.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    color = parse_color(&call).or(color);
                    index = close;
                }
            }
            ValueToken::Ident if REPEAT_KEYWORDS.contains(&text.as_str()) => {
                repeat = Some(text.clone());
            }
            ValueToken::Ident if ATTACHMENT_KEYWORDS.contains(&text.as_str()) => {}
            ValueToken::Ident if POSITION_KEYWORDS.contains(&text.as_str()) => {
                position_buffer.push(text.clone());
            }
            ValueToken::Ident => {
                // The color token comes last in the shorthand; a bare word
                // that names a color wins over treating it as position noise.
                if let Some(named) = parse_color(text) {
                    color = Some(named);
                }
            }
            ValueToken::Dimension | ValueToken::Number => {
                if after_slash {
                    size = Some(text.clone());
                    after_slash = false;
                } else {
                    position_buffer.push(text.clone());
                }
            }
            _ => {}
        }
        index += 1;
    }

    let mut background = Background {
        color,
        image: None,
        position: None,
    };

    if let Some(image_token) = image_token {
        let mut brush = parse_background_image(&image_token, size.as_deref());
        if let (Some(brush), Some(repeat)) = (brush.as_mut(), repeat.as_deref()) {
            apply_background_repeat(repeat, brush);
        }
        background.image = brush;
    }

    if !position_buffer.is_empty() {
        background.position = Some(parse_background_position(&position_buffer.join(" ")));
    }

    background
}

/// Resolve all background properties of a style, longhands over shorthand.
pub fn parse_background_props(style: &ResolvedStyle) -> Background {
    let mut background = match style.str("background") {
        Some(shorthand) => parse_background_shorthand(shorthand),
        None => Background::default(),
    };

    if let Some(color) = style.str("backgroundColor") {
        background.color = parse_color(color).or(background.color);
    }

    if let Some(image) = style.str("backgroundImage") {
        background.image = parse_background_image(image, style.str("backgroundSize"));
    }

    if let (Some(repeat), Some(brush)) =
        (style.str("backgroundRepeat"), background.image.as_mut())
    {
        apply_background_repeat(repeat, brush);
    }

    if let Some(position) = style.str("backgroundPosition") {
        background.position = Some(parse_background_position(position));
    }

    background
}
