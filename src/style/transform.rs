//! CSS transform parsing into the native render transform.
//!
//!    Native transforms are strictly 2D: translation, scale, shear (degrees)
//! and rotation (degrees). 3D transform functions collapse to their 2D
//! components; x/y axis rotations have no 2D meaning and are ignored.

use std::f32::consts::PI;

use crate::geometry::Vec2;
use crate::style::cascade::ResolvedStyle;
use crate::style::length::{resolve_length, safe_parse_f32};
use crate::style::lexer::{tokenize_value, ValueToken};

/// A resolved 2D render transform, rotation and shear in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub translation: Vec2,
    pub scale: Vec2,
    pub shear: Vec2,
    pub angle: f32,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: Vec2::ONE,
            shear: Vec2::ZERO,
            angle: 0.0,
        }
    }
}

impl RenderTransform {
    pub const IDENTITY: RenderTransform = RenderTransform {
        translation: Vec2::ZERO,
        scale: Vec2::ONE,
        shear: Vec2::ZERO,
        angle: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Convert a CSS angle token to degrees. Bare numbers are already degrees.
pub fn parse_angle(value: &str) -> f32 {
    let value = value.trim();
    // "grad" must be tried before "rad" or it would never match.
    if let Some(grad) = value.strip_suffix("grad") {
        return safe_parse_f32(grad) * 0.9;
    }
    if let Some(rad) = value.strip_suffix("rad") {
        return safe_parse_f32(rad) * 180.0 / PI;
    }
    if let Some(turn) = value.strip_suffix("turn") {
        return safe_parse_f32(turn) * 360.0;
    }
    if let Some(deg) = value.strip_suffix("deg") {
        return safe_parse_f32(deg);
    }
    safe_parse_f32(value)
}

/// One parsed `name(arg, arg, ...)` call from a transform list.
struct TransformCall {
    name: String,
    args: Vec<String>,
}

fn parse_calls(value: &str) -> Vec<TransformCall> {
    let mut calls = Vec::new();
    let mut current: Option<TransformCall> = None;

    for (kind, text) in tokenize_value(value) {
        match kind {
            ValueToken::FunctionOpen => {
                current = Some(TransformCall {
                    name: text.trim_end_matches('(').to_owned(),
                    args: Vec::new(),
                });
            }
            ValueToken::ParenClose => {
                if let Some(call) = current.take() {
                    calls.push(call);
                }
            }
            ValueToken::Number | ValueToken::Dimension | ValueToken::Ident => {
                if let Some(call) = current.as_mut() {
                    call.args.push(text);
                }
            }
            _ => {}
        }
    }

    calls
}

/// Resolve the `transform`, `translate`, and `rotate` properties into one
/// transform. The standalone `translate`/`rotate` properties win over the
/// corresponding components of `transform`.
pub fn parse_transform(
    transform: Option<&str>,
    translate: Option<&str>,
    rotate: Option<&str>,
    style: &ResolvedStyle,
) -> Option<RenderTransform> {
    if transform.is_none() && translate.is_none() && rotate.is_none() {
        return None;
    }

    let mut result = RenderTransform::default();

    for call in transform.map(parse_calls).unwrap_or_default() {
        apply_call(&mut result, &call, style);
    }

    if let Some(translate) = translate {
        let mut values = translate.split_whitespace();
        let x = values.next().unwrap_or("0px");
        let y = values.next().unwrap_or("0px");
        result.translation = Vec2::new(resolve_length(x, style), resolve_length(y, style));
    }

    if let Some(rotate) = rotate {
        if let Some(angle) = parse_rotate_property(rotate) {
            result.angle = angle;
        }
    }

    Some(result)
}

/// The standalone `rotate` property: `45deg` or `z 45deg`. Axis-specific
/// x/y rotations are meaningless in 2D and yield `None`.
fn parse_rotate_property(rotate: &str) -> Option<f32> {
    let mut parts = rotate.split_whitespace();
    let first = parts.next()?;
    match first {
        "x" | "y" => None,
        "z" => parts.next().map(parse_angle),
        angle => Some(parse_angle(angle)),
    }
}

fn apply_call(result: &mut RenderTransform, call: &TransformCall, style: &ResolvedStyle) {
    let arg = |i: usize| call.args.get(i).map(String::as_str);
    let length = |i: usize| resolve_length(arg(i).unwrap_or("0px"), style);
    let number = |i: usize| safe_parse_f32(arg(i).unwrap_or("0"));

    match call.name.as_str() {
        "translate" | "translate3d" => {
            result.translation = Vec2::new(length(0), length(1));
        }
        "translateX" => result.translation.x = length(0),
        "translateY" => result.translation.y = length(0),
        "scale" | "scale3d" => {
            let x = number(0);
            let y = arg(1).map(safe_parse_f32).unwrap_or(x);
            result.scale = Vec2::new(x, y);
        }
        "scaleX" => result.scale.x = number(0),
        "scaleY" => result.scale.y = number(0),
        "rotate" | "rotateZ" => {
            result.angle = parse_angle(arg(0).unwrap_or("0"));
        }
        "skew" => {
            result.shear.x = parse_angle(arg(0).unwrap_or("0"));
            result.shear.y = parse_angle(arg(1).unwrap_or("0"));
        }
        "skewX" => result.shear.x = parse_angle(arg(0).unwrap_or("0")),
        "skewY" => result.shear.y = parse_angle(arg(0).unwrap_or("0")),
        "matrix" => {
            // matrix(a, b, c, d, tx, ty); b and c carry the shear.
            result.scale = Vec2::new(number(0), number(3));
            result.shear.x = (number(2) * 180.0 / PI).clamp(-90.0, 90.0);
            result.shear.y = (number(1) * 180.0 / PI).clamp(-90.0, 90.0);
            result.translation = Vec2::new(number(4), number(5));
        }
        "matrix3d" => {
            // Only the 2D components of the 4x4 matrix are used.
            result.scale = Vec2::new(number(0), number(5));
            result.shear.x = (number(4) * 180.0 / PI).clamp(-90.0, 90.0);
            result.shear.y = (number(1) * 180.0 / PI).clamp(-90.0, 90.0);
            result.translation = Vec2::new(number(12), number(13));
        }
        _ => {}
    }
}

/// Resolve `transformOrigin` into a normalized pivot, defaulting to center.
///
/// Keywords and percentages resolve exactly; absolute lengths would need the
/// widget extent, so they fall back to center. One value applies to both
/// axes.
pub fn parse_pivot(transform_origin: &str) -> Vec2 {
    let values: Vec<&str> = transform_origin.split_whitespace().collect();
    if values.is_empty() {
        return Vec2::splat(0.5);
    }

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

    let x = component(values[0], "left", "right");
    let y = match values.get(1) {
        Some(v) => component(v, "top", "bottom"),
        None => x,
    };
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn style() -> ResolvedStyle {
        ResolvedStyle::new()
    }

    #[test]
    fn angle_units_convert_to_degrees() {
        assert_eq!(parse_angle("45deg"), 45.0);
        assert_eq!(parse_angle("0.5turn"), 180.0);
        assert_eq!(parse_angle("100grad"), 90.0);
        assert!((parse_angle("3.14159265rad") - 180.0).abs() < 1e-3);
        assert_eq!(parse_angle("30"), 30.0);
    }

    #[test]
    fn transform_list_applies_in_order() {
        let t = parse_transform(
            Some("translate(10px, 20px) rotate(45deg) scale(2)"),
            None,
            None,
            &style(),
        )
        .unwrap();
        assert_eq!(t.translation, Vec2::new(10.0, 20.0));
        assert_eq!(t.angle, 45.0);
        assert_eq!(t.scale, Vec2::splat(2.0));
    }

    #[test]
    fn scale_one_arg_applies_to_both_axes() {
        let t = parse_transform(Some("scale(1.5)"), None, None, &style()).unwrap();
        assert_eq!(t.scale, Vec2::splat(1.5));
    }

    #[test]
    fn standalone_translate_overrides_transform_translation() {
        let t = parse_transform(
            Some("translate(1px, 1px)"),
            Some("30px 40px"),
            None,
            &style(),
        )
        .unwrap();
        assert_eq!(t.translation, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn standalone_rotate_axis_forms() {
        let t = parse_transform(None, None, Some("z 90deg"), &style()).unwrap();
        assert_eq!(t.angle, 90.0);

        // x/y rotations have no 2D projection and leave the angle alone.
        let t = parse_transform(Some("rotate(10deg)"), None, Some("x 90deg"), &style()).unwrap();
        assert_eq!(t.angle, 10.0);
    }

    #[test]
    fn matrix_extracts_2d_components() {
        let t = parse_transform(Some("matrix(2, 0, 0, 3, 5, 6)"), None, None, &style()).unwrap();
        assert_eq!(t.scale, Vec2::new(2.0, 3.0));
        assert_eq!(t.translation, Vec2::new(5.0, 6.0));
        assert_eq!(t.shear, Vec2::ZERO);
    }

    #[test]
    fn absent_properties_yield_none() {
        assert_eq!(parse_transform(None, None, None, &style()), None);
    }

    #[test]
    fn pivot_keywords_and_percentages() {
        assert_eq!(parse_pivot("center center"), Vec2::splat(0.5));
        assert_eq!(parse_pivot("left top"), Vec2::ZERO);
        assert_eq!(parse_pivot("right bottom"), Vec2::ONE);
        assert_eq!(parse_pivot("25% 75%"), Vec2::new(0.25, 0.75));
        // Single value mirrors to both axes.
        assert_eq!(parse_pivot("left"), Vec2::ZERO);
        // Absolute lengths need the widget extent and fall back to center.
        assert_eq!(parse_pivot("10px 10px"), Vec2::splat(0.5));
    }
}
