//! CSS length/unit resolution into absolute native units.
//!
//! The native toolkit measures everything in absolute slate units; this module
//! collapses the CSS unit zoo (`px`, `em`, `rem`, keywords, bare numbers) into
//! that single scale. Relative units resolve against the element's own
//! resolved `fontSize`; percentages need a parent extent the engine does not
//! track, so they resolve to 0 and the native layout handles stretching.

use crate::geometry::{Margin, Vec2};
use crate::style::cascade::ResolvedStyle;

/// Default font size used when the context has none (CSS initial 16px).
const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Parse a float out of a string, returning 0.0 for anything unparseable.
pub fn safe_parse_f32(value: &str) -> f32 {
    value.trim().parse::<f32>().unwrap_or(0.0)
}

/// Font size of the style context in absolute units.
///
/// Only a `px` value is honored; anything else falls back to 16.
fn context_font_size(style: &ResolvedStyle) -> f32 {
    match style.str("fontSize") {
        Some(fs) if fs.ends_with("px") => fs
            .trim_end_matches("px")
            .trim()
            .parse::<f32>()
            .unwrap_or(DEFAULT_FONT_SIZE),
        _ => DEFAULT_FONT_SIZE,
    }
}

/// Convert a CSS length token to absolute native units.
///
/// Supported: `px`, `em`/`rem` (against the context font size), the border
/// width keywords `thin`/`medium`/`normal`/`thick`, and unitless numeric
/// strings. Percentages and unrecognized units resolve to 0; a bad length is
/// never an error, the property is simply treated as absent-or-zero.
pub fn resolve_length(value: &str, style: &ResolvedStyle) -> f32 {
    let value = value.trim();

    if let Some(px) = value.strip_suffix("px") {
        return safe_parse_f32(px);
    }
    if value.ends_with('%') {
        // Parent-relative; the native layout resolves stretching, not us.
        return 0.0;
    }
    if let Some(rem) = value.strip_suffix("rem") {
        return safe_parse_f32(rem) * context_font_size(style);
    }
    if let Some(em) = value.strip_suffix("em") {
        return safe_parse_f32(em) * context_font_size(style);
    }

    match value {
        "thin" => 12.0,
        "medium" | "normal" => 16.0,
        "thick" => 20.0,
        _ => value.parse::<f32>().unwrap_or(0.0),
    }
}

/// Resolve a length-valued style key, `None` when absent or `auto`.
pub fn resolve_length_key(style: &ResolvedStyle, key: &str) -> Option<f32> {
    match style.get_value(key)? {
        v if v.as_num().is_some() => v.as_num().map(|n| n as f32),
        v => {
            let s = v.as_str()?;
            if s == "auto" {
                None
            } else {
                Some(resolve_length(s, style))
            }
        }
    }
}

/// Convert a CSS `gap` value to the wrap-box inner slot padding.
///
/// CSS order is `row-gap column-gap`; the native vector is `(column, row)`.
pub fn resolve_gap(gap: &str, style: &ResolvedStyle) -> Vec2 {
    let values: Vec<f32> = gap
        .split_whitespace()
        .map(|v| resolve_length(v, style))
        .collect();

    match values.as_slice() {
        [row, column] => Vec2::new(*column, *row),
        [single] => Vec2::splat(*single),
        _ => Vec2::ZERO,
    }
}

/// Convert a CSS margin/padding shorthand to native four-sided spacing.
///
/// CSS side order is `top right bottom left`; the native record is
/// `(left, top, right, bottom)`.
pub fn resolve_margin(value: &str, style: &ResolvedStyle) -> Option<Margin> {
    let values: Vec<f32> = value
        .split_whitespace()
        .map(|v| resolve_length(v, style))
        .collect();

    let [top, right, bottom, left] = match values.as_slice() {
        [all] => [*all, *all, *all, *all],
        [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
        [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
        [top, right, bottom, left] => [*top, *right, *bottom, *left],
        _ => return None,
    };

    Some(Margin::new(left, top, right, bottom))
}

/// Parse a `scale` style value into a desired-size multiplier.
///
/// One value scales both axes; two values scale x then y. Absent or
/// unparseable values keep the identity scale.
pub fn parse_scale(value: Option<&str>) -> Vec2 {
    let Some(value) = value else {
        return Vec2::ONE;
    };
    let values: Vec<f32> = value.split_whitespace().map(safe_parse_f32).collect();
    match values.as_slice() {
        [x, y] => Vec2::new(*x, *y),
        [both] => Vec2::splat(*both),
        _ => Vec2::ONE,
    }
}

/// Parse an `aspectRatio` value (`"16/9"` or a bare number).
pub fn parse_aspect_ratio(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some((w, h)) = value.split_once('/') {
        let w = w.trim().parse::<f32>().ok()?;
        let h = h.trim().parse::<f32>().ok()?;
        if h == 0.0 {
            return None;
        }
        return Some(w / h);
    }
    value.parse::<f32>().ok().filter(|r| *r > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::cascade::ResolvedStyle;

    fn style_with_font(font_size: &str) -> ResolvedStyle {
        let mut s = ResolvedStyle::new();
        s.set("fontSize", font_size.into());
        s
    }

    #[test]
    fn px_resolves_directly() {
        assert_eq!(resolve_length("16px", &ResolvedStyle::new()), 16.0);
        assert_eq!(resolve_length("-4px", &ResolvedStyle::new()), -4.0);
    }

    #[test]
    fn em_resolves_against_context_font() {
        let style = style_with_font("10px");
        assert_eq!(resolve_length("2em", &style), 20.0);
        assert_eq!(resolve_length("1.5rem", &style), 15.0);
    }

    #[test]
    fn em_defaults_to_sixteen_without_px_font() {
        // A non-px fontSize is ignored, per the documented fallback.
        let style = style_with_font("2em");
        assert_eq!(resolve_length("2em", &style), 32.0);
    }

    #[test]
    fn keywords() {
        let style = ResolvedStyle::new();
        assert_eq!(resolve_length("thin", &style), 12.0);
        assert_eq!(resolve_length("medium", &style), 16.0);
        assert_eq!(resolve_length("normal", &style), 16.0);
        assert_eq!(resolve_length("thick", &style), 20.0);
    }

    #[test]
    fn unitless_numeric_string() {
        assert_eq!(resolve_length("42.5", &ResolvedStyle::new()), 42.5);
    }

    #[test]
    fn unrecognized_unit_resolves_to_zero() {
        assert_eq!(resolve_length("10banana", &ResolvedStyle::new()), 0.0);
        assert_eq!(resolve_length("", &ResolvedStyle::new()), 0.0);
    }

    #[test]
    fn percent_resolves_to_zero() {
        assert_eq!(resolve_length("50%", &ResolvedStyle::new()), 0.0);
    }

    #[test]
    fn gap_two_values_swaps_axes() {
        // gap: row column -> native (column, row)
        let g = resolve_gap("4px 8px", &ResolvedStyle::new());
        assert_eq!(g, Vec2::new(8.0, 4.0));
    }

    #[test]
    fn gap_single_value_splats() {
        assert_eq!(resolve_gap("6px", &ResolvedStyle::new()), Vec2::splat(6.0));
    }

    #[test]
    fn margin_expansion() {
        let style = ResolvedStyle::new();
        assert_eq!(
            resolve_margin("4px", &style),
            Some(Margin::new(4.0, 4.0, 4.0, 4.0))
        );
        // top/bottom = 1, left/right = 2
        assert_eq!(
            resolve_margin("1px 2px", &style),
            Some(Margin::new(2.0, 1.0, 2.0, 1.0))
        );
        // top 1, right/left 2, bottom 3
        assert_eq!(
            resolve_margin("1px 2px 3px", &style),
            Some(Margin::new(2.0, 1.0, 2.0, 3.0))
        );
        // css t r b l -> native l t r b
        assert_eq!(
            resolve_margin("1px 2px 3px 4px", &style),
            Some(Margin::new(4.0, 1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn scale_parsing() {
        assert_eq!(parse_scale(None), Vec2::ONE);
        assert_eq!(parse_scale(Some("1.5")), Vec2::splat(1.5));
        assert_eq!(parse_scale(Some("2 0.5")), Vec2::new(2.0, 0.5));
    }

    #[test]
    fn aspect_ratio_parsing() {
        assert_eq!(parse_aspect_ratio("16/9"), Some(16.0 / 9.0));
        assert_eq!(parse_aspect_ratio("1.5"), Some(1.5));
        assert_eq!(parse_aspect_ratio("16/0"), None);
        assert_eq!(parse_aspect_ratio("wide"), None);
    }
}
