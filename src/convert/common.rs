//! Common property translation, shared by every converter.
//!
//! Maps the fixed key table (cursor, transform, opacity, visibility,
//! tooltip, enabled, volatility, pixel snapping, and their binding variants)
//! from a resolved style plus raw props onto a widget's [`CommonProps`]
//! block. Only keys actually present are written; a value that fails to
//! parse is skipped and never aborts the rest of the batch. The caller owns
//! the single trailing synchronize.

use crate::element::{PropValue, Props};
use crate::style::cascade::ResolvedStyle;
use crate::style::transform::{parse_pivot, parse_transform};
use crate::toolkit::{Cursor, PixelSnap, Tooltip, Visibility, WidgetId, WidgetTree};

/// CSS `cursor` keyword to native cursor. Unknown keywords fall through to
/// the default cursor rather than failing.
pub fn parse_cursor(cursor: &str) -> Cursor {
    match cursor {
        "none" => Cursor::None,
        "text" => Cursor::TextEditBeam,
        "ew-resize" | "col-resize" => Cursor::ResizeLeftRight,
        "ns-resize" | "row-resize" => Cursor::ResizeUpDown,
        "se-resize" => Cursor::ResizeSouthEast,
        "sw-resize" => Cursor::ResizeSouthWest,
        "crosshair" => Cursor::Crosshairs,
        "pointer" => Cursor::Hand,
        "grab" => Cursor::GrabHand,
        "grabbing" => Cursor::GrabHandClosed,
        "not-allowed" => Cursor::SlashedCircle,
        "copy" => Cursor::EyeDropper,
        _ => Cursor::Default,
    }
}

/// Visibility keyword plus optional hit-test mode to the native enum.
///
/// A hit-test mode only modifies a visible widget; hidden and collapsed
/// widgets are already out of the hit-test path.
pub fn parse_visibility(visibility: &str, hit_test: Option<&str>) -> Visibility {
    let base = match visibility {
        "hidden" => Visibility::Hidden,
        "collapse" | "collapsed" => Visibility::Collapsed,
        _ => Visibility::Visible,
    };

    if base == Visibility::Visible {
        match hit_test {
            Some("self-invisible") => return Visibility::SelfHitTestInvisible,
            Some("self-children-invisible") => return Visibility::HitTestInvisible,
            _ => {}
        }
    }
    base
}

fn parse_pixel_snap(value: &str) -> PixelSnap {
    match value {
        "snap" => PixelSnap::SnapToPixel,
        "disabled" => PixelSnap::Disabled,
        _ => PixelSnap::Inherit,
    }
}

/// Apply every common property present in `style`/`props` to `widget`.
///
/// This is one batch; the caller must follow with `tree.synchronize(widget)`.
pub fn apply_common_props(
    tree: &mut WidgetTree,
    widget: WidgetId,
    style: &ResolvedStyle,
    props: &Props,
) {
    apply_filtered(tree, widget, style, props, None);
}

/// Update-path variant: writes only the groups whose inputs differ from the
/// previous resolution, leaving every other common property untouched.
pub fn apply_changed_common_props(
    tree: &mut WidgetTree,
    widget: WidgetId,
    style: &ResolvedStyle,
    props: &Props,
    old_style: &ResolvedStyle,
    old_props: &Props,
) {
    apply_filtered(tree, widget, style, props, Some((old_style, old_props)));
}

fn apply_filtered(
    tree: &mut WidgetTree,
    widget: WidgetId,
    style: &ResolvedStyle,
    props: &Props,
    previous: Option<(&ResolvedStyle, &Props)>,
) {
    let style_changed = |keys: &[&str]| match previous {
        None => true,
        Some((old, _)) => keys.iter().any(|k| old.get_value(k) != style.get_value(k)),
    };
    let prop_changed = |keys: &[&str]| match previous {
        None => true,
        Some((_, old)) => keys.iter().any(|k| old.get(*k) != props.get(*k)),
    };

    let Some(data) = tree.get_mut(widget) else {
        return;
    };
    let common = &mut data.common;

    if style_changed(&["cursor"]) {
        if let Some(cursor) = style.str("cursor") {
            common.cursor = Some(parse_cursor(cursor));
        }
    }

    if style_changed(&["transform", "translate", "rotate"])
        && (style.is_set("transform") || style.is_set("translate") || style.is_set("rotate"))
    {
        common.transform = parse_transform(
            style.str("transform"),
            style.str("translate"),
            style.str("rotate"),
            style,
        );
    }

    if style_changed(&["transformOrigin"]) {
        if let Some(origin) = style.str("transformOrigin") {
            common.pivot = Some(parse_pivot(origin));
        }
    }

    if style_changed(&["opacity"]) {
        if let Some(opacity) = style.number("opacity") {
            common.opacity = Some(opacity.clamp(0.0, 1.0));
        }
    }

    if style_changed(&["visibility", "hitTest"]) {
        if let Some(visibility) = style.str("visibility") {
            common.visibility = Some(parse_visibility(visibility, style.str("hitTest")));
        }
    }

    if prop_changed(&["toolTip"]) {
        match props.get("toolTip") {
            Some(PropValue::Str(text)) => common.tooltip = Some(Tooltip::Static(text.clone())),
            Some(PropValue::Handler(source)) => {
                common.tooltip = Some(Tooltip::Dynamic(source.clone()));
            }
            _ => {}
        }
    }

    if prop_changed(&["disabled", "enabled"]) {
        if let Some(disabled) = props.get("disabled").and_then(PropValue::as_bool) {
            common.enabled = Some(!disabled);
        }
        if let Some(enabled) = props.get("enabled").and_then(PropValue::as_bool) {
            common.enabled = Some(enabled);
        }
    }

    if prop_changed(&["volatile"]) {
        if let Some(volatile) = props.get("volatile").and_then(PropValue::as_bool) {
            common.volatile = Some(volatile);
        }
    }

    if style_changed(&["pixelSnapping"]) {
        if let Some(snap) = style.str("pixelSnapping") {
            common.pixel_snap = Some(parse_pixel_snap(snap));
        }
    }

    // Binding variants: handler source the host re-evaluates on demand.
    if prop_changed(&["enabledBinding"]) {
        if let Some(PropValue::Handler(source)) = props.get("enabledBinding") {
            common.enabled_binding = Some(source.clone());
        }
    }
    if prop_changed(&["toolTipBinding"]) {
        if let Some(PropValue::Handler(source)) = props.get("toolTipBinding") {
            common.tooltip_binding = Some(source.clone());
        }
    }
    if prop_changed(&["visibilityBinding"]) {
        if let Some(PropValue::Handler(source)) = props.get("visibilityBinding") {
            common.visibility_binding = Some(source.clone());
        }
    }
}
