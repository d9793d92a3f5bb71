//! Canvas layout strategy: absolute placement against named anchor presets.
//!
//! Anchor presets are normalized (min, max) pairs in the unit square. A
//! point anchor (min == max) positions the child at an offset from that
//! point; an anchor that spans an axis stretches the child across it, and
//! the offsets become edge insets instead of a position.

use crate::geometry::Vec2;
use crate::style::cascade::ResolvedStyle;
use crate::style::length::parse_aspect_ratio;
use crate::toolkit::{Slot, WidgetId, WidgetKind, WidgetTree};

/// Look up a named anchor preset. `None` for unknown names.
pub fn anchor_preset(name: &str) -> Option<(Vec2, Vec2)> {
    if name == "fill" {
        return Some((Vec2::ZERO, Vec2::ONE));
    }

    let mut tokens = name.split_whitespace();
    let vertical = tokens.next()?;
    let horizontal = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let (min_y, max_y) = match vertical {
        "top" => (0.0, 0.0),
        "center" => (0.5, 0.5),
        "bottom" => (1.0, 1.0),
        "fill" | "span-all" => (0.0, 1.0),
        _ => return None,
    };
    let (min_x, max_x) = match horizontal {
        "left" => (0.0, 0.0),
        "center" => (0.5, 0.5),
        "right" => (1.0, 1.0),
        "fill" | "span-all" => (0.0, 1.0),
        _ => return None,
    };
    Some((Vec2::new(min_x, min_y), Vec2::new(max_x, max_y)))
}

pub struct CanvasLayout;

impl CanvasLayout {
    pub fn create_widget(&self, tree: &mut WidgetTree) -> WidgetId {
        tree.insert(WidgetKind::Canvas)
    }

    pub fn init_slot(&self, slot: &mut Slot, child_style: &ResolvedStyle) {
        let preset = child_style
            .str("positionAnchor")
            .or_else(|| child_style.str("offsetAnchor"))
            .and_then(anchor_preset);
        // Absent or unknown preset: zero-size anchor at the origin.
        let (anchor_min, anchor_max) = preset.unwrap_or((Vec2::ZERO, Vec2::ZERO));

        let left = child_style.length("left").unwrap_or(0.0);
        let top = child_style.length("top").unwrap_or(0.0);

        let placement = slot.canvas_mut();
        placement.anchor_min = anchor_min;
        placement.anchor_max = anchor_max;
        placement.position = Vec2::new(left, top);

        let spans_x = anchor_min.x != anchor_max.x;
        let spans_y = anchor_min.y != anchor_max.y;
        if spans_x || spans_y {
            // A spanning anchor stretches the child; the four offsets are
            // edge insets, with right/bottom carried in the size field.
            let right = child_style.length("right").unwrap_or(0.0);
            let bottom = child_style.length("bottom").unwrap_or(0.0);
            placement.size = Some(Vec2::new(right, bottom));
            placement.auto_size = false;
            return;
        }

        let width = child_style.length("width");
        let height = child_style.length("height");
        match (width, height) {
            (Some(w), Some(h)) => {
                placement.size = Some(Vec2::new(w, h));
                placement.auto_size = false;
            }
            (Some(w), None) => {
                let h = match child_style.str("aspectRatio").and_then(parse_aspect_ratio) {
                    Some(ratio) if ratio != 0.0 => w / ratio,
                    _ => w,
                };
                placement.size = Some(Vec2::new(w, h));
                placement.auto_size = false;
            }
            (None, Some(h)) => {
                let w = match child_style.str("aspectRatio").and_then(parse_aspect_ratio) {
                    Some(ratio) => h * ratio,
                    None => h,
                };
                placement.size = Some(Vec2::new(w, h));
                placement.auto_size = false;
            }
            (None, None) => {
                placement.size = None;
                placement.auto_size = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::PropValue;
    use pretty_assertions::assert_eq;

    fn style(pairs: &[(&str, &str)]) -> ResolvedStyle {
        let mut style = ResolvedStyle::new();
        for (key, value) in pairs {
            style.set(*key, (*value).into());
        }
        style
    }

    #[test]
    fn preset_table() {
        assert_eq!(
            anchor_preset("center center"),
            Some((Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5)))
        );
        assert_eq!(anchor_preset("top left"), Some((Vec2::ZERO, Vec2::ZERO)));
        assert_eq!(
            anchor_preset("bottom right"),
            Some((Vec2::ONE, Vec2::ONE))
        );
        assert_eq!(anchor_preset("fill"), Some((Vec2::ZERO, Vec2::ONE)));
        assert_eq!(
            anchor_preset("top fill"),
            Some((Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)))
        );
        assert_eq!(
            anchor_preset("span-all left"),
            Some((Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0)))
        );
        assert_eq!(anchor_preset("middle left"), None);
    }

    #[test]
    fn absent_anchor_defaults_to_origin_point() {
        let mut slot = Slot::default();
        CanvasLayout.init_slot(&mut slot, &ResolvedStyle::new());
        let placement = slot.canvas.as_ref().unwrap();
        assert_eq!(placement.anchor_min, Vec2::ZERO);
        assert_eq!(placement.anchor_max, Vec2::ZERO);
        assert!(placement.auto_size);
    }

    #[test]
    fn offset_anchor_is_the_fallback() {
        let mut slot = Slot::default();
        CanvasLayout.init_slot(&mut slot, &style(&[("offsetAnchor", "center center")]));
        assert_eq!(slot.canvas.as_ref().unwrap().anchor_min, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn position_comes_from_top_and_left() {
        let mut slot = Slot::default();
        CanvasLayout.init_slot(&mut slot, &style(&[("left", "10px"), ("top", "2em")]));
        assert_eq!(slot.canvas.as_ref().unwrap().position, Vec2::new(10.0, 32.0));
    }

    #[test]
    fn explicit_size_disables_auto_sizing() {
        let mut slot = Slot::default();
        CanvasLayout.init_slot(&mut slot, &style(&[("width", "100px"), ("height", "50px")]));
        let placement = slot.canvas.as_ref().unwrap();
        assert_eq!(placement.size, Some(Vec2::new(100.0, 50.0)));
        assert!(!placement.auto_size);
    }

    #[test]
    fn single_dimension_uses_aspect_ratio_else_square() {
        let mut slot = Slot::default();
        CanvasLayout
            .init_slot(&mut slot, &style(&[("width", "100px"), ("aspectRatio", "2")]));
        assert_eq!(slot.canvas.as_ref().unwrap().size, Some(Vec2::new(100.0, 50.0)));

        let mut slot = Slot::default();
        CanvasLayout.init_slot(&mut slot, &style(&[("height", "50px")]));
        assert_eq!(slot.canvas.as_ref().unwrap().size, Some(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn spanning_anchor_turns_offsets_into_insets() {
        let mut slot = Slot::default();
        let mut child = style(&[
            ("positionAnchor", "fill"),
            ("left", "4px"),
            ("top", "4px"),
            ("right", "8px"),
            ("bottom", "8px"),
        ]);
        child.set("width", PropValue::Num(100.0));
        CanvasLayout.init_slot(&mut slot, &child);
        let placement = slot.canvas.as_ref().unwrap();
        assert_eq!(placement.position, Vec2::new(4.0, 4.0));
        assert_eq!(placement.size, Some(Vec2::new(8.0, 8.0)));
        assert!(!placement.auto_size);
    }
}
