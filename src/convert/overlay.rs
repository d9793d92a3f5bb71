//! Overlay layout strategy: children stack in declaration order.

use crate::style::cascade::ResolvedStyle;
use crate::style::length::resolve_margin;
use crate::style::{HAlign, VAlign};
use crate::toolkit::{Slot, WidgetId, WidgetKind, WidgetTree};

fn overlay_horizontal(token: &str) -> HAlign {
    match token {
        "left" | "start" => HAlign::Left,
        "right" | "end" => HAlign::Right,
        "center" => HAlign::Center,
        _ => HAlign::Fill,
    }
}

fn overlay_vertical(token: &str) -> VAlign {
    match token {
        "top" | "start" => VAlign::Top,
        "bottom" | "end" => VAlign::Bottom,
        "center" => VAlign::Center,
        _ => VAlign::Fill,
    }
}

pub struct OverlayLayout;

impl OverlayLayout {
    pub fn create_widget(&self, tree: &mut WidgetTree) -> WidgetId {
        tree.insert(WidgetKind::Overlay)
    }

    /// Configure a stacked child's slot. The slot is left untouched unless
    /// the child actually specifies alignment or spacing.
    pub fn init_slot(&self, slot: &mut Slot, child_style: &ResolvedStyle) {
        let justify_self = child_style.str("justifySelf");
        let align_self = child_style.str("alignSelf");
        let padding = child_style.str("padding");
        let margin = child_style.str("margin");

        if justify_self.is_none() && align_self.is_none() && padding.is_none() && margin.is_none()
        {
            return;
        }

        slot.horizontal = overlay_horizontal(justify_self.unwrap_or(""));
        slot.vertical = overlay_vertical(align_self.unwrap_or(""));

        if let Some(padding) = padding.and_then(|p| resolve_margin(p, child_style)) {
            slot.padding = padding;
        }
        if let Some(margin) = margin.and_then(|m| resolve_margin(m, child_style)) {
            slot.padding = margin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margin;
    use pretty_assertions::assert_eq;

    fn style(pairs: &[(&str, &str)]) -> ResolvedStyle {
        let mut style = ResolvedStyle::new();
        for (key, value) in pairs {
            style.set(*key, (*value).into());
        }
        style
    }

    #[test]
    fn untouched_when_nothing_specified() {
        let mut slot = Slot::default();
        slot.horizontal = HAlign::Left;
        OverlayLayout.init_slot(&mut slot, &ResolvedStyle::new());
        assert_eq!(slot.horizontal, HAlign::Left);
    }

    #[test]
    fn self_alignment_maps_to_both_axes() {
        let mut slot = Slot::default();
        OverlayLayout
            .init_slot(&mut slot, &style(&[("justifySelf", "right"), ("alignSelf", "top")]));
        assert_eq!(slot.horizontal, HAlign::Right);
        assert_eq!(slot.vertical, VAlign::Top);
    }

    #[test]
    fn unrecognized_or_missing_keyword_fills() {
        let mut slot = Slot::default();
        OverlayLayout.init_slot(&mut slot, &style(&[("justifySelf", "center")]));
        assert_eq!(slot.horizontal, HAlign::Center);
        assert_eq!(slot.vertical, VAlign::Fill);
    }

    #[test]
    fn margin_wins_over_padding() {
        let mut slot = Slot::default();
        OverlayLayout
            .init_slot(&mut slot, &style(&[("padding", "2px"), ("margin", "6px")]));
        assert_eq!(slot.padding, Margin::all(6.0));
    }
}
