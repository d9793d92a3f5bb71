//! Flex layout strategy: a one-dimensional box, horizontal or vertical.
//!
//! The main axis comes from `flexDirection` (or the first token of
//! `flexFlow`); `-reverse` directions keep the same box orientation and set
//! the right-to-left flow flag instead. Per-child alignment resolves the
//! self value first and falls back to the container value, taking the first
//! recognized keyword from either token list.

use crate::style::cascade::ResolvedStyle;
use crate::style::length::resolve_margin;
use crate::style::{HAlign, VAlign};
use crate::toolkit::{SizeRule, Slot, WidgetId, WidgetKind, WidgetTree};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    /// Resolve the direction from container style. A two-token `flexFlow`
    /// overrides `flexDirection`; anything unrecognized is a row.
    pub fn from_style(style: &ResolvedStyle) -> Self {
        let flow_token = style.str("flexFlow").and_then(|flow| {
            let mut parts = flow.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(first), Some(_), None) => Some(first),
                _ => None,
            }
        });
        match flow_token.or_else(|| style.str("flexDirection")) {
            Some("column") => FlexDirection::Column,
            Some("column-reverse") => FlexDirection::ColumnReverse,
            Some("row-reverse") => FlexDirection::RowReverse,
            _ => FlexDirection::Row,
        }
    }

    pub fn is_column(self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

/// Main-axis alignment for a horizontal box. Writing-direction keywords
/// swap under row-reverse; the physical `left`/`right` keywords do not.
fn horizontal_main_align(token: &str, row_reverse: bool) -> Option<HAlign> {
    match token {
        "flex-start" | "start" => Some(if row_reverse { HAlign::Right } else { HAlign::Left }),
        "flex-end" | "end" => Some(if row_reverse { HAlign::Left } else { HAlign::Right }),
        "left" => Some(HAlign::Left),
        "right" => Some(HAlign::Right),
        "center" => Some(HAlign::Center),
        "stretch" => Some(HAlign::Fill),
        _ => None,
    }
}

/// Cross-axis alignment for a horizontal box.
fn horizontal_cross_align(token: &str) -> Option<VAlign> {
    match token {
        "stretch" => Some(VAlign::Fill),
        "center" => Some(VAlign::Center),
        "flex-start" | "start" | "top" => Some(VAlign::Top),
        "flex-end" | "end" | "bottom" => Some(VAlign::Bottom),
        _ => None,
    }
}

/// Main-axis alignment for a vertical box.
fn vertical_main_align(token: &str) -> Option<VAlign> {
    match token {
        "flex-start" | "start" | "left" => Some(VAlign::Top),
        "flex-end" | "end" | "right" => Some(VAlign::Bottom),
        "center" => Some(VAlign::Center),
        "stretch" => Some(VAlign::Fill),
        _ => None,
    }
}

/// Cross-axis alignment for a vertical box. Still subject to the
/// row-reverse swap so that nested reversed layouts mirror uniformly.
fn vertical_cross_align(token: &str, row_reverse: bool) -> Option<HAlign> {
    match token {
        "stretch" => Some(HAlign::Fill),
        "center" => Some(HAlign::Center),
        "flex-start" | "start" | "top" => {
            Some(if row_reverse { HAlign::Right } else { HAlign::Left })
        }
        "flex-end" | "end" | "bottom" => {
            Some(if row_reverse { HAlign::Left } else { HAlign::Right })
        }
        _ => None,
    }
}

/// First recognized keyword of the self value, else of the container value.
fn pick<T>(
    self_value: Option<&str>,
    container_value: Option<&str>,
    table: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let first_match =
        |value: &str| value.split_whitespace().find_map(|token| table(token));
    self_value
        .and_then(first_match)
        .or_else(|| container_value.and_then(first_match))
}

pub struct FlexLayout {
    direction: FlexDirection,
}

impl FlexLayout {
    pub fn new(style: &ResolvedStyle) -> Self {
        Self { direction: FlexDirection::from_style(style) }
    }

    pub fn direction(&self) -> FlexDirection {
        self.direction
    }

    pub fn create_widget(&self, tree: &mut WidgetTree) -> WidgetId {
        let rtl = self.direction.is_reverse();
        let kind = if self.direction.is_column() {
            WidgetKind::VerticalBox { rtl }
        } else {
            WidgetKind::HorizontalBox { rtl }
        };
        tree.insert(kind)
    }

    /// Configure a freshly attached child's slot from its style and the
    /// container's style.
    pub fn init_slot(
        &self,
        slot: &mut Slot,
        container_style: &ResolvedStyle,
        child_style: &ResolvedStyle,
    ) {
        let justify_content = container_style.str("justifyContent").unwrap_or("flex-start");
        let align_items = container_style.str("alignItems").unwrap_or("stretch");
        let row_reverse = self.direction == FlexDirection::RowReverse;

        if justify_content.contains("space-between") {
            let weight = child_style.number("flex").unwrap_or(1.0);
            slot.size_rule = SizeRule::Fill(weight);
        }

        let justify_self = child_style.str("justifySelf");
        let align_self = child_style.str("alignSelf");

        if self.direction.is_column() {
            if let Some(h) =
                pick(align_self, Some(align_items), |t| vertical_cross_align(t, row_reverse))
            {
                slot.horizontal = h;
            }
            if let Some(v) = pick(justify_self, Some(justify_content), vertical_main_align) {
                slot.vertical = v;
            }
        } else {
            if let Some(v) = pick(align_self, Some(align_items), horizontal_cross_align) {
                slot.vertical = v;
            }
            if let Some(h) =
                pick(justify_self, Some(justify_content), |t| horizontal_main_align(t, row_reverse))
            {
                slot.horizontal = h;
            }
        }

        // Margin first, then padding; when both resolve, padding wins.
        if let Some(margin) = child_style.str("margin").and_then(|m| resolve_margin(m, child_style))
        {
            slot.padding = margin;
        }
        if let Some(padding) =
            child_style.str("padding").and_then(|p| resolve_margin(p, child_style))
        {
            slot.padding = padding;
        }
    }
}
