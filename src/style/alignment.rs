//! Slot alignment vocabulary and self-alignment resolution.

use crate::geometry::Margin;
use crate::style::cascade::ResolvedStyle;
use crate::style::length::resolve_margin;

/// Horizontal placement of a child within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Fill,
    Left,
    Center,
    Right,
}

/// Vertical placement of a child within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Fill,
    Top,
    Center,
    Bottom,
}

/// How one widget aligns inside the single slot that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelfAlignment {
    pub horizontal: HAlign,
    pub vertical: VAlign,
    pub padding: Margin,
}

/// Resolve `justifySelf`/`alignSelf`/spacing for a widget in a single-child
/// slot. Both axes default to Fill; an unrecognized keyword centers, which
/// keeps a typo visible instead of stretched.
pub fn parse_self_alignment(style: &ResolvedStyle) -> SelfAlignment {
    let mut alignment = SelfAlignment::default();

    if let Some(justify_self) = style.str("justifySelf") {
        alignment.horizontal = match justify_self {
            "start" | "left" | "flex-start" => HAlign::Left,
            "end" | "right" | "flex-end" => HAlign::Right,
            "stretch" => HAlign::Fill,
            _ => HAlign::Center,
        };
    }

    if let Some(align_self) = style.str("alignSelf") {
        alignment.vertical = match align_self {
            "start" | "top" | "flex-start" => VAlign::Top,
            "end" | "bottom" | "flex-end" => VAlign::Bottom,
            "stretch" => VAlign::Fill,
            _ => VAlign::Center,
        };
    }

    // Margin wins over padding when both are present; a single slot has
    // only one spacing band to give.
    if let Some(padding) = style
        .str("padding")
        .and_then(|value| resolve_margin(value, style))
    {
        alignment.padding = padding;
    }
    if let Some(margin) = style
        .str("margin")
        .and_then(|value| resolve_margin(value, style))
    {
        alignment.padding = margin;
    }

    alignment
}
