//! Per-child attachment records.

use crate::geometry::{Margin, Vec2};
use crate::style::alignment::{HAlign, VAlign};

/// How a child shares main-axis space in a flow container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeRule {
    /// Take the child's desired size.
    #[default]
    Auto,
    /// Share leftover space with the given weight.
    Fill(f32),
}

/// Grid track placement, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    pub column: usize,
    pub column_span: usize,
    pub row: usize,
    pub row_span: usize,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self {
            column: 0,
            column_span: 1,
            row: 0,
            row_span: 1,
        }
    }
}

/// Canvas anchor rectangle and offsets, all normalized or absolute units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPlacement {
    /// Normalized anchor corners in the parent, both in `[0,1]²`.
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    /// Offset from the anchor, absolute units.
    pub position: Vec2,
    /// Explicit size; `None` with `auto_size` decides sizing.
    pub size: Option<Vec2>,
    /// Let the child's desired size win.
    pub auto_size: bool,
}

/// The attachment record a parent container owns for one child.
///
/// Which fields matter depends on the parent kind: flow boxes read alignment,
/// padding, and size rule; grids read `grid`; canvases read `canvas`;
/// overlays read alignment and padding only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slot {
    pub horizontal: HAlign,
    pub vertical: VAlign,
    pub padding: Margin,
    pub size_rule: SizeRule,
    pub grid: Option<GridPlacement>,
    pub canvas: Option<CanvasPlacement>,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid_mut(&mut self) -> &mut GridPlacement {
        self.grid.get_or_insert_with(GridPlacement::default)
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasPlacement {
        self.canvas.get_or_insert_with(CanvasPlacement::default)
    }
}
