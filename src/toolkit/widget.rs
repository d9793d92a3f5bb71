//! Widget identities, kinds, and the common property block.
//!
//! The host toolkit has a fixed, non-extensible widget vocabulary, so
//! [`WidgetKind`] is a closed enum; kind-specific state lives in the variant.
//! [`CommonProps`] is the property block every widget carries regardless of
//! kind (cursor, transform, visibility, tooltip, and so on).

use std::rc::Rc;

use slotmap::new_key_type;

use crate::geometry::Vec2;
use crate::style::alignment::{HAlign, VAlign};
use crate::style::background::{Background, ImageBrush};
use crate::style::color::Color;
use crate::style::font::Font;
use crate::style::transform::RenderTransform;

new_key_type! {
    /// Unique handle into the retained widget tree. Copy, lightweight (u64).
    pub struct WidgetId;
}

/// Flow orientation of a wrap box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Main-axis alignment of a wrap box's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
    Fill,
}

/// How a scale box fits its content into the available space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stretch {
    /// Scale uniformly to fit entirely (`object-fit: contain`).
    Fit,
    /// Scale uniformly to fill, cropping overflow (`object-fit: cover`).
    FillCrop,
    /// Stretch non-uniformly to fill exactly (`object-fit: fill`).
    Stretch,
    /// No scaling (`object-fit: none`).
    None,
    /// Explicit user factor, clipped (`object-fit: scale-down`).
    UserScale { factor: f32 },
}

/// Size overrides carried by a size box. All fields optional; an absent
/// field leaves the native desired size alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeOverrides {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub min_aspect_ratio: Option<f32>,
    pub max_aspect_ratio: Option<f32>,
}

/// The closed set of native widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Row flow container. `rtl` flips the reading direction.
    HorizontalBox { rtl: bool },
    /// Column flow container.
    VerticalBox { rtl: bool },
    /// Line-breaking flow container.
    WrapBox {
        orientation: Orientation,
        /// Inter-item spacing, (column gap, row gap).
        gap: Vec2,
        alignment: WrapAlignment,
    },
    /// Single-child decorator drawing a background brush behind its content.
    Border {
        background: Background,
        content_horizontal: HAlign,
        content_vertical: VAlign,
        /// Desired-size multiplier from the `scale` property.
        desired_size_scale: Vec2,
        /// Content tint from the `color` property.
        content_tint: Option<Color>,
    },
    /// Single-child decorator constraining the content's desired size.
    SizeBox { overrides: SizeOverrides },
    /// Single-child decorator scaling its content.
    ScaleBox { stretch: Stretch },
    /// Track-based panel with per-track fill weights.
    GridPanel {
        column_fills: Vec<f32>,
        row_fills: Vec<f32>,
    },
    /// Absolute-position panel; placement lives entirely in child slots.
    Canvas,
    /// Z-stack panel; children paint in attachment order.
    Overlay,
    /// Text run.
    Text { content: String, font: Font },
    /// Image widget; brush is populated by the asset broker.
    Image {
        brush: Option<ImageBrush>,
        tint: Option<Color>,
    },
    Button,
    ProgressBar { percent: f32 },
    TextInput {
        text: String,
        hint: String,
        multiline: bool,
    },
    Spacer { size: Vec2 },
    /// Passthrough for a native type name outside the converter keyword sets.
    Custom { type_name: String },
}

impl WidgetKind {
    /// Short kind name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::HorizontalBox { .. } => "HorizontalBox",
            WidgetKind::VerticalBox { .. } => "VerticalBox",
            WidgetKind::WrapBox { .. } => "WrapBox",
            WidgetKind::Border { .. } => "Border",
            WidgetKind::SizeBox { .. } => "SizeBox",
            WidgetKind::ScaleBox { .. } => "ScaleBox",
            WidgetKind::GridPanel { .. } => "GridPanel",
            WidgetKind::Canvas => "Canvas",
            WidgetKind::Overlay => "Overlay",
            WidgetKind::Text { .. } => "Text",
            WidgetKind::Image { .. } => "Image",
            WidgetKind::Button => "Button",
            WidgetKind::ProgressBar { .. } => "ProgressBar",
            WidgetKind::TextInput { .. } => "TextInput",
            WidgetKind::Spacer { .. } => "Spacer",
            WidgetKind::Custom { .. } => "Custom",
        }
    }
}

/// Mouse cursor shown while hovering a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    None,
    TextEditBeam,
    ResizeLeftRight,
    ResizeUpDown,
    ResizeSouthEast,
    ResizeSouthWest,
    Crosshairs,
    Hand,
    GrabHand,
    GrabHandClosed,
    SlashedCircle,
    EyeDropper,
}

/// Widget visibility plus hit-test participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Invisible but still occupies layout space.
    Hidden,
    /// Invisible and removed from layout.
    Collapsed,
    /// Visible, transparent to hit tests itself but not its children.
    SelfHitTestInvisible,
    /// Visible, transparent to hit tests including all children.
    HitTestInvisible,
}

/// Tooltip content: fixed text or a handler re-evaluated by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Tooltip {
    Static(String),
    Dynamic(Rc<str>),
}

/// Pixel alignment of rendered geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelSnap {
    #[default]
    Inherit,
    SnapToPixel,
    Disabled,
}

/// The property block shared by every widget kind.
///
/// Every field is optional; `None` means "leave the native default alone".
/// The `*_binding` fields carry handler source text the host re-evaluates on
/// demand, superseding the static field when both are set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommonProps {
    pub cursor: Option<Cursor>,
    pub transform: Option<RenderTransform>,
    pub pivot: Option<Vec2>,
    pub opacity: Option<f32>,
    pub visibility: Option<Visibility>,
    pub tooltip: Option<Tooltip>,
    pub enabled: Option<bool>,
    pub volatile: Option<bool>,
    pub pixel_snap: Option<PixelSnap>,
    pub enabled_binding: Option<Rc<str>>,
    pub tooltip_binding: Option<Rc<str>>,
    pub visibility_binding: Option<Rc<str>>,
}

impl CommonProps {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
