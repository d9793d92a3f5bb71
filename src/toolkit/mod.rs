//! The fixed native widget toolkit model.
//!
//! Converters never talk to a real windowing system; they mutate this
//! retained tree, and the host flushes it. The widget vocabulary is closed
//! (`WidgetKind`), the per-child attachment state lives in [`Slot`]s owned by
//! the parent, and every mutation batch ends in a `synchronize` call.

pub mod slot;
pub mod tree;
pub mod widget;

pub use slot::{CanvasPlacement, GridPlacement, SizeRule, Slot};
pub use tree::{WidgetData, WidgetTree};
pub use widget::{
    CommonProps, Cursor, Orientation, PixelSnap, SizeOverrides, Stretch, Tooltip, Visibility,
    WidgetId, WidgetKind, WrapAlignment,
};
