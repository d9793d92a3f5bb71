//! # trellis
//!
//! A CSS-styled bridge from declarative element trees to a retained native
//! widget tree.
//!
//! trellis takes an element description (`typeName` + props, the shape a
//! declarative UI layer produces), resolves a CSS-like cascade over it, and
//! composes native container widgets around it: one base layout widget per
//! container plus a chain of wrapper widgets emulating the CSS box model.
//! Updates are diff-driven; only changed properties touch the native side,
//! and each batch ends in a single synchronize.
//!
//! ## Core Systems
//!
//! - **[`element`]** — Element descriptions: type name, props, children
//! - **[`style`]** — Cascade resolution, value parsers (length, color,
//!   transform, background, font), and the prop differ
//! - **[`toolkit`]** — The retained native widget tree: kinds, slots,
//!   synchronize bookkeeping
//! - **[`convert`]** — Converters: the per-element lifecycle contract, the
//!   container wrapper chain, four layout strategies, leaf widgets, and
//!   the type-name factory
//! - **[`assets`]** — Fire-and-forget asset loading with superseding
//!   requests
//! - **[`engine`]** — Mount, diff-update, and unmount over whole trees
//! - **[`geometry`]** — Vec2 and Margin primitives

// Foundation
pub mod geometry;

// Data model
pub mod element;

// Style resolution
pub mod style;

// Native widget tree
pub mod toolkit;

// Conversion
pub mod assets;
pub mod convert;

// Tree lifecycle
pub mod engine;

pub use convert::{create_converter, AnyConverter, ConvertCx, ConvertError, Converter};
pub use element::{Child, Element, PropValue, Props};
pub use engine::Engine;
pub use style::{diff_props, resolve_style, ResolvedStyle, Stylesheet};
pub use toolkit::{WidgetId, WidgetKind, WidgetTree};
