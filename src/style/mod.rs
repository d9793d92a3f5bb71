//! Style resolution: cascade, value parsing, and prop diffing.
//!
//! Everything under this module is pure computation over strings and props;
//! no widget is touched here. The converters consume the resolved outputs.

pub mod alignment;
pub mod background;
pub mod cascade;
pub mod color;
pub mod diff;
pub mod font;
pub mod length;
pub mod lexer;
pub mod transform;

pub use alignment::{HAlign, SelfAlignment, VAlign};
pub use background::{Background, ImageBrush, Tiling};
pub use cascade::{resolve_style, ResolvedStyle, Stylesheet};
pub use color::Color;
pub use diff::diff_props;
pub use font::{Font, TextJustify};
pub use transform::RenderTransform;
