//! Element-to-widget conversion.

pub mod canvas;
pub mod common;
pub mod container;
pub mod converter;
pub mod factory;
pub mod flex;
pub mod grid;
pub mod leaf;
pub mod overlay;

pub use container::{ContainerConverter, LayoutStrategy};
pub use converter::{ConvertCx, ConvertError, Converter};
pub use factory::{create_converter, is_container_type, AnyConverter};
