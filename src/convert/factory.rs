//! Type-name dispatch.
//!
//! Resolution order: container keywords, then leaf keywords, then the
//! generic passthrough keyed by the literal type name. The empty type name
//! is the one structural error in the whole subsystem and is rejected here,
//! before any converter exists.

use crate::element::Props;
use crate::toolkit::WidgetId;

use super::container::ContainerConverter;
use super::converter::{ConvertCx, ConvertError, Converter};
use super::leaf::{
    ButtonConverter, CustomConverter, ImageConverter, ProgressConverter, SpacerConverter,
    TextConverter, TextInputConverter,
};

const CONTAINER_KEYWORDS: &[&str] = &["div", "flex", "grid", "canvas", "overlay"];

/// Closed set of converter kinds, dispatched statically.
pub enum AnyConverter {
    Container(ContainerConverter),
    Text(TextConverter),
    Image(ImageConverter),
    Button(ButtonConverter),
    Progress(ProgressConverter),
    TextInput(TextInputConverter),
    Spacer(SpacerConverter),
    Custom(CustomConverter),
}

pub fn is_container_type(type_name: &str) -> bool {
    CONTAINER_KEYWORDS
        .iter()
        .any(|keyword| type_name.eq_ignore_ascii_case(keyword))
}

/// Build the converter for an element description.
pub fn create_converter(type_name: &str, props: Props) -> Result<AnyConverter, ConvertError> {
    if type_name.trim().is_empty() {
        return Err(ConvertError::MissingTypeName);
    }

    if is_container_type(type_name) {
        return Ok(AnyConverter::Container(ContainerConverter::new(type_name, props)));
    }

    Ok(match type_name.to_ascii_lowercase().as_str() {
        "text" | "span" | "p" => AnyConverter::Text(TextConverter::new(type_name, props)),
        "img" | "image" => AnyConverter::Image(ImageConverter::new(type_name, props)),
        "button" => AnyConverter::Button(ButtonConverter::new(type_name, props)),
        "progress" => AnyConverter::Progress(ProgressConverter::new(type_name, props)),
        "input" | "textarea" => {
            AnyConverter::TextInput(TextInputConverter::new(type_name, props))
        }
        "spacer" => AnyConverter::Spacer(SpacerConverter::new(type_name, props)),
        _ => AnyConverter::Custom(CustomConverter::new(type_name, props)),
    })
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            AnyConverter::Container($inner) => $body,
            AnyConverter::Text($inner) => $body,
            AnyConverter::Image($inner) => $body,
            AnyConverter::Button($inner) => $body,
            AnyConverter::Progress($inner) => $body,
            AnyConverter::TextInput($inner) => $body,
            AnyConverter::Spacer($inner) => $body,
            AnyConverter::Custom($inner) => $body,
        }
    };
}

impl Converter for AnyConverter {
    fn type_name(&self) -> &str {
        dispatch!(self, inner => inner.type_name())
    }

    fn props(&self) -> &Props {
        dispatch!(self, inner => inner.props())
    }

    fn set_props(&mut self, props: Props) {
        dispatch!(self, inner => inner.set_props(props))
    }

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        dispatch!(self, inner => inner.create_native_widget(cx))
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, old_props: &Props, changed: &Props) {
        dispatch!(self, inner => inner.update(cx, old_props, changed))
    }

    fn append_child(
        &mut self,
        cx: &mut ConvertCx<'_>,
        child: WidgetId,
        child_type: &str,
        child_props: &Props,
    ) {
        dispatch!(self, inner => inner.append_child(cx, child, child_type, child_props))
    }

    fn remove_child(&mut self, cx: &mut ConvertCx<'_>, child: WidgetId) {
        dispatch!(self, inner => inner.remove_child(cx, child))
    }

    fn outermost(&self) -> Option<WidgetId> {
        dispatch!(self, inner => inner.outermost())
    }
}
