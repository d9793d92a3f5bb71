//! Leaf converters: widgets with no layout strategy of their own.

use std::rc::Rc;

use crate::element::{PropValue, Props};
use crate::geometry::Vec2;
use crate::style::background::parse_background_image;
use crate::style::cascade::ResolvedStyle;
use crate::style::color::parse_color;
use crate::style::font::parse_font;
use crate::style::length::resolve_length_key;
use crate::toolkit::{WidgetId, WidgetKind};

use super::converter::{ConvertCx, Converter};

/// Flatten a `children` prop into display text. Non-text children are
/// skipped; rich inline markup is not this converter's job.
fn collect_text(children: Option<&PropValue>) -> String {
    fn push(value: &PropValue, out: &mut String) {
        match value {
            PropValue::Str(s) => out.push_str(s),
            PropValue::Num(n) => out.push_str(&n.to_string()),
            PropValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            PropValue::List(items) => {
                for item in items.iter() {
                    push(item, out);
                }
            }
            _ => {}
        }
    }
    let mut out = String::new();
    if let Some(value) = children {
        push(value, &mut out);
    }
    out
}

fn handler(props: &Props, key: &str) -> Option<Rc<str>> {
    match props.get(key) {
        Some(PropValue::Handler(source)) => Some(source.clone()),
        _ => None,
    }
}

/// Shared scaffolding: every leaf stores its identity, props snapshot, and
/// the single widget it created.
macro_rules! leaf_boilerplate {
    () => {
        fn type_name(&self) -> &str {
            &self.type_name
        }

        fn props(&self) -> &Props {
            &self.props
        }

        fn set_props(&mut self, props: Props) {
            self.props = props;
        }

        fn append_child(
            &mut self,
            cx: &mut ConvertCx<'_>,
            child: WidgetId,
            _child_type: &str,
            _child_props: &Props,
        ) {
            if let Some(widget) = self.widget {
                cx.tree.attach(widget, child);
            }
        }

        fn remove_child(&mut self, cx: &mut ConvertCx<'_>, child: WidgetId) {
            cx.tree.detach(child);
        }

        fn outermost(&self) -> Option<WidgetId> {
            self.widget
        }
    };
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub struct TextConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl TextConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }
}

impl Converter for TextConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let style = cx.resolve(&self.type_name, &self.props);
        let id = cx.tree.insert(WidgetKind::Text {
            content: collect_text(self.props.get("children")),
            font: parse_font(&style),
        });
        self.widget = Some(id);
        id
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, _old_props: &Props, changed: &Props) {
        let Some(id) = self.widget else {
            return;
        };
        let style = cx.resolve(&self.type_name, &self.props);
        let Some(WidgetKind::Text { content, font }) = cx.tree.kind_mut(id) else {
            return;
        };
        if changed.contains_key("children") {
            *content = collect_text(changed.get("children"));
        }
        *font = parse_font(&style);
    }
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

pub struct ImageConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl ImageConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }

    fn request_load(&self, cx: &mut ConvertCx<'_>, widget: WidgetId) {
        let Some(src) = self.props.get("src").and_then(PropValue::as_str) else {
            return;
        };
        cx.assets.request(
            widget,
            src,
            handler(&self.props, "onLoad"),
            handler(&self.props, "onError"),
        );
    }
}

impl Converter for ImageConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let style = cx.resolve(&self.type_name, &self.props);
        // A style-declared image draws immediately; the src prop goes
        // through the asset broker and lands on completion.
        let brush = style
            .str("backgroundImage")
            .and_then(|image| parse_background_image(image, style.str("backgroundSize")));
        let id = cx.tree.insert(WidgetKind::Image {
            brush,
            tint: style.str("color").and_then(parse_color),
        });
        self.widget = Some(id);
        self.request_load(cx, id);
        id
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, _old_props: &Props, changed: &Props) {
        let Some(id) = self.widget else {
            return;
        };
        let style = cx.resolve(&self.type_name, &self.props);
        if let Some(WidgetKind::Image { tint, .. }) = cx.tree.kind_mut(id) {
            if let Some(color) = style.str("color").and_then(parse_color) {
                *tint = Some(color);
            }
        }
        if changed.contains_key("src") {
            self.request_load(cx, id);
        }
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

pub struct ButtonConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl ButtonConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }
}

impl Converter for ButtonConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let id = cx.tree.insert(WidgetKind::Button);
        self.widget = Some(id);
        id
    }

    fn update(&mut self, _cx: &mut ConvertCx<'_>, _old_props: &Props, _changed: &Props) {}
}

// ---------------------------------------------------------------------------
// Progress bar
// ---------------------------------------------------------------------------

pub struct ProgressConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl ProgressConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }

    fn percent(props: &Props) -> f32 {
        let value = props.get("value").and_then(PropValue::as_num).unwrap_or(0.0);
        let max = props.get("max").and_then(PropValue::as_num).unwrap_or(1.0);
        if max <= 0.0 {
            return 0.0;
        }
        ((value / max) as f32).clamp(0.0, 1.0)
    }
}

impl Converter for ProgressConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let id = cx.tree.insert(WidgetKind::ProgressBar { percent: Self::percent(&self.props) });
        self.widget = Some(id);
        id
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, _old_props: &Props, changed: &Props) {
        if !changed.contains_key("value") && !changed.contains_key("max") {
            return;
        }
        let Some(id) = self.widget else {
            return;
        };
        if let Some(WidgetKind::ProgressBar { percent }) = cx.tree.kind_mut(id) {
            *percent = Self::percent(&self.props);
        }
    }
}

// ---------------------------------------------------------------------------
// Text input
// ---------------------------------------------------------------------------

pub struct TextInputConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl TextInputConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }

    fn string_prop(props: &Props, key: &str) -> String {
        props
            .get(key)
            .and_then(PropValue::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

impl Converter for TextInputConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let id = cx.tree.insert(WidgetKind::TextInput {
            text: Self::string_prop(&self.props, "value"),
            hint: Self::string_prop(&self.props, "placeholder"),
            multiline: self.type_name.eq_ignore_ascii_case("textarea"),
        });
        self.widget = Some(id);
        id
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, _old_props: &Props, changed: &Props) {
        let Some(id) = self.widget else {
            return;
        };
        let Some(WidgetKind::TextInput { text, hint, .. }) = cx.tree.kind_mut(id) else {
            return;
        };
        if changed.contains_key("value") {
            *text = Self::string_prop(&self.props, "value");
        }
        if changed.contains_key("placeholder") {
            *hint = Self::string_prop(&self.props, "placeholder");
        }
    }
}

// ---------------------------------------------------------------------------
// Spacer
// ---------------------------------------------------------------------------

pub struct SpacerConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl SpacerConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }

    fn size(style: &ResolvedStyle) -> Vec2 {
        Vec2::new(
            resolve_length_key(style, "width").unwrap_or(0.0),
            resolve_length_key(style, "height").unwrap_or(0.0),
        )
    }
}

impl Converter for SpacerConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let style = cx.resolve(&self.type_name, &self.props);
        let id = cx.tree.insert(WidgetKind::Spacer { size: Self::size(&style) });
        self.widget = Some(id);
        id
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, _old_props: &Props, _changed: &Props) {
        let Some(id) = self.widget else {
            return;
        };
        let style = cx.resolve(&self.type_name, &self.props);
        if let Some(WidgetKind::Spacer { size }) = cx.tree.kind_mut(id) {
            *size = Self::size(&style);
        }
    }
}

// ---------------------------------------------------------------------------
// Custom passthrough
// ---------------------------------------------------------------------------

/// Fallback for type names outside both keyword sets: a native widget keyed
/// by the literal type name, with children attached directly.
pub struct CustomConverter {
    type_name: String,
    props: Props,
    widget: Option<WidgetId>,
}

impl CustomConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self { type_name: type_name.into(), props, widget: None }
    }
}

impl Converter for CustomConverter {
    leaf_boilerplate!();

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let id = cx.tree.insert(WidgetKind::Custom { type_name: self.type_name.clone() });
        self.widget = Some(id);
        id
    }

    fn update(&mut self, _cx: &mut ConvertCx<'_>, _old_props: &Props, _changed: &Props) {}
}
