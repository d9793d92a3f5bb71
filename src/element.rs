//! Element descriptions: the declarative input tree.
//!
//! An [`Element`] is a typed, prop-bearing node produced by the declarative UI
//! layer on every render pass. Props are a dynamic bag of [`PropValue`]s; the
//! well-known keys (`style`, `className`, `id`, `children`) get typed
//! accessors here, everything else is read by the individual converters.

use std::collections::HashMap;
use std::rc::Rc;

/// A dynamic property bag, keyed by prop name.
pub type Props = HashMap<String, PropValue>;

/// A single dynamic prop value.
///
/// Event handlers are carried as their source text and compared by it across
/// renders, which is how the declarative layer detects handler changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    /// Nested map (inline style objects, nested option bags).
    Map(Rc<Props>),
    /// Ordered sequence.
    List(Rc<Vec<PropValue>>),
    /// Event handler, identified by its source representation.
    Handler(Rc<str>),
    /// A child element description.
    Element(Rc<Element>),
}

impl PropValue {
    /// Build a map value from an iterator of key/value pairs.
    pub fn map(entries: impl IntoIterator<Item = (&'static str, PropValue)>) -> Self {
        PropValue::Map(Rc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        ))
    }

    /// Build a list value.
    pub fn list(items: impl IntoIterator<Item = PropValue>) -> Self {
        PropValue::List(Rc::new(items.into_iter().collect()))
    }

    /// The value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The value as a number. Numeric strings are not coerced here.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            PropValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a nested map.
    pub fn as_map(&self) -> Option<&Props> {
        match self {
            PropValue::Map(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    /// The value as a handler source string.
    pub fn as_handler(&self) -> Option<&Rc<str>> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Num(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A node in the declarative element tree.
///
/// Immutable per render pass: the declarative layer produces a fresh tree on
/// every re-render and the engine diffs it against the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element type name (e.g. "div", "grid", "button", or a native type).
    pub type_name: String,
    /// Dynamic props, including `style`, `className`, `id`, and `children`.
    pub props: Props,
}

impl Element {
    /// Create an element with no props.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            props: Props::new(),
        }
    }

    /// Set a prop (builder).
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set the inline style map (builder).
    pub fn with_style(
        mut self,
        entries: impl IntoIterator<Item = (&'static str, PropValue)>,
    ) -> Self {
        self.props.insert("style".to_owned(), PropValue::map(entries));
        self
    }

    /// Set the class list (builder), space-separated.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.props
            .insert("className".to_owned(), PropValue::Str(class_name.into()));
        self
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.props.insert("id".to_owned(), PropValue::Str(id.into()));
        self
    }

    /// Append a child element (builder). Accumulates into the `children` list.
    pub fn with_child(mut self, child: Element) -> Self {
        let entry = self
            .props
            .entry("children".to_owned())
            .or_insert_with(|| PropValue::List(Rc::new(Vec::new())));
        let child = PropValue::Element(Rc::new(child));
        match entry {
            PropValue::List(items) => {
                Rc::make_mut(items).push(child);
            }
            other => {
                // A scalar or single element already present: promote to a list.
                let first = other.clone();
                *other = PropValue::List(Rc::new(vec![first, child]));
            }
        }
        self
    }

    /// The inline style map, if present.
    pub fn style(&self) -> Option<&Props> {
        self.props.get("style").and_then(PropValue::as_map)
    }

    /// The space-separated class list, if present.
    pub fn class_name(&self) -> Option<&str> {
        self.props.get("className").and_then(PropValue::as_str)
    }

    /// The id, if present.
    pub fn id(&self) -> Option<&str> {
        self.props.get("id").and_then(PropValue::as_str)
    }

    /// The children of this element, normalized to an ordered sequence.
    ///
    /// `children` may be absent/null (empty), a scalar (one text child), a
    /// single element, or an ordered list of the above.
    pub fn children(&self) -> Vec<Child> {
        match self.props.get("children") {
            None | Some(PropValue::Null) => Vec::new(),
            Some(PropValue::List(items)) => items.iter().filter_map(child_of).collect(),
            Some(single) => child_of(single).into_iter().collect(),
        }
    }
}

/// One normalized child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// A nested element description.
    Element(Rc<Element>),
    /// A scalar child, rendered as text content.
    Text(String),
}

fn child_of(value: &PropValue) -> Option<Child> {
    match value {
        PropValue::Element(el) => Some(Child::Element(el.clone())),
        PropValue::Str(s) => Some(Child::Text(s.clone())),
        PropValue::Num(n) => Some(Child::Text(format_number(*n))),
        PropValue::Bool(b) => Some(Child::Text(b.to_string())),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_builders() {
        let el = Element::new("div")
            .with_id("root")
            .with_class("panel main")
            .with_style([("color", "red".into())]);
        assert_eq!(el.type_name, "div");
        assert_eq!(el.id(), Some("root"));
        assert_eq!(el.class_name(), Some("panel main"));
        assert_eq!(
            el.style().unwrap().get("color").and_then(PropValue::as_str),
            Some("red")
        );
    }

    #[test]
    fn children_absent_is_empty() {
        let el = Element::new("div");
        assert!(el.children().is_empty());
    }

    #[test]
    fn children_scalar_becomes_text() {
        let el = Element::new("text").with_prop("children", "hello");
        assert_eq!(el.children(), vec![Child::Text("hello".to_owned())]);
    }

    #[test]
    fn children_numeric_scalar() {
        let el = Element::new("text").with_prop("children", 42.0);
        assert_eq!(el.children(), vec![Child::Text("42".to_owned())]);
    }

    #[test]
    fn children_sequence_preserves_order() {
        let el = Element::new("div")
            .with_child(Element::new("text"))
            .with_child(Element::new("button"));
        let kids = el.children();
        assert_eq!(kids.len(), 2);
        match (&kids[0], &kids[1]) {
            (Child::Element(a), Child::Element(b)) => {
                assert_eq!(a.type_name, "text");
                assert_eq!(b.type_name, "button");
            }
            other => panic!("unexpected children: {other:?}"),
        }
    }

    #[test]
    fn with_child_promotes_scalar_to_list() {
        let el = Element::new("div")
            .with_prop("children", "first")
            .with_child(Element::new("text"));
        let kids = el.children();
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0], Child::Text("first".to_owned()));
    }

    #[test]
    fn handlers_compare_by_source() {
        let a = PropValue::Handler(Rc::from("() => count + 1"));
        let b = PropValue::Handler(Rc::from("() => count + 1"));
        let c = PropValue::Handler(Rc::from("() => count + 2"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
