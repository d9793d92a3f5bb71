//! Selector matching and cascade resolution.
//!
//! A [`Stylesheet`] is a snapshot of three selector buckets (type, class, id).
//! [`resolve_style`] folds the buckets over an element in ascending precedence
//! order; within one bucket, later writers win. The result is a flat
//! [`ResolvedStyle`] map the converters read from, so cascade order is decided
//! exactly once per element per update.

use std::collections::HashMap;

use crate::element::{Props, PropValue};
use crate::style::length::{resolve_length, resolve_length_key};

// ─────────────────────────────────────────────────────────────────────────────
// Resolved style
// ─────────────────────────────────────────────────────────────────────────────

/// The flattened outcome of the cascade for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    props: Props,
}

impl ResolvedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_props(props: Props) -> Self {
        Self { props }
    }

    pub fn set(&mut self, key: impl Into<String>, value: PropValue) {
        self.props.insert(key.into(), value);
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn get_value(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// String value of a key, `None` for absent or non-string values.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(PropValue::as_str)
    }

    /// Numeric value of a key, accepting both numbers and numeric strings.
    pub fn number(&self, key: &str) -> Option<f32> {
        match self.props.get(key)? {
            PropValue::Num(n) => Some(*n as f32),
            PropValue::Str(s) => s.trim().parse::<f32>().ok(),
            _ => None,
        }
    }

    /// Length value of a key in absolute units, `None` when absent or `auto`.
    pub fn length(&self, key: &str) -> Option<f32> {
        resolve_length_key(self, key)
    }

    /// Resolve an arbitrary length token against this style's font context.
    pub fn resolve(&self, value: &str) -> f32 {
        resolve_length(value, self)
    }

    /// Merge `other` over this style, later writers winning per key.
    pub fn merge(&mut self, other: &Props) {
        for (key, value) in other {
            self.props.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.props.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stylesheet
// ─────────────────────────────────────────────────────────────────────────────

/// An immutable snapshot of parsed style rules, bucketed by selector kind.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    type_rules: HashMap<String, Props>,
    class_rules: HashMap<String, Props>,
    id_rules: HashMap<String, Props>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a sheet of `selector { declarations }` blocks.
    ///
    /// Selector lists (`a, .b`) share one declaration block. Unparseable
    /// blocks are skipped; a bad sheet never fails a build.
    pub fn parse(source: &str) -> Self {
        let mut sheet = Self::new();
        let mut rest = source;
        while let Some(open) = rest.find('{') {
            let selectors = rest[..open].trim().to_owned();
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            let body = &rest[open + 1..open + close];
            let declarations = parse_declarations(body);
            for selector in selectors.split(',') {
                sheet.insert_rule(selector.trim(), declarations.clone());
            }
            rest = &rest[open + close + 1..];
        }
        sheet
    }

    /// Register one rule. The selector kind is decided by its first byte:
    /// `.name` is a class rule, `#name` an id rule, anything else a type rule.
    pub fn insert_rule(&mut self, selector: &str, declarations: Props) {
        if selector.is_empty() {
            return;
        }
        let bucket = if let Some(class) = selector.strip_prefix('.') {
            self.class_rules.entry(class.to_owned())
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id_rules.entry(id.to_owned())
        } else {
            self.type_rules.entry(selector.to_owned())
        };
        // Re-declared selectors merge, later declarations winning.
        bucket.or_default().extend(declarations);
    }

    pub fn type_rule(&self, name: &str) -> Option<&Props> {
        self.type_rules.get(name)
    }

    pub fn class_rule(&self, name: &str) -> Option<&Props> {
        self.class_rules.get(name)
    }

    pub fn id_rule(&self, name: &str) -> Option<&Props> {
        self.id_rules.get(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Declarations
// ─────────────────────────────────────────────────────────────────────────────

/// Parse `key: value; key: value` text into camelCase-keyed props.
pub fn parse_declarations(body: &str) -> Props {
    let mut props = Props::new();
    for declaration in body.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = kebab_to_camel(key.trim());
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        props.insert(key, PropValue::from(value));
    }
    props
}

/// `font-size` -> `fontSize`; already-camel keys pass through unchanged.
pub fn kebab_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Cascade
// ─────────────────────────────────────────────────────────────────────────────

/// Fold the cascade for one element: type rules, then each class in list
/// order, then the id rule, then inline `style`. Later sources override
/// earlier ones key by key.
pub fn resolve_style(
    sheet: &Stylesheet,
    type_name: &str,
    props: Option<&Props>,
) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::new();

    if let Some(rule) = sheet.type_rule(type_name) {
        resolved.merge(rule);
    }

    if let Some(props) = props {
        if let Some(classes) = props.get("className").and_then(PropValue::as_str) {
            for class in classes.split_whitespace() {
                if let Some(rule) = sheet.class_rule(class) {
                    resolved.merge(rule);
                }
            }
        }

        if let Some(id) = props.get("id").and_then(PropValue::as_str) {
            if let Some(rule) = sheet.id_rule(id) {
                resolved.merge(rule);
            }
        }

        match props.get("style") {
            Some(PropValue::Map(inline)) => resolved.merge(inline),
            Some(PropValue::Str(inline)) => resolved.merge(&parse_declarations(inline)),
            _ => {}
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use pretty_assertions::assert_eq;

    fn sheet() -> Stylesheet {
        Stylesheet::parse(
            "div { color: black; padding: 4px }
             .warn { color: orange }
             .loud { color: red; font-size: 20px }
             #banner { color: blue }",
        )
    }

    #[test]
    fn kebab_keys_become_camel() {
        assert_eq!(kebab_to_camel("font-size"), "fontSize");
        assert_eq!(kebab_to_camel("grid-template-columns"), "gridTemplateColumns");
        assert_eq!(kebab_to_camel("opacity"), "opacity");
    }

    #[test]
    fn declarations_parse_and_skip_garbage() {
        let props = parse_declarations("color: red; nonsense; font-size: 12px;");
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("color").and_then(PropValue::as_str), Some("red"));
        assert_eq!(
            props.get("fontSize").and_then(PropValue::as_str),
            Some("12px")
        );
    }

    #[test]
    fn type_rule_applies_alone() {
        let resolved = resolve_style(&sheet(), "div", None);
        assert_eq!(resolved.str("color"), Some("black"));
        assert_eq!(resolved.str("padding"), Some("4px"));
    }

    #[test]
    fn class_overrides_type_in_list_order() {
        let el = Element::new("div").with_class("warn loud");
        let resolved = resolve_style(&sheet(), "div", Some(&el.props));
        // "loud" is later in the class list, so it wins over "warn".
        assert_eq!(resolved.str("color"), Some("red"));
        assert_eq!(resolved.str("fontSize"), Some("20px"));
        assert_eq!(resolved.str("padding"), Some("4px"));
    }

    #[test]
    fn id_overrides_classes() {
        let el = Element::new("div").with_class("loud").with_id("banner");
        let resolved = resolve_style(&sheet(), "div", Some(&el.props));
        assert_eq!(resolved.str("color"), Some("blue"));
        assert_eq!(resolved.str("fontSize"), Some("20px"));
    }

    #[test]
    fn inline_style_overrides_everything() {
        let el = Element::new("div")
            .with_class("loud")
            .with_id("banner")
            .with_style([("color", PropValue::from("green"))]);
        let resolved = resolve_style(&sheet(), "div", Some(&el.props));
        assert_eq!(resolved.str("color"), Some("green"));
    }

    #[test]
    fn inline_style_as_declaration_text() {
        let el = Element::new("div").with_prop("style", "color: teal; margin: 2px");
        let resolved = resolve_style(&sheet(), "div", Some(&el.props));
        assert_eq!(resolved.str("color"), Some("teal"));
        assert_eq!(resolved.str("margin"), Some("2px"));
    }

    #[test]
    fn unknown_type_resolves_empty() {
        let resolved = resolve_style(&sheet(), "mystery", None);
        assert!(resolved.is_empty());
    }
}
