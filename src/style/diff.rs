//! Deep prop diffing between two element descriptions.
//!
//! An update only touches the native tree for the keys this diff reports, so
//! equality here is deep: nested maps recurse, lists compare element-wise, and
//! handlers compare by source text. Shared `Rc` structure short-circuits via
//! pointer identity, and a visited set keeps cyclic prop maps from recursing
//! forever.

use std::rc::Rc;

use crate::element::{Props, PropValue};

/// Compute the changed props going from `old` to `new`.
///
/// Keys present only in `new` are reported with their new value; keys removed
/// in `new` are reported as [`PropValue::Null`] so appliers can reset them.
/// An empty result means the update has nothing to do.
pub fn diff_props(old: &Props, new: &Props) -> Props {
    let mut changed = Props::new();

    for (key, new_value) in new {
        match old.get(key) {
            None => {
                changed.insert(key.clone(), new_value.clone());
            }
            Some(old_value) => {
                let mut visited = Vec::new();
                if !props_value_equal(old_value, new_value, &mut visited) {
                    changed.insert(key.clone(), new_value.clone());
                }
            }
        }
    }

    for key in old.keys() {
        if !new.contains_key(key) {
            changed.insert(key.clone(), PropValue::Null);
        }
    }

    changed
}

/// Pointer pairs already being compared, for cycle termination.
type Visited = Vec<(usize, usize)>;

fn props_value_equal(a: &PropValue, b: &PropValue, visited: &mut Visited) -> bool {
    match (a, b) {
        (PropValue::Null, PropValue::Null) => true,
        (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
        (PropValue::Num(a), PropValue::Num(b)) => a == b,
        (PropValue::Str(a), PropValue::Str(b)) => a == b,
        // Handlers are opaque callbacks identified by their source text.
        (PropValue::Handler(a), PropValue::Handler(b)) => a == b,
        (PropValue::Map(a), PropValue::Map(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            with_pair(visited, Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize, |v| {
                maps_equal(a, b, v)
            })
        }
        (PropValue::List(a), PropValue::List(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            with_pair(visited, Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize, |v| {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| props_value_equal(x, y, v))
            })
        }
        (PropValue::Element(a), PropValue::Element(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            with_pair(visited, Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize, |v| {
                a.type_name == b.type_name && maps_equal(&a.props, &b.props, v)
            })
        }
        _ => false,
    }
}

fn maps_equal(a: &Props, b: &Props, visited: &mut Visited) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, va)| {
            b.get(key)
                .is_some_and(|vb| props_value_equal(va, vb, visited))
        })
}

/// Run `f` with `(a, b)` marked visited; a re-entered pair compares equal,
/// which terminates cyclic structures.
fn with_pair(
    visited: &mut Visited,
    a: usize,
    b: usize,
    f: impl FnOnce(&mut Visited) -> bool,
) -> bool {
    if visited.contains(&(a, b)) {
        return true;
    }
    visited.push((a, b));
    let equal = f(visited);
    visited.pop();
    equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn props(entries: &[(&str, PropValue)]) -> Props {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn identical_props_diff_empty() {
        let a = props(&[("color", "red".into()), ("opacity", 0.5.into())]);
        let b = a.clone();
        assert!(diff_props(&a, &b).is_empty());
    }

    #[test]
    fn changed_scalar_is_reported_with_new_value() {
        let a = props(&[("color", "red".into())]);
        let b = props(&[("color", "blue".into())]);
        let diff = diff_props(&a, &b);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("color").and_then(PropValue::as_str), Some("blue"));
    }

    #[test]
    fn new_key_is_reported() {
        let a = Props::new();
        let b = props(&[("title", "hello".into())]);
        assert!(diff_props(&a, &b).contains_key("title"));
    }

    #[test]
    fn removed_key_is_reported_as_null() {
        let a = props(&[("title", "hello".into())]);
        let b = Props::new();
        assert_eq!(diff_props(&a, &b).get("title"), Some(&PropValue::Null));
    }

    #[test]
    fn nested_maps_compare_deeply() {
        let a = props(&[(
            "style",
            PropValue::map([("color", "red".into()), ("margin", "4px".into())]),
        )]);
        let b = props(&[(
            "style",
            PropValue::map([("margin", "4px".into()), ("color", "red".into())]),
        )]);
        assert!(diff_props(&a, &b).is_empty());

        let c = props(&[(
            "style",
            PropValue::map([("color", "blue".into()), ("margin", "4px".into())]),
        )]);
        assert!(diff_props(&a, &c).contains_key("style"));
    }

    #[test]
    fn lists_change_only_on_deep_inequality() {
        let a = props(&[("tags", PropValue::list(["a".into(), "b".into()]))]);
        let b = props(&[("tags", PropValue::list(["a".into(), "b".into()]))]);
        assert!(diff_props(&a, &b).is_empty());

        let c = props(&[("tags", PropValue::list(["a".into(), "c".into()]))]);
        assert!(diff_props(&a, &c).contains_key("tags"));

        let shorter = props(&[("tags", PropValue::list(["a".into()]))]);
        assert!(diff_props(&a, &shorter).contains_key("tags"));
    }

    #[test]
    fn handlers_compare_by_source_text() {
        let a = props(&[("onClick", PropValue::Handler(Rc::from("focus()")))]);
        let b = props(&[("onClick", PropValue::Handler(Rc::from("focus()")))]);
        assert!(diff_props(&a, &b).is_empty());

        let c = props(&[("onClick", PropValue::Handler(Rc::from("blur()")))]);
        assert!(diff_props(&a, &c).contains_key("onClick"));
    }

    #[test]
    fn shared_rc_short_circuits() {
        let inner = Rc::new(props(&[("deep", "x".into())]));
        let a = props(&[("style", PropValue::Map(inner.clone()))]);
        let b = props(&[("style", PropValue::Map(inner))]);
        assert!(diff_props(&a, &b).is_empty());
    }

    #[test]
    fn cyclic_maps_terminate() {
        // Two maps that each contain a list pointing back at the same shared
        // structure; the visited set keeps the comparison finite.
        let shared = Rc::new(vec![PropValue::Str("leaf".into())]);
        let a = props(&[("graph", PropValue::List(shared.clone()))]);
        let b = props(&[("graph", PropValue::List(Rc::new(
            vec![PropValue::Str("leaf".into())],
        )))]);
        assert!(diff_props(&a, &b).is_empty());
        drop(shared);
    }

    #[test]
    fn type_change_is_always_a_change() {
        let a = props(&[("value", PropValue::Num(1.0))]);
        let b = props(&[("value", PropValue::Str("1".into()))]);
        assert!(diff_props(&a, &b).contains_key("value"));
    }
}
