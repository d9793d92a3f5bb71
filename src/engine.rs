//! The composition engine: mounts an element tree into native widgets and
//! drives diff-based updates against it.
//!
//! An update walks the mounted tree and the new element tree in lockstep,
//! matching children positionally. A node is rebuilt (widget subtree
//! replaced) only when its type name changes or a wrapper-triggering style
//! key appears or disappears; everything else is an in-place property
//! update through the node's converter.

use std::rc::Rc;

use crate::assets::AssetBroker;
use crate::convert::{create_converter, AnyConverter, ConvertCx, ConvertError, Converter};
use crate::element::{Child, Element};
use crate::style::cascade::Stylesheet;
use crate::toolkit::{WidgetId, WidgetTree};

/// Style keys that decide whether a wrapper widget exists. `update` never
/// grows or shrinks the wrapper chain, so toggling one of these forces a
/// rebuild of the node.
/// Keys whose resolved value picks the base panel. Any value change means a
/// different widget kind, so the subtree is rebuilt rather than mutated.
const REBUILD_VALUE_KEYS: &[&str] = &["display", "flexDirection", "flexFlow"];

const REBUILD_KEYS: &[&str] = &[
    "display",
    "flexDirection",
    "flexFlow",
    "flexWrap",
    "background",
    "backgroundColor",
    "backgroundImage",
    "backgroundPosition",
    "width",
    "height",
    "objectFit",
];

struct MountedNode {
    converter: AnyConverter,
    children: Vec<MountedNode>,
}

impl MountedNode {
    fn widget(&self) -> Option<WidgetId> {
        self.converter.outermost()
    }
}

pub struct Engine {
    tree: WidgetTree,
    sheet: Stylesheet,
    assets: AssetBroker,
    root: Option<MountedNode>,
}

impl Engine {
    pub fn new(sheet: Stylesheet) -> Self {
        Self { tree: WidgetTree::new(), sheet, assets: AssetBroker::new(), root: None }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn root_widget(&self) -> Option<WidgetId> {
        self.root.as_ref().and_then(MountedNode::widget)
    }

    /// Complete asset loads and drain handler notices through these.
    pub fn assets_mut(&mut self) -> (&mut AssetBroker, &mut WidgetTree) {
        (&mut self.assets, &mut self.tree)
    }

    /// Mount an element tree, replacing whatever was mounted before.
    pub fn mount(&mut self, element: &Element) -> Result<WidgetId, ConvertError> {
        self.unmount();
        let mut cx = ConvertCx::new(&mut self.tree, &self.sheet, &mut self.assets);
        let node = mount_node(&mut cx, element)?;
        let widget = node.widget().expect("mounted node has a widget");
        self.root = Some(node);
        Ok(widget)
    }

    /// Diff the new element tree against the mounted one.
    pub fn update(&mut self, element: &Element) -> Result<WidgetId, ConvertError> {
        let Some(mut root) = self.root.take() else {
            return self.mount(element);
        };
        let mut cx = ConvertCx::new(&mut self.tree, &self.sheet, &mut self.assets);
        if needs_rebuild(&cx, &root, element) {
            drop(cx);
            if let Some(widget) = root.widget() {
                self.tree.remove(widget);
                self.assets.prune(&self.tree);
            }
            return self.mount(element);
        }
        update_node(&mut cx, &mut root, element)?;
        let widget = root.widget().expect("mounted node has a widget");
        self.root = Some(root);
        Ok(widget)
    }

    /// Tear down the mounted tree and all of its native widgets.
    pub fn unmount(&mut self) {
        if let Some(root) = self.root.take() {
            if let Some(widget) = root.widget() {
                self.tree.remove(widget);
                self.assets.prune(&self.tree);
            }
        }
    }
}

/// Wrap a bare text child in a text element so it flows through the same
/// converter machinery as everything else.
fn text_element(text: &str) -> Element {
    Element::new("span").with_prop("children", text)
}

fn mount_node(cx: &mut ConvertCx<'_>, element: &Element) -> Result<MountedNode, ConvertError> {
    let mut converter = create_converter(&element.type_name, element.props.clone())?;
    converter.create_widget(cx);

    let mut node = MountedNode { converter, children: Vec::new() };
    // Text converters consume their children as content.
    if matches!(node.converter, AnyConverter::Text(_) | AnyConverter::TextInput(_)) {
        return Ok(node);
    }

    for child in element.children() {
        let child_element: Rc<Element> = match child {
            Child::Element(el) => el,
            Child::Text(text) => Rc::new(text_element(&text)),
        };
        let child_node = mount_node(cx, &child_element)?;
        if let Some(child_widget) = child_node.widget() {
            node.converter.append_child(
                cx,
                child_widget,
                &child_element.type_name,
                &child_element.props,
            );
        }
        node.children.push(child_node);
    }
    Ok(node)
}

fn needs_rebuild(cx: &ConvertCx<'_>, node: &MountedNode, element: &Element) -> bool {
    if node.converter.type_name() != element.type_name {
        return true;
    }
    let old_style = cx.resolve(node.converter.type_name(), node.converter.props());
    let new_style = cx.resolve(&element.type_name, &element.props);
    if REBUILD_VALUE_KEYS
        .iter()
        .any(|key| old_style.get_value(key) != new_style.get_value(key))
    {
        return true;
    }
    REBUILD_KEYS
        .iter()
        .any(|key| old_style.is_set(key) != new_style.is_set(key))
}

fn update_node(
    cx: &mut ConvertCx<'_>,
    node: &mut MountedNode,
    element: &Element,
) -> Result<(), ConvertError> {
    node.converter.update_widget(cx, &element.props);

    if matches!(node.converter, AnyConverter::Text(_) | AnyConverter::TextInput(_)) {
        return Ok(());
    }

    let new_children: Vec<Rc<Element>> = element
        .children()
        .into_iter()
        .map(|child| match child {
            Child::Element(el) => el,
            Child::Text(text) => Rc::new(text_element(&text)),
        })
        .collect();

    // Positional matching: pair by index, then handle the length delta.
    let paired = node.children.len().min(new_children.len());
    for index in 0..paired {
        let child_element = &new_children[index];
        if needs_rebuild(cx, &node.children[index], child_element) {
            let old = std::mem::replace(&mut node.children[index], mount_node(cx, child_element)?);
            if let Some(widget) = old.widget() {
                node.converter.remove_child(cx, widget);
                cx.tree.remove(widget);
                cx.assets.prune(cx.tree);
            }
            if let Some(widget) = node.children[index].widget() {
                node.converter.append_child(
                    cx,
                    widget,
                    &child_element.type_name,
                    &child_element.props,
                );
                cx.tree.reorder_child(widget, index);
            }
        } else {
            update_node(cx, &mut node.children[index], child_element)?;
        }
    }

    for old in node.children.drain(paired..).collect::<Vec<_>>() {
        if let Some(widget) = old.widget() {
            node.converter.remove_child(cx, widget);
            cx.tree.remove(widget);
            cx.assets.prune(cx.tree);
        }
    }

    for child_element in &new_children[paired..] {
        let child_node = mount_node(cx, child_element)?;
        if let Some(widget) = child_node.widget() {
            node.converter.append_child(
                cx,
                widget,
                &child_element.type_name,
                &child_element.props,
            );
        }
        node.children.push(child_node);
    }

    Ok(())
}
