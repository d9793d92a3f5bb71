//! The element converter contract.
//!
//! One converter instance exists per live element node. The four required
//! operations (create, update, append-child, remove-child) are the whole
//! surface a parent container needs from any child converter; the provided
//! [`Converter::create_widget`] and [`Converter::update_widget`] wrappers add
//! the concern every kind shares, which is common-property application and
//! the trailing synchronize call.

use thiserror::Error;

use crate::assets::AssetBroker;
use crate::element::Props;
use crate::style::cascade::{resolve_style, ResolvedStyle, Stylesheet};
use crate::style::diff::diff_props;
use crate::toolkit::{WidgetId, WidgetTree};

use super::common::{apply_changed_common_props, apply_common_props};

/// Fatal conversion failures.
///
/// Per the error taxonomy almost nothing here is fatal: bad style values
/// resolve to defaults and unknown keywords fall through to default
/// branches. The one structural error is an element with no type name,
/// which the factory rejects before any converter runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("element description has no type name")]
    MissingTypeName,
}

/// Shared mutable state threaded through every converter operation.
pub struct ConvertCx<'a> {
    pub tree: &'a mut WidgetTree,
    pub sheet: &'a Stylesheet,
    pub assets: &'a mut AssetBroker,
}

impl<'a> ConvertCx<'a> {
    pub fn new(
        tree: &'a mut WidgetTree,
        sheet: &'a Stylesheet,
        assets: &'a mut AssetBroker,
    ) -> Self {
        Self { tree, sheet, assets }
    }

    /// Resolve the cascade for an element against the current stylesheet.
    pub fn resolve(&self, type_name: &str, props: &Props) -> ResolvedStyle {
        resolve_style(self.sheet, type_name, Some(props))
    }
}

/// The lifecycle contract every concrete converter implements.
pub trait Converter {
    fn type_name(&self) -> &str;

    /// The props snapshot from the last create/update.
    fn props(&self) -> &Props;

    fn set_props(&mut self, props: Props);

    /// Build the type-specific native widget (chain included for
    /// containers). Common properties are not applied here.
    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId;

    /// Apply a changed-props map to the existing widget. Never rebuilds.
    fn update(&mut self, cx: &mut ConvertCx<'_>, old_props: &Props, changed: &Props);

    /// Attach an already-created child widget under this element.
    fn append_child(
        &mut self,
        cx: &mut ConvertCx<'_>,
        child: WidgetId,
        child_type: &str,
        child_props: &Props,
    );

    /// Detach a child widget. The child's own subtree is not released here;
    /// that is the child converter's teardown.
    fn remove_child(&mut self, cx: &mut ConvertCx<'_>, child: WidgetId);

    /// The outermost widget the parent sees, once created.
    fn outermost(&self) -> Option<WidgetId>;

    /// Create the native widget and apply common properties in one batch,
    /// ending with a single synchronize.
    fn create_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let widget = self.create_native_widget(cx);
        let style = cx.resolve(self.type_name(), self.props());
        apply_common_props(cx.tree, widget, &style, self.props());
        cx.tree.synchronize(widget);
        widget
    }

    /// Diff against the stored props and apply only what changed.
    ///
    /// An empty diff touches nothing: no property writes, no synchronize.
    fn update_widget(&mut self, cx: &mut ConvertCx<'_>, new_props: &Props) {
        let old_props = self.props().clone();
        let changed = diff_props(&old_props, new_props);
        if changed.is_empty() {
            return;
        }
        self.set_props(new_props.clone());

        let Some(widget) = self.outermost() else {
            return;
        };
        let old_style = cx.resolve(self.type_name(), &old_props);
        let style = cx.resolve(self.type_name(), new_props);
        apply_changed_common_props(cx.tree, widget, &style, new_props, &old_style, &old_props);
        self.update(cx, &old_props, &changed);
        cx.tree.synchronize(widget);
    }
}
