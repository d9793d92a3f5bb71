//! The retained native widget tree.
//!
//! All widgets live in a single slotmap arena; parent/child links and slots
//! sit in secondary maps so removal is O(subtree) and lookup is O(1). Any
//! batch of property mutations must end with [`WidgetTree::synchronize`] on
//! the touched widget for the change to take visible effect; the per-widget
//! and global synchronize counters exist so callers can observe exactly when
//! that happened.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::slot::Slot;
use super::widget::{CommonProps, WidgetId, WidgetKind};

const EMPTY_CHILDREN: &[WidgetId] = &[];

/// One widget's retained state.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetData {
    pub kind: WidgetKind,
    pub common: CommonProps,
    /// Clip children to this widget's bounds (`visibility: clip`).
    pub clip_children: bool,
}

impl WidgetData {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            common: CommonProps::default(),
            clip_children: false,
        }
    }
}

/// The retained widget tree.
pub struct WidgetTree {
    widgets: SlotMap<WidgetId, WidgetData>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    /// Slot of a widget within its parent; absent for detached widgets.
    slots: SecondaryMap<WidgetId, Slot>,
    sync_counts: SecondaryMap<WidgetId, u64>,
    total_syncs: u64,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            slots: SecondaryMap::new(),
            sync_counts: SecondaryMap::new(),
            total_syncs: 0,
        }
    }

    /// Create a detached widget.
    pub fn insert(&mut self, kind: WidgetKind) -> WidgetId {
        let id = self.widgets.insert(WidgetData::new(kind));
        self.children.insert(id, Vec::new());
        self.sync_counts.insert(id, 0);
        id
    }

    /// Attach `child` as the last child of `parent`, creating its slot.
    ///
    /// A child already attached elsewhere is detached first; its previous
    /// slot configuration does not carry over.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) {
        debug_assert!(self.widgets.contains_key(parent), "parent does not exist");
        debug_assert!(self.widgets.contains_key(child), "child does not exist");

        self.detach(child);
        self.parent.insert(child, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(child);
        self.slots.insert(child, Slot::new());
    }

    /// Move an attached child to `index` among its siblings. Preserves the
    /// child's slot. Out-of-range indices clamp to the end.
    pub fn reorder_child(&mut self, child: WidgetId, index: usize) {
        let Some(&parent) = self.parent.get(child) else {
            return;
        };
        let Some(siblings) = self.children.get_mut(parent) else {
            return;
        };
        let Some(from) = siblings.iter().position(|&sibling| sibling == child) else {
            return;
        };
        siblings.remove(from);
        let index = index.min(siblings.len());
        siblings.insert(index, child);
    }

    /// Detach a widget from its parent, dropping its slot. The subtree under
    /// the widget stays intact.
    pub fn detach(&mut self, child: WidgetId) {
        if let Some(parent) = self.parent.remove(child) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&sibling| sibling != child);
            }
            self.slots.remove(child);
        }
    }

    /// Remove a widget and its whole subtree.
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetData> {
        if !self.widgets.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut queue = VecDeque::new();
        queue.push_back(id);
        let mut removed = None;

        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            self.slots.remove(current);
            self.sync_counts.remove(current);
            let data = self.widgets.remove(current);
            if current == id {
                removed = data;
            }
        }

        removed
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetData> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetData> {
        self.widgets.get_mut(id)
    }

    pub fn kind(&self, id: WidgetId) -> Option<&WidgetKind> {
        self.widgets.get(id).map(|data| &data.kind)
    }

    pub fn kind_mut(&mut self, id: WidgetId) -> Option<&mut WidgetKind> {
        self.widgets.get_mut(id).map(|data| &mut data.kind)
    }

    pub fn common(&self, id: WidgetId) -> Option<&CommonProps> {
        self.widgets.get(id).map(|data| &data.common)
    }

    pub fn common_mut(&mut self, id: WidgetId) -> Option<&mut CommonProps> {
        self.widgets.get_mut(id).map(|data| &mut data.common)
    }

    /// The slot of `child` within its current parent.
    pub fn slot(&self, child: WidgetId) -> Option<&Slot> {
        self.slots.get(child)
    }

    pub fn slot_mut(&mut self, child: WidgetId) -> Option<&mut Slot> {
        self.slots.get_mut(child)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Pre-order depth-first walk from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.widgets.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Flush pending property mutations on one widget.
    ///
    /// Callers batch their mutations and call this once at the end; the
    /// counters make redundant flushes detectable in tests.
    pub fn synchronize(&mut self, id: WidgetId) {
        if let Some(count) = self.sync_counts.get_mut(id) {
            *count += 1;
            self.total_syncs += 1;
        }
    }

    /// How many times `synchronize` ran for this widget.
    pub fn sync_count(&self, id: WidgetId) -> u64 {
        self.sync_counts.get(id).copied().unwrap_or(0)
    }

    /// How many times `synchronize` ran across the whole tree.
    pub fn total_sync_count(&self) -> u64 {
        self.total_syncs
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::alignment::HAlign;
    use crate::toolkit::widget::Orientation;
    use crate::toolkit::widget::WrapAlignment;
    use crate::geometry::Vec2;

    fn flow_kind() -> WidgetKind {
        WidgetKind::HorizontalBox { rtl: false }
    }

    /// ```text
    ///      root
    ///     /    \
    ///    a      b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(flow_kind());
        let a = tree.insert(WidgetKind::Overlay);
        let b = tree.insert(WidgetKind::Canvas);
        let c = tree.insert(WidgetKind::Button);
        let d = tree.insert(WidgetKind::Spacer { size: Vec2::ZERO });
        tree.attach(root, a);
        tree.attach(root, b);
        tree.attach(a, c);
        tree.attach(a, d);
        (tree, root, a, b, c, d)
    }

    #[test]
    fn attach_builds_parent_links_and_slots() {
        let (tree, root, a, _b, c, _d) = build_tree();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
        assert!(tree.slot(c).is_some());
        assert!(tree.slot(root).is_none());
    }

    #[test]
    fn children_keep_attachment_order() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.children(b).is_empty());
    }

    #[test]
    fn reattach_moves_and_resets_slot() {
        let (mut tree, _root, a, b, c, _d) = build_tree();
        tree.slot_mut(c).unwrap().horizontal = HAlign::Right;
        tree.attach(b, c);
        assert_eq!(tree.parent(c), Some(b));
        assert!(!tree.children(a).contains(&c));
        // Slot configuration does not survive the move.
        assert_eq!(tree.slot(c).unwrap().horizontal, HAlign::Fill);
    }

    #[test]
    fn detach_keeps_subtree() {
        let (mut tree, root, a, _b, c, d) = build_tree();
        tree.detach(a);
        assert_eq!(tree.parent(a), None);
        assert!(!tree.children(root).contains(&a));
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.contains(c));
    }

    #[test]
    fn remove_deletes_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        let removed = tree.remove(a);
        assert!(removed.is_some());
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert!(tree.contains(root));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_stale_id_is_none() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(flow_kind());
        tree.remove(id);
        assert!(tree.remove(id).is_none());
    }

    #[test]
    fn kind_mutation_is_visible() {
        let (mut tree, root, ..) = build_tree();
        if let Some(WidgetKind::HorizontalBox { rtl }) = tree.kind_mut(root) {
            *rtl = true;
        }
        assert_eq!(tree.kind(root), Some(&WidgetKind::HorizontalBox { rtl: true }));
    }

    #[test]
    fn wrap_box_config_lives_in_the_variant() {
        let mut tree = WidgetTree::new();
        let wrap = tree.insert(WidgetKind::WrapBox {
            orientation: Orientation::Vertical,
            gap: Vec2::new(4.0, 8.0),
            alignment: WrapAlignment::Center,
        });
        match tree.kind(wrap).unwrap() {
            WidgetKind::WrapBox { gap, .. } => assert_eq!(*gap, Vec2::new(4.0, 8.0)),
            other => panic!("unexpected kind {}", other.name()),
        }
    }

    #[test]
    fn walk_depth_first_order() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
    }

    #[test]
    fn synchronize_counters() {
        let (mut tree, root, a, ..) = build_tree();
        assert_eq!(tree.total_sync_count(), 0);
        tree.synchronize(root);
        tree.synchronize(root);
        tree.synchronize(a);
        assert_eq!(tree.sync_count(root), 2);
        assert_eq!(tree.sync_count(a), 1);
        assert_eq!(tree.total_sync_count(), 3);
    }

    #[test]
    fn synchronize_on_removed_widget_is_noop() {
        let (mut tree, _root, a, ..) = build_tree();
        tree.remove(a);
        tree.synchronize(a);
        assert_eq!(tree.total_sync_count(), 0);
    }
}
