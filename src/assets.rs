//! Fire-and-forget asset loading.
//!
//! Conversion never blocks on an asset: a converter files a load request
//! and moves on. Whenever the host finishes a load it calls back through
//! [`AssetBroker::complete`], which patches the already-created widget in
//! place and queues a notice for the user's `onLoad`/`onError` handler. A
//! second request for the same widget supersedes the first; a completion
//! carrying a stale ticket is dropped silently. There is no cancellation.

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::geometry::Vec2;
use crate::style::ImageBrush;
use crate::toolkit::{WidgetId, WidgetKind, WidgetTree};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("asset failed to decode: {0}")]
    Decode(String),
}

/// Identifies one load request. Comparing tickets tells a completion
/// whether it has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetTicket(u64);

/// What the broker tells the host to forward to user handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetNotice {
    Loaded { handler: Rc<str>, path: String },
    Failed { handler: Rc<str>, error: AssetError },
}

struct Pending {
    ticket: AssetTicket,
    path: String,
    on_load: Option<Rc<str>>,
    on_error: Option<Rc<str>>,
}

#[derive(Default)]
pub struct AssetBroker {
    next_ticket: u64,
    pending: HashMap<WidgetId, Pending>,
    notices: Vec<AssetNotice>,
}

impl AssetBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a load request for `widget`. Any earlier request for the same
    /// widget is superseded; its completion will no longer apply.
    pub fn request(
        &mut self,
        widget: WidgetId,
        path: impl Into<String>,
        on_load: Option<Rc<str>>,
        on_error: Option<Rc<str>>,
    ) -> AssetTicket {
        self.next_ticket += 1;
        let ticket = AssetTicket(self.next_ticket);
        self.pending
            .insert(widget, Pending { ticket, path: path.into(), on_load, on_error });
        ticket
    }

    /// Drop pending requests whose widget no longer exists. Their
    /// completions will arrive, find nothing pending, and be ignored.
    pub fn prune(&mut self, tree: &WidgetTree) {
        self.pending.retain(|widget, _| tree.contains(*widget));
    }

    /// Resolve a load. On success the widget's image brush is patched in
    /// place and synchronized; on failure the widget keeps its pre-load
    /// state. Either way the matching handler notice is queued.
    pub fn complete(
        &mut self,
        tree: &mut WidgetTree,
        widget: WidgetId,
        ticket: AssetTicket,
        result: Result<Vec2, AssetError>,
    ) {
        let superseded = self.pending.get(&widget).map(|p| p.ticket != ticket);
        if superseded != Some(false) {
            return;
        }
        let pending = self.pending.remove(&widget).unwrap();

        match result {
            Ok(size) => {
                if let Some(WidgetKind::Image { brush, .. }) = tree.kind_mut(widget) {
                    *brush = Some(ImageBrush {
                        path: pending.path.clone(),
                        size: Some(size),
                        tiling: brush.as_ref().map(|b| b.tiling).unwrap_or_default(),
                    });
                    tree.synchronize(widget);
                }
                if let Some(handler) = pending.on_load {
                    self.notices.push(AssetNotice::Loaded { handler, path: pending.path });
                }
            }
            Err(error) => {
                if let Some(handler) = pending.on_error {
                    self.notices.push(AssetNotice::Failed { handler, error });
                }
            }
        }
    }

    pub fn has_pending(&self, widget: WidgetId) -> bool {
        self.pending.contains_key(&widget)
    }

    /// Hand queued handler notices to the host, oldest first.
    pub fn drain_notices(&mut self) -> Vec<AssetNotice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image_widget(tree: &mut WidgetTree) -> WidgetId {
        tree.insert(WidgetKind::Image { brush: None, tint: None })
    }

    #[test]
    fn successful_load_patches_the_brush_and_synchronizes() {
        let mut tree = WidgetTree::new();
        let widget = image_widget(&mut tree);
        let mut broker = AssetBroker::new();

        let ticket = broker.request(widget, "icons/save.png", Some(Rc::from("done()")), None);
        broker.complete(&mut tree, widget, ticket, Ok(Vec2::new(32.0, 32.0)));

        let Some(WidgetKind::Image { brush: Some(brush), .. }) = tree.kind(widget) else {
            panic!("brush not applied");
        };
        assert_eq!(brush.path, "icons/save.png");
        assert_eq!(brush.size, Some(Vec2::new(32.0, 32.0)));
        assert_eq!(tree.sync_count(widget), 1);
        assert_eq!(
            broker.drain_notices(),
            vec![AssetNotice::Loaded { handler: Rc::from("done()"), path: "icons/save.png".into() }]
        );
    }

    #[test]
    fn failed_load_keeps_the_preload_state() {
        let mut tree = WidgetTree::new();
        let widget = image_widget(&mut tree);
        let mut broker = AssetBroker::new();

        let ticket = broker.request(widget, "missing.png", None, Some(Rc::from("oops()")));
        broker.complete(
            &mut tree,
            widget,
            ticket,
            Err(AssetError::NotFound("missing.png".into())),
        );

        assert_eq!(tree.kind(widget), Some(&WidgetKind::Image { brush: None, tint: None }));
        assert_eq!(tree.sync_count(widget), 0);
        assert_eq!(broker.drain_notices().len(), 1);
    }

    #[test]
    fn second_request_supersedes_the_first() {
        let mut tree = WidgetTree::new();
        let widget = image_widget(&mut tree);
        let mut broker = AssetBroker::new();

        let stale = broker.request(widget, "a.png", None, None);
        let fresh = broker.request(widget, "b.png", None, None);

        broker.complete(&mut tree, widget, stale, Ok(Vec2::new(1.0, 1.0)));
        assert!(broker.has_pending(widget));

        broker.complete(&mut tree, widget, fresh, Ok(Vec2::new(2.0, 2.0)));
        let Some(WidgetKind::Image { brush: Some(brush), .. }) = tree.kind(widget) else {
            panic!("fresh load not applied");
        };
        assert_eq!(brush.path, "b.png");
    }

    #[test]
    fn pruned_request_completes_without_a_notice() {
        let mut tree = WidgetTree::new();
        let widget = image_widget(&mut tree);
        let mut broker = AssetBroker::new();

        let ticket = broker.request(widget, "late.png", Some(Rc::from("done()")), None);
        tree.remove(widget);
        broker.prune(&tree);
        assert!(!broker.has_pending(widget));

        broker.complete(&mut tree, widget, ticket, Ok(Vec2::new(8.0, 8.0)));
        assert!(broker.drain_notices().is_empty());
    }
}
