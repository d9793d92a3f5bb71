//! The container converter and its wrapper chain.
//!
//! A container's native footprint is a chain of widgets, built inside-out
//! around the base layout widget in a fixed stage order: wrap box, border,
//! size box, scale box. Each stage only materializes when its triggering
//! style keys are present, so the chain is usually short; the relative
//! order of whichever wrappers exist never changes. `update` mutates the
//! wrappers that exist and never grows the chain; a change that would need
//! a new wrapper requires a rebuild, which the engine decides.

use crate::element::Props;
use crate::style::alignment::parse_self_alignment;
use crate::style::background::{parse_background_props, Background};
use crate::style::cascade::ResolvedStyle;
use crate::style::color::parse_color;
use crate::style::length::{parse_aspect_ratio, parse_scale, resolve_gap, resolve_length_key};
use crate::style::{HAlign, VAlign};
use crate::toolkit::{
    Orientation, SizeOverrides, Stretch, WidgetId, WidgetKind, WidgetTree, WrapAlignment,
};

use super::canvas::CanvasLayout;
use super::converter::{ConvertCx, Converter};
use super::flex::FlexLayout;
use super::grid::GridLayout;
use super::overlay::OverlayLayout;

/// The four layout strategies a container can drive.
pub enum LayoutStrategy {
    Flex(FlexLayout),
    Grid(GridLayout),
    Canvas(CanvasLayout),
    Overlay(OverlayLayout),
}

impl LayoutStrategy {
    /// Pick the strategy for a type name. `div` is flex unless its
    /// resolved `display` asks for grid; the dedicated type names map
    /// directly.
    fn select(type_name: &str, style: &ResolvedStyle) -> LayoutStrategy {
        let key = if type_name.eq_ignore_ascii_case("div") {
            if style.str("display") == Some("grid") {
                "grid"
            } else {
                "flex"
            }
        } else {
            type_name
        };
        match key.to_ascii_lowercase().as_str() {
            "grid" => LayoutStrategy::Grid(GridLayout::new()),
            "canvas" => LayoutStrategy::Canvas(CanvasLayout),
            "overlay" => LayoutStrategy::Overlay(OverlayLayout),
            _ => LayoutStrategy::Flex(FlexLayout::new(style)),
        }
    }
}

pub struct ContainerConverter {
    type_name: String,
    props: Props,
    strategy: Option<LayoutStrategy>,
    /// The base layout widget children actually land in.
    base: Option<WidgetId>,
    wrap_box: Option<WidgetId>,
    border: Option<WidgetId>,
    size_box: Option<WidgetId>,
    scale_box: Option<WidgetId>,
    outermost: Option<WidgetId>,
    /// The widget sitting directly inside the last-created wrapper; its
    /// slot is the one the chain exposes for alignment.
    external_slot: Option<WidgetId>,
}

impl ContainerConverter {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self {
            type_name: type_name.into(),
            props,
            strategy: None,
            base: None,
            wrap_box: None,
            border: None,
            size_box: None,
            scale_box: None,
            outermost: None,
            external_slot: None,
        }
    }

    pub fn base_widget(&self) -> Option<WidgetId> {
        self.base
    }

    fn wrap_stage(&mut self, tree: &mut WidgetTree, style: &ResolvedStyle, inner: WidgetId) -> WidgetId {
        if !matches!(style.str("flexWrap"), Some("wrap" | "wrap-reverse")) {
            return inner;
        }
        let id = tree.insert(WidgetKind::WrapBox {
            orientation: Orientation::Horizontal,
            gap: crate::geometry::Vec2::ZERO,
            alignment: WrapAlignment::Leading,
        });
        if let Some(kind) = tree.kind_mut(id) {
            refresh_wrap(kind, style);
        }
        tree.attach(id, inner);
        self.external_slot = Some(inner);
        self.wrap_box = Some(id);
        id
    }

    fn background_stage(
        &mut self,
        tree: &mut WidgetTree,
        style: &ResolvedStyle,
        inner: WidgetId,
    ) -> WidgetId {
        let triggered = style.is_set("background")
            || style.is_set("backgroundColor")
            || style.is_set("backgroundImage")
            || style.is_set("backgroundPosition");
        if !triggered {
            return inner;
        }
        let background = parse_background_props(style);
        if background.is_empty() {
            return inner;
        }

        let (content_horizontal, content_vertical) = content_alignment(&background);
        let id = tree.insert(WidgetKind::Border {
            background,
            content_horizontal,
            content_vertical,
            desired_size_scale: parse_scale(style.str("scale")),
            content_tint: style.str("color").and_then(parse_color),
        });
        tree.attach(id, inner);
        self.external_slot = Some(inner);
        self.border = Some(id);
        id
    }

    fn size_stage(&mut self, tree: &mut WidgetTree, style: &ResolvedStyle, inner: WidgetId) -> WidgetId {
        let width = resolve_length_key(style, "width");
        let height = resolve_length_key(style, "height");
        if width.is_none() && height.is_none() {
            return inner;
        }

        let aspect = style.str("aspectRatio").and_then(parse_aspect_ratio);
        let id = tree.insert(WidgetKind::SizeBox {
            overrides: SizeOverrides {
                width,
                height,
                min_width: resolve_length_key(style, "minWidth"),
                min_height: resolve_length_key(style, "minHeight"),
                max_width: resolve_length_key(style, "maxWidth"),
                max_height: resolve_length_key(style, "maxHeight"),
                min_aspect_ratio: aspect,
                max_aspect_ratio: aspect,
            },
        });
        tree.attach(id, inner);
        self.external_slot = Some(inner);
        self.size_box = Some(id);
        id
    }

    fn scale_stage(&mut self, tree: &mut WidgetTree, style: &ResolvedStyle, inner: WidgetId) -> WidgetId {
        let Some(fit) = style.str("objectFit") else {
            return inner;
        };
        let id = tree.insert(WidgetKind::ScaleBox { stretch: object_fit(fit, style) });
        tree.attach(id, inner);
        self.external_slot = Some(inner);
        self.scale_box = Some(id);
        id
    }
}

/// Push the wrap-relevant keys of `style` onto an existing wrap box kind.
/// Keys that are absent leave the current value alone.
fn refresh_wrap(kind: &mut WidgetKind, style: &ResolvedStyle) {
    let WidgetKind::WrapBox { orientation, gap, alignment } = kind else {
        return;
    };
    if let Some(direction) = style.str("flexDirection") {
        *orientation = if matches!(direction, "column" | "column-reverse") {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
    }
    if let Some(value) = style.str("gap") {
        *gap = resolve_gap(value, style);
    }
    if let Some(justify_items) = style.str("justifyItems") {
        // First recognized keyword wins.
        let recognized = justify_items.split_whitespace().find_map(|token| match token {
            "flex-start" | "start" | "left" => Some(WrapAlignment::Leading),
            "flex-end" | "end" | "right" => Some(WrapAlignment::Trailing),
            "center" => Some(WrapAlignment::Center),
            "stretch" => Some(WrapAlignment::Fill),
            _ => None,
        });
        if let Some(recognized) = recognized {
            *alignment = recognized;
        }
    }
}

/// Brush alignment from a normalized background position.
fn content_alignment(background: &Background) -> (HAlign, VAlign) {
    let Some(position) = background.position else {
        return (HAlign::Fill, VAlign::Fill);
    };
    let horizontal = match position.x {
        x if x == 0.0 => HAlign::Left,
        x if x == 1.0 => HAlign::Right,
        _ => HAlign::Center,
    };
    let vertical = match position.y {
        y if y == 0.0 => VAlign::Top,
        y if y == 1.0 => VAlign::Bottom,
        _ => VAlign::Center,
    };
    (horizontal, vertical)
}

fn object_fit(fit: &str, style: &ResolvedStyle) -> Stretch {
    match fit {
        "cover" => Stretch::FillCrop,
        "fill" => Stretch::Stretch,
        "none" => Stretch::None,
        "scale-down" => {
            Stretch::UserScale { factor: style.number("scale").unwrap_or(1.0) }
        }
        // "contain" and anything unrecognized scale to fit.
        _ => Stretch::Fit,
    }
}

impl Converter for ContainerConverter {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn props(&self) -> &Props {
        &self.props
    }

    fn set_props(&mut self, props: Props) {
        self.props = props;
    }

    fn create_native_widget(&mut self, cx: &mut ConvertCx<'_>) -> WidgetId {
        let style = cx.resolve(&self.type_name, &self.props);
        let mut strategy = LayoutStrategy::select(&self.type_name, &style);

        let base = match &mut strategy {
            LayoutStrategy::Flex(flex) => flex.create_widget(cx.tree),
            LayoutStrategy::Grid(grid) => grid.create_widget(cx.tree, &style),
            LayoutStrategy::Canvas(canvas) => canvas.create_widget(cx.tree),
            LayoutStrategy::Overlay(overlay) => overlay.create_widget(cx.tree),
        };
        self.base = Some(base);
        self.strategy = Some(strategy);

        let mut widget = base;
        widget = self.wrap_stage(cx.tree, &style, widget);
        widget = self.background_stage(cx.tree, &style, widget);
        widget = self.size_stage(cx.tree, &style, widget);
        widget = self.scale_stage(cx.tree, &style, widget);
        self.outermost = Some(widget);
        widget
    }

    fn update(&mut self, cx: &mut ConvertCx<'_>, _old_props: &Props, changed: &Props) {
        let style = cx.resolve(&self.type_name, changed);

        if let Some(LayoutStrategy::Grid(grid)) = &mut self.strategy {
            if style.is_set("gridTemplateColumns") || style.is_set("gridTemplateRows") {
                if let Some(base) = self.base {
                    grid.apply_templates(cx.tree, base, &style);
                }
            }
        }

        if let Some(id) = self.wrap_box {
            if let Some(kind) = cx.tree.kind_mut(id) {
                refresh_wrap(kind, &style);
            }
        }

        if let Some(id) = self.border {
            let triggered = style.is_set("background")
                || style.is_set("backgroundColor")
                || style.is_set("backgroundImage")
                || style.is_set("backgroundPosition");
            if let Some(WidgetKind::Border {
                background,
                content_horizontal,
                content_vertical,
                desired_size_scale,
                content_tint,
            }) = cx.tree.kind_mut(id)
            {
                if triggered {
                    let parsed = parse_background_props(&style);
                    if parsed.color.is_some() {
                        background.color = parsed.color;
                    }
                    if parsed.image.is_some() {
                        background.image = parsed.image;
                    }
                    if parsed.position.is_some() {
                        background.position = parsed.position;
                        let (h, v) = content_alignment(background);
                        *content_horizontal = h;
                        *content_vertical = v;
                    }
                }
                if style.is_set("scale") {
                    *desired_size_scale = parse_scale(style.str("scale"));
                }
                if let Some(tint) = style.str("color").and_then(parse_color) {
                    *content_tint = Some(tint);
                }
            }
        }

        if let Some(id) = self.size_box {
            if let Some(WidgetKind::SizeBox { overrides }) = cx.tree.kind_mut(id) {
                if let Some(width) = resolve_length_key(&style, "width") {
                    overrides.width = Some(width);
                }
                if let Some(height) = resolve_length_key(&style, "height") {
                    overrides.height = Some(height);
                }
                if let Some(v) = resolve_length_key(&style, "minWidth") {
                    overrides.min_width = Some(v);
                }
                if let Some(v) = resolve_length_key(&style, "minHeight") {
                    overrides.min_height = Some(v);
                }
                if let Some(v) = resolve_length_key(&style, "maxWidth") {
                    overrides.max_width = Some(v);
                }
                if let Some(v) = resolve_length_key(&style, "maxHeight") {
                    overrides.max_height = Some(v);
                }
                if let Some(aspect) = style.str("aspectRatio").and_then(parse_aspect_ratio) {
                    overrides.min_aspect_ratio = Some(aspect);
                    overrides.max_aspect_ratio = Some(aspect);
                }
            }
        }

        if let Some(id) = self.scale_box {
            if let Some(fit) = style.str("objectFit") {
                if let Some(WidgetKind::ScaleBox { stretch }) = cx.tree.kind_mut(id) {
                    *stretch = object_fit(fit, &style);
                }
            }
        }
    }

    fn append_child(
        &mut self,
        cx: &mut ConvertCx<'_>,
        child: WidgetId,
        child_type: &str,
        child_props: &Props,
    ) {
        let container_style = cx.resolve(&self.type_name, &self.props);

        if container_style.str("visibility") == Some("clip") {
            if let Some(data) = self.outermost.and_then(|id| cx.tree.get_mut(id)) {
                data.clip_children = true;
            }
        }

        let child_style = cx.resolve(child_type, child_props);

        // The chain exposes exactly one alignable slot, the one inside the
        // last-created wrapper; a child's self-alignment lands there.
        if let Some(slot) = self.external_slot.and_then(|id| cx.tree.slot_mut(id)) {
            let alignment = parse_self_alignment(&child_style);
            slot.horizontal = alignment.horizontal;
            slot.vertical = alignment.vertical;
            slot.padding = alignment.padding;
        }

        let Some(base) = self.base else {
            return;
        };
        cx.tree.attach(base, child);

        let Some(strategy) = &self.strategy else {
            return;
        };
        match strategy {
            LayoutStrategy::Flex(flex) => {
                if let Some(slot) = cx.tree.slot_mut(child) {
                    flex.init_slot(slot, &container_style, &child_style);
                }
            }
            LayoutStrategy::Grid(grid) => {
                if let Some(slot) = cx.tree.slot_mut(child) {
                    grid.init_slot(slot, &container_style, &child_style);
                }
            }
            LayoutStrategy::Canvas(canvas) => {
                if let Some(slot) = cx.tree.slot_mut(child) {
                    canvas.init_slot(slot, &child_style);
                }
            }
            LayoutStrategy::Overlay(overlay) => {
                if let Some(slot) = cx.tree.slot_mut(child) {
                    overlay.init_slot(slot, &child_style);
                }
            }
        }
    }

    fn remove_child(&mut self, cx: &mut ConvertCx<'_>, child: WidgetId) {
        cx.tree.detach(child);
    }

    fn outermost(&self) -> Option<WidgetId> {
        self.outermost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetBroker;
    use crate::element::PropValue;
    use crate::style::cascade::Stylesheet;
    use crate::toolkit::{SizeRule, WidgetTree};
    use pretty_assertions::assert_eq;

    fn props(style: &[(&str, PropValue)]) -> Props {
        let mut props = Props::new();
        let mut map = Props::new();
        for (key, value) in style {
            map.insert((*key).to_string(), value.clone());
        }
        props.insert("style".into(), PropValue::Map(std::rc::Rc::new(map)));
        props
    }

    struct Fixture {
        tree: WidgetTree,
        sheet: Stylesheet,
        assets: AssetBroker,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tree: WidgetTree::new(),
                sheet: Stylesheet::default(),
                assets: AssetBroker::new(),
            }
        }

        fn cx(&mut self) -> ConvertCx<'_> {
            ConvertCx::new(&mut self.tree, &self.sheet, &mut self.assets)
        }
    }

    #[test]
    fn bare_div_is_a_single_horizontal_box() {
        let mut fx = Fixture::new();
        let mut converter = ContainerConverter::new("div", Props::new());
        let outer = converter.create_widget(&mut fx.cx());
        assert_eq!(fx.tree.kind(outer), Some(&WidgetKind::HorizontalBox { rtl: false }));
        assert_eq!(converter.base_widget(), Some(outer));
    }

    #[test]
    fn div_with_display_grid_builds_a_grid_panel() {
        let mut fx = Fixture::new();
        let mut converter =
            ContainerConverter::new("div", props(&[("display", "grid".into())]));
        let outer = converter.create_widget(&mut fx.cx());
        assert!(matches!(fx.tree.kind(outer), Some(WidgetKind::GridPanel { .. })));
    }

    #[test]
    fn full_chain_orders_scale_size_border_wrap_base() {
        let mut fx = Fixture::new();
        let mut converter = ContainerConverter::new(
            "div",
            props(&[
                ("flexWrap", "wrap".into()),
                ("backgroundColor", "#fff".into()),
                ("width", "100px".into()),
                ("objectFit", "contain".into()),
            ]),
        );
        let outer = converter.create_widget(&mut fx.cx());

        assert!(matches!(fx.tree.kind(outer), Some(WidgetKind::ScaleBox { .. })));
        let size = fx.tree.children(outer)[0];
        assert!(matches!(fx.tree.kind(size), Some(WidgetKind::SizeBox { .. })));
        let border = fx.tree.children(size)[0];
        assert!(matches!(fx.tree.kind(border), Some(WidgetKind::Border { .. })));
        let wrap = fx.tree.children(border)[0];
        assert!(matches!(fx.tree.kind(wrap), Some(WidgetKind::WrapBox { .. })));
        let base = fx.tree.children(wrap)[0];
        assert_eq!(converter.base_widget(), Some(base));
    }

    #[test]
    fn justify_items_first_recognized_keyword_wins() {
        let mut fx = Fixture::new();
        let mut converter = ContainerConverter::new(
            "div",
            props(&[
                ("flexWrap", "wrap".into()),
                ("justifyItems", "safe center end".into()),
            ]),
        );
        let outer = converter.create_widget(&mut fx.cx());
        let Some(WidgetKind::WrapBox { alignment, .. }) = fx.tree.kind(outer) else {
            panic!("expected a wrap box");
        };
        assert_eq!(*alignment, WrapAlignment::Center);
    }

    #[test]
    fn partial_chain_preserves_relative_order() {
        let mut fx = Fixture::new();
        let mut converter = ContainerConverter::new(
            "div",
            props(&[("backgroundColor", "#fff".into()), ("objectFit", "cover".into())]),
        );
        let outer = converter.create_widget(&mut fx.cx());
        assert!(matches!(fx.tree.kind(outer), Some(WidgetKind::ScaleBox { .. })));
        let border = fx.tree.children(outer)[0];
        assert!(matches!(fx.tree.kind(border), Some(WidgetKind::Border { .. })));
        assert_eq!(fx.tree.children(border)[0], converter.base_widget().unwrap());
    }

    #[test]
    fn background_position_alone_adds_no_border() {
        let mut fx = Fixture::new();
        let mut converter =
            ContainerConverter::new("div", props(&[("backgroundPosition", "center".into())]));
        let outer = converter.create_widget(&mut fx.cx());
        assert_eq!(converter.base_widget(), Some(outer));
    }

    #[test]
    fn children_land_in_the_base_widget() {
        let mut fx = Fixture::new();
        let mut converter =
            ContainerConverter::new("div", props(&[("width", "64px".into())]));
        converter.create_widget(&mut fx.cx());

        let child = fx.tree.insert(WidgetKind::Button);
        converter.append_child(&mut fx.cx(), child, "button", &Props::new());
        let base = converter.base_widget().unwrap();
        assert_eq!(fx.tree.children(base), &[child]);
    }

    #[test]
    fn child_self_alignment_reaches_the_external_slot() {
        let mut fx = Fixture::new();
        let mut converter =
            ContainerConverter::new("div", props(&[("width", "64px".into())]));
        converter.create_widget(&mut fx.cx());
        let inner = converter.external_slot.unwrap();

        let child = fx.tree.insert(WidgetKind::Button);
        converter.append_child(
            &mut fx.cx(),
            child,
            "button",
            &props(&[("justifySelf", "right".into())]),
        );
        assert_eq!(fx.tree.slot(inner).unwrap().horizontal, HAlign::Right);
    }

    #[test]
    fn clip_visibility_marks_the_outermost_widget() {
        let mut fx = Fixture::new();
        let mut converter = ContainerConverter::new(
            "div",
            props(&[("visibility", "clip".into()), ("objectFit", "fill".into())]),
        );
        let outer = converter.create_widget(&mut fx.cx());
        let child = fx.tree.insert(WidgetKind::Button);
        converter.append_child(&mut fx.cx(), child, "button", &Props::new());
        assert!(fx.tree.get(outer).unwrap().clip_children);
    }

    #[test]
    fn flex_space_between_reaches_child_slots() {
        let mut fx = Fixture::new();
        let mut converter = ContainerConverter::new(
            "div",
            props(&[("justifyContent", "space-between".into())]),
        );
        converter.create_widget(&mut fx.cx());
        let child = fx.tree.insert(WidgetKind::Button);
        converter.append_child(&mut fx.cx(), child, "button", &Props::new());
        assert_eq!(fx.tree.slot(child).unwrap().size_rule, SizeRule::Fill(1.0));
    }

    #[test]
    fn update_mutates_existing_wrappers_without_growing_the_chain() {
        let mut fx = Fixture::new();
        let mut converter =
            ContainerConverter::new("div", props(&[("width", "100px".into())]));
        let outer = converter.create_widget(&mut fx.cx());
        let before = fx.tree.len();

        converter.update_widget(&mut fx.cx(), &props(&[("width", "200px".into())]));
        assert_eq!(fx.tree.len(), before);
        let size_box = converter.size_box.unwrap();
        let Some(WidgetKind::SizeBox { overrides }) = fx.tree.kind(size_box) else {
            panic!("size box disappeared");
        };
        assert_eq!(overrides.width, Some(200.0));
        assert_eq!(size_box, outer);
    }

    #[test]
    fn update_with_identical_props_does_not_synchronize() {
        let mut fx = Fixture::new();
        let p = props(&[("width", "100px".into())]);
        let mut converter = ContainerConverter::new("div", p.clone());
        converter.create_widget(&mut fx.cx());
        let syncs = fx.tree.total_sync_count();

        converter.update_widget(&mut fx.cx(), &p);
        assert_eq!(fx.tree.total_sync_count(), syncs);
    }
}
