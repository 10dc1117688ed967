//! Autolayout containers, rendered as flexboxes.
//!
//! A container whose children are all `Radio` instances becomes the widget
//! library's `RadioGroup` instead of a plain `div`.

use super::{with_appearance, Context, ParsedCode, Properties};
use crate::markup::escape_attribute;
use crate::naming::{create_slug, state_identifier, unique_class_name};
use crate::scene::{
    AxisAlign, AxisSizingMode, FrameNode, FrameProps, InstanceNode, LayoutMode, LayoutSizing,
    LayoutWrap, NodeBase, SceneNode,
};
use crate::style::{border_radius, border_width, CssRule, FRAME_NODE_CLASS};

const RADIO_COMPONENT: &str = "Radio";

/// Frame-like node with autolayout: a frame, component or (non-widget) instance.
#[derive(Debug, Clone, Copy)]
pub struct Container<'n> {
    pub base: &'n NodeBase,
    pub props: &'n FrameProps,
    pub children: &'n [SceneNode],
}

impl<'n> Container<'n> {
    pub fn from_frame(node: &'n FrameNode) -> Self {
        Self {
            base: &node.base,
            props: &node.props,
            children: &node.children,
        }
    }

    pub fn from_instance(node: &'n InstanceNode) -> Self {
        Self {
            base: &node.base,
            props: &node.props,
            children: &node.children,
        }
    }

    pub fn class(&self) -> String {
        unique_class_name(&self.base.name, &self.base.id)
    }

    /// Every child is a `Radio` widget instance.
    pub fn is_radio_group(&self) -> bool {
        !self.children.is_empty()
            && self
                .children
                .iter()
                .all(|child| child.is_instance_named(RADIO_COMPONENT))
    }

    /// Selector of the container's own rule. Radio groups are matched globally
    /// since the class lands inside the library component's DOM.
    pub fn selector(&self) -> String {
        if self.is_radio_group() {
            format!(":global(.{})", self.class())
        } else {
            format!(".{}", self.class())
        }
    }
}

fn axis_size(ctx: &Context<'_>, sizing: LayoutSizing, size: f64) -> String {
    match sizing {
        LayoutSizing::Fixed => ctx.rem(size),
        LayoutSizing::Fill => "100%".to_string(),
        LayoutSizing::Hug => "auto".to_string(),
    }
}

fn flex_alignment(align: AxisAlign) -> &'static str {
    match align {
        AxisAlign::Min => "flex-start",
        AxisAlign::Max => "flex-end",
        _ => "center",
    }
}

/// Label slug of the checked radio, the initial value of the group's state.
fn checked_radio_value(children: &[SceneNode]) -> Option<String> {
    children
        .iter()
        .filter_map(SceneNode::as_instance)
        .map(|radio| Properties::new(&radio.component_properties))
        .find(|props| props.flag("checked"))
        .map(|props| create_slug(&props.text("label")))
}

pub fn open(ctx: &Context<'_>, node: &Container<'_>) -> ParsedCode {
    let base = node.base;
    let layout = &node.props.layout;
    let class = node.class();
    let colors = ctx.colors();
    let horizontal = layout.layout_mode == LayoutMode::Horizontal;
    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));

    let counter_spacing = ctx.rem(layout.counter_axis_spacing.unwrap_or(0.0));
    let item_spacing = ctx.rem(layout.item_spacing);
    let gap = if horizontal {
        format!("{} {}", counter_spacing, item_spacing)
    } else {
        format!("{} {}", item_spacing, counter_spacing)
    };
    let self_alignment = match layout.counter_axis_sizing_mode {
        AxisSizingMode::Fixed => "flex-start",
        AxisSizingMode::Auto => "stretch",
    };

    let rule = CssRule::new(node.selector())
        .decl(
            "width",
            axis_size(ctx, layout.layout_sizing_horizontal, base.width),
        )
        .decl(
            "height",
            axis_size(ctx, layout.layout_sizing_vertical, base.height),
        )
        .decl_opt("min-width", layout.min_width.map(|v| ctx.rem(v)))
        .decl_opt("max-width", layout.max_width.map(|v| ctx.rem(v)))
        .decl_opt("min-height", layout.min_height.map(|v| ctx.rem(v)))
        .decl_opt("max-height", layout.max_height.map(|v| ctx.rem(v)))
        .decl(
            "border-radius",
            border_radius(&node.props.corners, ctx.options.base_font_size),
        )
        .decl("background-color", colors.resolve(&base.fills))
        .decl(
            "border-width",
            border_width(!base.strokes.is_empty(), &node.props.stroke),
        )
        .decl("border-style", "solid")
        .decl("border-color", colors.resolve(&base.strokes))
        .decl(
            "padding",
            format!(
                "{} {} {} {}",
                ctx.rem(layout.padding_top),
                ctx.rem(layout.padding_right),
                ctx.rem(layout.padding_bottom),
                ctx.rem(layout.padding_left)
            ),
        )
        .decl("display", "flex")
        .decl("flex-direction", if horizontal { "row" } else { "column" })
        .decl(
            "flex-wrap",
            match layout.layout_wrap {
                LayoutWrap::Wrap => "wrap",
                LayoutWrap::NoWrap => "nowrap",
            },
        )
        .decl("align-items", flex_alignment(layout.counter_axis_align_items))
        .decl(
            "justify-content",
            flex_alignment(layout.primary_axis_align_items),
        )
        .decl("gap", gap)
        .decl(
            if horizontal { "align-self" } else { "justify-self" },
            self_alignment,
        );
    let rule = with_appearance(rule, base).decl(
        "overflow",
        if node.props.clips_content {
            "hidden"
        } else {
            "visible"
        },
    );

    let in_frame = CssRule::new(format!(":global(.{} > .{})", FRAME_NODE_CLASS, class))
        .decl("left", left.clone())
        .decl("top", top.clone());
    let style = format!(
        "{}{}{}",
        rule,
        in_frame,
        ctx.group_override(&class, &left, &top)
    );

    if !node.is_radio_group() {
        return ParsedCode::new("", format!(r#"<div class="{}">"#, class), style);
    }

    let state = state_identifier("radio", &base.id);
    let initial = checked_radio_value(node.children).unwrap_or_default();
    let script = format!(
        "{}let {}Value = '{}';\n",
        ctx.library_import(&["RadioGroup"]),
        state,
        initial.replace('\\', "\\\\").replace('\'', "\\'")
    );
    let markup = format!(
        r#"<RadioGroup class="{cls}"{inline} bind:group={{{state}Value}} name="{name}">"#,
        cls = class,
        inline = if horizontal { " inline" } else { "" },
        state = state,
        name = escape_attribute(&class),
    );
    ParsedCode::new(script, markup, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;
    use crate::options::GenerateOptions;
    use serde_json::json;

    fn frame(value: serde_json::Value) -> FrameNode {
        match SceneNode::from_value(value).unwrap() {
            SceneNode::Frame(f) | SceneNode::Component(f) => f,
            other => panic!("unexpected {}", other.kind()),
        }
    }

    fn radio(id: &str, label: &str, checked: bool) -> serde_json::Value {
        json!({
            "type": "INSTANCE", "id": id, "name": "Radio",
            "x": 0, "y": 0, "width": 80, "height": 20,
            "componentProperties": {
                "label#1:0": { "type": "TEXT", "value": label },
                "checked": { "type": "VARIANT", "value": if checked { "true" } else { "false" } }
            }
        })
    }

    fn render(node: &FrameNode) -> ParsedCode {
        let options = GenerateOptions::default();
        open(
            &Context::new(Catalogs::builtin(), &options),
            &Container::from_frame(node),
        )
    }

    #[test]
    fn test_row_layout() {
        let node = frame(json!({
            "type": "FRAME", "id": "30:1", "name": "Toolbar",
            "x": 0, "y": 0, "width": 320, "height": 48,
            "layoutMode": "HORIZONTAL", "layoutWrap": "WRAP",
            "primaryAxisAlignItems": "SPACE_BETWEEN", "counterAxisAlignItems": "MIN",
            "counterAxisSizingMode": "FIXED",
            "layoutSizingHorizontal": "FIXED", "layoutSizingVertical": "HUG",
            "paddingTop": 8, "paddingRight": 16, "paddingBottom": 8, "paddingLeft": 16,
            "itemSpacing": 12, "counterAxisSpacing": 4, "minWidth": 160
        }));
        let code = render(&node);
        assert_eq!(code.markup, r#"<div class="Toolbar-30-1">"#);
        assert_eq!(code.script, "");
        for expected in [
            "width: 20rem;",
            "height: auto;",
            "min-width: 10rem;",
            "padding: 0.5rem 1rem 0.5rem 1rem;",
            "display: flex;",
            "flex-direction: row;",
            "flex-wrap: wrap;",
            "align-items: flex-start;",
            "justify-content: center;",
            "gap: 0.25rem 0.75rem;",
            "align-self: flex-start;",
        ] {
            assert!(code.style.contains(expected), "{} in {}", expected, code.style);
        }
        assert!(code.style.starts_with(".Toolbar-30-1 {"));
        assert!(!code.style.contains("max-width"));
    }

    #[test]
    fn test_column_layout() {
        let node = frame(json!({
            "type": "FRAME", "id": "30:2", "name": "Stack",
            "x": 0, "y": 0, "width": 100, "height": 100,
            "layoutMode": "VERTICAL", "primaryAxisAlignItems": "MAX",
            "layoutSizingHorizontal": "FILL", "itemSpacing": 8
        }));
        let code = render(&node);
        assert!(code.style.contains("width: 100%;"));
        assert!(code.style.contains("flex-direction: column;"));
        assert!(code.style.contains("justify-content: flex-end;"));
        assert!(code.style.contains("gap: 0.5rem 0rem;"));
        assert!(code.style.contains("justify-self: stretch;"));
    }

    #[test]
    fn test_radio_group() {
        let node = frame(json!({
            "type": "FRAME", "id": "40:1", "name": "Choices",
            "x": 0, "y": 0, "width": 200, "height": 20,
            "layoutMode": "HORIZONTAL",
            "children": [radio("40:2", "First One", false), radio("40:3", "Second One", true)]
        }));
        let code = render(&node);
        let state = state_identifier("radio", "40:1");

        assert!(code.style.starts_with(":global(.Choices-40-1) {"));
        assert_eq!(
            code.script,
            format!(
                "import {{ RadioGroup }} from \"deskblocks\";\nlet {}Value = 'secondOne';\n",
                state
            )
        );
        assert_eq!(
            code.markup,
            format!(
                r#"<RadioGroup class="Choices-40-1" inline bind:group={{{}Value}} name="Choices-40-1">"#,
                state
            )
        );
    }

    #[test]
    fn test_mixed_children_are_not_a_radio_group() {
        let node = frame(json!({
            "type": "FRAME", "id": "40:4", "name": "Mixed",
            "x": 0, "y": 0, "width": 200, "height": 20,
            "layoutMode": "VERTICAL",
            "children": [
                radio("40:5", "Only", true),
                { "type": "TEXT", "id": "40:6", "name": "Note", "x": 0, "y": 0,
                  "width": 1, "height": 1, "characters": "n" }
            ]
        }));
        assert!(!Container::from_frame(&node).is_radio_group());
        assert_eq!(render(&node).markup, r#"<div class="Mixed-40-4">"#);

        let empty = frame(json!({
            "type": "FRAME", "id": "40:7", "name": "Empty",
            "x": 0, "y": 0, "width": 1, "height": 1, "layoutMode": "VERTICAL"
        }));
        assert!(!Container::from_frame(&empty).is_radio_group());
    }

    #[test]
    fn test_radio_group_without_checked_item() {
        let node = frame(json!({
            "type": "FRAME", "id": "40:8", "name": "Opts",
            "x": 0, "y": 0, "width": 200, "height": 20,
            "layoutMode": "VERTICAL",
            "children": [radio("40:9", "A", false)]
        }));
        let code = render(&node);
        assert!(code.script.ends_with("Value = '';\n"));
        assert!(!code.markup.contains(" inline"));
    }
}
