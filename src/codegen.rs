//! Code Generation
//!
//! Walks the scene tree depth-first and turns it into one script/markup/style
//! triple.
//!
//! ## Pipeline
//!
//! 1. **Classify** each node into a [`Route`] (pure, first match wins)
//! 2. **Generate** the node's own fragment with the matching generator
//! 3. **Assemble** containers: append every child's fragment, then infer the
//!    container's closing tag from the accumulated markup
//!
//! Groups thread their origin down to their direct children: the child's rule gets
//! the origin bound as custom properties, and the child's own override rule
//! subtracts it.

use crate::catalog::{Catalogs, ComponentCatalog};
use crate::error::Result;
use crate::generators::autolayout::{self, Container};
use crate::generators::{frame, group, icon, instance, shape, text};
use crate::generators::{Context, Origin, ParsedCode};
use crate::markup::closing_tag;
use crate::naming::unique_class_name;
use crate::options::GenerateOptions;
use crate::scene::{FrameNode, GroupNode, InstanceNode, SceneNode, ShapeNode, TextNode};
use crate::style::group_origin_binding;

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Which generator handles a node.
#[derive(Debug, Clone, Copy)]
pub enum Route<'n> {
    Icon(&'n InstanceNode),
    Widget(&'n InstanceNode),
    Autolayout(Container<'n>),
    Frame(&'n FrameNode),
    Group(&'n GroupNode),
    Text(&'n TextNode),
    Rectangle(&'n ShapeNode),
    Ellipse(&'n ShapeNode),
    Line(&'n ShapeNode),
    Skip,
}

impl Route<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Icon(_) => "icon",
            Route::Widget(_) => "widget",
            Route::Autolayout(_) => "autolayout",
            Route::Frame(_) => "frame",
            Route::Group(_) => "group",
            Route::Text(_) => "text",
            Route::Rectangle(_) => "rectangle",
            Route::Ellipse(_) => "ellipse",
            Route::Line(_) => "line",
            Route::Skip => "skip",
        }
    }

    /// Selector of the node's own style rule, for nodes that have one.
    pub fn own_selector(&self) -> Option<String> {
        let base = match self {
            Route::Autolayout(container) => return Some(container.selector()),
            Route::Frame(n) => &n.base,
            Route::Group(n) => &n.base,
            Route::Text(n) => &n.base,
            Route::Rectangle(n) | Route::Ellipse(n) | Route::Line(n) => &n.base,
            Route::Icon(_) | Route::Widget(_) | Route::Skip => return None,
        };
        Some(format!(".{}", unique_class_name(&base.name, &base.id)))
    }
}

/// Route for `node`. Catalog matches on instances take priority over the node's
/// own layout.
pub fn classify<'n>(node: &'n SceneNode, components: &ComponentCatalog) -> Route<'n> {
    if let SceneNode::Instance(instance) = node {
        if components.is_icon(&instance.base.name) {
            return Route::Icon(instance);
        }
        if components.is_component(&instance.base.name) {
            return Route::Widget(instance);
        }
    }

    match node {
        SceneNode::Frame(n) | SceneNode::Component(n) if n.props.layout.is_enabled() => {
            Route::Autolayout(Container::from_frame(n))
        }
        SceneNode::Instance(n) if n.props.layout.is_enabled() => {
            Route::Autolayout(Container::from_instance(n))
        }
        SceneNode::Frame(n) => Route::Frame(n),
        SceneNode::Group(n) => Route::Group(n),
        SceneNode::Text(n) => Route::Text(n),
        SceneNode::Rectangle(n) => Route::Rectangle(n),
        SceneNode::Ellipse(n) => Route::Ellipse(n),
        SceneNode::Line(n) => Route::Line(n),
        SceneNode::Component(_)
        | SceneNode::ComponentSet(_)
        | SceneNode::Instance(_)
        | SceneNode::Unsupported => Route::Skip,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSPILER
// ═══════════════════════════════════════════════════════════════════════════════

pub struct Transpiler<'a> {
    catalogs: &'a Catalogs,
    options: &'a GenerateOptions,
}

impl<'a> Transpiler<'a> {
    pub fn new(catalogs: &'a Catalogs, options: &'a GenerateOptions) -> Self {
        Self { catalogs, options }
    }

    /// Generate the raw (unformatted) triple for the tree rooted at `root`.
    pub fn transpile(&self, root: &SceneNode) -> Result<ParsedCode> {
        self.options.validate()?;
        self.generate(root, None)
    }

    fn generate(&self, node: &SceneNode, group_origin: Option<Origin>) -> Result<ParsedCode> {
        if let Some(base) = node.base() {
            base.check_geometry()?;
            if !base.visible {
                tracing::trace!(id = %base.id, "skipping hidden node");
                return Ok(ParsedCode::default());
            }
        }

        let ctx = Context::new(self.catalogs, self.options).with_group_origin(group_origin);
        let route = classify(node, &self.catalogs.components);
        tracing::trace!(kind = node.kind(), route = route.label(), "generate");

        let code = match route {
            Route::Icon(n) => icon::generate(&ctx, n),
            Route::Widget(n) => instance::generate(&ctx, n),
            Route::Autolayout(container) => {
                self.assemble(&ctx, autolayout::open(&ctx, &container), container.children, None)?
            }
            Route::Frame(n) => self.assemble(&ctx, frame::open(&ctx, n), node.children(), None)?,
            Route::Group(n) => self.assemble(
                &ctx,
                group::open(&ctx, n),
                node.children(),
                Some(Origin::of(&n.base)),
            )?,
            Route::Text(n) => text::generate(&ctx, n),
            Route::Rectangle(n) => shape::rectangle(&ctx, n),
            Route::Ellipse(n) => shape::ellipse(&ctx, n),
            Route::Line(n) => shape::line(&ctx, n),
            Route::Skip => {
                tracing::debug!(kind = node.kind(), "no generator for node, skipped");
                ParsedCode::default()
            }
        };
        Ok(code)
    }

    /// Children after the container's opening fragment, then its closing tag.
    /// `group` is set when the container is a group whose origin the children see.
    fn assemble(
        &self,
        ctx: &Context<'_>,
        mut code: ParsedCode,
        children: &[SceneNode],
        group: Option<Origin>,
    ) -> Result<ParsedCode> {
        for child in children {
            let mut fragment = self.generate(child, group)?;
            if let (Some(origin), false) = (group, fragment.is_empty()) {
                let selector = classify(child, &self.catalogs.components).own_selector();
                if let Some(selector) = selector {
                    let binding =
                        group_origin_binding(&selector, &ctx.rem(origin.x), &ctx.rem(origin.y));
                    fragment.style.insert_str(0, &binding.to_string());
                }
            }
            code.append(fragment);
        }

        let closer = closing_tag(&code.markup);
        code.markup.push_str(&closer);
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> SceneNode {
        SceneNode::from_value(value).unwrap()
    }

    fn route_of(value: serde_json::Value) -> &'static str {
        let node = node(value);
        classify(&node, &Catalogs::builtin().components).label()
    }

    #[test]
    fn test_classification_priority() {
        let base = |kind: &str, name: &str| {
            json!({ "type": kind, "id": "1:1", "name": name,
                    "x": 0, "y": 0, "width": 10, "height": 10 })
        };
        assert_eq!(route_of(base("INSTANCE", "Plus")), "icon");
        assert_eq!(route_of(base("INSTANCE", "Button")), "widget");
        assert_eq!(route_of(base("INSTANCE", "Card")), "skip");
        assert_eq!(route_of(base("FRAME", "Card")), "frame");
        assert_eq!(route_of(base("GROUP", "G")), "group");
        assert_eq!(route_of(base("LINE", "L")), "line");
        assert_eq!(route_of(base("COMPONENT", "C")), "skip");
        assert_eq!(route_of(json!({ "type": "VECTOR", "id": "1:1" })), "skip");

        let mut layout = base("INSTANCE", "Button");
        layout["layoutMode"] = json!("HORIZONTAL");
        assert_eq!(route_of(layout), "widget");

        let mut layout = base("INSTANCE", "Card");
        layout["layoutMode"] = json!("VERTICAL");
        assert_eq!(route_of(layout), "autolayout");

        let mut layout = base("COMPONENT_SET", "Set");
        layout["layoutMode"] = json!("VERTICAL");
        assert_eq!(route_of(layout), "skip");
    }

    #[test]
    fn test_hidden_root_is_empty() {
        let root = node(json!({
            "type": "FRAME", "id": "1:1", "name": "F", "visible": false,
            "x": 0, "y": 0, "width": 10, "height": 10
        }));
        let options = GenerateOptions::default();
        let code = Transpiler::new(Catalogs::builtin(), &options)
            .transpile(&root)
            .unwrap();
        assert!(code.is_empty());
    }

    #[test]
    fn test_invalid_geometry_is_an_error() {
        let root = node(json!({
            "type": "FRAME", "id": "1:1", "name": "F",
            "x": 0, "y": 0, "width": 10, "height": 10,
            "children": [{ "type": "RECTANGLE", "id": "1:2", "name": "R",
                           "x": 0, "y": 0, "width": -1, "height": 10 }]
        }));
        let options = GenerateOptions::default();
        let err = Transpiler::new(Catalogs::builtin(), &options)
            .transpile(&root)
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidGeometry { ref id, .. } if id == "1:2"));
    }
}
