//! Groups.
//!
//! The host reports a group's children in the coordinate space of the enclosing
//! frame, not the group. The group element is itself positioned, so each child
//! subtracts the group's origin again. The origin reaches the child through
//! `--parentXpos` / `--parentYpos`, bound on the child by the tree assembler.

use super::{Context, ParsedCode};
use crate::naming::unique_class_name;
use crate::scene::GroupNode;
use crate::style::{box_shadow_value, drop_shadows, js_number, rotation, CssRule};
use crate::style::{FRAME_NODE_CLASS, GROUP_NODE_CLASS};

pub fn open(ctx: &Context<'_>, node: &GroupNode) -> ParsedCode {
    let base = &node.base;
    let class = unique_class_name(&base.name, &base.id);
    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));

    let own = CssRule::class(&class)
        .decl("width", ctx.rem(base.width))
        .decl("height", ctx.rem(base.height))
        .decl("opacity", js_number(base.opacity))
        .decl_opt("transform", rotation(base.rotation))
        .decl("position", "relative")
        .decl("--xpos", left.clone())
        .decl("--ypos", top.clone());

    // A group has no box of its own to cast a shadow from.
    let children = CssRule::new(format!(".{} > *", class))
        .decl("position", "absolute !important")
        .decl_opt("box-shadow", box_shadow_value(&drop_shadows(&base.effects)));

    let in_frame = CssRule::new(format!(":global(.{} > .{})", FRAME_NODE_CLASS, class))
        .decl("left", left.clone())
        .decl("top", top.clone());

    let style = format!(
        "{}{}{}{}",
        own,
        children,
        in_frame,
        ctx.group_override(&class, &left, &top)
    );
    let markup = format!(r#"<div class="{} {}">"#, GROUP_NODE_CLASS, class);
    ParsedCode::new("", markup, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;
    use crate::generators::Origin;
    use crate::options::GenerateOptions;
    use crate::scene::SceneNode;
    use serde_json::json;

    fn group() -> GroupNode {
        match SceneNode::from_value(json!({
            "type": "GROUP", "id": "20:1", "name": "Header",
            "x": 16, "y": 32, "width": 64, "height": 16,
            "effects": [{ "type": "DROP_SHADOW", "color": { "r": 0, "g": 0, "b": 0, "a": 1 },
                          "offset": { "x": 1, "y": 1 }, "radius": 2, "spread": 0 }]
        }))
        .unwrap()
        {
            SceneNode::Group(g) => g,
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_open_fragment() {
        let options = GenerateOptions::default();
        let code = open(&Context::new(Catalogs::builtin(), &options), &group());
        assert_eq!(code.markup, r#"<div class="group-node Header-20-1">"#);
        assert!(code.style.contains("--xpos: 1rem; --ypos: 2rem;"));
        assert!(code.style.contains(
            ".Header-20-1 > * { position: absolute !important; box-shadow: 1px 1px 2px 0px #000000ff; }"
        ));
        assert!(code.style.contains(":global(.frame-node > .Header-20-1) { left: 1rem; top: 2rem; }"));
        assert!(!code.style.contains(":global(.group-node"));
    }

    #[test]
    fn test_nested_group_gets_override() {
        let options = GenerateOptions::default();
        let ctx = Context::new(Catalogs::builtin(), &options)
            .with_group_origin(Some(Origin { x: 0.0, y: 0.0 }));
        let code = open(&ctx, &group());
        assert!(code.style.contains(":global(.group-node > .Header-20-1)"));
    }
}
