//! Plain (non-autolayout) frames.

use super::{with_appearance, Context, ParsedCode};
use crate::naming::unique_class_name;
use crate::scene::FrameNode;
use crate::style::{border_radius, border_width, CssRule, FRAME_NODE_CLASS};

/// Opening fragment of a frame. Children are positioned absolutely inside it.
pub fn open(ctx: &Context<'_>, node: &FrameNode) -> ParsedCode {
    let base = &node.base;
    let props = &node.props;
    let class = unique_class_name(&base.name, &base.id);
    let colors = ctx.colors();
    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));

    let own = CssRule::class(&class)
        .decl("background-color", colors.resolve(&base.fills))
        .decl("border-width", border_width(!base.strokes.is_empty(), &props.stroke))
        .decl("border-style", "solid")
        .decl("border-color", colors.resolve(&base.strokes))
        .decl("width", ctx.rem(base.width))
        .decl("height", ctx.rem(base.height))
        .decl(
            "border-radius",
            border_radius(&props.corners, ctx.options.base_font_size),
        );
    let own = with_appearance(own, base)
        .decl(
            "overflow",
            if props.clips_content { "hidden" } else { "visible" },
        )
        .decl("position", "relative");

    let children = CssRule::new(format!(".{} > *", class)).decl("position", "absolute");
    let in_frame = CssRule::new(format!(":global(.{} > .{})", FRAME_NODE_CLASS, class))
        .decl("left", left.clone())
        .decl("top", top.clone())
        .decl("position", "absolute !important");

    let style = format!(
        "{}{}{}{}",
        own,
        children,
        in_frame,
        ctx.group_override(&class, &left, &top)
    );
    let markup = format!(r#"<div class="{} {}">"#, FRAME_NODE_CLASS, class);
    ParsedCode::new("", markup, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;
    use crate::options::GenerateOptions;
    use crate::scene::SceneNode;
    use serde_json::json;

    #[test]
    fn test_open_fragment() {
        let node = match SceneNode::from_value(json!({
            "type": "FRAME", "id": "10:1", "name": "Card",
            "x": 32, "y": 48, "width": 320, "height": 200,
            "cornerRadius": 8, "clipsContent": true,
            "children": [{ "type": "RECTANGLE", "id": "10:2", "name": "Bg",
                           "x": 0, "y": 0, "width": 1, "height": 1 }]
        }))
        .unwrap()
        {
            SceneNode::Frame(f) => f,
            other => panic!("unexpected {}", other.kind()),
        };
        let options = GenerateOptions::default();
        let code = open(&Context::new(Catalogs::builtin(), &options), &node);

        assert_eq!(code.markup, r#"<div class="frame-node Card-10-1">"#);
        assert!(code.style.contains("width: 20rem; height: 12.5rem;"));
        assert!(code.style.contains("overflow: hidden; position: relative;"));
        assert!(code.style.contains(".Card-10-1 > * { position: absolute; }"));
        assert!(code.style.contains(
            ":global(.frame-node > .Card-10-1) { left: 2rem; top: 3rem; position: absolute !important; }"
        ));
        assert!(!code.style.contains("group-node"));
    }
}
