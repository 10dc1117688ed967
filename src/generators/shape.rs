//! Rectangle, ellipse and line leaves.

use super::{with_appearance, Context, ParsedCode};
use crate::naming::unique_class_name;
use crate::scene::ShapeNode;
use crate::style::{border_radius, border_width, CssRule};

fn leaf(ctx: &Context<'_>, class: &str, rule: CssRule, left: &str, top: &str) -> ParsedCode {
    let style = format!("{}{}", rule, ctx.group_override(class, left, top));
    ParsedCode::new("", format!(r#"<div class="{}"></div>"#, class), style)
}

pub fn rectangle(ctx: &Context<'_>, node: &ShapeNode) -> ParsedCode {
    let base = &node.base;
    let class = unique_class_name(&base.name, &base.id);
    let colors = ctx.colors();
    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));

    let rule = CssRule::class(&class)
        .decl("background-color", colors.resolve(&base.fills))
        .decl("border-width", border_width(!base.strokes.is_empty(), &node.stroke))
        .decl("border-style", "solid")
        .decl("border-color", colors.resolve(&base.strokes))
        .decl("width", ctx.rem(base.width))
        .decl("height", ctx.rem(base.height))
        .decl("left", left.clone())
        .decl("top", top.clone())
        .decl(
            "border-radius",
            border_radius(&node.corners, ctx.options.base_font_size),
        );

    leaf(ctx, &class, with_appearance(rule, base), &left, &top)
}

pub fn ellipse(ctx: &Context<'_>, node: &ShapeNode) -> ParsedCode {
    let base = &node.base;
    let class = unique_class_name(&base.name, &base.id);
    let colors = ctx.colors();
    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));

    let rule = CssRule::class(&class)
        .decl("background-color", colors.resolve(&base.fills))
        .decl("border-width", ctx.rem(node.stroke.uniform()))
        .decl("border-style", "solid")
        .decl("border-color", colors.resolve(&base.strokes))
        .decl("width", ctx.rem(base.width))
        .decl("height", ctx.rem(base.height))
        .decl("left", left.clone())
        .decl("top", top.clone())
        .decl("border-radius", "50%");

    leaf(ctx, &class, with_appearance(rule, base), &left, &top)
}

/// A line is drawn as a bar as thick as its stroke.
pub fn line(ctx: &Context<'_>, node: &ShapeNode) -> ParsedCode {
    let base = &node.base;
    let class = unique_class_name(&base.name, &base.id);
    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));

    let rule = CssRule::class(&class)
        .decl("background-color", ctx.colors().resolve(&base.strokes))
        .decl("width", ctx.rem(base.width))
        .decl("height", ctx.rem(node.stroke.uniform()))
        .decl("left", left.clone())
        .decl("top", top.clone());

    leaf(ctx, &class, with_appearance(rule, base), &left, &top)
}
