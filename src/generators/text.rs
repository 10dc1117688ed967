//! Text leaves.
//!
//! Typography values that vary across the characters of a node come back from the
//! host as a "mixed" marker; those are re-read from the style of the first character.

use super::{with_appearance, Context, ParsedCode};
use crate::markup::escape_text;
use crate::naming::unique_class_name;
use crate::scene::{LetterSpacing, LineHeight, Mixed, TextNode};
use crate::style::{js_number, CssRule};

const DEFAULT_FONT_WEIGHT: f64 = 400.0;

/// Unitless line height; `normal` for auto or unresolvable values.
pub fn line_height(value: Option<LineHeight>, font_size: f64) -> String {
    match value {
        Some(LineHeight::Percent { value }) => js_number(value / 100.0),
        Some(LineHeight::Pixels { value }) if font_size > 0.0 => js_number(value / font_size),
        _ => "normal".to_string(),
    }
}

/// Letter spacing relative to the font size, in `em`.
pub fn letter_spacing(value: Option<LetterSpacing>, font_size: f64) -> String {
    let ratio = match value {
        Some(LetterSpacing::Percent { value }) => value / 100.0,
        Some(LetterSpacing::Pixels { value }) if font_size > 0.0 => value / font_size,
        _ => 0.0,
    };
    if ratio == 0.0 {
        "0".to_string()
    } else {
        format!("{}em", js_number(ratio))
    }
}

pub fn generate(ctx: &Context<'_>, node: &TextNode) -> ParsedCode {
    let base = &node.base;
    let class = unique_class_name(&base.name, &base.id);
    let first = node.first_char();

    let font_size = node
        .font_size
        .or_first_char(|| first.and_then(|s| s.font_size))
        .unwrap_or(ctx.options.base_font_size);
    let font_weight = node
        .font_weight
        .or_first_char(|| first.and_then(|s| s.font_weight))
        .unwrap_or(DEFAULT_FONT_WEIGHT);
    let line = node
        .line_height
        .or_first_char(|| first.and_then(|s| s.line_height));
    let spacing = node
        .letter_spacing
        .or_first_char(|| first.and_then(|s| s.letter_spacing));
    if first.is_none() && matches!(node.font_size, Mixed::Mixed) {
        tracing::debug!(id = %base.id, "mixed font size without first-character style");
    }

    let (left, top) = (ctx.rem(base.x), ctx.rem(base.y));
    let rule = CssRule::class(&class)
        .decl("font-size", ctx.rem(font_size))
        .decl("font-weight", js_number(font_weight))
        .decl("text-align", node.text_align_horizontal.as_css())
        .decl("line-height", line_height(line, font_size))
        .decl("letter-spacing", letter_spacing(spacing, font_size))
        .decl("color", ctx.colors().resolve(&base.fills))
        .decl("left", left.clone())
        .decl("top", top.clone());

    let style = format!(
        "{}{}",
        with_appearance(rule, base),
        ctx.group_override(&class, &left, &top)
    );
    let markup = format!(
        r#"<p class="{}">{}</p>"#,
        class,
        escape_text(&node.characters)
    );
    ParsedCode::new("", markup, style)
}
