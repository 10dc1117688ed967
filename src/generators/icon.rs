//! Icon instances: the library's `Icon` wrapper around the named glyph component.

use super::{Context, ParsedCode};
use crate::color::INITIAL;
use crate::scene::InstanceNode;
use crate::style::js_number;

/// Extra size the wrapper adds around the glyph's own box.
const ICON_SIZE_PADDING: f64 = 8.0;

/// Token name of the glyph color: first child's stroke, then its fill, then the
/// configured default.
fn icon_color(ctx: &Context<'_>, node: &InstanceNode) -> String {
    let colors = ctx.colors();
    node.children
        .first()
        .and_then(|child| child.base())
        .and_then(|glyph| {
            [&glyph.strokes, &glyph.fills]
                .into_iter()
                .map(|paints| colors.token(paints, false))
                .find(|token| token != INITIAL)
        })
        .unwrap_or_else(|| ctx.options.default_icon_color.clone())
}

pub fn generate(ctx: &Context<'_>, node: &InstanceNode) -> ParsedCode {
    let glyph = format!("Icon{}", node.base.name);
    let script = format!(
        "{}import {{ {} }} from \"{}\";\n",
        ctx.library_import(&["Icon"]),
        glyph,
        ctx.options.icon_module
    );
    let markup = format!(
        r#"<Icon icon={{{}}} size={{{}}} color="{}"></Icon>"#,
        glyph,
        js_number(node.base.width + ICON_SIZE_PADDING),
        icon_color(ctx, node)
    );
    ParsedCode::new(script, markup, "")
}
