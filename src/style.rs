//! Style-sheet building blocks shared by the generators: number rendering, unit
//! conversion, shadows, transforms and a small rule builder.

use std::fmt;

use crate::color::rgba_to_hex;
use crate::scene::{CornerRadii, Effect, StrokeWeights};

/// Marker class on every emitted frame element.
pub const FRAME_NODE_CLASS: &str = "frame-node";
/// Marker class on every emitted group element.
pub const GROUP_NODE_CLASS: &str = "group-node";
/// Custom properties carrying the nearest group's origin.
pub const PARENT_X_VAR: &str = "--parentXpos";
pub const PARENT_Y_VAR: &str = "--parentYpos";

/// Render a number the way the host's template literals do (`1`, `0.5`, `1e-7`).
pub fn js_number(value: f64) -> String {
    if value == 0.0 {
        // also catches -0
        return "0".to_string();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format(value).to_string()
}

/// Convert raw design units to `rem` against `base` units per rem.
pub fn rem(px: f64, base: f64) -> String {
    format!("{}rem", js_number(px / base))
}

pub fn px(value: f64) -> String {
    format!("{}px", js_number(value))
}

/// Every drop shadow of `effects`, in list order, as
/// `"<offsetX>px <offsetY>px <blur>px <spread>px <hexColor>; "` segments.
pub fn drop_shadows(effects: &[Effect]) -> String {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::DropShadow(shadow) => Some(format!(
                "{} {} {} {} {}; ",
                px(shadow.offset.x),
                px(shadow.offset.y),
                px(shadow.radius),
                px(shadow.spread),
                rgba_to_hex(shadow.color)
            )),
            Effect::Other => None,
        })
        .collect()
}

/// Turn a [`drop_shadows`] string into a `box-shadow` value (comma-separated list).
pub fn box_shadow_value(composite: &str) -> Option<String> {
    let layers: Vec<&str> = composite
        .split(';')
        .map(str::trim)
        .filter(|layer| !layer.is_empty())
        .collect();
    if layers.is_empty() {
        None
    } else {
        Some(layers.join(", "))
    }
}

/// `transform` value for a rotation, omitted when there is none.
pub fn rotation(degrees: f64) -> Option<String> {
    if degrees == 0.0 {
        None
    } else {
        Some(format!("rotate({}deg)", js_number(degrees)))
    }
}

/// Per-edge border width in pixels, `0` for nodes without strokes.
pub fn border_width(has_strokes: bool, weights: &StrokeWeights) -> String {
    if !has_strokes {
        return "0".to_string();
    }
    format!(
        "{} {} {} {}",
        px(weights.top()),
        px(weights.right()),
        px(weights.bottom()),
        px(weights.left())
    )
}

pub fn border_radius(corners: &CornerRadii, base: f64) -> String {
    corners
        .clockwise()
        .iter()
        .map(|radius| rem(*radius, base))
        .collect::<Vec<_>>()
        .join(" ")
}

// ═══════════════════════════════════════════════════════════════════════════════
// RULE BUILDER
// ═══════════════════════════════════════════════════════════════════════════════

/// One style rule, rendered on a single line. The formatter expands it later.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    selector: String,
    declarations: Vec<(&'static str, String)>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Rule targeting `.{class}`.
    pub fn class(class: &str) -> Self {
        Self::new(format!(".{}", class))
    }

    pub fn decl(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push((property, value.into()));
        self
    }

    pub fn decl_opt(self, property: &'static str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.decl(property, value),
            None => self,
        }
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            write!(f, " {}: {};", property, value)?;
        }
        f.write_str(" }\n")
    }
}

/// Override placing an element relative to its group: the group's origin, exposed
/// through [`PARENT_X_VAR`]/[`PARENT_Y_VAR`], is subtracted from the absolute position.
pub fn group_offset_rule(class: &str, left: &str, top: &str) -> CssRule {
    CssRule::new(format!(":global(.{} > .{})", GROUP_NODE_CLASS, class))
        .decl(
            "left",
            format!("calc({} - var({})) !important", left, PARENT_X_VAR),
        )
        .decl(
            "top",
            format!("calc({} - var({})) !important", top, PARENT_Y_VAR),
        )
}

/// Binds a group's origin on one of its direct children.
pub fn group_origin_binding(selector: &str, x: &str, y: &str) -> CssRule {
    CssRule::new(selector)
        .decl(PARENT_X_VAR, x)
        .decl(PARENT_Y_VAR, y)
}
