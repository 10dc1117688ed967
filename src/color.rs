//! Paint → CSS color resolution.
//!
//! Colors are resolved in two steps: a paint bound to a known design token becomes a
//! reference to that token, anything else falls back to the literal color of the
//! paint. Both steps look at the same paint: the first solid one that is not hidden.

use crate::catalog::ColorTokenCatalog;
use crate::scene::{Paint, Rgba, SolidPaint};

/// Returned by token resolution when the caller should fall back to a literal color.
pub const INITIAL: &str = "initial";
/// Literal color used when a node has no usable paint.
pub const TRANSPARENT: &str = "transparent";

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `#rrggbbaa`, each channel rounded to the nearest byte.
pub fn rgba_to_hex(color: Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        to_byte(color.r),
        to_byte(color.g),
        to_byte(color.b),
        to_byte(color.a)
    )
}

/// Inverse of [`rgba_to_hex`]. Accepts `#rrggbb` (opaque) and `#rrggbbaa`.
pub fn hex_to_rgba(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#')?;
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| -> Option<f64> {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .map(|byte| f64::from(byte) / 255.0)
    };
    Some(Rgba {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: if digits.len() == 8 { channel(6)? } else { 1.0 },
    })
}

/// First solid paint that is not hidden.
pub fn first_visible_solid(paints: &[Paint]) -> Option<&SolidPaint> {
    paints.iter().find_map(|paint| match paint {
        Paint::Solid(solid) if solid.visible => Some(solid),
        _ => None,
    })
}

/// Literal color of the first visible solid paint, with the paint's opacity as alpha.
pub fn static_color(paints: &[Paint]) -> String {
    match first_visible_solid(paints) {
        Some(solid) => rgba_to_hex(solid.color.with_alpha(solid.opacity)),
        None => TRANSPARENT.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    tokens: &'a ColorTokenCatalog,
}

impl<'a> ColorResolver<'a> {
    pub fn new(tokens: &'a ColorTokenCatalog) -> Self {
        Self { tokens }
    }

    /// Token bound to the first visible solid paint, as `var(--name)` or the bare
    /// `--name`. [`INITIAL`] when there is no such paint, no bound token, or the
    /// token is not in the catalog.
    pub fn token(&self, paints: &[Paint], with_var: bool) -> String {
        let Some(token_id) = first_visible_solid(paints).and_then(SolidPaint::bound_color_id)
        else {
            return INITIAL.to_string();
        };
        match self.tokens.lookup(token_id) {
            Some(name) if with_var => format!("var({})", name),
            Some(name) => name.to_string(),
            None => {
                tracing::debug!(token_id, "color token not in catalog");
                INITIAL.to_string()
            }
        }
    }

    /// Token reference if one resolves, otherwise the literal color.
    pub fn resolve(&self, paints: &[Paint]) -> String {
        let token = self.token(paints, true);
        if token == INITIAL {
            static_color(paints)
        } else {
            token
        }
    }
}
