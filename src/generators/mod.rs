//! Per-kind code generators.
//!
//! Leaf generators (shapes, text, icons, widgets) return a complete fragment.
//! Container generators (frames, groups, autolayout) return only the opening
//! fragment; the tree assembler in [`crate::codegen`] appends the children and the
//! closing tag.

pub mod autolayout;
pub mod frame;
pub mod group;
pub mod icon;
pub mod instance;
pub mod shape;
pub mod text;

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::Catalogs;
use crate::color::ColorResolver;
use crate::options::GenerateOptions;
use crate::scene::{ComponentProperty, NodeBase, PropertyValue};
use crate::style::{self, box_shadow_value, drop_shadows, group_offset_rule, CssRule};

// ═══════════════════════════════════════════════════════════════════════════════
// FRAGMENTS
// ═══════════════════════════════════════════════════════════════════════════════

/// The script/markup/style triple produced for one node or subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCode {
    pub script: String,
    pub markup: String,
    pub style: String,
}

impl ParsedCode {
    pub fn new(
        script: impl Into<String>,
        markup: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            script: script.into(),
            markup: markup.into(),
            style: style.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty() && self.markup.is_empty() && self.style.is_empty()
    }

    /// Concatenate `other` after `self`, section by section.
    pub fn append(&mut self, other: ParsedCode) {
        self.script.push_str(&other.script);
        self.markup.push_str(&other.markup);
        self.style.push_str(&other.style);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Top-left corner of a group, in design units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    pub fn of(base: &NodeBase) -> Self {
        Self {
            x: base.x,
            y: base.y,
        }
    }
}

/// What a generator may look at besides the node itself.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub catalogs: &'a Catalogs,
    pub options: &'a GenerateOptions,
    /// Origin of the parent group, when the node is a direct child of one.
    pub group_origin: Option<Origin>,
}

impl<'a> Context<'a> {
    pub fn new(catalogs: &'a Catalogs, options: &'a GenerateOptions) -> Self {
        Self {
            catalogs,
            options,
            group_origin: None,
        }
    }

    pub fn with_group_origin(self, group_origin: Option<Origin>) -> Self {
        Self {
            group_origin,
            ..self
        }
    }

    pub fn rem(&self, px: f64) -> String {
        style::rem(px, self.options.base_font_size)
    }

    pub fn colors(&self) -> ColorResolver<'a> {
        ColorResolver::new(&self.catalogs.tokens)
    }

    /// `import { A, B } from "<library>";`
    pub fn library_import(&self, names: &[&str]) -> String {
        format!(
            "import {{ {} }} from \"{}\";\n",
            names.join(", "),
            self.options.library
        )
    }

    /// Group-relative position override, only for direct children of a group.
    pub fn group_override(&self, class: &str, left: &str, top: &str) -> String {
        match self.group_origin {
            Some(_) => group_offset_rule(class, left, top).to_string(),
            None => String::new(),
        }
    }
}

/// Opacity, drop shadows and rotation: the tail every visual rule shares.
pub(crate) fn with_appearance(rule: CssRule, base: &NodeBase) -> CssRule {
    rule.decl("opacity", style::js_number(base.opacity))
        .decl_opt("box-shadow", box_shadow_value(&drop_shadows(&base.effects)))
        .decl_opt("transform", style::rotation(base.rotation))
}

// ═══════════════════════════════════════════════════════════════════════════════
// INSTANCE PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════════

/// Property lookup by key prefix.
///
/// The host suffixes property keys with a unique id (`label#12:0`), so widgets ask
/// for the first key that starts with the readable part. Missing properties read as
/// `false` / empty.
#[derive(Debug, Clone, Copy)]
pub struct Properties<'a> {
    entries: &'a IndexMap<String, ComponentProperty>,
}

impl<'a> Properties<'a> {
    pub fn new(entries: &'a IndexMap<String, ComponentProperty>) -> Self {
        Self { entries }
    }

    pub fn find(&self, prefix: &str) -> Option<&'a PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.starts_with(prefix))
            .map(|(_, property)| &property.value)
    }

    pub fn flag(&self, prefix: &str) -> bool {
        self.find(prefix).is_some_and(PropertyValue::is_true)
    }

    pub fn text(&self, prefix: &str) -> String {
        self.find(prefix).map(ToString::to_string).unwrap_or_default()
    }
}
