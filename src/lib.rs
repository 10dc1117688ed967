//! # Design-tree to Svelte component transpiler
//!
//! Turns a node tree exported from a vector design tool into a single-file Svelte
//! component: a script block, markup and a scoped style block.
//!
//! ## Pipeline
//!
//! 1. [`SceneNode`] deserializes the host's JSON node tree
//! 2. [`Transpiler`] walks it depth-first; every node is classified and handed to
//!    its generator, containers get their children and closing tag appended
//! 3. [`compose_document`] and [`format_document`] produce the final text
//!
//! Design-system components and icons are recognized by name through the
//! [`Catalogs`] and rendered as widget-library components. Colors bound to a design
//! token become CSS variable references.
//!
//! Generation itself does not fail. Unsupported kinds, hidden nodes and unknown
//! widgets produce nothing; only structurally invalid input is an [`Error`].

#[cfg(feature = "napi")]
use napi_derive::napi;

mod catalog;
mod codegen;
mod color;
mod datetime;
mod error;
mod finalize;
mod generators;
mod markup;
mod naming;
mod options;
mod scene;
mod style;


pub use catalog::{Catalogs, ColorTokenCatalog, ComponentCatalog};
pub use codegen::{classify, Route, Transpiler};
pub use color::{hex_to_rgba, rgba_to_hex, static_color, ColorResolver};
pub use datetime::{date_time_to_iso, date_to_iso, time_to_iso};
pub use error::{Error, Result};
pub use finalize::{
    compose_document, finish_with_remote, format_document, format_markup, format_script,
    format_style, RemoteTransform,
};
pub use generators::ParsedCode;
pub use markup::closing_tag;
pub use naming::{create_slug, state_identifier, unique_class_name};
pub use options::GenerateOptions;
pub use scene::*;

/// Generate the component document for the tree rooted at `root`.
pub fn generate_component(
    root: &SceneNode,
    catalogs: &Catalogs,
    options: &GenerateOptions,
) -> Result<String> {
    let code = Transpiler::new(catalogs, options).transpile(root)?;
    let document = compose_document(&code);
    tracing::debug!(
        script_bytes = code.script.len(),
        markup_bytes = code.markup.len(),
        style_bytes = code.style.len(),
        "component generated"
    );
    if options.format {
        Ok(format_document(&document))
    } else {
        Ok(document)
    }
}

/// [`generate_component`] from the host's JSON form, with the built-in catalogs.
pub fn generate_component_json(node_json: &str, options: &GenerateOptions) -> Result<String> {
    let root = SceneNode::from_json(node_json)?;
    generate_component(&root, Catalogs::builtin(), options)
}

#[cfg(feature = "napi")]
#[napi]
pub fn generate_component_native(
    node_json: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let options = match options_json {
        Some(json) => GenerateOptions::from_json(&json),
        None => Ok(GenerateOptions::default()),
    }
    .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    generate_component_json(&node_json, &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}
