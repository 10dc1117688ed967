//! Read-only lookup tables consulted during generation.
//!
//! The built-in tables are embedded at compile time and parsed once per process.
//! Hosts with their own design system can build a [`Catalogs`] from JSON instead.

use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

const BUILTIN_TOKENS: &str = include_str!("../data/variables.json");
const BUILTIN_COMPONENTS: &str = include_str!("../data/components.json");

lazy_static! {
    static ref BUILTIN: Catalogs = Catalogs::from_json(BUILTIN_TOKENS, BUILTIN_COMPONENTS)
        .expect("embedded catalogs are valid JSON");
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenEntry {
    id: String,
    var_name: String,
}

/// Design-token id → CSS custom property name.
#[derive(Debug, Clone, Default)]
pub struct ColorTokenCatalog {
    names: HashMap<String, String>,
}

impl ColorTokenCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<TokenEntry> = serde_json::from_str(json)
            .map_err(|source| Error::InvalidCatalog {
                catalog: "color token",
                source,
            })?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.id, entry.var_name))
            .collect())
    }

    pub fn lookup(&self, token_id: &str) -> Option<&str> {
        self.names.get(token_id).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for ColorTokenCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Names used to classify instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCatalog {
    #[serde(default)]
    component_names: HashSet<String>,
    #[serde(default)]
    icon_names: HashSet<String>,
}

impl ComponentCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::InvalidCatalog {
            catalog: "component",
            source,
        })
    }

    pub fn is_component(&self, name: &str) -> bool {
        self.component_names.contains(name)
    }

    pub fn is_icon(&self, name: &str) -> bool {
        self.icon_names.contains(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub tokens: ColorTokenCatalog,
    pub components: ComponentCatalog,
}

impl Catalogs {
    pub fn from_json(tokens_json: &str, components_json: &str) -> Result<Self> {
        Ok(Self {
            tokens: ColorTokenCatalog::from_json(tokens_json)?,
            components: ComponentCatalog::from_json(components_json)?,
        })
    }

    /// The embedded design-system tables.
    pub fn builtin() -> &'static Catalogs {
        &BUILTIN
    }
}
