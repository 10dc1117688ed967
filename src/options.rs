use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Knobs for a single generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// Pixel size of `1rem` in the target page.
    pub base_font_size: f64,
    /// Module every widget is imported from.
    pub library: String,
    /// Module the named icon components are imported from.
    pub icon_module: String,
    /// Token used for icons that have no bound color.
    pub default_icon_color: String,
    /// Run the formatter over the composed document.
    pub format: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
            library: "deskblocks".to_string(),
            icon_module: "deskblocks/icons".to_string(),
            default_icon_color: "--db-color-icon".to_string(),
            format: true,
        }
    }
}

impl GenerateOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|source| Error::InvalidOptions { source })?;
        options.validate()?;
        Ok(options)
    }

    /// Every length is divided by the base font size.
    pub fn validate(&self) -> Result<()> {
        let value = self.base_font_size;
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::InvalidBaseFontSize { value });
        }
        Ok(())
    }
}
