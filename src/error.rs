pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid scene node: {source}")]
    InvalidNode {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid geometry on node '{name}' ({id}): {reason}")]
    InvalidGeometry {
        id: String,
        name: String,
        reason: String,
    },

    #[error("Invalid {catalog} catalog: {source}")]
    InvalidCatalog {
        catalog: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid generate options: {source}")]
    InvalidOptions {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base font size {value}: must be a positive number of pixels")]
    InvalidBaseFontSize { value: f64 },
}
