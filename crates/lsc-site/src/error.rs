//! Error types for lsc-site

/// Result type for lsc-site operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading site metadata
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse site metadata: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse site metadata: {0}")]
    Json(#[from] serde_json::Error),
}
