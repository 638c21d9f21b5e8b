//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data-source flags are missing or contradict each other
    #[error("Conflicting data sources: {0}")]
    ConfigurationConflict(String),

    /// Storage error
    #[error(transparent)]
    Store(#[from] collabnet_store::StoreError),

    /// Pipeline error
    #[error(transparent)]
    Analysis(#[from] collabnet_analysis::AnalysisError),

    /// Rendering setup error
    #[error(transparent)]
    Render(#[from] collabnet_render::RenderError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
