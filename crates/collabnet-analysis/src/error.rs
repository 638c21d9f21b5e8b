//! Error types for analysis operations

use collabnet_domain::StatisticsError;
use thiserror::Error;

/// Errors that can occur while running the pipeline
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Author index lookup failed
    #[error("Author index error: {0}")]
    Index(String),

    /// Relation checkpoint could not be written or read
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Statistics are undefined for a year's graph
    #[error("Statistics for {year} failed: {source}")]
    Statistics {
        /// Year whose graph was being analysed
        year: i32,
        /// Underlying condition
        #[source]
        source: StatisticsError,
    },

    /// Chart rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// Artifact could not be written
    #[error("Sink error: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
