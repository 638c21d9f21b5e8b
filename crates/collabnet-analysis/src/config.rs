//! Configuration for the analysis pipeline
//!
//! Passed explicitly into each component; nothing is read from global state.

use collabnet_domain::statistics::{KdeOptions, DEFAULT_FALLBACK_BANDWIDTH, DEFAULT_GRID_SIZE};
use collabnet_domain::DELIMITER;
use serde::{Deserialize, Serialize};

/// Configuration for relation building and statistics
///
/// # Examples
///
/// ```
/// use collabnet_analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.delimiter, "::");
/// assert_eq!(config.kde_grid_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Delimiter joining co-author names inside a relation cell
    /// Default: "::"
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Grid points per axis of the assortativity density grid
    /// Default: 64
    #[serde(default = "default_grid_size")]
    pub kde_grid_size: usize,

    /// Kernel bandwidth used when an axis has zero variance
    /// Default: 1.0
    #[serde(default = "default_bandwidth_fallback")]
    pub kde_bandwidth_fallback: f64,
}

fn default_delimiter() -> String {
    DELIMITER.to_string()
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_bandwidth_fallback() -> f64 {
    DEFAULT_FALLBACK_BANDWIDTH
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            kde_grid_size: default_grid_size(),
            kde_bandwidth_fallback: default_bandwidth_fallback(),
        }
    }
}

impl AnalysisConfig {
    /// Check values that would make the pipeline misbehave
    pub fn validate(&self) -> Result<(), crate::AnalysisError> {
        if self.delimiter.trim().is_empty() {
            return Err(crate::AnalysisError::Config("delimiter must not be blank".to_string()));
        }
        if self.kde_grid_size < 2 {
            return Err(crate::AnalysisError::Config(format!(
                "kde_grid_size must be at least 2, got {}",
                self.kde_grid_size
            )));
        }
        if !(self.kde_bandwidth_fallback.is_finite() && self.kde_bandwidth_fallback > 0.0) {
            return Err(crate::AnalysisError::Config(format!(
                "kde_bandwidth_fallback must be positive, got {}",
                self.kde_bandwidth_fallback
            )));
        }
        Ok(())
    }

    /// Density estimate options derived from this configuration
    pub fn kde_options(&self) -> KdeOptions {
        KdeOptions {
            grid_size: self.kde_grid_size,
            fallback_bandwidth: self.kde_bandwidth_fallback,
        }
    }
}
