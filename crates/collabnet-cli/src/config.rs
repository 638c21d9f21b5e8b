//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use collabnet_analysis::AnalysisConfig;
use collabnet_render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Author database used to resolve roster names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Directory receiving checkpoints and charts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the resolved-author checkpoint inside `output_dir`
    #[serde(default = "default_authors_checkpoint")]
    pub authors_checkpoint: String,

    /// File name of the relation checkpoint inside `output_dir`
    #[serde(default = "default_relations_checkpoint")]
    pub relations_checkpoint: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Chart settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".collabnet").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the defaults; an explicitly named file
    /// must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
                toml::from_str(&contents)?
            }
            None => {
                let path = Self::path()?;
                if path.exists() {
                    let contents = fs::read_to_string(&path)?;
                    toml::from_str(&contents)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check settings before anything is read or written.
    pub fn validate(&self) -> Result<()> {
        self.analysis
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.render
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        for name in [&self.authors_checkpoint, &self.relations_checkpoint] {
            if name.trim().is_empty() {
                return Err(CliError::Config("Checkpoint file names must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Location of the resolved-author checkpoint.
    pub fn authors_checkpoint_path(&self) -> PathBuf {
        self.output_dir.join(&self.authors_checkpoint)
    }

    /// Location of the relation checkpoint.
    pub fn relations_checkpoint_path(&self) -> PathBuf {
        self.output_dir.join(&self.relations_checkpoint)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            output_dir: default_output_dir(),
            authors_checkpoint: default_authors_checkpoint(),
            relations_checkpoint: default_relations_checkpoint(),
            settings: Settings::default(),
            analysis: AnalysisConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_authors_checkpoint() -> String {
    "filtered.csv".to_string()
}

fn default_relations_checkpoint() -> String {
    "temporal_rels.csv".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
