//! Collabnet CLI library.
//!
//! This library provides the core functionality for the collabnet command-line interface,
//! including configuration management, data-source selection, the batch run, and output formatting.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod source;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{run, RunOptions};
pub use source::DataSource;
