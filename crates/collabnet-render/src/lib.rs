//! Collabnet chart rendering
//!
//! Turns degree distributions, assortativity densities and yearly series into
//! encoded images. Rendering never touches the file system; callers hand the
//! returned bytes to an artifact sink.

#![warn(missing_docs)]

mod canvas;
mod config;
mod renderer;

pub use canvas::{interpolate_color, value_to_heatmap_color};
pub use config::{colors, RenderConfig};
pub use renderer::PngRenderer;

use thiserror::Error;

/// Errors that can occur while rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// Image encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Nothing to draw
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Configuration error
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}
