//! Chart configuration

use serde::{Deserialize, Serialize};

/// Common color definitions, as RGB triples
pub mod colors {
    /// White
    pub const WHITE: [u8; 3] = [255, 255, 255];
    /// Black
    pub const BLACK: [u8; 3] = [0, 0, 0];
    /// Axis gray
    pub const DARK_GRAY: [u8; 3] = [60, 60, 60];
    /// Light gray
    pub const LIGHT_GRAY: [u8; 3] = [200, 200, 200];
    /// Blue
    pub const BLUE: [u8; 3] = [33, 150, 243];
    /// Orange
    pub const ORANGE: [u8; 3] = [255, 152, 0];
    /// Red
    pub const RED: [u8; 3] = [220, 50, 47];
}

/// Image size and palette shared by all charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Blank border around the plot area
    pub margin: u32,
    /// Side length of a plotted point
    pub point_size: u32,
    /// Background color
    pub background: [u8; 3],
    /// Axis color
    pub axis: [u8; 3],
    /// Color of data points and the primary series
    pub primary: [u8; 3],
    /// Color of fit lines and the secondary series
    pub secondary: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 40,
            point_size: 5,
            background: colors::WHITE,
            axis: colors::DARK_GRAY,
            primary: colors::BLUE,
            secondary: colors::ORANGE,
        }
    }
}

impl RenderConfig {
    /// Small images, useful for thumbnails and tests
    pub fn compact() -> Self {
        Self {
            width: 160,
            height: 120,
            margin: 10,
            point_size: 3,
            ..Default::default()
        }
    }

    /// Check that the plot area is non-empty
    pub fn validate(&self) -> Result<(), crate::RenderError> {
        if self.width <= 2 * self.margin + 1 || self.height <= 2 * self.margin + 1 {
            return Err(crate::RenderError::InvalidConfig(format!(
                "{}x{} image leaves no plot area inside a {}px margin",
                self.width, self.height, self.margin
            )));
        }
        Ok(())
    }
}
