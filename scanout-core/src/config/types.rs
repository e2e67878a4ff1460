//! Configuration type definitions

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pixel::PixelOrder;
use crate::rotation::Rotation;

/// Maximum number of font resource paths
pub const MAX_FONT_PATHS: usize = 4;

/// Maximum length of a resource path
pub const MAX_PATH_LEN: usize = 96;

/// Overscan margin applied when none is configured (percent)
pub const DEFAULT_OVERSCAN_PERCENT: u8 = 0;

/// Largest usable overscan margin (percent per edge)
pub const MAX_OVERSCAN_PERCENT: u8 = 49;

/// Font atlas locations searched when none are configured
pub const DEFAULT_FONT_PATHS: [&str; 2] = ["/usr/share/scanout/font.png", "/res/images/font.png"];

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Overscan would leave no drawable area
    OverscanTooLarge,
    /// More font paths than [`MAX_FONT_PATHS`]
    TooManyFontPaths,
    /// A font path longer than [`MAX_PATH_LEN`]
    PathTooLong,
}

/// Display and compositor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Margin kept clear on each edge, as a percentage of the raw buffer size
    pub overscan_percent: u8,
    /// Initial orientation of the logical surface
    pub rotation: Rotation,
    /// Channel order of the scan-out buffer
    pub pixel_order: PixelOrder,
    /// Font atlas resources, first loadable one wins
    pub font_paths: Vec<String<MAX_PATH_LEN>, MAX_FONT_PATHS>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut config = Self {
            overscan_percent: DEFAULT_OVERSCAN_PERCENT,
            rotation: Rotation::None,
            pixel_order: PixelOrder::Rgba,
            font_paths: Vec::new(),
        };
        for path in DEFAULT_FONT_PATHS {
            // Defaults always fit
            let _ = config.push_font_path(path);
        }
        config
    }
}

impl DisplayConfig {
    /// Configuration with no font paths, so only the built-in font is used
    pub fn without_fonts() -> Self {
        let mut config = Self::default();
        config.font_paths.clear();
        config
    }

    /// Append a font resource path to the search list
    pub fn push_font_path(&mut self, path: &str) -> Result<(), ConfigError> {
        let mut entry = String::new();
        entry
            .push_str(path)
            .map_err(|_| ConfigError::PathTooLong)?;
        self.font_paths
            .push(entry)
            .map_err(|_| ConfigError::TooManyFontPaths)
    }

    /// Font resource paths in search order
    pub fn font_paths(&self) -> impl Iterator<Item = &str> {
        self.font_paths.iter().map(|p| p.as_str())
    }

    /// Check that the configuration leaves a drawable area
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overscan_percent > MAX_OVERSCAN_PERCENT {
            return Err(ConfigError::OverscanTooLarge);
        }
        Ok(())
    }
}
