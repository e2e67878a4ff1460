//! Display configuration loading
//!
//! A configuration blob is either a TOML document or the postcard
//! encoding of [`DisplayConfig`]. TOML is tried first; anything that is
//! not valid UTF-8 or fails to parse as TOML is decoded as binary.
//!
//! ```toml
//! overscan_percent = 5
//! rotation = "left"
//! pixel_order = "bgra"
//! font_paths = ["/res/images/font.png"]
//! ```

use alloc::vec::Vec;
use core::str;

use scanout_core::config::{ConfigError, DisplayConfig};

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// TOML parsing failed
    TomlParse,
    /// Binary decoding failed
    Deserialize,
    /// Binary encoding failed
    Serialize,
    /// Parsed but out of range
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Load a configuration from TOML text or postcard bytes
pub fn load(bytes: &[u8]) -> Result<DisplayConfig, LoadError> {
    if let Ok(text) = str::from_utf8(bytes) {
        match parse_toml(text) {
            Ok(config) => {
                info!("display configuration loaded from TOML");
                return Ok(config);
            }
            Err(LoadError::TomlParse) => {
                debug!("not a TOML configuration, trying binary format");
            }
            Err(e) => return Err(e),
        }
    }

    let config = from_binary(bytes)?;
    info!("display configuration loaded from binary");
    Ok(config)
}

/// Parse and validate a TOML configuration
///
/// Missing keys take their defaults.
pub fn parse_toml(text: &str) -> Result<DisplayConfig, LoadError> {
    let config: DisplayConfig = toml::from_str(text).map_err(|_| LoadError::TomlParse)?;
    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Decode and validate a postcard configuration
pub fn from_binary(bytes: &[u8]) -> Result<DisplayConfig, LoadError> {
    let config: DisplayConfig =
        postcard::from_bytes(bytes).map_err(|_| LoadError::Deserialize)?;
    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Encode a configuration for [`from_binary`]
pub fn to_binary(config: &DisplayConfig) -> Result<Vec<u8>, LoadError> {
    postcard::to_allocvec(config).map_err(|_| LoadError::Serialize)
}

fn log_config_summary(config: &DisplayConfig) {
    debug!(
        "  overscan {}%, rotation {}",
        config.overscan_percent,
        config.rotation.index()
    );
    debug!("  {} font paths", config.font_paths.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanout_core::{PixelOrder, Rotation};

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(load(b"").unwrap(), DisplayConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = load(
            br#"
            # portrait panel
            overscan_percent = 5
            rotation = "left"
            pixel_order = "bgra"
            font_paths = ["/res/images/font.png"]
            "#,
        )
        .unwrap();

        assert_eq!(config.overscan_percent, 5);
        assert_eq!(config.rotation, Rotation::Left);
        assert_eq!(config.pixel_order, PixelOrder::Bgra);
        assert_eq!(
            config.font_paths().collect::<Vec<_>>(),
            ["/res/images/font.png"]
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = parse_toml("rotation = \"down\"").unwrap();
        assert_eq!(config.rotation, Rotation::Down);
        assert_eq!(config.font_paths, DisplayConfig::default().font_paths);
    }

    #[test]
    fn test_toml_overscan_validated() {
        assert_eq!(
            parse_toml("overscan_percent = 50"),
            Err(LoadError::Invalid(ConfigError::OverscanTooLarge))
        );
    }

    #[test]
    fn test_unknown_rotation_rejected() {
        assert_eq!(
            parse_toml("rotation = \"sideways\""),
            Err(LoadError::TomlParse)
        );
    }

    #[test]
    fn test_binary_round_trip_through_load() {
        let mut config = DisplayConfig::without_fonts();
        config.rotation = Rotation::Right;
        config.overscan_percent = 3;
        config.push_font_path("/fonts/big.png").unwrap();

        let bytes = to_binary(&config).unwrap();
        assert_eq!(load(&bytes).unwrap(), config);
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(load(&[0xFF, 0xFF, 0xFF]), Err(LoadError::Deserialize));
    }
}
