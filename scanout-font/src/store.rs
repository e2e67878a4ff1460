//! Font loading with fallback
//!
//! Tries each configured atlas resource in order and falls back to the
//! compiled-in font when none of them loads. Resource failures are never
//! fatal.

use scanout_core::traits::ResourceLoader;

use crate::atlas::{Font, FontError};
use crate::fallback;

/// Where the active font came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSource {
    /// Loaded from the configured path at this index
    Resource(usize),
    /// Decoded from the compiled-in asset
    Builtin,
}

/// Holder of the process font
#[derive(Debug, Clone)]
pub struct FontStore {
    font: Font,
    source: FontSource,
}

impl FontStore {
    /// Load the first usable atlas from `paths`, else the built-in font
    pub fn load<'a, L, I>(loader: &mut L, paths: I) -> Result<Self, FontError>
    where
        L: ResourceLoader + ?Sized,
        I: IntoIterator<Item = &'a str>,
    {
        for (index, path) in paths.into_iter().enumerate() {
            let surface = match loader.load_alpha(path) {
                Ok(surface) => surface,
                Err(e) => {
                    debug!("font resource {} unavailable: {:?}", index, e);
                    continue;
                }
            };

            match Font::from_atlas(surface) {
                Ok(font) => {
                    info!(
                        "font loaded from resource {} ({}x{})",
                        index,
                        font.char_width(),
                        font.char_height()
                    );
                    return Ok(Self {
                        font,
                        source: FontSource::Resource(index),
                    });
                }
                Err(e) => {
                    warn!("font resource {} rejected: {:?}", index, e);
                }
            }
        }

        warn!("no font resource usable, falling back to built-in font");
        Self::builtin()
    }

    /// Use the compiled-in font
    pub fn builtin() -> Result<Self, FontError> {
        Ok(Self {
            font: fallback::builtin()?,
            source: FontSource::Builtin,
        })
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn source(&self) -> FontSource {
        self.source
    }

    /// Take ownership of the font
    pub fn into_font(self) -> Font {
        self.font
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanout_core::traits::ResourceError;
    use scanout_core::PixelSurface;
    use std::collections::BTreeMap;
    use std::string::{String, ToString};
    use std::vec::Vec;

    #[derive(Default)]
    struct Resources {
        images: BTreeMap<String, PixelSurface>,
        requested: Vec<String>,
    }

    impl ResourceLoader for Resources {
        fn load_alpha(&mut self, path: &str) -> Result<PixelSurface, ResourceError> {
            self.requested.push(path.to_string());
            self.images.get(path).cloned().ok_or(ResourceError::NotFound)
        }
    }

    #[test]
    fn test_first_loadable_path_wins() {
        let mut res = Resources::default();
        res.images.insert("/b.png".into(), PixelSurface::new(96 * 4, 12, 1).unwrap());
        res.images.insert("/c.png".into(), PixelSurface::new(96 * 8, 32, 1).unwrap());

        let store = FontStore::load(&mut res, ["/a.png", "/b.png", "/c.png"]).unwrap();
        assert_eq!(store.source(), FontSource::Resource(1));
        assert_eq!(store.font().size(), (4, 6));
        assert_eq!(res.requested, ["/a.png", "/b.png"]);
    }

    #[test]
    fn test_invalid_atlas_falls_through() {
        let mut res = Resources::default();
        res.images.insert("/bad.png".into(), PixelSurface::new(96, 2, 4).unwrap());
        res.images.insert("/good.png".into(), PixelSurface::new(96 * 2, 4, 1).unwrap());

        let store = FontStore::load(&mut res, ["/bad.png", "/good.png"]).unwrap();
        assert_eq!(store.source(), FontSource::Resource(1));
    }

    #[test]
    fn test_falls_back_to_builtin() {
        let mut res = Resources::default();
        let store = FontStore::load(&mut res, ["/missing.png", "/also-missing.png"]).unwrap();
        assert_eq!(store.source(), FontSource::Builtin);
        assert_eq!(store.font().size(), (10, 18));
        assert_eq!(res.requested.len(), 2);
    }

    #[test]
    fn test_no_paths_uses_builtin() {
        let mut res = Resources::default();
        let store = FontStore::load(&mut res, []).unwrap();
        assert_eq!(store.source(), FontSource::Builtin);
    }
}
