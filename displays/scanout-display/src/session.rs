//! Display session
//!
//! Owns the selected backend, the compositor state and the process font.
//! A session is created with an ordered list of candidate backends and
//! moves through:
//!
//! ```text
//! Uninit -> Trying(0) -> Trying(1) -> ... -> Ready(i) -> Exited
//!                                     \-> Failed
//! ```
//!
//! Drawing calls before a backend is ready (or after exit) do nothing.

use alloc::boxed::Box;
use alloc::vec::Vec;

use scanout_core::config::DisplayConfig;
use scanout_core::traits::{Backend, ResourceLoader};
use scanout_core::{Color, PixelSurface, Rotation};
use scanout_font::{Font, FontError, FontStore};

use crate::compositor::{Compositor, DrawError, Overscan};

/// Lifecycle of a [`Display`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// `init` not called yet
    Uninit,
    /// Initializing the candidate at this index
    Trying(usize),
    /// Drawing to the candidate at this index
    Ready(usize),
    /// No candidate produced a buffer
    Failed,
    /// Backend released
    Exited,
}

/// Errors from [`Display::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// `init` was already called
    InvalidState(DisplayState),
    /// Every candidate backend failed
    NoBackend,
    /// The built-in font failed to decode
    Font(FontError),
}

impl From<FontError> for InitError {
    fn from(e: FontError) -> Self {
        InitError::Font(e)
    }
}

/// A display session
pub struct Display {
    config: DisplayConfig,
    candidates: Vec<Box<dyn Backend>>,
    backend: Option<Box<dyn Backend>>,
    raw_size: (u32, u32),
    compositor: Compositor,
    fonts: Option<FontStore>,
    state: DisplayState,
}

impl Display {
    /// Create a session that will try `candidates` in order
    pub fn new(config: DisplayConfig, candidates: Vec<Box<dyn Backend>>) -> Self {
        Self {
            compositor: Compositor::from_config(&config),
            config,
            candidates,
            backend: None,
            raw_size: (0, 0),
            fonts: None,
            state: DisplayState::Uninit,
        }
    }

    /// Load the font and bring up the first backend that yields a buffer
    ///
    /// Font resources that fail to load fall back to the built-in font.
    /// Overscan is computed from the raw buffer size, then the backend is
    /// flipped twice so both buffers start out presented.
    pub fn init<L>(&mut self, loader: &mut L) -> Result<(), InitError>
    where
        L: ResourceLoader + ?Sized,
    {
        if self.state != DisplayState::Uninit {
            warn!("display init called in state {:?}", self.state);
            return Err(InitError::InvalidState(self.state));
        }

        let fonts = match FontStore::load(loader, self.config.font_paths()) {
            Ok(fonts) => fonts,
            Err(e) => {
                self.state = DisplayState::Failed;
                return Err(e.into());
            }
        };
        self.fonts = Some(fonts);

        let candidates = core::mem::take(&mut self.candidates);
        for (index, mut backend) in candidates.into_iter().enumerate() {
            self.state = DisplayState::Trying(index);

            if let Err(e) = backend.init() {
                warn!("backend {} failed to init: {:?}", backend.name(), e);
                continue;
            }

            let Some(surface) = backend.draw_surface() else {
                warn!("backend {} has no draw buffer", backend.name());
                backend.release();
                continue;
            };

            let (width, height, pixel_bytes) =
                (surface.width(), surface.height(), surface.pixel_bytes());
            if pixel_bytes != 4 {
                warn!(
                    "backend {} uses {} bytes per pixel, colors assume 4",
                    backend.name(),
                    pixel_bytes
                );
            }

            self.raw_size = (width, height);
            self.compositor.set_overscan(Overscan::from_percent(
                self.config.overscan_percent,
                width,
                height,
            ));

            backend.flip();
            backend.flip();

            info!(
                "display ready on {} ({}x{})",
                backend.name(),
                width,
                height
            );
            self.backend = Some(backend);
            self.state = DisplayState::Ready(index);
            return Ok(());
        }

        warn!("no display backend available");
        self.state = DisplayState::Failed;
        Err(InitError::NoBackend)
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, DisplayState::Ready(_))
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    /// The process font, once `init` has run
    pub fn font(&self) -> Option<&Font> {
        self.fonts.as_ref().map(|f| f.font())
    }

    pub fn font_store(&self) -> Option<&FontStore> {
        self.fonts.as_ref()
    }

    /// The buffer drawing currently targets
    pub fn draw_surface(&mut self) -> Option<&mut PixelSurface> {
        self.backend.as_mut().and_then(|b| b.draw_surface())
    }

    /// Present the current buffer and start drawing into the next one
    pub fn flip(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            if backend.flip().is_none() {
                warn!("backend {} lost its draw buffer", backend.name());
            }
        }
    }

    pub fn blank(&mut self, blank: bool) {
        if let Some(backend) = self.backend.as_mut() {
            backend.blank(blank);
        }
    }

    /// Release the backend; later calls are no-ops
    pub fn exit(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            debug!("releasing backend {}", backend.name());
            backend.release();
        }
        self.candidates.clear();
        self.state = DisplayState::Exited;
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.compositor.set_color(r, g, b, a);
    }

    pub fn color(&self) -> Color {
        self.compositor.color()
    }

    /// Change the logical orientation
    pub fn rotate(&mut self, rotation: Rotation) {
        self.compositor.rotate(rotation);
    }

    pub fn rotation(&self) -> Rotation {
        self.compositor.rotation()
    }

    pub fn overscan(&self) -> Overscan {
        self.compositor.overscan()
    }

    pub fn set_rainbow_mode(&mut self, enabled: bool) {
        self.compositor.set_rainbow_mode(enabled);
    }

    pub fn move_rainbow(&mut self, delta: i32) {
        self.compositor.move_rainbow(delta);
    }

    /// Usable logical width, 0 before init
    pub fn fb_width(&self) -> i32 {
        match self.backend {
            Some(_) => self.compositor.usable_size(self.raw_size.0, self.raw_size.1).0,
            None => 0,
        }
    }

    /// Usable logical height, 0 before init
    pub fn fb_height(&self) -> i32 {
        match self.backend {
            Some(_) => self.compositor.usable_size(self.raw_size.0, self.raw_size.1).1,
            None => 0,
        }
    }

    pub fn clear(&mut self) {
        if let Some(surface) = self.backend.as_mut().and_then(|b| b.draw_surface()) {
            self.compositor.clear(surface);
        }
    }

    pub fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if let Some(surface) = self.backend.as_mut().and_then(|b| b.draw_surface()) {
            self.compositor.fill(surface, x1, y1, x2, y2);
        }
    }

    /// Copy a block of `source` onto the draw buffer
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &mut self,
        source: &PixelSurface,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
        dx: i32,
        dy: i32,
    ) -> Result<(), DrawError> {
        match self.backend.as_mut().and_then(|b| b.draw_surface()) {
            Some(surface) => self.compositor.blit(surface, source, sx, sy, w, h, dx, dy),
            None => Ok(()),
        }
    }

    /// Draw `text` in the process font
    pub fn text(&mut self, x: i32, y: i32, text: impl AsRef<[u8]>, bold: bool) {
        let Some(font) = self.fonts.as_ref().map(|f| f.font()) else {
            return;
        };
        if let Some(surface) = self.backend.as_mut().and_then(|b| b.draw_surface()) {
            self.compositor.text(surface, font, x, y, text, bold);
        }
    }

    /// Draw `text` in a caller-supplied font
    pub fn text_with_font(
        &mut self,
        font: &Font,
        x: i32,
        y: i32,
        text: impl AsRef<[u8]>,
        bold: bool,
    ) {
        if let Some(surface) = self.backend.as_mut().and_then(|b| b.draw_surface()) {
            self.compositor.text(surface, font, x, y, text, bold);
        }
    }

    pub fn text_icon(&mut self, x: i32, y: i32, icon: &PixelSurface) -> Result<(), DrawError> {
        match self.backend.as_mut().and_then(|b| b.draw_surface()) {
            Some(surface) => self.compositor.text_icon(surface, x, y, icon),
            None => Ok(()),
        }
    }

    /// Width of `text` in the process font, 0 without a font
    pub fn measure(&self, text: impl AsRef<[u8]>) -> u32 {
        self.font().map_or(0, |font| self.compositor.measure(font, text))
    }

    /// Glyph cell size of the process font
    pub fn font_size(&self) -> Option<(u32, u32)> {
        self.font().map(|font| self.compositor.font_size(font))
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        self.exit();
    }
}
