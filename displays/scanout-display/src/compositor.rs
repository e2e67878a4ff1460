//! Drawing primitives
//!
//! All coordinates are logical: they are offset by the overscan margin and
//! mapped through the current rotation before touching the buffer.
//! Primitives whose box does not fit on the logical surface draw nothing.

use scanout_core::config::DisplayConfig;
use scanout_core::{blend, Color, PixelOrder, PixelSurface, Rotation, Transform};
use scanout_font::Font;

use crate::glyph::{blend_plane, AlphaPlane};
use crate::rainbow::Rainbow;

/// Errors from primitives that take a caller-supplied surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// Source bytes-per-pixel does not match what the primitive needs
    FormatMismatch { expected: usize, found: usize },
}

/// Margin kept clear on each edge, in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overscan {
    pub x: i32,
    pub y: i32,
}

impl Overscan {
    /// Margins for a raw buffer of `width` x `height`
    pub const fn from_percent(percent: u8, width: u32, height: u32) -> Self {
        Self {
            x: (width as u64 * percent as u64 / 100) as i32,
            y: (height as u64 * percent as u64 / 100) as i32,
        }
    }
}

/// Draw state plus the primitives that use it
#[derive(Debug, Clone)]
pub struct Compositor {
    color: Color,
    current: u32,
    order: PixelOrder,
    rotation: Rotation,
    overscan: Overscan,
    rainbow: Rainbow,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(PixelOrder::default())
    }
}

impl Compositor {
    /// Opaque white, no rotation, no overscan
    pub const fn new(order: PixelOrder) -> Self {
        Self {
            color: Color::WHITE,
            current: order.pack(Color::WHITE),
            order,
            rotation: Rotation::None,
            overscan: Overscan { x: 0, y: 0 },
            rainbow: Rainbow::new(),
        }
    }

    /// Compositor using the configured pixel order and rotation
    pub fn from_config(config: &DisplayConfig) -> Self {
        let mut compositor = Self::new(config.pixel_order);
        compositor.rotate(config.rotation);
        compositor
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.set_color_value(Color::new(r, g, b, a));
    }

    pub fn set_color_value(&mut self, color: Color) {
        self.color = color;
        self.current = self.order.pack(color);
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// The draw color packed in the buffer's channel order
    pub const fn packed_color(&self) -> u32 {
        self.current
    }

    pub const fn pixel_order(&self) -> PixelOrder {
        self.order
    }

    /// Change the channel order, repacking the draw color
    pub fn set_pixel_order(&mut self, order: PixelOrder) {
        self.order = order;
        self.current = order.pack(self.color);
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub const fn overscan(&self) -> Overscan {
        self.overscan
    }

    pub fn set_overscan(&mut self, overscan: Overscan) {
        self.overscan = overscan;
    }

    pub fn set_rainbow_mode(&mut self, enabled: bool) {
        self.rainbow.set_enabled(enabled);
    }

    pub const fn rainbow(&self) -> &Rainbow {
        &self.rainbow
    }

    /// Scroll the rainbow bands
    pub fn move_rainbow(&mut self, delta: i32) {
        self.rainbow.shift(delta);
    }

    /// Mapping for drawing into `surface` with the current rotation
    pub fn transform(&self, surface: &PixelSurface) -> Transform {
        Transform::for_surface(self.rotation, surface)
    }

    /// Usable logical (width, height) of a raw `width` x `height` buffer
    pub const fn usable_size(&self, width: u32, height: u32) -> (i32, i32) {
        let w = (width as i32).saturating_sub(self.overscan.x.saturating_mul(2));
        let h = (height as i32).saturating_sub(self.overscan.y.saturating_mul(2));
        if self.rotation.is_quarter_turn() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Usable logical width of `surface`
    pub fn fb_width(&self, surface: &PixelSurface) -> i32 {
        self.usable_size(surface.width(), surface.height()).0
    }

    /// Usable logical height of `surface`
    pub fn fb_height(&self, surface: &PixelSurface) -> i32 {
        self.usable_size(surface.width(), surface.height()).1
    }

    fn offset(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.saturating_add(self.overscan.x),
            y.saturating_add(self.overscan.y),
        )
    }

    /// Set every visible pixel to the draw color, ignoring alpha
    ///
    /// Row padding is left untouched.
    pub fn clear(&self, surface: &mut PixelSurface) {
        let bytes = self.current.to_le_bytes();
        let uniform = bytes.iter().all(|&b| b == bytes[0]);

        if uniform && surface.is_packed() {
            let len = surface.height() as usize * surface.row_bytes();
            if let Some(visible) = surface.data_mut().get_mut(..len) {
                visible.fill(bytes[0]);
            }
            return;
        }

        let pixel_bytes = surface.pixel_bytes();
        let n = pixel_bytes.min(bytes.len());
        let width = surface.width() as usize;
        for y in 0..surface.height() {
            let Some(row) = surface.row_mut(y) else {
                break;
            };
            for px in row.chunks_exact_mut(pixel_bytes).take(width) {
                px[..n].copy_from_slice(&bytes[..n]);
            }
        }
    }

    /// Blend the draw color over the half-open rectangle `[x1, x2) x [y1, y2)`
    pub fn fill(&self, surface: &mut PixelSurface, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (x1, y1) = self.offset(x1, y1);
        let (x2, y2) = self.offset(x2, y2);

        let t = self.transform(surface);
        if t.outside(x1, y1) || t.outside(x2.saturating_sub(1), y2.saturating_sub(1)) {
            return;
        }

        let alpha = self.color.a;
        if alpha == 0 {
            return;
        }

        let mut row = t.cursor(x1, y1);
        for _ in y1..y2 {
            let mut px = row;
            for _ in x1..x2 {
                if let Some(pixel) = surface.read_pixel(px.index()) {
                    surface.write_pixel(px.index(), blend(alpha, pixel, self.current));
                }
                px.advance_x();
            }
            row.advance_y();
        }
    }

    /// Copy the `w` x `h` block at `(sx, sy)` of `source` to logical `(dx, dy)`
    ///
    /// Pixels are copied verbatim with no blending. A block that does not
    /// fit inside `source` is skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &self,
        surface: &mut PixelSurface,
        source: &PixelSurface,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
        dx: i32,
        dy: i32,
    ) -> Result<(), DrawError> {
        let bpp = surface.pixel_bytes();
        if source.pixel_bytes() != bpp {
            warn!(
                "blit: source has {} bytes per pixel, target has {}",
                source.pixel_bytes(),
                bpp
            );
            return Err(DrawError::FormatMismatch {
                expected: bpp,
                found: source.pixel_bytes(),
            });
        }

        let (dx, dy) = self.offset(dx, dy);
        let t = self.transform(surface);
        if t.outside(dx, dy)
            || t.outside(
                dx.saturating_add(w.saturating_sub(1)),
                dy.saturating_add(h.saturating_sub(1)),
            )
        {
            return Ok(());
        }

        if !span_fits(sx, w, source.width()) || !span_fits(sy, h, source.height()) {
            debug!("blit: source block {}x{} at ({}, {}) out of range", w, h, sx, sy);
            return Ok(());
        }

        let (sx, w) = (sx as usize, w as usize);
        let span = sx * bpp..(sx + w) * bpp;

        if self.rotation == Rotation::None {
            let row_bytes = surface.row_bytes();
            for j in 0..h {
                let Some(src) = source.row((sy + j) as u32).and_then(|r| r.get(span.clone())) else {
                    break;
                };
                let start = (dy + j) as usize * row_bytes + dx as usize * bpp;
                if let Some(dst) = surface.data_mut().get_mut(start..start + src.len()) {
                    dst.copy_from_slice(src);
                }
            }
            return Ok(());
        }

        let mut row = t.cursor(dx, dy);
        for j in 0..h {
            let Some(src) = source.row((sy + j) as u32).and_then(|r| r.get(span.clone())) else {
                break;
            };
            let mut px = row;
            for src_px in src.chunks_exact(bpp) {
                if let Some(dst) = surface.pixel_bytes_at_mut(px.index()) {
                    dst.copy_from_slice(src_px);
                }
                px.advance_x();
            }
            row.advance_y();
        }
        Ok(())
    }

    /// Draw `text` with its top-left at logical `(x, y)`
    ///
    /// `text` is a byte string, one glyph per byte. Bytes outside printable
    /// ASCII draw as `?`. Drawing stops at the first glyph that would not
    /// fit entirely on the surface.
    pub fn text(
        &mut self,
        surface: &mut PixelSurface,
        font: &Font,
        x: i32,
        y: i32,
        text: impl AsRef<[u8]>,
        bold: bool,
    ) {
        if self.color.a == 0 {
            return;
        }

        let bold = bold && font.has_bold();
        let (mut x, y) = self.offset(x, y);
        let t = self.transform(surface);
        let (cw, ch) = font.size();
        let fb_height = self.fb_height(surface);

        for &byte in text.as_ref() {
            if self.rainbow.is_enabled() {
                let color = self.rainbow.color_at(x, y, (cw, ch), fb_height);
                self.set_color_value(color);
            }

            if t.outside(x, y)
                || t.outside(
                    x.saturating_add(cw as i32 - 1),
                    y.saturating_add(ch as i32 - 1),
                )
            {
                break;
            }

            let glyph = AlphaPlane::glyph(font, byte, bold);
            blend_plane(surface, &t, &glyph, x, y, self.color.a, self.current);

            x = x.saturating_add(cw as i32);
        }
    }

    /// Tint-draw a one-byte-per-pixel `icon` at logical `(x, y)`
    pub fn text_icon(
        &self,
        surface: &mut PixelSurface,
        x: i32,
        y: i32,
        icon: &PixelSurface,
    ) -> Result<(), DrawError> {
        let Some(plane) = AlphaPlane::from_surface(icon) else {
            warn!(
                "text_icon: icon has {} bytes per pixel, expected 1",
                icon.pixel_bytes()
            );
            return Err(DrawError::FormatMismatch {
                expected: 1,
                found: icon.pixel_bytes(),
            });
        };

        if self.color.a == 0 {
            return Ok(());
        }

        let (x, y) = self.offset(x, y);
        let t = self.transform(surface);
        if t.outside(x, y)
            || t.outside(
                x.saturating_add(plane.width() as i32 - 1),
                y.saturating_add(plane.height() as i32 - 1),
            )
        {
            return Ok(());
        }

        blend_plane(surface, &t, &plane, x, y, self.color.a, self.current);
        Ok(())
    }

    /// Width in pixels of `text` in `font`
    pub fn measure(&self, font: &Font, text: impl AsRef<[u8]>) -> u32 {
        font.measure(text)
    }

    /// Glyph cell (width, height) of `font`
    pub fn font_size(&self, font: &Font) -> (u32, u32) {
        font.size()
    }
}

/// Whether `[start, start + len)` is a non-empty range inside `[0, limit)`
fn span_fits(start: i32, len: i32, limit: u32) -> bool {
    start >= 0
        && len > 0
        && start
            .checked_add(len)
            .is_some_and(|end| end as u32 <= limit)
}
