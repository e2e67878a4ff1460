//! Rainbow text mode
//!
//! When enabled, each glyph is drawn in a palette color chosen from its
//! position, producing diagonal color bands that can be scrolled with
//! [`Rainbow::shift`].

use scanout_core::Color;

/// Band colors, in order
pub const PALETTE: [Color; 6] = [
    Color::opaque(255, 0, 0),
    Color::opaque(255, 127, 0),
    Color::opaque(255, 255, 0),
    Color::opaque(0, 255, 0),
    Color::opaque(60, 80, 255),
    Color::opaque(143, 0, 255),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rainbow {
    enabled: bool,
    index: i32,
}

impl Rainbow {
    pub const fn new() -> Self {
        Self {
            enabled: false,
            index: 0,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current palette offset
    pub const fn index(&self) -> i32 {
        self.index
    }

    /// Scroll the bands by `delta` palette entries
    ///
    /// Stepping off either end jumps to the opposite end rather than
    /// wrapping modulo the palette length.
    pub fn shift(&mut self, delta: i32) {
        self.index = self.index.saturating_add(delta);
        if self.index < 0 {
            self.index = PALETTE.len() as i32 - 1;
        } else if self.index >= PALETTE.len() as i32 {
            self.index = 0;
        }
    }

    /// Color of the glyph cell at logical `(x, y)`
    ///
    /// `fb_height` is the usable logical height; bands run from the bottom
    /// left towards the top right.
    ///
    /// Any coordinate is accepted; the band is computed in 64 bits so
    /// off-surface positions cannot overflow.
    pub fn color_at(&self, x: i32, y: i32, cell: (u32, u32), fb_height: i32) -> Color {
        let (cw, ch) = (i64::from(cell.0.max(1)), i64::from(cell.1.max(1)));
        let band = i64::from(self.index)
            + i64::from(x) / cw
            + (i64::from(fb_height) - i64::from(y)) / (ch * 3);
        PALETTE[band.rem_euclid(PALETTE.len() as i64) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let rainbow = Rainbow::default();
        assert!(!rainbow.is_enabled());
        assert_eq!(rainbow.index(), 0);
    }

    #[test]
    fn test_shift_jumps_to_opposite_end() {
        let mut rainbow = Rainbow::default();
        rainbow.shift(-1);
        assert_eq!(rainbow.index(), 5);
        rainbow.shift(1);
        assert_eq!(rainbow.index(), 0);
        rainbow.shift(3);
        assert_eq!(rainbow.index(), 3);
        rainbow.shift(7);
        assert_eq!(rainbow.index(), 0);
    }

    #[test]
    fn test_adjacent_cells_step_through_palette() {
        let rainbow = Rainbow::default();
        // Bottom row of a 100px tall screen with 10x18 cells
        let first = rainbow.color_at(0, 100, (10, 18), 100);
        let second = rainbow.color_at(10, 100, (10, 18), 100);
        assert_eq!(first, PALETTE[0]);
        assert_eq!(second, PALETTE[1]);
    }

    #[test]
    fn test_rows_shift_every_three_cells() {
        let rainbow = Rainbow::default();
        assert_eq!(rainbow.color_at(0, 100 - 53, (10, 18), 100), PALETTE[0]);
        assert_eq!(rainbow.color_at(0, 100 - 54, (10, 18), 100), PALETTE[1]);
    }

    #[test]
    fn test_extreme_coordinates() {
        let mut rainbow = Rainbow::default();
        rainbow.shift(5);
        for (x, y, fb_height) in [
            (0, i32::MIN, i32::MAX),
            (i32::MIN, i32::MAX, i32::MIN),
            (i32::MAX, i32::MIN, 0),
        ] {
            let color = rainbow.color_at(x, y, (u32::MAX, u32::MAX), fb_height);
            assert!(PALETTE.contains(&color));
        }
    }

    #[test]
    fn test_band_index_never_negative() {
        let rainbow = Rainbow::default();
        // Below the usable area the vertical term goes negative
        let color = rainbow.color_at(0, 400, (10, 18), 100);
        assert!(PALETTE.contains(&color));
    }
}
