//! Packed pixels and alpha blending
//!
//! Pixels are 32 bits wide with four 8-bit channels. The three color
//! channels occupy bits 0-23 in an order chosen by [`PixelOrder`]; alpha
//! always occupies bits 24-31. Blending works on channel positions, so
//! both orders produce identical results when applied consistently.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mask of the alpha channel in a packed pixel
pub const ALPHA_MASK: u32 = 0xFF00_0000;

/// Channel layout of a packed 32-bit pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PixelOrder {
    /// `A<<24 | B<<16 | G<<8 | R`, bytes in memory R, G, B, A
    #[default]
    Rgba,
    /// `A<<24 | R<<16 | G<<8 | B`, bytes in memory B, G, R, A
    Bgra,
}

impl PixelOrder {
    /// Pack a color into a 32-bit pixel
    pub const fn pack(self, color: Color) -> u32 {
        let (r, g, b, a) = (
            color.r as u32,
            color.g as u32,
            color.b as u32,
            color.a as u32,
        );
        match self {
            PixelOrder::Rgba => (a << 24) | (b << 16) | (g << 8) | r,
            PixelOrder::Bgra => (a << 24) | (r << 16) | (g << 8) | b,
        }
    }

    /// Unpack a 32-bit pixel into a color
    pub const fn unpack(self, pixel: u32) -> Color {
        let lo = (pixel & 0xFF) as u8;
        let mid = ((pixel >> 8) & 0xFF) as u8;
        let hi = ((pixel >> 16) & 0xFF) as u8;
        let a = (pixel >> 24) as u8;
        match self {
            PixelOrder::Rgba => Color::new(lo, mid, hi, a),
            PixelOrder::Bgra => Color::new(hi, mid, lo, a),
        }
    }
}

/// An RGBA draw color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// Create a color from its four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Alpha channel of a packed pixel
#[inline]
pub const fn alpha_of(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

/// Combine a per-pixel source alpha with the draw color's alpha
///
/// The color alpha only scales the source when it is below 255.
#[inline]
pub const fn effective_alpha(source: u8, color_alpha: u8) -> u8 {
    if color_alpha < 255 {
        ((source as u32 * color_alpha as u32) / 255) as u8
    } else {
        source
    }
}

/// Blend `current` over `pixel` with weight `alpha`
///
/// Each color channel is `(pix * (255 - alpha) + cur * alpha) / 255` with
/// truncating division; the output alpha is always `current`'s.
#[inline]
pub const fn blend(alpha: u8, pixel: u32, current: u32) -> u32 {
    if alpha == 255 {
        return current;
    }
    if alpha == 0 {
        return pixel;
    }

    let a = alpha as u32;
    let inv = 255 - a;
    let mut out = current & ALPHA_MASK;
    let mut shift = 0;
    while shift < 24 {
        let pix_c = (pixel >> shift) & 0xFF;
        let cur_c = (current >> shift) & 0xFF;
        let out_c = (pix_c * inv + cur_c * a) / 255;
        out |= (out_c & 0xFF) << shift;
        shift += 8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_orders() {
        let color = Color::new(10, 20, 30, 40);
        assert_eq!(PixelOrder::Rgba.pack(color), 0x281E_140A);
        assert_eq!(PixelOrder::Bgra.pack(color), 0x280A_141E);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let color = Color::new(1, 2, 3, 4);
        for order in [PixelOrder::Rgba, PixelOrder::Bgra] {
            assert_eq!(order.unpack(order.pack(color)), color);
        }
    }

    #[test]
    fn test_effective_alpha() {
        assert_eq!(effective_alpha(200, 255), 200);
        assert_eq!(effective_alpha(255, 128), 128);
        assert_eq!(effective_alpha(100, 128), 50);
        assert_eq!(effective_alpha(255, 0), 0);
    }

    #[test]
    fn test_blend_midpoint_truncates() {
        // (0 * 127 + 255 * 128) / 255 = 128, (255 * 127 + 0) / 255 = 127
        let out = blend(128, 0x0000_00FF, 0xFF00_FF00);
        assert_eq!(out, 0xFF00_807F);
    }

    #[test]
    fn test_blend_takes_current_alpha() {
        let out = blend(10, 0xAA12_3456, 0x3300_0000);
        assert_eq!(alpha_of(out), 0x33);
    }

    #[test]
    fn test_blend_same_for_both_orders() {
        let fg = Color::new(200, 100, 50, 255);
        let bg = Color::new(10, 20, 30, 255);
        for alpha in [1u8, 64, 128, 254] {
            let rgba = PixelOrder::Rgba;
            let bgra = PixelOrder::Bgra;
            let a = rgba.unpack(blend(alpha, rgba.pack(bg), rgba.pack(fg)));
            let b = bgra.unpack(blend(alpha, bgra.pack(bg), bgra.pack(fg)));
            assert_eq!(a, b);
        }
    }

    proptest! {
        #[test]
        fn prop_blend_zero_is_identity(pix in any::<u32>(), cur in any::<u32>()) {
            prop_assert_eq!(blend(0, pix, cur), pix);
        }

        #[test]
        fn prop_blend_full_is_absorbing(pix in any::<u32>(), cur in any::<u32>()) {
            prop_assert_eq!(blend(255, pix, cur), cur);
        }

        #[test]
        fn prop_blend_channels_stay_between_inputs(
            alpha in 1u8..255,
            pix in any::<u32>(),
            cur in any::<u32>(),
        ) {
            let out = blend(alpha, pix, cur);
            for shift in [0, 8, 16] {
                let p = (pix >> shift) & 0xFF;
                let c = (cur >> shift) & 0xFF;
                let o = (out >> shift) & 0xFF;
                prop_assert!(o >= p.min(c) && o <= p.max(c));
            }
            prop_assert_eq!(out & ALPHA_MASK, cur & ALPHA_MASK);
        }

        #[test]
        fn prop_effective_alpha_never_exceeds_source(a in any::<u8>(), ca in any::<u8>()) {
            prop_assert!(effective_alpha(a, ca) <= a);
        }
    }
}
