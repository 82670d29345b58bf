//! Color primitives shared by every stage of the pipeline.
//!
//! A [`Color`] is four 8-bit channels. Depending on the canvas color space
//! the channels hold either RGBA or a DIN99d triple requantized to the same
//! 0..255 range (see [`Color::rgb_to_din99d`]), so the fast difference
//! metric works unchanged in both spaces.

use serde::{Deserialize, Serialize};

/// Index of the background pen in a [`ColorPair`] and in coverage maps.
pub const PEN_BG: usize = 0;
/// Index of the foreground pen in a [`ColorPair`] and in coverage maps.
pub const PEN_FG: usize = 1;

/// An 8-bit-per-channel color. `ch[0..3]` are R, G, B (or DIN99d L, a, b),
/// `ch[3]` is opacity: 0 transparent, 255 opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub ch: [u8; 4],
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { ch: [r, g, b, a] }
    }

    /// Packed form is `0xAARRGGBB`; all callers go through pack/unpack so
    /// the layout is defined in exactly one place.
    pub fn pack(self) -> u32 {
        ((self.ch[3] as u32) << 24) | ((self.ch[0] as u32) << 16) | ((self.ch[1] as u32) << 8) | self.ch[2] as u32
    }

    pub fn unpack(packed: u32) -> Self {
        Color {
            ch: [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8, (packed >> 24) as u8],
        }
    }

    /// Squared-distance color difference over R, G, B. Alpha is ignored.
    /// This is the hot-loop metric; keep it branch-free.
    #[inline(always)]
    pub fn diff_fast(a: Color, b: Color) -> i32 {
        let dr = a.ch[0] as i32 - b.ch[0] as i32;
        let dg = a.ch[1] as i32 - b.ch[1] as i32;
        let db = a.ch[2] as i32 - b.ch[2] as i32;
        dr * dr + dg * dg + db * db
    }

    /// Per-channel unweighted average, used when merging the two halves of
    /// a wide cell.
    pub fn average_2(a: Color, b: Color) -> Color {
        let mut out = Color::default();
        for i in 0..4 {
            out.ch[i] = ((a.ch[i] as u16 + b.ch[i] as u16) / 2) as u8;
        }
        out
    }

    /// Snap alpha to fully transparent or fully opaque around `threshold`.
    pub fn threshold_alpha(mut self, threshold: u16) -> Color {
        self.ch[3] = if (self.ch[3] as u16) < threshold { 0 } else { 255 };
        self
    }

    /// Transform an RGB color into DIN99d, requantized into the u8
    /// channels: L99d scaled to 0..255, a99d/b99d biased around 128.
    /// Alpha passes through.
    pub fn rgb_to_din99d(self) -> Color {
        let r = srgb_to_linear(self.ch[0]);
        let g = srgb_to_linear(self.ch[1]);
        let b = srgb_to_linear(self.ch[2]);

        // sRGB D65 primaries
        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        // DIN99d shifts X before the Lab step to improve blue uniformity
        let x = 1.12 * x - 0.12 * z;

        const XN: f32 = 1.12 * 0.95047 - 0.12 * 1.08883;
        const YN: f32 = 1.0;
        const ZN: f32 = 1.08883;

        let fx = lab_f(x / XN);
        let fy = lab_f(y / YN);
        let fz = lab_f(z / ZN);

        let l = 116.0 * fy - 16.0;
        let a = 500.0 * (fx - fy);
        let b = 200.0 * (fy - fz);

        const H_ROT: f32 = 50.0 * std::f32::consts::PI / 180.0;
        let (sin_r, cos_r) = H_ROT.sin_cos();

        let e = a * cos_r + b * sin_r;
        let f = 1.14 * (b * cos_r - a * sin_r);
        let gq = (e * e + f * f).sqrt();

        let l99 = 325.22 * (1.0 + 0.0036 * l).ln();
        let c99 = 22.5 * (1.0 + 0.06 * gq).ln();
        let h99 = f.atan2(e) + H_ROT;

        let a99 = c99 * h99.cos();
        let b99 = c99 * h99.sin();

        Color {
            ch: [
                (l99 * 2.55).clamp(0.0, 255.0) as u8,
                (a99 * 2.55 + 128.0).clamp(0.0, 255.0) as u8,
                (b99 * 2.55 + 128.0).clamp(0.0, 255.0) as u8,
                self.ch[3],
            ],
        }
    }
}

fn srgb_to_linear(ch: u8) -> f32 {
    let c = ch as f32 / 255.0;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// The space colors are compared in. DIN99d better approximates perceptual
/// distance and is worth the one-time transform in indexed modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    Rgb,
    Din99d,
}

/// A foreground/background color pair. Indexable by coverage value so the
/// inner loops can write `pair.colors[cov as usize]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorPair {
    pub colors: [Color; 2],
}

impl ColorPair {
    pub fn new(fg: Color, bg: Color) -> Self {
        let mut pair = ColorPair::default();
        pair.colors[PEN_FG] = fg;
        pair.colors[PEN_BG] = bg;
        pair
    }

    pub fn fg(&self) -> Color {
        self.colors[PEN_FG]
    }

    pub fn bg(&self) -> Color {
        self.colors[PEN_BG]
    }
}

/// Accumulator for per-cell means. 16-bit lanes suffice: a cell sums at
/// most 64 samples of 255, and 64 * 255 < 2^15.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorAccum {
    pub ch: [i16; 4],
}

impl ColorAccum {
    #[inline(always)]
    pub fn add(&mut self, color: &Color) {
        for i in 0..4 {
            self.ch[i] += color.ch[i] as i16;
        }
    }

    pub fn div_scalar(&mut self, divisor: i16) {
        for i in 0..4 {
            self.ch[i] /= divisor;
        }
    }

    pub fn to_color(self) -> Color {
        Color {
            ch: [self.ch[0] as u8, self.ch[1] as u8, self.ch[2] as u8, self.ch[3] as u8],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        let col = Color::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(col.pack(), 0x7812_3456);
        assert_eq!(Color::unpack(col.pack()), col);
    }

    #[test]
    fn diff_fast_ignores_alpha() {
        let a = Color::new(10, 20, 30, 0);
        let b = Color::new(13, 24, 30, 255);
        assert_eq!(Color::diff_fast(a, b), 9 + 16);
    }

    #[test]
    fn alpha_threshold_snaps() {
        let col = Color::new(1, 2, 3, 127);
        assert_eq!(col.threshold_alpha(128).ch[3], 0);
        assert_eq!(col.threshold_alpha(127).ch[3], 255);
        assert_eq!(col.threshold_alpha(0).ch[3], 255);
    }

    #[test]
    fn accum_covers_full_cell_without_overflow() {
        let mut accum = ColorAccum::default();
        let white = Color::new(255, 255, 255, 255);
        for _ in 0..64 {
            accum.add(&white);
        }
        accum.div_scalar(64);
        assert_eq!(accum.to_color(), white);
    }

    #[test]
    fn din99d_preserves_gray_axis_ordering() {
        let dark = Color::new(10, 10, 10, 255).rgb_to_din99d();
        let mid = Color::new(128, 128, 128, 255).rgb_to_din99d();
        let light = Color::new(250, 250, 250, 255).rgb_to_din99d();
        assert!(dark.ch[0] < mid.ch[0]);
        assert!(mid.ch[0] < light.ch[0]);
        // neutral colors stay near the a/b center
        assert!((mid.ch[1] as i32 - 128).abs() < 8);
        assert!((mid.ch[2] as i32 - 128).abs() < 8);
    }

    #[test]
    fn din99d_separates_hues() {
        let red = Color::new(255, 0, 0, 255).rgb_to_din99d();
        let green = Color::new(0, 255, 0, 255).rgb_to_din99d();
        assert!(Color::diff_fast(red, green) > 1000);
    }
}
