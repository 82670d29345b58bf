//! Palettes and nearest-color lookup.
//!
//! A palette holds up to 256 colors plus two reserved pens resolved against
//! the canvas defaults, and a transparency sentinel. Colors are kept in both
//! RGB and DIN99d form so lookups in either space avoid per-query
//! transforms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Color, ColorSpace};

/// Pen resolved to the canvas's default foreground color.
pub const PALETTE_INDEX_FG: u16 = 256;
/// Pen resolved to the canvas's default background color.
pub const PALETTE_INDEX_BG: u16 = 257;
/// Transparency sentinel.
pub const PALETTE_INDEX_TRANSPARENT: u16 = 258;

const N_ENTRIES: usize = 259;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteType {
    /// Up to 256 colors chosen from the image.
    #[default]
    Dynamic256,
    /// The xterm 256-color palette.
    Fixed256,
    /// The xterm palette without the 16 low colors.
    Fixed240,
    /// The standard 16-color palette.
    Fixed16,
    /// The low 8 colors.
    Fixed8,
    /// Only the FG and BG pens.
    FixedFgBg,
}

/// The two best matches from a nearest-color lookup. `index[0]` is the
/// primary; `index[1]` backs the 16/8 asymmetry handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCandidates {
    pub index: [u16; 2],
}

#[derive(Clone, Debug)]
pub struct Palette {
    palette_type: PaletteType,
    colors_rgb: Vec<Color>,
    colors_din99d: Vec<Color>,
    /// Lookup range; Fixed240 starts at 16 so emitted pens stay valid
    /// xterm indices.
    first_color: usize,
    n_colors: usize,
    alpha_threshold: u16,
}

/// The standard 16 xterm colors.
const BASE_16: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x80, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xc0, 0xc0, 0xc0),
    (0x80, 0x80, 0x80),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x00, 0x00, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

/// The xterm palette: 16 base colors, a 6x6x6 color cube, 24 grays.
fn xterm_256_color(index: usize) -> Color {
    match index {
        0..=15 => {
            let (r, g, b) = BASE_16[index];
            Color::new(r, g, b, 255)
        }
        16..=231 => {
            let i = index - 16;
            let cube = |c: usize| if c == 0 { 0 } else { (c * 40 + 55) as u8 };
            Color::new(cube(i / 36), cube((i / 6) % 6), cube(i % 6), 255)
        }
        _ => {
            let level = (8 + (index - 232) * 10) as u8;
            Color::new(level, level, level, 255)
        }
    }
}

impl Palette {
    pub fn new(palette_type: PaletteType) -> Self {
        let mut palette = Palette {
            palette_type,
            colors_rgb: vec![Color::default(); N_ENTRIES],
            colors_din99d: vec![Color::default(); N_ENTRIES],
            first_color: 0,
            n_colors: 0,
            alpha_threshold: 127,
        };

        match palette_type {
            PaletteType::Dynamic256 => {}
            PaletteType::Fixed256 => palette.fill_xterm(0, 256),
            PaletteType::Fixed240 => palette.fill_xterm(16, 256),
            PaletteType::Fixed16 => palette.fill_xterm(0, 16),
            PaletteType::Fixed8 => palette.fill_xterm(0, 8),
            PaletteType::FixedFgBg => {}
        }

        palette
    }

    fn fill_xterm(&mut self, first: usize, n: usize) {
        for i in 0..n {
            self.set_color(i as u16, xterm_256_color(i));
        }
        self.first_color = first;
        self.n_colors = n;
    }

    pub fn palette_type(&self) -> PaletteType {
        self.palette_type
    }

    pub fn n_colors(&self) -> usize {
        self.n_colors
    }

    pub fn alpha_threshold(&self) -> u16 {
        self.alpha_threshold
    }

    pub fn set_alpha_threshold(&mut self, threshold: u16) {
        self.alpha_threshold = threshold;
    }

    /// Explicitly sets a pen; used to install the canvas's FG/BG defaults.
    pub fn set_color(&mut self, index: u16, color: Color) {
        self.colors_rgb[index as usize] = color;
        self.colors_din99d[index as usize] = color.rgb_to_din99d();
    }

    pub fn color(&self, color_space: ColorSpace, index: u16) -> Color {
        match color_space {
            ColorSpace::Rgb => self.colors_rgb[index as usize],
            ColorSpace::Din99d => self.colors_din99d[index as usize],
        }
    }

    fn colors(&self, color_space: ColorSpace) -> &[Color] {
        match color_space {
            ColorSpace::Rgb => &self.colors_rgb,
            ColorSpace::Din99d => &self.colors_din99d,
        }
    }

    fn lookup_range(&self) -> std::ops::Range<usize> {
        match self.palette_type {
            PaletteType::FixedFgBg => PALETTE_INDEX_FG as usize..PALETTE_INDEX_BG as usize + 1,
            _ => self.first_color..self.n_colors,
        }
    }

    /// Finds the two palette entries with the smallest fast difference to
    /// `color`, primary first. Ties go to the lower index. A color below
    /// the alpha threshold maps to the transparency sentinel.
    pub fn lookup_nearest(&self, color_space: ColorSpace, color: Color) -> ColorCandidates {
        if self.alpha_threshold > 0 && (color.ch[3] as u16) < self.alpha_threshold {
            return ColorCandidates {
                index: [PALETTE_INDEX_TRANSPARENT, PALETTE_INDEX_TRANSPARENT],
            };
        }

        let colors = self.colors(color_space);
        let mut best = (i32::MAX, 0u16);
        let mut second = (i32::MAX, 0u16);

        for i in self.lookup_range() {
            let diff = Color::diff_fast(color, colors[i]);
            if diff < best.0 {
                second = best;
                best = (diff, i as u16);
            } else if diff < second.0 {
                second = (diff, i as u16);
            }
        }

        ColorCandidates {
            index: [best.1, second.1],
        }
    }

    /// Like [`lookup_nearest`](Self::lookup_nearest), but accumulates the
    /// signed per-channel quantization error into `error` for
    /// error-diffusion dithering. Transparent colors contribute no error.
    pub fn lookup_with_error(&self, color_space: ColorSpace, color: Color, error: &mut [i16; 3]) -> u16 {
        let index = self.lookup_nearest(color_space, color).index[0];

        if index != PALETTE_INDEX_TRANSPARENT {
            let chosen = self.color(color_space, index);
            for i in 0..3 {
                error[i] += color.ch[i] as i16 - chosen.ch[i] as i16;
            }
        }

        index
    }

    /// Builds a dynamic palette from image pixels by median cut: repeatedly
    /// split the box with the widest channel range, then take each box's
    /// weighted mean as its representative. At most 255 colors are
    /// produced; one pen stays reserved for transparency. Deterministic
    /// for a given input.
    pub fn generate(&mut self, pixels: &[Color], _color_space: ColorSpace) {
        debug_assert!(self.palette_type == PaletteType::Dynamic256);

        // Histogram over 5 bits per channel keeps the box working set small
        let mut histogram: BTreeMap<u16, u32> = BTreeMap::new();
        for pixel in pixels {
            if self.alpha_threshold > 0 && (pixel.ch[3] as u16) < self.alpha_threshold {
                continue;
            }
            let key = ((pixel.ch[0] as u16 >> 3) << 10) | ((pixel.ch[1] as u16 >> 3) << 5) | (pixel.ch[2] as u16 >> 3);
            *histogram.entry(key).or_insert(0) += 1;
        }

        let entries: Vec<([u8; 3], u32)> = histogram
            .into_iter()
            .map(|(key, count)| {
                let expand = |v: u16| ((v & 0x1f) << 3) as u8;
                ([expand(key >> 10), expand(key >> 5), expand(key)], count)
            })
            .collect();

        let mut boxes: Vec<Vec<([u8; 3], u32)>> = vec![entries];
        boxes.retain(|b| !b.is_empty());

        while boxes.len() < 255 {
            // Split the box with the widest channel range
            let mut widest = 0usize;
            let mut widest_range = -1i32;
            let mut widest_channel = 0usize;

            for (i, b) in boxes.iter().enumerate() {
                if b.len() < 2 {
                    continue;
                }
                for ch in 0..3 {
                    let min = b.iter().map(|e| e.0[ch]).min().unwrap();
                    let max = b.iter().map(|e| e.0[ch]).max().unwrap();
                    let range = max as i32 - min as i32;
                    if range > widest_range {
                        widest_range = range;
                        widest = i;
                        widest_channel = ch;
                    }
                }
            }

            if widest_range <= 0 {
                break;
            }

            let mut b = boxes.swap_remove(widest);
            b.sort_by_key(|e| e.0[widest_channel]);
            let half: u32 = b.iter().map(|e| e.1).sum::<u32>() / 2;

            let mut acc = 0u32;
            let mut split_at = 0usize;
            for (i, e) in b.iter().enumerate() {
                acc += e.1;
                if acc > half {
                    split_at = i;
                    break;
                }
            }
            split_at = split_at.clamp(1, b.len() - 1);

            let tail = b.split_off(split_at);
            boxes.push(b);
            boxes.push(tail);
        }

        self.n_colors = boxes.len();
        for (i, b) in boxes.iter().enumerate() {
            let total: u64 = b.iter().map(|e| e.1 as u64).sum();
            let mut mean = [0u64; 3];
            for e in b {
                for ch in 0..3 {
                    mean[ch] += e.0[ch] as u64 * e.1 as u64;
                }
            }
            let rep = Color::new(
                (mean[0] / total.max(1)) as u8,
                (mean[1] / total.max(1)) as u8,
                (mean[2] / total.max(1)) as u8,
                255,
            );
            self.set_color(i as u16, rep);
        }

        log::debug!("dynamic palette: {} colors from {} pixels", self.n_colors, pixels.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xterm_cube_and_grays() {
        // 196 is pure red in the 6x6x6 cube
        assert_eq!(xterm_256_color(196), Color::new(255, 0, 0, 255));
        // 232 is the darkest gray ramp entry
        assert_eq!(xterm_256_color(232), Color::new(8, 8, 8, 255));
        assert_eq!(xterm_256_color(255), Color::new(238, 238, 238, 255));
        // 16 is cube black
        assert_eq!(xterm_256_color(16), Color::new(0, 0, 0, 255));
    }

    #[test]
    fn nearest_finds_exact_entries() {
        let palette = Palette::new(PaletteType::Fixed256);
        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(255, 0, 0, 255));
        assert_eq!(cand.index[0], 9); // bright red sits below the cube red
        assert_ne!(cand.index[1], cand.index[0]);

        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(8, 8, 8, 255));
        assert_eq!(cand.index[0], 232);
    }

    #[test]
    fn ties_prefer_the_lower_index() {
        let mut palette = Palette::new(PaletteType::Dynamic256);
        palette.set_color(0, Color::new(10, 0, 0, 255));
        palette.set_color(1, Color::new(10, 0, 0, 255));
        palette.n_colors = 2;

        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(10, 0, 0, 255));
        assert_eq!(cand.index[0], 0);
        assert_eq!(cand.index[1], 1);
    }

    #[test]
    fn fixed_240_never_returns_low_pens() {
        let palette = Palette::new(PaletteType::Fixed240);
        // Pure VGA maroon (index 1 in the low 16) must map into the cube
        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(0x80, 0x00, 0x00, 255));
        assert!(cand.index[0] >= 16);
    }

    #[test]
    fn transparency_short_circuits() {
        let palette = Palette::new(PaletteType::Fixed16);
        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(0, 0, 0, 10));
        assert_eq!(cand.index[0], PALETTE_INDEX_TRANSPARENT);
    }

    #[test]
    fn fgbg_palette_looks_up_pens() {
        let mut palette = Palette::new(PaletteType::FixedFgBg);
        palette.set_color(PALETTE_INDEX_FG, Color::new(255, 255, 255, 255));
        palette.set_color(PALETTE_INDEX_BG, Color::new(0, 0, 0, 255));

        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(250, 250, 250, 255));
        assert_eq!(cand.index[0], PALETTE_INDEX_FG);
        let cand = palette.lookup_nearest(ColorSpace::Rgb, Color::new(5, 5, 5, 255));
        assert_eq!(cand.index[0], PALETTE_INDEX_BG);
    }

    #[test]
    fn lookup_with_error_accumulates_signed_error() {
        let mut palette = Palette::new(PaletteType::Dynamic256);
        palette.set_color(0, Color::new(0, 0, 0, 255));
        palette.set_color(1, Color::new(255, 255, 255, 255));
        palette.n_colors = 2;

        let mut error = [0i16; 3];
        let index = palette.lookup_with_error(ColorSpace::Rgb, Color::new(100, 100, 100, 255), &mut error);
        assert_eq!(index, 0);
        assert_eq!(error, [100, 100, 100]);

        let index = palette.lookup_with_error(ColorSpace::Rgb, Color::new(200, 200, 200, 255), &mut error);
        assert_eq!(index, 1);
        assert_eq!(error, [45, 45, 45]);
    }

    #[test]
    fn generate_is_deterministic_and_bounded() {
        let mut pixels = Vec::new();
        for i in 0..4096u32 {
            pixels.push(Color::new((i % 256) as u8, (i / 16) as u8, ((i * 7) % 256) as u8, 255));
        }

        let mut a = Palette::new(PaletteType::Dynamic256);
        a.generate(&pixels, ColorSpace::Rgb);
        let mut b = Palette::new(PaletteType::Dynamic256);
        b.generate(&pixels, ColorSpace::Rgb);

        assert!(a.n_colors() > 0 && a.n_colors() <= 255);
        assert_eq!(a.n_colors(), b.n_colors());
        for i in 0..a.n_colors() {
            assert_eq!(a.color(ColorSpace::Rgb, i as u16), b.color(ColorSpace::Rgb, i as u16));
        }
    }

    #[test]
    fn generate_keeps_distinct_primaries_apart() {
        let mut pixels = Vec::new();
        for _ in 0..100 {
            pixels.push(Color::new(255, 0, 0, 255));
            pixels.push(Color::new(0, 0, 255, 255));
        }

        let mut palette = Palette::new(PaletteType::Dynamic256);
        palette.generate(&pixels, ColorSpace::Rgb);
        assert_eq!(palette.n_colors(), 2);

        let red = palette.lookup_nearest(ColorSpace::Rgb, Color::new(250, 10, 10, 255));
        let blue = palette.lookup_nearest(ColorSpace::Rgb, Color::new(10, 10, 250, 255));
        assert_ne!(red.index[0], blue.index[0]);
    }
}
