//! Dithering. The ordered mode perturbs each pixel by a tiled Bayer
//! threshold; error diffusion lives in the pixel preparation pass, which
//! owns the scan order and the palette quantization it needs.

use serde::{Deserialize, Serialize};

use crate::{CanvasMode, Color};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DitherMode {
    #[default]
    None,
    /// Tiled Bayer pattern.
    Ordered,
    /// Floyd-Steinberg error diffusion.
    Diffusion,
}

/// Bayer 4x4 threshold matrix, values 0..16.
const BAYER_4X4: [i32; 16] = [0, 8, 2, 10, 12, 4, 14, 6, 3, 11, 1, 9, 15, 7, 13, 5];

/// Base intensity per canvas mode; coarser palettes get stronger
/// perturbation.
pub(crate) fn base_intensity_for_mode(mode: CanvasMode) -> f32 {
    match mode {
        CanvasMode::FgBg | CanvasMode::FgBgBgFg => 1.0,
        CanvasMode::Indexed8 => 0.5,
        CanvasMode::Indexed16 | CanvasMode::Indexed16_8 => 0.25,
        CanvasMode::Truecolor | CanvasMode::Indexed256 | CanvasMode::Indexed240 => 0.1,
    }
}

#[derive(Clone, Debug)]
pub struct Dither {
    mode: DitherMode,
    intensity: f32,
    grain_width: u32,
    grain_height: u32,
}

impl Dither {
    pub fn new(mode: DitherMode, intensity: f32, grain_width: u32, grain_height: u32) -> Self {
        Dither {
            mode,
            intensity,
            grain_width: grain_width.max(1),
            grain_height: grain_height.max(1),
        }
    }

    pub fn mode(&self) -> DitherMode {
        self.mode
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// The signed perturbation for pixel (x, y). Grain repeats each Bayer
    /// entry over `grain_width x grain_height` pixel tiles.
    fn ordered_offset(&self, x: usize, y: usize) -> i32 {
        let bx = (x as u32 / self.grain_width) % 4;
        let by = (y as u32 / self.grain_height) % 4;
        let threshold = BAYER_4X4[(by * 4 + bx) as usize];

        // Center the pattern around zero: -7.5 .. 7.5, scaled to roughly
        // one palette step at full intensity
        ((threshold as f32 - 7.5) * self.intensity * 16.0) as i32
    }

    /// Applies the ordered pattern to one pixel. Alpha is untouched.
    pub fn apply_ordered(&self, color: Color, x: usize, y: usize) -> Color {
        if self.intensity <= 0.0 {
            return color;
        }
        let offset = self.ordered_offset(x, y);

        let mut out = color;
        for i in 0..3 {
            out.ch[i] = (color.ch[i] as i32 + offset).clamp(0, 255) as u8;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_intensity_is_identity() {
        let dither = Dither::new(DitherMode::Ordered, 0.0, 4, 4);
        let color = Color::new(100, 150, 200, 255);
        assert_eq!(dither.apply_ordered(color, 3, 5), color);
    }

    #[test]
    fn pattern_varies_within_a_tile() {
        let dither = Dither::new(DitherMode::Ordered, 1.0, 1, 1);
        let color = Color::new(128, 128, 128, 255);

        let offsets: Vec<i32> = (0..16)
            .map(|i| dither.apply_ordered(color, i % 4, i / 4).ch[0] as i32 - 128)
            .collect();

        // All 16 Bayer slots must give distinct offsets
        let mut unique = offsets.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 16);

        // Centered: offsets must straddle zero
        assert!(offsets.iter().any(|&o| o > 0));
        assert!(offsets.iter().any(|&o| o < 0));
    }

    #[test]
    fn grain_replicates_the_pattern() {
        let dither = Dither::new(DitherMode::Ordered, 1.0, 2, 2);
        let color = Color::new(128, 128, 128, 255);

        // A 2x2 grain means the same Bayer entry covers 2x2 pixels
        for (x, y) in [(0usize, 0usize), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(dither.apply_ordered(color, x, y), dither.apply_ordered(color, 0, 0));
        }
        assert_ne!(dither.apply_ordered(color, 2, 0), dither.apply_ordered(color, 0, 0));
    }

    #[test]
    fn offsets_clamp_at_range_edges() {
        let dither = Dither::new(DitherMode::Ordered, 1.0, 1, 1);
        let black = Color::new(0, 0, 0, 255);
        let white = Color::new(255, 255, 255, 255);
        for x in 0..4 {
            for y in 0..4 {
                let b = dither.apply_ordered(black, x, y);
                let w = dither.apply_ordered(white, x, y);
                assert!(b.ch[0] <= 255 && w.ch[0] >= b.ch[0]);
                assert_eq!(b.ch[3], 255);
            }
        }
    }

    #[test]
    fn base_intensities_follow_palette_coarseness() {
        assert_eq!(base_intensity_for_mode(CanvasMode::FgBg), 1.0);
        assert!(base_intensity_for_mode(CanvasMode::Indexed8) > base_intensity_for_mode(CanvasMode::Indexed16));
        assert!(base_intensity_for_mode(CanvasMode::Indexed16) > base_intensity_for_mode(CanvasMode::Indexed256));
    }
}
