//! Source image preparation: scale to the internal pixel grid, snap alpha,
//! optionally boost saturation, dither, and transform the color space.
//!
//! The scaler itself is the `image` crate, used as a black box. Everything
//! downstream of it operates on the flat `Color` buffer the renderer
//! reads.

use image::DynamicImage;

use crate::{batch, Color, ColorSpace, Dither, DitherMode, Palette, PALETTE_INDEX_TRANSPARENT};

/// Hook fired once per destination row after that row has been prepared.
/// Mirrors the scaling library's post-row callback.
pub(crate) type RowHook<'a> = &'a (dyn Fn(usize, usize) + Sync);

pub(crate) struct PixelPrep<'a> {
    pub fg_palette: &'a Palette,
    pub dither: &'a Dither,
    pub color_space: ColorSpace,
    /// Saturation boost for coarse palettes; keyed off the config's
    /// preprocessing flag.
    pub preprocessing: bool,
    pub alpha_threshold: u16,
}

/// Scales `src` into a `dest_width x dest_height` buffer and applies the
/// preprocessing chain. Returns the pixel buffer and whether any pixel
/// ended up transparent.
pub(crate) fn prepare_pixels(
    prep: &PixelPrep<'_>,
    src: &DynamicImage,
    dest_width: usize,
    dest_height: usize,
    row_hook: Option<RowHook<'_>>,
) -> (Vec<Color>, bool) {
    let scaled = src
        .resize_exact(dest_width as u32, dest_height as u32, image::imageops::FilterType::Triangle)
        .to_rgba8();

    let mut pixels = vec![Color::default(); dest_width * dest_height];
    let raw = scaled.as_raw();

    batch::process_row_batches(&mut pixels, dest_width, |first_row, chunk| {
        for (i, pixel) in chunk.iter_mut().enumerate() {
            let row = first_row + i / dest_width;
            let col = i % dest_width;
            let o = (row * dest_width + col) * 4;

            let mut color = Color::new(raw[o], raw[o + 1], raw[o + 2], raw[o + 3]).threshold_alpha(prep.alpha_threshold);

            if prep.preprocessing {
                color = boost_saturation(color);
            }
            if prep.dither.mode() == DitherMode::Ordered {
                color = prep.dither.apply_ordered(color, col, row);
            }
            if prep.color_space == ColorSpace::Din99d {
                color = color.rgb_to_din99d();
            }

            *pixel = color;

            if let Some(hook) = row_hook {
                if col == dest_width - 1 {
                    hook(row, dest_width);
                }
            }
        }
    });

    if prep.dither.mode() == DitherMode::Diffusion {
        diffuse_pass(&mut pixels, dest_width, dest_height, prep);
    }

    let have_alpha = pixels.iter().any(|p| p.ch[3] == 0);
    (pixels, have_alpha)
}

/// Pulls channels away from gray. Coarse palettes lose saturation badly in
/// the nearest-color step; this recovers some of it up front.
fn boost_saturation(color: Color) -> Color {
    let gray = (color.ch[0] as i32 + color.ch[1] as i32 + color.ch[2] as i32) / 3;

    let mut out = color;
    for i in 0..3 {
        out.ch[i] = (gray + (color.ch[i] as i32 - gray) * 3 / 2).clamp(0, 255) as u8;
    }
    out
}

/// Floyd-Steinberg error diffusion against the target palette. Serpentine:
/// even rows scan left to right, odd rows right to left. Single-threaded
/// by nature. The error accumulator is zeroed at transparent pixels so
/// color never leaks across alpha boundaries.
fn diffuse_pass(pixels: &mut [Color], width: usize, height: usize, prep: &PixelPrep<'_>) {
    // Fixed-point error rows, scaled by 16 (the kernel denominator)
    let mut cur_err = vec![[0i32; 3]; width];
    let mut next_err = vec![[0i32; 3]; width];
    let intensity = prep.dither.intensity();

    for y in 0..height {
        next_err.iter_mut().for_each(|e| *e = [0; 3]);

        let forward = y % 2 == 0;
        for step in 0..width {
            let x = if forward { step } else { width - 1 - step };
            let i = y * width + x;

            if pixels[i].ch[3] == 0 {
                cur_err[x] = [0; 3];
                continue;
            }

            let mut color = pixels[i];
            for c in 0..3 {
                color.ch[c] = (color.ch[c] as i32 + cur_err[x][c] / 16).clamp(0, 255) as u8;
            }

            let mut quant_err = [0i16; 3];
            let index = prep.fg_palette.lookup_with_error(prep.color_space, color, &mut quant_err);
            if index == PALETTE_INDEX_TRANSPARENT {
                cur_err[x] = [0; 3];
                continue;
            }

            let mut quantized = prep.fg_palette.color(prep.color_space, index);
            quantized.ch[3] = pixels[i].ch[3];
            pixels[i] = quantized;

            // Standard 7/1/5/3 kernel, scaled by the configured intensity
            let err: [i32; 3] = std::array::from_fn(|c| (quant_err[c] as f32 * intensity) as i32);
            let ahead = if forward { x.checked_add(1).filter(|&nx| nx < width) } else { x.checked_sub(1) };
            let behind = if forward { x.checked_sub(1) } else { x.checked_add(1).filter(|&nx| nx < width) };

            for c in 0..3 {
                if let Some(nx) = ahead {
                    cur_err[nx][c] += err[c] * 7;
                    next_err[nx][c] += err[c];
                }
                if let Some(nx) = behind {
                    next_err[nx][c] += err[c] * 3;
                }
                next_err[x][c] += err[c] * 5;
            }
        }

        std::mem::swap(&mut cur_err, &mut next_err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaletteType;

    fn plain_prep<'a>(palette: &'a Palette, dither: &'a Dither) -> PixelPrep<'a> {
        PixelPrep {
            fg_palette: palette,
            dither,
            color_space: ColorSpace::Rgb,
            preprocessing: false,
            alpha_threshold: 127,
        }
    }

    fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
    }

    #[test]
    fn scaling_preserves_solid_colors() {
        let palette = Palette::new(PaletteType::Fixed16);
        let dither = Dither::new(DitherMode::None, 0.0, 4, 4);
        let prep = plain_prep(&palette, &dither);

        let (pixels, have_alpha) = prepare_pixels(&prep, &solid_image(100, 60, [200, 30, 30, 255]), 16, 8, None);
        assert_eq!(pixels.len(), 16 * 8);
        assert!(!have_alpha);
        for p in &pixels {
            assert_eq!(*p, Color::new(200, 30, 30, 255));
        }
    }

    #[test]
    fn alpha_is_thresholded_and_reported() {
        let palette = Palette::new(PaletteType::Fixed16);
        let dither = Dither::new(DitherMode::None, 0.0, 4, 4);
        let prep = plain_prep(&palette, &dither);

        let (pixels, have_alpha) = prepare_pixels(&prep, &solid_image(8, 8, [10, 10, 10, 50]), 8, 8, None);
        assert!(have_alpha);
        assert!(pixels.iter().all(|p| p.ch[3] == 0));
    }

    #[test]
    fn row_hook_fires_once_per_row() {
        use std::sync::atomic::{AtomicU64, Ordering};

        let palette = Palette::new(PaletteType::Fixed16);
        let dither = Dither::new(DitherMode::None, 0.0, 4, 4);
        let prep = plain_prep(&palette, &dither);

        let rows_seen = AtomicU64::new(0);
        let hook = |row: usize, _width: usize| {
            rows_seen.fetch_or(1 << row, Ordering::Relaxed);
        };
        prepare_pixels(&prep, &solid_image(8, 8, [0, 0, 0, 255]), 8, 6, Some(&hook));
        assert_eq!(rows_seen.load(Ordering::Relaxed), 0b11_1111);
    }

    #[test]
    fn diffusion_propagates_error_to_the_next_row() {
        // 2x2 gradient quantized to black/white: mid-gray pixels leave
        // nonzero error for the second row, flipping at least one of them
        // relative to naive rounding
        let mut palette = Palette::new(PaletteType::Dynamic256);
        palette.generate(
            &[Color::new(0, 0, 0, 255), Color::new(255, 255, 255, 255)],
            ColorSpace::Rgb,
        );

        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([96, 96, 96, 255]));
        img.put_pixel(1, 0, image::Rgba([160, 160, 160, 255]));
        img.put_pixel(0, 1, image::Rgba([96, 96, 96, 255]));
        img.put_pixel(1, 1, image::Rgba([160, 160, 160, 255]));

        let dither = Dither::new(DitherMode::Diffusion, 1.0, 4, 4);
        let prep = PixelPrep {
            fg_palette: &palette,
            dither: &dither,
            color_space: ColorSpace::Rgb,
            preprocessing: false,
            alpha_threshold: 127,
        };

        let (pixels, _) = prepare_pixels(&prep, &DynamicImage::ImageRgba8(img), 2, 2, None);

        // Every output pixel is a palette color
        for p in &pixels {
            assert!(p.ch[0] == p.ch[1] && p.ch[1] == p.ch[2]);
            assert!(p.ch[0] < 10 || p.ch[0] > 245);
        }
        // Without diffusion all four would round the same way per column;
        // the propagated error must flip at least one pixel
        let n_light = pixels.iter().filter(|p| p.ch[0] > 245).count();
        assert!(n_light > 0 && n_light < 4, "diffusion had no effect: {n_light} light pixels");
    }

    #[test]
    fn diffusion_resets_error_at_transparent_pixels() {
        let mut palette = Palette::new(PaletteType::Dynamic256);
        palette.generate(
            &[Color::new(0, 0, 0, 255), Color::new(255, 255, 255, 255)],
            ColorSpace::Rgb,
        );

        // Left pixel mid-gray (big error), right pixel transparent: the
        // transparent pixel must stay untouched
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([96, 96, 96, 255]));
        img.put_pixel(1, 0, image::Rgba([96, 96, 96, 0]));

        let dither = Dither::new(DitherMode::Diffusion, 1.0, 4, 4);
        let prep = PixelPrep {
            fg_palette: &palette,
            dither: &dither,
            color_space: ColorSpace::Rgb,
            preprocessing: false,
            alpha_threshold: 127,
        };

        let (pixels, have_alpha) = prepare_pixels(&prep, &DynamicImage::ImageRgba8(img), 2, 1, None);
        assert!(have_alpha);
        assert_eq!(pixels[1].ch[3], 0);
        assert_eq!(pixels[1].ch[0], 96);
    }

    #[test]
    fn saturation_boost_pushes_away_from_gray() {
        let palette = Palette::new(PaletteType::Fixed16);
        let dither = Dither::new(DitherMode::None, 0.0, 4, 4);
        let prep = PixelPrep {
            fg_palette: &palette,
            dither: &dither,
            color_space: ColorSpace::Rgb,
            preprocessing: true,
            alpha_threshold: 127,
        };

        let (pixels, _) = prepare_pixels(&prep, &solid_image(4, 4, [150, 100, 100, 255]), 4, 4, None);
        // Red channel moves up, green/blue move down
        assert!(pixels[0].ch[0] > 150);
        assert!(pixels[0].ch[1] < 100);
    }
}
