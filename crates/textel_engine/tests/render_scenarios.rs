//! End-to-end rendering checks: image in, cells and control sequences out.

use image::{DynamicImage, Rgba, RgbaImage};
use textel_engine::{Canvas, CanvasConfig, CanvasMode, SymbolMap};

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(rgba)))
}

fn config(mode: CanvasMode, width: i32, height: i32, selectors: &str) -> CanvasConfig {
    CanvasConfig {
        width,
        height,
        canvas_mode: mode,
        symbol_map: SymbolMap::from_selectors(selectors).unwrap(),
        fill_symbol_map: SymbolMap::new(),
        ..CanvasConfig::default()
    }
}

#[test]
fn single_red_pixel_becomes_a_red_background() {
    let mut canvas = Canvas::new(&config(CanvasMode::Truecolor, 1, 1, "space,solid")).unwrap();
    canvas.draw_all_pixels(&solid_image(1, 1, [0xff, 0x00, 0x00, 0xff])).unwrap();

    assert_eq!(canvas.char_at(0, 0), ' ');
    let (fg, bg) = canvas.colors_at(0, 0);
    assert_eq!(bg, 0x00ff0000);
    // fg is don't-care, but it must be opaque and therefore present
    assert_ne!(fg, -1);

    let out = canvas.print(None);
    assert!(out.starts_with("\x1b[0m"), "must begin with a reset: {out:?}");
    assert!(out.contains("48;2;255;0;0"), "must set the bg to red: {out:?}");
    assert_eq!(out.matches(' ').count(), 1);
    assert!(out.ends_with("\x1b[0m"));
    assert!(!out.contains('\n'));
}

#[test]
fn fgbg_all_zero_pixels_print_bare_spaces() {
    let mut canvas = Canvas::new(&config(CanvasMode::FgBg, 2, 1, "space")).unwrap();
    canvas.draw_all_pixels(&solid_image(2, 1, [0, 0, 0, 0])).unwrap();

    assert_eq!(canvas.char_at(0, 0), ' ');
    assert_eq!(canvas.char_at(1, 0), ' ');
    assert!(canvas.have_alpha());
    assert_eq!(canvas.print(None), "  ");
}

/// An image shaped like the CJK "one" glyph: the wide symbol must beat any
/// pair of narrow picks.
#[test]
fn wide_symbol_wins_when_it_fits() {
    let mut img = RgbaImage::from_pixel(16, 8, Rgba([0, 0, 0, 255]));
    for y in 3..5 {
        for x in 0..16 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }

    let mut canvas = Canvas::new(&config(CanvasMode::Truecolor, 2, 1, "space,solid,u4e00")).unwrap();
    canvas.draw_all_pixels(&DynamicImage::ImageRgba8(img)).unwrap();

    assert_eq!(canvas.char_at(0, 0), '\u{4e00}');
    assert_eq!(canvas.char_at(1, 0), '\0');
    // Both halves carry the same colors
    assert_eq!(canvas.raw_colors_at(0, 0), canvas.raw_colors_at(1, 0));
}

/// Wide promotion requires a strict improvement; on a uniform image the
/// narrow picks tie and must stay.
#[test]
fn wide_promotion_requires_strict_improvement() {
    let mut canvas = Canvas::new(&config(CanvasMode::Truecolor, 2, 1, "space,solid,u4e00")).unwrap();
    canvas.draw_all_pixels(&solid_image(16, 8, [0, 0, 0, 255])).unwrap();

    assert_ne!(canvas.char_at(0, 0), '\u{4e00}');
    assert_ne!(canvas.char_at(1, 0), '\0');
}

/// 16/8 asymmetry: when both extracted colors land on the same bright FG
/// pen, the cell is promoted to the solid character with the BG remapped
/// through the 8-color palette.
#[test]
fn indexed_16_8_promotes_bright_collisions_to_solid() {
    let mut canvas = Canvas::new(&config(CanvasMode::Indexed16_8, 1, 1, "space,solid")).unwrap();
    canvas.draw_all_pixels(&solid_image(8, 8, [0xff, 0x00, 0x00, 0xff])).unwrap();

    assert_eq!(canvas.char_at(0, 0), '\u{2588}');
    let (fg, bg) = canvas.raw_colors_at(0, 0);
    assert_eq!(fg, 9); // bright red in the 16-color palette
    assert_eq!(bg, 1); // maroon, the nearest 8-color pen
}

/// Without a solid char, both pens collapse to the 8-color match.
#[test]
fn indexed_16_8_collapses_without_a_solid_char() {
    let mut cfg = config(CanvasMode::Indexed16_8, 1, 1, "space");
    cfg.work_factor = 0.9; // exhaustive path; the single symbol still wins
    let mut canvas = Canvas::new(&cfg).unwrap();
    canvas.draw_all_pixels(&solid_image(8, 8, [0xff, 0x00, 0x00, 0xff])).unwrap();

    let (fg, bg) = canvas.raw_colors_at(0, 0);
    assert_eq!(fg, bg);
    assert!(fg < 8);
}

#[test]
fn output_is_deterministic() {
    let mut img = RgbaImage::new(64, 32);
    for y in 0..32 {
        for x in 0..64 {
            img.put_pixel(x, y, Rgba([(x * 4) as u8, (y * 8) as u8, ((x + y) * 2) as u8, 255]));
        }
    }
    let img = DynamicImage::ImageRgba8(img);

    let cfg = config(CanvasMode::Indexed256, 8, 4, "all");
    let mut canvas_a = Canvas::new(&cfg).unwrap();
    canvas_a.draw_all_pixels(&img).unwrap();
    let first = canvas_a.print(None);
    let second = canvas_a.print(None);
    assert_eq!(first, second);

    let mut canvas_b = Canvas::new(&cfg).unwrap();
    canvas_b.draw_all_pixels(&img).unwrap();
    assert_eq!(first, canvas_b.print(None));
}

#[test]
fn new_like_canvas_renders_identically() {
    let cfg = config(CanvasMode::Indexed16, 2, 2, "block,space,solid");
    let mut canvas = Canvas::new(&cfg).unwrap();
    let img = solid_image(16, 16, [40, 120, 200, 255]);
    canvas.draw_all_pixels(&img).unwrap();

    let mut sibling = canvas.new_like();
    assert_eq!(sibling.width(), 2);
    assert_eq!(sibling.height(), 2);
    sibling.draw_all_pixels(&img).unwrap();
    assert_eq!(canvas.print(None), sibling.print(None));
}

#[test]
fn repeated_draws_rebuild_the_grid() {
    let cfg = config(CanvasMode::Truecolor, 2, 2, "space,solid");
    let mut canvas = Canvas::new(&cfg).unwrap();

    canvas.draw_all_pixels(&solid_image(4, 4, [255, 0, 0, 255])).unwrap();
    let red = canvas.print(None);

    canvas.draw_all_pixels(&solid_image(4, 4, [0, 0, 255, 255])).unwrap();
    let blue = canvas.print(None);

    assert_ne!(red, blue);
    assert!(blue.contains("48;2;0;0;255"));
}

#[test]
fn fill_map_shades_featureless_cells() {
    // Mid-gray in FGBG_BGFG mode: without fill symbols the cell is blank;
    // with stipple fills it picks a shade matching the mean intensity
    let img = solid_image(8, 8, [128, 128, 128, 255]);

    let mut cfg = config(CanvasMode::FgBgBgFg, 1, 1, "space,solid");
    let mut canvas = Canvas::new(&cfg).unwrap();
    canvas.draw_all_pixels(&img).unwrap();
    let blank = canvas.char_at(0, 0);
    assert_eq!(blank, ' ');

    cfg.fill_symbol_map = SymbolMap::from_selectors("space,solid,stipple").unwrap();
    let mut canvas = Canvas::new(&cfg).unwrap();
    canvas.draw_all_pixels(&img).unwrap();
    let filled = canvas.char_at(0, 0);
    assert!(
        ['\u{2591}', '\u{2592}', '\u{2593}'].contains(&filled),
        "expected a shade, got {filled:?}"
    );
}

#[test]
fn print_rows_matches_joined_print() {
    let mut img = RgbaImage::new(32, 16);
    for y in 0..16 {
        for x in 0..32 {
            img.put_pixel(x, y, Rgba([(x * 8) as u8, 0, (y * 16) as u8, 255]));
        }
    }
    let img = DynamicImage::ImageRgba8(img);

    let cfg = config(CanvasMode::Indexed16, 4, 2, "block,space,solid");
    let mut canvas = Canvas::new(&cfg).unwrap();
    canvas.draw_all_pixels(&img).unwrap();

    let joined = canvas.print(None);
    let rows = canvas.print_rows(None);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.join("\n"), joined);
}

#[test]
fn higher_work_factor_never_worsens_quality() {
    // Not a strict invariant of the algorithm, but on a clean two-tone
    // image the exhaustive path must find the same half-block split
    let mut img = RgbaImage::new(8, 8);
    for y in 0..8 {
        for x in 0..8 {
            let white = y < 4;
            let v = if white { 255 } else { 0 };
            img.put_pixel(x, y, Rgba([v, v, v, 255]));
        }
    }
    let img = DynamicImage::ImageRgba8(img);

    for work_factor in [0.2, 0.5, 0.9] {
        let mut cfg = config(CanvasMode::Truecolor, 1, 1, "space,solid,half");
        cfg.work_factor = work_factor;
        let mut canvas = Canvas::new(&cfg).unwrap();
        canvas.draw_all_pixels(&img).unwrap();

        let c = canvas.char_at(0, 0);
        assert!(
            c == '\u{2580}' || c == '\u{2584}',
            "work factor {work_factor}: expected a half block, got {c:?}"
        );
    }
}
