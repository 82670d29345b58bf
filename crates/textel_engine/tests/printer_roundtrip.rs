//! Parse the printer's output back into per-cell attributes and compare
//! against the canvas contents, under every optimization setting.

use image::{DynamicImage, Rgba, RgbaImage};
use textel_engine::{Canvas, CanvasConfig, CanvasMode, Optimizations, SymbolMap};
use unicode_width::UnicodeWidthChar;

/// What one displayed cell looks like after the terminal has processed the
/// byte stream.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DisplayCell {
    c: char,
    fg: Option<u32>,
    bg: Option<u32>,
    inverted: bool,
}

/// A minimal ANSI interpreter covering the sequences the printer emits:
/// SGR reset, invert, 16-color (aixterm), 256-color, direct color, and
/// repeat-char.
fn parse_ansi(output: &str, width: usize) -> Vec<DisplayCell> {
    let mut cells = Vec::new();
    let mut fg: Option<u32> = None;
    let mut bg: Option<u32> = None;
    let mut inverted = false;
    let mut last_char = ' ';

    let mut chars = output.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            assert_eq!(cells.len() % width, 0, "newline inside a row");
            continue;
        }
        if c != '\x1b' {
            let cell_width = c.width().unwrap_or(1).max(1);
            cells.push(DisplayCell { c, fg, bg, inverted });
            for _ in 1..cell_width {
                cells.push(DisplayCell {
                    c: '\0',
                    fg,
                    bg,
                    inverted,
                });
            }
            last_char = c;
            continue;
        }

        assert_eq!(chars.next(), Some('['), "unsupported escape");
        let mut args: Vec<u32> = Vec::new();
        let mut cur: Option<u32> = None;
        let final_byte = loop {
            match chars.next().expect("unterminated sequence") {
                d @ '0'..='9' => cur = Some(cur.unwrap_or(0) * 10 + d as u32 - '0' as u32),
                ';' => {
                    args.push(cur.take().unwrap_or(0));
                }
                other => {
                    if let Some(v) = cur.take() {
                        args.push(v);
                    }
                    break other;
                }
            }
        };

        match final_byte {
            'b' => {
                let n = args.first().copied().unwrap_or(1);
                for _ in 0..n {
                    cells.push(DisplayCell {
                        c: last_char,
                        fg,
                        bg,
                        inverted,
                    });
                }
            }
            'm' => {
                let mut i = 0;
                while i < args.len() {
                    match args[i] {
                        0 => {
                            fg = None;
                            bg = None;
                            inverted = false;
                        }
                        7 => inverted = true,
                        30..=37 => fg = Some(args[i] - 30),
                        90..=97 => fg = Some(args[i] - 90 + 8),
                        39 => fg = None,
                        40..=47 => bg = Some(args[i] - 40),
                        100..=107 => bg = Some(args[i] - 100 + 8),
                        49 => bg = None,
                        38 | 48 => {
                            let is_fg = args[i] == 38;
                            let value = match args[i + 1] {
                                5 => {
                                    i += 1;
                                    args[i + 1]
                                }
                                2 => {
                                    i += 3;
                                    (args[i - 1] << 16) | (args[i] << 8) | args[i + 1]
                                }
                                other => panic!("unsupported color form {other}"),
                            };
                            i += 1;
                            if is_fg {
                                fg = Some(value);
                            } else {
                                bg = Some(value);
                            }
                        }
                        other => panic!("unsupported SGR {other}"),
                    }
                    i += 1;
                }
            }
            other => panic!("unsupported final byte {other:?}"),
        }
    }

    cells
}

/// The (char, fg, bg, inverted) triple the printer is contracted to show
/// for a cell, derived from the public accessors.
fn expected_cell(canvas: &Canvas, x: i32, y: i32) -> DisplayCell {
    let c = canvas.char_at(x, y);
    let (fg, bg) = canvas.raw_colors_at(x, y);
    let fg = (fg >= 0).then_some(fg as u32);
    let bg = (bg >= 0).then_some(bg as u32);

    // Transparent foreground over a set background is shown inverted
    if fg.is_none() && bg.is_some() {
        DisplayCell {
            c,
            fg: bg,
            bg: fg,
            inverted: true,
        }
    } else {
        DisplayCell { c, fg, bg, inverted: false }
    }
}

fn gradient_image(w: u32, h: u32) -> DynamicImage {
    let mut img = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            img.put_pixel(
                x,
                y,
                Rgba([(x * 255 / w.max(1)) as u8, (y * 255 / h.max(1)) as u8, ((x + y) * 7 % 256) as u8, 255]),
            );
        }
    }
    DynamicImage::ImageRgba8(img)
}

fn roundtrip(mode: CanvasMode, optimizations: Optimizations) {
    let config = CanvasConfig {
        width: 8,
        height: 4,
        canvas_mode: mode,
        optimizations,
        symbol_map: SymbolMap::from_selectors("block,border,space,solid").unwrap(),
        fill_symbol_map: SymbolMap::new(),
        ..CanvasConfig::default()
    };
    let mut canvas = Canvas::new(&config).unwrap();
    canvas.draw_all_pixels(&gradient_image(64, 32)).unwrap();

    let out = canvas.print(None);
    let parsed = parse_ansi(&out, 8);
    assert_eq!(parsed.len(), 8 * 4, "wrong cell count for {mode:?}/{optimizations:?}");

    for y in 0..4 {
        for x in 0..8 {
            let got = &parsed[(y * 8 + x) as usize];
            let want = expected_cell(&canvas, x, y);
            assert_eq!(*got, want, "cell ({x}, {y}) under {mode:?}/{optimizations:?}");
        }
    }
}

#[test]
fn indexed_16_roundtrip_under_all_optimization_settings() {
    for optimizations in [
        Optimizations::ALL,
        Optimizations::empty(),
        Optimizations::REPEAT_CHAR,
        Optimizations::REUSE_ATTRIBUTES,
    ] {
        roundtrip(CanvasMode::Indexed16, optimizations);
    }
}

#[test]
fn indexed_256_roundtrip_under_all_optimization_settings() {
    for optimizations in [Optimizations::ALL, Optimizations::empty()] {
        roundtrip(CanvasMode::Indexed256, optimizations);
    }
}

#[test]
fn truecolor_roundtrip() {
    let config = CanvasConfig {
        width: 6,
        height: 3,
        canvas_mode: CanvasMode::Truecolor,
        symbol_map: SymbolMap::from_selectors("block,space,solid").unwrap(),
        fill_symbol_map: SymbolMap::new(),
        ..CanvasConfig::default()
    };
    let mut canvas = Canvas::new(&config).unwrap();
    canvas.draw_all_pixels(&gradient_image(48, 24)).unwrap();

    let out = canvas.print(None);
    let parsed = parse_ansi(&out, 6);
    assert_eq!(parsed.len(), 6 * 3);

    for y in 0..3 {
        for x in 0..6 {
            let got = &parsed[(y * 6 + x) as usize];
            let want = expected_cell(&canvas, x, y);
            assert_eq!(*got, want, "cell ({x}, {y})");
        }
    }
}

#[test]
fn optimizations_do_not_change_the_display() {
    // Different byte streams, same display: compare the parsed grids
    let mut grids = Vec::new();
    for optimizations in [Optimizations::ALL, Optimizations::empty()] {
        let config = CanvasConfig {
            width: 8,
            height: 4,
            canvas_mode: CanvasMode::Indexed256,
            optimizations,
            symbol_map: SymbolMap::from_selectors("block,space,solid,stipple").unwrap(),
            fill_symbol_map: SymbolMap::new(),
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::new(&config).unwrap();
        canvas.draw_all_pixels(&gradient_image(64, 32)).unwrap();
        grids.push(parse_ansi(&canvas.print(None), 8));
    }

    assert_eq!(grids[0], grids[1]);
}

#[test]
fn transparent_foreground_roundtrips_with_inversion() {
    let config = CanvasConfig {
        width: 4,
        height: 1,
        canvas_mode: CanvasMode::Indexed256,
        symbol_map: SymbolMap::from_selectors("space,solid,half").unwrap(),
        fill_symbol_map: SymbolMap::new(),
        ..CanvasConfig::default()
    };
    let mut canvas = Canvas::new(&config).unwrap();
    canvas.draw_all_pixels(&solid_green(32, 8)).unwrap();

    // Force a cell with a transparent foreground over a set background;
    // the printer must show it through the inverted BG pen
    canvas.set_char_at(1, 0, '\u{2580}');
    canvas.set_raw_colors_at(1, 0, -1, 10);

    let out = canvas.print(None);
    let parsed = parse_ansi(&out, 4);
    assert_eq!(parsed.len(), 4);
    assert!(parsed[1].inverted);

    for x in 0..4 {
        let got = &parsed[x as usize];
        let want = expected_cell(&canvas, x, 0);
        assert_eq!(*got, want, "cell ({x}, 0)");
    }
}

fn solid_green(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([0, 200, 0, 255])))
}
