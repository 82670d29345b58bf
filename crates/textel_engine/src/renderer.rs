//! Per-cell symbol and color selection.
//!
//! The renderer walks each cell row left to right. For every cell it picks
//! the glyph and color pair minimizing the summed fast color difference
//! over the cell's 64 pixels, then tries to improve pairs of adjacent
//! cells with a double-width symbol, fills featureless cells from the fill
//! map, and finally normalizes blanks.

use crate::{
    batch, CanvasCell, CanvasConfig, CanvasMode, Color, ColorExtractor, ColorPair, Palette, Symbol, WideSymbol,
    WorkCell, PALETTE_INDEX_FG, PALETTE_INDEX_TRANSPARENT, SYMBOL_N_PIXELS,
};

/// Cell error ceiling. Summed over two cells for wide evaluation, so a low
/// multiple must still fit in an i32.
const SYMBOL_ERROR_MAX: i32 = i32::MAX / 8;

/// Lookback ring size for wide-symbol replacement.
const N_BUF_CELLS: usize = 4;

/// Work factor threshold at which the tentative color pair is upgraded
/// from the channel-extremes fast path to 2-means clustering.
const K_MEANS_WORK_FACTOR: u32 = 6;

pub(crate) struct RenderContext<'a> {
    pub config: &'a CanvasConfig,
    pub fg_palette: &'a Palette,
    pub bg_palette: &'a Palette,
    pub default_colors: ColorPair,
    pub work_factor_int: u32,
    pub consider_inverted: bool,
    pub extract_colors: bool,
    pub use_quantized_error: bool,
    pub blank_char: char,
    pub solid_char: Option<char>,
    pub pixels: &'a [Color],
    pub width_pixels: usize,
}

#[derive(Clone, Copy)]
struct SymbolEval {
    colors: ColorPair,
    error: i32,
}

#[derive(Clone, Copy)]
struct SymbolEval2 {
    colors: ColorPair,
    error: [i32; 2],
}

fn transparent_cell_color(canvas_mode: CanvasMode) -> u32 {
    if canvas_mode == CanvasMode::Truecolor {
        Color::new(0x80, 0x80, 0x80, 0x00).pack()
    } else {
        PALETTE_INDEX_TRANSPARENT as u32
    }
}

fn eval_symbol_colors(ctx: &RenderContext<'_>, wcell: &mut WorkCell, sym: &Symbol) -> ColorPair {
    match ctx.config.color_extractor {
        ColorExtractor::Average => wcell.mean_colors_for_symbol(sym),
        ColorExtractor::Median => wcell.median_colors_for_symbol(sym),
    }
}

fn eval_symbol_colors_wide(
    ctx: &RenderContext<'_>,
    wcell_a: &mut WorkCell,
    wcell_b: &mut WorkCell,
    sym: &WideSymbol,
) -> ColorPair {
    let part_a = eval_symbol_colors(ctx, wcell_a, &sym.halves[0]);
    let part_b = eval_symbol_colors(ctx, wcell_b, &sym.halves[1]);

    ColorPair::new(
        Color::average_2(part_a.fg(), part_b.fg()),
        Color::average_2(part_a.bg(), part_b.bg()),
    )
}

fn calc_cell_error(pixels: &[Color; SYMBOL_N_PIXELS], pair: &ColorPair, coverage: &[u8; SYMBOL_N_PIXELS]) -> i32 {
    let mut error = 0;
    for (pixel, &cov) in pixels.iter().zip(coverage.iter()) {
        error += Color::diff_fast(*pixel, pair.colors[cov as usize]);
    }
    error
}

/// Computes the cell error for a symbol, optionally after quantizing the
/// pair through the palettes (better scores where the palettes disagree,
/// notably 16/8).
fn eval_symbol_error(ctx: &RenderContext<'_>, wcell: &WorkCell, sym: &Symbol, colors: &ColorPair, quantize: bool) -> i32 {
    let pair = if quantize {
        let cs = ctx.config.color_space;
        let fg_index = ctx.fg_palette.lookup_nearest(cs, colors.fg()).index[0];
        let bg_index = ctx.bg_palette.lookup_nearest(cs, colors.bg()).index[0];
        ColorPair::new(ctx.fg_palette.color(cs, fg_index), ctx.bg_palette.color(cs, bg_index))
    } else {
        *colors
    };

    calc_cell_error(wcell.pixels(), &pair, &sym.coverage)
}

fn eval_symbol(
    ctx: &RenderContext<'_>,
    wcell: &mut WorkCell,
    sym_index: usize,
    best_index: &mut Option<usize>,
    best_eval: &mut SymbolEval,
) {
    let sym = &ctx.config.symbol_map.symbols()[sym_index];

    let colors = if ctx.config.fg_only_enabled {
        ctx.default_colors
    } else {
        eval_symbol_colors(ctx, wcell, sym)
    };

    let error = eval_symbol_error(ctx, wcell, sym, &colors, ctx.use_quantized_error);

    if error < best_eval.error {
        *best_index = Some(sym_index);
        *best_eval = SymbolEval { colors, error };
    }
}

fn eval_symbol_wide(
    ctx: &RenderContext<'_>,
    wcell_a: &mut WorkCell,
    wcell_b: &mut WorkCell,
    sym_index: usize,
    best_index: &mut Option<usize>,
    best_eval: &mut SymbolEval2,
) {
    let sym = &ctx.config.symbol_map.wide_symbols()[sym_index];

    let colors = if ctx.config.fg_only_enabled {
        ctx.default_colors
    } else {
        eval_symbol_colors_wide(ctx, wcell_a, wcell_b, sym)
    };

    let error = [
        eval_symbol_error(ctx, wcell_a, &sym.halves[0], &colors, ctx.use_quantized_error),
        eval_symbol_error(ctx, wcell_b, &sym.halves[1], &colors, ctx.use_quantized_error),
    ];

    if error[0] + error[1] < best_eval.error[0] + best_eval.error[1] {
        *best_index = Some(sym_index);
        *best_eval = SymbolEval2 { colors, error };
    }
}

/// The tentative pair the target bitmap is classified against.
fn tentative_color_pair(ctx: &RenderContext<'_>, wcell: &mut WorkCell) -> ColorPair {
    if ctx.work_factor_int >= K_MEANS_WORK_FACTOR {
        WorkCell::k_means_color_pair(&[&*wcell])
    } else {
        wcell.contrasting_color_pair()
    }
}

fn pick_symbol_and_colors_fast(ctx: &RenderContext<'_>, wcell: &mut WorkCell) -> (char, ColorPair, i32) {
    let color_pair = if ctx.extract_colors && !ctx.config.fg_only_enabled {
        tentative_color_pair(ctx, wcell)
    } else {
        ctx.default_colors
    };

    let bitmap = wcell.to_bitmap(&color_pair);
    let n_candidates = ctx.work_factor_int.clamp(1, 8) as usize;
    let candidates = ctx.config.symbol_map.find_candidates(bitmap, ctx.consider_inverted, n_candidates);

    let mut best_index = None;
    let mut best_eval = SymbolEval {
        colors: ColorPair::default(),
        error: SYMBOL_ERROR_MAX,
    };
    for cand in &candidates {
        eval_symbol(ctx, wcell, cand.symbol_index, &mut best_index, &mut best_eval);
    }

    let best_index = best_index.expect("candidate search over a non-empty symbol map");
    let best_sym = &ctx.config.symbol_map.symbols()[best_index];

    if ctx.extract_colors && ctx.config.fg_only_enabled {
        best_eval.colors = eval_symbol_colors(ctx, wcell, best_sym);
    }

    (best_sym.c, best_eval.colors, best_eval.error)
}

fn pick_symbol_and_colors_slow(ctx: &RenderContext<'_>, wcell: &mut WorkCell) -> (char, ColorPair, i32) {
    let mut best_index = None;
    let mut best_eval = SymbolEval {
        colors: ColorPair::default(),
        error: SYMBOL_ERROR_MAX,
    };

    for sym_index in 0..ctx.config.symbol_map.n_symbols() {
        eval_symbol(ctx, wcell, sym_index, &mut best_index, &mut best_eval);
    }

    let best_index = best_index.expect("exhaustive scan over a non-empty symbol map");
    let best_sym = &ctx.config.symbol_map.symbols()[best_index];

    if ctx.extract_colors && ctx.config.fg_only_enabled {
        best_eval.colors = eval_symbol_colors(ctx, wcell, best_sym);
    }

    (best_sym.c, best_eval.colors, best_eval.error)
}

fn pick_symbol_and_colors_wide_fast(
    ctx: &RenderContext<'_>,
    wcell_a: &mut WorkCell,
    wcell_b: &mut WorkCell,
) -> (char, ColorPair, [i32; 2]) {
    let color_pair = if matches!(ctx.config.canvas_mode, CanvasMode::FgBg | CanvasMode::FgBgBgFg) {
        ctx.default_colors
    } else if ctx.work_factor_int >= K_MEANS_WORK_FACTOR {
        WorkCell::k_means_color_pair(&[&*wcell_a, &*wcell_b])
    } else {
        let part_a = wcell_a.contrasting_color_pair();
        let part_b = wcell_b.contrasting_color_pair();
        ColorPair::new(
            Color::average_2(part_a.fg(), part_b.fg()),
            Color::average_2(part_a.bg(), part_b.bg()),
        )
    };

    let bitmaps = [wcell_a.to_bitmap(&color_pair), wcell_b.to_bitmap(&color_pair)];
    let n_candidates = ctx.work_factor_int.clamp(1, 8) as usize;
    let candidates = ctx.config.symbol_map.find_candidates_wide(bitmaps, ctx.consider_inverted, n_candidates);

    let mut best_index = None;
    let mut best_eval = SymbolEval2 {
        colors: ColorPair::default(),
        error: [SYMBOL_ERROR_MAX, SYMBOL_ERROR_MAX],
    };
    for cand in &candidates {
        eval_symbol_wide(ctx, wcell_a, wcell_b, cand.symbol_index, &mut best_index, &mut best_eval);
    }

    finish_wide_pick(ctx, wcell_a, wcell_b, best_index, best_eval)
}

fn pick_symbol_and_colors_wide_slow(
    ctx: &RenderContext<'_>,
    wcell_a: &mut WorkCell,
    wcell_b: &mut WorkCell,
) -> (char, ColorPair, [i32; 2]) {
    let mut best_index = None;
    let mut best_eval = SymbolEval2 {
        colors: ColorPair::default(),
        error: [SYMBOL_ERROR_MAX, SYMBOL_ERROR_MAX],
    };

    for sym_index in 0..ctx.config.symbol_map.n_wide_symbols() {
        eval_symbol_wide(ctx, wcell_a, wcell_b, sym_index, &mut best_index, &mut best_eval);
    }

    finish_wide_pick(ctx, wcell_a, wcell_b, best_index, best_eval)
}

fn finish_wide_pick(
    ctx: &RenderContext<'_>,
    wcell_a: &mut WorkCell,
    wcell_b: &mut WorkCell,
    best_index: Option<usize>,
    mut best_eval: SymbolEval2,
) -> (char, ColorPair, [i32; 2]) {
    let best_index = best_index.expect("candidate search over a non-empty wide symbol list");
    let best_sym = &ctx.config.symbol_map.wide_symbols()[best_index];

    if ctx.extract_colors && ctx.config.fg_only_enabled {
        best_eval.colors = eval_symbol_colors_wide(ctx, wcell_a, wcell_b, best_sym);
    }

    (best_sym.c(), best_eval.colors, best_eval.error)
}

/// In 16/8 mode the FG and BG palettes disagree on the bright half. When
/// the chosen colors collapse to the same bright FG pen, promote to the
/// solid character if one exists, otherwise fall back to the BG palette
/// match for both pens.
fn quantize_colors_for_cell_16_8(ctx: &RenderContext<'_>, cell: &mut CanvasCell, color_pair: &ColorPair) {
    let cs = ctx.config.color_space;

    // Pick both pens from the FG palette first to detect the collapse;
    // going straight to the BG palette here causes fg-bg-fg-bg artifacts
    // in solid color areas.
    let fg = ctx.fg_palette.lookup_nearest(cs, color_pair.fg()).index[0] as u32;
    let bg = ctx.fg_palette.lookup_nearest(cs, color_pair.bg()).index[0] as u32;
    cell.fg_color = fg;
    cell.bg_color = bg;

    if fg == bg && (8..=15).contains(&fg) {
        if let Some(solid) = ctx.solid_char {
            cell.c = solid;
            cell.bg_color = ctx.bg_palette.lookup_nearest(cs, color_pair.fg()).index[0] as u32;
        } else {
            let both = ctx.bg_palette.lookup_nearest(cs, color_pair.fg()).index[0] as u32;
            cell.fg_color = both;
            cell.bg_color = both;
        }
    } else {
        cell.bg_color = ctx.bg_palette.lookup_nearest(cs, color_pair.bg()).index[0] as u32;
    }
}

fn update_cell_colors(ctx: &RenderContext<'_>, cell: &mut CanvasCell, color_pair: &ColorPair) {
    let cs = ctx.config.color_space;

    match ctx.config.canvas_mode {
        CanvasMode::Indexed256 | CanvasMode::Indexed240 | CanvasMode::Indexed16 | CanvasMode::Indexed8 | CanvasMode::FgBgBgFg => {
            cell.fg_color = ctx.fg_palette.lookup_nearest(cs, color_pair.fg()).index[0] as u32;
            cell.bg_color = ctx.bg_palette.lookup_nearest(cs, color_pair.bg()).index[0] as u32;
        }
        CanvasMode::Indexed16_8 => quantize_colors_for_cell_16_8(ctx, cell, color_pair),
        CanvasMode::Truecolor | CanvasMode::FgBg => {
            cell.fg_color = color_pair.fg().pack();
            cell.bg_color = color_pair.bg().pack();
        }
    }

    if ctx.config.fg_only_enabled {
        cell.bg_color = transparent_cell_color(ctx.config.canvas_mode);
    }
}

fn update_cell(ctx: &RenderContext<'_>, wcell: &mut WorkCell, cell: &mut CanvasCell) -> i32 {
    if ctx.config.symbol_map.n_symbols() == 0 {
        return SYMBOL_ERROR_MAX;
    }

    let (c, color_pair, error) = if ctx.work_factor_int >= 8 {
        pick_symbol_and_colors_slow(ctx, wcell)
    } else {
        pick_symbol_and_colors_fast(ctx, wcell)
    };

    cell.c = c;
    update_cell_colors(ctx, cell, &color_pair);
    error
}

fn update_cells_wide(
    ctx: &RenderContext<'_>,
    wcell_a: &mut WorkCell,
    wcell_b: &mut WorkCell,
) -> ([CanvasCell; 2], [i32; 2]) {
    let mut cells = [CanvasCell::blank(); 2];

    if ctx.config.symbol_map.n_wide_symbols() == 0 {
        return (cells, [SYMBOL_ERROR_MAX, SYMBOL_ERROR_MAX]);
    }

    let (c, color_pair, error) = if ctx.work_factor_int >= 8 {
        pick_symbol_and_colors_wide_slow(ctx, wcell_a, wcell_b)
    } else {
        pick_symbol_and_colors_wide_fast(ctx, wcell_a, wcell_b)
    };

    cells[0].c = c;
    cells[1].c = '\0';
    update_cell_colors(ctx, &mut cells[0], &color_pair);
    cells[1].fg_color = cells[0].fg_color;
    cells[1].bg_color = cells[0].bg_color;

    // The 16/8 quantization can revert the char to the solid block, which
    // is narrow. Extend it to both cells.
    if Some(cells[0].c) == ctx.solid_char {
        cells[1].c = cells[0].c;
    }

    (cells, error)
}

/// Fill for cells rendered with the foreground pen only: pick the fill
/// symbol whose popcount matches the cell's mean intensity.
fn apply_fill_fg_only(ctx: &RenderContext<'_>, wcell: &WorkCell, cell: &mut CanvasCell) {
    if ctx.config.fill_symbol_map.n_symbols() == 0 {
        return;
    }

    let mean = wcell.mean_color();

    if ctx.config.canvas_mode == CanvasMode::Truecolor {
        cell.fg_color = mean.pack();
    } else {
        cell.fg_color = ctx.fg_palette.lookup_nearest(ctx.config.color_space, mean).index[0] as u32;
    }
    cell.bg_color = transparent_cell_color(ctx.config.canvas_mode);

    let intensity = |color: Color| (color.ch[0] as i32 + color.ch[1] as i32 + color.ch[2] as i32) / 3;
    let fg_value = intensity(ctx.default_colors.fg());
    let bg_value = intensity(ctx.default_colors.bg());
    let mean_value = intensity(mean);

    let mut n_bits = ((mean_value * 64) + 128) / 255;
    if fg_value < bg_value {
        n_bits = 64 - n_bits;
    }

    if let Some(cand) = ctx.config.fill_symbol_map.find_fill_candidate(n_bits as u16, false) {
        cell.c = ctx.config.fill_symbol_map.symbols()[cand.symbol_index].c;
    }
}

/// Fill for featureless cells: interpolate between the two nearest palette
/// entries in 64 steps, find the mix fraction minimizing the error against
/// the cell mean, and use the fill symbol whose popcount matches it.
fn apply_fill(ctx: &RenderContext<'_>, wcell: &WorkCell, cell: &mut CanvasCell) {
    if ctx.config.fill_symbol_map.n_symbols() == 0 {
        return;
    }

    let cs = ctx.config.color_space;
    let mean = wcell.mean_color();

    if ctx.config.canvas_mode == CanvasMode::Truecolor {
        cell.fg_color = mean.pack();
        cell.bg_color = cell.fg_color;
        if let Some(cand) = ctx.config.fill_symbol_map.find_fill_candidate(0, false) {
            cell.c = ctx.config.fill_symbol_map.symbols()[cand.symbol_index].c;
        }
        return;
    }

    let mut ccand = match ctx.config.canvas_mode {
        CanvasMode::Indexed256 | CanvasMode::Indexed240 | CanvasMode::Indexed16 | CanvasMode::Indexed8 => {
            ctx.fg_palette.lookup_nearest(cs, mean)
        }
        CanvasMode::Indexed16_8 => {
            let mut ccand = ctx.fg_palette.lookup_nearest(cs, mean);
            let ccand_bg = ctx.bg_palette.lookup_nearest(cs, mean);

            // When the palettes disagree, prefer the BG palette's primary;
            // its pen covers the greater area. The substitution of the
            // second candidate follows the shipped behavior even where the
            // primary already matches.
            if ccand.index[0] != ccand_bg.index[0] {
                if ccand.index[1] == ccand_bg.index[0] {
                    ccand.index[1] = ccand_bg.index[1];
                }
                ccand.index[0] = ccand_bg.index[0];
            }
            ccand
        }
        CanvasMode::FgBgBgFg | CanvasMode::FgBg => crate::ColorCandidates {
            index: [PALETTE_INDEX_FG, crate::PALETTE_INDEX_BG],
        },
        CanvasMode::Truecolor => unreachable!(),
    };

    let mut col = [ctx.fg_palette.color(cs, ccand.index[0]), ctx.fg_palette.color(cs, ccand.index[1])];

    // In FGBG modes, background and transparency are the same thing; force
    // two opaque endpoints so the interpolation is meaningful.
    if matches!(ctx.config.canvas_mode, CanvasMode::FgBg | CanvasMode::FgBgBgFg) {
        col[1].ch[3] = 0xff;
    }

    // The primary color corresponds to the BG pen: mostly-transparent
    // cells then get a transparent background, and terminals don't support
    // transparency in the FG pen anyway.
    let mut best_i = 0;
    let mut best_error = i32::MAX;
    for i in 0..=64i32 {
        let mix = Color {
            ch: std::array::from_fn(|ch| {
                ((col[0].ch[ch] as i32 * (64 - i) + col[1].ch[ch] as i32 * i) / 64) as u8
            }),
        };
        let error = Color::diff_fast(mean, mix);
        if error < best_error {
            // FGBG cannot invert or set the BG color; assign the primary
            // to the FG pen instead
            best_i = if ctx.config.canvas_mode == CanvasMode::FgBg { 64 - i } else { i };
            best_error = error;
        }
    }

    let consider_inverted = ctx.consider_inverted && ctx.config.canvas_mode != CanvasMode::Indexed16_8;
    let Some(cand) = ctx.config.fill_symbol_map.find_fill_candidate(best_i as u16, consider_inverted) else {
        return;
    };

    // A featureless result collapses the pens, except in modes that can't
    // express the change
    if ctx.config.canvas_mode != CanvasMode::FgBg && ctx.config.canvas_mode != CanvasMode::Indexed16_8 {
        if best_i == 0 {
            ccand.index[1] = ccand.index[0];
        } else if best_i == 64 {
            ccand.index[0] = ccand.index[1];
        }
    }

    if cand.is_inverted {
        cell.fg_color = ccand.index[0] as u32;
        cell.bg_color = ccand.index[1] as u32;
    } else {
        cell.fg_color = ccand.index[1] as u32;
        cell.bg_color = ccand.index[0] as u32;
    }

    cell.c = ctx.config.fill_symbol_map.symbols()[cand.symbol_index].c;
}

fn render_row(ctx: &RenderContext<'_>, cy: usize, row: &mut [CanvasCell]) {
    let mut work_cells: [WorkCell; N_BUF_CELLS] = Default::default();
    let mut cell_errors = [0i32; N_BUF_CELLS];

    for cx in 0..row.len() {
        let buf_index = cx % N_BUF_CELLS;

        row[cx] = CanvasCell {
            c: ' ',
            fg_color: 0,
            bg_color: 0,
        };

        work_cells[buf_index] = WorkCell::fetch(ctx.pixels, ctx.width_pixels, cx, cy);
        cell_errors[buf_index] = update_cell(ctx, &mut work_cells[buf_index], &mut row[cx]);

        // Lookback: a double-width symbol may beat the last two narrow
        // picks, but not when the previous cell is already the right half
        // of one
        if cx >= 1 && row[cx - 1].c != '\0' {
            let prev_buf_index = (cx - 1) % N_BUF_CELLS;

            let (head, tail) = work_cells.split_at_mut(buf_index.max(prev_buf_index));
            let (wcell_a, wcell_b) = if prev_buf_index < buf_index {
                (&mut head[prev_buf_index], &mut tail[0])
            } else {
                (&mut tail[0], &mut head[buf_index])
            };

            let (wide_cells, wide_errors) = update_cells_wide(ctx, wcell_a, wcell_b);

            if wide_errors[0] + wide_errors[1] < cell_errors[prev_buf_index] + cell_errors[buf_index] {
                row[cx - 1] = wide_cells[0];
                row[cx] = wide_cells[1];
                cell_errors[prev_buf_index] = wide_errors[0];
                cell_errors[buf_index] = wide_errors[1];
            }
        }

        // Featureless cell: try the fill map
        if row[cx].c != '\0'
            && (row[cx].c == ' ' || row[cx].c == '\u{2588}' || row[cx].fg_color == row[cx].bg_color)
        {
            if ctx.config.fg_only_enabled {
                apply_fill_fg_only(ctx, &work_cells[buf_index], &mut row[cx]);
                row[cx].bg_color = transparent_cell_color(ctx.config.canvas_mode);
            } else {
                apply_fill(ctx, &work_cells[buf_index], &mut row[cx]);
            }
        }

        // Still featureless after fill: use the blank char consistently
        if row[cx].c != '\0' && (row[cx].c == ' ' || row[cx].fg_color == row[cx].bg_color) {
            row[cx].c = ctx.blank_char;

            // Copy the FG color from the previous cell to avoid emitting
            // pointless color changes. Only safe when the blank is a true
            // space with no foreground features.
            if ctx.blank_char == ' ' && cx > 0 {
                row[cx].fg_color = row[cx - 1].fg_color;

                // Inverted colors may be in play when the foreground is
                // transparent; downstream tools can keep modulating the
                // wrong pen over long runs. Make the unused FG pen opaque.
                if ctx.config.canvas_mode == CanvasMode::Truecolor {
                    row[cx].fg_color |= 0xff00_0000;
                } else if row[cx].fg_color == PALETTE_INDEX_TRANSPARENT as u32 {
                    row[cx].fg_color = PALETTE_INDEX_FG as u32;
                }
            }
        }
    }
}

/// Renders every cell row from the prepared pixel buffer. Rows are
/// independent and run in parallel batches; cells within a row are strictly
/// sequential because of the wide lookback.
pub(crate) fn render_cells(ctx: &RenderContext<'_>, cells: &mut [CanvasCell]) {
    let width = ctx.config.width as usize;
    batch::process_row_batches(cells, width, |first_row, chunk| {
        for (i, row) in chunk.chunks_mut(width).enumerate() {
            render_row(ctx, first_row + i, row);
        }
    });
}
