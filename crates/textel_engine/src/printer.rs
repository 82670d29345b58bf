//! Cell grid to terminal bytes.
//!
//! A stateful walk over the cells. Two independent optimizations shape the
//! output: REPEAT_CHAR run-length encodes identical glyphs, and
//! REUSE_ATTRIBUTES emits only the attributes that differ from the current
//! terminal state. Disabling either changes the bytes but not the rendered
//! display.

use textel_term::{TermInfo, TermSeq, SEQ_LENGTH_MAX};

use crate::{Canvas, CanvasMode, Color, Optimizations, PALETTE_INDEX_FG, PALETTE_INDEX_TRANSPARENT};

struct PrintCtx<'a> {
    canvas: &'a Canvas,
    term_info: &'a TermInfo,
    out: String,

    cur_char: Option<char>,
    n_reps: usize,

    cur_inverted: bool,
    cur_fg: u32,
    cur_bg: u32,
    cur_fg_direct: Color,
    cur_bg_direct: Color,
}

impl<'a> PrintCtx<'a> {
    fn new(canvas: &'a Canvas, term_info: &'a TermInfo) -> Self {
        PrintCtx {
            canvas,
            term_info,
            out: String::new(),
            cur_char: None,
            n_reps: 0,
            cur_inverted: false,
            cur_fg: PALETTE_INDEX_TRANSPARENT as u32,
            cur_bg: PALETTE_INDEX_TRANSPARENT as u32,
            cur_fg_direct: Color::new(0, 0, 0, 0),
            cur_bg_direct: Color::new(0, 0, 0, 0),
        }
    }

    fn repeat_char_enabled(&self) -> bool {
        self.canvas.config.optimizations.contains(Optimizations::REPEAT_CHAR)
            && self.term_info.have_seq(TermSeq::RepeatChar)
    }

    fn reuse_attributes_enabled(&self) -> bool {
        self.canvas.config.optimizations.contains(Optimizations::REUSE_ATTRIBUTES)
    }

    fn flush_chars(&mut self) {
        let Some(c) = self.cur_char.take() else {
            return;
        };
        let len = c.len_utf8();

        // The repeat sequence costs "ESC [ <n> b"; only worth it when the
        // literal run would be longer
        if self.repeat_char_enabled() && self.n_reps > 1 && self.n_reps * len > len + 4 {
            self.out.push(c);
            self.term_info.emit_repeat_char(&mut self.out, self.n_reps as u32 - 1);
        } else {
            for _ in 0..self.n_reps {
                self.out.push(c);
            }
        }

        self.n_reps = 0;
    }

    fn queue_char(&mut self, c: char) {
        if self.cur_char == Some(c) {
            self.n_reps += 1;
        } else {
            self.flush_chars();
            self.cur_char = Some(c);
            self.n_reps = 1;
        }
    }

    fn reset_attributes(&mut self) {
        self.term_info.emit_reset_attributes(&mut self.out);
        self.cur_inverted = false;
        self.cur_fg = PALETTE_INDEX_TRANSPARENT as u32;
        self.cur_bg = PALETTE_INDEX_TRANSPARENT as u32;
        self.cur_fg_direct.ch[3] = 0;
        self.cur_bg_direct.ch[3] = 0;
    }

    /* Truecolor */

    fn emit_attributes_direct(&mut self, fg: Color, bg: Color, inverted: bool) {
        if self.reuse_attributes_enabled() {
            if !self.canvas.config.fg_only_enabled
                && ((self.cur_inverted && !inverted)
                    || (self.cur_fg_direct.ch[3] != 0 && fg.ch[3] == 0)
                    || (self.cur_bg_direct.ch[3] != 0 && bg.ch[3] == 0))
            {
                self.flush_chars();
                self.reset_attributes();
            }

            if !self.cur_inverted && inverted {
                self.flush_chars();
                self.term_info.emit_invert_colors(&mut self.out);
            }

            if fg != self.cur_fg_direct {
                if bg != self.cur_bg_direct && bg.ch[3] != 0 {
                    self.flush_chars();
                    self.term_info
                        .emit_set_color_fgbg_direct(&mut self.out, fg.ch[0], fg.ch[1], fg.ch[2], bg.ch[0], bg.ch[1], bg.ch[2]);
                } else if fg.ch[3] != 0 {
                    self.flush_chars();
                    self.term_info.emit_set_color_fg_direct(&mut self.out, fg.ch[0], fg.ch[1], fg.ch[2]);
                }
            } else if bg != self.cur_bg_direct && bg.ch[3] != 0 {
                self.flush_chars();
                self.term_info.emit_set_color_bg_direct(&mut self.out, bg.ch[0], bg.ch[1], bg.ch[2]);
            }
        } else {
            self.flush_chars();
            self.reset_attributes();
            if inverted {
                self.term_info.emit_invert_colors(&mut self.out);
            }

            if fg.ch[3] != 0 {
                if bg.ch[3] != 0 {
                    self.term_info
                        .emit_set_color_fgbg_direct(&mut self.out, fg.ch[0], fg.ch[1], fg.ch[2], bg.ch[0], bg.ch[1], bg.ch[2]);
                } else {
                    self.term_info.emit_set_color_fg_direct(&mut self.out, fg.ch[0], fg.ch[1], fg.ch[2]);
                }
            } else if bg.ch[3] != 0 {
                self.term_info.emit_set_color_bg_direct(&mut self.out, bg.ch[0], bg.ch[1], bg.ch[2]);
            }
        }

        self.cur_fg_direct = fg;
        self.cur_bg_direct = bg;
        self.cur_inverted = inverted;
    }

    fn emit_row_direct(&mut self, i: usize, i_max: usize) {
        for i in i..i_max {
            let cell = &self.canvas.cells[i];

            // Wide symbols have '\0' in the rightmost cell
            if cell.c == '\0' {
                continue;
            }

            let fg = Color::unpack(cell.fg_color).threshold_alpha(self.canvas.config.alpha_threshold);
            let bg = Color::unpack(cell.bg_color).threshold_alpha(self.canvas.config.alpha_threshold);

            if fg.ch[3] == 0 && bg.ch[3] != 0 {
                self.emit_attributes_direct(bg, fg, true);
            } else {
                self.emit_attributes_direct(fg, bg, false);
            }

            if fg.ch[3] == 0 && bg.ch[3] == 0 {
                self.queue_char(' ');
                if i < i_max - 1 && self.canvas.cells[i + 1].c == '\0' {
                    self.queue_char(' ');
                }
            } else {
                self.queue_char(cell.c);
            }
        }
    }

    /* Indexed */

    /// Shared REUSE_ATTRIBUTES prologue for the indexed modes: leaving the
    /// inverted state or entering transparency requires a full reset.
    fn handle_inverted_with_reuse(&mut self, fg: u32, bg: u32, inverted: bool) {
        let transparent = PALETTE_INDEX_TRANSPARENT as u32;

        // fg_only can legitimately leave the FG pen transparent; never
        // reset it away in that case
        if !self.canvas.config.fg_only_enabled
            && ((self.cur_inverted && !inverted)
                || (self.cur_fg != transparent && fg == transparent)
                || (self.cur_bg != transparent && bg == transparent))
        {
            self.flush_chars();
            self.reset_attributes();
        }

        if !self.cur_inverted && inverted {
            self.flush_chars();
            self.term_info.emit_invert_colors(&mut self.out);
        }
    }

    fn emit_attributes_indexed(&mut self, fg: u32, bg: u32, inverted: bool, extended: bool) {
        let transparent = PALETTE_INDEX_TRANSPARENT as u32;

        // The reserved pens can end up in a cell through the blank-cell
        // normalization; they map to the terminal's default colors.
        let emit_fg = |ctx: &mut Self, pen: u32| {
            if pen >= 256 {
                ctx.term_info.emit_set_color_fg_default(&mut ctx.out);
            } else if extended {
                ctx.term_info.emit_set_color_fg_256(&mut ctx.out, pen as u16);
            } else {
                ctx.term_info.emit_set_color_fg_16(&mut ctx.out, pen as u16);
            }
        };
        let emit_bg = |ctx: &mut Self, pen: u32| {
            if pen >= 256 {
                ctx.term_info.emit_set_color_bg_default(&mut ctx.out);
            } else if extended {
                ctx.term_info.emit_set_color_bg_256(&mut ctx.out, pen as u16);
            } else {
                ctx.term_info.emit_set_color_bg_16(&mut ctx.out, pen as u16);
            }
        };
        let emit_fgbg = |ctx: &mut Self, fg_pen: u32, bg_pen: u32| {
            if fg_pen >= 256 || bg_pen >= 256 {
                emit_fg(ctx, fg_pen);
                emit_bg(ctx, bg_pen);
            } else if extended {
                ctx.term_info.emit_set_color_fgbg_256(&mut ctx.out, fg_pen as u16, bg_pen as u16);
            } else {
                ctx.term_info.emit_set_color_fgbg_16(&mut ctx.out, fg_pen as u16, bg_pen as u16);
            }
        };

        if self.reuse_attributes_enabled() {
            self.handle_inverted_with_reuse(fg, bg, inverted);

            if fg != self.cur_fg {
                if bg != self.cur_bg && bg != transparent {
                    self.flush_chars();
                    emit_fgbg(self, fg, bg);
                } else if fg != transparent {
                    self.flush_chars();
                    emit_fg(self, fg);
                }
            } else if bg != self.cur_bg && bg != transparent {
                self.flush_chars();
                emit_bg(self, bg);
            }
        } else {
            self.flush_chars();
            self.reset_attributes();
            if inverted {
                self.term_info.emit_invert_colors(&mut self.out);
            }

            if fg != transparent {
                if bg != transparent {
                    emit_fgbg(self, fg, bg);
                } else {
                    emit_fg(self, fg);
                }
            } else if bg != transparent {
                emit_bg(self, bg);
            }
        }

        self.cur_fg = fg;
        self.cur_bg = bg;
        self.cur_inverted = inverted;
    }

    fn emit_row_indexed(&mut self, i: usize, i_max: usize, extended: bool) {
        let transparent = PALETTE_INDEX_TRANSPARENT as u32;

        for i in i..i_max {
            let cell = &self.canvas.cells[i];
            if cell.c == '\0' {
                continue;
            }

            let (fg, bg) = (cell.fg_color, cell.bg_color);

            if fg == transparent && bg != transparent {
                self.emit_attributes_indexed(bg, fg, true, extended);
            } else {
                self.emit_attributes_indexed(fg, bg, false, extended);
            }

            if fg == transparent && bg == transparent {
                self.queue_char(' ');
                if i < i_max - 1 && self.canvas.cells[i + 1].c == '\0' {
                    self.queue_char(' ');
                }
            } else {
                self.queue_char(cell.c);
            }
        }
    }

    /* FGBG with inversion */

    fn emit_row_fgbg_bgfg(&mut self, i: usize, i_max: usize) {
        let blank_symbol = if self.canvas.config.symbol_map.has_symbol(' ') {
            Some((' ', false))
        } else if self.canvas.config.symbol_map.has_symbol('\u{2588}') {
            Some(('\u{2588}', true))
        } else {
            None
        };

        for i in i..i_max {
            let cell = &self.canvas.cells[i];
            if cell.c == '\0' {
                continue;
            }

            let mut c = cell.c;
            let mut invert = false;

            // Featureless cells print as the blank symbol, but only when
            // single-width
            if cell.fg_color == cell.bg_color
                && (i == i_max - 1 || self.canvas.cells[i + 1].c != '\0')
            {
                if let Some((blank, blank_inverts)) = blank_symbol {
                    c = blank;
                    invert = blank_inverts;
                }
            }

            if cell.bg_color == PALETTE_INDEX_FG as u32 {
                invert ^= true;
            }

            if self.reuse_attributes_enabled() {
                if !self.cur_inverted && invert {
                    self.flush_chars();
                    self.term_info.emit_invert_colors(&mut self.out);
                } else if self.cur_inverted && !invert {
                    self.flush_chars();
                    self.reset_attributes();
                }
                self.cur_inverted = invert;
            } else {
                self.flush_chars();
                if invert {
                    self.term_info.emit_invert_colors(&mut self.out);
                } else {
                    self.reset_attributes();
                }
            }

            self.queue_char(c);
        }
    }

    fn emit_row_fgbg(&mut self, i: usize, i_max: usize) {
        for i in i..i_max {
            let cell = &self.canvas.cells[i];
            if cell.c == '\0' {
                continue;
            }
            self.queue_char(cell.c);
        }
    }

    fn emit_row(&mut self, row: usize) {
        let width = self.canvas.config.width as usize;
        let i = row * width;
        let i_max = i + width;

        // Worst case per cell: three control sequences plus the glyph
        self.out.reserve((width + 1) * (SEQ_LENGTH_MAX * 3 + 6));

        // Avoid control codes in FGBG mode, and don't reset when holding
        // the BG pen; that would discard a BG color set by the caller
        let emit_resets =
            self.canvas.config.canvas_mode != CanvasMode::FgBg && !self.canvas.config.fg_only_enabled;

        if row == 0 && emit_resets {
            self.reset_attributes();
        }

        match self.canvas.config.canvas_mode {
            CanvasMode::Truecolor => self.emit_row_direct(i, i_max),
            CanvasMode::Indexed256 | CanvasMode::Indexed240 => self.emit_row_indexed(i, i_max, true),
            CanvasMode::Indexed16 | CanvasMode::Indexed16_8 | CanvasMode::Indexed8 => {
                self.emit_row_indexed(i, i_max, false);
            }
            CanvasMode::FgBgBgFg => self.emit_row_fgbg_bgfg(i, i_max),
            CanvasMode::FgBg => self.emit_row_fgbg(i, i_max),
        }

        self.flush_chars();

        if emit_resets {
            self.reset_attributes();
        }
    }
}

/// Builds the whole canvas as one string. All rows except the last end in
/// a newline.
pub(crate) fn print_symbols(canvas: &Canvas, term_info: &TermInfo) -> String {
    let mut ctx = PrintCtx::new(canvas, term_info);

    for row in 0..canvas.config.height as usize {
        if row > 0 {
            ctx.out.push('\n');
        }
        ctx.emit_row(row);
    }

    ctx.out
}

/// Builds one string per cell row, with no separators between them.
pub(crate) fn print_symbol_rows(canvas: &Canvas, term_info: &TermInfo) -> Vec<String> {
    let mut ctx = PrintCtx::new(canvas, term_info);
    let mut rows = Vec::with_capacity(canvas.config.height as usize);

    for row in 0..canvas.config.height as usize {
        ctx.out = String::new();
        ctx.emit_row(row);
        rows.push(std::mem::take(&mut ctx.out));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasConfig, SymbolMap};

    fn canvas_with_cells(mode: CanvasMode, width: i32, cells: &[(char, u32, u32)]) -> Canvas {
        let config = CanvasConfig {
            width,
            height: cells.len() as i32 / width,
            canvas_mode: mode,
            symbol_map: SymbolMap::from_selectors("space,solid").unwrap(),
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::new(&config).unwrap();
        canvas.needs_clear = false;
        for (i, &(c, fg, bg)) in cells.iter().enumerate() {
            canvas.cells[i] = crate::CanvasCell {
                c,
                fg_color: fg,
                bg_color: bg,
            };
        }
        canvas
    }

    #[test]
    fn fgbg_emits_bare_glyphs() {
        let mut canvas = canvas_with_cells(CanvasMode::FgBg, 2, &[(' ', 0, 0), (' ', 0, 0)]);
        assert_eq!(canvas.print(None), "  ");
    }

    #[test]
    fn repeat_char_kicks_in_for_long_runs() {
        let cells: Vec<(char, u32, u32)> = (0..10).map(|_| ('x', 0, 0)).collect();
        let mut canvas = canvas_with_cells(CanvasMode::FgBg, 10, &cells);
        assert_eq!(canvas.print(None), "x\x1b[9b");

        canvas.config.optimizations = Optimizations::REUSE_ATTRIBUTES;
        assert_eq!(canvas.print(None), "xxxxxxxxxx");
    }

    #[test]
    fn short_runs_stay_literal() {
        let cells: Vec<(char, u32, u32)> = (0..4).map(|_| ('x', 0, 0)).collect();
        let mut canvas = canvas_with_cells(CanvasMode::FgBg, 4, &cells);
        // Four literal bytes beat "x ESC [ 3 b"
        assert_eq!(canvas.print(None), "xxxx");
    }

    #[test]
    fn indexed_reuse_skips_redundant_attributes() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let mut canvas = canvas_with_cells(
            CanvasMode::Indexed16,
            4,
            &[('a', 1, t), ('b', 1, t), ('c', 2, t), ('d', 2, t)],
        );

        let out = canvas.print(None);
        // One reset, one fg change per color run, one trailing reset
        assert_eq!(out, "\x1b[0m\x1b[31mab\x1b[32mcd\x1b[0m");
    }

    #[test]
    fn without_reuse_every_cell_carries_attributes() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let mut canvas = canvas_with_cells(CanvasMode::Indexed16, 2, &[('a', 1, t), ('b', 1, t)]);
        canvas.config.optimizations = Optimizations::REPEAT_CHAR;

        let out = canvas.print(None);
        assert_eq!(out, "\x1b[0m\x1b[0m\x1b[31ma\x1b[0m\x1b[31mb\x1b[0m");
    }

    #[test]
    fn transparent_fg_swaps_to_inverted_bg() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let mut canvas = canvas_with_cells(CanvasMode::Indexed16, 1, &[('y', t, 3)]);

        let out = canvas.print(None);
        // The BG pen moves to the FG slot under inversion
        assert_eq!(out, "\x1b[0m\x1b[7m\x1b[33my\x1b[0m");
    }

    #[test]
    fn fully_transparent_cells_print_spaces() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let mut canvas = canvas_with_cells(CanvasMode::Indexed256, 2, &[('#', t, t), ('#', t, t)]);
        let out = canvas.print(None);
        assert_eq!(out, "\x1b[0m  \x1b[0m");
    }

    #[test]
    fn extended_palette_uses_256_color_sequences() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let mut canvas = canvas_with_cells(CanvasMode::Indexed256, 1, &[('z', 196, 16)]);
        let out = canvas.print(None);
        assert_eq!(out, "\x1b[0m\x1b[38;5;196;48;5;16mz\x1b[0m");
    }

    #[test]
    fn truecolor_emits_direct_sequences() {
        let fg = Color::new(255, 0, 0, 255).pack();
        let bg = Color::new(0, 0, 255, 255).pack();
        let mut canvas = canvas_with_cells(CanvasMode::Truecolor, 1, &[('Q', fg, bg)]);
        let out = canvas.print(None);
        assert_eq!(out, "\x1b[0m\x1b[38;2;255;0;0;48;2;0;0;255mQ\x1b[0m");
    }

    #[test]
    fn fgbg_bgfg_inverts_fg_pen_background() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let fg_pen = PALETTE_INDEX_FG as u32;
        let mut canvas = canvas_with_cells(
            CanvasMode::FgBgBgFg,
            2,
            &[('\u{2588}', fg_pen, t), ('\u{2588}', t, fg_pen)],
        );

        let out = canvas.print(None);
        assert_eq!(out, "\x1b[0m\u{2588}\x1b[7m\u{2588}\x1b[0m");
    }

    #[test]
    fn fgbg_bgfg_featureless_cells_use_blank_symbol() {
        let fg_pen = PALETTE_INDEX_FG as u32;
        // fg == bg: replaced by space (present in the map), uninverted
        let mut canvas = canvas_with_cells(CanvasMode::FgBgBgFg, 1, &[('\u{2588}', fg_pen, fg_pen)]);
        let out = canvas.print(None);
        // bg is the FG pen, so inversion still applies
        assert_eq!(out, "\x1b[0m\x1b[7m \x1b[0m");
    }

    #[test]
    fn rows_are_separated_by_single_newlines() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let cells = [('a', 1, t), ('b', 1, t), ('c', 1, t), ('d', 1, t)];
        let mut canvas = canvas_with_cells(CanvasMode::Indexed16, 2, &cells);

        let out = canvas.print(None);
        assert_eq!(out.matches('\n').count(), 1);
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn print_rows_splits_without_separators() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let cells = [('a', 1, t), ('b', 1, t), ('c', 2, t), ('d', 2, t)];
        let mut canvas = canvas_with_cells(CanvasMode::Indexed16, 2, &cells);

        let rows = canvas.print_rows(None);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.contains('\n')));
        assert_eq!(rows[0], "\x1b[0m\x1b[31mab\x1b[0m");
        assert_eq!(rows[1], "\x1b[32mcd\x1b[0m");
    }

    #[test]
    fn wide_right_halves_are_skipped() {
        let t = PALETTE_INDEX_TRANSPARENT as u32;
        let mut canvas = canvas_with_cells(CanvasMode::Indexed16, 2, &[('\u{4e00}', 1, t), ('\0', 1, t)]);
        let out = canvas.print(None);
        assert_eq!(out, "\x1b[0m\x1b[31m\u{4e00}\x1b[0m");
    }
}
