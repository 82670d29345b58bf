//! The canvas: configuration snapshot, cell grid, palettes and the
//! orchestration of a draw.
//!
//! A canvas takes a private copy of its configuration at creation and is
//! not affected by later changes to it. `draw_all_pixels` rebuilds the
//! cell grid from a source image; `print` serializes the grid into
//! terminal control sequences.

use bitflags::bitflags;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use textel_term::TermInfo;
use unicode_width::UnicodeWidthChar;

use crate::{
    base_intensity_for_mode, pixops, printer, renderer, Color, ColorPair, ColorSpace, Dither, DitherMode, EngineError,
    Palette, PaletteType, Result, SymbolMap, PALETTE_INDEX_BG, PALETTE_INDEX_FG, PALETTE_INDEX_TRANSPARENT, PEN_BG,
    PEN_FG, SYMBOL_HEIGHT_PIXELS, SYMBOL_WIDTH_PIXELS,
};

/// Upper bound on the intermediate pixel buffer; larger canvases fail the
/// draw rather than the allocator.
const MAX_PIXEL_BUFFER: usize = 1 << 27;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasMode {
    /// 24-bit direct color.
    #[default]
    Truecolor,
    /// The 256-color xterm palette.
    Indexed256,
    /// The 256-color palette without the low 16 pens.
    Indexed240,
    /// 16 colors for both pens.
    Indexed16,
    /// 16 foreground colors over 8 background colors.
    Indexed16_8,
    /// 8 colors for both pens.
    Indexed8,
    /// Default colors only, but inversion is allowed.
    FgBgBgFg,
    /// Default colors only, no attributes at all.
    FgBg,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelMode {
    /// Unicode symbols; the mode this crate implements.
    #[default]
    Symbols,
    /// Sixel graphics (external backend).
    Sixels,
    /// Kitty graphics protocol (external backend).
    Kitty,
    /// iTerm2 inline images (external backend).
    Iterm2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorExtractor {
    #[default]
    Average,
    Median,
}

bitflags! {
    /// Printer output optimizations. Disabling them changes the bytes, not
    /// the rendered display.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Optimizations: u32 {
        /// Run-length encode repeated glyphs with the repeat-char sequence.
        const REPEAT_CHAR = 1 << 0;
        /// Only emit attributes that differ from the current state.
        const REUSE_ATTRIBUTES = 1 << 1;

        const ALL = Self::REPEAT_CHAR.bits() | Self::REUSE_ATTRIBUTES.bits();
    }
}

impl Default for Optimizations {
    fn default() -> Self {
        Optimizations::ALL
    }
}

/// One character cell. Colors are packed RGBA in truecolor mode, palette
/// indices otherwise. The right half of a wide symbol has `c == '\0'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CanvasCell {
    pub c: char,
    pub fg_color: u32,
    pub bg_color: u32,
}

impl CanvasCell {
    pub(crate) fn blank() -> Self {
        CanvasCell {
            c: ' ',
            fg_color: 0,
            bg_color: 0,
        }
    }
}

/// Everything a [`Canvas`] needs to know at creation time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas size in character cells.
    pub width: i32,
    pub height: i32,

    pub canvas_mode: CanvasMode,
    pub pixel_mode: PixelMode,
    pub color_space: ColorSpace,
    pub color_extractor: ColorExtractor,
    pub optimizations: Optimizations,

    /// Render with the foreground pen only; forced on in FgBg mode.
    pub fg_only_enabled: bool,

    /// Quality/speed tradeoff in 0.0..=1.0. Scaled by 10 and clamped to
    /// 1..=8 to pick the candidate count; at 8 and above the renderer
    /// switches to the exhaustive path.
    pub work_factor: f32,

    /// Pixels with alpha below this are treated as fully transparent.
    pub alpha_threshold: u16,

    /// Canvas default colors, packed 0x00RRGGBB.
    pub fg_color_packed_rgb: u32,
    pub bg_color_packed_rgb: u32,

    pub dither_mode: DitherMode,
    pub dither_intensity: f32,
    pub dither_grain_width: u32,
    pub dither_grain_height: u32,

    /// Cell geometry in pixels, used by the pixel-mode backends.
    pub cell_width: i32,
    pub cell_height: i32,

    pub preprocessing_enabled: bool,

    #[serde(skip)]
    pub symbol_map: SymbolMap,
    #[serde(skip)]
    pub fill_symbol_map: SymbolMap,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let mut symbol_map = SymbolMap::new();
        symbol_map.add_by_tags(crate::SymbolTags::ALL);

        CanvasConfig {
            width: 80,
            height: 24,
            canvas_mode: CanvasMode::Truecolor,
            pixel_mode: PixelMode::Symbols,
            color_space: ColorSpace::Rgb,
            color_extractor: ColorExtractor::Average,
            optimizations: Optimizations::ALL,
            fg_only_enabled: false,
            work_factor: 0.5,
            alpha_threshold: 127,
            fg_color_packed_rgb: 0x00ff_ffff,
            bg_color_packed_rgb: 0x0000_0000,
            dither_mode: DitherMode::None,
            dither_intensity: 1.0,
            dither_grain_width: 4,
            dither_grain_height: 4,
            cell_width: 8,
            cell_height: 8,
            preprocessing_enabled: true,
            symbol_map,
            fill_symbol_map: SymbolMap::new(),
        }
    }
}

/// A canvas that renders to text.
pub struct Canvas {
    pub(crate) config: CanvasConfig,

    pub(crate) width_pixels: usize,
    pub(crate) height_pixels: usize,
    pub(crate) cells: Vec<CanvasCell>,

    pub(crate) default_colors: ColorPair,
    pub(crate) fg_palette: Palette,
    pub(crate) bg_palette: Palette,
    pub(crate) dither: Dither,

    pub(crate) work_factor_int: u32,
    pub(crate) consider_inverted: bool,
    pub(crate) extract_colors: bool,
    pub(crate) use_quantized_error: bool,
    pub(crate) have_alpha: bool,
    pub(crate) needs_clear: bool,

    /// Character used where fg color equals bg color; typically space.
    pub(crate) blank_char: char,
    /// Densest character available, if any; typically the solid block.
    pub(crate) solid_char: Option<char>,
}

impl Canvas {
    /// Creates a canvas from a private copy of `config`.
    pub fn new(config: &CanvasConfig) -> Result<Canvas> {
        if config.width < 1 || config.height < 1 {
            return Err(EngineError::EmptyCanvas {
                width: config.width,
                height: config.height,
            });
        }

        let mut config = config.clone();

        let (width_pixels, height_pixels) = match config.pixel_mode {
            PixelMode::Symbols => (
                config.width as usize * SYMBOL_WIDTH_PIXELS,
                config.height as usize * SYMBOL_HEIGHT_PIXELS,
            ),
            _ => (
                (config.width * config.cell_width) as usize,
                (config.height * config.cell_height) as usize,
            ),
        };

        let consider_inverted = !(config.fg_only_enabled || config.canvas_mode == CanvasMode::FgBg);
        let extract_colors = !matches!(config.canvas_mode, CanvasMode::FgBg | CanvasMode::FgBgBgFg);

        if config.canvas_mode == CanvasMode::FgBg {
            config.fg_only_enabled = true;
        }

        let use_quantized_error = config.canvas_mode == CanvasMode::Indexed16_8 && !config.fg_only_enabled;

        config.symbol_map.prepare();
        config.fill_symbol_map.prepare();

        // Truecolor symbol output can't express fancy color spaces in its
        // control codes, and has no reason to dither either. Same for the
        // raster backends, which receive full-color data.
        if matches!(config.pixel_mode, PixelMode::Kitty | PixelMode::Iterm2)
            || (config.canvas_mode == CanvasMode::Truecolor && config.pixel_mode == PixelMode::Symbols)
        {
            config.color_space = ColorSpace::Rgb;
            config.dither_mode = DitherMode::None;
        }

        let base_intensity = if config.dither_mode == DitherMode::Ordered {
            base_intensity_for_mode(config.canvas_mode)
        } else {
            1.0
        };
        let dither = Dither::new(
            config.dither_mode,
            base_intensity * config.dither_intensity,
            config.dither_grain_width,
            config.dither_grain_height,
        );

        let work_factor_int = (config.work_factor * 10.0 + 0.5) as u32;
        let n_cells = (config.width * config.height) as usize;

        let mut canvas = Canvas {
            width_pixels,
            height_pixels,
            cells: vec![CanvasCell::blank(); n_cells],
            default_colors: ColorPair::default(),
            fg_palette: Palette::new(PaletteType::Dynamic256),
            bg_palette: Palette::new(PaletteType::Dynamic256),
            dither,
            work_factor_int,
            consider_inverted,
            extract_colors,
            use_quantized_error,
            have_alpha: false,
            needs_clear: true,
            blank_char: ' ',
            solid_char: None,
            config,
        };

        canvas.blank_char = canvas.find_best_blank_char();
        canvas.solid_char = canvas.find_best_solid_char();
        canvas.update_display_colors();
        canvas.setup_palettes();

        log::debug!(
            "canvas: {}x{} cells, {}x{} px, mode {:?}, {} symbols",
            canvas.config.width,
            canvas.config.height,
            canvas.width_pixels,
            canvas.height_pixels,
            canvas.config.canvas_mode,
            canvas.config.symbol_map.n_symbols()
        );

        Ok(canvas)
    }

    /// Creates a fresh canvas configured like this one.
    pub fn new_like(&self) -> Canvas {
        Canvas::new(&self.config).expect("existing canvas has a valid configuration")
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    /// Whether the last drawn image contained transparent pixels after
    /// alpha thresholding.
    pub fn have_alpha(&self) -> bool {
        self.have_alpha
    }

    fn setup_palettes(&mut self) {
        let (fg_type, bg_type) = match self.config.canvas_mode {
            CanvasMode::Truecolor => (PaletteType::Dynamic256, PaletteType::Dynamic256),
            CanvasMode::Indexed256 => (PaletteType::Fixed256, PaletteType::Fixed256),
            CanvasMode::Indexed240 => (PaletteType::Fixed240, PaletteType::Fixed240),
            CanvasMode::Indexed16 => (PaletteType::Fixed16, PaletteType::Fixed16),
            CanvasMode::Indexed16_8 => (PaletteType::Fixed16, PaletteType::Fixed8),
            CanvasMode::Indexed8 => (PaletteType::Fixed8, PaletteType::Fixed8),
            CanvasMode::FgBgBgFg | CanvasMode::FgBg => (PaletteType::FixedFgBg, PaletteType::FixedFgBg),
        };

        let mut fg_col = Color::unpack(self.config.fg_color_packed_rgb);
        let mut bg_col = Color::unpack(self.config.bg_color_packed_rgb);
        fg_col.ch[3] = 0xff;
        bg_col.ch[3] = 0x00;

        for (palette, palette_type) in [(&mut self.fg_palette, fg_type), (&mut self.bg_palette, bg_type)] {
            *palette = Palette::new(palette_type);
            palette.set_color(PALETTE_INDEX_FG, fg_col);
            palette.set_color(PALETTE_INDEX_BG, bg_col);
            palette.set_alpha_threshold(self.config.alpha_threshold);
        }
    }

    fn update_display_colors(&mut self) {
        let mut fg_col = Color::unpack(self.config.fg_color_packed_rgb);
        let mut bg_col = Color::unpack(self.config.bg_color_packed_rgb);

        if self.config.color_space == ColorSpace::Din99d {
            fg_col = fg_col.rgb_to_din99d();
            bg_col = bg_col.rgb_to_din99d();
        }

        fg_col.ch[3] = 0xff;
        bg_col.ch[3] = 0x00;
        self.default_colors.colors[PEN_FG] = fg_col;
        self.default_colors.colors[PEN_BG] = bg_col;

        // When holding the BG pen, symbol selection by outline needs a
        // consistent stand-in FG: 50% gray works as an average of all
        // possible colors. The BG must differ from it by a margin, so
        // each channel is pushed at least 5 away if needed.
        if self.extract_colors && self.config.fg_only_enabled {
            self.default_colors.colors[PEN_FG] = Color::unpack(0xff7f_7f7f);
            for i in 0..3 {
                let reference = self.default_colors.colors[PEN_FG].ch[i];
                let dest = &mut self.default_colors.colors[PEN_BG].ch[i];
                let diff = *dest as i32 - reference as i32;
                if (-5..=0).contains(&diff) {
                    *dest = (reference as i32 - 5).max(0) as u8;
                } else if (0..=5).contains(&diff) {
                    *dest = (reference as i32 + 5).min(255) as u8;
                }
            }
        }
    }

    fn find_best_blank_char(&self) -> char {
        if self.config.symbol_map.has_symbol(' ') || self.config.fill_symbol_map.has_symbol(' ') {
            return ' ';
        }

        if let Some(cand) = self.config.fill_symbol_map.find_fill_candidate(0, false) {
            return self.config.fill_symbol_map.symbols()[cand.symbol_index].c;
        }

        if let Some(cand) = self.config.symbol_map.find_candidates(0, false, 1).first() {
            return self.config.symbol_map.symbols()[cand.symbol_index].c;
        }

        ' '
    }

    fn find_best_solid_char(&self) -> Option<char> {
        if self.config.symbol_map.has_symbol('\u{2588}') || self.config.fill_symbol_map.has_symbol('\u{2588}') {
            return Some('\u{2588}');
        }

        if let Some(cand) = self.config.fill_symbol_map.find_fill_candidate(64, false) {
            if cand.hamming_distance <= 32 {
                return Some(self.config.fill_symbol_map.symbols()[cand.symbol_index].c);
            }
        }

        if let Some(cand) = self.config.symbol_map.find_candidates(!0u64, false, 1).first() {
            if cand.hamming_distance <= 32 {
                return Some(self.config.symbol_map.symbols()[cand.symbol_index].c);
            }
        }

        None
    }

    /// Replaces the canvas contents with `src`, rescaled and rendered to
    /// symbols. On failure the cell grid is left untouched; a subsequent
    /// `print` yields the previous (or cleared) contents.
    pub fn draw_all_pixels(&mut self, src: &DynamicImage) -> Result<()> {
        if src.width() == 0 || src.height() == 0 {
            return Err(EngineError::EmptySource);
        }
        if self.config.pixel_mode != PixelMode::Symbols {
            return Err(EngineError::UnsupportedPixelMode);
        }
        if self.width_pixels.saturating_mul(self.height_pixels) > MAX_PIXEL_BUFFER {
            log::warn!(
                "canvas too large: {}x{} px pixel buffer refused",
                self.width_pixels,
                self.height_pixels
            );
            return Err(EngineError::CanvasTooBig {
                width: self.config.width,
                height: self.config.height,
            });
        }

        let few_colors = matches!(
            self.config.canvas_mode,
            CanvasMode::Indexed16 | CanvasMode::Indexed16_8 | CanvasMode::Indexed8 | CanvasMode::FgBg | CanvasMode::FgBgBgFg
        );
        let prep = pixops::PixelPrep {
            fg_palette: &self.fg_palette,
            dither: &self.dither,
            color_space: self.config.color_space,
            preprocessing: self.config.preprocessing_enabled && few_colors,
            alpha_threshold: self.config.alpha_threshold,
        };

        let (pixels, have_alpha) = pixops::prepare_pixels(&prep, src, self.width_pixels, self.height_pixels, None);
        self.have_alpha = if self.config.alpha_threshold == 0 { false } else { have_alpha };

        let ctx = renderer::RenderContext {
            config: &self.config,
            fg_palette: &self.fg_palette,
            bg_palette: &self.bg_palette,
            default_colors: self.default_colors,
            work_factor_int: self.work_factor_int,
            consider_inverted: self.consider_inverted,
            extract_colors: self.extract_colors,
            use_quantized_error: self.use_quantized_error,
            blank_char: self.blank_char,
            solid_char: self.solid_char,
            pixels: &pixels,
            width_pixels: self.width_pixels,
        };
        renderer::render_cells(&ctx, &mut self.cells);

        self.needs_clear = false;
        Ok(())
    }

    pub(crate) fn maybe_clear(&mut self) {
        if !self.needs_clear {
            return;
        }
        for cell in &mut self.cells {
            *cell = CanvasCell::blank();
        }
    }

    /// Builds a UTF-8 string of control sequences and symbols representing
    /// the canvas contents. All rows except the last end in a newline.
    pub fn print(&mut self, term_info: Option<&TermInfo>) -> String {
        self.maybe_clear();
        let fallback = TermInfo::fallback();
        printer::print_symbols(self, term_info.unwrap_or(&fallback))
    }

    /// Like [`print`](Self::print), but returns one string per cell row,
    /// with no separators. Row positioning is left to the caller.
    pub fn print_rows(&mut self, term_info: Option<&TermInfo>) -> Vec<String> {
        self.maybe_clear();
        let fallback = TermInfo::fallback();
        printer::print_symbol_rows(self, term_info.unwrap_or(&fallback))
    }

    fn cell_index(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && x < self.config.width && y >= 0 && y < self.config.height,
            "cell ({x}, {y}) out of bounds"
        );
        (y * self.config.width + x) as usize
    }

    /// The character at cell (x, y). The right half of a wide character
    /// reads as `'\0'`.
    pub fn char_at(&self, x: i32, y: i32) -> char {
        self.cells[self.cell_index(x, y)].c
    }

    /// Sets the character at cell (x, y) and returns the number of cells
    /// written (0, 1 or 2). Wide characters occupy the addressed cell and
    /// the one to its right; overwriting half of an existing wide
    /// character blanks the other half. Nonprintable and zero-width input
    /// is ignored.
    pub fn set_char_at(&mut self, x: i32, y: i32, c: char) -> usize {
        let index = self.cell_index(x, y);

        if !crate::char_is_output_safe(c) {
            return 0;
        }

        let cwidth = if c.width() == Some(2) { 2 } else { 1 };
        if x + cwidth > self.config.width {
            return 0;
        }

        self.cells[index].c = c;
        if cwidth == 2 {
            let (fg, bg) = (self.cells[index].fg_color, self.cells[index].bg_color);
            self.cells[index + 1] = CanvasCell {
                c: '\0',
                fg_color: fg,
                bg_color: bg,
            };
        }

        // Overwriting the right half of a wide character: clear its left
        // half
        if x > 0 {
            let left = &mut self.cells[index - 1];
            if left.c != '\0' && left.c.width() == Some(2) {
                left.c = self.blank_char;
            }
        }

        cwidth as usize
    }

    fn color_to_rgb(&self, color: Color) -> i32 {
        let color = color.threshold_alpha(self.config.alpha_threshold);
        if color.ch[3] == 0 {
            return -1;
        }
        ((color.ch[0] as i32) << 16) | ((color.ch[1] as i32) << 8) | color.ch[2] as i32
    }

    fn rgb_to_color(rgb: i32) -> Color {
        if rgb < 0 {
            Color::new(0x80, 0x80, 0x80, 0x00)
        } else {
            Color::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xff)
        }
    }

    fn index_for_rgb(&self, palette: &Palette, rgb: i32) -> u32 {
        if rgb < 0 {
            return PALETTE_INDEX_TRANSPARENT as u32;
        }
        palette.lookup_nearest(self.config.color_space, Self::rgb_to_color(rgb)).index[0] as u32
    }

    /// The colors at cell (x, y): -1 for transparency, packed 0x00RRGGBB
    /// otherwise. In indexed modes the palette lookup is done for you.
    pub fn colors_at(&self, x: i32, y: i32) -> (i32, i32) {
        let cell = &self.cells[self.cell_index(x, y)];

        match self.config.canvas_mode {
            CanvasMode::Truecolor => (
                self.color_to_rgb(Color::unpack(cell.fg_color)),
                self.color_to_rgb(Color::unpack(cell.bg_color)),
            ),
            _ => {
                let resolve = |palette: &Palette, index: u32| -> i32 {
                    if index == PALETTE_INDEX_BG as u32 || index == PALETTE_INDEX_TRANSPARENT as u32 {
                        -1
                    } else {
                        self.color_to_rgb(palette.color(ColorSpace::Rgb, index as u16))
                    }
                };
                (resolve(&self.fg_palette, cell.fg_color), resolve(&self.bg_palette, cell.bg_color))
            }
        }
    }

    /// Sets the colors at cell (x, y); -1 for transparency, packed
    /// 0x00RRGGBB otherwise. Both halves of a wide character are kept in
    /// sync.
    pub fn set_colors_at(&mut self, x: i32, y: i32, fg: i32, bg: i32) {
        let index = self.cell_index(x, y);

        let (fg_color, bg_color) = match self.config.canvas_mode {
            CanvasMode::Truecolor => (Self::rgb_to_color(fg).pack(), Self::rgb_to_color(bg).pack()),
            CanvasMode::FgBgBgFg => (
                if fg >= 0 { PALETTE_INDEX_FG as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
                if bg >= 0 { PALETTE_INDEX_FG as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
            ),
            CanvasMode::FgBg => (
                if fg >= 0 { fg as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
                self.cells[index].bg_color,
            ),
            _ => (
                self.index_for_rgb(&self.fg_palette, fg),
                self.index_for_rgb(&self.bg_palette, bg),
            ),
        };

        self.cells[index].fg_color = fg_color;
        self.cells[index].bg_color = bg_color;
        self.sync_wide_halves(index);
    }

    /// The raw per-cell color values: packed RGB in truecolor mode, pen
    /// indices in indexed modes, -1 for transparency.
    pub fn raw_colors_at(&self, x: i32, y: i32) -> (i32, i32) {
        let cell = &self.cells[self.cell_index(x, y)];

        match self.config.canvas_mode {
            CanvasMode::Truecolor => (
                self.color_to_rgb(Color::unpack(cell.fg_color)),
                self.color_to_rgb(Color::unpack(cell.bg_color)),
            ),
            CanvasMode::FgBgBgFg => (
                if cell.fg_color == PALETTE_INDEX_FG as u32 { 0 } else { -1 },
                if cell.bg_color == PALETTE_INDEX_FG as u32 { 0 } else { -1 },
            ),
            CanvasMode::FgBg => (0, -1),
            _ => (
                if cell.fg_color < 256 { cell.fg_color as i32 } else { -1 },
                if cell.bg_color < 256 { cell.bg_color as i32 } else { -1 },
            ),
        }
    }

    /// Sets the raw per-cell color values; see
    /// [`raw_colors_at`](Self::raw_colors_at) for the representation.
    pub fn set_raw_colors_at(&mut self, x: i32, y: i32, fg: i32, bg: i32) {
        let index = self.cell_index(x, y);

        let (fg_color, bg_color) = match self.config.canvas_mode {
            CanvasMode::Truecolor => (Self::rgb_to_color(fg).pack(), Self::rgb_to_color(bg).pack()),
            CanvasMode::FgBgBgFg => (
                if fg >= 0 { PALETTE_INDEX_FG as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
                if bg >= 0 { PALETTE_INDEX_FG as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
            ),
            CanvasMode::FgBg => (
                if fg >= 0 { fg as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
                self.cells[index].bg_color,
            ),
            _ => (
                if fg >= 0 { fg as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
                if bg >= 0 { bg as u32 } else { PALETTE_INDEX_TRANSPARENT as u32 },
            ),
        };

        self.cells[index].fg_color = fg_color;
        self.cells[index].bg_color = bg_color;
        self.sync_wide_halves(index);
    }

    /// Coloring half of a wide character colors the other half too.
    fn sync_wide_halves(&mut self, index: usize) {
        let (fg, bg) = (self.cells[index].fg_color, self.cells[index].bg_color);

        if index > 0 && self.cells[index].c == '\0' {
            self.cells[index - 1].fg_color = fg;
            self.cells[index - 1].bg_color = bg;
        }
        if index + 1 < self.cells.len() && self.cells[index + 1].c == '\0' {
            self.cells[index + 1].fg_color = fg;
            self.cells[index + 1].bg_color = bg;
        }
    }
}
