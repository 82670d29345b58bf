//! Symbol bitmaps and the built-in glyph table.
//!
//! A symbol is an 8x8 monochrome image stored both as a 64-bit word (MSB =
//! top-left, scanning left-to-right then top-to-bottom) and as an expanded
//! coverage array with one byte per pixel, used directly as a pen index
//! during color accumulation. Double-width symbols are stored as a pair of
//! single-cell halves sharing one code point.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use unicode_width::UnicodeWidthChar;

mod ascii;
mod blocks;
mod misc;
mod wide;

/// Width of the symbol pixel matrix.
pub const SYMBOL_WIDTH_PIXELS: usize = 8;
/// Height of the symbol pixel matrix.
pub const SYMBOL_HEIGHT_PIXELS: usize = 8;
/// Pixels per cell.
pub const SYMBOL_N_PIXELS: usize = SYMBOL_WIDTH_PIXELS * SYMBOL_HEIGHT_PIXELS;

bitflags! {
    /// Classification tags carried by every symbol. Symbols usually match
    /// several tags; selector strings toggle membership by these.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SymbolTags: u32 {
        const SPACE     = 1 << 0;
        const SOLID     = 1 << 1;
        const STIPPLE   = 1 << 2;
        const BLOCK     = 1 << 3;
        const BORDER    = 1 << 4;
        const DIAGONAL  = 1 << 5;
        const DOT       = 1 << 6;
        const QUAD      = 1 << 7;
        const HHALF     = 1 << 8;
        const VHALF     = 1 << 9;
        const INVERTED  = 1 << 10;
        const BRAILLE   = 1 << 11;
        const TECHNICAL = 1 << 12;
        const GEOMETRIC = 1 << 13;
        const ASCII     = 1 << 14;
        const ALPHA     = 1 << 15;
        const DIGIT     = 1 << 16;
        const NARROW    = 1 << 17;
        const WIDE      = 1 << 18;
        const AMBIGUOUS = 1 << 19;
        const UGLY      = 1 << 20;
        const LEGACY    = 1 << 21;
        const SEXTANT   = 1 << 22;
        const WEDGE     = 1 << 23;
        const EXTRA     = 1 << 30;

        const HALF  = Self::HHALF.bits() | Self::VHALF.bits();
        const ALNUM = Self::ALPHA.bits() | Self::DIGIT.bits();
        /// Joint set of symbols that are excluded unless asked for by tag.
        const BAD   = Self::AMBIGUOUS.bits() | Self::UGLY.bits();
        const ALL   = !(Self::EXTRA.bits() | Self::BAD.bits());
    }
}

/// A single-cell symbol.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub c: char,
    pub tags: SymbolTags,
    pub bitmap: u64,
    /// One byte per pixel, 0 = background pen, 1 = foreground pen.
    pub coverage: [u8; SYMBOL_N_PIXELS],
    pub popcount: u16,
    pub fg_weight: u16,
    pub bg_weight: u16,
}

impl Symbol {
    pub fn from_coverage(c: char, tags: SymbolTags, coverage: [u8; SYMBOL_N_PIXELS]) -> Self {
        let mut bitmap = 0u64;
        for &p in &coverage {
            bitmap = (bitmap << 1) | p as u64;
        }
        Self::assemble(c, tags, bitmap, coverage)
    }

    pub fn from_bitmap(c: char, tags: SymbolTags, bitmap: u64) -> Self {
        let mut coverage = [0u8; SYMBOL_N_PIXELS];
        for (i, p) in coverage.iter_mut().enumerate() {
            *p = ((bitmap >> (SYMBOL_N_PIXELS - 1 - i)) & 1) as u8;
        }
        Self::assemble(c, tags, bitmap, coverage)
    }

    fn assemble(c: char, tags: SymbolTags, bitmap: u64, coverage: [u8; SYMBOL_N_PIXELS]) -> Self {
        let popcount = bitmap.count_ones() as u16;
        Symbol {
            c,
            tags,
            bitmap,
            coverage,
            popcount,
            fg_weight: popcount,
            bg_weight: SYMBOL_N_PIXELS as u16 - popcount,
        }
    }
}

/// A double-width symbol: two single-cell halves with the same code point,
/// emitted into two adjacent cells.
#[derive(Clone, Debug)]
pub struct WideSymbol {
    pub halves: [Symbol; 2],
}

impl WideSymbol {
    pub fn c(&self) -> char {
        self.halves[0].c
    }

    pub fn tags(&self) -> SymbolTags {
        self.halves[0].tags
    }

    pub fn popcount(&self) -> u16 {
        self.halves[0].popcount + self.halves[1].popcount
    }
}

/// A built-in glyph declaration: an ASCII outline ('X' = set, ' ' = clear),
/// 64 chars for narrow symbols, 128 for wide ones.
pub(crate) struct SymbolDef {
    pub tags: SymbolTags,
    pub c: char,
    pub outline: &'static str,
}

fn outline_to_coverage(outline: &[u8], x_ofs: usize, rowstride: usize) -> [u8; SYMBOL_N_PIXELS] {
    let mut coverage = [0u8; SYMBOL_N_PIXELS];
    for y in 0..SYMBOL_HEIGHT_PIXELS {
        for x in 0..SYMBOL_WIDTH_PIXELS {
            coverage[y * SYMBOL_WIDTH_PIXELS + x] = u8::from(outline[y * rowstride + x_ofs + x] == b'X');
        }
    }
    coverage
}

fn def_to_symbol(def: &SymbolDef, x_ofs: usize, rowstride: usize) -> Symbol {
    // Width tables flag many of the builtin shapes as CJK-ambiguous; the
    // explicit table knows better, so AMBIGUOUS is not inherited here.
    let tags = def.tags | (default_tags_for_char(def.c) & !SymbolTags::AMBIGUOUS);
    Symbol::from_coverage(def.c, tags, outline_to_coverage(def.outline.as_bytes(), x_ofs, rowstride))
}

/* ================ *
 * Generated ranges *
 * ================ */

/// Braille 2x4 dot patterns, U+2800..=U+28FF. The low byte of the code
/// point maps dot-for-dot onto fixed positions in the 8x8 grid.
fn generate_braille_symbols(out: &mut Vec<Symbol>) {
    for low in 0u32..=0xff {
        let c = char::from_u32(0x2800 + low).unwrap();
        let mut coverage = [0u8; SYMBOL_N_PIXELS];

        // Dot rows sit at pixel rows 0, 2, 4, 6; left dots in columns 1-2,
        // right dots in columns 5-6.
        let rows = [(0usize, 0u32, 3u32), (2, 1, 4), (4, 2, 5), (6, 6, 7)];
        for &(row, left_bit, right_bit) in &rows {
            if (low >> left_bit) & 1 != 0 {
                coverage[row * SYMBOL_WIDTH_PIXELS + 1] = 1;
                coverage[row * SYMBOL_WIDTH_PIXELS + 2] = 1;
            }
            if (low >> right_bit) & 1 != 0 {
                coverage[row * SYMBOL_WIDTH_PIXELS + 5] = 1;
                coverage[row * SYMBOL_WIDTH_PIXELS + 6] = 1;
            }
        }

        out.push(Symbol::from_coverage(c, SymbolTags::BRAILLE | SymbolTags::NARROW, coverage));
    }
}

/// Sextant 2x3 mosaics, U+1FB00..=U+1FB3A. Bit i of (cp - 0x1FB00 + 1)
/// controls one of six cells; the values that would duplicate space, the
/// half blocks and the full block are skipped in the encoding.
fn generate_sextant_symbols(out: &mut Vec<Symbol>) {
    for cp in 0x1fb00u32..0x1fb3b {
        let c = char::from_u32(cp).unwrap();
        let mut val = cp - 0x1fb00 + 1;
        if val > 20 {
            val += 1;
        }
        if val > 41 {
            val += 1;
        }

        let mut coverage = [0u8; SYMBOL_N_PIXELS];
        for y in 0..3usize {
            for x in 0..2usize {
                if val & (1 << (y * 2 + x)) == 0 {
                    continue;
                }
                for v in 0..3usize {
                    let mut row = y * 3 + v;
                    if row > 3 {
                        row -= 1;
                    }
                    for u in 0..4usize {
                        coverage[row * SYMBOL_WIDTH_PIXELS + x * 4 + u] = 1;
                    }
                }
            }
        }

        out.push(Symbol::from_coverage(
            c,
            SymbolTags::LEGACY | SymbolTags::SEXTANT | SymbolTags::NARROW,
            coverage,
        ));
    }
}

/* ================= *
 * Automatic tagging *
 * ================= */

struct CharRange {
    first: u32,
    last: u32,
}

const fn range(first: u32, last: u32) -> CharRange {
    CharRange { first, last }
}

/// Ranges treated as ambiguous-width in addition to what the width tables
/// report. Many emulators draw these glyphs well outside their cells.
static AMBIGUOUS_RANGES: &[CharRange] = &[
    range(0x00ad, 0x00ad), // Soft hyphen
    range(0x2196, 0x21ff), // Arrows (most)
    range(0x222c, 0x2237), // Mathematical ops (some)
    range(0x2245, 0x2269),
    range(0x226d, 0x2279),
    range(0x2295, 0x22af),
    range(0x22bf, 0x22bf),
    range(0x22c8, 0x22ff),
    range(0x2300, 0x23ff), // Technical
    range(0x2460, 0x24ff), // Enclosed alphanumerics
    range(0x25a0, 0x25ff), // Geometric
    range(0x2700, 0x27bf), // Dingbats
    range(0x27c0, 0x27e5), // Misc mathematical symbols A (most)
    range(0x27f0, 0x27ff), // Supplemental arrows A
    range(0x2900, 0x297f), // Supplemental arrows B
    range(0x2980, 0x29ff), // Misc mathematical symbols B
    range(0x2b00, 0x2bff), // Misc symbols and arrows
    range(0x1f100, 0x1f1ff), // Enclosed alphanumeric supplement
];

/// Emoji of various kinds, usually multicolored; no control over their
/// foreground colors and they often render at the wrong width.
static EMOJI_RANGES: &[CharRange] = &[
    range(0x2600, 0x26ff),   // Miscellaneous symbols
    range(0x1f000, 0x1fb3b), // Emoji, first part
    range(0x1fbcb, 0x1ffff), // Emoji, second part; the gap is legacy computing
    range(0x534d, 0x534d),
];

static META_RANGES: &[CharRange] = &[
    // Arabic tatweel is a modifier and not formally part of a script, so the
    // script exclusion below doesn't catch it
    range(0x0640, 0x0640),
    // Ideographic description characters convert poorly
    range(0x2ff0, 0x2fff),
];

/// RTL scripts break terminal output. Excluded as explicit block ranges:
/// Hebrew, Arabic, Syriac, Thaana, plus their presentation forms.
static RTL_RANGES: &[CharRange] = &[
    range(0x0590, 0x05ff),
    range(0x0600, 0x06ff),
    range(0x0700, 0x074f),
    range(0x0750, 0x077f),
    range(0x0780, 0x07bf),
    range(0x08a0, 0x08ff),
    range(0xfb1d, 0xfdff),
    range(0xfe70, 0xfeff),
];

fn char_in_ranges(c: char, ranges: &[CharRange]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|r| cp >= r.first && cp <= r.last)
}

/// Whether a code point may appear in output at all. Control characters,
/// zero-width characters, tab and RTL scripts would mangle the cell grid.
pub(crate) fn char_is_output_safe(c: char) -> bool {
    if c.is_control() || c == '\t' {
        return false;
    }
    match c.width() {
        None | Some(0) => return false,
        Some(_) => {}
    }
    !char_in_ranges(c, RTL_RANGES)
}

fn default_tags_for_char(c: char) -> SymbolTags {
    let mut tags = SymbolTags::empty();
    let cp = c as u32;

    if c.width() == Some(2) {
        tags |= SymbolTags::WIDE;
    } else if c.width_cjk() == Some(2) {
        tags |= SymbolTags::AMBIGUOUS;
    }

    if c.width() == Some(0) || char_in_ranges(c, AMBIGUOUS_RANGES) {
        tags |= SymbolTags::AMBIGUOUS;
    }

    if char_in_ranges(c, EMOJI_RANGES) || char_in_ranges(c, META_RANGES) {
        tags |= SymbolTags::UGLY;
    }

    if cp <= 0x7f {
        tags |= SymbolTags::ASCII;
    } else if (0x2300..=0x23ff).contains(&cp) {
        tags |= SymbolTags::TECHNICAL;
    } else if (0x25a0..=0x25ff).contains(&cp) {
        tags |= SymbolTags::GEOMETRIC;
    } else if (0x2800..=0x28ff).contains(&cp) {
        tags |= SymbolTags::BRAILLE;
    } else if (0x1fb00..=0x1fb3b).contains(&cp) {
        tags |= SymbolTags::SEXTANT;
    }

    if c.is_alphabetic() {
        tags |= SymbolTags::ALPHA;
    }
    if c.is_numeric() {
        tags |= SymbolTags::DIGIT;
    }

    if !tags.contains(SymbolTags::WIDE) {
        tags |= SymbolTags::NARROW;
    }

    tags
}

/// The tags a code point would carry, whether or not it has a built-in
/// glyph. Used for user-supplied glyphs.
pub fn tags_for_char(c: char) -> SymbolTags {
    for def in all_defs() {
        if def.c == c {
            return def.tags | (default_tags_for_char(c) & !SymbolTags::AMBIGUOUS);
        }
    }
    default_tags_for_char(c)
}

/* ====================== *
 * The global symbol table *
 * ====================== */

fn all_defs() -> impl Iterator<Item = &'static SymbolDef> {
    ascii::DEFS
        .iter()
        .chain(blocks::DEFS.iter())
        .chain(misc::DEFS.iter())
        .chain(wide::DEFS.iter())
}

pub(crate) struct BuiltinSymbols {
    pub narrow: Vec<Symbol>,
    pub wide: Vec<WideSymbol>,
}

fn init_builtin_symbols() -> BuiltinSymbols {
    let mut narrow = Vec::new();
    let mut wide = Vec::new();

    for def in all_defs() {
        match def.outline.len() {
            SYMBOL_N_PIXELS => {
                debug_assert!(def.c.width() != Some(2), "narrow outline on wide char U+{:04X}", def.c as u32);
                narrow.push(def_to_symbol(def, 0, SYMBOL_WIDTH_PIXELS));
            }
            len if len == SYMBOL_N_PIXELS * 2 => {
                let halves = [
                    def_to_symbol(def, 0, SYMBOL_WIDTH_PIXELS * 2),
                    def_to_symbol(def, SYMBOL_WIDTH_PIXELS, SYMBOL_WIDTH_PIXELS * 2),
                ];
                wide.push(WideSymbol { halves });
            }
            len => unreachable!("builtin outline for U+{:04X} has bad length {len}", def.c as u32),
        }
    }

    generate_braille_symbols(&mut narrow);
    generate_sextant_symbols(&mut narrow);

    log::debug!("builtin symbol table: {} narrow, {} wide", narrow.len(), wide.len());

    BuiltinSymbols { narrow, wide }
}

/// Built-in glyphs and their tags; immutable after first use.
pub(crate) static BUILTIN_SYMBOLS: Lazy<BuiltinSymbols> = Lazy::new(init_builtin_symbols);
