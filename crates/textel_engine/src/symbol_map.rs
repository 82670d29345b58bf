//! Symbol selection: which glyphs the renderer may use.
//!
//! A map holds a list of *selectors* (tag masks or code point ranges, each
//! additive or subtractive) plus optional user glyphs. [`SymbolMap::prepare`]
//! evaluates the selectors over the built-in table and the user glyphs and
//! compiles the active set: a popcount-sorted symbol list mirrored by a
//! packed bitmap array for the Hamming candidate scan.

use std::collections::BTreeMap;

use image::DynamicImage;
use unicode_width::UnicodeWidthChar;

use crate::{
    char_is_output_safe, tags_for_char, EngineError, Result, Symbol, SymbolTags, WideSymbol, BUILTIN_SYMBOLS,
    SYMBOL_HEIGHT_PIXELS, SYMBOL_N_PIXELS, SYMBOL_WIDTH_PIXELS,
};

/// Max number of candidates returned by [`SymbolMap::find_candidates`].
pub const N_CANDIDATES_MAX: usize = 8;

/// One match from a candidate search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub symbol_index: usize,
    pub hamming_distance: u16,
    pub is_inverted: bool,
}

#[derive(Clone, Copy, Debug)]
enum Selector {
    Tags { tags: SymbolTags, additive: bool },
    Range { first: u32, last: u32, additive: bool },
}

impl Selector {
    fn is_additive(self) -> bool {
        match self {
            Selector::Tags { additive, .. } | Selector::Range { additive, .. } => additive,
        }
    }
}

/// An ordered selection of textual symbols.
#[derive(Clone, Debug)]
pub struct SymbolMap {
    selectors: Vec<Selector>,
    use_builtin_glyphs: bool,
    user_glyphs: BTreeMap<char, u64>,
    user_glyphs_wide: BTreeMap<char, [u64; 2]>,

    need_rebuild: bool,
    symbols: Vec<Symbol>,
    wide_symbols: Vec<WideSymbol>,
    packed_bitmaps: Vec<u64>,
    packed_bitmaps_wide: Vec<[u64; 2]>,
}

impl Default for SymbolMap {
    fn default() -> Self {
        SymbolMap {
            selectors: Vec::new(),
            use_builtin_glyphs: true,
            user_glyphs: BTreeMap::new(),
            user_glyphs_wide: BTreeMap::new(),
            need_rebuild: true,
            symbols: Vec::new(),
            wide_symbols: Vec::new(),
            packed_bitmaps: Vec::new(),
            packed_bitmaps_wide: Vec::new(),
        }
    }
}

impl SymbolMap {
    /// A map that starts out empty; add symbols with selectors.
    pub fn new() -> Self {
        SymbolMap::default()
    }

    /// Convenience: a map built from a selector string.
    pub fn from_selectors(selectors: &str) -> Result<Self> {
        let mut map = SymbolMap::new();
        map.apply_selectors(selectors)?;
        Ok(map)
    }

    pub fn allow_builtin_glyphs(&self) -> bool {
        self.use_builtin_glyphs
    }

    pub fn set_allow_builtin_glyphs(&mut self, allow: bool) {
        if self.use_builtin_glyphs == allow {
            return;
        }
        self.use_builtin_glyphs = allow;
        self.need_rebuild = true;
    }

    pub fn add_by_tags(&mut self, tags: SymbolTags) {
        self.selectors.push(Selector::Tags { tags, additive: true });
        self.need_rebuild = true;
    }

    pub fn remove_by_tags(&mut self, tags: SymbolTags) {
        self.selectors.push(Selector::Tags { tags, additive: false });
        self.need_rebuild = true;
    }

    /// Code points are inclusive on both ends.
    pub fn add_by_range(&mut self, first: char, last: char) {
        self.selectors.push(Selector::Range {
            first: first as u32,
            last: last as u32,
            additive: true,
        });
        self.need_rebuild = true;
    }

    pub fn remove_by_range(&mut self, first: char, last: char) {
        self.selectors.push(Selector::Range {
            first: first as u32,
            last: last as u32,
            additive: false,
        });
        self.need_rebuild = true;
    }

    /// Parses a string of selectors separated by `,`, `+` and `-` and
    /// applies it to the map. If the string begins with an explicit sign
    /// it modifies the current selection, otherwise it replaces it.
    ///
    /// Example: `"block,border-dot+u2500..u257f"`.
    ///
    /// On a parse error the map is left unchanged.
    pub fn apply_selectors(&mut self, selectors: &str) -> Result<()> {
        let parsed = parse_selector_string(selectors)?;

        if parsed.replace {
            self.selectors = parsed.selectors;
        } else {
            self.selectors.extend(parsed.selectors);
        }
        self.need_rebuild = true;
        Ok(())
    }

    /// Assigns a rendered glyph to a code point, overriding any built-in.
    /// If the raster has an alpha channel it supplies the shape, otherwise
    /// the average of the color channels does.
    pub fn add_glyph(&mut self, code_point: char, pixels: &DynamicImage) -> Result<()> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(EngineError::EmptyGlyph {
                width: pixels.width(),
                height: pixels.height(),
            });
        }
        if !char_is_output_safe(code_point) {
            return Err(EngineError::UnsupportedGlyphCodePoint {
                code_point: code_point as u32,
            });
        }

        if code_point.width() == Some(2) {
            let (left, right) = glyph_to_bitmap_wide(pixels);
            self.user_glyphs_wide.insert(code_point, [left, right]);
        } else {
            self.user_glyphs.insert(code_point, glyph_to_bitmap(pixels));
        }

        self.need_rebuild = true;
        Ok(())
    }

    /// Compiles the active symbol set. Idempotent; cheap when nothing has
    /// changed since the last call.
    pub fn prepare(&mut self) {
        if !self.need_rebuild {
            return;
        }

        let mut narrow: BTreeMap<char, Symbol> = BTreeMap::new();
        let mut wide: BTreeMap<char, WideSymbol> = BTreeMap::new();

        if self.use_builtin_glyphs {
            for sym in &BUILTIN_SYMBOLS.narrow {
                if self.char_is_selected(sym.tags, sym.c) {
                    narrow.insert(sym.c, sym.clone());
                }
            }
            for sym in &BUILTIN_SYMBOLS.wide {
                if self.char_is_selected(sym.tags(), sym.c()) {
                    wide.insert(sym.c(), sym.clone());
                }
            }
        }

        // User glyphs override built-ins for the same code point
        for (&c, &bitmap) in &self.user_glyphs {
            let tags = tags_for_char(c);
            if self.char_is_selected(tags, c) {
                narrow.insert(c, Symbol::from_bitmap(c, tags, bitmap));
            }
        }
        for (&c, &bitmaps) in &self.user_glyphs_wide {
            let tags = tags_for_char(c);
            if self.char_is_selected(tags, c) {
                wide.insert(
                    c,
                    WideSymbol {
                        halves: [Symbol::from_bitmap(c, tags, bitmaps[0]), Symbol::from_bitmap(c, tags, bitmaps[1])],
                    },
                );
            }
        }

        self.symbols = narrow.into_values().collect();
        self.symbols.sort_by_key(|sym| sym.popcount);
        self.packed_bitmaps = self.symbols.iter().map(|sym| sym.bitmap).collect();

        self.wide_symbols = wide.into_values().collect();
        self.wide_symbols.sort_by_key(WideSymbol::popcount);
        self.packed_bitmaps_wide = self
            .wide_symbols
            .iter()
            .map(|sym| [sym.halves[0].bitmap, sym.halves[1].bitmap])
            .collect();

        self.need_rebuild = false;
        log::debug!(
            "symbol map compiled: {} narrow, {} wide symbols",
            self.symbols.len(),
            self.wide_symbols.len()
        );
    }

    fn char_is_selected(&self, tags: SymbolTags, c: char) -> bool {
        if !char_is_output_safe(c) {
            return false;
        }

        // A leading subtractive selector means "start from everything"
        let mut is_selected = matches!(self.selectors.first(), Some(sel) if !sel.is_additive());
        let mut auto_exclude = SymbolTags::BAD;
        let cp = c as u32;

        for selector in &self.selectors {
            match *selector {
                Selector::Tags { tags: sel_tags, additive } => {
                    if tags.intersects(sel_tags) {
                        is_selected = additive;
                    }
                    // Undesirable symbols stay excluded unless the user
                    // names their tag explicitly. Ranges don't opt in:
                    // "0..fffff" won't match UGLY, but "-ugly+0..fffff"
                    // will.
                    auto_exclude &= !sel_tags;
                }
                Selector::Range { first, last, additive } => {
                    if cp >= first && cp <= last {
                        is_selected = additive;
                    }
                }
            }
        }

        if tags.intersects(auto_exclude) {
            is_selected = false;
        }

        is_selected
    }

    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    pub fn n_wide_symbols(&self) -> usize {
        self.wide_symbols.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn wide_symbols(&self) -> &[WideSymbol] {
        &self.wide_symbols
    }

    /// Whether the prepared map contains a symbol for `c`.
    pub fn has_symbol(&self, c: char) -> bool {
        debug_assert!(!self.need_rebuild);
        self.symbols.iter().any(|sym| sym.c == c) || self.wide_symbols.iter().any(|sym| sym.c() == c)
    }

    /// Finds up to `max` symbols closest to `bitmap` by Hamming distance,
    /// nearest first. With `consider_inverted`, each symbol is also tried
    /// with its pens swapped (distance `64 - d`).
    pub fn find_candidates(&self, bitmap: u64, consider_inverted: bool, max: usize) -> Vec<Candidate> {
        debug_assert!(!self.need_rebuild);
        let mut list = CandidateList::new(65);

        for (i, &sym_bitmap) in self.packed_bitmaps.iter().enumerate() {
            let hd = (bitmap ^ sym_bitmap).count_ones() as u16;
            list.consider(i, hd, false);
            if consider_inverted {
                list.consider(i, 64 - hd, true);
            }
        }

        list.into_vec(max)
    }

    /// Wide variant of [`find_candidates`](Self::find_candidates); distances
    /// run over both halves (max Hamming 128).
    pub fn find_candidates_wide(&self, bitmaps: [u64; 2], consider_inverted: bool, max: usize) -> Vec<Candidate> {
        debug_assert!(!self.need_rebuild);
        let mut list = CandidateList::new(129);

        for (i, sym_bitmaps) in self.packed_bitmaps_wide.iter().enumerate() {
            let hd = ((bitmaps[0] ^ sym_bitmaps[0]).count_ones() + (bitmaps[1] ^ sym_bitmaps[1]).count_ones()) as u16;
            list.consider(i, hd, false);
            if consider_inverted {
                list.consider(i, 128 - hd, true);
            }
        }

        list.into_vec(max)
    }

    /// Finds the symbol whose popcount is closest to `popcount`. With
    /// `consider_inverted`, the complement popcount is tried as well and
    /// the nearer match wins.
    pub fn find_fill_candidate(&self, popcount: u16, consider_inverted: bool) -> Option<Candidate> {
        debug_assert!(!self.need_rebuild);
        if self.symbols.is_empty() {
            return None;
        }

        let index = closest_popcount_index(&self.symbols, popcount, |sym| sym.popcount);
        let mut best = Candidate {
            symbol_index: index,
            hamming_distance: self.symbols[index].popcount.abs_diff(popcount),
            is_inverted: false,
        };

        if consider_inverted && best.hamming_distance != 0 {
            let inv_popcount = SYMBOL_N_PIXELS as u16 - popcount;
            let index = closest_popcount_index(&self.symbols, inv_popcount, |sym| sym.popcount);
            let distance = self.symbols[index].popcount.abs_diff(inv_popcount);
            if distance < best.hamming_distance {
                best = Candidate {
                    symbol_index: index,
                    hamming_distance: distance,
                    is_inverted: true,
                };
            }
        }

        Some(best)
    }

    /// Wide variant of [`find_fill_candidate`](Self::find_fill_candidate);
    /// the target popcount may go up to 128.
    pub fn find_fill_candidate_wide(&self, popcount: u16, consider_inverted: bool) -> Option<Candidate> {
        debug_assert!(!self.need_rebuild);
        if self.wide_symbols.is_empty() {
            return None;
        }

        let index = closest_popcount_index(&self.wide_symbols, popcount, WideSymbol::popcount);
        let mut best = Candidate {
            symbol_index: index,
            hamming_distance: self.wide_symbols[index].popcount().abs_diff(popcount),
            is_inverted: false,
        };

        if consider_inverted && best.hamming_distance != 0 {
            let inv_popcount = 2 * SYMBOL_N_PIXELS as u16 - popcount;
            let index = closest_popcount_index(&self.wide_symbols, inv_popcount, WideSymbol::popcount);
            let distance = self.wide_symbols[index].popcount().abs_diff(inv_popcount);
            if distance < best.hamming_distance {
                best = Candidate {
                    symbol_index: index,
                    hamming_distance: distance,
                    is_inverted: true,
                };
            }
        }

        Some(best)
    }
}

/// Fixed-size sorted candidate insertion. Slots start at a sentinel
/// distance greater than any real one, which keeps the bookkeeping to a
/// single comparison against the last slot.
struct CandidateList {
    slots: [Candidate; N_CANDIDATES_MAX],
    sentinel: u16,
}

impl CandidateList {
    fn new(sentinel: u16) -> Self {
        CandidateList {
            slots: [Candidate {
                symbol_index: 0,
                hamming_distance: sentinel,
                is_inverted: false,
            }; N_CANDIDATES_MAX],
            sentinel,
        }
    }

    fn consider(&mut self, symbol_index: usize, hamming_distance: u16, is_inverted: bool) {
        if hamming_distance >= self.slots[N_CANDIDATES_MAX - 1].hamming_distance {
            return;
        }

        let cand = Candidate {
            symbol_index,
            hamming_distance,
            is_inverted,
        };

        // Insertion point: after the last slot that is <= the new distance,
        // so equal distances keep scan order (earlier symbols win ties).
        let mut i = N_CANDIDATES_MAX - 1;
        while i > 0 && self.slots[i - 1].hamming_distance > hamming_distance {
            self.slots[i] = self.slots[i - 1];
            i -= 1;
        }
        self.slots[i] = cand;
    }

    fn into_vec(self, max: usize) -> Vec<Candidate> {
        self.slots
            .into_iter()
            .take(max)
            .take_while(|cand| cand.hamming_distance < self.sentinel)
            .collect()
    }
}

/// Binary search in a popcount-sorted list for the entry closest to
/// `popcount`.
fn closest_popcount_index<T>(symbols: &[T], popcount: u16, key: impl Fn(&T) -> u16) -> usize {
    let mut i = 0;
    let mut j = symbols.len() - 1;

    while i < j {
        let k = (i + j + 1) / 2;
        if popcount < key(&symbols[k]) {
            j = k - 1;
        } else {
            i = k;
        }
    }

    // The next element may be a closer match when the exact popcount is
    // missing
    if i + 1 < symbols.len() && key(&symbols[i + 1]).abs_diff(popcount) < key(&symbols[i]).abs_diff(popcount) {
        i += 1;
    }

    i
}

/* ================ *
 * Selector parsing *
 * ================ */

struct ParsedSelectors {
    selectors: Vec<Selector>,
    replace: bool,
}

fn parse_selector_string(input: &str) -> Result<ParsedSelectors> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut additive = false;
    let mut have_sign = false;
    let mut replace = false;
    let mut selectors = Vec::new();

    loop {
        while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b',') {
            pos += 1;
        }
        if pos == bytes.len() {
            break;
        }

        match bytes[pos] {
            b'-' => {
                additive = false;
                have_sign = true;
                pos += 1;
            }
            b'+' => {
                additive = true;
                have_sign = true;
                pos += 1;
            }
            _ => {}
        }

        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }
        if pos == bytes.len() {
            break;
        }

        let term_start = pos;
        while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'.') {
            pos += 1;
        }
        if pos == term_start {
            return Err(EngineError::SelectorSyntax { offset: pos });
        }

        if !have_sign {
            // An unsigned leading term replaces the current selection
            replace = true;
            additive = true;
            have_sign = true;
        }

        let term = &input[term_start..pos];
        selectors.push(parse_term(term, term_start, additive)?);
    }

    Ok(ParsedSelectors { selectors, replace })
}

fn parse_term(term: &str, offset: usize, additive: bool) -> Result<Selector> {
    if let Some(tags) = tag_for_token(term) {
        return Ok(Selector::Tags { tags, additive });
    }

    let (first, last) = if let Some((lo, hi)) = term.split_once("..") {
        (parse_code_point(lo, offset)?, parse_code_point(hi, offset)?)
    } else {
        let cp = parse_code_point(term, offset)?;
        (cp, cp)
    };

    Ok(Selector::Range { first, last, additive })
}

fn parse_code_point(token: &str, offset: usize) -> Result<u32> {
    let digits = token.strip_prefix(['u', 'U']).unwrap_or(token);
    let digits = digits.strip_prefix("0x").unwrap_or(digits);

    if digits.is_empty() {
        return Err(EngineError::UnknownSelector {
            token: token.to_string(),
            offset,
        });
    }

    u32::from_str_radix(digits, 16).map_err(|_| EngineError::UnknownSelector {
        token: token.to_string(),
        offset,
    })
}

fn tag_for_token(token: &str) -> Option<SymbolTags> {
    const MAP: &[(&str, SymbolTags)] = &[
        ("all", SymbolTags::ALL),
        ("none", SymbolTags::empty()),
        ("space", SymbolTags::SPACE),
        ("solid", SymbolTags::SOLID),
        ("stipple", SymbolTags::STIPPLE),
        ("block", SymbolTags::BLOCK),
        ("border", SymbolTags::BORDER),
        ("diagonal", SymbolTags::DIAGONAL),
        ("dot", SymbolTags::DOT),
        ("quad", SymbolTags::QUAD),
        ("half", SymbolTags::HALF),
        ("hhalf", SymbolTags::HHALF),
        ("vhalf", SymbolTags::VHALF),
        ("inverted", SymbolTags::INVERTED),
        ("braille", SymbolTags::BRAILLE),
        ("sextant", SymbolTags::SEXTANT),
        ("wedge", SymbolTags::WEDGE),
        ("technical", SymbolTags::TECHNICAL),
        ("geometric", SymbolTags::GEOMETRIC),
        ("ascii", SymbolTags::ASCII),
        ("alpha", SymbolTags::ALPHA),
        ("digit", SymbolTags::DIGIT),
        ("narrow", SymbolTags::NARROW),
        ("wide", SymbolTags::WIDE),
        ("ambiguous", SymbolTags::AMBIGUOUS),
        ("ugly", SymbolTags::UGLY),
        ("extra", SymbolTags::EXTRA),
        ("alnum", SymbolTags::ALNUM),
        ("bad", SymbolTags::BAD),
        ("legacy", SymbolTags::LEGACY),
    ];

    MAP.iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|&(_, tags)| tags)
}

/* ============ *
 * Glyph import *
 * ============ */

fn glyph_coverage(pixels: &DynamicImage, width: u32, height: u32) -> Vec<u8> {
    let has_alpha = pixels.color().has_alpha();
    let scaled = pixels.resize_exact(width, height, image::imageops::FilterType::Triangle).to_rgba8();

    scaled
        .pixels()
        .map(|p| {
            if has_alpha {
                p.0[3]
            } else {
                ((p.0[0] as u16 + p.0[1] as u16 + p.0[2] as u16) / 3) as u8
            }
        })
        .collect()
}

/// 3x3 sharpen with contrast boost; edge pixels are clamped outwards.
fn sharpen_coverage(cov: &[u8], width: usize, height: usize) -> Vec<u8> {
    const KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 6, -1], [0, -1, 0]];
    let mut out = vec![0u8; cov.len()];

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0i32;
            for (i, row) in KERNEL.iter().enumerate() {
                for (j, &k) in row.iter().enumerate() {
                    let a = (x as i32 + i as i32 - 1).clamp(0, width as i32 - 1) as usize;
                    let b = (y as i32 + j as i32 - 1).clamp(0, height as i32 - 1) as usize;
                    sum += cov[b * width + a] as i32 * k;
                }
            }
            out[y * width + x] = sum.clamp(0, 255) as u8;
        }
    }

    out
}

fn coverage_to_bitmap(cov: &[u8], x_ofs: usize, rowstride: usize) -> u64 {
    let mut bitmap = 0u64;
    for y in 0..SYMBOL_HEIGHT_PIXELS {
        for x in 0..SYMBOL_WIDTH_PIXELS {
            bitmap = (bitmap << 1) | u64::from(cov[y * rowstride + x_ofs + x] > 127);
        }
    }
    bitmap
}

fn glyph_to_bitmap(pixels: &DynamicImage) -> u64 {
    let cov = glyph_coverage(pixels, SYMBOL_WIDTH_PIXELS as u32, SYMBOL_HEIGHT_PIXELS as u32);
    let sharpened = sharpen_coverage(&cov, SYMBOL_WIDTH_PIXELS, SYMBOL_HEIGHT_PIXELS);
    coverage_to_bitmap(&sharpened, 0, SYMBOL_WIDTH_PIXELS)
}

fn glyph_to_bitmap_wide(pixels: &DynamicImage) -> (u64, u64) {
    let cov = glyph_coverage(pixels, SYMBOL_WIDTH_PIXELS as u32 * 2, SYMBOL_HEIGHT_PIXELS as u32);
    let sharpened = sharpen_coverage(&cov, SYMBOL_WIDTH_PIXELS * 2, SYMBOL_HEIGHT_PIXELS);
    (
        coverage_to_bitmap(&sharpened, 0, SYMBOL_WIDTH_PIXELS * 2),
        coverage_to_bitmap(&sharpened, SYMBOL_WIDTH_PIXELS, SYMBOL_WIDTH_PIXELS * 2),
    )
}
