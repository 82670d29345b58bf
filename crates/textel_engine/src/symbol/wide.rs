//! Double-width glyphs. Each outline is 16x8; the loader splits it into
//! two single-cell halves sharing the code point.

use super::{SymbolDef, SymbolTags};

const EXTRA: SymbolTags = SymbolTags::EXTRA;

pub(crate) static DEFS: &[SymbolDef] = &[
    SymbolDef {
        tags: EXTRA,
        c: '\u{4e00}', // CJK one
        outline: concat!(
            "                ",
            "                ",
            "                ",
            " XXXXXXXXXXXXXX ",
            " XXXXXXXXXXXXXX ",
            "                ",
            "                ",
            "                "
        ),
    },
    SymbolDef {
        tags: EXTRA,
        c: '\u{4e8c}', // CJK two
        outline: concat!(
            "                ",
            "   XXXXXXXXXX   ",
            "                ",
            "                ",
            "                ",
            "                ",
            " XXXXXXXXXXXXXX ",
            "                "
        ),
    },
    SymbolDef {
        tags: EXTRA,
        c: '\u{5341}', // CJK ten
        outline: concat!(
            "       XX       ",
            "       XX       ",
            "       XX       ",
            " XXXXXXXXXXXXXX ",
            " XXXXXXXXXXXXXX ",
            "       XX       ",
            "       XX       ",
            "       XX       "
        ),
    },
    SymbolDef {
        tags: EXTRA,
        c: '\u{53e3}', // CJK mouth
        outline: concat!(
            "                ",
            "  XXXXXXXXXXXX  ",
            "  XX        XX  ",
            "  XX        XX  ",
            "  XX        XX  ",
            "  XX        XX  ",
            "  XXXXXXXXXXXX  ",
            "                "
        ),
    },
    SymbolDef {
        tags: EXTRA,
        c: '\u{56de}', // CJK return (nested boxes)
        outline: concat!(
            " XXXXXXXXXXXXXX ",
            " XX          XX ",
            " XX  XXXXXX  XX ",
            " XX  XX  XX  XX ",
            " XX  XX  XX  XX ",
            " XX  XXXXXX  XX ",
            " XX          XX ",
            " XXXXXXXXXXXXXX "
        ),
    },
    SymbolDef {
        tags: EXTRA,
        c: '\u{3042}', // hiragana a
        outline: concat!(
            "     XX         ",
            "  XXXXXXXXXX    ",
            "     XX         ",
            "    XXXXXXX     ",
            "   XX XX   XX   ",
            "  XX  XX    XX  ",
            "  XX XXXX   XX  ",
            "   XXX   XXXX   "
        ),
    },
    SymbolDef {
        tags: EXTRA,
        c: '\u{30a2}', // katakana a
        outline: concat!(
            "  XXXXXXXXXXXX  ",
            "           XX   ",
            "      X   XX    ",
            "      XX XX     ",
            "      XX        ",
            "     XX         ",
            "    XX          ",
            "   XX           "
        ),
    },
];
