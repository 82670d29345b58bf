//! Block elements, U+2580..=U+259F, plus the shade stipples.

use super::{SymbolDef, SymbolTags};

const BLOCK: SymbolTags = SymbolTags::BLOCK;
const QUAD: SymbolTags = SymbolTags::BLOCK.union(SymbolTags::QUAD);
const QUAD_INV: SymbolTags = QUAD.union(SymbolTags::INVERTED);

pub(crate) static DEFS: &[SymbolDef] = &[
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::HHALF).union(SymbolTags::INVERTED),
        c: '\u{2580}', // upper half block
        outline: concat!(
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2581}', // lower one eighth
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2582}', // lower one quarter
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2583}', // lower three eighths
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::HHALF),
        c: '\u{2584}', // lower half
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2585}', // lower five eighths
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2586}', // lower three quarters
        outline: concat!(
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2587}', // lower seven eighths
        outline: concat!(
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::SOLID),
        c: '\u{2588}', // full block
        outline: concat!(
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::INVERTED),
        c: '\u{2589}', // left seven eighths
        outline: concat!(
            "XXXXXXX ",
            "XXXXXXX ",
            "XXXXXXX ",
            "XXXXXXX ",
            "XXXXXXX ",
            "XXXXXXX ",
            "XXXXXXX ",
            "XXXXXXX "
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{258a}', // left three quarters
        outline: concat!(
            "XXXXXX  ",
            "XXXXXX  ",
            "XXXXXX  ",
            "XXXXXX  ",
            "XXXXXX  ",
            "XXXXXX  ",
            "XXXXXX  ",
            "XXXXXX  "
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{258b}', // left five eighths
        outline: concat!(
            "XXXXX   ",
            "XXXXX   ",
            "XXXXX   ",
            "XXXXX   ",
            "XXXXX   ",
            "XXXXX   ",
            "XXXXX   ",
            "XXXXX   "
        ),
    },
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::VHALF),
        c: '\u{258c}', // left half
        outline: concat!(
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    "
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{258d}', // left three eighths
        outline: concat!(
            "XXX     ",
            "XXX     ",
            "XXX     ",
            "XXX     ",
            "XXX     ",
            "XXX     ",
            "XXX     ",
            "XXX     "
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{258e}', // left one quarter
        outline: concat!(
            "XX      ",
            "XX      ",
            "XX      ",
            "XX      ",
            "XX      ",
            "XX      ",
            "XX      ",
            "XX      "
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{258f}', // left one eighth
        outline: concat!(
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "X       "
        ),
    },
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::VHALF).union(SymbolTags::INVERTED),
        c: '\u{2590}', // right half
        outline: concat!(
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX"
        ),
    },
    SymbolDef {
        tags: SymbolTags::STIPPLE,
        c: '\u{2591}', // light shade
        outline: concat!(
            "X   X   ",
            "        ",
            "  X   X ",
            "        ",
            "X   X   ",
            "        ",
            "  X   X ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::STIPPLE,
        c: '\u{2592}', // medium shade
        outline: concat!(
            "X X X X ",
            " X X X X",
            "X X X X ",
            " X X X X",
            "X X X X ",
            " X X X X",
            "X X X X ",
            " X X X X"
        ),
    },
    SymbolDef {
        tags: SymbolTags::STIPPLE.union(SymbolTags::INVERTED),
        c: '\u{2593}', // dark shade
        outline: concat!(
            " XXX XXX",
            "XXXXXXXX",
            "XX XXX X",
            "XXXXXXXX",
            " XXX XXX",
            "XXXXXXXX",
            "XX XXX X",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: BLOCK,
        c: '\u{2594}', // upper one eighth
        outline: concat!(
            "XXXXXXXX",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::BLOCK.union(SymbolTags::INVERTED),
        c: '\u{2595}', // right one eighth
        outline: concat!(
            "       X",
            "       X",
            "       X",
            "       X",
            "       X",
            "       X",
            "       X",
            "       X"
        ),
    },
    SymbolDef {
        tags: QUAD,
        c: '\u{2596}', // quadrant lower left
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    "
        ),
    },
    SymbolDef {
        tags: QUAD,
        c: '\u{2597}', // quadrant lower right
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX"
        ),
    },
    SymbolDef {
        tags: QUAD,
        c: '\u{2598}', // quadrant upper left
        outline: concat!(
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: QUAD_INV,
        c: '\u{2599}', // upper left + lower half
        outline: concat!(
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: QUAD,
        c: '\u{259a}', // upper left + lower right
        outline: concat!(
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX"
        ),
    },
    SymbolDef {
        tags: QUAD_INV,
        c: '\u{259b}', // upper half + lower left
        outline: concat!(
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    "
        ),
    },
    SymbolDef {
        tags: QUAD_INV,
        c: '\u{259c}', // upper half + lower right
        outline: concat!(
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX"
        ),
    },
    SymbolDef {
        tags: QUAD,
        c: '\u{259d}', // quadrant upper right
        outline: concat!(
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: QUAD_INV,
        c: '\u{259e}', // upper right + lower left
        outline: concat!(
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "XXXX    ",
            "XXXX    ",
            "XXXX    ",
            "XXXX    "
        ),
    },
    SymbolDef {
        tags: QUAD_INV,
        c: '\u{259f}', // upper right + lower half
        outline: concat!(
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "    XXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX"
        ),
    },
];
