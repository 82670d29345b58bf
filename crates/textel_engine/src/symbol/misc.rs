//! Borders, diagonals, dots and geometric shapes.

use super::{SymbolDef, SymbolTags};

const BORDER: SymbolTags = SymbolTags::BORDER;
const DIAGONAL: SymbolTags = SymbolTags::BORDER.union(SymbolTags::DIAGONAL);
const DOT: SymbolTags = SymbolTags::DOT;
const GEOMETRIC: SymbolTags = SymbolTags::GEOMETRIC;

pub(crate) static DEFS: &[SymbolDef] = &[
    SymbolDef {
        tags: BORDER,
        c: '\u{2500}', // box drawings light horizontal
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{2502}', // box drawings light vertical
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{250c}', // down and right
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "   XXXXX",
            "   XXXXX",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{2510}', // down and left
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "XXXXX   ",
            "XXXXX   ",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{2514}', // up and right
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XXXXX",
            "   XXXXX",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{2518}', // up and left
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "XXXXX   ",
            "XXXXX   ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{251c}', // vertical and right
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "   XXXXX",
            "   XXXXX",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{2524}', // vertical and left
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "XXXXX   ",
            "XXXXX   ",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{252c}', // down and horizontal
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "XXXXXXXX",
            "XXXXXXXX",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{2534}', // up and horizontal
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "XXXXXXXX",
            "XXXXXXXX",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: BORDER,
        c: '\u{253c}', // vertical and horizontal
        outline: concat!(
            "   XX   ",
            "   XX   ",
            "   XX   ",
            "XXXXXXXX",
            "XXXXXXXX",
            "   XX   ",
            "   XX   ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: DIAGONAL,
        c: '\u{2571}', // light diagonal upper right to lower left
        outline: concat!(
            "      XX",
            "     XX ",
            "    XX  ",
            "   XX   ",
            "  XX    ",
            " XX     ",
            "XX      ",
            "X       "
        ),
    },
    SymbolDef {
        tags: DIAGONAL,
        c: '\u{2572}', // light diagonal upper left to lower right
        outline: concat!(
            "XX      ",
            " XX     ",
            "  XX    ",
            "   XX   ",
            "    XX  ",
            "     XX ",
            "      XX",
            "       X"
        ),
    },
    SymbolDef {
        tags: DIAGONAL,
        c: '\u{2573}', // light diagonal cross
        outline: concat!(
            "XX    XX",
            " XX  XX ",
            "  XXXX  ",
            "   XX   ",
            "  XXXX  ",
            " XX  XX ",
            "XX    XX",
            "X      X"
        ),
    },
    SymbolDef {
        tags: GEOMETRIC.union(SymbolTags::DIAGONAL),
        c: '\u{25e2}', // black lower right triangle
        outline: concat!(
            "        ",
            "       X",
            "      XX",
            "    XXXX",
            "   XXXXX",
            "  XXXXXX",
            " XXXXXXX",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: GEOMETRIC.union(SymbolTags::DIAGONAL),
        c: '\u{25e3}', // black lower left triangle
        outline: concat!(
            "        ",
            "X       ",
            "XX      ",
            "XXXX    ",
            "XXXXX   ",
            "XXXXXX  ",
            "XXXXXXX ",
            "XXXXXXXX"
        ),
    },
    SymbolDef {
        tags: GEOMETRIC.union(SymbolTags::DIAGONAL),
        c: '\u{25e4}', // black upper left triangle
        outline: concat!(
            "XXXXXXXX",
            "XXXXXXX ",
            "XXXXXX  ",
            "XXXXX   ",
            "XXXX    ",
            "XX      ",
            "X       ",
            "        "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC.union(SymbolTags::DIAGONAL),
        c: '\u{25e5}', // black upper right triangle
        outline: concat!(
            "XXXXXXXX",
            " XXXXXXX",
            "  XXXXXX",
            "   XXXXX",
            "    XXXX",
            "      XX",
            "       X",
            "        "
        ),
    },
    SymbolDef {
        tags: DOT,
        c: '\u{00b7}', // middle dot
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "   XX   ",
            "   XX   ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: DOT,
        c: '\u{2022}', // bullet
        outline: concat!(
            "        ",
            "        ",
            "  XXXX  ",
            "  XXXX  ",
            "  XXXX  ",
            "  XXXX  ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC,
        c: '\u{25a0}', // black square
        outline: concat!(
            "        ",
            " XXXXXX ",
            " XXXXXX ",
            " XXXXXX ",
            " XXXXXX ",
            " XXXXXX ",
            " XXXXXX ",
            "        "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC.union(SymbolTags::DOT),
        c: '\u{25aa}', // black small square
        outline: concat!(
            "        ",
            "        ",
            "  XXXX  ",
            "  XXXX  ",
            "  XXXX  ",
            "  XXXX  ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC,
        c: '\u{25cf}', // black circle
        outline: concat!(
            "        ",
            "  XXXX  ",
            " XXXXXX ",
            " XXXXXX ",
            " XXXXXX ",
            " XXXXXX ",
            "  XXXX  ",
            "        "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC,
        c: '\u{25c6}', // black diamond
        outline: concat!(
            "   XX   ",
            "  XXXX  ",
            " XXXXXX ",
            "XXXXXXXX",
            "XXXXXXXX",
            " XXXXXX ",
            "  XXXX  ",
            "   XX   "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC,
        c: '\u{25b2}', // black up-pointing triangle
        outline: concat!(
            "        ",
            "   XX   ",
            "   XX   ",
            "  XXXX  ",
            "  XXXX  ",
            " XXXXXX ",
            "XXXXXXXX",
            "        "
        ),
    },
    SymbolDef {
        tags: GEOMETRIC,
        c: '\u{25bc}', // black down-pointing triangle
        outline: concat!(
            "        ",
            "XXXXXXXX",
            " XXXXXX ",
            "  XXXX  ",
            "  XXXX  ",
            "   XX   ",
            "   XX   ",
            "        "
        ),
    },
];
