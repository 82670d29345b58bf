//! Printable ASCII glyphs in a 5x7 raster.
//!
//! ALPHA, DIGIT, ASCII and NARROW are attributed automatically; only the
//! structural tags are declared here.

use super::{SymbolDef, SymbolTags};

const NONE: SymbolTags = SymbolTags::empty();

pub(crate) static DEFS: &[SymbolDef] = &[
    SymbolDef {
        tags: SymbolTags::SPACE,
        c: ' ',
        outline: concat!(
            "        ",
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
        tags: NONE,
        c: '!',
        outline: concat!(
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "        ",
            "  X     ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '"',
        outline: concat!(
            " X X    ",
            " X X    ",
            " X X    ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '#',
        outline: concat!(
            " X X    ",
            " X X    ",
            "XXXXX   ",
            " X X    ",
            "XXXXX   ",
            " X X    ",
            " X X    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '%',
        outline: concat!(
            "XX  X   ",
            "XX  X   ",
            "   X    ",
            "  X     ",
            " X      ",
            "X  XX   ",
            "X  XX   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '&',
        outline: concat!(
            " XX     ",
            "X  X    ",
            "X X     ",
            " X      ",
            "X X X   ",
            "X  X    ",
            " XX X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '\'',
        outline: concat!(
            "  X     ",
            "  X     ",
            "  X     ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '(',
        outline: concat!(
            "   X    ",
            "  X     ",
            " X      ",
            " X      ",
            " X      ",
            "  X     ",
            "   X    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: ')',
        outline: concat!(
            " X      ",
            "  X     ",
            "   X    ",
            "   X    ",
            "   X    ",
            "  X     ",
            " X      ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '*',
        outline: concat!(
            "        ",
            "X X X   ",
            " XXX    ",
            "XXXXX   ",
            " XXX    ",
            "X X X   ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '+',
        outline: concat!(
            "        ",
            "  X     ",
            "  X     ",
            "XXXXX   ",
            "  X     ",
            "  X     ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: ',',
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "  XX    ",
            "  X     ",
            " X      "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '-',
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "XXXXX   ",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::DOT,
        c: '.',
        outline: concat!(
            "        ",
            "        ",
            "        ",
            "        ",
            "        ",
            "  XX    ",
            "  XX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::DIAGONAL,
        c: '/',
        outline: concat!(
            "    X   ",
            "    X   ",
            "   X    ",
            "  X     ",
            " X      ",
            "X       ",
            "X       ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '0',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "X  XX   ",
            "X X X   ",
            "XX  X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '1',
        outline: concat!(
            "  X     ",
            " XX     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '2',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "    X   ",
            "   X    ",
            "  X     ",
            " X      ",
            "XXXXX   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '3',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "    X   ",
            "  XX    ",
            "    X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '4',
        outline: concat!(
            "   X    ",
            "  XX    ",
            " X X    ",
            "X  X    ",
            "XXXXX   ",
            "   X    ",
            "   X    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '5',
        outline: concat!(
            "XXXXX   ",
            "X       ",
            "XXXX    ",
            "    X   ",
            "    X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '6',
        outline: concat!(
            " XXX    ",
            "X       ",
            "XXXX    ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '7',
        outline: concat!(
            "XXXXX   ",
            "    X   ",
            "   X    ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '8',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "X   X   ",
            " XXX    ",
            "X   X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '9',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "X   X   ",
            " XXXX   ",
            "    X   ",
            "    X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::DOT,
        c: ':',
        outline: concat!(
            "        ",
            "  XX    ",
            "  XX    ",
            "        ",
            "  XX    ",
            "  XX    ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: ';',
        outline: concat!(
            "        ",
            "  XX    ",
            "  XX    ",
            "        ",
            "  XX    ",
            "  X     ",
            " X      ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '<',
        outline: concat!(
            "    X   ",
            "   X    ",
            "  X     ",
            " X      ",
            "  X     ",
            "   X    ",
            "    X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '=',
        outline: concat!(
            "        ",
            "        ",
            "XXXXX   ",
            "        ",
            "XXXXX   ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '>',
        outline: concat!(
            "X       ",
            " X      ",
            "  X     ",
            "   X    ",
            "  X     ",
            " X      ",
            "X       ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '?',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "    X   ",
            "   X    ",
            "  X     ",
            "        ",
            "  X     ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '@',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "X XXX   ",
            "X X X   ",
            "X XXX   ",
            "X       ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'A',
        outline: concat!(
            "  X     ",
            " X X    ",
            "X   X   ",
            "X   X   ",
            "XXXXX   ",
            "X   X   ",
            "X   X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'C',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "X       ",
            "X       ",
            "X       ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'E',
        outline: concat!(
            "XXXXX   ",
            "X       ",
            "X       ",
            "XXXX    ",
            "X       ",
            "X       ",
            "XXXXX   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'F',
        outline: concat!(
            "XXXXX   ",
            "X       ",
            "X       ",
            "XXXX    ",
            "X       ",
            "X       ",
            "X       ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'H',
        outline: concat!(
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "XXXXX   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'I',
        outline: concat!(
            " XXX    ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'K',
        outline: concat!(
            "X   X   ",
            "X  X    ",
            "X X     ",
            "XX      ",
            "X X     ",
            "X  X    ",
            "X   X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'L',
        outline: concat!(
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "X       ",
            "XXXXX   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'M',
        outline: concat!(
            "X   X   ",
            "XX XX   ",
            "X X X   ",
            "X X X   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'N',
        outline: concat!(
            "X   X   ",
            "XX  X   ",
            "X X X   ",
            "X  XX   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'O',
        outline: concat!(
            " XXX    ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'S',
        outline: concat!(
            " XXXX   ",
            "X       ",
            "X       ",
            " XXX    ",
            "    X   ",
            "    X   ",
            "XXXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'T',
        outline: concat!(
            "XXXXX   ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'U',
        outline: concat!(
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            "X   X   ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::DIAGONAL,
        c: 'X',
        outline: concat!(
            "X   X   ",
            "X   X   ",
            " X X    ",
            "  X     ",
            " X X    ",
            "X   X   ",
            "X   X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: 'Z',
        outline: concat!(
            "XXXXX   ",
            "    X   ",
            "   X    ",
            "  X     ",
            " X      ",
            "X       ",
            "XXXXX   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '[',
        outline: concat!(
            " XXX    ",
            " X      ",
            " X      ",
            " X      ",
            " X      ",
            " X      ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: SymbolTags::DIAGONAL,
        c: '\\',
        outline: concat!(
            "X       ",
            "X       ",
            " X      ",
            "  X     ",
            "   X    ",
            "    X   ",
            "    X   ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: ']',
        outline: concat!(
            " XXX    ",
            "   X    ",
            "   X    ",
            "   X    ",
            "   X    ",
            "   X    ",
            " XXX    ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '^',
        outline: concat!(
            "  X     ",
            " X X    ",
            "X   X   ",
            "        ",
            "        ",
            "        ",
            "        ",
            "        "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '_',
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
        tags: NONE,
        c: '|',
        outline: concat!(
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     ",
            "  X     "
        ),
    },
    SymbolDef {
        tags: NONE,
        c: '~',
        outline: concat!(
            "        ",
            "        ",
            " X      ",
            "X X X   ",
            "   X    ",
            "        ",
            "        ",
            "        "
        ),
    },
];
