//! Unified error types for textel_engine

use thiserror::Error;

/// Main error type for textel_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === Selector parsing ===
    #[error("Unrecognized symbol tag '{token}' at offset {offset}")]
    UnknownSelector { token: String, offset: usize },

    #[error("Syntax error in symbol tag selectors at offset {offset}")]
    SelectorSyntax { offset: usize },

    // === Glyph import ===
    #[error("Glyph raster must be non-empty (got {width}x{height})")]
    EmptyGlyph { width: u32, height: u32 },

    #[error("Code point U+{code_point:04X} cannot carry a glyph")]
    UnsupportedGlyphCodePoint { code_point: u32 },

    // === Canvas ===
    #[error("Canvas dimensions must be at least 1x1 cells (got {width}x{height})")]
    EmptyCanvas { width: i32, height: i32 },

    #[error("Canvas of {width}x{height} cells requires too large a pixel buffer")]
    CanvasTooBig { width: i32, height: i32 },

    #[error("Source image dimensions must be non-zero")]
    EmptySource,

    #[error("This pixel mode requires an external backend")]
    UnsupportedPixelMode,
}

/// Result type alias for textel_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
