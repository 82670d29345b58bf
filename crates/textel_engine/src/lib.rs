#![warn(clippy::all)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::return_self_not_must_use
)]

mod error;
pub use error::*;

mod color;
pub use color::*;

mod symbol;
pub use symbol::*;

mod symbol_map;
pub use symbol_map::*;

mod palette;
pub use palette::*;

mod dither;
pub use dither::*;

mod work_cell;
pub use work_cell::*;

mod batch;
mod pixops;

mod renderer;

mod canvas;
pub use canvas::*;

mod printer;

pub use textel_term::{TermInfo, TermSeq};
