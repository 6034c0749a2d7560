//! Shared primitives for the Ribose transduction runtime.
//!
//! This crate has no I/O and no serialization: it's the vocabulary
//! (`Symbol`, `Colors`, small formatting helpers) that `ribose-model` and
//! `ribose-runtime` both build on.

mod colors;
mod symbol;
mod utils;

pub use colors::Colors;
pub use symbol::{
    ESCAPE_PREFIX, EscapeRef, PREDEFINED_SIGNAL_COUNT, RESERVED_START, RefKind, SIG_EOL, SIG_EOS,
    SIG_NIL, SIG_NUL, SIGNAL_BASE, Symbol,
};
pub use utils::{align_up, width_for_count};
