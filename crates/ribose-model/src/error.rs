//! Errors raised while loading or verifying a model file.

use thiserror::Error;

/// A malformed or internally inconsistent model file.
///
/// `spec.md` §7: "`ModelError` — malformed or inconsistent model on load."
/// Every cross-reference named in `spec.md` §3's invariants is checked at
/// load time; a dangling reference surfaces as one of the `Dangling*`
/// variants here rather than panicking deep in the runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid magic: expected {:?}", crate::header::MAGIC)]
    InvalidMagic,

    #[error("unsupported model version: {0}")]
    UnsupportedVersion(u16),

    #[error("file too small to hold a header: {0} bytes")]
    FileTooSmall(usize),

    #[error("header declares total_size {header} but file is {actual} bytes")]
    SizeMismatch { header: u32, actual: usize },

    #[error("checksum mismatch: header says {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("string table entry at index {index} references blob range out of bounds")]
    DanglingString { index: usize },

    #[error("string table entry at index {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    #[error("transducer {transducer:?} references field ordinal {field} not in field table")]
    DanglingField { transducer: String, field: u16 },

    #[error("transducer {transducer:?} references signal ordinal {signal} not declared")]
    DanglingSignal { transducer: String, signal: u16 },

    #[error(
        "transducer {transducer:?} transition ({class},{state}) has next_state {next} >= state count {count}"
    )]
    OutOfRangeState { transducer: String, class: usize, state: usize, next: i32, count: u32 },

    #[error(
        "transducer {transducer:?} transition ({class},{state}) has effect code {code} indexing a vector pool offset out of bounds"
    )]
    DanglingVectorOffset { transducer: String, class: usize, state: usize, code: i32 },

    #[error("transducer {transducer:?} vector pool entry references effector {effector} not in effector table")]
    DanglingEffector { transducer: String, effector: i32 },

    #[error("transducer {transducer:?} equivalence map has length {actual}, expected {expected}")]
    BadEquivalenceMapLength { transducer: String, actual: usize, expected: usize },

    #[error("transducer name {0:?} is not unique")]
    DuplicateTransducerName(String),

    #[error("field table is missing the anonymous field at ordinal 0")]
    MissingAnonymousField,

    #[error("effector {effector} parameter {param} references argument index out of bounds")]
    DanglingParam { effector: u16, param: u32 },

    #[error("truncated model: expected at least {expected} bytes at offset {offset}, file has {actual}")]
    Truncated { offset: u32, expected: u32, actual: usize },
}

/// Result alias for model-loading operations.
pub type Result<T> = std::result::Result<T, ModelError>;
