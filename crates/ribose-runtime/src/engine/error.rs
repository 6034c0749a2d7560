//! Error types for the transduction runtime.
//!
//! Three layers, narrowest to widest, mirroring the teacher's
//! `RuntimeError`: [`InputError`] and [`EffectorError`] are raised deep in
//! the execution loop and folded into the top-level [`RteError`] that
//! `Transductor::run` returns.

use thiserror::Error;

/// Errors reading from the input stack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("reset() called with no matching mark()")]
    ResetWithoutMark,

    #[error("escape sequence truncated at end of segment")]
    TruncatedEscape,

    #[error("malformed escape sequence (bad prefix or kind byte)")]
    MalformedEscape,

    #[error("field or transducer reference encountered on the input stream")]
    UnexpectedNamedRef,
}

/// Errors raised by a built-in or user-registered effector.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EffectorError {
    #[error("effector dispatch code {0} has no registered implementation")]
    UnknownEffector(i32),

    #[error("effector {effector:?} expected {expected} argument(s), got {got}")]
    BadArgCount { effector: String, expected: usize, got: usize },

    #[error("effector {effector:?} argument {index} is not valid UTF-8")]
    InvalidUtf8 { effector: String, index: usize },

    #[error("effector {effector:?} could not parse {value:?} as a number")]
    NotANumber { effector: String, value: String },

    #[error("unknown field ordinal {0}")]
    UnknownField(u16),

    #[error("unknown transducer name {0:?}")]
    UnknownTransducer(String),

    #[error("unknown signal name {0:?}")]
    UnknownSignal(String),

    #[error("{0}")]
    Custom(String),
}

/// Top-level runtime error.
#[derive(Debug, Error)]
pub enum RteError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Effector(#[from] EffectorError),

    #[error(transparent)]
    Model(#[from] ribose_model::ModelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(
        "domain error at state {state} could not be recovered: two consecutive `nul` \
         injections made no progress"
    )]
    UnrecoverableDomainError { state: u32 },

    #[error("no transducer is running")]
    EmptyStack,

    #[error("transducer stack exceeded its depth limit ({0})")]
    StackOverflow(usize),
}
