//! Byte-driven execution engine for compiled Ribose transducer stacks.
//!
//! This crate is the transductor: it runs the compiled kernel matrices and
//! vector pools a [`ribose_model::Model`] carries, maintaining the input
//! buffer stack, the field store, and the transducer call stack described
//! across this system's specification. It does not compile `ginr` output
//! into models (that's `ribose-model`'s `ModelBuilder`, standing in for the
//! out-of-scope compiler) and it does not implement a CLI or a concrete
//! target beyond the base transductor.

mod engine;

pub use engine::{
    Builtin, Call, DEFAULT_STACK_LIMIT, EffectorContext, EffectorError, EffectorReturn, Field,
    FieldStore, Frame, FrameStack, InputError, InputStack, Invocation, Logger, Metrics,
    NoopLogger, PrintLogger, RteError, Status, Transductor, Verbosity, decode_vector,
};
