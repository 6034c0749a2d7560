//! Runtime engine for executing compiled Ribose transducer stacks.

mod builtin;
mod effector;
mod error;
mod fields;
mod frame;
mod input;
mod logger;
mod metrics;
mod transductor;

pub use builtin::Builtin;
pub use effector::{Call, EffectorContext, EffectorReturn, Invocation, decode_vector};
pub use error::{EffectorError, InputError, RteError};
pub use fields::{Field, FieldStore};
pub use frame::{DEFAULT_STACK_LIMIT, Frame, FrameStack};
pub use input::InputStack;
pub use logger::{Logger, NoopLogger, PrintLogger, Verbosity};
pub use metrics::Metrics;
pub use transductor::{Status, Transductor};
