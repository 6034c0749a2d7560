//! On-disk model format for compiled Ribose transducers.
//!
//! A model file (`spec.md` §4.7) bundles everything a transductor needs to
//! run a target: the signal/field/effector name tables, the
//! parameterized-effector argument block, and one or more compiled
//! transducer kernels. This crate owns the byte layout and the load-time
//! verification of its structural invariants (`spec.md` §3); it does not
//! compile `ginr` DFA output into that layout — that compiler is out of
//! scope (`spec.md` §1, Non-goals).

mod aligned_vec;
mod builder;
mod dump;
mod error;
mod header;
mod module;
mod tables;
mod transducer;

pub use aligned_vec::AlignedVec;
pub use builder::ModelBuilder;
pub use dump::{DumpContext, dump, dump_decompile, dump_map};
pub use error::{ModelError, Result};
pub use header::{Header, SectionOffsets, VERSION};
pub use module::Model;
pub use transducer::{Transducer, Transition};
