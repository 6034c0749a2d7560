//! Ribose: a runtime for executing stacks of finite-state transducers over
//! byte streams.
//!
//! This facade ties the model format ([`ribose_model`]) and the execution
//! engine ([`ribose_runtime`]) together behind the one target this crate
//! implements, [`BaseTarget`]. Compiling `ginr` DFA output into a model, and
//! target implementations beyond the base transductor, are out of scope —
//! see `ribose-cli` for the `compile` subcommand's pointer to the external
//! compiler.
//!
//! # Example
//!
//! ```no_run
//! use ribose::BaseTarget;
//! use ribose_model::Model;
//! use ribose_runtime::NoopLogger;
//!
//! let model = Model::load("greeter.rbm").expect("load model");
//! let mut target = BaseTarget::new(&model, std::io::stdout());
//! target.start("Main").expect("start transducer");
//! target.feed(b"hello\n".to_vec());
//! target.run(&mut NoopLogger).expect("run to completion");
//! ```

mod base_target;
mod error;

pub use base_target::BaseTarget;
pub use error::{Error, Result};

pub use ribose_core::{Colors, EscapeRef, RefKind, Symbol};
pub use ribose_model::Model;
pub use ribose_runtime::{Logger, Metrics, NoopLogger, PrintLogger, Status, Verbosity};
