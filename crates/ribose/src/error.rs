//! Error type for the facade crate: a transductor's [`ribose_runtime::RteError`]
//! plus the I/O errors that come from draining output into a target's sink.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Runtime(#[from] ribose_runtime::RteError),

    #[error("writing transductor output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
