//! The base transductor-as-target: a [`Transductor`] paired with an output
//! sink.
//!
//! A model names its target class in its header so a host can verify it's
//! loading a model built for the target it's about to run (`spec.md` §4.7's
//! "dynamic class loading" redesign: target binding is a compile-time
//! generic parameter here, not a name resolved at load time). `BaseTarget`
//! is the only target this crate implements — it does nothing beyond what
//! the transductor core already does: drain `out`/`count` effector output to
//! a `Write` sink after every run. A richer target (one that reacts to
//! specific effector calls, e.g. a tree builder) would wrap a `Transductor`
//! the same way.

use std::io::Write;

use ribose_model::Model;
use ribose_runtime::{Field, Logger, Metrics, Status, Transductor};

use crate::error::Result;

/// The base target: runs a transductor, draining its output to `sink` after
/// every call to [`Self::run`].
pub struct BaseTarget<'m, W: Write> {
    transductor: Transductor<'m>,
    sink: W,
}

impl<'m, W: Write> BaseTarget<'m, W> {
    pub fn new(model: &'m Model, sink: W) -> Self {
        Self { transductor: Transductor::new(model), sink }
    }

    pub fn status(&self) -> Status {
        self.transductor.status()
    }

    pub fn metrics(&self) -> &Metrics {
        self.transductor.metrics()
    }

    /// Feed raw bytes onto the transductor's input stack.
    pub fn feed(&mut self, bytes: Vec<u8>) {
        self.transductor.feed(bytes);
    }

    pub fn start(&mut self, name: &str) -> Result<()> {
        Ok(self.transductor.start(name)?)
    }

    pub fn push(&mut self, name: &str) -> Result<()> {
        Ok(self.transductor.push(name)?)
    }

    pub fn shift(&mut self, name: &str) -> Result<()> {
        Ok(self.transductor.shift(name)?)
    }

    pub fn signal(&mut self, name: &str) -> Result<()> {
        Ok(self.transductor.signal(name)?)
    }

    /// Clear both stacks and reset field selection, making this target
    /// reusable for another transduction.
    pub fn stop(&mut self) -> Status {
        self.transductor.stop()
    }

    /// Read an extracted field by ordinal.
    pub fn get_field(&self, ordinal: u16) -> Result<&Field> {
        Ok(self.transductor.get_field(ordinal)?)
    }

    /// Run until the input is exhausted, a `pause` effector fires, or the
    /// transducer stack empties out, then drain accumulated output to the
    /// sink.
    pub fn run(&mut self, logger: &mut impl Logger) -> Result<Status> {
        let status = self.transductor.run(logger)?;
        let output = self.transductor.take_output();
        if !output.is_empty() {
            self.sink.write_all(&output)?;
        }
        Ok(status)
    }

    /// Consume the target, returning the underlying sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod base_target_tests {
    use super::*;
    use ribose_core::Symbol;
    use ribose_model::ModelBuilder;
    use ribose_runtime::NoopLogger;

    fn echo_model() -> Model {
        let mut b = ModelBuilder::new();
        let out = b.add_effector("out");
        let stop = b.add_effector("stop");

        let total = 256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize;
        let mut eq_map = vec![0u16; total];
        eq_map[Symbol::EOS.ordinal() as usize] = 1;

        let kernel = vec![(0, (out as i32) + 2), (0, (stop as i32) + 2)];
        b.add_transducer("echo", 1, 2, vec![], vec![], eq_map, kernel, vec![]);
        b.build().unwrap()
    }

    #[test]
    fn drains_output_into_sink_after_run() {
        let model = echo_model();
        let mut target = BaseTarget::new(&model, Vec::new());
        target.start("echo").unwrap();
        target.feed(b"hi".to_vec());
        let esc = ribose_core::EscapeRef { kind: ribose_core::RefKind::Signal, ordinal: ribose_core::SIG_EOS };
        target.feed(esc.to_bytes().to_vec());

        let status = target.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Stopped);
        assert_eq!(target.into_sink(), b"hi");
    }

    #[test]
    fn starting_unknown_transducer_surfaces_as_facade_error() {
        let model = echo_model();
        let mut target = BaseTarget::new(&model, Vec::new());
        assert!(target.start("missing").is_err());
    }

    #[test]
    fn stop_discards_pending_input_before_first_run() {
        let model = echo_model();
        let mut target = BaseTarget::new(&model, Vec::new());
        target.start("echo").unwrap();
        target.feed(b"stale".to_vec());

        assert_eq!(target.stop(), Status::Stopped);

        target.start("echo").unwrap();
        target.feed(b"hi".to_vec());
        let esc = ribose_core::EscapeRef { kind: ribose_core::RefKind::Signal, ordinal: ribose_core::SIG_EOS };
        target.feed(esc.to_bytes().to_vec());
        let status = target.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Stopped);
        assert_eq!(target.into_sink(), b"hi");
    }

    #[test]
    fn get_field_delegates_to_the_transductor() {
        let mut b = ModelBuilder::new();
        let select = b.add_effector("select");
        let paste = b.add_effector("paste");
        let select_c = b.add_param(select, vec![b"c".to_vec()]);
        let paste_hi = b.add_param(paste, vec![b"hi".to_vec()]);
        b.add_field("c");

        let total = 256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize;
        let eq_map = vec![0u16; total];
        let vector_pool = vec![
            0,
            -((select as i32) + 2),
            select_c as i32,
            -((paste as i32) + 2),
            paste_hi as i32,
            0, // offset 1: [select(c), paste("hi")]
        ];
        let kernel = vec![(0, -1)];
        b.add_transducer("seed", 1, 1, vec![], vec![], eq_map, kernel, vector_pool);
        let model = b.build().unwrap();

        let mut target = BaseTarget::new(&model, Vec::new());
        target.start("seed").unwrap();
        target.feed(b"x".to_vec());
        target.run(&mut NoopLogger).unwrap();
        assert_eq!(target.get_field(1).unwrap().as_bytes(), b"hi");
    }
}
