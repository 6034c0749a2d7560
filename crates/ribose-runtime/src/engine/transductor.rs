//! The transductor: runs a stack of compiled transducers against a stack of
//! input buffers, firing effectors along the way.
//!
//! Grounded on the teacher's `VM::execute_with` (`plotnik-vm/src/engine/vm.rs`):
//! a `loop` that fetches, dispatches, and inspects a `Result` to decide
//! whether to keep looping or return. Ribose has no backtracking, so there's
//! no checkpoint stack — but the same "generic logger, optimized away when
//! `NoopLogger`" shape carries over directly.

use ribose_core::{EscapeRef, RefKind, Symbol};
use ribose_model::Model;

use super::builtin::{self, Builtin};
use super::effector::{EffectorContext, EffectorReturn, Invocation, decode_vector};
use super::error::{EffectorError, RteError};
use super::fields::{Field, FieldStore};
use super::frame::FrameStack;
use super::input::InputStack;
use super::logger::Logger;
use super::metrics::Metrics;

/// Execution status, tied to whether the transducer stack is empty
/// (`spec.md` §4.5).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// No transducer has ever been started.
    #[default]
    Null,
    /// The transducer stack is empty after having run at least once.
    Stopped,
    /// Execution suspended: either an explicit `pause` effector fired, or
    /// the input stack ran dry mid-transducer.
    Paused,
    /// The transducer stack is non-empty and ready to consume more input.
    Runnable,
}

/// What `step` did, for the run loop to act on.
enum StepOutcome {
    Continue,
    Paused,
    Stopped,
}

/// Byte-driven execution engine for one compiled [`Model`].
pub struct Transductor<'m> {
    model: &'m Model,
    frames: FrameStack,
    input: InputStack,
    fields: FieldStore,
    metrics: Metrics,
    status: Status,
    output: Vec<u8>,
}

impl<'m> Transductor<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            frames: FrameStack::new(),
            input: InputStack::new(),
            fields: FieldStore::new(model.field_names.len()),
            metrics: Metrics::new(),
            status: Status::Null,
            output: Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Feed raw bytes onto the input stack.
    pub fn feed(&mut self, bytes: Vec<u8>) {
        self.input.push(bytes);
    }

    /// Drain accumulated `out`/`count` effector output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Clear the transducer stack and start `name` fresh at state 0.
    pub fn start(&mut self, name: &str) -> Result<(), RteError> {
        self.require_transducer(name)?;
        self.frames.clear();
        self.frames.push(name.to_string(), 0)?;
        self.metrics.record_activation();
        self.status = Status::Runnable;
        Ok(())
    }

    /// Push `name` on top of the stack, leaving the rest in place (a
    /// sub-transducer call; returns to the caller on `stop`).
    pub fn push(&mut self, name: &str) -> Result<(), RteError> {
        self.require_transducer(name)?;
        self.frames.push(name.to_string(), 0)?;
        self.metrics.record_activation();
        self.status = Status::Runnable;
        Ok(())
    }

    /// Replace the top frame with `name` at state 0 (a tail call). On an
    /// empty stack this is equivalent to [`Self::start`].
    pub fn shift(&mut self, name: &str) -> Result<(), RteError> {
        self.require_transducer(name)?;
        if self.frames.is_empty() {
            return self.start(name);
        }
        let frame = self.frames.top_mut().expect("checked non-empty above");
        frame.transducer = name.to_string();
        frame.state = 0;
        self.metrics.record_activation();
        self.status = Status::Runnable;
        Ok(())
    }

    /// Queue a named signal for injection as the next input symbol.
    pub fn signal(&mut self, name: &str) -> Result<(), RteError> {
        let ordinal = resolve_signal(self.model, name)
            .ok_or_else(|| EffectorError::UnknownSignal(name.to_string()))?;
        self.inject_signal(ordinal);
        Ok(())
    }

    /// Clear both stacks, reset the field selection to anonymous, and
    /// become reusable for another transduction (`spec.md` §4.5).
    pub fn stop(&mut self) -> Status {
        self.input.clear();
        self.fields.select(0).expect("field 0 always exists");
        self.frames.clear();
        self.status = Status::Stopped;
        self.status
    }

    /// Read an extracted field by ordinal.
    pub fn get_field(&self, ordinal: u16) -> Result<&Field, RteError> {
        Ok(self.fields.get(ordinal)?)
    }

    fn require_transducer(&self, name: &str) -> Result<(), RteError> {
        if self.model.find_transducer(name).is_none() {
            return Err(EffectorError::UnknownTransducer(name.to_string()).into());
        }
        Ok(())
    }

    fn inject_signal(&mut self, ordinal: u16) {
        let esc = EscapeRef { kind: RefKind::Signal, ordinal };
        self.input.push(esc.to_bytes().to_vec());
    }

    /// Run until the input is exhausted, a `pause` effector fires, or the
    /// transducer stack empties out.
    pub fn run(&mut self, logger: &mut impl Logger) -> Result<Status, RteError> {
        loop {
            if self.frames.is_empty() {
                self.status = Status::Stopped;
                logger.log_status("STOPPED");
                return Ok(self.status);
            }

            let Some(symbol) = self.input.next_symbol()? else {
                // True input exhaustion (`spec.md` §4.5 step 2): if the
                // current frame's transducer has no transition defined for
                // `eos` and a parent frame is waiting below it, pop and let
                // the parent try again rather than pausing outright.
                if self.eos_is_undefined_for_top_frame()? && self.frames.len() > 1 {
                    self.frames.pop();
                    logger.log_status("eos: returning to parent frame");
                    continue;
                }
                self.status = Status::Paused;
                logger.log_status("PAUSED (input exhausted)");
                return Ok(self.status);
            };
            logger.log_symbol(symbol);
            self.metrics.record_symbol();

            match self.step(symbol, logger)? {
                StepOutcome::Continue => continue,
                StepOutcome::Paused => {
                    self.status = Status::Paused;
                    logger.log_status("PAUSED");
                    return Ok(self.status);
                }
                StepOutcome::Stopped => {
                    self.status = Status::Stopped;
                    logger.log_status("STOPPED");
                    return Ok(self.status);
                }
            }
        }
    }

    fn step(&mut self, symbol: Symbol, logger: &mut impl Logger) -> Result<StepOutcome, RteError> {
        self.step_inner(symbol, logger, false)
    }

    /// Whether the top frame's transducer has no transition defined for the
    /// `eos` symbol at its current state (a domain-error cell).
    fn eos_is_undefined_for_top_frame(&self) -> Result<bool, RteError> {
        let frame = self.frames.top().expect("caller checked non-empty");
        let transducer = self
            .model
            .find_transducer(&frame.transducer)
            .ok_or_else(|| EffectorError::UnknownTransducer(frame.transducer.clone()))?;
        let class = transducer.class_of(Symbol::EOS.ordinal() as usize);
        let transition = transducer.transition(class, frame.state);
        Ok(transition.code == 0)
    }

    /// `is_nul_retry` guards against an infinite loop: a domain error whose
    /// injected `nul` also produces a domain error at the same state means
    /// no progress is possible (`spec.md` §4.5, resolved Open Question: two
    /// consecutive unproductive `nul` injections are a fatal error, and
    /// `nul` injection does not clear the selected field).
    fn step_inner(
        &mut self,
        symbol: Symbol,
        logger: &mut impl Logger,
        is_nul_retry: bool,
    ) -> Result<StepOutcome, RteError> {
        let frame = self.frames.top().cloned().expect("caller checked non-empty");
        let transducer = self
            .model
            .find_transducer(&frame.transducer)
            .ok_or_else(|| EffectorError::UnknownTransducer(frame.transducer.clone()))?;

        let class = transducer.class_of(symbol.ordinal() as usize);
        let transition = transducer.transition(class, frame.state);
        logger.log_transition(&frame.transducer, frame.state, transition.next_state, transition.code);
        self.metrics.record_transition();

        if transition.code == 0 {
            self.metrics.record_domain_error();
            logger.log_domain_error(&frame.transducer, frame.state);
            if is_nul_retry {
                return Err(RteError::UnrecoverableDomainError { state: frame.state });
            }
            return self.step_inner(Symbol::NUL, logger, true);
        }

        if transition.next_state >= 0 {
            self.frames.top_mut().expect("checked above").state = transition.next_state as u32;
        }

        if transition.code == 1 {
            return Ok(self.outcome_after(EffectorReturn::NONE));
        }

        let invocations = if transition.code >= 2 {
            vec![Invocation::Simple((transition.code - 2) as u16)]
        } else {
            let offset = (-transition.code) as usize;
            decode_vector(transducer.vector_at(offset))?
        };

        let mut combined = EffectorReturn::NONE;
        let mut requested_transducer = None;
        let mut shift_target = None;
        for invocation in invocations {
            let (ordinal, owned_args);
            let args: &[Vec<u8>] = match invocation {
                Invocation::Simple(o) => {
                    ordinal = o;
                    owned_args = Vec::new();
                    &owned_args
                }
                Invocation::Parameterized(o, p) => {
                    ordinal = o;
                    let params = self.model.effector_params.get(o as usize).ok_or(
                        EffectorError::BadArgCount { effector: o.to_string(), expected: 0, got: 0 },
                    )?;
                    owned_args = params
                        .get(p as usize)
                        .ok_or_else(|| EffectorError::Custom("param index out of range".into()))?
                        .clone();
                    &owned_args
                }
            };

            let name = self
                .model
                .effector_names
                .get(ordinal as usize)
                .cloned()
                .ok_or(EffectorError::UnknownEffector(ordinal as i32))?;
            let builtin = Builtin::from_name(&name).ok_or(EffectorError::UnknownEffector(ordinal as i32))?;

            let mut ctx = EffectorContext::new(&mut self.input, &mut self.fields, self.model, symbol);
            let flags = builtin::invoke(builtin, &mut ctx, args)?;
            self.output.extend_from_slice(&ctx.output);
            if let Some(requested) = ctx.requested_transducer {
                requested_transducer = Some(requested);
            }
            if let Some(target) = ctx.shift_target {
                shift_target = Some(target);
            }
            if let Some(sig) = ctx.requested_signal {
                self.inject_signal(sig);
            }
            self.metrics.record_effector();
            logger.log_effector(&name, flags.bits());
            combined |= flags;
        }

        if combined.contains(EffectorReturn::STOP) {
            self.frames.pop();
        }
        if combined.contains(EffectorReturn::START) {
            let name = requested_transducer
                .ok_or_else(|| EffectorError::Custom("start fired without a transducer name".into()))?;
            self.require_transducer(&name)?;
            self.frames.push(name, 0)?;
            self.metrics.record_activation();
        }
        if let Some(name) = shift_target {
            self.require_transducer(&name)?;
            match self.frames.top_mut() {
                Some(frame) => {
                    frame.transducer = name;
                    frame.state = 0;
                }
                None => {
                    self.frames.push(name, 0)?;
                }
            }
            self.metrics.record_activation();
        }

        Ok(self.outcome_after(combined))
    }

    fn outcome_after(&self, flags: EffectorReturn) -> StepOutcome {
        if flags.contains(EffectorReturn::PAUSE) {
            StepOutcome::Paused
        } else if self.frames.is_empty() {
            StepOutcome::Stopped
        } else {
            StepOutcome::Continue
        }
    }
}

fn resolve_signal(model: &Model, name: &str) -> Option<u16> {
    match name {
        "nul" => return Some(ribose_core::SIG_NUL),
        "nil" => return Some(ribose_core::SIG_NIL),
        "eol" => return Some(ribose_core::SIG_EOL),
        "eos" => return Some(ribose_core::SIG_EOS),
        _ => {}
    }
    model.signal_names.iter().position(|n| n == name).map(|i| ribose_core::PREDEFINED_SIGNAL_COUNT + i as u16)
}

#[cfg(test)]
mod transductor_tests {
    use super::*;
    use crate::engine::logger::NoopLogger;
    use ribose_model::ModelBuilder;

    fn total_symbols() -> usize {
        256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize
    }

    /// A one-state transducer that copies every byte it reads straight to
    /// the `out` effector, then stops on `eos`.
    fn echo_model() -> ribose_model::Model {
        let mut b = ModelBuilder::new();
        let out = b.add_effector("out");
        let stop = b.add_effector("stop");

        let mut eq_map = vec![0u16; total_symbols()];
        let eos_ordinal = Symbol::EOS.ordinal() as usize;
        eq_map[eos_ordinal] = 1; // class 1: eos
        // every other symbol stays class 0

        // class 0 (any byte): stay at state 0, invoke `out` with no params
        // class 1 (eos): invoke `stop`
        let kernel = vec![(0, (out as i32) + 2), (0, (stop as i32) + 2)];
        b.add_transducer("echo", 1, 2, vec![], vec![], eq_map, kernel, vec![]);
        b.build().unwrap()
    }

    #[test]
    fn echoes_bytes_and_stops_on_eos() {
        let model = echo_model();
        let mut t = Transductor::new(&model);
        t.start("echo").unwrap();
        t.feed(b"hi".to_vec());
        let esc = EscapeRef { kind: RefKind::Signal, ordinal: ribose_core::SIG_EOS };
        t.feed(esc.to_bytes().to_vec());

        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Stopped);
        assert_eq!(t.take_output(), b"hi");
    }

    #[test]
    fn pauses_when_input_runs_dry() {
        let model = echo_model();
        let mut t = Transductor::new(&model);
        t.start("echo").unwrap();
        t.feed(b"x".to_vec());
        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Paused);
    }

    #[test]
    fn shift_on_empty_stack_behaves_like_start() {
        let model = echo_model();
        let mut t = Transductor::new(&model);
        assert_eq!(t.status(), Status::Null);
        t.shift("echo").unwrap();
        assert_eq!(t.status(), Status::Runnable);
    }

    #[test]
    fn starting_unknown_transducer_is_an_error() {
        let model = echo_model();
        let mut t = Transductor::new(&model);
        assert!(t.start("nope").is_err());
    }

    #[test]
    fn metrics_track_activation_and_symbols() {
        let model = echo_model();
        let mut t = Transductor::new(&model);
        t.start("echo").unwrap();
        t.feed(b"ab".to_vec());
        let esc = EscapeRef { kind: RefKind::Signal, ordinal: ribose_core::SIG_EOS };
        t.feed(esc.to_bytes().to_vec());
        t.run(&mut NoopLogger).unwrap();
        assert_eq!(t.metrics().scan, 1);
        assert_eq!(t.metrics().bytes, 3);
    }

    fn total_symbol_count() -> usize {
        256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize
    }

    /// A domain error at a given state, with `nul` injection configured to
    /// either recover (continue past it) or fail again (fatal).
    fn domain_error_model(nul_recovers: bool) -> ribose_model::Model {
        let mut b = ModelBuilder::new();

        let mut eq_map = vec![0u16; total_symbol_count()];
        eq_map[Symbol::NUL.ordinal() as usize] = 1;
        // everything else, including b'z', stays class 0

        let nul_code = if nul_recovers { 1 } else { 0 };
        let kernel = vec![(0, 0), (0, nul_code)];
        b.add_transducer("dom", 1, 2, vec![], vec![], eq_map, kernel, vec![]);
        b.build().unwrap()
    }

    #[test]
    fn domain_error_recovers_once_via_nul_injection() {
        let model = domain_error_model(true);
        let mut t = Transductor::new(&model);
        t.start("dom").unwrap();
        t.feed(b"z".to_vec());
        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Paused);
        assert_eq!(t.metrics().errors, 1);
    }

    #[test]
    fn two_consecutive_domain_errors_are_fatal() {
        let model = domain_error_model(false);
        let mut t = Transductor::new(&model);
        t.start("dom").unwrap();
        t.feed(b"z".to_vec());
        let err = t.run(&mut NoopLogger).unwrap_err();
        assert!(matches!(err, RteError::UnrecoverableDomainError { state: 0 }));
    }

    /// Reads `x`, marks, reads `y`, resets back to just after `x` (so the
    /// `y` byte is re-read), then accepts it for real the second time.
    fn mark_reset_model() -> ribose_model::Model {
        let mut b = ModelBuilder::new();
        let mark = b.add_effector("mark");
        let out = b.add_effector("out");
        let reset = b.add_effector("reset");
        let stop = b.add_effector("stop");

        let mut eq_map = vec![0u16; total_symbol_count()];
        eq_map[b'x' as usize] = 1;
        eq_map[b'y' as usize] = 2;
        eq_map[Symbol::EOS.ordinal() as usize] = 3;

        // Guard entry at 0 so no real vector starts at offset 0 (which
        // would collide with the domain-error code).
        let vector_pool = vec![
            0,
            (mark as i32) + 2,
            (out as i32) + 2,
            0, // offset 1: [mark, out]
            (reset as i32) + 2,
            0, // offset 4: [reset]
            (out as i32) + 2,
            0, // offset 6: [out]
            (stop as i32) + 2,
            0, // offset 8: [stop]
        ];

        #[rustfmt::skip]
        let kernel = vec![
            (0, 1), (1, 1), (2, 1), (3, 1),   // class 0 (default), states 0..3
            (1, -1), (1, 1), (2, 1), (3, 1),  // class 1 ('x')
            (0, 1), (2, -4), (3, -6), (3, 1), // class 2 ('y')
            (0, 1), (1, 1), (2, 1), (-1, -8), // class 3 (eos)
        ];

        b.add_transducer("reread", 4, 4, vec![], vec![], eq_map, kernel, vector_pool);
        b.build().unwrap()
    }

    #[test]
    fn mark_reset_rereads_a_byte() {
        let model = mark_reset_model();
        let mut t = Transductor::new(&model);
        t.start("reread").unwrap();
        t.feed(b"xy".to_vec());
        let esc = EscapeRef { kind: RefKind::Signal, ordinal: ribose_core::SIG_EOS };
        t.feed(esc.to_bytes().to_vec());

        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Stopped);
        assert_eq!(t.take_output(), b"xy");
        // 'y' is read twice (rewound once by reset) plus 'x' and eos.
        assert_eq!(t.metrics().bytes, 4);
    }

    /// `spec.md` §8 scenario S6: seed a counter field at `3` on the first
    /// byte, decrement it on every byte after, and stop once the third one
    /// has fired the `stop` signal the `count` effector emits at zero.
    fn counter_model() -> ribose_model::Model {
        let mut b = ModelBuilder::new();
        let select = b.add_effector("select");
        let paste = b.add_effector("paste");
        let count = b.add_effector("count");
        let stop = b.add_effector("stop");
        let select_c = b.add_param(select, vec![b"c".to_vec()]);
        let paste_3 = b.add_param(paste, vec![b"3".to_vec()]);
        let count_c_stop = b.add_param(count, vec![b"c".to_vec(), b"stop".to_vec()]);
        b.add_field("c");
        let stop_signal = b.add_signal("stop");

        let total = 256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize + 1;
        let mut eq_map = vec![0u16; total];
        eq_map[ribose_core::Symbol::signal(stop_signal).ordinal() as usize] = 1;

        // Vector pool: offset 1 seeds the field (`select c; paste "3"`),
        // offset 6 decrements it (`count c, !stop`).
        let vector_pool = vec![
            0,
            -((select as i32) + 2),
            select_c as i32,
            -((paste as i32) + 2),
            paste_3 as i32,
            0, // offset 1: [select(c), paste(3)]
            -((count as i32) + 2),
            count_c_stop as i32,
            0, // offset 6: [count(c, stop)]
        ];

        // Two states: 0 seeds on the first byte then moves to 1; 1
        // decrements on every later byte and stays put. Class 1 (the
        // `stop` signal) fires the `stop` effector from either state.
        #[rustfmt::skip]
        let kernel = vec![
            (1, -1), (1, -6),                    // class 0 (byte), states 0,1
            (0, (stop as i32) + 2), (0, (stop as i32) + 2), // class 1 (stop signal)
        ];

        b.add_transducer("counter", 2, 2, vec![], vec![], eq_map, kernel, vector_pool);
        b.build().unwrap()
    }

    #[test]
    fn counter_emits_signal_and_stops_after_three_bytes() {
        let model = counter_model();
        let mut t = Transductor::new(&model);
        t.start("counter").unwrap();
        // First byte seeds the counter at 3; the next three decrement it to
        // zero, firing `!stop`.
        t.feed(b"wabc".to_vec());

        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Stopped);
    }

    #[test]
    fn get_field_reads_extracted_content() {
        let model = counter_model();
        let mut t = Transductor::new(&model);
        t.start("counter").unwrap();
        // The first byte seeds field "c" (ordinal 1) to "3".
        t.feed(b"w".to_vec());
        t.run(&mut NoopLogger).unwrap();
        assert_eq!(t.get_field(1).unwrap().as_bytes(), b"3");
    }

    #[test]
    fn get_field_on_unknown_ordinal_is_an_error() {
        let model = counter_model();
        let t = Transductor::new(&model);
        assert!(t.get_field(99).is_err());
    }

    #[test]
    fn stop_drains_input_and_resets_for_reuse() {
        let model = echo_model();
        let mut t = Transductor::new(&model);
        t.start("echo").unwrap();
        t.feed(b"stale".to_vec());

        // Stop before ever running: the fed bytes must be discarded
        // outright, not merely left for a future run to consume.
        let status = t.stop();
        assert_eq!(status, Status::Stopped);
        assert_eq!(t.status(), Status::Stopped);

        t.start("echo").unwrap();
        t.feed(b"hi".to_vec());
        let esc = EscapeRef { kind: RefKind::Signal, ordinal: ribose_core::SIG_EOS };
        t.feed(esc.to_bytes().to_vec());
        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Stopped);
        assert_eq!(t.take_output(), b"hi");
    }

    /// A parent that pushes a child sub-transducer with `start`, where the
    /// child defines no transition for `eos`: reaching input exhaustion
    /// inside the child must pop back to the parent rather than pausing
    /// with the child still on top (`spec.md` §4.5 step 2).
    fn nested_eos_model() -> ribose_model::Model {
        let mut b = ModelBuilder::new();
        let start = b.add_effector("start");
        let out = b.add_effector("out");
        let start_child = b.add_param(start, vec![b"child".to_vec()]);
        let out_p = b.add_param(out, vec![b"P".to_vec()]);

        let total = total_symbols();
        let mut parent_eq = vec![0u16; total];
        parent_eq[b'a' as usize] = 1;
        parent_eq[b'b' as usize] = 2;
        parent_eq[Symbol::EOS.ordinal() as usize] = 3;

        let parent_pool = vec![
            0,
            -((start as i32) + 2),
            start_child as i32,
            0, // offset 1: [start(child)]
            -((out as i32) + 2),
            out_p as i32,
            0, // offset 4: [out("P")]
        ];

        #[rustfmt::skip]
        let parent_kernel = vec![
            (0, 1), (1, 1),   // class 0 (default), states 0,1
            (1, -1), (1, 1),  // class 1 ('a')
            (0, 1), (1, -4),  // class 2 ('b')
            (0, 0), (1, 0),   // class 3 (eos): domain error at both states
        ];
        b.add_transducer("parent", 2, 4, vec![], vec![], parent_eq, parent_kernel, parent_pool);

        let mut child_eq = vec![0u16; total];
        child_eq[Symbol::EOS.ordinal() as usize] = 1;
        // class 0 (default byte): no-op; class 1 (eos): domain error, i.e.
        // "no transition defined".
        let child_kernel = vec![(0, 1), (0, 0)];
        b.add_transducer("child", 1, 2, vec![], vec![], child_eq, child_kernel, vec![]);

        b.build().unwrap()
    }

    #[test]
    fn eos_pops_back_to_parent_frame_when_child_has_no_eos_transition() {
        let model = nested_eos_model();
        let mut t = Transductor::new(&model);
        t.start("parent").unwrap();
        // 'a' pushes "child"; input is then immediately exhausted, so the
        // childless-eos branch must pop back to "parent" before pausing.
        t.feed(b"a".to_vec());
        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Paused);

        // Were the child frame still on top, this byte would hit the
        // child's default no-op instead of the parent's `out("P")` vector.
        t.feed(b"b".to_vec());
        let status = t.run(&mut NoopLogger).unwrap();
        assert_eq!(status, Status::Paused);
        assert_eq!(t.take_output(), b"P");
    }
}
