//! Injected logging sink.
//!
//! Grounded on the teacher's `Tracer`/`NoopTracer`/`PrintTracer`/`Verbosity`
//! (`plotnik-vm/src/engine/mod.rs` re-exports them; `vm.rs`'s `execute_with`
//! takes `tracer: &mut T` generically so `NoopTracer` calls optimize away
//! entirely). `spec.md` §9 calls for the same shape: "an injected logging
//! sink interface passed at transductor construction" rather than a global
//! logger, so a library embedding Ribose never has its log output hijacked.

/// How much detail a [`Logger`] should record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Silent,
    Transitions,
    Effectors,
    Symbols,
}

/// Sink for transductor execution events.
///
/// Implementations are monomorphized in, not boxed as a trait object, so a
/// `NoopLogger` run compiles its trace calls away entirely.
pub trait Logger {
    fn verbosity(&self) -> Verbosity {
        Verbosity::Silent
    }

    fn log_transition(&mut self, _transducer: &str, _state: u32, _next: i32, _code: i32) {}
    fn log_effector(&mut self, _name: &str, _ret_flags: u8) {}
    fn log_symbol(&mut self, _symbol: ribose_core::Symbol) {}
    fn log_domain_error(&mut self, _transducer: &str, _state: u32) {}
    fn log_status(&mut self, _status: &str) {}
}

/// Discards every event. The default logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {}

/// Writes events to stderr, for CLI debugging (`ribose run --verbose`).
#[derive(Clone, Copy, Debug)]
pub struct PrintLogger {
    verbosity: Verbosity,
}

impl PrintLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Logger for PrintLogger {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn log_transition(&mut self, transducer: &str, state: u32, next: i32, code: i32) {
        if self.verbosity >= Verbosity::Transitions {
            eprintln!("{transducer}: state {state} -> {next} (code {code})");
        }
    }

    fn log_effector(&mut self, name: &str, ret_flags: u8) {
        if self.verbosity >= Verbosity::Effectors {
            eprintln!("  effector {name} -> flags {ret_flags:#04x}");
        }
    }

    fn log_symbol(&mut self, symbol: ribose_core::Symbol) {
        if self.verbosity >= Verbosity::Symbols {
            eprintln!("  read {symbol}");
        }
    }

    fn log_domain_error(&mut self, transducer: &str, state: u32) {
        if self.verbosity >= Verbosity::Transitions {
            eprintln!("{transducer}: domain error at state {state}, injecting nul");
        }
    }

    fn log_status(&mut self, status: &str) {
        if self.verbosity >= Verbosity::Transitions {
            eprintln!("status -> {status}");
        }
    }
}
