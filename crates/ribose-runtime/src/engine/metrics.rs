//! Run counters.
//!
//! Exposed so `ribose-cli run --stats` (`spec.md` §6) can report something
//! more useful than "it finished": how much input was actually consumed,
//! how many domain errors the nul-injection path recovered from, how many
//! transitions and effector calls fired, and how many transducers were
//! activated over the run.

/// Counters accumulated over one `Transductor::run` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Input bytes consumed (post-escape-decoding; one signal counts once).
    pub bytes: u64,
    /// Domain errors recovered via `nul` injection.
    pub errors: u64,
    /// Total kernel transitions taken, across every transducer on the stack.
    pub sum: u64,
    /// Total effector invocations (each vector pool entry counts once).
    pub product: u64,
    /// Transducer activations (`start` + `push` calls, including the
    /// initial one).
    pub scan: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_symbol(&mut self) {
        self.bytes += 1;
    }

    pub fn record_transition(&mut self) {
        self.sum += 1;
    }

    pub fn record_effector(&mut self) {
        self.product += 1;
    }

    pub fn record_domain_error(&mut self) {
        self.errors += 1;
    }

    pub fn record_activation(&mut self) {
        self.scan += 1;
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bytes={} errors={} transitions={} effectors={} activations={}",
            self.bytes, self.errors, self.sum, self.product, self.scan
        )
    }
}
