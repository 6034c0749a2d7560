//! Effector invocation: vector pool decoding, parameter resolution, and the
//! bitset an effector hands back to the run loop.
//!
//! A transition's effect code selects one of three things (`spec.md` §4.4,
//! §4.6): `0` is the domain-error marker, `1` is a no-op, `>=2` is a direct
//! effector invocation (`code - 2` is the effector ordinal, no parameters),
//! and `<0` is an offset into the transducer's vector pool — a 0-terminated
//! run of further invocations, fired in order.

use bitflags::bitflags;

use ribose_core::Symbol;
use ribose_model::Model;

use super::error::EffectorError;
use super::fields::FieldStore;
use super::input::InputStack;

bitflags! {
    /// What the run loop should do after an effector returns.
    ///
    /// Mirrors `spec.md` §4.5's effector return contract: most effectors
    /// return `NONE` and execution just continues to the next transition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EffectorReturn: u8 {
        const NONE    = 0;
        const START   = 1 << 0;
        const STOP    = 1 << 1;
        const INPUT   = 1 << 2;
        const PAUSE   = 1 << 3;
        const STOPPED = 1 << 4;
        const SIGNAL  = 1 << 5;
    }
}

/// One decoded vector pool invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Invoke an effector by ordinal with no parameters.
    Simple(u16),
    /// Invoke an effector by ordinal with the parameter at this index.
    Parameterized(u16, u32),
}

/// Decode a 0-terminated vector pool run into its invocations.
///
/// Entries are signed (`spec.md` §4.4): a positive entry `n` is a simple
/// call to effector ordinal `n - 2`; a negative entry `-n` begins a
/// parameterized call to effector ordinal `n - 2`, whose parameter index is
/// the following entry.
pub fn decode_vector(vector: &[i32]) -> Result<Vec<Invocation>, EffectorError> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < vector.len() {
        let entry = vector[i];
        if entry > 0 {
            out.push(Invocation::Simple((entry - 2) as u16));
            i += 1;
        } else {
            let ordinal = ((-entry) - 2) as u16;
            let param_index = *vector
                .get(i + 1)
                .ok_or_else(|| EffectorError::Custom("vector pool pair missing param index".into()))?;
            if param_index < 0 {
                return Err(EffectorError::Custom("vector pool param index must be non-negative".into()));
            }
            out.push(Invocation::Parameterized(ordinal, param_index as u32));
            i += 2;
        }
    }
    Ok(out)
}

/// Resolved call-site data handed to an effector implementation: its name
/// (for error messages) and its argument byte-strings, if parameterized.
pub struct Call<'a> {
    pub name: &'a str,
    pub args: &'a [Vec<u8>],
}

/// Mutable runtime state an effector may touch.
///
/// Bundles everything an implementation in [`crate::builtin`] needs without
/// handing it the whole [`crate::Transductor`] (which would let an effector
/// recursively drive execution).
pub struct EffectorContext<'a> {
    pub input: &'a mut InputStack,
    pub fields: &'a mut FieldStore,
    pub model: &'a Model,
    /// The symbol whose transition fired this effector; lets a
    /// no-argument `out`/`copy` act on "the byte just read" the way a
    /// ginr-compiled transducer's unparameterized effector calls expect.
    pub current_symbol: Symbol,
    /// Name of a transducer to push, set by the `start` effector for the
    /// run loop to act on.
    pub requested_transducer: Option<String>,
    /// Name of a transducer to replace the top frame with, set by the
    /// `shift` effector (distinct from `requested_transducer`: no `START`
    /// flag accompanies it, per `spec.md` §4.6).
    pub shift_target: Option<String>,
    /// Signal ordinal queued by the `signal` effector for re-injection.
    pub requested_signal: Option<u16>,
    /// Bytes written by the `out`/similar effectors, destined for the
    /// target sink.
    pub output: Vec<u8>,
}

impl<'a> EffectorContext<'a> {
    pub fn new(
        input: &'a mut InputStack,
        fields: &'a mut FieldStore,
        model: &'a Model,
        current_symbol: Symbol,
    ) -> Self {
        Self {
            input,
            fields,
            model,
            current_symbol,
            requested_transducer: None,
            shift_target: None,
            requested_signal: None,
            output: Vec::new(),
        }
    }
}
