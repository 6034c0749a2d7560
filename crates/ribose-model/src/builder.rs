//! In-memory model assembly.
//!
//! `ribose-model` has no compiler (`spec.md` §1 explicitly scopes the
//! `ginr`-DFA-to-model compiler out); `ModelBuilder` is the thing that
//! stands in its place for callers who already have a transducer's kernel
//! — fixture assembly in this crate's own tests, and eventually a real
//! compiler crate that would otherwise have to hand-assemble the byte
//! layout in `module.rs` itself. It only ever holds data; `build()` proves
//! the result by round-tripping it through [`crate::Model::to_bytes`] and
//! [`crate::Model::from_bytes`], so a built model is verified exactly the
//! way a loaded-from-disk one is.

use crate::error::Result;
use crate::module::Model;
use crate::transducer::Transducer;

/// Incrementally assembles a [`Model`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    signal_names: Vec<String>,
    field_names: Vec<String>,
    effector_names: Vec<String>,
    effector_params: Vec<Vec<Vec<Vec<u8>>>>,
    transducers: Vec<Transducer>,
}

impl ModelBuilder {
    /// Start a new builder. Field ordinal 0 (the anonymous field) is
    /// reserved automatically.
    pub fn new() -> Self {
        Self { field_names: vec![String::new()], ..Self::default() }
    }

    /// Declare a signal beyond the 4 predefined ones; returns its ordinal.
    pub fn add_signal(&mut self, name: impl Into<String>) -> u16 {
        self.signal_names.push(name.into());
        ribose_core::PREDEFINED_SIGNAL_COUNT + self.signal_names.len() as u16 - 1
    }

    /// Declare a named field; returns its ordinal.
    pub fn add_field(&mut self, name: impl Into<String>) -> u16 {
        self.field_names.push(name.into());
        self.field_names.len() as u16 - 1
    }

    /// Declare a named effector; returns its ordinal (dispatch code is
    /// `ordinal + 2`).
    pub fn add_effector(&mut self, name: impl Into<String>) -> u16 {
        self.effector_names.push(name.into());
        self.effector_params.push(Vec::new());
        self.effector_names.len() as u16 - 1
    }

    /// Add a parameter (an ordered list of byte-string arguments) to an
    /// effector declared with [`Self::add_effector`]; returns the
    /// parameter's index within that effector's parameter list.
    pub fn add_param(&mut self, effector: u16, args: Vec<Vec<u8>>) -> u32 {
        let list = &mut self.effector_params[effector as usize];
        list.push(args);
        list.len() as u32 - 1
    }

    /// Add a fully-specified transducer.
    ///
    /// `kernel` is supplied in `[class][state]` row-major order, matching
    /// [`crate::transducer::Transducer::transition`]'s indexing.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transducer(
        &mut self,
        name: impl Into<String>,
        state_count: u32,
        eq_class_count: u16,
        field_subset: Vec<u16>,
        signal_subset: Vec<u16>,
        eq_map: Vec<u16>,
        kernel: Vec<(i32, i32)>,
        vector_pool: Vec<i32>,
    ) {
        let mut flat_kernel = Vec::with_capacity(kernel.len() * 2);
        for (next, code) in kernel {
            flat_kernel.push(next);
            flat_kernel.push(code);
        }
        self.transducers.push(Transducer {
            name: name.into(),
            state_count,
            eq_class_count,
            field_subset,
            signal_subset,
            eq_map,
            kernel: flat_kernel,
            vector_pool,
        });
    }

    /// Finish assembly. Validates every cross-reference by round-tripping
    /// through the binary format (`Model::to_bytes` → `Model::from_bytes`).
    pub fn build(self) -> Result<Model> {
        let draft = Model {
            signal_names: self.signal_names,
            field_names: self.field_names,
            effector_names: self.effector_names,
            effector_params: self.effector_params,
            transducers: self.transducers,
        };
        Model::from_bytes(&draft.to_bytes())
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn ordinals_assigned_in_declaration_order() {
        let mut b = ModelBuilder::new();
        assert_eq!(b.add_field("a"), 1); // 0 is reserved for anonymous
        assert_eq!(b.add_field("b"), 2);
        assert_eq!(b.add_effector("out"), 0);
        assert_eq!(b.add_effector("count"), 1);
        assert_eq!(b.add_signal("custom"), ribose_core::PREDEFINED_SIGNAL_COUNT);
    }

    #[test]
    fn build_rejects_dangling_field_reference() {
        let mut b = ModelBuilder::new();
        let eq_map = vec![0u16; 256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize];
        b.add_transducer("bad", 1, 1, vec![99], vec![], eq_map, vec![(-1, 1)], vec![]);
        assert!(b.build().is_err());
    }
}
