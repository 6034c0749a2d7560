//! Human-readable decompile listing for a loaded model.
//!
//! Grounded on the teacher's `DumpContext` (a struct carrying the pieces a
//! dump needs — names, an output buffer, color toggles — through one pass
//! over the compiled data). The `ribose-cli` `decompile` subcommand
//! (`spec.md` §6) is a thin wrapper over [`dump`].

use std::fmt::Write as _;

use ribose_core::Colors;

use crate::module::Model;

/// Renders one model to a decompile listing.
pub struct DumpContext<'a> {
    model: &'a Model,
    colors: Colors,
    out: String,
}

impl<'a> DumpContext<'a> {
    pub fn new(model: &'a Model, colors: Colors) -> Self {
        Self { model, colors, out: String::new() }
    }

    /// Full listing: name tables plus every transducer's equivalence table
    /// and transition listing.
    pub fn render(mut self) -> String {
        self.signals();
        self.fields();
        self.effectors();
        self.transducers(None);
        self.out
    }

    /// `ribose-cli map` (`spec.md` §6): name tables only.
    pub fn render_names(mut self) -> String {
        self.signals();
        self.fields();
        self.effectors();
        self.out
    }

    /// `ribose-cli decompile` (`spec.md` §6): the equivalence table and
    /// transition listing, for one transducer if named or every transducer
    /// otherwise.
    pub fn render_decompile(mut self, filter: Option<&str>) -> String {
        self.transducers(filter);
        self.out
    }

    fn heading(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}{text}{}", self.colors.blue, self.colors.reset);
    }

    fn signals(&mut self) {
        self.heading("signals:");
        for (i, name) in ["nul", "nil", "eol", "eos"].iter().enumerate() {
            let _ = writeln!(self.out, "  {i:>4}  {name}");
        }
        for (i, name) in self.model.signal_names.iter().enumerate() {
            let ordinal = ribose_core::PREDEFINED_SIGNAL_COUNT as usize + i;
            let _ = writeln!(self.out, "  {ordinal:>4}  {name}");
        }
    }

    fn fields(&mut self) {
        self.heading("fields:");
        for (i, name) in self.model.field_names.iter().enumerate() {
            let label = if i == 0 { "(anonymous)" } else { name.as_str() };
            let _ = writeln!(self.out, "  {i:>4}  {label}");
        }
    }

    fn effectors(&mut self) {
        self.heading("effectors:");
        for (i, name) in self.model.effector_names.iter().enumerate() {
            let code = i + 2;
            let _ = writeln!(self.out, "  {code:>4}  {name}");
            for (p, params) in self.model.effector_params[i].iter().enumerate() {
                let rendered: Vec<String> = params.iter().map(|a| render_arg(a)).collect();
                let _ = writeln!(self.out, "        [{p}] {}", rendered.join(", "));
            }
        }
    }

    fn transducers(&mut self, filter: Option<&str>) {
        self.heading("transducers:");
        for t in &self.model.transducers {
            if let Some(name) = filter {
                if t.name != name {
                    continue;
                }
            }
            let _ = writeln!(
                self.out,
                "  {}{}{}  states={} classes={} vector_pool={}",
                self.colors.green,
                t.name,
                self.colors.reset,
                t.state_count,
                t.eq_class_count,
                t.vector_pool.len()
            );
            if !t.field_subset.is_empty() {
                let _ = writeln!(self.out, "    fields: {:?}", t.field_subset);
            }
            if !t.signal_subset.is_empty() {
                let _ = writeln!(self.out, "    signals: {:?}", t.signal_subset);
            }

            self.equivalence_table(t);

            for class in 0..t.eq_class_count {
                for state in 0..t.state_count {
                    let tr = t.transition(class, state);
                    if tr.next_state < 0 && tr.code <= 1 {
                        continue; // unreachable (dead) cell, skip for brevity
                    }
                    let _ = writeln!(
                        self.out,
                        "    [{class},{state}] -> state {} code {}",
                        tr.next_state, tr.code
                    );
                }
            }
        }
    }

    /// Run-length encode `eq_map` (symbol ordinal -> class) into ranges;
    /// printing one line per ordinal would drown the transition listing.
    fn equivalence_table(&mut self, t: &crate::transducer::Transducer) {
        let map = t.eq_map();
        if map.is_empty() {
            return;
        }
        let _ = writeln!(self.out, "    equivalence:");
        let mut start = 0usize;
        for i in 1..=map.len() {
            if i == map.len() || map[i] != map[start] {
                let _ = writeln!(self.out, "      {start}..{} -> class {}", i - 1, map[start]);
                start = i;
            }
        }
    }
}

fn render_arg(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) if s.chars().all(|c| !c.is_control()) => format!("{s:?}"),
        _ => format!("{bytes:02x?}"),
    }
}

/// Convenience entry point rendering the full listing (names and every
/// transducer's equivalence table and transitions).
pub fn dump(model: &Model, colors: Colors) -> String {
    DumpContext::new(model, colors).render()
}

/// `ribose-cli map`: name tables only.
pub fn dump_map(model: &Model, colors: Colors) -> String {
    DumpContext::new(model, colors).render_names()
}

/// `ribose-cli decompile`: the equivalence table and transition listing.
pub fn dump_decompile(model: &Model, colors: Colors, filter: Option<&str>) -> String {
    DumpContext::new(model, colors).render_decompile(filter)
}
