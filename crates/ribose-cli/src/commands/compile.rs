//! `ribose compile`: stub pointing at the external `ginr`-based compiler.
//!
//! Turning `ginr` DFA output into a model file is out of scope for this
//! runtime; `ribose-model::ModelBuilder` exists for assembling models
//! in-process (tests, embedding), not for driving that external tool from
//! the CLI.

use std::path::PathBuf;

pub struct CompileArgs {
    pub target: Option<String>,
    pub dfa_dir: PathBuf,
    pub model_out: PathBuf,
}

pub fn run(args: CompileArgs) {
    eprintln!(
        "error: `compile` is not implemented by this CLI; it requires the external \
         ginr-based DFA compiler.\n\
         \n\
         Expected inputs: --target {:?}, dfa-dir {}, model-out {}\n\
         Build a model directly with `ribose_model::ModelBuilder` if you're assembling one \
         in-process instead of compiling from `ginr` output.",
        args.target.as_deref().unwrap_or("<none>"),
        args.dfa_dir.display(),
        args.model_out.display(),
    );
    std::process::exit(1);
}
