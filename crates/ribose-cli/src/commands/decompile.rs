//! `ribose decompile`: print a model's equivalence table and transition
//! listing.

use std::path::PathBuf;

use ribose_core::Colors;
use ribose_model::{Model, dump_decompile};

pub struct DecompileArgs {
    pub model: PathBuf,
    pub transducer: Option<String>,
    pub color: bool,
}

pub fn run(args: DecompileArgs) {
    let model = Model::load(&args.model).unwrap_or_else(|e| {
        eprintln!("error: loading {}: {e}", args.model.display());
        std::process::exit(1);
    });

    if let Some(name) = &args.transducer {
        if model.find_transducer(name).is_none() {
            eprintln!("error: no transducer named {name:?} in this model");
            std::process::exit(1);
        }
    }

    print!("{}", dump_decompile(&model, Colors::new(args.color), args.transducer.as_deref()));
}
