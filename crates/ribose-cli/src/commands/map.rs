//! `ribose map`: print a model's effector/field/signal name tables.

use std::path::PathBuf;

use ribose_core::Colors;
use ribose_model::{Model, dump_map};

pub struct MapArgs {
    pub model: PathBuf,
    pub color: bool,
}

pub fn run(args: MapArgs) {
    let model = Model::load(&args.model).unwrap_or_else(|e| {
        eprintln!("error: loading {}: {e}", args.model.display());
        std::process::exit(1);
    });

    print!("{}", dump_map(&model, Colors::new(args.color)));
}
