mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Command};
use commands::{compile, decompile, map, run};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { model, transducer, input, nil, verbose } => {
            run::run(run::RunArgs { model, transducer, input, nil, verbose: verbose.into() });
        }
        Command::Compile { target, dfa_dir, model_out } => {
            compile::run(compile::CompileArgs { target, dfa_dir, model_out });
        }
        Command::Decompile { model, transducer, color } => {
            decompile::run(decompile::DecompileArgs {
                model,
                transducer,
                color: color.color.should_colorize(),
            });
        }
        Command::Map { model, color } => {
            map::run(map::MapArgs { model, color: color.color.should_colorize() });
        }
    }
}
