//! Argument parsing.
//!
//! A small surface (`run`/`compile`/`decompile`/`map`), so this uses clap's
//! derive API directly rather than the builder-style command factories a
//! larger multi-command CLI would reach for.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ribose", bin_name = "ribose")]
#[command(about = "Run and inspect compiled Ribose transducer models")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a transducer against an input file
    #[command(after_help = r#"EXAMPLES:
  ribose run greeter.rbm Main input.txt
  ribose run --nil greeter.rbm Main -
  ribose run --verbose=symbols greeter.rbm Main input.txt"#)]
    Run {
        /// Path to the compiled model file
        model: PathBuf,

        /// Name of the transducer to start
        transducer: String,

        /// Input file ("-" for stdin)
        input: PathBuf,

        /// Inject an initial `nil` signal before the input
        #[arg(long)]
        nil: bool,

        /// Trace execution to stderr
        #[arg(long, value_enum, default_value_t = VerbosityArg::Silent)]
        verbose: VerbosityArg,
    },

    /// Compile `ginr` DFA output into a model file
    #[command(after_help = "This is a separate, external tool; see the project documentation.")]
    Compile {
        /// Target class the compiled model is built for
        #[arg(long, value_name = "CLASS")]
        target: Option<String>,

        /// Directory of `ginr`-produced `.dfa` files
        dfa_dir: PathBuf,

        /// Path to write the compiled model to
        model_out: PathBuf,
    },

    /// Print the equivalence table and transition listing for a model
    Decompile {
        /// Path to the compiled model file
        model: PathBuf,

        /// Limit the listing to one transducer
        transducer: Option<String>,

        #[command(flatten)]
        color: ColorArg,
    },

    /// Print effector/field/signal name tables
    Map {
        /// Path to the compiled model file
        model: PathBuf,

        #[command(flatten)]
        color: ColorArg,
    },
}

#[derive(clap::Args)]
pub struct ColorArg {
    /// Colorize output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum VerbosityArg {
    #[default]
    Silent,
    Transitions,
    Effectors,
    Symbols,
}

impl From<VerbosityArg> for ribose_runtime::Verbosity {
    fn from(v: VerbosityArg) -> Self {
        match v {
            VerbosityArg::Silent => ribose_runtime::Verbosity::Silent,
            VerbosityArg::Transitions => ribose_runtime::Verbosity::Transitions,
            VerbosityArg::Effectors => ribose_runtime::Verbosity::Effectors,
            VerbosityArg::Symbols => ribose_runtime::Verbosity::Symbols,
        }
    }
}
