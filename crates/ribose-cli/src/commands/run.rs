//! `ribose run`: drive a transducer against an input file.

use std::io::Read;
use std::path::PathBuf;

use ribose::{BaseTarget, Model, PrintLogger, Status};
use ribose_runtime::{NoopLogger, Verbosity};

pub struct RunArgs {
    pub model: PathBuf,
    pub transducer: String,
    pub input: PathBuf,
    pub nil: bool,
    pub verbose: Verbosity,
}

pub fn run(args: RunArgs) {
    let model = Model::load(&args.model).unwrap_or_else(|e| {
        eprintln!("error: loading {}: {e}", args.model.display());
        std::process::exit(1);
    });

    let input = read_input(&args.input).unwrap_or_else(|e| {
        eprintln!("error: reading {}: {e}", args.input.display());
        std::process::exit(1);
    });

    let mut target = BaseTarget::new(&model, std::io::stdout());
    if let Err(e) = target.start(&args.transducer) {
        eprintln!("error: starting {:?}: {e}", args.transducer);
        std::process::exit(1);
    }
    if args.nil {
        if let Err(e) = target.signal("nil") {
            eprintln!("error: injecting nil signal: {e}");
            std::process::exit(1);
        }
    }
    target.feed(input);

    let status = if args.verbose == Verbosity::Silent {
        target.run(&mut NoopLogger)
    } else {
        target.run(&mut PrintLogger::new(args.verbose))
    };

    match status {
        Ok(Status::Stopped) => {}
        Ok(other) => {
            eprintln!("warning: transductor ended in status {other:?}, not Stopped");
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &std::path::Path) -> std::io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(path)
    }
}
