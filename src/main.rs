use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, bail};
use clap::Parser;
use desiscript::{
    Error, Session,
    interpreter::{
        evaluator::core::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_LOOP_ITERATIONS},
        lexer::tokenize,
        parse_source,
    },
};
use tracing_subscriber::EnvFilter;

/// desiscript runs programs written with Hindi keyword spellings (or their
/// English aliases).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    path: Option<PathBuf>,

    /// Runs the given source text instead of a file.
    #[arg(short, long, conflicts_with = "path")]
    eval: Option<String>,

    /// How many iterations one `jabtak` loop may run.
    #[arg(long, default_value_t = DEFAULT_MAX_LOOP_ITERATIONS)]
    max_iterations: usize,

    /// How many calls may be active at once.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Prints the token stream instead of running the program.
    #[arg(long)]
    tokens: bool,

    /// Prints the parsed program in canonical form instead of running it.
    #[arg(long, conflicts_with = "tokens")]
    ast: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = match (&args.path, &args.eval) {
        (_, Some(source)) => source.clone(),
        (Some(path), None) => {
            fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))?
        },
        (None, None) => bail!("no script given; pass a PATH or --eval SOURCE"),
    };

    if args.tokens {
        for token in tokenize(&source)? {
            println!("{:>4}:{:<4} {:?}", token.position.line, token.position.column, token.kind);
        }
        return Ok(());
    }
    if args.ast {
        print!("{}", parse_source(&source)?);
        return Ok(());
    }

    let mut session = Session::new().max_loop_iterations(args.max_iterations)
                                    .max_call_depth(args.max_depth);
    if let Some(path) = &args.path {
        session = session.source_path(path);
    }

    match session.run(&source) {
        Ok(output) => {
            output.iter().for_each(|line| println!("{line}"));
            Ok(())
        },
        Err(error) => {
            error.output().iter().for_each(|line| println!("{line}"));
            match error {
                Error::Compile(diagnostics) => Err(diagnostics.into()),
                Error::Runtime { error, .. } => Err(error.into()),
            }
        },
    }
}
