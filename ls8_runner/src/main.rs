use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ls8_runner::{Executor, ExecutorConfiguration, ProgramLoader};

/// LS-8 emulator
/// This program loads a file of binary literals, one byte per line, in the
/// memory of an 8-bit computer and runs it until it halts.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CommandLineArguments {
    /// Program file location ("-" to read from standard input)
    filepath: PathBuf,

    /// Print the machine state and every executed instruction on standard error
    #[arg(short, long)]
    trace: bool,

    /// Print a hex dump of the memory once the program halted
    #[arg(short, long)]
    dump: bool,

    /// Stop with an error when HLT is not reached after that many instructions
    #[arg(short, long)]
    max_steps: Option<usize>,

    /// Display debug logs (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let parameters = CommandLineArguments::parse();
    let default_filter = if parameters.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let program = if parameters.filepath.as_os_str() == "-" {
        ProgramLoader::from_reader(io::stdin().lock())?
    } else {
        ProgramLoader::from_file(&parameters.filepath)?
    };

    let configuration = ExecutorConfiguration {
        trace: parameters.trace,
        dump: parameters.dump,
        max_steps: parameters.max_steps,
    };
    let report = Executor::new(configuration).run(&program, io::stdout(), io::stderr())?;

    if let Some(dump) = report.dump {
        println!("{}", dump);
    }

    Ok(())
}
