//! Minimal CLI front end for the Mines interpreter: reads a source file, wires up an
//! input source, and runs it to completion. Argument handling is hand-rolled rather
//! than pulled in from a crate — see DESIGN.md for why.

use mines_vm::io::{ChannelInputSource, EchoInputSource, InputSource};
use mines_vm::{parse, Runner};
use std::env;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

struct Args {
    source: String,
    input: Option<String>,
    echo: Option<String>,
    debug: bool,
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut source = None;
    let mut input = None;
    let mut echo = None;
    let mut debug = false;

    let mut raw = raw.peekable();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-V" | "--version" => {
                println!("mines {VERSION}");
                std::process::exit(0);
            }
            "-d" | "--debug" => debug = true,
            "-i" | "--input" => {
                input = Some(raw.next().ok_or("-i/--input requires a file path")?);
            }
            "-e" | "--echo" => {
                echo = Some(raw.next().ok_or("-e/--echo requires a string")?);
            }
            _ if source.is_none() => source = Some(arg),
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }

    Ok(Args {
        source: source.ok_or("missing source file path")?,
        input,
        echo,
        debug,
    })
}

fn run_to_stdout(program: mines_vm::Program, input_source: impl InputSource) {
    let mut runner = Runner::new(program, input_source, io::stdout(), None);
    runner.run();
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if args.debug {
        if io::stdin().is_terminal() {
            eprintln!(
                "An interactive debugger is outside this crate's scope; running without stepping."
            );
        } else {
            eprintln!("Debug mode is unavailable since stdin is not connected to tty.");
            return ExitCode::SUCCESS;
        }
    }

    let code = std::fs::read_to_string(&args.source)
        .map_err(|error| format!("could not read '{}': {error}", args.source))
        .and_then(|code| parse(&code).map_err(|error| error.to_string()));

    let program = match code {
        Ok(program) => program,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(input_path) = args.input {
        match File::open(&input_path) {
            Ok(file) => match ChannelInputSource::new(file) {
                Ok(source) => run_to_stdout(program, source),
                Err(error) => {
                    eprintln!("could not read '{input_path}': {error}");
                    return ExitCode::FAILURE;
                }
            },
            Err(error) => {
                eprintln!("could not open '{input_path}': {error}");
                return ExitCode::FAILURE;
            }
        }
    } else if let Some(echo) = args.echo {
        run_to_stdout(program, EchoInputSource::new(echo));
    } else {
        match ChannelInputSource::new(io::stdin()) {
            Ok(source) => run_to_stdout(program, source),
            Err(error) => {
                eprintln!("could not read stdin: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    io::stdout().flush().ok();
    ExitCode::SUCCESS
}
