// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Run an intcode program, with inputs from the command line, or interactively from stdin

use intcode::loader::{self, Format};
use intcode::prelude::*;
use std::error::Error;
use std::io::{self, Write, stderr, stdin};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use itertools::Itertools;
use log::LevelFilter;
use thiserror::Error;

#[derive(PartialEq, Clone, Copy, ValueEnum)]
enum CodeFormat {
    /// comma-separated ASCII-encoded decimal numbers
    #[value(alias("text"))]
    #[value(alias("aoc"))]
    Ascii,
    /// little-endian 64-bit integers
    #[cfg_attr(target_endian = "little", value(alias("binary-native")))]
    #[value(name("binary-little-endian"), alias("binle"))]
    LittleEndian,
    #[cfg_attr(target_endian = "big", value(alias("binary-native")))]
    #[value(name("binary-big-endian"), alias("binbe"))]
    /// big-endian 64-bit integers
    BigEndian,
}

impl From<CodeFormat> for Format {
    fn from(format: CodeFormat) -> Self {
        match format {
            CodeFormat::Ascii => Format::Ascii,
            CodeFormat::LittleEndian => Format::LittleEndian,
            CodeFormat::BigEndian => Format::BigEndian,
        }
    }
}

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "Intcode interpreter", long_about = None)]
struct Args {
    #[arg(help = "The intcode program to run")]
    source: PathBuf,
    #[arg(help = "Input format for the intcode")]
    #[arg(short, long)]
    #[arg(default_value = "ascii")]
    format: CodeFormat,
    #[arg(short, long = "input", value_name = "INTS")]
    #[arg(help = "Comma-separated inputs to queue up. May be repeated.")]
    inputs: Vec<String>,
    #[arg(long, conflicts_with = "interactive")]
    #[arg(help = "Send lines from stdin as ASCII codes, and print output as text")]
    ascii: bool,
    #[arg(long)]
    #[arg(help = "Prompt on stdin for each input once the queued inputs run out")]
    interactive: bool,
    #[arg(short, long, action = ArgAction::Count)]
    #[arg(help = "Log execution details. Repeat for more detail, up to -vvvv")]
    verbose: u8,
    #[arg(long, value_name = "INTS")]
    #[arg(help = "Maximum number of ints memory may grow to")]
    memory_limit: Option<usize>,
    #[arg(long)]
    #[arg(help = "Print the final memory state to stderr")]
    dump_memory: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("an I/O error occured: {0}")]
    Io(#[from] io::Error),
    #[error("{0:?} is not a valid ASCII character")]
    InvalidAsciiChar(char),
    #[error("program is still waiting for input, but there is none left")]
    OutOfInput,
}

fn level_filter(verbosity: Verbosity) -> LevelFilter {
    match verbosity {
        Verbosity::Off => LevelFilter::Warn,
        Verbosity::Low => LevelFilter::Info,
        Verbosity::Medium | Verbosity::High => LevelFilter::Debug,
        Verbosity::Extreme => LevelFilter::Trace,
    }
}

macro_rules! to_ascii_char {
    ($e: expr) => {{
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "in macro to make it explicit"
        )]
        {
            $e as u8 as char
        }
    }};
}

/// Read a line from stdin as ASCII codes. Returns `None` at the end of input.
fn get_line() -> Result<Option<Vec<i64>>, RunError> {
    let mut buf = String::new();
    if stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    if let Some(bad_char) = buf.chars().find(|c| !c.is_ascii()) {
        return Err(RunError::InvalidAsciiChar(bad_char));
    }
    Ok(Some(buf.into_bytes().into_iter().map(i64::from).collect()))
}

/// Print outputs as text. Anything outside of the ASCII range is printed as a number on its own
/// line.
fn print_ascii(intcode_output: Vec<i64>) -> Result<(), RunError> {
    let mut s = String::with_capacity(intcode_output.len());
    for i in intcode_output {
        match i {
            c @ 0..128 => s.push(to_ascii_char!(c)),
            _ => {
                if !s.is_empty() && !s.ends_with('\n') {
                    s.push('\n');
                }
                s.push_str(&format!("{i}\n"));
            }
        }
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(s.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn ascii_run(interp: &mut Interpreter, inputs: Vec<i64>) -> Result<(), Box<dyn Error>> {
    let (output, mut status) = interp.run_through_inputs(inputs)?;
    print_ascii(output)?;
    while status != Status::Finished {
        let line = get_line()?.ok_or(RunError::OutOfInput)?;
        let (output, new_status) = interp.run_through_inputs(line)?;
        print_ascii(output)?;
        status = new_status;
    }
    Ok(())
}

/// A [Prompt] that reads one int per line from stdin
fn stdin_prompt() -> Prompt {
    Prompt::new(|| {
        loop {
            eprint!("input> ");
            let _ = stderr().flush();
            let mut buf = String::new();
            match stdin().read_line(&mut buf) {
                Ok(0) | Err(_) => return None,
                Ok(_) => match buf.trim().parse() {
                    Ok(i) => return Some(i),
                    Err(e) => eprintln!("{:?} is not a valid input: {e}", buf.trim()),
                },
            }
        }
    })
}

fn plain_run(
    interp: &mut Interpreter,
    inputs: Vec<i64>,
    interactive: bool,
) -> Result<(), Box<dyn Error>> {
    if interactive {
        interp.set_prompt(stdin_prompt());
    }
    let (output, status) = interp.run_through_inputs(inputs)?;
    for i in output {
        println!("{i}");
    }
    if status == Status::Paused {
        return Err(RunError::OutOfInput.into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let verbosity = Verbosity::from(args.verbose);
    env_logger::Builder::new()
        .filter_level(level_filter(verbosity))
        .parse_default_env()
        .init();

    let prog = loader::read_program(&args.source, args.format.into())?;
    let inputs: Vec<i64> = args
        .inputs
        .iter()
        .map(|s| loader::parse_program(s))
        .flatten_ok()
        .collect::<Result<_, _>>()?;

    let mut config = Config::new().verbosity(verbosity);
    if let Some(limit) = args.memory_limit {
        config = config.memory_limit(limit);
    }
    let mut interp = Interpreter::with_config(prog, config);

    let result = if args.ascii {
        ascii_run(&mut interp, inputs)
    } else {
        plain_run(&mut interp, inputs, args.interactive)
    };

    if args.dump_memory {
        eprintln!("ip: {}, rbo: {}", interp.instr_ptr(), interp.relative_base());
        eprintln!("{}", interp.memory().iter().join(","));
    }
    result
}
