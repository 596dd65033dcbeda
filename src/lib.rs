// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library providing a pausable Intcode interpreter, and tools to wire several of them together
//!
//! The interpreter is fully functional, with all of the [Opcodes] and [Parameter Modes] defined in
//! the completed Intcode computer for [Day 9].
//!
//! # Example
//!
//! ```rust
//! use intcode::prelude::*;
//! let mut interpreter = Interpreter::new(vec![104, 1024, 99]);
//!
//! assert_eq!(
//!     interpreter.run_through_inputs(std::iter::empty()).unwrap(),
//!     (vec![1024], Status::Finished)
//! );
//! ```
//!
//! Execution pauses instead of failing when a program needs input that hasn't been provided, and
//! picks up where it left off on the next call to [run](Interpreter::run):
//!
//! ```rust
//! use intcode::prelude::*;
//! // add two inputs together and output the result
//! let mut interpreter = Interpreter::new([3, 11, 3, 12, 1, 11, 12, 13, 4, 13, 99, -1, -1, 9]);
//!
//! assert_eq!(interpreter.run([3]), Ok(Status::Paused));
//! assert_eq!(interpreter.pause_reason(), Some(PauseReason::AwaitingInput));
//! assert_eq!(interpreter.run([5]), Ok(Status::Finished));
//! assert_eq!(interpreter.last_output(), Some(8));
//! ```
//!
//! See the [network] module for running several interpreters as an amplifier chain or feedback
//! loop, and the [loader] module for reading programs from files.
//!
//! [Opcodes]: https://esolangs.org/wiki/Intcode#Opcodes
//! [Parameter Modes]: https://esolangs.org/wiki/Intcode#Parameter_Modes
//! [Day 9]: https://adventofcode.com/2019/day/9

/// A module providing the growable memory used by the interpreter
mod mmu;

mod internals;

pub mod config;
pub mod error;
pub mod io;
pub mod loader;
pub mod network;
pub mod trace;

use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};
use std::sync::Arc;

pub use config::{Config, Verbosity};
pub use error::InterpreterError;
pub use io::{OutputPolicy, Prompt};

use error::Fault;
use mmu::IntcodeMem;
use trace::Trace;

/// A small module that re-exports items needed when working with the Intcode interpreter
pub mod prelude {
    pub use crate::{
        Config, Interpreter, InterpreterError, OutputPolicy, PauseReason, Prompt, Status,
        Verbosity,
    };
    pub use std::iter::empty;
}

/// The status of an intcode interpreter.
///
/// A freshly constructed interpreter is [Ready](Status::Ready), or [NotReady](Status::NotReady)
/// if it was built without a program. [run](Interpreter::run) returns the status it stopped in:
///
/// * [Paused](Status::Paused) means there are more instructions to execute, and another call to
///   [run](Interpreter::run) will continue from where it left off. See
///   [pause_reason](Interpreter::pause_reason) for why.
/// * [Finished](Status::Finished) means that a `HALT` instruction has been executed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// No program has been loaded
    #[default]
    NotReady,
    /// Ready to execute the next instruction
    Ready,
    /// Stopped part way through, able to be resumed
    Paused,
    /// The program has halted
    Finished,
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::NotReady => "not ready",
            Status::Ready => "ready",
            Status::Paused => "paused",
            Status::Finished => "finished",
        })
    }
}

/// Why an interpreter is [Paused](Status::Paused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// An `IN` instruction found no input available. It is retried on resume.
    AwaitingInput,
    /// An `OUT` instruction ran while [pause on output](Config::pause_on_output) is enabled
    Output,
}

impl Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PauseReason::AwaitingInput => "awaiting input",
            PauseReason::Output => "produced output",
        })
    }
}

/// The result of executing a single instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction completed, and execution can continue
    Running,
    /// Execution stopped with the given status
    Stopped(Status),
}

/// Parameter mode for Intcode instruction
///
/// Intcode instruction parameters each have a mode:  [positional], [immediate], or [relative].
///
/// When executing an intcode instruction, the instruction's parameters are interpreted in
/// accordance with their associated modes.
///
/// [positional]: ParamMode::Positional
/// [immediate]: ParamMode::Immediate
/// [relative]: ParamMode::Relative
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum ParamMode {
    /// Positional Mode
    ///
    /// A parameter in positional mode evaluates to the value at the address specified by the
    /// parameter.
    #[default]
    Positional = 0,
    /// Immediate Mode
    ///
    /// A parameter in immediate mode evaluates directly to the value specified. Instructions which
    /// write to memory may not use immediate mode for their destinations.
    #[doc(alias = "#")]
    Immediate = 1,
    /// Relative Mode
    ///
    /// A parameter in relative mode evaluates to the value at the address specified by the
    /// parameter, added to the [Relative Base], which starts out as `0` but can be modified
    /// throughout the program's execution.
    ///
    /// [Relative Base]: https://adventofcode.com/2019/day/9
    #[doc(alias = "@")]
    Relative = 2,
}

impl Display for ParamMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Positional => Ok(()),
            ParamMode::Immediate => write!(fmt, "#"),
            ParamMode::Relative => write!(fmt, "@"),
        }
    }
}

impl TryFrom<i64> for ParamMode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(ParamMode::Positional),
            1 => Ok(ParamMode::Immediate),
            2 => Ok(ParamMode::Relative),
            _ => Err(i),
        }
    }
}

impl ParamMode {
    /// Extract the modes for the three parameters from an instruction.
    ///
    /// Every digit above the opcode must be a valid mode, even past the third one.
    pub(crate) fn extract(op: i64) -> Result<[ParamMode; 3], Fault> {
        let mut modes = [ParamMode::Positional; 3];
        let mut digits = op / 100;
        let mut n = 0;
        while digits != 0 {
            let mode = ParamMode::try_from(digits % 10).map_err(Fault::InvalidMode)?;
            if let Some(slot) = modes.get_mut(n) {
                *slot = mode;
            }
            digits /= 10;
            n += 1;
        }
        Ok(modes)
    }
}

/// An Intcode opcode
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[allow(missing_docs, reason = "documented by the table on the enum")]
///
/// | Opcode | Name | Params | Effect |
/// |--------|------|--------|--------|
/// | 1  | [Add](OpCode::Add)   | a, b, dst | `dst = a + b` |
/// | 2  | [Mul](OpCode::Mul)   | a, b, dst | `dst = a * b` |
/// | 3  | [In](OpCode::In)     | dst       | `dst = input` |
/// | 4  | [Out](OpCode::Out)   | a         | output `a` |
/// | 5  | [Jnz](OpCode::Jnz)   | a, dst    | jump to `dst` if `a != 0` |
/// | 6  | [Jz](OpCode::Jz)     | a, dst    | jump to `dst` if `a == 0` |
/// | 7  | [Lt](OpCode::Lt)     | a, b, dst | `dst = a < b` |
/// | 8  | [Eq](OpCode::Eq)     | a, b, dst | `dst = a == b` |
/// | 9  | [Rbo](OpCode::Rbo)   | a         | relative base `+= a` |
/// | 99 | [Halt](OpCode::Halt) |           | stop |
pub enum OpCode {
    Add = 1,
    Mul = 2,
    In = 3,
    Out = 4,
    Jnz = 5,
    Jz = 6,
    Lt = 7,
    Eq = 8,
    Rbo = 9,
    Halt = 99,
}

impl OpCode {
    /// Number of parameters the instruction takes
    pub const fn param_count(self) -> usize {
        match self {
            OpCode::Add | OpCode::Mul | OpCode::Lt | OpCode::Eq => 3,
            OpCode::Jnz | OpCode::Jz => 2,
            OpCode::In | OpCode::Out | OpCode::Rbo => 1,
            OpCode::Halt => 0,
        }
    }
}

impl TryFrom<i64> for OpCode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            1 => Ok(OpCode::Add),
            2 => Ok(OpCode::Mul),
            3 => Ok(OpCode::In),
            4 => Ok(OpCode::Out),
            5 => Ok(OpCode::Jnz),
            6 => Ok(OpCode::Jz),
            7 => Ok(OpCode::Lt),
            8 => Ok(OpCode::Eq),
            9 => Ok(OpCode::Rbo),
            99 => Ok(OpCode::Halt),
            _ => Err(i),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::In => "IN",
            OpCode::Out => "OUT",
            OpCode::Jnz => "JNZ",
            OpCode::Jz => "JZ",
            OpCode::Lt => "LT",
            OpCode::Eq => "EQ",
            OpCode::Rbo => "RBO",
            OpCode::Halt => "HALT",
        })
    }
}

#[derive(Clone)]
/// An intcode interpreter, which can be paused and resumed, and optionally logs or traces the
/// instructions it executes.
pub struct Interpreter {
    program: Option<Arc<[i64]>>,
    code: IntcodeMem,
    index: i64,
    rel_offset: i64,
    status: Status,
    pause_reason: Option<PauseReason>,
    poisoned: bool,
    inputs: VecDeque<i64>,
    prompt: Option<Prompt>,
    output: io::OutputSink,
    config: Config,
    /// whether an `IN` may run under [Config::pause_on_input]
    input_gate: bool,
    trace: Option<Trace>,
}

// ignore everything but the machine state itself
impl PartialEq for Interpreter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.rel_offset == other.rel_offset && self.code == other.code
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Interpreter")
            .field("code", &self.code)
            .field("rbo", &self.rel_offset)
            .field("ip", &self.index)
            .field("status", &self.status)
            .field("poisoned", &self.poisoned)
            .field("inputs", &self.inputs)
            .field("prompt", &self.prompt)
            .field("output", &self.output)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Interpreter {
    /// An interpreter with no program. It must be [loaded](Interpreter::load) before it can run.
    fn default() -> Self {
        Self::unloaded(Config::default())
    }
}

impl Index<usize> for Interpreter {
    type Output = i64;

    fn index(&self, i: usize) -> &Self::Output {
        self.code.index(i)
    }
}

impl IndexMut<usize> for Interpreter {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        self.code.index_mut(i)
    }
}

impl Interpreter {
    /// Create a new interpreter with the default [Config]. Collects `code` into the starting
    /// memory state.
    pub fn new(code: impl IntoIterator<Item = i64>) -> Self {
        Self::with_config(code, Config::default())
    }

    /// Create a new interpreter using `config`
    pub fn with_config(code: impl IntoIterator<Item = i64>, config: Config) -> Self {
        let mut interp = Self::unloaded(config);
        interp.load(code);
        interp
    }

    /// Create an interpreter with no program, in the [NotReady](Status::NotReady) state
    pub fn unloaded(config: Config) -> Self {
        Self {
            program: None,
            code: IntcodeMem::new(&[], config.memory_limit),
            index: 0,
            rel_offset: 0,
            status: Status::NotReady,
            pause_reason: None,
            poisoned: false,
            inputs: VecDeque::new(),
            prompt: None,
            output: io::OutputSink::new(config.output_policy),
            config,
            input_gate: false,
            trace: None,
        }
    }

    /// Replace the program, then [reset](Interpreter::reset)
    pub fn load(&mut self, code: impl IntoIterator<Item = i64>) {
        self.program = Some(code.into_iter().collect());
        self.reset();
    }

    /// Restore memory to a fresh copy of the program, move the instruction pointer and relative
    /// base back to `0`, and discard queued input, outputs, and any poisoning from an earlier
    /// error.
    ///
    /// Configuration, the [Prompt] and any active [Trace] are kept.
    pub fn reset(&mut self) {
        let program = self.program.as_deref().unwrap_or_default();
        self.code = IntcodeMem::new(program, self.config.memory_limit);
        self.index = 0;
        self.rel_offset = 0;
        self.status = if self.program.is_some() {
            Status::Ready
        } else {
            Status::NotReady
        };
        self.pause_reason = None;
        self.poisoned = false;
        self.inputs.clear();
        self.output.clear();
        self.input_gate = false;
    }

    /// Queue up inputs without running
    pub fn provide_input(&mut self, inputs: impl IntoIterator<Item = i64>) {
        self.inputs.extend(inputs);
    }

    /// Set a [Prompt] to ask for input whenever the queue is empty
    pub fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    /// Remove the [Prompt], if any
    pub fn clear_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    /// Queue `inputs` and execute until the program halts, pauses, or fails.
    ///
    /// * A [Paused](Status::Paused) interpreter resumes from where it stopped, without reloading
    ///   anything.
    /// * A [Finished](Status::Finished) interpreter is [reset](Interpreter::reset) first, then run
    ///   from the start with `inputs`. This makes reusing one interpreter for several runs of the
    ///   same program convenient, but calling [reset](Interpreter::reset) explicitly is clearer.
    /// * A [NotReady](Status::NotReady) interpreter returns [`InterpreterError::NotReady`].
    ///
    /// On error, the interpreter is poisoned, and every later call returns
    /// [`InterpreterError::Poisoned`] until it's reset.
    pub fn run(&mut self, inputs: impl IntoIterator<Item = i64>) -> Result<Status, InterpreterError> {
        self.resume(true)?;
        self.inputs.extend(inputs);
        if self.config.verbosity >= Verbosity::Low {
            log::info!(
                "running {} ints from ip {} with {} queued inputs",
                self.code.len(),
                self.index,
                self.inputs.len()
            );
        }
        loop {
            match self.exec_instruction()? {
                StepOutcome::Running => (),
                StepOutcome::Stopped(status) => break Ok(status),
            }
        }
    }

    /// Execute exactly one instruction.
    ///
    /// Unlike [run](Interpreter::run), this never restarts a [Finished](Status::Finished)
    /// interpreter.
    pub fn step(&mut self) -> Result<StepOutcome, InterpreterError> {
        self.resume(false)?;
        if self.status == Status::Finished {
            return Ok(StepOutcome::Stopped(Status::Finished));
        }
        self.exec_instruction()
    }

    /// Execute until either the program halts, or it pauses.
    /// Returns `Ok((v, s))`, where `v` is a [`Vec<i64>`] containing all outputs that have not yet
    /// been taken, and `s` is the [`Status`] at the time it stopped.
    ///
    /// On error, it will return an [`InterpreterError`] that reflects the error.
    pub fn run_through_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Result<(Vec<i64>, Status), InterpreterError> {
        let status = self.run(inputs)?;
        Ok((self.output.take(), status))
    }

    /// Pre-compute as much as possible - that is, run every instruction up to, but not
    /// including, the first `IN`, `OUT`, or `HALT` instruction, bubbling up any errors that occur.
    pub fn precompute(&mut self) -> Result<(), InterpreterError> {
        self.resume(false)?;
        while self.status == Status::Ready {
            let ip = self.index;
            let word = self.code.peek(ip);
            let instr = Self::parse_op(word).map_err(|fault| self.fail(fault, ip, word))?;
            if matches!(instr.opcode, OpCode::In | OpCode::Out | OpCode::Halt) {
                break;
            }
            self.exec_instruction()?;
        }
        Ok(())
    }

    /// Check that the interpreter can run, and leave the paused state.
    fn resume(&mut self, restart_finished: bool) -> Result<(), InterpreterError> {
        if self.poisoned {
            return Err(InterpreterError::Poisoned);
        }
        match self.status {
            Status::NotReady => return Err(InterpreterError::NotReady),
            Status::Finished if restart_finished => {
                if self.config.verbosity >= Verbosity::Low {
                    log::info!("restarting finished program from the beginning");
                }
                self.reset();
            }
            Status::Paused => {
                self.status = Status::Ready;
                self.pause_reason = None;
            }
            Status::Ready | Status::Finished => (),
        }
        self.input_gate = true;
        Ok(())
    }

    /// The current [Status]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Why the interpreter is paused, if it is
    pub fn pause_reason(&self) -> Option<PauseReason> {
        self.pause_reason
    }

    /// Whether an earlier error has stopped this interpreter from running
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The most recent output, even if it has since been [taken](Interpreter::take_outputs)
    pub fn last_output(&self) -> Option<i64> {
        self.output.last()
    }

    /// Outputs not yet taken. Under [`OutputPolicy::Overwrite`], this has at most one item.
    pub fn outputs(&self) -> &[i64] {
        self.output.values()
    }

    /// Take the outputs not yet taken, leaving none behind
    pub fn take_outputs(&mut self) -> Vec<i64> {
        self.output.take()
    }

    /// Inputs that have been queued but not yet consumed
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// A copy of the entire current memory
    pub fn memory_snapshot(&self) -> Vec<i64> {
        self.code.as_slice().to_vec()
    }

    /// A view of the entire current memory
    pub fn memory(&self) -> &[i64] {
        self.code.as_slice()
    }

    /// The position of the next instruction to execute
    pub fn instr_ptr(&self) -> i64 {
        self.index
    }

    /// The current relative base
    pub fn relative_base(&self) -> i64 {
        self.rel_offset
    }

    /// The configuration this interpreter was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Manually set a memory location
    #[doc(alias("poke", "write"))]
    pub fn mem_override(&mut self, location: usize, value: i64) {
        self.code[location] = value;
    }

    /// Get the memory at `address`, without growing memory
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: usize) -> i64 {
        self.code[address]
    }

    /// Execute the instruction at the instruction pointer. On failure, poisons the interpreter.
    pub(crate) fn exec_instruction(&mut self) -> Result<StepOutcome, InterpreterError> {
        let ip = self.index;
        if self.config.verbosity >= Verbosity::Extreme {
            log::trace!("memory before ip {ip}: {:?}", self.code);
        }
        let word = match self.code.read(ip) {
            Ok(word) => word,
            Err(fault) => return Err(self.fail(fault, ip, 0)),
        };
        match self.dispatch(word) {
            Ok(outcome) => Ok(outcome),
            Err(fault) => Err(self.fail(fault, ip, word)),
        }
    }

    fn fail(&mut self, fault: Fault, ip: i64, word: i64) -> InterpreterError {
        self.poisoned = true;
        let err = fault.at(ip, word);
        if self.config.verbosity >= Verbosity::Low {
            log::warn!("{err}");
        }
        err
    }

    fn dispatch(&mut self, word: i64) -> Result<StepOutcome, Fault> {
        let instr = Self::parse_op(word)?;
        if self.config.verbosity >= Verbosity::High {
            log::debug!(
                "ip: {:>8} | raw: {:?}",
                self.index,
                self.code.window(self.index, instr.opcode.param_count() + 1)
            );
        }
        match instr.opcode {
            OpCode::Add => self.op3(instr, i64::checked_add),
            OpCode::Mul => self.op3(instr, i64::checked_mul),
            OpCode::Lt => self.op3(instr, |a, b| Some(i64::from(a < b))),
            OpCode::Eq => self.op3(instr, |a, b| Some(i64::from(a == b))),
            OpCode::In => self.input(instr),
            OpCode::Out => self.output(instr),
            OpCode::Jnz => self.jump(instr, |v| v != 0),
            OpCode::Jz => self.jump(instr, |v| v == 0),
            OpCode::Rbo => self.adjust_base(instr),
            OpCode::Halt => {
                self.record(instr, &[]);
                self.status = Status::Finished;
                if self.config.verbosity >= Verbosity::Low {
                    log::info!("program halted at ip {}", self.index);
                }
                Ok(StepOutcome::Stopped(Status::Finished))
            }
        }
    }

    fn next_input(&mut self) -> Option<i64> {
        self.inputs
            .pop_front()
            .or_else(|| self.prompt.as_ref().and_then(Prompt::ask))
    }

    fn pause(&mut self, reason: PauseReason) -> StepOutcome {
        self.status = Status::Paused;
        self.pause_reason = Some(reason);
        if self.config.verbosity >= Verbosity::Low {
            log::info!("paused at ip {}: {reason}", self.index);
        }
        StepOutcome::Stopped(Status::Paused)
    }
}
