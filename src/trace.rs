// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Recording of executed instructions
//!
//! See [Interpreter::start_trace] for usage.
use std::fmt::{self, Display};

use super::internals::Instr;
use super::{Interpreter, OpCode, ParamMode};

/// A parameter, as (raw parameter, resolved value)
type Param = (i64, i64);

/// The parameters of a traced instruction. For instructions that store a value, the last one
/// resolves to the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Params {
    None,
    One(Param),
    Two(Param, Param),
    Three(Param, Param, Param),
}

impl From<&[Param]> for Params {
    fn from(params: &[Param]) -> Self {
        match *params {
            [] => Self::None,
            [a] => Self::One(a),
            [a, b] => Self::Two(a, b),
            [a, b, c, ..] => Self::Three(a, b, c),
        }
    }
}

/// An opaque type containing information about what instruction was executed, which can be queried
/// with its various methods, or converted into a [String] using its [Display] impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracedInstr {
    params: Params,
    op_int: i64,
    instr_ptr: i64,
    rel_base: i64,
    modes: [ParamMode; 3],
    opcode: OpCode,
}

impl TracedInstr {
    /// Return the relative base at the time the traced instruction was excuted,
    pub fn rel_base(&self) -> i64 {
        self.rel_base
    }

    /// Return the instruction pointer's position when the traced instruction was executed
    pub fn instr_ptr(&self) -> i64 {
        self.instr_ptr
    }

    /// Return the actual integer of the traced instruction
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    /// Return the opcode of the traced instruction
    pub fn op_code(&self) -> OpCode {
        self.opcode
    }

    /// If the instruction stored a value, return that value
    pub fn stored_val(&self) -> Option<i64> {
        match (self.opcode, self.params) {
            (OpCode::Add | OpCode::Mul | OpCode::Lt | OpCode::Eq, Params::Three(_, _, (_, v)))
            | (OpCode::In, Params::One((_, v))) => Some(v),
            _ => None,
        }
    }

    /// If the instruction was `OUT`, return the value it output
    pub fn output_val(&self) -> Option<i64> {
        match (self.opcode, self.params) {
            (OpCode::Out, Params::One((_, v))) => Some(v),
            _ => None,
        }
    }

    /// Return an array of the parameter modes of the traced instruction
    pub fn param_modes(&self) -> [ParamMode; 3] {
        self.modes
    }

    pub(super) fn build(instr: Instr, instr_ptr: i64, rel_base: i64, params: &[Param]) -> Self {
        debug_assert_eq!(params.len(), instr.opcode.param_count());
        Self {
            params: Params::from(params),
            op_int: instr.word,
            instr_ptr,
            rel_base,
            modes: instr.modes,
            opcode: instr.opcode,
        }
    }
}

impl Interpreter {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    ///# use intcode::prelude::*;
    /// let mut interp = Interpreter::new([1101, 90, 9, 4, 99]);
    /// assert!(interp.start_trace().is_none());
    /// interp.run([]).unwrap();
    /// let trace = interp.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored_val(), Some(99));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.trace.replace(Trace::new())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [Interpreter::start_trace]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Get a view of the current trace
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A log of instructions that an [Interpreter] has executed since a call to
/// [Interpreter::start_trace]
///
/// see [Interpreter::start_trace]
pub struct Trace(pub Vec<TracedInstr>);

impl Trace {
    pub(crate) fn push(&mut self, traced: TracedInstr) {
        self.0.push(traced);
    }

    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    /// Values output by the traced instructions, in order
    pub fn outputs(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().filter_map(TracedInstr::output_val)
    }
}

impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ran instruction at {:0>4}: op int {: <5} | [{}",
            self.instr_ptr, self.op_int, self.opcode
        )?;
        let [m0, m1, m2] = self.modes;
        match (self.opcode, self.params) {
            (OpCode::Jnz | OpCode::Jz, Params::Two((p, cond), (p_dest, dest))) => {
                let jumped = (cond != 0) == (self.opcode == OpCode::Jnz);
                let verb = if jumped { "jumped" } else { "didn't jump" };
                write!(f, " {m0}{p} (resolves to {cond}), {m1}{p_dest} ({verb} to {dest})")?;
            }
            (OpCode::Rbo, Params::One((p, v))) => write!(
                f,
                " {m0}{p} (resolved to {v}) (went from {} to {})",
                self.rel_base,
                self.rel_base.saturating_add(v)
            )?,
            (OpCode::In, Params::One((p, v))) => write!(f, " {m0}{p} (stored {v})")?,
            (_, Params::One((p, v))) => write!(f, " {m0}{p} (resolves to {v})")?,
            (_, Params::Three((pa, va), (pb, vb), (dest, val))) => write!(
                f,
                " {m0}{pa} (resolves to {va}), {m1}{pb} (resolves to {vb}), {m2}{dest} (stored {val})"
            )?,
            _ => (),
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::{OpCode, ParamMode};

    #[test]
    fn traced_instr_display() {
        let mut interp = Interpreter::new([3, 9, 1008, 9, 8, 9, 4, 9, 99, 0]);
        interp.start_trace();
        interp.run([8]).unwrap();
        let trace = interp.end_trace().unwrap();
        let lines: Vec<String> = trace.0.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "ran instruction at 0000: op int 3     | [IN 9 (stored 8)]",
                "ran instruction at 0002: op int 1008  | [EQ 9 (resolves to 8), #8 (resolves to 8), 9 (stored 1)]",
                "ran instruction at 0006: op int 4     | [OUT 9 (resolves to 1)]",
                "ran instruction at 0008: op int 99    | [HALT]",
            ]
        );
        assert_eq!(trace.outputs().collect::<Vec<_>>(), vec![1]);
        assert_eq!(trace.0[1].op_code(), OpCode::Eq);
        assert_eq!(
            trace.0[1].param_modes(),
            [
                ParamMode::Positional,
                ParamMode::Immediate,
                ParamMode::Positional
            ]
        );
    }

    #[test]
    fn trace_records_relative_base() {
        let mut interp = Interpreter::new([109, 5, 109, -2, 99]);
        interp.start_trace();
        interp.run([]).unwrap();
        let trace = interp.show_trace().unwrap();
        assert_eq!(trace.0[1].rel_base(), 5);
        assert_eq!(
            trace.0[1].to_string(),
            "ran instruction at 0002: op int 109   | [RBO #-2 (resolved to -2) (went from 5 to 3)]"
        );
        assert_eq!(trace.0[2].rel_base(), 3);
    }

    #[test]
    fn jumps_displayed() {
        let mut interp = Interpreter::new([1105, 0, 9, 1106, 0, 6, 99]);
        interp.start_trace();
        interp.run([]).unwrap();
        let trace = interp.end_trace().unwrap();
        let lines: Vec<String> = trace.0.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "ran instruction at 0000: op int 1105  | [JNZ #0 (resolves to 0), #9 (didn't jump to 9)]",
                "ran instruction at 0003: op int 1106  | [JZ #0 (resolves to 0), #6 (jumped to 6)]",
                "ran instruction at 0006: op int 99    | [HALT]",
            ]
        );
    }

    #[test]
    fn no_trace_without_start() {
        let mut interp = Interpreter::new([104, 1, 99]);
        interp.run([]).unwrap();
        assert!(interp.end_trace().is_none());
    }
}
