// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;

/// A decoded instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Instr {
    pub(crate) word: i64,
    pub(crate) opcode: OpCode,
    pub(crate) modes: [ParamMode; 3],
}

impl Interpreter {
    // Given a 5 digit number, digits ABCDE are used as follows:
    // DE is the two-digit opcode
    // C is the 1st parameter's mode
    // B is the 2nd parameter's mode
    // A is the 3rd parameter's mode
    //
    // So *0*1202 would be parsed as follows:
    //
    // Opcode 02 is multiply
    // C=2: 1st parameter is in relative mode
    // B=1: 2nd parameter is in immediate mode
    // A=0: 3rd parameter is in positional mode
    pub(crate) fn parse_op(word: i64) -> Result<Instr, Fault> {
        // negative words have a negative remainder, so are always rejected here
        let opcode = OpCode::try_from(word % 100).map_err(Fault::InvalidOpcode)?;
        Ok(Instr {
            word,
            opcode,
            modes: ParamMode::extract(word)?,
        })
    }

    /// The raw int of the parameter at `offset`, without resolving it
    fn raw_param(&self, offset: i64) -> i64 {
        self.code.peek(self.index + offset)
    }

    /// Processes the parameter at `offset` into a concrete value using the method appropriate
    /// for `mode`.
    pub(crate) fn resolve_param(&mut self, mode: ParamMode, offset: i64) -> Result<i64, Fault> {
        let param = self.code.read(self.index + offset)?;
        match mode {
            ParamMode::Positional => self.code.read(param),
            ParamMode::Immediate => Ok(param),
            ParamMode::Relative => {
                let address = self.rel_offset.checked_add(param).ok_or(Fault::Overflow)?;
                self.code.read(address)
            }
        }
    }

    /// Processes the parameter at `offset` into a destination address according to `mode`.
    /// The address is checked, but memory is not grown until it's written to.
    pub(crate) fn resolve_dest(&mut self, mode: ParamMode, offset: i64) -> Result<i64, Fault> {
        let param = self.code.read(self.index + offset)?;
        let address = match mode {
            ParamMode::Positional => param,
            ParamMode::Relative => self.rel_offset.checked_add(param).ok_or(Fault::Overflow)?,
            ParamMode::Immediate => return Err(Fault::InvalidWriteMode(param)),
        };
        self.code.check(address)?;
        Ok(address)
    }

    /// Record the instruction into the active trace, and log it if verbose enough
    pub(crate) fn record(&mut self, instr: Instr, resolved_params: &[(i64, i64)]) {
        let logging = self.config.verbosity >= Verbosity::Medium;
        if !logging && self.trace.is_none() {
            return;
        }
        let traced = trace::TracedInstr::build(instr, self.index, self.rel_offset, resolved_params);
        if logging {
            log::debug!("ip: {:>8} | rbo: {:>5} | {traced}", self.index, self.rel_offset);
        }
        if let Some(trace) = self.trace.as_mut() {
            trace.push(traced);
        }
    }

    /// common logic of all 4 instructions that take 3 parameters
    pub(crate) fn op3(
        &mut self,
        instr: Instr,
        operation: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<StepOutcome, Fault> {
        let a = self.resolve_param(instr.modes[0], 1)?;
        let b = self.resolve_param(instr.modes[1], 2)?;
        let dest = self.resolve_dest(instr.modes[2], 3)?;
        let val = operation(a, b).ok_or(Fault::Overflow)?;
        self.record(
            instr,
            &[
                (self.raw_param(1), a),
                (self.raw_param(2), b),
                (self.raw_param(3), val),
            ],
        );
        self.code.write(dest, val)?;
        self.index += 4;
        Ok(StepOutcome::Running)
    }

    /// `IN`: store the next input, or pause without moving if there is none
    pub(crate) fn input(&mut self, instr: Instr) -> Result<StepOutcome, Fault> {
        let dest = self.resolve_dest(instr.modes[0], 1)?;
        if self.config.pause_on_input && !self.input_gate {
            return Ok(self.pause(PauseReason::AwaitingInput));
        }
        let Some(val) = self.next_input() else {
            return Ok(self.pause(PauseReason::AwaitingInput));
        };
        self.input_gate = false;
        self.record(instr, &[(self.raw_param(1), val)]);
        self.code.write(dest, val)?;
        self.index += 2;
        Ok(StepOutcome::Running)
    }

    /// `OUT`: emit a value, pausing afterwards if configured to
    pub(crate) fn output(&mut self, instr: Instr) -> Result<StepOutcome, Fault> {
        let val = self.resolve_param(instr.modes[0], 1)?;
        self.record(instr, &[(self.raw_param(1), val)]);
        self.index += 2;
        self.output.emit(val);
        if self.config.verbosity >= Verbosity::Low {
            log::info!("output: {val}");
        }
        if self.config.pause_on_output {
            Ok(self.pause(PauseReason::Output))
        } else {
            Ok(StepOutcome::Running)
        }
    }

    pub(crate) fn jump(
        &mut self,
        instr: Instr,
        func: impl Fn(i64) -> bool,
    ) -> Result<StepOutcome, Fault> {
        let expr = self.resolve_param(instr.modes[0], 1)?;
        let dest = self.resolve_param(instr.modes[1], 2)?;
        let jumping = func(expr);
        if jumping {
            self.code.check(dest)?;
        }
        self.record(
            instr,
            &[(self.raw_param(1), expr), (self.raw_param(2), dest)],
        );
        if jumping {
            self.index = dest;
        } else {
            self.index += 3;
        }
        Ok(StepOutcome::Running)
    }

    /// `RBO`: move the relative base
    pub(crate) fn adjust_base(&mut self, instr: Instr) -> Result<StepOutcome, Fault> {
        let delta = self.resolve_param(instr.modes[0], 1)?;
        let rel_offset = self.rel_offset.checked_add(delta).ok_or(Fault::Overflow)?;
        self.record(instr, &[(self.raw_param(1), delta)]);
        self.rel_offset = rel_offset;
        self.index += 2;
        Ok(StepOutcome::Running)
    }
}
