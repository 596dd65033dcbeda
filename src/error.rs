// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Errors reported by the [Interpreter](crate::Interpreter)

use thiserror::Error;

/// A fatal error encountered while executing an intcode instruction.
///
/// Every variant raised by an instruction carries the instruction pointer (`ip`) and the raw
/// instruction word (`word`) of the instruction that failed. Once one of those is returned, the
/// interpreter is poisoned, and must be [reset](crate::Interpreter::reset) or
/// [loaded](crate::Interpreter::load) before it can run again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    /// An invalid opcode was encountered
    #[error("encountered unrecognized opcode {opcode} (instruction {word} at {ip})")]
    InvalidOpcode {
        /// the low two digits of the instruction
        opcode: i64,
        /// the raw instruction
        word: i64,
        /// address of the instruction
        ip: i64,
    },
    /// An unknown parameter mode was encountered
    #[error("encountered unknown parameter mode {mode} (instruction {word} at {ip})")]
    InvalidMode {
        /// the offending mode digit
        mode: i64,
        /// the raw instruction
        word: i64,
        /// address of the instruction
        ip: i64,
    },
    /// An instruction tried to write to an immediate destination
    #[error("code attempted to write to immediate {param} (instruction {word} at {ip})")]
    InvalidWriteMode {
        /// the parameter that was used as a destination
        param: i64,
        /// the raw instruction
        word: i64,
        /// address of the instruction
        ip: i64,
    },
    /// A negative memory address was resolved, either for a read, a write, or a jump
    #[error("resolved negative address {address} (instruction {word} at {ip})")]
    BadAddress {
        /// the resolved address
        address: i64,
        /// the raw instruction
        word: i64,
        /// address of the instruction
        ip: i64,
    },
    /// An arithmetic result or computed address did not fit in an [i64]
    #[error("integer overflow (instruction {word} at {ip})")]
    Overflow {
        /// the raw instruction
        word: i64,
        /// address of the instruction
        ip: i64,
    },
    /// Memory would have grown past the configured limit
    #[error("address {address} is beyond the memory limit of {limit} ints (instruction {word} at {ip})")]
    MemoryLimit {
        /// the address that was accessed
        address: i64,
        /// the configured limit
        limit: usize,
        /// the raw instruction
        word: i64,
        /// address of the instruction
        ip: i64,
    },
    /// The interpreter was run before any program was loaded
    #[error("no program has been loaded")]
    NotReady,
    /// The interpreter was run again after a fatal error
    #[error("interpreter was poisoned by an earlier error and must be reset")]
    Poisoned,
}

impl InterpreterError {
    /// The address of the instruction that failed, if the error came from an instruction
    pub fn ip(&self) -> Option<i64> {
        match self {
            Self::InvalidOpcode { ip, .. }
            | Self::InvalidMode { ip, .. }
            | Self::InvalidWriteMode { ip, .. }
            | Self::BadAddress { ip, .. }
            | Self::Overflow { ip, .. }
            | Self::MemoryLimit { ip, .. } => Some(*ip),
            Self::NotReady | Self::Poisoned => None,
        }
    }

    /// The raw instruction that failed, if the error came from an instruction
    pub fn word(&self) -> Option<i64> {
        match self {
            Self::InvalidOpcode { word, .. }
            | Self::InvalidMode { word, .. }
            | Self::InvalidWriteMode { word, .. }
            | Self::BadAddress { word, .. }
            | Self::Overflow { word, .. }
            | Self::MemoryLimit { word, .. } => Some(*word),
            Self::NotReady | Self::Poisoned => None,
        }
    }
}

/// A fault raised while executing an instruction, before the instruction's position is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    InvalidOpcode(i64),
    InvalidMode(i64),
    InvalidWriteMode(i64),
    BadAddress(i64),
    Overflow,
    MemoryLimit { address: i64, limit: usize },
}

impl Fault {
    /// Attach the position and raw instruction word of the failing instruction
    pub(crate) fn at(self, ip: i64, word: i64) -> InterpreterError {
        match self {
            Fault::InvalidOpcode(opcode) => InterpreterError::InvalidOpcode { opcode, word, ip },
            Fault::InvalidMode(mode) => InterpreterError::InvalidMode { mode, word, ip },
            Fault::InvalidWriteMode(param) => InterpreterError::InvalidWriteMode { param, word, ip },
            Fault::BadAddress(address) => InterpreterError::BadAddress { address, word, ip },
            Fault::Overflow => InterpreterError::Overflow { word, ip },
            Fault::MemoryLimit { address, limit } => InterpreterError::MemoryLimit {
                address,
                limit,
                word,
                ip,
            },
        }
    }
}
