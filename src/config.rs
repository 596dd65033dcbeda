// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Options that control how an [Interpreter](crate::Interpreter) runs

use std::fmt::{self, Display};

use crate::io::OutputPolicy;

/// Default number of ints memory may grow to: 16 Mi, or 128 MiB
pub const DEFAULT_MEMORY_LIMIT: usize = 1 << 24;

/// How much the interpreter reports about what it does through the [log] crate.
///
/// Verbosity never changes the result of running a program.
///
/// | Level | Emits |
/// |-------|-------|
/// | [Off](Verbosity::Off) | nothing |
/// | [Low](Verbosity::Low) | `info` records on start, pause, halt and output |
/// | [Medium](Verbosity::Medium) | plus a `debug` record per executed instruction |
/// | [High](Verbosity::High) | plus a `debug` record of each instruction's raw ints |
/// | [Extreme](Verbosity::Extreme) | plus a `trace` record with a memory dump before each instruction |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs, reason = "described in the table above")]
pub enum Verbosity {
    #[default]
    Off,
    Low,
    Medium,
    High,
    Extreme,
}

impl From<u8> for Verbosity {
    /// Map a count of `-v` flags onto a level, saturating at [Verbosity::Extreme]
    fn from(count: u8) -> Self {
        match count {
            0 => Self::Off,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ => Self::Extreme,
        }
    }
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        })
    }
}

/// Configuration of an [Interpreter](crate::Interpreter)
///
/// # Example
///
/// ```
/// use intcode::prelude::*;
/// let config = Config::new()
///     .pause_on_output(true)
///     .output_policy(OutputPolicy::Overwrite);
/// let mut interp = Interpreter::with_config([104, 1, 104, 2, 99], config);
/// assert_eq!(interp.run([]), Ok(Status::Paused));
/// assert_eq!(interp.last_output(), Some(1));
/// assert_eq!(interp.run([]), Ok(Status::Paused));
/// assert_eq!(interp.outputs(), &[2]);
/// assert_eq!(interp.run([]), Ok(Status::Finished));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub(crate) pause_on_output: bool,
    pub(crate) pause_on_input: bool,
    pub(crate) output_policy: OutputPolicy,
    pub(crate) verbosity: Verbosity,
    pub(crate) memory_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// The default configuration: no pausing except on missing input, all outputs kept, silent
    pub const fn new() -> Self {
        Self {
            pause_on_output: false,
            pause_on_input: false,
            output_policy: OutputPolicy::Accumulate,
            verbosity: Verbosity::Off,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }

    /// Pause immediately after every `OUT` instruction
    #[must_use]
    pub const fn pause_on_output(mut self, enabled: bool) -> Self {
        self.pause_on_output = enabled;
        self
    }

    /// Allow at most one `IN` instruction per call to [run](crate::Interpreter::run), pausing
    /// at the next one even if input is queued
    #[must_use]
    pub const fn pause_on_input(mut self, enabled: bool) -> Self {
        self.pause_on_input = enabled;
        self
    }

    /// Choose whether outputs accumulate or overwrite each other
    #[must_use]
    pub const fn output_policy(mut self, policy: OutputPolicy) -> Self {
        self.output_policy = policy;
        self
    }

    /// Set the logging verbosity
    #[must_use]
    pub const fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set how many ints memory may grow to
    #[must_use]
    pub const fn memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    /// Whether `OUT` pauses execution
    pub const fn pauses_on_output(&self) -> bool {
        self.pause_on_output
    }

    /// Whether `IN` is gated to one per run
    pub const fn pauses_on_input(&self) -> bool {
        self.pause_on_input
    }

    /// The configured verbosity
    pub const fn log_level(&self) -> Verbosity {
        self.verbosity
    }

    /// The configured memory limit
    pub const fn max_memory(&self) -> usize {
        self.memory_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flag_count() {
        assert_eq!(Verbosity::from(0), Verbosity::Off);
        assert_eq!(Verbosity::from(2), Verbosity::Medium);
        assert_eq!(Verbosity::from(9), Verbosity::Extreme);
        assert!(Verbosity::High > Verbosity::Low);
    }

    #[test]
    fn setters_chain() {
        let config = Config::new()
            .pause_on_input(true)
            .verbosity(Verbosity::High)
            .memory_limit(100);
        assert!(config.pauses_on_input());
        assert!(!config.pauses_on_output());
        assert_eq!(config.log_level(), Verbosity::High);
        assert_eq!(config.max_memory(), 100);
        assert_eq!(Config::default(), Config::new());
    }
}
