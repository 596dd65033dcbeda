// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Running several interpreters together, each feeding its outputs to the next
//!
//! Every amplifier runs its own copy of the same program. It first reads its phase setting,
//! then the signal from the amplifier before it, and outputs a new signal.
//!
//! * In a [chain](Wiring::Chain), the first amplifier gets the starting signal, and the last
//!   amplifier's output is the result.
//! * In a [feedback loop](Wiring::FeedbackLoop), the last amplifier's output is fed back into
//!   the first one, until every amplifier halts. The final output of the last amplifier is the
//!   result.
//!
//! # Example
//!
//! ```
//! use intcode::network::{max_signal, Wiring};
//! const PROGRAM: [i64; 17] = [3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];
//! assert_eq!(
//!     max_signal(&PROGRAM, 0..5, Wiring::Chain).unwrap(),
//!     (43210, vec![4, 3, 2, 1, 0])
//! );
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use itertools::Itertools;
use thiserror::Error;

use crate::{Config, Interpreter, InterpreterError, OutputPolicy, PauseReason, Status};

/// How the amplifiers are connected
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Wiring {
    /// Each amplifier runs once, in order
    #[default]
    Chain,
    /// The amplifiers run round-robin on one thread until all have halted
    FeedbackLoop,
    /// The amplifiers each run on their own thread, connected by channels, until all have halted
    ThreadedFeedbackLoop,
}

/// An error running a network of amplifiers
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    /// An amplifier's interpreter failed
    #[error("amplifier {index} failed: {source}")]
    Interpreter {
        /// position of the amplifier
        index: usize,
        /// the underlying interpreter error
        #[source]
        source: InterpreterError,
    },
    /// An amplifier halted without outputting a signal
    #[error("amplifier {0} halted without producing a signal")]
    NoSignal(usize),
    /// An amplifier is waiting for input that will never arrive
    #[error("amplifier {0} is waiting for input that will never arrive")]
    Starved(usize),
    /// An amplifier's thread panicked
    #[error("amplifier {0}'s thread panicked")]
    Panicked(usize),
    /// There were no amplifiers
    #[error("no phase settings were given")]
    NoPhases,
}

fn amplifier(program: &[i64], phase: i64, config: Config) -> Interpreter {
    let mut amp = Interpreter::with_config(program.iter().copied(), config);
    amp.provide_input([phase]);
    amp
}

/// Run the amplifiers once each, in order, returning the last one's output
pub fn run_chain(program: &[i64], phases: &[i64], signal: i64) -> Result<i64, NetworkError> {
    if phases.is_empty() {
        return Err(NetworkError::NoPhases);
    }
    phases
        .iter()
        .enumerate()
        .try_fold(signal, |signal, (index, &phase)| {
            let mut amp = amplifier(program, phase, Config::default());
            let status = amp
                .run([signal])
                .map_err(|source| NetworkError::Interpreter { index, source })?;
            match (amp.last_output(), status) {
                (Some(out), _) => Ok(out),
                (None, Status::Paused) => Err(NetworkError::Starved(index)),
                (None, _) => Err(NetworkError::NoSignal(index)),
            }
        })
}

/// Run the amplifiers round-robin on the current thread, each pausing after every output, until
/// they have all halted. Returns the last output of the last amplifier.
pub fn run_feedback_loop(program: &[i64], phases: &[i64], signal: i64) -> Result<i64, NetworkError> {
    if phases.is_empty() {
        return Err(NetworkError::NoPhases);
    }
    let config = Config::new()
        .pause_on_output(true)
        .output_policy(OutputPolicy::Overwrite);
    let mut amps = phases
        .iter()
        .map(|&phase| amplifier(program, phase, config))
        .collect_vec();
    let last = amps.len() - 1;

    let mut pending = Some(signal);
    let mut thrust = None;
    while amps.iter().any(|amp| amp.status() != Status::Finished) {
        let mut produced = false;
        for (index, amp) in amps.iter_mut().enumerate() {
            if amp.status() == Status::Finished {
                // a halted amplifier swallows its signal
                pending = None;
                continue;
            }
            amp.run(pending.take())
                .map_err(|source| NetworkError::Interpreter { index, source })?;
            pending = amp.take_outputs().pop();
            if let Some(out) = pending {
                produced = true;
                if index == last {
                    thrust = Some(out);
                }
            }
        }
        if !produced {
            if let Some(index) = amps.iter().position(|amp| amp.status() == Status::Paused) {
                return Err(NetworkError::Starved(index));
            }
        }
    }
    thrust.ok_or(NetworkError::NoSignal(last))
}

/// Drive one amplifier on its own thread until it halts, returning its last output
fn drive(
    index: usize,
    mut amp: Interpreter,
    rx: &Receiver<i64>,
    tx: &Sender<i64>,
) -> Result<Option<i64>, NetworkError> {
    let mut last = None;
    let mut next_input = None;
    loop {
        let status = amp
            .run(next_input.take())
            .map_err(|source| NetworkError::Interpreter { index, source })?;
        for out in amp.take_outputs() {
            last = Some(out);
            // the next amplifier may already have halted, in which case the signal is unneeded
            let _ = tx.send(out);
        }
        match (status, amp.pause_reason()) {
            (Status::Finished, _) => break Ok(last),
            (Status::Paused, Some(PauseReason::AwaitingInput)) => {
                next_input = Some(rx.recv().map_err(|_| NetworkError::Starved(index))?);
            }
            _ => (),
        }
    }
}

/// Run each amplifier on its own thread, connected in a loop by channels. Gives the same result as
/// [run_feedback_loop].
///
/// An amplifier waiting for input is only reported as [starved](NetworkError::Starved) once the
/// amplifier before it has halted. If every amplifier in the loop is waiting at once, this never
/// returns.
pub fn run_feedback_loop_threaded(
    program: &[i64],
    phases: &[i64],
    signal: i64,
) -> Result<i64, NetworkError> {
    if phases.is_empty() {
        return Err(NetworkError::NoPhases);
    }
    let count = phases.len();
    let (senders, receivers): (Vec<Sender<i64>>, Vec<Receiver<i64>>) =
        (0..count).map(|_| mpsc::channel()).unzip();
    // the receivers are all alive here, so sending can't fail
    for (tx, &phase) in senders.iter().zip(phases) {
        let _ = tx.send(phase);
    }
    let _ = senders[0].send(signal);

    let config = Config::new().pause_on_output(true);
    let results = thread::scope(|scope| {
        let handles = receivers
            .into_iter()
            .enumerate()
            .map(|(index, rx)| {
                let tx = senders[(index + 1) % count].clone();
                let amp = Interpreter::with_config(program.iter().copied(), config);
                log::debug!("spawning amplifier {index}");
                scope.spawn(move || drive(index, amp, &rx, &tx))
            })
            .collect_vec();
        // only the amplifiers may keep the channels open
        drop(senders);
        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| handle.join().map_err(|_| NetworkError::Panicked(index))?)
            .collect::<Result<Vec<_>, _>>()
    })?;
    results
        .last()
        .copied()
        .flatten()
        .ok_or(NetworkError::NoSignal(count - 1))
}

/// Run the amplifiers with the given `wiring` and phase settings, starting from `signal`
pub fn run(
    program: &[i64],
    phases: &[i64],
    signal: i64,
    wiring: Wiring,
) -> Result<i64, NetworkError> {
    match wiring {
        Wiring::Chain => run_chain(program, phases, signal),
        Wiring::FeedbackLoop => run_feedback_loop(program, phases, signal),
        Wiring::ThreadedFeedbackLoop => run_feedback_loop_threaded(program, phases, signal),
    }
}

/// Try every ordering of `phases`, and return the highest signal with the order that produced it.
/// The starting signal is always `0`.
pub fn max_signal(
    program: &[i64],
    phases: impl IntoIterator<Item = i64>,
    wiring: Wiring,
) -> Result<(i64, Vec<i64>), NetworkError> {
    let phases = phases.into_iter().collect_vec();
    if phases.is_empty() {
        return Err(NetworkError::NoPhases);
    }
    let count = phases.len();
    let best = itertools::process_results(
        phases.into_iter().permutations(count).map(|order| {
            run(program, &order, 0, wiring).map(|signal| (signal, order))
        }),
        |results| results.max_by_key(|(signal, _)| *signal),
    )?;
    best.ok_or(NetworkError::NoPhases)
}
