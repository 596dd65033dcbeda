//! Test pausing and resuming execution, and reusing interpreters between runs.
// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use intcode::prelude::*;
use itertools::Itertools;

/// reads two inputs, and outputs their sum
const ADDER: [i64; 14] = [3, 11, 3, 12, 1, 11, 12, 13, 4, 13, 99, -1, -1, 0];

/// outputs 1, 2, then 3
const COUNTER: [i64; 7] = [104, 1, 104, 2, 104, 3, 99];

/// day 5: outputs 1 if the input is equal to 8, or 0 otherwise
const EQUALS_8: [i64; 11] = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];

#[test]
fn inputs_given_all_at_once() {
    let mut interp = Interpreter::new(ADDER);
    assert_eq!(interp.run([3, 5]), Ok(Status::Finished));
    assert_eq!(interp.last_output(), Some(8));
    assert_eq!(interp.pause_reason(), None);
}

#[test]
fn drip_fed_inputs_match_batch() {
    let mut interp = Interpreter::new(ADDER);
    assert_eq!(interp.run([3]), Ok(Status::Paused));
    assert_eq!(interp.pause_reason(), Some(PauseReason::AwaitingInput));
    // the IN that paused hasn't run yet
    assert_eq!(interp.instr_ptr(), 2);
    assert_eq!(interp.run([5]), Ok(Status::Finished));
    assert_eq!(interp.take_outputs(), vec![8]);
}

#[test]
fn pause_on_input_allows_one_read_per_run() {
    let config = Config::new().pause_on_input(true);
    let mut interp = Interpreter::with_config(ADDER, config);
    assert_eq!(interp.run([3, 5]), Ok(Status::Paused));
    assert_eq!(interp.pause_reason(), Some(PauseReason::AwaitingInput));
    assert_eq!(interp.instr_ptr(), 2);
    assert_eq!(interp.pending_inputs(), 1);
    // the queued input is used on the next run
    assert_eq!(interp.run(empty()), Ok(Status::Finished));
    assert_eq!(interp.last_output(), Some(8));
}

#[test]
fn pause_on_output_overwrite() {
    let config = Config::new()
        .pause_on_output(true)
        .output_policy(OutputPolicy::Overwrite);
    let mut interp = Interpreter::with_config(COUNTER, config);
    for expected in 1..=3 {
        assert_eq!(interp.run(empty()), Ok(Status::Paused));
        assert_eq!(interp.pause_reason(), Some(PauseReason::Output));
        assert_eq!(interp.outputs(), [expected]);
    }
    assert_eq!(interp.run(empty()), Ok(Status::Finished));
    assert_eq!(interp.outputs(), [3]);
    assert_eq!(interp.last_output(), Some(3));
}

#[test]
fn pause_on_output_accumulate() {
    let config = Config::new().pause_on_output(true);
    let mut interp = Interpreter::with_config(COUNTER, config);
    let statuses = (0..4).map(|_| interp.run(empty()).unwrap()).collect_vec();
    assert_eq!(
        statuses,
        [Status::Paused, Status::Paused, Status::Paused, Status::Finished]
    );
    assert_eq!(interp.take_outputs(), vec![1, 2, 3]);
    assert!(interp.outputs().is_empty());
    assert_eq!(interp.last_output(), Some(3));
}

#[test]
fn overwrite_without_pausing_keeps_final_output() {
    let config = Config::new().output_policy(OutputPolicy::Overwrite);
    let mut interp = Interpreter::with_config(COUNTER, config);
    assert_eq!(interp.run_through_inputs(empty()), Ok((vec![3], Status::Finished)));
}

#[test]
fn finished_interpreter_restarts() {
    let mut interp = Interpreter::new(EQUALS_8);
    for (input, expected) in [(8, 1), (7, 0), (8, 1)] {
        assert_eq!(
            interp.run_through_inputs([input]),
            Ok((vec![expected], Status::Finished))
        );
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut interp = Interpreter::default();
    interp.load(EQUALS_8);
    interp.run([8]).unwrap();
    let first = (interp.memory_snapshot(), interp.last_output());
    interp.load(EQUALS_8);
    interp.run([8]).unwrap();
    assert_eq!((interp.memory_snapshot(), interp.last_output()), first);
    // the program itself is unchanged by running it
    interp.reset();
    assert_eq!(interp.memory_snapshot(), EQUALS_8);
}

#[test]
fn reset_discards_queued_input_and_output() {
    let mut interp = Interpreter::new(ADDER);
    interp.provide_input([1, 2, 3]);
    interp.run(empty()).unwrap();
    assert_eq!(interp.pending_inputs(), 1);
    interp.reset();
    assert_eq!(interp.status(), Status::Ready);
    assert_eq!(interp.pending_inputs(), 0);
    assert!(interp.outputs().is_empty());
    assert_eq!(interp.last_output(), None);
}

#[test]
fn day7_style_inputs() {
    // day 7: reads a phase setting, then an input signal
    let program = [
        3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0,
    ];
    let mut interp = Interpreter::new(program);
    assert_eq!(interp.run([4]), Ok(Status::Paused));
    assert_eq!(interp.run([0]), Ok(Status::Finished));
    assert_eq!(interp.last_output(), Some(4));
    assert_eq!(interp.run([3, 4]), Ok(Status::Finished));
    assert_eq!(interp.last_output(), Some(43));
}

#[test]
fn prompt_used_when_queue_empty() {
    let mut answers = vec![5, 3].into_iter();
    let mut interp = Interpreter::new(ADDER);
    interp.set_prompt(Prompt::new(move || answers.next()));
    // queued input comes first
    assert_eq!(interp.run([10]), Ok(Status::Finished));
    assert_eq!(interp.last_output(), Some(15));
    // the prompt is kept when restarting, and is asked again when it runs dry
    assert_eq!(interp.run(empty()), Ok(Status::Paused));
    assert_eq!(interp.pause_reason(), Some(PauseReason::AwaitingInput));
    assert!(interp.clear_prompt().is_some());
    assert_eq!(interp.run([1]), Ok(Status::Finished));
    assert_eq!(interp.last_output(), Some(4));
}

#[test]
fn errors_poison_until_reset() {
    let mut interp = Interpreter::new([3, 0, 42]);
    assert_eq!(
        interp.run([1]),
        Err(InterpreterError::InvalidOpcode {
            opcode: 42,
            word: 42,
            ip: 2
        })
    );
    assert_eq!(interp.run([1]), Err(InterpreterError::Poisoned));
    interp.reset();
    assert!(!interp.is_poisoned());
    interp.mem_override(2, 99);
    assert_eq!(interp.run([1]), Ok(Status::Finished));
    assert_eq!(interp.memory(), [1, 0, 99]);
}

#[test]
fn verbosity_does_not_change_results() {
    let _ = env_logger::builder().is_test(true).try_init();
    let quiet = Interpreter::new(ADDER);
    let loud = Interpreter::with_config(ADDER, Config::new().verbosity(Verbosity::Extreme));
    let results = [quiet, loud].map(|mut interp| {
        interp.run([3]).unwrap();
        interp.run_through_inputs([5]).unwrap()
    });
    assert_eq!(results[0], results[1]);
    assert_eq!(results[0], (vec![8], Status::Finished));
}
