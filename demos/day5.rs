// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 5 built using the `intcode` library.

use intcode::loader::{Format, read_program};
use intcode::prelude::*;

/// Run the diagnostic for the system with ID `system_id`. Every output but the last is a test
/// result, which must be `0`.
fn diagnose(i: &mut Interpreter, system_id: i64) -> i64 {
    let (mut outputs, Status::Finished) = i.run_through_inputs([system_id]).unwrap() else {
        panic!("diagnostic did not run to completion");
    };
    let diagnostic = outputs.pop().expect("no diagnostic code");
    assert!(outputs.into_iter().all(|i| i == 0), "diagnostic failed");
    diagnostic
}

fn main() {
    use std::env::args_os;
    let code = read_program(args_os().nth(1).expect("missing file name"), Format::Ascii)
        .expect("failed to load program");
    let mut interpreter = Interpreter::new(code);
    println!("part 1: {}", diagnose(&mut interpreter, 1));
    // a finished interpreter starts over on the next run
    println!("part 2: {}", diagnose(&mut interpreter, 5));
}
