// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 2 built using the `intcode` library.
//!
//! The noun and verb are patched into memory before each run.

use intcode::loader::{Format, read_program};
use intcode::prelude::*;

fn run_with(base_interp: &Interpreter, noun: i64, verb: i64) -> i64 {
    let mut i = base_interp.clone();
    i[1] = noun;
    i[2] = verb;
    let (output, status) = i.run_through_inputs(empty()).unwrap();
    assert_eq!(status, Status::Finished, "intcode did not run to completion");
    assert!(output.is_empty(), "intcode had unexpected output");
    i[0]
}

fn part1(base_interp: &Interpreter) -> i64 {
    run_with(base_interp, 12, 2)
}

fn part2(base_interp: &Interpreter) -> i64 {
    for noun in 0..=99 {
        for verb in 0..=99 {
            #[allow(clippy::unreadable_literal, reason = "from Advent of Code")]
            if run_with(base_interp, noun, verb) == 19690720 {
                return 100 * noun + verb;
            }
        }
    }
    panic!("no answer found for part 2");
}

fn main() {
    use std::env::args_os;
    let code = read_program(args_os().nth(1).expect("missing file name"), Format::Ascii)
        .expect("failed to load program");
    let interpreter = Interpreter::new(code);
    println!("part 1: {}", part1(&interpreter));
    println!("part 2: {}", part2(&interpreter));
}
