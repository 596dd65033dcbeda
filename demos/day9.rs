// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 9 built using the `intcode` library.

use intcode::loader::{Format, read_program};
use intcode::prelude::*;

fn boost(i: &mut Interpreter, mode: i64) -> i64 {
    i.reset();
    let (output, status) = i.run_through_inputs([mode]).unwrap();
    assert_eq!(status, Status::Finished, "intcode did not halt");
    assert_eq!(output.len(), 1, "malfunctioning opcodes: {output:?}");
    output[0]
}

fn main() {
    use std::env::args_os;
    let code = read_program(args_os().nth(1).expect("missing file name"), Format::Ascii)
        .expect("failed to load program");
    let mut interpreter = Interpreter::new(code);
    println!("part 1: {}", boost(&mut interpreter, 1));
    println!("part 2: {}", boost(&mut interpreter, 2));
}
