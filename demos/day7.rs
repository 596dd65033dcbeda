// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 7 built using the `intcode` library.
//!
//! Part 1 runs the amplifiers as a chain, and part 2 as a feedback loop. Pass `--threaded` after
//! the file name to run each amplifier of the feedback loop on its own thread.

use intcode::loader::{Format, read_program};
use intcode::network::{Wiring, max_signal};

fn main() {
    use std::env::args_os;
    let mut args = args_os().skip(1);
    let code = read_program(args.next().expect("missing file name"), Format::Ascii)
        .expect("failed to load program");
    let feedback = if args.next().is_some_and(|arg| arg == "--threaded") {
        Wiring::ThreadedFeedbackLoop
    } else {
        Wiring::FeedbackLoop
    };

    let (signal, phases) = max_signal(&code, 0..5, Wiring::Chain).unwrap();
    println!("part 1: {signal} (phases {phases:?})");
    let (signal, phases) = max_signal(&code, 5..10, feedback).unwrap();
    println!("part 2: {signal} (phases {phases:?})");
}
