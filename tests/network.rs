//! Test the amplifier examples from Advent of Code 2019 Day 7.
// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use intcode::network::{
    NetworkError, Wiring, max_signal, run_chain, run_feedback_loop, run_feedback_loop_threaded,
};

mod chain {
    use crate::*;

    const EXAMPLES: [(&[i64], [i64; 5], i64); 3] = [
        (
            &[3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0],
            [4, 3, 2, 1, 0],
            43210,
        ),
        (
            &[
                3, 23, 3, 24, 1002, 24, 10, 24, 1002, 23, -1, 23, 101, 5, 23, 23, 1, 24, 23, 23, 4,
                23, 99, 0, 0,
            ],
            [0, 1, 2, 3, 4],
            54321,
        ),
        (
            &[
                3, 31, 3, 32, 1002, 32, 10, 32, 1001, 31, -2, 31, 1007, 31, 0, 33, 1002, 33, 7, 33,
                1, 33, 31, 31, 1, 32, 31, 31, 4, 31, 99, 0, 0, 0,
            ],
            [1, 0, 4, 3, 2],
            65210,
        ),
    ];

    #[test]
    fn given_phases() {
        for (program, phases, signal) in EXAMPLES {
            assert_eq!(run_chain(program, &phases, 0), Ok(signal));
        }
    }

    #[test]
    fn best_phases() {
        for (program, phases, signal) in EXAMPLES {
            assert_eq!(
                max_signal(program, 0..5, Wiring::Chain),
                Ok((signal, phases.to_vec()))
            );
        }
    }
}

mod feedback_loop {
    use crate::*;

    const EXAMPLES: [(&[i64], [i64; 5], i64); 2] = [
        (
            &[
                3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28,
                -1, 28, 1005, 28, 6, 99, 0, 0, 5,
            ],
            [9, 8, 7, 6, 5],
            139_629_729,
        ),
        (
            &[
                3, 52, 1001, 52, -5, 52, 3, 53, 1, 52, 56, 54, 1007, 54, 5, 55, 1005, 55, 26, 1001,
                54, -5, 54, 1105, 1, 12, 1, 53, 54, 53, 1008, 54, 0, 55, 1001, 55, 1, 55, 2, 53,
                55, 53, 4, 53, 1001, 56, -1, 56, 1005, 56, 6, 99, 0, 0, 0, 0, 10,
            ],
            [9, 7, 8, 5, 6],
            18216,
        ),
    ];

    #[test]
    fn given_phases() {
        for (program, phases, signal) in EXAMPLES {
            assert_eq!(run_feedback_loop(program, &phases, 0), Ok(signal));
            assert_eq!(run_feedback_loop_threaded(program, &phases, 0), Ok(signal));
        }
    }

    #[test]
    fn best_phases() {
        for (program, phases, signal) in EXAMPLES {
            for wiring in [Wiring::FeedbackLoop, Wiring::ThreadedFeedbackLoop] {
                assert_eq!(
                    max_signal(program, 5..10, wiring),
                    Ok((signal, phases.to_vec()))
                );
            }
        }
    }

    #[test]
    fn starved_amplifier_reported() {
        // echoes the signal once, then halts
        let lazy = [3, 0, 3, 0, 4, 0, 99];
        assert_eq!(run_feedback_loop(&lazy, &[0, 0], 7), Ok(7));
        assert_eq!(run_feedback_loop_threaded(&lazy, &[0, 0], 7), Ok(7));
        // echoes the signal, then wants two more when only one will ever arrive
        let greedy = [3, 0, 3, 0, 4, 0, 3, 0, 3, 0, 99];
        assert_eq!(
            run_feedback_loop(&greedy, &[0, 0], 7),
            Err(NetworkError::Starved(0))
        );
    }

    #[test]
    fn halted_amplifier_swallows_its_signal() {
        // phase 1 echoes one signal then halts. phase 0 echoes each signal, then that signal + 100,
        // forever.
        let program = [
            3, 100, 1005, 100, 20, 3, 101, 4, 101, 1001, 101, 100, 102, 4, 102, 1105, 1, 5, 99, 99,
            3, 101, 4, 101, 99,
        ];
        // once the middle amplifier halts, the last one never hears from it again
        assert_eq!(
            run_feedback_loop(&program, &[0, 1, 0], 7),
            Err(NetworkError::Starved(0))
        );
        assert_eq!(
            run_feedback_loop_threaded(&program, &[0, 1, 0], 7),
            Err(NetworkError::Starved(0))
        );
    }
}
