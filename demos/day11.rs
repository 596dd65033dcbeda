// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 11 built using the `intcode` library.

use intcode::loader::{Format, read_program};
use intcode::prelude::*;

use std::collections::HashMap;

use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanelColor {
    Black { repainted: bool },
    White,
}

impl PanelColor {
    fn report(self) -> i64 {
        i64::from(self == Self::White)
    }

    fn paint(&mut self, color: i64) {
        *self = if color == 1 {
            Self::White
        } else {
            assert_eq!(color, 0, "invalid paint color");
            Self::Black { repainted: true }
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct Location {
    x: i32,
    y: i32,
}

impl Direction {
    fn rotate_left(&mut self) {
        *self = match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }
    fn rotate_right(&mut self) {
        *self = match self {
            Self::Up => Self::Left,
            Self::Right => Self::Up,
            Self::Down => Self::Right,
            Self::Left => Self::Down,
        }
    }
    fn turn(&mut self, code: i64) {
        match code {
            0 => self.rotate_right(),
            1 => self.rotate_left(),
            i => panic!("invalid direction code: {i}"),
        }
    }
}

impl std::ops::AddAssign<Direction> for Location {
    fn add_assign(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.y -= 1,
            Direction::Right => self.x += 1,
            Direction::Down => self.y += 1,
            Direction::Left => self.x -= 1,
        }
    }
}

/// Part 1 drip-feeds the robot: each run gets one color, and pauses when the robot needs the
/// next one, having output a color to paint and a direction to turn.
fn part1(mut interpreter: Interpreter) -> usize {
    let mut panels: HashMap<Location, PanelColor> = HashMap::new();
    let mut location = Location::default();
    let mut direction = Direction::Up;

    while let (outputs, Status::Paused) = interpreter
        .run_through_inputs(vec![panels.entry(location).or_default().report()])
        .unwrap()
    {
        debug_assert_eq!(outputs.len(), 2, "output wasn't a pair");
        panels.entry(location).or_default().paint(outputs[0]);
        direction.turn(outputs[1]);
        location += direction;
    }
    panels
        .into_values()
        .filter(|v| *v != PanelColor::default())
        .count()
}

/// Part 2 pauses after every output instead, and acts once a pair has built up.
fn part2(code: &[i64]) {
    let config = Config::new()
        .pause_on_output(true)
        .output_policy(OutputPolicy::Accumulate);
    let mut interpreter = Interpreter::with_config(code.iter().copied(), config);
    let mut panels: HashMap<Location, PanelColor> = HashMap::new();
    let mut location = Location::default();
    let mut direction = Direction::Up;

    panels.insert(Location::default(), PanelColor::White);
    let mut next_input = Some(PanelColor::White.report());
    while interpreter.run(next_input.take()).unwrap() == Status::Paused {
        assert_eq!(
            interpreter.pause_reason(),
            Some(PauseReason::Output),
            "robot wanted a color it was already given"
        );
        if interpreter.outputs().len() < 2 {
            continue;
        }
        let outputs = interpreter.take_outputs();
        panels.entry(location).or_default().paint(outputs[0]);
        direction.turn(outputs[1]);
        location += direction;
        next_input = Some(panels.entry(location).or_default().report());
    }

    let (min_x, max_x) = panels.keys().map(|l| l.x).minmax().into_option().unwrap();
    let (min_y, max_y) = panels.keys().map(|l| l.y).minmax().into_option().unwrap();

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let panel = panels.get(&Location { x, y }).copied().unwrap_or_default();
            print!("{}", if panel == PanelColor::White { '#' } else { ' ' });
        }
        println!();
    }
}

fn main() {
    use std::env::args;
    let code = read_program(args().nth(1).expect("must provide file"), Format::Ascii)
        .expect("Failed to load program!");

    println!("part 1: {}", part1(Interpreter::new(code.iter().copied())));
    println!("part 2:");
    part2(&code);
}

impl Default for PanelColor {
    fn default() -> Self {
        Self::Black { repainted: false }
    }
}
