/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, BufRead},
    str::FromStr,
};

use anyhow::Result;

use crate::{EngineCommand, Position};

/// The interactive shell around a [`Position`].
///
/// The engine holds the one "real" game position and mutates it exclusively
/// through validated moves; everything else it does is read-only queries
/// printed to stdout.
#[derive(Debug, Default)]
pub struct Engine {
    /// The current state of the chess board, as known to the engine.
    position: Position,
}

impl Engine {
    /// Constructs a new [`Engine`] at the starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute the main command loop, reading commands from stdin until
    /// `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match EngineCommand::from_str(line) {
                Ok(command) => {
                    if !self.execute(command) {
                        break;
                    }
                }
                // Keep running, even on malformed input
                Err(e) => eprintln!("{e}"),
            }
        }

        Ok(())
    }

    /// Handles a single [`EngineCommand`], returning `false` if the engine
    /// should stop afterwards.
    pub fn execute(&mut self, command: EngineCommand) -> bool {
        match command {
            EngineCommand::Display => println!("{}", self.position),

            EngineCommand::Exit => return false,

            EngineCommand::Fen => println!("{}", self.position.to_fen()),

            EngineCommand::MakeMove { mv } => {
                // The board primitive itself never validates, so screen here.
                if self.position.can_move(mv) {
                    self.position.make_move(mv);
                } else {
                    println!("{mv} is not legal in this position");
                }
            }

            EngineCommand::Moves { square } => {
                let moves = self
                    .position
                    .legal_moves()
                    .iter()
                    .filter(|mv| square.map_or(true, |sq| mv.from() == sq))
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>();

                if moves.is_empty() {
                    println!("(none)");
                } else {
                    println!("{}", moves.join(", "));
                }
            }

            EngineCommand::Position { fen } => {
                if fen.is_empty() {
                    self.position = Position::default();
                } else {
                    match Position::from_fen(&fen.join(" ")) {
                        Ok(position) => self.position = position,
                        // Keep the previous position on a decode failure
                        Err(e) => eprintln!("{e}"),
                    }
                }
            }

            EngineCommand::Status => {
                let side = self.position.side_to_move();
                let in_check = self.position.is_in_check(side);
                let out_of_moves = self.position.is_in_mate();
                println!("{side} to move; in check: {in_check}; out of moves: {out_of_moves}");
            }
        }

        true
    }
}
