/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::{Move, Square};

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(multicall = true, about, rename_all = "lower")]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Quit the engine.
    #[command(aliases = ["quit", "q"])]
    Exit,

    /// Generate and print a FEN string for the current position.
    Fen,

    /// Apply the provided move to the game, if it is legal.
    #[command(alias = "m")]
    MakeMove {
        /// The move to make, as a pair of square labels like `e2e4`.
        mv: Move,
    },

    /// Show all legal moves in the current position, or for a specific piece.
    Moves {
        /// Only show moves originating from this square.
        square: Option<Square>,
    },

    /// Set the current position from a FEN string, or to the starting
    /// position if none is given.
    Position {
        /// The FEN fields, space-separated.
        fen: Vec<String>,
    },

    /// Print whose turn it is and whether they are in check or out of moves.
    Status,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}
