/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::Square;

/// Maximum possible number of moves in a given chess position.
///
/// Found [here](<https://www.chessprogramming.org/Chess_Position#cite_note-4>)
pub const MAX_NUM_MOVES: usize = 218;

/// An ordered list of legal moves, as produced by
/// [`Position::legal_moves`](crate::Position::legal_moves).
pub type MoveList = Vec<Move>;

/// Represents a move made on a chess board: a pair of origin and destination
/// [`Square`]s.
///
/// There is no flag for captures, castling, promotion, or en passant; a move
/// is wholly described by where a piece stands and where it lands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from the given [`Square`]s.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Move, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Fetches the source (or "from") part of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination (or "to") part of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }
}

impl fmt::Display for Move {
    /// Formats this [`Move`] as origin label followed by destination label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    /// Parses a [`Move`] from a pair of square labels like `e2e4`.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Move, Square};
    /// let mv = "e2e4".parse::<Move>().unwrap();
    /// assert_eq!(mv.from(), Square::E2);
    /// assert_eq!(mv.to(), Square::E4);
    /// assert!("e2".parse::<Move>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            bail!("Invalid Move: Expected a pair of square labels like 'e2e4'. Got {s:?}");
        }
        let (from, to) = s.split_at(2);
        Ok(Self::new(from.parse()?, to.parse()?))
    }
}
