/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::{movegen::TargetList, Cache};

/// Represents the color of a player, piece, square, etc. within a chess board.
///
/// White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use skewer::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Creates a [`Color`] based on the ASCII case of the provided character,
    /// with uppercase being White and anything else being Black.
    ///
    /// This matches FEN piece placement, where `K` is a White King and `k` a Black one.
    ///
    /// # Example
    /// ```
    /// # use skewer::Color;
    /// assert_eq!(Color::from_case('K'), Color::White);
    /// assert_eq!(Color::from_case('k'), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Converts this [`Color`] to a char, as it appears in the side-to-move
    /// field of a FEN string.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// The rank *index* on which this color's pawns start, in FEN ordering
    /// (rank index 0 is rank 8).
    ///
    /// Pawns on their home rank may advance two squares.
    #[inline(always)]
    pub const fn pawn_home_rank(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The direction this color's pawns advance in, as a square-index delta
    /// multiplier. White pawns move toward lower indices.
    #[inline(always)]
    pub const fn pawn_direction(&self) -> i16 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Creates a new [`PieceKind`] from a FEN piece character, of either case.
    ///
    /// # Example
    /// ```
    /// # use skewer::PieceKind;
    /// assert_eq!(PieceKind::from_char('n').unwrap(), PieceKind::Knight);
    /// assert_eq!(PieceKind::from_char('Q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid piece character: Expected [PNBRQK] (case-insensitive). Got {kind:?}"),
        }
    }

    /// Fetches the one-letter code of this [`PieceKind`], in lowercase.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Represents a chess piece: a [`PieceKind`] and the [`Color`] that owns it.
///
/// A piece is owned exclusively by the square array of the
/// [`Position`](crate::Position) that holds it; its square is the index it is
/// stored at. Each piece carries a cache of its pseudo-legal target squares,
/// invalidated whenever its square or the board occupancy can have changed.
#[derive(Clone, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    /// Pseudo-legal targets, lazily recomputed after invalidation.
    pub(crate) targets: Cache<TargetList>,
}

impl Piece {
    /// Creates a new [`Piece`] with a stale target cache.
    #[inline(always)]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            targets: Cache::Stale,
        }
    }

    /// Creates a new [`Piece`] from a FEN piece character, deriving its
    /// [`Color`] from the character's case.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Color, Piece, PieceKind};
    /// let knight = Piece::from_uci('N').unwrap();
    /// assert_eq!(knight.color(), Color::White);
    /// assert_eq!(knight.kind(), PieceKind::Knight);
    /// ```
    #[inline(always)]
    pub fn from_uci(c: char) -> Result<Self> {
        let kind = PieceKind::from_char(c)?;
        Ok(Self::new(Color::from_case(c), kind))
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this piece is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Fetches the FEN character of this [`Piece`]: uppercase for White,
    /// lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Rook).to_uci(), 'R');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Rook).to_uci(), 'r');
    /// ```
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }

    /// Produces an independent copy of this piece with a stale target cache.
    #[inline(always)]
    pub(crate) fn detached(&self) -> Self {
        Self::new(self.color, self.kind)
    }
}

impl PartialEq for Piece {
    /// Two pieces are equal if they agree on color and kind; cached targets
    /// are derived state and do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color && self.kind == other.kind
    }
}

impl Eq for Piece {}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
