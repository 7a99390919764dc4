/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{
    movegen::{self, TargetList},
    Cache, Color, Move, MoveList, Piece, Square, FEN_STARTPOS, MAX_NUM_MOVES,
};

/// The board proper: one optional [`Piece`] per square, indexed in FEN
/// reading order.
pub(crate) type Squares = [Option<Piece>; Square::COUNT];

/// Represents the current state of the game: piece placement, side to move,
/// move counters, and the caches derived from them.
///
/// A `Position` is only ever mutated through [`Position::make_move`]; every
/// other operation either reads it or produces an independent copy.
///
/// Castling rights are carried (and round-tripped through FEN) but never
/// consumed: castling itself is not generated. The en passant field is
/// likewise inert.
#[derive(Clone, Debug)]
pub struct Position {
    /// The board, owned exclusively by this position.
    squares: Squares,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// The castling field of the originating FEN string, stored verbatim.
    castling_rights: String,

    /// Parsed from FEN for fidelity; never consulted by move generation.
    ep_square: Option<Square>,

    /// Halfmove clock, carried through FEN only.
    halfmove: usize,

    /// Number of full moves. Incremented after each of Black's moves.
    fullmove: usize,

    /// Squares of non-pawn pieces currently standing on a pseudo-legal
    /// target of an enemy piece. Recomputed eagerly after every mutation.
    attacked: Vec<Square>,

    /// All legal moves for the side to move, rebuilt lazily on demand.
    legal_moves: Cache<MoveList>,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant square available
    /// * Halfmove counter set to 0
    /// * Fullmove counter set to 1
    ///
    /// # Example
    /// ```
    /// # use skewer::Position;
    /// let pos = Position::new();
    /// assert_eq!(pos.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            squares: std::array::from_fn(|_| None),
            side_to_move: Color::White,
            castling_rights: String::from("-"),
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
            attacked: Vec::new(),
            legal_moves: Cache::Stale,
        }
    }

    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// The placement field must split into exactly 8 ranks. On any decode
    /// failure an error is returned and no partially-filled position can be
    /// observed; validation happens on a fresh instance before anything is
    /// handed back.
    ///
    /// Absent trailing fields fall back to the defaults of
    /// [`Position::new`].
    ///
    /// # Example
    /// ```
    /// # use skewer::{Position, FEN_STARTPOS};
    /// let pos = Position::from_fen(FEN_STARTPOS).unwrap();
    /// assert_eq!(pos.to_fen(), FEN_STARTPOS);
    ///
    /// assert!(Position::from_fen("8/8/8/8 w - - 0 1").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut pos = Self::new();
        let mut split = fen.trim().split(' ');

        // 1. Piece placement
        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;
        let ranks = placements.split('/').collect::<Vec<_>>();
        if ranks.len() != 8 {
            bail!(
                "FEN placement field must have exactly 8 ranks. Got {}",
                ranks.len()
            );
        }

        for (rank, placement) in ranks.into_iter().enumerate() {
            let mut file = 0usize;
            for c in placement.chars() {
                // A digit advances the file cursor by that many empty squares
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }

                if file >= 8 {
                    bail!("Rank {} of FEN placement overflows the board: {placement:?}", 8 - rank);
                }

                pos.squares[rank * 8 + file] = Some(Piece::from_uci(c)?);
                file += 1;
            }
        }

        // 2. Active color ("w" means White; anything else means Black)
        pos.side_to_move = if split.next().unwrap_or("w") == "w" {
            Color::White
        } else {
            Color::Black
        };

        // 3. Castling, stored verbatim
        pos.castling_rights = split.next().unwrap_or("-").to_string();

        // 4. En passant, carried for round-tripping only
        pos.ep_square = split.next().and_then(|ep| ep.parse().ok());

        // 5. Halfmove clock
        if let Some(halfmove) = split.next() {
            pos.halfmove = halfmove.parse().or(Err(anyhow!(
                "FEN string must have valid halfmove counter. Got {halfmove:?}"
            )))?;
        }

        // 6. Fullmove number
        if let Some(fullmove) = split.next() {
            pos.fullmove = fullmove.parse().or(Err(anyhow!(
                "FEN string must have valid fullmove counter. Got {fullmove:?}"
            )))?;
        }

        pos.compute_attacked_pieces();

        Ok(pos)
    }

    /// Converts this [`Position`] to its FEN representation.
    ///
    /// The en passant field is always emitted as `-`, since it is never
    /// produced by this engine's moves.
    pub fn to_fen(&self) -> String {
        let mut placements = String::new();

        for rank in 0..8 {
            let mut empty = 0;
            for file in 0..8 {
                match &self.squares[rank * 8 + file] {
                    Some(piece) => {
                        if empty > 0 {
                            placements.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placements.push(piece.to_uci());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placements.push_str(&empty.to_string());
            }
            if rank < 7 {
                placements.push('/');
            }
        }

        format!(
            "{placements} {} {} - {} {}",
            self.side_to_move.to_uci(),
            self.castling_rights,
            self.halfmove,
            self.fullmove
        )
    }

    /// Fetches the piece standing on `square`, if any.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index()].as_ref()
    }

    /// Returns an iterator over all pieces on the board, with the square each
    /// one stands on, in ascending square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| Some((Square::from_index_unchecked(i), slot.as_ref()?)))
    }

    /// The [`Color`] of the player whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The castling field of the originating FEN string, verbatim.
    #[inline(always)]
    pub fn castling_rights(&self) -> &str {
        &self.castling_rights
    }

    /// The en passant target square parsed from FEN, if one was present.
    ///
    /// This is inert state: move generation and legality never consult it.
    #[inline(always)]
    pub const fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// The halfmove clock carried from FEN.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    /// The fullmove number. Starts at 1 and increments after each of Black's
    /// moves.
    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// The squares of every non-pawn piece currently standing on a
    /// pseudo-legal target of an enemy piece.
    ///
    /// Pawn victims are deliberately absent from this accounting; a King can
    /// never be, so check detection is unaffected. A square may appear once
    /// per attacker. Exposed so harnesses can observe the attack map without
    /// reaching into internals.
    #[inline(always)]
    pub fn attacked_squares(&self) -> &[Square] {
        &self.attacked
    }

    /// Returns `true` if a King of the given [`Color`] is currently attacked.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Color, Position};
    /// // A rook checking the king along the back rank
    /// let pos = Position::from_fen("R3k3/8/4K3/8/8/8/8/8 b - - 0 1").unwrap();
    /// assert!(pos.is_in_check(Color::Black));
    /// assert!(!pos.is_in_check(Color::White));
    /// ```
    pub fn is_in_check(&self, color: Color) -> bool {
        self.attacked.iter().any(|square| {
            self.squares[square.index()]
                .as_ref()
                .is_some_and(|piece| piece.is_king() && piece.color() == color)
        })
    }

    /// Returns `true` if the side to move has no legal move at all.
    ///
    /// This deliberately does not distinguish checkmate from stalemate;
    /// callers needing to tell them apart pair this with
    /// [`Position::is_in_check`].
    #[inline(always)]
    pub fn is_in_mate(&mut self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Returns `true` if `mv` is legal in this position: a piece of the side
    /// to move stands on its origin, its destination is among that piece's
    /// pseudo-legal targets, and making the move does not leave the mover's
    /// own King attacked.
    ///
    /// # Example
    /// ```
    /// # use skewer::Position;
    /// let mut pos = Position::default();
    /// assert!(pos.can_move("e2e4".parse().unwrap()));
    /// assert!(!pos.can_move("e1e2".parse().unwrap()));
    /// assert!(!pos.can_move("e7e5".parse().unwrap())); // not Black's turn
    /// ```
    pub fn can_move(&mut self, mv: Move) -> bool {
        let mover = match self.piece_at(mv.from()) {
            Some(piece) if piece.color() == self.side_to_move => piece.color(),
            _ => return false,
        };

        if !self.pseudo_legal_targets(mv.from()).contains(&mv.to()) {
            return false;
        }

        // King safety is probed on an independent copy with the move applied.
        !self.with_move_made(mv).is_in_check(mover)
    }

    /// Applies `mv` to this position: any piece on the destination is
    /// removed, the moving piece is relocated, the fullmove counter advances
    /// if Black moved, the side to move flips, all caches are invalidated,
    /// and the attack map is recomputed.
    ///
    /// No legality check happens here. Callers are expected to have screened
    /// the move through [`Position::can_move`] or
    /// [`Position::legal_moves`]; moving from an empty square clears the
    /// destination.
    ///
    /// # Example
    /// ```
    /// # use skewer::{Color, Position};
    /// let mut pos = Position::default();
    /// pos.make_move("e2e4".parse().unwrap());
    /// assert_eq!(pos.side_to_move(), Color::Black);
    /// assert_eq!(pos.fullmove(), 1);
    ///
    /// pos.make_move("e7e5".parse().unwrap());
    /// assert_eq!(pos.side_to_move(), Color::White);
    /// assert_eq!(pos.fullmove(), 2);
    /// ```
    pub fn make_move(&mut self, mv: Move) {
        self.squares[mv.to().index()] = self.squares[mv.from().index()].take();

        if self.side_to_move == Color::Black {
            self.fullmove += 1;
        }
        self.side_to_move = self.side_to_move.opponent();

        // Occupancy changed: no cached target list can be trusted anymore.
        for slot in &mut self.squares {
            if let Some(piece) = slot {
                piece.targets.invalidate();
            }
        }
        self.legal_moves.invalidate();

        self.compute_attacked_pieces();
    }

    /// Copies `self` and returns an independent [`Position`] after having
    /// applied the provided [`Move`] to the copy.
    ///
    /// The pieces of the copy share no state with the source's (their caches
    /// start out stale), so probing a hypothetical move can never disturb the
    /// real game position.
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = Self::new();
        for (i, slot) in self.squares.iter().enumerate() {
            copied.squares[i] = slot.as_ref().map(Piece::detached);
        }
        copied.side_to_move = self.side_to_move;
        copied.castling_rights = self.castling_rights.clone();
        copied.ep_square = self.ep_square;
        copied.halfmove = self.halfmove;
        copied.fullmove = self.fullmove;

        copied.compute_attacked_pieces();
        copied.make_move(mv);
        copied
    }

    /// Fetches every legal move available to the side to move, ordered by
    /// ascending origin square and then ascending target square.
    ///
    /// The list is cached until the next [`Position::make_move`].
    ///
    /// # Example
    /// ```
    /// # use skewer::Position;
    /// let mut pos = Position::default();
    /// assert_eq!(pos.legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&mut self) -> &[Move] {
        if self.legal_moves.get().is_none() {
            let moves = self.compute_legal_moves();
            self.legal_moves = Cache::Fresh(moves);
        }

        self.legal_moves.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fetches the pseudo-legal target list of the piece on `square`,
    /// computing and caching it if the piece's cache is stale.
    pub(crate) fn pseudo_legal_targets(&mut self, square: Square) -> TargetList {
        match &self.squares[square.index()] {
            Some(piece) => {
                if let Some(cached) = piece.targets.get() {
                    return cached.clone();
                }
            }
            None => return TargetList::new(),
        }

        let targets = movegen::pseudo_legal_targets(&self.squares, square);
        if let Some(piece) = &mut self.squares[square.index()] {
            piece.targets = Cache::Fresh(targets.clone());
        }
        targets
    }

    /// Rebuilds the attack map: every piece's pseudo-legal targets are
    /// scanned for enemy occupants, and each non-pawn victim is recorded.
    fn compute_attacked_pieces(&mut self) {
        let mut attacked = Vec::new();

        for square in Square::iter() {
            let Some(color) = self.squares[square.index()].as_ref().map(Piece::color) else {
                continue;
            };

            for target in self.pseudo_legal_targets(square) {
                if let Some(victim) = &self.squares[target.index()] {
                    if victim.color() != color && !victim.is_pawn() {
                        attacked.push(target);
                    }
                }
            }
        }

        self.attacked = attacked;
    }

    /// Enumerates and filters the side to move's candidate moves.
    fn compute_legal_moves(&mut self) -> MoveList {
        let mut moves = MoveList::with_capacity(MAX_NUM_MOVES);

        for square in Square::iter() {
            let Some(color) = self.squares[square.index()].as_ref().map(Piece::color) else {
                continue;
            };
            if color != self.side_to_move {
                continue;
            }

            for target in self.pseudo_legal_targets(square) {
                let mv = Move::new(square, target);
                if self.can_move(mv) {
                    moves.push(mv);
                }
            }
        }

        // The queen's step pass re-emits its adjacent squares, so collapse
        // duplicates while establishing the (from, to) ordering.
        moves.sort_unstable();
        moves.dedup();
        moves
    }
}

impl Default for Position {
    /// A default [`Position`] is the standard starting position.
    fn default() -> Self {
        // The starting position constant is statically known to be well-formed.
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl PartialEq for Position {
    /// Two positions are equal if they agree on placement, side to move,
    /// castling rights, en passant square, and both counters. Derived caches
    /// do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.ep_square == other.ep_square
            && self.halfmove == other.halfmove
            && self.fullmove == other.fullmove
    }
}

impl Eq for Position {}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Parses a [`Position`] from a FEN string.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Renders the board as an 8x8 grid with rank and file legends, White at
    /// the bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8 {
            write!(f, "{}", 8 - rank)?;
            for file in 0..8 {
                match &self.squares[rank * 8 + file] {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for file in 0..8u8 {
            write!(f, " {}", (b'a' + file) as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fen_rejects_wrong_rank_count() {
        assert!(Position::from_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_ok());
    }

    #[test]
    fn test_from_fen_rejects_unknown_piece_characters() {
        assert!(Position::from_fen("7x/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_from_fen_rejects_overfull_rank() {
        assert!(Position::from_fen("8p/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_from_fen_defaults_for_absent_fields() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/8 b").unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.castling_rights(), "-");
        assert_eq!(pos.halfmove(), 0);
        assert_eq!(pos.fullmove(), 1);
    }

    #[test]
    fn test_castling_field_is_stored_verbatim() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/8 w Kq - 3 7").unwrap();
        assert_eq!(pos.castling_rights(), "Kq");
        assert_eq!(pos.to_fen(), "8/8/8/8/8/8/8/8 w Kq - 3 7");
    }

    #[test]
    fn test_en_passant_field_is_parsed_but_inert() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.en_passant_square(), Some(Square::E3));
        // Encoding always emits '-' for the unsupported field.
        assert!(pos.to_fen().contains(" - "));
    }

    #[test]
    fn test_startpos_fen_round_trip() {
        let pos = Position::from_fen(FEN_STARTPOS).unwrap();
        assert_eq!(pos.to_fen(), FEN_STARTPOS);
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn test_make_move_alternates_side_and_counts_fullmoves() {
        let mut pos = Position::default();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.fullmove(), 1);

        pos.make_move(Move::new(Square::E2, Square::E4));
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.fullmove(), 1);

        pos.make_move(Move::new(Square::E7, Square::E5));
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.fullmove(), 2);
    }

    #[test]
    fn test_make_move_captures_by_overwrite() {
        let mut pos = Position::from_fen("8/8/8/3p4/8/8/8/3R4 w - - 0 1").unwrap();
        pos.make_move(Move::new(Square::D1, Square::D5));

        let piece = pos.piece_at(Square::D5).unwrap();
        assert_eq!(piece.to_uci(), 'R');
        assert!(pos.piece_at(Square::D1).is_none());
        assert_eq!(pos.pieces().count(), 1);
    }

    #[test]
    fn test_with_move_made_leaves_source_untouched() {
        let mut pos = Position::default();
        let before = pos.to_fen();

        let probed = pos.with_move_made(Move::new(Square::E2, Square::E4));
        assert_eq!(pos.to_fen(), before);
        assert_ne!(probed.to_fen(), before);
        assert_eq!(probed.side_to_move(), Color::Black);

        // The source position still produces its full move list afterwards.
        assert_eq!(pos.legal_moves().len(), 20);
    }

    #[test]
    fn test_legal_move_cache_invalidates_on_make_move() {
        let mut pos = Position::default();
        assert_eq!(pos.legal_moves().len(), 20);
        // Served from cache.
        assert_eq!(pos.legal_moves().len(), 20);

        pos.make_move(Move::new(Square::E2, Square::E4));
        // Black now has their own 20 openers.
        let replies = pos.legal_moves().to_vec();
        assert_eq!(replies.len(), 20);
        assert!(replies
            .iter()
            .all(|mv| pos.piece_at(mv.from()).unwrap().color() == Color::Black));
    }

    #[test]
    fn test_attack_map_ignores_pawn_victims() {
        // Two pawns attack each other diagonally; neither registers.
        let pos = Position::from_fen("8/8/8/3p4/4P3/8/8/8 w - - 0 1").unwrap();
        assert!(pos.attacked_squares().is_empty());

        // Replace the Black pawn with a knight and it registers.
        let pos = Position::from_fen("8/8/8/3n4/4P3/8/8/8 w - - 0 1").unwrap();
        assert_eq!(pos.attacked_squares(), &[Square::D5]);
    }

    #[test]
    fn test_legal_moves_are_ordered_and_unique() {
        let mut pos = Position::from_fen("8/8/8/3Q4/8/8/8/K7 w - - 0 1").unwrap();
        let moves = pos.legal_moves().to_vec();

        let mut sorted = moves.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(moves, sorted);
    }
}
