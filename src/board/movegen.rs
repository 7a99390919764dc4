/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Pseudo-legal target generation.
//!
//! Everything here works in linear square-index space: a move candidate is
//! the origin index plus an offset, checked against a validity predicate.
//! King safety is not considered at this layer; see
//! [`Position::can_move`](crate::Position::can_move).

use arrayvec::ArrayVec;

use super::{position::Squares, Color, Piece, PieceKind, Square};

/// Index deltas to the 8 board-adjacent squares.
const KING_STEPS: [i16; 8] = [1, 9, 8, 7, -1, -7, -8, -9];

/// Index deltas for a knight's jumps.
const KNIGHT_JUMPS: [i16; 8] = [17, 15, -15, -17, -10, -6, 10, 6];

/// Sliding directions along ranks and files.
const ROOK_SLIDES: [i16; 4] = [8, -8, 1, -1];

/// Sliding directions along diagonals.
const BISHOP_SLIDES: [i16; 4] = [9, 7, -7, -9];

/// Sliding directions for a queen: rank/file rays first, then diagonals.
const QUEEN_SLIDES: [i16; 8] = [8, -8, 1, -1, 9, 7, -7, -9];

/// Upper bound on the number of targets a single piece can generate.
///
/// A queen sees at most 27 squares along its rays, and the step pass emits
/// its 8 adjacent squares a second time.
pub(crate) const MAX_TARGETS: usize = 35;

/// A single piece's pseudo-legal target squares, in generation order.
pub(crate) type TargetList = ArrayVec<Square, MAX_TARGETS>;

/// Computes the full pseudo-legal target list for the piece standing on
/// `origin`, or an empty list if the square is empty.
///
/// The result ignores whether moving there would leave the mover's own King
/// attacked.
pub(crate) fn pseudo_legal_targets(squares: &Squares, origin: Square) -> TargetList {
    let mut targets = TargetList::new();
    let Some(piece) = &squares[origin.index()] else {
        return targets;
    };

    match piece.kind() {
        PieceKind::Pawn => push_pawn_targets(squares, piece, origin, &mut targets),
        PieceKind::Knight => push_step_targets(squares, piece, origin, &KNIGHT_JUMPS, &mut targets),
        PieceKind::King => push_step_targets(squares, piece, origin, &KING_STEPS, &mut targets),
        PieceKind::Rook => push_slide_targets(squares, piece, origin, &ROOK_SLIDES, &mut targets),
        PieceKind::Bishop => {
            push_slide_targets(squares, piece, origin, &BISHOP_SLIDES, &mut targets)
        }
        PieceKind::Queen => {
            // The queen's adjacent squares are emitted by both passes.
            push_step_targets(squares, piece, origin, &KING_STEPS, &mut targets);
            push_slide_targets(squares, piece, origin, &QUEEN_SLIDES, &mut targets);
        }
    }

    targets
}

/// Whether `target` is a square the given piece may be offered as a
/// pseudo-legal destination.
///
/// `guard_file` is the file the candidate is measured against for the
/// wraparound check: the origin's file for step moves, the previous ray
/// square's file for slides. A file distance above 2 is taken as evidence
/// the offset crossed the board edge. This is deliberately coarse, not an
/// exact same-rank test.
fn is_valid_target(
    squares: &Squares,
    piece: &Piece,
    origin_file: u8,
    guard_file: u8,
    target: i16,
) -> bool {
    if !(0..Square::COUNT as i16).contains(&target) {
        return false;
    }

    let target_file = target % 8;
    if (target_file - guard_file as i16).abs() > 2 {
        return false;
    }

    if let Some(occupant) = &squares[target as usize] {
        if occupant.color() == piece.color() {
            return false;
        }
        // Pawns may only ever capture on a strictly diagonal target, never
        // straight ahead.
        if piece.is_pawn() && target_file as u8 == origin_file {
            return false;
        }
    }

    true
}

/// Whether `index` is on the board and holds a piece. Off-board indices
/// count as empty.
#[inline(always)]
fn is_occupied(squares: &Squares, index: i16) -> bool {
    (0..Square::COUNT as i16).contains(&index) && squares[index as usize].is_some()
}

/// Whether `index` holds a piece of the opposing color. Only meaningful for
/// in-range indices.
#[inline(always)]
fn is_enemy(squares: &Squares, index: i16, color: Color) -> bool {
    squares[index as usize]
        .as_ref()
        .is_some_and(|occupant| occupant.color() != color)
}

/// Checks each offset once against the validity predicate.
fn push_step_targets(
    squares: &Squares,
    piece: &Piece,
    origin: Square,
    offsets: &[i16],
    targets: &mut TargetList,
) {
    let index = origin.index() as i16;
    let file = origin.file();

    for offset in offsets {
        let target = index + offset;
        if is_valid_target(squares, piece, file, file, target) {
            targets.push(Square::from_index_unchecked(target as usize));
        }
    }
}

/// Walks each direction until the ray leaves the board, wraps an edge, or
/// hits a piece. A capture square terminates the ray but is included; a
/// square held by an allied piece terminates the ray and is excluded.
fn push_slide_targets(
    squares: &Squares,
    piece: &Piece,
    origin: Square,
    directions: &[i16],
    targets: &mut TargetList,
) {
    let origin_file = origin.file();

    for direction in directions {
        let mut prev = origin.index() as i16;
        let mut target = prev + direction;

        // Each step is measured against the previous ray square's file so a
        // ray cannot wrap around the board edge.
        while is_valid_target(squares, piece, origin_file, (prev % 8) as u8, target) {
            targets.push(Square::from_index_unchecked(target as usize));
            if is_enemy(squares, target, piece.color()) {
                break;
            }
            prev = target;
            target += direction;
        }
    }
}

/// Pawns advance onto empty squares only and capture diagonally only.
fn push_pawn_targets(squares: &Squares, piece: &Piece, origin: Square, targets: &mut TargetList) {
    let index = origin.index() as i16;
    let file = origin.file();
    let direction = piece.color().pawn_direction();

    // Diagonal captures are offered only when an enemy piece stands there.
    for offset in [7 * direction, 9 * direction] {
        let target = index + offset;
        if is_valid_target(squares, piece, file, file, target)
            && is_enemy(squares, target, piece.color())
        {
            targets.push(Square::from_index_unchecked(target as usize));
        }
    }

    // A single advance is offered only onto an empty square; the double
    // advance additionally requires the home rank and no piece to jump over.
    let mut advances = ArrayVec::<i16, 2>::new();
    if !is_occupied(squares, index + 8 * direction) {
        advances.push(8 * direction);

        if origin.rank() == piece.color().pawn_home_rank()
            && !is_occupied(squares, index + 16 * direction)
        {
            advances.push(16 * direction);
        }
    }

    for offset in advances {
        let target = index + offset;
        if is_valid_target(squares, piece, file, file, target) && !is_occupied(squares, target) {
            targets.push(Square::from_index_unchecked(target as usize));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_board() -> Squares {
        std::array::from_fn(|_| None)
    }

    fn place(squares: &mut Squares, square: Square, piece: char) {
        squares[square.index()] = Some(Piece::from_uci(piece).unwrap());
    }

    fn targets(squares: &Squares, origin: Square) -> Vec<Square> {
        pseudo_legal_targets(squares, origin).into_iter().collect()
    }

    #[test]
    fn knight_jumps_do_not_wrap_the_board_edge() {
        let mut squares = empty_board();
        place(&mut squares, Square::B1, 'N');

        let found = targets(&squares, Square::B1);
        assert!(found.contains(&Square::A3));
        assert!(found.contains(&Square::C3));
        assert!(found.contains(&Square::D2));
        // B1 - 10 lands on H3, which the file-distance guard rejects.
        assert!(!found.contains(&Square::H3));
    }

    #[test]
    fn rook_ray_includes_capture_square_and_stops() {
        let mut squares = empty_board();
        place(&mut squares, Square::A4, 'R');
        place(&mut squares, Square::D4, 'p');
        place(&mut squares, Square::H4, 'P');

        let found = targets(&squares, Square::A4);
        assert!(found.contains(&Square::B4));
        assert!(found.contains(&Square::C4));
        assert!(found.contains(&Square::D4), "capture square is included");
        assert!(!found.contains(&Square::E4), "ray stops after the capture");
    }

    #[test]
    fn rook_ray_excludes_allied_square() {
        let mut squares = empty_board();
        place(&mut squares, Square::A1, 'R');
        place(&mut squares, Square::A3, 'N');

        let found = targets(&squares, Square::A1);
        assert!(found.contains(&Square::A2));
        assert!(!found.contains(&Square::A3));
        assert!(!found.contains(&Square::A4));
    }

    #[test]
    fn rook_ray_does_not_wrap_onto_the_next_rank() {
        let mut squares = empty_board();
        place(&mut squares, Square::G2, 'R');

        let found = targets(&squares, Square::G2);
        assert!(found.contains(&Square::H2));
        // Continuing past H2 would land on A1; the guard stops the ray.
        assert!(!found.contains(&Square::A1));
    }

    #[test]
    fn queen_lists_adjacent_squares_twice() {
        let mut squares = empty_board();
        place(&mut squares, Square::D4, 'Q');

        let found = targets(&squares, Square::D4);
        let adjacent = found.iter().filter(|&&sq| sq == Square::D5).count();
        assert_eq!(adjacent, 2, "step pass and slide pass both emit D5");
    }

    #[test]
    fn pawn_cannot_capture_straight_ahead() {
        let mut squares = empty_board();
        place(&mut squares, Square::E4, 'P');
        place(&mut squares, Square::E5, 'p');

        assert!(targets(&squares, Square::E4).is_empty());
    }

    #[test]
    fn pawn_captures_diagonally_only_when_occupied_by_enemy() {
        let mut squares = empty_board();
        place(&mut squares, Square::E4, 'P');
        place(&mut squares, Square::D5, 'p');
        place(&mut squares, Square::F5, 'P');

        let found = targets(&squares, Square::E4);
        assert!(found.contains(&Square::D5));
        assert!(!found.contains(&Square::F5), "own piece is not a capture");
        assert!(found.contains(&Square::E5), "empty square ahead is an advance");
    }

    #[test]
    fn pawn_on_a_file_does_not_capture_around_the_edge() {
        let mut squares = empty_board();
        place(&mut squares, Square::A4, 'P');
        // A4 - 9 is H6 on the wrong edge of the board.
        place(&mut squares, Square::H6, 'p');

        let found = targets(&squares, Square::A4);
        assert!(!found.contains(&Square::H6));
        assert_eq!(found, vec![Square::A5]);
    }

    #[test]
    fn black_pawn_advances_toward_higher_indices() {
        let mut squares = empty_board();
        place(&mut squares, Square::D7, 'p');

        let found = targets(&squares, Square::D7);
        assert_eq!(found, vec![Square::D6, Square::D5]);
    }
}
