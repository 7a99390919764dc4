/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use skewer::{request_move, Bot, Color, Move, Position, Square, FEN_STARTPOS};

/// A popular FEN string for exercising move generation.
const FEN_KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

#[test]
fn test_startpos_has_twenty_legal_moves() {
    let mut pos = Position::default();
    assert_eq!(pos.legal_moves().len(), 20);
}

#[test]
fn test_square_labels_map_fen_reading_order() {
    assert_eq!(Square::from_index(0).unwrap().to_string(), "a8");
    assert_eq!(Square::from_index(63).unwrap().to_string(), "h1");
}

#[test]
fn test_square_labels_round_trip_bijectively() {
    let mut seen = Vec::new();
    for square in Square::iter() {
        let label = square.to_string();
        assert_eq!(label.parse::<Square>().unwrap(), square);
        assert!(!seen.contains(&label), "duplicate label {label}");
        seen.push(label);
    }
    assert_eq!(seen.len(), 64);
}

#[test]
fn test_fen_round_trips() {
    for fen in [
        FEN_STARTPOS,
        FEN_KIWIPETE,
        "8/8/8/8/8/8/8/8 w - - 0 1",
        "R3k3/8/4K3/8/8/8/8/8 b - - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen, "FEN did not round-trip");
    }
}

#[test]
fn test_legality_implies_no_self_check() {
    for fen in [FEN_STARTPOS, FEN_KIWIPETE] {
        let mut pos = Position::from_fen(fen).unwrap();
        let side = pos.side_to_move();
        for mv in pos.legal_moves().to_vec() {
            assert!(
                !pos.with_move_made(mv).is_in_check(side),
                "legal move {mv} leaves {side} in check in {fen}"
            );
        }
    }
}

#[test]
fn test_moves_strictly_alternate_side_to_move() {
    let mut pos = Position::default();
    assert_eq!(pos.side_to_move(), Color::White);

    pos.make_move(mv("e2e4"));
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.fullmove(), 1);

    pos.make_move(mv("e7e5"));
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.fullmove(), 2);

    pos.make_move(mv("g1f3"));
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.fullmove(), 2);

    pos.make_move(mv("b8c6"));
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.fullmove(), 3);
}

#[test]
fn test_boxed_and_attacked_king_is_mated_and_in_check() {
    // Rook checks along the back rank; the White king guards every escape.
    let mut pos = Position::from_fen("R3k3/8/4K3/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(pos.is_in_check(Color::Black));
    assert!(pos.is_in_mate());
}

#[test]
fn test_boxed_but_unattacked_king_reports_mate_without_check() {
    // The lone king has no safe square but is not attacked: the engine still
    // reports "no moves" through the same signal, with the check query
    // telling the two apart.
    let mut pos = Position::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!pos.is_in_check(Color::Black));
    assert!(pos.is_in_mate());
}

#[test]
fn test_pawn_advances_from_home_rank() {
    let mut pos = Position::from_fen("8/8/8/8/8/8/P7/8 w - - 0 1").unwrap();
    let moves = pos.legal_moves().to_vec();
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&mv("a2a3")));
    assert!(moves.contains(&mv("a2a4")));
}

#[test]
fn test_pawn_cannot_jump_over_a_blocker() {
    let mut pos = Position::from_fen("8/8/8/8/8/n7/P7/8 w - - 0 1").unwrap();
    assert!(pos.legal_moves().is_empty());
}

#[test]
fn test_pawn_off_home_rank_has_single_advance_only() {
    let mut pos = Position::from_fen("8/8/8/8/8/P7/8/8 w - - 0 1").unwrap();
    assert_eq!(pos.legal_moves(), &[mv("a3a4")]);
}

#[test]
fn test_slides_stop_at_the_first_occupied_square() {
    let mut pos = Position::from_fen("8/8/8/8/R2p3P/8/8/8 w - - 0 1").unwrap();

    // The capture square ends the ray but is included.
    assert!(pos.can_move(mv("a4c4")));
    assert!(pos.can_move(mv("a4d4")));
    assert!(!pos.can_move(mv("a4e4")));
    assert!(!pos.can_move(mv("a4h4")));
}

#[test]
fn test_moving_into_check_is_rejected() {
    // The Black rook covers the entire e-file.
    let mut pos = Position::from_fen("4r3/8/8/8/8/8/3K4/8 w - - 0 1").unwrap();
    assert!(pos.can_move(mv("d2d1")));
    assert!(!pos.can_move(mv("d2e2")));
    assert!(!pos.can_move(mv("d2e1")));
}

#[test]
fn test_wrong_side_and_empty_origin_are_rejected() {
    let mut pos = Position::default();
    assert!(!pos.can_move(mv("e7e5")), "it is not Black's turn");
    assert!(!pos.can_move(mv("e4e5")), "no piece stands on e4");
}

#[test]
fn test_bot_contract_yields_a_legal_move() {
    /// Chooses the first legal move it sees.
    struct First;

    impl Bot for First {
        fn choose_move(&mut self, mut position: Position) -> Option<Move> {
            position.legal_moves().first().copied()
        }
    }

    let mut pos = Position::default();
    let receiver = request_move(First, pos.clone());
    let choice = receiver.recv().unwrap().unwrap();

    // The engine core does not trust the bot; the caller re-validates.
    assert!(pos.can_move(choice));
    pos.make_move(choice);
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn test_mated_position_has_no_moves_for_the_bot() {
    struct First;

    impl Bot for First {
        fn choose_move(&mut self, mut position: Position) -> Option<Move> {
            position.legal_moves().first().copied()
        }
    }

    let pos = Position::from_fen("R3k3/8/4K3/8/8/8/8/8 b - - 0 1").unwrap();
    let receiver = request_move(First, pos);
    assert_eq!(receiver.recv().unwrap(), None);
}
