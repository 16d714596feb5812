//! Pseudo-legal pawn move generation.
//!
//! Covers single and double pushes, diagonal captures, en-passant captures
//! against the stored target square, and promotion fan-out on the last rank.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::move_descriptions::{FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

/// Promotion choices in the order they are enumerated.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;

    let promotion_rank = if side == Color::White { 7 } else { 0 };
    let start_rank = if side == Color::White { 1 } else { 6 };

    let mut pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        let file = from % 8;
        let rank = from / 8;

        let one_step = if side == Color::White {
            from.checked_add(8)
        } else {
            from.checked_sub(8)
        };

        if let Some(to) = one_step {
            let to_mask = 1u64 << to;
            if (to_mask & empty) != 0 {
                if to / 8 == promotion_rank {
                    for promo in PROMOTION_KINDS {
                        out.push(build_move(from, to, PieceKind::Pawn, None, Some(promo), 0));
                    }
                } else {
                    out.push(build_move(from, to, PieceKind::Pawn, None, None, 0));

                    if rank == start_rank {
                        let two_step = if side == Color::White { from + 16 } else { from - 16 };
                        let two_mask = 1u64 << two_step;
                        if (two_mask & empty) != 0 {
                            out.push(build_move(
                                from,
                                two_step,
                                PieceKind::Pawn,
                                None,
                                None,
                                FLAG_DOUBLE_PAWN_PUSH,
                            ));
                        }
                    }
                }
            }
        }

        // captures and en-passant
        for file_delta in [-1i8, 1i8] {
            let new_file = file as i8 + file_delta;
            if !(0..=7).contains(&new_file) {
                continue;
            }

            let to_opt = if side == Color::White {
                from.checked_add((8 + file_delta) as u8)
            } else {
                from.checked_sub((8 - file_delta) as u8)
            };
            let Some(to) = to_opt else { continue };
            let to_mask = 1u64 << to;

            if (to_mask & enemy_occ) != 0 {
                let captured_piece = enemy_piece_on(game_state, to);
                if to / 8 == promotion_rank {
                    for promo in PROMOTION_KINDS {
                        out.push(build_move(
                            from,
                            to,
                            PieceKind::Pawn,
                            captured_piece,
                            Some(promo),
                            FLAG_CAPTURE,
                        ));
                    }
                } else {
                    out.push(build_move(
                        from,
                        to,
                        PieceKind::Pawn,
                        captured_piece,
                        None,
                        FLAG_CAPTURE,
                    ));
                }
            } else if game_state.en_passant_square == Some(to) {
                out.push(build_move(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }

        pawns &= pawns - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{
        move_promotion_piece, move_to, FLAG_EN_PASSANT,
    };

    #[test]
    fn startpos_has_sixteen_pawn_moves() {
        let game = GameState::new_game();
        let mut moves = Vec::new();
        generate_pawn_moves(&game, &mut moves);
        assert_eq!(moves.len(), 16);
    }

    #[test]
    fn promotion_enumerates_four_choices() {
        let game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&game, &mut moves);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|&mv| move_to(mv) == 56));
        assert!(moves.iter().all(|&mv| move_promotion_piece(mv).is_some()));
    }

    #[test]
    fn en_passant_target_produces_the_capture() {
        let game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&game, &mut moves);
        assert!(moves
            .iter()
            .any(|&mv| move_to(mv) == 43 && (mv & FLAG_EN_PASSANT) != 0));
    }

    #[test]
    fn fully_blocked_pawn_generates_nothing() {
        let game =
            GameState::from_fen("4k3/8/8/8/4p3/4P3/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&game, &mut moves);
        assert!(moves.is_empty());
    }
}
