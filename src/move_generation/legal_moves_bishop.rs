//! Pseudo-legal bishop move generation along occupancy-aware diagonals.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_descriptions::FLAG_CAPTURE;

pub fn generate_bishop_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    let mut bishops = game_state.pieces[side.index()][PieceKind::Bishop.index()];
    while bishops != 0 {
        let from = bishops.trailing_zeros() as Square;
        let mut attacks = bishop_attacks(from, game_state.occupancy_all) & !own_occ;

        while attacks != 0 {
            let to = attacks.trailing_zeros() as Square;
            let to_mask = 1u64 << to;
            let is_capture = (to_mask & enemy_occ) != 0;
            let captured = if is_capture {
                enemy_piece_on(game_state, to)
            } else {
                None
            };
            out.push(build_move(
                from,
                to,
                PieceKind::Bishop,
                captured,
                None,
                if is_capture { FLAG_CAPTURE } else { 0 },
            ));
            attacks &= attacks - 1;
        }

        bishops &= bishops - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::game_state::GameState;

    #[test]
    fn startpos_bishops_are_locked_in() {
        let game = GameState::new_game();
        let mut moves = Vec::new();
        generate_bishop_moves(&game, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn lone_bishop_on_open_board_has_thirteen_moves() {
        let game =
            GameState::from_fen("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = Vec::new();
        generate_bishop_moves(&game, &mut moves);
        assert_eq!(moves.len(), 13);
    }
}
