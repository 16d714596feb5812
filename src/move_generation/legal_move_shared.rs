//! Small board-query helpers shared by the per-piece move generators.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

#[inline]
pub fn piece_on_square_for_color(
    game_state: &GameState,
    color: Color,
    square: Square,
) -> Option<PieceKind> {
    let mask = 1u64 << square;
    for piece in ALL_PIECE_KINDS {
        if (game_state.pieces[color.index()][piece.index()] & mask) != 0 {
            return Some(piece);
        }
    }
    None
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    piece_on_square_for_color(game_state, game_state.side_to_move.opposite(), square)
}

#[inline]
pub fn piece_on_square_any(game_state: &GameState, square: Square) -> Option<(Color, PieceKind)> {
    if let Some(piece) = piece_on_square_for_color(game_state, Color::White, square) {
        return Some((Color::White, piece));
    }
    if let Some(piece) = piece_on_square_for_color(game_state, Color::Black, square) {
        return Some((Color::Black, piece));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{enemy_piece_on, piece_on_square_any, piece_on_square_for_color};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;

    #[test]
    fn startpos_square_queries_agree() {
        let game = GameState::new_game();
        let d1 = 3u8;
        let d8 = 59u8;
        let e4 = 28u8;

        assert_eq!(
            piece_on_square_for_color(&game, Color::White, d1),
            Some(PieceKind::Queen)
        );
        assert_eq!(piece_on_square_any(&game, d8), Some((Color::Black, PieceKind::Queen)));
        assert_eq!(piece_on_square_any(&game, e4), None);
        assert_eq!(enemy_piece_on(&game, d8), Some(PieceKind::Queen));
        assert_eq!(enemy_piece_on(&game, d1), None);
    }
}
