//! Automatic-draw detection for dead material.
//!
//! A position is a material draw exactly when neither side can conceivably
//! deliver mate: bare kings, a single minor piece on the whole board, or
//! nothing but bishops that all stand on one square color. Everything else
//! (any pawn, rook, or queen, or two knights) stays playable.

use crate::game_state::chess_rules::DARK_SQUARES;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;

pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let side = |color: Color, kind: PieceKind| -> u64 {
        game_state.pieces[color.index()][kind.index()]
    };

    let pawns = side(Color::White, PieceKind::Pawn) | side(Color::Black, PieceKind::Pawn);
    let rooks = side(Color::White, PieceKind::Rook) | side(Color::Black, PieceKind::Rook);
    let queens = side(Color::White, PieceKind::Queen) | side(Color::Black, PieceKind::Queen);
    if pawns | rooks | queens != 0 {
        return false;
    }

    let knights = side(Color::White, PieceKind::Knight) | side(Color::Black, PieceKind::Knight);
    let bishops = side(Color::White, PieceKind::Bishop) | side(Color::Black, PieceKind::Bishop);
    let minor_count = (knights | bishops).count_ones();

    if minor_count <= 1 {
        return true;
    }

    if knights != 0 {
        return false;
    }

    // Only bishops remain; they are harmless when confined to one color.
    let dark_bishops = bishops & DARK_SQUARES;
    dark_bishops == 0 || dark_bishops == bishops
}

#[cfg(test)]
mod tests {
    use super::is_insufficient_material;
    use crate::game_state::game_state::GameState;

    fn drawn(fen: &str) -> bool {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        is_insufficient_material(&game)
    }

    #[test]
    fn bare_and_near_bare_kings_are_drawn() {
        assert!(drawn("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(drawn("4k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        assert!(drawn("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"));
        assert!(drawn("4k1n1/8/8/8/8/8/8/4K3 b - - 0 1"));
    }

    #[test]
    fn same_color_bishops_are_drawn_but_opposite_are_not() {
        // f1 and c8 are both light squares; b8 is dark.
        assert!(drawn("2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        assert!(!drawn("1b2k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
    }

    #[test]
    fn mating_material_is_not_drawn() {
        assert!(!drawn("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert!(!drawn("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1"));
        assert!(!drawn("4k3/8/8/8/8/8/4Q3/4K3 w - - 0 1"));
        assert!(!drawn("4k3/4n3/8/8/8/8/8/4KN2 w - - 0 1"));
        assert!(!drawn("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1"));
    }
}
