//! Square-attack and check queries.
//!
//! `is_square_attacked` looks up attackers from the target square outward:
//! for every piece kind, the set of squares that could attack `square` is the
//! attack set of that kind computed from `square` itself (pawns use the
//! defender color's table since their attacks are not symmetric).

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let their = &game_state.pieces[attacker_color.index()];

    let pawns = their[PieceKind::Pawn.index()];
    if pawn_attacks(attacker_color.opposite(), square) & pawns != 0 {
        return true;
    }

    if knight_attacks(square) & their[PieceKind::Knight.index()] != 0 {
        return true;
    }

    if king_attacks(square) & their[PieceKind::King.index()] != 0 {
        return true;
    }

    let bishops_queens = their[PieceKind::Bishop.index()] | their[PieceKind::Queen.index()];
    if bishop_attacks(square, game_state.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = their[PieceKind::Rook.index()] | their[PieceKind::Queen.index()];
    if rook_attacks(square, game_state.occupancy_all) & rooks_queens != 0 {
        return true;
    }

    false
}

/// Every piece of `attacker_color` currently attacking `square`, with its
/// origin. Used for check annotations and SAN suffixes.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let their = &game_state.pieces[attacker_color.index()];
    let occupancy = game_state.occupancy_all;
    let mut attackers = Vec::<(Square, PieceKind)>::new();

    push_all(
        pawn_attacks(attacker_color.opposite(), square) & their[PieceKind::Pawn.index()],
        PieceKind::Pawn,
        &mut attackers,
    );
    push_all(
        knight_attacks(square) & their[PieceKind::Knight.index()],
        PieceKind::Knight,
        &mut attackers,
    );

    let diagonal = bishop_attacks(square, occupancy);
    let straight = rook_attacks(square, occupancy);
    push_all(
        diagonal & their[PieceKind::Bishop.index()],
        PieceKind::Bishop,
        &mut attackers,
    );
    push_all(
        straight & their[PieceKind::Rook.index()],
        PieceKind::Rook,
        &mut attackers,
    );
    push_all(
        (diagonal | straight) & their[PieceKind::Queen.index()],
        PieceKind::Queen,
        &mut attackers,
    );
    push_all(
        king_attacks(square) & their[PieceKind::King.index()],
        PieceKind::King,
        &mut attackers,
    );

    attackers
}

fn push_all(mut sources: u64, piece: PieceKind, out: &mut Vec<(Square, PieceKind)>) {
    while sources != 0 {
        let from = sources.trailing_zeros() as Square;
        out.push((from, piece));
        sources &= sources - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{attackers_to_square, is_king_in_check, is_square_attacked, king_square};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;

    #[test]
    fn startpos_kings_found_and_safe() {
        let game = GameState::new_game();
        assert_eq!(king_square(&game, Color::White), Some(4));
        assert_eq!(king_square(&game, Color::Black), Some(60));
        assert!(!is_king_in_check(&game, Color::White));
        assert!(!is_king_in_check(&game, Color::Black));
    }

    #[test]
    fn startpos_f3_attacked_by_white_only() {
        let game = GameState::new_game();
        let f3 = 21u8;
        assert!(is_square_attacked(&game, f3, Color::White));
        assert!(!is_square_attacked(&game, f3, Color::Black));
    }

    #[test]
    fn queen_on_diagonal_gives_check() {
        let game = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert!(is_king_in_check(&game, Color::White));
        assert!(!is_king_in_check(&game, Color::Black));
    }

    #[test]
    fn attacker_list_names_origin_and_kind() {
        let game =
            GameState::from_fen("4k3/8/8/8/4r3/8/3n4/4K3 w - - 0 1").expect("FEN should parse");
        let e1 = 4u8;
        let attackers = attackers_to_square(&game, e1, Color::Black);
        assert_eq!(attackers, vec![(28, PieceKind::Rook)]);

        let f1 = 5u8;
        let attackers = attackers_to_square(&game, f1, Color::Black);
        assert!(attackers.contains(&(11, PieceKind::Knight)));
    }
}
