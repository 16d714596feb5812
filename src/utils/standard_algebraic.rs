//! Standard algebraic notation (SAN) for generated moves.
//!
//! SAN is built from a generated move and the full legal move list of the
//! position it was played in, so disambiguation and the check/mate suffixes
//! agree with the generator's own annotations.

use crate::game_state::chess_types::PieceKind;
use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::move_descriptions::{
    move_from, move_moved_piece, move_promotion_piece, move_to, FLAG_CAPTURE, FLAG_CASTLING,
};
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// Renders `generated` as SAN. `legal_moves` must be the legal move list of
/// the position the move was generated in; it drives disambiguation.
pub fn move_to_san(
    generated: &GeneratedMove,
    legal_moves: &[GeneratedMove],
) -> Result<String, String> {
    let move_description = generated.move_description;
    let from = move_from(move_description);
    let to = move_to(move_description);
    let moved_piece = move_moved_piece(move_description)
        .ok_or("Move description has no valid moved piece")?;

    let mut san = String::new();

    if move_description & FLAG_CASTLING != 0 {
        san.push_str(if to > from { "O-O" } else { "O-O-O" });
        push_check_suffix(&mut san, generated);
        return Ok(san);
    }

    let is_capture = move_description & FLAG_CAPTURE != 0;

    match moved_piece {
        PieceKind::Pawn => {
            if is_capture {
                san.push(file_char(from));
            }
        }
        other => {
            san.push(piece_letter(other));
            push_disambiguation(&mut san, move_description, legal_moves);
        }
    }

    if is_capture {
        san.push('x');
    }

    san.push_str(&square_to_algebraic(to)?);

    if let Some(promotion) = move_promotion_piece(move_description) {
        san.push('=');
        san.push(piece_letter(promotion));
    }

    push_check_suffix(&mut san, generated);
    Ok(san)
}

fn piece_letter(piece_kind: PieceKind) -> char {
    match piece_kind {
        PieceKind::Pawn => 'P',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
    }
}

/// Appends the origin file, rank, or both when another piece of the same
/// kind also reaches the destination. File wins when it is unique, then
/// rank, then the full origin square.
fn push_disambiguation(san: &mut String, move_description: u64, legal_moves: &[GeneratedMove]) {
    let from = move_from(move_description);
    let to = move_to(move_description);
    let moved_piece = move_moved_piece(move_description);

    let rivals: Vec<u8> = legal_moves
        .iter()
        .map(|m| m.move_description)
        .filter(|&m| {
            move_to(m) == to && move_from(m) != from && move_moved_piece(m) == moved_piece
        })
        .map(move_from)
        .collect();

    if rivals.is_empty() {
        return;
    }

    let file_taken = rivals.iter().any(|&sq| sq % 8 == from % 8);
    let rank_taken = rivals.iter().any(|&sq| sq / 8 == from / 8);

    if !file_taken {
        san.push(file_char(from));
    } else if !rank_taken {
        san.push(rank_char(from));
    } else {
        san.push(file_char(from));
        san.push(rank_char(from));
    }
}

fn push_check_suffix(san: &mut String, generated: &GeneratedMove) {
    if generated.annotations.is_checkmate {
        san.push('#');
    } else if generated.annotations.gives_check {
        san.push('+');
    }
}

#[cfg(test)]
mod tests {
    use super::move_to_san;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
    use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};

    fn san_of(fen: &str, from: u8, to: u8) -> String {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        let generated = find_move(&moves, from, to);
        move_to_san(generated, &moves).expect("SAN rendering should succeed")
    }

    fn find_move(moves: &[GeneratedMove], from: u8, to: u8) -> &GeneratedMove {
        moves
            .iter()
            .find(|m| move_from(m.move_description) == from && move_to(m.move_description) == to)
            .expect("expected move should be legal")
    }

    #[test]
    fn pawn_push_and_knight_development() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(san_of(start, 12, 28), "e4");
        assert_eq!(san_of(start, 6, 21), "Nf3");
    }

    #[test]
    fn pawn_capture_keeps_origin_file() {
        // After 1. e4 d5 the e-pawn can take on d5.
        let san = san_of(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            28,
            35,
        );
        assert_eq!(san, "exd5");
    }

    #[test]
    fn castling_and_promotion() {
        assert_eq!(
            san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 4, 6),
            "O-O"
        );
        assert_eq!(
            san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 4, 2),
            "O-O-O"
        );

        // The queen promotion checks along the freshly vacated a-file.
        let game = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        let queen_promotion = moves
            .iter()
            .find(|m| move_promotion_piece(m.move_description) == Some(PieceKind::Queen))
            .expect("queen promotion should be legal");
        assert_eq!(
            move_to_san(queen_promotion, &moves).expect("SAN rendering should succeed"),
            "a8=Q+"
        );
    }

    #[test]
    fn file_disambiguation_between_knights() {
        // Knights on b1 and f3 both reach the vacated d2 square.
        let san = san_of(
            "rnbqk2r/pppp1ppp/5n2/2b1p3/4P3/3P1N2/PPP2PPP/RNBQKB1R w KQkq - 1 4",
            1,
            11,
        );
        assert_eq!(san, "Nbd2");
    }

    #[test]
    fn rank_disambiguation_between_doubled_rooks() {
        // Rooks on a1 and a5 share the a-file; only the rank separates them.
        let san = san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", 0, 16);
        assert_eq!(san, "R1a3");
    }

    #[test]
    fn mate_suffix_comes_from_annotations() {
        // Scholar's mate delivery: Qh5xf7#.
        let san = san_of(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
            39,
            53,
        );
        assert_eq!(san, "Qxf7#");
    }
}
