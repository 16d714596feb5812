//! Board-level game status evaluation.
//!
//! Classifies a position as playing, check, checkmate, stalemate, or drawn.
//! Mate and stalemate are decided before draw rules: a mating move ends the
//! game even when the half-move clock or repetition count would also draw it.
//! Timeout is clock-driven and never produced here; the session layers it on.

use crate::evaluation::insufficient_material::is_insufficient_material;
use crate::game_state::chess_rules::{FIFTY_MOVE_RULE_HALFMOVES, THREEFOLD_REPETITION_COUNT};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
    Timeout(Color),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw | GameStatus::Timeout(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
            GameStatus::Timeout(_) => "timeout",
        }
    }
}

/// Why a position counts as drawn. Reported alongside `GameStatus::Draw`
/// for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl DrawKind {
    pub fn name(&self) -> &'static str {
        match self {
            DrawKind::InsufficientMaterial => "insufficient material",
            DrawKind::FiftyMoveRule => "fifty-move rule",
            DrawKind::ThreefoldRepetition => "threefold repetition",
        }
    }
}

pub fn evaluate_status(game_state: &GameState) -> MoveGenResult<GameStatus> {
    let in_check = is_king_in_check(game_state, game_state.side_to_move);
    let has_moves = !FastLegalMoveGenerator
        .generate_legal_moves(game_state)?
        .is_empty();

    if !has_moves {
        return Ok(if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        });
    }

    if draw_reason(game_state).is_some() {
        return Ok(GameStatus::Draw);
    }

    Ok(if in_check {
        GameStatus::Check
    } else {
        GameStatus::Playing
    })
}

pub fn draw_reason(game_state: &GameState) -> Option<DrawKind> {
    if is_insufficient_material(game_state) {
        return Some(DrawKind::InsufficientMaterial);
    }
    if game_state.halfmove_clock >= FIFTY_MOVE_RULE_HALFMOVES {
        return Some(DrawKind::FiftyMoveRule);
    }
    if game_state.repetition_count() >= THREEFOLD_REPETITION_COUNT {
        return Some(DrawKind::ThreefoldRepetition);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{draw_reason, evaluate_status, DrawKind, GameStatus};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::long_algebraic::long_algebraic_to_move_description;

    fn status_of(fen: &str) -> GameStatus {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        evaluate_status(&game).expect("status evaluation should succeed")
    }

    #[test]
    fn fresh_game_is_playing() {
        let game = GameState::new_game();
        assert_eq!(
            evaluate_status(&game).expect("status evaluation should succeed"),
            GameStatus::Playing
        );
    }

    #[test]
    fn attacked_king_with_escapes_is_check() {
        assert_eq!(status_of("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1"), GameStatus::Check);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        assert_eq!(
            status_of("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            GameStatus::Checkmate
        );
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn dead_material_and_exhausted_clock_draw() {
        let material = GameState::from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(
            evaluate_status(&material).expect("status evaluation should succeed"),
            GameStatus::Draw
        );
        assert_eq!(draw_reason(&material), Some(DrawKind::InsufficientMaterial));

        let exhausted = GameState::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 100 72")
            .expect("FEN should parse");
        assert_eq!(
            evaluate_status(&exhausted).expect("status evaluation should succeed"),
            GameStatus::Draw
        );
        assert_eq!(draw_reason(&exhausted), Some(DrawKind::FiftyMoveRule));
    }

    #[test]
    fn checkmate_outranks_the_fifty_move_rule() {
        assert_eq!(
            status_of("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 100 3"),
            GameStatus::Checkmate
        );
    }

    #[test]
    fn shuffling_knights_reach_threefold_repetition() {
        let mut game = GameState::new_game();
        let shuffle = [
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        ];
        for lan in shuffle {
            let mv = long_algebraic_to_move_description(lan, &game).expect("LAN should parse");
            game = apply_move(&game, mv).expect("move should apply");
        }

        assert_eq!(draw_reason(&game), Some(DrawKind::ThreefoldRepetition));
        assert_eq!(
            evaluate_status(&game).expect("status evaluation should succeed"),
            GameStatus::Draw
        );
    }
}
