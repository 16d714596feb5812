//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, applies candidate moves,
//! filters illegal self-check outcomes, and annotates check/checkmate
//! metadata. Pinned pieces need no special handling: a pinned piece's moves
//! all fail the self-check filter.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{
    attackers_to_square, is_king_in_check, king_square,
};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::moves::move_descriptions::move_from;

pub struct LegalMoveGenerator;

/// Same pipeline without the annotation pass. Used where only the move set
/// matters, such as perft and checkmate reply counting.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        self.generate_legal_moves_internal(game_state, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        LegalMoveGenerator.generate_legal_moves_internal(game_state, false)
    }
}

impl LegalMoveGenerator {
    /// Legal moves whose origin is `from`. Backs the per-square destination
    /// queries the session exposes.
    pub fn generate_legal_moves_from(
        &self,
        game_state: &GameState,
        from: Square,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        let mut moves = self.generate_legal_moves(game_state)?;
        moves.retain(|generated| move_from(generated.move_description) == from);
        Ok(moves)
    }

    fn generate_legal_moves_internal(
        &self,
        game_state: &GameState,
        annotate: bool,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        let mut pseudo = Vec::<u64>::with_capacity(128);

        generate_pawn_moves(game_state, &mut pseudo);
        generate_knight_moves(game_state, &mut pseudo);
        generate_bishop_moves(game_state, &mut pseudo);
        generate_rook_moves(game_state, &mut pseudo);
        generate_queen_moves(game_state, &mut pseudo);
        generate_king_moves(game_state, &mut pseudo);

        let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
        for mv in pseudo {
            let next = apply_move(game_state, mv).map_err(|x| {
                MoveGenerationError::InvalidState(format!("apply_move failed: {x}"))
            })?;

            // Illegal if own king is in check after move.
            if is_king_in_check(&next, game_state.side_to_move) {
                continue;
            }

            let annotations = if annotate {
                classify_move_annotations(self, game_state, &next)?
            } else {
                MoveAnnotations::default()
            };

            legal.push(GeneratedMove {
                move_description: mv,
                game_after_move: next,
                annotations,
            });
        }

        Ok(legal)
    }
}

fn classify_move_annotations(
    generator: &LegalMoveGenerator,
    prev: &GameState,
    next: &GameState,
) -> MoveGenResult<MoveAnnotations> {
    let Some(defender_king_sq) = king_square(next, next.side_to_move) else {
        return Ok(MoveAnnotations::default());
    };

    let attacker_color = prev.side_to_move;
    let checkers = attackers_to_square(next, defender_king_sq, attacker_color);
    if checkers.is_empty() {
        return Ok(MoveAnnotations::default());
    }

    let reply_count = generator.generate_legal_moves_internal(next, false)?.len();

    Ok(MoveAnnotations {
        gives_check: true,
        is_checkmate: reply_count == 0,
    })
}
