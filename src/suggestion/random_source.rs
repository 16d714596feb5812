//! Local uniform-random move source.
//!
//! The reference `MoveSource` implementation: parses the requested FEN,
//! generates the legal moves, and picks one uniformly at random. Used by the
//! CLI when no external source is wired up and by tests that need a cheap,
//! always-legal collaborator.

use rand::seq::IteratorRandom;

use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::suggestion::move_source::{MoveSource, SuggestionRequest, SuggestionResponse};
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::move_description_to_long_algebraic;

pub struct LocalRandomSource;

impl MoveSource for LocalRandomSource {
    fn name(&self) -> &'static str {
        "local-random"
    }

    fn suggest(&mut self, request: &SuggestionRequest) -> Result<SuggestionResponse, String> {
        let game_state = parse_fen(&request.fen)?;
        let moves = FastLegalMoveGenerator
            .generate_legal_moves(&game_state)
            .map_err(|err| err.to_string())?;

        let mut rng = rand::rng();
        let chosen = moves
            .iter()
            .choose(&mut rng)
            .ok_or_else(|| "no legal moves in requested position".to_owned())?;

        Ok(SuggestionResponse {
            coordinate_move: move_description_to_long_algebraic(
                chosen.move_description,
                &game_state,
            )?,
            new_fen: Some(chosen.game_after_move.get_fen()),
        })
    }
}
