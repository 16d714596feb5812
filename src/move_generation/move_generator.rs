//! Move generator trait and result types.
//!
//! `GeneratedMove` carries the successor state alongside the packed move so
//! downstream consumers (status evaluation, notation, perft) never re-apply
//! moves they already paid for.

use thiserror::Error;

use crate::game_state::game_state::GameState;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    /// The position cannot be generated from, e.g. a side is missing its king.
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

/// Facts about a move in its origin position, derived during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_checkmate: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub move_description: u64,
    pub game_after_move: GameState,
    pub annotations: MoveAnnotations,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}
