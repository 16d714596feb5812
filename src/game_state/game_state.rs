//! Core board state representation.
//!
//! `GameState` is the central model for the rules engine. It stores piece
//! bitboards, occupancy caches, turn/state flags, move counters, and the
//! position-key history used for repetition detection. It is a plain value
//! type: applying a move produces a new `GameState` rather than mutating in
//! place, so callers can snapshot positions freely.

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Complete position state for one reachable chess position.
#[derive(Debug, Clone)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Position identity ---
    pub zobrist_key: u64,

    // --- Repetition support ---
    pub ply: u16,
    pub repetition_history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,

            ply: 0,
            repetition_history: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board with no pieces. Mainly useful as a scratch base in tests.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Number of times the current position has occurred, counting itself.
    pub fn repetition_count(&self) -> usize {
        self.repetition_history
            .iter()
            .filter(|&&key| key == self.zobrist_key)
            .count()
    }
}
