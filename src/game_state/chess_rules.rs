//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals such as the standard
//! starting position FEN and the thresholds the draw rules are defined by.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move rule declares a draw
/// (50 full moves by each side without a capture or pawn advance).
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Number of times an identical position must occur for a repetition draw.
pub const THREEFOLD_REPETITION_COUNT: usize = 3;

/// Bitboard of the dark squares (a1 is dark). Used to classify bishop
/// square color for the insufficient-material rule.
pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
