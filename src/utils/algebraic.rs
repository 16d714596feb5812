//! Square conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices, reused by the FEN, move-notation, and session components.

use crate::game_state::chess_types::Square;

/// Convert a coordinate square (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    let file_index = file - b'a';
    let rank_index = rank - b'1';
    Ok(rank_index * 8 + file_index)
}

/// Convert a square index (`0..=63`) to a coordinate string (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    Ok(format!("{}{}", file_char(square), rank_char(square)))
}

/// The file letter (`'a'..='h'`) of a square index.
#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + square % 8)
}

/// The rank digit (`'1'..='8'`) of a square index.
#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + square / 8)
}
