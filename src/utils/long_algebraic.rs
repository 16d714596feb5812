//! Coordinate-move notation ("e2e4", "a7a8q").
//!
//! Parsing reconstructs a full packed move description from the board:
//! capture, double-push, castling, and en-passant flags are re-derived, and
//! promotion letters are validated against the moving pawn. This is the only
//! path besides the generator that can produce a move value.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::piece_on_square_any;
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_description_to_long_algebraic(
    move_description: u64,
    game_state: &GameState,
) -> Result<String, String> {
    let from = move_from(move_description);
    let to = move_to(move_description);
    let promotion_code = move_promotion_piece_code(move_description);
    let moved_piece_code = move_moved_piece_code(move_description);

    let (color_on_from, piece_on_from) = piece_on_square_any(game_state, from)
        .ok_or_else(|| format!("No piece found on from-square {}", from))?;
    let moved_piece = piece_kind_from_code(moved_piece_code).ok_or_else(|| {
        format!("Invalid moved-piece code in move description: {moved_piece_code}")
    })?;

    if moved_piece != piece_on_from {
        return Err(format!(
            "Move description moved-piece mismatch: encoded={moved_piece:?}, board={piece_on_from:?}"
        ));
    }

    if color_on_from != game_state.side_to_move {
        return Err("From-square piece does not belong to side to move".to_owned());
    }

    let mut out = String::new();
    out.push_str(&square_to_algebraic(from)?);
    out.push_str(&square_to_algebraic(to)?);

    if promotion_code != NO_PIECE_CODE {
        let promotion_piece = piece_kind_from_code(promotion_code)
            .ok_or_else(|| format!("Invalid promotion piece code: {promotion_code}"))?;
        out.push(promotion_to_char(promotion_piece)?);
    }

    Ok(out)
}

pub fn long_algebraic_to_move_description(
    long_algebraic: &str,
    game_state: &GameState,
) -> Result<u64, String> {
    let bytes = long_algebraic.as_bytes();
    if !long_algebraic.is_ascii() || (bytes.len() != 4 && bytes.len() != 5) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;

    let (moving_color, moved_piece) = piece_on_square_any(game_state, from)
        .ok_or_else(|| format!("No piece on from-square: {}", &long_algebraic[0..2]))?;

    if moving_color != game_state.side_to_move {
        return Err("Attempted to move a piece that is not on side to move".to_owned());
    }

    let target_piece = piece_on_square_any(game_state, to);
    let mut captured_piece = target_piece.map(|(_, piece)| piece);
    let mut flags = 0u64;

    if captured_piece.is_some() {
        flags |= FLAG_CAPTURE;
    }

    if moved_piece == PieceKind::Pawn && from.abs_diff(to) == 16 {
        flags |= FLAG_DOUBLE_PAWN_PUSH;
    }

    if moved_piece == PieceKind::King && from.abs_diff(to) == 2 {
        flags |= FLAG_CASTLING;
    }

    if moved_piece == PieceKind::Pawn
        && game_state.en_passant_square == Some(to)
        && (from % 8 != to % 8)
        && target_piece.is_none()
    {
        let capture_square = if moving_color == Color::White {
            to.checked_sub(8)
                .ok_or("Invalid en-passant capture square (white)")?
        } else {
            to.checked_add(8)
                .ok_or("Invalid en-passant capture square (black)")?
        };

        let capture_piece = piece_on_square_any(game_state, capture_square);
        match capture_piece {
            Some((color, PieceKind::Pawn)) if color != moving_color => {
                captured_piece = Some(PieceKind::Pawn);
                flags |= FLAG_CAPTURE | FLAG_EN_PASSANT;
            }
            _ => {
                return Err("En-passant target set but no capturable pawn found".to_owned());
            }
        }
    }

    let promotion_piece = if bytes.len() == 5 {
        if moved_piece != PieceKind::Pawn {
            return Err("Only pawns may promote".to_owned());
        }

        let rank = to / 8;
        if rank != 0 && rank != 7 {
            return Err("Promotion move must end on back rank".to_owned());
        }

        Some(char_to_promotion(bytes[4] as char)?)
    } else {
        if moved_piece == PieceKind::Pawn {
            let rank = to / 8;
            if rank == 0 || rank == 7 {
                return Err("Missing promotion piece in long algebraic move".to_owned());
            }
        }
        None
    };

    Ok(pack_move_description(
        from,
        to,
        moved_piece,
        captured_piece,
        promotion_piece,
        flags,
    ))
}

fn promotion_to_char(piece_kind: PieceKind) -> Result<char, String> {
    match piece_kind {
        PieceKind::Knight => Ok('n'),
        PieceKind::Bishop => Ok('b'),
        PieceKind::Rook => Ok('r'),
        PieceKind::Queen => Ok('q'),
        _ => Err(format!("Invalid promotion piece: {piece_kind:?}")),
    }
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}
