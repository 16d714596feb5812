//! Move history entries for the game session.
//!
//! Each entry keeps the packed move, both notations, and a full board
//! snapshot. Undo restores snapshots instead of reversing moves, so the
//! repetition history and counters always match a freshly reached position.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::move_captured_piece;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub move_description: u64,
    pub lan: String,
    pub san: String,
    pub state_after: GameState,
}

/// Pieces captured by `color` across the history, in play order.
pub fn captured_by(history: &[HistoryEntry], color: Color) -> Vec<PieceKind> {
    history
        .iter()
        .filter(|entry| entry.state_after.side_to_move.opposite() == color)
        .filter_map(|entry| move_captured_piece(entry.move_description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{captured_by, HistoryEntry};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::long_algebraic::long_algebraic_to_move_description;

    fn play(lans: &[&str]) -> Vec<HistoryEntry> {
        let mut game = GameState::new_game();
        let mut history = Vec::new();
        for lan in lans {
            let mv = long_algebraic_to_move_description(lan, &game).expect("LAN should parse");
            game = apply_move(&game, mv).expect("move should apply");
            history.push(HistoryEntry {
                move_description: mv,
                lan: (*lan).to_owned(),
                san: (*lan).to_owned(),
                state_after: game.clone(),
            });
        }
        history
    }

    #[test]
    fn captures_are_split_by_mover() {
        let history = play(&["e2e4", "d7d5", "e4d5", "d8d5"]);
        assert_eq!(captured_by(&history, Color::White), vec![PieceKind::Pawn]);
        assert_eq!(captured_by(&history, Color::Black), vec![PieceKind::Pawn]);
    }

    #[test]
    fn quiet_games_capture_nothing() {
        let history = play(&["e2e4", "e7e5"]);
        assert!(captured_by(&history, Color::White).is_empty());
        assert!(captured_by(&history, Color::Black).is_empty());
    }
}
