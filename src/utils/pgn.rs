//! PGN export for finished and in-progress games.
//!
//! Writes seven-tag-roster headers followed by numbered SAN movetext. The
//! session keeps SAN alongside each history entry, so export is pure string
//! assembly; there is no PGN ingestion.

use chrono::Local;

use crate::evaluation::position_status::GameStatus;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;

pub struct PgnHeaderInfo<'a> {
    pub white: &'a str,
    pub black: &'a str,
    pub time_control: &'a str,
    pub result: &'a str,
}

pub fn write_pgn(
    initial_state: &GameState,
    san_history: &[String],
    info: &PgnHeaderInfo<'_>,
) -> String {
    let result = normalize_result(info.result);
    let mut headers: Vec<(&str, String)> = vec![
        ("Event", "Tempo Chess Game".to_owned()),
        ("Site", "Local".to_owned()),
        ("Date", Local::now().format("%Y.%m.%d").to_string()),
        ("Round", "-".to_owned()),
        ("White", info.white.to_owned()),
        ("Black", info.black.to_owned()),
        ("Result", result.to_owned()),
        ("TimeControl", info.time_control.to_owned()),
    ];

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.push(("SetUp", "1".to_owned()));
        headers.push(("FEN", initial_fen));
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut move_number = initial_state.fullmove_number;
    let mut mover = initial_state.side_to_move;
    let mut movetext_parts = Vec::<String>::with_capacity(san_history.len() + 1);
    for (index, san) in san_history.iter().enumerate() {
        match mover {
            Color::White => movetext_parts.push(format!("{move_number}. {san}")),
            Color::Black => {
                if index == 0 {
                    movetext_parts.push(format!("{move_number}... {san}"));
                } else {
                    movetext_parts.push(san.clone());
                }
                move_number += 1;
            }
        }
        mover = mover.opposite();
    }

    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Result token for a status/winner pair. `winner` decides decisive games;
/// a terminal status without a recorded winner falls back to "*".
pub fn result_token(status: GameStatus, winner: Option<Color>) -> &'static str {
    match status {
        GameStatus::Checkmate | GameStatus::Timeout(_) => match winner {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "*",
        },
        GameStatus::Stalemate | GameStatus::Draw => "1/2-1/2",
        GameStatus::Playing | GameStatus::Check => "*",
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{result_token, write_pgn, PgnHeaderInfo};
    use crate::evaluation::position_status::GameStatus;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    fn sans(moves: &[&str]) -> Vec<String> {
        moves.iter().map(|m| (*m).to_owned()).collect()
    }

    #[test]
    fn standard_game_numbers_white_moves() {
        let pgn = write_pgn(
            &GameState::new_game(),
            &sans(&["e4", "e5", "Nf3", "Nc6"]),
            &PgnHeaderInfo {
                white: "Player",
                black: "Computer",
                time_control: "600",
                result: "*",
            },
        );

        assert!(pgn.starts_with("[Event \"Tempo Chess Game\"]\n[Site \"Local\"]\n[Date \""));
        assert!(pgn.contains("[White \"Player\"]\n[Black \"Computer\"]\n[Result \"*\"]"));
        assert!(pgn.contains("[TimeControl \"600\"]"));
        assert!(!pgn.contains("[SetUp"));
        assert!(pgn.ends_with("\n1. e4 e5 2. Nf3 Nc6 *\n"));
    }

    #[test]
    fn custom_start_gets_setup_headers_and_ellipsis_numbering() {
        let initial =
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .expect("FEN should parse");
        let pgn = write_pgn(
            &initial,
            &sans(&["e5", "Nf3"]),
            &PgnHeaderInfo {
                white: "White",
                black: "Black",
                time_control: "-",
                result: "1-0",
            },
        );

        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(
            "[FEN \"rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\"]"
        ));
        assert!(pgn.ends_with("\n1... e5 2. Nf3 1-0\n"));
    }

    #[test]
    fn unknown_result_strings_become_unterminated() {
        let pgn = write_pgn(
            &GameState::new_game(),
            &sans(&[]),
            &PgnHeaderInfo {
                white: "White",
                black: "Black",
                time_control: "300",
                result: "resigned",
            },
        );
        assert!(pgn.contains("[Result \"*\"]"));
        assert!(pgn.ends_with("\n*\n"));
    }

    #[test]
    fn result_tokens_follow_status_and_winner() {
        assert_eq!(result_token(GameStatus::Checkmate, Some(Color::White)), "1-0");
        assert_eq!(result_token(GameStatus::Checkmate, Some(Color::Black)), "0-1");
        assert_eq!(
            result_token(GameStatus::Timeout(Color::White), Some(Color::Black)),
            "0-1"
        );
        assert_eq!(result_token(GameStatus::Stalemate, None), "1/2-1/2");
        assert_eq!(result_token(GameStatus::Draw, None), "1/2-1/2");
        assert_eq!(result_token(GameStatus::Playing, None), "*");
    }
}
