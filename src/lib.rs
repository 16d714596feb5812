//! Crate root module declarations for the Tempo Chess project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! position evaluation, the game session, move suggestion, and utility
//! helpers) so the binary, tests, and external tooling can import stable
//! module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod evaluation {
    pub mod insufficient_material;
    pub mod position_status;
}

pub mod session {
    pub mod clock;
    pub mod errors;
    pub mod game_session;
    pub mod history;
}

pub mod suggestion {
    pub mod commentary;
    pub mod move_source;
    pub mod orchestrator;
    pub mod random_source;
}

pub mod cli {
    pub mod repl;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod standard_algebraic;
}
