//! The game session state machine.
//!
//! Owns the authoritative board, the move history, the status, and the
//! clock. Every move, human or suggested, enters through the same legality
//! check; an operation either completes fully or leaves the session
//! untouched. The session is not internally synchronized: the owning loop
//! serializes all mutation (the orchestrator applies results only through
//! `poll` on that loop).

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::evaluation::position_status::{draw_reason, evaluate_status, GameStatus};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::{
    move_captured_piece, move_from, move_promotion_piece, move_to,
};
use crate::session::clock::{format_remaining, ChessClock, GameMode};
use crate::session::errors::{SessionError, SessionResult};
use crate::session::history::{captured_by, HistoryEntry};
use crate::utils::long_algebraic::{
    long_algebraic_to_move_description, move_description_to_long_algebraic,
};
use crate::utils::pgn::{result_token, write_pgn, PgnHeaderInfo};
use crate::utils::render_game_state::{piece_to_unicode, render_game_state};
use crate::utils::standard_algebraic::move_to_san;

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub player_color: Color,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            mode: GameMode::default(),
            player_color: Color::White,
        }
    }
}

/// Summary of a successfully applied move.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    pub san: String,
    pub lan: String,
    pub fen_after: String,
    pub status: GameStatus,
    pub captured: Option<PieceKind>,
    pub gives_check: bool,
}

pub struct GameSession {
    board: GameState,
    initial_state: GameState,
    initial_status: GameStatus,
    history: Vec<HistoryEntry>,
    status: GameStatus,
    clock: ChessClock,
    config: SessionConfig,
    resigned_by: Option<Color>,
    generation: u64,
    selected: Option<Square>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> GameSession {
        let initial_state = GameState::new_game();
        GameSession {
            board: initial_state.clone(),
            initial_state,
            initial_status: GameStatus::Playing,
            history: Vec::new(),
            status: GameStatus::Playing,
            clock: ChessClock::new(config.mode),
            config,
            resigned_by: None,
            generation: 0,
            selected: None,
        }
    }

    /// Session over a custom starting position. The position is evaluated up
    /// front, so a session can begin already in check or even already over.
    pub fn from_fen(fen: &str, config: SessionConfig) -> SessionResult<GameSession> {
        let initial_state = GameState::from_fen(fen).map_err(|message| SessionError::Format {
            message,
        })?;
        let initial_status = evaluate_status(&initial_state).map_err(core_error)?;

        let mut session = GameSession {
            board: initial_state.clone(),
            initial_state,
            initial_status,
            history: Vec::new(),
            status: initial_status,
            clock: ChessClock::new(config.mode),
            config,
            resigned_by: None,
            generation: 0,
            selected: None,
        };
        if session.status.is_terminal() {
            session.clock.stop();
        }
        Ok(session)
    }

    pub fn board(&self) -> &GameState {
        &self.board
    }

    pub fn current_fen(&self) -> String {
        self.board.get_fen()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move
    }

    pub fn is_player_turn(&self) -> bool {
        self.board.side_to_move == self.config.player_color
    }

    pub fn player_color(&self) -> Color {
        self.config.player_color
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Plies played in this session (not the position's own ply counter,
    /// which a custom FEN may start beyond zero).
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn remaining_time(&self, color: Color) -> Option<u64> {
        self.clock.remaining(color)
    }

    pub fn captured_pieces(&self, color: Color) -> Vec<PieceKind> {
        captured_by(&self.history, color)
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Pure UI selection state; never validated against occupancy.
    pub fn select(&mut self, square: Option<Square>) {
        self.selected = square;
    }

    /// Applies the move `from`→`to` if it is legal in the current position.
    /// On failure the session is unchanged.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> SessionResult<AppliedMove> {
        if self.status.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let legal_moves = LegalMoveGenerator
            .generate_legal_moves(&self.board)
            .map_err(core_error)?;
        let chosen = legal_moves
            .iter()
            .find(|generated| {
                let mv = generated.move_description;
                move_from(mv) == from && move_to(mv) == to && move_promotion_piece(mv) == promotion
            })
            .ok_or_else(|| SessionError::IllegalMove {
                lan: coordinate_text(from, to, promotion),
            })?;

        let move_description = chosen.move_description;
        let san = move_to_san(chosen, &legal_moves).map_err(|message| {
            SessionError::InvalidState { message }
        })?;
        let lan = move_description_to_long_algebraic(move_description, &self.board)
            .map_err(|message| SessionError::InvalidState { message })?;
        let next_board = chosen.game_after_move.clone();
        let next_status = evaluate_status(&next_board).map_err(core_error)?;
        let summary = AppliedMove {
            san: san.clone(),
            lan: lan.clone(),
            fen_after: next_board.get_fen(),
            status: next_status,
            captured: move_captured_piece(move_description),
            gives_check: chosen.annotations.gives_check,
        };

        self.board = next_board;
        self.history.push(HistoryEntry {
            move_description,
            lan,
            san: san.clone(),
            state_after: self.board.clone(),
        });
        self.status = next_status;
        self.selected = None;
        debug!("[SESSION] Applied {}: status={}", san, next_status.name());
        if next_status.is_terminal() {
            self.clock.stop();
            info!("[SESSION] Game over: {}", self.describe_status());
        }

        Ok(summary)
    }

    /// Coordinate-string entry point shared by the CLI and the orchestrator.
    pub fn apply_coordinate_move(&mut self, text: &str) -> SessionResult<AppliedMove> {
        if self.status.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let mv = long_algebraic_to_move_description(text.trim(), &self.board)
            .map_err(|message| SessionError::Format { message })?;

        self.apply_move(move_from(mv), move_to(mv), move_promotion_piece(mv))
    }

    /// Pops the last move; when that leaves the engine's side to move, pops
    /// one more so control returns to the human. Undoing out of a terminal
    /// status revives the game.
    pub fn undo(&mut self) -> SessionResult<()> {
        if self.history.is_empty() {
            return Err(SessionError::NoHistory);
        }

        self.history.pop();
        let mut restored = self.state_at_cursor().clone();
        if restored.side_to_move != self.config.player_color && !self.history.is_empty() {
            self.history.pop();
            restored = self.state_at_cursor().clone();
        }

        let status = evaluate_status(&restored).map_err(core_error)?;
        self.board = restored;
        self.status = status;
        self.resigned_by = None;
        self.selected = None;
        if !status.is_terminal() {
            self.clock.resume();
        }
        debug!(
            "[SESSION] Undo to ply {}: status={}",
            self.history.len(),
            status.name()
        );
        Ok(())
    }

    /// Returns the session to its starting position. Always succeeds, even
    /// from a terminal status.
    pub fn reset(&mut self) {
        self.board = self.initial_state.clone();
        self.history.clear();
        self.status = self.initial_status;
        self.clock = ChessClock::new(self.config.mode);
        if self.status.is_terminal() {
            self.clock.stop();
        }
        self.resigned_by = None;
        self.selected = None;
        self.generation += 1;
        debug!("[SESSION] Reset (generation {})", self.generation);
    }

    pub fn change_mode(&mut self, mode: GameMode) {
        self.config.mode = mode;
        self.reset();
        info!("[SESSION] Mode changed to {}", mode.name());
    }

    /// Concedes on behalf of `side`. The session ends as if `side` were
    /// mated, and the resignation is recorded for display.
    pub fn resign(&mut self, side: Color) -> SessionResult<()> {
        if self.status.is_terminal() {
            return Err(SessionError::GameOver);
        }

        self.status = GameStatus::Checkmate;
        self.resigned_by = Some(side);
        self.clock.stop();
        info!("[SESSION] {} resigned", side.name());
        Ok(())
    }

    /// One-second clock tick against the side to move. The owning loop calls
    /// this once per elapsed second.
    pub fn tick(&mut self) {
        if self.status.is_terminal() {
            return;
        }

        let side = self.board.side_to_move;
        if self.clock.tick(side) {
            self.status = GameStatus::Timeout(side);
            info!("[SESSION] {} flag fell", side.name());
        }
    }

    /// Winner of a decided game. Timeout and resignation award the other
    /// side; checkmate awards the side that delivered it.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Timeout(flagged) => Some(flagged.opposite()),
            GameStatus::Checkmate => match self.resigned_by {
                Some(resigned) => Some(resigned.opposite()),
                None => Some(self.board.side_to_move.opposite()),
            },
            _ => None,
        }
    }

    pub fn resigned_by(&self) -> Option<Color> {
        self.resigned_by
    }

    /// Legal destinations for every occupied origin square. Empty once the
    /// game is over.
    pub fn legal_destination_map(&self) -> SessionResult<BTreeMap<Square, Vec<Square>>> {
        let mut map = BTreeMap::new();
        if self.status.is_terminal() {
            return Ok(map);
        }

        let legal_moves = LegalMoveGenerator
            .generate_legal_moves(&self.board)
            .map_err(core_error)?;
        for generated in &legal_moves {
            let mv = generated.move_description;
            map.entry(move_from(mv))
                .or_insert_with(Vec::new)
                .push(move_to(mv));
        }
        Ok(map)
    }

    /// Legal destinations from one square; empty when the square has none.
    pub fn destinations_from(&self, from: Square) -> SessionResult<Vec<Square>> {
        if self.status.is_terminal() {
            return Ok(Vec::new());
        }

        let moves = LegalMoveGenerator
            .generate_legal_moves_from(&self.board, from)
            .map_err(core_error)?;
        Ok(moves
            .iter()
            .map(|generated| move_to(generated.move_description))
            .collect())
    }

    /// Human-oriented status line, with winner and draw reason spelled out.
    pub fn describe_status(&self) -> String {
        if let Some(resigned) = self.resigned_by {
            return format!("resignation, {} wins", resigned.opposite().name());
        }

        match self.status {
            GameStatus::Checkmate => match self.winner() {
                Some(color) => format!("checkmate, {} wins", color.name()),
                None => "checkmate".to_owned(),
            },
            GameStatus::Draw => match draw_reason(&self.board) {
                Some(kind) => format!("draw ({})", kind.name()),
                None => "draw".to_owned(),
            },
            GameStatus::Timeout(flagged) => format!("timeout, {} flag fell", flagged.name()),
            other => other.name().to_owned(),
        }
    }

    /// Board plus side-to-move, status, clocks, and captured pieces.
    pub fn render(&self) -> String {
        let mut out = render_game_state(&self.board);
        out.push_str("\n\n");
        if self.status.is_terminal() {
            out.push_str(&format!("Game over: {}\n", self.describe_status()));
        } else {
            out.push_str(&format!(
                "{} to move ({})\n",
                self.board.side_to_move.name(),
                self.status.name()
            ));
        }
        out.push_str(&format!(
            "Clock: White {}, Black {}\n",
            format_remaining(self.clock.remaining(Color::White)),
            format_remaining(self.clock.remaining(Color::Black))
        ));

        for color in [Color::White, Color::Black] {
            let captured = self.captured_pieces(color);
            if captured.is_empty() {
                continue;
            }
            let glyphs: Vec<String> = captured
                .iter()
                .map(|piece| piece_to_unicode(color.opposite(), *piece).to_string())
                .collect();
            out.push_str(&format!(
                "Captured by {}: {}\n",
                color.name(),
                glyphs.join(" ")
            ));
        }

        out
    }

    pub fn export_pgn(&self) -> String {
        let (white, black) = match self.config.player_color {
            Color::White => ("Player", "Computer"),
            Color::Black => ("Computer", "Player"),
        };
        let sans: Vec<String> = self.history.iter().map(|entry| entry.san.clone()).collect();
        write_pgn(
            &self.initial_state,
            &sans,
            &PgnHeaderInfo {
                white,
                black,
                time_control: self.config.mode.time_control_field(),
                result: result_token(self.status, self.winner()),
            },
        )
    }

    fn state_at_cursor(&self) -> &GameState {
        match self.history.last() {
            Some(entry) => &entry.state_after,
            None => &self.initial_state,
        }
    }
}

fn core_error(err: MoveGenerationError) -> SessionError {
    SessionError::InvalidState {
        message: err.to_string(),
    }
}

fn coordinate_text(from: Square, to: Square, promotion: Option<PieceKind>) -> String {
    use crate::utils::algebraic::square_to_algebraic;

    let mut text = format!(
        "{}{}",
        square_to_algebraic(from).unwrap_or_else(|_| "??".to_owned()),
        square_to_algebraic(to).unwrap_or_else(|_| "??".to_owned()),
    );
    if let Some(piece) = promotion {
        text.push(match piece {
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            _ => '?',
        });
    }
    text
}
