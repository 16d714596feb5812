//! Line-oriented terminal front-end.
//!
//! The loop owns the session and the suggestion orchestrator. Helper threads
//! feed it: one reads stdin lines into the command channel, one drains the
//! output channel to the terminal. Each [`Repl::tick`] handles at most one
//! command, ticks the clock for every whole elapsed second, and polls the
//! orchestrator, so all session mutation happens on this one loop.

use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::game_state::chess_types::{Color, Square};
use crate::session::clock::{format_remaining, GameMode};
use crate::session::game_session::{AppliedMove, GameSession};
use crate::suggestion::commentary::{pick_commentary, CommentaryContext};
use crate::suggestion::orchestrator::{SuggestionOrchestrator, SuggestionOutcome};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

const HELP_TEXT: &str = "\
Commands:
  move <from><to>[promotion]    play a move, e.g. move e2e4 or move a7a8q
  undo                          take back the last move
  reset                         start the game over
  mode <blitz|rapid|unlimited>  change the time control (starts a new game)
  legal [square]                list legal moves, optionally from one square
  select [square]               mark a square; no argument clears the mark
  fen                           print the position as FEN
  show                          print the board
  history                       print the moves played so far
  pgn                           print the game as PGN
  clock                         print the remaining time
  resign                        concede the game
  status                        print whose turn it is and the game status
  help                          print this list
  quit                          leave the program";

pub struct Repl {
    session: GameSession,
    orchestrator: SuggestionOrchestrator,
    command_rx: Receiver<String>,
    output_tx: Sender<String>,
    commentary_rng: StdRng,
    last_tick: Instant,
    running: bool,
}

impl Repl {
    pub fn new(
        session: GameSession,
        orchestrator: SuggestionOrchestrator,
        command_rx: Receiver<String>,
        output_tx: Sender<String>,
    ) -> Repl {
        Repl {
            session,
            orchestrator,
            command_rx,
            output_tx,
            commentary_rng: StdRng::from_os_rng(),
            last_tick: Instant::now(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn greet(&mut self) {
        let player = self.session.player_color();
        self.give_line(format!(
            "Welcome to Tempo Chess! You play {}; the computer answers.",
            player.name()
        ));
        let board = self.session.render();
        self.give_line(board);
        self.give_line("Type 'help' for the command list.");
    }

    /// One cooperative step: at most one command, the elapsed clock seconds,
    /// one orchestrator poll.
    pub fn tick(&mut self) {
        if let Ok(line) = self.command_rx.try_recv() {
            self.handle_command(&line);
        }
        self.tick_clock();
        self.pump_suggestions();
    }

    fn tick_clock(&mut self) {
        let whole_seconds = self.last_tick.elapsed().as_secs();
        if whole_seconds == 0 {
            return;
        }
        self.last_tick += Duration::from_secs(whole_seconds);

        let was_over = self.session.is_over();
        for _ in 0..whole_seconds {
            self.session.tick();
        }
        if !was_over && self.session.is_over() {
            let line = format!("Game over: {}", self.session.describe_status());
            self.give_line(line);
        }
    }

    fn pump_suggestions(&mut self) {
        match self.orchestrator.poll(&mut self.session) {
            SuggestionOutcome::Idle
            | SuggestionOutcome::Thinking
            | SuggestionOutcome::Discarded => {}
            SuggestionOutcome::Applied { applied, .. } => self.announce_computer_move(&applied),
            SuggestionOutcome::Abandoned { failure } => {
                self.give_line(format!("The computer cannot move: {}", failure));
            }
        }

        if !self.session.is_over()
            && !self.session.is_player_turn()
            && !self.orchestrator.is_thinking()
        {
            self.orchestrator.request(&self.session);
        }
    }

    fn handle_command(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        debug!("[CLI] {}", trimmed);

        let mut words = trimmed.split_whitespace();
        let Some(command) = words.next() else {
            return;
        };
        let argument = words.next();

        match command {
            "move" => match argument {
                Some(text) => self.command_move(text),
                None => self.give_line("Usage: move <from><to>[promotion], e.g. move e2e4"),
            },
            "undo" => self.command_undo(),
            "reset" => self.command_reset(),
            "mode" => match argument {
                Some(name) => self.command_mode(name),
                None => self.give_line("Usage: mode <blitz|rapid|unlimited>"),
            },
            "legal" => self.command_legal(argument),
            "select" => self.command_select(argument),
            "fen" => {
                let fen = self.session.current_fen();
                self.give_line(fen);
            }
            "show" => {
                let board = self.session.render();
                self.give_line(board);
            }
            "history" => self.command_history(),
            "pgn" => {
                let pgn = self.session.export_pgn();
                self.give_line(pgn);
            }
            "clock" => self.command_clock(),
            "resign" => self.command_resign(),
            "status" => self.command_status(),
            "help" => self.give_line(HELP_TEXT),
            "quit" => {
                self.running = false;
                self.give_line("Goodbye!");
            }
            other => {
                self.give_line(format!(
                    "Unknown command: {}. Type 'help' for the list.",
                    other
                ));
            }
        }
    }

    fn command_move(&mut self, text: &str) {
        if !self.session.is_over() && !self.session.is_player_turn() {
            self.give_line("It is not your turn.");
            return;
        }

        match self.session.apply_coordinate_move(text) {
            Ok(applied) => {
                self.give_line(format!("You played {}.", applied.san));
                let board = self.session.render();
                self.give_line(board);
                if applied.status.is_terminal() {
                    let line = format!("Game over: {}", self.session.describe_status());
                    self.give_line(line);
                }
            }
            Err(err) => self.give_line(err.to_string()),
        }
    }

    fn command_undo(&mut self) {
        // A pending suggestion was computed for the position being undone.
        self.orchestrator.cancel();
        match self.session.undo() {
            Ok(()) => {
                self.give_line("Took back the last move.");
                let board = self.session.render();
                self.give_line(board);
            }
            Err(err) => self.give_line(err.to_string()),
        }
    }

    fn command_reset(&mut self) {
        self.orchestrator.cancel();
        self.session.reset();
        self.give_line("Fresh game, fresh opportunities!");
        let board = self.session.render();
        self.give_line(board);
    }

    fn command_mode(&mut self, name: &str) {
        match GameMode::from_name(name) {
            Some(mode) => {
                self.orchestrator.cancel();
                self.session.change_mode(mode);
                self.give_line(format!("Mode set to {}.", mode.name()));
                self.give_line("Fresh game, fresh opportunities!");
                let board = self.session.render();
                self.give_line(board);
            }
            None => {
                self.give_line(format!(
                    "Unknown mode: {}. Choose blitz, rapid, or unlimited.",
                    name
                ));
            }
        }
    }

    fn command_legal(&mut self, argument: Option<&str>) {
        match argument {
            Some(square_text) => match algebraic_to_square(square_text) {
                Ok(square) => match self.session.destinations_from(square) {
                    Ok(destinations) if destinations.is_empty() => {
                        self.give_line(format!("No legal moves from {}.", square_text));
                    }
                    Ok(destinations) => {
                        self.give_line(format!(
                            "{}: {}",
                            square_text,
                            join_squares(&destinations)
                        ));
                    }
                    Err(err) => self.give_line(err.to_string()),
                },
                Err(message) => self.give_line(message),
            },
            None => match self.session.legal_destination_map() {
                Ok(map) if map.is_empty() => self.give_line("No legal moves."),
                Ok(map) => {
                    let lines: Vec<String> = map
                        .iter()
                        .map(|(from, destinations)| {
                            format!("  {}: {}", square_label(*from), join_squares(destinations))
                        })
                        .collect();
                    self.give_line(format!("Legal moves:\n{}", lines.join("\n")));
                }
                Err(err) => self.give_line(err.to_string()),
            },
        }
    }

    fn command_select(&mut self, argument: Option<&str>) {
        match argument {
            Some(square_text) => match algebraic_to_square(square_text) {
                Ok(square) => {
                    self.session.select(Some(square));
                    match self.session.destinations_from(square) {
                        Ok(destinations) if destinations.is_empty() => {
                            self.give_line(format!(
                                "Selected {} (no legal moves from there).",
                                square_text
                            ));
                        }
                        Ok(destinations) => {
                            self.give_line(format!(
                                "Selected {} (targets: {}).",
                                square_text,
                                join_squares(&destinations)
                            ));
                        }
                        Err(err) => self.give_line(err.to_string()),
                    }
                }
                Err(message) => self.give_line(message),
            },
            None => {
                self.session.select(None);
                self.give_line("Selection cleared.");
            }
        }
    }

    fn command_history(&mut self) {
        if self.session.history().is_empty() {
            self.give_line("No moves played yet.");
            return;
        }

        let lines: Vec<String> = self
            .session
            .history()
            .iter()
            .map(|entry| {
                let mover = entry.state_after.side_to_move.opposite();
                match mover {
                    Color::White => {
                        format!("  {}. {}", entry.state_after.fullmove_number, entry.san)
                    }
                    Color::Black => {
                        format!("  {}... {}", entry.state_after.fullmove_number - 1, entry.san)
                    }
                }
            })
            .collect();
        self.give_line(lines.join("\n"));
    }

    fn command_clock(&mut self) {
        let line = format!(
            "White {}, Black {}",
            format_remaining(self.session.remaining_time(Color::White)),
            format_remaining(self.session.remaining_time(Color::Black))
        );
        self.give_line(line);
    }

    fn command_resign(&mut self) {
        let player = self.session.player_color();
        match self.session.resign(player) {
            Ok(()) => {
                self.give_line("You resigned. Good game!");
                let line = format!("Game over: {}", self.session.describe_status());
                self.give_line(line);
            }
            Err(err) => self.give_line(err.to_string()),
        }
    }

    fn command_status(&mut self) {
        let line = if self.session.is_over() {
            format!("Game over: {}", self.session.describe_status())
        } else {
            format!(
                "{} to move ({})",
                self.session.side_to_move().name(),
                self.session.status().name()
            )
        };
        self.give_line(line);
        if self.orchestrator.is_thinking() {
            self.give_line("The computer is thinking...");
        }
    }

    fn announce_computer_move(&mut self, applied: &AppliedMove) {
        self.give_line(format!("Computer plays {} ({}).", applied.san, applied.lan));
        let context = CommentaryContext {
            ply: self.session.ply(),
            captured: applied.captured,
            gives_check: applied.gives_check,
        };
        if let Some(line) = pick_commentary(&mut self.commentary_rng, &context) {
            self.give_line(format!("Computer: \"{}\"", line));
        }
        let board = self.session.render();
        self.give_line(board);
        if applied.status.is_terminal() {
            let line = format!("Game over: {}", self.session.describe_status());
            self.give_line(line);
        }
    }

    fn give_line(&mut self, line: impl Into<String>) {
        let _ = self.output_tx.send(line.into());
    }
}

fn square_label(square: Square) -> String {
    square_to_algebraic(square).unwrap_or_else(|_| "??".to_owned())
}

fn join_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|square| square_label(*square))
        .collect::<Vec<String>>()
        .join(" ")
}
