//! Asynchronous move-suggestion pipeline.
//!
//! The orchestrator owns a worker thread that holds the [`MoveSource`]. A
//! request carries the position FEN plus a cosmetic think delay; the worker
//! sleeps, asks the source, and sends the answer back over a channel. The
//! owning loop calls [`SuggestionOrchestrator::poll`] each iteration to apply
//! whatever arrived.
//!
//! Stale results are filtered twice: a ticket matches replies to the one
//! request currently in flight, and a session generation (bumped on every
//! reset) discards answers computed for a game that no longer exists. Any
//! failure past those guards, a source error, malformed or illegal move text,
//! the hard timeout, a dead worker, degrades to a uniformly random legal move
//! so the game keeps going.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, warn};

use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};
use crate::session::errors::SessionError;
use crate::session::game_session::{AppliedMove, GameSession};
use crate::suggestion::move_source::{MoveSource, SuggestionRequest, SuggestionResponse};
use crate::suggestion::random_source::LocalRandomSource;

#[derive(Debug, Clone, Copy)]
pub struct SuggestionConfig {
    /// Inclusive bounds in milliseconds for the cosmetic think delay.
    pub think_delay_ms: (u64, u64),
    /// Budget for the source itself, measured after the think delay.
    pub hard_timeout_ms: u64,
    /// Fixed seed for the delay RNG; `None` seeds from the OS.
    pub delay_seed: Option<u64>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            think_delay_ms: (1_000, 3_000),
            hard_timeout_ms: 10_000,
            delay_seed: None,
        }
    }
}

/// Ways a suggestion can fail before the random-move fallback takes over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionFailure {
    /// The source itself reported an error.
    #[error("move source failed: {0}")]
    SourceError(String),
    /// The answer was not parsable as a coordinate move.
    #[error("malformed move text: {0}")]
    MalformedMove(String),
    /// The answer parsed but the session refused it.
    #[error("suggested move rejected: {0}")]
    RejectedMove(String),
    /// No answer arrived inside the deadline.
    #[error("suggestion timed out")]
    HardTimeout,
    /// The worker thread is gone.
    #[error("suggestion worker is gone")]
    WorkerLost,
}

/// What one call to [`SuggestionOrchestrator::poll`] did.
#[derive(Debug)]
pub enum SuggestionOutcome {
    /// No request in flight.
    Idle,
    /// The request is still pending.
    Thinking,
    /// A move was applied to the session. `via_fallback` names the failure
    /// the random fallback papered over, `None` when the source answered.
    Applied {
        applied: AppliedMove,
        via_fallback: Option<SuggestionFailure>,
    },
    /// The answer belonged to a game that was reset or has ended.
    Discarded,
    /// The suggestion failed and no fallback move could be played.
    Abandoned { failure: SuggestionFailure },
}

struct WorkerRequest {
    ticket: u64,
    generation: u64,
    think_delay: Duration,
    request: SuggestionRequest,
}

struct WorkerReply {
    ticket: u64,
    generation: u64,
    result: Result<SuggestionResponse, String>,
}

#[derive(Clone, Copy)]
struct InFlight {
    ticket: u64,
    generation: u64,
    deadline: Instant,
}

pub struct SuggestionOrchestrator {
    request_tx: Sender<WorkerRequest>,
    reply_rx: Receiver<WorkerReply>,
    config: SuggestionConfig,
    delay_rng: StdRng,
    next_ticket: u64,
    in_flight: Option<InFlight>,
}

impl SuggestionOrchestrator {
    pub fn new(source: Box<dyn MoveSource>, config: SuggestionConfig) -> SuggestionOrchestrator {
        let (request_tx, request_rx) = channel::<WorkerRequest>();
        let (reply_tx, reply_rx) = channel::<WorkerReply>();
        thread::spawn(move || worker_loop(source, request_rx, reply_tx));

        let delay_rng = match config.delay_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        SuggestionOrchestrator {
            request_tx,
            reply_rx,
            config,
            delay_rng,
            next_ticket: 0,
            in_flight: None,
        }
    }

    /// Orchestrator over the built-in random source.
    pub fn local_random(config: SuggestionConfig) -> SuggestionOrchestrator {
        SuggestionOrchestrator::new(Box::new(LocalRandomSource), config)
    }

    pub fn is_thinking(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Asks the source for a move in the session's current position. Refused
    /// while a request is already in flight or once the game is over. Even if
    /// the worker is gone the request is accepted; [`poll`] recovers with the
    /// random fallback.
    ///
    /// [`poll`]: SuggestionOrchestrator::poll
    pub fn request(&mut self, session: &GameSession) -> bool {
        if self.in_flight.is_some() || session.is_over() {
            return false;
        }

        let (low, high) = self.config.think_delay_ms;
        let delay_ms = if low < high {
            self.delay_rng.random_range(low..=high)
        } else {
            high
        };
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let generation = session.generation();
        let work = WorkerRequest {
            ticket,
            generation,
            think_delay: Duration::from_millis(delay_ms),
            request: SuggestionRequest {
                fen: session.current_fen(),
                depth: None,
                movetime_ms: Some(self.config.hard_timeout_ms),
            },
        };
        debug!(
            "[SUGGEST] Request {} (generation {}, delay {}ms)",
            ticket, generation, delay_ms
        );
        if self.request_tx.send(work).is_err() {
            warn!("[SUGGEST] Worker channel closed; fallback will answer");
        }

        self.in_flight = Some(InFlight {
            ticket,
            generation,
            deadline: Instant::now()
                + Duration::from_millis(delay_ms)
                + Duration::from_millis(self.config.hard_timeout_ms),
        });
        true
    }

    /// Drops the pending request, if any. A reply already underway is drained
    /// by ticket mismatch on a later poll.
    pub fn cancel(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("[SUGGEST] Cancelled pending suggestion");
        }
    }

    /// Applies whatever the worker has delivered. Non-blocking; call it every
    /// loop iteration.
    pub fn poll(&mut self, session: &mut GameSession) -> SuggestionOutcome {
        let Some(flight) = self.in_flight else {
            // Keep the channel empty while idle.
            while self.reply_rx.try_recv().is_ok() {}
            return SuggestionOutcome::Idle;
        };

        loop {
            match self.reply_rx.try_recv() {
                Ok(reply) if reply.ticket != flight.ticket => {
                    debug!("[SUGGEST] Dropped stale reply {}", reply.ticket);
                }
                Ok(reply) => {
                    self.in_flight = None;
                    if reply.generation != session.generation() || session.is_over() {
                        debug!("[SUGGEST] Discarded reply {} for a dead game", reply.ticket);
                        return SuggestionOutcome::Discarded;
                    }
                    return match reply.result {
                        Ok(response) => {
                            match session.apply_coordinate_move(&response.coordinate_move) {
                                Ok(applied) => {
                                    debug!("[SUGGEST] Source played {}", applied.san);
                                    SuggestionOutcome::Applied {
                                        applied,
                                        via_fallback: None,
                                    }
                                }
                                Err(SessionError::Format { message }) => self
                                    .fallback(session, SuggestionFailure::MalformedMove(message)),
                                Err(err) => self.fallback(
                                    session,
                                    SuggestionFailure::RejectedMove(err.to_string()),
                                ),
                            }
                        }
                        Err(message) => {
                            self.fallback(session, SuggestionFailure::SourceError(message))
                        }
                    };
                }
                Err(TryRecvError::Empty) => {
                    if Instant::now() >= flight.deadline {
                        self.in_flight = None;
                        if flight.generation != session.generation() || session.is_over() {
                            return SuggestionOutcome::Discarded;
                        }
                        return self.fallback(session, SuggestionFailure::HardTimeout);
                    }
                    return SuggestionOutcome::Thinking;
                }
                Err(TryRecvError::Disconnected) => {
                    self.in_flight = None;
                    if flight.generation != session.generation() || session.is_over() {
                        return SuggestionOutcome::Discarded;
                    }
                    return self.fallback(session, SuggestionFailure::WorkerLost);
                }
            }
        }
    }

    /// Plays a uniformly random legal move so a source failure never stalls
    /// the game.
    fn fallback(
        &mut self,
        session: &mut GameSession,
        failure: SuggestionFailure,
    ) -> SuggestionOutcome {
        warn!("[SUGGEST] {}; picking a random legal move", failure);
        let moves = match FastLegalMoveGenerator.generate_legal_moves(session.board()) {
            Ok(moves) => moves,
            Err(err) => {
                warn!("[SUGGEST] Fallback generation failed: {}", err);
                return SuggestionOutcome::Abandoned { failure };
            }
        };
        let Some(generated) = moves.iter().choose(&mut rand::rng()) else {
            return SuggestionOutcome::Abandoned { failure };
        };

        let mv = generated.move_description;
        match session.apply_move(move_from(mv), move_to(mv), move_promotion_piece(mv)) {
            Ok(applied) => SuggestionOutcome::Applied {
                applied,
                via_fallback: Some(failure),
            },
            Err(err) => {
                warn!("[SUGGEST] Fallback move rejected: {}", err);
                SuggestionOutcome::Abandoned { failure }
            }
        }
    }
}

fn worker_loop(
    mut source: Box<dyn MoveSource>,
    requests: Receiver<WorkerRequest>,
    replies: Sender<WorkerReply>,
) {
    while let Ok(work) = requests.recv() {
        thread::sleep(work.think_delay);
        let result = source.suggest(&work.request);
        let reply = WorkerReply {
            ticket: work.ticket,
            generation: work.generation,
            result,
        };
        if replies.send(reply).is_err() {
            break;
        }
    }
    debug!("[SUGGEST] Worker stopped");
}
