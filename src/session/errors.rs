//! Error types for the game session boundary.
//!
//! Everything the session rejects is recoverable: the caller is told why and
//! the session is left unchanged. Only `InvalidState` signals a rules-core
//! inconsistency, and it is propagated rather than swallowed.

use thiserror::Error;

/// Errors that can occur when driving a game session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Move rejected by the legality check
    #[error("Illegal move: {lan}")]
    IllegalMove { lan: String },

    /// Session is in a terminal status and cannot accept the operation
    #[error("Game is already over")]
    GameOver,

    /// Malformed FEN, square, or move string
    #[error("Malformed input: {message}")]
    Format { message: String },

    /// Undo requested with no moves played
    #[error("No move history to undo")]
    NoHistory,

    /// Rules core reported an inconsistency
    #[error("Invalid game state: {message}")]
    InvalidState { message: String },
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
