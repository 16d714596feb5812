//! Move-source collaborator contract.
//!
//! A move source receives the current position as FEN and answers with a
//! coordinate move string. The DTOs pin the JSON field names of the external
//! protocol; the orchestrator treats any error or unparsable answer as a
//! failure and recovers with a random legal move.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub fen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Coordinate move, 4 or 5 characters ("e7e5", "a2a1q").
    #[serde(rename = "move")]
    pub coordinate_move: String,
    /// Resulting FEN as the source sees it. Informational only; the session
    /// recomputes the position locally rather than trusting it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_fen: Option<String>,
}

pub trait MoveSource: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Produces a move suggestion for the requested position. Errors are
    /// free-form text describing what the source could not do.
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<SuggestionResponse, String>;
}
