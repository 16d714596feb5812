//! Per-side game clock driven by one-second ticks.
//!
//! The clock never watches wall time itself. The owning loop accumulates
//! elapsed seconds and calls `tick` for the side to move; the clock reports
//! when a flag falls and stops itself. Unlimited mode never decrements.

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    Blitz,
    #[default]
    Rapid,
    Unlimited,
}

impl GameMode {
    /// Starting allotment per side in seconds, `None` for unlimited.
    pub fn allotment_seconds(&self) -> Option<u64> {
        match self {
            GameMode::Blitz => Some(300),
            GameMode::Rapid => Some(600),
            GameMode::Unlimited => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Blitz => "blitz",
            GameMode::Rapid => "rapid",
            GameMode::Unlimited => "unlimited",
        }
    }

    /// PGN TimeControl header value.
    pub fn time_control_field(&self) -> &'static str {
        match self {
            GameMode::Blitz => "300",
            GameMode::Rapid => "600",
            GameMode::Unlimited => "-",
        }
    }

    pub fn from_name(name: &str) -> Option<GameMode> {
        match name {
            "blitz" => Some(GameMode::Blitz),
            "rapid" => Some(GameMode::Rapid),
            "unlimited" => Some(GameMode::Unlimited),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChessClock {
    remaining: [Option<u64>; 2],
    running: bool,
}

impl ChessClock {
    pub fn new(mode: GameMode) -> Self {
        let allotment = mode.allotment_seconds();
        ChessClock {
            remaining: [allotment, allotment],
            running: true,
        }
    }

    pub fn remaining(&self, color: Color) -> Option<u64> {
        self.remaining[color.index()]
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restarts ticking with the remaining times untouched.
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Removes one second from `side`. Returns true when that side's flag
    /// falls; a tick observed with one second or less collapses to zero and
    /// stops the clock.
    pub fn tick(&mut self, side: Color) -> bool {
        if !self.running {
            return false;
        }
        let Some(remaining) = self.remaining[side.index()] else {
            return false;
        };

        if remaining <= 1 {
            self.remaining[side.index()] = Some(0);
            self.running = false;
            return true;
        }

        self.remaining[side.index()] = Some(remaining - 1);
        false
    }
}

/// "m:ss" display form, or "unlimited".
pub fn format_remaining(remaining: Option<u64>) -> String {
    match remaining {
        Some(seconds) => format!("{}:{:02}", seconds / 60, seconds % 60),
        None => "unlimited".to_owned(),
    }
}
