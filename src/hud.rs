//! Read model for the presentation layer
//!
//! Nothing here mutates the match; it only shapes state for display.

use crate::consts::MAX_HEALTH;
use crate::sim::{MatchOutcome, MatchState, PlayerColor};

/// Countdown as minutes:seconds (`1:30`, `0:05`)
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Headline for the end-of-match overlay
pub fn outcome_banner(outcome: MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Winner(id) => format!("Player {id} Wins!"),
        MatchOutcome::Draw => "Game Over!".to_string(),
    }
}

/// One player's status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub id: u32,
    pub color: PlayerColor,
    pub health: u8,
    pub active: bool,
    pub attacking: bool,
    pub invulnerable: bool,
}

impl PlayerRow {
    /// Health as filled/empty pips, e.g. `●●●○○`
    pub fn pips(&self) -> String {
        (0..MAX_HEALTH)
            .map(|i| if i < self.health { '●' } else { '○' })
            .collect()
    }

    pub fn status(&self) -> &'static str {
        if self.active { "ALIVE" } else { "OUT" }
    }
}

/// Everything a frame of UI needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub clock: String,
    pub banner: Option<String>,
    pub players: Vec<PlayerRow>,
}

impl HudView {
    pub fn from_state(state: &MatchState) -> Self {
        let players = state
            .entities
            .iter()
            .map(|e| PlayerRow {
                id: e.id(),
                color: e.color(),
                health: e.health,
                active: e.active,
                attacking: e.attacking,
                invulnerable: e.invulnerable(),
            })
            .collect();

        Self {
            clock: format_clock(state.remaining_seconds),
            banner: state.outcome.map(outcome_banner),
            players,
        }
    }
}
