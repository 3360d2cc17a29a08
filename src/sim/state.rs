//! Match state and core simulation types
//!
//! Everything a tick reads or writes lives here. Entities are created once per
//! match and only ever deactivated, never removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::settings::MatchSettings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No match running (player count not chosen yet)
    Setup,
    /// Active gameplay
    Playing,
    /// At most one entity left standing
    Ended,
}

/// How a finished match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Exactly one entity remained active
    Winner(u32),
    /// Everyone still standing went down in the same tick
    Draw,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<u32> {
        match self {
            MatchOutcome::Winner(id) => Some(*id),
            MatchOutcome::Draw => None,
        }
    }
}

/// Something presentation or audio may want to react to (cleared every tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    AttackStarted { id: u32 },
    Hit { target: u32, health: u8 },
    Eliminated { id: u32 },
    MatchEnded { outcome: MatchOutcome },
}

/// Player identity color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl PlayerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Green => "green",
            PlayerColor::Blue => "blue",
            PlayerColor::Yellow => "yellow",
        }
    }
}

/// Logical actions an entity can be driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Attack,
}

/// Mapping of the five actions to input symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub attack: String,
}

impl Controls {
    pub fn new(up: &str, down: &str, left: &str, right: &str, attack: &str) -> Self {
        Self {
            up: up.to_string(),
            down: down.to_string(),
            left: left.to_string(),
            right: right.to_string(),
            attack: attack.to_string(),
        }
    }

    /// Input symbol bound to an action
    pub fn symbol(&self, action: Action) -> &str {
        match action {
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Attack => &self.attack,
        }
    }
}

/// One player-controlled fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: u32,
    color: PlayerColor,
    controls: Controls,
    pub pos: Vec2,
    /// Remaining health, 0..=MAX_HEALTH
    pub health: u8,
    /// False once eliminated; frozen until the match is recreated
    pub active: bool,
    /// True during the hit-eligible attack window
    pub attacking: bool,
    /// Ticks until the next attack may start, 0..=ATTACK_COOLDOWN_TICKS
    pub attack_cooldown: u32,
    /// Ticks of damage immunity left, 0..=INVULNERABLE_TICKS
    pub invulnerable_ticks: u32,
}

impl Entity {
    pub fn new(id: u32, color: PlayerColor, controls: Controls, pos: Vec2) -> Self {
        Self {
            id,
            color,
            controls,
            pos,
            health: MAX_HEALTH,
            active: true,
            attacking: false,
            attack_cooldown: 0,
            invulnerable_ticks: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn color(&self) -> PlayerColor {
        self.color
    }

    #[inline]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Can this entity start an attack right now?
    #[inline]
    pub fn can_attack(&self) -> bool {
        self.active && self.attack_cooldown == 0
    }

    /// Pull every counter back into its legal range
    pub fn clamp_counters(&mut self) {
        self.health = self.health.min(MAX_HEALTH);
        self.attack_cooldown = self.attack_cooldown.min(ATTACK_COOLDOWN_TICKS);
        self.invulnerable_ticks = self.invulnerable_ticks.min(INVULNERABLE_TICKS);
    }
}

/// Obstacle flavors (purely cosmetic; all block movement the same way)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Bush,
    Box,
    Central,
}

/// Static rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, center: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            rect: Rect::new(center, size),
        }
    }
}

/// Playing field: a bounded rectangle with static obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub obstacles: Vec<Obstacle>,
}

impl Arena {
    /// Clamp a position so the entity box stays inside the arena.
    ///
    /// An arena narrower than one entity has no legal position; the result is
    /// then pinned to the far edge and every move there is rejected as blocked.
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x
                .max(ENTITY_HALF_SIZE)
                .min(self.width - ENTITY_HALF_SIZE),
            pos.y
                .max(ENTITY_HALF_SIZE)
                .min(self.height - ENTITY_HALF_SIZE),
        )
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Setup this match was built from (used on restart)
    pub settings: MatchSettings,
    pub arena: Arena,
    /// Entities ordered by id
    pub entities: Vec<Entity>,
    /// Countdown shown to players, in seconds
    pub remaining_seconds: u32,
    pub phase: MatchPhase,
    /// Set exactly once, when the match ends
    pub outcome: Option<MatchOutcome>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Build a fresh match in the Playing phase.
    ///
    /// `settings` are expected to have passed [`MatchSettings::validate`];
    /// `Session` checks this before any match is built. Unvalidated settings
    /// never panic, but entities may start boxed in.
    pub fn new(settings: &MatchSettings) -> Self {
        let state = Self {
            settings: settings.clone(),
            arena: settings.arena(),
            entities: settings.roster(),
            remaining_seconds: MATCH_SECONDS,
            phase: MatchPhase::Playing,
            outcome: None,
            time_ticks: 0,
            events: Vec::new(),
        };

        log::info!(
            "Match started: {} players on {}x{} arena with {} obstacles",
            state.entities.len(),
            state.arena.width,
            state.arena.height,
            state.arena.obstacles.len()
        );

        state
    }

    /// Throw everything away and start over with the same setup
    pub fn restart(&mut self) {
        *self = Self::new(&self.settings);
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == MatchPhase::Ended
    }

    pub fn winner(&self) -> Option<u32> {
        self.outcome.and_then(|o| o.winner())
    }

    pub fn active_count(&self) -> usize {
        self.entities.iter().filter(|e| e.active).count()
    }
}
