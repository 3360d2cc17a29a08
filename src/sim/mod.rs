//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven from outside
//! - Input arrives as an immutable snapshot per tick
//! - Stable iteration order (by entity ID)
//! - No rendering, timers or platform dependencies

pub mod collision;
pub mod combat;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap, is_blocked};
pub use combat::{PendingHit, PendingHits, apply_hits, detect_hits, resolve_combat};
pub use entity::step_entity;
pub use state::{
    Action, Arena, Controls, Entity, MatchEvent, MatchOutcome, MatchPhase, MatchState, Obstacle,
    ObstacleKind, PlayerColor,
};
pub use tick::{TickInput, tick, tick_second};
