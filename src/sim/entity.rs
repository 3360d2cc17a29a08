//! Per-entity tick update: movement, attack start, cooldown decay

use glam::Vec2;

use super::collision::is_blocked;
use super::state::{Action, Arena, Entity};
use super::tick::TickInput;
use crate::consts::*;

/// Movement delta requested by the held directions (diagonals not normalized)
pub fn movement_delta(entity: &Entity, input: &TickInput) -> Vec2 {
    let held = |action| input.is_held(entity.controls().symbol(action));

    let mut delta = Vec2::ZERO;
    if held(Action::Up) {
        delta.y -= MOVE_SPEED;
    }
    if held(Action::Down) {
        delta.y += MOVE_SPEED;
    }
    if held(Action::Left) {
        delta.x -= MOVE_SPEED;
    }
    if held(Action::Right) {
        delta.x += MOVE_SPEED;
    }
    delta
}

/// Advance one entity by a tick.
///
/// Inactive entities are left untouched. A blocked move is discarded on both
/// axes at once. Returns true if a new attack started this tick.
pub fn step_entity(entity: &mut Entity, input: &TickInput, arena: &Arena) -> bool {
    if !entity.active {
        return false;
    }

    let delta = movement_delta(entity, input);
    if delta != Vec2::ZERO {
        let candidate = arena.clamp(entity.pos + delta);
        if !is_blocked(candidate, ENTITY_SIZE, arena) {
            entity.pos = candidate;
        }
    }

    let attack_held = input.is_held(entity.controls().symbol(Action::Attack));
    let started = attack_held && entity.attack_cooldown == 0;
    if started {
        entity.attacking = true;
        entity.attack_cooldown = ATTACK_COOLDOWN_TICKS;
    }

    if entity.attacking {
        entity.attacking = entity.attack_cooldown > ATTACK_ACTIVE_THRESHOLD;
    }

    entity.attack_cooldown = entity.attack_cooldown.saturating_sub(1);
    entity.invulnerable_ticks = entity.invulnerable_ticks.saturating_sub(1);
    entity.clamp_counters();

    started
}
