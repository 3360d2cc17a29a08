//! Melee hit detection and damage
//!
//! Combat runs in two passes over immutable snapshots: `detect_hits` reads the
//! post-movement entity list and records who got hit, then `apply_hits` builds
//! the post-combat list. Nothing detected in a tick can observe damage dealt
//! in that same tick, so iteration order never matters.

use std::collections::BTreeSet;

use super::state::{Entity, MatchEvent};
use crate::consts::*;

/// A single attacker/target contact found during detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHit {
    pub attacker: u32,
    pub target: u32,
}

/// Every contact found in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingHits {
    pub hits: Vec<PendingHit>,
}

impl PendingHits {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Distinct targets; several attackers on one target collapse to one entry
    pub fn targets(&self) -> BTreeSet<u32> {
        self.hits.iter().map(|h| h.target).collect()
    }
}

/// Is the target within melee reach of the attacker?
#[inline]
pub fn in_attack_range(attacker: &Entity, target: &Entity) -> bool {
    attacker.pos.distance(target.pos) <= ATTACK_RANGE
}

/// Pass 1: find every active, attacking entity's vulnerable targets in range
pub fn detect_hits(entities: &[Entity]) -> PendingHits {
    let mut pending = PendingHits::default();

    for attacker in entities.iter().filter(|e| e.active && e.attacking) {
        for target in entities {
            if target.id() == attacker.id() || !target.active || target.invulnerable() {
                continue;
            }
            if in_attack_range(attacker, target) {
                pending.hits.push(PendingHit {
                    attacker: attacker.id(),
                    target: target.id(),
                });
            }
        }
    }

    pending
}

/// Pass 2: apply one point of damage to each distinct target.
///
/// Returns the post-combat entity list and the events it produced.
pub fn apply_hits(entities: &[Entity], pending: &PendingHits) -> (Vec<Entity>, Vec<MatchEvent>) {
    let targets = pending.targets();
    let mut events = Vec::new();

    let updated = entities
        .iter()
        .map(|entity| {
            let mut entity = entity.clone();
            if !entity.active || !targets.contains(&entity.id()) {
                return entity;
            }

            entity.health = entity.health.saturating_sub(1);
            entity.invulnerable_ticks = INVULNERABLE_TICKS;
            events.push(MatchEvent::Hit {
                target: entity.id(),
                health: entity.health,
            });
            log::debug!("Player {} hit, health {}", entity.id(), entity.health);

            if entity.health == 0 {
                entity.active = false;
                events.push(MatchEvent::Eliminated { id: entity.id() });
                log::info!("Player {} eliminated", entity.id());
            }
            entity
        })
        .collect();

    (updated, events)
}

/// Run both passes
pub fn resolve_combat(entities: &[Entity]) -> (Vec<Entity>, Vec<MatchEvent>) {
    let pending = detect_hits(entities);
    if pending.is_empty() {
        return (entities.to_vec(), Vec::new());
    }
    apply_hits(entities, &pending)
}
