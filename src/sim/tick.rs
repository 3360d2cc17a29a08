//! Fixed timestep simulation tick
//!
//! Core match loop. `tick` runs at the simulation rate, `tick_second` at 1 Hz;
//! the caller serializes them and decides when each fires.

use std::collections::BTreeSet;

use super::combat::resolve_combat;
use super::entity::step_entity;
use super::state::{MatchEvent, MatchOutcome, MatchPhase, MatchState};

/// Input symbols held down at the start of a tick (immutable for the tick)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: BTreeSet<String>,
}

impl TickInput {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            held: keys.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn is_held(&self, symbol: &str) -> bool {
        self.held.contains(symbol)
    }
}

/// Advance the match by one simulation tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    state.events.clear();

    // Nothing moves outside of play
    if state.phase != MatchPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    for entity in &mut state.entities {
        if step_entity(entity, input, &state.arena) {
            state.events.push(MatchEvent::AttackStarted { id: entity.id() });
        }
    }

    let (entities, events) = resolve_combat(&state.entities);
    state.entities = entities;
    state.events.extend(events);

    check_match_end(state);
}

/// Count the countdown down by one second.
///
/// Reaching zero only changes what is displayed; it never ends the match.
pub fn tick_second(state: &mut MatchState) {
    if state.phase != MatchPhase::Playing {
        return;
    }
    state.remaining_seconds = state.remaining_seconds.saturating_sub(1);
}

/// End the match once at most one entity is still active
fn check_match_end(state: &mut MatchState) {
    if state.phase != MatchPhase::Playing {
        return;
    }

    let mut survivors = state.entities.iter().filter(|e| e.active);
    let outcome = match (survivors.next(), survivors.next()) {
        (Some(_), Some(_)) => return,
        (Some(last), None) => MatchOutcome::Winner(last.id()),
        (None, _) => MatchOutcome::Draw,
    };

    state.phase = MatchPhase::Ended;
    state.outcome = Some(outcome);
    state.events.push(MatchEvent::MatchEnded { outcome });

    match outcome {
        MatchOutcome::Winner(id) => {
            log::info!("Match over after {} ticks: player {} wins", state.time_ticks, id)
        }
        MatchOutcome::Draw => log::info!("Match over after {} ticks: draw", state.time_ticks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{MatchSettings, PlayerCount};
    use glam::Vec2;

    fn open_match(count: PlayerCount) -> MatchState {
        MatchState::new(&MatchSettings::new(1000.0, 1000.0, Vec::new(), count))
    }

    #[test]
    fn test_attack_scenario_damages_neighbor() {
        let mut state = open_match(PlayerCount::Two);
        state.entities[0].pos = Vec2::new(100.0, 100.0);
        state.entities[1].pos = Vec2::new(150.0, 100.0);

        // Player 1 attacks with 'q'
        tick(&mut state, &TickInput::from_keys(["q"]));

        let b = &state.entities[1];
        assert_eq!(b.health, 4);
        assert!(b.invulnerable());
        assert_eq!(b.invulnerable_ticks, INVULNERABLE_TICKS);
        assert!(state.events.contains(&MatchEvent::AttackStarted { id: 1 }));
        assert!(state.events.contains(&MatchEvent::Hit { target: 2, health: 4 }));
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_one_hit_per_attack_window() {
        let mut state = open_match(PlayerCount::Two);
        state.entities[0].pos = Vec2::new(100.0, 100.0);
        state.entities[1].pos = Vec2::new(150.0, 100.0);

        let attack = TickInput::from_keys(["q"]);
        for _ in 0..5 {
            tick(&mut state, &attack);
        }
        assert_eq!(state.entities[1].health, 4);
    }

    #[test]
    fn test_invulnerability_lasts_sixty_ticks() {
        let mut state = open_match(PlayerCount::Two);
        state.entities[0].pos = Vec2::new(100.0, 100.0);
        state.entities[1].pos = Vec2::new(150.0, 100.0);

        tick(&mut state, &TickInput::from_keys(["q"]));
        assert_eq!(state.entities[1].health, 4);

        // Force the attacker to stay hit-eligible every tick
        for _ in 0..59 {
            state.entities[0].attacking = true;
            state.entities[0].attack_cooldown = ATTACK_COOLDOWN_TICKS;
            tick(&mut state, &TickInput::default());
            assert_eq!(state.entities[1].health, 4);
        }

        state.entities[0].attacking = true;
        state.entities[0].attack_cooldown = ATTACK_COOLDOWN_TICKS;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.entities[1].health, 3);
    }

    #[test]
    fn test_last_player_standing_wins() {
        let mut state = open_match(PlayerCount::Three);
        state.entities[0].pos = Vec2::new(100.0, 100.0);
        state.entities[1].pos = Vec2::new(150.0, 100.0);
        state.entities[2].active = false;
        state.entities[2].health = 0;
        state.entities[1].health = 1;

        tick(&mut state, &TickInput::from_keys(["q"]));

        assert_eq!(state.phase, MatchPhase::Ended);
        assert_eq!(state.winner(), Some(1));
        assert_eq!(state.outcome, Some(MatchOutcome::Winner(1)));
    }

    #[test]
    fn test_simultaneous_elimination_is_draw() {
        let mut state = open_match(PlayerCount::Two);
        state.entities[0].pos = Vec2::new(100.0, 100.0);
        state.entities[1].pos = Vec2::new(150.0, 100.0);
        state.entities[0].health = 1;
        state.entities[1].health = 1;

        // Both attack in the same tick
        tick(&mut state, &TickInput::from_keys(["q", " "]));

        assert!(state.is_terminal());
        assert_eq!(state.outcome, Some(MatchOutcome::Draw));
        assert_eq!(state.winner(), None);
        let ended = state
            .events
            .iter()
            .filter(|e| matches!(e, MatchEvent::MatchEnded { .. }))
            .count();
        assert_eq!(ended, 1);

        // Ended is captured once; later ticks do nothing
        let snapshot = state.entities.clone();
        tick(&mut state, &TickInput::from_keys(["q", " ", "w"]));
        assert!(state.events.is_empty());
        assert_eq!(state.entities, snapshot);
        assert_eq!(state.outcome, Some(MatchOutcome::Draw));
    }

    #[test]
    fn test_countdown_zero_does_not_end_match() {
        let mut state = open_match(PlayerCount::Two);
        for _ in 0..(MATCH_SECONDS + 10) {
            tick_second(&mut state);
        }
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.is_terminal());
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.outcome, None);

        // Play continues after time runs out
        let x = state.entities[0].pos.x;
        tick(&mut state, &TickInput::from_keys(["d"]));
        assert_eq!(state.entities[0].pos.x, x + MOVE_SPEED);
    }

    #[test]
    fn test_countdown_frozen_after_end() {
        let mut state = open_match(PlayerCount::Two);
        state.entities[1].active = false;
        state.entities[1].health = 0;
        tick(&mut state, &TickInput::default());
        assert!(state.is_terminal());

        tick_second(&mut state);
        assert_eq!(state.remaining_seconds, MATCH_SECONDS);
    }

    #[test]
    fn test_restart_after_end() {
        let mut state = open_match(PlayerCount::Four);
        let spawns: Vec<Vec2> = state.entities.iter().map(|e| e.pos).collect();

        state.entities[0].pos = Vec2::new(100.0, 100.0);
        state.entities[1].pos = Vec2::new(150.0, 100.0);
        for e in &mut state.entities[1..] {
            e.health = 1;
        }
        state.entities[2].active = false;
        state.entities[3].active = false;
        tick_second(&mut state);
        tick(&mut state, &TickInput::from_keys(["q"]));
        assert!(state.is_terminal());

        state.restart();

        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.remaining_seconds, MATCH_SECONDS);
        assert_eq!(state.outcome, None);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.entities.len(), 4);
        for (e, spawn) in state.entities.iter().zip(&spawns) {
            assert_eq!(e.health, MAX_HEALTH);
            assert!(e.active);
            assert!(!e.attacking);
            assert_eq!(e.attack_cooldown, 0);
            assert_eq!(e.invulnerable_ticks, 0);
            assert_eq!(e.pos, *spawn);
        }
    }

    #[test]
    fn test_determinism() {
        let settings = MatchSettings::default_for(1280.0, 720.0, PlayerCount::Four);
        let mut state1 = MatchState::new(&settings);
        let mut state2 = MatchState::new(&settings);

        let inputs = [
            TickInput::from_keys(["d", "s", "ArrowLeft"]),
            TickInput::from_keys(["q", "u", "r"]),
            TickInput::from_keys(["i", "j", " "]),
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.entities, state2.entities);
    }

    #[test]
    fn test_unvalidated_tiny_arena_does_not_panic() {
        let settings = MatchSettings::new(20.0, 20.0, Vec::new(), PlayerCount::Two);
        assert!(settings.validate().is_err());

        let mut state = MatchState::new(&settings);
        let spawn = state.entities[0].pos;
        for _ in 0..10 {
            tick(&mut state, &TickInput::from_keys(["d", "s"]));
        }
        // No legal position exists, so every move is rejected
        assert_eq!(state.entities[0].pos, spawn);
        assert_eq!(state.phase, MatchPhase::Playing);
    }
}
