//! Match setup: arena layout, player count and the fixed player roster
//!
//! Settings can round-trip through JSON so an arena layout can be edited
//! outside the game. Everything is validated before a match is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SetupError;
use crate::consts::ENTITY_SIZE;
use crate::sim::collision::is_blocked;
use crate::sim::state::{Arena, Controls, Entity, Obstacle, ObstacleKind, PlayerColor};

/// Number of players in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum PlayerCount {
    #[default]
    Two,
    Three,
    Four,
}

impl PlayerCount {
    pub fn get(&self) -> usize {
        match self {
            PlayerCount::Two => 2,
            PlayerCount::Three => 3,
            PlayerCount::Four => 4,
        }
    }
}

impl TryFrom<u32> for PlayerCount {
    type Error = SetupError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        match count {
            2 => Ok(PlayerCount::Two),
            3 => Ok(PlayerCount::Three),
            4 => Ok(PlayerCount::Four),
            found => Err(SetupError::InvalidPlayerCount { found }),
        }
    }
}

impl From<PlayerCount> for u32 {
    fn from(count: PlayerCount) -> Self {
        count.get() as u32
    }
}

/// Player colors by slot
pub const PLAYER_COLORS: [PlayerColor; 4] = [
    PlayerColor::Red,
    PlayerColor::Green,
    PlayerColor::Blue,
    PlayerColor::Yellow,
];

/// Key bindings by slot: up, down, left, right, attack
pub const PLAYER_CONTROLS: [[&str; 5]; 4] = [
    ["w", "s", "a", "d", "q"],
    ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", " "],
    ["i", "k", "j", "l", "u"],
    ["t", "g", "f", "h", "r"],
];

/// Spawn points by slot as fractions of the arena
/// (top-left, bottom-right, top-right, bottom-left)
pub const SPAWN_FRACTIONS: [(f32, f32); 4] = [(0.1, 0.1), (0.9, 0.9), (0.9, 0.1), (0.1, 0.9)];

/// Everything needed to build a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub player_count: PlayerCount,
}

impl MatchSettings {
    pub fn new(width: f32, height: f32, obstacles: Vec<Obstacle>, player_count: PlayerCount) -> Self {
        Self {
            width,
            height,
            obstacles,
            player_count,
        }
    }

    /// Standard layout scaled to the given arena size
    pub fn default_for(width: f32, height: f32, player_count: PlayerCount) -> Self {
        Self::new(width, height, default_layout(width, height), player_count)
    }

    /// Same arena with a different number of players
    pub fn with_player_count(&self, player_count: PlayerCount) -> Self {
        Self {
            player_count,
            ..self.clone()
        }
    }

    /// Reject arenas an entity cannot stand in, degenerate obstacles and
    /// layouts that box in a spawn point.
    ///
    /// All four slots are checked since a session may later start with any
    /// player count on the same arena.
    pub fn validate(&self) -> Result<(), SetupError> {
        let usable = |d: f32| d.is_finite() && d >= ENTITY_SIZE;
        if !usable(self.width) || !usable(self.height) {
            return Err(SetupError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            let size = obstacle.rect.size;
            let center = obstacle.rect.center;
            if !(size.x > 0.0 && size.y > 0.0) || !size.is_finite() || !center.is_finite() {
                return Err(SetupError::InvalidObstacle { index });
            }
        }

        let arena = self.arena();
        for slot in 0..SPAWN_FRACTIONS.len() {
            if is_blocked(self.spawn_position(slot), ENTITY_SIZE, &arena) {
                return Err(SetupError::SpawnBlocked { slot });
            }
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.width,
            height: self.height,
            obstacles: self.obstacles.clone(),
        }
    }

    /// Spawn point for a player slot
    pub fn spawn_position(&self, slot: usize) -> Vec2 {
        let (fx, fy) = SPAWN_FRACTIONS[slot % SPAWN_FRACTIONS.len()];
        Vec2::new(self.width * fx, self.height * fy)
    }

    /// Fresh entities for every slot, ids starting at 1
    pub fn roster(&self) -> Vec<Entity> {
        (0..self.player_count.get())
            .map(|slot| {
                let [up, down, left, right, attack] = PLAYER_CONTROLS[slot];
                Entity::new(
                    slot as u32 + 1,
                    PLAYER_COLORS[slot],
                    Controls::new(up, down, left, right, attack),
                    self.spawn_position(slot),
                )
            })
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded match settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SetupError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Match settings saved to {}", path.display());
        Ok(())
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self::default_for(1280.0, 720.0, PlayerCount::Two)
    }
}

/// Bushes, boxes and the central structure, placed relative to the arena
pub fn default_layout(width: f32, height: f32) -> Vec<Obstacle> {
    let at = |fx: f32, fy: f32| Vec2::new(width * fx, height * fy);
    let bush = Vec2::splat(60.0);
    let crate_size = Vec2::splat(40.0);

    vec![
        Obstacle::new(ObstacleKind::Bush, at(0.25, 0.25), bush),
        Obstacle::new(ObstacleKind::Bush, at(0.75, 0.25), bush),
        Obstacle::new(ObstacleKind::Bush, at(0.25, 0.75), bush),
        Obstacle::new(ObstacleKind::Bush, at(0.75, 0.75), bush),
        Obstacle::new(ObstacleKind::Bush, at(0.15, 0.5), bush),
        Obstacle::new(ObstacleKind::Bush, at(0.85, 0.5), bush),
        Obstacle::new(ObstacleKind::Box, at(0.4, 0.35), crate_size),
        Obstacle::new(ObstacleKind::Box, at(0.6, 0.35), crate_size),
        Obstacle::new(ObstacleKind::Box, at(0.4, 0.65), crate_size),
        Obstacle::new(ObstacleKind::Box, at(0.6, 0.65), crate_size),
        Obstacle::new(ObstacleKind::Box, at(0.35, 0.2), crate_size),
        Obstacle::new(ObstacleKind::Box, at(0.65, 0.8), crate_size),
        Obstacle::new(ObstacleKind::Central, at(0.5, 0.5), Vec2::new(100.0, 60.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_count_bounds() {
        assert!(matches!(PlayerCount::try_from(2), Ok(PlayerCount::Two)));
        assert!(matches!(PlayerCount::try_from(4), Ok(PlayerCount::Four)));
        assert!(matches!(
            PlayerCount::try_from(1),
            Err(SetupError::InvalidPlayerCount { found: 1 })
        ));
        assert!(matches!(
            PlayerCount::try_from(5),
            Err(SetupError::InvalidPlayerCount { found: 5 })
        ));
    }

    #[test]
    fn test_roster_assignment() {
        let settings = MatchSettings::default_for(1000.0, 500.0, PlayerCount::Four);
        let roster = settings.roster();

        assert_eq!(roster.len(), 4);
        assert_eq!(roster[1].id(), 2);
        assert_eq!(roster[1].color(), PlayerColor::Green);
        assert_eq!(roster[1].controls().attack, " ");
        assert_eq!(roster[1].pos, Vec2::new(900.0, 450.0));
        assert_eq!(roster[3].pos, Vec2::new(100.0, 450.0));
        assert_eq!(roster[2].controls().up, "i");
    }

    #[test]
    fn test_default_spawns_are_clear() {
        for (w, h) in [(1280.0, 720.0), (1920.0, 1080.0), (800.0, 600.0)] {
            let settings = MatchSettings::default_for(w, h, PlayerCount::Four);
            let arena = settings.arena();
            for e in settings.roster() {
                assert!(!is_blocked(e.pos, ENTITY_SIZE, &arena), "spawn {:?} blocked", e.pos);
            }
        }
    }

    #[test]
    fn test_json_round_trip() {
        let settings = MatchSettings::default_for(1280.0, 720.0, PlayerCount::Three);
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"player_count\": 3"));
        let parsed = MatchSettings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_json_rejects_bad_player_count() {
        let json = r#"{ "width": 800.0, "height": 600.0, "player_count": 6 }"#;
        assert!(matches!(
            MatchSettings::from_json(json),
            Err(SetupError::Parse(_))
        ));
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{ "width": 800.0, "height": 600.0 }"#;
        let settings = MatchSettings::from_json(json).unwrap();
        assert!(settings.obstacles.is_empty());
        assert_eq!(settings.player_count, PlayerCount::Two);
    }

    #[test]
    fn test_validate_rejects_tiny_arena() {
        let settings = MatchSettings::new(10.0, 600.0, Vec::new(), PlayerCount::Two);
        assert!(matches!(
            settings.validate(),
            Err(SetupError::InvalidArena { width, height }) if width == 10.0 && height == 600.0
        ));
    }

    #[test]
    fn test_validate_rejects_flat_obstacle() {
        let obstacles = vec![Obstacle::new(
            ObstacleKind::Box,
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 40.0),
        )];
        let settings = MatchSettings::new(800.0, 600.0, obstacles, PlayerCount::Two);
        assert!(matches!(
            settings.validate(),
            Err(SetupError::InvalidObstacle { index: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_boxed_in_spawn() {
        // Crate sitting on the bottom-right spawn (slot 1) of an 800x600 arena
        let obstacles = vec![Obstacle::new(
            ObstacleKind::Box,
            Vec2::new(720.0, 540.0),
            Vec2::new(40.0, 40.0),
        )];
        let settings = MatchSettings::new(800.0, 600.0, obstacles, PlayerCount::Two);
        assert!(matches!(
            settings.validate(),
            Err(SetupError::SpawnBlocked { slot: 1 })
        ));

        // Slots beyond the current player count are checked too
        let obstacles = vec![Obstacle::new(
            ObstacleKind::Bush,
            Vec2::new(80.0, 540.0),
            Vec2::new(60.0, 60.0),
        )];
        let settings = MatchSettings::new(800.0, 600.0, obstacles, PlayerCount::Two);
        assert!(matches!(
            settings.validate(),
            Err(SetupError::SpawnBlocked { slot: 3 })
        ));
    }

    #[test]
    fn test_json_rejects_boxed_in_spawn() {
        let json = r#"{
            "width": 800.0,
            "height": 600.0,
            "obstacles": [
                { "kind": "Central", "rect": { "center": [80.0, 60.0], "size": [100.0, 60.0] } }
            ]
        }"#;
        assert!(matches!(
            MatchSettings::from_json(json),
            Err(SetupError::SpawnBlocked { slot: 0 })
        ));
    }
}
