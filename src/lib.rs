//! Arena Brawl - A local 2-4 player arena combat game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, match flow)
//! - `input`: Held-input snapshot providers
//! - `driver`: Fixed-rate tick driver
//! - `session`: Start/restart/menu commands
//! - `settings`: Arena layout and player setup
//! - `hud`: Read model for presentation

pub mod driver;
pub mod error;
pub mod hud;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use driver::FixedStepDriver;
pub use error::SetupError;
pub use input::{HeldKeys, InputSource, RandomInput};
pub use session::Session;
pub use settings::{MatchSettings, PlayerCount};

/// Game configuration constants
pub mod consts {
    /// Simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Entity bounding square side length
    pub const ENTITY_SIZE: f32 = 32.0;
    /// Half the entity size; closest an entity center may get to the arena edge
    pub const ENTITY_HALF_SIZE: f32 = ENTITY_SIZE / 2.0;
    /// Movement per tick on each held axis (diagonals are not normalized)
    pub const MOVE_SPEED: f32 = 5.0;

    /// Starting (and maximum) health
    pub const MAX_HEALTH: u8 = 5;
    /// Ticks between attacks
    pub const ATTACK_COOLDOWN_TICKS: u32 = 30;
    /// Attack stays hit-eligible while the cooldown is above this value (5 ticks)
    pub const ATTACK_ACTIVE_THRESHOLD: u32 = 25;
    /// Post-hit invulnerability (1 second at 60 Hz)
    pub const INVULNERABLE_TICKS: u32 = 60;
    /// Maximum center-to-center distance for a hit
    pub const ATTACK_RANGE: f32 = 80.0;

    /// Match countdown (1:30)
    pub const MATCH_SECONDS: u32 = 90;
}
