//! Input snapshot providers
//!
//! The simulation never polls devices. Each tick it asks an `InputSource` for
//! the set of symbols held right now and uses that snapshot for the whole tick.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::PLAYER_CONTROLS;
use crate::sim::TickInput;

/// Anything that can report which input symbols are currently held
pub trait InputSource {
    fn held_symbols(&mut self) -> TickInput;
}

/// Press/release tracker fed by a platform's key events
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: BTreeSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, symbol: &str) {
        self.held.insert(symbol.to_string());
    }

    pub fn release(&mut self, symbol: &str) {
        self.held.remove(symbol);
    }

    /// Drop everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, symbol: &str) -> bool {
        self.held.contains(symbol)
    }
}

impl InputSource for HeldKeys {
    fn held_symbols(&mut self) -> TickInput {
        TickInput {
            held: self.held.clone(),
        }
    }
}

/// Seeded random key mashing for the headless harness and soak tests.
///
/// Each bound symbol flips between held and released with a fixed chance per
/// tick, so keys stay down for a while like a real player's would.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: Pcg32,
    symbols: Vec<String>,
    held: BTreeSet<String>,
    flip_chance: f64,
}

impl RandomInput {
    pub fn new(seed: u64) -> Self {
        Self::with_flip_chance(seed, 0.1)
    }

    pub fn with_flip_chance(seed: u64, flip_chance: f64) -> Self {
        let symbols = PLAYER_CONTROLS
            .iter()
            .flatten()
            .map(|s| s.to_string())
            .collect();
        Self {
            rng: Pcg32::seed_from_u64(seed),
            symbols,
            held: BTreeSet::new(),
            flip_chance: flip_chance.clamp(0.0, 1.0),
        }
    }
}

impl InputSource for RandomInput {
    fn held_symbols(&mut self) -> TickInput {
        for symbol in &self.symbols {
            if self.rng.random_bool(self.flip_chance) && !self.held.remove(symbol) {
                self.held.insert(symbol.clone());
            }
        }
        TickInput {
            held: self.held.clone(),
        }
    }
}
