//! Match lifecycle commands: start, restart, back to menu
//!
//! A `Session` owns the arena setup, at most one running match and the
//! fixed-rate driver that advances it. With no match it is in the Setup phase.

use crate::SetupError;
use crate::driver::{FixedStepDriver, StepReport};
use crate::input::InputSource;
use crate::settings::{MatchSettings, PlayerCount};
use crate::sim::{MatchPhase, MatchState};

#[derive(Debug, Clone)]
pub struct Session {
    settings: MatchSettings,
    current: Option<MatchState>,
    driver: FixedStepDriver,
}

impl Session {
    pub fn new(settings: MatchSettings) -> Result<Self, SetupError> {
        settings.validate()?;
        Ok(Self {
            settings,
            current: None,
            driver: FixedStepDriver::new(),
        })
    }

    /// Build a new match for `player_count` players (2, 3 or 4)
    pub fn start(&mut self, player_count: u32) -> Result<&mut MatchState, SetupError> {
        let count = PlayerCount::try_from(player_count).inspect_err(|err| {
            log::warn!("Rejected match start: {err}");
        })?;
        self.settings = self.settings.with_player_count(count);
        self.driver.reset();
        Ok(self.current.insert(MatchState::new(&self.settings)))
    }

    /// Reset the current match to its initial state
    pub fn restart(&mut self) -> Result<&mut MatchState, SetupError> {
        let state = self.current.as_mut().ok_or(SetupError::NoMatch)?;
        state.restart();
        self.driver.reset();
        log::info!("Match restarted");
        Ok(state)
    }

    /// Discard the current match
    pub fn return_to_menu(&mut self) {
        if self.current.take().is_some() {
            log::info!("Returned to menu");
        }
        self.driver.reset();
    }

    /// Feed `dt` seconds of wall-clock time to the running match, if any
    pub fn update(&mut self, input: &mut impl InputSource, dt: f32) -> StepReport {
        match self.current.as_mut() {
            Some(state) => self.driver.update(state, input, dt),
            None => StepReport::default(),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.current
            .as_ref()
            .map_or(MatchPhase::Setup, |state| state.phase)
    }

    pub fn current(&self) -> Option<&MatchState> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut MatchState> {
        self.current.as_mut()
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }
}
