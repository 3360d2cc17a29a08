//! Errors raised while setting up a match
//!
//! The simulation itself never fails; everything here is rejected at the
//! setup boundary before a match exists.

use std::fmt;

#[derive(Debug)]
pub enum SetupError {
    InvalidPlayerCount { found: u32 },
    InvalidArena { width: f32, height: f32 },
    InvalidObstacle { index: usize },
    SpawnBlocked { slot: usize },
    InvalidArgument { name: &'static str, value: String },
    NoMatch,
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlayerCount { found } => {
                write!(f, "invalid player count: {found} (allowed 2..=4)")
            }
            Self::InvalidArena { width, height } => {
                write!(f, "arena too small or malformed: {width}x{height}")
            }
            Self::InvalidObstacle { index } => {
                write!(f, "obstacle {index} has a non-positive or non-finite size")
            }
            Self::SpawnBlocked { slot } => {
                write!(f, "spawn point for player {} is blocked", slot + 1)
            }
            Self::InvalidArgument { name, value } => {
                write!(f, "invalid {name}: '{value}'")
            }
            Self::NoMatch => write!(f, "no match to restart"),
            Self::Parse(_) => write!(f, "settings parse error"),
            Self::Io(_) => write!(f, "settings io error"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
