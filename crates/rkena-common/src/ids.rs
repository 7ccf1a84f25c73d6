//! Identity types for fighters and matches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which corner a fighter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterSide {
    /// Human-controlled fighter
    Player,
    /// AI-controlled fighter
    Enemy,
}

impl FighterSide {
    /// Returns the other corner.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Returns true for the human-controlled fighter.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

impl fmt::Display for FighterSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// Monotonic counter identifying one match (round) instance.
///
/// Deferred work scheduled during a match is stamped with the generation it
/// belongs to and dropped if a rematch has started since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchGeneration(u64);

impl MatchGeneration {
    /// Generation of the first match after launch.
    pub const FIRST: Self = Self(1);

    /// Creates a generation from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Default for MatchGeneration {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for MatchGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
