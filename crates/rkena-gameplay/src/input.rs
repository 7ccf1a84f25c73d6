//! Per-frame input intents.
//!
//! The human fighter's [`InputState`] comes from the host (keyboard, touch,
//! a script); the AI fighter's is synthesized by [`crate::ai::AiController`].
//! Only the current frame matters: nothing is queued.

use serde::{Deserialize, Serialize};

/// Six independent intents for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Walk toward x = 0
    pub left: bool,
    /// Walk toward the far wall
    pub right: bool,
    /// Jab
    pub punch: bool,
    /// Kick
    pub kick: bool,
    /// Guard
    pub block: bool,
    /// Shoot for a takedown
    pub takedown: bool,
}

impl InputState {
    /// No intents at all.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        punch: false,
        kick: false,
        block: false,
        takedown: false,
    };

    /// Returns true when nothing is pressed.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::NONE
    }

    /// Horizontal intent. Left wins when both are held.
    #[must_use]
    pub fn movement(&self) -> MoveDirection {
        if self.left {
            MoveDirection::Left
        } else if self.right {
            MoveDirection::Right
        } else {
            MoveDirection::Still
        }
    }

    /// Hold a movement direction.
    #[must_use]
    pub fn with_movement(mut self, direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Left => self.left = true,
            MoveDirection::Right => self.right = true,
            MoveDirection::Still => {},
        }
        self
    }

    /// Press punch.
    #[must_use]
    pub fn with_punch(mut self) -> Self {
        self.punch = true;
        self
    }

    /// Press kick.
    #[must_use]
    pub fn with_kick(mut self) -> Self {
        self.kick = true;
        self
    }

    /// Press block.
    #[must_use]
    pub fn with_block(mut self) -> Self {
        self.block = true;
        self
    }

    /// Press takedown.
    #[must_use]
    pub fn with_takedown(mut self) -> Self {
        self.takedown = true;
        self
    }
}

/// Signed horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Toward x = 0.
    Left,
    /// No movement.
    #[default]
    Still,
    /// Toward the far wall.
    Right,
}

impl MoveDirection {
    /// -1, 0 or +1.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Still => 0.0,
            Self::Right => 1.0,
        }
    }

    /// Direction from `from_x` toward `to_x`.
    #[must_use]
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Direction from `from_x` away from `to_x`.
    #[must_use]
    pub fn away_from(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Self::Left
        } else {
            Self::Right
        }
    }
}
