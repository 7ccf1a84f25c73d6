//! Read-only views published to presentation.
//!
//! [`Snapshot`] is the HUD contract and owns its data. [`RenderView`] borrows
//! the world for one frame so a renderer can draw sprites and particles
//! without copying them.

use rkena_common::{FighterSide, Rect};
use serde::{Deserialize, Serialize};

use crate::commentary::Shout;
use crate::fighter::{ActionState, Facing, Fighter};
use crate::particles::Particle;

/// Health and stamina of one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterVitals {
    /// Current health.
    pub health: f32,
    /// Health cap.
    pub max_health: f32,
    /// Current stamina.
    pub stamina: f32,
    /// Stamina cap.
    pub max_stamina: f32,
}

impl From<&Fighter> for FighterVitals {
    fn from(fighter: &Fighter) -> Self {
        Self {
            health: fighter.health,
            max_health: fighter.max_health,
            stamina: fighter.stamina,
            max_stamina: fighter.max_stamina,
        }
    }
}

/// Per-frame HUD data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The human fighter.
    pub fighter1: FighterVitals,
    /// The AI fighter.
    pub fighter2: FighterVitals,
    /// Whole seconds left on the round clock.
    pub time_remaining: u32,
}

/// What a renderer needs to draw one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    /// Identity.
    pub side: FighterSide,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Body width.
    pub width: f32,
    /// Body height.
    pub height: f32,
    /// Facing.
    pub facing: Facing,
    /// Current action.
    pub state: ActionState,
    /// Frames left in the action.
    pub state_timer: u32,
    /// Live hitbox, for debug overlays.
    pub hitbox: Option<Rect>,
}

impl From<&Fighter> for FighterView {
    fn from(fighter: &Fighter) -> Self {
        Self {
            side: fighter.side,
            x: fighter.x,
            y: fighter.y,
            width: fighter.width,
            height: fighter.height,
            facing: fighter.facing,
            state: fighter.state,
            state_timer: fighter.state_timer,
            hitbox: fighter.hitbox,
        }
    }
}

/// Everything drawable this frame.
#[derive(Debug, Clone, Serialize)]
pub struct RenderView<'a> {
    /// The human fighter.
    pub player: FighterView,
    /// The AI fighter.
    pub enemy: FighterView,
    /// Live blood particles.
    pub particles: &'a [Particle],
    /// Commentator bubble, if any.
    pub shout: Option<Shout>,
    /// Fraction of a simulation step not yet run.
    pub alpha: f32,
    /// HUD data.
    pub snapshot: Snapshot,
}
