//! Fighter entity model.
//!
//! A [`Fighter`] is a plain mutable record. The state machine and the combat
//! resolver mutate it; everything else reads it.

use rkena_common::{FighterSide, Rect};
use serde::{Deserialize, Serialize};

use crate::tuning::CombatTuning;

/// What a fighter is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionState {
    /// Standing still.
    #[default]
    Idle,
    /// Walking.
    Walk,
    /// Throwing a jab.
    Punch,
    /// Throwing a kick.
    Kick,
    /// Guarding.
    Block,
    /// Stunned by a clean strike.
    Hit,
    /// Knocked out. Terminal for the match.
    Ko,
    /// Shooting for a takedown.
    Takedown,
    /// Put on the mat by a takedown.
    Slammed,
}

impl ActionState {
    /// Busy fighters neither move nor start actions.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Punch | Self::Kick | Self::Hit | Self::Block | Self::Takedown | Self::Slammed
        )
    }

    /// Free states: the fighter is on its feet and not committed to anything.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Idle | Self::Walk)
    }

    /// Reeling fighters cannot be hit again until they recover.
    #[must_use]
    pub const fn is_reeling(self) -> bool {
        matches!(self, Self::Hit | Self::Slammed | Self::Ko)
    }

    /// The attack this state throws, if any.
    #[must_use]
    pub const fn attack_kind(self) -> Option<AttackKind> {
        match self {
            Self::Punch => Some(AttackKind::Punch),
            Self::Kick => Some(AttackKind::Kick),
            Self::Takedown => Some(AttackKind::Takedown),
            _ => None,
        }
    }
}

/// Attacks that carry a hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Jab.
    Punch,
    /// Kick.
    Kick,
    /// Takedown shot.
    Takedown,
}

impl AttackKind {
    /// The action state this attack runs in.
    #[must_use]
    pub const fn state(self) -> ActionState {
        match self {
            Self::Punch => ActionState::Punch,
            Self::Kick => ActionState::Kick,
            Self::Takedown => ActionState::Takedown,
        }
    }
}

/// Actions a fighter can start from a free state, in input priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Takedown shot.
    Takedown,
    /// Jab.
    Punch,
    /// Kick.
    Kick,
    /// Guard.
    Block,
}

impl Action {
    /// Priority order used when several intents are held at once.
    pub const PRIORITY: [Self; 4] = [Self::Takedown, Self::Punch, Self::Kick, Self::Block];

    /// Attack thrown by this action; `None` for block.
    #[must_use]
    pub const fn attack_kind(self) -> Option<AttackKind> {
        match self {
            Self::Takedown => Some(AttackKind::Takedown),
            Self::Punch => Some(AttackKind::Punch),
            Self::Kick => Some(AttackKind::Kick),
            Self::Block => None,
        }
    }
}

/// Facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward x = 0.
    Left,
    /// Facing toward the far wall.
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Direction from `from_x` toward `to_x`. Ties face left.
    #[must_use]
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if from_x < to_x {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// A combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    /// Which corner this fighter fights for.
    pub side: FighterSide,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal displacement applied during the last tick.
    pub vx: f32,
    /// Body width.
    pub width: f32,
    /// Body height.
    pub height: f32,
    /// Facing direction.
    pub facing: Facing,
    /// Current health.
    pub health: f32,
    /// Health cap.
    pub max_health: f32,
    /// Current stamina.
    pub stamina: f32,
    /// Stamina cap.
    pub max_stamina: f32,
    /// Current action.
    pub state: ActionState,
    /// Frames left in the current action; zero when free.
    pub state_timer: u32,
    /// Live attack rectangle, only while an attack is in flight.
    pub hitbox: Option<Rect>,
}

impl Fighter {
    /// Create a fresh fighter at `x`, standing on the ground line.
    ///
    /// The human fighter starts facing right and the AI facing left.
    #[must_use]
    pub fn new(side: FighterSide, x: f32, tuning: &CombatTuning) -> Self {
        Self {
            side,
            x,
            y: tuning.ground_y - tuning.fighter_height,
            vx: 0.0,
            width: tuning.fighter_width,
            height: tuning.fighter_height,
            facing: if side.is_player() {
                Facing::Right
            } else {
                Facing::Left
            },
            health: tuning.max_health,
            max_health: tuning.max_health,
            stamina: tuning.max_stamina,
            max_stamina: tuning.max_stamina,
            state: ActionState::Idle,
            state_timer: 0,
            hitbox: None,
        }
    }

    /// Create a fighter at its corner's spawn point.
    #[must_use]
    pub fn spawn(side: FighterSide, tuning: &CombatTuning) -> Self {
        let x = match side {
            FighterSide::Player => tuning.player_start_x,
            FighterSide::Enemy => tuning.enemy_start_x,
        };
        Self::new(side, x, tuning)
    }

    /// Whether this is the human-controlled fighter.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        self.side.is_player()
    }

    /// Full body rectangle, the target of every hitbox.
    #[must_use]
    pub fn hurtbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Horizontal body center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Whether the fighter has been knocked out.
    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.state == ActionState::Ko
    }

    /// Mid-animation: cannot move or start an action.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Free state with a timer still running (neutral recovery after a clash
    /// or sprawl).
    #[must_use]
    pub fn is_recovering(&self) -> bool {
        self.state.is_free() && self.state_timer > 0
    }

    /// Free, on its feet, and not recovering.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.state.is_free() && self.state_timer == 0
    }

    /// Whether the fighter faces `other`.
    #[must_use]
    pub fn facing_toward(&self, other: &Self) -> bool {
        match self.facing {
            Facing::Right => other.x > self.x,
            Facing::Left => other.x < self.x,
        }
    }

    /// Horizontal distance between left edges.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        (self.x - other.x).abs()
    }

    /// Enter `state` for `frames` ticks.
    pub fn set_state(&mut self, state: ActionState, frames: u32) {
        self.state = state;
        self.state_timer = frames;
    }

    /// Return to idle and drop any hitbox.
    pub fn finish_action(&mut self) {
        self.state = ActionState::Idle;
        self.hitbox = None;
    }

    /// Enter neutral recovery: idle, no hitbox, timer running.
    pub fn recover(&mut self, frames: u32) {
        self.finish_action();
        self.state_timer = frames;
    }

    /// Freeze the fighter for the rest of the match.
    pub fn knock_out(&mut self) {
        self.state = ActionState::Ko;
        self.state_timer = 0;
        self.health = 0.0;
        self.vx = 0.0;
        self.hitbox = None;
    }

    /// Remove health, flooring at zero. Returns the amount actually removed.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        before - self.health
    }

    /// Spend stamina, flooring at zero.
    pub fn drain_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina - amount.max(0.0)).clamp(0.0, self.max_stamina);
    }

    /// Regain stamina, capped at the maximum.
    pub fn restore_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina + amount.max(0.0)).min(self.max_stamina);
    }

    /// Shove the fighter backward, away from where it faces.
    pub fn knock_back(&mut self, distance: f32) {
        self.x -= self.facing.sign() * distance;
    }

    /// Keep the body inside `[0, arena_width - width]`.
    pub fn clamp_to_arena(&mut self, arena_width: f32) {
        self.x = self.x.clamp(0.0, (arena_width - self.width).max(0.0));
    }

    /// Hitbox for `kind` as placed on the frame the attack starts.
    #[must_use]
    pub fn attack_hitbox(&self, kind: AttackKind, tuning: &CombatTuning) -> Rect {
        let profile = tuning.profile(kind);
        let reach = self.width * profile.reach;
        let x = match self.facing {
            Facing::Right => self.x + self.width * 0.5,
            Facing::Left => self.x - reach + self.width * 0.5,
        };
        Rect::new(
            x,
            self.y + self.height * profile.band_top,
            reach,
            self.height * profile.band_height,
        )
    }

    /// Re-anchor a takedown hitbox to the fighter while it lunges.
    pub fn track_takedown_hitbox(&mut self, tuning: &CombatTuning) {
        let reach = self.width * tuning.takedown.reach;
        let x = match self.facing {
            Facing::Right => self.x + self.width * 0.3,
            Facing::Left => self.x - reach + self.width * 0.7,
        };
        if let Some(hitbox) = self.hitbox.as_mut() {
            hitbox.x = x;
        }
    }
}
