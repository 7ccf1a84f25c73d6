//! Scripted opponent.
//!
//! The AI is a weighted-random finite-state controller. Each tick it either
//! sits idle, continues a committed ("sticky") walk, or on a small fraction
//! of ticks makes a fresh range-based decision. All randomness goes through
//! one seeded generator, so a fixed seed replays the same opponent.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::fighter::{ActionState, Fighter};
use crate::input::{InputState, MoveDirection};
use crate::tuning::AiTuning;

/// Committed movement that outlives a single decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StickyMovement {
    /// Direction being held.
    pub direction: MoveDirection,
    /// Frames left before the AI may re-decide.
    pub frames_remaining: u32,
}

impl StickyMovement {
    /// Whether a commitment is still running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.frames_remaining > 0
    }

    fn commit(&mut self, direction: MoveDirection, frames: u32) {
        self.direction = direction;
        self.frames_remaining = frames;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Which branch produced the last decision. Exposed for debugging overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiIntent {
    /// Downed or busy; no input.
    #[default]
    Waiting,
    /// Read an incoming takedown and sprawled.
    Sprawl,
    /// Continuing a committed walk.
    Committed,
    /// Skipped the decision roll this tick.
    Hesitating,
    /// Closing distance.
    Approach,
    /// Throwing something from range.
    Engage,
    /// Backing off to reset the angle.
    Reposition,
}

/// Input synthesizer for an AI-controlled fighter.
#[derive(Debug, Clone)]
pub struct AiController {
    tuning: AiTuning,
    rng: fastrand::Rng,
    sticky: StickyMovement,
    last_intent: AiIntent,
}

impl AiController {
    /// Create a controller with its own seeded generator.
    #[must_use]
    pub fn new(seed: u64, tuning: AiTuning) -> Self {
        Self {
            tuning,
            rng: fastrand::Rng::with_seed(seed),
            sticky: StickyMovement::default(),
            last_intent: AiIntent::Waiting,
        }
    }

    /// Drop any committed movement.
    pub fn reset(&mut self) {
        self.sticky.clear();
        self.last_intent = AiIntent::Waiting;
    }

    /// Current movement commitment.
    #[must_use]
    pub const fn sticky(&self) -> StickyMovement {
        self.sticky
    }

    /// Branch taken by the most recent [`Self::decide`].
    #[must_use]
    pub const fn last_intent(&self) -> AiIntent {
        self.last_intent
    }

    /// Tuning in use.
    #[must_use]
    pub const fn tuning(&self) -> &AiTuning {
        &self.tuning
    }

    /// Decide this tick's input for `ai` fighting `opponent`.
    pub fn decide(&mut self, ai: &Fighter, opponent: &Fighter) -> InputState {
        let (intent, input) = self.evaluate(ai, opponent);
        if intent != self.last_intent {
            trace!(side = %ai.side, ?intent, "ai intent changed");
        }
        self.last_intent = intent;
        input
    }

    fn evaluate(&mut self, ai: &Fighter, opponent: &Fighter) -> (AiIntent, InputState) {
        let mut input = InputState::NONE;

        if ai.state == ActionState::Ko || ai.state_timer > 0 {
            return (AiIntent::Waiting, input);
        }

        let t = &self.tuning;
        let distance = ai.distance_to(opponent);
        let attack_range = ai.width * t.attack_range;
        let facing = ai.facing_toward(opponent);

        if opponent.state == ActionState::Takedown
            && distance < attack_range + t.sprawl_read_margin
            && facing
            && self.rng.f32() < t.sprawl_chance
        {
            input.block = true;
            return (AiIntent::Sprawl, input);
        }

        if self.sticky.is_active() {
            self.sticky.frames_remaining -= 1;
            return (AiIntent::Committed, input.with_movement(self.sticky.direction));
        }

        if self.rng.f32() >= t.decision_chance {
            return (AiIntent::Hesitating, input);
        }

        if distance > attack_range + t.approach_buffer {
            let frames = t.approach_frames + jitter(&mut self.rng, t.approach_jitter);
            let direction = MoveDirection::toward(ai.x, opponent.x);
            self.sticky.commit(direction, frames);
            input = input.with_movement(direction);

            if self.rng.f32() < t.long_shot_chance && ai.stamina > t.long_shot_stamina {
                input.takedown = true;
            }
            (AiIntent::Approach, input)
        } else if distance < attack_range && facing {
            self.sticky.clear();
            (AiIntent::Engage, self.pick_attack(ai, distance))
        } else {
            let frames = t.reposition_frames + jitter(&mut self.rng, t.reposition_jitter);
            let direction = MoveDirection::away_from(ai.x, opponent.x);
            self.sticky.commit(direction, frames);
            (AiIntent::Reposition, input.with_movement(direction))
        }
    }

    /// Weighted pick among punch, kick, takedown and block.
    ///
    /// A roll that lands in a band whose stamina floor fails drops through to
    /// the next band, ending in block.
    fn pick_attack(&mut self, ai: &Fighter, distance: f32) -> InputState {
        let t = &self.tuning;
        let roll = self.rng.f32();
        let input = InputState::NONE;

        if roll < t.punch_band && ai.stamina > t.punch_stamina {
            input.with_punch()
        } else if roll < t.kick_band && ai.stamina > t.kick_stamina {
            input.with_kick()
        } else if roll < t.takedown_band
            && ai.stamina > t.takedown_stamina
            && distance > ai.width * t.takedown_min_gap
        {
            input.with_takedown()
        } else {
            input.with_block()
        }
    }
}

/// Uniform extra frames in `0..span`.
fn jitter(rng: &mut fastrand::Rng, span: u32) -> u32 {
    if span == 0 {
        0
    } else {
        rng.u32(0..span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CombatTuning;
    use rkena_common::FighterSide;

    fn fighters() -> (Fighter, Fighter) {
        let t = CombatTuning::default();
        (
            Fighter::spawn(FighterSide::Enemy, &t),
            Fighter::spawn(FighterSide::Player, &t),
        )
    }

    #[test]
    fn test_busy_ai_emits_nothing() {
        let (mut ai, player) = fighters();
        let mut controller = AiController::new(1, AiTuning::default());
        ai.set_state(ActionState::Hit, 10);
        for _ in 0..100 {
            assert!(controller.decide(&ai, &player).is_idle());
        }
        assert_eq!(controller.last_intent(), AiIntent::Waiting);
    }

    #[test]
    fn test_knocked_out_ai_emits_nothing() {
        let (mut ai, player) = fighters();
        let mut controller = AiController::new(2, AiTuning::default());
        ai.knock_out();
        for _ in 0..100 {
            assert!(controller.decide(&ai, &player).is_idle());
        }
    }

    #[test]
    fn test_far_ai_approaches_and_commits() {
        let (ai, player) = fighters();
        let tuning = AiTuning {
            decision_chance: 1.0,
            long_shot_chance: 0.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(3, tuning);

        let input = controller.decide(&ai, &player);
        assert!(input.left, "AI at 550 should walk toward the player at 150");
        assert_eq!(controller.last_intent(), AiIntent::Approach);

        let sticky = controller.sticky();
        assert_eq!(sticky.direction, MoveDirection::Left);
        assert!((30..60).contains(&sticky.frames_remaining));

        let input = controller.decide(&ai, &player);
        assert!(input.left);
        assert_eq!(controller.last_intent(), AiIntent::Committed);
        assert_eq!(controller.sticky().frames_remaining, sticky.frames_remaining - 1);
    }

    #[test]
    fn test_never_deciding_means_idle() {
        let (ai, player) = fighters();
        let tuning = AiTuning {
            decision_chance: 0.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(4, tuning);
        for _ in 0..500 {
            assert!(controller.decide(&ai, &player).is_idle());
        }
    }

    #[test]
    fn test_in_range_facing_attacks() {
        let (mut ai, player) = fighters();
        ai.x = player.x + 100.0;
        let tuning = AiTuning {
            decision_chance: 1.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(5, tuning);
        for _ in 0..200 {
            let input = controller.decide(&ai, &player);
            let pressed = [input.punch, input.kick, input.takedown, input.block]
                .iter()
                .filter(|p| **p)
                .count();
            assert_eq!(pressed, 1, "exactly one action per engage decision");
            assert!(!input.left && !input.right);
            assert!(!controller.sticky().is_active());
        }
    }

    #[test]
    fn test_in_range_not_facing_repositions_away() {
        let (mut ai, player) = fighters();
        ai.x = player.x + 100.0;
        ai.facing = crate::fighter::Facing::Right;
        let tuning = AiTuning {
            decision_chance: 1.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(6, tuning);
        let input = controller.decide(&ai, &player);
        assert!(input.right, "backs away from the player on the left");
        assert_eq!(controller.last_intent(), AiIntent::Reposition);
        assert!((20..40).contains(&controller.sticky().frames_remaining));
    }

    #[test]
    fn test_sprawl_on_incoming_takedown() {
        let (mut ai, mut player) = fighters();
        ai.x = player.x + 150.0;
        player.set_state(ActionState::Takedown, 40);
        let tuning = AiTuning {
            sprawl_chance: 1.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(7, tuning);
        let input = controller.decide(&ai, &player);
        assert!(input.block);
        assert_eq!(controller.last_intent(), AiIntent::Sprawl);
    }

    #[test]
    fn test_exhausted_ai_only_blocks() {
        let (mut ai, player) = fighters();
        ai.x = player.x + 100.0;
        ai.stamina = 15.0;
        let tuning = AiTuning {
            decision_chance: 1.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(8, tuning);
        for _ in 0..200 {
            let input = controller.decide(&ai, &player);
            assert!(input.block && !input.punch && !input.kick && !input.takedown);
        }
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let (ai, player) = fighters();
        let mut a = AiController::new(99, AiTuning::default());
        let mut b = AiController::new(99, AiTuning::default());
        for _ in 0..1000 {
            assert_eq!(a.decide(&ai, &player), b.decide(&ai, &player));
        }
    }

    #[test]
    fn test_reset_clears_commitment() {
        let (ai, player) = fighters();
        let tuning = AiTuning {
            decision_chance: 1.0,
            ..AiTuning::default()
        };
        let mut controller = AiController::new(10, tuning);
        controller.decide(&ai, &player);
        assert!(controller.sticky().is_active());
        controller.reset();
        assert!(!controller.sticky().is_active());
    }
}
