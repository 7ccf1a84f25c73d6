//! Input sources for the human fighter.
//!
//! The headless host has no keyboard, so the human corner is fed by an
//! [`InputSource`]: nothing at all or a mirrored AI.

use rkena_gameplay::ai::AiController;
use rkena_gameplay::input::InputState;
use rkena_gameplay::tuning::AiTuning;
use rkena_gameplay::world::SimulationWorld;

use crate::config::InputMode;

/// Mixed into the match seed so the autopilot does not mirror the opponent.
const AUTOPILOT_SALT: u64 = 0xA5A5_5A5A_C3C3_3C3C;

/// Supplies the human fighter's input once per rendered frame.
pub trait InputSource {
    /// Input for the coming frame.
    fn next_input(&mut self, world: &SimulationWorld) -> InputState;

    /// Forget any per-match memory.
    fn reset(&mut self) {}
}

/// Never presses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn next_input(&mut self, _world: &SimulationWorld) -> InputState {
        InputState::NONE
    }
}

/// Drives the human fighter with its own AI controller.
#[derive(Debug, Clone)]
pub struct AutopilotInput {
    ai: AiController,
}

impl AutopilotInput {
    /// Create an autopilot seeded independently of the opponent.
    #[must_use]
    pub fn new(seed: u64, tuning: AiTuning) -> Self {
        Self {
            ai: AiController::new(seed ^ AUTOPILOT_SALT, tuning),
        }
    }
}

impl InputSource for AutopilotInput {
    fn next_input(&mut self, world: &SimulationWorld) -> InputState {
        self.ai.decide(world.player(), world.enemy())
    }

    fn reset(&mut self) {
        self.ai.reset();
    }
}

/// Build the source selected by `mode`.
#[must_use]
pub fn source_for(mode: InputMode, seed: u64, tuning: &AiTuning) -> Box<dyn InputSource> {
    match mode {
        InputMode::Autopilot => Box::new(AutopilotInput::new(seed, tuning.clone())),
        InputMode::Idle => Box::new(IdleInput),
    }
}
