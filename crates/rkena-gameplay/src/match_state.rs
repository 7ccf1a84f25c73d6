//! Match lifecycle: menu, fight, result screen, rematch.

use rkena_common::{ConfigError, FighterSide, MatchGeneration};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::{MatchEvent, MatchObserver};
use crate::input::InputState;
use crate::snapshot::Snapshot;
use crate::tuning::{AiTuning, CombatTuning};
use crate::world::{GameOverSignal, SimulationWorld};

/// Top-level screen the match is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the first fight.
    #[default]
    Menu,
    /// Simulation running.
    Playing,
    /// The human won.
    Victory,
    /// The human lost or drew.
    GameOver,
}

impl MatchPhase {
    /// Whether a result screen is showing.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::GameOver)
    }
}

/// How the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishMethod {
    /// A fighter was knocked out.
    Knockout,
    /// The clock ran out; health decided it.
    Decision,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winner, `None` for a draw.
    pub winner: Option<FighterSide>,
    /// How it ended.
    pub method: FinishMethod,
}

impl MatchResult {
    /// `winner` knocked the other fighter out.
    #[must_use]
    pub const fn knockout(winner: FighterSide) -> Self {
        Self {
            winner: Some(winner),
            method: FinishMethod::Knockout,
        }
    }

    /// Time-up decision: the healthier fighter wins, equal health draws.
    #[must_use]
    pub fn decision(player_health: f32, enemy_health: f32) -> Self {
        let winner = if player_health > enemy_health {
            Some(FighterSide::Player)
        } else if enemy_health > player_health {
            Some(FighterSide::Enemy)
        } else {
            None
        };
        Self {
            winner,
            method: FinishMethod::Decision,
        }
    }

    /// Whether the human won.
    #[must_use]
    pub fn player_won(&self) -> bool {
        self.winner == Some(FighterSide::Player)
    }

    /// Result screen for this outcome.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if self.player_won() {
            MatchPhase::Victory
        } else {
            MatchPhase::GameOver
        }
    }
}

/// Drives [`SimulationWorld`]s across rematches.
#[derive(Debug, Clone)]
pub struct MatchController {
    tuning: CombatTuning,
    ai_tuning: AiTuning,
    seed: u64,
    phase: MatchPhase,
    generation: Option<MatchGeneration>,
    world: Option<SimulationWorld>,
    result: Option<MatchResult>,
}

impl MatchController {
    /// Create a controller sitting at the menu.
    ///
    /// # Errors
    /// Returns the first tuning value that breaks a structural rule.
    pub fn new(tuning: CombatTuning, ai_tuning: AiTuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        ai_tuning.validate(&tuning)?;
        Ok(Self {
            tuning,
            ai_tuning,
            seed,
            phase: MatchPhase::Menu,
            generation: None,
            world: None,
            result: None,
        })
    }

    /// Start a fresh fight. Works from any phase; the previous world and any
    /// game-over signal it still owes are discarded.
    pub fn start_round(&mut self) -> MatchGeneration {
        let generation = self.generation.map_or(MatchGeneration::FIRST, MatchGeneration::next);
        let seed = self.seed.wrapping_add(generation.raw().saturating_sub(1));

        self.world = Some(SimulationWorld::with_generation(
            self.tuning.clone(),
            self.ai_tuning.clone(),
            seed,
            generation,
        ));
        self.generation = Some(generation);
        self.result = None;
        self.phase = MatchPhase::Playing;
        generation
    }

    /// Feed one rendered frame. Returns `None` outside [`MatchPhase::Playing`].
    pub fn frame(&mut self, dt: f32, input: &InputState) -> Option<Snapshot> {
        if self.phase != MatchPhase::Playing {
            return None;
        }
        let world = self.world.as_mut()?;
        let snapshot = world.frame(dt, input);
        if let Some(signal) = world.take_game_over() {
            self.on_game_over(signal);
        }
        Some(snapshot)
    }

    /// Apply a game-over signal. Signals from an earlier match, or arriving
    /// when no fight is running, are ignored and return false.
    pub fn on_game_over(&mut self, signal: GameOverSignal) -> bool {
        if self.phase != MatchPhase::Playing || Some(signal.generation) != self.generation {
            debug!(
                signal = %signal.generation,
                current = ?self.generation,
                "ignoring stale game over"
            );
            return false;
        }
        self.result = Some(signal.result);
        self.phase = signal.result.phase();
        info!(generation = %signal.generation, phase = ?self.phase, "match finished");
        true
    }

    /// Deliver every queued event to `observer`.
    pub fn dispatch_events(&mut self, observer: &mut dyn MatchObserver) {
        if let Some(world) = self.world.as_mut() {
            world.events_mut().dispatch(observer);
        }
    }

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.world.as_mut().map(SimulationWorld::drain_events).unwrap_or_default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Result of the last finished match.
    #[must_use]
    pub const fn result(&self) -> Option<MatchResult> {
        self.result
    }

    /// Generation of the current or last match.
    #[must_use]
    pub const fn generation(&self) -> Option<MatchGeneration> {
        self.generation
    }

    /// The running world, if a fight has started.
    #[must_use]
    pub const fn world(&self) -> Option<&SimulationWorld> {
        self.world.as_ref()
    }

    /// Mutable world access, for scripted setups.
    pub fn world_mut(&mut self) -> Option<&mut SimulationWorld> {
        self.world.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> MatchController {
        MatchController::new(CombatTuning::default(), AiTuning::default(), 77).expect("valid")
    }

    fn knock_out(controller: &mut MatchController, side: FighterSide) {
        let world = controller.world_mut().expect("world");
        let (player, enemy) = world.fighters_mut();
        match side {
            FighterSide::Player => player.health = 0.0,
            FighterSide::Enemy => enemy.health = 0.0,
        }
    }

    fn run_seconds(controller: &mut MatchController, seconds: u32) {
        for _ in 0..seconds {
            controller.frame(1.0, &InputState::NONE);
        }
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let tuning = CombatTuning {
            takedown_window_start: 0.9,
            ..CombatTuning::default()
        };
        assert!(MatchController::new(tuning, AiTuning::default(), 1).is_err());
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut controller = controller();
        assert_eq!(controller.phase(), MatchPhase::Menu);
        assert!(controller.frame(1.0, &InputState::NONE).is_none());
        assert!(controller.world().is_none());
    }

    #[test]
    fn test_player_knockout_victory() {
        let mut controller = controller();
        assert_eq!(controller.start_round(), MatchGeneration::FIRST);
        assert_eq!(controller.phase(), MatchPhase::Playing);

        knock_out(&mut controller, FighterSide::Enemy);
        run_seconds(&mut controller, 2);
        assert_eq!(controller.phase(), MatchPhase::Playing, "knockout animation still playing");
        run_seconds(&mut controller, 2);

        assert_eq!(controller.phase(), MatchPhase::Victory);
        assert_eq!(controller.result(), Some(MatchResult::knockout(FighterSide::Player)));
        assert!(controller.frame(1.0, &InputState::NONE).is_none());
    }

    #[test]
    fn test_enemy_knockout_game_over() {
        let mut controller = controller();
        controller.start_round();
        knock_out(&mut controller, FighterSide::Player);
        run_seconds(&mut controller, 4);
        assert_eq!(controller.phase(), MatchPhase::GameOver);
    }

    #[test]
    fn test_rematch_resets_and_bumps_generation() {
        let mut controller = controller();
        controller.start_round();
        knock_out(&mut controller, FighterSide::Enemy);
        run_seconds(&mut controller, 4);
        assert!(controller.phase().is_finished());

        let generation = controller.start_round();
        assert_eq!(generation.raw(), 2);
        assert_eq!(controller.phase(), MatchPhase::Playing);
        assert!(controller.result().is_none());
        let world = controller.world().expect("world");
        assert_eq!(world.enemy().health, 100.0);
        assert_eq!(world.snapshot().time_remaining, 180);
    }

    #[test]
    fn test_stale_signal_is_ignored() {
        let mut controller = controller();
        controller.start_round();
        controller.start_round();

        let stale = GameOverSignal {
            generation: MatchGeneration::FIRST,
            result: MatchResult::knockout(FighterSide::Enemy),
        };
        assert!(!controller.on_game_over(stale));
        assert_eq!(controller.phase(), MatchPhase::Playing);
    }

    #[test]
    fn test_fast_rematch_drops_pending_game_over() {
        let mut controller = controller();
        controller.start_round();
        knock_out(&mut controller, FighterSide::Player);
        run_seconds(&mut controller, 1);

        controller.start_round();
        run_seconds(&mut controller, 5);
        assert_eq!(controller.phase(), MatchPhase::Playing);
    }

    #[test]
    fn test_dispatch_to_observer() {
        let mut controller = controller();
        controller.start_round();
        let mut seen: Vec<MatchEvent> = Vec::new();
        controller.dispatch_events(&mut seen);
        assert!(matches!(seen.first(), Some(MatchEvent::RoundStarted { .. })));
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_decision_rules() {
        assert_eq!(MatchResult::decision(50.0, 40.0).winner, Some(FighterSide::Player));
        assert_eq!(MatchResult::decision(10.0, 40.0).winner, Some(FighterSide::Enemy));
        assert_eq!(MatchResult::decision(40.0, 40.0).winner, None);
        assert_eq!(MatchResult::decision(40.0, 40.0).phase(), MatchPhase::GameOver);
    }
}
