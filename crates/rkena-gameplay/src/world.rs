//! The simulation world.
//!
//! One [`SimulationWorld`] owns everything that changes during a match: both
//! fighters, the AI, particles, the round clock and the fixed-step bank. The
//! host feeds it wall-clock deltas and the human's input and reads snapshots
//! back. A rematch builds a new world rather than resetting this one.

use rkena_common::{FighterSide, MatchGeneration};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::AiController;
use crate::combat::{self, Exchange};
use crate::commentary::{Commentary, ShoutKind};
use crate::events::{EventLog, MatchEvent};
use crate::fighter::Fighter;
use crate::input::InputState;
use crate::match_state::MatchResult;
use crate::particles::ParticleSystem;
use crate::snapshot::{RenderView, Snapshot};
use crate::state_machine;
use crate::timing::{FixedTimestep, RoundClock};
use crate::tuning::{AiTuning, CombatTuning};

/// Mixed into the match seed to get an independent effects stream.
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// The deferred end-of-match signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverSignal {
    /// Match this signal belongs to.
    pub generation: MatchGeneration,
    /// Final result.
    pub result: MatchResult,
}

#[derive(Debug, Clone, Copy)]
struct PendingGameOver {
    signal: GameOverSignal,
    fires_at: f64,
}

/// All mutable match state.
#[derive(Debug, Clone)]
pub struct SimulationWorld {
    tuning: CombatTuning,
    generation: MatchGeneration,
    player: Fighter,
    enemy: Fighter,
    ai: AiController,
    particles: ParticleSystem,
    commentary: Commentary,
    fx_rng: fastrand::Rng,
    clock: RoundClock,
    timestep: FixedTimestep,
    /// Set once, by the first knockout or the time-up decision.
    outcome: Option<MatchResult>,
    pending: Option<PendingGameOver>,
    fired: Option<GameOverSignal>,
    game_over_sent: bool,
    /// Wall-clock seconds fed through [`Self::frame`].
    elapsed: f64,
    steps: u64,
    events: EventLog,
}

impl SimulationWorld {
    /// Spawn both fighters and start the clock.
    #[must_use]
    pub fn new(tuning: CombatTuning, ai_tuning: AiTuning, seed: u64) -> Self {
        Self::with_generation(tuning, ai_tuning, seed, MatchGeneration::FIRST)
    }

    /// Like [`Self::new`], tagged with a match generation.
    #[must_use]
    pub fn with_generation(
        tuning: CombatTuning,
        ai_tuning: AiTuning,
        seed: u64,
        generation: MatchGeneration,
    ) -> Self {
        let player = Fighter::spawn(FighterSide::Player, &tuning);
        let enemy = Fighter::spawn(FighterSide::Enemy, &tuning);
        let mut events = EventLog::new();
        events.push(MatchEvent::RoundStarted { generation });

        info!(%generation, seed, round_seconds = tuning.round_seconds, "round started");

        Self {
            generation,
            player,
            enemy,
            ai: AiController::new(seed, ai_tuning),
            particles: ParticleSystem::new(tuning.particle_gravity),
            commentary: Commentary::default(),
            fx_rng: fastrand::Rng::with_seed(seed ^ FX_SEED_SALT),
            clock: RoundClock::new(tuning.round_seconds),
            timestep: FixedTimestep::new(tuning.fixed_step_secs, tuning.max_frame_backlog_secs),
            outcome: None,
            pending: None,
            fired: None,
            game_over_sent: false,
            elapsed: 0.0,
            steps: 0,
            events,
            tuning,
        }
    }

    /// Advance the whole simulation by exactly one fixed step.
    ///
    /// Order: human fighter, AI decision and AI fighter, both hit directions,
    /// cosmetics, then the knockout check. Once time has expired the fighters
    /// stop moving but cosmetics keep aging.
    pub fn step(&mut self, human: &InputState) {
        self.steps += 1;

        if !self.clock.is_expired() {
            state_machine::advance(&mut self.player, human, &self.enemy, &self.tuning);
            let ai_input = self.ai.decide(&self.enemy, &self.player);
            state_machine::advance(&mut self.enemy, &ai_input, &self.player, &self.tuning);

            self.exchange(FighterSide::Player);
            self.exchange(FighterSide::Enemy);
        }

        self.particles.update();
        self.commentary.tick();
        self.check_knockouts();
    }

    /// Feed one rendered frame of `dt` wall-clock seconds.
    ///
    /// Runs however many fixed steps the bank pays out, all with the same
    /// human input, then ticks the round clock and the game-over delay.
    pub fn frame(&mut self, dt: f32, human: &InputState) -> Snapshot {
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.step(human);
        }

        if self.outcome.is_none() && self.clock.advance(dt) {
            self.time_expired();
        }

        if dt.is_finite() {
            self.elapsed += f64::from(dt.max(0.0));
        }
        self.fire_due_game_over();

        self.snapshot()
    }

    /// HUD data for the latest completed step.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            fighter1: (&self.player).into(),
            fighter2: (&self.enemy).into(),
            time_remaining: self.clock.time_remaining(),
        }
    }

    /// Everything a renderer draws this frame.
    #[must_use]
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            player: (&self.player).into(),
            enemy: (&self.enemy).into(),
            particles: self.particles.as_slice(),
            shout: self.commentary.current(),
            alpha: self.timestep.interpolation_alpha(),
            snapshot: self.snapshot(),
        }
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain()
    }

    /// Mutable access to the event queue.
    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    /// The game-over signal, once, after the delay has elapsed.
    pub fn take_game_over(&mut self) -> Option<GameOverSignal> {
        self.fired.take()
    }

    /// Whether the game-over signal has fired.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over_sent
    }

    /// Result of the match, decided at knockout or time-up.
    #[must_use]
    pub const fn outcome(&self) -> Option<MatchResult> {
        self.outcome
    }

    /// Human fighter.
    #[must_use]
    pub const fn player(&self) -> &Fighter {
        &self.player
    }

    /// AI fighter.
    #[must_use]
    pub const fn enemy(&self) -> &Fighter {
        &self.enemy
    }

    /// Both fighters, for scripted setups.
    pub fn fighters_mut(&mut self) -> (&mut Fighter, &mut Fighter) {
        (&mut self.player, &mut self.enemy)
    }

    /// Fighter on `side`.
    #[must_use]
    pub const fn fighter(&self, side: FighterSide) -> &Fighter {
        match side {
            FighterSide::Player => &self.player,
            FighterSide::Enemy => &self.enemy,
        }
    }

    /// The AI controller.
    #[must_use]
    pub const fn ai(&self) -> &AiController {
        &self.ai
    }

    /// Live particles.
    #[must_use]
    pub const fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Commentator state.
    #[must_use]
    pub const fn commentary(&self) -> &Commentary {
        &self.commentary
    }

    /// Tuning in use.
    #[must_use]
    pub const fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    /// Match generation.
    #[must_use]
    pub const fn generation(&self) -> MatchGeneration {
        self.generation
    }

    /// Fixed steps run so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Wall-clock seconds fed through [`Self::frame`].
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn exchange(&mut self, attacker_side: FighterSide) {
        let (attacker, defender) = match attacker_side {
            FighterSide::Player => (&mut self.player, &mut self.enemy),
            FighterSide::Enemy => (&mut self.enemy, &mut self.player),
        };
        let Some(exchange) = combat::resolve(attacker, defender, &self.tuning) else {
            return;
        };

        if let Some(burst) = exchange.blood(defender, &self.tuning) {
            self.particles.spawn_burst(burst, &mut self.fx_rng);
        }
        if matches!(exchange, Exchange::TakedownLanded { .. }) {
            self.commentary
                .shout(ShoutKind::Takedown, self.tuning.shout_frames, &mut self.fx_rng);
        }
        self.events.push(MatchEvent::from_exchange(attacker_side, exchange));
    }

    fn check_knockouts(&mut self) {
        for side in [FighterSide::Player, FighterSide::Enemy] {
            let fighter = match side {
                FighterSide::Player => &mut self.player,
                FighterSide::Enemy => &mut self.enemy,
            };
            if fighter.health > 0.0 || fighter.is_knocked_out() {
                continue;
            }
            fighter.knock_out();

            info!(loser = %side, step = self.steps, "knockout");
            self.events.push(MatchEvent::Knockout { loser: side });
            self.conclude(MatchResult::knockout(side.opponent()));
        }
    }

    fn time_expired(&mut self) {
        let result = MatchResult::decision(self.player.health, self.enemy.health);
        info!(
            player_health = self.player.health,
            enemy_health = self.enemy.health,
            winner = ?result.winner,
            "time expired"
        );
        self.events.push(MatchEvent::TimeExpired);
        self.conclude(result);
    }

    /// Record the first result and schedule the game-over signal. Later
    /// calls are ignored.
    fn conclude(&mut self, result: MatchResult) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(result);
        let fires_at = self.elapsed + f64::from(self.tuning.game_over_delay_secs.max(0.0));
        self.pending = Some(PendingGameOver {
            signal: GameOverSignal {
                generation: self.generation,
                result,
            },
            fires_at,
        });
        debug!(fires_at, "game over scheduled");
    }

    fn fire_due_game_over(&mut self) {
        let Some(pending) = self.pending else {
            return;
        };
        if self.elapsed < pending.fires_at || self.game_over_sent {
            return;
        }
        self.pending = None;
        self.game_over_sent = true;
        self.fired = Some(pending.signal);

        info!(generation = %self.generation, winner = ?pending.signal.result.winner, "game over");
        self.events.push(MatchEvent::GameOver {
            result: pending.signal.result,
        });
    }
}
