//! Headless match runner.
//!
//! Owns the host loop: frame timing, the human input source, the match
//! controller and a logging observer. Runs the configured number of matches
//! back to back and returns a summary.

use anyhow::{bail, Result};
use rkena_common::{FighterSide, MatchGeneration};
use rkena_gameplay::events::{MatchEvent, MatchObserver};
use rkena_gameplay::match_state::{MatchController, MatchPhase, MatchResult};
use rkena_gameplay::snapshot::Snapshot;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::hud::hud_line;
use crate::input::{source_for, InputSource};
use crate::timing::FrameTiming;

/// Per-fighter tallies for one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CornerStats {
    /// Clean punches and kicks.
    pub strikes_landed: u32,
    /// Punches and kicks into the guard.
    pub strikes_blocked: u32,
    /// Completed takedowns.
    pub takedowns_landed: u32,
    /// Takedowns stuffed by a sprawl.
    pub takedowns_sprawled: u32,
}

/// Logs match events and keeps tallies.
#[derive(Debug, Default)]
pub struct LogObserver {
    player: CornerStats,
    enemy: CornerStats,
    clashes: u32,
}

impl LogObserver {
    fn corner(&mut self, side: FighterSide) -> &mut CornerStats {
        match side {
            FighterSide::Player => &mut self.player,
            FighterSide::Enemy => &mut self.enemy,
        }
    }
}

impl MatchObserver for LogObserver {
    fn on_event(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::RoundStarted { generation } => debug!(%generation, "fight"),
            MatchEvent::StrikeLanded {
                attacker,
                kind,
                damage,
            } => {
                debug!(%attacker, ?kind, damage, "strike landed");
                self.corner(*attacker).strikes_landed += 1;
            },
            MatchEvent::StrikeBlocked {
                attacker,
                kind,
                stamina_loss,
            } => {
                debug!(%attacker, ?kind, stamina_loss, "strike blocked");
                self.corner(*attacker).strikes_blocked += 1;
            },
            MatchEvent::TakedownLanded { attacker, damage } => {
                info!(%attacker, damage, "TAKEDOWN!");
                self.corner(*attacker).takedowns_landed += 1;
            },
            MatchEvent::TakedownSprawled { attacker } => {
                debug!(%attacker, "takedown sprawled");
                self.corner(*attacker).takedowns_sprawled += 1;
            },
            MatchEvent::TakedownClash { attacker } => {
                debug!(%attacker, "takedown clash");
                self.clashes += 1;
            },
            MatchEvent::Knockout { loser } => info!(%loser, "knockout"),
            MatchEvent::TimeExpired => info!("time expired"),
            MatchEvent::GameOver { result } => info!(winner = ?result.winner, method = ?result.method, "game over"),
        }
    }
}

/// Outcome of one match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    /// Match generation.
    pub generation: MatchGeneration,
    /// Seed the match ran with.
    pub seed: u64,
    /// Final result; `None` if the frame cap hit first.
    pub result: Option<MatchResult>,
    /// Rendered frames.
    pub frames: u64,
    /// Fixed simulation steps.
    pub steps: u64,
    /// HUD data at the end.
    pub final_snapshot: Snapshot,
    /// Human fighter tallies.
    pub player: CornerStats,
    /// AI fighter tallies.
    pub enemy: CornerStats,
    /// Takedown clashes.
    pub clashes: u32,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// One entry per match, in order.
    pub matches: Vec<MatchSummary>,
}

impl RunSummary {
    /// Matches the human fighter won.
    #[must_use]
    pub fn player_wins(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| m.result.is_some_and(|r| r.player_won()))
            .count()
    }
}

/// Run every configured match.
///
/// # Errors
/// Fails if the balance tables do not validate.
pub fn run(config: &EngineConfig) -> Result<RunSummary> {
    let seed = config.resolve_seed();
    let mut controller = MatchController::new(config.combat.clone(), config.ai.clone(), seed)?;
    let mut timing = FrameTiming::new(config.target_fps).with_realtime(config.realtime);
    let mut source = source_for(config.input, seed, &config.ai);

    info!(
        seed,
        matches = config.matches,
        input = ?config.input,
        target_fps = timing.target_fps(),
        realtime = timing.is_realtime(),
        "starting run"
    );

    let mut summary = RunSummary::default();
    for _ in 0..config.matches {
        let report = run_match(config, &mut controller, &mut timing, source.as_mut(), seed)?;
        summary.matches.push(report);
    }

    info!(
        matches = summary.matches.len(),
        player_wins = summary.player_wins(),
        "run complete"
    );
    Ok(summary)
}

fn run_match(
    config: &EngineConfig,
    controller: &mut MatchController,
    timing: &mut FrameTiming,
    source: &mut dyn InputSource,
    base_seed: u64,
) -> Result<MatchSummary> {
    let generation = controller.start_round();
    let seed = base_seed.wrapping_add(generation.raw().saturating_sub(1));
    source.reset();
    timing.reset();

    let mut observer = LogObserver::default();
    let mut frames = 0u64;

    while frames < config.max_frames {
        let Some(world) = controller.world() else {
            bail!("no world after starting match {generation}");
        };
        let input = source.next_input(world);
        let dt = timing.delta_time();

        let snapshot = controller.frame(dt, &input);
        controller.dispatch_events(&mut observer);
        frames += 1;

        if let Some(snapshot) = snapshot {
            let interval = u64::from(config.hud_interval_frames);
            if interval > 0 && frames % interval == 0 {
                info!("{}", hud_line(&snapshot));
            }
        }

        if controller.phase() != MatchPhase::Playing {
            break;
        }
        timing.sleep_remainder();
    }

    if controller.phase() == MatchPhase::Playing {
        warn!(%generation, frames, "frame cap reached before the match finished");
    }
    debug!(%generation, frames, fps = timing.current_fps(), "match loop finished");

    let Some(world) = controller.world() else {
        bail!("no world after match {generation}");
    };
    Ok(MatchSummary {
        generation,
        seed,
        result: controller.result(),
        frames,
        steps: world.steps(),
        final_snapshot: world.snapshot(),
        player: observer.player,
        enemy: observer.enemy,
        clashes: observer.clashes,
    })
}
