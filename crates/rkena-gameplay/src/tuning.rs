//! Balance constants.
//!
//! Speeds, damage, stamina costs and frame counts are data, not code. Every
//! value has a default matching the shipped balance; hosts may override them
//! from a config file. [`CombatTuning::validate`] rejects values that would
//! break the structural contracts the resolver and AI rely on.

use rkena_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::fighter::AttackKind;

/// Per-attack profile: cost, payoff, duration and hitbox shape.
///
/// Hitbox geometry is expressed as fractions of the attacker's body size so
/// the same profile works for any fighter dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveProfile {
    /// Health removed from an undefended target.
    pub damage: f32,
    /// Stamina spent to start the move.
    pub stamina_cost: f32,
    /// Total duration in frames.
    pub frames: u32,
    /// Horizontal reach as a fraction of body width.
    pub reach: f32,
    /// Top of the hitbox band as a fraction of body height.
    pub band_top: f32,
    /// Height of the hitbox band as a fraction of body height.
    pub band_height: f32,
}

impl MoveProfile {
    /// Jab: narrow, high band.
    #[must_use]
    pub fn punch() -> Self {
        Self {
            damage: 4.0,
            stamina_cost: 10.0,
            frames: 25,
            reach: 0.8,
            band_top: 0.15,
            band_height: 0.2,
        }
    }

    /// Kick: medium mid band.
    #[must_use]
    pub fn kick() -> Self {
        Self {
            damage: 6.0,
            stamina_cost: 20.0,
            frames: 40,
            reach: 1.0,
            band_top: 0.45,
            band_height: 0.25,
        }
    }

    /// Takedown shot: wide, low band catching torso and legs.
    #[must_use]
    pub fn takedown() -> Self {
        Self {
            damage: 12.0,
            stamina_cost: 25.0,
            frames: 50,
            reach: 1.2,
            band_top: 0.4,
            band_height: 0.4,
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        ensure_finite(&[
            (name, self.damage),
            (name, self.stamina_cost),
            (name, self.reach),
            (name, self.band_top),
            (name, self.band_height),
        ])?;
        if self.frames == 0 {
            return Err(ConfigError::invalid(name, "frames must be positive"));
        }
        if self.damage < 0.0 || self.stamina_cost < 0.0 {
            return Err(ConfigError::invalid(name, "damage and cost must be non-negative"));
        }
        if self.reach <= 0.0 || self.band_height <= 0.0 {
            return Err(ConfigError::invalid(name, "hitbox must have a positive size"));
        }
        Ok(())
    }
}

/// Combat and round balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    // === Arena ===
    /// Playfield width in pixels.
    pub arena_width: f32,
    /// Y of the floor line fighters stand on.
    pub ground_y: f32,
    /// Spawn x of the human fighter.
    pub player_start_x: f32,
    /// Spawn x of the AI fighter.
    pub enemy_start_x: f32,

    // === Fighters ===
    /// Body width.
    pub fighter_width: f32,
    /// Body height.
    pub fighter_height: f32,
    /// Starting and maximum health.
    pub max_health: f32,
    /// Starting and maximum stamina.
    pub max_stamina: f32,
    /// Walk speed in pixels per tick.
    pub move_speed: f32,
    /// Walk speed multiplier for the AI fighter (heavier pacing).
    pub enemy_speed_factor: f32,
    /// Takedown lunge speed as a multiple of walk speed, human fighter.
    pub player_lunge_factor: f32,
    /// Takedown lunge speed as a multiple of walk speed, AI fighter.
    pub enemy_lunge_factor: f32,
    /// No lunge once the gap is at most this fraction of body width.
    pub lunge_min_gap: f32,
    /// Stamina regained per tick while idle or walking.
    pub stamina_regen: f32,
    /// No action may start below this stamina.
    pub min_action_stamina: f32,

    // === Moves ===
    /// Jab profile.
    pub punch: MoveProfile,
    /// Kick profile.
    pub kick: MoveProfile,
    /// Takedown profile.
    pub takedown: MoveProfile,
    /// Guard duration in frames.
    pub block_frames: u32,
    /// Takedown is live while remaining frames are above this fraction of its duration...
    pub takedown_window_start: f32,
    /// ...and at or below this one.
    pub takedown_window_end: f32,
    /// Strikes only connect while more than this many frames remain.
    pub strike_active_min_frames: u32,

    // === Exchanges ===
    /// Stun after a clean strike.
    pub hit_stun_frames: u32,
    /// Knockdown after a landed takedown.
    pub slammed_frames: u32,
    /// Neutral recovery after a clash or a sprawl.
    pub recovery_frames: u32,
    /// Stamina both fighters lose when takedowns clash.
    pub clash_stamina_cost: f32,
    /// Stamina the shooter loses when the takedown is sprawled on.
    pub stuffed_takedown_stamina_cost: f32,
    /// Extra stamina the defender spends sprawling.
    pub sprawl_stamina_cost: f32,
    /// Push distance on clashes and sprawls.
    pub knockback: f32,
    /// Blocked strikes cost the defender `damage * this` stamina.
    pub block_stamina_factor: f32,

    // === Effects ===
    /// Blood particles for a landed takedown.
    pub takedown_blood: u32,
    /// Blood particles for a clean strike.
    pub strike_blood: u32,
    /// Blood particles for a blocked strike.
    pub blocked_blood: u32,
    /// Downward acceleration applied to particles each tick.
    pub particle_gravity: f32,
    /// How long a commentator shout stays up, in frames.
    pub shout_frames: u32,

    // === Round ===
    /// Round length in seconds.
    pub round_seconds: u32,
    /// Real-time delay between the deciding moment and game over.
    pub game_over_delay_secs: f32,
    /// Fixed simulation step in seconds.
    pub fixed_step_secs: f32,
    /// Cap on unsimulated time carried between frames.
    pub max_frame_backlog_secs: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: 800.0,
            ground_y: 400.0,
            player_start_x: 150.0,
            enemy_start_x: 550.0,

            // Fighters
            fighter_width: 100.0,
            fighter_height: 180.0,
            max_health: 100.0,
            max_stamina: 100.0,
            move_speed: 4.5,
            enemy_speed_factor: 0.5,
            player_lunge_factor: 1.2,
            enemy_lunge_factor: 0.8,
            lunge_min_gap: 0.8,
            stamina_regen: 0.4,
            min_action_stamina: 10.0,

            // Moves
            punch: MoveProfile::punch(),
            kick: MoveProfile::kick(),
            takedown: MoveProfile::takedown(),
            block_frames: 20,
            takedown_window_start: 0.3,
            takedown_window_end: 0.8,
            strike_active_min_frames: 5,

            // Exchanges
            hit_stun_frames: 25,
            slammed_frames: 80,
            recovery_frames: 15,
            clash_stamina_cost: 10.0,
            stuffed_takedown_stamina_cost: 15.0,
            sprawl_stamina_cost: 5.0,
            knockback: 20.0,
            block_stamina_factor: 2.0,

            // Effects
            takedown_blood: 15,
            strike_blood: 12,
            blocked_blood: 2,
            particle_gravity: 0.8,
            shout_frames: 90,

            // Round
            round_seconds: 180,
            game_over_delay_secs: 3.0,
            fixed_step_secs: 1.0 / 60.0,
            max_frame_backlog_secs: 0.2,
        }
    }
}

impl CombatTuning {
    /// Profile for an attack kind.
    #[must_use]
    pub fn profile(&self, kind: AttackKind) -> &MoveProfile {
        match kind {
            AttackKind::Punch => &self.punch,
            AttackKind::Kick => &self.kick,
            AttackKind::Takedown => &self.takedown,
        }
    }

    /// Whether a takedown with `remaining` frames left is in its live window.
    ///
    /// The same window drives the lunge and hit detection.
    #[must_use]
    pub fn takedown_window_open(&self, remaining: u32) -> bool {
        let total = self.takedown.frames as f32;
        let remaining = remaining as f32;
        remaining > total * self.takedown_window_start && remaining <= total * self.takedown_window_end
    }

    /// Check every value against the structural contracts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(&[
            ("arena_width", self.arena_width),
            ("ground_y", self.ground_y),
            ("player_start_x", self.player_start_x),
            ("enemy_start_x", self.enemy_start_x),
            ("fighter_width", self.fighter_width),
            ("fighter_height", self.fighter_height),
            ("max_health", self.max_health),
            ("max_stamina", self.max_stamina),
            ("move_speed", self.move_speed),
            ("enemy_speed_factor", self.enemy_speed_factor),
            ("player_lunge_factor", self.player_lunge_factor),
            ("enemy_lunge_factor", self.enemy_lunge_factor),
            ("lunge_min_gap", self.lunge_min_gap),
            ("stamina_regen", self.stamina_regen),
            ("min_action_stamina", self.min_action_stamina),
            ("takedown_window_start", self.takedown_window_start),
            ("takedown_window_end", self.takedown_window_end),
            ("clash_stamina_cost", self.clash_stamina_cost),
            ("stuffed_takedown_stamina_cost", self.stuffed_takedown_stamina_cost),
            ("sprawl_stamina_cost", self.sprawl_stamina_cost),
            ("knockback", self.knockback),
            ("block_stamina_factor", self.block_stamina_factor),
            ("particle_gravity", self.particle_gravity),
            ("game_over_delay_secs", self.game_over_delay_secs),
            ("fixed_step_secs", self.fixed_step_secs),
            ("max_frame_backlog_secs", self.max_frame_backlog_secs),
        ])?;
        if self.arena_width <= self.fighter_width {
            return Err(ConfigError::invalid(
                "arena_width",
                "arena must be wider than a fighter",
            ));
        }
        if self.fighter_width <= 0.0 || self.fighter_height <= 0.0 {
            return Err(ConfigError::invalid("fighter_width", "body must have a positive size"));
        }
        if self.max_health <= 0.0 || self.max_stamina <= 0.0 {
            return Err(ConfigError::invalid("max_health", "pools must be positive"));
        }
        if self.move_speed < 0.0 || self.stamina_regen < 0.0 {
            return Err(ConfigError::invalid("move_speed", "rates must be non-negative"));
        }

        self.punch.validate("punch")?;
        self.kick.validate("kick")?;
        self.takedown.validate("takedown")?;

        if !(self.takedown.damage > self.kick.damage && self.kick.damage > self.punch.damage) {
            return Err(ConfigError::Ordering(
                "damage must rank takedown > kick > punch".to_string(),
            ));
        }
        if !(self.takedown.stamina_cost > self.kick.stamina_cost
            && self.kick.stamina_cost > self.punch.stamina_cost)
        {
            return Err(ConfigError::Ordering(
                "stamina cost must rank takedown > kick > punch".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.takedown_window_start)
            || !(0.0..=1.0).contains(&self.takedown_window_end)
            || self.takedown_window_start >= self.takedown_window_end
        {
            return Err(ConfigError::invalid(
                "takedown_window_start",
                "window must satisfy 0 <= start < end <= 1",
            ));
        }

        for (field, frames) in [
            ("block_frames", self.block_frames),
            ("hit_stun_frames", self.hit_stun_frames),
            ("slammed_frames", self.slammed_frames),
            ("recovery_frames", self.recovery_frames),
        ] {
            if frames == 0 {
                return Err(ConfigError::invalid(field, "frames must be positive"));
            }
        }

        if self.round_seconds == 0 {
            return Err(ConfigError::invalid("round_seconds", "round must last at least a second"));
        }
        if self.fixed_step_secs <= 0.0 {
            return Err(ConfigError::invalid("fixed_step_secs", "step must be positive"));
        }
        if self.max_frame_backlog_secs < self.fixed_step_secs {
            return Err(ConfigError::invalid(
                "max_frame_backlog_secs",
                "backlog cap must fit at least one step",
            ));
        }
        if self.game_over_delay_secs < 0.0 {
            return Err(ConfigError::invalid("game_over_delay_secs", "delay must be non-negative"));
        }

        Ok(())
    }
}

/// Weights, distances and timers for the scripted opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Chance per tick of taking a fresh decision.
    pub decision_chance: f32,
    /// Chance of sprawling on a readable takedown.
    pub sprawl_chance: f32,
    /// Extra distance beyond attack range at which takedowns are read.
    pub sprawl_read_margin: f32,
    /// Attack range as a fraction of body width.
    pub attack_range: f32,
    /// Slack beyond attack range before the AI walks in.
    pub approach_buffer: f32,
    /// Minimum committed approach, in frames.
    pub approach_frames: u32,
    /// Random extra approach frames (exclusive upper bound).
    pub approach_jitter: u32,
    /// Minimum committed reposition, in frames.
    pub reposition_frames: u32,
    /// Random extra reposition frames (exclusive upper bound).
    pub reposition_jitter: u32,
    /// Chance of shooting a takedown from range while approaching.
    pub long_shot_chance: f32,
    /// Stamina needed for a long-range shot.
    pub long_shot_stamina: f32,
    /// Upper edge of the punch band.
    pub punch_band: f32,
    /// Upper edge of the kick band.
    pub kick_band: f32,
    /// Upper edge of the takedown band; the rest blocks.
    pub takedown_band: f32,
    /// Stamina needed to choose a punch.
    pub punch_stamina: f32,
    /// Stamina needed to choose a kick.
    pub kick_stamina: f32,
    /// Stamina needed to choose a takedown in range.
    pub takedown_stamina: f32,
    /// No takedown when closer than this fraction of body width.
    pub takedown_min_gap: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            decision_chance: 0.15,
            sprawl_chance: 0.5,
            sprawl_read_margin: 80.0,
            attack_range: 1.2,
            approach_buffer: 20.0,
            approach_frames: 30,
            approach_jitter: 30,
            reposition_frames: 20,
            reposition_jitter: 20,
            long_shot_chance: 0.03,
            long_shot_stamina: 50.0,
            punch_band: 0.40,
            kick_band: 0.70,
            takedown_band: 0.85,
            punch_stamina: 20.0,
            kick_stamina: 20.0,
            takedown_stamina: 40.0,
            takedown_min_gap: 0.5,
        }
    }
}

impl AiTuning {
    /// Check probabilities and stamina floors against the combat balance.
    ///
    /// Every AI stamina floor must cover the matching move's cost so the AI
    /// never picks a move the state machine would refuse.
    pub fn validate(&self, combat: &CombatTuning) -> Result<(), ConfigError> {
        ensure_finite(&[
            ("decision_chance", self.decision_chance),
            ("sprawl_chance", self.sprawl_chance),
            ("sprawl_read_margin", self.sprawl_read_margin),
            ("attack_range", self.attack_range),
            ("approach_buffer", self.approach_buffer),
            ("long_shot_chance", self.long_shot_chance),
            ("long_shot_stamina", self.long_shot_stamina),
            ("punch_band", self.punch_band),
            ("kick_band", self.kick_band),
            ("takedown_band", self.takedown_band),
            ("punch_stamina", self.punch_stamina),
            ("kick_stamina", self.kick_stamina),
            ("takedown_stamina", self.takedown_stamina),
            ("takedown_min_gap", self.takedown_min_gap),
        ])?;
        for (field, p) in [
            ("decision_chance", self.decision_chance),
            ("sprawl_chance", self.sprawl_chance),
            ("long_shot_chance", self.long_shot_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::invalid(field, "probability must be within [0, 1]"));
            }
        }

        if !(0.0 <= self.punch_band
            && self.punch_band <= self.kick_band
            && self.kick_band <= self.takedown_band
            && self.takedown_band <= 1.0)
        {
            return Err(ConfigError::Ordering(
                "bands must satisfy 0 <= punch <= kick <= takedown <= 1".to_string(),
            ));
        }

        for (field, floor, cost) in [
            ("punch_stamina", self.punch_stamina, combat.punch.stamina_cost),
            ("kick_stamina", self.kick_stamina, combat.kick.stamina_cost),
            ("takedown_stamina", self.takedown_stamina, combat.takedown.stamina_cost),
            ("long_shot_stamina", self.long_shot_stamina, combat.takedown.stamina_cost),
        ] {
            if floor < cost {
                return Err(ConfigError::invalid(
                    field,
                    format!("floor {floor} is below the move cost {cost}"),
                ));
            }
        }

        if self.attack_range <= 0.0 {
            return Err(ConfigError::invalid("attack_range", "range must be positive"));
        }

        Ok(())
    }
}

/// Reject NaN and infinities, which slip past every ordered comparison.
fn ensure_finite(fields: &[(&'static str, f32)]) -> Result<(), ConfigError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, value)) => Err(ConfigError::invalid(
            field,
            format!("{value} is not a finite number"),
        )),
        None => Ok(()),
    }
}
